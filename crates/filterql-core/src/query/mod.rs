//! Module: query
//! Responsibility: per-request query state (filter text, parameters,
//! predefined expressions, ordering, pagination) and its compilation into
//! row and count projections.
//! Boundary: the compiled output is handed to an external backend; nothing
//! here executes a query.

mod provider;


use crate::{
    coerce::CoercionRegistry,
    compile::{ExpressionLimit, compile_filter},
    error::{FilterError, OrderError},
    field::FieldRegistry,
    predicate::{ExpressionBuilder, Predicate},
    schema::{JoinSet, ResolvedPath},
    value::Value,
};
use std::{fmt, str::FromStr, sync::Arc};

// re-exports
pub use crate::compile::Parameters;
pub use provider::QueryProvider;

///
/// OrderDirection
///

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum OrderDirection {
    #[default]
    Asc,
    Desc,
}

impl FromStr for OrderDirection {
    type Err = OrderError;

    /// Only the exact lowercase words `asc` and `desc` are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(OrderError::UnknownDirection {
                direction: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for OrderDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        })
    }
}

///
/// OrderSpec
/// Single ordering key over an orderable field.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OrderSpec {
    pub field: String,
    pub path: ResolvedPath,
    pub direction: OrderDirection,
}

///
/// Pagination
///
/// `limit == None` means no row limit. The default is offset 0 with no
/// limit.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Pagination {
    pub limit: Option<u64>,
    pub offset: u64,
}

impl Pagination {
    pub const DEFAULT: Self = Self {
        limit: None,
        offset: 0,
    };

    /// Checked constructor for caller-supplied values; both must be
    /// non-negative.
    pub fn new(limit: i64, offset: i64) -> Result<Self, FilterError> {
        match (u64::try_from(limit), u64::try_from(offset)) {
            (Ok(limit), Ok(offset)) => Ok(Self {
                limit: Some(limit),
                offset,
            }),
            _ => Err(FilterError::InvalidPagination { limit, offset }),
        }
    }
}

///
/// CompiledFilter
///
/// Top-level conjuncts of a compiled query: the filter text's predicate
/// first, if any, then predefined expressions in insertion order.
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CompiledFilter {
    conjuncts: Vec<Predicate>,
}

impl CompiledFilter {
    #[must_use]
    pub fn conjuncts(&self) -> &[Predicate] {
        &self.conjuncts
    }

    /// True when nothing restricts the rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.conjuncts.is_empty()
    }

    /// The whole filter as one predicate: `None` when empty, the predicate
    /// itself when there is exactly one, otherwise their `AND`.
    #[must_use]
    pub fn predicate(&self) -> Option<Predicate> {
        match self.conjuncts.as_slice() {
            [] => None,
            [single] => Some(single.clone()),
            many => Some(Predicate::And(many.to_vec())),
        }
    }

    /// Build the filter with a backend, with the same shape as `predicate`.
    pub fn lower<B: ExpressionBuilder + ?Sized>(&self, builder: &mut B) -> Option<B::Expr> {
        match self.conjuncts.as_slice() {
            [] => None,
            [single] => Some(single.lower(builder)),
            many => {
                let operands = many.iter().map(|pred| pred.lower(builder)).collect();
                Some(builder.and(operands))
            }
        }
    }
}

///
/// CompiledQuery
/// Row projection handed to a backend.
///

#[derive(Clone, Debug, PartialEq)]
pub struct CompiledQuery {
    pub filter: CompiledFilter,
    pub order: Option<OrderSpec>,
    pub pagination: Pagination,
    pub distinct: bool,
    pub joins: JoinSet,
}

///
/// CompiledCount
/// Count projection; never ordered or paginated.
///

#[derive(Clone, Debug, PartialEq)]
pub struct CompiledCount {
    pub filter: CompiledFilter,
    pub distinct: bool,
    pub joins: JoinSet,
}

///
/// QueryModel
///
/// Filter state shared in shape, but not in storage, by a row query and its
/// count query. Each instance owns its parameters and predefined list.
///

#[derive(Clone, Debug)]
struct QueryModel {
    fields: Arc<FieldRegistry>,
    coercions: CoercionRegistry,
    limit: ExpressionLimit,
    text: Option<String>,
    parameters: Parameters,
    predefined: Vec<Predicate>,
}

impl QueryModel {
    fn compile(&self) -> Result<CompiledFilter, FilterError> {
        let root = compile_filter(
            self.text.as_deref(),
            &self.fields,
            &self.parameters,
            &self.coercions,
            self.limit,
        )?;

        let conjuncts = root
            .into_iter()
            .chain(self.predefined.iter().cloned())
            .collect();

        Ok(CompiledFilter { conjuncts })
    }
}

///
/// CountQuery
/// Mirror of a `FilterQuery` that compiles to a count projection.
///

#[derive(Clone, Debug)]
pub struct CountQuery {
    model: QueryModel,
}

impl CountQuery {
    pub fn compile(&self, distinct: bool) -> Result<CompiledCount, FilterError> {
        let filter = self.model.compile()?;

        Ok(CompiledCount {
            filter,
            distinct,
            joins: self.model.fields.joins().clone(),
        })
    }

    #[must_use]
    pub const fn parameters(&self) -> &Parameters {
        &self.model.parameters
    }

    #[must_use]
    pub fn predefined(&self) -> &[Predicate] {
        &self.model.predefined
    }
}

///
/// FilterQuery
///
/// One logical query: optional filter text plus everything bound to it
/// before compilation. Parameters and predefined expressions are mirrored
/// onto the count query as they are added, so both compile the same filter.
///

#[derive(Clone, Debug)]
pub struct FilterQuery {
    model: QueryModel,
    count: CountQuery,
    order: Option<OrderSpec>,
    pagination: Pagination,
    distinct: bool,
}

impl FilterQuery {
    pub(crate) fn new(
        fields: Arc<FieldRegistry>,
        coercions: CoercionRegistry,
        limit: ExpressionLimit,
        text: Option<&str>,
        distinct: bool,
    ) -> Self {
        let model = QueryModel {
            fields,
            coercions,
            limit,
            text: text.map(str::to_string),
            parameters: Parameters::new(),
            predefined: Vec::new(),
        };

        Self {
            count: CountQuery {
                model: model.clone(),
            },
            model,
            order: None,
            pagination: Pagination::DEFAULT,
            distinct,
        }
    }

    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.model.text.as_deref()
    }

    #[must_use]
    pub fn fields(&self) -> &FieldRegistry {
        &self.model.fields
    }

    #[must_use]
    pub const fn parameters(&self) -> &Parameters {
        &self.model.parameters
    }

    #[must_use]
    pub const fn order(&self) -> Option<&OrderSpec> {
        self.order.as_ref()
    }

    #[must_use]
    pub const fn pagination(&self) -> Pagination {
        self.pagination
    }

    #[must_use]
    pub const fn count_query(&self) -> &CountQuery {
        &self.count
    }

    /// Bind a raw value to `:name`, on this query and its count query.
    pub fn bind_parameter(
        &mut self,
        name: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<&mut Self, FilterError> {
        let name = name.into();
        let value = value.into();

        self.model.parameters.bind(name.clone(), value.clone())?;
        self.count.model.parameters.bind(name, value)?;

        Ok(self)
    }

    /// Bind every entry, stopping at the first duplicate.
    pub fn bind_parameters<I, K, V>(&mut self, parameters: I) -> Result<&mut Self, FilterError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        for (name, value) in parameters {
            self.bind_parameter(name, value)?;
        }

        Ok(self)
    }

    /// Order by an orderable field. `direction` must be exactly `asc` or
    /// `desc`. Replaces any earlier order.
    pub fn set_order(&mut self, name: &str, direction: &str) -> Result<&mut Self, FilterError> {
        let direction = direction.parse::<OrderDirection>()?;

        self.set_order_by(name, direction)
    }

    pub fn set_order_by(
        &mut self,
        name: &str,
        direction: OrderDirection,
    ) -> Result<&mut Self, FilterError> {
        let field = self
            .model
            .fields
            .find(name)
            .ok_or_else(|| OrderError::UnknownField {
                field: name.to_string(),
            })?;

        if !field.is_orderable() {
            return Err(OrderError::NotOrderable {
                field: name.to_string(),
            }
            .into());
        }

        self.order = Some(OrderSpec {
            field: field.name.clone(),
            path: field.path.clone(),
            direction,
        });

        Ok(self)
    }

    /// Checked pagination from caller-supplied values.
    pub fn set_pagination(&mut self, limit: i64, offset: i64) -> Result<&mut Self, FilterError> {
        self.pagination = Pagination::new(limit, offset)?;

        Ok(self)
    }

    pub const fn set_page(&mut self, pagination: Pagination) -> &mut Self {
        self.pagination = pagination;
        self
    }

    pub const fn set_distinct(&mut self, distinct: bool) -> &mut Self {
        self.distinct = distinct;
        self
    }

    /// Add a backend-neutral predicate that is ANDed after the filter text.
    /// It is not counted against the expression limit.
    pub fn add_predefined_expression(&mut self, predicate: Predicate) -> &mut Self {
        self.count.model.predefined.push(predicate.clone());
        self.model.predefined.push(predicate);
        self
    }

    /// Build a predefined expression from the field registry, for callers
    /// that need resolved paths.
    pub fn add_expression_with<F>(&mut self, build: F) -> Result<&mut Self, FilterError>
    where
        F: FnOnce(&FieldRegistry) -> Result<Predicate, FilterError>,
    {
        let predicate = build(&self.model.fields)?;

        Ok(self.add_predefined_expression(predicate))
    }

    /// Compile the row projection.
    pub fn compile(&self) -> Result<CompiledQuery, FilterError> {
        let filter = self.model.compile()?;

        tracing::debug!(
            conjuncts = filter.conjuncts().len(),
            order = ?self.order.as_ref().map(|order| &order.field),
            "compiled row query"
        );

        Ok(CompiledQuery {
            filter,
            order: self.order.clone(),
            pagination: self.pagination,
            distinct: self.distinct,
            joins: self.model.fields.joins().clone(),
        })
    }

    /// Compile the count projection with distinct counting.
    pub fn count(&self) -> Result<CompiledCount, FilterError> {
        self.count_with(true)
    }

    pub fn count_with(&self, distinct: bool) -> Result<CompiledCount, FilterError> {
        self.count.compile(distinct)
    }
}
