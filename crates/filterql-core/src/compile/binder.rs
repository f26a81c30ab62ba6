use crate::{
    coerce::{CoercionError, CoercionRegistry},
    compile::{ExpressionLimit, Parameters},
    error::FilterError,
    field::{Field, FieldRegistry},
    parse::{FieldRef, FilterExpr, LogicalOp, ParamRef},
    predicate::Predicate,
    value::Value,
};

///
/// Binder
///
/// Post-order walk from `FilterExpr` to `Predicate`.
///
/// Each leaf resolves its field first, then its parameter, then coerces the
/// raw value. The running predicate count is checked against the limit as
/// each predicate is emitted, so an oversized filter fails at the first
/// predicate past the cap.
///

pub struct Binder<'a> {
    fields: &'a FieldRegistry,
    parameters: &'a Parameters,
    coercions: &'a CoercionRegistry,
    limit: ExpressionLimit,
    emitted: usize,
}

impl<'a> Binder<'a> {
    #[must_use]
    pub const fn new(
        fields: &'a FieldRegistry,
        parameters: &'a Parameters,
        coercions: &'a CoercionRegistry,
        limit: ExpressionLimit,
    ) -> Self {
        Self {
            fields,
            parameters,
            coercions,
            limit,
            emitted: 0,
        }
    }

    /// Predicates counted against the limit so far.
    #[must_use]
    pub const fn emitted(&self) -> usize {
        self.emitted
    }

    pub fn bind(&mut self, expr: &FilterExpr) -> Result<Predicate, FilterError> {
        match expr {
            FilterExpr::Comparison { field, op, param } => {
                let field = self.field(field)?;
                let value = self.coerce(field, param)?;

                self.emit(Predicate::Compare {
                    path: field.path.clone(),
                    op: *op,
                    value,
                })
            }

            FilterExpr::Between {
                field,
                low,
                high,
                negated,
            } => {
                let field = self.field(field)?;
                let low = self.coerce(field, low)?;
                let high = self.coerce(field, high)?;
                let between = self.emit(Predicate::Between {
                    path: field.path.clone(),
                    low,
                    high,
                })?;

                Ok(negate(between, *negated))
            }

            FilterExpr::In {
                field,
                param,
                negated,
            } => {
                let field = self.field(field)?;
                let Value::List(items) = self.raw(param)? else {
                    return Err(FilterError::TypeMismatch {
                        parameter: param.name.clone(),
                        expected: "a list",
                    });
                };
                let values = items
                    .iter()
                    .map(|item| self.coerce_raw(field, &param.name, item))
                    .collect::<Result<Vec<_>, _>>()?;
                let membership = self.emit(Predicate::In {
                    path: field.path.clone(),
                    values,
                })?;

                Ok(negate(membership, *negated))
            }

            FilterExpr::NullCheck { field, negated } => {
                let field = self.field(field)?;
                let null = self.emit(Predicate::IsNull {
                    path: field.path.clone(),
                })?;

                Ok(negate(null, *negated))
            }

            FilterExpr::Like {
                field,
                param,
                negated,
            } => {
                let field = self.field(field)?;
                let Value::Text(pattern) = self.coerce(field, param)? else {
                    return Err(FilterError::TypeMismatch {
                        parameter: param.name.clone(),
                        expected: "text",
                    });
                };
                let like = self.emit(Predicate::Like {
                    path: field.path.clone(),
                    pattern,
                })?;

                Ok(negate(like, *negated))
            }

            FilterExpr::Binary { op, children } => {
                let children = children
                    .iter()
                    .map(|child| self.bind(child))
                    .collect::<Result<Vec<_>, _>>()?;

                self.emit(match op {
                    LogicalOp::And => Predicate::And(children),
                    LogicalOp::Or => Predicate::Or(children),
                })
            }
        }
    }

    fn emit(&mut self, predicate: Predicate) -> Result<Predicate, FilterError> {
        self.emitted += 1;
        if self.limit.exceeded_by(self.emitted) {
            return Err(FilterError::ExpressionLimitExceeded {
                limit: self.limit.max().unwrap_or(self.emitted),
            });
        }

        Ok(predicate)
    }

    fn field(&self, field: &FieldRef) -> Result<&'a Field, FilterError> {
        self.fields.get(&field.name)
    }

    fn raw(&self, param: &ParamRef) -> Result<&'a Value, FilterError> {
        self.parameters
            .get(&param.name)
            .ok_or_else(|| FilterError::ParameterNotBound {
                parameter: param.name.clone(),
            })
    }

    fn coerce(&self, field: &Field, param: &ParamRef) -> Result<Value, FilterError> {
        let raw = self.raw(param)?;

        self.coerce_raw(field, &param.name, raw)
    }

    // A field parser always wins over the registry, including when the raw
    // value already has the field's type.
    fn coerce_raw(&self, field: &Field, parameter: &str, raw: &Value) -> Result<Value, FilterError> {
        let coerced = if raw.is_null() {
            Err(CoercionError::NullValue)
        } else if let Some(parser) = &field.parser {
            parser.parse(raw)
        } else {
            self.coercions.coerce(field.path.value_type.as_ref(), raw)
        };

        coerced.map_err(|source| FilterError::coercion(parameter, source))
    }
}

fn negate(predicate: Predicate, negated: bool) -> Predicate {
    if negated {
        Predicate::not(predicate)
    } else {
        predicate
    }
}
