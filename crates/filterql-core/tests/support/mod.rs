//! Course catalogue used by the integration tests: schema, a provider with
//! unit-suffixed field parsers, and a backend that renders predicates as
//! SQL-like text.
#![allow(dead_code)]

use filterql_core::{
    coerce::{CoercionError, DoubleParser, LongParser, ValueParser},
    compile::ExpressionLimit,
    config::CompilerConfig,
    field::{FieldRegistry, FieldSpec},
    predicate::{CompareOp, ExpressionBuilder},
    prelude::*,
    schema::{JoinParent, ResolvedPath},
};
use regex::Regex;
use std::sync::LazyLock;

pub const COURSE: &str = "Course";

pub const GBP_RATE: f64 = 1.30;
pub const EUR_RATE: f64 = 1.12;

pub fn course_schema() -> Schema {
    Schema::new()
        .with_type(
            EntityModel::new(COURSE)
                .scalar("id", TypeKey::Long)
                .scalar("name", TypeKey::Text)
                .scalar("description", TypeKey::Text)
                .scalar("code", TypeKey::Text)
                .scalar("active", TypeKey::Bool)
                .scalar("credits", TypeKey::Int)
                .scalar("price", TypeKey::Double)
                .scalar("duration", TypeKey::Long)
                .scalar("startDate", TypeKey::Date)
                .scalar("endDate", TypeKey::Date)
                .embedded("details", "CourseDetails")
                .relation_many("tags", "Tag")
                .relation_one("teacher", "Teacher")
                .relation_many("attachments", "Attachment"),
        )
        .with_type(EntityModel::new("CourseDetails").scalar("summary", TypeKey::Text))
        .with_type(
            EntityModel::new("Tag")
                .scalar("id", TypeKey::Long)
                .scalar("name", TypeKey::Text),
        )
        .with_type(
            EntityModel::new("Teacher")
                .scalar("id", TypeKey::Long)
                .scalar("name", TypeKey::Text)
                .scalar("age", TypeKey::Int)
                .relation_one("affiliation", "Affiliation"),
        )
        .with_type(
            EntityModel::new("Affiliation")
                .scalar("id", TypeKey::Long)
                .scalar("name", TypeKey::Text),
        )
        .with_type(
            EntityModel::new("Attachment")
                .scalar("id", TypeKey::Long)
                .scalar("name", TypeKey::Text)
                .scalar("size", TypeKey::Long),
        )
}

pub fn course_fields() -> FieldRegistry {
    let schema = course_schema();
    let mut builder = FieldRegistry::builder(&schema, COURSE).expect("course root");
    builder
        .add_fields([
            FieldSpec::orderable_field("id"),
            FieldSpec::orderable_field("name"),
            FieldSpec::orderable_field("description"),
            FieldSpec::orderable_field("code"),
            FieldSpec::orderable_field("active"),
            FieldSpec::orderable_field("credits"),
            FieldSpec::orderable_field("price").parser(CurrencyParser),
            FieldSpec::orderable_field("duration").parser(DurationParser),
            FieldSpec::orderable_field("details.summary").alias("summary"),
            FieldSpec::orderable_field("startDate"),
            FieldSpec::orderable_field("endDate"),
            FieldSpec::new("tags.name").alias("tags"),
            FieldSpec::new("teacher.name"),
            FieldSpec::new("teacher.age"),
            FieldSpec::new("teacher.affiliation.name"),
            FieldSpec::new("attachments.size").parser(ByteSizeParser),
            FieldSpec::new("attachments.name"),
        ])
        .expect("course fields");

    builder.build()
}

/// Provider capped at three predicates per filter.
pub fn course_provider() -> QueryProvider {
    QueryProvider::new(course_fields(), CoercionRegistry::new()).with_config(CompilerConfig {
        max_expressions: ExpressionLimit::Max(3),
        distinct: true,
    })
}

/// Compile `text` with `params` bound and render the whole filter.
pub fn render(text: &str, params: &[(&str, Value)]) -> Result<String, filterql_core::FilterError> {
    let provider = course_provider();
    let mut query = provider.query(text);
    query.bind_parameters(params.iter().cloned())?;

    let compiled = query.compile()?;
    Ok(compiled
        .filter
        .lower(&mut SqlRenderer)
        .unwrap_or_else(|| "TRUE".to_string()))
}

///
/// Field parsers
///

static CURRENCY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<value>\d+(?:\.\d{1,2})?)(?P<currency>GBP|EUR)$").expect("currency regex")
});

static DURATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<value>\d+)(?P<unit>MINS|SECONDS|HOURS|DAYS)$").expect("duration regex")
});

static BYTE_SIZE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<value>\d+(?:\.\d+)?)(?P<unit>KB|KIB|MB|MIB|GB|GIB)$").expect("size regex")
});

/// Prices in GBP or EUR, converted to the stored currency.
pub struct CurrencyParser;

impl ValueParser for CurrencyParser {
    fn parse(&self, value: &Value) -> Result<Value, CoercionError> {
        let Some(text) = value.as_text() else {
            return DoubleParser.parse(value);
        };
        let caps = CURRENCY
            .captures(text)
            .ok_or_else(|| CoercionError::invalid(value, "currency"))?;
        let amount: f64 = caps["value"]
            .parse()
            .map_err(|_| CoercionError::invalid(value, "currency"))?;
        let rate = if &caps["currency"] == "GBP" {
            GBP_RATE
        } else {
            EUR_RATE
        };

        Ok(Value::Double(amount * rate))
    }
}

/// Durations such as `10HOURS`, in milliseconds.
pub struct DurationParser;

impl ValueParser for DurationParser {
    fn parse(&self, value: &Value) -> Result<Value, CoercionError> {
        let Some(text) = value.as_text() else {
            return LongParser.parse(value);
        };
        let caps = DURATION
            .captures(text)
            .ok_or_else(|| CoercionError::invalid(value, "duration"))?;
        let amount: i64 = caps["value"]
            .parse()
            .map_err(|_| CoercionError::invalid(value, "duration"))?;
        let millis = match &caps["unit"] {
            "SECONDS" => 1_000,
            "MINS" => 60_000,
            "HOURS" => 3_600_000,
            _ => 86_400_000,
        };

        Ok(Value::Long(amount * millis))
    }
}

/// Sizes such as `1MB` or `2KIB`, in bytes.
pub struct ByteSizeParser;

impl ValueParser for ByteSizeParser {
    fn parse(&self, value: &Value) -> Result<Value, CoercionError> {
        let Some(text) = value.as_text() else {
            return LongParser.parse(value);
        };
        let Some(caps) = BYTE_SIZE.captures(text) else {
            return LongParser.parse(value);
        };
        let amount: f64 = caps["value"]
            .parse()
            .map_err(|_| CoercionError::invalid(value, "bytes"))?;
        let factor: f64 = match &caps["unit"] {
            "KB" => 1e3,
            "KIB" => 1024.0,
            "MB" => 1e6,
            "MIB" => 1024.0 * 1024.0,
            "GB" => 1e9,
            _ => 1024.0 * 1024.0 * 1024.0,
        };

        #[allow(clippy::cast_possible_truncation)]
        let bytes = (amount * factor) as i64;

        Ok(Value::Long(bytes))
    }
}

///
/// SqlRenderer
/// Backend stand-in that renders predicates as SQL-like text.
///

pub struct SqlRenderer;

impl SqlRenderer {
    fn column(path: &ResolvedPath) -> String {
        let source = match path.source {
            JoinParent::Root => "c".to_string(),
            JoinParent::Join(id) => id.to_string(),
        };

        if path.attributes.is_empty() {
            format!("{source}.id")
        } else {
            format!("{source}.{}", path.attributes.join("_"))
        }
    }
}

impl ExpressionBuilder for SqlRenderer {
    type Expr = String;

    fn compare(&mut self, path: &ResolvedPath, op: CompareOp, value: &Value) -> String {
        format!("{} {op} {value}", Self::column(path))
    }

    fn between(&mut self, path: &ResolvedPath, low: &Value, high: &Value) -> String {
        format!("{} BETWEEN {low} AND {high}", Self::column(path))
    }

    fn in_list(&mut self, path: &ResolvedPath, values: &[Value]) -> String {
        let list = Value::List(values.to_vec());
        format!("{} IN {list}", Self::column(path))
    }

    fn is_null(&mut self, path: &ResolvedPath) -> String {
        format!("{} IS NULL", Self::column(path))
    }

    fn like(&mut self, path: &ResolvedPath, pattern: &str) -> String {
        format!("{} LIKE {}", Self::column(path), Value::from(pattern))
    }

    fn and(&mut self, operands: Vec<String>) -> String {
        format!("({})", operands.join(" AND "))
    }

    fn or(&mut self, operands: Vec<String>) -> String {
        format!("({})", operands.join(" OR "))
    }

    fn not(&mut self, operand: String) -> String {
        format!("NOT ({operand})")
    }
}
