//! Course catalogue schema shared by unit tests.

use crate::{
    field::{FieldRegistry, FieldSpec},
    schema::{EntityModel, Schema},
    value::TypeKey,
};

pub(crate) const COURSE: &str = "Course";

pub(crate) fn course_schema() -> Schema {
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
        .with_type(
            EntityModel::new("CourseDetails")
                .scalar("summary", TypeKey::Text)
                .relation_one("reviewer", "Teacher"),
        )
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

/// Fields over `course_schema`, covering root scalars, joined paths, an
/// aliased embedded path and a field that ends on a relation.
pub(crate) fn course_fields() -> FieldRegistry {
    let schema = course_schema();
    let mut builder = FieldRegistry::builder(&schema, COURSE).expect("course root");
    builder
        .add_fields([
            FieldSpec::orderable_field("id"),
            FieldSpec::orderable_field("name"),
            FieldSpec::new("code"),
            FieldSpec::new("active"),
            FieldSpec::orderable_field("credits"),
            FieldSpec::orderable_field("price"),
            FieldSpec::orderable_field("startDate"),
            FieldSpec::new("teacher"),
            FieldSpec::new("teacher.name"),
            FieldSpec::new("teacher.age"),
            FieldSpec::new("tags.name"),
            FieldSpec::new("details.summary").alias("summary"),
        ])
        .expect("course fields");

    builder.build()
}
