use super::*;
use crate::{error::FilterError, predicate::CompareOp};

fn leaf_name(expr: &FilterExpr) -> String {
    match expr {
        FilterExpr::Comparison { field, .. }
        | FilterExpr::Between { field, .. }
        | FilterExpr::In { field, .. }
        | FilterExpr::NullCheck { field, .. }
        | FilterExpr::Like { field, .. } => field.name.clone(),
        FilterExpr::Binary { .. } => panic!("expected a leaf, got {expr:?}"),
    }
}

fn syntax_error(text: &str) -> (Position, String) {
    match parse(text) {
        Err(FilterError::Syntax { position, message }) => (position, message),
        other => panic!("expected a syntax error for {text:?}, got {other:?}"),
    }
}

#[test]
fn comparison_operators_map_to_compare_ops() {
    let cases = [
        ("age = :a", CompareOp::Eq),
        ("age != :a", CompareOp::Ne),
        ("age <> :a", CompareOp::Ne),
        ("age < :a", CompareOp::Lt),
        ("age <= :a", CompareOp::Lte),
        ("age > :a", CompareOp::Gt),
        ("age >= :a", CompareOp::Gte),
    ];

    for (text, expected) in cases {
        let FilterExpr::Comparison { field, op, param } = parse(text).unwrap() else {
            panic!("{text} did not parse as a comparison");
        };
        assert_eq!(field.name, "age");
        assert_eq!(op, expected, "{text}");
        assert_eq!(param.name, "a");
    }
}

#[test]
fn and_binds_tighter_than_or() {
    let expr = parse("a = :one OR b = :two AND c = :three").unwrap();

    let FilterExpr::Binary { op, children } = expr else {
        panic!("expected an OR group");
    };
    assert_eq!(op, LogicalOp::Or);
    assert_eq!(children.len(), 2);
    assert_eq!(leaf_name(&children[0]), "a");

    let FilterExpr::Binary { op, children } = &children[1] else {
        panic!("expected an AND group on the right");
    };
    assert_eq!(*op, LogicalOp::And);
    let names: Vec<_> = children.iter().map(leaf_name).collect();
    assert_eq!(names, ["b", "c"]);
}

#[test]
fn operator_groups_collect_operands_left_to_right() {
    let FilterExpr::Binary { op, children } = parse("a = :a AND b = :b AND c = :c").unwrap() else {
        panic!("expected an AND group");
    };

    assert_eq!(op, LogicalOp::And);
    let names: Vec<_> = children.iter().map(leaf_name).collect();
    assert_eq!(names, ["a", "b", "c"]);
}

#[test]
fn parentheses_override_precedence() {
    let FilterExpr::Binary { op, children } = parse("(a = :a OR b = :b) AND c = :c").unwrap() else {
        panic!("expected an AND group");
    };

    assert_eq!(op, LogicalOp::And);
    assert!(matches!(
        &children[0],
        FilterExpr::Binary {
            op: LogicalOp::Or,
            ..
        }
    ));
    assert_eq!(leaf_name(&children[1]), "c");
}

#[test]
fn single_operand_is_not_wrapped() {
    let expr = parse("((name = :n))").unwrap();

    assert!(matches!(expr, FilterExpr::Comparison { .. }));
}

#[test]
fn negatable_forms_record_negation() {
    assert!(matches!(
        parse("price BETWEEN :lo AND :hi").unwrap(),
        FilterExpr::Between { negated: false, .. }
    ));
    assert!(matches!(
        parse("price NOT BETWEEN :lo AND :hi").unwrap(),
        FilterExpr::Between { negated: true, .. }
    ));
    assert!(matches!(
        parse("id NOT IN :ids").unwrap(),
        FilterExpr::In { negated: true, .. }
    ));
    assert!(matches!(
        parse("name NOT LIKE :p").unwrap(),
        FilterExpr::Like { negated: true, .. }
    ));
    assert!(matches!(
        parse("name IS NULL").unwrap(),
        FilterExpr::NullCheck { negated: false, .. }
    ));
    assert!(matches!(
        parse("name IS NOT NULL").unwrap(),
        FilterExpr::NullCheck { negated: true, .. }
    ));
}

#[test]
fn between_keeps_bound_order() {
    let FilterExpr::Between { low, high, .. } = parse("price BETWEEN :max AND :min").unwrap() else {
        panic!("expected BETWEEN");
    };

    assert_eq!(low.name, "max");
    assert_eq!(high.name, "min");
}

#[test]
fn keywords_are_case_insensitive() {
    let expr = parse("name like :p and not_a_keyword is not null Or id not in :ids").unwrap();

    assert!(matches!(
        expr,
        FilterExpr::Binary {
            op: LogicalOp::Or,
            ..
        }
    ));
    assert_eq!(expr.parameters(), ["p", "ids"]);
}

#[test]
fn dotted_fields_are_joined() {
    let FilterExpr::Comparison { field, .. } = parse("teacher.affiliation.name = :a").unwrap() else {
        panic!("expected a comparison");
    };

    assert_eq!(field.name, "teacher.affiliation.name");
    assert_eq!(field.position, Position::new(1, 0));
}

#[test]
fn block_comments_are_skipped() {
    let text = "/** courses for beginners */ credits <= :max /* and */ AND /*x*/active = :on";
    let expr = parse(text).unwrap();

    assert_eq!(expr.parameters(), ["max", "on"]);
    assert_eq!(expr.node_count(), 3);
}

#[test]
fn unterminated_comment_is_rejected() {
    let (position, message) = syntax_error("name = :p /* open");

    assert_eq!(position, Position::new(1, 10));
    assert_eq!(message, "unterminated comment");
}

#[test]
fn empty_text_is_a_syntax_error() {
    let (position, message) = syntax_error("");
    assert_eq!(position, Position::new(1, 0));
    assert!(message.contains("<EOF>"), "{message}");

    let (_, message) = syntax_error("   /* only a comment */  ");
    assert!(message.contains("<EOF>"), "{message}");
}

#[test]
fn trailing_operator_reports_end_of_input_position() {
    let err = parse("name = :p AND").unwrap_err();

    assert_eq!(
        err.to_string(),
        "failed to parse query at line 1:13: unexpected <EOF>, expected a field name or '('"
    );
}

#[test]
fn positions_track_lines_and_columns() {
    let (position, message) = syntax_error("name = :p\nOR age");

    assert_eq!(position, Position::new(2, 6));
    assert!(message.contains("comparison operator"), "{message}");
}

#[test]
fn literal_values_are_not_accepted() {
    let (position, message) = syntax_error("name = 'x'");

    assert_eq!(position, Position::new(1, 7));
    assert_eq!(message, "unexpected character '''");

    let (_, message) = syntax_error("age = 5");
    assert!(message.contains("unexpected character '5'"), "{message}");
}

#[test]
fn missing_parameter_colon_is_rejected() {
    let (position, message) = syntax_error("name = value");

    assert_eq!(position, Position::new(1, 7));
    assert_eq!(
        message,
        "unexpected 'value', expected a parameter such as ':name'"
    );
}

#[test]
fn not_must_precede_a_negatable_operator() {
    let (_, message) = syntax_error("name NOT = :p");

    assert!(message.contains("after NOT"), "{message}");
}

#[test]
fn trailing_tokens_are_rejected() {
    let (position, message) = syntax_error("name = :p)");

    assert_eq!(position, Position::new(1, 9));
    assert!(message.ends_with("expected end of input"), "{message}");
}

#[test]
fn unbalanced_parentheses_are_rejected() {
    let (_, message) = syntax_error("(name = :p");

    assert!(message.contains("expected ')'"), "{message}");
}

#[test]
fn deep_nesting_is_bounded() {
    let text = format!("{}name = :p{}", "(".repeat(100), ")".repeat(100));
    let (_, message) = syntax_error(&text);

    assert!(message.contains("nested deeper"), "{message}");
}

#[test]
fn tokenize_ends_with_eof() {
    let tokens = tokenize("a<>:b").unwrap();
    let kinds: Vec<_> = tokens.into_iter().map(|t| t.kind).collect();

    assert_eq!(
        kinds,
        [
            TokenKind::Ident("a".to_string()),
            TokenKind::NotEq,
            TokenKind::Colon,
            TokenKind::Ident("b".to_string()),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn numeric_parameter_names_keep_precedence() {
    let FilterExpr::Binary { op, children } = parse("a=:1 OR b=:2 AND c=:3").unwrap() else {
        panic!("expected an OR group");
    };
    assert_eq!(op, LogicalOp::Or);
    assert_eq!(children.len(), 2);

    let FilterExpr::Comparison { field, param, .. } = &children[0] else {
        panic!("expected a comparison on the left");
    };
    assert_eq!((field.name.as_str(), param.name.as_str()), ("a", "1"));

    let FilterExpr::Binary { op, children } = &children[1] else {
        panic!("expected an AND group on the right");
    };
    assert_eq!(*op, LogicalOp::And);
    assert_eq!(
        children.iter().flat_map(FilterExpr::parameters).collect::<Vec<_>>(),
        ["2", "3"]
    );
}

#[test]
fn parameter_names_are_never_keywords() {
    let tokens = tokenize("id IN :in AND x = :null").unwrap();
    let kinds: Vec<_> = tokens.into_iter().map(|t| t.kind).collect();

    assert_eq!(
        kinds,
        [
            TokenKind::Ident("id".to_string()),
            TokenKind::In,
            TokenKind::Colon,
            TokenKind::Ident("in".to_string()),
            TokenKind::And,
            TokenKind::Ident("x".to_string()),
            TokenKind::Eq,
            TokenKind::Colon,
            TokenKind::Ident("null".to_string()),
            TokenKind::Eof,
        ]
    );

    let FilterExpr::Like { param, .. } = parse("name LIKE :2nd_pattern").unwrap() else {
        panic!("expected LIKE");
    };
    assert_eq!(param.name, "2nd_pattern");
    assert_eq!(param.position, Position::new(1, 10));
}

#[test]
fn identifiers_are_ascii_only() {
    let (position, message) = syntax_error("nåme = :p");

    assert_eq!(position, Position::new(1, 1));
    assert_eq!(message, "unexpected character 'å'");

    let (_, message) = syntax_error("name = :pä");
    assert_eq!(message, "unexpected character 'ä'");
}
