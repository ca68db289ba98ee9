// tests/parser_tests.rs

use condition_lang::ast::{InOp, Operator, ParseTree, Punct, Token, TokenType};
use condition_lang::lexer::tokenize;
use condition_lang::parser::{ConditionSyntaxError, Expected, Parser};

fn tokens(src: &str) -> Vec<Token> {
    tokenize(src).unwrap_or_else(|e| panic!("Failed to tokenize: {src}\nError: {e}"))
}

fn parse_ok(src: &str) -> ParseTree {
    Parser::new()
        .parse(&tokens(src))
        .unwrap_or_else(|e| panic!("Failed to parse: {src}\nError: {e}"))
}

fn parse_err(src: &str) -> ConditionSyntaxError {
    Parser::new()
        .parse(&tokens(src))
        .expect_err(&format!("Expected syntax error for: {src}"))
}

fn children_of(tree: &ParseTree) -> Vec<String> {
    tree.root().children().map(|c| c.token().to_string()).collect()
}

const VALUE_SET: &[TokenType] = &[TokenType::Parameter, TokenType::Column, TokenType::Number];

// ============================================================================
// Valid conditions
// ============================================================================

#[test]
fn test_comparison() {
    let tree = parse_ok(r#"{"$eq": {"name": ":nameParam"}}"#);

    assert_eq!(tree.root().token().to_string(), "comparison-operator:$eq");
    assert_eq!(children_of(&tree), vec!["column:name", "parameter::nameParam"]);
    assert_eq!(tree.len(), 3);
}

#[test]
fn test_in_comparison() {
    let tree = parse_ok(r#"{"$in": {"id": [1, 2, 3]}}"#);

    assert_eq!(tree.root().token().to_string(), "in-comparison-operator:$in");
    assert_eq!(
        children_of(&tree),
        vec!["column:id", "number:1", "number:2", "number:3"]
    );
}

#[test]
fn test_not_in_single_value() {
    let tree = parse_ok(r#"{"$notIn": {"status": [":closed"]}}"#);

    assert_eq!(tree.root().token().as_operator(), Some(Operator::In(InOp::NotIn)));
    assert_eq!(children_of(&tree), vec!["column:status", "parameter::closed"]);
}

#[test]
fn test_null_comparison() {
    let tree = parse_ok(r#"{"$is": {"deletedAt": null}}"#);

    assert_eq!(tree.root().token().to_string(), "null-comparison-operator:$is");
    assert_eq!(children_of(&tree), vec!["column:deletedAt", "null:null"]);
}

#[test]
fn test_null_comparison_with_parameter() {
    let tree = parse_ok(r#"{"$isnt": {"deletedAt": ":deleted"}}"#);
    assert_eq!(children_of(&tree), vec!["column:deletedAt", "parameter::deleted"]);
}

#[test]
fn test_comparison_against_column() {
    let tree = parse_ok(r#"{"$like": {"users.name": "users.nickname"}}"#);
    assert_eq!(children_of(&tree), vec!["column:users.name", "column:users.nickname"]);
}

#[test]
fn test_logical_condition() {
    let tree = parse_ok(r#"{"$and": [{"$eq": {"a": ":x"}}, {"$gt": {"b": 5}}]}"#);
    let root = tree.root();

    assert_eq!(root.token().to_string(), "boolean-operator:$and");
    assert_eq!(root.children().len(), 2);

    let first = root.child(0).unwrap();
    assert_eq!(first.token().to_string(), "comparison-operator:$eq");
    let first_children: Vec<String> = first.children().map(|c| c.token().to_string()).collect();
    assert_eq!(first_children, vec!["column:a", "parameter::x"]);

    let second = root.child(1).unwrap();
    assert_eq!(second.token().to_string(), "comparison-operator:$gt");
    let second_children: Vec<String> = second.children().map(|c| c.token().to_string()).collect();
    assert_eq!(second_children, vec!["column:b", "number:5"]);
}

#[test]
fn test_logical_siblings_stay_under_operator() {
    let tree = parse_ok(
        r#"{"$or": [
            {"$eq": {"a": 1}},
            {"$in": {"b": [2, 3]}},
            {"$is": {"c": null}},
            {"$neq": {"d": ":d"}}
        ]}"#,
    );

    let root = tree.root();
    assert_eq!(root.children().len(), 4);
    for child in root.children() {
        assert_eq!(child.depth(), 1);
        assert!(child.token().token_type.is_operator());
        assert!(child.children().all(|leaf| leaf.is_leaf()));
    }
}

#[test]
fn test_nested_logical_conditions() {
    let tree = parse_ok(
        r#"{"$or": [
            {"$and": [{"$eq": {"a": 1}}, {"$eq": {"b": 2}}]},
            {"$is": {"c": null}}
        ]}"#,
    );

    let root = tree.root();
    assert_eq!(root.token().to_string(), "boolean-operator:$or");
    assert_eq!(root.children().len(), 2);

    let and = root.child(0).unwrap();
    assert_eq!(and.token().to_string(), "boolean-operator:$and");
    assert_eq!(and.children().len(), 2);
    assert_eq!(and.child(1).unwrap().child(0).unwrap().depth(), 3);

    let is = root.child(1).unwrap();
    assert_eq!(is.token().to_string(), "null-comparison-operator:$is");
    assert_eq!(is.parent().unwrap().id(), root.id());
}

#[test]
fn test_deeply_nested_single_branch() {
    let mut src = String::new();
    for _ in 0..50 {
        src.push_str(r#"{"$and": ["#);
    }
    src.push_str(r#"{"$eq": {"a": 1}}"#);
    for _ in 0..50 {
        src.push_str("]}");
    }

    let tree = parse_ok(&src);
    assert_eq!(tree.len(), 53);
    let deepest = tree.iter().last().unwrap();
    assert_eq!(deepest.token().to_string(), "number:1");
    assert_eq!(deepest.depth(), 51);
}

// ============================================================================
// Grammar violations
// ============================================================================

#[test]
fn test_missing_value() {
    let err = parse_err(r#"{"$eq": {"name": }}"#);

    assert_eq!(err.index(), 6);
    assert_eq!(err.expected(), Expected::OneOf(VALUE_SET));
    assert_eq!(err.found(), Some(&Token::punct(Punct::RBrace)));
    assert!(!err.is_premature_end());
    assert_eq!(
        err.to_string(),
        "At index 6.  Expected [parameter | column | number] but found type punctuation with value }."
    );
}

#[test]
fn test_trailing_input() {
    let err = parse_err(r#"{"$eq": {"name": ":x"}}, "EXTRA""#);

    assert!(matches!(err, ConditionSyntaxError::TrailingInput { index: 9, .. }));
    assert_eq!(err.expected(), Expected::Eol);
    assert_eq!(err.found(), Some(&Token::punct(Punct::Comma)));
    assert!(err.to_string().contains("Expected EOL"));
}

#[test]
fn test_unknown_pair_part() {
    let err = parse_err(r#"{"name": ":x"}"#);

    assert_eq!(err.index(), 1);
    assert_eq!(err.found(), Some(&Token::column("name")));
    assert_eq!(
        err.to_string(),
        "At index 1.  Expected [comparison-operator | null-comparison-operator | \
         in-comparison-operator | boolean-operator] but found type column with value name."
    );
}

#[test]
fn test_nullable_rejects_number() {
    let err = parse_err(r#"{"$is": {"deletedAt": 0}}"#);

    assert_eq!(err.index(), 6);
    assert_eq!(
        err.expected(),
        Expected::OneOf(&[TokenType::Null, TokenType::Parameter])
    );
    assert!(err.to_string().contains("[null | parameter]"));
}

#[test]
fn test_value_rejects_null() {
    let err = parse_err(r#"{"$eq": {"deletedAt": null}}"#);
    assert_eq!(err.index(), 6);
    assert_eq!(err.found(), Some(&Token::null()));
}

#[test]
fn test_column_must_be_column() {
    let err = parse_err(r#"{"$eq": {":x": 1}}"#);
    assert_eq!(err.index(), 4);
    assert_eq!(err.expected(), Expected::Type(TokenType::Column));
    assert!(err.to_string().contains("Expected <column>"));
}

#[test]
fn test_operator_category_must_match_shape() {
    // A comparison operator cannot take a value list.
    let err = parse_err(r#"{"$eq": {"id": [1, 2]}}"#);
    assert_eq!(err.index(), 6);
    assert_eq!(err.expected(), Expected::OneOf(VALUE_SET));

    // A boolean operator needs a list of conditions, not a column pair.
    let err = parse_err(r#"{"$and": {"a": 1}}"#);
    assert_eq!(err.index(), 3);
    assert_eq!(err.expected(), Expected::Punct(Punct::LBracket));
}

#[test]
fn test_empty_lists_rejected() {
    let err = parse_err(r#"{"$in": {"id": []}}"#);
    assert_eq!(err.index(), 7);
    assert_eq!(err.expected(), Expected::OneOf(VALUE_SET));

    let err = parse_err(r#"{"$or": []}"#);
    assert_eq!(err.index(), 4);
    assert_eq!(err.expected(), Expected::Punct(Punct::LBrace));
}

#[test]
fn test_multiple_columns_rejected() {
    let err = parse_err(r#"{"$eq": {"a": 1, "b": 2}}"#);
    assert_eq!(err.index(), 7);
    assert_eq!(err.expected(), Expected::Punct(Punct::RBrace));
}

#[test]
fn test_multiple_operators_rejected() {
    let err = parse_err(r#"{"$eq": {"a": 1}, "$eq": {"b": 2}}"#);
    assert_eq!(err.index(), 8);
    assert_eq!(err.expected(), Expected::Punct(Punct::RBrace));
}

#[test]
fn test_bare_operator_rejected() {
    let err = parse_err(r#""$eq""#);
    assert_eq!(err.index(), 0);
    assert_eq!(err.expected(), Expected::Punct(Punct::LBrace));
}

#[test]
fn test_comma_column_is_not_a_delimiter() {
    let in_op = Token::operator(Operator::In(InOp::In));
    let tokens = vec![
        Token::punct(Punct::LBrace),
        in_op,
        Token::punct(Punct::Colon),
        Token::punct(Punct::LBrace),
        Token::column("id"),
        Token::punct(Punct::Colon),
        Token::punct(Punct::LBracket),
        Token::number(1),
        Token::column(","),
        Token::number(2),
        Token::punct(Punct::RBracket),
        Token::punct(Punct::RBrace),
        Token::punct(Punct::RBrace),
    ];

    let err = Parser::new().parse(&tokens).unwrap_err();
    assert_eq!(err.index(), 8);
    assert_eq!(err.expected(), Expected::Punct(Punct::RBracket));
}

// ============================================================================
// Premature end of sentence
// ============================================================================

#[test]
fn test_empty_sentence() {
    let err = Parser::new().parse(&[]).unwrap_err();

    assert!(err.is_premature_end());
    assert_eq!(err.index(), 0);
    assert_eq!(err.expected(), Expected::Punct(Punct::LBrace));
    assert_eq!(err.found(), None);
}

#[test]
fn test_missing_closing_brace() {
    let err = parse_err(r#"{"$eq": {"name": ":x"}"#);

    assert!(err.is_premature_end());
    assert_eq!(err.index(), 8);
    assert_eq!(
        err.to_string(),
        "At index 8.  Expected } but encountered the end of the sentence prematurely."
    );
}

#[test]
fn test_unterminated_value_list() {
    let err = parse_err(r#"{"$in": {"id": [1, 2"#);

    assert!(err.is_premature_end());
    assert_eq!(err.index(), 10);
    assert_eq!(err.expected(), Expected::Punct(Punct::RBracket));
}

#[test]
fn test_end_after_comma() {
    let err = parse_err(r#"{"$or": [{"$eq": {"a": 1}},"#);

    assert!(err.is_premature_end());
    assert_eq!(err.expected(), Expected::Punct(Punct::LBrace));
}

#[test]
fn test_end_at_dispatch_point() {
    let err = parse_err("{");
    assert!(err.is_premature_end());
    assert_eq!(err.index(), 1);
    assert!(matches!(err.expected(), Expected::OneOf(types) if types.len() == 4));
}

// ============================================================================
// Properties
// ============================================================================

const VALID: &[&str] = &[
    r#"{"$eq": {"name": ":nameParam"}}"#,
    r#"{"$in": {"id": [1, 2, 3]}}"#,
    r#"{"$is": {"deletedAt": null}}"#,
    r#"{"$and": [{"$eq": {"a": ":x"}}, {"$gt": {"b": 5}}]}"#,
    r#"{"$or": [{"$and": [{"$lte": {"a": -1.5}}, {"$notlike": {"b": ":b"}}]}, {"$notIn": {"c": ["d", 2]}}]}"#,
];

#[test]
fn test_parse_is_deterministic() {
    let parser = Parser::new();
    for src in VALID {
        let tokens = tokens(src);
        assert_eq!(parser.parse(&tokens).unwrap(), parser.parse(&tokens).unwrap());
    }
}

#[test]
fn test_tree_shape_invariants() {
    for src in VALID {
        let tokens = tokens(src);
        let tree = Parser::new().parse(&tokens).unwrap();

        for node in tree.iter() {
            let token_type = node.token().token_type;
            assert_ne!(token_type, TokenType::Punctuation, "{src}");
            assert!(!node.token().terminal, "{src}");
            if node.is_leaf() {
                assert!(!token_type.is_operator(), "{src}");
            } else {
                assert!(token_type.is_operator(), "{src}");
            }
        }

        let semantic = tokens.iter().filter(|t| !t.terminal).count();
        assert_eq!(tree.len(), semantic, "{src}");
    }
}

#[test]
fn test_input_is_not_mutated() {
    let tokens = tokens(VALID[3]);
    let before = tokens.clone();
    Parser::new().parse(&tokens).unwrap();
    assert_eq!(tokens, before);
}

#[test]
fn test_error_index_is_first_violation() {
    // Both the missing value and the trailing tokens are wrong; the first wins.
    let err = parse_err(r#"{"$eq": {"name": }}, {"$eq": {"a": 1}}"#);
    assert!(matches!(err, ConditionSyntaxError::Unexpected { index: 6, .. }));
}

#[test]
fn test_every_truncation_fails() {
    for src in VALID {
        let tokens = tokens(src);
        for len in 0..tokens.len() {
            let err = Parser::new().parse(&tokens[..len]).unwrap_err();
            assert!(err.is_premature_end(), "{src} truncated to {len}");
            assert_eq!(err.index(), len);
        }
    }
}

#[test]
fn test_parallel_parses_do_not_interfere() {
    let parser = Parser::new();
    let inputs: Vec<Vec<Token>> = VALID.iter().map(|src| tokens(src)).collect();
    let expected: Vec<ParseTree> = inputs.iter().map(|t| parser.parse(t).unwrap()).collect();

    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                for _ in 0..25 {
                    for (tokens, tree) in inputs.iter().zip(&expected) {
                        assert_eq!(&parser.parse(tokens).unwrap(), tree);
                    }
                    assert!(parser.parse(&inputs[0][..3]).is_err());
                }
            });
        }
    });
}
