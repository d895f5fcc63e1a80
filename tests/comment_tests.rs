use gradesheet::{
    GradingError,
    constants::{DEFAULT_COMMENT, STOCK_COMMENTS, stock_comment},
    grade::{interpret_comment, with_default},
};

#[test]
fn keywords_become_stock_comments_before_free_text() {
    let comments = interpret_comment("%no_header great job").unwrap();
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0], stock_comment("no_header").unwrap());
    assert!(comments[0].starts_with("You need to include a header comment"));
    assert_eq!(comments[1], "great job");
}

#[test]
fn empty_input_yields_one_empty_comment() {
    assert_eq!(interpret_comment("").unwrap(), vec![String::new()]);
    assert_eq!(interpret_comment("   ").unwrap(), vec![String::new()]);
}

#[test]
fn keyword_order_is_kept_and_words_are_rejoined() {
    let comments = interpret_comment("off  by %no_srand one %no_include  ").unwrap();
    assert_eq!(
        comments,
        vec![
            stock_comment("no_srand").unwrap().to_string(),
            stock_comment("no_include").unwrap().to_string(),
            "off by one".to_string(),
        ]
    );
}

#[test]
fn a_lone_percent_sign_is_plain_text() {
    assert_eq!(interpret_comment("50 % done").unwrap(), vec!["50 % done"]);
}

#[test]
fn unknown_keywords_are_rejected() {
    match interpret_comment("%no_such_thing oops") {
        Err(GradingError::UnknownKeyword(key)) => assert_eq!(key, "no_such_thing"),
        other => panic!("expected an unknown keyword error, got {other:?}"),
    }
}

#[test]
fn every_stock_comment_is_a_single_trimmed_paragraph() {
    assert_eq!(STOCK_COMMENTS.len(), 6);
    for (keyword, _) in STOCK_COMMENTS {
        let text = stock_comment(keyword).unwrap();
        assert!(!text.is_empty());
        assert_eq!(text, text.trim());
    }
}

#[test]
fn default_comment_only_fills_an_empty_list() {
    assert_eq!(with_default(Vec::new()), vec![DEFAULT_COMMENT]);
    assert_eq!(with_default(vec![String::new()]), vec![String::new()]);
}
