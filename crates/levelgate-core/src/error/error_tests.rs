#![allow(non_snake_case)]

use super::*;

#[test]
fn ConfigParseError___unknown_severity___names_category_and_value() {
    let err = ConfigParseError::UnknownSeverity {
        category: "Net.Client".into(),
        key: "minimumLevel".into(),
        value: "Loud".into(),
    };

    let display = err.to_string();

    assert_eq!(
        display,
        "category \"Net.Client\": unknown severity \"Loud\" in minimumLevel"
    );
}

#[test]
fn ConfigParseError___accessors___return_category_and_key() {
    let err = ConfigParseError::InvalidValue {
        category: "Db".into(),
        key: "enabled".into(),
        found: "42".into(),
    };

    assert_eq!(err.category(), "Db");
    assert_eq!(err.key(), "enabled");
}

#[test]
fn FilterError___from_parse_error___is_transparent() {
    let parse = ConfigParseError::InvalidValue {
        category: "Db".into(),
        key: "levels".into(),
        found: "true".into(),
    };

    let err = FilterError::from(parse.clone());

    assert_eq!(err.to_string(), parse.to_string());
    assert!(matches!(err, FilterError::Parse(_)));
}

#[test]
fn FilterError___from_serde_json___is_document_error() {
    let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();

    let err = FilterError::from(json_err);

    assert!(matches!(err, FilterError::Document(_)));
    assert!(err.to_string().starts_with("configuration document error:"));
}

#[test]
fn UnknownSeverity___display___quotes_name() {
    let err = UnknownSeverity("Loud".into());

    assert_eq!(err.to_string(), "unknown severity name: \"Loud\"");
}
