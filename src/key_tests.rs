use crate::parse_dotted_key;

#[test]
fn bare_segments() {
    assert_eq!(parse_dotted_key("foo").unwrap(), ["foo"]);
    assert_eq!(parse_dotted_key("foo.bar").unwrap(), ["foo", "bar"]);
    assert_eq!(parse_dotted_key("-baz_2").unwrap(), ["-baz_2"]);
}

#[test]
fn whitespace_around_dots_is_tolerated() {
    assert_eq!(parse_dotted_key(" foo  . bar ").unwrap(), ["foo", "bar"]);
    assert_eq!(parse_dotted_key("a.\tb").unwrap(), ["a", "b"]);
}

#[test]
fn bare_segments_keep_interior_spaces() {
    assert_eq!(parse_dotted_key("pets.Dog 1.type").unwrap(), ["pets", "Dog 1", "type"]);
    assert_eq!(parse_dotted_key("pets.  Dog 1  .type").unwrap(), ["pets", "Dog 1", "type"]);
}

#[test]
fn quoted_segments() {
    assert_eq!(parse_dotted_key("\"Dog type\"").unwrap(), ["Dog type"]);
    assert_eq!(
        parse_dotted_key(" foo  . \" bar\\t\" . -baz").unwrap(),
        ["foo", " bar\t", "-baz"]
    );
    assert_eq!(parse_dotted_key("'lit.eral'").unwrap(), ["lit.eral"]);
    assert_eq!(parse_dotted_key("\"\"").unwrap(), [""]);
    assert_eq!(parse_dotted_key("a.\"b.c\".d").unwrap(), ["a", "b.c", "d"]);
}

#[test]
fn unicode_escapes_in_quoted_segments() {
    assert_eq!(parse_dotted_key("\"\\u0041\"").unwrap(), ["A"]);
    assert_eq!(parse_dotted_key("\"\\U0001F600\"").unwrap(), ["\u{1F600}"]);
}

#[test]
fn invalid_characters_are_rejected() {
    let err = parse_dotted_key(" foo  . bar@ . -baz").unwrap_err();
    assert_eq!(
        err.message(),
        "Invalid key: Unexpected '@', expected . or end-of-input"
    );
    assert_eq!((err.position.line, err.position.column), (1, 12));

    assert!(parse_dotted_key("").is_err());
    assert!(parse_dotted_key("a..b").is_err());
    assert!(parse_dotted_key("a.").is_err());
    assert!(parse_dotted_key("\"unterminated").is_err());
    assert!(parse_dotted_key("\"a\"x").is_err());
}
