use crate::error::ErrorKind;
use crate::table::Table;
use crate::value::Value;

fn parse_ok(input: &str) -> Table {
    crate::parse_str(input).unwrap_or_else(|e| panic!("parse failed for {input:?}: {e}"))
}

fn parse_err(input: &str) -> crate::Error {
    match crate::parse_str(input) {
        Ok(root) => panic!("expected error for {input:?}, got {root:?}"),
        Err(e) => e,
    }
}

fn get<'a>(root: &'a Table, key: &str) -> &'a Value {
    root.get(key)
        .unwrap_or_else(|| panic!("missing key {key:?} in {root:?}"))
}

#[test]
fn basic_scalar_values() {
    // empty document
    let root = parse_ok("");
    assert!(root.is_empty());

    let root = parse_ok("a = \"hello\"");
    assert_eq!(get(&root, "a").as_str(), Some("hello"));

    let root = parse_ok("a = 42");
    assert_eq!(get(&root, "a").as_integer(), Some(42));

    let root = parse_ok("a = -100");
    assert_eq!(get(&root, "a").as_integer(), Some(-100));

    let root = parse_ok("a = +7");
    assert_eq!(get(&root, "a").as_integer(), Some(7));

    let root = parse_ok("a = 3.14");
    let f = get(&root, "a").as_float().unwrap();
    assert!((f - 3.14).abs() < f64::EPSILON);

    let root = parse_ok("a = true");
    assert_eq!(get(&root, "a").as_bool(), Some(true));
    let root = parse_ok("a = false");
    assert_eq!(get(&root, "a").as_bool(), Some(false));

    let root = parse_ok("a = 1\nb = 2\nc = 3");
    assert_eq!(root.len(), 3);
    assert_eq!(get(&root, "a").as_integer(), Some(1));
    assert_eq!(get(&root, "c").as_integer(), Some(3));
}

#[test]
fn integer_with_underscores() {
    let root = parse_ok("embed0 = 3_456");
    assert_eq!(get(&root, "embed0").as_integer(), Some(3456));

    let root = parse_ok("a = 1_000_000");
    assert_eq!(get(&root, "a").as_integer(), Some(1_000_000));

    // Each underscore must sit between two digits.
    let err = parse_err("a = 1__2");
    assert!(matches!(err.kind, ErrorKind::Expected { expected: "digit", .. }));
    let err = parse_err("a = 1_");
    assert!(matches!(
        err.kind,
        ErrorKind::Expected { expected: "digit", found: None }
    ));
}

#[test]
fn integer_edges() {
    let root = parse_ok("a = 0");
    assert_eq!(get(&root, "a").as_integer(), Some(0));
    let root = parse_ok("a = -0");
    assert_eq!(get(&root, "a").as_integer(), Some(0));

    assert!(matches!(parse_err("a = 03").kind, ErrorKind::LeadingZero(..)));
    assert!(matches!(parse_err("a = 0_0").kind, ErrorKind::LeadingZero(..)));

    let root = parse_ok("a = 9223372036854775807");
    assert_eq!(get(&root, "a").as_integer(), Some(i64::MAX));
    let root = parse_ok("a = -9223372036854775808");
    assert_eq!(get(&root, "a").as_integer(), Some(i64::MIN));
    assert!(matches!(
        parse_err("a = 9223372036854775808").kind,
        ErrorKind::IntegerOverflow(..)
    ));
}

#[test]
fn floats() {
    let cases = [
        ("a = 1.5", 1.5),
        ("a = -0.01", -0.01),
        ("a = 1_000.5", 1000.5),
        ("a = 1e10", 1e10),
        ("a = 1e-5", 1e-5),
        ("a = 1E+2", 1e2),
        ("a = 1.5e-3", 1.5e-3),
        ("a = 6.022e23", 6.022e23),
        ("a = 1_0.2_5e1_0", 10.25e10),
    ];
    for (input, want) in cases {
        let root = parse_ok(input);
        let f = get(&root, "a").as_float().unwrap();
        assert!((f - want).abs() <= want.abs() * 1e-12, "{input}: {f} != {want}");
    }

    assert!(matches!(
        parse_err("a = 1.").kind,
        ErrorKind::Expected { expected: "digit", .. }
    ));
    assert!(matches!(
        parse_err("a = 1.2.3").kind,
        ErrorKind::DoubleDecimalPoint
    ));
    assert!(matches!(
        parse_err("a = 1e999").kind,
        ErrorKind::InvalidFloat(..)
    ));
    assert!(matches!(
        parse_err("a = .5").kind,
        ErrorKind::Expected { expected: "value", .. }
    ));
}

#[test]
fn string_escapes() {
    let root = parse_ok(r#"a = "line1\nline2""#);
    assert_eq!(get(&root, "a").as_str(), Some("line1\nline2"));

    let root = parse_ok(r#"a = "col1\tcol2""#);
    assert_eq!(get(&root, "a").as_str(), Some("col1\tcol2"));

    let root = parse_ok(r#"a = "b\b f\f r\r""#);
    assert_eq!(get(&root, "a").as_str(), Some("b\u{0008} f\u{000C} r\r"));

    let root = parse_ok(r#"a = "path\\to""#);
    assert_eq!(get(&root, "a").as_str(), Some("path\\to"));

    let root = parse_ok(r#"a = "say \"hi\"""#);
    assert_eq!(get(&root, "a").as_str(), Some("say \"hi\""));

    let root = parse_ok(r#"a = "A""#);
    assert_eq!(get(&root, "a").as_str(), Some("A"));

    let root = parse_ok(r#"a = "\U0001F600""#);
    assert_eq!(get(&root, "a").as_str(), Some("\u{1F600}"));

    assert!(matches!(
        parse_err(r#"a = "\q""#).kind,
        ErrorKind::Expected { expected: "escaped sequence", .. }
    ));
    assert!(matches!(
        parse_err(r#"a = "\uZZZZ""#).kind,
        ErrorKind::Expected { expected: "hexadecimal digit", .. }
    ));
    assert!(matches!(
        parse_err(r#"a = "\uD800""#).kind,
        ErrorKind::InvalidEscapeValue(0xD800)
    ));
}

#[test]
fn string_modes() {
    // multiline basic: leading newline discarded
    let root = parse_ok("a = \"\"\"\nhello\nworld\"\"\"");
    assert_eq!(get(&root, "a").as_str(), Some("hello\nworld"));

    // multiline literal
    let root = parse_ok("a = '''\nhello\nworld'''");
    assert_eq!(get(&root, "a").as_str(), Some("hello\nworld"));

    // literal takes no escapes
    let root = parse_ok(r"a = 'no\escape'");
    assert_eq!(get(&root, "a").as_str(), Some("no\\escape"));

    // empty strings of every mode
    let root = parse_ok(r#"a = """#);
    assert_eq!(get(&root, "a").as_str(), Some(""));
    let root = parse_ok("a = ''");
    assert_eq!(get(&root, "a").as_str(), Some(""));
    let root = parse_ok("a = \"\"\"\"\"\"");
    assert_eq!(get(&root, "a").as_str(), Some(""));
    let root = parse_ok("a = ''''''");
    assert_eq!(get(&root, "a").as_str(), Some(""));
}

#[test]
fn multiline_line_continuation() {
    let root = parse_ok("a = \"\"\"one \\\n      two\"\"\"");
    assert_eq!(get(&root, "a").as_str(), Some("one two"));

    // the continuation eats any number of blank lines
    let root = parse_ok("a = \"\"\"one \\\n\n\n  two\"\"\"");
    assert_eq!(get(&root, "a").as_str(), Some("one two"));
}

#[test]
fn quotes_adjacent_to_delimiter() {
    // one or two quotes directly before the closing triple are content
    let root = parse_ok("a = \"\"\"x\"\"\"\"");
    assert_eq!(get(&root, "a").as_str(), Some("x\""));
    let root = parse_ok("a = \"\"\"x\"\"\"\"\"");
    assert_eq!(get(&root, "a").as_str(), Some("x\"\""));
    let root = parse_ok("a = '''x''''");
    assert_eq!(get(&root, "a").as_str(), Some("x'"));
    let root = parse_ok("a = '''x'''''");
    assert_eq!(get(&root, "a").as_str(), Some("x''"));

    // a lone quote inside multiline content is nothing special
    let root = parse_ok("a = \"\"\"say \"hi\" ok\"\"\"");
    assert_eq!(get(&root, "a").as_str(), Some("say \"hi\" ok"));
}

#[test]
fn string_errors() {
    assert!(matches!(
        parse_err("a = \"one\ntwo\"").kind,
        ErrorKind::NewlineInString
    ));
    assert!(matches!(
        parse_err("a = 'one\ntwo'").kind,
        ErrorKind::NewlineInString
    ));
    assert!(matches!(
        parse_err("a = \"no end").kind,
        ErrorKind::UnterminatedString
    ));
    assert!(matches!(
        parse_err("a = '''no end").kind,
        ErrorKind::UnterminatedString
    ));
}

#[test]
fn datetimes() {
    let root = parse_ok("t = 2016-01-07T15:30:30Z");
    let dt = get(&root, "t").as_datetime().unwrap();
    assert_eq!(
        (dt.year, dt.month, dt.day, dt.hour, dt.minute, dt.second),
        (2016, 1, 7, 15, 30, 30)
    );
    assert_eq!(dt.offset_minutes, 0);
    assert_eq!(dt.nanosecond, 0);

    // the same text quoted stays a string
    let root = parse_ok("t = \"2016-01-07T15:30:30Z\"");
    assert_eq!(get(&root, "t").as_str(), Some("2016-01-07T15:30:30Z"));

    // a date with no time part is midnight UTC
    let root = parse_ok("t = 2016-01-07");
    let dt = get(&root, "t").as_datetime().unwrap();
    assert_eq!((dt.hour, dt.minute, dt.second, dt.offset_minutes), (0, 0, 0, 0));

    // a date-time with no zone is UTC
    let root = parse_ok("t = 2016-01-07T15:30:30");
    let dt = get(&root, "t").as_datetime().unwrap();
    assert_eq!(dt.offset_minutes, 0);

    let root = parse_ok("t = 2016-01-07T15:30:30.123456789Z");
    let dt = get(&root, "t").as_datetime().unwrap();
    assert_eq!(dt.nanosecond, 123_456_789);

    let root = parse_ok("t = 1979-05-27T07:32:00-07:00");
    let dt = get(&root, "t").as_datetime().unwrap();
    assert_eq!(dt.offset_minutes, -420);

    let root = parse_ok("t = 1979-05-27T07:32:00+05:30");
    let dt = get(&root, "t").as_datetime().unwrap();
    assert_eq!(dt.offset_minutes, 330);
}

#[test]
fn datetime_errors() {
    for input in [
        "t = 2016-13-01",
        "t = 2016-02-30",
        "t = 2015-02-29",
        "t = 2016-01-07T24:00:00Z",
        "t = 2016-01-07T15:61:00Z",
        "t = 2016-01-07T15:30:30.Z",
        "t = 2016-01-07T15:30:30+25:00",
    ] {
        let err = parse_err(input);
        assert!(
            matches!(err.kind, ErrorKind::InvalidDatetime(..)),
            "{input}: {err}"
        );
    }
    // leap year day is fine
    parse_ok("t = 2016-02-29");
    // leap second is admitted
    parse_ok("t = 2016-12-31T23:59:60Z");
}

#[test]
fn arrays() {
    let root = parse_ok("a = [1, 2, 3]");
    let arr = get(&root, "a").as_array().unwrap();
    assert_eq!(arr.len(), 3);
    assert!(arr.is_closed());
    assert_eq!(arr.get(0).unwrap().as_integer(), Some(1));
    assert_eq!(arr.get(2).unwrap().as_integer(), Some(3));

    let root = parse_ok("a = []");
    assert!(get(&root, "a").as_array().unwrap().is_empty());

    // trailing comma
    let root = parse_ok("integers = [ 1, 2, 3, 4,]");
    assert_eq!(get(&root, "integers").as_array().unwrap().len(), 4);

    // newlines and comments between tokens
    let root = parse_ok("a = [\n  1, # one\n  2\n  , 3\n]");
    assert_eq!(get(&root, "a").as_array().unwrap().len(), 3);

    // nested arrays are homogeneous as "array" regardless of leaves
    let root = parse_ok("a = [[1, 2], [\"x\"]]");
    let arr = get(&root, "a").as_array().unwrap();
    assert_eq!(arr.len(), 2);
    assert_eq!(arr.get(1).unwrap().at(0).unwrap().as_str(), Some("x"));

    // arrays of inline tables
    let root = parse_ok("a = [{x = 1}, {x = 2}]");
    let arr = get(&root, "a").as_array().unwrap();
    assert!(arr.is_closed());
    assert_eq!(arr.get(1).unwrap().get("x").unwrap().as_integer(), Some(2));
}

#[test]
fn array_errors() {
    assert!(matches!(
        parse_err("x = [1, \"two\"]").kind,
        ErrorKind::ArrayTypeMismatch { expected: "integer", found: "string", .. }
    ));
    assert!(matches!(
        parse_err("x = [,]").kind,
        ErrorKind::MissingArrayElement
    ));
    assert!(matches!(
        parse_err("x = [1 2]").kind,
        ErrorKind::Expected { expected: "',' or ']'", .. }
    ));
}

#[test]
fn inline_tables() {
    let root = parse_ok("a = {x = 1, y = 'z'}");
    let t = get(&root, "a").as_table().unwrap();
    assert_eq!(t.get("x").unwrap().as_integer(), Some(1));
    assert_eq!(t.get("y").unwrap().as_str(), Some("z"));

    let root = parse_ok("a = {}");
    assert!(get(&root, "a").as_table().unwrap().is_empty());

    let root = parse_ok("a = {b = {c = 1}}");
    assert_eq!(
        get(&root, "a").get("b").unwrap().get("c").unwrap().as_integer(),
        Some(1)
    );

    let root = parse_ok("point = { x = [1, 2], y = {} }");
    assert_eq!(get(&root, "point").get("x").unwrap().at(1).unwrap().as_integer(), Some(2));
}

#[test]
fn inline_table_errors() {
    assert!(matches!(
        parse_err("a = {\nx = 1}").kind,
        ErrorKind::NewlineInInlineTable
    ));
    assert!(matches!(parse_err("a = {,}").kind, ErrorKind::UnexpectedComma));
    // no trailing comma in inline tables
    assert!(matches!(
        parse_err("a = {x = 1,}").kind,
        ErrorKind::Expected { expected: "table field", .. }
    ));
    assert!(matches!(
        parse_err("a = {x = 1, x = 2}").kind,
        ErrorKind::DuplicateKey { .. }
    ));
}

#[test]
fn duplicate_keys() {
    let err = parse_err("a = 1\na = 2");
    assert_eq!(err.line, 2);
    match err.kind {
        ErrorKind::DuplicateKey { path, key, kind } => {
            assert_eq!(path, "");
            assert_eq!(key, "a");
            assert_eq!(kind, "integer");
        }
        other => panic!("unexpected kind {other:?}"),
    }

    let err = parse_err("[t]\na = 1\na = 2");
    match err.kind {
        ErrorKind::DuplicateKey { path, kind, .. } => {
            assert_eq!(path, "t");
            assert_eq!(kind, "integer");
        }
        other => panic!("unexpected kind {other:?}"),
    }
}

#[test]
fn table_headers() {
    let root = parse_ok("[a]\nx = 1\n[b]\nx = 2");
    assert_eq!(get(&root, "a").get("x").unwrap().as_integer(), Some(1));
    assert_eq!(get(&root, "b").get("x").unwrap().as_integer(), Some(2));

    // dotted headers create intermediate tables
    let root = parse_ok("[a.b.c]\nx = 1");
    assert_eq!(
        get(&root, "a").get("b").unwrap().get("c").unwrap().get("x").unwrap().as_integer(),
        Some(1)
    );

    // whitespace around segments
    let root = parse_ok("[ a . b ]\nx = 1");
    assert_eq!(get(&root, "a").get("b").unwrap().get("x").unwrap().as_integer(), Some(1));

    // quoted segment keeps its dots
    let root = parse_ok("[\"a.b\"]\nx = 1");
    assert_eq!(get(&root, "a.b").get("x").unwrap().as_integer(), Some(1));

    // implicit table later made explicit
    let root = parse_ok("[a.b]\nx = 1\n[a]\ny = 2");
    assert_eq!(get(&root, "a").get("y").unwrap().as_integer(), Some(2));
    assert_eq!(get(&root, "a").get("b").unwrap().get("x").unwrap().as_integer(), Some(1));

    // explicit table extended by a deeper header
    let root = parse_ok("[a]\nx = 1\n[a.b]\ny = 2");
    assert_eq!(get(&root, "a").get("b").unwrap().get("y").unwrap().as_integer(), Some(2));

    // header ordering does not matter when neither defines a.b twice
    let forward = parse_ok("[a.b]\nx = 1\n[a.b.c]\ny = 2");
    let backward = parse_ok("[a.b.c]\ny = 2\n[a.b]\nx = 1");
    assert_eq!(forward, backward);
}

#[test]
fn header_conflicts() {
    assert!(matches!(
        parse_err("[a]\n[a]").kind,
        ErrorKind::DuplicateTable { .. }
    ));
    // implicit promotion happens once
    assert!(matches!(
        parse_err("[a.b]\n[a]\n[a]").kind,
        ErrorKind::DuplicateTable { .. }
    ));
    assert!(matches!(
        parse_err("a = 1\n[a]").kind,
        ErrorKind::Redefined { kind: "integer", .. }
    ));
    assert!(matches!(
        parse_err("a = 1\n[a.b]").kind,
        ErrorKind::Redefined { kind: "integer", .. }
    ));
    // a closed array cannot be traversed or extended
    assert!(matches!(
        parse_err("a = [1]\n[[a]]").kind,
        ErrorKind::Redefined { kind: "array", .. }
    ));
    assert!(matches!(
        parse_err("a = [1]\n[a.b]").kind,
        ErrorKind::Redefined { kind: "array", .. }
    ));
    // table and array-of-tables shapes do not mix
    assert!(matches!(
        parse_err("[a]\n[[a]]").kind,
        ErrorKind::Redefined { kind: "table", .. }
    ));

    assert!(matches!(parse_err("[]").kind, ErrorKind::EmptyTableName));
    assert!(matches!(parse_err("[a.]").kind, ErrorKind::EmptyTableName));
    assert!(matches!(
        parse_err("[a] x").kind,
        ErrorKind::Expected { expected: "new line, comment or EOF", .. }
    ));
}

#[test]
fn arrays_of_tables() {
    let root = parse_ok(
        "integers = [ 1, 2, 3, 4,]\n\
         [[tables]]\n\
         description = \"I am a TOML table\"\n\
         [[tables]]\n\
         name = \"Another TOML table\"\n",
    );
    let integers = get(&root, "integers").as_array().unwrap();
    assert_eq!(integers.len(), 4);
    for (i, v) in integers.iter().enumerate() {
        assert_eq!(v.as_integer(), Some(i as i64 + 1));
    }
    let tables = get(&root, "tables").as_array().unwrap();
    assert!(!tables.is_closed());
    assert_eq!(tables.len(), 2);
    assert_eq!(
        tables.get(0).unwrap().get("description").unwrap().as_str(),
        Some("I am a TOML table")
    );
    assert_eq!(
        tables.get(1).unwrap().get("name").unwrap().as_str(),
        Some("Another TOML table")
    );
}

#[test]
fn fruit_scenario() {
    let root = parse_ok(
        "[[fruit]]\n\
         \x20 name = \"apple\"\n\
         \x20 [fruit.physical]\n\
         \x20   color = \"red\"\n\
         \x20 [[fruit.variety]]\n\
         \x20   name = \"red delicious\"\n\
         \x20 [[fruit.variety]]\n\
         \x20   name = \"granny smith\"\n\
         [[fruit]]\n\
         \x20 name = \"banana\"\n\
         \x20 [[fruit.variety]]\n\
         \x20   name = \"plantain\"\n",
    );
    let fruit = get(&root, "fruit").as_array().unwrap();
    assert!(!fruit.is_closed());
    assert_eq!(fruit.len(), 2);

    let apple = fruit.get(0).unwrap();
    assert_eq!(apple.get("name").unwrap().as_str(), Some("apple"));
    assert_eq!(
        apple.get("physical").unwrap().get("color").unwrap().as_str(),
        Some("red")
    );
    let varieties = apple.get("variety").unwrap().as_array().unwrap();
    assert_eq!(varieties.len(), 2);
    assert_eq!(varieties.get(0).unwrap().get("name").unwrap().as_str(), Some("red delicious"));
    assert_eq!(varieties.get(1).unwrap().get("name").unwrap().as_str(), Some("granny smith"));

    let banana = fruit.get(1).unwrap();
    assert_eq!(banana.get("name").unwrap().as_str(), Some("banana"));
    let varieties = banana.get("variety").unwrap().as_array().unwrap();
    assert_eq!(varieties.len(), 1);
    assert_eq!(varieties.get(0).unwrap().get("name").unwrap().as_str(), Some("plantain"));
}

#[test]
fn unicode_keys_and_values() {
    let root = parse_ok("\"初次见面\" = \"你好，世界！\"");
    assert_eq!(get(&root, "初次见面").as_str(), Some("你好，世界！"));
}

#[test]
fn keys() {
    let root = parse_ok("bare-key_1 = 1");
    assert_eq!(get(&root, "bare-key_1").as_integer(), Some(1));

    let root = parse_ok("\"quoted key\" = 1");
    assert_eq!(get(&root, "quoted key").as_integer(), Some(1));

    let root = parse_ok("'literal key' = 1");
    assert_eq!(get(&root, "literal key").as_integer(), Some(1));

    let root = parse_ok("\"\" = 1");
    assert_eq!(get(&root, "").as_integer(), Some(1));

    assert!(matches!(parse_err("= 1").kind, ErrorKind::EmptyKey));
    assert!(matches!(
        parse_err("a").kind,
        ErrorKind::Expected { expected: "bare character", found: None }
    ));
    assert!(matches!(
        parse_err("a =").kind,
        ErrorKind::Expected { expected: "value", found: None }
    ));
}

#[test]
fn comments_and_whitespace() {
    let root = parse_ok("# a comment\na = 1 # trailing\n\n  # indented comment, unicode ✓\nb = 2");
    assert_eq!(root.len(), 2);

    // CRLF and lone CR both end statements
    let root = parse_ok("a = 1\r\nb = 2\rc = 3");
    assert_eq!(root.len(), 3);
    assert_eq!(get(&root, "c").as_integer(), Some(3));
}

#[test]
fn line_positions() {
    let err = parse_err("a = 1\nb = ?");
    assert_eq!(err.line, 2);
    assert_eq!(err.pos, 10);

    // \r\n counts as one line break
    let err = parse_err("a = 1\r\nb = 2\r\nb = 3");
    assert_eq!(err.line, 3);

    // newlines inside multiline strings still advance the counter
    let err = parse_err("a = \"\"\"\nx\ny\n\"\"\"\nb = ?");
    assert_eq!(err.line, 5);
}

#[test]
fn bom_and_utf8() {
    let root = parse_ok("\u{feff}a = 1");
    assert_eq!(get(&root, "a").as_integer(), Some(1));

    let err = crate::parse(b"a = \"\xff\"").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidUtf8));
    assert_eq!(err.pos, 5);
    assert_eq!(err.line, 1);

    let err = crate::parse(b"a = 1\nb = \"\xc3\x28\"").unwrap_err();
    assert_eq!(err.line, 2);
}

#[test]
fn statement_termination() {
    assert!(matches!(
        parse_err("a = 1 b = 2").kind,
        ErrorKind::Expected { expected: "new line, comment or EOF", .. }
    ));
    assert!(matches!(
        parse_err("a 1").kind,
        ErrorKind::Expected { expected: "'='", .. }
    ));
}

#[test]
fn header_resumes_root_context() {
    // a header resets the environment; keys after it land in its table
    let root = parse_ok("x = 1\n[t]\nx = 2");
    assert_eq!(get(&root, "x").as_integer(), Some(1));
    assert_eq!(get(&root, "t").get("x").unwrap().as_integer(), Some(2));
}

#[test]
fn deeply_nested_values() {
    let root = parse_ok("a = [[[[[1]]]]]");
    let v = get(&root, "a");
    let leaf = v
        .at(0)
        .and_then(|v| v.at(0))
        .and_then(|v| v.at(0))
        .and_then(|v| v.at(0))
        .and_then(|v| v.at(0));
    assert_eq!(leaf.and_then(|v| v.as_integer()), Some(1));
}
