
use expect_test::{expect, Expect};
use tflags::{ErrorKind, Flags, ParseOptions};

fn flags() -> Flags {
    let mut flags = Flags::new();
    flags.set("name", "x", "specify your name").unwrap();
    flags.set("age", 0, "specify your age").unwrap();
    flags.set("cool", false, "specify whether you're cool or not").unwrap();
    flags
}

/// Options for argument vectors without a program name.
fn opts() -> ParseOptions {
    ParseOptions { start_from_next: false, ..ParseOptions::default() }
}

fn check(args: &str, expect: Expect) {
    check_with(opts(), args, expect)
}

fn check_strict(args: &str, expect: Expect) {
    check_with(ParseOptions { ignore_unexpected_flags: false, ..opts() }, args, expect)
}

fn check_with(opts: ParseOptions, args: &str, expect: Expect) {
    let mut flags = flags();
    let args = args.split_ascii_whitespace().collect::<Vec<_>>();
    let mut help = Vec::<u8>::new();
    let actual = match flags.parse_to(&args, opts, &mut help) {
        Ok(tail) => render(&flags, tail),
        Err(err) => err.to_string(),
    };
    expect.assert_eq(&actual);
}

fn render(flags: &Flags, tail: usize) -> String {
    let mut buf = String::new();
    for entry in flags.iter() {
        buf.push_str(&format!("{}: {}\n", entry.name(), entry.value()));
    }
    buf.push_str(&format!("tail: {tail}\n"));
    buf
}

#[test]
fn smoke() {
    check(
        "-name=Sam -age=30 -cool",
        expect![[r#"
            name: Sam
            age: 30
            cool: true
            tail: 3
        "#]],
    );
    check(
        "--name Sam --age 30",
        expect![[r#"
            name: Sam
            age: 30
            cool: false
            tail: 4
        "#]],
    );
    check(
        "-name=a=b",
        expect![[r#"
            name: a=b
            age: 0
            cool: false
            tail: 1
        "#]],
    );
    check(
        "-age=0x1F -age=0b101",
        expect![[r#"
            name: x
            age: 5
            cool: false
            tail: 2
        "#]],
    );
}

#[test]
fn empty() {
    check(
        "",
        expect![[r#"
            name: x
            age: 0
            cool: false
            tail: 0
        "#]],
    );
}

#[test]
fn bool_without_value() {
    check(
        "-cool -age=7 file.txt rest",
        expect![[r#"
            name: x
            age: 7
            cool: true
            tail: 2
        "#]],
    );
    check(
        "--cool --name Ann",
        expect![[r#"
            name: Ann
            age: 0
            cool: true
            tail: 3
        "#]],
    );
    check(
        "-age -cool",
        expect![[r#"
            name: x
            age: 0
            cool: true
            tail: 2
        "#]],
    );
    check("-cool file.txt", expect!["Can't parse `cool`, expected a boolean, got `file.txt`"]);
    check(
        "-cool=F",
        expect![[r#"
            name: x
            age: 0
            cool: false
            tail: 1
        "#]],
    );
}

#[test]
fn tail() {
    check(
        "-name=alex -- positional1 positional2",
        expect![[r#"
            name: alex
            age: 0
            cool: false
            tail: 2
        "#]],
    );
    check(
        "-cool -- -age=3",
        expect![[r#"
            name: x
            age: 0
            cool: true
            tail: 2
        "#]],
    );
    check(
        "positional -age=3",
        expect![[r#"
            name: x
            age: 0
            cool: false
            tail: 0
        "#]],
    );
}

#[test]
fn unknown_flags() {
    check(
        "-bogus=1",
        expect![[r#"
            name: x
            age: 0
            cool: false
            tail: 1
        "#]],
    );
    check(
        "-bogus 1 -age=3",
        expect![[r#"
            name: x
            age: 0
            cool: false
            tail: 1
        "#]],
    );
    check(
        "---name=z -age=2",
        expect![[r#"
            name: x
            age: 2
            cool: false
            tail: 2
        "#]],
    );
    check(
        "-age -5",
        expect![[r#"
            name: x
            age: 0
            cool: false
            tail: 2
        "#]],
    );
    check_strict("-bogus=1", expect!["Unknown flag: `bogus`"]);
    check_strict("-cool --werbose", expect!["Unknown flag: `werbose`"]);
    check_strict("-age -5", expect!["Unknown flag: `5`"]);

    let err = flags().parse(&["prog", "-bogus"], ParseOptions::strict()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnknownFlag);
    assert_eq!(err.flag(), Some("bogus"));
}

#[test]
fn malformed() {
    check("-age=", expect!["Expected a value for `age`"]);
    check("-age= 3", expect!["Expected a value for `age`"]);
    check("- -age=1", expect!["Flag name is missing after `-` in argument 0"]);
    check("-=5", expect!["Flag name is missing after `-` in argument 0"]);
    check("-name -", expect!["Flag name is missing after `-` in argument 1"]);
    check("-age=lol", expect!["Can't parse `age`, invalid digit found in string"]);
    check(
        "-age=007",
        expect!["Can't parse `age`, invalid numeric literal `007`: base-10 literal cannot start with 0"],
    );
}

#[test]
fn empty_value_in_next_argument() {
    let mut flags = flags();
    assert_eq!(flags.parse(&["-name", "", "rest"], opts()).unwrap(), 2);
    assert_eq!(flags.lookup("name").unwrap().value().to_string(), "");

    let mut flags = crate::flags();
    assert_eq!(flags.parse(&["-cool", ""], opts()).unwrap(), 2);
    assert_eq!(flags.lookup("cool").unwrap().value().to_string(), "true");

    let mut flags = crate::flags();
    let err = flags.parse(&["-age", ""], opts()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conversion);
    assert_eq!(err.to_string(), "Can't parse `age`, cannot parse integer from empty string");

    let err = flags.parse(&["-name=", ""], opts()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingValue);
}

#[cfg(unix)]
#[test]
fn non_utf8() {
    use std::{ffi::OsString, os::unix::ffi::OsStringExt};

    let mut flags = flags();
    let args = vec!["prog".into(), "-name=Sam".into(), OsString::from_vec(vec![0xff])];
    let err = flags.parse_os(args, ParseOptions::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidUtf8);
    assert!(matches!(err, tflags::Error::InvalidUtf8 { index: 2, .. }));
    assert_eq!(err.to_string(), r#"Can't parse argument 2, invalid utf8: "\xFF""#);
    assert_eq!(flags.lookup("name").unwrap().value().to_string(), "x");

    let args = vec![OsString::from("prog"), OsString::from("-cool"), OsString::from("rest")];
    assert_eq!(flags.parse_os(args, ParseOptions::default()).unwrap(), 2);
    assert_eq!(flags.lookup("cool").unwrap().value().to_string(), "true");
}

#[test]
fn program_name_is_skipped() {
    let mut flags = flags();
    let cool = flags.set("verbose", false, "").unwrap();
    let tail = flags.parse(&["prog", "-verbose"], ParseOptions::default()).unwrap();
    assert_eq!(tail, 2);
    assert!(flags[cool]);

    let tail = flags.parse(&["-name=skipped", "x"], ParseOptions::default()).unwrap();
    assert_eq!(tail, 1);
    assert_eq!(flags.lookup("name").unwrap().value().to_string(), "x");
}

#[test]
fn empty_input() {
    let mut flags = flags();
    let opts = ParseOptions { require_arguments: true, ..ParseOptions::default() };
    let err = flags.parse(&["prog"], opts).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::EmptyInput);
    assert_eq!(err.to_string(), "No arguments were provided");

    let none: [&str; 0] = [];
    assert_eq!(flags.parse(&none, ParseOptions::default()).unwrap(), 0);
    assert_eq!(flags.parse(&["prog"], ParseOptions::default()).unwrap(), 1);
}

#[test]
fn counted() {
    let mut flags = flags();
    let err = flags.parse_counted(3, &["prog", "-cool"], ParseOptions::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::OutOfBounds);
    assert_eq!(err.to_string(), "Argument count 3 exceeds the 2 arguments provided");

    assert_eq!(flags.parse_counted(1, &["prog", "-cool"], ParseOptions::default()).unwrap(), 1);
    assert_eq!(flags.lookup("cool").unwrap().value().to_string(), "false");
    assert_eq!(flags.parse_counted(2, &["prog", "-cool"], ParseOptions::default()).unwrap(), 2);
    assert_eq!(flags.lookup("cool").unwrap().value().to_string(), "true");
}

#[test]
fn values_before_an_error_are_kept() {
    let mut flags = Flags::new();
    let age = flags.set("age", 0, "").unwrap();
    let cool = flags.set("cool", false, "").unwrap();
    let err = flags.parse(&["-age=30", "-cool=nope", "-age=40"], opts()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conversion);
    assert_eq!(err.flag(), Some("cool"));
    assert_eq!(flags[age], 30);
    assert!(!flags[cool]);
}

#[test]
fn independent_registries() {
    let mut build = Flags::new();
    let mut test = Flags::new();
    let release = build.set("release", false, "").unwrap();
    let jobs = test.set("jobs", 1u32, "").unwrap();

    build.parse(&["-release", "-jobs=4"], opts()).unwrap();
    test.parse(&["-release", "-jobs=4"], opts()).unwrap();
    assert!(build[release]);
    assert_eq!(test[jobs], 4);
    assert!(build.lookup("jobs").is_none());
}
