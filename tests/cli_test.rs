use clap::Parser;
use gt::cli::Args;
use std::ffi::OsString;
use std::path::PathBuf;

fn make_args(args: &[&str]) -> Vec<OsString> {
    let mut res = vec![OsString::from("gt")];
    res.extend(args.iter().map(OsString::from));
    res
}

#[test]
fn test_basic_args() {
    let args = make_args(&["./template.tmpl", "./data.json"]);
    let parsed = Args::try_parse_from(args).unwrap();

    assert_eq!(parsed.template, PathBuf::from("./template.tmpl"));
    assert_eq!(parsed.data, Some(PathBuf::from("./data.json")));
    assert!(!parsed.verbose);
}

#[test]
fn test_data_is_optional() {
    let args = make_args(&["./template.tmpl"]);
    let parsed = Args::try_parse_from(args).unwrap();

    assert_eq!(parsed.template, PathBuf::from("./template.tmpl"));
    assert_eq!(parsed.data, None);
}

#[test]
fn test_verbose_flags() {
    let parsed = Args::try_parse_from(make_args(&["--verbose", "./t", "./d"])).unwrap();
    assert!(parsed.verbose);

    let parsed = Args::try_parse_from(make_args(&["-v", "./t"])).unwrap();
    assert!(parsed.verbose);
}

#[test]
fn test_missing_args() {
    let args = make_args(&[]);
    let err = Args::try_parse_from(args).unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
}

#[test]
fn test_too_many_args() {
    let args = make_args(&["./t", "./d", "./extra"]);
    assert!(Args::try_parse_from(args).is_err());
}
