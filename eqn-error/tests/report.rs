use eqn_attrs::ErrorKind;
use eqn_error::Error;

#[derive(Debug, ErrorKind)]
#[error(
    message = format!("unrecognized expression `{}`", text),
    labels = ["this escape sequence is not known"],
    help = "check the spelling of the command",
)]
struct Unrecognized {
    text: String,
}

#[derive(Debug, ErrorKind)]
#[error(message = "empty expression")]
struct Empty;

/// Renders the report of the error with the colors stripped out.
fn render(err: &Error, input: &str) -> String {
    let mut out = Vec::new();
    err.write_report("input", input, &mut out).unwrap();
    String::from_utf8(strip_ansi_escapes::strip(out)).unwrap()
}

#[test]
fn message_uses_fields() {
    let err = Error::new(vec![0..4], Unrecognized { text: "\\foo".to_string() });
    assert_eq!(err.to_string(), "unrecognized expression `\\foo`");
    assert!(err.is::<Unrecognized>());
    assert!(!err.is::<Empty>());
    assert_eq!(err.downcast_ref::<Unrecognized>().unwrap().text, "\\foo");
}

#[test]
fn report_contains_labels_and_help() {
    let err = Error::new(vec![2..6], Unrecognized { text: "\\foo".to_string() });
    let report = render(&err, "2+\\foo");
    assert!(report.contains("unrecognized expression `\\foo`"));
    assert!(report.contains("this escape sequence is not known"));
    assert!(report.contains("check the spelling of the command"));
}

#[test]
fn report_without_spans() {
    let err = Error::new(Vec::new(), Empty);
    let report = render(&err, "1+");
    assert!(report.contains("empty expression"));
}
