use burrow_derive::burrow_error;
use std::borrow::Cow;

#[burrow_error]
pub enum ParseError {
    #[error("Bad port{}: {source}", format_context(.context))]
    Port {
        #[source]
        source: std::num::ParseIntError,
        context: Option<Cow<'static, str>>,
    },

    #[error("Unknown token{}: {token}", format_context(.context))]
    Unknown { token: String, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn port(raw: &str) -> Result<u16, ParseError> {
    raw.parse::<u16>().context("reading listen port")
}

fn main() {
    assert!(port("1080").is_ok());
    assert!(matches!(port("x"), Err(ParseError::Port { context: Some(_), .. })));

    let err: ParseError = "boom".into();
    assert_eq!(err.to_string(), "Internal error: boom");

    let err: Result<(), ParseError> =
        Err(ParseError::Unknown { token: "-X".to_owned(), context: None });
    let err = err.context("parsing services").unwrap_err();
    assert_eq!(err.to_string(), "Unknown token (parsing services): -X");
}
