#![allow(clippy::unwrap_used, reason = "tests unwrap known-good literals")]

use super::*;
use kite_value::EvalErrorKind;
use pretty_assertions::assert_eq;

fn decode(raw: &str) -> Vec<u8> {
    decode_escapes(raw.as_bytes()).unwrap().into_owned()
}

#[test]
fn plain_text_is_borrowed() {
    assert!(matches!(decode_escapes(b"plain"), Ok(Cow::Borrowed(_))));
}

#[test]
fn named_escapes() {
    assert_eq!(decode(r"a\nb\tc\r"), b"a\nb\tc\r".to_vec());
    assert_eq!(decode(r"\b\f\e"), vec![0x08, 0x0c, 0x1b]);
    assert_eq!(decode(r#"\\ \" \'"#), br#"\ " '"#.to_vec());
}

#[test]
fn numeric_escapes() {
    assert_eq!(decode(r"\0"), vec![0]);
    assert_eq!(decode(r"\101\o102"), b"AB".to_vec());
    assert_eq!(decode(r"\d067\x44"), b"CD".to_vec());
    assert_eq!(decode(r"\x4a1"), b"J1".to_vec());
    assert_eq!(decode(r"\1011"), b"A1".to_vec());
}

#[test]
fn unknown_escape_keeps_character() {
    assert_eq!(decode(r"\q\8"), b"q8".to_vec());
}

#[test]
fn embedded_nul_survives() {
    assert_eq!(decode(r"a\0b"), vec![b'a', 0, b'b']);
}

#[test]
fn malformed_escapes_are_fatal() {
    for raw in [r"end\", r"\x", r"\dzz", r"\o9", r"\d300", r"\777"] {
        let err = decode_escapes(raw.as_bytes()).unwrap_err();
        assert!(
            matches!(err.kind, EvalErrorKind::MalformedEscape { .. }),
            "{raw}: {err}"
        );
    }
}
