use std::borrow::Cow;

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Everything but `A-Z a-z 0-9 - _ .`, the classic form encoding set.
const FORM: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.');

/// Form-style decoding: `+` is a space, `%XX` is a byte.
pub fn url_decode(s: &str) -> String {
    let s: Cow<'_, str> = if s.contains('+') {
        s.replace('+', " ").into()
    } else {
        s.into()
    };
    percent_decode_str(&s).decode_utf8_lossy().into_owned()
}

/// Form-style encoding, spaces become `+`.
pub fn url_encode(s: &str) -> String {
    utf8_percent_encode(s, FORM).to_string().replace("%20", "+")
}
