//! Quoting of identifiers and string literals in generated statements.

use smol_str::{SmolStr, SmolStrBuilder};

const BACKTICK: char = '`';

/// Wraps `ident` in backticks, doubling every backtick inside it.
///
/// ```
/// # use routinec_common::quote::quote_identifier;
/// assert_eq!(quote_identifier("pa`ram"), "`pa``ram`");
/// ```
pub fn quote_identifier(ident: &str) -> String {
    let mut quoted = String::with_capacity(ident.len() + 2);
    quoted.push(BACKTICK);
    for c in ident.chars() {
        if c == BACKTICK {
            quoted.push(BACKTICK);
        }
        quoted.push(c);
    }
    quoted.push(BACKTICK);
    quoted
}

/// Like [`quote_identifier`], but leaves `part` untouched if it already is a well-formed quoted
/// identifier, i.e. [`unquote_identifier`] accepts it.
pub fn quote_identifier_once(part: &str) -> String {
    if unquote_identifier(part).is_some() {
        part.to_owned()
    } else {
        quote_identifier(part)
    }
}

/// Reverses [`quote_identifier`].
///
/// Returns `None` if `quoted` is not enclosed in backticks or contains an undoubled backtick.
pub fn unquote_identifier(quoted: &str) -> Option<SmolStr> {
    let mut input = quoted.strip_prefix(BACKTICK)?.strip_suffix(BACKTICK)?;
    let mut builder = SmolStrBuilder::new();
    while let Some(pos) = input.find(BACKTICK) {
        let (first, last) = input.split_at(pos);
        builder.push_str(first);
        let rest = last.strip_prefix("``")?;
        builder.push(BACKTICK);
        input = rest;
    }
    builder.push_str(input);
    Some(builder.finish())
}

/// Wraps `text` in single quotes, prefixing every single quote inside it with a backslash.
///
/// No other character is altered; in particular backslashes are kept as they are.
pub fn quote_string_literal(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('\'');
    for c in text.chars() {
        if c == '\'' {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('\'');
    quoted
}

/// Wraps a value bound to a session variable in single quotes, escaping it the way the server's
/// string escaping does.
///
/// Unlike [`quote_string_literal`], backslashes are escaped too, so no value can end the literal.
pub fn quote_value_literal(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('\'');
    for c in value.chars() {
        match c {
            '\0' => quoted.push_str("\\0"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\x1a' => quoted.push_str("\\Z"),
            '\\' | '\'' | '"' => {
                quoted.push('\\');
                quoted.push(c);
            }
            c => quoted.push(c),
        }
    }
    quoted.push('\'');
    quoted
}
