//! Lenient JSON decoding for template manifests.
//!
//! Template authors routinely leave comments and trailing commas in
//! `template.json`; both are removed before handing the text to serde_json.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Decode JSON that may contain `//` and `/* */` comments, trailing commas
/// and a leading byte order mark.
pub(crate) fn from_lenient_str<T: DeserializeOwned>(text: &str) -> serde_json::Result<T> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let cleaned = strip_trailing_commas(&strip_comments(text));
    serde_json::from_str(&cleaned)
}

/// Decode like [`from_lenient_str`], renaming top-level keys that match one
/// of `fields` ignoring ASCII case to that spelling first. A key already
/// spelled exactly like the field wins over its case variants.
pub(crate) fn from_lenient_str_with_fields<T: DeserializeOwned>(
    text: &str,
    fields: &[&str],
) -> serde_json::Result<T> {
    let value: Value = from_lenient_str(text)?;
    serde_json::from_value(canonicalize_keys(value, fields))
}

fn canonicalize_keys(value: Value, fields: &[&str]) -> Value {
    let Value::Object(map) = value else {
        return value;
    };

    let mut out = Map::with_capacity(map.len());
    for (key, item) in map {
        match fields.iter().find(|field| field.eq_ignore_ascii_case(&key)) {
            Some(field) if **field != key => {
                if !out.contains_key(*field) {
                    out.insert(field.to_string(), item);
                }
            }
            _ => {
                out.insert(key, item);
            }
        }
    }
    Value::Object(out)
}

/// Replace comments outside of strings with whitespace, keeping newlines so
/// error positions still point at the right line.
fn strip_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    let mut in_string = false;

    while let Some(c) = chars.next() {
        if in_string {
            out.push(c);
            match c {
                '\\' => {
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                }
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        let next = chars.peek().copied();
        match (c, next) {
            ('"', _) => {
                in_string = true;
                out.push(c);
            }
            ('/', Some('/')) => {
                for skipped in chars.by_ref() {
                    if skipped == '\n' {
                        out.push('\n');
                        break;
                    }
                }
            }
            ('/', Some('*')) => {
                chars.next();
                let mut prev = ' ';
                for skipped in chars.by_ref() {
                    if prev == '*' && skipped == '/' {
                        break;
                    }
                    if skipped == '\n' {
                        out.push('\n');
                    }
                    prev = skipped;
                }
                out.push(' ');
            }
            _ => out.push(c),
        }
    }

    out
}

/// Drop commas that are directly followed (ignoring whitespace) by `}` or `]`.
fn strip_trailing_commas(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut in_string = false;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if in_string {
            out.push(c);
            if c == '\\' {
                if let Some(&escaped) = chars.get(i + 1) {
                    out.push(escaped);
                    i += 1;
                }
            } else if c == '"' {
                in_string = false;
            }
        } else if c == '"' {
            in_string = true;
            out.push(c);
        } else if c == ',' {
            let next = chars[i + 1..].iter().find(|ch| !ch.is_whitespace());
            if !matches!(next, Some('}') | Some(']')) {
                out.push(c);
            }
        } else {
            out.push(c);
        }
        i += 1;
    }

    out
}
