//! Built-in whitespace/comment-stripping minifiers for css and js assets.
//!
//! These are deliberately simple text transforms: strip comments, collapse
//! whitespace, and tighten spacing around punctuation. They do not parse
//! the languages. String literals in js are copied verbatim; regular
//! expression literals are not recognized.

use crate::filter::Filter;

/// Punctuation that never needs adjacent spaces in css or js output.
fn is_tight(c: char) -> bool {
    matches!(c, ';' | ',' | ':' | '(' | ')' | '{' | '}')
}

/// Appends `c`, first emitting a single separating space if one is pending
/// and neither neighbor is tight punctuation.
fn push_spaced(out: &mut String, c: char, pending_space: &mut bool) {
    if *pending_space {
        if !out.is_empty() && !is_tight(c) && !out.ends_with(is_tight) {
            out.push(' ');
        }
        *pending_space = false;
    }
    out.push(c);
}

/// Removes `/* ... */` comments. An unterminated comment runs to the end.
fn strip_block_comments(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(start) = rest.find("/*") {
        out.push_str(&rest[..start]);
        match rest[start + 2..].find("*/") {
            Some(end) => rest = &rest[start + 2 + end + 2..],
            None => return out,
        }
    }
    out.push_str(rest);
    out
}

/// Strips css comments, collapses whitespace runs, and drops spaces
/// adjacent to `;,:(){}`.
fn minify_css(input: &str) -> String {
    let stripped = strip_block_comments(input);
    let mut out = String::with_capacity(stripped.len());
    let mut pending_space = false;
    for c in stripped.chars() {
        if c.is_whitespace() {
            pending_space = true;
        } else {
            push_spaced(&mut out, c, &mut pending_space);
        }
    }
    out
}

/// Strips js block and line comments, collapses whitespace runs outside
/// string literals, and drops spaces adjacent to `;,:(){}`.
fn minify_js(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    let mut pending_space = false;

    while let Some(c) = chars.next() {
        match c {
            '"' | '\'' | '`' => {
                push_spaced(&mut out, c, &mut pending_space);
                while let Some(s) = chars.next() {
                    out.push(s);
                    if s == '\\' {
                        if let Some(escaped) = chars.next() {
                            out.push(escaped);
                        }
                        continue;
                    }
                    if s == c {
                        break;
                    }
                }
            }
            '/' if chars.peek() == Some(&'/') => {
                while let Some(&next) = chars.peek() {
                    if next == '\n' || next == '\r' {
                        break;
                    }
                    chars.next();
                }
            }
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let mut prev = '\0';
                for s in chars.by_ref() {
                    if prev == '*' && s == '/' {
                        break;
                    }
                    prev = s;
                }
            }
            c if c.is_whitespace() => pending_space = true,
            c => push_spaced(&mut out, c, &mut pending_space),
        }
    }
    out
}

/// Whitespace/comment stripper for css assets.
#[derive(Default)]
pub struct CssMinifier;

impl Filter for CssMinifier {
    fn name(&self) -> &str {
        "css-minify"
    }

    fn kinds(&self) -> &[&str] {
        &["css"]
    }

    fn apply(&self, input: &[u8]) -> Vec<u8> {
        minify_css(&String::from_utf8_lossy(input)).into_bytes()
    }
}

/// Comment and whitespace stripper for js assets.
#[derive(Default)]
pub struct JsMinifier;

impl Filter for JsMinifier {
    fn name(&self) -> &str {
        "js-minify"
    }

    fn kinds(&self) -> &[&str] {
        &["js"]
    }

    fn apply(&self, input: &[u8]) -> Vec<u8> {
        minify_js(&String::from_utf8_lossy(input)).into_bytes()
    }
}
