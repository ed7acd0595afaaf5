//! Balance pre-scan over the raw source.
//!
//! The tokenizer recovers from most malformed input, but it auto-closes
//! blocks, strings, and comments at end of input, which would turn an
//! unterminated construct into silently truncated output. This pass walks the
//! source once, verifies brace/string/comment balance with exact locations,
//! and blanks out `//` line comments (which plain CSS does not have but
//! hand-written stylesheets frequently do) so the tokenizer never sees them.

use std::borrow::Cow;

use crate::{Error, Result};

/// Verify balance and strip line comments.
///
/// Returns the source with every line-comment character replaced by a space,
/// preserving byte positions so downstream locations stay accurate. Fails
/// with a located [`Error::Parse`] on an unterminated block, string, or
/// comment, or on a stray closing brace.
pub fn sanitize(css: &str) -> Result<Cow<'_, str>> {
    let mut cleaned: Option<Vec<u8>> = None;
    let bytes = css.as_bytes();

    let mut line: u32 = 1;
    let mut column: u32 = 1;
    let mut open_braces: Vec<(u32, u32)> = Vec::new();
    let mut paren_depth: usize = 0;
    let mut prev_non_space: Option<u8> = None;

    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        match b {
            b'/' if i + 1 < bytes.len() && bytes[i + 1] == b'*' => {
                let start = (line, column);
                advance(b'/', &mut line, &mut column);
                advance(b'*', &mut line, &mut column);
                let mut j = i + 2;
                let mut closed = false;
                while j < bytes.len() {
                    if bytes[j] == b'*' && j + 1 < bytes.len() && bytes[j + 1] == b'/' {
                        advance(b'*', &mut line, &mut column);
                        advance(b'/', &mut line, &mut column);
                        j += 2;
                        closed = true;
                        break;
                    }
                    advance(bytes[j], &mut line, &mut column);
                    j += 1;
                }
                if !closed {
                    return Err(Error::parse("unterminated comment", start.0, start.1));
                }
                i = j;
                continue;
            }
            b'/' if i + 1 < bytes.len()
                && bytes[i + 1] == b'/'
                && paren_depth == 0
                && matches!(prev_non_space, None | Some(b';') | Some(b'{') | Some(b'}')) =>
            {
                // Blank the comment through end of line.
                let buf = cleaned.get_or_insert_with(|| bytes.to_vec());
                let mut j = i;
                while j < bytes.len() && bytes[j] != b'\n' {
                    buf[j] = b' ';
                    column += 1;
                    j += 1;
                }
                i = j;
                continue;
            }
            b'"' | b'\'' => {
                let start = (line, column);
                column += 1;
                let mut j = i + 1;
                let mut closed = false;
                while j < bytes.len() {
                    match bytes[j] {
                        b'\\' if j + 1 < bytes.len() => {
                            advance(bytes[j], &mut line, &mut column);
                            advance(bytes[j + 1], &mut line, &mut column);
                            j += 2;
                            continue;
                        }
                        b'\n' => break,
                        c if c == b => {
                            column += 1;
                            closed = true;
                            j += 1;
                            break;
                        }
                        c => {
                            advance(c, &mut line, &mut column);
                            j += 1;
                        }
                    }
                }
                if !closed {
                    return Err(Error::parse("unterminated string", start.0, start.1));
                }
                prev_non_space = Some(b);
                i = j;
                continue;
            }
            b'{' => {
                open_braces.push((line, column));
                prev_non_space = Some(b);
            }
            b'}' => {
                if open_braces.pop().is_none() {
                    return Err(Error::parse("unexpected closing brace", line, column));
                }
                prev_non_space = Some(b);
            }
            b'(' => {
                paren_depth += 1;
                prev_non_space = Some(b);
            }
            b')' => {
                paren_depth = paren_depth.saturating_sub(1);
                prev_non_space = Some(b);
            }
            c if !c.is_ascii_whitespace() => {
                prev_non_space = Some(c);
            }
            _ => {}
        }
        advance(b, &mut line, &mut column);
        i += 1;
    }

    if let Some((l, c)) = open_braces.last() {
        return Err(Error::parse("unterminated block (unmatched '{')", *l, *c));
    }

    Ok(match cleaned {
        // Only line comments were blanked, so the bytes stay valid UTF-8.
        Some(buf) => Cow::Owned(String::from_utf8(buf).expect("blanking preserves UTF-8")),
        None => Cow::Borrowed(css),
    })
}

fn advance(b: u8, line: &mut u32, column: &mut u32) {
    if b == b'\n' {
        *line += 1;
        *column = 1;
    } else {
        *column += 1;
    }
}
