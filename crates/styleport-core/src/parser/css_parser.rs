//! CSS syntax parser using the `cssparser` crate.
//!
//! Tokenizes stylesheet text and builds the [`RuleModel`]. Recoverable
//! issues (unsupported at-rules, selectors the model cannot represent,
//! malformed declarations) are collected as [`ParseWarning`]s and the
//! offending construct is skipped; only unbalanced input is fatal.

use cssparser::{Delimiter, ParseError as CssParseError, Parser, ParserInput, Token};

use crate::model::{Declaration, KeyframesBlock, Rule, RuleModel, Waypoint};
use crate::parser::{ParseWarning, prescan};
use crate::selector::Selector;
use crate::{Error, Result};

/// The result of parsing one stylesheet.
#[derive(Debug, Clone)]
pub struct ParseOutcome {
    pub model: RuleModel,
    pub warnings: Vec<ParseWarning>,
}

/// Parse a CSS stylesheet string into a rule model.
///
/// Rules appear in the model in source order. Comma-separated selector lists
/// are expanded into independent rules with cloned declaration lists, so
/// downstream mutation of one expansion never affects another. `@media`
/// blocks are flattened onto their inner rules; `@keyframes` blocks are
/// collected separately.
///
/// Returns `Err` only for a fatal syntax condition: an unterminated block,
/// string, or comment (located by the balance pre-scan).
pub fn parse_css(css: &str) -> Result<ParseOutcome> {
    let cleaned = prescan::sanitize(css)?;

    let mut input = ParserInput::new(&cleaned);
    let mut parser = Parser::new(&mut input);
    let mut model = RuleModel::default();
    let mut warnings = Vec::new();

    parse_rule_list(&mut parser, &mut model, &mut warnings, None);

    Ok(ParseOutcome { model, warnings })
}

/// Parse a sequence of rules and at-rules until the parser is exhausted.
fn parse_rule_list<'i>(
    parser: &mut Parser<'i, '_>,
    model: &mut RuleModel,
    warnings: &mut Vec<ParseWarning>,
    media: Option<&str>,
) {
    loop {
        parser.skip_whitespace();
        if parser.is_exhausted() {
            break;
        }

        let location = parser.current_source_location();
        let state = parser.state();
        let token = match parser.next() {
            Ok(t) => t.clone(),
            Err(_) => break,
        };
        match token {
            Token::AtKeyword(name) => {
                parse_at_rule(parser, &name, model, warnings, media, location.line + 1);
            }
            _ => {
                parser.reset(&state);
                parse_style_rule(parser, model, warnings, media, location.line + 1);
            }
        }
    }
}

/// Parse one `selector-list { declarations }` rule.
fn parse_style_rule<'i>(
    parser: &mut Parser<'i, '_>,
    model: &mut RuleModel,
    warnings: &mut Vec<ParseWarning>,
    media: Option<&str>,
    line: u32,
) {
    let Some(selector_text) = consume_prelude(parser) else {
        // No block followed the prelude; nothing left to recover.
        return;
    };

    let declarations = match parser.parse_nested_block(|block| {
        Ok::<_, CssParseError<'_, ()>>(parse_declarations(block, warnings))
    }) {
        Ok(decls) => decls,
        Err(_) => return,
    };

    let parts = split_top_level(&selector_text, ',');
    if parts.is_empty() {
        warnings.push(ParseWarning::new("rule without a selector; skipped", line, 1));
        return;
    }
    for part in parts {
        match Selector::parse(&part) {
            Ok(selector) => {
                let mut rule = Rule::new(selector, declarations.clone());
                rule.media_query = media.map(str::to_string);
                model.rules.push(rule);
            }
            Err(Error::InvalidSelector { selector, message }) => {
                tracing::warn!("skipping selector '{}': {}", selector, message);
                warnings.push(ParseWarning::new(
                    format!("skipped selector '{selector}': {message}"),
                    line,
                    1,
                ));
            }
            Err(other) => {
                warnings.push(ParseWarning::new(other.to_string(), line, 1));
            }
        }
    }
}

/// Dispatch an at-rule by name.
fn parse_at_rule<'i>(
    parser: &mut Parser<'i, '_>,
    name: &str,
    model: &mut RuleModel,
    warnings: &mut Vec<ParseWarning>,
    media: Option<&str>,
    line: u32,
) {
    match name {
        "media" => {
            if media.is_some() {
                warnings.push(ParseWarning::new(
                    "nested @media blocks are not supported; skipped",
                    line,
                    1,
                ));
                skip_construct(parser);
                return;
            }
            parse_media_block(parser, model, warnings, line);
        }
        "keyframes" | "-webkit-keyframes" => {
            parse_keyframes_block(parser, model, warnings, line);
        }
        "import" => {
            let Some(target) = consume_through_semicolon(parser) else {
                return;
            };
            tracing::debug!("recording @import {}", target);
            model.imports.push(target.clone());
            warnings.push(ParseWarning::new(
                format!("@import {target} is not converted; port it separately"),
                line,
                1,
            ));
        }
        other => {
            tracing::warn!("unsupported at-rule '@{}' skipped", other);
            warnings.push(ParseWarning::new(
                format!("unsupported at-rule '@{other}'; skipped"),
                line,
                1,
            ));
            skip_construct(parser);
        }
    }
}

/// Parse `@media <query> { rules }`, flattening the query onto inner rules.
fn parse_media_block<'i>(
    parser: &mut Parser<'i, '_>,
    model: &mut RuleModel,
    warnings: &mut Vec<ParseWarning>,
    line: u32,
) {
    let Some(query) = consume_prelude(parser) else {
        warnings.push(ParseWarning::new("malformed @media block; skipped", line, 1));
        return;
    };
    if query.is_empty() {
        warnings.push(ParseWarning::new("@media with empty query; skipped", line, 1));
        let _ = parser.parse_nested_block(|block| {
            consume_all(block);
            Ok::<_, CssParseError<'_, ()>>(())
        });
        return;
    }

    let _ = parser.parse_nested_block(|block| {
        parse_rule_list(block, model, warnings, Some(&query));
        Ok::<_, CssParseError<'_, ()>>(())
    });
}

/// Parse `@keyframes <name> { waypoints }`.
fn parse_keyframes_block<'i>(
    parser: &mut Parser<'i, '_>,
    model: &mut RuleModel,
    warnings: &mut Vec<ParseWarning>,
    line: u32,
) {
    let Some(prelude) = consume_prelude(parser) else {
        warnings.push(ParseWarning::new("malformed @keyframes block; skipped", line, 1));
        return;
    };
    let name = prelude.trim_matches(['"', '\'']).to_string();
    if name.is_empty() {
        warnings.push(ParseWarning::new("@keyframes without a name; skipped", line, 1));
        let _ = parser.parse_nested_block(|block| {
            consume_all(block);
            Ok::<_, CssParseError<'_, ()>>(())
        });
        return;
    }

    let mut waypoints = Vec::new();
    let _ = parser.parse_nested_block(|block| {
        loop {
            block.skip_whitespace();
            if block.is_exhausted() {
                break;
            }
            let Some(stop) = consume_prelude(block) else {
                break;
            };
            let declarations = match block.parse_nested_block(|body| {
                Ok::<_, CssParseError<'_, ()>>(parse_declarations(body, warnings))
            }) {
                Ok(decls) => decls,
                Err(_) => break,
            };
            if stop.is_empty() {
                continue;
            }
            waypoints.push(Waypoint { stop, declarations });
        }
        Ok::<_, CssParseError<'_, ()>>(())
    });

    if waypoints.is_empty() {
        warnings.push(ParseWarning::new(
            format!("@keyframes {name} has no waypoints; skipped"),
            line,
            1,
        ));
        return;
    }
    model.keyframes.push(KeyframesBlock { name, waypoints });
}

/// Parse the declarations inside a rule body.
fn parse_declarations<'i>(
    parser: &mut Parser<'i, '_>,
    warnings: &mut Vec<ParseWarning>,
) -> Vec<Declaration> {
    let mut declarations = Vec::new();

    loop {
        parser.skip_whitespace();
        if parser.is_exhausted() {
            break;
        }

        let location = parser.current_source_location();
        let property = match parser.expect_ident() {
            Ok(name) => name.to_string(),
            Err(_) => {
                warnings.push(ParseWarning::new(
                    "malformed declaration; skipped",
                    location.line + 1,
                    location.column,
                ));
                skip_declaration(parser);
                continue;
            }
        };

        if parser.expect_colon().is_err() {
            warnings.push(ParseWarning::new(
                format!("missing ':' after property '{property}'; declaration skipped"),
                location.line + 1,
                location.column,
            ));
            skip_declaration(parser);
            continue;
        }

        parser.skip_whitespace();
        let start = parser.position();
        let _ = parser.parse_until_before(Delimiter::Semicolon, |value| {
            consume_all(value);
            Ok::<_, CssParseError<'_, ()>>(())
        });
        let raw = parser.slice_from(start).trim();
        let (value, important) = strip_important(raw);

        if value.is_empty() {
            warnings.push(ParseWarning::new(
                format!("empty value for property '{property}'; declaration skipped"),
                location.line + 1,
                location.column,
            ));
        } else {
            declarations.push(Declaration {
                property,
                value: value.to_string(),
                mapped: None,
                important,
            });
        }

        let _ = parser.try_parse(|p| p.expect_semicolon());
    }

    declarations
}

/// Capture the raw text up to (but not including) the next `{`, then consume
/// the opening brace token. Returns `None` when no block follows.
fn consume_prelude<'i>(parser: &mut Parser<'i, '_>) -> Option<String> {
    let start = parser.position();
    let _ = parser.parse_until_before(Delimiter::CurlyBracketBlock, |prelude| {
        consume_all(prelude);
        Ok::<_, CssParseError<'_, ()>>(())
    });
    let text = parser.slice_from(start).trim().to_string();

    match parser.next() {
        Ok(Token::CurlyBracketBlock) => Some(text),
        _ => None,
    }
}

/// Capture the raw text up to the next top-level `;` and consume it.
fn consume_through_semicolon<'i>(parser: &mut Parser<'i, '_>) -> Option<String> {
    parser.skip_whitespace();
    let start = parser.position();
    let _ = parser.parse_until_before(Delimiter::Semicolon, |prelude| {
        consume_all(prelude);
        Ok::<_, CssParseError<'_, ()>>(())
    });
    let text = parser.slice_from(start).trim().to_string();
    let _ = parser.try_parse(|p| p.expect_semicolon());

    (!text.is_empty()).then_some(text)
}

/// Skip an at-rule body: everything through the next top-level `;` or block.
fn skip_construct(parser: &mut Parser<'_, '_>) {
    loop {
        match parser.next() {
            Ok(Token::Semicolon) | Err(_) => return,
            Ok(Token::CurlyBracketBlock) => {
                let _ = parser.parse_nested_block(|block| {
                    consume_all(block);
                    Ok::<_, CssParseError<'_, ()>>(())
                });
                return;
            }
            _ => {}
        }
    }
}

/// Skip to the end of the current declaration (error recovery).
fn skip_declaration(parser: &mut Parser<'_, '_>) {
    loop {
        match parser.next() {
            Ok(Token::Semicolon) | Err(_) => return,
            Ok(Token::CurlyBracketBlock) => {
                let _ = parser.parse_nested_block(|block| {
                    consume_all(block);
                    Ok::<_, CssParseError<'_, ()>>(())
                });
            }
            _ => {}
        }
    }
}

fn consume_all(parser: &mut Parser<'_, '_>) {
    while parser.next_including_whitespace().is_ok() {}
}

/// Strip a trailing `!important` (case-insensitive) from a raw value.
fn strip_important(raw: &str) -> (&str, bool) {
    if let Some(bang) = raw.rfind('!') {
        if raw[bang + 1..].trim().eq_ignore_ascii_case("important") {
            return (raw[..bang].trim_end(), true);
        }
    }
    (raw, false)
}

/// Split on a separator, ignoring separators inside parentheses or quotes.
fn split_top_level(text: &str, sep: char) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;

    for ch in text.chars() {
        match quote {
            Some(q) => {
                current.push(ch);
                if ch == q {
                    quote = None;
                }
            }
            None => match ch {
                '"' | '\'' => {
                    quote = Some(ch);
                    current.push(ch);
                }
                '(' => {
                    depth += 1;
                    current.push(ch);
                }
                ')' => {
                    depth = depth.saturating_sub(1);
                    current.push(ch);
                }
                c if c == sep && depth == 0 => {
                    parts.push(std::mem::take(&mut current));
                    continue;
                }
                _ => current.push(ch),
            },
        }
    }
    parts.push(current);

    parts
        .into_iter()
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .collect()
}
