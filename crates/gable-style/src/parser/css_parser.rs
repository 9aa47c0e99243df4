//! Stylesheet parsing state machine.
//!
//! A single pass over the preprocessed character stream splits the input
//! into selector lists and declarations, compiling rules as their blocks
//! open. Parsing is all-or-nothing: the first malformed construct aborts
//! the whole parse with a line number, and no partial result is returned.

use crate::error::{Error, Result};
use crate::rules::StyleRule;
use crate::selector::compile;

use super::preprocess::CommentStripper;

/// What a single scanner transition flushed.
#[derive(Debug, PartialEq, Eq)]
enum Flush {
    /// Selector-list text collected before a `{`.
    BlockOpen(String),
    /// One declaration body, ended by `;`.
    Declaration(String),
    /// The final declaration body, ended by the `}` closing the rule.
    BlockClose(String),
}

/// Scanner state threaded through the character fold.
///
/// Lives only for the duration of one [`parse_css`] call.
#[derive(Debug)]
struct ParseState {
    /// 1-based line number of the character being examined.
    line: u32,
    /// Inside a `{ }` declaration block.
    in_rule: bool,
    /// Inside a `"..."` string.
    in_string: bool,
    /// Inside a `'...'` character sequence.
    in_character: bool,
    /// Accumulated text since the last flush.
    buffer: String,
}

impl ParseState {
    fn new() -> Self {
        Self {
            line: 1,
            in_rule: false,
            in_string: false,
            in_character: false,
            buffer: String::new(),
        }
    }

    fn take_buffer(&mut self) -> String {
        std::mem::take(&mut self.buffer)
    }

    /// Advance the scanner by one character.
    fn step(&mut self, ch: char) -> Result<Option<Flush>> {
        if ch == '\n' {
            self.line += 1;
        }

        if self.in_string || self.in_character {
            match ch {
                '"' if self.in_string => self.in_string = false,
                '\'' if self.in_character => self.in_character = false,
                // The other quote character is stored literally.
                _ => {}
            }
            self.buffer.push(ch);
            return Ok(None);
        }

        match ch {
            '{' => {
                if self.in_rule {
                    return Err(Error::parse("found { inside a rule", self.line));
                }
                self.in_rule = true;
                Ok(Some(Flush::BlockOpen(self.take_buffer())))
            }
            '}' => {
                if !self.in_rule {
                    return Err(Error::parse("found } not ending a rule", self.line));
                }
                self.in_rule = false;
                Ok(Some(Flush::BlockClose(self.take_buffer())))
            }
            ';' if self.in_rule => Ok(Some(Flush::Declaration(self.take_buffer()))),
            '"' => {
                self.in_string = true;
                self.buffer.push(ch);
                Ok(None)
            }
            '\'' => {
                self.in_character = true;
                self.buffer.push(ch);
                Ok(None)
            }
            // Everything else accumulates, including delimiters that are
            // not consumed in the current context.
            _ => {
                self.buffer.push(ch);
                Ok(None)
            }
        }
    }
}

/// Parse stylesheet text into an ordered list of style rules.
///
/// Comments are stripped first; the remaining stream is scanned once. A
/// selector list separated by top-level commas expands into one rule per
/// selector, all of which receive the declarations of the shared block.
///
/// # Errors
///
/// The first malformed construct (brace mismatch, declaration without a
/// `:`, invalid selector, or end of input inside a rule) aborts the parse
/// with a 1-based line number. There is no error recovery.
pub fn parse_css(text: &str) -> Result<Vec<StyleRule>> {
    let mut state = ParseState::new();
    let mut finished = Vec::new();
    let mut open: Vec<StyleRule> = Vec::new();

    for ch in CommentStripper::new(text.chars()) {
        match state.step(ch)? {
            None => {}
            Some(Flush::BlockOpen(selectors)) => {
                open = open_rules(&selectors, state.line)?;
            }
            Some(Flush::Declaration(declaration)) => {
                apply_declaration(&declaration, &mut open, state.line)?;
            }
            Some(Flush::BlockClose(declaration)) => {
                apply_declaration(&declaration, &mut open, state.line)?;
                finished.append(&mut open);
            }
        }
    }

    if state.in_rule {
        return Err(Error::parse(
            "unexpected end of input inside a rule",
            state.line,
        ));
    }

    tracing::debug!(rules = finished.len(), "parsed stylesheet");
    Ok(finished)
}

/// Expand a selector list into one open rule per comma-separated selector.
///
/// Commas inside `[...]` or quotes are not separators.
fn open_rules(selectors: &str, line: u32) -> Result<Vec<StyleRule>> {
    let mut rules = Vec::new();
    for piece in split_selector_list(selectors) {
        let piece = piece.trim();
        let selector = compile(piece).map_err(|source| Error::selector(piece, line, source))?;
        rules.push(StyleRule::new(selector));
    }
    Ok(rules)
}

/// Split selector-list text on top-level commas only.
fn split_selector_list(text: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut start = 0;
    let mut in_attribute = false;
    let mut in_string = false;
    let mut in_character = false;

    for (index, ch) in text.char_indices() {
        match ch {
            '"' if !in_character => in_string = !in_string,
            '\'' if !in_string => in_character = !in_character,
            '[' if !in_string && !in_character => in_attribute = true,
            ']' if !in_string && !in_character => in_attribute = false,
            ',' if !in_string && !in_character && !in_attribute => {
                pieces.push(&text[start..index]);
                start = index + 1;
            }
            _ => {}
        }
    }
    pieces.push(&text[start..]);
    pieces
}

/// Flush one declaration body into every open rule.
///
/// The body is split on the first `:`; one layer of matching surrounding
/// quotes is stripped from the value; the literal value `null` is stored
/// as an explicit unset.
fn apply_declaration(declaration: &str, rules: &mut [StyleRule], line: u32) -> Result<()> {
    let declaration = declaration.trim();
    if declaration.is_empty() {
        return Ok(());
    }

    let Some((key, value)) = declaration.split_once(':') else {
        return Err(Error::parse(
            format!("cannot read property '{}'", declaration),
            line,
        ));
    };

    let key = key.trim();
    let value = unquote(value.trim());
    let value = if value == "null" {
        None
    } else {
        Some(value.to_string())
    };

    for rule in rules.iter_mut() {
        rule.set_property(key, value.clone());
    }
    Ok(())
}

/// Strip one layer of matching surrounding quotes.
fn unquote(value: &str) -> &str {
    let bytes = value.as_bytes();
    if bytes.len() >= 2 {
        let first = bytes[0];
        if (first == b'"' || first == b'\'') && bytes[bytes.len() - 1] == first {
            return &value[1..value.len() - 1];
        }
    }
    value
}
