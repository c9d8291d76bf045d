// crates/error-contract/src/format.rs
// ============================================================================
// Module: Positional Formatting
// Description: Composite `{index[,alignment][:format]}` template interpolation.
// Purpose: Interpolate catalog templates and guard messages without panics.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! Catalog templates and guard messages use positional placeholders such as
//! `{0}` and `{1,-8}`. [`format_template`] reports malformed templates and
//! out-of-range indices as [`FormatError`]; [`format_message`] never fails and
//! degrades to a diagnostic string instead.
//!
//! Arguments are already rendered strings, so the `:format` component of an
//! item is accepted and ignored. Extra arguments are ignored.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::iter::Peekable;
use std::str::CharIndices;

use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Largest accepted placeholder index or alignment width.
const MAX_ITEM_VALUE: usize = 1_000_000;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Template interpolation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// An opening brace starts an item that is never closed.
    #[error("unmatched '{{' at position {position}")]
    UnmatchedOpenBrace {
        /// Byte offset of the brace.
        position: usize,
    },
    /// A closing brace appears outside an item and is not escaped.
    #[error("unmatched '}}' at position {position}")]
    UnmatchedCloseBrace {
        /// Byte offset of the brace.
        position: usize,
    },
    /// The item syntax is invalid (missing index, bad alignment, stray brace).
    #[error("invalid format item at position {position}")]
    InvalidItem {
        /// Byte offset of the item's opening brace.
        position: usize,
    },
    /// An item references an argument that was not supplied.
    #[error("format item references index {index} but {count} argument(s) were supplied")]
    IndexOutOfRange {
        /// Referenced index.
        index: usize,
        /// Number of supplied arguments.
        count: usize,
    },
}

// ============================================================================
// SECTION: Formatting
// ============================================================================

/// Interpolates `args` into `template`.
///
/// # Errors
///
/// Returns [`FormatError`] when the template is malformed or references an
/// argument index that was not supplied.
pub fn format_template(template: &str, args: &[String]) -> Result<String, FormatError> {
    let mut output = String::with_capacity(template.len());
    let mut chars = template.char_indices().peekable();
    while let Some((position, ch)) = chars.next() {
        match ch {
            '{' => {
                if chars.next_if(|(_, next)| *next == '{').is_some() {
                    output.push('{');
                    continue;
                }
                let item = parse_item(&mut chars, position)?;
                let Some(arg) = args.get(item.index) else {
                    return Err(FormatError::IndexOutOfRange {
                        index: item.index,
                        count: args.len(),
                    });
                };
                push_aligned(&mut output, arg, item.alignment, item.left_align);
            }
            '}' => {
                if chars.next_if(|(_, next)| *next == '}').is_none() {
                    return Err(FormatError::UnmatchedCloseBrace {
                        position,
                    });
                }
                output.push('}');
            }
            _ => output.push(ch),
        }
    }
    Ok(output)
}

/// Interpolates `args` into `template`, never failing.
///
/// Returns `template` verbatim when `args` is empty. When interpolation fails
/// the result is a diagnostic naming the template and the arguments.
#[must_use]
pub fn format_message(template: &str, args: &[String]) -> String {
    if args.is_empty() {
        return template.to_string();
    }
    format_template(template, args).unwrap_or_else(|_| formatting_failure(template, args))
}

/// Diagnostic text used when a template cannot be interpolated.
#[must_use]
pub fn formatting_failure(template: &str, args: &[String]) -> String {
    let rendered = if args.is_empty() { "no parameters".to_string() } else { args.join(",") };
    format!("Can't parse the format '{template}' with the parameters: {rendered}")
}

// ============================================================================
// SECTION: Item Parsing
// ============================================================================

/// Parsed `{index[,alignment][:format]}` item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FormatItem {
    /// Argument index.
    pub(crate) index: usize,
    /// Minimum rendered width.
    pub(crate) alignment: usize,
    /// Pads on the right instead of the left.
    pub(crate) left_align: bool,
}

/// Parses an item whose opening brace was consumed at `start`.
pub(crate) fn parse_item(
    chars: &mut Peekable<CharIndices<'_>>,
    start: usize,
) -> Result<FormatItem, FormatError> {
    let invalid = FormatError::InvalidItem {
        position: start,
    };
    let Some(index) = parse_number(chars) else {
        return Err(if chars.peek().is_none() {
            FormatError::UnmatchedOpenBrace {
                position: start,
            }
        } else {
            invalid
        });
    };
    skip_spaces(chars);

    let mut alignment = 0;
    let mut left_align = false;
    if chars.next_if(|(_, ch)| *ch == ',').is_some() {
        skip_spaces(chars);
        left_align = chars.next_if(|(_, ch)| *ch == '-').is_some();
        alignment = parse_number(chars).ok_or_else(|| invalid.clone())?;
        skip_spaces(chars);
    }

    if chars.next_if(|(_, ch)| *ch == ':').is_some() {
        loop {
            match chars.peek().map(|(_, ch)| *ch) {
                Some('}') => break,
                Some('{') => return Err(invalid),
                Some(_) => {
                    chars.next();
                }
                None => {
                    return Err(FormatError::UnmatchedOpenBrace {
                        position: start,
                    });
                }
            }
        }
    }

    match chars.next() {
        Some((_, '}')) => Ok(FormatItem {
            index,
            alignment,
            left_align,
        }),
        Some(_) => Err(invalid),
        None => Err(FormatError::UnmatchedOpenBrace {
            position: start,
        }),
    }
}

/// Parses a run of ASCII digits bounded by [`MAX_ITEM_VALUE`].
fn parse_number(chars: &mut Peekable<CharIndices<'_>>) -> Option<usize> {
    let mut value: Option<usize> = None;
    while let Some((_, ch)) = chars.next_if(|(_, ch)| ch.is_ascii_digit()) {
        let digit = usize::try_from(ch.to_digit(10)?).ok()?;
        let next = value.unwrap_or(0).checked_mul(10)?.checked_add(digit)?;
        if next > MAX_ITEM_VALUE {
            return None;
        }
        value = Some(next);
    }
    value
}

/// Skips spaces inside an item.
fn skip_spaces(chars: &mut Peekable<CharIndices<'_>>) {
    while chars.next_if(|(_, ch)| *ch == ' ').is_some() {}
}

/// Appends `arg` padded with spaces to `width` characters.
fn push_aligned(output: &mut String, arg: &str, width: usize, left_align: bool) {
    let padding = width.saturating_sub(arg.chars().count());
    if left_align {
        output.push_str(arg);
        output.extend(std::iter::repeat_n(' ', padding));
    } else {
        output.extend(std::iter::repeat_n(' ', padding));
        output.push_str(arg);
    }
}

#[cfg(test)]
mod tests {
    use super::FormatError;
    use super::FormatItem;
    use super::parse_item;

    /// Parses `body` as if its opening brace was consumed at position 0.
    fn parse(body: &str) -> Result<FormatItem, FormatError> {
        let mut chars = body.char_indices().peekable();
        parse_item(&mut chars, 0)
    }

    #[test]
    fn parse_item_reads_index_alignment_and_format() {
        assert_eq!(
            parse("12}"),
            Ok(FormatItem {
                index: 12,
                alignment: 0,
                left_align: false,
            })
        );
        assert_eq!(
            parse("0, -8:X4}"),
            Ok(FormatItem {
                index: 0,
                alignment: 8,
                left_align: true,
            })
        );
        assert_eq!(
            parse("3,5}"),
            Ok(FormatItem {
                index: 3,
                alignment: 5,
                left_align: false,
            })
        );
    }

    #[test]
    fn parse_item_rejects_malformed_items() {
        assert!(matches!(parse("}"), Err(FormatError::InvalidItem { .. })));
        assert!(matches!(parse("a}"), Err(FormatError::InvalidItem { .. })));
        assert!(matches!(parse("0,}"), Err(FormatError::InvalidItem { .. })));
        assert!(matches!(parse("0:{x}"), Err(FormatError::InvalidItem { .. })));
        assert!(matches!(parse("99999999}"), Err(FormatError::InvalidItem { .. })));
    }

    #[test]
    fn parse_item_reports_unterminated_items() {
        assert!(matches!(parse(""), Err(FormatError::UnmatchedOpenBrace { .. })));
        assert!(matches!(parse("0"), Err(FormatError::UnmatchedOpenBrace { .. })));
        assert!(matches!(parse("0:abc"), Err(FormatError::UnmatchedOpenBrace { .. })));
    }
}
