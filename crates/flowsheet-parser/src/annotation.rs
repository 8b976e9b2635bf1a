//! Custom properties embedded in a row's comment cell.
//!
//! A comment may contain any number of bracketed groups. Each group holds
//! `;`-separated `key: value` fragments; text outside the brackets is
//! ignored:
//!
//! ```text
//! Reviewed weekly [Owner: Finance; SLA: "2 days"] [Input: amount = 100]
//! ```
//!
//! yields `Owner = Finance`, `SLA = 2 days` and `Input = {amount: 100}`.

use log::warn;
use thiserror::Error;
use winnow::{
    Parser as _,
    combinator::{delimited, preceded, repeat, terminated},
    error::{ContextError, ErrMode},
    token::{take_till, take_until},
};

use flowsheet_core::semantic::{Properties, PropertyValue};

/// Key whose value may hold a nested `name = value` pair.
const INPUT_KEY: &str = "Input";

type Input<'src> = &'src str;
type IResult<O> = Result<O, ErrMode<ContextError>>;

/// A comment that opens a `[` group without closing it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unterminated `[` at byte {offset} of the comment")]
pub struct MalformedAnnotation {
    /// Byte offset of the unmatched `[` within the comment.
    pub offset: usize,
}

/// Parses the custom properties of a comment cell.
///
/// Annotation parsing never fails. A trailing `[` without a matching `]` is
/// logged and ignored; the complete groups before it still count.
///
/// # Examples
///
/// ```
/// # use flowsheet_parser::parse_annotation;
/// let props = parse_annotation("[Owner: Finance; Priority: high]");
/// assert_eq!(props["Owner"].as_text(), Some("Finance"));
/// assert_eq!(props["Priority"].as_text(), Some("high"));
///
/// // Fragments without a colon are skipped.
/// assert!(parse_annotation("[Owner Finance]").is_empty());
/// ```
pub fn parse_annotation(comment: &str) -> Properties {
    let (properties, malformed) = parse_annotation_groups(comment);
    if let Some(err) = malformed {
        warn!(comment, err:%; "Ignoring unclosed annotation group");
    }
    properties
}

/// Parses the custom properties of a comment cell and reports an unclosed
/// trailing group alongside them.
pub(crate) fn parse_annotation_groups(comment: &str) -> (Properties, Option<MalformedAnnotation>) {
    let mut input = comment;
    // Every sub-parser accepts empty input, so this cannot fail.
    let bodies = groups.parse_next(&mut input).unwrap_or_default();

    let malformed = (!input.is_empty()).then(|| MalformedAnnotation {
        offset: comment.len() - input.len(),
    });

    let mut properties = Properties::new();
    for fragment in bodies.iter().flat_map(|body| body.split(';')) {
        if let Some((key, value)) = parse_fragment(fragment) {
            properties.insert(key, value);
        }
    }
    (properties, malformed)
}

/// Collects the bodies of all complete `[...]` groups.
///
/// Stops in front of a `[` that has no matching `]`, leaving it unconsumed.
fn groups<'src>(input: &mut Input<'src>) -> IResult<Vec<&'src str>> {
    terminated(
        repeat(0.., preceded(outside_text, bracket_group)),
        outside_text,
    )
    .parse_next(input)
}

fn outside_text<'src>(input: &mut Input<'src>) -> IResult<&'src str> {
    take_till(0.., '[').parse_next(input)
}

/// `[` body `]`, where the body runs to the nearest `]`.
fn bracket_group<'src>(input: &mut Input<'src>) -> IResult<&'src str> {
    delimited('[', take_until(0.., "]"), ']').parse_next(input)
}

/// Splits one `key: value` fragment.
///
/// Returns `None` when either side is empty or there is no colon.
fn parse_fragment(fragment: &str) -> Option<(String, PropertyValue)> {
    let (key, value) = fragment.split_once(':')?;
    let (key, value) = (key.trim(), value.trim());
    if key.is_empty() || value.is_empty() {
        return None;
    }

    if key == INPUT_KEY {
        if let Some((inner_key, inner_value)) = value.split_once('=') {
            let entry = PropertyValue::Entry {
                key: strip_quotes(inner_key.trim()),
                value: strip_quotes(inner_value.trim()),
            };
            return Some((key.to_string(), entry));
        }
    }

    Some((key.to_string(), PropertyValue::Text(strip_quotes(value))))
}

fn strip_quotes(value: &str) -> String {
    value.trim_matches('"').to_string()
}
