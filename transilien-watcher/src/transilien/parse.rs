//! Departure board parsing.
//!
//! Reads `<train>` elements in document order. A train with a missing or
//! unreadable field is skipped with a warning; only a document that is not
//! well-formed fails the whole board.

use chrono::NaiveDateTime;
use roxmltree::{Document, Node};
use tracing::{debug, warn};

use crate::domain::{Mission, TimetableEntry};

use super::error::{EntryError, ParseError};
use super::types::Departure;

/// Tag of the per-train element.
const TRAIN_TAG: &str = "train";

/// Parse every readable train in a departure board.
pub fn parse_departures(document: &str, date_format: &str) -> Result<Vec<Departure>, ParseError> {
    let doc = Document::parse(document)?;

    let departures: Vec<Departure> = doc
        .descendants()
        .filter(|n| n.has_tag_name(TRAIN_TAG))
        .enumerate()
        .filter_map(|(index, node)| match parse_train(node, date_format) {
            Ok(departure) => Some(departure),
            Err(e) => {
                warn!(index, error = %e, "skipping unreadable train");
                None
            }
        })
        .collect();

    debug!(count = departures.len(), "parsed departure board");
    Ok(departures)
}

/// Parse a departure board into display entries relative to `now`.
///
/// Entries keep document order. An empty board yields an empty list.
pub fn parse_schedule(
    document: &str,
    date_format: &str,
    now: NaiveDateTime,
) -> Result<Vec<TimetableEntry>, ParseError> {
    let departures = parse_departures(document, date_format)?;
    Ok(departures.iter().map(|d| d.to_entry(now)).collect())
}

fn parse_train(node: Node<'_, '_>, date_format: &str) -> Result<Departure, EntryError> {
    let mission = Mission::parse(child_text(node, "miss").ok_or(EntryError::Missing("miss"))?)?;

    let date = child(node, "date").ok_or(EntryError::Missing("date"))?;
    let value = date
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(EntryError::Missing("date"))?;
    let scheduled =
        NaiveDateTime::parse_from_str(value, date_format).map_err(|source| EntryError::Time {
            value: value.to_string(),
            source,
        })?;

    Ok(Departure {
        mission,
        scheduled,
        real_time: date.attribute("mode") == Some("R"),
        number: child_text(node, "num").map(str::to_string),
        terminus: child_text(node, "term").map(str::to_string),
        status: child_text(node, "etat").map(str::to_string),
    })
}

fn child<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|c| c.has_tag_name(tag))
}

/// Trimmed, non-empty text of the first child element named `tag`.
fn child_text<'a>(node: Node<'a, '_>, tag: &str) -> Option<&'a str> {
    child(node, tag)
        .and_then(|c| c.text())
        .map(str::trim)
        .filter(|t| !t.is_empty())
}
