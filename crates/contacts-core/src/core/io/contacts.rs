use crate::core::models::contact::{Contact, InteractionType};
use crate::core::models::label::{AtomLabel, LabelParseError};
use serde::Deserialize;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContactParseError {
    #[error("File I/O error for '{path}': {source}")]
    Io { path: String, source: io::Error },
    #[error("Malformed contact row on line {line}: {source}")]
    Row { line: u64, source: csv::Error },
    #[error("Invalid atom label on line {line}: {source}")]
    Label {
        line: u64,
        source: LabelParseError,
    },
    #[error("Malformed engine contact list '{input}': {reason}")]
    ContactList { input: String, reason: String },
}

#[derive(Debug, Deserialize)]
struct RawContactRow(usize, String, String, String);

/// Reads tab-separated contact rows `frame  atom1  atom2  itype`.
///
/// Rows starting with `#` are comments. Surrounding whitespace in each field
/// is ignored.
pub fn read_contacts(reader: impl Read) -> Result<Vec<Contact>, ContactParseError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .comment(Some(b'#'))
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut contacts = Vec::new();
    for result in csv_reader.records() {
        let record = result.map_err(|e| ContactParseError::Row {
            line: e.position().map_or(0, |p| p.line()),
            source: e,
        })?;
        let line = record.position().map_or(0, |p| p.line());
        let RawContactRow(frame, atom1, atom2, itype) =
            record
                .deserialize(None)
                .map_err(|e| ContactParseError::Row { line, source: e })?;

        let parse_label = |raw: &str| {
            raw.parse::<AtomLabel>()
                .map_err(|e| ContactParseError::Label { line, source: e })
        };
        let interaction: InteractionType = match itype.parse() {
            Ok(itype) => itype,
            Err(never) => match never {},
        };
        contacts.push(Contact::new(
            frame,
            parse_label(&atom1)?,
            parse_label(&atom2)?,
            interaction,
        ));
    }
    Ok(contacts)
}

pub fn read_contacts_from_path(path: &Path) -> Result<Vec<Contact>, ContactParseError> {
    let file = File::open(path).map_err(|e| ContactParseError::Io {
        path: path.to_string_lossy().to_string(),
        source: e,
    })?;
    read_contacts(BufReader::new(file))
}

/// Parses the engine's neighbour-search output into atom index pairs.
///
/// Accepts the two-list form `"{i1 i2 ...} {j1 j2 ...}"` and the bare
/// single-pair form `"i j"`. Empty lists mean no contacts.
pub fn parse_contact_pairs(input: &str) -> Result<Vec<(usize, usize)>, ContactParseError> {
    let invalid = |reason: String| ContactParseError::ContactList {
        input: input.to_string(),
        reason,
    };
    let parse_indices = |list: &str| -> Result<Vec<usize>, ContactParseError> {
        list.split_whitespace()
            .map(|token| {
                token
                    .parse::<usize>()
                    .map_err(|_| invalid(format!("'{}' is not an atom index", token)))
            })
            .collect()
    };

    let trimmed = input.trim();
    if let Some((first, second)) = trimmed.split_once("} {") {
        let first = first.strip_prefix('{').unwrap_or(first);
        let second = second.strip_suffix('}').unwrap_or(second);
        let atoms1 = parse_indices(first)?;
        let atoms2 = parse_indices(second)?;
        if atoms1.is_empty() || atoms2.is_empty() {
            return Ok(Vec::new());
        }
        if atoms1.len() != atoms2.len() {
            return Err(invalid(format!(
                "index lists differ in length ({} vs {})",
                atoms1.len(),
                atoms2.len()
            )));
        }
        return Ok(atoms1.into_iter().zip(atoms2).collect());
    }

    match parse_indices(trimmed)?.as_slice() {
        [] => Ok(Vec::new()),
        [a, b] => Ok(vec![(*a, *b)]),
        other => Err(invalid(format!(
            "expected a single index pair, found {} indices",
            other.len()
        ))),
    }
}
