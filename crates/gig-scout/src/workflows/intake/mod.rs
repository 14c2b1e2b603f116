//! Turns raw marketplace payloads and CSV exports into canonical [`Gig`] records.

mod mapping;
mod normalizer;
mod parser;

use crate::workflows::matching::{Gig, SkipReason};
use serde_json::Value;
use std::io::Read;
use std::path::Path;
use tracing::warn;

#[derive(Debug)]
pub enum GigImportError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl std::fmt::Display for GigImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GigImportError::Io(err) => write!(f, "failed to read gig export: {}", err),
            GigImportError::Csv(err) => write!(f, "invalid gig CSV data: {}", err),
        }
    }
}

impl std::error::Error for GigImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GigImportError::Io(err) => Some(err),
            GigImportError::Csv(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for GigImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for GigImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Lenient normalization: anything missing or malformed falls back to a default.
///
/// A non-object input yields an empty gig with no id, which scoring later rejects.
pub fn normalize(raw: &Value, platform: &str) -> Gig {
    mapping::map_record(raw, platform)
}

/// Strict normalization used for batch ranking, where a bad record is reported and skipped.
pub fn try_normalize(raw: &Value, platform: &str) -> Result<Gig, SkipReason> {
    if !raw.is_object() {
        return Err(SkipReason::NotAnObject);
    }

    match raw.get("skills_required") {
        None | Some(Value::Null) | Some(Value::Array(_)) => {}
        Some(_) => {
            return Err(SkipReason::InvalidField {
                field: "skills_required",
                expected: "a list of skills",
            })
        }
    }

    Ok(mapping::map_record(raw, platform))
}

pub struct GigImporter;

impl GigImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Gig>, GigImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Rows take their platform from the `platform` column. Undecodable rows are dropped.
    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<Gig>, GigImportError> {
        let mut gigs = Vec::new();
        for (row, candidate) in Self::candidates_from_reader(reader)?.into_iter().enumerate() {
            match candidate {
                Ok(gig) => gigs.push(gig),
                Err(reason) => warn!(row, %reason, "dropping gig CSV row"),
            }
        }
        Ok(gigs)
    }

    /// One candidate per data row, in file order, ready for batch ranking.
    pub fn candidates_from_reader<R: Read>(
        reader: R,
    ) -> Result<Vec<Result<Gig, SkipReason>>, GigImportError> {
        let candidates = parser::parse_records(reader)?
            .into_iter()
            .map(|record| record.map(|record| mapping::map_record(&record, "")))
            .collect();
        Ok(candidates)
    }
}
