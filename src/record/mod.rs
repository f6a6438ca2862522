use serde::Deserialize;
use thiserror::Error;

/// Tile background palette indexed by interaction count. Counts past the end
/// clamp to the last entry.
pub const PALETTE: [&str; 8] = [
    "#ffffff", "#e3f2fd", "#bbdefb", "#90caf9", "#64b5f6", "#42a5f5", "#1e88e5", "#1565c0",
];

pub fn color_for_count(count: u32) -> &'static str {
    let idx = (count as usize).min(PALETTE.len() - 1);
    PALETTE[idx]
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("raw record has no id")]
    MissingId,

    #[error("record {id} is missing required field '{field}'")]
    MissingField { id: u64, field: &'static str },
}

/// Wire shape of one feed element. All fields are optional so a malformed
/// element can be rejected with the name of the missing field instead of a
/// deserialization failure for the whole array.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawRecord {
    pub id: Option<u64>,
    pub title: Option<String>,
    pub body: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Record {
    pub id: u64,
    pub title: String,
    pub body: String,
    pub interaction_count: u32,
    pub display_color: &'static str,
}

impl Record {
    pub fn from_raw(raw: RawRecord) -> Result<Self, ValidationError> {
        let id = raw.id.ok_or(ValidationError::MissingId)?;
        let title = raw.title.ok_or(ValidationError::MissingField { id, field: "title" })?;
        let body = raw.body.ok_or(ValidationError::MissingField { id, field: "body" })?;
        Ok(Self {
            id,
            title,
            body,
            interaction_count: 0,
            display_color: PALETTE[0],
        })
    }

    /// Returns a copy with one more interaction recorded and the display
    /// color recomputed. Records are treated as immutable snapshots; the
    /// board swaps the old entry for the returned one.
    #[must_use]
    pub fn with_interaction(&self) -> Self {
        let count = self.interaction_count.saturating_add(1);
        Self {
            interaction_count: count,
            display_color: color_for_count(count),
            ..self.clone()
        }
    }
}
