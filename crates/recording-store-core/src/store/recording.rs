use crate::store::RecordingId;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};

/// Summary of a stored recording. Carries no audio payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recording {
    /// Identifier and file name.
    pub id: RecordingId,
    /// Display label, currently always equal to `id`.
    pub name: String,
    /// Creation time of the backing file.
    #[serde(serialize_with = "serialize_timestamp")]
    pub created_at: DateTime<Utc>,
}

impl Recording {
    /// Summary whose display name mirrors the identifier.
    pub fn new(id: RecordingId, created_at: DateTime<Utc>) -> Self {
        let name = id.to_string();
        Self {
            id,
            name,
            created_at,
        }
    }
}

fn serialize_timestamp<S: Serializer>(ts: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Micros, true))
}
