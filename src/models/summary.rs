use chrono::{DateTime, Utc};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};

/// What kind of object a summary describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectType {
    Publication,
    Section,
    Item,
    Chunk,
}

impl ObjectType {
    pub const ALL: [ObjectType; 4] = [
        ObjectType::Publication,
        ObjectType::Section,
        ObjectType::Item,
        ObjectType::Chunk,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Publication => "publication",
            Self::Section => "section",
            Self::Item => "item",
            Self::Chunk => "chunk",
        }
    }
}

impl std::fmt::Display for ObjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ObjectType {
    type Err = String;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "publication" => Ok(Self::Publication),
            "section" => Ok(Self::Section),
            "item" => Ok(Self::Item),
            "chunk" => Ok(Self::Chunk),
            _ => Err(format!("Invalid object type: {}", s)),
        }
    }
}

impl ToSql for ObjectType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for ObjectType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|e: String| FromSqlError::Other(e.into()))
    }
}

/// A full row of the `summaries` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub id: i64,
    pub object_type: ObjectType,
    pub object_id: i64,
    pub model: String,
    pub model_version: String,
    pub lang: String,
    pub summary_text: String,
    pub confidence: f64,
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Listing projection; leaves out `summary_text` to keep listings small.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryListing {
    pub id: i64,
    pub object_type: ObjectType,
    pub object_id: i64,
    pub model: String,
    pub lang: String,
    pub confidence: f64,
}

impl std::fmt::Display for SummaryListing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({}, {}, {}, {}, {}, {:.2})",
            self.id, self.object_type, self.object_id, self.model, self.lang, self.confidence
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewSummary {
    pub object_type: ObjectType,
    pub object_id: i64,
    pub model: String,
    pub model_version: String,
    pub lang: String,
    pub summary_text: String,
    pub confidence: f64,
    pub created_by: Option<String>,
}

/// Fields an update may touch. `model_version` is left alone when `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryUpdate {
    pub summary_text: String,
    pub confidence: f64,
    pub model_version: Option<String>,
}

/// Result of an update or delete that reached the database without error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    Applied,
    NotFound,
}

impl MutationOutcome {
    pub fn from_rows_affected(rows: usize) -> Self {
        if rows > 0 {
            Self::Applied
        } else {
            Self::NotFound
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_type_parses_case_insensitively() {
        assert_eq!("Section".parse::<ObjectType>(), Ok(ObjectType::Section));
        assert!("paragraph".parse::<ObjectType>().is_err());
        for kind in ObjectType::ALL {
            assert_eq!(kind.to_string().parse::<ObjectType>(), Ok(kind));
        }
    }

    #[test]
    fn rows_affected_maps_to_outcome() {
        assert_eq!(MutationOutcome::from_rows_affected(0), MutationOutcome::NotFound);
        assert_eq!(MutationOutcome::from_rows_affected(1), MutationOutcome::Applied);
    }
}
