//! Row records displayed by the table.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Identifier of a row. Unique within a store for the row's lifetime.
pub type RowId = u64;

/// Status of the simulated enrichment lookup for a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnrichmentStatus {
    /// Lookup still in flight.
    Loading,
    /// Lookup finished with a result.
    Complete,
    /// Lookup failed.
    Error,
}

impl EnrichmentStatus {
    /// Whether the status can no longer change.
    ///
    /// `Loading` may move to `Complete` or `Error`; both of those are final.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, EnrichmentStatus::Loading)
    }

    /// Get the display label for this status.
    pub fn label(&self) -> &'static str {
        match self {
            EnrichmentStatus::Loading => "Loading",
            EnrichmentStatus::Complete => "Complete",
            EnrichmentStatus::Error => "Error",
        }
    }
}

/// Decorative enrichment sub-record of a row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enrichment {
    /// Company name.
    pub name: String,
    /// Lookup status.
    pub status: EnrichmentStatus,
    /// Optional company description, shown in the enrichment card.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Enrichment {
    /// Create a new enrichment record.
    pub fn new(
        name: impl Into<String>,
        status: EnrichmentStatus,
        description: Option<&str>,
    ) -> Self {
        Self {
            name: name.into(),
            status,
            description: description.map(str::to_string),
        }
    }
}

/// One table record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    /// Row identifier.
    pub id: RowId,
    /// Creation time, formatted for display. Never mutated.
    pub timestamp: String,
    /// Free-text input column.
    pub input_column: String,
    /// Free-text action column.
    pub action_column: String,
    /// Enrichment badge data.
    pub enrichment: Enrichment,
}

impl Row {
    /// Create a new row.
    pub fn new(
        id: RowId,
        timestamp: impl Into<String>,
        input_column: impl Into<String>,
        action_column: impl Into<String>,
        enrichment: Enrichment,
    ) -> Self {
        Self {
            id,
            timestamp: timestamp.into(),
            input_column: input_column.into(),
            action_column: action_column.into(),
            enrichment,
        }
    }

    /// Create the template row used by the "add row" action.
    pub fn new_entry(id: RowId, timestamp: impl Into<String>) -> Self {
        Self::new(
            id,
            timestamp,
            "New Entry",
            "Pending Action",
            Enrichment::new(
                "Pending",
                EnrichmentStatus::Loading,
                Some("New company entry"),
            ),
        )
    }

    /// Clone this row's fields under a different id.
    pub fn with_id(&self, id: RowId) -> Self {
        Self {
            id,
            ..self.clone()
        }
    }

    /// Whether the input column holds a link.
    pub fn is_link(&self) -> bool {
        self.input_column.starts_with("http")
    }

    /// Whether the input column is still a loading placeholder.
    pub fn is_placeholder(&self) -> bool {
        self.input_column.contains("Loading")
    }
}

/// Format a timestamp the way the table displays creation times.
pub fn format_timestamp(time: DateTime<Local>) -> String {
    time.format("%b %d, %Y at %H:%M %p").to_string()
}

/// Creation timestamp for a row created now.
pub fn now_timestamp() -> String {
    format_timestamp(Local::now())
}

/// The demo rows the table starts with.
pub fn fixture_rows() -> Vec<Row> {
    const TIMESTAMP: &str = "Oct 12, 2024 at 14:08 PM";

    vec![
        Row::new(
            1,
            TIMESTAMP,
            "Bitscale Evaluation - Account relevancy",
            "Bitscale Evaluation - Account relevancy",
            Enrichment::new(
                "Bitscale",
                EnrichmentStatus::Complete,
                Some("Tech company specializing in blockchain solutions"),
            ),
        ),
        Row::new(
            2,
            TIMESTAMP,
            "cell data size exceeds limit",
            "BMW Evaluation - Relevancy check",
            Enrichment::new(
                "BMW",
                EnrichmentStatus::Error,
                Some("Luxury automobile manufacturer"),
            ),
        ),
        Row::new(
            3,
            TIMESTAMP,
            "https://www.linkedin.com/bai5...",
            "Google Evaluation - Lifespan",
            Enrichment::new(
                "Google",
                EnrichmentStatus::Complete,
                Some("Global technology company"),
            ),
        ),
        Row::new(
            4,
            TIMESTAMP,
            "Loading data, Please wait",
            "Apple Evaluation - Olvancy check",
            Enrichment::new(
                "Apple",
                EnrichmentStatus::Loading,
                Some("Consumer electronics company"),
            ),
        ),
        Row::new(
            5,
            TIMESTAMP,
            "Loading data, Please wait",
            "Figma Evaluation - Evancy check",
            Enrichment::new(
                "Figma",
                EnrichmentStatus::Loading,
                Some("Design platform for teams"),
            ),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::collections::HashSet;

    #[test]
    fn test_status_terminal() {
        assert!(!EnrichmentStatus::Loading.is_terminal());
        assert!(EnrichmentStatus::Complete.is_terminal());
        assert!(EnrichmentStatus::Error.is_terminal());
    }

    #[test]
    fn test_new_entry_template() {
        let row = Row::new_entry(42, "now");
        assert_eq!(row.id, 42);
        assert_eq!(row.input_column, "New Entry");
        assert_eq!(row.action_column, "Pending Action");
        assert_eq!(row.enrichment.name, "Pending");
        assert_eq!(row.enrichment.status, EnrichmentStatus::Loading);
        assert_eq!(
            row.enrichment.description.as_deref(),
            Some("New company entry")
        );
    }

    #[test]
    fn test_with_id_keeps_fields() {
        let row = fixture_rows().remove(1);
        let copy = row.with_id(99);
        assert_eq!(copy.id, 99);
        assert_eq!(copy.timestamp, row.timestamp);
        assert_eq!(copy.input_column, row.input_column);
        assert_eq!(copy.action_column, row.action_column);
        assert_eq!(copy.enrichment, row.enrichment);
    }

    #[test]
    fn test_link_and_placeholder_detection() {
        let rows = fixture_rows();
        assert!(rows[2].is_link());
        assert!(!rows[0].is_link());
        assert!(rows[3].is_placeholder());
        assert!(!rows[1].is_placeholder());
    }

    #[test]
    fn test_fixture_ids_unique() {
        let rows = fixture_rows();
        let ids: HashSet<RowId> = rows.iter().map(|r| r.id).collect();
        assert_eq!(ids.len(), rows.len());
    }

    #[test]
    fn test_format_timestamp() {
        let time = Local.with_ymd_and_hms(2024, 10, 12, 14, 8, 0).unwrap();
        assert_eq!(format_timestamp(time), "Oct 12, 2024 at 14:08 PM");
    }

    #[test]
    fn test_row_serialization_skips_missing_description() {
        let mut row = Row::new_entry(7, "t");
        row.enrichment.description = None;
        let json = serde_json::to_string(&row).unwrap();
        assert!(json.contains("\"status\":\"loading\""));
        assert!(!json.contains("description"));
    }
}
