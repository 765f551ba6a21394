// Per-user column visibility preference

use serde::{Deserialize, Serialize};

/// The fixed set of report columns a user can toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportColumn {
    Event,
    EventDate,
    OrderId,
    PurchaserName,
    Email,
    Phone,
    Status,
    Tickets,
}

impl ReportColumn {
    pub const ALL: [ReportColumn; 8] = [
        ReportColumn::Event,
        ReportColumn::EventDate,
        ReportColumn::OrderId,
        ReportColumn::PurchaserName,
        ReportColumn::Email,
        ReportColumn::Phone,
        ReportColumn::Status,
        ReportColumn::Tickets,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportColumn::Event => "event",
            ReportColumn::EventDate => "event_date",
            ReportColumn::OrderId => "order_id",
            ReportColumn::PurchaserName => "purchaser_name",
            ReportColumn::Email => "email",
            ReportColumn::Phone => "phone",
            ReportColumn::Status => "status",
            ReportColumn::Tickets => "tickets",
        }
    }

    pub fn parse(value: &str) -> Option<ReportColumn> {
        Self::ALL
            .iter()
            .copied()
            .find(|column| column.as_str() == value)
    }

    /// Parses a raw identifier list, silently dropping anything outside
    /// the enumerated set and collapsing duplicates.
    pub fn parse_list(values: &[String]) -> Vec<ReportColumn> {
        let mut columns = Vec::new();
        for value in values {
            if let Some(column) = Self::parse(value.trim()) {
                if !columns.contains(&column) {
                    columns.push(column);
                }
            }
        }
        columns
    }

    /// Default preference for a user never seen before.
    pub fn default_visible() -> Vec<ReportColumn> {
        Self::ALL.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_list_drops_unrecognized_identifiers() {
        let raw = vec![
            "event".to_string(),
            "tickets".to_string(),
            "bogus_column".to_string(),
        ];
        let columns = ReportColumn::parse_list(&raw);
        assert_eq!(columns, vec![ReportColumn::Event, ReportColumn::Tickets]);
    }

    #[test]
    fn parse_list_collapses_duplicates() {
        let raw = vec!["email".to_string(), "email".to_string()];
        assert_eq!(ReportColumn::parse_list(&raw), vec![ReportColumn::Email]);
    }

    #[test]
    fn default_preference_shows_every_column() {
        assert_eq!(ReportColumn::default_visible().len(), 8);
    }

    #[test]
    fn identifiers_round_trip_through_parse() {
        for column in ReportColumn::ALL {
            assert_eq!(ReportColumn::parse(column.as_str()), Some(column));
        }
    }
}
