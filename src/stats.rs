//! Storage statistics summary cards.

use std::time::Duration;

use crate::format::{format_bytes, format_percent};
use crate::model::StorageStats;

/// How often the statistics panel refreshes
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// One summary card
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatCard {
    pub label: &'static str,
    pub value: String,
    pub hint: Option<String>,
}

/// Display-ready view of [`StorageStats`]
#[derive(Clone, Debug, PartialEq)]
pub struct StatsSummary {
    pub total_files: u64,
    pub unique_files: u64,
    pub duplicate_references: u64,
    pub storage_saved: String,
    pub dedup_ratio: String,
}

impl From<&StorageStats> for StatsSummary {
    fn from(stats: &StorageStats) -> Self {
        // Older backends omit the readable string
        let storage_saved = if stats.storage_saved_readable.trim().is_empty() {
            format_bytes(stats.storage_saved_bytes)
        } else {
            stats.storage_saved_readable.clone()
        };

        Self {
            total_files: stats.total_files,
            unique_files: stats.unique_files,
            duplicate_references: stats.duplicate_references,
            storage_saved,
            dedup_ratio: format_percent(stats.duplicate_references, stats.total_files),
        }
    }
}

impl StatsSummary {
    pub fn cards(&self) -> Vec<StatCard> {
        vec![
            StatCard {
                label: "Total Files",
                value: self.total_files.to_string(),
                hint: None,
            },
            StatCard {
                label: "Unique Files",
                value: self.unique_files.to_string(),
                hint: None,
            },
            StatCard {
                label: "Duplicates",
                value: self.duplicate_references.to_string(),
                hint: Some(format!("{} of all uploads", self.dedup_ratio)),
            },
            StatCard {
                label: "Storage Saved",
                value: self.storage_saved.clone(),
                hint: None,
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_cards() {
        let stats = StorageStats {
            total_files: 8,
            unique_files: 6,
            duplicate_references: 2,
            storage_saved_bytes: 3 * 1024 * 1024,
            storage_saved_readable: "3.00 MB".to_string(),
        };
        let cards = StatsSummary::from(&stats).cards();

        assert_eq!(cards.len(), 4);
        assert_eq!(cards[0].value, "8");
        assert_eq!(cards[2].hint.as_deref(), Some("25.0% of all uploads"));
        assert_eq!(cards[3].value, "3.00 MB");
    }

    #[test]
    fn test_readable_fallback() {
        let stats = StorageStats {
            storage_saved_bytes: 1024,
            ..Default::default()
        };
        let summary = StatsSummary::from(&stats);
        assert_eq!(summary.storage_saved, "1.00 KB");
        assert_eq!(summary.dedup_ratio, "0.0%");
    }
}
