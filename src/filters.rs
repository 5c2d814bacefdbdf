//! Search Filters
//!
//! Local state of the search/filter panel and its validation into the
//! normalized filter object sent to `GET /files/search/`.
//!
//! Field values are kept as the raw text the user typed so that partially
//! entered input survives re-rendering; [`FilterForm::validate`] turns them
//! into a [`SearchFilters`] or explains why it cannot.

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

/// File types offered by the type multi-select: `(mime, label)`
pub const FILE_TYPE_OPTIONS: [(&str, &str); 10] = [
    ("application/pdf", "PDF"),
    ("image/jpeg", "JPEG image"),
    ("image/png", "PNG image"),
    ("image/gif", "GIF image"),
    ("text/plain", "Plain text"),
    ("text/csv", "CSV"),
    ("application/json", "JSON"),
    ("application/zip", "ZIP archive"),
    ("video/mp4", "MP4 video"),
    ("audio/mpeg", "MP3 audio"),
];

/// Bytes per kilobyte for the size inputs
pub const KB: u64 = 1024;

/// Why the current field state cannot be emitted
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    #[error("{field} must be a non-negative number")]
    InvalidSize { field: &'static str },

    #[error("Minimum size cannot be greater than maximum size")]
    SizeRange,

    #[error("{field} is not a valid date (expected YYYY-MM-DD)")]
    InvalidDate { field: &'static str },

    #[error("Start date cannot be after end date")]
    DateRange,
}

/// A single clearable group of fields
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterField {
    Search,
    FileTypes,
    Size,
    Dates,
}

/// Raw field state of the filter panel
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilterForm {
    pub search: String,
    pub file_types: Vec<String>,
    /// Minimum size in KB, as typed
    pub min_size_kb: String,
    /// Maximum size in KB, as typed
    pub max_size_kb: String,
    /// `YYYY-MM-DD`, as produced by a date input
    pub start_date: String,
    pub end_date: String,
}

impl FilterForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_search(&mut self, value: impl Into<String>) {
        self.search = value.into();
    }

    pub fn set_min_size_kb(&mut self, value: impl Into<String>) {
        self.min_size_kb = value.into();
    }

    pub fn set_max_size_kb(&mut self, value: impl Into<String>) {
        self.max_size_kb = value.into();
    }

    pub fn set_start_date(&mut self, value: impl Into<String>) {
        self.start_date = value.into();
    }

    pub fn set_end_date(&mut self, value: impl Into<String>) {
        self.end_date = value.into();
    }

    /// Add the type if absent, remove it if present
    pub fn toggle_file_type(&mut self, mime: &str) {
        if let Some(pos) = self.file_types.iter().position(|t| t == mime) {
            self.file_types.remove(pos);
        } else {
            self.file_types.push(mime.to_string());
        }
    }

    pub fn has_file_type(&self, mime: &str) -> bool {
        self.file_types.iter().any(|t| t == mime)
    }

    pub fn clear(&mut self, field: FilterField) {
        match field {
            FilterField::Search => self.search.clear(),
            FilterField::FileTypes => self.file_types.clear(),
            FilterField::Size => {
                self.min_size_kb.clear();
                self.max_size_kb.clear();
            }
            FilterField::Dates => {
                self.start_date.clear();
                self.end_date.clear();
            }
        }
    }

    pub fn clear_all(&mut self) {
        *self = Self::default();
    }

    /// Number of field groups currently holding a value
    pub fn active_count(&self) -> usize {
        [
            !self.search.trim().is_empty(),
            !self.file_types.is_empty(),
            !self.min_size_kb.trim().is_empty() || !self.max_size_kb.trim().is_empty(),
            !self.start_date.trim().is_empty() || !self.end_date.trim().is_empty(),
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }

    /// Validate and normalize the field state.
    pub fn validate(&self) -> Result<SearchFilters, FilterError> {
        let min_size = parse_size_kb(&self.min_size_kb, "Minimum size")?;
        let max_size = parse_size_kb(&self.max_size_kb, "Maximum size")?;
        if let (Some(min), Some(max)) = (min_size, max_size) {
            if min > max {
                return Err(FilterError::SizeRange);
            }
        }

        let start_date = parse_date(&self.start_date, "Start date")?;
        let end_date = parse_date(&self.end_date, "End date")?;
        if let (Some(start), Some(end)) = (start_date, end_date) {
            if start > end {
                return Err(FilterError::DateRange);
            }
        }

        let search = self.search.trim();

        Ok(SearchFilters {
            search: (!search.is_empty()).then(|| search.to_string()),
            file_types: self.file_types.clone(),
            min_size,
            max_size,
            start_date,
            end_date,
        })
    }
}

fn parse_size_kb(raw: &str, field: &'static str) -> Result<Option<u64>, FilterError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    let kb: f64 = raw
        .parse()
        .map_err(|_| FilterError::InvalidSize { field })?;
    if !kb.is_finite() || kb < 0.0 {
        return Err(FilterError::InvalidSize { field });
    }
    Ok(Some((kb * KB as f64).round() as u64))
}

fn parse_date(raw: &str, field: &'static str) -> Result<Option<NaiveDate>, FilterError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| FilterError::InvalidDate { field })
}

/// Normalized filter object emitted by the panel
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub struct SearchFilters {
    pub search: Option<String>,
    pub file_types: Vec<String>,
    /// Bytes, inclusive
    pub min_size: Option<u64>,
    /// Bytes, inclusive
    pub max_size: Option<u64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl SearchFilters {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Query parameters for the search endpoint; empty values are omitted
    /// and page 1 is implied.
    pub fn query_pairs(&self, page: u32) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();

        if let Some(search) = &self.search {
            pairs.push(("search", search.clone()));
        }
        if !self.file_types.is_empty() {
            pairs.push(("file_types", self.file_types.join(",")));
        }
        if let Some(min) = self.min_size {
            pairs.push(("min_size", min.to_string()));
        }
        if let Some(max) = self.max_size {
            pairs.push(("max_size", max.to_string()));
        }
        if let Some(start) = self.start_date {
            pairs.push(("start_date", format!("{}T00:00:00Z", start.format("%Y-%m-%d"))));
        }
        if let Some(end) = self.end_date {
            pairs.push(("end_date", format!("{}T23:59:59Z", end.format("%Y-%m-%d"))));
        }
        if page > 1 {
            pairs.push(("page", page.to_string()));
        }

        pairs
    }

    /// Encoded query string including the leading `?`, or empty
    pub fn query_string(&self, page: u32) -> String {
        let pairs = self.query_pairs(page);
        if pairs.is_empty() {
            return String::new();
        }
        let encoded: Vec<String> = pairs
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect();
        format!("?{}", encoded.join("&"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_greater_than_max_blocks() {
        let mut form = FilterForm::new();
        form.set_min_size_kb("500");
        form.set_max_size_kb("100");
        assert_eq!(form.validate(), Err(FilterError::SizeRange));

        form.set_min_size_kb("100");
        form.set_max_size_kb("500");
        let filters = form.validate().unwrap();
        assert_eq!(filters.min_size, Some(102400));
        assert_eq!(filters.max_size, Some(512000));
    }

    #[test]
    fn test_invalid_numbers() {
        let mut form = FilterForm::new();
        form.set_min_size_kb("abc");
        assert_eq!(
            form.validate(),
            Err(FilterError::InvalidSize { field: "Minimum size" })
        );

        form.set_min_size_kb("-1");
        assert!(form.validate().is_err());

        form.set_min_size_kb("0.5");
        assert_eq!(form.validate().unwrap().min_size, Some(512));
    }

    #[test]
    fn test_date_validation() {
        let mut form = FilterForm::new();
        form.set_start_date("2025-13-01");
        assert_eq!(
            form.validate(),
            Err(FilterError::InvalidDate { field: "Start date" })
        );

        form.set_start_date("2025-11-10");
        form.set_end_date("2025-11-01");
        assert_eq!(form.validate(), Err(FilterError::DateRange));

        form.set_end_date("2025-11-10");
        let filters = form.validate().unwrap();
        assert_eq!(filters.start_date, filters.end_date);
    }

    #[test]
    fn test_search_is_trimmed() {
        let mut form = FilterForm::new();
        form.set_search("   ");
        assert!(form.validate().unwrap().is_empty());

        form.set_search("  report ");
        assert_eq!(form.validate().unwrap().search.as_deref(), Some("report"));
    }

    #[test]
    fn test_clearing() {
        let mut form = FilterForm::new();
        form.set_search("invoice");
        form.toggle_file_type("application/pdf");
        form.set_min_size_kb("10");
        form.set_end_date("2025-01-01");
        assert_eq!(form.active_count(), 4);

        form.clear(FilterField::Size);
        assert_eq!(form.active_count(), 3);
        assert!(form.min_size_kb.is_empty());

        form.toggle_file_type("application/pdf");
        assert!(!form.has_file_type("application/pdf"));

        form.clear_all();
        assert_eq!(form, FilterForm::default());
    }

    #[test]
    fn test_query_string() {
        let mut form = FilterForm::new();
        form.set_search("q3 report");
        form.toggle_file_type("application/pdf");
        form.toggle_file_type("image/png");
        form.set_max_size_kb("1");
        form.set_start_date("2025-11-01");
        let filters = form.validate().unwrap();

        assert_eq!(
            filters.query_string(2),
            "?search=q3%20report&file_types=application%2Fpdf%2Cimage%2Fpng\
             &max_size=1024&start_date=2025-11-01T00%3A00%3A00Z&page=2"
        );
        assert_eq!(SearchFilters::default().query_string(1), "");
    }
}
