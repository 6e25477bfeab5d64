//! External collaborator contracts.
//!
//! The export builder never talks to a concrete spreadsheet backend, clock,
//! or credential store. It consumes the narrow traits defined here; callers
//! plug in whatever implementation fronts their actual service. The
//! [`InMemoryDocument`] family is a small concrete implementation for tests
//! and for callers that already know their sheet layout.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use std::collections::BTreeMap;

/// A resolved range rectangle as reported by the document model:
/// one-based, inclusive row/column coordinates plus extents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeRect {
    pub row: u32,
    pub column: u32,
    pub num_rows: u32,
    pub num_cols: u32,
}

/// A single sheet within a document.
pub trait SheetHandle {
    /// Numeric sheet identifier (`gid`). Zero is a valid id.
    fn sheet_id(&self) -> u64;

    /// Display name of the sheet.
    fn name(&self) -> &str;

    /// Resolves an A1-style address into a one-based inclusive rectangle.
    /// The error string describes why the address could not be resolved.
    fn resolve_range(&self, a1_notation: &str) -> Result<RangeRect, String>;
}

/// The document the export is bound to.
pub trait DocumentModel {
    /// Stable identifier of the document, templated into the export URL path.
    fn identifier(&self) -> &str;

    /// Looks up a sheet by its display name.
    fn sheet_by_name(&self, name: &str) -> Option<&dyn SheetHandle>;

    /// All sheets of the document, in document order.
    fn sheets(&self) -> Vec<&dyn SheetHandle>;
}

/// Supplies the bearer token attached to export requests.
pub trait TokenProvider {
    fn token(&self) -> String;
}

/// A fixed token, handy for tests and for callers that manage refresh
/// themselves.
#[derive(Debug, Clone)]
pub struct StaticToken(pub String);

impl TokenProvider for StaticToken {
    fn token(&self) -> String {
        self.0.clone()
    }
}

/// Clock and timezone source consulted when the caller left the timestamp
/// inputs unset.
pub trait Clock {
    /// The current instant.
    fn now(&self) -> DateTime<Utc>;

    /// The process-wide default timezone.
    fn default_timezone(&self) -> Tz;
}

/// Production clock: wall time from the system, default zone from the
/// platform's IANA zone database entry (UTC when that cannot be determined).
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn default_timezone(&self) -> Tz {
        iana_time_zone::get_timezone()
            .ok()
            .and_then(|name| name.parse().ok())
            .unwrap_or(Tz::UTC)
    }
}

/// In-memory sheet: a name, an id, and a table of pre-resolved ranges.
#[derive(Debug, Clone)]
pub struct InMemorySheet {
    name: String,
    id: u64,
    ranges: BTreeMap<String, RangeRect>,
}

impl InMemorySheet {
    pub fn new(name: &str, id: u64) -> Self {
        Self {
            name: name.to_string(),
            id,
            ranges: BTreeMap::new(),
        }
    }

    /// Registers an A1 address and the rectangle it resolves to.
    pub fn with_range(mut self, a1_notation: &str, rect: RangeRect) -> Self {
        self.ranges.insert(a1_notation.to_string(), rect);
        self
    }
}

impl SheetHandle for InMemorySheet {
    fn sheet_id(&self) -> u64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn resolve_range(&self, a1_notation: &str) -> Result<RangeRect, String> {
        self.ranges
            .get(a1_notation)
            .copied()
            .ok_or_else(|| format!("no range '{}' on sheet '{}'", a1_notation, self.name))
    }
}

/// In-memory document model backed by a list of [`InMemorySheet`]s.
#[derive(Debug, Clone)]
pub struct InMemoryDocument {
    id: String,
    sheets: Vec<InMemorySheet>,
}

impl InMemoryDocument {
    pub fn new(identifier: &str) -> Self {
        Self {
            id: identifier.to_string(),
            sheets: Vec::new(),
        }
    }

    pub fn with_sheet(mut self, sheet: InMemorySheet) -> Self {
        self.sheets.push(sheet);
        self
    }
}

impl DocumentModel for InMemoryDocument {
    fn identifier(&self) -> &str {
        &self.id
    }

    fn sheet_by_name(&self, name: &str) -> Option<&dyn SheetHandle> {
        self.sheets
            .iter()
            .find(|sheet| sheet.name == name)
            .map(|sheet| sheet as &dyn SheetHandle)
    }

    fn sheets(&self) -> Vec<&dyn SheetHandle> {
        self.sheets
            .iter()
            .map(|sheet| sheet as &dyn SheetHandle)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_document() -> InMemoryDocument {
        InMemoryDocument::new("doc-1")
            .with_sheet(InMemorySheet::new("Data", 0))
            .with_sheet(InMemorySheet::new("Summary", 42).with_range(
                "B2:F5",
                RangeRect {
                    row: 2,
                    column: 2,
                    num_rows: 4,
                    num_cols: 5,
                },
            ))
    }

    #[test]
    fn sheet_lookup_by_name() {
        let doc = sample_document();
        let sheet = doc.sheet_by_name("Summary").expect("sheet exists");
        assert_eq!(sheet.sheet_id(), 42);
        assert!(doc.sheet_by_name("Missing").is_none());
    }

    #[test]
    fn sheets_preserve_document_order() {
        let doc = sample_document();
        let names: Vec<&str> = doc.sheets().iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["Data", "Summary"]);
    }

    #[test]
    fn range_resolution_hits_registered_rectangles() {
        let doc = sample_document();
        let sheet = doc.sheet_by_name("Summary").unwrap();
        let rect = sheet.resolve_range("B2:F5").expect("registered range");
        assert_eq!(rect.row, 2);
        assert_eq!(rect.num_cols, 5);

        let err = sheet.resolve_range("Z9").unwrap_err();
        assert!(err.contains("Z9"));
    }

    #[test]
    fn static_token_returns_its_value() {
        let provider = StaticToken("secret".to_string());
        assert_eq!(provider.token(), "secret");
    }
}
