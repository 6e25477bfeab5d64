use crate::errors::{ExportError, ExportResult};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use std::str::FromStr;

/// Output format the service can render a document into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Pdf,
    Csv,
    Xls,
    Xlsx,
    Tsv,
    Ods,
    Zip,
}

/// All format tokens accepted by [`ExportFormat::from_str`], in `format=` order.
pub const FORMAT_TOKENS: [&str; 7] = ["pdf", "csv", "xls", "xlsx", "tsv", "ods", "zip"];

impl ExportFormat {
    /// Returns the token used as the `format` query parameter value.
    pub fn as_param(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Csv => "csv",
            Self::Xls => "xls",
            Self::Xlsx => "xlsx",
            Self::Tsv => "tsv",
            Self::Ods => "ods",
            Self::Zip => "zip",
        }
    }

    /// Returns the file extension for artifacts produced in this format.
    /// Identical to the parameter token for every supported format.
    pub fn extension(&self) -> &'static str {
        self.as_param()
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(raw: &str) -> ExportResult<Self> {
        match raw {
            "pdf" => Ok(Self::Pdf),
            "csv" => Ok(Self::Csv),
            "xls" => Ok(Self::Xls),
            "xlsx" => Ok(Self::Xlsx),
            "tsv" => Ok(Self::Tsv),
            "ods" => Ok(Self::Ods),
            "zip" => Ok(Self::Zip),
            other => Err(ExportError::Validation {
                field: "format",
                message: format!("'{}' is not one of: {}", other, FORMAT_TOKENS.join(", ")),
            }),
        }
    }
}

/// Physical page size for paginated formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSize {
    Letter,
    Tabloid,
    Legal,
    Statement,
    Executive,
    Folio,
    A3,
    A4,
    A5,
    B4,
    B5,
}

/// All page size tokens accepted by [`PageSize::from_str`].
pub const PAGE_SIZE_TOKENS: [&str; 11] = [
    "letter",
    "tabloid",
    "legal",
    "statement",
    "executive",
    "folio",
    "a3",
    "a4",
    "a5",
    "b4",
    "b5",
];

impl PageSize {
    /// Returns the token used as the `size` query parameter value.
    pub fn as_param(&self) -> &'static str {
        match self {
            Self::Letter => "letter",
            Self::Tabloid => "tabloid",
            Self::Legal => "legal",
            Self::Statement => "statement",
            Self::Executive => "executive",
            Self::Folio => "folio",
            Self::A3 => "a3",
            Self::A4 => "a4",
            Self::A5 => "a5",
            Self::B4 => "b4",
            Self::B5 => "b5",
        }
    }
}

impl FromStr for PageSize {
    type Err = ExportError;

    fn from_str(raw: &str) -> ExportResult<Self> {
        match raw {
            "letter" => Ok(Self::Letter),
            "tabloid" => Ok(Self::Tabloid),
            "legal" => Ok(Self::Legal),
            "statement" => Ok(Self::Statement),
            "executive" => Ok(Self::Executive),
            "folio" => Ok(Self::Folio),
            "a3" => Ok(Self::A3),
            "a4" => Ok(Self::A4),
            "a5" => Ok(Self::A5),
            "b4" => Ok(Self::B4),
            "b5" => Ok(Self::B5),
            other => Err(ExportError::Validation {
                field: "size",
                message: format!("'{}' is not one of: {}", other, PAGE_SIZE_TOKENS.join(", ")),
            }),
        }
    }
}

/// Scaling mode for paginated formats. Serializes to the integers 1 through 4.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scale {
    Normal,
    FitWidth,
    FitHeight,
    FitPage,
}

const SCALE_LEGAL_VALUES: &str =
    "1 (normal), 2 (fit_width / fitw), 3 (fit_height / fith), 4 (fit_page / fitp)";

impl Scale {
    /// Returns the integer token used as the `scale` query parameter value.
    pub fn as_param(&self) -> &'static str {
        match self {
            Self::Normal => "1",
            Self::FitWidth => "2",
            Self::FitHeight => "3",
            Self::FitPage => "4",
        }
    }
}

impl TryFrom<u8> for Scale {
    type Error = ExportError;

    fn try_from(value: u8) -> ExportResult<Self> {
        match value {
            1 => Ok(Self::Normal),
            2 => Ok(Self::FitWidth),
            3 => Ok(Self::FitHeight),
            4 => Ok(Self::FitPage),
            other => Err(ExportError::Validation {
                field: "scale",
                message: format!("'{other}' is not one of: {SCALE_LEGAL_VALUES}"),
            }),
        }
    }
}

impl FromStr for Scale {
    type Err = ExportError;

    /// Accepts the raw integers 1-4 or a named alias. Aliases are translated
    /// before the integer-domain check; anything else, including non-integer
    /// numerics such as "2.0", is rejected.
    fn from_str(raw: &str) -> ExportResult<Self> {
        match raw {
            "1" | "normal" => Ok(Self::Normal),
            "2" | "fit_width" | "fitw" => Ok(Self::FitWidth),
            "3" | "fit_height" | "fith" => Ok(Self::FitHeight),
            "4" | "fit_page" | "fitp" => Ok(Self::FitPage),
            other => Err(ExportError::Validation {
                field: "scale",
                message: format!("'{other}' is not one of: {SCALE_LEGAL_VALUES}"),
            }),
        }
    }
}

/// The accumulating set of export parameters. Pure storage: every field is
/// optional so that "absent" and "false" stay distinguishable, and partial
/// field groups remain representable for the build-time validator to catch.
///
/// Owned exclusively by one [`ExportBuilder`](crate::builder::ExportBuilder)
/// for its lifetime; all mutation goes through the builder's setters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportConfig {
    pub format: Option<ExportFormat>,
    pub portrait: Option<bool>,
    pub size: Option<PageSize>,
    pub scale: Option<Scale>,
    /// Target sheet identifier (`gid`). Zero is a legitimate id, so presence
    /// is encoded by the `Option`, never by the value.
    pub sheet_id: Option<u64>,
    /// Zero-based half-open row/column bounds. Held as four independent
    /// options so the cross-field validator can observe partial groups.
    pub r1: Option<u32>,
    pub r2: Option<u32>,
    pub c1: Option<u32>,
    pub c2: Option<u32>,
    pub print_notes: Option<bool>,
    pub show_title: Option<bool>,
    pub show_gridlines: Option<bool>,
    pub repeat_frozen_rows: Option<bool>,
    pub repeat_frozen_cols: Option<bool>,
    /// Presence semantics: `true` emits the fixed `pagenum` literal, `false`
    /// emits nothing at all.
    pub page_numbers: bool,
    pub left_margin: Option<f64>,
    pub right_margin: Option<f64>,
    pub top_margin: Option<f64>,
    pub bottom_margin: Option<f64>,
    pub print_date: Option<bool>,
    pub print_time: Option<bool>,
    /// Deferred timestamp inputs, resolved into the `timestamp` parameter
    /// only at build time.
    pub timestamp_date: Option<DateTime<Utc>>,
    pub timezone: Option<Tz>,
    pub file_name: Option<String>,
}

/// Base name used for the artifact when no file name was configured.
pub const DEFAULT_FILE_NAME: &str = "export";

impl ExportConfig {
    /// Returns true when a footer timestamp has to be resolved (either the
    /// date or the time footer is switched on).
    pub(crate) fn wants_timestamp(&self) -> bool {
        self.print_date == Some(true) || self.print_time == Some(true)
    }
}
