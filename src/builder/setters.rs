use crate::document::{Clock, DocumentModel, SystemClock};
use crate::errors::{ExportError, ExportResult};
use crate::model::{ExportConfig, ExportFormat, PageSize, Scale};
use chrono::{DateTime, Utc};
use tracing::debug;
use url::Url;

/// Builds one validated export request against one target document.
///
/// Setters validate immediately and leave the accumulated configuration
/// untouched on failure, so a caller can correct the offending value and
/// resume chaining. Fallible setters return `ExportResult<&mut Self>` for
/// use with `?`; setters that cannot fail return `&mut Self` directly.
///
/// A builder is bound to a single document for its whole lifetime and is
/// not meant to be shared: callers needing parallel exports create one
/// builder per export.
pub struct ExportBuilder<'a> {
    pub(crate) document: &'a dyn DocumentModel,
    /// Overrides the production service root; used to point tests at a
    /// local mock server.
    pub(crate) service_root: Option<String>,
    pub(crate) clock: Box<dyn Clock>,
    pub(crate) config: ExportConfig,
}

impl std::fmt::Debug for ExportBuilder<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExportBuilder")
            .field("service_root", &self.service_root)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<'a> ExportBuilder<'a> {
    /// Creates a builder bound to `document`, with an empty parameter set,
    /// the system clock, and the production service endpoint.
    pub fn new(document: &'a dyn DocumentModel) -> Self {
        Self {
            document,
            service_root: None,
            clock: Box::new(SystemClock),
            config: ExportConfig::default(),
        }
    }

    /// Replaces the clock consulted for the default timestamp instant and
    /// the default timezone.
    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Read access to the accumulated parameter set.
    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Points the builder at a different service root, e.g. a test server.
    /// The root must be an absolute URL.
    pub fn set_service_root(&mut self, root: &str) -> ExportResult<&mut Self> {
        Url::parse(root).map_err(|e| ExportError::Validation {
            field: "service root",
            message: format!("'{root}' is not an absolute URL: {e}"),
        })?;
        self.service_root = Some(root.trim_end_matches('/').to_string());
        Ok(self)
    }

    /// Sets the output format. Accepts exactly the tokens listed in
    /// [`FORMAT_TOKENS`](crate::model::FORMAT_TOKENS).
    pub fn set_format(&mut self, raw: &str) -> ExportResult<&mut Self> {
        self.config.format = Some(raw.parse::<ExportFormat>()?);
        Ok(self)
    }

    /// Portrait (`true`) or landscape (`false`) page orientation.
    pub fn set_portrait(&mut self, portrait: bool) -> &mut Self {
        self.config.portrait = Some(portrait);
        self
    }

    /// Sets the physical page size. Accepts exactly the tokens listed in
    /// [`PAGE_SIZE_TOKENS`](crate::model::PAGE_SIZE_TOKENS).
    pub fn set_paper_size(&mut self, raw: &str) -> ExportResult<&mut Self> {
        self.config.size = Some(raw.parse::<PageSize>()?);
        Ok(self)
    }

    /// Sets the scaling mode from a raw string: the integers "1" through
    /// "4" or one of the named aliases (`normal`, `fit_width`/`fitw`,
    /// `fit_height`/`fith`, `fit_page`/`fitp`).
    pub fn set_scale(&mut self, raw: &str) -> ExportResult<&mut Self> {
        self.config.scale = Some(raw.parse::<Scale>()?);
        Ok(self)
    }

    /// Sets the scaling mode from the raw integer 1-4.
    pub fn set_scale_factor(&mut self, factor: u8) -> ExportResult<&mut Self> {
        self.config.scale = Some(Scale::try_from(factor)?);
        Ok(self)
    }

    /// Targets a sheet by its numeric identifier. Zero is a valid id.
    pub fn set_sheet_id(&mut self, gid: u64) -> &mut Self {
        self.config.sheet_id = Some(gid);
        self
    }

    /// Targets a sheet by display name, storing its numeric identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::NotFound`] listing the document's sheet names
    /// when no sheet carries the given name.
    pub fn set_sheet_name(&mut self, name: &str) -> ExportResult<&mut Self> {
        match self.document.sheet_by_name(name) {
            Some(sheet) => {
                debug!(sheet = name, gid = sheet.sheet_id(), "resolved sheet by name");
                self.config.sheet_id = Some(sheet.sheet_id());
                Ok(self)
            }
            None => {
                let available: Vec<&str> =
                    self.document.sheets().iter().map(|s| s.name()).collect();
                Err(ExportError::NotFound(format!(
                    "sheet '{}' (available sheets: {})",
                    name,
                    available.join(", ")
                )))
            }
        }
    }

    /// Restricts the export to an A1-style range on the configured sheet.
    ///
    /// The one-based inclusive rectangle reported by the document model is
    /// translated into the zero-based half-open bounds the service expects:
    /// `r1 = row-1`, `r2 = row-1+num_rows`, `c1 = col-1`,
    /// `c2 = col-1+num_cols`.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Configuration`] when no sheet id has been set
    /// yet, and [`ExportError::InvalidRange`] when the address cannot be
    /// resolved on that sheet.
    pub fn set_range(&mut self, a1_notation: &str) -> ExportResult<&mut Self> {
        let gid = self.config.sheet_id.ok_or_else(|| {
            ExportError::Configuration(
                "a sheet id must be configured before setting an export range".to_string(),
            )
        })?;

        let sheets = self.document.sheets();
        let sheet = sheets
            .iter()
            .find(|s| s.sheet_id() == gid)
            .ok_or_else(|| ExportError::InvalidRange {
                notation: a1_notation.to_string(),
                message: format!("document has no sheet with id {gid}"),
            })?;

        let rect = sheet
            .resolve_range(a1_notation)
            .map_err(|message| ExportError::InvalidRange {
                notation: a1_notation.to_string(),
                message,
            })?;

        if rect.row == 0 || rect.column == 0 {
            return Err(ExportError::InvalidRange {
                notation: a1_notation.to_string(),
                message: "range coordinates are one-based".to_string(),
            });
        }

        debug!(
            range = a1_notation,
            gid,
            row = rect.row,
            column = rect.column,
            "resolved export range"
        );
        self.config.r1 = Some(rect.row - 1);
        self.config.r2 = Some(rect.row - 1 + rect.num_rows);
        self.config.c1 = Some(rect.column - 1);
        self.config.c2 = Some(rect.column - 1 + rect.num_cols);
        Ok(self)
    }

    /// Whether cell notes are printed.
    pub fn set_print_notes(&mut self, enabled: bool) -> &mut Self {
        self.config.print_notes = Some(enabled);
        self
    }

    /// Whether the document title is printed.
    pub fn set_show_title(&mut self, enabled: bool) -> &mut Self {
        self.config.show_title = Some(enabled);
        self
    }

    /// Whether gridlines are rendered.
    pub fn set_show_gridlines(&mut self, enabled: bool) -> &mut Self {
        self.config.show_gridlines = Some(enabled);
        self
    }

    /// Whether frozen rows repeat on every page.
    pub fn set_repeat_frozen_rows(&mut self, enabled: bool) -> &mut Self {
        self.config.repeat_frozen_rows = Some(enabled);
        self
    }

    /// Whether frozen columns repeat on every page.
    pub fn set_repeat_frozen_cols(&mut self, enabled: bool) -> &mut Self {
        self.config.repeat_frozen_cols = Some(enabled);
        self
    }

    /// Toggles centered page numbers. Disabling removes the parameter
    /// entirely; the service keys off the parameter's presence, not its
    /// value.
    pub fn set_page_numbers(&mut self, enabled: bool) -> &mut Self {
        self.config.page_numbers = enabled;
        self
    }

    /// Sets all four page margins, in inches. The group is all-or-none:
    /// the values are validated together and stored together.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Validation`] naming the first margin that is
    /// negative or not a finite number; no margin is stored in that case.
    pub fn set_margins(
        &mut self,
        left: f64,
        right: f64,
        top: f64,
        bottom: f64,
    ) -> ExportResult<&mut Self> {
        for (field, value) in [
            ("left_margin", left),
            ("right_margin", right),
            ("top_margin", top),
            ("bottom_margin", bottom),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ExportError::Validation {
                    field,
                    message: format!("'{value}' must be a non-negative number"),
                });
            }
        }
        self.config.left_margin = Some(left);
        self.config.right_margin = Some(right);
        self.config.top_margin = Some(top);
        self.config.bottom_margin = Some(bottom);
        Ok(self)
    }

    /// Whether the footer shows the export date.
    pub fn set_print_date(&mut self, enabled: bool) -> &mut Self {
        self.config.print_date = Some(enabled);
        self
    }

    /// Whether the footer shows the export time.
    pub fn set_print_time(&mut self, enabled: bool) -> &mut Self {
        self.config.print_time = Some(enabled);
        self
    }

    /// Fixes the instant used for the footer timestamp. When unset, the
    /// clock's current instant at build time is used.
    pub fn set_timestamp_date(&mut self, instant: DateTime<Utc>) -> &mut Self {
        self.config.timestamp_date = Some(instant);
        self
    }

    /// Sets the IANA timezone the footer timestamp is rendered in. When
    /// unset, the clock's process-wide default zone is used.
    pub fn set_timezone(&mut self, iana_name: &str) -> ExportResult<&mut Self> {
        let zone = iana_name
            .parse()
            .map_err(|_| ExportError::Validation {
                field: "timezone",
                message: format!("'{iana_name}' is not a known IANA timezone"),
            })?;
        self.config.timezone = Some(zone);
        Ok(self)
    }

    /// Sets the artifact's base file name (the format extension is appended
    /// later). Defaults to `"export"` when never set.
    pub fn set_file_name(&mut self, name: &str) -> ExportResult<&mut Self> {
        if name.trim().is_empty() {
            return Err(ExportError::Validation {
                field: "file name",
                message: "must not be empty".to_string(),
            });
        }
        self.config.file_name = Some(name.to_string());
        Ok(self)
    }
}
