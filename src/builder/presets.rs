use super::setters::ExportBuilder;
use crate::errors::{ExportError, ExportResult};
use tracing::debug;

/// The recognized preset names, in the order they are reported to callers.
pub const PRESET_NAMES: [&str; 4] = ["pdfReport", "pdfLandscape", "csvData", "xlsxBackup"];

impl ExportBuilder<'_> {
    /// Expands a named bundle of setter calls for a common export shape.
    ///
    /// Presets never read the existing configuration; they unconditionally
    /// overwrite the fields they touch and leave everything else alone.
    ///
    /// - `pdfReport`: portrait letter PDF, gridlines off, title on,
    ///   page numbers on
    /// - `pdfLandscape`: landscape A4 PDF scaled to fit the page,
    ///   gridlines on
    /// - `csvData`: CSV format
    /// - `xlsxBackup`: XLSX format
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Configuration`] listing the valid preset
    /// names when `name` is not one of them.
    pub fn apply_preset(&mut self, name: &str) -> ExportResult<&mut Self> {
        match name {
            "pdfReport" => {
                self.set_format("pdf")?
                    .set_portrait(true)
                    .set_paper_size("letter")?
                    .set_show_gridlines(false)
                    .set_show_title(true)
                    .set_page_numbers(true);
            }
            "pdfLandscape" => {
                self.set_format("pdf")?
                    .set_portrait(false)
                    .set_paper_size("a4")?
                    .set_scale("fit_page")?
                    .set_show_gridlines(true);
            }
            "csvData" => {
                self.set_format("csv")?;
            }
            "xlsxBackup" => {
                self.set_format("xlsx")?;
            }
            other => {
                return Err(ExportError::Configuration(format!(
                    "unknown preset '{}' (valid presets: {})",
                    other,
                    PRESET_NAMES.join(", ")
                )));
            }
        }
        debug!(preset = name, "preset applied");
        Ok(self)
    }
}
