//! The export-request builder.
//!
//! [`ExportBuilder`] accumulates export parameters through chainable,
//! fail-fast setters, then turns the validated set into a single retrieval
//! URL. The submodules split the work by responsibility: `setters` owns the
//! per-field validation, `presets` expands named parameter bundles,
//! `timestamp` derives the service's date-serial value, and `url` runs the
//! cross-field checks and serializes the query string.

mod presets;
mod setters;
mod timestamp;
mod url;

pub use presets::PRESET_NAMES;
pub use setters::ExportBuilder;
