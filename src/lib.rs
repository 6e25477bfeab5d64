//! gridport library
//!
//! Builds validated export requests for a tabular-document service, turns
//! them into a single well-formed retrieval URL, performs the retrieval,
//! and names the resulting binary artifact.
//!
//! ## Overview
//!
//! - [`builder`] - Chainable export-request builder: per-field validation,
//!   named presets, timestamp derivation, and URL serialization
//! - [`executor`] - Issues the authorized GET and names the fetched artifact
//! - [`document`] - Contracts for the external collaborators: document
//!   model, clock, and token supplier
//! - [`model`] - Typed export parameters and the accumulating configuration
//! - [`errors`] - Error types used throughout the crate
//!
//! ## Example Usage
//!
//! Configure through chained setters, inspect the URL, then fetch:
//!
//! ```no_run
//! use gridport::builder::ExportBuilder;
//! use gridport::document::{InMemoryDocument, StaticToken};
//! use gridport::errors::ExportResult;
//! use gridport::executor::fetch_export;
//!
//! # async fn example() -> ExportResult<()> {
//! let document = InMemoryDocument::new("1a2b3c");
//! let mut builder = ExportBuilder::new(&document);
//! builder
//!     .apply_preset("pdfReport")?
//!     .set_print_date(true)
//!     .set_file_name("Quarterly")?;
//!
//! // The URL is inspectable without performing the fetch.
//! let url = builder.build_url()?;
//! assert!(url.contains("format=pdf"));
//!
//! let client = reqwest::Client::new();
//! let token = StaticToken("ya29.token".to_string());
//! let artifact = fetch_export(&client, &builder, &token).await?;
//! assert_eq!(artifact.file_name, "Quarterly.pdf");
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod document;
pub mod errors;
pub mod executor;
pub mod model;

pub use builder::{ExportBuilder, PRESET_NAMES};
pub use document::{
    Clock, DocumentModel, InMemoryDocument, InMemorySheet, RangeRect, SheetHandle, StaticToken,
    SystemClock, TokenProvider,
};
pub use errors::{ExportError, ExportResult};
pub use executor::{fetch_export, ExportArtifact};
pub use model::{ExportConfig, ExportFormat, PageSize, Scale};
