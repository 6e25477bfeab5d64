use thiserror::Error;

/// Errors produced while configuring, building, or executing an export.
#[derive(Debug, Error)]
pub enum ExportError {
    /// A setter received a value outside its field's domain
    #[error("invalid {field}: {message}")]
    Validation {
        /// The parameter the rejected value was meant for
        field: &'static str,
        /// What was wrong, including the legal values where the domain is finite
        message: String,
    },
    /// Cross-field inconsistency detected at build time, or an unknown preset
    #[error("configuration error: {0}")]
    Configuration(String),
    /// A sheet looked up by display name does not exist in the document
    #[error("sheet not found: {0}")]
    NotFound(String),
    /// An export range address could not be resolved
    #[error("invalid range '{notation}': {message}")]
    InvalidRange {
        /// The A1-style address as given by the caller
        notation: String,
        /// The underlying resolution failure
        message: String,
    },
    /// The export request failed, either at transport level or with a
    /// non-success status. `status` is `None` for transport faults.
    #[error("export failed: {message}")]
    ExportFailed {
        status: Option<u16>,
        message: String,
    },
}

impl From<url::ParseError> for ExportError {
    fn from(err: url::ParseError) -> Self {
        ExportError::Configuration(format!("malformed export URL: {err}"))
    }
}

impl From<reqwest::Error> for ExportError {
    fn from(err: reqwest::Error) -> Self {
        ExportError::ExportFailed {
            status: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
        }
    }
}

/// Result alias used throughout the crate.
pub type ExportResult<T> = Result<T, ExportError>;

#[cfg(test)]
mod tests {
    use super::ExportError;

    #[test]
    fn validation_error_names_field_and_message() {
        let err = ExportError::Validation {
            field: "format",
            message: "allowed values: pdf, csv".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("format"));
        assert!(msg.contains("pdf, csv"));
    }

    #[test]
    fn invalid_range_error_includes_notation() {
        let err = ExportError::InvalidRange {
            notation: "A1:Z".to_string(),
            message: "unknown range".to_string(),
        };
        assert!(err.to_string().contains("A1:Z"));
        assert!(err.to_string().contains("unknown range"));
    }

    #[test]
    fn export_failed_error_carries_status() {
        let err = ExportError::ExportFailed {
            status: Some(403),
            message: "HTTP 403: access denied".to_string(),
        };
        assert!(err.to_string().contains("access denied"));
        match err {
            ExportError::ExportFailed { status, .. } => assert_eq!(status, Some(403)),
            _ => unreachable!(),
        }
    }

    #[test]
    fn export_error_implements_error_trait() {
        use std::error::Error;
        let err: Box<dyn Error> = Box::new(ExportError::NotFound("Summary".to_string()));
        assert!(!err.to_string().is_empty());
    }
}
