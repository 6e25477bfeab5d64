//! Performs the export retrieval and names the resulting artifact.

use crate::builder::ExportBuilder;
use crate::document::TokenProvider;
use crate::errors::{ExportError, ExportResult};
use crate::model::{ExportConfig, DEFAULT_FILE_NAME};
use tracing::{debug, info};

/// Extension applied when no format was configured.
const DEFAULT_EXTENSION: &str = "xlsx";

/// The fetched export: raw artifact bytes plus the name they should be
/// stored under. Hand this to whatever persists the output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Builds the export URL and retrieves it in a single authorized GET.
///
/// The request carries a bearer token from `tokens`. Exactly one attempt is
/// made: nothing is retried, and no timeout is configured here beyond what
/// `client` already enforces.
///
/// # Errors
///
/// Propagates build-time validation errors, and returns
/// [`ExportError::ExportFailed`] for any transport fault or any response
/// with a status other than 200 (carrying the status code and response
/// body).
pub async fn fetch_export(
    client: &reqwest::Client,
    builder: &ExportBuilder<'_>,
    tokens: &dyn TokenProvider,
) -> ExportResult<ExportArtifact> {
    let url = builder.build_url()?;
    debug!(url = %url, "requesting export");

    let response = client
        .get(&url)
        .bearer_auth(tokens.token())
        .send()
        .await
        .map_err(|e| ExportError::ExportFailed {
            status: None,
            message: format!("request could not be sent: {e}"),
        })?;

    let status = response.status().as_u16();
    if status != 200 {
        let body = response.text().await.unwrap_or_default();
        return Err(ExportError::ExportFailed {
            status: Some(status),
            message: format!("HTTP {status}: {body}"),
        });
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| ExportError::ExportFailed {
            status: None,
            message: format!("response body could not be read: {e}"),
        })?
        .to_vec();

    let file_name = output_file_name(builder.config());
    info!(file = %file_name, bytes = bytes.len(), "export fetched");
    Ok(ExportArtifact { file_name, bytes })
}

/// Computes the artifact name: the configured base name plus the format's
/// extension (default `xlsx`), without duplicating an extension the base
/// name already carries.
fn output_file_name(config: &ExportConfig) -> String {
    let base = config.file_name.as_deref().unwrap_or(DEFAULT_FILE_NAME);
    let extension = config
        .format
        .map(|format| format.extension())
        .unwrap_or(DEFAULT_EXTENSION);
    let suffix = format!(".{extension}");
    if base.ends_with(&suffix) {
        base.to_string()
    } else {
        format!("{base}{suffix}")
    }
}

#[cfg(test)]
mod tests {
    use super::output_file_name;
    use crate::model::{ExportConfig, ExportFormat};

    #[test]
    fn default_name_and_format() {
        let config = ExportConfig::default();
        assert_eq!(output_file_name(&config), "export.xlsx");
    }

    #[test]
    fn extension_follows_the_configured_format() {
        let config = ExportConfig {
            file_name: Some("Report".to_string()),
            format: Some(ExportFormat::Pdf),
            ..Default::default()
        };
        assert_eq!(output_file_name(&config), "Report.pdf");
    }

    #[test]
    fn existing_extension_is_not_duplicated() {
        let config = ExportConfig {
            file_name: Some("Report.xlsx".to_string()),
            format: Some(ExportFormat::Xlsx),
            ..Default::default()
        };
        assert_eq!(output_file_name(&config), "Report.xlsx");
    }

    #[test]
    fn mismatched_extension_is_appended() {
        // only the configured format's own extension is deduplicated
        let config = ExportConfig {
            file_name: Some("Report.pdf".to_string()),
            format: Some(ExportFormat::Csv),
            ..Default::default()
        };
        assert_eq!(output_file_name(&config), "Report.pdf.csv");
    }
}
