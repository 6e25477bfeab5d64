use super::setters::ExportBuilder;
use super::timestamp::resolve_serial;
use crate::errors::{ExportError, ExportResult};
use crate::model::ExportConfig;
use tracing::debug;
use url::Url;

/// Production service root. The document identifier is templated into the
/// path below this root.
const DEFAULT_SERVICE_ROOT: &str = "https://docs.google.com/spreadsheets";

/// Literal stored under `pagenum` when page numbers are enabled.
const PAGE_NUMBER_LITERAL: &str = "CENTER";

/// Build-time structural check across fields. Per-field domains were already
/// enforced by the setters; this only verifies group completeness, reporting
/// the first violated invariant: range-group completeness, then the sheet-id
/// requirement, then margin-group completeness.
fn validate(config: &ExportConfig) -> ExportResult<()> {
    let bounds_set = [config.r1, config.r2, config.c1, config.c2]
        .iter()
        .filter(|bound| bound.is_some())
        .count();
    if bounds_set > 0 && bounds_set < 4 {
        return Err(ExportError::Configuration(
            "range bounds r1, r2, c1, c2 must be set together".to_string(),
        ));
    }
    if bounds_set == 4 && config.sheet_id.is_none() {
        return Err(ExportError::Configuration(
            "an export range requires a sheet id".to_string(),
        ));
    }

    let margins_set = [
        config.left_margin,
        config.right_margin,
        config.top_margin,
        config.bottom_margin,
    ]
    .iter()
    .filter(|margin| margin.is_some())
    .count();
    if margins_set > 0 && margins_set < 4 {
        return Err(ExportError::Configuration(
            "margins must be set together: left, right, top, bottom".to_string(),
        ));
    }

    Ok(())
}

fn bool_param(value: bool) -> String {
    if value { "true" } else { "false" }.to_string()
}

impl ExportBuilder<'_> {
    /// Serializes the validated parameter set into the retrieval URL.
    ///
    /// Runs the cross-field validator first, then resolves the footer
    /// timestamp if either footer flag is on, then joins `key=value` pairs
    /// with `&` in a fixed field order. The order carries no meaning for
    /// the service but is stable, so built URLs are directly comparable in
    /// tests. Values are enum tokens, integers, plain numbers, and the
    /// literals `true`/`false`; free-text values never enter the query
    /// string.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Configuration`] when a cross-field invariant
    /// is violated or the assembled URL does not parse.
    pub fn build_url(&self) -> ExportResult<String> {
        validate(&self.config)?;

        let config = &self.config;
        let mut pairs: Vec<(&str, String)> = Vec::new();

        if let Some(format) = config.format {
            pairs.push(("format", format.as_param().to_string()));
        }
        if let Some(portrait) = config.portrait {
            pairs.push(("portrait", bool_param(portrait)));
        }
        if let Some(size) = config.size {
            pairs.push(("size", size.as_param().to_string()));
        }
        if let Some(scale) = config.scale {
            pairs.push(("scale", scale.as_param().to_string()));
        }
        if let Some(gid) = config.sheet_id {
            pairs.push(("gid", gid.to_string()));
        }
        if let (Some(r1), Some(r2), Some(c1), Some(c2)) =
            (config.r1, config.r2, config.c1, config.c2)
        {
            pairs.push(("r1", r1.to_string()));
            pairs.push(("r2", r2.to_string()));
            pairs.push(("c1", c1.to_string()));
            pairs.push(("c2", c2.to_string()));
        }
        if let Some(notes) = config.print_notes {
            pairs.push(("printnotes", bool_param(notes)));
        }
        if let Some(title) = config.show_title {
            pairs.push(("title", bool_param(title)));
        }
        if let Some(gridlines) = config.show_gridlines {
            pairs.push(("gridlines", bool_param(gridlines)));
        }
        if let Some(fzr) = config.repeat_frozen_rows {
            pairs.push(("fzr", bool_param(fzr)));
        }
        if let Some(fzc) = config.repeat_frozen_cols {
            pairs.push(("fzc", bool_param(fzc)));
        }
        if config.page_numbers {
            pairs.push(("pagenum", PAGE_NUMBER_LITERAL.to_string()));
        }
        if let (Some(left), Some(right), Some(top), Some(bottom)) = (
            config.left_margin,
            config.right_margin,
            config.top_margin,
            config.bottom_margin,
        ) {
            pairs.push(("left_margin", left.to_string()));
            pairs.push(("right_margin", right.to_string()));
            pairs.push(("top_margin", top.to_string()));
            pairs.push(("bottom_margin", bottom.to_string()));
        }
        if let Some(date) = config.print_date {
            pairs.push(("printdate", bool_param(date)));
        }
        if let Some(time) = config.print_time {
            pairs.push(("printtime", bool_param(time)));
        }
        if config.wants_timestamp() {
            let instant = config.timestamp_date.unwrap_or_else(|| self.clock.now());
            let zone = config.timezone.unwrap_or_else(|| self.clock.default_timezone());
            pairs.push(("timestamp", resolve_serial(instant, zone).to_string()));
        }

        let root = self
            .service_root
            .as_deref()
            .unwrap_or(DEFAULT_SERVICE_ROOT);
        let base = format!("{root}/d/{}/export", self.document.identifier());

        let built = if pairs.is_empty() {
            base
        } else {
            let query: Vec<String> = pairs
                .iter()
                .map(|(key, value)| format!("{key}={value}"))
                .collect();
            format!("{base}?{}", query.join("&"))
        };

        // Well-formedness check only; the string itself is returned as built.
        Url::parse(&built)?;

        debug!(url = %built, params = pairs.len(), "export URL built");
        Ok(built)
    }
}
