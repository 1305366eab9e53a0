//! Remote sheet sink speaking a Google-Sheets-style values API.
//!
//! One blocking HTTP append per submission, no retry and no timeout beyond
//! the client default. When the target tab is missing or empty the sink
//! bootstraps it: missing tabs are added via `batchUpdate`, and the header
//! row is appended before the first record.

use serde_json::{Value, json};
use url::Url;

use crate::review::{RECORD_FIELDS, ReviewRecord};

use super::error::SinkError;
use super::ReviewSink;

/// Default sheet tab receiving review records.
pub const DEFAULT_SHEET_TAB: &str = "Analises";

/// Outcome of probing the target tab's header range.
enum TabState {
    HeaderPresent,
    Empty,
    Missing,
}

/// Appends review records to a remote spreadsheet over HTTP.
#[derive(Debug, Clone)]
pub struct SheetsSink {
    endpoint: Url,
    spreadsheet_id: String,
    tab: String,
    token: String,
    client: reqwest::blocking::Client,
}

impl SheetsSink {
    /// Creates a sink for the given service endpoint, spreadsheet, tab, and
    /// bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError::Configuration`] when the endpoint is not a valid
    /// URL or the spreadsheet id or token is blank.
    pub fn new(
        endpoint: &str,
        spreadsheet_id: impl Into<String>,
        tab: impl Into<String>,
        token: impl Into<String>,
    ) -> Result<Self, SinkError> {
        let endpoint = Url::parse(endpoint).map_err(|error| SinkError::Configuration {
            message: format!("invalid sheet service endpoint: {error}"),
        })?;
        let spreadsheet_id = spreadsheet_id.into();
        if spreadsheet_id.trim().is_empty() {
            return Err(SinkError::Configuration {
                message: "spreadsheet id must not be blank".to_owned(),
            });
        }
        let token = token.into();
        if token.trim().is_empty() {
            return Err(SinkError::Configuration {
                message: "sheet service token must not be blank".to_owned(),
            });
        }
        Ok(Self {
            endpoint,
            spreadsheet_id,
            tab: tab.into(),
            token,
            client: reqwest::blocking::Client::new(),
        })
    }

    fn url(&self, suffix: &str) -> Result<Url, SinkError> {
        let path = format!(
            "v4/spreadsheets/{}{suffix}",
            self.spreadsheet_id
        );
        self.endpoint
            .join(&path)
            .map_err(|error| SinkError::Configuration {
                message: format!("invalid sheet request URL: {error}"),
            })
    }

    /// Builds a values URL for the configured tab. The tab name is pushed as
    /// a path segment so characters like spaces are percent-encoded; the
    /// suffix (`!A1:G1`, `:append`) stays literal.
    fn tab_url(&self, tab_suffix: &str) -> Result<Url, SinkError> {
        let mut url = self.url("")?;
        url.path_segments_mut()
            .map_err(|()| SinkError::Configuration {
                message: "sheet service endpoint cannot hold path segments".to_owned(),
            })?
            .push("values")
            .push(&format!("{}{tab_suffix}", self.tab));
        Ok(url)
    }

    fn probe_tab(&self) -> Result<TabState, SinkError> {
        let url = self.tab_url("!A1:G1")?;
        let response = self
            .client
            .get(url)
            .bearer_auth(&self.token)
            .send()
            .map_err(network_error)?;

        let status = response.status();
        if status.is_success() {
            let body: Value = response.json().unwrap_or(Value::Null);
            let has_header = body
                .get("values")
                .and_then(Value::as_array)
                .is_some_and(|rows| !rows.is_empty());
            if has_header {
                Ok(TabState::HeaderPresent)
            } else {
                Ok(TabState::Empty)
            }
        } else if status == reqwest::StatusCode::BAD_REQUEST
            || status == reqwest::StatusCode::NOT_FOUND
        {
            Ok(TabState::Missing)
        } else {
            Err(append_error(status, response.text().ok()))
        }
    }

    fn add_tab(&self) -> Result<(), SinkError> {
        let url = self.url(":batchUpdate")?;
        let body = json!({
            "requests": [{"addSheet": {"properties": {"title": self.tab}}}]
        });
        self.post_expecting_success(url, &body)
    }

    fn append_cells(&self, cells: &[String]) -> Result<(), SinkError> {
        let mut url = self.tab_url(":append")?;
        url.query_pairs_mut().append_pair("valueInputOption", "RAW");
        let body = json!({ "values": [cells] });
        self.post_expecting_success(url, &body)
    }

    fn post_expecting_success(&self, url: Url, body: &Value) -> Result<(), SinkError> {
        let response = self
            .client
            .post(url)
            .bearer_auth(&self.token)
            .json(body)
            .send()
            .map_err(network_error)?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(append_error(status, response.text().ok()))
        }
    }

    /// Appends the header row when the tab is empty, adding the tab first
    /// when it does not exist.
    fn ensure_header(&self) -> Result<(), SinkError> {
        let header: Vec<String> = RECORD_FIELDS.iter().map(|&field| field.to_owned()).collect();
        match self.probe_tab()? {
            TabState::HeaderPresent => Ok(()),
            TabState::Empty => self.append_cells(&header),
            TabState::Missing => {
                self.add_tab()?;
                self.append_cells(&header)
            }
        }
    }
}

impl ReviewSink for SheetsSink {
    fn append(&self, record: &ReviewRecord) -> Result<(), SinkError> {
        self.ensure_header()?;
        self.append_cells(&record.to_row())?;
        tracing::debug!(
            spreadsheet_id = %self.spreadsheet_id,
            tab = %self.tab,
            note_id = record.note_id,
            "review appended to sheet sink"
        );
        Ok(())
    }
}

fn network_error(error: reqwest::Error) -> SinkError {
    SinkError::Network {
        message: error.to_string(),
    }
}

fn append_error(status: reqwest::StatusCode, body: Option<String>) -> SinkError {
    let detail = body
        .as_deref()
        .and_then(extract_service_message)
        .unwrap_or_else(|| status.to_string());
    SinkError::Append { message: detail }
}

/// Pulls the human-readable message out of a service error body, falling
/// back to nothing when the body is not the expected JSON shape.
fn extract_service_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .get("error")
        .and_then(|error| error.get("message"))
        .and_then(Value::as_str)
        .map(ToOwned::to_owned)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn rejects_blank_spreadsheet_id() {
        let error = SheetsSink::new("https://sheets.example", "  ", DEFAULT_SHEET_TAB, "tok")
            .expect_err("blank id should be rejected");
        assert!(matches!(error, SinkError::Configuration { .. }));
    }

    #[rstest]
    fn rejects_blank_token() {
        let error = SheetsSink::new("https://sheets.example", "sheet-1", DEFAULT_SHEET_TAB, "")
            .expect_err("blank token should be rejected");
        assert!(matches!(error, SinkError::Configuration { .. }));
    }

    #[rstest]
    fn rejects_invalid_endpoint() {
        let error = SheetsSink::new("not a url", "sheet-1", DEFAULT_SHEET_TAB, "tok")
            .expect_err("invalid endpoint should be rejected");
        assert!(matches!(error, SinkError::Configuration { .. }));
    }

    #[rstest]
    fn percent_encodes_the_tab_name_in_values_urls() {
        let sink = SheetsSink::new("https://sheets.example", "sheet-1", "Notas 2026", "tok")
            .expect("sink should build from valid settings");
        let url = sink.tab_url("!A1:G1").expect("values URL should build");
        assert_eq!(
            url.path(),
            "/v4/spreadsheets/sheet-1/values/Notas%202026!A1:G1"
        );
        let append = sink.tab_url(":append").expect("append URL should build");
        assert_eq!(
            append.path(),
            "/v4/spreadsheets/sheet-1/values/Notas%202026:append"
        );
    }

    #[rstest]
    fn extracts_service_error_messages() {
        let body = r#"{"error": {"code": 403, "message": "The caller does not have permission"}}"#;
        assert_eq!(
            extract_service_message(body).as_deref(),
            Some("The caller does not have permission")
        );
        assert!(extract_service_message("not json").is_none());
    }
}
