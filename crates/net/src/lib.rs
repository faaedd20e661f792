//! Blocking HTTP client for the persistence and suggestion bridges.
//!
//! All calls here block; they run on the bridge runtime thread, never on the
//! interaction path. The [`BridgeTransport`] trait is the seam the runtime
//! talks through, so tests can substitute a stub for the HTTP client.

use bus::{Suggestion, SuggestionContext};
use history::PersistEntry;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

#[derive(Debug)]
pub enum NetError {
    Transport(String),
    Status { code: u16 },
    Decode(String),
}

impl fmt::Display for NetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetError::Transport(msg) => write!(f, "transport error: {msg}"),
            NetError::Status { code } => write!(f, "backend returned status {code}"),
            NetError::Decode(msg) => write!(f, "malformed response: {msg}"),
        }
    }
}

impl std::error::Error for NetError {}

impl From<ureq::Error> for NetError {
    fn from(e: ureq::Error) -> Self {
        match e {
            ureq::Error::Status(code, _) => NetError::Status { code },
            ureq::Error::Transport(t) => NetError::Transport(t.to_string()),
        }
    }
}

/// Backend endpoints, resolved against one base URL.
#[derive(Clone, Debug)]
pub struct BridgeConfig {
    pub base_url: String,
    pub load_path: String,
    pub save_path: String,
    pub suggest_path: String,
}

impl BridgeConfig {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            load_path: "/api/styles/load".to_string(),
            save_path: "/api/styles/save".to_string(),
            suggest_path: "/api/suggest".to_string(),
        }
    }
}

/// The three calls the bridge runtime can make.
pub trait BridgeTransport: Send + Sync {
    fn load_styles(&self, page_path: &str) -> Result<Vec<PersistEntry>, NetError>;
    fn save_styles(&self, page_path: &str, entries: &[PersistEntry]) -> Result<(), NetError>;
    fn request_suggestions(
        &self,
        context: &SuggestionContext,
        instruction: &str,
    ) -> Result<Vec<Suggestion>, NetError>;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LoadRequest<'a> {
    page_path: &'a str,
}

#[derive(Deserialize)]
struct LoadResponse {
    entries: Vec<PersistEntry>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SaveRequest<'a> {
    page_path: &'a str,
    styles: &'a [PersistEntry],
}

#[derive(Serialize)]
struct SuggestRequest<'a> {
    context: &'a SuggestionContext,
    instruction: &'a str,
}

#[derive(Deserialize)]
struct SuggestResponse {
    suggestions: Vec<Suggestion>,
}

pub struct BridgeClient {
    config: BridgeConfig,
    agent: ureq::Agent,
}

impl BridgeClient {
    pub fn new(config: BridgeConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(10))
            .user_agent("restyler/0.1")
            .build();
        Self { config, agent }
    }

    fn endpoint(&self, path: &str) -> Result<String, NetError> {
        let base = url::Url::parse(&self.config.base_url)
            .map_err(|e| NetError::Transport(format!("bad base url: {e}")))?;
        let joined = base
            .join(path)
            .map_err(|e| NetError::Transport(format!("bad endpoint path: {e}")))?;
        Ok(joined.into())
    }

    fn post_json<T: Serialize>(&self, path: &str, body: &T) -> Result<ureq::Response, NetError> {
        let endpoint = self.endpoint(path)?;
        log::debug!(target: "net.bridge", "POST {endpoint}");
        let value = serde_json::to_value(body).map_err(|e| NetError::Decode(e.to_string()))?;
        Ok(self.agent.post(&endpoint).send_json(value)?)
    }
}

impl BridgeTransport for BridgeClient {
    fn load_styles(&self, page_path: &str) -> Result<Vec<PersistEntry>, NetError> {
        let response = self.post_json(&self.config.load_path, &LoadRequest { page_path })?;
        let decoded: LoadResponse = response
            .into_json()
            .map_err(|e| NetError::Decode(e.to_string()))?;
        Ok(decoded.entries)
    }

    fn save_styles(&self, page_path: &str, entries: &[PersistEntry]) -> Result<(), NetError> {
        self.post_json(
            &self.config.save_path,
            &SaveRequest {
                page_path,
                styles: entries,
            },
        )?;
        Ok(())
    }

    fn request_suggestions(
        &self,
        context: &SuggestionContext,
        instruction: &str,
    ) -> Result<Vec<Suggestion>, NetError> {
        let response = self.post_json(
            &self.config.suggest_path,
            &SuggestRequest {
                context,
                instruction,
            },
        )?;
        let decoded: SuggestResponse = response
            .into_json()
            .map_err(|e| NetError::Decode(e.to_string()))?;
        Ok(decoded.suggestions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_join_against_base_url() {
        let client = BridgeClient::new(BridgeConfig::with_base_url("http://localhost:3000"));
        assert_eq!(
            client.endpoint("/api/styles/load").unwrap(),
            "http://localhost:3000/api/styles/load"
        );
    }

    #[test]
    fn bad_base_url_is_a_transport_error() {
        let client = BridgeClient::new(BridgeConfig::with_base_url("not a url"));
        assert!(matches!(
            client.endpoint("/x"),
            Err(NetError::Transport(_))
        ));
    }

    #[test]
    fn wire_requests_use_camel_case_fields() {
        let body = serde_json::to_value(LoadRequest { page_path: "/shop" }).unwrap();
        assert_eq!(body["pagePath"], "/shop");
    }
}
