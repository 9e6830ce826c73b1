//! Client configuration shared by every request.
//!
//! `ClientConfig` is an explicit handle owned by the caller: the base URL of
//! the account plus the default headers (accept, user agent, credentials)
//! attached to each request. Nothing here is global.

use crate::error::{ApiError, Result};

pub const BASE_URL_ENV: &str = "HARVEST_BASE_URL";
pub const TOKEN_ENV: &str = "HARVEST_TOKEN";

pub const DEFAULT_USER_AGENT: &str = concat!("harvest-core/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: String,
    headers: Vec<(String, String)>,
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            headers: vec![
                ("accept".to_string(), "application/json".to_string()),
                ("user-agent".to_string(), DEFAULT_USER_AGENT.to_string()),
            ],
        }
    }

    /// Load the configuration from `HARVEST_BASE_URL` and the optional `HARVEST_TOKEN`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env`, reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup(BASE_URL_ENV)
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| ApiError::Config(format!("`{BASE_URL_ENV}` is not set")))?;

        let config = Self::new(base_url.trim());
        Ok(match lookup(TOKEN_ENV) {
            Some(token) if !token.is_empty() => config.with_bearer_token(&token),
            _ => config,
        })
    }

    /// Set a default header, replacing any existing header of the same name.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        self.headers.retain(|(key, _)| !key.eq_ignore_ascii_case(&name));
        self.headers.push((name, value.into()));
        self
    }

    pub fn with_bearer_token(self, token: &str) -> Self {
        self.with_header("authorization", format!("Bearer {token}"))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Join the base URL and a relative resource path with a single `/`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let config = ClientConfig::new("https://example.harvestapp.com/");
        assert_eq!(config.base_url(), "https://example.harvestapp.com");
        assert_eq!(
            config.endpoint("/projects/1"),
            "https://example.harvestapp.com/projects/1"
        );
        assert_eq!(
            config.endpoint("projects/1"),
            "https://example.harvestapp.com/projects/1"
        );
    }

    #[test]
    fn default_headers_accept_json() {
        let config = ClientConfig::new("http://localhost:3000");
        assert_eq!(
            config.headers(),
            &[
                ("accept".to_string(), "application/json".to_string()),
                ("user-agent".to_string(), DEFAULT_USER_AGENT.to_string()),
            ]
        );
    }

    #[test]
    fn with_header_replaces_same_name() {
        let config = ClientConfig::new("http://localhost:3000").with_header("User-Agent", "custom/1.0");
        let agents: Vec<_> = config
            .headers()
            .iter()
            .filter(|(k, _)| k.eq_ignore_ascii_case("user-agent"))
            .collect();
        assert_eq!(agents.len(), 1);
        assert_eq!(agents[0].1, "custom/1.0");
    }

    #[test]
    fn from_lookup_reads_base_url_and_token() {
        let config = ClientConfig::from_lookup(lookup(&[
            (BASE_URL_ENV, "https://acme.harvestapp.com/"),
            (TOKEN_ENV, "secret"),
        ]))
        .unwrap();
        assert_eq!(config.base_url(), "https://acme.harvestapp.com");
        assert!(config
            .headers()
            .contains(&("authorization".to_string(), "Bearer secret".to_string())));
    }

    #[test]
    fn from_lookup_without_token_has_no_authorization() {
        let config =
            ClientConfig::from_lookup(lookup(&[(BASE_URL_ENV, "http://localhost:3000")])).unwrap();
        assert!(config.headers().iter().all(|(k, _)| k != "authorization"));
    }

    #[test]
    fn from_lookup_requires_base_url() {
        let err = ClientConfig::from_lookup(lookup(&[(TOKEN_ENV, "secret")])).unwrap_err();
        assert!(matches!(err, ApiError::Config(_)));

        let err = ClientConfig::from_lookup(lookup(&[(BASE_URL_ENV, "  ")])).unwrap_err();
        assert!(matches!(err, ApiError::Config(_)));
    }
}
