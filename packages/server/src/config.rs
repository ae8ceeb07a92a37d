use anyhow::{bail, Context, Result};
use dotenvy::dotenv;
use serde::Deserialize;
use std::env;
use std::path::Path;
use std::time::Duration;

const DEFAULT_CREDENTIALS_FILE: &str = "credentials.json";

/// Google OAuth client registration.
#[derive(Debug, Clone)]
pub struct GoogleConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
}

/// App-level Twitter credentials used for announcements.
#[derive(Debug, Clone)]
pub struct TwitterConfig {
    pub api_key: String,
    pub api_secret: String,
    pub access_token: String,
    pub access_secret: String,
}

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub google: GoogleConfig,
    /// `None` disables announcing.
    pub twitter: Option<TwitterConfig>,
    pub remote_call_timeout: Duration,
    pub session_ttl_days: i64,
    pub session_secure_cookie: bool,
    pub drafts_page_size: u32,
    pub blogger_api_base_url: Option<String>,
    pub twitter_api_base_url: Option<String>,
    pub twitter_upload_base_url: Option<String>,
}

/// Shape of the "web application" client JSON downloaded from the Google console.
#[derive(Debug, Deserialize)]
struct GoogleCredentialsFile {
    web: GoogleWebCredentials,
}

#[derive(Debug, Deserialize)]
struct GoogleWebCredentials {
    client_id: String,
    client_secret: String,
    #[serde(default)]
    redirect_uris: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let port: u16 = var("PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse()
            .context("PORT must be a valid number")?;

        let google = Self::google(&var, port)?;
        let twitter = Self::twitter(&var)?;

        let timeout_secs: u64 = var("REMOTE_CALL_TIMEOUT_SECS")
            .unwrap_or_else(|| "30".to_string())
            .parse()
            .context("REMOTE_CALL_TIMEOUT_SECS must be a valid number")?;
        if timeout_secs == 0 {
            bail!("REMOTE_CALL_TIMEOUT_SECS must be greater than zero");
        }

        let session_ttl_days: i64 = var("SESSION_TTL_DAYS")
            .unwrap_or_else(|| "7".to_string())
            .parse()
            .context("SESSION_TTL_DAYS must be a valid number")?;
        if session_ttl_days <= 0 {
            bail!("SESSION_TTL_DAYS must be greater than zero");
        }

        let session_secure_cookie = var("SESSION_SECURE_COOKIE")
            .map(|v| v.parse::<bool>())
            .transpose()
            .context("SESSION_SECURE_COOKIE must be true or false")?
            .unwrap_or(false);

        let drafts_page_size: u32 = var("DRAFTS_PAGE_SIZE")
            .unwrap_or_else(|| blogger_client::MAX_PAGE_SIZE.to_string())
            .parse()
            .context("DRAFTS_PAGE_SIZE must be a valid number")?;
        if !(1..=blogger_client::MAX_PAGE_SIZE).contains(&drafts_page_size) {
            bail!(
                "DRAFTS_PAGE_SIZE must be between 1 and {}",
                blogger_client::MAX_PAGE_SIZE
            );
        }

        Ok(Self {
            port,
            google,
            twitter,
            remote_call_timeout: Duration::from_secs(timeout_secs),
            session_ttl_days,
            session_secure_cookie,
            drafts_page_size,
            blogger_api_base_url: var("BLOGGER_API_BASE_URL"),
            twitter_api_base_url: var("TWITTER_API_BASE_URL"),
            twitter_upload_base_url: var("TWITTER_UPLOAD_BASE_URL"),
        })
    }

    /// Env vars win; otherwise fall back to the downloaded client JSON.
    fn google(var: &impl Fn(&str) -> Option<String>, port: u16) -> Result<GoogleConfig> {
        let default_redirect = format!("http://localhost:{port}/callback");

        if let (Some(client_id), Some(client_secret)) =
            (var("GOOGLE_CLIENT_ID"), var("GOOGLE_CLIENT_SECRET"))
        {
            return Ok(GoogleConfig {
                client_id,
                client_secret,
                redirect_uri: var("GOOGLE_REDIRECT_URI").unwrap_or(default_redirect),
            });
        }

        let path = var("GOOGLE_CREDENTIALS_FILE")
            .unwrap_or_else(|| DEFAULT_CREDENTIALS_FILE.to_string());
        if !Path::new(&path).exists() {
            bail!("GOOGLE_CLIENT_ID and GOOGLE_CLIENT_SECRET must be set (or provide {path})");
        }

        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read Google credentials file {path}"))?;
        let file = parse_credentials_file(&raw)
            .with_context(|| format!("Invalid Google credentials file {path}"))?;

        let redirect_uri = var("GOOGLE_REDIRECT_URI")
            .or_else(|| file.web.redirect_uris.first().cloned())
            .unwrap_or(default_redirect);

        Ok(GoogleConfig {
            client_id: file.web.client_id,
            client_secret: file.web.client_secret,
            redirect_uri,
        })
    }

    fn twitter(var: &impl Fn(&str) -> Option<String>) -> Result<Option<TwitterConfig>> {
        const NAMES: [&str; 4] = [
            "TWITTER_API_KEY",
            "TWITTER_API_SECRET",
            "TWITTER_ACCESS_TOKEN",
            "TWITTER_ACCESS_SECRET",
        ];

        let values: Vec<Option<String>> = NAMES.iter().copied().map(var).collect();
        match values.as_slice() {
            [Some(api_key), Some(api_secret), Some(access_token), Some(access_secret)] => {
                Ok(Some(TwitterConfig {
                    api_key: api_key.clone(),
                    api_secret: api_secret.clone(),
                    access_token: access_token.clone(),
                    access_secret: access_secret.clone(),
                }))
            }
            _ if values.iter().all(Option::is_none) => Ok(None),
            _ => {
                let missing: Vec<&str> = NAMES
                    .iter()
                    .zip(&values)
                    .filter(|(_, v)| v.is_none())
                    .map(|(n, _)| *n)
                    .collect();
                bail!(
                    "Twitter announcing is partially configured; missing {}",
                    missing.join(", ")
                )
            }
        }
    }
}

fn parse_credentials_file(raw: &str) -> Result<GoogleCredentialsFile> {
    Ok(serde_json::from_str(raw)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    const GOOGLE: [(&str, &str); 2] = [
        ("GOOGLE_CLIENT_ID", "client-id"),
        ("GOOGLE_CLIENT_SECRET", "client-secret"),
    ];

    #[test]
    fn defaults_apply() {
        let config = Config::from_lookup(lookup(&GOOGLE)).unwrap();

        assert_eq!(config.port, 3000);
        assert_eq!(config.google.redirect_uri, "http://localhost:3000/callback");
        assert!(config.twitter.is_none());
        assert_eq!(config.remote_call_timeout, Duration::from_secs(30));
        assert_eq!(config.session_ttl_days, 7);
        assert!(!config.session_secure_cookie);
        assert_eq!(config.drafts_page_size, 50);
    }

    #[test]
    fn full_twitter_config_enables_announcing() {
        let mut vars = GOOGLE.to_vec();
        vars.extend([
            ("TWITTER_API_KEY", "k"),
            ("TWITTER_API_SECRET", "s"),
            ("TWITTER_ACCESS_TOKEN", "t"),
            ("TWITTER_ACCESS_SECRET", "ts"),
        ]);

        let config = Config::from_lookup(lookup(&vars)).unwrap();
        let twitter = config.twitter.expect("twitter configured");
        assert_eq!(twitter.api_key, "k");
        assert_eq!(twitter.access_secret, "ts");
    }

    #[test]
    fn partial_twitter_config_is_rejected() {
        let mut vars = GOOGLE.to_vec();
        vars.push(("TWITTER_API_KEY", "k"));

        let err = Config::from_lookup(lookup(&vars)).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("TWITTER_API_SECRET"), "{message}");
        assert!(!message.contains("TWITTER_API_KEY,"), "{message}");
    }

    #[test]
    fn page_size_above_blogger_cap_is_rejected() {
        let mut vars = GOOGLE.to_vec();
        vars.push(("DRAFTS_PAGE_SIZE", "51"));
        assert!(Config::from_lookup(lookup(&vars)).is_err());
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let mut vars = GOOGLE.to_vec();
        vars.push(("REMOTE_CALL_TIMEOUT_SECS", "0"));
        assert!(Config::from_lookup(lookup(&vars)).is_err());
    }

    #[test]
    fn missing_google_credentials_fail() {
        let vars = [("GOOGLE_CREDENTIALS_FILE", "/nonexistent/credentials.json")];
        let err = Config::from_lookup(lookup(&vars)).unwrap_err();
        assert!(err.to_string().contains("GOOGLE_CLIENT_ID"));
    }

    #[test]
    fn credentials_file_shape_parses() {
        let raw = r#"{"web":{"client_id":"id","client_secret":"secret","redirect_uris":["http://localhost:3000/callback"]}}"#;
        let file = parse_credentials_file(raw).unwrap();
        assert_eq!(file.web.client_id, "id");
        assert_eq!(file.web.redirect_uris[0], "http://localhost:3000/callback");
    }
}
