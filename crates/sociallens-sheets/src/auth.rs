//! OAuth2 access tokens for the Sheets API.
//!
//! Production uses a Google service-account key: a signed RS256 assertion is
//! exchanged at the key's `token_uri` for a short-lived bearer token, which is
//! cached until shortly before it expires.

use std::path::Path;
use std::time::{Duration, Instant};

use jsonwebtoken::{Algorithm, EncodingKey, Header};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::error::SheetsError;

pub const SHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";

const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;
const EXPIRY_MARGIN: Duration = Duration::from_secs(60);

/// The subset of a service-account JSON key file used for token exchange.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

impl ServiceAccountKey {
    /// Reads and parses a key file.
    ///
    /// # Errors
    ///
    /// Returns [`SheetsError::Io`] if the file cannot be read, or
    /// [`SheetsError::InvalidKey`] if it is not a service-account key.
    pub fn from_file(path: &Path) -> Result<Self, SheetsError> {
        let raw = std::fs::read_to_string(path).map_err(|source| SheetsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    /// Parses key JSON. Literal `\n` sequences in the PEM are unescaped.
    ///
    /// # Errors
    ///
    /// Returns [`SheetsError::InvalidKey`] on malformed JSON.
    pub fn from_json(raw: &str) -> Result<Self, SheetsError> {
        let mut key: Self = serde_json::from_str(raw)?;
        key.private_key = key.private_key.replace("\\n", "\n");
        Ok(key)
    }
}

#[derive(Debug, Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: u64,
}

fn default_expires_in() -> u64 {
    3600
}

struct CachedToken {
    access_token: String,
    refresh_at: Instant,
}

/// Exchanges signed assertions for access tokens and caches the result.
pub struct ServiceAccountTokens {
    key: ServiceAccountKey,
    encoding_key: EncodingKey,
    client: Client,
    cache: Mutex<Option<CachedToken>>,
}

impl ServiceAccountTokens {
    /// # Errors
    ///
    /// Returns [`SheetsError::Jwt`] if the private key is not a valid RSA PEM,
    /// or [`SheetsError::Http`] if the HTTP client cannot be built.
    pub fn new(key: ServiceAccountKey, timeout_secs: u64) -> Result<Self, SheetsError> {
        let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())?;
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            key,
            encoding_key,
            client,
            cache: Mutex::new(None),
        })
    }

    fn signed_assertion(&self) -> Result<String, SheetsError> {
        let now = chrono::Utc::now().timestamp();
        let claims = AssertionClaims {
            iss: &self.key.client_email,
            scope: SHEETS_SCOPE,
            aud: &self.key.token_uri,
            iat: now,
            exp: now + ASSERTION_LIFETIME_SECS,
        };
        Ok(jsonwebtoken::encode(
            &Header::new(Algorithm::RS256),
            &claims,
            &self.encoding_key,
        )?)
    }

    async fn access_token(&self) -> Result<String, SheetsError> {
        let mut cache = self.cache.lock().await;
        if let Some(cached) = cache.as_ref() {
            if Instant::now() < cached.refresh_at {
                return Ok(cached.access_token.clone());
            }
        }

        let assertion = self.signed_assertion()?;
        let response = self
            .client
            .post(&self.key.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SheetsError::Status {
                service: "token endpoint",
                status: status.as_u16(),
                body,
            });
        }

        let token: TokenResponse = response.json().await?;
        let lifetime = Duration::from_secs(token.expires_in).saturating_sub(EXPIRY_MARGIN);
        tracing::debug!(
            client_email = %self.key.client_email,
            expires_in = token.expires_in,
            "obtained Sheets access token"
        );

        *cache = Some(CachedToken {
            access_token: token.access_token.clone(),
            refresh_at: Instant::now() + lifetime,
        });
        Ok(token.access_token)
    }
}

/// Source of bearer tokens for Sheets requests.
pub enum TokenProvider {
    /// A fixed token, e.g. from `gcloud auth print-access-token` or tests.
    Static(String),
    ServiceAccount(ServiceAccountTokens),
}

impl TokenProvider {
    /// Loads a service-account provider from a key file.
    ///
    /// # Errors
    ///
    /// Propagates key-file read, parse, and PEM errors.
    pub fn from_key_file(path: &Path, timeout_secs: u64) -> Result<Self, SheetsError> {
        let key = ServiceAccountKey::from_file(path)?;
        Ok(Self::ServiceAccount(ServiceAccountTokens::new(
            key,
            timeout_secs,
        )?))
    }

    /// Returns a valid access token, fetching a fresh one if needed.
    ///
    /// # Errors
    ///
    /// Returns token-exchange failures for the service-account variant.
    pub async fn access_token(&self) -> Result<String, SheetsError> {
        match self {
            Self::Static(token) => Ok(token.clone()),
            Self::ServiceAccount(tokens) => tokens.access_token().await,
        }
    }
}
