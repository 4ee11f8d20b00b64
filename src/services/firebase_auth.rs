// ==================== FIREBASE ID TOKEN VERIFICATION ====================
// Verifies Firebase Authentication ID tokens against Google's published
// signing keys. Keys are cached until the Cache-Control max-age runs out.

use crate::config::ConfigError;
use crate::models::AuthenticatedUser;
use async_trait::async_trait;
use base64::Engine;
use jsonwebtoken::jwk::JwkSet;
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

const GOOGLE_JWKS_URL: &str =
    "https://www.googleapis.com/service_accounts/v1/jwk/securetoken@system.gserviceaccount.com";
const ISSUER_PREFIX: &str = "https://securetoken.google.com/";
const DEFAULT_KEYS_TTL: Duration = Duration::from_secs(3600);

/// Turns a bearer token into a verified identity.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Result<AuthenticatedUser, String>;
}

/// The parts of a service-account credential the verifier needs.
#[derive(Debug, Deserialize)]
pub struct ServiceAccount {
    pub project_id: String,
    #[serde(default)]
    pub client_email: Option<String>,
}

impl ServiceAccount {
    /// Decodes the base64 JSON blob stored in FB_SERVICE_KEY.
    pub fn from_base64(encoded: &str) -> Result<Self, ConfigError> {
        let invalid = |reason: String| ConfigError::Invalid {
            key: "FB_SERVICE_KEY",
            reason,
        };

        let bytes = base64::engine::general_purpose::STANDARD
            .decode(encoded.trim())
            .map_err(|e| invalid(format!("not base64: {}", e)))?;

        let account: ServiceAccount = serde_json::from_slice(&bytes)
            .map_err(|e| invalid(format!("not a service account: {}", e)))?;

        if account.project_id.trim().is_empty() {
            return Err(invalid("project_id is empty".to_string()));
        }

        Ok(account)
    }
}

#[derive(Debug, Deserialize)]
struct FirebaseClaims {
    sub: String,
    #[serde(default)]
    email: Option<String>,
}

struct CachedKeys {
    keys: JwkSet,
    expires_at: Instant,
}

pub struct FirebaseVerifier {
    project_id: String,
    issuer: String,
    http: reqwest::Client,
    keys: RwLock<Option<CachedKeys>>,
}

impl FirebaseVerifier {
    pub fn new(account: &ServiceAccount) -> Self {
        Self {
            project_id: account.project_id.clone(),
            issuer: format!("{}{}", ISSUER_PREFIX, account.project_id),
            http: reqwest::Client::new(),
            keys: RwLock::new(None),
        }
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    #[cfg(test)]
    fn with_keys(project_id: &str, keys: JwkSet) -> Self {
        let verifier = Self::new(&ServiceAccount {
            project_id: project_id.to_string(),
            client_email: None,
        });
        *verifier.keys.try_write().expect("fresh lock") = Some(CachedKeys {
            keys,
            expires_at: Instant::now() + DEFAULT_KEYS_TTL,
        });
        verifier
    }

    async fn signing_key(&self, kid: &str) -> Result<DecodingKey, String> {
        {
            let cached = self.keys.read().await;
            if let Some(cached) = (*cached).as_ref().filter(|c| c.expires_at > Instant::now()) {
                return key_for(&cached.keys, kid);
            }
        }

        let mut cached = self.keys.write().await;
        // Another request may have refreshed while we waited for the lock
        if let Some(fresh) = (*cached).as_ref().filter(|c| c.expires_at > Instant::now()) {
            return key_for(&fresh.keys, kid);
        }

        let refreshed = self.fetch_keys().await?;
        let key = key_for(&refreshed.keys, kid);
        *cached = Some(refreshed);
        key
    }

    async fn fetch_keys(&self) -> Result<CachedKeys, String> {
        log::debug!("🔑 Fetching Firebase signing keys");

        let response = self
            .http
            .get(GOOGLE_JWKS_URL)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| format!("Failed to fetch signing keys: {}", e))?;

        if !response.status().is_success() {
            return Err(format!("Signing key endpoint error: {}", response.status()));
        }

        let ttl = response
            .headers()
            .get(reqwest::header::CACHE_CONTROL)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_max_age)
            .unwrap_or(DEFAULT_KEYS_TTL);

        let keys: JwkSet = response
            .json()
            .await
            .map_err(|e| format!("Failed to parse signing keys: {}", e))?;

        log::debug!("🔑 Cached {} signing keys for {:?}", keys.keys.len(), ttl);

        Ok(CachedKeys {
            keys,
            expires_at: Instant::now() + ttl,
        })
    }
}

fn key_for(keys: &JwkSet, kid: &str) -> Result<DecodingKey, String> {
    let jwk = keys
        .find(kid)
        .ok_or_else(|| format!("Unknown signing key: {}", kid))?;
    DecodingKey::from_jwk(jwk).map_err(|e| format!("Unusable signing key: {}", e))
}

fn parse_max_age(cache_control: &str) -> Option<Duration> {
    cache_control
        .split(',')
        .filter_map(|directive| directive.trim().strip_prefix("max-age="))
        .find_map(|secs| secs.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
}

#[async_trait]
impl TokenVerifier for FirebaseVerifier {
    async fn verify(&self, token: &str) -> Result<AuthenticatedUser, String> {
        let header = decode_header(token).map_err(|e| format!("Invalid token: {}", e))?;

        if header.alg != Algorithm::RS256 {
            return Err(format!("Invalid token algorithm: {:?}", header.alg));
        }
        let kid = header.kid.ok_or("Token has no key id")?;

        let key = self.signing_key(&kid).await?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[&self.project_id]);
        validation.set_issuer(&[&self.issuer]);
        validation.set_required_spec_claims(&["exp", "aud", "iss", "sub"]);

        let claims = decode::<FirebaseClaims>(token, &key, &validation)
            .map(|data| data.claims)
            .map_err(|e| format!("Invalid token: {}", e))?;

        if claims.sub.is_empty() {
            return Err("Token has an empty subject".to_string());
        }
        let email = claims.email.ok_or("Token has no email claim")?;

        Ok(AuthenticatedUser {
            uid: claims.sub,
            email,
        })
    }
}
