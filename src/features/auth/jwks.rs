use jsonwebtoken::DecodingKey;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

#[derive(Debug, Clone, Deserialize)]
struct DiscoveryDocument {
    jwks_uri: String,
}

#[derive(Debug, Clone, Deserialize)]
struct JwksResponse {
    keys: Vec<Jwk>,
}

#[derive(Debug, Clone, Deserialize)]
struct Jwk {
    kid: Option<String>,
    kty: String,
    #[serde(default)]
    n: Option<String>,
    #[serde(default)]
    e: Option<String>,
}

struct JwksCache {
    keys: HashMap<String, DecodingKey>,
    last_fetched: Instant,
}

/// Fetches and caches the signing keys of the OIDC issuer.
///
/// The JWKS location comes from the issuer's discovery document; the
/// resolved URI is remembered for the lifetime of the client.
pub struct JwksClient {
    issuer_url: String,
    client: reqwest::Client,
    jwks_uri: RwLock<Option<String>>,
    cache: RwLock<Option<JwksCache>>,
    cache_ttl: Duration,
}

impl JwksClient {
    pub fn new(issuer_url: &str, cache_ttl: Duration) -> Self {
        Self {
            issuer_url: issuer_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
            jwks_uri: RwLock::new(None),
            cache: RwLock::new(None),
            cache_ttl,
        }
    }

    pub async fn get_key(&self, kid: &str) -> Result<DecodingKey, JwksError> {
        {
            let cache = self.cache.read().await;
            if let Some(ref cached) = *cache {
                if cached.last_fetched.elapsed() < self.cache_ttl {
                    if let Some(key) = cached.keys.get(kid) {
                        return Ok(key.clone());
                    }
                }
            }
        }

        // Cache miss or expired (also covers key rotation)
        self.fetch_jwks().await?;

        let cache = self.cache.read().await;
        cache
            .as_ref()
            .and_then(|cached| cached.keys.get(kid).cloned())
            .ok_or_else(|| JwksError::KeyNotFound(kid.to_string()))
    }

    async fn jwks_uri(&self) -> Result<String, JwksError> {
        if let Some(uri) = self.jwks_uri.read().await.clone() {
            return Ok(uri);
        }

        let discovery_url = format!("{}/.well-known/openid-configuration", self.issuer_url);
        let response = self
            .client
            .get(&discovery_url)
            .send()
            .await
            .map_err(|e| JwksError::FetchError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(JwksError::FetchError(format!(
                "Failed to fetch discovery document: HTTP {}",
                response.status()
            )));
        }

        let document: DiscoveryDocument = response
            .json()
            .await
            .map_err(|e| JwksError::ParseError(e.to_string()))?;

        tracing::info!("Resolved JWKS endpoint: {}", document.jwks_uri);
        *self.jwks_uri.write().await = Some(document.jwks_uri.clone());
        Ok(document.jwks_uri)
    }

    async fn fetch_jwks(&self) -> Result<(), JwksError> {
        let jwks_url = self.jwks_uri().await?;

        let response = self
            .client
            .get(&jwks_url)
            .send()
            .await
            .map_err(|e| JwksError::FetchError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(JwksError::FetchError(format!(
                "Failed to fetch JWKS: HTTP {}",
                response.status()
            )));
        }

        let jwks: JwksResponse = response
            .json()
            .await
            .map_err(|e| JwksError::ParseError(e.to_string()))?;

        let keys = decode_rsa_keys(jwks)?;
        tracing::debug!("Loaded {} signing keys", keys.len());

        let mut cache = self.cache.write().await;
        *cache = Some(JwksCache {
            keys,
            last_fetched: Instant::now(),
        });

        Ok(())
    }
}

/// RSA keys with a `kid`; other key types are skipped
fn decode_rsa_keys(jwks: JwksResponse) -> Result<HashMap<String, DecodingKey>, JwksError> {
    let mut keys = HashMap::new();

    for jwk in jwks.keys {
        if jwk.kty != "RSA" {
            continue;
        }
        let (Some(kid), Some(n), Some(e)) = (jwk.kid, jwk.n, jwk.e) else {
            continue;
        };
        let decoding_key = DecodingKey::from_rsa_components(&n, &e)
            .map_err(|e| JwksError::KeyConversionError(e.to_string()))?;
        keys.insert(kid, decoding_key);
    }

    Ok(keys)
}

#[derive(Debug, thiserror::Error)]
pub enum JwksError {
    #[error("Failed to fetch JWKS: {0}")]
    FetchError(String),

    #[error("Failed to parse JWKS: {0}")]
    ParseError(String),

    #[error("Key not found: {0}")]
    KeyNotFound(String),

    #[error("Failed to convert key: {0}")]
    KeyConversionError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_rsa_and_anonymous_keys_are_skipped() {
        let jwks: JwksResponse = serde_json::from_value(serde_json::json!({
            "keys": [
                { "kty": "EC", "kid": "ec-key", "crv": "P-256", "x": "a", "y": "b" },
                { "kty": "RSA", "n": "AQAB", "e": "AQAB" }
            ]
        }))
        .unwrap();

        let keys = decode_rsa_keys(jwks).unwrap();
        assert!(keys.is_empty());
    }
}
