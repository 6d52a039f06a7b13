use super::model::{AuthenticatedUser, CustomClaims};
use crate::core::error::AppError;
use jsonwebtoken::{decode, decode_header, Algorithm, Validation};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use super::jwks::JwksClient;

pub struct JwtValidator {
    jwks_client: Arc<JwksClient>,
    issuer: String,
    audience: String,
    roles_claim: String,
    leeway: u64,
}

#[derive(Debug, Clone, Deserialize)]
struct Claims {
    sub: String,
    // Plain `roles` claim, used when the provider does not namespace custom claims
    #[serde(default)]
    roles: Option<Vec<String>>,
    #[serde(flatten)]
    extra: HashMap<String, serde_json::Value>,
}

impl Claims {
    /// Roles from the namespaced custom claim, falling back to a plain `roles` claim
    fn roles(&self, roles_claim: &str) -> Result<Vec<String>, AppError> {
        if let Some(value) = self.extra.get(roles_claim) {
            let custom: CustomClaims = serde_json::from_value(value.clone())
                .map_err(|e| AppError::Auth(format!("Malformed role claim: {}", e)))?;
            return Ok(custom.roles);
        }

        Ok(self.roles.clone().unwrap_or_default())
    }
}

impl JwtValidator {
    pub fn new(
        jwks_client: Arc<JwksClient>,
        issuer: String,
        audience: String,
        roles_claim: String,
        leeway: Duration,
    ) -> Self {
        Self {
            jwks_client,
            issuer,
            audience,
            roles_claim,
            leeway: leeway.as_secs(),
        }
    }

    pub async fn validate_token(&self, token: &str) -> Result<AuthenticatedUser, AppError> {
        let header = decode_header(token).map_err(|e| AppError::Auth(e.to_string()))?;

        if header.alg != Algorithm::RS256 {
            return Err(AppError::Auth(format!(
                "Unsupported algorithm: {:?}. Only RS256 is allowed",
                header.alg
            )));
        }

        let kid = header
            .kid
            .ok_or_else(|| AppError::Auth("Missing kid in token header".to_string()))?;

        let decoding_key = self
            .jwks_client
            .get_key(&kid)
            .await
            .map_err(|e| AppError::Auth(e.to_string()))?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[&self.audience]);
        validation.leeway = self.leeway;
        validation.validate_nbf = true;

        let token_data = decode::<Claims>(token, &decoding_key, &validation)
            .map_err(|e| AppError::Auth(e.to_string()))?;

        let claims = token_data.claims;
        let roles = claims.roles(&self.roles_claim)?;

        Ok(AuthenticatedUser {
            sub: claims.sub,
            roles,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NAMESPACE: &str = "https://institute.local/claims";

    #[test]
    fn test_roles_from_namespaced_claim() {
        let claims: Claims = serde_json::from_value(serde_json::json!({
            "sub": "u1",
            "iss": "https://issuer",
            NAMESPACE: { "roles": ["Supervisor"] }
        }))
        .unwrap();

        assert_eq!(claims.roles(NAMESPACE).unwrap(), vec!["Supervisor"]);
    }

    #[test]
    fn test_roles_fall_back_to_plain_claim() {
        let claims: Claims = serde_json::from_value(serde_json::json!({
            "sub": "u1",
            "roles": ["Company"]
        }))
        .unwrap();

        assert_eq!(claims.roles(NAMESPACE).unwrap(), vec!["Company"]);
    }

    #[test]
    fn test_missing_roles_is_empty() {
        let claims: Claims = serde_json::from_value(serde_json::json!({ "sub": "u1" })).unwrap();
        assert!(claims.roles(NAMESPACE).unwrap().is_empty());
    }

    #[test]
    fn test_malformed_namespaced_claim_is_rejected() {
        let claims: Claims = serde_json::from_value(serde_json::json!({
            "sub": "u1",
            NAMESPACE: { "roles": "Administrator" }
        }))
        .unwrap();

        assert!(matches!(claims.roles(NAMESPACE), Err(AppError::Auth(_))));
    }
}
