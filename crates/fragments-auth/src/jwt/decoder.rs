//! JWT token validation.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use fragments_core::config::AuthConfig;
use fragments_core::error::AppError;

use super::claims::Claims;

/// Validates bearer tokens: HS256 signature, issuer, and expiry within the
/// configured leeway.
#[derive(Clone)]
pub struct JwtDecoder {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = config.leeway_seconds;
        validation.set_issuer(&[config.jwt_issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Decodes and validates a token string.
    pub fn decode(&self, token: &str) -> Result<Claims, AppError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        AppError::authentication("Token has expired")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                        AppError::authentication("Invalid token signature")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidIssuer => {
                        AppError::authentication("Invalid token issuer")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidAlgorithm => {
                        AppError::authentication("Unexpected signing method")
                    }
                    _ => AppError::authentication("Invalid token"),
                }
            })?;

        let claims = token_data.claims;
        if claims.sub != claims.user_id.to_string() {
            return Err(AppError::authentication("Invalid token subject"));
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use fragments_core::error::ErrorKind;

    use super::*;
    use crate::jwt::encoder::JwtEncoder;

    fn config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "an-unguessable-secret-of-32-chars!!".to_string(),
            ..AuthConfig::default()
        }
    }

    #[test]
    fn issued_token_round_trips() {
        let config = config();
        let user_id = Uuid::new_v4();
        let issued = JwtEncoder::new(&config).issue(user_id, "alice").unwrap();

        let claims = JwtDecoder::new(&config).decode(&issued.token).unwrap();
        assert_eq!(claims.user_id, user_id);
        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.iss, "fragments-api");
        assert_eq!(claims.exp - claims.iat, 24 * 3600);
    }

    #[test]
    fn expiry_within_leeway_is_accepted() {
        let config = config();
        let encoder = JwtEncoder::new(&config);
        let mut claims = encoder.claims_for(Uuid::new_v4(), "alice");
        claims.exp = Utc::now().timestamp() - 120;
        let token = encoder.sign(&claims).unwrap();

        assert!(JwtDecoder::new(&config).decode(&token).is_ok());
    }

    #[test]
    fn expiry_beyond_leeway_is_rejected() {
        let config = config();
        let encoder = JwtEncoder::new(&config);
        let mut claims = encoder.claims_for(Uuid::new_v4(), "alice");
        claims.exp = Utc::now().timestamp() - 600;
        let token = encoder.sign(&claims).unwrap();

        let err = JwtDecoder::new(&config).decode(&token).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
        assert_eq!(err.message, "Token has expired");
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let issued = JwtEncoder::new(&config())
            .issue(Uuid::new_v4(), "alice")
            .unwrap();
        let other = AuthConfig {
            jwt_secret: "a-completely-different-secret-value".to_string(),
            ..AuthConfig::default()
        };

        let err = JwtDecoder::new(&other).decode(&issued.token).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
    }

    #[test]
    fn foreign_issuer_is_rejected() {
        let config = config();
        let encoder = JwtEncoder::new(&config);
        let mut claims = encoder.claims_for(Uuid::new_v4(), "alice");
        claims.iss = "someone-else".to_string();
        let token = encoder.sign(&claims).unwrap();

        assert!(JwtDecoder::new(&config).decode(&token).is_err());
    }

    #[test]
    fn mismatched_subject_is_rejected() {
        let config = config();
        let encoder = JwtEncoder::new(&config);
        let mut claims = encoder.claims_for(Uuid::new_v4(), "alice");
        claims.sub = Uuid::new_v4().to_string();
        let token = encoder.sign(&claims).unwrap();

        let err = JwtDecoder::new(&config).decode(&token).unwrap_err();
        assert_eq!(err.message, "Invalid token subject");
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(JwtDecoder::new(&config()).decode("not.a.token").is_err());
    }
}
