//! Access token decoding
//!
//! The backend issues HS256 JWTs carrying the user id and login. With a
//! configured secret the signature is verified; otherwise the claims are
//! only read.

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
struct Claims {
    #[serde(default)]
    id: Option<serde_json::Value>,
    #[serde(default)]
    sub: Option<serde_json::Value>,
    #[serde(default)]
    login: Option<String>,
}

/// User identity read from an access token
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenUser {
    pub id: Option<String>,
    pub login: Option<String>,
}

fn claim_to_string(value: Option<serde_json::Value>) -> Option<String> {
    match value? {
        serde_json::Value::String(s) if !s.is_empty() => Some(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn validation(verify_signature: bool) -> Validation {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();
    if !verify_signature {
        validation.insecure_disable_signature_validation();
    }
    validation
}

/// Decode `token`; any failure yields an empty [`TokenUser`]
pub fn decode_token(token: &str, secret: Option<&str>) -> TokenUser {
    let result = match secret {
        Some(secret) => decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &validation(true),
        ),
        None => decode::<Claims>(token, &DecodingKey::from_secret(&[]), &validation(false)),
    };

    match result {
        Ok(data) => {
            let claims = data.claims;
            TokenUser {
                id: claim_to_string(claims.id).or_else(|| claim_to_string(claims.sub)),
                login: claims.login,
            }
        }
        Err(e) => {
            tracing::warn!("Failed to decode access token: {}", e);
            TokenUser::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde_json::json;

    fn token(claims: serde_json::Value, secret: &str) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn future_exp() -> i64 {
        chrono::Utc::now().timestamp() + 3600
    }

    #[test]
    fn test_decode_with_secret() {
        let raw = token(json!({"id": "u1", "login": "anna", "exp": future_exp()}), "s3cret");
        let user = decode_token(&raw, Some("s3cret"));

        assert_eq!(user.id.as_deref(), Some("u1"));
        assert_eq!(user.login.as_deref(), Some("anna"));
    }

    #[test]
    fn test_wrong_secret_yields_nothing() {
        let raw = token(json!({"id": "u1", "exp": future_exp()}), "s3cret");
        assert_eq!(decode_token(&raw, Some("other")), TokenUser::default());
    }

    #[test]
    fn test_unverified_decode_numeric_id_and_no_exp() {
        let raw = token(json!({"id": 42, "login": "bob"}), "whatever");
        let user = decode_token(&raw, None);

        assert_eq!(user.id.as_deref(), Some("42"));
        assert_eq!(user.login.as_deref(), Some("bob"));
    }

    #[test]
    fn test_sub_fallback() {
        let raw = token(json!({"sub": "u9"}), "k");
        assert_eq!(decode_token(&raw, None).id.as_deref(), Some("u9"));
    }

    #[test]
    fn test_expired_token_rejected() {
        let raw = token(json!({"id": "u1", "exp": 1_000_000}), "k");
        assert_eq!(decode_token(&raw, None), TokenUser::default());
    }

    #[test]
    fn test_garbage_token() {
        assert_eq!(decode_token("not-a-jwt", None), TokenUser::default());
    }
}
