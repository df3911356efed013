// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Login token codec.
//!
//! Tokens are HS256 JWTs whose only claim is `timestamp`, the issuance time in
//! milliseconds since the Unix epoch. Expiry is computed from that claim; the
//! standard `exp`/`nbf`/`iss`/`aud` claims are neither written nor checked.

use std::collections::HashSet;

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::AuthError;

/// How long a token stays valid after issuance (24 hours).
pub const TOKEN_LIFETIME_MILLIS: i64 = 24 * 60 * 60 * 1000;

const ALGORITHM: Algorithm = Algorithm::HS256;

/// Signed token payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TokenClaims {
    /// Issuance time, milliseconds since epoch
    timestamp: i64,
}

/// Issues and verifies login tokens with a shared secret.
///
/// Built once at startup; safe to share across requests.
#[derive(Clone)]
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenCodec {
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(ALGORITHM);
        validation.required_spec_claims = HashSet::new();
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.leeway = 0;

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Sign a token issued at `now_millis`.
    pub fn issue(&self, now_millis: i64) -> Result<String, AuthError> {
        let claims = TokenClaims {
            timestamp: now_millis,
        };
        encode(&Header::new(ALGORITHM), &claims, &self.encoding)
            .map_err(|e| AuthError::SigningFailed(e.to_string()))
    }

    /// Verify a token at `now_millis` and return its issuance time.
    ///
    /// Any parse, algorithm, or signature failure is `MalformedToken`. A token
    /// exactly `TOKEN_LIFETIME_MILLIS` old is still accepted.
    pub fn verify(&self, token: &str, now_millis: i64) -> Result<i64, AuthError> {
        let data = decode::<TokenClaims>(token, &self.decoding, &self.validation).map_err(|e| {
            tracing::debug!(error = %e, "token rejected");
            AuthError::MalformedToken
        })?;

        let issued_at = data.claims.timestamp;
        if now_millis.saturating_sub(issued_at) > TOKEN_LIFETIME_MILLIS {
            return Err(AuthError::TokenExpired);
        }

        Ok(issued_at)
    }
}

/// Current wall-clock time in milliseconds since epoch.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};

    const T: i64 = 1_700_000_000_000;

    fn codec() -> TokenCodec {
        TokenCodec::new(b"test-secret")
    }

    #[test]
    fn issued_token_verifies_and_returns_timestamp() {
        let codec = codec();
        let token = codec.issue(T).unwrap();
        assert_eq!(codec.verify(&token, T), Ok(T));
    }

    #[test]
    fn token_from_other_secret_is_malformed() {
        let token = TokenCodec::new(b"secret-one").issue(T).unwrap();
        let result = TokenCodec::new(b"secret-two").verify(&token, T);
        assert_eq!(result, Err(AuthError::MalformedToken));
    }

    #[test]
    fn expiry_boundary_is_inclusive() {
        let codec = codec();
        let token = codec.issue(T).unwrap();

        assert_eq!(codec.verify(&token, T + TOKEN_LIFETIME_MILLIS), Ok(T));
        assert_eq!(
            codec.verify(&token, T + TOKEN_LIFETIME_MILLIS + 1),
            Err(AuthError::TokenExpired)
        );
    }

    #[test]
    fn lifetime_is_one_day() {
        assert_eq!(TOKEN_LIFETIME_MILLIS, 86_400_000);
    }

    #[test]
    fn token_from_the_future_is_accepted() {
        let codec = codec();
        let token = codec.issue(T + 60_000).unwrap();
        assert_eq!(codec.verify(&token, T), Ok(T + 60_000));
    }

    #[test]
    fn tampered_payload_is_malformed() {
        let codec = codec();
        let token = codec.issue(T).unwrap();
        let parts: Vec<&str> = token.split('.').collect();
        assert_eq!(parts.len(), 3);

        let forged = URL_SAFE_NO_PAD.encode(format!(r#"{{"timestamp":{}}}"#, T + 1));
        let tampered = format!("{}.{}.{}", parts[0], forged, parts[2]);

        assert_eq!(codec.verify(&tampered, T), Err(AuthError::MalformedToken));
    }

    #[test]
    fn unsigned_token_is_malformed() {
        let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"none","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(format!(r#"{{"timestamp":{T}}}"#));

        let codec = codec();
        assert_eq!(
            codec.verify(&format!("{header}.{payload}."), T),
            Err(AuthError::MalformedToken)
        );
        assert_eq!(
            codec.verify(&format!("{header}.{payload}"), T),
            Err(AuthError::MalformedToken)
        );
    }

    #[test]
    fn other_hmac_algorithm_is_malformed() {
        let token = encode(
            &Header::new(Algorithm::HS512),
            &TokenClaims { timestamp: T },
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        assert_eq!(codec().verify(&token, T), Err(AuthError::MalformedToken));
    }

    #[test]
    fn token_without_timestamp_is_malformed() {
        let token = encode(
            &Header::new(ALGORITHM),
            &serde_json::json!({ "sub": "someone" }),
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        assert_eq!(codec().verify(&token, T), Err(AuthError::MalformedToken));
    }

    #[test]
    fn garbage_is_malformed() {
        assert_eq!(codec().verify("", T), Err(AuthError::MalformedToken));
        assert_eq!(codec().verify("not.a.jwt", T), Err(AuthError::MalformedToken));
    }

    #[test]
    fn now_millis_is_after_2020() {
        assert!(now_millis() > 1_577_836_800_000);
    }
}
