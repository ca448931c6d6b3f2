use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use std::{error::Error as StdError, fmt};

// Errors returned by access-token verification + claim validation.
#[derive(Debug)]
pub enum AccessJwtError {
    Jwt(jsonwebtoken::errors::Error),
    MissingClaim(&'static str),
    EmptyClaim(&'static str),
}

impl fmt::Display for AccessJwtError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Jwt(e) => write!(f, "jwt verification failed: {}", e),
            Self::MissingClaim(name) => write!(f, "missing '{}' claim", name),
            Self::EmptyClaim(name) => write!(f, "empty '{}' claim", name),
        }
    }
}

impl StdError for AccessJwtError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Jwt(e) => Some(e),
            _ => None,
        }
    }
}

impl From<jsonwebtoken::errors::Error> for AccessJwtError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        Self::Jwt(e)
    }
}

/// Subject id as issued: either a string or a plain integer.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SubjectId {
    Text(String),
    Number(u64),
}

impl SubjectId {
    fn into_string(self) -> String {
        match self {
            Self::Text(s) => s,
            Self::Number(n) => n.to_string(),
        }
    }
}

/// Access token (JWT) claims.
///
/// NOTE:
/// - `exp`/`nbf` are checked by `Validation` on the raw payload, so they are not
///   carried here.
/// - `id` stays optional here so that its absence is reported as a claim error
///   instead of a generic JSON error.
#[derive(Debug, Clone, Deserialize)]
pub struct AccessTokenClaims {
    #[serde(default)]
    pub id: Option<SubjectId>,
}

/// What the gate gets back after a successful verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedAccessToken {
    pub user_id: String,
}

/// HMAC (HS256/HS384/HS512) access-token verifier.
///
/// - Key material is intentionally not printable via Debug.
#[derive(Clone)]
pub struct AuthService {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("AuthService")
            .field("validation", &self.validation)
            .finish()
    }
}

impl AuthService {
    pub fn new(secret: &[u8], leeway_seconds: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];
        validation.validate_nbf = true;
        // No audience is configured; an `aud` claim must not fail the token.
        validation.validate_aud = false;
        validation.leeway = leeway_seconds;

        Self {
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    // Verify and decode a JWT access token.
    pub fn verify(&self, token: &str) -> Result<AccessTokenClaims, jsonwebtoken::errors::Error> {
        let data =
            jsonwebtoken::decode::<AccessTokenClaims>(token, &self.decoding_key, &self.validation)?;

        Ok(data.claims)
    }

    /// Verify, then convert claims into the type the gate needs.
    ///
    /// `jsonwebtoken::Validation` already checks:
    /// - signature and algorithm family
    /// - `exp` (required) and `nbf` (when present)
    ///
    /// This method additionally requires a non-empty `id`.
    pub fn verify_verified(&self, token: &str) -> Result<VerifiedAccessToken, AccessJwtError> {
        let claims = self.verify(token)?;

        let user_id = claims
            .id
            .ok_or(AccessJwtError::MissingClaim("id"))?
            .into_string();
        if user_id.trim().is_empty() {
            return Err(AccessJwtError::EmptyClaim("id"));
        }

        Ok(VerifiedAccessToken { user_id })
    }
}

#[cfg(test)]
mod tests {
    use jsonwebtoken::errors::ErrorKind;
    use jsonwebtoken::{EncodingKey, Header, encode};
    use serde_json::{Value, json};

    use super::*;

    const SECRET: &[u8] = b"gaushala-test-secret";

    fn now() -> i64 {
        chrono::Utc::now().timestamp()
    }

    fn sign_with(alg: Algorithm, secret: &[u8], claims: &Value) -> String {
        encode(&Header::new(alg), claims, &EncodingKey::from_secret(secret)).unwrap()
    }

    fn sign(claims: &Value) -> String {
        sign_with(Algorithm::HS256, SECRET, claims)
    }

    fn jwt_kind(err: AccessJwtError) -> ErrorKind {
        match err {
            AccessJwtError::Jwt(e) => e.into_kind(),
            other => panic!("expected a jwt error, got {other:?}"),
        }
    }

    #[test]
    fn valid_token_yields_subject() {
        let service = AuthService::new(SECRET, 0);
        let token = sign(&json!({ "id": "u1", "exp": now() + 3600 }));

        let verified = service.verify_verified(&token).unwrap();
        assert_eq!(verified.user_id, "u1");
    }

    #[test]
    fn numeric_subject_is_stringified() {
        let service = AuthService::new(SECRET, 0);
        let token = sign(&json!({ "id": 42, "exp": now() + 3600 }));

        assert_eq!(service.verify_verified(&token).unwrap().user_id, "42");
    }

    #[test]
    fn other_hmac_algorithms_are_accepted() {
        let service = AuthService::new(SECRET, 0);
        for alg in [Algorithm::HS384, Algorithm::HS512] {
            let token = sign_with(alg, SECRET, &json!({ "id": "u1", "exp": now() + 60 }));
            assert_eq!(service.verify_verified(&token).unwrap().user_id, "u1");
        }
    }

    #[test]
    fn audience_claim_is_ignored() {
        let service = AuthService::new(SECRET, 0);
        let token = sign(&json!({ "id": "u1", "exp": now() + 600, "aud": "gaushala-frontend" }));

        assert_eq!(service.verify_verified(&token).unwrap().user_id, "u1");
    }

    #[test]
    fn verifying_twice_is_stable() {
        let service = AuthService::new(SECRET, 0);
        let token = sign(&json!({ "id": "u1", "exp": now() + 3600 }));
        let copy = token.clone();

        let first = service.verify_verified(&token).unwrap();
        let second = service.verify_verified(&token).unwrap();
        assert_eq!(first, second);
        assert_eq!(token, copy);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let service = AuthService::new(SECRET, 0);
        let token = sign_with(
            Algorithm::HS256,
            b"some-other-secret",
            &json!({ "id": "u1", "exp": now() + 3600 }),
        );

        let err = service.verify_verified(&token).unwrap_err();
        assert!(matches!(jwt_kind(err), ErrorKind::InvalidSignature));
    }

    #[test]
    fn expired_token_is_rejected() {
        let service = AuthService::new(SECRET, 0);
        let token = sign(&json!({ "id": "u1", "exp": now() - 3600 }));

        let err = service.verify_verified(&token).unwrap_err();
        assert!(matches!(jwt_kind(err), ErrorKind::ExpiredSignature));
    }

    #[test]
    fn leeway_tolerates_small_clock_skew() {
        let service = AuthService::new(SECRET, 120);
        let token = sign(&json!({ "id": "u1", "exp": now() - 30 }));

        assert!(service.verify_verified(&token).is_ok());
    }

    #[test]
    fn token_not_yet_valid_is_rejected() {
        let service = AuthService::new(SECRET, 0);
        let token = sign(&json!({ "id": "u1", "nbf": now() + 3600, "exp": now() + 7200 }));

        let err = service.verify_verified(&token).unwrap_err();
        assert!(matches!(jwt_kind(err), ErrorKind::ImmatureSignature));
    }

    #[test]
    fn token_without_exp_is_rejected() {
        let service = AuthService::new(SECRET, 0);
        let token = sign(&json!({ "id": "u1" }));

        assert!(matches!(
            service.verify_verified(&token),
            Err(AccessJwtError::Jwt(_))
        ));
    }

    #[test]
    fn missing_or_empty_subject_is_rejected() {
        let service = AuthService::new(SECRET, 0);

        let token = sign(&json!({ "exp": now() + 3600 }));
        assert!(matches!(
            service.verify_verified(&token),
            Err(AccessJwtError::MissingClaim("id"))
        ));

        let token = sign(&json!({ "id": "  ", "exp": now() + 3600 }));
        assert!(matches!(
            service.verify_verified(&token),
            Err(AccessJwtError::EmptyClaim("id"))
        ));
    }

    #[test]
    fn non_hmac_algorithm_is_rejected() {
        let service = AuthService::new(SECRET, 0);
        // header {"alg":"none","typ":"JWT"}, payload {"id":"u1","exp":9999999999}
        let token = "eyJhbGciOiJub25lIiwidHlwIjoiSldUIn0.eyJpZCI6InUxIiwiZXhwIjo5OTk5OTk5OTk5fQ.";

        assert!(matches!(
            service.verify_verified(token),
            Err(AccessJwtError::Jwt(_))
        ));
    }

    #[test]
    fn garbage_is_rejected() {
        let service = AuthService::new(SECRET, 0);
        assert!(matches!(
            service.verify_verified("not-a-jwt"),
            Err(AccessJwtError::Jwt(_))
        ));
    }

    #[test]
    fn debug_output_hides_key() {
        let service = AuthService::new(SECRET, 0);
        let printed = format!("{service:?}");
        assert!(!printed.contains("gaushala-test-secret"));
    }
}
