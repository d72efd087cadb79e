//! Best-effort inspection of access tokens.
//!
//! The backend issues opaque bearer tokens that are, in practice, JWTs. The
//! client never relies on this: expiry is detected from the server's 401
//! response. Decoding is only used for `opsctl auth status`.

use base64::Engine as _;
use chrono::{DateTime, Utc};

use crate::error::AuthError;

/// Decode the JWT `exp` claim without verifying the signature.
///
/// # Errors
///
/// Returns `AuthError::MalformedToken` if the token is not a three-part JWT, the
/// payload is not base64url JSON, or `exp` is missing or out of range.
pub fn decode_expiry(jwt: &str) -> Result<DateTime<Utc>, AuthError> {
    let mut segments = jwt.split('.');
    let (Some(_), Some(payload), Some(_), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(malformed("expected header.payload.signature"));
    };

    let claims: serde_json::Value = base64url()
        .decode(payload)
        .map_err(|e| malformed(format!("payload is not base64url: {e}")))
        .and_then(|bytes| {
            serde_json::from_slice(&bytes)
                .map_err(|e| malformed(format!("payload is not JSON: {e}")))
        })?;

    let exp = claims
        .get("exp")
        .and_then(serde_json::Value::as_i64)
        .ok_or_else(|| malformed("no numeric exp claim"))?;
    DateTime::from_timestamp(exp, 0).ok_or_else(|| malformed("exp out of range"))
}

/// `Some(true)` once a decodable token is past `exp`; `None` for opaque tokens.
#[must_use]
pub fn is_expired(token: &str) -> Option<bool> {
    decode_expiry(token).ok().map(|exp| exp <= Utc::now())
}

const fn base64url() -> base64::engine::GeneralPurpose {
    base64::engine::general_purpose::URL_SAFE_NO_PAD
}

fn malformed(reason: impl Into<String>) -> AuthError {
    AuthError::MalformedToken(reason.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn jwt(claims: &str) -> String {
        let encode = |text: &str| base64url().encode(text);
        format!(
            "{}.{}.{}",
            encode(r#"{"alg":"RS256","typ":"JWT"}"#),
            encode(claims),
            encode("signature")
        )
    }

    #[test]
    fn reads_exp_claim() {
        let exp = Utc::now().timestamp() + 900;
        let token = jwt(&format!(r#"{{"sub":"user_01","exp":{exp}}}"#));
        assert_eq!(decode_expiry(&token).expect("decodes").timestamp(), exp);
        assert_eq!(is_expired(&token), Some(false));
    }

    #[test]
    fn past_exp_is_expired() {
        let exp = Utc::now().timestamp() - 60;
        assert_eq!(is_expired(&jwt(&format!(r#"{{"exp":{exp}}}"#))), Some(true));
    }

    #[test]
    fn opaque_tokens_have_no_expiry() {
        assert_eq!(is_expired("sess_4f2a9c"), None);
        assert!(matches!(
            decode_expiry("a.b"),
            Err(AuthError::MalformedToken(reason)) if reason.contains("header.payload.signature")
        ));
        assert!(decode_expiry("a.b.c.d").is_err());
    }

    #[test]
    fn missing_or_string_exp_is_rejected() {
        for claims in [r#"{"sub":"user_01"}"#, r#"{"exp":"1700000000"}"#] {
            let err = decode_expiry(&jwt(claims)).unwrap_err();
            assert!(err.to_string().contains("no numeric exp claim"), "{err}");
        }
    }

    #[test]
    fn non_base64_payload_is_rejected() {
        let err = decode_expiry("x.%%%.y").unwrap_err();
        assert!(err.to_string().contains("not base64url"));
    }
}
