//! Session-token claims decoding.
//!
//! The backend's `/authorize` endpoint returns a compact signed token
//! (`header.payload.signature`). Only the payload segment is read here, to
//! discover which organizations the key is entitled to; the signature is
//! never verified locally. Authorization is enforced server-side by the
//! bearer token itself, so the trust boundary is TLS plus the issuing API,
//! and local verification would only risk rejecting tokens the backend
//! accepts.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use serde::Deserialize;

use dnw_core::{DnwError, DnwResult};

/// Decoded claims payload of a session token
#[derive(Debug, Clone, Deserialize)]
pub struct TokenClaims {
    #[serde(default)]
    pub app_metadata: AppMetadata,
}

/// Application metadata carried in the claims
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppMetadata {
    /// Organization id -> opaque metadata, in backend iteration order
    #[serde(default)]
    pub organizations: serde_json::Map<String, serde_json::Value>,
}

impl TokenClaims {
    /// Decode the claims segment of a compact token.
    ///
    /// Tolerates both missing and excess `=` padding on the payload segment:
    /// trailing pad characters are stripped before decoding, which accepts
    /// the same inputs as the original blanket-append-two-pads scheme.
    pub fn decode(token: &str) -> DnwResult<Self> {
        let payload = token
            .split('.')
            .nth(1)
            .ok_or_else(|| DnwError::protocol("Session token has no claims segment"))?;

        let bytes = URL_SAFE_NO_PAD
            .decode(payload.trim_end_matches('='))
            .map_err(|e| DnwError::protocol(format!("Claims segment is not base64url: {}", e)))?;

        serde_json::from_slice(&bytes)
            .map_err(|e| DnwError::protocol(format!("Claims payload is not valid JSON: {}", e)))
    }

    /// First organization id in the claims, in backend iteration order.
    ///
    /// Used as the default when the caller does not supply one. The backend
    /// does not guarantee a stable order across calls.
    pub fn default_organization(&self) -> Option<&str> {
        self.app_metadata
            .organizations
            .keys()
            .next()
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::URL_SAFE;

    fn token_with_payload(payload_json: &str) -> String {
        format!("header.{}.signature", URL_SAFE_NO_PAD.encode(payload_json))
    }

    #[test]
    fn test_decode_round_trip() {
        let json = r#"{"app_metadata":{"organizations":{"org-42":{},"org-7":{}}}}"#;
        let claims = TokenClaims::decode(&token_with_payload(json)).unwrap();
        assert_eq!(claims.app_metadata.organizations.len(), 2);
        assert!(claims.app_metadata.organizations.contains_key("org-42"));
        assert!(claims.app_metadata.organizations.contains_key("org-7"));
    }

    #[test]
    fn test_decode_tolerates_canonical_padding() {
        // Same payload, canonically padded instead of pad-stripped.
        let json = r#"{"app_metadata":{"organizations":{"org-1":{}}}}"#;
        let token = format!("header.{}.signature", URL_SAFE.encode(json));
        let claims = TokenClaims::decode(&token).unwrap();
        assert_eq!(claims.default_organization(), Some("org-1"));
    }

    #[test]
    fn test_decode_tolerates_over_padding() {
        // The original client blindly appends two pad characters; a payload
        // that already carried padding ends up over-padded.
        let json = r#"{"app_metadata":{"organizations":{"org-1":{}}}}"#;
        let token = format!("header.{}==.signature", URL_SAFE.encode(json));
        let claims = TokenClaims::decode(&token).unwrap();
        assert_eq!(claims.default_organization(), Some("org-1"));
    }

    #[test]
    fn test_default_organization_is_first_key_in_wire_order() {
        // "org-42" precedes "org-7" on the wire even though "org-7" sorts
        // first lexicographically; wire order must win.
        let json = r#"{"app_metadata":{"organizations":{"org-42":{},"org-7":{}}}}"#;
        let claims = TokenClaims::decode(&token_with_payload(json)).unwrap();
        assert_eq!(claims.default_organization(), Some("org-42"));
    }

    #[test]
    fn test_default_organization_empty_mapping() {
        let claims =
            TokenClaims::decode(&token_with_payload(r#"{"app_metadata":{"organizations":{}}}"#))
                .unwrap();
        assert_eq!(claims.default_organization(), None);

        // Claims without app_metadata at all decode to an empty mapping.
        let claims = TokenClaims::decode(&token_with_payload(r#"{"sub":"user-1"}"#)).unwrap();
        assert_eq!(claims.default_organization(), None);
    }

    #[test]
    fn test_decode_rejects_malformed_tokens() {
        assert!(matches!(
            TokenClaims::decode("not-a-compact-token"),
            Err(DnwError::Protocol(_))
        ));
        assert!(matches!(
            TokenClaims::decode("header.!!!not-base64!!!.signature"),
            Err(DnwError::Protocol(_))
        ));

        let not_json = format!("header.{}.signature", URL_SAFE_NO_PAD.encode("plain text"));
        assert!(matches!(
            TokenClaims::decode(&not_json),
            Err(DnwError::Protocol(_))
        ));
    }
}
