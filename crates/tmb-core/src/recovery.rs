//! Recovery tokens: a reversible, URL-safe encoding of a [`MailSession`].
//!
//! A token is the base64url form of `{"email":..,"password":..,"token":..}`.
//! It is not encrypted and never expires; whoever holds it holds the inbox.
//! The key names and padded alphabet are fixed so that tokens handed out
//! earlier keep decoding.

use base64::{
    alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
    Engine as _,
};
use serde_json::{json, Map, Value};

use crate::domain::{is_mailbox_address, MailSession};

const KEY_ADDRESS: &str = "email";
const KEY_PASSWORD: &str = "password";
const KEY_AUTH_TOKEN: &str = "token";

/// Padded on encode, lenient on decode (users sometimes lose the trailing `=`
/// when copying).
const TOKEN_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(true)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    /// Not base64url, not UTF-8 JSON, not an object, or an address without
    /// the `mailbox@domain` shape.
    #[error("malformed token: {0}")]
    MalformedToken(String),

    /// Decodable, but a required key is absent, not a string, or empty.
    #[error("missing field: {0}")]
    MissingField(&'static str),
}

/// Encode a session into a recovery token. Deterministic.
pub fn encode(session: &MailSession) -> String {
    let payload = json!({
        KEY_ADDRESS: session.address,
        KEY_PASSWORD: session.password,
        KEY_AUTH_TOKEN: session.auth_token,
    });
    TOKEN_ENGINE.encode(payload.to_string())
}

/// Decode a recovery token back into a session.
///
/// Required-field validation happens here and only here. Never panics; every
/// failure is a [`TokenError`].
pub fn decode(token: &str) -> Result<MailSession, TokenError> {
    let raw = TOKEN_ENGINE
        .decode(token.trim())
        .map_err(|e| TokenError::MalformedToken(format!("not base64url: {e}")))?;

    let value: Value = serde_json::from_slice(&raw)
        .map_err(|e| TokenError::MalformedToken(format!("not json: {e}")))?;

    let Value::Object(obj) = value else {
        return Err(TokenError::MalformedToken(
            "payload is not a json object".to_string(),
        ));
    };

    let address = required_str(&obj, KEY_ADDRESS)?;
    let password = required_str(&obj, KEY_PASSWORD)?;
    let auth_token = required_str(&obj, KEY_AUTH_TOKEN)?;

    if !is_mailbox_address(address) {
        return Err(TokenError::MalformedToken(
            "address is not of the form mailbox@domain".to_string(),
        ));
    }

    Ok(MailSession::new(address, password, auth_token))
}

fn required_str<'a>(obj: &'a Map<String, Value>, key: &'static str) -> Result<&'a str, TokenError> {
    obj.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .ok_or(TokenError::MissingField(key))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn b64(s: &str) -> String {
        TOKEN_ENGINE.encode(s)
    }

    #[test]
    fn round_trips_plain_session() {
        let s = MailSession::new("test@example.com", "pass", "jwt");
        assert_eq!(decode(&encode(&s)).unwrap(), s);
    }

    #[test]
    fn round_trips_unicode_punctuation_and_long_values() {
        let cases = [
            MailSession::new("ñandú+tag@dömain.example", "pä$$\"w\\ord'{}", "🔑.tok=en/+"),
            MailSession::new("a@b", "x", "y"),
            MailSession::new(
                format!("{}@example.com", "l".repeat(500)),
                "p".repeat(4096),
                "eyJhbGciOi".repeat(200),
            ),
        ];
        for s in cases {
            assert_eq!(decode(&encode(&s)).unwrap(), s);
        }
    }

    #[test]
    fn encoding_is_deterministic_and_url_safe() {
        let s = MailSession::new("q?>@example.com", "~~~~~~", "???>>>");
        let a = encode(&s);
        assert_eq!(a, encode(&s));
        assert!(a
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '='));
    }

    #[test]
    fn decodes_tokens_in_legacy_layout() {
        // Key order and spacing as produced by the first version of the bot.
        let legacy =
            b64(r#"{"email": "test@example.com", "password": "pass", "token": "jwt"}"#);
        let s = decode(&legacy).unwrap();
        assert_eq!(s, MailSession::new("test@example.com", "pass", "jwt"));
    }

    #[test]
    fn accepts_missing_padding_and_surrounding_whitespace() {
        // 55-byte payload: not a multiple of 3, so the token carries `==`.
        let s = MailSession::new("ab@example.com", "pwd", "t");
        let token = encode(&s);
        assert!(token.ends_with("=="));
        let unpadded = token.trim_end_matches('=');
        assert_ne!(unpadded, token);
        assert_eq!(decode(unpadded).unwrap(), s);
        assert_eq!(decode(&format!("  {token}\n")).unwrap(), s);
    }

    #[test]
    fn legacy_token_with_padding_stripped() {
        let legacy = "eyJlbWFpbCI6ICJ0ZXN0QGV4YW1wbGUuY29tIiwgInBhc3N3b3JkIjogInBhc3MiLCAidG9rZW4iOiAiand0In0=";
        let expected = MailSession::new("test@example.com", "pass", "jwt");
        assert_eq!(decode(legacy).unwrap(), expected);
        assert_eq!(decode(legacy.trim_end_matches('=')).unwrap(), expected);
    }

    #[test]
    fn ignores_unknown_keys() {
        let t = b64(r#"{"email":"a@b.c","password":"p","token":"t","extra":1}"#);
        assert_eq!(decode(&t).unwrap(), MailSession::new("a@b.c", "p", "t"));
    }

    #[test]
    fn garbage_is_malformed() {
        assert!(matches!(
            decode("not base64 or json"),
            Err(TokenError::MalformedToken(_))
        ));
        assert!(matches!(decode(""), Err(TokenError::MalformedToken(_))));
        assert!(matches!(
            decode(&b64("definitely not json")),
            Err(TokenError::MalformedToken(_))
        ));
        assert!(matches!(
            decode(&b64(r#"["email","password","token"]"#)),
            Err(TokenError::MalformedToken(_))
        ));
        assert!(matches!(
            decode(&TOKEN_ENGINE.encode([0xffu8, 0xfe, 0x00])),
            Err(TokenError::MalformedToken(_))
        ));
    }

    #[test]
    fn incomplete_payload_reports_missing_field() {
        assert_eq!(
            decode(&b64(r#"{"email":"a"}"#)),
            Err(TokenError::MissingField("password"))
        );
        assert_eq!(
            decode(&b64(r#"{"password":"p","token":"t"}"#)),
            Err(TokenError::MissingField("email"))
        );
        assert_eq!(
            decode(&b64(r#"{"email":"a@b.c","password":"p","token":""}"#)),
            Err(TokenError::MissingField("token"))
        );
        assert_eq!(
            decode(&b64(r#"{"email":"a@b.c","password":7,"token":"t"}"#)),
            Err(TokenError::MissingField("password"))
        );
    }

    #[test]
    fn address_without_domain_is_malformed() {
        let t = b64(r#"{"email":"nobody","password":"p","token":"t"}"#);
        assert!(matches!(decode(&t), Err(TokenError::MalformedToken(_))));
    }
}
