//! HMAC-SHA256 request signing for the Siggy API.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Authorization scheme prefix expected by the Siggy API.
pub const SIGGY_AUTH_SCHEME: &str = "siggy-HMAC-SHA256";

/// Fields covered by a request signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignedRequest<'a> {
    pub verb: &'a str,
    pub path: &'a str,
    pub timestamp: &'a str,
    pub content_type: &'a str,
    pub content_hash: &'a str,
}

impl<'a> SignedRequest<'a> {
    /// A body-less request (empty content type and hash).
    pub fn bodyless(verb: &'a str, path: &'a str, timestamp: &'a str) -> Self {
        Self {
            verb,
            path,
            timestamp,
            content_type: "",
            content_hash: "",
        }
    }

    /// Newline-joined string the signature is computed over.
    pub fn canonical_string(&self) -> String {
        [
            self.verb,
            self.path,
            self.timestamp,
            self.content_type,
            self.content_hash,
        ]
        .join("\n")
    }
}

/// Sign `request` with `secret`, returning the base64 (standard alphabet)
/// encoded HMAC-SHA256 digest.
pub fn sign_request(secret: &[u8], request: &SignedRequest<'_>) -> String {
    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC accepts any key size");
    mac.update(request.canonical_string().as_bytes());
    STANDARD.encode(mac.finalize().into_bytes())
}

/// Value for the `Authorization` header.
pub fn authorization_header(key_id: &str, signature: &str) -> String {
    format!("{SIGGY_AUTH_SCHEME} Credential={key_id}:{signature}")
}
