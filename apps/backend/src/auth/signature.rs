//! HMAC-SHA256 signing over the `header.payload` signing input.

use hmac::digest::InvalidLength;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use super::base64url;

type HmacSha256 = Hmac<Sha256>;

/// A keyed MAC, built once from the process secret and cloned per call.
#[derive(Clone)]
pub struct Signer {
    mac: HmacSha256,
}

impl Signer {
    pub fn new(secret: &[u8]) -> Result<Self, InvalidLength> {
        let mac = <HmacSha256 as Mac>::new_from_slice(secret)?;
        Ok(Self { mac })
    }

    /// Base64url (unpadded) MAC of `message`.
    pub fn sign(&self, message: &[u8]) -> String {
        let mut mac = self.mac.clone();
        mac.update(message);
        base64url::encode(mac.finalize().into_bytes())
    }

    /// Compare the presented encoded signature against the recomputed one.
    ///
    /// The comparison runs in time independent of where the strings differ.
    /// A length mismatch returns early; length is not secret.
    pub fn verify(&self, message: &[u8], encoded_signature: &str) -> bool {
        let expected = self.sign(message);
        expected.as_bytes().ct_eq(encoded_signature.as_bytes()).into()
    }
}

impl std::fmt::Debug for Signer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signer").finish_non_exhaustive()
    }
}
