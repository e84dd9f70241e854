use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Compiled redaction patterns. Each is a vetted literal.
struct Patterns {
    email: Regex,
    access_token: Regex,
    opaque_run: Regex,
}

#[allow(clippy::unwrap_used)]
static PATTERNS: LazyLock<Patterns> = LazyLock::new(|| {
    Patterns {
        email: Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{1,}\b").unwrap(),
        // header.payload.signature, each segment base64url
        access_token: Regex::new(r"[A-Za-z0-9_-]{8,}\.[A-Za-z0-9_-]{8,}\.[A-Za-z0-9_-]{8,}")
            .unwrap(),
        // bare signatures, secrets, hashes
        opaque_run: Regex::new(r"[A-Za-z0-9+/_-]{32,}={0,2}").unwrap(),
    }
});

/// Redacts sensitive information from a string.
///
/// - Emails keep the first character of the local part and the full domain.
/// - Three-segment access tokens become `[REDACTED_TOKEN]`.
/// - Any other base64/base64url/hex run of 32+ characters becomes
///   `[REDACTED_TOKEN]`.
pub fn redact(input: &str) -> String {
    let patterns = &*PATTERNS;

    let emails = patterns.email.replace_all(input, |caps: &regex::Captures| {
        let full_match = &caps[0];
        match full_match.split_once('@') {
            Some((local, domain)) => match local.chars().next() {
                Some(first) => format!("{first}***@{domain}"),
                None => format!("@{domain}"),
            },
            None => full_match.to_string(),
        }
    });

    let tokens = patterns
        .access_token
        .replace_all(&emails, "[REDACTED_TOKEN]");

    patterns
        .opaque_run
        .replace_all(&tokens, "[REDACTED_TOKEN]")
        .into_owned()
}

/// Displays its contents through [`redact`].
pub struct Redacted<'a>(pub &'a str);

impl fmt::Display for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&redact(self.0))
    }
}

impl fmt::Debug for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&redact(self.0))
    }
}
