//! Stateless access tokens: HS256-signed, base64url-framed, seven-day expiry.
//!
//! Callers only see [`TokenCodec::encode`] and [`TokenCodec::decode`]; the
//! framing primitives stay crate-private.

pub(crate) mod base64url;
pub mod claims;
pub mod clock;
pub(crate) mod signature;
pub mod token;

pub use claims::{Claims, TOKEN_LIFETIME_SECS};
pub use clock::{Clock, FixedClock, SystemClock};
pub use token::{Token, TokenCodec, TokenError};
