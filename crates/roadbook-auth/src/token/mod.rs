//! Token codec — RS256-signed, self-contained access tokens.
//!
//! Signing uses an RSA key pair: the private key is held only by the
//! issuing process, while the public key can be distributed to any
//! verifying process or replica.

pub mod claims;
pub mod issuer;
pub mod verifier;

pub use claims::Claims;
pub use issuer::{IssuedToken, TokenIssuer};
pub use verifier::{TokenVerifier, VerifyError};
