//! # roadbook-auth
//!
//! The authentication core of Roadbook: token issuance and verification,
//! session lifecycle (login, refresh, logout), password reset, and the
//! login throttle.
//!
//! Nothing in this crate holds mutable state between calls; all shared
//! state lives in the credential store and the external principal store.

mod digest;
pub mod password;
pub mod reset;
pub mod session;
pub mod throttle;
pub mod token;

pub use password::{PasswordHasher, PasswordPolicy};
pub use reset::ResetService;
pub use session::SessionManager;
pub use throttle::LoginThrottle;
pub use token::{Claims, TokenIssuer, TokenVerifier, VerifyError};
