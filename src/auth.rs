//! Credential, bearer-token, and login primitives.

pub mod authenticator;
pub mod cache;
pub mod credentials;
pub mod token;

pub use authenticator::*;
pub use cache::*;
pub use credentials::*;
pub use token::*;
