//! Private REST endpoints.
//!
//! Every call is a signed `POST` whose form body starts with the nonce. The
//! client must have been built with credentials or an [`Authorizer`];
//! otherwise the call fails with [`KrakenError::MissingCredentials`] before
//! anything is sent.
//!
//! [`Authorizer`]: crate::auth::Authorizer
//! [`KrakenError::MissingCredentials`]: crate::error::KrakenError::MissingCredentials

mod account;
mod earn;
mod export;
mod funding;
mod trading;

pub use account::*;
pub use earn::*;
pub use export::*;
pub use funding::*;
pub use trading::*;
