//! Authentication for private endpoints.
//!
//! - [`Authorizer`]: the capability the request pipeline calls once per request
//! - [`KrakenSigner`]: Kraken's API-key/HMAC-SHA512 implementation of it
//! - [`ObservedAuthorizer`]: decorator reporting each authorization to a hook
//! - credential, nonce and one-time-password providers

mod authorizer;
mod credentials;
mod nonce;
mod observed;
mod signature;

pub use authorizer::{API_KEY_HEADER, API_SIGN_HEADER, Authorizer, KrakenSigner};
pub use credentials::{Credentials, CredentialsProvider, EnvCredentials, OtpProvider, StaticCredentials, StaticOtp};
pub use nonce::{IncreasingNonce, NonceProvider};
pub use observed::{AuthorizeHook, ObservedAuthorizer, ObservedAuthorizerBuilder, TracingHook};
pub use signature::sign_request;
