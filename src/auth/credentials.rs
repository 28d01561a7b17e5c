//! API keys, secrets and second factors.

use std::fmt;
use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};

use crate::error::KrakenError;

pub const DEFAULT_KEY_VAR: &str = "KRAKEN_API_KEY";
pub const DEFAULT_SECRET_VAR: &str = "KRAKEN_API_SECRET";

/// API credentials containing the key and the base64 secret.
#[derive(Clone)]
pub struct Credentials {
    /// The API key (public identifier)
    pub api_key: String,
    api_secret: SecretString,
}

impl Credentials {
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: SecretString::from(api_secret.into()),
        }
    }

    /// The secret, exposed for signing only.
    pub fn expose_secret(&self) -> &str {
        self.api_secret.expose_secret()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &"[REDACTED]")
            .finish()
    }
}

/// Source of API credentials.
///
/// Implement this to pull keys from a secrets manager; [`StaticCredentials`]
/// and [`EnvCredentials`] cover the common cases.
pub trait CredentialsProvider: Send + Sync {
    fn get_credentials(&self) -> &Credentials;
}

impl<T: CredentialsProvider + ?Sized> CredentialsProvider for Arc<T> {
    fn get_credentials(&self) -> &Credentials {
        (**self).get_credentials()
    }
}

/// Credentials held in memory.
#[derive(Clone, Debug)]
pub struct StaticCredentials {
    credentials: Credentials,
}

impl StaticCredentials {
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            credentials: Credentials::new(api_key, api_secret),
        }
    }
}

impl CredentialsProvider for StaticCredentials {
    fn get_credentials(&self) -> &Credentials {
        &self.credentials
    }
}

/// Credentials read once from environment variables.
#[derive(Debug)]
pub struct EnvCredentials {
    credentials: Credentials,
}

impl EnvCredentials {
    /// Read `KRAKEN_API_KEY` and `KRAKEN_API_SECRET`.
    pub fn from_env() -> Result<Self, KrakenError> {
        Self::from_env_vars(DEFAULT_KEY_VAR, DEFAULT_SECRET_VAR)
    }

    pub fn from_env_vars(key_var: &str, secret_var: &str) -> Result<Self, KrakenError> {
        let read = |name: &str| {
            std::env::var(name).map_err(|_| KrakenError::Config(format!("environment variable {name} not set")))
        };
        Ok(Self {
            credentials: Credentials::new(read(key_var)?, read(secret_var)?),
        })
    }

    /// Like [`EnvCredentials::from_env`] but `None` when either variable is missing.
    pub fn try_from_env() -> Option<Self> {
        Self::from_env().ok()
    }
}

impl CredentialsProvider for EnvCredentials {
    fn get_credentials(&self) -> &Credentials {
        &self.credentials
    }
}

/// Source of the `otp` form field for keys protected by a second factor.
pub trait OtpProvider: Send + Sync {
    /// Current one-time password, or `None` to omit the field.
    fn one_time_password(&self) -> Option<SecretString>;
}

/// A fixed second-factor password (Kraken "static" 2FA).
pub struct StaticOtp(SecretString);

impl StaticOtp {
    pub fn new(password: impl Into<String>) -> Self {
        Self(SecretString::from(password.into()))
    }
}

impl fmt::Debug for StaticOtp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("StaticOtp([REDACTED])")
    }
}

impl OtpProvider for StaticOtp {
    fn one_time_password(&self) -> Option<SecretString> {
        Some(self.0.clone())
    }
}
