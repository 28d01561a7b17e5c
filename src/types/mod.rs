//! Types shared across endpoints: the response envelope, exact decimals and
//! the order/ledger enums.

pub mod common;
pub mod decimal;
pub mod envelope;
pub mod serde_helpers;

pub use common::*;
pub use decimal::DecimalString;
pub use envelope::{ApiResponse, Envelope, ResponseMeta};
