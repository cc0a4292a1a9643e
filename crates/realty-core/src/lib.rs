pub mod error;
pub mod format;
pub mod pricing;
pub mod types;

#[cfg(feature = "emi")]
pub mod emi;

#[cfg(feature = "catalog")]
pub mod catalog;

#[cfg(feature = "catalog")]
pub mod envelope;

#[cfg(feature = "catalog")]
pub mod models;

pub use error::RealtyError;
pub use types::*;

/// Standard result type for all realty operations
pub type RealtyResult<T> = Result<T, RealtyError>;
