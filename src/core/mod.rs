//! Core conversion logic

pub mod config;
pub mod error;
pub mod log;
pub mod rates;
pub mod request;
pub mod result;
pub mod symbols;

// Re-export main types for cleaner imports
pub use error::ConvertError;
pub use rates::{RateProvider, Rates};
pub use request::{ConversionRequest, RawParams};
pub use result::ConversionResult;
pub use symbols::SymbolTable;
