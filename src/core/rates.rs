//! Exchange rate lookup abstraction

use super::error::ConvertError;
use async_trait::async_trait;
use std::collections::BTreeMap;

/// Code to rate, where `1 base = rate units` of the code.
pub type Rates = BTreeMap<String, f64>;

#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Fetches the latest rates for `base`. An empty `targets` asks for every
    /// rate the provider knows.
    async fn fetch_rates(&self, base: &str, targets: &[String]) -> Result<Rates, ConvertError>;
}
