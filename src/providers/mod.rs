pub mod latest_rates;
