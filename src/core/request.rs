//! Normalisation of raw user input into a conversion request

use super::error::ConvertError;
use super::symbols::SymbolTable;

/// Parameters as received from either entry point, before any resolution.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawParams {
    pub amount: Option<String>,
    /// Every input currency token supplied, in order.
    pub input_currency: Vec<String>,
    /// Comma-separated output tokens.
    pub output_currency: Option<String>,
}

impl RawParams {
    /// Builds parameters from decoded query pairs. Repeated keys are kept in
    /// order; the last `amount` and `output_currency` win.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut params = RawParams::default();
        for (key, value) in pairs {
            match key.as_ref() {
                "amount" => params.amount = Some(value.into()),
                "input_currency" => params.input_currency.push(value.into()),
                "output_currency" => params.output_currency = Some(value.into()),
                _ => {}
            }
        }
        params
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConversionRequest {
    pub amount: f64,
    pub input_currency: String,
    /// Empty means every rate the provider has for the base currency.
    pub output_currencies: Vec<String>,
}

/// Resolves raw parameters into a canonical request.
///
/// The amount is not range checked: zero and negative values are accepted.
/// Non-finite values (`nan`, `inf`) are rejected since JSON cannot carry them.
/// A missing input currency becomes an empty base code and is left for the
/// provider to reject.
pub fn normalize(
    raw: &RawParams,
    symbols: &SymbolTable,
) -> Result<ConversionRequest, ConvertError> {
    let token = raw.amount.as_deref().unwrap_or_default();
    let amount = token
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite())
        .ok_or_else(|| ConvertError::InvalidAmount {
            token: token.to_string(),
        })?;

    let input_currency = raw
        .input_currency
        .last()
        .map(|token| symbols.resolve_input(token))
        .unwrap_or_default();

    let output_currencies = raw
        .output_currency
        .as_deref()
        .filter(|list| !list.is_empty())
        .map(|list| {
            list.split(',')
                .flat_map(|token| symbols.resolve_output(token))
                .collect()
        })
        .unwrap_or_default();

    Ok(ConversionRequest {
        amount,
        input_currency,
        output_currencies,
    })
}
