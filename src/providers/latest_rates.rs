use crate::core::{ConvertError, RateProvider, Rates};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};

/// Client for a `GET /latest?base=..&symbols=..` exchange rate API, as
/// served by fixer.io and frankfurter.
pub struct LatestRatesProvider {
    base_url: String,
    client: reqwest::Client,
}

impl LatestRatesProvider {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("fxconv/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(LatestRatesProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }
}

#[derive(Debug, Deserialize)]
struct LatestRatesResponse {
    rates: Rates,
    base: Option<String>,
    date: Option<String>,
}

#[async_trait]
impl RateProvider for LatestRatesProvider {
    #[instrument(
        name = "LatestRatesFetch",
        skip_all,
        fields(base = %base, targets = %targets.join(","))
    )]
    async fn fetch_rates(&self, base: &str, targets: &[String]) -> Result<Rates, ConvertError> {
        let url = format!("{}/latest", self.base_url);
        let mut query = vec![("base", base.to_string())];
        if !targets.is_empty() {
            query.push(("symbols", targets.join(",")));
        }
        debug!(%url, ?query, "Requesting exchange rates");

        let response = self
            .client
            .get(&url)
            .query(&query)
            .send()
            .await
            .map_err(|cause| ConvertError::TransportError { cause })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ConvertError::ProviderError {
                status: status.as_u16(),
            });
        }

        let text = response
            .text()
            .await
            .map_err(|cause| ConvertError::TransportError { cause })?;

        let data: LatestRatesResponse =
            serde_json::from_str(&text).map_err(|e| ConvertError::MalformedResponse {
                reason: e.to_string(),
            })?;

        debug!(
            base = ?data.base,
            date = ?data.date,
            count = data.rates.len(),
            "Received exchange rates"
        );
        Ok(data.rates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param, query_param_is_missing};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider(server: &MockServer) -> LatestRatesProvider {
        LatestRatesProvider::new(&server.uri(), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_successful_rates_fetch_with_symbols() {
        let mock_server = MockServer::start().await;
        let mock_response = r#"{"base": "EUR", "date": "2024-01-05", "rates": {"CZK": 25.5}}"#;

        Mock::given(method("GET"))
            .and(path("/latest"))
            .and(query_param("base", "EUR"))
            .and(query_param("symbols", "CZK,USD"))
            .respond_with(ResponseTemplate::new(200).set_body_string(mock_response))
            .expect(1)
            .mount(&mock_server)
            .await;

        let rates = provider(&mock_server)
            .fetch_rates("EUR", &["CZK".to_string(), "USD".to_string()])
            .await
            .expect("Failed to fetch rates");
        assert_eq!(rates.len(), 1);
        assert_eq!(rates["CZK"], 25.5);
    }

    #[tokio::test]
    async fn test_fetch_all_rates_omits_symbols() {
        let mock_server = MockServer::start().await;
        let mock_response = r#"{"rates": {"USD": 1.27, "EUR": 1.16, "JPY": 187.3}}"#;

        Mock::given(method("GET"))
            .and(path("/latest"))
            .and(query_param("base", "GBP"))
            .and(query_param_is_missing("symbols"))
            .respond_with(ResponseTemplate::new(200).set_body_string(mock_response))
            .expect(1)
            .mount(&mock_server)
            .await;

        let rates = provider(&mock_server)
            .fetch_rates("GBP", &[])
            .await
            .expect("Failed to fetch rates");
        assert_eq!(rates.len(), 3);
        assert_eq!(rates["JPY"], 187.3);
    }

    #[tokio::test]
    async fn test_provider_error_status_is_surfaced() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/latest"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let result = provider(&mock_server).fetch_rates("XYZ", &[]).await;
        assert!(matches!(
            result,
            Err(ConvertError::ProviderError { status: 404 })
        ));
    }

    #[tokio::test]
    async fn test_malformed_response_missing_rates() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/latest"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(r#"{"base": "EUR", "date": "x"}"#),
            )
            .mount(&mock_server)
            .await;

        let err = provider(&mock_server)
            .fetch_rates("EUR", &[])
            .await
            .unwrap_err();
        match err {
            ConvertError::MalformedResponse { reason } => assert!(reason.contains("rates")),
            other => panic!("Expected MalformedResponse, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_response_not_json() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/latest"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>busy</html>"))
            .mount(&mock_server)
            .await;

        let result = provider(&mock_server).fetch_rates("EUR", &[]).await;
        assert!(matches!(
            result,
            Err(ConvertError::MalformedResponse { .. })
        ));
    }

    #[tokio::test]
    async fn test_unreachable_provider_is_transport_error() {
        // Nothing listens on the discard port
        let provider =
            LatestRatesProvider::new("http://127.0.0.1:9", Duration::from_secs(5)).unwrap();
        let result = provider.fetch_rates("EUR", &[]).await;
        assert!(matches!(result, Err(ConvertError::TransportError { .. })));
    }
}
