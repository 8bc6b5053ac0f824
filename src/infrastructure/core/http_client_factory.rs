use crate::config::HttpConfig;
use reqwest::Client;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use std::time::Duration;

pub struct HttpClientFactory;

impl HttpClientFactory {
    /// Creates a new HTTP client with retry middleware
    pub fn create_client(config: &HttpConfig) -> ClientWithMiddleware {
        // Exponential backoff on transient failures (5xx, 429, connect errors)
        let retry_policy = ExponentialBackoff::builder().build_with_max_retries(config.max_retries);

        let client = Client::builder()
            .pool_max_idle_per_host(5)
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .unwrap_or_else(|_| Client::new());

        ClientBuilder::new(client)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build()
    }
}

/// Helper function to build a URL with query parameters.
/// Since reqwest-middleware 0.5.0 doesn't expose the .query() method,
/// we build the query string manually and append it to the URL.
pub fn build_url_with_query<K, V>(base_url: &str, params: &[(K, V)]) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    if params.is_empty() {
        return base_url.to_string();
    }

    let query_string: String = params
        .iter()
        .map(|(k, v)| format!("{}={}", encode(k.as_ref()), encode(v.as_ref())))
        .collect::<Vec<_>>()
        .join("&");

    if base_url.contains('?') {
        format!("{}&{}", base_url, query_string)
    } else {
        format!("{}?{}", base_url, query_string)
    }
}

/// Percent-encodes everything outside the RFC 3986 unreserved set.
pub fn encode(s: &str) -> String {
    let mut encoded = String::with_capacity(s.len());
    for byte in s.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                encoded.push(byte as char);
            }
            _ => encoded.push_str(&format!("%{:02X}", byte)),
        }
    }
    encoded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url_with_query() {
        let url = build_url_with_query(
            "https://example.com/v8/finance/chart/AAPL",
            &[("range", "1mo"), ("interval", "1d")],
        );
        assert_eq!(
            url,
            "https://example.com/v8/finance/chart/AAPL?range=1mo&interval=1d"
        );
    }

    #[test]
    fn test_build_url_appends_to_existing_query() {
        let url = build_url_with_query("https://example.com/a?x=1", &[("y", "2")]);
        assert_eq!(url, "https://example.com/a?x=1&y=2");
    }

    #[test]
    fn test_encode_reserved_characters() {
        assert_eq!(encode("^GSPC"), "%5EGSPC");
        assert_eq!(encode("BRK.B"), "BRK.B");
        assert_eq!(encode("EUR=X"), "EUR%3DX");
    }
}
