//! Endpoint descriptors: a normalized base address plus a path suffix.

use std::fmt;

use reqwest::Url;

use crate::error::{Error, Result};

/// A base address that always ends in `/`, so suffixes can be appended
/// without producing `hostpath` or `host//path`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointUrl {
    base: Url,
}

impl EndpointUrl {
    pub fn parse(base: &str) -> Result<Self> {
        let normalized = if base.ends_with('/') {
            base.to_owned()
        } else {
            format!("{base}/")
        };
        let base = Url::parse(&normalized)
            .map_err(|e| Error::InvalidUrl(format!("`{base}`: {e}")))?;
        match base.scheme() {
            "http" | "https" => Ok(Self { base }),
            other => Err(Error::InvalidUrl(format!(
                "unsupported scheme `{other}` in `{base}`; expected http or https"
            ))),
        }
    }

    pub fn as_url(&self) -> &Url {
        &self.base
    }

    /// `base + suffix`, followed by `query` as percent-encoded pairs in order.
    /// Pairs whose value is `None` are left out.
    pub fn join(&self, suffix: &str, query: &[(&str, Option<String>)]) -> Result<Url> {
        let mut url = self
            .base
            .join(suffix)
            .map_err(|e| Error::InvalidUrl(format!("`{}` + `{suffix}`: {e}", self.base)))?;
        if query.iter().any(|(_, value)| value.is_some()) {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                if let Some(value) = value {
                    pairs.append_pair(key, value);
                }
            }
        }
        Ok(url)
    }
}

impl fmt::Display for EndpointUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.base.fmt(f)
    }
}

/// Parse a full URL (JSON-RPC endpoints and vendor APIs are used as-is,
/// without trailing-slash normalization).
pub(crate) fn parse_absolute(url: &str) -> Result<Url> {
    let parsed = Url::parse(url).map_err(|e| Error::InvalidUrl(format!("`{url}`: {e}")))?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(Error::InvalidUrl(format!(
            "unsupported scheme `{other}` in `{url}`; expected http or https"
        ))),
    }
}

/// Render `url` for logs and error messages with any `apikey` query value
/// replaced.
pub(crate) fn redacted(url: &Url) -> String {
    if !url.query_pairs().any(|(key, _)| key == "apikey") {
        return url.to_string();
    }
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(key, value)| {
            let value = if key == "apikey" {
                "redacted".to_owned()
            } else {
                value.into_owned()
            };
            (key.into_owned(), value)
        })
        .collect();
    let mut clean = url.clone();
    clean.query_pairs_mut().clear().extend_pairs(pairs);
    clean.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_appends_missing_trailing_slash() {
        let base = EndpointUrl::parse("http://delegate.example.com").expect("should parse");
        assert_eq!(base.to_string(), "http://delegate.example.com/");

        let base = EndpointUrl::parse("http://delegate.example.com/api").expect("should parse");
        assert_eq!(base.to_string(), "http://delegate.example.com/api/");
    }

    #[test]
    fn parse_keeps_existing_trailing_slash() {
        let base = EndpointUrl::parse("https://explorer.example.com/").expect("should parse");
        assert_eq!(base.to_string(), "https://explorer.example.com/");
    }

    #[test]
    fn parse_rejects_missing_scheme() {
        let err = EndpointUrl::parse("delegate.example.com").expect_err("must reject");
        assert!(matches!(err, Error::InvalidUrl(_)));
    }

    #[test]
    fn parse_rejects_non_http_scheme() {
        let err = EndpointUrl::parse("ftp://example.com").expect_err("must reject ftp");
        assert!(err.to_string().contains("unsupported scheme"));
    }

    #[test]
    fn join_appends_suffix_below_base_path() {
        let base = EndpointUrl::parse("http://host.example/api").expect("should parse");
        let url = base.join("getblocksfound", &[]).expect("should join");
        assert_eq!(url.as_str(), "http://host.example/api/getblocksfound");
    }

    #[test]
    fn join_encodes_query_in_order_and_skips_absent_values() {
        let base = EndpointUrl::parse("https://explorer.example.com/").expect("should parse");
        let url = base
            .join(
                "verifyreserveproofapi",
                &[
                    ("public_address", Some("XCA1".to_owned())),
                    ("reserve_proof", Some("ReserveProofV1a+b".to_owned())),
                    ("data", None),
                ],
            )
            .expect("should join");
        assert_eq!(
            url.as_str(),
            "https://explorer.example.com/verifyreserveproofapi?public_address=XCA1&reserve_proof=ReserveProofV1a%2Bb"
        );
    }

    #[test]
    fn parse_absolute_keeps_path_verbatim() {
        let url = parse_absolute("http://localhost:18281/json_rpc").expect("should parse");
        assert_eq!(url.as_str(), "http://localhost:18281/json_rpc");
    }

    #[test]
    fn redacted_hides_api_key_only() {
        let url = Url::parse("https://api.example.com/api?module=stats&apikey=SECRET&action=x")
            .expect("should parse");
        assert_eq!(
            redacted(&url),
            "https://api.example.com/api?module=stats&apikey=redacted&action=x"
        );

        let plain = Url::parse("https://explorer.example.com/gettransactiondata?tx_hash=ab")
            .expect("should parse");
        assert_eq!(redacted(&plain), plain.as_str());
    }
}
