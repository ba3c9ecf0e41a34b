//! Per-request Jira and Confluence credential overrides taken from HTTP headers.
//!
//! When passthrough is enabled, a client may send headers such as `X-JIRA-API-TOKEN` or
//! `X-CONFLUENCE-URL` to replace the server's default credentials for a single request.
//! The values are passed on unchanged; parsing them is up to the consumer.

mod extracted;
pub mod mapping;
mod mask;
mod overrides;

use std::borrow::Cow;

use config::PassthroughConfig;
use http::{HeaderMap, Request};

pub use extracted::ExtractedCredentials;
pub use mapping::{Field, HeaderMapping, Service, UnknownField};
pub use mask::{display_value, mask};
pub use overrides::{CredentialOverrides, materialize};

/// Outcome of inspecting a request for credential headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    /// Passthrough is disabled in the configuration.
    Disabled,
    /// Passthrough is enabled but none of the credential headers were sent.
    NoHeaders,
    /// At least one credential header was found.
    Extracted(ExtractedCredentials),
}

impl Extraction {
    /// The extracted credentials, if there are any to apply.
    pub fn into_credentials(self) -> Option<ExtractedCredentials> {
        match self {
            Extraction::Extracted(credentials) => Some(credentials),
            Extraction::Disabled | Extraction::NoHeaders => None,
        }
    }
}

/// Extract credential overrides from a request.
///
/// Returns `None` if passthrough is disabled or no credential header is present.
pub fn extract_credentials<B>(req: &Request<B>, config: &PassthroughConfig) -> Option<ExtractedCredentials> {
    inspect_request(req, config).into_credentials()
}

/// Inspect a request for credential headers, reporting why nothing was extracted.
pub fn inspect_request<B>(req: &Request<B>, config: &PassthroughConfig) -> Extraction {
    if config.is_enabled() {
        log::debug!("Extracting credential headers from request: {}", req.uri().path());
    }

    inspect_headers(req.headers(), config)
}

/// Extract credential overrides from a header map. See [`extract_credentials`].
pub fn extract_from_headers(headers: &HeaderMap, config: &PassthroughConfig) -> Option<ExtractedCredentials> {
    inspect_headers(headers, config).into_credentials()
}

/// Inspect a header map for credential headers, reporting why nothing was extracted.
pub fn inspect_headers(headers: &HeaderMap, config: &PassthroughConfig) -> Extraction {
    if !config.is_enabled() {
        return Extraction::Disabled;
    }

    let credentials = collect(headers);

    if credentials.is_empty() {
        log::debug!("No credential headers present in request");
        return Extraction::NoHeaders;
    }

    log::info!(
        "Extracted {} credential headers from request: {credentials:?}",
        credentials.len()
    );

    Extraction::Extracted(credentials)
}

fn collect(headers: &HeaderMap) -> ExtractedCredentials {
    let mut credentials = ExtractedCredentials::default();

    for mapping in mapping::all() {
        // the first value wins for repeated headers
        let Some(value) = headers.get(mapping.header) else {
            continue;
        };

        let value = decode(value.as_bytes());

        log::debug!("Found {}: {}", mapping.header, display_value(mapping.field, &value));

        credentials.insert(mapping.field, value.into_owned());
    }

    credentials
}

/// Header bytes as text: UTF-8 when valid, otherwise each byte read as Latin-1.
fn decode(bytes: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(bytes) {
        Ok(value) => Cow::Borrowed(value),
        Err(_) => Cow::Owned(bytes.iter().map(|&byte| char::from(byte)).collect()),
    }
}

#[cfg(test)]
mod tests {
    use http::HeaderValue;

    use super::*;

    fn request(headers: &[(&str, &str)]) -> Request<()> {
        let mut builder = Request::builder().uri("/mcp");

        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }

        builder.body(()).unwrap()
    }

    #[test]
    fn disabled_gate_ignores_headers() {
        let req = request(&[("X-JIRA-URL", "https://issues.example.com")]);

        assert_eq!(extract_credentials(&req, &PassthroughConfig::default()), None);
        assert_eq!(
            inspect_headers(req.headers(), &PassthroughConfig::default()),
            Extraction::Disabled
        );
    }

    #[test]
    fn no_credential_headers() {
        let req = request(&[("Authorization", "Bearer abc"), ("Accept", "application/json")]);

        assert_eq!(extract_credentials(&req, &PassthroughConfig::enabled()), None);
        assert_eq!(
            inspect_request(&req, &PassthroughConfig::enabled()),
            Extraction::NoHeaders
        );
    }

    #[test]
    fn single_header_is_passed_verbatim() {
        let value = "  https%3A%2F%2Fissues.example.com  ";
        let req = request(&[("X-JIRA-URL", value)]);

        let credentials = extract_credentials(&req, &PassthroughConfig::enabled()).unwrap();

        assert_eq!(credentials.len(), 1);
        assert_eq!(credentials.get(Field::JiraUrl), Some(value));
    }

    #[test]
    fn header_names_are_case_insensitive() {
        let req = request(&[("x-confluence-personal-token", "pat"), ("X-Confluence-Url", "https://wiki")]);

        let credentials = extract_credentials(&req, &PassthroughConfig::enabled()).unwrap();

        assert_eq!(credentials.get(Field::ConfluencePersonalToken), Some("pat"));
        assert_eq!(credentials.get(Field::ConfluenceUrl), Some("https://wiki"));
    }

    #[test]
    fn unrecognized_headers_are_never_included() {
        let req = request(&[
            ("X-JIRA-PASSWORD", "hunter2"),
            ("X-CONFLUENCE-PROJECTS-FILTER", "ABC"),
            ("X-JIRA-SSL-VERIFY", "false"),
        ]);

        let credentials = extract_credentials(&req, &PassthroughConfig::enabled()).unwrap();

        insta::assert_debug_snapshot!(credentials, @r#"
        {
            "jira_ssl_verify": "false",
        }
        "#);
    }

    #[test]
    fn jira_url_and_token() {
        let req = request(&[
            ("X-JIRA-URL", "https://issues.example.com"),
            ("X-JIRA-API-TOKEN", "abcd1234efgh"),
        ]);

        let credentials = extract_credentials(&req, &PassthroughConfig::enabled()).unwrap();
        let json = serde_json::to_value(&credentials).unwrap();

        insta::assert_snapshot!(json.to_string(), @r#"{"jira_api_token":"abcd1234efgh","jira_url":"https://issues.example.com"}"#);
    }

    #[test]
    fn all_headers() {
        let headers: Vec<(&str, String)> = mapping::all()
            .iter()
            .map(|mapping| (mapping.header, format!("{}-value", mapping.field)))
            .collect();

        let mut req = Request::builder();

        for (name, value) in &headers {
            req = req.header(*name, value.as_str());
        }

        let req = req.body(()).unwrap();
        let credentials = extract_credentials(&req, &PassthroughConfig::enabled()).unwrap();

        assert_eq!(credentials.len(), 20);

        for field in Field::ALL {
            assert_eq!(credentials.get(field), Some(format!("{field}-value").as_str()));
        }
    }

    #[test]
    fn first_of_repeated_headers_wins() {
        let req = request(&[("X-JIRA-USERNAME", "first"), ("X-JIRA-USERNAME", "second")]);

        let credentials = extract_credentials(&req, &PassthroughConfig::enabled()).unwrap();

        assert_eq!(credentials.get(Field::JiraUsername), Some("first"));
    }

    #[test]
    fn empty_value_is_kept() {
        let req = request(&[("X-JIRA-NO-PROXY", "")]);

        let credentials = extract_credentials(&req, &PassthroughConfig::enabled()).unwrap();

        assert_eq!(credentials.get(Field::JiraNoProxy), Some(""));
    }

    #[test]
    fn utf8_values_are_accepted() {
        let mut headers = HeaderMap::new();
        headers.insert("x-jira-username", HeaderValue::from_bytes("jürgen".as_bytes()).unwrap());

        let credentials = extract_from_headers(&headers, &PassthroughConfig::enabled()).unwrap();

        assert_eq!(credentials.get(Field::JiraUsername), Some("jürgen"));
    }

    #[test]
    fn latin1_value_keeps_sibling_headers() {
        let mut headers = HeaderMap::new();
        headers.insert("x-jira-url", HeaderValue::from_static("https://issues.example.com"));
        headers.insert("x-jira-username", HeaderValue::from_bytes(b"j\xfcrgen").unwrap());

        let credentials = extract_from_headers(&headers, &PassthroughConfig::enabled()).unwrap();

        assert_eq!(credentials.get(Field::JiraUrl), Some("https://issues.example.com"));
        assert_eq!(credentials.get(Field::JiraUsername), Some("jürgen"));
    }

    #[test]
    fn decodes_utf8_before_latin1() {
        assert_eq!(decode("jürgen".as_bytes()), "jürgen");
        assert_eq!(decode(b"\xff\xfe"), "\u{ff}\u{fe}");
        assert!(matches!(decode(b"plain"), Cow::Borrowed("plain")));
    }

    #[test]
    fn repeated_extraction_is_stable() {
        let req = request(&[
            ("X-CONFLUENCE-URL", "https://wiki.example.com"),
            ("X-CONFLUENCE-SPACES-FILTER", "DEV,OPS"),
        ]);

        let config = PassthroughConfig::enabled();

        assert_eq!(extract_credentials(&req, &config), extract_credentials(&req, &config));
    }
}
