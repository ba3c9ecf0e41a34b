//! The fixed table of credential headers and the fields they map to.

use std::{fmt, str::FromStr};

use serde::Serialize;

/// Markers that make a field's value secret for logging purposes.
const SENSITIVE_MARKERS: [&str; 3] = ["token", "password", "key"];

/// The external service a credential field configures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Service {
    /// The Jira issue tracker.
    Jira,
    /// The Confluence wiki.
    Confluence,
}

impl Service {
    /// Both services, Jira first.
    pub const ALL: [Service; 2] = [Service::Jira, Service::Confluence];

    /// Header prefix shared by all headers of this service.
    pub fn header_prefix(self) -> &'static str {
        match self {
            Service::Jira => "X-JIRA-",
            Service::Confluence => "X-CONFLUENCE-",
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Service::Jira => f.write_str("jira"),
            Service::Confluence => f.write_str("confluence"),
        }
    }
}

/// An internal credential field identifier.
///
/// The declaration order matches the header table, so ordered collections keyed by
/// `Field` iterate in table order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    JiraUrl,
    JiraUsername,
    JiraApiToken,
    JiraPersonalToken,
    JiraSslVerify,
    JiraProjectsFilter,
    JiraHttpProxy,
    JiraHttpsProxy,
    JiraNoProxy,
    JiraSocksProxy,
    ConfluenceUrl,
    ConfluenceUsername,
    ConfluenceApiToken,
    ConfluencePersonalToken,
    ConfluenceSslVerify,
    ConfluenceSpacesFilter,
    ConfluenceHttpProxy,
    ConfluenceHttpsProxy,
    ConfluenceNoProxy,
    ConfluenceSocksProxy,
}

impl Field {
    /// Every field, in table order.
    pub const ALL: [Field; 20] = [
        Field::JiraUrl,
        Field::JiraUsername,
        Field::JiraApiToken,
        Field::JiraPersonalToken,
        Field::JiraSslVerify,
        Field::JiraProjectsFilter,
        Field::JiraHttpProxy,
        Field::JiraHttpsProxy,
        Field::JiraNoProxy,
        Field::JiraSocksProxy,
        Field::ConfluenceUrl,
        Field::ConfluenceUsername,
        Field::ConfluenceApiToken,
        Field::ConfluencePersonalToken,
        Field::ConfluenceSslVerify,
        Field::ConfluenceSpacesFilter,
        Field::ConfluenceHttpProxy,
        Field::ConfluenceHttpsProxy,
        Field::ConfluenceNoProxy,
        Field::ConfluenceSocksProxy,
    ];

    /// The snake-case identifier used by the downstream configuration.
    pub fn as_str(self) -> &'static str {
        match self {
            Field::JiraUrl => "jira_url",
            Field::JiraUsername => "jira_username",
            Field::JiraApiToken => "jira_api_token",
            Field::JiraPersonalToken => "jira_personal_token",
            Field::JiraSslVerify => "jira_ssl_verify",
            Field::JiraProjectsFilter => "jira_projects_filter",
            Field::JiraHttpProxy => "jira_http_proxy",
            Field::JiraHttpsProxy => "jira_https_proxy",
            Field::JiraNoProxy => "jira_no_proxy",
            Field::JiraSocksProxy => "jira_socks_proxy",
            Field::ConfluenceUrl => "confluence_url",
            Field::ConfluenceUsername => "confluence_username",
            Field::ConfluenceApiToken => "confluence_api_token",
            Field::ConfluencePersonalToken => "confluence_personal_token",
            Field::ConfluenceSslVerify => "confluence_ssl_verify",
            Field::ConfluenceSpacesFilter => "confluence_spaces_filter",
            Field::ConfluenceHttpProxy => "confluence_http_proxy",
            Field::ConfluenceHttpsProxy => "confluence_https_proxy",
            Field::ConfluenceNoProxy => "confluence_no_proxy",
            Field::ConfluenceSocksProxy => "confluence_socks_proxy",
        }
    }

    /// The service this field belongs to.
    pub fn service(self) -> Service {
        if self < Field::ConfluenceUrl {
            Service::Jira
        } else {
            Service::Confluence
        }
    }

    /// Whether values of this field must be masked before logging.
    ///
    /// Matches when the identifier contains `token`, `password` or `key`.
    pub fn is_sensitive(self) -> bool {
        let name = self.as_str();
        SENSITIVE_MARKERS.iter().any(|marker| name.contains(marker))
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when parsing an unknown field identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown credential field '{0}'")]
pub struct UnknownField(pub String);

impl FromStr for Field {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

/// One row of the header table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderMapping {
    /// External header name, in its canonical upper-case spelling.
    pub header: &'static str,
    /// The field the header value is stored under.
    pub field: Field,
}

impl HeaderMapping {
    const fn new(header: &'static str, field: Field) -> Self {
        Self { header, field }
    }
}

static TABLE: [HeaderMapping; 20] = [
    HeaderMapping::new("X-JIRA-URL", Field::JiraUrl),
    HeaderMapping::new("X-JIRA-USERNAME", Field::JiraUsername),
    HeaderMapping::new("X-JIRA-API-TOKEN", Field::JiraApiToken),
    HeaderMapping::new("X-JIRA-PERSONAL-TOKEN", Field::JiraPersonalToken),
    HeaderMapping::new("X-JIRA-SSL-VERIFY", Field::JiraSslVerify),
    HeaderMapping::new("X-JIRA-PROJECTS-FILTER", Field::JiraProjectsFilter),
    HeaderMapping::new("X-JIRA-HTTP-PROXY", Field::JiraHttpProxy),
    HeaderMapping::new("X-JIRA-HTTPS-PROXY", Field::JiraHttpsProxy),
    HeaderMapping::new("X-JIRA-NO-PROXY", Field::JiraNoProxy),
    HeaderMapping::new("X-JIRA-SOCKS-PROXY", Field::JiraSocksProxy),
    HeaderMapping::new("X-CONFLUENCE-URL", Field::ConfluenceUrl),
    HeaderMapping::new("X-CONFLUENCE-USERNAME", Field::ConfluenceUsername),
    HeaderMapping::new("X-CONFLUENCE-API-TOKEN", Field::ConfluenceApiToken),
    HeaderMapping::new("X-CONFLUENCE-PERSONAL-TOKEN", Field::ConfluencePersonalToken),
    HeaderMapping::new("X-CONFLUENCE-SSL-VERIFY", Field::ConfluenceSslVerify),
    HeaderMapping::new("X-CONFLUENCE-SPACES-FILTER", Field::ConfluenceSpacesFilter),
    HeaderMapping::new("X-CONFLUENCE-HTTP-PROXY", Field::ConfluenceHttpProxy),
    HeaderMapping::new("X-CONFLUENCE-HTTPS-PROXY", Field::ConfluenceHttpsProxy),
    HeaderMapping::new("X-CONFLUENCE-NO-PROXY", Field::ConfluenceNoProxy),
    HeaderMapping::new("X-CONFLUENCE-SOCKS-PROXY", Field::ConfluenceSocksProxy),
];

/// All header mappings: Jira first, then Confluence.
pub fn all() -> &'static [HeaderMapping] {
    &TABLE
}

/// Find the mapping for a header name, ignoring ASCII case.
pub fn lookup(header: &str) -> Option<&'static HeaderMapping> {
    TABLE.iter().find(|mapping| mapping.header.eq_ignore_ascii_case(header))
}

/// Whether a header looks like a credential header of one of the services but is not in
/// the table, e.g. `X-JIRA-PASSWORD`. Such headers are ignored by the extraction.
pub fn is_unknown_credential_header(header: &str) -> bool {
    let prefixed = Service::ALL.into_iter().any(|service| {
        let prefix = service.header_prefix();

        header
            .get(..prefix.len())
            .is_some_and(|start| start.eq_ignore_ascii_case(prefix))
    });

    prefixed && lookup(header).is_none()
}
