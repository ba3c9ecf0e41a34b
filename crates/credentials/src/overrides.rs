//! Per-request credential overrides with field access.

use secrecy::{ExposeSecret, SecretString};

use crate::{ExtractedCredentials, Field, Service};

/// Credential overrides for a single request, one attribute per known field.
///
/// Only the fields present in the extracted headers are set. Token fields are kept as
/// [`SecretString`] so they never show up in debug output.
#[derive(Debug, Default)]
pub struct CredentialOverrides {
    pub jira_url: Option<String>,
    pub jira_username: Option<String>,
    pub jira_api_token: Option<SecretString>,
    pub jira_personal_token: Option<SecretString>,
    pub jira_ssl_verify: Option<String>,
    pub jira_projects_filter: Option<String>,
    pub jira_http_proxy: Option<String>,
    pub jira_https_proxy: Option<String>,
    pub jira_no_proxy: Option<String>,
    pub jira_socks_proxy: Option<String>,
    pub confluence_url: Option<String>,
    pub confluence_username: Option<String>,
    pub confluence_api_token: Option<SecretString>,
    pub confluence_personal_token: Option<SecretString>,
    pub confluence_ssl_verify: Option<String>,
    pub confluence_spaces_filter: Option<String>,
    pub confluence_http_proxy: Option<String>,
    pub confluence_https_proxy: Option<String>,
    pub confluence_no_proxy: Option<String>,
    pub confluence_socks_proxy: Option<String>,
}

/// Build the overrides from extracted header values. Values are copied unchanged.
pub fn materialize(extracted: &ExtractedCredentials) -> CredentialOverrides {
    let mut overrides = CredentialOverrides::default();

    for (field, value) in extracted.iter() {
        overrides.set(field, value.to_string());
    }

    overrides
}

impl From<&ExtractedCredentials> for CredentialOverrides {
    fn from(extracted: &ExtractedCredentials) -> Self {
        materialize(extracted)
    }
}

impl CredentialOverrides {
    fn set(&mut self, field: Field, value: String) {
        match field {
            Field::JiraUrl => self.jira_url = Some(value),
            Field::JiraUsername => self.jira_username = Some(value),
            Field::JiraApiToken => self.jira_api_token = Some(SecretString::from(value)),
            Field::JiraPersonalToken => self.jira_personal_token = Some(SecretString::from(value)),
            Field::JiraSslVerify => self.jira_ssl_verify = Some(value),
            Field::JiraProjectsFilter => self.jira_projects_filter = Some(value),
            Field::JiraHttpProxy => self.jira_http_proxy = Some(value),
            Field::JiraHttpsProxy => self.jira_https_proxy = Some(value),
            Field::JiraNoProxy => self.jira_no_proxy = Some(value),
            Field::JiraSocksProxy => self.jira_socks_proxy = Some(value),
            Field::ConfluenceUrl => self.confluence_url = Some(value),
            Field::ConfluenceUsername => self.confluence_username = Some(value),
            Field::ConfluenceApiToken => self.confluence_api_token = Some(SecretString::from(value)),
            Field::ConfluencePersonalToken => self.confluence_personal_token = Some(SecretString::from(value)),
            Field::ConfluenceSslVerify => self.confluence_ssl_verify = Some(value),
            Field::ConfluenceSpacesFilter => self.confluence_spaces_filter = Some(value),
            Field::ConfluenceHttpProxy => self.confluence_http_proxy = Some(value),
            Field::ConfluenceHttpsProxy => self.confluence_https_proxy = Some(value),
            Field::ConfluenceNoProxy => self.confluence_no_proxy = Some(value),
            Field::ConfluenceSocksProxy => self.confluence_socks_proxy = Some(value),
        }
    }

    /// The value of a field, exposing secrets.
    pub fn expose(&self, field: Field) -> Option<&str> {
        match field {
            Field::JiraUrl => plain(&self.jira_url),
            Field::JiraUsername => plain(&self.jira_username),
            Field::JiraApiToken => secret(&self.jira_api_token),
            Field::JiraPersonalToken => secret(&self.jira_personal_token),
            Field::JiraSslVerify => plain(&self.jira_ssl_verify),
            Field::JiraProjectsFilter => plain(&self.jira_projects_filter),
            Field::JiraHttpProxy => plain(&self.jira_http_proxy),
            Field::JiraHttpsProxy => plain(&self.jira_https_proxy),
            Field::JiraNoProxy => plain(&self.jira_no_proxy),
            Field::JiraSocksProxy => plain(&self.jira_socks_proxy),
            Field::ConfluenceUrl => plain(&self.confluence_url),
            Field::ConfluenceUsername => plain(&self.confluence_username),
            Field::ConfluenceApiToken => secret(&self.confluence_api_token),
            Field::ConfluencePersonalToken => secret(&self.confluence_personal_token),
            Field::ConfluenceSslVerify => plain(&self.confluence_ssl_verify),
            Field::ConfluenceSpacesFilter => plain(&self.confluence_spaces_filter),
            Field::ConfluenceHttpProxy => plain(&self.confluence_http_proxy),
            Field::ConfluenceHttpsProxy => plain(&self.confluence_https_proxy),
            Field::ConfluenceNoProxy => plain(&self.confluence_no_proxy),
            Field::ConfluenceSocksProxy => plain(&self.confluence_socks_proxy),
        }
    }

    /// Fields that carry a value, in table order.
    pub fn present_fields(&self) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .filter(|field| self.expose(*field).is_some())
            .collect()
    }

    /// Whether any Jira field was supplied.
    pub fn jira(&self) -> bool {
        self.has_service(Service::Jira)
    }

    /// Whether any Confluence field was supplied.
    pub fn confluence(&self) -> bool {
        self.has_service(Service::Confluence)
    }

    fn has_service(&self, service: Service) -> bool {
        Field::ALL
            .into_iter()
            .any(|field| field.service() == service && self.expose(field).is_some())
    }
}

fn plain(value: &Option<String>) -> Option<&str> {
    value.as_deref()
}

fn secret(value: &Option<SecretString>) -> Option<&str> {
    value.as_ref().map(|s| s.expose_secret())
}
