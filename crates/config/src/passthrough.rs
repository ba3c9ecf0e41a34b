//! Credential passthrough configuration.

use serde::Deserialize;

/// Controls whether Jira and Confluence credentials may be overridden per request
/// through `X-JIRA-*` and `X-CONFLUENCE-*` headers.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PassthroughConfig {
    /// Whether header based credential passthrough is enabled. Disabled unless set.
    pub enabled: bool,
}

impl PassthroughConfig {
    /// A configuration with passthrough turned on.
    pub fn enabled() -> Self {
        Self { enabled: true }
    }

    /// Returns whether credentials may be taken from request headers.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use super::PassthroughConfig;

    #[test]
    fn disabled_by_default() {
        assert!(!PassthroughConfig::default().is_enabled());
    }

    #[test]
    fn explicit_disable() {
        let config = indoc! {r#"
            enabled = false
        "#};

        let config: PassthroughConfig = toml::from_str(config).unwrap();

        assert!(!config.is_enabled());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let config = indoc! {r#"
            enabled = true
            allow_all = true
        "#};

        let result: Result<PassthroughConfig, _> = toml::from_str(config);

        assert!(result.is_err());
    }
}
