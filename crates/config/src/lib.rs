//! Configuration structures to map the passthrough.toml configuration.

#![deny(missing_docs)]

mod loader;
mod passthrough;

use std::path::Path;

pub use passthrough::PassthroughConfig;
use serde::Deserialize;

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Header based credential passthrough settings.
    #[serde(default)]
    pub passthrough: PassthroughConfig,
}

impl Config {
    /// Load configuration from a file path.
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Config> {
        loader::load(path)
    }
}

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use crate::Config;

    #[test]
    fn all_values() {
        let config = indoc! {r#"
            [passthrough]
            enabled = true
        "#};

        let config: Config = toml::from_str(config).unwrap();

        insta::assert_debug_snapshot!(&config, @r#"
        Config {
            passthrough: PassthroughConfig {
                enabled: true,
            },
        }
        "#);
    }

    #[test]
    fn defaults() {
        let config: Config = toml::from_str("").unwrap();

        insta::assert_debug_snapshot!(&config, @r#"
        Config {
            passthrough: PassthroughConfig {
                enabled: false,
            },
        }
        "#);
    }

    #[test]
    fn empty_passthrough_section() {
        let config = indoc! {r#"
            [passthrough]
        "#};

        let config: Config = toml::from_str(config).unwrap();

        assert!(!config.passthrough.is_enabled());
    }

    #[test]
    fn unknown_section_is_rejected() {
        let config = indoc! {r#"
            [server]
            listen_address = "127.0.0.1:8080"
        "#};

        let error = toml::from_str::<Config>(config).unwrap_err();

        assert!(error.to_string().contains("unknown field `server`"));
    }
}
