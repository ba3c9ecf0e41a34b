use std::path::Path;

use anyhow::Context;

use crate::Config;

pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Config> {
    let path = path.as_ref();

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read configuration file '{}'", path.display()))?;

    let config: Config =
        toml::from_str(&content).with_context(|| format!("invalid configuration in '{}'", path.display()))?;

    for warning in warnings(&config) {
        log::warn!("{warning}");
    }

    Ok(config)
}

/// Settings that are valid but worth pointing out to the operator.
fn warnings(config: &Config) -> Vec<String> {
    let mut warnings = Vec::new();

    if config.passthrough.is_enabled() {
        warnings.push(
            "Credential passthrough is enabled: X-JIRA-* and X-CONFLUENCE-* request headers can override the configured credentials"
                .to_string(),
        );
    }

    warnings
}
