//! Run configuration.
//!
//! Defaults target the Norwegian Snowstorm instance; each setting can be
//! overridden through an environment variable.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use snomed_client::ClientConfig;
use snomed_types::well_known;

use crate::resolver::DEFAULT_QUERY_LIMIT;

/// Terminology server base URL.
pub const ENV_BASE_URL: &str = "SNOWSTORM_BASE_URL";
/// Branch path on the server.
pub const ENV_BRANCH: &str = "SNOWSTORM_BRANCH";
/// Request timeout in seconds.
pub const ENV_TIMEOUT_SECS: &str = "SNOWSTORM_TIMEOUT_SECS";
/// Reference set holding the candidate clinical drugs.
pub const ENV_REFSET_ID: &str = "MAPPER_REFSET_ID";
/// Directory receiving the output files.
pub const ENV_OUTPUT_DIR: &str = "MAPPER_OUTPUT_DIR";
/// Page limit for concept and member queries.
pub const ENV_QUERY_LIMIT: &str = "MAPPER_QUERY_LIMIT";

/// Settings for one mapping run.
#[derive(Debug, Clone)]
pub struct MapperConfig {
    /// Terminology server connection.
    pub client: ClientConfig,
    /// Reference set whose members are mapped.
    pub refset_id: String,
    /// Directory receiving the output files.
    pub output_dir: PathBuf,
    /// Page limit for concept and member queries.
    pub query_limit: u32,
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            client: ClientConfig::default(),
            refset_id: well_known::FAT_CLINICAL_DRUG_REFSET.to_string(),
            output_dir: PathBuf::from("."),
            query_limit: DEFAULT_QUERY_LIMIT,
        }
    }
}

impl MapperConfig {
    /// Reads overrides from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads overrides through `lookup`, keeping defaults for missing keys.
    ///
    /// Unparseable numbers are logged and ignored.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(base_url) = lookup(ENV_BASE_URL) {
            config.client.base_url = base_url;
        }
        if let Some(branch) = lookup(ENV_BRANCH) {
            config.client.branch = branch;
        }
        if let Some(secs) = parse_var::<u64, _>(&lookup, ENV_TIMEOUT_SECS) {
            config.client.timeout = Duration::from_secs(secs);
        }
        if let Some(refset_id) = lookup(ENV_REFSET_ID) {
            config.refset_id = refset_id;
        }
        if let Some(dir) = lookup(ENV_OUTPUT_DIR) {
            config.output_dir = PathBuf::from(dir);
        }
        match parse_var::<u32, _>(&lookup, ENV_QUERY_LIMIT) {
            Some(0) => tracing::warn!(
                "{} must be positive, using {}",
                ENV_QUERY_LIMIT,
                config.query_limit
            ),
            Some(limit) => config.query_limit = limit,
            None => {}
        }

        config
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!("Ignoring invalid {}: {:?}", key, raw);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> MapperConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        MapperConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.refset_id, "88791000202108");
        assert_eq!(config.query_limit, 50);
        assert_eq!(config.output_dir, PathBuf::from("."));
        assert_eq!(config.client.branch, "MAIN/SNOMEDCT-NO/REFSETS");
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            (ENV_BASE_URL, "http://localhost:8080/"),
            (ENV_BRANCH, "MAIN"),
            (ENV_TIMEOUT_SECS, "5"),
            (ENV_REFSET_ID, "123"),
            (ENV_OUTPUT_DIR, "/tmp/maps"),
            (ENV_QUERY_LIMIT, "100"),
        ]);
        assert_eq!(config.client.base_url, "http://localhost:8080/");
        assert_eq!(config.client.branch, "MAIN");
        assert_eq!(config.client.timeout, Duration::from_secs(5));
        assert_eq!(config.refset_id, "123");
        assert_eq!(config.output_dir, PathBuf::from("/tmp/maps"));
        assert_eq!(config.query_limit, 100);
    }

    #[test]
    fn test_invalid_numbers_keep_defaults() {
        let config = config_from(&[(ENV_QUERY_LIMIT, "fifty"), (ENV_TIMEOUT_SECS, "-1")]);
        assert_eq!(config.query_limit, 50);
        assert_eq!(config.client.timeout, Duration::from_secs(30));

        let config = config_from(&[(ENV_QUERY_LIMIT, "0")]);
        assert_eq!(config.query_limit, 50);
    }
}
