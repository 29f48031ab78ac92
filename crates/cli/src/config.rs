use serde::Deserialize;

const DEFAULT_CONFIG_PATH: &str = "config/settleup.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    /// Group ids to fall back to when the in-process index is empty.
    pub seed_groups: Vec<String>,
    pub log: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            seed_groups: vec!["group_1".to_string()],
            log: "info".to_string(),
        }
    }
}

pub fn load(path: Option<&str>) -> Result<AppConfig, config::ConfigError> {
    let config_path = path.unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("SETTLEUP"));
    builder.build()?.try_deserialize()
}
