use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Process configuration, layered from `bellwatch.toml`,
/// `bellwatch.local.toml` and `BELLWATCH_*` environment variables. This
/// covers deployment knobs only; user preferences live in
/// [`crate::storage`].
#[derive(Deserialize, Debug, Clone)]
pub struct AppSettings {
    pub preferences_path: String,
    pub default_minutes_before: u32,
}

impl AppSettings {
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .set_default("preferences_path", "bellwatch-preferences.json")?
            .set_default("default_minutes_before", 5)?
            .add_source(File::with_name("bellwatch").required(false))
            .add_source(File::with_name("bellwatch.local").required(false))
            .add_source(Environment::with_prefix("BELLWATCH"))
            .build()?;

        settings.try_deserialize()
    }
}
