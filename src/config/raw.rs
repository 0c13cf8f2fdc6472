use duration_str::deserialize_option_duration;
use serde::Deserialize;
use std::{path::PathBuf, time::Duration};

const DEFAULT_CONFIG_FILE: &str = include_str!("cleanspot.default.toml");

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub db: Option<Db>,
    pub images: Option<Images>,
    pub judge: Option<Judge>,
    pub points: Option<Points>,
}

impl Default for Config {
    fn default() -> Self {
        let cfg: Self = toml::from_str(DEFAULT_CONFIG_FILE).expect("Default configuration");
        cfg
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Db {
    pub connection_sqlite: String,
    pub connection_pool_size: u8,
}

impl Default for Db {
    fn default() -> Self {
        Config::default().db.expect("DB configuration")
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Images {
    pub directory: PathBuf,
}

impl Default for Images {
    fn default() -> Self {
        Config::default().images.expect("Images configuration")
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Judge {
    pub api_url: Option<String>,
    pub api_key: Option<String>,
    pub model: Option<String>,
    #[serde(deserialize_with = "deserialize_option_duration", default)]
    pub timeout: Option<Duration>,
    pub max_image_edge: Option<u32>,
}

impl Default for Judge {
    fn default() -> Self {
        Config::default().judge.expect("Judge configuration")
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Points {
    pub base: Option<i64>,
    pub bonus: Option<i64>,
    pub confidence_threshold: Option<f64>,
}

impl Default for Points {
    fn default() -> Self {
        Config::default().points.expect("Points configuration")
    }
}
