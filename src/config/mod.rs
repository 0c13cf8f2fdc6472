use anyhow::Result;
use cleanspot_core::usecases::PointPolicy;
use std::{
    env, fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    time::Duration,
};

mod raw;

const DEFAULT_CONFIG_FILE_NAME: &str = "cleanspot.toml";

const ENV_NAME_DB_URL: &str = "DATABASE_URL";
const ENV_NAME_JUDGE_API_KEY: &str = "CLEANSPOT_JUDGE_API_KEY";

pub struct Config {
    pub db: Db,
    pub images: Images,
    pub judge: Judge,
    pub points: PointPolicy,
}

impl Config {
    pub fn try_load_from_file_or_default<P: AsRef<Path>>(file_path: Option<P>) -> Result<Self> {
        let file_path: &Path = file_path.as_ref().map(|p| p.as_ref()).unwrap_or_else(|| {
            log::info!("No configuration file specified. load {DEFAULT_CONFIG_FILE_NAME}");
            Path::new(DEFAULT_CONFIG_FILE_NAME)
        });

        let raw_config = match fs::read_to_string(file_path) {
            Ok(cfg_string) => toml::from_str(&cfg_string)?,
            Err(err) => match err.kind() {
                ErrorKind::NotFound => {
                    log::info!(
                        "{DEFAULT_CONFIG_FILE_NAME} not found => load default configuration."
                    );
                    Ok(raw::Config::default())
                }
                _ => Err(err),
            }?,
        };
        let mut cfg = Self::from(raw_config);
        if let Ok(db_url) = env::var(ENV_NAME_DB_URL) {
            cfg.db.conn_sqlite = db_url;
        }
        if let Ok(api_key) = env::var(ENV_NAME_JUDGE_API_KEY) {
            cfg.judge.api_key = Some(api_key);
        }
        Ok(cfg)
    }
}

pub struct Db {
    /// SQLite connection
    pub conn_sqlite: String,
    pub conn_pool_size: u8,
}

pub struct Images {
    /// File system directory for uploaded images.
    pub directory: PathBuf,
}

pub struct Judge {
    pub api_url: String,
    /// Without an API key the judge gateway stays unconfigured and
    /// verification events are skipped with a warning.
    pub api_key: Option<String>,
    pub model: String,
    pub timeout: Duration,
    pub max_image_edge: u32,
}

impl From<raw::Config> for Config {
    fn from(from: raw::Config) -> Self {
        let raw::Config {
            db,
            images,
            judge,
            points,
        } = from;

        let raw::Db {
            connection_sqlite,
            connection_pool_size,
        } = db.unwrap_or_default();
        let db = Db {
            conn_sqlite: connection_sqlite,
            conn_pool_size: connection_pool_size,
        };

        let raw::Images { directory } = images.unwrap_or_default();
        let images = Images { directory };

        let judge = {
            let defaults = raw::Judge::default();
            let raw::Judge {
                api_url,
                api_key,
                model,
                timeout,
                max_image_edge,
            } = judge.unwrap_or_default();
            Judge {
                api_url: api_url
                    .or(defaults.api_url)
                    .expect("Judge API URL"),
                api_key,
                model: model.or(defaults.model).expect("Judge model"),
                timeout: timeout
                    .or(defaults.timeout)
                    .expect("Judge timeout"),
                max_image_edge: max_image_edge
                    .or(defaults.max_image_edge)
                    .expect("Judge image edge bound"),
            }
        };

        let points = {
            let defaults = PointPolicy::default();
            let raw::Points {
                base,
                bonus,
                confidence_threshold,
            } = points.unwrap_or_default();
            PointPolicy {
                base_points: base.unwrap_or(defaults.base_points),
                bonus_points: bonus.unwrap_or(defaults.bonus_points),
                confidence_threshold: confidence_threshold
                    .unwrap_or(defaults.confidence_threshold),
            }
        };

        Self {
            db,
            images,
            judge,
            points,
        }
    }
}
