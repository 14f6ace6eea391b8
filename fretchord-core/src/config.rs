use std::path::{Path, PathBuf};

use serde::Deserialize;

use fretchord_types::ScoringWeights;

const DEFAULT_CONFIG: &str = include_str!("../config.toml");

#[derive(Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    defaults: DefaultsConfig,
    /// Partial `ScoringWeights`; merged key by key before deserializing.
    #[serde(default)]
    scoring: toml::Table,
}

#[derive(Deserialize, Default)]
struct DefaultsConfig {
    fret_offset: Option<u8>,
    slash_chords: Option<bool>,
}

pub struct Config {
    defaults: DefaultsConfig,
    scoring: ScoringWeights,
}

impl Config {
    /// Embedded defaults, overridden by the user's config file if present.
    pub fn load() -> Self {
        match user_config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::embedded(),
        }
    }

    /// Embedded defaults, overridden by `path` if it exists and parses.
    /// Unreadable or malformed files are logged and ignored.
    pub fn load_from(path: &Path) -> Self {
        let mut config = Self::embedded();
        if !path.exists() {
            return config;
        }
        let user = match std::fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<ConfigFile>(&contents) {
                Ok(user) => user,
                Err(e) => {
                    log::warn!(target: "config", "ignoring malformed config {}: {}", path.display(), e);
                    return config;
                }
            },
            Err(e) => {
                log::warn!(target: "config", "could not read config {}: {}", path.display(), e);
                return config;
            }
        };
        log::debug!(target: "config", "loaded {}", path.display());
        merge_defaults(&mut config.defaults, user.defaults);

        let mut scoring = embedded_file().scoring;
        scoring.extend(user.scoring);
        match weights_from_table(scoring) {
            Ok(weights) => config.scoring = weights,
            Err(e) => {
                log::warn!(target: "config", "ignoring [scoring] in {}: {}", path.display(), e)
            }
        }
        config
    }

    fn embedded() -> Self {
        let base = embedded_file();
        Config {
            defaults: base.defaults,
            scoring: weights_from_table(base.scoring)
                .expect("Invalid [scoring] in embedded config.toml"),
        }
    }

    /// Fret offset a new shape starts at.
    pub fn fret_offset(&self) -> u8 {
        self.defaults.fret_offset.unwrap_or(0)
    }

    /// Whether inversions are printed as slash chords.
    pub fn slash_chords(&self) -> bool {
        self.defaults.slash_chords.unwrap_or(false)
    }

    pub fn scoring_weights(&self) -> ScoringWeights {
        self.scoring
    }
}

pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("fretchord").join("config.toml"))
}

fn embedded_file() -> ConfigFile {
    toml::from_str(DEFAULT_CONFIG).expect("Failed to parse embedded config.toml")
}

/// Keys missing from `table` take the built-in weight.
fn weights_from_table(table: toml::Table) -> Result<ScoringWeights, toml::de::Error> {
    toml::Value::Table(table).try_into()
}

fn merge<T>(base: &mut Option<T>, user: Option<T>) {
    if user.is_some() {
        *base = user;
    }
}

fn merge_defaults(base: &mut DefaultsConfig, user: DefaultsConfig) {
    merge(&mut base.fret_offset, user.fret_offset);
    merge(&mut base.slash_chords, user.slash_chords);
}
