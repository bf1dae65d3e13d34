//! Process-wide settings: where the data lives and which engine is running

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::engine::Engine;
use crate::script::ScriptError;

pub const DATA_ROOT_VAR: &str = "WEAPON_SCRIPTS_DATA";
pub const ENGINE_VAR: &str = "WEAPON_SCRIPTS_ENGINE";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Root of the data directory (`<data_root>/weapons/scripts/...`)
    pub data_root: PathBuf,
    /// Engine identifier, e.g. `csgo`
    pub engine: String,
}

impl Settings {
    pub fn new(data_root: impl Into<PathBuf>, engine: impl Into<String>) -> Self {
        Self {
            data_root: data_root.into(),
            engine: engine.into(),
        }
    }

    /// Read settings from `WEAPON_SCRIPTS_DATA` and `WEAPON_SCRIPTS_ENGINE`
    pub fn from_env() -> Result<Self, ScriptError> {
        let var = |name: &str| {
            env::var(name).map_err(|_| ScriptError::Settings(format!("{name} is not set")))
        };
        Ok(Self::new(var(DATA_ROOT_VAR)?, var(ENGINE_VAR)?))
    }

    /// Get the path to the default settings file
    pub fn config_path() -> Result<PathBuf, ScriptError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ScriptError::Settings("could not determine config directory".into()))?
            .join("weapon-scripts");

        Ok(config_dir.join("settings.toml"))
    }

    /// Load settings from a TOML file
    pub fn load(path: &Path) -> Result<Self, ScriptError> {
        let contents = fs::read_to_string(path).map_err(|e| {
            ScriptError::Settings(format!("failed to read {}: {e}", path.display()))
        })?;

        toml::from_str(&contents).map_err(|e| {
            ScriptError::Settings(format!("failed to parse {}: {e}", path.display()))
        })
    }

    /// Load settings from [`Settings::config_path`]
    pub fn load_default() -> Result<Self, ScriptError> {
        Self::load(&Self::config_path()?)
    }

    pub fn engine(&self) -> Result<Engine, ScriptError> {
        self.engine.parse()
    }

    /// `<data_root>/weapons/scripts/<engine>.ini`, named by the parsed
    /// engine so `CSGO` and ` csgo ` resolve to `csgo.ini`
    pub fn script_path(&self) -> Result<PathBuf, ScriptError> {
        let engine = self.engine()?;
        Ok(self
            .data_root
            .join("weapons")
            .join("scripts")
            .join(format!("{}.ini", engine.as_str())))
    }
}
