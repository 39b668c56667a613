//! # Configuration
//!
//! Adopta configuration is loaded with [`confique`], layered in priority order:
//!
//! 1. **Environment variables**: `ADOPTA_CATALOG`, `ADOPTA_FAVORITES`, `ADOPTA_KIND`,
//!    `ADOPTA_NOTIFY_SUCCESS`
//! 2. **Config file**: `adopta.toml` in the OS config directory (via `directories`)
//! 3. **Compiled defaults**
//!
//! Command-line flags override all of these; that happens in the CLI crate.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `catalog_file` | none | JSON array of pets or products |
//! | `favorites_file` | `<data dir>/favorites.json` | Where favorite IDs are kept |
//! | `catalog_kind` | `pets` | `pets` or `products` |
//! | `notify_success` | `false` | Also report committed favorite changes |

use crate::attributes::{schema_by_name, FilterSchema};
use crate::error::{AdoptaError, Result};
use confique::Config;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "adopta.toml";

/// Configuration for adopta, stored in `adopta.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AdoptaConfig {
    /// JSON file holding the catalog.
    #[config(env = "ADOPTA_CATALOG")]
    pub catalog_file: Option<PathBuf>,

    /// JSON file holding the favorite IDs.
    #[config(env = "ADOPTA_FAVORITES")]
    pub favorites_file: Option<PathBuf>,

    /// Which built-in filter schema the catalog uses.
    #[config(env = "ADOPTA_KIND", default = "pets")]
    pub catalog_kind: String,

    #[config(env = "ADOPTA_NOTIFY_SUCCESS", default = false)]
    pub notify_success: bool,
}

impl Default for AdoptaConfig {
    fn default() -> Self {
        Self {
            catalog_file: None,
            favorites_file: None,
            catalog_kind: "pets".to_string(),
            notify_success: false,
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "adopta", "adopta")
}

/// `adopta.toml` in the OS config directory.
pub fn default_config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

impl AdoptaConfig {
    /// Load from the environment and the default config file.
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_path().as_deref())
    }

    /// Load from the environment and `file`. A missing file is skipped.
    pub fn load_from(file: Option<&Path>) -> Result<Self> {
        let mut builder = Self::builder().env();
        if let Some(path) = file {
            builder = builder.file(path);
        }
        Ok(builder.load()?)
    }

    /// The filter schema named by `catalog_kind`.
    pub fn schema(&self) -> Result<&'static FilterSchema> {
        schema_by_name(&self.catalog_kind).ok_or_else(|| {
            AdoptaError::Config(format!(
                "unknown catalog kind {:?} (expected \"pets\" or \"products\")",
                self.catalog_kind
            ))
        })
    }

    /// The configured favorites file, or `favorites.json` in the OS data directory.
    pub fn favorites_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.favorites_file {
            return Ok(path.clone());
        }
        project_dirs()
            .map(|dirs| dirs.data_dir().join("favorites.json"))
            .ok_or_else(|| AdoptaError::Config("could not determine a data directory".into()))
    }

    pub fn catalog_path(&self) -> Result<&Path> {
        self.catalog_file.as_deref().ok_or_else(|| {
            AdoptaError::Config("no catalog file configured (use --catalog or ADOPTA_CATALOG)".into())
        })
    }
}
