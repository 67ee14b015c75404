//! Project configuration.
//!
//! A YAML file can override the call bindings, the echo flag, and the whole
//! prefix table. Every field is optional; an absent field keeps its default.
//! A `prefixes` table, when present, replaces the standard table wholesale
//! rather than merging into it, so a project sees exactly the prefixes it
//! wrote down.
//!
//! ```yaml
//! logger: app_log
//! callable: emit
//! prefixes:
//!   "#:": callable
//!   "#dbg:": debug
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::pipeline::ExpandOptions;
use crate::registry::{DirectiveKind, DirectiveRegistry};
use crate::rewriting::CallBindings;

/// Errors raised while loading a configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
}

/// The on-disk configuration shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExpandConfig {
    pub logger: Option<String>,
    pub callable: Option<String>,
    pub echo: Option<bool>,
    pub prefixes: Option<BTreeMap<String, DirectiveKind>>,
}

impl ExpandConfig {
    /// Read and parse a YAML configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Resolve the configuration against the defaults.
    pub fn into_options(self) -> ExpandOptions {
        let defaults = CallBindings::default();
        ExpandOptions {
            bindings: CallBindings {
                logger: self.logger.unwrap_or(defaults.logger),
                callable: self.callable.unwrap_or(defaults.callable),
            },
            registry: match self.prefixes {
                Some(prefixes) => DirectiveRegistry::new(prefixes),
                None => DirectiveRegistry::default(),
            },
            echo: self.echo.unwrap_or(false),
        }
    }
}
