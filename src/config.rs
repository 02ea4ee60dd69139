use std::net::SocketAddr;

use anyhow::{bail, Context, Result};
use homedir::my_home;
use serde::{Deserialize, Serialize};

use crate::{
    query::DEFAULT_FIELD,
    storage::{BackendLocal, StorageManager},
};

const CONFIG_FILE: &str = "config.yaml";
const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8080";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Field every rendered term is prefixed with
    #[serde(default = "default_field")]
    pub default_field: String,

    /// Address the daemon binds to
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Reject queries with terms that no operator joins (`Apples Oranges`)
    /// instead of keeping only the last one.
    #[serde(default)]
    pub reject_orphaned_operands: bool,

    #[serde(skip_serializing, skip_deserializing)]
    pub(crate) base_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_field: default_field(),
            listen_addr: default_listen_addr(),
            reject_orphaned_operands: false,
            base_path: String::new(),
        }
    }
}

fn default_field() -> String {
    DEFAULT_FIELD.to_string()
}

fn default_listen_addr() -> String {
    DEFAULT_LISTEN_ADDR.to_string()
}

/// Field names end up as a `field:` prefix, so they must be a single bare word
/// starting with a letter, digit or `_`. A leading `-` would read as negation.
pub fn is_valid_field(field: &str) -> bool {
    let mut chars = field.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphanumeric() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
        }
        _ => false,
    }
}

/// `$BQ_BASE_PATH`, or `~/.local/share/bq`.
pub fn base_path() -> Result<String> {
    if let Ok(base_path) = std::env::var("BQ_BASE_PATH") {
        return Ok(base_path);
    }
    let home = my_home()
        .context("could not determine home directory")?
        .context("home directory path is empty")?;
    Ok(format!("{}/.local/share/bq", home.to_string_lossy()))
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if !is_valid_field(&self.default_field) {
            bail!(
                "default_field must match [A-Za-z0-9_][A-Za-z0-9_.]*, got {:?}",
                self.default_field
            );
        }

        self.listen_addr
            .parse::<SocketAddr>()
            .with_context(|| format!("listen_addr is not a socket address: {}", self.listen_addr))?;

        Ok(())
    }

    pub fn load() -> Result<Self> {
        Self::load_with(&base_path()?)
    }

    pub fn load_with(base_path: &str) -> Result<Self> {
        let store = BackendLocal::new(base_path)
            .with_context(|| format!("failed to create {base_path}"))?;

        // create new if does not exist
        if !store.exists(CONFIG_FILE) {
            log::info!("writing default {CONFIG_FILE} to {base_path}");
            store.write(CONFIG_FILE, serde_yml::to_string(&Self::default())?.as_bytes())?;
        }

        let config_str =
            String::from_utf8(store.read(CONFIG_FILE)?).context("config file is not valid utf8")?;
        let mut config: Self = serde_yml::from_str(&config_str).context("config is malformed")?;

        config.base_path = base_path.to_string();

        config.validate()?;

        // resave in case config version needs an upgrade
        if config_str != serde_yml::to_string(&config)? {
            config.save()?;
        }

        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let store = BackendLocal::new(&self.base_path)?;

        let config_str = serde_yml::to_string(&self)?;
        store.write(CONFIG_FILE, config_str.as_bytes())?;
        Ok(())
    }
}
