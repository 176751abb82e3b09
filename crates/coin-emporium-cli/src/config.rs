//! Persistent CLI settings stored at `~/.coin-emporium/settings.json`.
//!
//! Provides defaults for the network, endpoint URLs, program addresses and
//! output format. Command-line flags and `EMPORIUM_*` environment variables
//! take precedence over anything stored here.

use anyhow::{bail, Context, Result};
use coin_emporium_sdk::AccountAddress;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Persistent CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct CliConfig {
    /// Default network (devnet, local).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,

    /// Custom node URL (overrides network when set).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_url: Option<String>,

    /// Faucet URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub faucet_url: Option<String>,

    /// Coin compiler URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compiler_url: Option<String>,

    /// Address the Faucet program is published under.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub faucet_module: Option<String>,

    /// Address the Airdrop program is published under.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub airdrop_module: Option<String>,

    /// Default output format: true = JSON, false/absent = human-readable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub json_output: Option<bool>,
}

impl CliConfig {
    /// Path to the settings file: `~/.coin-emporium/settings.json`.
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().context("cannot determine home directory")?;
        Ok(home.join(".coin-emporium").join("settings.json"))
    }

    /// Load settings from the default path. Returns `Default` if the file does not exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::default_path()?)
    }

    /// Load settings from `path`. Returns `Default` if the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path).context("failed to read settings file")?;
        serde_json::from_str(&contents).context("failed to parse settings file")
    }

    /// Save settings to the default path.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::default_path()?)
    }

    /// Save settings to `path`, creating its directory.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("failed to create settings directory")?;

            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                let _ = std::fs::set_permissions(parent, std::fs::Permissions::from_mode(0o700));
            }
        }
        let contents =
            serde_json::to_string_pretty(self).context("failed to serialize settings")?;
        std::fs::write(path, &contents).context("failed to write settings file")?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let _ = std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600));
        }

        Ok(())
    }

    /// Get a setting by key name. Returns `None` if unset.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "network" => self.network.clone(),
            "node_url" | "node-url" => self.node_url.clone(),
            "faucet_url" | "faucet-url" => self.faucet_url.clone(),
            "compiler_url" | "compiler-url" => self.compiler_url.clone(),
            "faucet_module" | "faucet-module" => self.faucet_module.clone(),
            "airdrop_module" | "airdrop-module" => self.airdrop_module.clone(),
            "json_output" | "json-output" => self.json_output.map(|v| v.to_string()),
            _ => None,
        }
    }

    /// Set a value by key name. Returns an error for unknown keys or invalid values.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "network" => {
                match value {
                    "devnet" | "local" => {}
                    _ => bail!("invalid network: {value}. Options: devnet, local"),
                }
                self.network = Some(value.to_string());
            }
            "node_url" | "node-url" => self.node_url = Some(parse_url(key, value)?),
            "faucet_url" | "faucet-url" => self.faucet_url = Some(parse_url(key, value)?),
            "compiler_url" | "compiler-url" => self.compiler_url = Some(parse_url(key, value)?),
            "faucet_module" | "faucet-module" => {
                self.faucet_module = Some(parse_module(key, value)?);
            }
            "airdrop_module" | "airdrop-module" => {
                self.airdrop_module = Some(parse_module(key, value)?);
            }
            "json_output" | "json-output" => {
                let v: bool = value.parse().context("json_output must be true or false")?;
                self.json_output = Some(v);
            }
            _ => bail!("unknown config key: {key}"),
        }
        Ok(())
    }

    /// Unset (remove) a value by key name.
    pub fn unset(&mut self, key: &str) -> Result<()> {
        match key {
            "network" => self.network = None,
            "node_url" | "node-url" => self.node_url = None,
            "faucet_url" | "faucet-url" => self.faucet_url = None,
            "compiler_url" | "compiler-url" => self.compiler_url = None,
            "faucet_module" | "faucet-module" => self.faucet_module = None,
            "airdrop_module" | "airdrop-module" => self.airdrop_module = None,
            "json_output" | "json-output" => self.json_output = None,
            _ => bail!("unknown config key: {key}"),
        }
        Ok(())
    }

    /// All known keys with descriptions.
    pub fn known_keys() -> &'static [(&'static str, &'static str)] {
        &[
            ("network", "Default network (devnet, local)"),
            ("node_url", "Custom node URL (overrides network)"),
            ("faucet_url", "Faucet URL used by `account fund`"),
            ("compiler_url", "Coin compiler URL used by `coin create`"),
            ("faucet_module", "Address of the Faucet program"),
            ("airdrop_module", "Address of the Airdrop program"),
            ("json_output", "Default output format (true = JSON)"),
        ]
    }
}

fn parse_url(key: &str, value: &str) -> Result<String> {
    if !(value.starts_with("http://") || value.starts_with("https://")) {
        bail!("{key} must be an http(s) URL");
    }
    Ok(value.to_string())
}

fn parse_module(key: &str, value: &str) -> Result<String> {
    let address = AccountAddress::from_hex(value)
        .with_context(|| format!("{key} must be a hex account address"))?;
    Ok(address.to_hex())
}
