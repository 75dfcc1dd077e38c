//!
//! The deployed contracts registry.
//!

pub mod lock;

use std::path::Path;
use std::path::PathBuf;
use std::str::FromStr;

use colored::Colorize;

use crate::error::Error;

use self::lock::Lock;

///
/// The deployed contracts registry.
///
/// Maps the logical contract names to their addresses. Keys it does not understand are kept
/// untouched. Every save rewrites the whole file.
///
#[derive(Debug)]
pub struct Registry {
    /// The registry file path.
    path: PathBuf,
    /// The registry entries.
    entries: serde_json::Map<String, serde_json::Value>,
    /// The single-writer lock, held while the registry is alive.
    _lock: Lock,
}

impl Registry {
    /// The default registry file name.
    pub const DEFAULT_FILE_NAME: &'static str = "deployedContracts.json";

    /// The key of the CREATE3 factory address.
    pub const FACTORY_KEY: &'static str = "create3Factory";
}

impl Registry {
    ///
    /// Locks and loads the registry.
    ///
    /// If the file does not exist, an empty registry is created, unless it is `required`.
    ///
    pub fn load(path: PathBuf, required: bool) -> Result<Self, Error> {
        if required && !path.exists() {
            return Err(Error::configuration(format!(
                "Registry {path:?} does not exist"
            )));
        }

        let lock = Lock::acquire(path.as_path())?;
        let entries = if path.exists() {
            let data = std::fs::read_to_string(path.as_path()).map_err(|error| {
                Error::Registry {
                    error,
                    path: path.clone(),
                }
            })?;
            serde_json::from_str(data.as_str()).map_err(|error| Error::RegistryParsing {
                error,
                path: path.clone(),
            })?
        } else {
            serde_json::Map::new()
        };

        Ok(Self {
            path,
            entries,
            _lock: lock,
        })
    }

    ///
    /// Writes the whole registry to a temporary file and moves it over the registry file.
    ///
    pub fn save(&self) -> Result<(), Error> {
        let data = serde_json::to_string_pretty(&self.entries).map_err(|error| {
            Error::RegistryParsing {
                error,
                path: self.path.clone(),
            }
        })?;

        let temporary_path = Self::temporary_path(self.path.as_path());
        std::fs::write(temporary_path.as_path(), format!("{data}\n")).map_err(|error| {
            Error::Registry {
                error,
                path: temporary_path.clone(),
            }
        })?;
        std::fs::rename(temporary_path.as_path(), self.path.as_path()).map_err(|error| {
            Error::Registry {
                error,
                path: self.path.clone(),
            }
        })?;

        Ok(())
    }

    ///
    /// Returns the address recorded for the `name`.
    ///
    /// Values which are not addresses are ignored.
    ///
    pub fn get(&self, name: &str) -> Option<web3::types::Address> {
        self.entries
            .get(name)
            .and_then(|value| value.as_str())
            .and_then(|value| web3::types::Address::from_str(value.trim_start_matches("0x")).ok())
    }

    ///
    /// Records the `address` for the `name`.
    ///
    /// Returns `false` if the same address has already been recorded.
    ///
    pub fn insert(&mut self, name: &str, address: web3::types::Address) -> bool {
        if self.get(name) == Some(address) {
            return false;
        }

        self.entries.insert(
            name.to_owned(),
            serde_json::Value::String(crate::utils::address_to_checksum(&address)),
        );
        true
    }

    ///
    /// Records the deployment and saves the registry immediately.
    ///
    pub fn record(&mut self, name: &str, address: web3::types::Address) -> Result<(), Error> {
        if !self.insert(name, address) {
            return Ok(());
        }
        self.save()?;
        println!(
            "    {} `{}` -> {} to `{}`",
            "Recorded".bright_green().bold(),
            name,
            crate::utils::address_to_checksum(&address),
            self.path.to_string_lossy()
        );
        Ok(())
    }

    ///
    /// Returns the CREATE3 factory address override, if recorded.
    ///
    pub fn factory_address(&self) -> Option<web3::types::Address> {
        self.get(Self::FACTORY_KEY)
    }

    ///
    /// Returns the number of entries.
    ///
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    ///
    /// Whether the registry is empty.
    ///
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    ///
    /// Returns the temporary file path used by saving.
    ///
    fn temporary_path(path: &Path) -> PathBuf {
        let mut file_name = path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        file_name.push(".tmp");
        path.with_file_name(file_name)
    }
}
