use dotenv::dotenv;
use log::info;
use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::utils::errors::KeygenError;

pub const DEFAULT_PRIVKEY_PATH: &str = "/keys/eurydice";
pub const PUBKEY_SUFFIX: &str = ".pub";
/// rw-r--r-- for both halves. See `Settings::exposes_secret_key`.
pub const DEFAULT_KEY_MODE: u32 = 0o644;

const PRIVKEY_PATH_VAR: &str = "KEYGEN_PRIVKEY_PATH";
const KEY_MODE_VAR: &str = "KEYGEN_KEY_MODE";

/// Where the keypair lands and with which permission bits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub privkey_path: PathBuf,
    pub pubkey_path: PathBuf,
    pub key_mode: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self::with_privkey_path(DEFAULT_PRIVKEY_PATH)
    }
}

impl Settings {
    /// Defaults, overridden by `KEYGEN_PRIVKEY_PATH` / `KEYGEN_KEY_MODE`.
    /// Process environment wins over a `.env` file in the working directory.
    pub fn new() -> Result<Self, KeygenError> {
        dotenv().ok(); // loads `.env` file if there is one

        let settings = Self::from_lookup(|key| env::var(key).ok())?;
        info!(
            "writing keys to {} and {} (mode {:o})",
            settings.privkey_path.display(),
            settings.pubkey_path.display(),
            settings.key_mode
        );
        Ok(settings)
    }

    /// Settings for an explicit secret-key location; the public key always
    /// sits next to it with a `.pub` suffix.
    pub fn with_privkey_path(path: impl Into<PathBuf>) -> Self {
        let privkey_path = path.into();
        Self {
            pubkey_path: pubkey_path_for(&privkey_path),
            privkey_path,
            key_mode: DEFAULT_KEY_MODE,
        }
    }

    pub fn key_mode(mut self, mode: u32) -> Self {
        self.key_mode = mode;
        self
    }

    /// True when group or other get any access to the secret key file.
    pub fn exposes_secret_key(&self) -> bool {
        self.key_mode & 0o077 != 0
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, KeygenError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = match lookup(PRIVKEY_PATH_VAR) {
            Some(path) if !path.is_empty() => Self::with_privkey_path(path),
            Some(_) => {
                return Err(KeygenError::Config(format!("{PRIVKEY_PATH_VAR} is empty")));
            }
            None => Self::default(),
        };

        if let Some(raw) = lookup(KEY_MODE_VAR) {
            settings.key_mode = parse_mode(&raw)?;
        }

        Ok(settings)
    }
}

fn pubkey_path_for(privkey_path: &Path) -> PathBuf {
    let mut path = OsString::from(privkey_path.as_os_str());
    path.push(PUBKEY_SUFFIX);
    PathBuf::from(path)
}

/// Accepts `644`, `0644` and `0o644`.
fn parse_mode(raw: &str) -> Result<u32, KeygenError> {
    let digits = raw.trim();
    let digits = digits.strip_prefix("0o").unwrap_or(digits);

    let mode = u32::from_str_radix(digits, 8).map_err(|_| {
        KeygenError::Config(format!("{KEY_MODE_VAR} must be an octal mode, got {raw:?}"))
    })?;
    if mode > 0o777 {
        return Err(KeygenError::Config(format!(
            "{KEY_MODE_VAR} out of range: {mode:o}"
        )));
    }
    Ok(mode)
}
