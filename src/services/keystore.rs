// src/services/keystore.rs

use log::debug;
use std::fs;
use std::io;
use std::path::Path;
use zeroize::Zeroizing;

use crate::config::settings::Settings;
use crate::services::crypto::{Keypair, Sodium, PUBLICKEYBYTES, SECRETKEYBYTES};
use crate::utils::errors::KeygenError;

/// Load the keypair stored at `settings` and check that the `.pub` file
/// holds the public key derived from the private one.
pub fn load_keypair(sodium: &Sodium, settings: &Settings) -> Result<Keypair, KeygenError> {
    let privkey_path = &settings.privkey_path;
    let secret = match fs::read(privkey_path) {
        Ok(bytes) => Zeroizing::new(bytes),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(KeygenError::MissingPrivateKey(privkey_path.clone()));
        }
        Err(source) => {
            return Err(KeygenError::Read {
                path: privkey_path.clone(),
                source,
            });
        }
    };
    if secret.len() != SECRETKEYBYTES {
        return Err(KeygenError::InvalidKey {
            path: privkey_path.clone(),
            len: secret.len(),
        });
    }
    let keypair = sodium
        .keypair_from_secret(&secret)
        .ok_or_else(|| KeygenError::InvalidKey {
            path: privkey_path.clone(),
            len: secret.len(),
        })?;

    let public = read(&settings.pubkey_path)?;
    if public.len() != PUBLICKEYBYTES {
        return Err(KeygenError::InvalidKey {
            path: settings.pubkey_path.clone(),
            len: public.len(),
        });
    }
    if public.as_slice() != keypair.public_bytes() {
        return Err(KeygenError::KeyMismatch(settings.pubkey_path.clone()));
    }

    debug!("verified keypair at {}", privkey_path.display());
    Ok(keypair)
}

fn read(path: &Path) -> Result<Vec<u8>, KeygenError> {
    fs::read(path).map_err(|source| KeygenError::Read {
        path: path.to_path_buf(),
        source,
    })
}
