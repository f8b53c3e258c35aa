//! ──────────────────────────────────────────────────────────────────────────
//! One keygen run
//! ──────────────────────────────────────────────────────────────────────────
//! init libsodium → generate → write secret → write public → read back
//!
//! Initialization is passed in so callers can substitute a failing one.
//! ──────────────────────────────────────────────────────────────────────────

use log::{info, warn};

use crate::{
    config::settings::Settings,
    services::{
        crypto::Sodium,
        key_writer::{self, KeyFiles},
        keystore,
    },
    utils::errors::KeygenError,
};

/// Generate one keypair and persist it as described by `settings`.
/// No file is touched before `init` succeeds.
pub fn run<I>(settings: &Settings, init: I) -> Result<KeyFiles, KeygenError>
where
    I: FnOnce() -> Result<Sodium, KeygenError>,
{
    let sodium = init()?;

    if settings.exposes_secret_key() {
        warn!(
            "private key {} will be readable beyond its owner (mode {:o})",
            settings.privkey_path.display(),
            settings.key_mode
        );
    }

    let keypair = sodium.gen_keypair();
    info!("generated curve25519 box keypair");

    let files = key_writer::write_keypair(settings, &keypair)?;

    let stored = keystore::load_keypair(&sodium, settings)?;
    if stored.public_key() != keypair.public_key() {
        return Err(KeygenError::KeyMismatch(files.pubkey_path));
    }

    info!("public key (base64): {}", keypair.public_b64());
    Ok(files)
}
