//! Raw key files on disk: create/truncate, write every byte, set the mode.

use log::{debug, info, warn};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::config::settings::Settings;
use crate::services::crypto::Keypair;
use crate::utils::errors::KeygenError;

/// Locations of a freshly written keypair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyFiles {
    pub privkey_path: PathBuf,
    pub pubkey_path: PathBuf,
}

/// Write `bytes` verbatim to `path` and leave the file at exactly `mode`.
/// Any failure after the file was opened removes it again.
pub fn write_key(path: &Path, bytes: &[u8], mode: u32) -> Result<(), KeygenError> {
    let file = open_for_write(path, mode).map_err(|source| KeygenError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    if let Err(e) = fill(file, path, bytes, mode) {
        discard(path);
        return Err(e);
    }

    debug!("wrote {} bytes to {} (mode {:o})", bytes.len(), path.display(), mode);
    Ok(())
}

/// Secret half first, then public. A failed public write removes both paths
/// so a run never leaves a secret key or a stale public key unpaired.
pub fn write_keypair(settings: &Settings, keypair: &Keypair) -> Result<KeyFiles, KeygenError> {
    write_key(&settings.privkey_path, keypair.secret_bytes(), settings.key_mode)?;
    info!("private key written to {}", settings.privkey_path.display());

    if let Err(e) = write_key(&settings.pubkey_path, keypair.public_bytes(), settings.key_mode) {
        discard(&settings.pubkey_path);
        discard(&settings.privkey_path);
        return Err(e);
    }
    info!("public key written to {}", settings.pubkey_path.display());

    Ok(KeyFiles {
        privkey_path: settings.privkey_path.clone(),
        pubkey_path: settings.pubkey_path.clone(),
    })
}

// file is dropped (closed) on return, before the caller may unlink it
fn fill(mut file: File, path: &Path, bytes: &[u8], mode: u32) -> Result<(), KeygenError> {
    // write_all turns a short write into ErrorKind::WriteZero
    file.write_all(bytes).map_err(|source| KeygenError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    set_mode(&file, mode).map_err(|source| KeygenError::Permissions {
        path: path.to_path_buf(),
        source,
    })?;

    file.sync_all().map_err(|source| KeygenError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Best-effort unlink after a failed run.
fn discard(path: &Path) {
    match fs::remove_file(path) {
        Ok(()) => warn!("removed {} after failed write", path.display()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => warn!("could not remove {}: {e}", path.display()),
    }
}

#[cfg(unix)]
fn open_for_write(path: &Path, mode: u32) -> io::Result<File> {
    use std::os::unix::fs::OpenOptionsExt;

    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(mode)
        .open(path)
}

#[cfg(not(unix))]
fn open_for_write(path: &Path, _mode: u32) -> io::Result<File> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
}

// Explicit chmod: the mode passed to open() is filtered by the umask and
// ignored for files that already exist.
#[cfg(unix)]
fn set_mode(file: &File, mode: u32) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    file.set_permissions(fs::Permissions::from_mode(mode))
}

#[cfg(not(unix))]
fn set_mode(_file: &File, mode: u32) -> io::Result<()> {
    warn!("permission mode {mode:o} not applied on this platform");
    Ok(())
}
