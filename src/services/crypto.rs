//! Curve25519 box keypairs on top of libsodium
//! • `Sodium` is the proof that `sodiumoxide::init()` succeeded
//! • generation and derivation are only reachable through it

use base64::engine::general_purpose as b64;
use base64::Engine;
use sodiumoxide::{
    crypto::box_::{self, PublicKey, SecretKey},
    init as sodium_init,
};
use std::fmt;

use crate::utils::errors::KeygenError;

pub use sodiumoxide::crypto::box_::{PUBLICKEYBYTES, SECRETKEYBYTES};

// ──────────────────────────────────────────────────────────────
//  Initialization token
// ──────────────────────────────────────────────────────────────
#[derive(Debug)]
pub struct Sodium {
    _initialized: (),
}

impl Sodium {
    /// Prepare libsodium (seeds its CSPRNG). Safe to call more than once.
    pub fn init() -> Result<Self, KeygenError> {
        sodium_init().map_err(|()| KeygenError::Init)?;
        Ok(Self { _initialized: () })
    }

    /// One `crypto_box_keypair` call; both halves come from it.
    pub fn gen_keypair(&self) -> Keypair {
        let (public, secret) = box_::gen_keypair();
        Keypair { public, secret }
    }

    /// Rebuild a keypair from raw secret bytes, deriving the public half.
    pub fn keypair_from_secret(&self, secret: &[u8]) -> Option<Keypair> {
        let secret = SecretKey::from_slice(secret)?;
        Some(Keypair {
            public: secret.public_key(),
            secret,
        })
    }
}

// ──────────────────────────────────────────────────────────────
//  Keypair
// ──────────────────────────────────────────────────────────────

/// Not `Clone`: the secret half has exactly one owner.
pub struct Keypair {
    public: PublicKey,
    secret: SecretKey,
}

impl Keypair {
    pub fn public_key(&self) -> &PublicKey {
        &self.public
    }

    pub fn public_bytes(&self) -> &[u8] {
        self.public.as_ref()
    }

    pub fn secret_bytes(&self) -> &[u8] {
        self.secret.as_ref()
    }

    pub fn public_b64(&self) -> String {
        b64::STANDARD.encode(self.public_bytes())
    }
}

impl fmt::Debug for Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Keypair")
            .field("public", &self.public_b64())
            .field("secret", &"****")
            .finish()
    }
}
