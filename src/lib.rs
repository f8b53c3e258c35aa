pub mod config;
pub mod services {
    pub mod crypto;
    pub mod key_writer;
    pub mod keygen;
    pub mod keystore;
}

pub mod utils;
