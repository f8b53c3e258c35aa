use std::process;

use eurydice_keygen::{
    config::settings::Settings,
    services::{crypto::Sodium, keygen},
};

// stderr carries only the failure diagnostic unless RUST_LOG asks for more
fn init_logging() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("off"),
    )
        .init();
}

fn main() {
    init_logging();

    let settings = Settings::new().unwrap_or_else(|e| {
        eprintln!("Failed to load settings: {e}");
        process::exit(1);
    });

    if let Err(e) = keygen::run(&settings, Sodium::init) {
        eprintln!("keygen: {e}");
        process::exit(1);
    }
}
