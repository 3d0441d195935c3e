//! # Meridian-Chain Test Suite
//!
//! Cross-crate integration tests: the multisignature subsystem wired to the
//! real event bus, the in-memory collaborator adapters, and real Ed25519
//! keys.

pub mod integration;

/// Install a tracing subscriber for test runs.
///
/// Honors `RUST_LOG`; silent by default. Safe to call from every test;
/// only the first call wins.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
