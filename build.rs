//! Build script for the Spotify proxy.
//!
//! Copies `.env.example` from the crate root into the local data directory so
//! that an installed binary has a configuration template next to the place
//! where `config::load_env` looks for `.env`.

use std::{env, fs, path::PathBuf};

/// Copies the configuration template to `<data_local_dir>/spotproxy/.env.example`.
///
/// A missing template only produces a cargo warning; directory or write
/// failures fail the build.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=.env.example");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let env_example_path = manifest_dir.join(".env.example");

    let mut out_dir = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    out_dir.push("spotproxy");
    fs::create_dir_all(&out_dir)?;

    if env_example_path.is_file() {
        let contents = fs::read_to_string(&env_example_path)?;
        fs::write(out_dir.join(".env.example"), contents)?;
    } else {
        println!(
            "cargo:warning=.env.example not found at {}",
            env_example_path.display()
        );
    }

    Ok(())
}
