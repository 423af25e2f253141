//! Build script for the Release Radar playlist tool.
//!
//! Copies the configuration templates shipped with the crate into the user's
//! local data directory so a fresh install has editable examples in the
//! location the application reads from.

use std::{env, fs, path::PathBuf};

const TEMPLATES: &[&str] = &["credentials.example.json", "config.example.json"];

/// Copies `credentials.example.json` and `config.example.json` from the crate
/// root into the platform data directory under `radarcli/`.
///
/// Missing templates produce a cargo warning instead of failing the build;
/// directory creation and copy errors are fatal.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);

    let mut out_dir = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    out_dir.push("radarcli");
    fs::create_dir_all(&out_dir)?;

    for template in TEMPLATES {
        // Re-run if a template changes
        println!("cargo:rerun-if-changed={}", template);

        let source = manifest_dir.join(template);
        if source.is_file() {
            let contents = fs::read_to_string(&source)?;
            fs::write(out_dir.join(template), contents)?;
        } else {
            println!(
                "cargo:warning={} not found at {}",
                template,
                source.display()
            );
        }
    }

    Ok(())
}
