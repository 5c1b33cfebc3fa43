//! Build script for nina-satellite-fw
//!
//! - Sets up linker search paths for memory.x
//! - Embeds the primary's dash.toml so both boards share one tuning file

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use nina_core::config::DashConfig;

/// Board configuration shared with the primary
const DASH_TOML: &str = "../../nina-firmware/dash.toml";

fn main() {
    setup_linker();
    encode_config();
}

fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Parse, validate and encode the shared dash.toml
fn encode_config() {
    println!("cargo:rerun-if-changed={}", DASH_TOML);

    let config_content = match fs::read_to_string(Path::new(DASH_TOML)) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read nina-firmware/dash.toml                   ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: DashConfig = match toml::from_str(&config_content) {
        Ok(config) => config,
        Err(e) => panic!("\nInvalid dash.toml:\n{}\n", e),
    };

    if let Err(e) = config.validate() {
        panic!("\nOut-of-range value in dash.toml: {:?}\n", e);
    }

    let bytes = match postcard::to_stdvec(&config) {
        Ok(bytes) => bytes,
        Err(e) => panic!("failed to encode dash.toml: {}", e),
    };

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    fs::write(out_dir.join("dash_config.bin"), bytes).unwrap();
}
