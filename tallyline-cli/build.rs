//! Sets `TALLYLINE_VERSION` for `tallyline --version`: the crate version, plus the
//! commit it was built from when the source tree is a git checkout.

use std::env;
use std::path::Path;
use std::process::Command;

fn commit(dir: &Path) -> Option<String> {
    let out = Command::new("git")
        .arg("-C")
        .arg(dir)
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()?;
    if !out.status.success() {
        return None;
    }
    let sha = String::from_utf8(out.stdout).ok()?.trim().to_string();
    (!sha.is_empty()).then_some(sha)
}

fn main() {
    let version = env::var("CARGO_PKG_VERSION").unwrap_or_default();
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap_or_default();

    let version = match commit(Path::new(&manifest_dir)) {
        Some(sha) => format!("{version} ({sha})"),
        None => version,
    };
    println!("cargo:rustc-env=TALLYLINE_VERSION={version}");
}
