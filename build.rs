//! Stamps build metadata reported by `GET /version`:
//! `BUILD_TIME` (unix seconds), `GIT_HASH` and `RUST_VERSION`.

use std::process::Command;

fn main() {
    let built_at = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    println!("cargo:rustc-env=BUILD_TIME={}", built_at);
    println!(
        "cargo:rustc-env=GIT_HASH={}",
        command_output("git", &["rev-parse", "--short", "HEAD"], "docs-rs-build")
    );
    println!(
        "cargo:rustc-env=RUST_VERSION={}",
        command_output("rustc", &["--version"], "stable")
    );

    for path in [".git/HEAD", ".git/refs/heads/", "Cargo.toml", "Cargo.lock"] {
        println!("cargo:rerun-if-changed={}", path);
    }
}

/// Trimmed stdout of `program`, `docs_rs` on docs.rs, "unknown" on failure
fn command_output(program: &str, args: &[&str], docs_rs: &str) -> String {
    if std::env::var("DOCS_RS").is_ok() {
        return docs_rs.to_string();
    }
    Command::new(program)
        .args(args)
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map(|text| text.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
