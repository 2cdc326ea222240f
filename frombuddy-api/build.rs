//! Embeds build identification for `/health` and the startup log line.

use std::path::Path;
use std::process::Command;

const UNKNOWN: &str = "unknown";

fn main() {
    watch_git_head();

    emit("GIT_HASH", &git_short_hash().unwrap_or_else(|| UNKNOWN.to_string()));
    emit("BUILD_TIMESTAMP", &chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string());
    emit("BUILD_PROFILE", &std::env::var("PROFILE").unwrap_or_else(|_| UNKNOWN.to_string()));
}

fn emit(key: &str, value: &str) {
    println!("cargo:rustc-env={}={}", key, value);
}

fn git_short_hash() -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--short=10", "HEAD"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let hash = String::from_utf8(output.stdout).ok()?.trim().to_string();
    (!hash.is_empty()).then_some(hash)
}

/// Rebuild when HEAD moves; outside a checkout only this script triggers reruns
fn watch_git_head() {
    let head = Path::new("../.git/HEAD");
    if head.exists() {
        println!("cargo:rerun-if-changed={}", head.display());
    }
    println!("cargo:rerun-if-changed=build.rs");
}
