//! Build script for wiform-ve
//!
//! Stamps both binaries with `GIT_HASH`, `BUILD_TIMESTAMP` and
//! `BUILD_PROFILE`, read back with `env!` in the startup log line.
//! No `rerun-if-changed` is emitted, so the stamp is refreshed on every build.

use std::process::Command;

/// Short commit hash, with a `-dirty` suffix for uncommitted changes
fn git_hash() -> Option<String> {
    let run = |args: &[&str]| {
        Command::new("git")
            .args(args)
            .output()
            .ok()
            .filter(|out| out.status.success())
            .and_then(|out| String::from_utf8(out.stdout).ok())
    };

    let hash = run(&["rev-parse", "--short=8", "HEAD"])?.trim().to_string();
    let dirty = run(&["status", "--porcelain"]).is_some_and(|s| !s.trim().is_empty());

    Some(if dirty { format!("{hash}-dirty") } else { hash })
}

fn main() {
    let stamps = [
        ("GIT_HASH", git_hash().unwrap_or_else(|| "unknown".into())),
        (
            "BUILD_TIMESTAMP",
            chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
        ),
        (
            "BUILD_PROFILE",
            std::env::var("PROFILE").unwrap_or_else(|_| "unknown".into()),
        ),
    ];

    for (key, value) in stamps {
        println!("cargo:rustc-env={key}={value}");
    }
}
