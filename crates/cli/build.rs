use std::process::Command;

/// Short hash of the checked-out commit, if this is a git checkout.
fn commit_hash() -> Option<String> {
    let out = Command::new("git").args(["rev-parse", "--short=7", "HEAD"]).output().ok()?;
    if !out.status.success() {
        return None;
    }
    let hash = String::from_utf8(out.stdout).ok()?;
    Some(hash.trim().to_owned()).filter(|h| !h.is_empty())
}

fn main() {
    for watched in ["../../.git/HEAD", "../../.git/refs/heads"] {
        println!("cargo:rerun-if-changed={watched}");
    }

    let hash = commit_hash().unwrap_or_else(|| "unknown".to_owned());
    let target = std::env::var("TARGET").unwrap_or_else(|_| "unknown".to_owned());

    // Read by `long_version()` in main.rs.
    println!("cargo:rustc-env=GIT_COMMIT_HASH={hash}");
    println!("cargo:rustc-env=TARGET={target}");
}
