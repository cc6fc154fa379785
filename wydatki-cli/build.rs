use std::process::Command;

/// Short commit hash for `wydatki --version`. A pre-set WYDATKI_BUILD_SHA
/// (release tarballs have no .git) wins over asking git.
fn build_sha() -> String {
    if let Ok(sha) = std::env::var("WYDATKI_BUILD_SHA") {
        if !sha.trim().is_empty() {
            return sha.trim().to_string();
        }
    }

    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let Ok(out) = Command::new("git")
        .args(["-C", &format!("{manifest_dir}/.."), "rev-parse", "--short", "HEAD"])
        .output()
    else {
        return "unknown".to_string();
    };

    let sha = String::from_utf8_lossy(&out.stdout).trim().to_string();
    if out.status.success() && !sha.is_empty() {
        sha
    } else {
        "unknown".to_string()
    }
}

fn main() {
    println!("cargo:rerun-if-env-changed=WYDATKI_BUILD_SHA");
    println!("cargo:rustc-env=WYDATKI_BUILD_SHA={}", build_sha());
}
