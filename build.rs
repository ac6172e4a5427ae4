use std::env;
use std::fs;
use std::path::PathBuf;
use std::process::Command;

// Requirement floor in Cargo.toml; used when no lock file can be found.
const REQWEST_FALLBACK: &str = "0.12.0";

// Exposes the compiler version and the resolved reqwest version to the crate
// for the User-Agent header and the startup version check.
fn main() {
    let rustc = env::var("RUSTC").unwrap_or_else(|_| "rustc".to_string());
    let version = Command::new(rustc)
        .arg("--version")
        .output()
        .ok()
        .and_then(|out| String::from_utf8(out.stdout).ok())
        .and_then(|text| text.split_whitespace().nth(1).map(str::to_string))
        .unwrap_or_else(|| "unknown".to_string());

    println!("cargo:rustc-env=PAYGATE_RUSTC_VERSION={}", version);
    println!("cargo:rerun-if-env-changed=RUSTC");

    let reqwest = match find_lock_file() {
        Some(lock) => {
            println!("cargo:rerun-if-changed={}", lock.display());
            fs::read_to_string(&lock)
                .ok()
                .and_then(|content| locked_version(&content, "reqwest", "0.12."))
        },
        None => None,
    };
    let reqwest = reqwest.unwrap_or_else(|| {
        println!("cargo:warning=reqwest not found in Cargo.lock, reporting {}", REQWEST_FALLBACK);
        REQWEST_FALLBACK.to_string()
    });
    println!("cargo:rustc-env=PAYGATE_REQWEST_VERSION={}", reqwest);
}

// The lock file sits next to the manifest, or at the root of an enclosing
// workspace when this crate is a member or a path dependency.
fn find_lock_file() -> Option<PathBuf> {
    let manifest_dir = PathBuf::from(env::var_os("CARGO_MANIFEST_DIR")?);
    manifest_dir
        .ancestors()
        .map(|dir| dir.join("Cargo.lock"))
        .find(|path| path.is_file())
}

// Cargo.lock lists one `[[package]]` table per resolved crate, with `name`
// followed by `version`.
fn locked_version(lock: &str, name: &str, series: &str) -> Option<String> {
    let name_line = format!("name = \"{}\"", name);
    let mut lines = lock.lines().map(str::trim);
    while let Some(line) = lines.next() {
        if line != name_line {
            continue;
        }
        let version = lines
            .next()
            .and_then(|next| next.strip_prefix("version = \""))
            .and_then(|rest| rest.strip_suffix('"'));
        if let Some(version) = version.filter(|v| v.starts_with(series)) {
            return Some(version.to_string());
        }
    }
    None
}
