//! System-wide constants and default paths.

use std::path::PathBuf;
use std::sync::OnceLock;

/// Fallback registry location when no home directory can be resolved.
pub const SYSTEM_DATA_DIR: &str = "/var/lib/berth";

/// Returns the data directory, preferring `$HOME/.berth` and falling back
/// to `/var/lib/berth` when no home directory is available.
fn resolve_data_dir() -> PathBuf {
    if let Ok(home) = std::env::var("HOME").or_else(|_| std::env::var("USERPROFILE")) {
        let user_dir = PathBuf::from(home).join(".berth");
        if std::fs::create_dir_all(&user_dir).is_ok() {
            return user_dir;
        }
    }
    PathBuf::from(SYSTEM_DATA_DIR)
}

static DATA_DIR: OnceLock<PathBuf> = OnceLock::new();

/// Returns the resolved data directory for this session.
pub fn data_dir() -> &'static PathBuf {
    DATA_DIR.get_or_init(resolve_data_dir)
}

/// Returns the default registry file path.
pub fn default_registry_file() -> PathBuf {
    data_dir().join("registry.json")
}

/// Default listen address for the web UI and API.
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:5555";

/// Reported mount path for containers without a bind mount.
pub const NO_BIND_MOUNT: &str = "No bind mount";
