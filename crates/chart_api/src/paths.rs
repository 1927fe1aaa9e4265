use std::env;
use std::path::{Path, PathBuf};

/// Ephemeris data location, relative to the install root
pub const EPHEMERIS_DATA_DIR: &str = "data/swiss_ephemeris";

/// Find the Cargo workspace root by traversing up from `start` until a
/// Cargo.toml that contains a [workspace] section.
pub fn find_workspace_root(start: &Path) -> Option<PathBuf> {
    let mut dir = start.to_path_buf();
    for _ in 0..10 {
        // safety limit
        let candidate = dir.join("Cargo.toml");
        if candidate.exists() {
            if let Ok(content) = std::fs::read_to_string(&candidate) {
                if content.contains("[workspace]") {
                    return Some(dir);
                }
            }
        }
        if !dir.pop() {
            break;
        }
    }
    None
}

/// Directory the service treats as its install location.
///
/// The workspace around the working directory wins, then the executable's
/// own directory.
pub fn install_root() -> PathBuf {
    let cwd = env::current_dir().ok();
    let exe_dir = env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf));
    resolve_install_root(cwd.as_deref(), exe_dir)
}

fn resolve_install_root(cwd: Option<&Path>, exe_dir: Option<PathBuf>) -> PathBuf {
    cwd.and_then(find_workspace_root)
        .or(exe_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

pub fn ephemeris_data_path(root: &Path) -> PathBuf {
    root.join(EPHEMERIS_DATA_DIR)
}
