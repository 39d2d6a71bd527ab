use std::env;
use std::path::{Path, PathBuf};

use nix::unistd::{access, AccessFlags};

/// Searches the PATH directories, in order, for an executable with this
/// name. A name containing a slash is taken as a path and probed directly,
/// never searched.
pub fn locate_executable(name: &str) -> Option<PathBuf> {
    if name.contains('/') {
        let candidate = PathBuf::from(name);
        return is_executable(&candidate).then_some(candidate);
    }

    let search_path = env::var("PATH").ok()?;
    for dir in search_path.split(':') {
        if dir.is_empty() {
            continue;
        }
        let candidate = Path::new(dir).join(name);
        if is_executable(&candidate) {
            return Some(candidate);
        }
    }
    None
}

pub(crate) fn is_executable(path: &Path) -> bool {
    // Regular files only; directories also pass an X_OK check.
    path.is_file() && access(path, AccessFlags::X_OK).is_ok()
}
