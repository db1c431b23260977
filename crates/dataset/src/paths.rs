use std::env;
use std::path::{Path, PathBuf};

/// Resolves the directory the application runs from.
///
/// Prefers the directory containing the executable so the dataset can sit
/// next to the installed binary; falls back to the current working directory
/// when the executable path is unavailable.
pub fn resolve_app_dir() -> PathBuf {
    if let Ok(exe) = env::current_exe() {
        if let Some(dir) = exe.parent() {
            return dir.to_path_buf();
        }
    }
    env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

/// Resolves a configured dataset path against the application directory.
///
/// Absolute paths pass through untouched; relative paths are joined onto
/// [`resolve_app_dir`].
pub fn resolve_data_path(configured: &Path) -> PathBuf {
    if configured.is_absolute() {
        configured.to_path_buf()
    } else {
        resolve_app_dir().join(configured)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_dir_is_absolute() {
        assert!(resolve_app_dir().is_absolute());
    }

    #[test]
    fn absolute_paths_pass_through() {
        let path = Path::new("/data/salaries.csv");
        assert_eq!(resolve_data_path(path), path);
    }

    #[test]
    fn relative_paths_are_joined_onto_the_app_dir() {
        let resolved = resolve_data_path(Path::new("salaries.csv"));
        assert_eq!(resolved, resolve_app_dir().join("salaries.csv"));
    }
}
