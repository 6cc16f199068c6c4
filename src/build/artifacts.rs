//! Artifact staging helpers.
//!
//! Path derivations and copy primitives used by the staging steps. These are
//! plain functions so the naming conventions are testable without a build
//! tree.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Deployment name for the mpv library: the shell loads `mpv-1.dll`, the
/// dev archives ship `libmpv-2.dll`.
pub fn mpv_deploy_name(file_name: &str) -> String {
    file_name.replace("lib", "").replacen('2', "1", 1)
}

/// The OpenSSL crypto library redistributed with the build, derived from
/// the resolved openssl.exe path (it ships in the same bin directory).
pub fn crypto_library_path(openssl_exe: &Path) -> PathBuf {
    openssl_exe.with_file_name("libcrypto-1_1.dll")
}

/// CMake prefix directory for the resolved Qt installation, derived from
/// the windeployqt.exe path (`<kit>/bin/windeployqt.exe` →
/// `<kit>/lib/cmake/Qt5`).
pub fn qt_cmake_prefix(windeployqt: &Path) -> Option<PathBuf> {
    let kit = windeployqt.parent()?.parent()?;
    Some(kit.join("lib").join("cmake").join("Qt5"))
}

/// Locate node.exe through the PATH directories, matching the install
/// directory by name.
pub fn find_node_in_path() -> Option<PathBuf> {
    find_node_in_dirs(path_entries())
}

/// PATH entries of the current process.
fn path_entries() -> Vec<PathBuf> {
    std::env::var_os("PATH")
        .map(|path| std::env::split_paths(&path).collect())
        .unwrap_or_default()
}

/// Inner lookup over explicit directories, for testability.
pub fn find_node_in_dirs(dirs: impl IntoIterator<Item = PathBuf>) -> Option<PathBuf> {
    for dir in dirs {
        let Some(name) = dir.file_name() else {
            continue;
        };
        if name.to_string_lossy().to_ascii_lowercase().contains("node") {
            let candidate = dir.join("node.exe");
            if candidate.exists() {
                return Some(candidate);
            }
        }
    }
    None
}

/// Recursively copy a directory tree.
pub fn copy_tree(src: &Path, dest: &Path) -> Result<()> {
    fs::create_dir_all(dest)?;
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let target = dest.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_tree(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn mpv_deploy_name_rewrites_library_name() {
        assert_eq!(mpv_deploy_name("libmpv-2.dll"), "mpv-1.dll");
    }

    #[test]
    fn mpv_deploy_name_leaves_other_digits_alone() {
        assert_eq!(mpv_deploy_name("libmpv-2.v2.dll"), "mpv-1.v2.dll");
    }

    #[test]
    fn crypto_library_sits_next_to_openssl() {
        let path = crypto_library_path(Path::new(
            "C:\\Program Files (x86)\\OpenSSL-Win32\\bin\\openssl.exe",
        ));
        assert!(path.ends_with("libcrypto-1_1.dll"));
        assert_eq!(
            path.parent(),
            Path::new("C:\\Program Files (x86)\\OpenSSL-Win32\\bin\\openssl.exe").parent()
        );
    }

    #[test]
    fn qt_cmake_prefix_derives_from_windeployqt() {
        let prefix = qt_cmake_prefix(Path::new("/qt/5.12.7/msvc2017/bin/windeployqt.exe")).unwrap();
        assert_eq!(prefix, Path::new("/qt/5.12.7/msvc2017/lib/cmake/Qt5"));
    }

    #[test]
    fn qt_cmake_prefix_none_for_bare_name() {
        assert!(qt_cmake_prefix(Path::new("windeployqt.exe")).is_none());
    }

    #[test]
    fn find_node_matches_directory_name() {
        let temp = TempDir::new().unwrap();
        let nodejs = temp.path().join("nodejs");
        fs::create_dir_all(&nodejs).unwrap();
        fs::write(nodejs.join("node.exe"), "").unwrap();
        let other = temp.path().join("other");
        fs::create_dir_all(&other).unwrap();

        let found = find_node_in_dirs([other, nodejs.clone()]).unwrap();
        assert_eq!(found, nodejs.join("node.exe"));
    }

    #[test]
    fn find_node_requires_the_binary() {
        let temp = TempDir::new().unwrap();
        let nodejs = temp.path().join("nodejs");
        fs::create_dir_all(&nodejs).unwrap();

        assert!(find_node_in_dirs([nodejs]).is_none());
    }

    #[test]
    fn copy_tree_copies_nested_files() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("DS");
        fs::create_dir_all(src.join("nested")).unwrap();
        fs::write(src.join("plugin.dll"), "a").unwrap();
        fs::write(src.join("nested").join("more.dll"), "b").unwrap();

        let dest = temp.path().join("out").join("DS");
        copy_tree(&src, &dest).unwrap();

        assert_eq!(fs::read_to_string(dest.join("plugin.dll")).unwrap(), "a");
        assert_eq!(
            fs::read_to_string(dest.join("nested").join("more.dll")).unwrap(),
            "b"
        );
    }
}
