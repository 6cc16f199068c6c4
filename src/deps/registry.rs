//! Built-in dependency registry.
//!
//! The eight external dependencies of the shell build, as data. Probe
//! commands, install-path patterns, download URLs, and archive layouts all
//! live here so the resolver stays a single generic algorithm.

use super::descriptor::{ArchiveLayout, DependencyDescriptor, VersionFlag};

/// Descriptor table, in resolution order.
///
/// Pattern syntax: a leading `:` marks a drive-relative pattern; `*` matches
/// within a single path segment. Versions pinned here are the ones the shell
/// build is known to work with.
const DESCRIPTORS: &[DependencyDescriptor] = &[
    DependencyDescriptor {
        name: "git",
        display_name: "Git",
        probe: &["git", "--version"],
        version_probe: Some(VersionFlag::Long),
        install_patterns: &[":\\Program Files\\Git"],
        companions: &[],
        download_url: "https://github.com/git-for-windows/git/releases/download/v2.39.2.windows.1/Git-2.39.2-64-bit.exe",
        archive_layout: None,
        install_note: None,
    },
    DependencyDescriptor {
        name: "qt",
        display_name: "Qt",
        probe: &["windeployqt.exe", "--version"],
        version_probe: Some(VersionFlag::Long),
        install_patterns: &[":\\Qt\\Qt5.12.7\\5.12.7\\msvc*\\bin\\windeployqt.exe"],
        companions: &[
            ":\\Qt\\Qt5.12.7\\installerResources\\qt.qt5.5127.qtwebengine*",
            ":\\Qt\\Qt5.12.7\\installerResources\\qt.qt5.5127.win32_msvc*",
        ],
        download_url: "https://qt.mirror.constant.com/archive/qt/5.12/5.12.7/qt-opensource-windows-x86-5.12.7.exe",
        archive_layout: None,
        install_note: None,
    },
    DependencyDescriptor {
        name: "openssl",
        display_name: "OpenSSL",
        probe: &["openssl", "version"],
        version_probe: Some(VersionFlag::Bare),
        install_patterns: &[":\\Program Files (x86)\\OpenSSL-Win*\\bin\\openssl.exe"],
        companions: &[],
        download_url: "https://slproweb.com/download/Win32OpenSSL-1_1_1t.exe",
        archive_layout: None,
        install_note: None,
    },
    DependencyDescriptor {
        name: "nodejs",
        display_name: "NodeJS",
        probe: &["node", "--version"],
        version_probe: Some(VersionFlag::Long),
        install_patterns: &[":\\Program Files\\nodejs\\node.exe"],
        companions: &[],
        download_url: "https://nodejs.org/dist/v8.17.0/win-x86/node.exe",
        archive_layout: None,
        install_note: None,
    },
    DependencyDescriptor {
        name: "ffmpeg",
        display_name: "FFMpeg",
        probe: &["ffmpeg", "--version"],
        version_probe: Some(VersionFlag::Long),
        // Relative pattern: a previous fetch-and-install leaves ffmpeg.exe
        // under the staging tree in the working directory.
        install_patterns: &["ffmpeg.exe"],
        companions: &[],
        download_url: "https://github.com/GyanD/codexffmpeg/releases/download/4.3.1-2020-11-08/ffmpeg-4.3.1-2020-11-08-full_build-shared.zip",
        archive_layout: Some(ArchiveLayout::NestedBin { exe: "ffmpeg.exe" }),
        install_note: None,
    },
    DependencyDescriptor {
        name: "mpv",
        display_name: "MPV",
        // The build needs libmpv-2.dll, a library with no PATH presence.
        probe: &[],
        version_probe: None,
        install_patterns: &[":\\Program Files\\MPV\\bin\\mpv.exe"],
        companions: &[],
        download_url: "https://master.dl.sourceforge.net/project/mpv-player-windows/libmpv/mpv-dev-i686-20230312-git-9880b06.7z?viasf=1",
        archive_layout: Some(ArchiveLayout::RootFile { file: "libmpv-2.dll" }),
        install_note: None,
    },
    DependencyDescriptor {
        name: "vs_community",
        display_name: "VS_Community",
        // Resolution targets vcvars32.bat, which has no version probe.
        probe: &[],
        version_probe: None,
        install_patterns: &[
            ":\\Program Files (x86)\\Microsoft Visual Studio\\2017\\Community\\VC\\Auxiliary\\Build\\vcvars32.bat",
        ],
        companions: &[],
        download_url: "https://download.visualstudio.microsoft.com/download/pr/4de9b77e-bbd8-4a05-a083-662e1a187b94/fa117cc0e7e02d61a420803605d5723993d590269e92d5b1cd85db2e7b60d48c/vs_Community.exe",
        archive_layout: None,
        install_note: Some(
            "Select the \"Desktop development with C++\" workload during installation (roughly 4.5 GB).",
        ),
    },
    DependencyDescriptor {
        name: "cmake",
        display_name: "CMake",
        probe: &["cmake", "--version"],
        version_probe: Some(VersionFlag::Long),
        install_patterns: &[":\\Program Files\\CMake\\bin\\cmake.exe"],
        companions: &[],
        download_url: "https://github.com/Kitware/CMake/releases/download/v3.26.0/cmake-3.26.0-windows-x86_64.msi",
        archive_layout: None,
        install_note: None,
    },
];

/// Registry of all known build dependencies.
#[derive(Debug, Default)]
pub struct DependencyRegistry;

impl DependencyRegistry {
    /// Create the registry with the built-in descriptor table.
    pub fn builtin() -> Self {
        Self
    }

    /// Descriptors in resolution order.
    pub fn iter(&self) -> impl Iterator<Item = &'static DependencyDescriptor> {
        DESCRIPTORS.iter()
    }

    /// Look up a descriptor by canonical name.
    pub fn get(&self, name: &str) -> Option<&'static DependencyDescriptor> {
        DESCRIPTORS.iter().find(|d| d.name == name)
    }

    /// Canonical names in resolution order.
    pub fn names(&self) -> Vec<&'static str> {
        DESCRIPTORS.iter().map(|d| d.name).collect()
    }

    /// Number of built-in dependencies.
    pub fn len(&self) -> usize {
        DESCRIPTORS.len()
    }

    /// Always false; present for API symmetry.
    pub fn is_empty(&self) -> bool {
        DESCRIPTORS.is_empty()
    }
}
