//! Install downloaded artifacts.
//!
//! Archives extract into a sibling directory named after the archive stem;
//! the archive is deleted afterwards and the dependency's layout convention
//! derives the binary path from the extracted tree. Installer executables
//! launch interactively and block until the operator confirms completion.

use std::fs;

use crate::deps::DependencyDescriptor;
use crate::error::{Result, RiggerError};
use crate::shell::ProcessRunner;
use crate::ui::{download_bar, UserInterface};

use super::download::{ArtifactKind, DownloadedFile, Downloader};

/// Fetches and installs missing dependencies.
pub struct Installer<'a> {
    downloader: Downloader,
    runner: &'a dyn ProcessRunner,
}

impl<'a> Installer<'a> {
    /// Create an installer over a downloader and a process runner.
    pub fn new(downloader: Downloader, runner: &'a dyn ProcessRunner) -> Self {
        Self { downloader, runner }
    }

    /// Fetch the descriptor's download URL and install it.
    ///
    /// Returns the resolved binary path for archives. Installer executables
    /// return `None`: they modify PATH or install into well-known locations,
    /// which a later resolution pass picks up.
    pub fn fetch_and_install(
        &self,
        desc: &DependencyDescriptor,
        ui: &mut dyn UserInterface,
    ) -> Result<Option<String>> {
        let suggested = format!("{}.exe", desc.display_name);
        let visible = ui.output_mode().shows_spinners();
        let label = format!("Downloading {}", desc.display_name);

        let mut bar: Option<indicatif::ProgressBar> = None;
        let file = self.downloader.fetch(desc.download_url, &suggested, &mut |pos, total| {
            let bar = bar.get_or_insert_with(|| download_bar(&label, total, visible));
            bar.set_position(pos);
        })?;
        if let Some(bar) = bar {
            bar.finish_and_clear();
        }
        ui.success(&format!("Download of {} complete.", desc.display_name));

        if file.kind.is_archive() {
            self.install_archive(desc, &file, ui).map(Some)
        } else {
            self.run_installer(desc, &file, ui)?;
            Ok(None)
        }
    }

    /// Extract an archive and derive the binary path by convention.
    fn install_archive(
        &self,
        desc: &DependencyDescriptor,
        file: &DownloadedFile,
        ui: &mut dyn UserInterface,
    ) -> Result<String> {
        let layout = desc.archive_layout.ok_or_else(|| RiggerError::ArchiveLayout {
            dependency: desc.name.to_string(),
        })?;

        ui.message("Downloaded an archive. Extracting...");

        let stem = file
            .path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| desc.display_name.to_string());
        let extract_dir = self.downloader.staging().join(stem);
        fs::create_dir_all(&extract_dir)?;

        match file.kind {
            ArtifactKind::Zip => extract_zip(&file.path, &extract_dir)?,
            ArtifactKind::SevenZip => extract_7z(&file.path, &extract_dir)?,
            ArtifactKind::Installer => unreachable!("install_archive called for installer"),
        }

        tracing::debug!(archive = %file.path.display(), "extraction complete, cleaning up");
        fs::remove_file(&file.path)?;

        let binary = layout.derive(&extract_dir)?;
        ui.success(&format!(
            "Installed {} to {}",
            desc.display_name,
            binary.display()
        ));
        Ok(binary.to_string_lossy().into_owned())
    }

    /// Launch an installer executable and wait for operator confirmation.
    fn run_installer(
        &self,
        desc: &DependencyDescriptor,
        file: &DownloadedFile,
        ui: &mut dyn UserInterface,
    ) -> Result<()> {
        ui.message(&format!(
            "Installing {}... Please complete the installation in the opened window.",
            desc.display_name
        ));
        if let Some(note) = desc.install_note {
            ui.warning(note);
        }

        let program = file.path.to_string_lossy();
        self.runner.run(&program, &[]).map_err(|e| {
            RiggerError::Other(anyhow::anyhow!(
                "failed to launch installer {}: {e}",
                file.path.display()
            ))
        })?;

        // Some installers hand off to a background process and return
        // immediately; wait for the operator either way.
        loop {
            if ui.confirm(
                "install.completed",
                &format!("Has the {} installation completed?", desc.display_name),
                true,
            )? {
                break;
            }
        }

        ui.message(&format!(
            "Run `rigger resolve` again after installing so {} can be located.",
            desc.display_name
        ));
        Ok(())
    }
}

/// Extract a zip archive.
fn extract_zip(archive: &std::path::Path, dest: &std::path::Path) -> Result<()> {
    let file = fs::File::open(archive)?;
    let mut zip = zip::ZipArchive::new(file).map_err(|e| RiggerError::Extract {
        path: archive.to_path_buf(),
        message: e.to_string(),
    })?;
    zip.extract(dest).map_err(|e| RiggerError::Extract {
        path: archive.to_path_buf(),
        message: e.to_string(),
    })
}

/// Extract a 7z archive.
fn extract_7z(archive: &std::path::Path, dest: &std::path::Path) -> Result<()> {
    sevenz_rust::decompress_file(archive, dest).map_err(|e| RiggerError::Extract {
        path: archive.to_path_buf(),
        message: e.to_string(),
    })
}
