//! HTTP downloads into the staging directory.
//!
//! Downloads stream to disk in chunks, reporting cumulative bytes through a
//! caller-supplied callback. The artifact kind (plain installer vs `.zip` vs
//! `.7z` archive) is decided from the response's declared content type or
//! the final request URL, and the staged file's extension is rewritten to
//! match. A missing `Content-Length` degrades progress to an indeterminate
//! indicator instead of failing.

use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::blocking::Client;

use crate::error::{Result, RiggerError};

/// Stream chunk size.
const CHUNK_SIZE: usize = 8192;

/// What kind of artifact a download produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    /// A `.zip` archive.
    Zip,
    /// A `.7z` archive.
    SevenZip,
    /// A plain installer executable.
    Installer,
}

impl ArtifactKind {
    /// True for archive kinds.
    pub fn is_archive(&self) -> bool {
        !matches!(self, Self::Installer)
    }

    /// File extension for the staged file.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Zip => "zip",
            Self::SevenZip => "7z",
            Self::Installer => "exe",
        }
    }
}

/// A completed download in the staging directory.
#[derive(Debug, Clone)]
pub struct DownloadedFile {
    /// Staged file path.
    pub path: PathBuf,
    /// Classified artifact kind.
    pub kind: ArtifactKind,
}

/// Classify a download from its content type and final URL.
pub fn classify(content_type: Option<&str>, final_url: &str) -> ArtifactKind {
    let ct = content_type.unwrap_or("");
    if ct.contains("zip") && !ct.contains("7z") || final_url.contains(".zip") {
        ArtifactKind::Zip
    } else if ct.contains("7z") || final_url.contains(".7z") {
        ArtifactKind::SevenZip
    } else {
        ArtifactKind::Installer
    }
}

/// Rewrite a suggested file name's extension to match the artifact kind.
pub fn staged_filename(suggested: &str, kind: ArtifactKind) -> String {
    let stem = suggested.rsplit_once('.').map_or(suggested, |(s, _)| s);
    format!("{stem}.{}", kind.extension())
}

/// Streams dependency installers and archives over HTTPS.
pub struct Downloader {
    client: Client,
    staging: PathBuf,
}

impl Downloader {
    /// Create a downloader writing into `staging`.
    ///
    /// Only the connection is bounded by a timeout; installers run to
    /// hundreds of megabytes, so there is no total-transfer deadline.
    pub fn new(staging: impl Into<PathBuf>) -> Self {
        Self {
            client: Client::builder()
                .user_agent("rigger")
                .connect_timeout(Duration::from_secs(30))
                .build()
                .expect("Failed to build HTTP client"),
            staging: staging.into(),
        }
    }

    /// The staging directory.
    pub fn staging(&self) -> &Path {
        &self.staging
    }

    /// Download `url` into the staging directory.
    ///
    /// `suggested_filename` names the staged file; its extension is
    /// rewritten per the classified kind. `on_progress` receives cumulative
    /// bytes and the total when the server declared one.
    pub fn fetch(
        &self,
        url: &str,
        suggested_filename: &str,
        on_progress: &mut dyn FnMut(u64, Option<u64>),
    ) -> Result<DownloadedFile> {
        let response = self.client.get(url).send().map_err(|e| {
            RiggerError::Network {
                url: url.to_string(),
                message: e.to_string(),
            }
        })?;

        if !response.status().is_success() {
            return Err(RiggerError::Network {
                url: url.to_string(),
                message: format!("HTTP {}", response.status()),
            });
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        let kind = classify(content_type.as_deref(), response.url().as_str());
        let total = response.content_length();

        if total.is_none() {
            tracing::debug!(url, "no Content-Length; progress is indeterminate");
        }

        fs::create_dir_all(&self.staging)?;
        let path = self.staging.join(staged_filename(suggested_filename, kind));
        self.stream_to(response, &path, url, total, on_progress)?;

        Ok(DownloadedFile { path, kind })
    }

    /// Download `url` to an exact destination path, no renaming.
    pub fn fetch_to(
        &self,
        url: &str,
        dest: &Path,
        on_progress: &mut dyn FnMut(u64, Option<u64>),
    ) -> Result<()> {
        let response = self.client.get(url).send().map_err(|e| {
            RiggerError::Network {
                url: url.to_string(),
                message: e.to_string(),
            }
        })?;

        if !response.status().is_success() {
            return Err(RiggerError::Network {
                url: url.to_string(),
                message: format!("HTTP {}", response.status()),
            });
        }

        let total = response.content_length();
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        self.stream_to(response, dest, url, total, on_progress)
    }

    fn stream_to(
        &self,
        mut response: reqwest::blocking::Response,
        dest: &Path,
        url: &str,
        total: Option<u64>,
        on_progress: &mut dyn FnMut(u64, Option<u64>),
    ) -> Result<()> {
        let mut file = fs::File::create(dest)?;
        let mut buffer = [0u8; CHUNK_SIZE];
        let mut written: u64 = 0;

        loop {
            let read = response.read(&mut buffer).map_err(|e| {
                RiggerError::Network {
                    url: url.to_string(),
                    message: e.to_string(),
                }
            })?;
            if read == 0 {
                break;
            }
            file.write_all(&buffer[..read])?;
            written += read as u64;
            on_progress(written, total);
        }

        file.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use tempfile::TempDir;

    #[test]
    fn classify_by_content_type() {
        assert_eq!(
            classify(Some("application/zip"), "https://x/file"),
            ArtifactKind::Zip
        );
        assert_eq!(
            classify(Some("application/x-7z-compressed"), "https://x/file"),
            ArtifactKind::SevenZip
        );
        assert_eq!(
            classify(Some("application/octet-stream"), "https://x/file"),
            ArtifactKind::Installer
        );
    }

    #[test]
    fn classify_by_url_when_content_type_is_generic() {
        assert_eq!(
            classify(Some("application/octet-stream"), "https://x/tool.zip"),
            ArtifactKind::Zip
        );
        assert_eq!(
            classify(None, "https://x/mpv-dev-i686.7z?viasf=1"),
            ArtifactKind::SevenZip
        );
        assert_eq!(
            classify(None, "https://x/Git-2.39.2-64-bit.exe"),
            ArtifactKind::Installer
        );
    }

    #[test]
    fn staged_filename_rewrites_extension() {
        assert_eq!(staged_filename("FFMpeg.exe", ArtifactKind::Zip), "FFMpeg.zip");
        assert_eq!(staged_filename("MPV.exe", ArtifactKind::SevenZip), "MPV.7z");
        assert_eq!(staged_filename("Git.exe", ArtifactKind::Installer), "Git.exe");
        assert_eq!(staged_filename("noext", ArtifactKind::Zip), "noext.zip");
    }

    #[test]
    fn fetch_streams_body_and_reports_progress() {
        let server = MockServer::start();
        let body = vec![0xABu8; 20_000];
        server.mock(|when, then| {
            when.method(GET).path("/tool.bin");
            then.status(200)
                .header("content-type", "application/octet-stream")
                .body(&body);
        });

        let temp = TempDir::new().unwrap();
        let downloader = Downloader::new(temp.path().join("staging"));

        let mut last = (0u64, None);
        let file = downloader
            .fetch(&server.url("/tool.bin"), "Tool.exe", &mut |pos, total| {
                last = (pos, total);
            })
            .unwrap();

        assert_eq!(file.kind, ArtifactKind::Installer);
        assert_eq!(fs::read(&file.path).unwrap(), body);
        assert_eq!(last.0, body.len() as u64);
        assert_eq!(last.1, Some(body.len() as u64));
    }

    #[test]
    fn fetch_renames_by_content_type() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/download");
            then.status(200)
                .header("content-type", "application/zip")
                .body("PK");
        });

        let temp = TempDir::new().unwrap();
        let downloader = Downloader::new(temp.path());
        let file = downloader
            .fetch(&server.url("/download"), "FFMpeg.exe", &mut |_, _| {})
            .unwrap();

        assert_eq!(file.kind, ArtifactKind::Zip);
        assert_eq!(file.path.file_name().unwrap(), "FFMpeg.zip");
    }

    #[test]
    fn fetch_fails_on_http_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/missing");
            then.status(404);
        });

        let temp = TempDir::new().unwrap();
        let downloader = Downloader::new(temp.path());
        let err = downloader
            .fetch(&server.url("/missing"), "Tool.exe", &mut |_, _| {})
            .unwrap_err();

        assert!(matches!(err, RiggerError::Network { .. }));
        assert!(err.to_string().contains("404"));
    }

    #[test]
    fn fetch_to_writes_exact_destination() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/server.js");
            then.status(200).body("module.exports = {};");
        });

        let temp = TempDir::new().unwrap();
        let downloader = Downloader::new(temp.path().join("staging"));
        let dest = temp.path().join("tree").join("server.js");

        downloader
            .fetch_to(&server.url("/server.js"), &dest, &mut |_, _| {})
            .unwrap();

        assert_eq!(fs::read_to_string(&dest).unwrap(), "module.exports = {};");
    }
}
