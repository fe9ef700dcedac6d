use std::ffi::OsString;
use std::path::{Path, PathBuf};

use futures_util::StreamExt;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::core::error::TransportError;
use crate::core::http::Transport;

/// Why a single file transfer did not complete.
#[derive(Debug, Error)]
pub enum DownloadFailure {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("write to {path:?} failed: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl DownloadFailure {
    fn write(path: &Path) -> impl FnOnce(std::io::Error) -> Self + '_ {
        move |source| DownloadFailure::Write {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Outcome of an idempotent batch: files fetched vs. files already on disk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncSummary {
    pub downloaded: usize,
    pub present: usize,
}

/// Sequential streaming downloader.
///
/// Bodies are streamed into `<dest>.part` and renamed over `dest` once the
/// last chunk is written, so `dest` only ever exists complete.
pub struct Downloader<'a> {
    transport: &'a dyn Transport,
}

impl<'a> Downloader<'a> {
    pub fn new(transport: &'a dyn Transport) -> Self {
        Self { transport }
    }

    /// Download `url` to `dest`. The parent directory must already exist.
    ///
    /// Returns the number of bytes written.
    pub async fn download_file(&self, url: &str, dest: &Path) -> Result<u64, DownloadFailure> {
        let mut stream = self.transport.get_stream(url).await?;

        let part = part_path(dest);
        let mut written: u64 = 0;

        // Scoped so the handle is closed before the rename (required on Windows).
        {
            let mut file = tokio::fs::File::create(&part)
                .await
                .map_err(DownloadFailure::write(&part))?;

            while let Some(chunk) = stream.next().await {
                let chunk = chunk?;
                file.write_all(&chunk)
                    .await
                    .map_err(DownloadFailure::write(&part))?;
                written += chunk.len() as u64;
            }

            file.flush().await.map_err(DownloadFailure::write(&part))?;
        }

        tokio::fs::rename(&part, dest)
            .await
            .map_err(DownloadFailure::write(dest))?;

        debug!("Downloaded: {} -> {:?} ({} bytes)", url, dest, written);
        Ok(written)
    }
}

fn part_path(dest: &Path) -> PathBuf {
    let mut name = dest
        .file_name()
        .map(OsString::from)
        .unwrap_or_default();
    name.push(".part");
    dest.with_file_name(name)
}
