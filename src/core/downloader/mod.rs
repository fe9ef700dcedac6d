pub mod client;

pub use client::{DownloadFailure, Downloader, SyncSummary};
