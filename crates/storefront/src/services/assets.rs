//! Cancellable loading of 3D model assets.
//!
//! Each [`AssetLoader::load`] spawns the read as its own task and hands back
//! an [`AssetLoad`] that owns the task. Dropping the handle aborts the task,
//! so a viewer that unmounts (or a client that disconnects) never leaves a
//! read running in the background. Completed reads are memoised in a
//! `moka` cache keyed by relative path.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use axum::body::Bytes;
use moka::future::Cache;
use thiserror::Error;
use tokio::task::JoinHandle;

/// Errors loading an asset.
#[derive(Debug, Clone, Error)]
pub enum AssetError {
    /// Path escapes the models directory or is malformed.
    #[error("invalid asset path: {0}")]
    InvalidPath(String),

    /// No such file.
    #[error("asset not found: {0}")]
    NotFound(String),

    /// The read did not finish within the configured limit.
    #[error("asset load timed out after {timeout:?}: {path}")]
    Timeout { path: String, timeout: Duration },

    /// Filesystem error other than not-found.
    #[error("failed to read asset {path}: {message}")]
    Io { path: String, message: String },

    /// The load task panicked or was cancelled.
    #[error("asset load task failed: {0}")]
    Task(String),
}

/// A loaded asset.
#[derive(Debug, Clone)]
pub struct Asset {
    pub bytes: Bytes,
    pub content_type: &'static str,
}

/// Content type for a model file, by extension.
#[must_use]
pub fn content_type_for(path: &str) -> &'static str {
    let ext = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("gltf") => "model/gltf+json",
        Some("glb") => "model/gltf-binary",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        _ => "application/octet-stream",
    }
}

/// Validate a path relative to the models directory.
///
/// # Errors
///
/// Rejects empty paths, absolute paths, backslashes, drive prefixes and any
/// empty, `.` or `..` segment.
pub fn sanitize_path(path: &str) -> Result<&str, AssetError> {
    let invalid = || AssetError::InvalidPath(path.to_owned());
    if path.is_empty() || path.starts_with('/') || path.contains(['\\', ':']) {
        return Err(invalid());
    }
    if path
        .split('/')
        .any(|segment| segment.is_empty() || segment == "." || segment == "..")
    {
        return Err(invalid());
    }
    Ok(path)
}

/// Loads model files from a directory with caching and optional timeout.
#[derive(Clone)]
pub struct AssetLoader {
    root: Arc<PathBuf>,
    cache: Cache<String, Asset>,
    timeout: Option<Duration>,
}

impl AssetLoader {
    /// Create a loader rooted at `root`, caching up to `capacity` files.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, capacity: u64, timeout: Option<Duration>) -> Self {
        Self {
            root: Arc::new(root.into()),
            cache: Cache::new(capacity),
            timeout,
        }
    }

    /// Start loading `path` (relative to the models directory).
    ///
    /// # Errors
    ///
    /// Returns `AssetError::InvalidPath` immediately for unsafe paths; all
    /// other failures surface from [`AssetLoad::wait`].
    pub fn load(&self, path: &str) -> Result<AssetLoad, AssetError> {
        let path = sanitize_path(path)?.to_owned();
        let loader = self.clone();
        Ok(AssetLoad::spawn(async move { loader.fetch(path).await }))
    }

    async fn fetch(&self, path: String) -> Result<Asset, AssetError> {
        let full = self.root.join(&path);
        let read = self.cache.try_get_with(path.clone(), read_asset(full, path.clone()));

        let result = match self.timeout {
            Some(timeout) => tokio::time::timeout(timeout, read)
                .await
                .map_err(|_| AssetError::Timeout {
                    path: path.clone(),
                    timeout,
                })?,
            None => read.await,
        };

        result.map_err(|e: Arc<AssetError>| (*e).clone())
    }
}

async fn read_asset(full: PathBuf, path: String) -> Result<Asset, AssetError> {
    let bytes = tokio::fs::read(&full).await.map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => AssetError::NotFound(path.clone()),
        _ => AssetError::Io {
            path: path.clone(),
            message: e.to_string(),
        },
    })?;

    tracing::debug!(path = %path, size = bytes.len(), "asset loaded");
    Ok(Asset {
        bytes: Bytes::from(bytes),
        content_type: content_type_for(&path),
    })
}

/// An in-flight asset load.
///
/// Dropping the handle aborts the load.
#[derive(Debug)]
pub struct AssetLoad {
    handle: JoinHandle<Result<Asset, AssetError>>,
}

impl AssetLoad {
    fn spawn<F>(load: F) -> Self
    where
        F: Future<Output = Result<Asset, AssetError>> + Send + 'static,
    {
        Self {
            handle: tokio::spawn(load),
        }
    }

    /// Whether the load has completed (successfully or not).
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the load to complete.
    ///
    /// # Errors
    ///
    /// Returns the load's error, or `AssetError::Task` if the task panicked.
    pub async fn wait(mut self) -> Result<Asset, AssetError> {
        match (&mut self.handle).await {
            Ok(result) => result,
            Err(e) => Err(AssetError::Task(e.to_string())),
        }
    }
}

impl Drop for AssetLoad {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
