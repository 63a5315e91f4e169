//! Cloud storage output support (S3, R2, GCS, Azure) and local files

use crate::error::{Error, Result};
use bytes::Bytes;
use object_store::aws::AmazonS3Builder;
use object_store::azure::MicrosoftAzureBuilder;
use object_store::gcp::GoogleCloudStorageBuilder;
use object_store::local::LocalFileSystem;
use object_store::path::Path as ObjectPath;
use object_store::ObjectStore;
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// Storage destination parsed from a URL or local directory
#[derive(Debug, Clone)]
pub struct CloudDestination {
    /// The object store implementation
    store: Arc<dyn ObjectStore>,
    /// Base path prefix within the bucket/container
    prefix: String,
    /// URL scheme (s3, r2, gs, az, file)
    scheme: String,
    /// Bucket URL or local directory, for reporting written locations
    root: String,
}

impl CloudDestination {
    /// Parse a destination URL and create the matching object store
    ///
    /// Supported formats:
    /// - `s3://bucket/path/` - AWS S3
    /// - `r2://bucket/path/` - Cloudflare R2 (S3-compatible)
    /// - `gs://bucket/path/` - Google Cloud Storage
    /// - `az://container/path/` - Azure Blob Storage
    /// - `/local/path/` or `./path/` - Local filesystem (created if missing)
    pub fn parse(url: &str) -> Result<Self> {
        if url.starts_with("s3://") {
            Self::parse_s3(url, false)
        } else if url.starts_with("r2://") {
            Self::parse_s3(url, true)
        } else if url.starts_with("gs://") {
            Self::parse_gcs(url)
        } else if url.starts_with("az://") {
            Self::parse_azure(url)
        } else {
            Self::parse_local(url)
        }
    }

    /// Parse S3 or R2 URL
    fn parse_s3(url: &str, is_r2: bool) -> Result<Self> {
        let scheme = if is_r2 { "r2" } else { "s3" };
        let (bucket, prefix) = split_bucket(url, scheme)?;

        let mut builder = AmazonS3Builder::from_env().with_bucket_name(bucket);

        // AWS_ENDPOINT is read by from_env(); R2_ENDPOINT_URL wins for r2://
        if is_r2 {
            if let Ok(endpoint) = std::env::var("R2_ENDPOINT_URL") {
                builder = builder.with_endpoint(endpoint);
            }
        }

        let store = builder
            .build()
            .map_err(|e| Error::config(format!("Failed to create {scheme} client: {e}")))?;

        Ok(Self {
            store: Arc::new(store),
            prefix,
            scheme: scheme.to_string(),
            root: format!("{scheme}://{bucket}"),
        })
    }

    /// Parse GCS URL
    fn parse_gcs(url: &str) -> Result<Self> {
        let (bucket, prefix) = split_bucket(url, "gs")?;

        let store = GoogleCloudStorageBuilder::from_env()
            .with_bucket_name(bucket)
            .build()
            .map_err(|e| Error::config(format!("Failed to create GCS client: {e}")))?;

        Ok(Self {
            store: Arc::new(store),
            prefix,
            scheme: "gs".to_string(),
            root: format!("gs://{bucket}"),
        })
    }

    /// Parse Azure Blob URL
    fn parse_azure(url: &str) -> Result<Self> {
        let (container, prefix) = split_bucket(url, "az")?;

        let store = MicrosoftAzureBuilder::from_env()
            .with_container_name(container)
            .build()
            .map_err(|e| Error::config(format!("Failed to create Azure client: {e}")))?;

        Ok(Self {
            store: Arc::new(store),
            prefix,
            scheme: "az".to_string(),
            root: format!("az://{container}"),
        })
    }

    /// Parse local filesystem path
    fn parse_local(path: &str) -> Result<Self> {
        let path = path.strip_prefix("file://").unwrap_or(path);
        let path = if path.is_empty() { "." } else { path };

        std::fs::create_dir_all(path)
            .map_err(|e| Error::config(format!("Failed to create directory {path}: {e}")))?;

        let store = LocalFileSystem::new_with_prefix(path)
            .map_err(|e| Error::config(format!("Failed to create local store: {e}")))?;

        Ok(Self {
            store: Arc::new(store),
            prefix: String::new(),
            scheme: "file".to_string(),
            root: path.trim_end_matches('/').to_string(),
        })
    }

    /// Get the scheme (s3, r2, gs, az, file)
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Write bytes to a file in the destination, returning its location
    pub async fn write(&self, filename: &str, data: Bytes) -> Result<String> {
        let path = if self.prefix.is_empty() {
            ObjectPath::from(filename)
        } else {
            ObjectPath::from(format!("{}/{filename}", self.prefix.trim_end_matches('/')))
        };

        self.store
            .put(&path, data.into())
            .await
            .map_err(|e| Error::output(format!("Failed to write {path}: {e}")))?;

        Ok(format!("{}/{path}", self.root))
    }
}

/// Split `scheme://bucket/some/prefix` into bucket and prefix
fn split_bucket<'a>(url: &'a str, scheme: &str) -> Result<(&'a str, String)> {
    let without_scheme = url
        .strip_prefix(&format!("{scheme}://"))
        .ok_or_else(|| Error::config(format!("Invalid {scheme} URL: {url}")))?;

    let (bucket, prefix) = match without_scheme.split_once('/') {
        Some((bucket, prefix)) => (bucket, prefix.trim_end_matches('/').to_string()),
        None => (without_scheme, String::new()),
    };

    if bucket.is_empty() {
        return Err(Error::config(format!("Missing bucket in {scheme} URL: {url}")));
    }

    Ok((bucket, prefix))
}

/// Where a payload goes: standard output or a file in a destination
#[derive(Debug, Clone)]
pub enum OutputTarget {
    /// Write to standard output
    Stdout,
    /// Write `filename` inside `destination`
    Store {
        /// Bucket, container or local directory
        destination: CloudDestination,
        /// Object or file name
        filename: String,
    },
}

impl OutputTarget {
    /// Resolve a target string
    ///
    /// `-` means standard output. A target whose last segment has the same
    /// extension as `default_filename` names the file itself; anything else
    /// is a directory that receives `default_filename`.
    pub fn parse(target: &str, default_filename: &str) -> Result<Self> {
        if target == "-" {
            return Ok(Self::Stdout);
        }

        let (dir, filename) = split_target(target, default_filename);
        debug!("Output target '{target}' resolved to dir '{dir}', file '{filename}'");

        Ok(Self::Store {
            destination: CloudDestination::parse(&dir)?,
            filename,
        })
    }

    /// Write the payload, returning a human-readable location
    pub async fn write(&self, data: Bytes) -> Result<String> {
        match self {
            Self::Stdout => {
                let mut stdout = tokio::io::stdout();
                stdout.write_all(&data).await?;
                stdout.write_all(b"\n").await?;
                stdout.flush().await?;
                Ok("stdout".to_string())
            }
            Self::Store {
                destination,
                filename,
            } => destination.write(filename, data).await,
        }
    }
}

/// Split a target into directory part and file name
fn split_target(target: &str, default_filename: &str) -> (String, String) {
    let trimmed = target.trim_end_matches('/');
    let scheme_end = trimmed.find("://").map_or(0, |idx| idx + 3);

    let (dir, last) = match trimmed[scheme_end..].rfind('/') {
        Some(idx) => {
            let split = scheme_end + idx;
            (&trimmed[..split], &trimmed[split + 1..])
        }
        None if scheme_end > 0 => (trimmed, ""),
        None => ("", trimmed),
    };

    let extension = default_filename.rsplit_once('.').map(|(_, ext)| ext);
    let names_file = match (last.rsplit_once('.'), extension) {
        (Some((stem, ext)), Some(expected)) => !stem.is_empty() && ext == expected,
        _ => false,
    };

    if names_file {
        (dir.to_string(), last.to_string())
    } else {
        (trimmed.to_string(), default_filename.to_string())
    }
}
