//! Locating, verifying and fetching the three serialized artifacts the
//! predictor consumes: the random forest, the standard scaler and the label
//! encoder.

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;
use sha2::{Digest, Sha256};
use tokio::sync::Mutex;

/// File name of the serialized random forest inside an artifacts directory.
pub const FOREST_FILE: &str = "forest.json";
/// File name of the serialized standard scaler.
pub const SCALER_FILE: &str = "scaler.json";
/// File name of the serialized label encoder.
pub const ENCODER_FILE: &str = "encoder.json";
/// File name of the digest manifest published alongside a bundle.
pub const MANIFEST_FILE: &str = "manifest.json";

#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("artifact not found: {0}")]
    Missing(PathBuf),
    #[error("download error: {0}")]
    DownloadError(#[from] reqwest::Error),
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
    #[error("manifest error: {0}")]
    ManifestError(#[from] serde_json::Error),
    #[error("artifact verification failed")]
    VerificationFailed,
    #[error("hash mismatch for {artifact}: expected {expected}, got {actual}")]
    HashMismatch {
        artifact: String,
        expected: String,
        actual: String,
    },
    #[error("file {0} is not part of the artifact bundle")]
    UnknownArtifact(String),
}

/// SHA-256 digests published with an artifact bundle.
#[derive(Debug, Clone, Deserialize)]
pub struct ArtifactManifest {
    pub forest_sha256: String,
    pub scaler_sha256: String,
    pub encoder_sha256: String,
}

impl ArtifactManifest {
    fn digest_for(&self, file_name: &str) -> Result<&str, ArtifactError> {
        match file_name {
            FOREST_FILE => Ok(&self.forest_sha256),
            SCALER_FILE => Ok(&self.scaler_sha256),
            ENCODER_FILE => Ok(&self.encoder_sha256),
            other => Err(ArtifactError::UnknownArtifact(other.to_string())),
        }
    }
}

/// Resolves and manages the on-disk artifact bundle.
#[derive(Clone)]
pub struct ArtifactStore {
    artifacts_dir: PathBuf,
    download_lock: Arc<Mutex<()>>,
}

impl ArtifactStore {
    /// Creates a store over the default artifacts directory.
    pub fn new_default() -> io::Result<Self> {
        Self::new(Self::default_artifacts_dir())
    }

    /// Returns the default artifacts directory path.
    pub fn default_artifacts_dir() -> PathBuf {
        let cache_override = env::var("ALUMNUS_CACHE").ok();
        Self::resolve_artifacts_dir(cache_override.as_deref())
    }

    fn resolve_artifacts_dir(cache_override: Option<&str>) -> PathBuf {
        // 1. Caller-supplied cache override
        if let Some(path) = cache_override {
            return PathBuf::from(path).join("artifacts");
        }

        // 2. Use platform-specific cache directory
        if let Some(cache_dir) = dirs::cache_dir() {
            return cache_dir.join("alumnus").join("artifacts");
        }

        // 3. Fallback to user's home directory
        if let Some(home_dir) = dirs::home_dir() {
            return home_dir.join(".cache").join("alumnus").join("artifacts");
        }

        // 4. If all else fails, use system temp directory (platform agnostic)
        env::temp_dir().join("alumnus").join("artifacts")
    }

    pub fn new<P: AsRef<Path>>(artifacts_dir: P) -> io::Result<Self> {
        let artifacts_dir = artifacts_dir.as_ref().to_path_buf();
        fs::create_dir_all(&artifacts_dir)?;
        Ok(Self {
            artifacts_dir,
            download_lock: Arc::new(Mutex::new(())),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.artifacts_dir
    }

    pub fn forest_path(&self) -> PathBuf {
        self.artifacts_dir.join(FOREST_FILE)
    }

    pub fn scaler_path(&self) -> PathBuf {
        self.artifacts_dir.join(SCALER_FILE)
    }

    pub fn encoder_path(&self) -> PathBuf {
        self.artifacts_dir.join(ENCODER_FILE)
    }

    fn bundle_paths(&self) -> [PathBuf; 3] {
        [self.forest_path(), self.scaler_path(), self.encoder_path()]
    }

    /// True when all three artifact files are present.
    pub fn is_complete(&self) -> bool {
        log::info!("Checking artifact bundle in {:?}:", self.artifacts_dir);
        let mut complete = true;
        for path in self.bundle_paths() {
            let exists = path.exists();
            log::info!("  {:?} (exists: {})", path, exists);
            complete &= exists;
        }
        complete
    }

    /// Paths of the artifact files that are absent.
    pub fn missing(&self) -> Vec<PathBuf> {
        self.bundle_paths()
            .into_iter()
            .filter(|p| !p.exists())
            .collect()
    }

    fn verify_file(&self, path: &Path, expected_hash: &str) -> Result<bool, ArtifactError> {
        let bytes = fs::read(path)?;
        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        let hash = format!("{:x}", hasher.finalize());
        log::info!("Verifying {:?}: calculated {}, expected {}", path, hash, expected_hash);
        Ok(hash == expected_hash)
    }

    /// Verifies the on-disk bundle against a digest manifest.
    pub fn verify(&self, manifest: &ArtifactManifest) -> Result<bool, ArtifactError> {
        if !self.is_complete() {
            log::info!("One or more artifact files do not exist");
            return Ok(false);
        }
        for path in self.bundle_paths() {
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            if !self.verify_file(&path, manifest.digest_for(&file_name)?)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Reads the local digest manifest, if one was downloaded with the bundle.
    pub fn local_manifest(&self) -> Result<ArtifactManifest, ArtifactError> {
        let path = self.artifacts_dir.join(MANIFEST_FILE);
        if !path.exists() {
            return Err(ArtifactError::Missing(path));
        }
        let bytes = fs::read(path)?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn fetch_manifest(&self, base_url: &str) -> Result<ArtifactManifest, ArtifactError> {
        let url = format!("{}/{}", base_url.trim_end_matches('/'), MANIFEST_FILE);
        log::info!("Fetching artifact manifest from {}", url);
        let manifest: ArtifactManifest = reqwest::get(&url).await?.json().await?;
        Ok(manifest)
    }

    async fn download_and_verify_file(
        &self,
        url: &str,
        path: &Path,
        expected_hash: &str,
        artifact: &str,
    ) -> Result<(), ArtifactError> {
        log::info!("Downloading {} artifact from {} to {:?}", artifact, url, path);
        let response = reqwest::get(url).await?;
        log::info!("Download response status: {}", response.status());
        let bytes = response.bytes().await?;
        log::info!("Downloaded {} bytes", bytes.len());

        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        let hash = format!("{:x}", hasher.finalize());

        if hash != expected_hash {
            log::error!(
                "{} hash mismatch: expected {}, got {}",
                artifact,
                expected_hash,
                hash
            );
            return Err(ArtifactError::HashMismatch {
                artifact: artifact.to_string(),
                expected: expected_hash.to_string(),
                actual: hash,
            });
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, bytes)?;

        // Verify after writing
        if !self.verify_file(path, expected_hash)? {
            return Err(ArtifactError::VerificationFailed);
        }

        log::info!("{} artifact downloaded and verified successfully", artifact);
        Ok(())
    }

    /// Downloads the full bundle from `base_url`, verifying each file
    /// against the manifest published next to it. On any failure the
    /// partial download is removed.
    pub async fn download_bundle(&self, base_url: &str) -> Result<(), ArtifactError> {
        let _lock = self.download_lock.lock().await;

        fs::create_dir_all(&self.artifacts_dir)?;
        let manifest = self.fetch_manifest(base_url).await?;
        let base = base_url.trim_end_matches('/');

        for path in self.bundle_paths() {
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            let url = format!("{base}/{file_name}");
            let digest = manifest.digest_for(&file_name)?;
            let result = self
                .download_and_verify_file(&url, &path, digest, &file_name)
                .await;
            if let Err(e) = result {
                log::error!("Failed to set up artifact {}: {}", file_name, e);
                let _ = self.remove_download();
                return Err(e);
            }
        }

        let manifest_path = self.artifacts_dir.join(MANIFEST_FILE);
        fs::write(
            &manifest_path,
            serde_json::json!({
                "forest_sha256": manifest.forest_sha256,
                "scaler_sha256": manifest.scaler_sha256,
                "encoder_sha256": manifest.encoder_sha256,
            })
            .to_string(),
        )?;

        log::info!("Artifact bundle ready to use");
        Ok(())
    }

    /// Removes any downloaded artifact files.
    pub fn remove_download(&self) -> Result<(), ArtifactError> {
        for path in self.bundle_paths() {
            if path.exists() {
                fs::remove_file(&path)?;
            }
        }
        let manifest_path = self.artifacts_dir.join(MANIFEST_FILE);
        if manifest_path.exists() {
            fs::remove_file(&manifest_path)?;
        }
        Ok(())
    }

    /// Ensures a verified bundle is present, downloading or re-downloading
    /// as needed.
    pub async fn ensure_bundle(&self, base_url: &str) -> Result<(), ArtifactError> {
        if !self.is_complete() {
            log::info!("Artifact bundle not found, downloading...");
            return self.download_bundle(base_url).await;
        }
        match self.local_manifest() {
            Ok(manifest) => {
                if self.verify(&manifest)? {
                    log::info!("Artifact bundle verification successful");
                    Ok(())
                } else {
                    log::info!("Artifact verification failed, re-downloading...");
                    self.remove_download()?;
                    self.download_bundle(base_url).await
                }
            }
            Err(_) => {
                // No local manifest to check against; keep the existing files.
                log::info!("Artifact bundle present without manifest, skipping verification");
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_artifacts_dir() {
        // Cache override takes precedence
        let path = ArtifactStore::resolve_artifacts_dir(Some("/tmp/test-cache"));
        assert!(path.to_str().unwrap().contains("/tmp/test-cache/artifacts"));

        // Without an override, fall through the platform chain
        let path = ArtifactStore::resolve_artifacts_dir(None);
        assert!(path.to_str().unwrap().contains("alumnus/artifacts"));
    }

    #[test]
    fn test_manifest_digest_lookup() {
        let manifest = ArtifactManifest {
            forest_sha256: "aaa".to_string(),
            scaler_sha256: "bbb".to_string(),
            encoder_sha256: "ccc".to_string(),
        };
        assert_eq!(manifest.digest_for(FOREST_FILE).unwrap(), "aaa");
        assert_eq!(manifest.digest_for(SCALER_FILE).unwrap(), "bbb");
        assert_eq!(manifest.digest_for(ENCODER_FILE).unwrap(), "ccc");
        assert!(matches!(
            manifest.digest_for("stray.json"),
            Err(ArtifactError::UnknownArtifact(name)) if name == "stray.json"
        ));
    }

    #[test]
    fn test_bundle_presence() -> Result<(), ArtifactError> {
        let dir = "/tmp/alumnus-test-store/empty";
        let _ = fs::remove_dir_all(dir);
        let store = ArtifactStore::new(dir)?;

        assert!(!store.is_complete());
        assert_eq!(store.missing().len(), 3);

        fs::write(store.forest_path(), "{}")?;
        fs::write(store.scaler_path(), "{}")?;
        assert!(!store.is_complete());
        assert_eq!(store.missing(), vec![store.encoder_path()]);

        fs::write(store.encoder_path(), "{}")?;
        assert!(store.is_complete());
        assert!(store.missing().is_empty());

        store.remove_download()?;
        assert!(!store.is_complete());
        Ok(())
    }

    #[test]
    fn test_verify_file_hash() -> Result<(), ArtifactError> {
        let dir = "/tmp/alumnus-test-store/verify";
        let _ = fs::remove_dir_all(dir);
        let store = ArtifactStore::new(dir)?;
        let path = store.dir().join("sample");
        fs::write(&path, b"abc")?;

        // SHA-256("abc")
        let expected = "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad";
        assert!(store.verify_file(&path, expected)?);
        assert!(!store.verify_file(&path, "deadbeef")?);
        Ok(())
    }

    #[test]
    fn test_verify_bundle_against_manifest() -> Result<(), ArtifactError> {
        let dir = "/tmp/alumnus-test-store/manifest";
        let _ = fs::remove_dir_all(dir);
        let store = ArtifactStore::new(dir)?;
        fs::write(store.forest_path(), b"abc")?;
        fs::write(store.scaler_path(), b"abc")?;
        fs::write(store.encoder_path(), b"abc")?;

        let abc = "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad";
        let manifest = ArtifactManifest {
            forest_sha256: abc.to_string(),
            scaler_sha256: abc.to_string(),
            encoder_sha256: abc.to_string(),
        };
        assert!(store.verify(&manifest)?);

        fs::write(store.scaler_path(), b"corrupted data")?;
        assert!(!store.verify(&manifest)?);
        Ok(())
    }

    #[test]
    fn test_local_manifest_missing() {
        let store = ArtifactStore::new("/tmp/alumnus-test-store/no-manifest").unwrap();
        assert!(matches!(
            store.local_manifest(),
            Err(ArtifactError::Missing(_))
        ));
    }
}
