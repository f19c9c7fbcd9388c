//! Payment-proof document storage.
//!
//! Uploaded files land in a configured directory under a generated name
//! prefixed with a UUID, so two uploads of `proof.pdf` never collide.
//! Retrieval refuses names that would escape the directory.

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::{info, instrument};
use uuid::Uuid;

/// Errors from the document vault.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// Requested document does not exist.
    #[error("document not found")]
    NotFound,

    /// Name contains path separators or traversal components.
    #[error("invalid document name")]
    InvalidName,

    /// Underlying filesystem failure.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Filesystem-backed store for uploaded payment proofs.
#[derive(Debug, Clone)]
pub struct DocumentVault {
    root: PathBuf,
}

impl DocumentVault {
    /// Create a vault rooted at the given directory, creating it if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self, DocumentError> {
        let root = root.into();
        fs::create_dir_all(&root).await?;
        Ok(Self { root })
    }

    /// Store a document and return its generated name.
    ///
    /// The stored name is `<uuid>_<sanitized original>`; the original name
    /// is reduced to its final path component.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    #[instrument(skip(self, bytes), fields(original = %original_name, size = bytes.len()))]
    pub async fn save(&self, original_name: &str, bytes: &[u8]) -> Result<String, DocumentError> {
        let base = sanitize_file_name(original_name);
        let stored = format!("{}_{base}", Uuid::new_v4());
        fs::write(self.root.join(&stored), bytes).await?;
        info!(stored = %stored, "stored document");
        Ok(stored)
    }

    /// Read a previously stored document by its stored name.
    ///
    /// # Errors
    ///
    /// Returns `InvalidName` for traversal attempts and `NotFound` when no
    /// such document exists.
    pub async fn get(&self, stored_name: &str) -> Result<Vec<u8>, DocumentError> {
        let path = self.resolve(stored_name)?;
        match fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Err(DocumentError::NotFound),
            Err(err) => Err(err.into()),
        }
    }

    /// List stored document names.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be read.
    pub async fn list(&self) -> Result<Vec<String>, DocumentError> {
        let mut names = Vec::new();
        let mut entries = fs::read_dir(&self.root).await?;
        while let Some(entry) = entries.next_entry().await? {
            if entry.file_type().await?.is_file() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        names.sort();
        Ok(names)
    }

    fn resolve(&self, stored_name: &str) -> Result<PathBuf, DocumentError> {
        if stored_name.is_empty()
            || stored_name.contains(['/', '\\'])
            || stored_name == ".."
            || stored_name == "."
        {
            return Err(DocumentError::InvalidName);
        }
        Ok(self.root.join(stored_name))
    }
}

/// Reduce an uploaded file name to a safe final component.
fn sanitize_file_name(name: &str) -> String {
    let base = Path::new(name)
        .file_name()
        .map_or_else(|| "upload".to_owned(), |n| n.to_string_lossy().into_owned());
    if base.is_empty() || base == ".." || base == "." {
        "upload".to_owned()
    } else {
        base
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_root(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("cornershop-docs-{tag}-{}", Uuid::new_v4()))
    }

    #[tokio::test]
    async fn save_and_get_round_trip() {
        let vault = DocumentVault::open(temp_root("roundtrip")).await.unwrap();
        let stored = vault.save("proof.pdf", b"receipt bytes").await.unwrap();
        assert!(stored.ends_with("_proof.pdf"));
        let bytes = vault.get(&stored).await.unwrap();
        assert_eq!(bytes, b"receipt bytes");
    }

    #[tokio::test]
    async fn same_name_twice_does_not_collide() {
        let vault = DocumentVault::open(temp_root("collide")).await.unwrap();
        let first = vault.save("proof.pdf", b"one").await.unwrap();
        let second = vault.save("proof.pdf", b"two").await.unwrap();
        assert_ne!(first, second);
        assert_eq!(vault.get(&first).await.unwrap(), b"one");
        assert_eq!(vault.get(&second).await.unwrap(), b"two");
    }

    #[tokio::test]
    async fn traversal_names_are_rejected() {
        let vault = DocumentVault::open(temp_root("traversal")).await.unwrap();
        assert!(matches!(
            vault.get("../etc/passwd").await,
            Err(DocumentError::InvalidName)
        ));
        assert!(matches!(vault.get("").await, Err(DocumentError::InvalidName)));
    }

    #[tokio::test]
    async fn missing_document_is_not_found() {
        let vault = DocumentVault::open(temp_root("missing")).await.unwrap();
        assert!(matches!(
            vault.get("nope.pdf").await,
            Err(DocumentError::NotFound)
        ));
    }

    #[tokio::test]
    async fn uploaded_path_is_reduced_to_file_name() {
        let vault = DocumentVault::open(temp_root("sanitize")).await.unwrap();
        let stored = vault.save("../../sneaky.pdf", b"x").await.unwrap();
        assert!(stored.ends_with("_sneaky.pdf"));
        assert!(!stored.contains(".."));
    }

    #[tokio::test]
    async fn list_returns_stored_names() {
        let vault = DocumentVault::open(temp_root("list")).await.unwrap();
        let a = vault.save("a.pdf", b"a").await.unwrap();
        let b = vault.save("b.pdf", b"b").await.unwrap();
        let names = vault.list().await.unwrap();
        assert!(names.contains(&a));
        assert!(names.contains(&b));
    }
}
