use std::{
    io::ErrorKind,
    marker::PhantomData,
    path::{Path, PathBuf},
};

use serde::{de::DeserializeOwned, Serialize};
use tokio::fs;
use tracing::info;

use super::decode_json;
use crate::errors::ServiceError;

/// Generic JSON file-backed document store.
///
/// Reads and writes one whole document of type `T` to a single file, pretty-printed
/// with two-space indentation. The store keeps no copy of the document; callers own
/// the in-memory value and hand it back on [`JsonFileStore::save`].
///
/// Writes overwrite the file in place (no temp file + rename), so a crash during
/// `save` can leave a truncated file behind.
pub struct JsonFileStore<T> {
    file_path: PathBuf,
    _doc: PhantomData<fn() -> T>,
}

impl<T> JsonFileStore<T>
where
    T: Serialize + DeserializeOwned + Default,
{
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { file_path: path.into(), _doc: PhantomData }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Read the document. A missing file is initialized with `T::default()`,
    /// which is written out before being returned.
    pub async fn load(&self) -> Result<T, ServiceError> {
        match fs::read(&self.file_path).await {
            Ok(bytes) => decode_json(&bytes).map_err(|source| ServiceError::Decode {
                path: self.file_path.clone(),
                source,
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(path = %self.file_path.display(), "store file missing; initializing empty document");
                let empty = T::default();
                self.save(&empty).await?;
                Ok(empty)
            }
            Err(e) => Err(ServiceError::io(&self.file_path, e)),
        }
    }

    /// Serialize the full document and overwrite the backing file.
    pub async fn save(&self, doc: &T) -> Result<(), ServiceError> {
        let data = serde_json::to_vec_pretty(doc)?;
        if let Some(parent) = self.file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| ServiceError::io(parent, e))?;
        }
        fs::write(&self.file_path, data)
            .await
            .map_err(|e| ServiceError::io(&self.file_path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Doc {
        items: Vec<String>,
    }

    fn tmp_path(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("json_file_store_{}_{}.json", tag, uuid::Uuid::new_v4()))
    }

    #[tokio::test]
    async fn missing_file_is_created_empty() -> Result<(), anyhow::Error> {
        let tmp = tmp_path("missing");
        let store = JsonFileStore::<Doc>::new(&tmp);

        let doc = store.load().await?;
        assert_eq!(doc, Doc::default());

        let on_disk = tokio::fs::read_to_string(&tmp).await?;
        assert_eq!(on_disk, "{\n  \"items\": []\n}");

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn save_then_load_round_trips() -> Result<(), anyhow::Error> {
        let tmp = tmp_path("roundtrip");
        let store = JsonFileStore::<Doc>::new(&tmp);
        let doc = Doc { items: vec!["a".into(), "b".into()] };

        store.save(&doc).await?;
        let first = tokio::fs::read(&tmp).await?;
        let loaded = store.load().await?;
        assert_eq!(loaded, doc);

        store.save(&loaded).await?;
        assert_eq!(tokio::fs::read(&tmp).await?, first);

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn malformed_file_is_a_decode_error() -> Result<(), anyhow::Error> {
        let tmp = tmp_path("malformed");
        tokio::fs::write(&tmp, b"{ not json").await?;
        let store = JsonFileStore::<Doc>::new(&tmp);

        let err = store.load().await.unwrap_err();
        assert!(matches!(err, ServiceError::Decode { .. }), "got {err:?}");
        // the broken file must not be replaced
        assert_eq!(tokio::fs::read(&tmp).await?, b"{ not json");

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn unreadable_path_is_an_io_error() -> Result<(), anyhow::Error> {
        let dir = std::env::temp_dir().join(format!("json_file_store_dir_{}", uuid::Uuid::new_v4()));
        tokio::fs::create_dir_all(&dir).await?;
        let store = JsonFileStore::<Doc>::new(&dir);

        assert!(matches!(store.load().await, Err(ServiceError::Io { .. })));
        assert!(matches!(store.save(&Doc::default()).await, Err(ServiceError::Io { .. })));

        let _ = tokio::fs::remove_dir_all(&dir).await;
        Ok(())
    }

    #[tokio::test]
    async fn save_creates_parent_directories() -> Result<(), anyhow::Error> {
        let root = std::env::temp_dir().join(format!("json_file_store_nested_{}", uuid::Uuid::new_v4()));
        let store = JsonFileStore::<Doc>::new(root.join("data").join("db.json"));

        store.load().await?;
        assert!(tokio::fs::metadata(store.path()).await?.is_file());

        let _ = tokio::fs::remove_dir_all(&root).await;
        Ok(())
    }
}
