use crate::error::IngestError;
use crate::models::Document;
use crate::repository::DocumentRepository;
use crate::traits::{TextEmbedder, VectorIndex};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const TEXT_EXTENSIONS: [&str; 2] = ["txt", "md"];

pub fn discover_text_files(folder: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for entry in WalkDir::new(folder)
        .into_iter()
        .filter_map(|item| item.ok())
    {
        if !entry.file_type().is_file() {
            continue;
        }

        let is_text = entry
            .path()
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                TEXT_EXTENSIONS
                    .iter()
                    .any(|known| ext.eq_ignore_ascii_case(known))
            });

        if is_text {
            files.push(entry.path().to_path_buf());
        }
    }

    files.sort_unstable();
    files
}

pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

pub struct IngestionReport {
    pub documents: Vec<Document>,
    pub skipped: Vec<SkippedFile>,
}

/// Ingests every `.txt`/`.md` file under `folder` into the repository,
/// recording unreadable or failing files instead of aborting the batch.
pub async fn ingest_folder_best_effort<E, I>(
    repository: &DocumentRepository<E, I>,
    folder: &Path,
) -> Result<IngestionReport, IngestError>
where
    E: TextEmbedder,
    I: VectorIndex,
{
    let files = discover_text_files(folder);

    if files.is_empty() {
        return Err(IngestError::InvalidArgument(format!(
            "no text files found in {}",
            folder.display()
        )));
    }

    let mut documents = Vec::new();
    let mut skipped = Vec::new();

    for path in files {
        match ingest_file(repository, &path).await {
            Ok(document) => documents.push(document),
            Err(error) => skipped.push(SkippedFile {
                path,
                reason: error.to_string(),
            }),
        }
    }

    Ok(IngestionReport { documents, skipped })
}

async fn ingest_file<E, I>(
    repository: &DocumentRepository<E, I>,
    path: &Path,
) -> Result<Document, IngestError>
where
    E: TextEmbedder,
    I: VectorIndex,
{
    let name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| {
            IngestError::MissingFileName(format!("path missing filename: {}", path.display()))
        })?;

    let raw_text = tokio::fs::read_to_string(path).await?;
    repository
        .ingest(&raw_text, name, &path.to_string_lossy())
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embeddings::HashingEmbedder;
    use crate::index::InMemoryIndex;
    use std::fs;
    use tempfile::tempdir;

    fn repository() -> DocumentRepository<HashingEmbedder, InMemoryIndex> {
        DocumentRepository::new(HashingEmbedder { dimensions: 64 }, InMemoryIndex::new())
    }

    #[test]
    fn discovery_is_recursive_and_sorted() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let base = dir.path();
        let nested = base.join("nested");
        fs::create_dir(&nested)?;

        fs::write(base.join("b.txt"), "beta")?;
        fs::write(nested.join("a.md"), "alpha")?;
        fs::write(base.join("ignored.pdf"), "%PDF")?;

        let files = discover_text_files(base);
        assert_eq!(files.len(), 2);
        assert!(files[0].ends_with("b.txt"));
        assert!(files[1].ends_with("nested/a.md"));
        Ok(())
    }

    #[tokio::test]
    async fn folder_ingestion_fails_without_text_files() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let result = ingest_folder_best_effort(&repository(), dir.path()).await;
        assert!(matches!(result, Err(IngestError::InvalidArgument(_))));
        Ok(())
    }

    #[tokio::test]
    async fn folder_ingestion_catalogs_each_file() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        fs::write(dir.path().join("one.txt"), "pumps move fluid")?;
        fs::write(dir.path().join("two.txt"), "valves stop fluid")?;

        let repo = repository();
        let report = ingest_folder_best_effort(&repo, dir.path()).await?;

        assert_eq!(report.documents.len(), 2);
        assert!(report.skipped.is_empty());
        assert_eq!(repo.list_documents().await.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn unreadable_file_is_skipped_not_fatal() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        fs::write(dir.path().join("good.txt"), "readable words")?;
        // Invalid UTF-8 fails read_to_string.
        fs::write(dir.path().join("bad.txt"), [0xff, 0xfe, 0xfd])?;

        let repo = repository();
        let report = ingest_folder_best_effort(&repo, dir.path()).await?;

        assert_eq!(report.documents.len(), 1);
        assert_eq!(report.skipped.len(), 1);
        assert!(report.skipped[0].path.ends_with("bad.txt"));
        Ok(())
    }
}
