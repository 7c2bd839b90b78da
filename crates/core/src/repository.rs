use crate::chunking::{chunk_words, ChunkingConfig};
use crate::error::{IngestError, QueryError};
use crate::models::{ChunkRecord, Document, RetrievalResult};
use crate::traits::{TextEmbedder, VectorIndex};
use chrono::Utc;
use sha2::{Digest, Sha256};
use tokio::sync::RwLock;

pub fn digest_text(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Owns the catalog of ingested documents and orchestrates the
/// chunk -> embed -> store pipeline against the vector index.
pub struct DocumentRepository<E, I>
where
    E: TextEmbedder,
    I: VectorIndex,
{
    embedder: E,
    index: I,
    chunking: ChunkingConfig,
    catalog: RwLock<Vec<Document>>,
}

impl<E, I> DocumentRepository<E, I>
where
    E: TextEmbedder,
    I: VectorIndex,
{
    pub fn new(embedder: E, index: I) -> Self {
        Self::with_chunking(embedder, index, ChunkingConfig::default())
    }

    pub fn with_chunking(embedder: E, index: I, chunking: ChunkingConfig) -> Self {
        Self {
            embedder,
            index,
            chunking,
            catalog: RwLock::new(Vec::new()),
        }
    }

    /// Chunks `raw_text`, embeds each chunk, upserts the records, then
    /// appends a catalog entry with the final chunk count.
    ///
    /// If embedding or storage fails partway, records already written stay in
    /// the index (at-least-once semantics, no rollback); the catalog entry is
    /// only appended once every chunk landed.
    pub async fn ingest(
        &self,
        raw_text: &str,
        document_name: &str,
        storage_path: &str,
    ) -> Result<Document, IngestError> {
        self.index.ensure_ready().await?;

        let chunks = chunk_words(raw_text, self.chunking)?;

        for chunk in &chunks {
            let vector = self.embedder.embed(chunk).await?;
            let record = ChunkRecord {
                id: uuid::Uuid::new_v4().to_string(),
                text: chunk.clone(),
                source: document_name.to_string(),
                vector,
            };
            self.index.upsert(record).await?;
        }

        let document = Document {
            name: document_name.to_string(),
            storage_path: storage_path.to_string(),
            chunk_count: chunks.len(),
            checksum: digest_text(raw_text),
            ingested_at: Utc::now(),
        };

        self.catalog.write().await.push(document.clone());
        Ok(document)
    }

    /// Embeds `question` and returns up to `max_results` chunk hits, most
    /// similar first. A blank question or an empty index yields an empty vec;
    /// "no results" is a valid, answerable state, not a failure.
    pub async fn search(
        &self,
        question: &str,
        max_results: usize,
    ) -> Result<Vec<RetrievalResult>, QueryError> {
        if question.trim().is_empty() {
            return Ok(Vec::new());
        }

        let query_vector = self.embedder.embed(question).await?;
        let hits = self.index.search(&query_vector, max_results).await?;
        Ok(hits.into_iter().map(RetrievalResult::from).collect())
    }

    /// Catalog entries in ingestion order.
    pub async fn list_documents(&self) -> Vec<Document> {
        self.catalog.read().await.clone()
    }
}
