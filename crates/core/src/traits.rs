use crate::error::{CompletionError, EmbedError, IndexError};
use crate::models::ChunkRecord;
use async_trait::async_trait;

/// Abstract embedding capability: text in, fixed-length vector out. The core
/// depends on this contract only, never on a concrete provider type.
#[async_trait]
pub trait TextEmbedder: Send + Sync {
    /// Length of every vector this embedder produces.
    fn dimensions(&self) -> usize;

    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbedError>;
}

/// Abstract text-completion capability: one instruction in, one response out.
#[async_trait]
pub trait TextCompleter: Send + Sync {
    async fn complete(&self, instruction: &str) -> Result<String, CompletionError>;
}

#[async_trait]
impl TextEmbedder for Box<dyn TextEmbedder> {
    fn dimensions(&self) -> usize {
        (**self).dimensions()
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbedError> {
        (**self).embed(text).await
    }
}

#[async_trait]
impl TextCompleter for Box<dyn TextCompleter> {
    async fn complete(&self, instruction: &str) -> Result<String, CompletionError> {
        (**self).complete(instruction).await
    }
}

/// Nearest-neighbor store over chunk embeddings.
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Idempotent initialization; repeat calls must not duplicate internal
    /// structures.
    async fn ensure_ready(&self) -> Result<(), IndexError>;

    /// Inserts or replaces a record by id. The first upsert establishes the
    /// index dimension; later vectors of a different length are rejected with
    /// `IndexError::DimensionMismatch` and do not mutate the index.
    async fn upsert(&self, record: ChunkRecord) -> Result<(), IndexError>;

    /// Returns at most `top_k` records in descending similarity to
    /// `query_vector`, ties broken by insertion order. An empty index yields
    /// an empty vec, never an error.
    async fn search(
        &self,
        query_vector: &[f32],
        top_k: usize,
    ) -> Result<Vec<ChunkRecord>, IndexError>;

    async fn len(&self) -> usize;
}
