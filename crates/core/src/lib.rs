pub mod chunking;
pub mod embeddings;
pub mod error;
pub mod index;
pub mod ingest;
pub mod models;
pub mod orchestrator;
pub mod providers;
pub mod repository;
pub mod roundtable;
pub mod synthesis;
pub mod traits;

pub use chunking::{chunk_words, ChunkingConfig};
pub use embeddings::{HashingEmbedder, DEFAULT_EMBEDDING_DIMENSIONS};
pub use error::{CompletionError, EmbedError, IndexError, IngestError, QueryError};
pub use index::{cosine_similarity, InMemoryIndex};
pub use ingest::{
    discover_text_files, ingest_folder_best_effort, IngestionReport, SkippedFile,
};
pub use models::{Answer, ChunkRecord, Document, Persona, RetrievalResult, TranscriptEntry};
pub use orchestrator::AskPipeline;
pub use providers::{OpenAiCompleter, OpenAiEmbedder, UnconfiguredCompleter};
pub use repository::{digest_text, DocumentRepository};
pub use roundtable::Roundtable;
pub use synthesis::{AnswerSynthesizer, NO_CONTEXT_ANSWER};
pub use traits::{TextCompleter, TextEmbedder, VectorIndex};
