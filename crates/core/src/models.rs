use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Catalog entry for one ingested document. Created once per successful
/// ingestion and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub name: String,
    pub storage_path: String,
    pub chunk_count: usize,
    pub checksum: String,
    pub ingested_at: DateTime<Utc>,
}

/// One unit stored in the vector index: a chunk of document text together
/// with its embedding. `source` is the owning document's name, a weak lookup
/// key rather than an object reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkRecord {
    pub id: String,
    pub text: String,
    pub source: String,
    pub vector: Vec<f32>,
}

/// A ranked retrieval hit, produced per query and discarded after the
/// synthesizer consumes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievalResult {
    pub text: String,
    pub source: String,
}

impl From<ChunkRecord> for RetrievalResult {
    fn from(record: ChunkRecord) -> Self {
        Self {
            text: record.text,
            source: record.source,
        }
    }
}

/// Synthesizer output: the completion text plus the contributing source
/// names, de-duplicated in order of first appearance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    pub text: String,
    pub sources: Vec<String>,
}

/// One participant in a roundtable conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Persona {
    pub name: String,
    pub instruction: String,
}

impl Persona {
    pub fn new(name: impl Into<String>, instruction: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            instruction: instruction.into(),
        }
    }
}

/// One message in a roundtable transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub role: String,
    pub message: String,
}
