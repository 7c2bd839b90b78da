use crate::error::IndexError;
use crate::models::ChunkRecord;
use crate::traits::VectorIndex;
use async_trait::async_trait;
use tokio::sync::RwLock;

pub fn cosine_similarity(left: &[f32], right: &[f32]) -> f32 {
    let mut dot = 0f32;
    let mut left_norm = 0f32;
    let mut right_norm = 0f32;

    for (a, b) in left.iter().zip(right.iter()) {
        dot += a * b;
        left_norm += a * a;
        right_norm += b * b;
    }

    let denominator = left_norm.sqrt() * right_norm.sqrt();
    if denominator == 0.0 {
        0.0
    } else {
        dot / denominator
    }
}

#[derive(Default)]
struct IndexState {
    // Established by the first upsert, never changed afterwards.
    dimension: Option<usize>,
    // Insertion-ordered; replacement keeps the original position so that
    // similarity ties stay deterministic.
    records: Vec<ChunkRecord>,
}

/// Single-process, in-memory nearest-neighbor index. Upserts serialize on the
/// write lock; searches share the read lock and may run concurrently with
/// each other. Restart loses all state.
#[derive(Default)]
pub struct InMemoryIndex {
    state: RwLock<IndexState>,
}

impl InMemoryIndex {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VectorIndex for InMemoryIndex {
    async fn ensure_ready(&self) -> Result<(), IndexError> {
        // Nothing to allocate lazily; repeat calls must not reset state.
        Ok(())
    }

    async fn upsert(&self, record: ChunkRecord) -> Result<(), IndexError> {
        let mut state = self.state.write().await;

        if let Some(expected) = state.dimension {
            if record.vector.len() != expected {
                return Err(IndexError::DimensionMismatch {
                    expected,
                    actual: record.vector.len(),
                });
            }
        } else {
            state.dimension = Some(record.vector.len());
        }

        if let Some(existing) = state.records.iter_mut().find(|r| r.id == record.id) {
            *existing = record;
        } else {
            state.records.push(record);
        }

        Ok(())
    }

    async fn search(
        &self,
        query_vector: &[f32],
        top_k: usize,
    ) -> Result<Vec<ChunkRecord>, IndexError> {
        let state = self.state.read().await;

        if state.records.is_empty() {
            return Ok(Vec::new());
        }

        if let Some(expected) = state.dimension {
            if query_vector.len() != expected {
                return Err(IndexError::DimensionMismatch {
                    expected,
                    actual: query_vector.len(),
                });
            }
        }

        let mut scored: Vec<(f32, &ChunkRecord)> = state
            .records
            .iter()
            .map(|record| (cosine_similarity(query_vector, &record.vector), record))
            .collect();

        // Stable sort over an insertion-ordered vec: earlier records win ties.
        scored.sort_by(|a, b| b.0.total_cmp(&a.0));
        scored.truncate(top_k);

        Ok(scored.into_iter().map(|(_, record)| record.clone()).collect())
    }

    async fn len(&self) -> usize {
        self.state.read().await.records.len()
    }
}
