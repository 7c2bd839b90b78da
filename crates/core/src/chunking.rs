use crate::error::IngestError;

/// Word-count-bounded chunking policy. The defaults (500-word windows with a
/// 50-word overlap) preserve cross-boundary context for retrieval.
#[derive(Debug, Clone, Copy)]
pub struct ChunkingConfig {
    pub max_words: usize,
    pub overlap_words: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            max_words: 500,
            overlap_words: 50,
        }
    }
}

impl ChunkingConfig {
    pub fn validate(&self) -> Result<(), IngestError> {
        if self.max_words == 0 {
            return Err(IngestError::InvalidChunkConfig(
                "max_words must be positive".to_string(),
            ));
        }
        if self.overlap_words >= self.max_words {
            return Err(IngestError::InvalidChunkConfig(format!(
                "overlap_words {} must be smaller than max_words {}",
                self.overlap_words, self.max_words
            )));
        }
        Ok(())
    }
}

/// Splits `text` into overlapping word windows. Words are whitespace tokens;
/// each chunk is at most `max_words` words joined by single spaces, and
/// consecutive chunks share `overlap_words` words. Chunks may end
/// mid-sentence; there is no token- or sentence-boundary awareness.
pub fn chunk_words(text: &str, config: ChunkingConfig) -> Result<Vec<String>, IngestError> {
    config.validate()?;

    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
        return Ok(Vec::new());
    }

    let step = config.max_words - config.overlap_words;
    let mut chunks = Vec::new();
    let mut start = 0;

    while start < words.len() {
        let end = (start + config.max_words).min(words.len());
        chunks.push(words[start..end].join(" "));
        start += step;
    }

    Ok(chunks)
}
