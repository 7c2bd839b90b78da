use crate::error::QueryError;
use crate::models::{Answer, RetrievalResult};
use crate::traits::TextCompleter;
use std::collections::HashSet;

/// Returned without calling the completer when retrieval produced nothing.
pub const NO_CONTEXT_ANSWER: &str =
    "No matching documents were found. Ingest some documents and ask again.";

const GROUNDING_PREAMBLE: &str = "You are a careful assistant. Answer the question using only \
the context below. If the context is not sufficient to answer, say so explicitly instead of \
guessing.";

const CONTEXT_DELIMITER: &str = "\n---\n";

/// Builds a grounded-answer instruction from retrieved chunks and delegates
/// to the completion capability. Single-shot: no retries.
pub struct AnswerSynthesizer<C: TextCompleter> {
    completer: C,
}

impl<C: TextCompleter> AnswerSynthesizer<C> {
    pub fn new(completer: C) -> Self {
        Self { completer }
    }

    pub async fn answer(
        &self,
        question: &str,
        retrieved: &[RetrievalResult],
    ) -> Result<Answer, QueryError> {
        if retrieved.is_empty() {
            return Ok(Answer {
                text: NO_CONTEXT_ANSWER.to_string(),
                sources: Vec::new(),
            });
        }

        let instruction = build_instruction(question, retrieved);
        let text = self.completer.complete(&instruction).await?;

        Ok(Answer {
            text,
            sources: dedup_sources(retrieved),
        })
    }
}

fn build_instruction(question: &str, retrieved: &[RetrievalResult]) -> String {
    let context = retrieved
        .iter()
        .map(|hit| hit.text.as_str())
        .collect::<Vec<_>>()
        .join(CONTEXT_DELIMITER);

    format!("{GROUNDING_PREAMBLE}\n\nContext:\n{context}\n\nQuestion: {question}")
}

fn dedup_sources(retrieved: &[RetrievalResult]) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut sources = Vec::new();
    for hit in retrieved {
        if seen.insert(hit.source.as_str()) {
            sources.push(hit.source.clone());
        }
    }
    sources
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CompletionError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct RecordingCompleter {
        reply: String,
        seen: Mutex<Vec<String>>,
    }

    impl RecordingCompleter {
        fn new(reply: &str) -> Self {
            Self {
                reply: reply.to_string(),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl TextCompleter for RecordingCompleter {
        async fn complete(&self, instruction: &str) -> Result<String, CompletionError> {
            self.seen.lock().unwrap().push(instruction.to_string());
            Ok(self.reply.clone())
        }
    }

    struct FailingCompleter;

    #[async_trait]
    impl TextCompleter for FailingCompleter {
        async fn complete(&self, _instruction: &str) -> Result<String, CompletionError> {
            Err(CompletionError::ProviderResponse {
                provider: "fake".to_string(),
                details: "unavailable".to_string(),
            })
        }
    }

    fn hit(text: &str, source: &str) -> RetrievalResult {
        RetrievalResult {
            text: text.to_string(),
            source: source.to_string(),
        }
    }

    #[tokio::test]
    async fn empty_retrieval_short_circuits_without_completion_call() {
        let completer = RecordingCompleter::new("should not be used");
        let synthesizer = AnswerSynthesizer::new(completer);

        let answer = synthesizer.answer("anything?", &[]).await.unwrap();
        assert_eq!(answer.text, NO_CONTEXT_ANSWER);
        assert!(answer.sources.is_empty());
        assert!(synthesizer.completer.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn instruction_carries_context_and_question() {
        let completer = RecordingCompleter::new("grounded reply");
        let synthesizer = AnswerSynthesizer::new(completer);

        let retrieved = vec![hit("pumps move fluid", "a.txt"), hit("valves stop it", "b.txt")];
        let answer = synthesizer.answer("what do pumps do?", &retrieved).await.unwrap();

        assert_eq!(answer.text, "grounded reply");
        let seen = synthesizer.completer.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert!(seen[0].contains("pumps move fluid"));
        assert!(seen[0].contains("valves stop it"));
        assert!(seen[0].contains(CONTEXT_DELIMITER));
        assert!(seen[0].contains("what do pumps do?"));
    }

    #[tokio::test]
    async fn sources_are_deduplicated_in_first_appearance_order() {
        let completer = RecordingCompleter::new("reply");
        let synthesizer = AnswerSynthesizer::new(completer);

        let retrieved = vec![
            hit("one", "b.txt"),
            hit("two", "a.txt"),
            hit("three", "b.txt"),
            hit("four", "a.txt"),
        ];
        let answer = synthesizer.answer("question", &retrieved).await.unwrap();
        assert_eq!(answer.sources, vec!["b.txt".to_string(), "a.txt".to_string()]);
    }

    #[tokio::test]
    async fn completion_failure_is_surfaced() {
        let synthesizer = AnswerSynthesizer::new(FailingCompleter);
        let retrieved = vec![hit("context", "a.txt")];
        let result = synthesizer.answer("question", &retrieved).await;
        assert!(matches!(result, Err(QueryError::Completion(_))));
    }
}
