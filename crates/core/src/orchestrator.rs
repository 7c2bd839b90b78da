use crate::error::QueryError;
use crate::models::Answer;
use crate::repository::DocumentRepository;
use crate::synthesis::AnswerSynthesizer;
use crate::traits::{TextCompleter, TextEmbedder, VectorIndex};

/// Retrieve-then-synthesize pipeline: embeds the question, pulls the top
/// matching chunks from the repository, and hands them to the synthesizer.
pub struct AskPipeline<E, I, C>
where
    E: TextEmbedder,
    I: VectorIndex,
    C: TextCompleter,
{
    repository: DocumentRepository<E, I>,
    synthesizer: AnswerSynthesizer<C>,
}

impl<E, I, C> AskPipeline<E, I, C>
where
    E: TextEmbedder,
    I: VectorIndex,
    C: TextCompleter,
{
    pub fn new(repository: DocumentRepository<E, I>, synthesizer: AnswerSynthesizer<C>) -> Self {
        Self {
            repository,
            synthesizer,
        }
    }

    pub fn repository(&self) -> &DocumentRepository<E, I> {
        &self.repository
    }

    /// A blank question or an empty index both resolve to the fixed
    /// no-context answer; neither is an error.
    pub async fn ask(&self, question: &str, top_k: usize) -> Result<Answer, QueryError> {
        let retrieved = self.repository.search(question, top_k).await?;
        self.synthesizer.answer(question, &retrieved).await
    }
}
