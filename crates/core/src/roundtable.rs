use crate::error::CompletionError;
use crate::models::{Persona, TranscriptEntry};
use crate::traits::TextCompleter;

pub const SEED_ROLE: &str = "user";

/// Fixed-order turn taking among a set of personas. Each turn, the persona at
/// the current index reads the transcript so far, produces one message via
/// the completion capability, and hands off to the next persona. The loop
/// runs exactly `turn_budget` turns; there is no early termination on
/// consensus.
pub struct Roundtable<C: TextCompleter> {
    personas: Vec<Persona>,
    completer: C,
}

impl<C: TextCompleter> Roundtable<C> {
    pub fn new(personas: Vec<Persona>, completer: C) -> Self {
        Self {
            personas,
            completer,
        }
    }

    /// Runs the conversation and returns the transcript: the seed message
    /// first, then exactly `turn_budget` persona messages in cyclic order.
    pub async fn run(
        &self,
        seed_message: &str,
        turn_budget: usize,
    ) -> Result<Vec<TranscriptEntry>, CompletionError> {
        let mut transcript = vec![TranscriptEntry {
            role: SEED_ROLE.to_string(),
            message: seed_message.to_string(),
        }];

        if self.personas.is_empty() {
            return Ok(transcript);
        }

        for turn in 0..turn_budget {
            let persona = &self.personas[turn % self.personas.len()];
            let instruction = build_turn_instruction(persona, &transcript);
            let message = self.completer.complete(&instruction).await?;
            transcript.push(TranscriptEntry {
                role: persona.name.clone(),
                message,
            });
        }

        Ok(transcript)
    }
}

fn build_turn_instruction(persona: &Persona, transcript: &[TranscriptEntry]) -> String {
    let rendered = transcript
        .iter()
        .map(|entry| format!("{}: {}", entry.role, entry.message))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "{}\n\nConversation so far:\n{}\n\nReply as {} with your next message.",
        persona.instruction, rendered, persona.name
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingCompleter {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl TextCompleter for CountingCompleter {
        async fn complete(&self, _instruction: &str) -> Result<String, CompletionError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(format!("message {call}"))
        }
    }

    fn three_personas() -> Vec<Persona> {
        vec![
            Persona::new("planner", "You break the task into steps."),
            Persona::new("writer", "You draft the solution."),
            Persona::new("reviewer", "You critique the draft."),
        ]
    }

    #[tokio::test]
    async fn budget_of_six_produces_six_messages_in_cyclic_order() {
        let roundtable = Roundtable::new(
            three_personas(),
            CountingCompleter {
                calls: AtomicUsize::new(0),
            },
        );

        let transcript = roundtable.run("kick off", 6).await.unwrap();

        // Seed plus six turns.
        assert_eq!(transcript.len(), 7);
        assert_eq!(transcript[0].role, SEED_ROLE);
        assert_eq!(transcript[0].message, "kick off");

        let roles: Vec<&str> = transcript[1..].iter().map(|e| e.role.as_str()).collect();
        assert_eq!(
            roles,
            vec!["planner", "writer", "reviewer", "planner", "writer", "reviewer"]
        );
    }

    #[tokio::test]
    async fn each_turn_sees_the_transcript_so_far() {
        struct EchoingCompleter;

        #[async_trait]
        impl TextCompleter for EchoingCompleter {
            async fn complete(&self, instruction: &str) -> Result<String, CompletionError> {
                Ok(format!("lines={}", instruction.lines().count()))
            }
        }

        let roundtable = Roundtable::new(three_personas(), EchoingCompleter);
        let transcript = roundtable.run("seed", 3).await.unwrap();

        // The rendered conversation grows by one line per turn.
        assert_eq!(transcript[1].message, "lines=6");
        assert_eq!(transcript[2].message, "lines=7");
        assert_eq!(transcript[3].message, "lines=8");
    }

    #[tokio::test]
    async fn zero_budget_returns_only_the_seed() {
        let roundtable = Roundtable::new(
            three_personas(),
            CountingCompleter {
                calls: AtomicUsize::new(0),
            },
        );
        let transcript = roundtable.run("seed", 0).await.unwrap();
        assert_eq!(transcript.len(), 1);
        assert_eq!(roundtable.completer.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn no_personas_returns_only_the_seed() {
        let roundtable = Roundtable::new(
            Vec::new(),
            CountingCompleter {
                calls: AtomicUsize::new(0),
            },
        );
        let transcript = roundtable.run("seed", 5).await.unwrap();
        assert_eq!(transcript.len(), 1);
    }
}
