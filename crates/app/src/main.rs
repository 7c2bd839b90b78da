use askdocs_core::{
    ingest_folder_best_effort, AnswerSynthesizer, AskPipeline, DocumentRepository,
    HashingEmbedder, InMemoryIndex, OpenAiCompleter, OpenAiEmbedder, Persona, Roundtable,
    TextCompleter, TextEmbedder, UnconfiguredCompleter, DEFAULT_EMBEDDING_DIMENSIONS,
};
use chrono::Utc;
use clap::{Parser, Subcommand};
use std::path::Path;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "askdocs", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Base URL of an OpenAI-compatible API; unset runs fully offline with
    /// the builtin hashing embedder.
    #[arg(long, env = "ASKDOCS_API_URL")]
    api_url: Option<String>,

    /// API key for the OpenAI-compatible API.
    #[arg(long, env = "ASKDOCS_API_KEY", default_value = "")]
    api_key: String,

    /// Embedding model name.
    #[arg(long, default_value = "text-embedding-3-small")]
    embedding_model: String,

    /// Embedding vector length the provider returns.
    #[arg(long, default_value = "1536")]
    embedding_dimensions: usize,

    /// Completion model name.
    #[arg(long, default_value = "gpt-4o-mini")]
    completion_model: String,
}

#[derive(Subcommand)]
enum Command {
    /// Ingest every .txt/.md file under a folder.
    Ingest {
        /// Folder scanned recursively for text files.
        #[arg(long)]
        folder: String,
    },
    /// Ask a grounded question over the ingested documents.
    Ask {
        /// The question to answer.
        #[arg(long)]
        question: String,
        /// Number of chunks to retrieve as context.
        #[arg(long, default_value = "5")]
        top_k: usize,
        /// Folder to ingest before asking (the index is in-memory only).
        #[arg(long)]
        folder: Option<String>,
    },
    /// List the ingested document catalog after ingesting a folder.
    Documents {
        /// Folder scanned recursively for text files.
        #[arg(long)]
        folder: String,
    },
    /// Run a fixed-order planner/writer/reviewer conversation.
    Roundtable {
        /// Opening message that seeds the transcript.
        #[arg(long)]
        prompt: String,
        /// Total persona turns before the conversation stops.
        #[arg(long, default_value = "6")]
        turns: usize,
    },
}

fn build_embedder(cli: &Cli) -> Box<dyn TextEmbedder> {
    match &cli.api_url {
        Some(url) => Box::new(OpenAiEmbedder::new(
            url,
            &cli.api_key,
            &cli.embedding_model,
            cli.embedding_dimensions,
        )),
        None => Box::new(HashingEmbedder {
            dimensions: DEFAULT_EMBEDDING_DIMENSIONS,
        }),
    }
}

fn build_completer(cli: &Cli) -> Box<dyn TextCompleter> {
    match &cli.api_url {
        Some(url) => Box::new(OpenAiCompleter::new(url, &cli.api_key, &cli.completion_model)),
        None => Box::new(UnconfiguredCompleter),
    }
}

fn build_repository(cli: &Cli) -> DocumentRepository<Box<dyn TextEmbedder>, InMemoryIndex> {
    DocumentRepository::new(build_embedder(cli), InMemoryIndex::new())
}

async fn ingest_and_report(
    repository: &DocumentRepository<Box<dyn TextEmbedder>, InMemoryIndex>,
    folder: &str,
) -> anyhow::Result<()> {
    let report = ingest_folder_best_effort(repository, Path::new(folder))
        .await
        .map_err(|error| anyhow::anyhow!(error.to_string()))?;

    if !report.skipped.is_empty() {
        warn!(skipped = report.skipped.len(), folder, "files skipped");
        for skipped in &report.skipped {
            warn!(path = %skipped.path.display(), reason = %skipped.reason, "skipped file");
        }
    }

    for document in &report.documents {
        info!(
            name = %document.name,
            chunks = document.chunk_count,
            "document ingested"
        );
    }

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer())
        .init();

    let cli = Cli::parse();
    info!(
        version = env!("CARGO_PKG_VERSION"),
        started_at = %Utc::now().to_rfc3339(),
        "askdocs boot"
    );

    match &cli.command {
        Command::Ingest { folder } => {
            let repository = build_repository(&cli);
            ingest_and_report(&repository, folder).await?;

            let catalog = repository.list_documents().await;
            let total_chunks: usize = catalog.iter().map(|d| d.chunk_count).sum();
            println!(
                "{} documents ({} chunks) ingested at {}",
                catalog.len(),
                total_chunks,
                Utc::now().to_rfc3339()
            );
        }
        Command::Ask {
            question,
            top_k,
            folder,
        } => {
            let repository = build_repository(&cli);
            if let Some(folder) = folder {
                ingest_and_report(&repository, folder).await?;
            }

            let pipeline = AskPipeline::new(repository, AnswerSynthesizer::new(build_completer(&cli)));
            let answer = pipeline
                .ask(question, *top_k)
                .await
                .map_err(|error| anyhow::anyhow!(error.to_string()))?;

            println!("{}", answer.text);
            for source in &answer.sources {
                println!("  source={source}");
            }
        }
        Command::Documents { folder } => {
            let repository = build_repository(&cli);
            ingest_and_report(&repository, folder).await?;

            for document in repository.list_documents().await {
                println!(
                    "{}\tchunks={}\tingested_at={}\tchecksum={}",
                    document.name,
                    document.chunk_count,
                    document.ingested_at.to_rfc3339(),
                    &document.checksum[..12]
                );
            }
        }
        Command::Roundtable { prompt, turns } => {
            let personas = vec![
                Persona::new(
                    "planner",
                    "You are the planner. Break the request into concrete steps.",
                ),
                Persona::new(
                    "writer",
                    "You are the writer. Draft a solution following the latest plan.",
                ),
                Persona::new(
                    "reviewer",
                    "You are the reviewer. Point out gaps and suggest fixes.",
                ),
            ];

            let roundtable = Roundtable::new(personas, build_completer(&cli));
            let transcript = roundtable
                .run(prompt, *turns)
                .await
                .map_err(|error| anyhow::anyhow!(error.to_string()))?;

            for entry in transcript {
                println!("[{}] {}", entry.role, entry.message);
            }
        }
    }

    Ok(())
}
