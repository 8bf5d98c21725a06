//! SynapText CLI — drive the document pipeline from a terminal.
//!
//! Usage:
//!   synaptext upload <file> [--backend URL]
//!   synaptext summary <source-id> <keyword-id> [--backend URL]
//!   synaptext download <source-id> [--out DIR] [--backend URL]

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use synaptext::backend::DEFAULT_BASE_URL;
use synaptext::{DocumentPipeline, GraphNode, HttpBackend, SourceId};

#[derive(Parser)]
#[command(
    name = "synaptext",
    version,
    about = "Bipartite document-intelligence graph client"
)]
struct Cli {
    /// Backend base URL
    #[arg(long, global = true, default_value = DEFAULT_BASE_URL)]
    backend: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload a document and print the resulting graph
    Upload {
        /// Path to the PDF or text file to process
        file: PathBuf,
    },
    /// Fetch the generated summary for one keyword
    Summary {
        /// Source id returned by a previous upload
        source_id: String,
        /// Keyword id within that source
        keyword_id: String,
    },
    /// Download the zip archive of all keyword summaries
    Download {
        /// Source id returned by a previous upload
        source_id: String,
        /// Output directory (defaults to the user downloads directory)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

/// Default directory for downloaded archives.
fn default_download_dir() -> PathBuf {
    dirs::download_dir().unwrap_or_else(|| PathBuf::from("."))
}

async fn cmd_upload(pipeline: &DocumentPipeline, file: &Path) -> i32 {
    let bytes = match std::fs::read(file) {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("Error: cannot read '{}': {}", file.display(), e);
            return 1;
        }
    };
    let file_name = file
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "document.pdf".to_string());

    let session = match pipeline.process_upload(&file_name, bytes).await {
        Ok(session) => session,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };

    println!(
        "Processed '{}' (source {})",
        session.filename, session.source_id
    );
    println!("{:<8} {:>6}", "CHUNKS", session.graph.chunk_count());
    println!("{:<8} {:>6}", "TOPICS", session.graph.topic_count());
    println!("{:<8} {:>6}", "LINKS", session.graph.links.len());

    let mut topics: Vec<&GraphNode> = session.graph.nodes.iter().filter(|n| n.is_topic()).collect();
    topics.sort_by(|a, b| b.weight.cmp(&a.weight));
    if !topics.is_empty() {
        println!();
        println!("{:<32} {:>7}", "TOPIC", "WEIGHT");
        println!("{}", "-".repeat(40));
        for topic in topics.iter().take(10) {
            println!("{:<32} {:>7}", topic.label, topic.weight);
        }
    }
    0
}

async fn cmd_summary(pipeline: &DocumentPipeline, source_id: &str, keyword_id: &str) -> i32 {
    let source = SourceId::from_string(source_id);
    match pipeline.keyword_summary(&source, keyword_id).await {
        Ok(summary) => {
            println!("# {}", summary.keyword.keyword);
            println!();
            println!("{}", summary.summary);
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

async fn cmd_download(pipeline: &DocumentPipeline, source_id: &str, out: Option<PathBuf>) -> i32 {
    let source = SourceId::from_string(source_id);
    let dir = out.unwrap_or_else(default_download_dir);
    match pipeline.save_summary_archive(&source, &dir).await {
        Ok(path) => {
            println!("Saved {}", path.display());
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).init();

    let cli = Cli::parse();
    let backend = Arc::new(HttpBackend::new(&cli.backend));
    let pipeline = DocumentPipeline::new(backend);

    let code = match cli.command {
        Commands::Upload { file } => cmd_upload(&pipeline, &file).await,
        Commands::Summary {
            source_id,
            keyword_id,
        } => cmd_summary(&pipeline, &source_id, &keyword_id).await,
        Commands::Download { source_id, out } => {
            cmd_download(&pipeline, &source_id, out).await
        }
    };
    std::process::exit(code);
}
