use clap::Parser;
use itemcat::prelude::*;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Assign a marketplace item to a category from its name and description
#[derive(Parser, Debug)]
#[command(name = "itemcat")]
#[command(about = "Categorize a marketplace item from free text", long_about = None)]
struct Args {
    /// Item name
    name: String,

    /// Item description
    #[arg(short, long, default_value = "")]
    description: String,

    /// JSON file of live categories ([{"id": .., "name": ..}]); defaults to the
    /// built-in knowledge base names with ids 1..n
    #[arg(short, long)]
    categories: Option<PathBuf>,

    /// JSON knowledge base replacing the built-in tables
    #[arg(short, long)]
    knowledge: Option<PathBuf>,

    /// JSON categorizer configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the per-category score breakdown as JSON
    #[arg(long)]
    explain: bool,

    /// Log level
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let knowledge = match &args.knowledge {
        Some(path) => Arc::new(KnowledgeBase::load(path)?),
        None => KnowledgeBase::builtin(),
    };

    let source: Arc<dyn CategorySource> = match &args.categories {
        Some(path) => {
            info!("Category file: {:?}", path);
            Arc::new(FileCategoryStore::new(path))
        }
        None => Arc::new(
            knowledge
                .entries()
                .iter()
                .enumerate()
                .map(|(i, entry)| LiveCategory::new(i as u64 + 1, entry.canonical_name.clone()))
                .collect::<Vec<_>>(),
        ),
    };

    let config = match &args.config {
        Some(path) => CategorizerConfig::load(path)?,
        None => CategorizerConfig::default(),
    };

    let categorizer = Categorizer::builder(source)
        .knowledge(knowledge)
        .config(config)
        .build()?;

    let explanation = categorizer.explain(&args.name, &args.description);

    if args.explain {
        println!("{}", serde_json::to_string_pretty(&explanation)?);
        return Ok(());
    }

    match explanation.decision.category() {
        Some(id) => {
            let name = categorizer
                .categories()
                .into_iter()
                .find(|c| &c.id == id)
                .map(|c| c.name)
                .unwrap_or_default();
            println!("{}\t{}", id, name);
        }
        None => {
            println!("uncategorized");
        }
    }

    Ok(())
}
