use anyhow::Context;
use arbiter_rs::arbiter::actions;
use arbiter_rs::arbiter::config::Config;
use arbiter_rs::arbiter::server;
use arbiter_rs::arbiter::tree::{DecisionEngine, TreeLoader, TreeValidator};
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP server
    Serve {
        /// Port to listen on (defaults to $PORT, then 3000)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Evaluate a decision tree file against a data file
    Run {
        /// Path to the decision tree (YAML or JSON)
        #[arg(short, long)]
        tree: PathBuf,

        /// Path to the data record (JSON or YAML object)
        #[arg(short, long)]
        data: PathBuf,
    },
    /// Validate a decision tree file without running it
    Validate {
        /// Path to the decision tree (YAML or JSON)
        #[arg(short, long)]
        tree: PathBuf,
    },
    /// Print the JSON Schema of a decision tree
    Schema,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init();

    let args = Args::parse();
    let mut config = Config::from_env()?;

    match args.command {
        Commands::Serve { port } => {
            if let Some(port) = port {
                config.port = port;
            }
            server::serve(config).await?;
        }
        Commands::Run { tree, data } => {
            let loader = TreeLoader::new();
            let decision_tree = loader
                .load_tree(&tree)
                .with_context(|| format!("failed to load tree {}", tree.display()))?;
            let record = loader
                .load_data(&data)
                .with_context(|| format!("failed to load data {}", data.display()))?;

            let registry = actions::default_registry(&config);
            TreeValidator::new(config.max_repeat_count)
                .with_known_kinds(registry.kinds())
                .validate(&decision_tree)?;

            log::info!("Running decision tree: {}", decision_tree.name);
            let engine = DecisionEngine::new(Arc::new(registry));
            let result = engine.evaluate_tree(&decision_tree, &record).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Commands::Validate { tree } => {
            let decision_tree = TreeLoader::new()
                .load_tree(&tree)
                .with_context(|| format!("failed to load tree {}", tree.display()))?;
            TreeValidator::new(config.max_repeat_count).validate(&decision_tree)?;
            println!("Decision tree '{}' is valid", decision_tree.name);
        }
        Commands::Schema => {
            println!(
                "{}",
                serde_json::to_string_pretty(server::decision_tree_schema())?
            );
        }
    }

    Ok(())
}
