mod dispatch;
mod report;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dispatch::{compare_models, single_converse};
use llm_client::{BedrockProvider, Config, ConverseProvider, ConverseRequest, ModelRegistry};
use std::io::Write;

const TEXT_TO_SUMMARIZE: &str = "\
AWS took all of that feedback from customers, and today we are excited to announce Amazon Bedrock, \
a new service that makes FMs from AI21 Labs, Anthropic, Stability AI, and Amazon accessible via an API. \
Bedrock is the easiest way for customers to build and scale generative AI-based applications using FMs, \
democratizing access for all builders. Bedrock will offer the ability to access a range of powerful FMs \
for text and images—including Amazons Titan FMs, which consist of two new LLMs we're also announcing \
today—through a scalable, reliable, and secure AWS managed service. With Bedrock's serverless experience, \
customers can easily find the right model for what they're trying to get done, get started quickly, privately \
customize FMs with their own data, and easily integrate and deploy them into their applications using the AWS \
tools and capabilities they are familiar with, without having to manage any infrastructure (including integrations \
with Amazon SageMaker ML features like Experiments to test different models and Pipelines to manage their FMs at scale).
";

#[derive(Parser, Debug)]
#[command(
    name = "converse-demo",
    about = "Summarize a fixed text with Amazon Bedrock models",
    long_about = "Sends the same summarization request to every configured Bedrock model and compares the answers"
)]
#[command(version)]
struct Args {
    /// Call only the first model, reporting access errors instead of comparing
    #[arg(long)]
    single: bool,

    /// Compare every model in the built-in catalog
    #[arg(long)]
    all_models: bool,

    /// AWS region (overrides config and environment)
    #[arg(long)]
    region: Option<String>,

    /// Also print all results, failures included, as JSON
    #[arg(long)]
    json: bool,

    /// Enable debug mode for verbose output
    #[arg(short, long, default_value_t = false)]
    debug: bool,

    /// Configuration subcommand
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Show current configuration
    Show,
    /// List the models a run will compare, in call order
    List,
    /// Add a model (or change the identifier of an existing one)
    AddModel {
        /// Display name
        name: String,
        /// Bedrock model identifier
        id: String,
    },
    /// Set the AWS region
    SetRegion {
        region: String,
    },
}

/// Handle config subcommands
fn handle_config_command(action: &ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let config = Config::load()?;
            let path = Config::config_path()?;
            println!("Config file: {}", path.display());
            println!();
            println!("{:#?}", config);
        }
        ConfigAction::List => {
            let config = Config::load()?;
            println!("Models:");
            for entry in config.registry().iter() {
                println!("  {} - {}", entry.name, entry.id);
            }
        }
        ConfigAction::AddModel { name, id } => {
            let mut config = Config::load()?;
            let verb = match config.registry().get(name) {
                Some(_) => "Updated",
                None => "Added",
            };
            config.add_model(name, id)?;
            config.save()?;
            println!("{} model: {} ({})", verb, name, id);
        }
        ConfigAction::SetRegion { region } => {
            let mut config = Config::load()?;
            config.region = Some(region.clone());
            config.save()?;
            println!("Region set to: {}", region);
        }
    }
    Ok(())
}

fn init_logging(debug: bool) {
    let default_filter = if debug {
        "warn,converse_demo=debug,llm_client=debug"
    } else {
        "warn"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn summary_prompt() -> String {
    format!(
        "Please provide a concise summary of the following text in 2-3 sentences. Text to summarize: {}",
        TEXT_TO_SUMMARIZE
    )
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.debug);

    // Handle config subcommands first (before client initialization)
    if let Some(Commands::Config { action }) = &args.command {
        return handle_config_command(action);
    }

    let config = Config::load().context("Failed to load configuration")?;
    let registry = if args.all_models {
        ModelRegistry::catalog()
    } else {
        config.registry()
    };
    let request = ConverseRequest::user(summary_prompt(), config.inference);

    let region = args.region.clone().or_else(|| config.region.clone());
    let provider = BedrockProvider::from_env(region).await;
    log::debug!(
        "Using {} in {} for {} model(s)",
        provider.name(),
        provider.region(),
        registry.len()
    );

    let mut out = std::io::stdout().lock();

    if args.single {
        let entry = registry.first().context("No models configured")?;
        return single_converse(&provider, &entry.id, &request, &mut out).await;
    }

    let results = compare_models(&provider, &registry, &request, &mut out).await;
    report::write_report(&results, &mut out)?;

    if args.json {
        writeln!(out, "{}", report::to_json(&results)?)?;
    }

    Ok(())
}
