mod cli;

use clap::Parser;
use hostai::audit::AuditLogger;
use hostai::exec::{CommandRunner, StdinConfirmer};
use hostai::llm::{AssistantGateway, HuggingFaceBackend};
use hostai::{AppResult, Classifier, Config, Dispatcher, ExecutionGate};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = cli::Args::parse();

    match run(args).await {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Defaults, then the config file, then the environment
fn load_config(args: &cli::Args) -> AppResult<Config> {
    let mut config = match args.config {
        Some(ref path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    config.apply_env(|name| std::env::var(name).ok())?;
    Ok(config)
}

fn build_dispatcher(config: &Config) -> AppResult<Dispatcher> {
    let backend = HuggingFaceBackend::new(&config.gateway)?;
    let gateway = AssistantGateway::new(Box::new(backend));

    let logger = AuditLogger::with_path(&config.audit.log_path)?;
    let gate = ExecutionGate::new(
        Classifier::new(),
        logger,
        Box::new(CommandRunner::from_config(&config.execution)),
        Box::new(StdinConfirmer),
    );

    Ok(Dispatcher::new(gateway, gate))
}

async fn run(args: cli::Args) -> AppResult<i32> {
    let config = load_config(&args)?;
    let dispatcher = build_dispatcher(&config)?;
    cli::run_prompt(&dispatcher, &args, &mut std::io::stdout()).await
}
