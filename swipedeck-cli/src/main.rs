//! `swipedeck`: browse a Vercel account's projects as a card deck

mod browse;
mod navigator;
mod presenter;

use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use env_logger::{Builder, Target};
use log::LevelFilter;
use swipedeck_core::infra::services::PresentationSink;
use swipedeck_core::infra::{
    Credential, CredentialStore, DeckConfig, FileCredentialStore, VercelClient,
};
use swipedeck_core::session::{
    DeckRuntime, DeckServices, SessionMessage, SessionPhase,
};

use crate::browse::wait_for_load;
use crate::navigator::SystemNavigator;
use crate::presenter::{LogPresenter, TerminalPresenter, project_line};

#[derive(Parser, Debug)]
#[command(name = "swipedeck")]
#[command(about = "Swipe through your Vercel projects from the terminal")]
struct Cli {
    /// Platform API base URL (overrides config)
    #[arg(long, env = "SWIPEDECK_API_URL", global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Validate an access token and store it
    Connect {
        /// Vercel access token
        token: String,
    },
    /// Forget the stored token
    Disconnect,
    /// Print the deck in order
    List,
    /// Browse the deck interactively from stdin
    Browse,
}

fn init_logger() {
    Builder::new()
        .target(Target::Stderr)
        .filter_level(LevelFilter::Warn)
        .filter_module("swipedeck_core", LevelFilter::Debug)
        .filter_module("swipedeck", LevelFilter::Debug)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    if std::env::var("RUST_LOG").is_err() {
        init_logger();
    } else {
        env_logger::init();
    }

    let cli = Cli::parse();
    let mut config = DeckConfig::load();
    if let Some(api_url) = cli.api_url {
        config.api_base_url = api_url;
    }
    let store: Arc<dyn CredentialStore> = Arc::new(
        FileCredentialStore::new().context("locating credential storage")?,
    );

    match cli.command {
        Command::Connect { token } => connect(&config, store, &token).await,
        Command::Disconnect => {
            store.clear().context("clearing stored token")?;
            println!("Disconnected.");
            Ok(())
        }
        Command::List => list(&config, store).await,
        Command::Browse => {
            let runtime =
                build_runtime(&config, store, Arc::new(TerminalPresenter))?;
            browse::run(runtime).await
        }
    }
}

fn build_runtime(
    config: &DeckConfig,
    credentials: Arc<dyn CredentialStore>,
    presenter: Arc<dyn PresentationSink>,
) -> Result<DeckRuntime> {
    let client = VercelClient::from_config(config)
        .context("building the platform API client")?;
    let services = DeckServices {
        source: Arc::new(client),
        credentials,
        navigator: Arc::new(SystemNavigator::new()),
        presenter,
    };
    Ok(DeckRuntime::new(services, config)?)
}

fn loaded_or_bail(runtime: &DeckRuntime) -> Result<()> {
    match runtime.session().phase() {
        SessionPhase::Ready | SessionPhase::Empty => Ok(()),
        SessionPhase::Unauthenticated { error: Some(message) }
        | SessionPhase::Failed { message } => bail!("{message}"),
        SessionPhase::Unauthenticated { error: None } => {
            bail!("Not connected. Run `swipedeck connect <token>` first.")
        }
        SessionPhase::Loading => bail!("Loading did not finish"),
    }
}

async fn connect(
    config: &DeckConfig,
    store: Arc<dyn CredentialStore>,
    token: &str,
) -> Result<()> {
    let Some(credential) = Credential::parse(token) else {
        bail!("Token must not be empty");
    };
    let mut runtime = build_runtime(config, store, Arc::new(LogPresenter))?;
    runtime.dispatch(SessionMessage::Connect(credential));
    wait_for_load(&mut runtime).await;
    loaded_or_bail(&runtime)?;

    println!(
        "Connected. {} projects in the deck.",
        runtime.session().deck().len()
    );
    Ok(())
}

async fn list(config: &DeckConfig, store: Arc<dyn CredentialStore>) -> Result<()> {
    let mut runtime = build_runtime(config, store, Arc::new(LogPresenter))?;
    runtime.dispatch(SessionMessage::Restore);
    wait_for_load(&mut runtime).await;
    loaded_or_bail(&runtime)?;

    let deck = runtime.session().deck();
    if deck.is_empty() {
        println!("No projects found.");
    }
    for project in deck.items() {
        println!("{}", project_line(project));
    }
    Ok(())
}
