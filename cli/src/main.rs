//! Ballot client: load a voting contract and vote through a connected wallet.

mod config;
mod render;

use anyhow::Context;
use ballot_contract::SignerConnector;
use ballot_store_lmdb::{environment::DEFAULT_MAP_SIZE, LmdbEnvironment};
use ballot_types::AddressMatch;
use ballot_utils::{init_logging, LogFormat};
use ballot_wallet_core::{AuthSession, SessionProvider, WalletProvider};
use ballot_workflow::VotingWorkflow;
use clap::Parser;
use std::path::PathBuf;

use crate::config::BallotConfig;

#[derive(Parser)]
#[command(name = "ballot", about = "Vote on an on-chain ballot through your wallet")]
struct Cli {
    /// Wallet JSON-RPC endpoint.
    #[arg(long, env = "BALLOT_PROVIDER_URL")]
    provider_url: Option<String>,

    /// Data directory for the local store.
    #[arg(long, env = "BALLOT_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Address matching: "strict" or "substring".
    #[arg(long, env = "BALLOT_ADDRESS_MATCH", value_parser = parse_address_match)]
    address_match: Option<AddressMatch>,

    /// Re-read the contract after a confirmed vote.
    #[arg(long, env = "BALLOT_AUTO_RELOAD")]
    auto_reload: bool,

    /// Receipt polling interval in milliseconds.
    #[arg(long, env = "BALLOT_CONFIRMATION_POLL_MS")]
    confirmation_poll_ms: Option<u64>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "BALLOT_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "BALLOT_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Connect the wallet and show the session.
    Connect,
    /// Load the voting topic and candidates, optionally from a new address.
    Load {
        /// Contract address; defaults to the cached one.
        address: Option<String>,
    },
    /// Vote for a candidate and wait for confirmation.
    Vote {
        /// Candidate id as listed by `ballot load`.
        candidate_id: u64,
    },
    /// Show the cached address and workflow state without contacting the wallet.
    Status,
}

fn parse_address_match(s: &str) -> Result<AddressMatch, String> {
    match s.to_ascii_lowercase().as_str() {
        "strict" => Ok(AddressMatch::Strict),
        "substring" => Ok(AddressMatch::Substring),
        other => Err(format!("unknown address match mode: {other}")),
    }
}

impl Cli {
    /// File settings (or defaults), overridden by flags and env vars.
    fn resolve_config(&self) -> anyhow::Result<BallotConfig> {
        let base = match &self.config {
            Some(path) => BallotConfig::from_toml_file(path)?,
            None => BallotConfig::default(),
        };
        Ok(BallotConfig {
            provider_url: self.provider_url.clone().unwrap_or(base.provider_url),
            data_dir: self.data_dir.clone().unwrap_or(base.data_dir),
            address_match: self.address_match.unwrap_or(base.address_match),
            auto_reload_after_vote: self.auto_reload || base.auto_reload_after_vote,
            confirmation_poll_ms: self.confirmation_poll_ms.unwrap_or(base.confirmation_poll_ms),
            log_level: self.log_level.clone().unwrap_or(base.log_level),
            log_format: self.log_format.unwrap_or(base.log_format),
        })
    }
}

/// Connect to the wallet. Failure is logged, not fatal: the workflow then
/// runs without a signer and reports that itself.
async fn connect(provider: &mut WalletProvider) -> AuthSession {
    match provider.connect().await {
        Ok(session) => session,
        Err(e) => {
            tracing::warn!(url = provider.url(), "wallet not connected: {e}");
            AuthSession::default()
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.resolve_config()?;
    init_logging(config.log_format, &config.log_level);

    let mut provider = WalletProvider::new(config.provider_url.clone())?;

    if let Command::Connect = cli.command {
        let session = provider
            .connect()
            .await
            .with_context(|| format!("connecting to wallet at {}", config.provider_url))?;
        println!("{}", session.describe());
        return Ok(());
    }

    let env = LmdbEnvironment::open(&config.data_dir, DEFAULT_MAP_SIZE)
        .with_context(|| format!("opening store in {}", config.data_dir.display()))?;
    let store = env.kv_store();

    let session = match cli.command {
        Command::Status => AuthSession::default(),
        _ => connect(&mut provider).await,
    };
    let connector = session.signer().map(|signer| {
        SignerConnector::new(signer.clone())
            .with_poll_interval(config.confirmation_poll_interval())
    });
    let workflow = VotingWorkflow::new(&store, connector.as_ref(), config.workflow());

    let mut out = std::io::stdout().lock();
    match cli.command {
        Command::Connect => {}
        Command::Status => {
            println!("{}", session.describe());
            match workflow.pending_address().as_str() {
                "" => println!("Contract: (none)"),
                address => println!("Contract: {address}"),
            }
            println!("State: {}", workflow.state());
        }
        Command::Load { address } => {
            if let Some(address) = address {
                workflow.set_contract_address(address);
            }
            if workflow.pending_address().is_empty() {
                render::session(&mut out, &workflow.session())?;
                return Ok(());
            }
            let voting = workflow.commit_and_load().await?;
            render::session(&mut out, &voting)?;
        }
        Command::Vote { candidate_id } => {
            let receipt = workflow.submit_vote(candidate_id).await?;
            render::vote(&mut out, &receipt)?;
        }
    }

    Ok(())
}
