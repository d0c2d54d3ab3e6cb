//! Civitas daemon: build a governance engine from a genesis file, persist
//! its state, and inspect it.

use anyhow::{bail, Context};
use civitas_governance::{GenesisConfig, GovernanceCall, GovernanceEngine, Proposal};
use civitas_types::{Address, BlockHeight, GovernanceParams, NetworkId};
use civitas_utils::{format_ticks, init_tracing, LogFormat};
use clap::Parser;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "civitas-daemon", about = "Civitas governance daemon")]
struct Cli {
    /// Network: "live", "test", or "dev".
    /// When a genesis file is provided, overrides the file's network value.
    #[arg(long, env = "CIVITAS_NETWORK")]
    network: Option<String>,

    /// Path to a TOML genesis file.
    #[arg(long, env = "CIVITAS_GENESIS")]
    config: Option<PathBuf>,

    /// Path to a saved engine state. Takes precedence over the genesis file.
    #[arg(long, env = "CIVITAS_STATE")]
    state: Option<PathBuf>,

    /// Average seconds per block, used for human-readable durations.
    #[arg(long, default_value_t = 12, env = "CIVITAS_BLOCK_SECS")]
    block_secs: u64,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, default_value = "info", env = "CIVITAS_LOG_LEVEL")]
    log_level: String,

    /// Emit logs as JSON lines.
    #[arg(long, env = "CIVITAS_JSON_LOGS")]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Build the engine from genesis and write its state to a file.
    Init {
        #[arg(long)]
        out: PathBuf,
    },
    /// Print a JSON summary of the ledger, parameters and proposals.
    Summary,
    /// Print the governance parameters.
    Params,
    /// Encode a privileged call (JSON) as hex call data for a proposal.
    EncodeCall {
        /// e.g. '{"SetParam":{"param":"QuorumBps","value":500}}'
        json: String,
    },
}

#[derive(Serialize)]
struct Summary {
    identity: Address,
    name: String,
    symbol: String,
    height: BlockHeight,
    total_supply: u128,
    treasury_balance: u128,
    locked_treasury: u128,
    holders: usize,
    params: GovernanceParams,
    proposals_issued: u64,
    proposals: Vec<ProposalSummary>,
}

#[derive(Serialize)]
struct ProposalSummary {
    id: u64,
    title: String,
    proposer: Address,
    stage: &'static str,
    deadline: BlockHeight,
    calls: usize,
    voters: usize,
}

impl From<&Proposal> for ProposalSummary {
    fn from(p: &Proposal) -> Self {
        Self {
            id: p.id,
            title: p.title.clone(),
            proposer: p.proposer,
            stage: p.stage.name(),
            deadline: p.deadline,
            calls: p.calls.len(),
            voters: p.voters.len(),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let format = if cli.json_logs {
        LogFormat::Json
    } else {
        LogFormat::Text
    };
    init_tracing(&cli.log_level, format);

    match &cli.command {
        Command::EncodeCall { json } => {
            let call: GovernanceCall =
                serde_json::from_str(json).context("parsing governance call")?;
            println!("0x{}", hex::encode(call.encode()?));
        }
        Command::Init { out } => {
            let engine = load_engine(&cli)?;
            let bytes = engine.save_state()?;
            std::fs::write(out, bytes)
                .with_context(|| format!("writing state to {}", out.display()))?;
            tracing::info!(path = %out.display(), "engine state written");
        }
        Command::Summary => {
            let engine = load_engine(&cli)?;
            let ledger = engine.ledger();
            let summary = Summary {
                identity: engine.identity(),
                name: ledger.metadata().name.clone(),
                symbol: ledger.metadata().symbol.clone(),
                height: engine.height(),
                total_supply: ledger.total_supply(),
                treasury_balance: ledger.balance_of(&engine.identity()),
                locked_treasury: ledger.locked_treasury(),
                holders: ledger.holder_count(),
                params: engine.params().clone(),
                proposals_issued: engine.proposal_count(),
                proposals: engine.proposals().map(ProposalSummary::from).collect(),
            };
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Command::Params => {
            let engine = load_engine(&cli)?;
            let params = engine.params();
            println!(
                "min_voting_duration  {}",
                format_ticks(params.min_voting_duration, cli.block_secs)
            );
            println!(
                "execution_delay      {}",
                format_ticks(params.execution_delay, cli.block_secs)
            );
            println!("quorum_bps           {}", params.quorum_bps);
            println!("transfer_fee_bps     {}", params.transfer_fee_bps);
        }
    }

    Ok(())
}

fn load_engine(cli: &Cli) -> anyhow::Result<GovernanceEngine> {
    if let Some(path) = &cli.state {
        let bytes =
            std::fs::read(path).with_context(|| format!("reading state {}", path.display()))?;
        let engine = GovernanceEngine::load_state(&bytes)?;
        tracing::info!(path = %path.display(), height = %engine.height(), "loaded engine state");
        return Ok(engine);
    }

    let Some(path) = &cli.config else {
        bail!("either --state or --config is required");
    };
    let mut genesis = read_genesis(path)?;
    if let Some(network) = &cli.network {
        genesis.network = network.to_lowercase().parse::<NetworkId>()?;
    }
    Ok(GovernanceEngine::from_genesis(&genesis)?)
}

fn read_genesis(path: &Path) -> anyhow::Result<GenesisConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("reading genesis {}", path.display()))?;
    let genesis = GenesisConfig::from_toml_str(&contents)
        .with_context(|| format!("parsing genesis {}", path.display()))?;
    tracing::info!(path = %path.display(), network = %genesis.network, "loaded genesis");
    Ok(genesis)
}
