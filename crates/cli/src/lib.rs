use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use command::CommandResponse;
use config::AppConfig;
use std::io;
use std::path::PathBuf;

mod command;
mod config;
mod suggest;

fn print_stdout(text: &str) -> Result<()> {
    use std::io::Write;

    let mut stdout = io::stdout().lock();
    if let Err(err) = stdout
        .write_all(text.as_bytes())
        .and_then(|_| stdout.write_all(b"\n"))
        .and_then(|_| stdout.flush())
    {
        if err.kind() == io::ErrorKind::BrokenPipe {
            return Ok(());
        }
        return Err(err.into());
    }
    Ok(())
}

#[derive(Parser)]
#[command(name = "evopath")]
#[command(about = "Evolution paths that pick up the moves you need", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (search progress included)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Config file (default: ./evopath.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Shortest path that meets every requirement group
    Path(PathArgs),

    /// Brute-force search over concrete candidate choices
    Combo(ComboArgs),

    /// Show the evolution edges of one entity
    Neighbors(NeighborsArgs),

    /// Rank move elements and pick the strongest inheritable moves
    Threats(ThreatsArgs),

    /// Run many path queries from a JSON file concurrently
    Batch(BatchArgs),
}

impl Commands {
    fn json(&self) -> bool {
        match self {
            Commands::Path(args) => args.json,
            Commands::Combo(args) => args.json,
            Commands::Neighbors(args) => args.json,
            Commands::Threats(args) => args.json,
            Commands::Batch(args) => args.json,
        }
    }
}

#[derive(Args)]
pub(crate) struct GraphSource {
    /// Evolution CSV (`Digimon,Evolves To`)
    #[arg(long, short = 'e')]
    pub evolutions: PathBuf,

    /// Separator inside the `Evolves To` column
    #[arg(long, default_value_t = evopath_graph::DEFAULT_DELIMITER)]
    pub delimiter: char,
}

#[derive(Args)]
pub(crate) struct MoveSource {
    /// Move catalog CSV (`Move,Icon,Attribute,Type,SP_Cost,Power,Inheritable`)
    #[arg(long, requires = "learners")]
    pub moves: Option<PathBuf>,

    /// Learner CSV (`Move,Digimon,Level`)
    #[arg(long, requires = "moves")]
    pub learners: Option<PathBuf>,

    /// Mark level-1 signature moves as not inheritable before selecting
    #[arg(long)]
    pub fix_inheritable: bool,
}

#[derive(Args)]
pub(crate) struct ThreatSelection {
    /// Pick moves from the most common threat elements
    #[arg(long)]
    pub optimize: bool,

    /// Number of threat elements to cover (clamped to 1..=8)
    #[arg(long, default_value_t = 5)]
    pub top: usize,

    /// Only consider moves of this kind, e.g. Physical or Magical
    #[arg(long)]
    pub kind: Option<String>,
}

#[derive(Args)]
pub(crate) struct PathArgs {
    #[command(flatten)]
    pub graph: GraphSource,

    /// Entity the path starts at
    #[arg(long)]
    pub start: String,

    /// Entity the path ends at
    #[arg(long)]
    pub end: String,

    /// Requirement group: `;`-separated entities, any one of which satisfies it
    #[arg(long = "group")]
    pub groups: Vec<String>,

    /// Move to learn on the way; its learners become a requirement group
    #[arg(long = "move")]
    pub move_names: Vec<String>,

    #[command(flatten)]
    pub moves: MoveSource,

    #[command(flatten)]
    pub threats: ThreatSelection,

    /// Frontier cap (overrides config and EVOPATH_MAX_FRONTIER)
    #[arg(long)]
    pub max_frontier: Option<usize>,

    /// Output JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub(crate) struct ComboArgs {
    #[command(flatten)]
    pub graph: GraphSource,

    #[arg(long)]
    pub start: String,

    #[arg(long)]
    pub end: String,

    /// Candidate list: `;`-separated entities, exactly one of which is chosen
    #[arg(long = "candidates")]
    pub candidates: Vec<String>,

    /// Move whose learners become a candidate list
    #[arg(long = "move")]
    pub move_names: Vec<String>,

    #[command(flatten)]
    pub moves: MoveSource,

    /// Refuse inputs with more combinations than this
    #[arg(long)]
    pub max_combinations: Option<usize>,

    /// Output JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub(crate) struct NeighborsArgs {
    #[command(flatten)]
    pub graph: GraphSource,

    /// Entity to inspect
    pub name: String,

    /// Output JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub(crate) struct ThreatsArgs {
    /// Move catalog CSV
    #[arg(long)]
    pub moves: PathBuf,

    /// Learner CSV
    #[arg(long)]
    pub learners: PathBuf,

    /// Number of threat elements (clamped to 1..=8)
    #[arg(long, default_value_t = 5)]
    pub top: usize,

    /// Only consider moves of this kind
    #[arg(long)]
    pub kind: Option<String>,

    /// Mark level-1 signature moves as not inheritable first
    #[arg(long)]
    pub fix_inheritable: bool,

    /// Output JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub(crate) struct BatchArgs {
    #[command(flatten)]
    pub graph: GraphSource,

    /// JSON array of queries: `{"id", "start", "end", "groups", "moves", "max_frontier"}`
    #[arg(long)]
    pub file: PathBuf,

    #[command(flatten)]
    pub moves: MoveSource,

    /// Searches in flight (overrides config and EVOPATH_BATCH_CONCURRENCY)
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Output JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn main_entry() -> Result<()> {
    let mut cli = Cli::parse();

    // Keep stdout clean for JSON consumers
    let json_output = cli.command.json();
    if json_output {
        cli.quiet = true;
    }

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    match run(cli).await {
        Err(err) if json_output => {
            let response = CommandResponse::<()>::error(format!("{err:#}"));
            print_stdout(&serde_json::to_string_pretty(&response)?)?;
            std::process::exit(1);
        }
        other => other,
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = AppConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Path(args) => command::path::run(args, &config)?,
        Commands::Combo(args) => command::combo::run(args, &config)?,
        Commands::Neighbors(args) => command::neighbors::run(args)?,
        Commands::Threats(args) => command::threats::run(args)?,
        Commands::Batch(args) => command::batch::run(args, &config).await?,
    }

    Ok(())
}
