//! Harvest top players' games from Lichess and decode every move for
//! heat-map analysis.
//!
//! ```bash
//! # Everything, end to end
//! harvester run-all
//!
//! # Only re-decode already fetched games
//! harvester process
//!
//! # Where do black's knights land?
//! harvester heatmap --black --piece N
//! ```

use anyhow::Context;
use chess_core::{HeatmapFilter, Piece};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use harvester::clients::lichess::LichessClient;
use harvester::config::HarvestConfig;
use harvester::pipeline::{self, FetchOptions};
use harvester::source::TimeWindow;
use harvester::store::Store;

#[derive(Parser)]
#[command(name = "harvester")]
#[command(about = "Fetch chess games and decode their moves into board coordinates")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch the leaderboard and store the usernames
    Leaders(LeadersArgs),
    /// Export games for every stored leader
    Games(GamesArgs),
    /// Remove duplicate games
    Clean,
    /// Decode moves of the cleaned games into plays
    Process,
    /// Print destination-square counts of the decoded plays
    Heatmap(HeatmapArgs),
    /// Run leaders, games, clean and process in order
    RunAll {
        #[command(flatten)]
        leaders: LeadersArgs,
        #[command(flatten)]
        games: GamesArgs,
    },
}

#[derive(Args)]
struct LeadersArgs {
    /// Number of top players (the API returns at most 200)
    #[arg(long, default_value_t = pipeline::DEFAULT_LEADERS)]
    players: usize,

    /// Rating category of the leaderboard
    #[arg(long, default_value = pipeline::DEFAULT_PERF)]
    perf: String,
}

#[derive(Args)]
struct GamesArgs {
    /// Maximum number of games per player
    #[arg(long, default_value_t = pipeline::DEFAULT_GAMES_PER_PLAYER)]
    max_games: usize,
}

#[derive(Args)]
struct HeatmapArgs {
    /// Only white's moves
    #[arg(long, conflicts_with = "black")]
    white: bool,

    /// Only black's moves
    #[arg(long)]
    black: bool,

    /// Restrict to a piece letter (P, N, B, R, Q, K); repeatable
    #[arg(long = "piece", value_parser = parse_piece)]
    pieces: Vec<Piece>,

    /// Count only the first N matching moves
    #[arg(long)]
    limit: Option<usize>,
}

impl HeatmapArgs {
    fn filter(&self) -> HeatmapFilter {
        let white = match (self.white, self.black) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        };
        HeatmapFilter {
            white,
            pieces: (!self.pieces.is_empty()).then(|| self.pieces.clone()),
            limit: self.limit,
        }
    }
}

fn parse_piece(s: &str) -> Result<Piece, String> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => {
            Piece::from_letter(c.to_ascii_uppercase()).ok_or_else(|| format!("unknown piece {s:?}"))
        }
        _ => Err(format!("expected a single piece letter, got {s:?}")),
    }
}

fn fetch_options(config: &HarvestConfig, args: &GamesArgs) -> FetchOptions {
    FetchOptions {
        window: TimeWindow::default(),
        max_games: args.max_games,
        retry: config.retry,
        player_delay: config.player_delay,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();
    let config = HarvestConfig::from_env()?;
    let store = Store::open(&config.data_dir)?;
    tracing::info!(data_dir = %config.data_dir.display(), "Using data directory");

    match cli.command {
        Command::Leaders(args) => {
            let client = LichessClient::new(&config)?;
            pipeline::fetch_leaders(&client, &store, &args.perf, args.players, &config.retry).await?;
        }
        Command::Games(args) => {
            let client = LichessClient::new(&config)?;
            pipeline::fetch_player_games(&client, &store, &fetch_options(&config, &args)).await?;
        }
        Command::Clean => {
            pipeline::clean_games(&store)?;
        }
        Command::Process => {
            pipeline::process_games(&store)?;
        }
        Command::Heatmap(args) => {
            let map = pipeline::build_heatmap(&store, &args.filter())
                .context("Failed to build heat map (run `harvester process` first?)")?;
            println!("{map}");
            println!("{} moves", map.total());
        }
        Command::RunAll { leaders, games } => {
            let client = LichessClient::new(&config)?;
            pipeline::fetch_leaders(&client, &store, &leaders.perf, leaders.players, &config.retry)
                .await?;
            pipeline::fetch_player_games(&client, &store, &fetch_options(&config, &games)).await?;
            pipeline::clean_games(&store)?;
            pipeline::process_games(&store)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_heatmap_args_build_filter() {
        let cli = Cli::try_parse_from(["harvester", "heatmap", "--black", "--piece", "n", "--piece", "Q"]).unwrap();
        let Command::Heatmap(args) = cli.command else {
            panic!("expected heatmap command");
        };
        let filter = args.filter();
        assert_eq!(filter.white, Some(false));
        assert_eq!(filter.pieces, Some(vec![Piece::Knight, Piece::Queen]));
        assert_eq!(filter.limit, None);
    }

    #[test]
    fn test_parse_piece_rejects_garbage() {
        assert_eq!(parse_piece("K"), Ok(Piece::King));
        assert!(parse_piece("Z").is_err());
        assert!(parse_piece("NN").is_err());
    }
}
