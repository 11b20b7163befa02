use crate::sum::parse_games;
use anyhow::Result;
use cgt_canonical::short::partizan::universe;
use clap::Parser;

/// Construct the given games and print the sizes of the game tables
#[derive(Parser, Debug, Clone)]
pub struct Args {
    /// Games to construct before reporting
    games: Vec<String>,

    /// Print the report as JSON
    #[arg(long, default_value_t = false)]
    json: bool,
}

pub fn run(args: Args) -> Result<()> {
    let games = parse_games(&args.games)?;
    tracing::debug!(count = games.len(), "Constructed games");

    let report = universe::report();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report);
        println!("Number of Memoized Operations: {}", report.operations);
    }

    Ok(())
}
