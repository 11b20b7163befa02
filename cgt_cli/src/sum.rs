use anyhow::{Context, Result};
use cgt_canonical::short::partizan::canonical_game::CanonicalGame;
use clap::{Parser, arg};
use std::{fmt::Write, str::FromStr};

/// Sum multiple games and print the canonical form of the result
#[derive(Parser, Debug, Clone)]
pub struct Args {
    /// Games to sum
    #[arg(required = true)]
    games: Vec<String>,
}

pub(crate) fn parse_games(inputs: &[String]) -> Result<Vec<CanonicalGame>> {
    inputs
        .iter()
        .map(|input| {
            CanonicalGame::from_str(input)
                .with_context(|| format!("Could not parse game: '{}'", input))
        })
        .collect()
}

pub fn run(args: Args) -> Result<()> {
    let games = parse_games(&args.games)?;
    let mut result = CanonicalGame::zero();
    let mut buf = String::new();

    for (idx, game) in games.iter().enumerate() {
        if idx != 0 {
            buf.write_str(" + ")?;
        }
        write!(buf, "{}", game)?;
        result += *game;
    }

    write!(buf, " = {}", result)?;

    println!("{}", buf);
    println!("temperature({}) = {}", result, result.temperature());

    Ok(())
}
