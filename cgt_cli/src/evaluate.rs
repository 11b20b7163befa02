use anyhow::{Context, Result};
use cgt_canonical::{
    numeric::dyadic_rational::DyadicRational,
    short::partizan::{canonical_game::CanonicalGame, stop::Stop, thermograph::Thermograph},
};
use clap::Parser;
use itertools::Itertools;
use serde::Serialize;
use std::str::FromStr;

/// Evaluate a single game
#[derive(Parser, Debug)]
pub struct Args {
    /// Game to evaluate, e.g. `{1|{0|-2}}` or `^3*`
    #[arg(long)]
    game: String,

    /// Print the evaluation as JSON
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Serialize, Debug)]
struct Evaluation {
    canonical_form: CanonicalGame,
    id: usize,
    birthday: u32,
    left_stop: Stop,
    right_stop: Stop,
    mean: DyadicRational,
    temperature: DyadicRational,
    thermograph: &'static Thermograph,
    atomic_weight: Option<CanonicalGame>,
    incentives: Vec<CanonicalGame>,
    orthodox_form: CanonicalGame,
    reduced_canonical_form: CanonicalGame,
    dissociation: String,
}

impl Evaluation {
    fn new(game: CanonicalGame) -> Self {
        Self {
            canonical_form: game,
            id: game.id().0,
            birthday: game.birthday(),
            left_stop: game.left_stop(),
            right_stop: game.right_stop(),
            mean: game.mean(),
            temperature: game.temperature(),
            thermograph: game.thermograph(),
            atomic_weight: game.atomic_weight().ok(),
            incentives: game.incentives(),
            orthodox_form: game.orthodox_form(),
            reduced_canonical_form: game.reduced_canonical_form(),
            dissociation: game.dissociate().to_string(),
        }
    }

    fn print(&self) {
        println!("{}", self.canonical_form);
        println!("id = {}", self.id);
        println!("birthday = {}", self.birthday);
        println!("left stop = {}", self.left_stop);
        println!("right stop = {}", self.right_stop);
        println!("mean = {}", self.mean);
        println!("temperature = {}", self.temperature);
        println!("thermograph = {}", self.thermograph);
        if let Some(atomic_weight) = self.atomic_weight {
            println!("atomic weight = {}", atomic_weight);
        }
        println!("incentives = [{}]", self.incentives.iter().join(", "));
        println!("orthodox form = {}", self.orthodox_form);
        println!("reduced canonical form = {}", self.reduced_canonical_form);
        println!("dissociation = {}", self.dissociation);
    }
}

pub fn run(args: Args) -> Result<()> {
    let game = CanonicalGame::from_str(&args.game)
        .with_context(|| format!("Could not parse game: '{}'", &args.game))?;
    tracing::debug!(%game, id = %game.id(), "Evaluating");

    let evaluation = Evaluation::new(game);
    if args.json {
        let json =
            serde_json::to_string_pretty(&evaluation).context("Could not serialize evaluation")?;
        println!("{}", json);
    } else {
        evaluation.print();
    }

    Ok(())
}
