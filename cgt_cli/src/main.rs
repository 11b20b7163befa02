use anyhow::Result;
use clap::{self, Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

mod evaluate;
mod report;
mod sum;

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute the canonical form of a game and its derived values
    Evaluate(evaluate::Args),

    /// Sum multiple games
    Sum(sum::Args),

    /// Construct games and print the sizes of the game tables
    Report(report::Args),
}

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Log debug information to stderr. `RUST_LOG` takes precedence when set.
    #[arg(long, global = true)]
    verbose: bool,

    #[clap(subcommand)]
    command: Command,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(env_filter)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    match args.command {
        Command::Evaluate(args) => evaluate::run(args),
        Command::Sum(args) => sum::run(args),
        Command::Report(args) => report::run(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn verbose_is_global() {
        let args = Args::parse_from(["cgt-cli", "sum", "--verbose", "1", "*"]);
        assert!(args.verbose);
        assert!(matches!(args.command, Command::Sum(_)));
    }
}
