use clap::Parser;
use mkt_core::models::{PointError, PolyLine};

mod io;
pub use io::*;

mod commands;
pub use commands::*;

mod round;
pub use round::*;

// Offers are keyed by participant; insertion order is kept for stable output
pub type Map<K, V> = indexmap::IndexMap<K, V, rustc_hash::FxBuildHasher>;

// The top-level arguments -- presently just which subcommand to execute
#[derive(Parser)]
#[command(version, about, long_about = None)]
pub struct BaseArgs {
    #[command(subcommand)]
    pub command: Commands,
}

impl BaseArgs {
    pub fn evaluate(self) -> anyhow::Result<()> {
        match self.command {
            Commands::Clear { round, output } => {
                output.check_output(&round)?;
                let report = round.load::<MarketRound>()?.clear()?;
                output.store(&report)?;
            }
            Commands::Combine {
                curves,
                output,
                op,
            } => {
                output.check_output(&curves)?;
                let combined = op.fold(curves.load::<Vec<PolyLine>>()?)?;
                output.store(&combined)?;
            }
        }

        Ok(())
    }
}

#[derive(thiserror::Error, Debug)]
pub enum CliError {
    #[error("Nothing to combine, please provide at least one curve")]
    NoCurves,
    #[error("Combined curve is out of range: {0}")]
    OutOfRange(#[from] PointError),
}
