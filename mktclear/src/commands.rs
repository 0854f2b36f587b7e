use super::Document;
use clap::Subcommand;

mod combine;
pub use combine::CombineOp;

#[derive(Subcommand)]
pub enum Commands {
    /// Sum the offers of each side and report where supply meets demand
    Clear {
        /// The market round to clear, as JSON ("-" reads stdin)
        round: Document,

        /// Where to write the clearing report ("-" writes stdout)
        #[arg(short, long, default_value = "-")]
        output: Document,
    },

    /// Combine a list of curves point-wise into a single curve
    Combine {
        /// A JSON array of curves ("-" reads stdin)
        curves: Document,

        /// Where to write the combined curve ("-" writes stdout)
        #[arg(short, long, default_value = "-")]
        output: Document,

        /// How to combine the values at each sample
        #[arg(long, default_value = "sum")]
        op: CombineOp,
    },
}
