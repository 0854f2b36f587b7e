use crate::CliError;
use clap::ValueEnum;
use mkt_core::models::PolyLine;

// The point-wise operators a user can pick from the command line
#[derive(Clone, Copy, Debug, PartialEq, ValueEnum)]
pub enum CombineOp {
    Min,
    Max,
    Sum,
}

impl CombineOp {
    pub fn apply(&self, a: Option<f64>, b: Option<f64>) -> Option<f64> {
        match self {
            Self::Min => PolyLine::min(a, b),
            Self::Max => PolyLine::max(a, b),
            Self::Sum => PolyLine::sum(a, b),
        }
    }

    /// Folds the curves left to right
    pub fn fold(&self, curves: impl IntoIterator<Item = PolyLine>) -> Result<PolyLine, CliError> {
        let mut curves = curves.into_iter();
        let first = curves.next().ok_or(CliError::NoCurves)?;
        curves.try_fold(first, |total, curve| {
            PolyLine::combine(&total, &curve, |a, b| self.apply(a, b)).map_err(CliError::from)
        })
    }
}
