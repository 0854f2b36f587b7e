use std::cmp::Ordering;

/// A vertex of a piecewise-linear bid or offer curve
///
/// Each point consists of:
/// - An independent coordinate `x` (conventionally the price)
/// - A dependent coordinate `y` (conventionally the quantity)
///
/// Points are immutable once constructed and both coordinates are guaranteed
/// to be finite.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "(f64, f64)", into = "(f64, f64)")
)]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    /// Creates a new point, rejecting NaN and infinite coordinates
    pub fn new(x: f64, y: f64) -> Result<Self, PointError> {
        if x.is_nan() || y.is_nan() {
            return Err(PointError::NaN);
        }
        if x.is_infinite() || y.is_infinite() {
            return Err(PointError::Infinity);
        }
        Ok(Self { x, y })
    }

    /// Creates a new point without validating the coordinates
    ///
    /// # Safety
    ///
    /// The caller must guarantee that both coordinates are finite. The curve
    /// arithmetic assumes finite values and will produce meaningless results
    /// (or NaN) otherwise.
    pub unsafe fn new_unchecked(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The independent coordinate
    pub fn x(&self) -> f64 {
        self.x
    }

    /// The dependent coordinate
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Compares two points by their independent coordinate only.
    ///
    /// This is the ordering curves are kept in. Points with equal `x` compare
    /// as equal here even if their `y` differ; curves resolve such ties by
    /// insertion order.
    pub fn cmp_x(&self, other: &Self) -> Ordering {
        self.x.total_cmp(&other.x)
    }
}

impl TryFrom<(f64, f64)> for Point {
    type Error = PointError;

    fn try_from((x, y): (f64, f64)) -> Result<Self, Self::Error> {
        Self::new(x, y)
    }
}

impl From<Point> for (f64, f64) {
    fn from(value: Point) -> Self {
        (value.x, value.y)
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Errors that can occur when constructing a point
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum PointError {
    /// Error when any coordinate value is NaN
    #[error("NaN value encountered")]
    NaN,
    /// Error when any coordinate value is infinite
    #[error("Coordinates cannot be infinite")]
    Infinity,
}
