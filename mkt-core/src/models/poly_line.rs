mod intersection;
pub use intersection::Crossing;

use super::{Point, PointError};

/// A piecewise-linear curve, stored as its vertices sorted by `x`
///
/// A curve represents either one participant's full bid (demand) or offer
/// (supply) for a market round, or, after aggregation, the sum of all
/// participants' curves on one side of the market.
///
/// The points are kept in ascending `x` order at all times. Several points
/// may share the same `x`, which describes a vertical step; such points stay
/// in the order they were inserted.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "Vec<Point>", into = "Vec<Point>")
)]
pub struct PolyLine(Vec<Point>);

/// The value range of a curve at a single `x`.
///
/// Away from vertical steps all four values are equal. At a step, `left` is
/// the value of the first point at `x` (continuing the segment from the
/// left), `right` the value of the last one, and `lo`/`hi` bound every point
/// at `x`.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Span {
    pub left: f64,
    pub right: f64,
    pub lo: f64,
    pub hi: f64,
}

impl Span {
    fn flat(y: f64) -> Self {
        Self {
            left: y,
            right: y,
            lo: y,
            hi: y,
        }
    }
}

impl PolyLine {
    /// Creates an empty curve
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Inserts a point, keeping the curve sorted by `x`.
    ///
    /// A point whose `x` equals that of existing points is placed after them.
    pub fn add(&mut self, point: Point) {
        let index = self.0.partition_point(|p| p.x() <= point.x());
        self.0.insert(index, point);
    }

    /// The vertices of the curve, in ascending `x` order
    pub fn points(&self) -> &[Point] {
        &self.0
    }

    /// The number of vertices
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the curve has no vertices
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consumes the curve, returning its vertices
    pub fn into_points(self) -> Vec<Point> {
        self.0
    }

    /// The smallest `x`, or None for an empty curve
    pub fn min_x(&self) -> Option<f64> {
        self.0.first().map(Point::x)
    }

    /// The largest `x`, or None for an empty curve
    pub fn max_x(&self) -> Option<f64> {
        self.0.last().map(Point::x)
    }

    /// The smallest `y`, or None for an empty curve
    pub fn min_y(&self) -> Option<f64> {
        self.0.iter().map(Point::y).reduce(f64::min)
    }

    /// The largest `y`, or None for an empty curve
    pub fn max_y(&self) -> Option<f64> {
        self.0.iter().map(Point::y).reduce(f64::max)
    }

    /// Evaluates the curve at `x` by linear interpolation.
    ///
    /// Returns None outside the curve's domain. At a vertical step the value of
    /// the first point inserted at `x` is returned.
    pub fn y_at(&self, x: f64) -> Option<f64> {
        self.span_at(x).map(|span| span.left)
    }

    pub(crate) fn span_at(&self, x: f64) -> Option<Span> {
        let pts = &self.0;
        let i = pts.partition_point(|p| p.x() < x);
        let j = pts.partition_point(|p| p.x() <= x);

        if i < j {
            let at = &pts[i..j];
            let (lo, hi) = at
                .iter()
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
                    (lo.min(p.y()), hi.max(p.y()))
                });
            Some(Span {
                left: at[0].y(),
                right: at[at.len() - 1].y(),
                lo,
                hi,
            })
        } else if i == 0 || i == pts.len() {
            None
        } else {
            let (a, b) = (&pts[i - 1], &pts[i]);
            let t = position(x, a.x(), b.x());
            Some(Span::flat(lerp(a.y(), b.y(), t)))
        }
    }

    /// The limits of the curve at `x` from the left and from the right, and
    /// its value at `x` itself.
    ///
    /// A curve has no left limit at its first `x` and no right limit at its
    /// last, so combining it with a wider curve leaves a step at its edges.
    fn limits_at(&self, x: f64) -> (Option<f64>, Option<f64>, Option<f64>) {
        let Some(span) = self.span_at(x) else {
            return (None, None, None);
        };
        let left = (self.min_x() != Some(x)).then_some(span.left);
        let right = (self.max_x() != Some(x)).then_some(span.right);
        (left, Some(span.left), right)
    }

    /// Serializes the curve into its wire form, an ordered list of `(x, y)` pairs
    pub fn to_pairs(&self) -> Vec<(f64, f64)> {
        self.0.iter().copied().map(<(f64, f64)>::from).collect()
    }

    /// Rebuilds a curve from `(x, y)` pairs, validating every point
    pub fn from_pairs(pairs: impl IntoIterator<Item = (f64, f64)>) -> Result<Self, PointError> {
        pairs.into_iter().map(Point::try_from).collect()
    }

    /// Numeric minimum, where an absent operand is the identity
    pub fn min(a: Option<f64>, b: Option<f64>) -> Option<f64> {
        match (a, b) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, None) => a,
            (None, b) => b,
        }
    }

    /// Numeric maximum, where an absent operand is the identity
    pub fn max(a: Option<f64>, b: Option<f64>) -> Option<f64> {
        match (a, b) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (a, None) => a,
            (None, b) => b,
        }
    }

    /// Numeric sum, where an absent operand counts as zero
    pub fn sum(a: Option<f64>, b: Option<f64>) -> Option<f64> {
        match (a, b) {
            (Some(a), Some(b)) => Some(a + b),
            (a, None) => a,
            (None, b) => b,
        }
    }

    /// Combines two curves point-wise with one of [`PolyLine::min`],
    /// [`PolyLine::max`], [`PolyLine::sum`] (or any operator of the same shape).
    ///
    /// The result is sampled at every `x` of either input and wherever the
    /// two curves cross, so that it is exact for piecewise-linear operators
    /// such as `min` and `max`. A curve evaluated outside its own domain
    /// yields None, so `op` decides what a missing operand means. At each
    /// sample the limits from the left, the values at `x` and the limits from
    /// the right are combined in turn, which preserves vertical steps in
    /// either input and introduces one where a curve's domain begins or ends.
    ///
    /// # Errors
    ///
    /// Fails with [`PointError::Infinity`] if combining finite values
    /// overflows, and with [`PointError::NaN`] if `op` produces NaN.
    pub fn combine(
        a: &PolyLine,
        b: &PolyLine,
        op: impl Fn(Option<f64>, Option<f64>) -> Option<f64>,
    ) -> Result<PolyLine, PointError> {
        let mut xs: Vec<f64> = a.0.iter().chain(b.0.iter()).map(Point::x).collect();
        xs.extend(
            Self::crossings(a, b)
                .iter()
                .flat_map(|crossing| [crossing.start.x(), crossing.end.x()]),
        );
        xs.sort_by(f64::total_cmp);
        xs.dedup();

        let mut points: Vec<Point> = Vec::with_capacity(xs.len());
        for x in xs {
            let (a_left, a_at, a_right) = a.limits_at(x);
            let (b_left, b_at, b_right) = b.limits_at(x);

            for y in [op(a_left, b_left), op(a_at, b_at), op(a_right, b_right)]
                .into_iter()
                .flatten()
            {
                let point = Point::new(x, y)?;
                if points.last() != Some(&point) {
                    points.push(point);
                }
            }
        }

        Ok(Self(points))
    }

    /// Sums any number of curves into one aggregate curve.
    ///
    /// This is how all the offers on one side of a market are merged before
    /// supply is intersected with demand. Where only some of the curves are
    /// defined, the sum runs over those that are.
    ///
    /// # Errors
    ///
    /// Fails with [`PointError::Infinity`] if the sum overflows.
    pub fn aggregate<'a>(
        curves: impl IntoIterator<Item = &'a PolyLine>,
    ) -> Result<PolyLine, PointError> {
        curves.into_iter().try_fold(PolyLine::new(), |total, curve| {
            PolyLine::combine(&total, curve, PolyLine::sum)
        })
    }
}

/// The position of `x` between `x0` and `x1`, as a fraction in `[0, 1]`.
///
/// Falls back to halved operands when the width of the interval overflows.
pub(crate) fn position(x: f64, x0: f64, x1: f64) -> f64 {
    let width = x1 - x0;
    let t = if width.is_finite() {
        (x - x0) / width
    } else {
        (x * 0.5 - x0 * 0.5) / (x1 * 0.5 - x0 * 0.5)
    };
    t.clamp(0.0, 1.0)
}

/// Interpolates between `y0` and `y1`, never leaving the range they span
pub(crate) fn lerp(y0: f64, y1: f64, t: f64) -> f64 {
    (y0 * (1.0 - t) + y1 * t).clamp(y0.min(y1), y0.max(y1))
}

impl From<Vec<Point>> for PolyLine {
    fn from(value: Vec<Point>) -> Self {
        value.into_iter().collect()
    }
}

impl From<PolyLine> for Vec<Point> {
    fn from(value: PolyLine) -> Self {
        value.0
    }
}

impl FromIterator<Point> for PolyLine {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        let mut curve = Self::new();
        curve.extend(iter);
        curve
    }
}

impl Extend<Point> for PolyLine {
    fn extend<I: IntoIterator<Item = Point>>(&mut self, iter: I) {
        for point in iter {
            self.add(point);
        }
    }
}

impl std::fmt::Display for PolyLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[")?;
        for (i, point) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{point}")?;
        }
        f.write_str("]")
    }
}
