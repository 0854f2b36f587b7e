use super::{PolyLine, Span, lerp, position};
use crate::models::Point;

/// A maximal region over which two curves touch
///
/// Where the curves cross transversally the region is a single point and
/// `start == end`. Where they coincide over an interval of `x` (for example a
/// flat section shared by aggregate supply and demand), `start` and `end` are
/// the two ends of that interval and the clearing price is not unique.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Crossing {
    /// The point at which the curves start touching, walking left to right
    pub start: Point,
    /// The point at which the curves stop touching
    pub end: Point,
}

impl Crossing {
    fn at(point: Point) -> Self {
        Self {
            start: point,
            end: point,
        }
    }

    /// Whether the region is a single point
    pub fn is_unique(&self) -> bool {
        self.start == self.end
    }
}

impl PolyLine {
    /// Computes the crossing points of two curves.
    ///
    /// Every crossing region (see [`PolyLine::crossings`]) contributes its
    /// boundary points, start first. Consequently a single transversal
    /// crossing is reported as two equal points, and two curves coinciding on
    /// an interval are reported as the two ends of that interval. Callers that
    /// need exactly one clearing point must inspect the regions themselves.
    ///
    /// Points are returned in ascending `x`. Curves whose domains do not
    /// overlap, or that never meet, produce an empty result.
    pub fn intersection(a: &PolyLine, b: &PolyLine) -> Vec<Point> {
        Self::crossings(a, b)
            .into_iter()
            .flat_map(|crossing| [crossing.start, crossing.end])
            .collect()
    }

    /// Computes the regions where two curves touch, in ascending `x`.
    ///
    /// The overlapping domain is cut at every vertex of either curve, so that
    /// between two consecutive cuts both curves are straight segments. The
    /// curves touch at a cut when their values there agree (vertical steps
    /// contribute a range of values), and they cross inside an interval when
    /// their difference changes sign strictly; the crossing is then solved in
    /// closed form. Touching cuts joined by an interval on which the curves
    /// coincide merge into one region.
    ///
    /// All comparisons are exact; no tolerance is applied.
    pub fn crossings(a: &PolyLine, b: &PolyLine) -> Vec<Crossing> {
        let (Some(a_min), Some(a_max), Some(b_min), Some(b_max)) =
            (a.min_x(), a.max_x(), b.min_x(), b.max_x())
        else {
            return Vec::new();
        };

        let lo = a_min.max(b_min);
        let hi = a_max.min(b_max);
        if lo > hi {
            return Vec::new();
        }

        // lo and hi are themselves vertices, so they are always cuts
        let mut xs: Vec<f64> = a
            .0
            .iter()
            .chain(b.0.iter())
            .map(Point::x)
            .filter(|x| lo <= *x && *x <= hi)
            .collect();
        xs.sort_by(f64::total_cmp);
        xs.dedup();

        let cuts: Vec<(f64, Span, Span)> = xs
            .into_iter()
            .filter_map(|x| Some((x, a.span_at(x)?, b.span_at(x)?)))
            .collect();

        let mut found = Vec::new();
        let mut open: Option<Crossing> = None;

        for (i, &(x0, sa0, sb0)) in cuts.iter().enumerate() {
            match touch(x0, &sa0, &sb0) {
                Some(t) => match open.as_mut() {
                    Some(region) => region.end = t.end,
                    None => open = Some(t),
                },
                None => found.extend(open.take()),
            }

            let Some(&(x1, sa1, sb1)) = cuts.get(i + 1) else {
                break;
            };

            let d0 = sa0.right - sb0.right;
            let d1 = sa1.left - sb1.left;

            if d0 == 0.0 && d1 == 0.0 {
                // coincident over the interval, so the region carries on
                continue;
            }

            found.extend(open.take());

            if (d0 < 0.0 && d1 > 0.0) || (d0 > 0.0 && d1 < 0.0) {
                // the differences only overflow for values near f64::MAX,
                // where halving them is exact
                let t = if d0.is_finite() && d1.is_finite() {
                    position(0.0, d0, d1)
                } else {
                    position(
                        0.0,
                        sa0.right * 0.5 - sb0.right * 0.5,
                        sa1.left * 0.5 - sb1.left * 0.5,
                    )
                };
                let x = lerp(x0, x1, t);
                let y = lerp(sa0.right, sa1.left, t);
                // interpolation stays within the finite inputs
                found.push(Crossing::at(unsafe { Point::new_unchecked(x, y) }));
            }
        }

        found.extend(open.take());
        found
    }
}

/// Where the value ranges of two curves at `x` overlap, this returns the
/// shared part as a region.
///
/// Spans hold values of finite points, or interpolations between them.
fn touch(x: f64, a: &Span, b: &Span) -> Option<Crossing> {
    let lo = a.lo.max(b.lo);
    let hi = a.hi.min(b.hi);

    if lo > hi {
        None
    } else if lo == hi {
        Some(Crossing::at(unsafe { Point::new_unchecked(x, lo) }))
    } else {
        let (first, last) = if a.left > a.right { (hi, lo) } else { (lo, hi) };
        Some(Crossing {
            start: unsafe { Point::new_unchecked(x, first) },
            end: unsafe { Point::new_unchecked(x, last) },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    fn curve(pairs: &[(f64, f64)]) -> PolyLine {
        PolyLine::from_pairs(pairs.iter().copied()).unwrap()
    }

    fn pt(x: f64, y: f64) -> Point {
        Point::new(x, y).unwrap()
    }

    #[fixture]
    fn demand() -> PolyLine {
        let mut curve = PolyLine::new();
        curve.add(pt(0.0, 1000.0));
        curve.add(pt(1000.0, 0.0));
        curve
    }

    #[fixture]
    fn supply() -> PolyLine {
        let mut curve = PolyLine::new();
        curve.add(pt(0.0, 0.0));
        curve.add(pt(1000.0, 1000.0));
        curve
    }

    #[rstest]
    fn test_intersection_not_empty(demand: PolyLine, supply: PolyLine) {
        assert!(!PolyLine::intersection(&demand, &supply).is_empty());
    }

    #[rstest]
    fn test_intersection_yields_two(demand: PolyLine, supply: PolyLine) {
        let points = PolyLine::intersection(&demand, &supply);
        assert_eq!(points.len(), 2);
        assert_eq!(points[0], pt(500.0, 500.0));
        assert_eq!(points[1], pt(500.0, 500.0));

        let crossings = PolyLine::crossings(&demand, &supply);
        assert_eq!(crossings.len(), 1);
        assert!(crossings[0].is_unique());
    }

    #[rstest]
    fn test_identical_curves_yield_overlap_ends(demand: PolyLine) {
        let same = demand.clone();
        let points = PolyLine::intersection(&demand, &same);
        assert_eq!(points.len(), 2);
        assert_eq!(points[0], pt(0.0, 1000.0));
        assert_eq!(points[1], pt(1000.0, 0.0));
        assert!(!PolyLine::crossings(&demand, &same)[0].is_unique());
    }

    #[rstest]
    fn test_intersection_is_symmetric(demand: PolyLine, supply: PolyLine) {
        assert_eq!(
            PolyLine::intersection(&demand, &supply),
            PolyLine::intersection(&supply, &demand)
        );
    }

    #[test]
    fn test_empty_curves() {
        let a = curve(&[(0.0, 0.0), (1.0, 1.0)]);
        assert!(PolyLine::intersection(&a, &PolyLine::new()).is_empty());
        assert!(PolyLine::intersection(&PolyLine::new(), &a).is_empty());
    }

    #[test]
    fn test_disjoint_domains() {
        let a = curve(&[(0.0, 0.0), (1.0, 1.0)]);
        let b = curve(&[(2.0, 1.0), (3.0, 0.0)]);
        assert!(PolyLine::intersection(&a, &b).is_empty());
    }

    #[test]
    fn test_parallel_never_meet() {
        let a = curve(&[(0.0, 0.0), (10.0, 10.0)]);
        let b = curve(&[(0.0, 1.0), (10.0, 11.0)]);
        assert!(PolyLine::intersection(&a, &b).is_empty());
    }

    #[test]
    fn test_crossing_at_shared_vertex_reported_once() {
        let a = curve(&[(0.0, 0.0), (5.0, 5.0), (10.0, 0.0)]);
        let b = curve(&[(0.0, 5.0), (10.0, 5.0)]);
        let crossings = PolyLine::crossings(&a, &b);
        assert_eq!(crossings, vec![Crossing::at(pt(5.0, 5.0))]);
    }

    #[test]
    fn test_touching_domain_boundary() {
        let a = curve(&[(0.0, 0.0), (5.0, 5.0)]);
        let b = curve(&[(5.0, 5.0), (10.0, 0.0)]);
        assert_eq!(
            PolyLine::intersection(&a, &b),
            vec![pt(5.0, 5.0), pt(5.0, 5.0)]
        );
    }

    #[test]
    fn test_flat_overlap_is_one_region() {
        let demand = curve(&[(0.0, 20.0), (10.0, 10.0), (20.0, 10.0), (30.0, 0.0)]);
        let supply = curve(&[(0.0, 0.0), (10.0, 10.0), (20.0, 10.0), (30.0, 20.0)]);
        let crossings = PolyLine::crossings(&demand, &supply);
        assert_eq!(
            crossings,
            vec![Crossing {
                start: pt(10.0, 10.0),
                end: pt(20.0, 10.0),
            }]
        );
    }

    #[test]
    fn test_multiple_crossings_in_order() {
        let zigzag = curve(&[(0.0, 0.0), (2.0, 4.0), (4.0, 0.0), (6.0, 4.0)]);
        let level = curve(&[(0.0, 2.0), (6.0, 2.0)]);
        let xs: Vec<f64> = PolyLine::crossings(&zigzag, &level)
            .iter()
            .map(|c| c.start.x())
            .collect();
        assert_eq!(xs, vec![1.0, 3.0, 5.0]);
    }

    #[test]
    fn test_intersection_reports_each_crossing_twice() {
        let zigzag = curve(&[(0.0, 0.0), (2.0, 4.0), (4.0, 0.0), (6.0, 4.0)]);
        let level = curve(&[(0.0, 2.0), (6.0, 2.0)]);
        assert_eq!(
            PolyLine::intersection(&zigzag, &level),
            vec![
                pt(1.0, 2.0),
                pt(1.0, 2.0),
                pt(3.0, 2.0),
                pt(3.0, 2.0),
                pt(5.0, 2.0),
                pt(5.0, 2.0),
            ]
        );
    }

    #[test]
    fn test_crossing_near_extreme_values() {
        let rising = curve(&[(0.0, -f64::MAX), (1.0, f64::MAX)]);
        let falling = curve(&[(0.0, f64::MAX), (1.0, -f64::MAX)]);
        assert_eq!(
            PolyLine::crossings(&rising, &falling),
            vec![Crossing::at(pt(0.5, 0.0))]
        );
    }

    #[test]
    fn test_crossing_through_vertical_step() {
        let step = curve(&[(0.0, 10.0), (5.0, 10.0), (5.0, 0.0), (10.0, 0.0)]);
        let supply = curve(&[(0.0, 2.0), (10.0, 6.0)]);
        assert_eq!(
            PolyLine::crossings(&step, &supply),
            vec![Crossing::at(pt(5.0, 4.0))]
        );
    }

    #[test]
    fn test_single_point_curve_on_line() {
        let a = curve(&[(0.0, 0.0), (10.0, 10.0)]);
        let b = curve(&[(4.0, 4.0)]);
        assert_eq!(PolyLine::intersection(&a, &b), vec![pt(4.0, 4.0), pt(4.0, 4.0)]);

        let c = curve(&[(4.0, 5.0)]);
        assert!(PolyLine::intersection(&a, &c).is_empty());
    }
}
