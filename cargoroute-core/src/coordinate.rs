//! Geographic coordinates, equivalence and great-circle distance.

use geo::{Distance, Haversine, Point};

/// Largest per-axis delta, in degrees, at which two coordinates still count as
/// the same place (roughly 11 metres).
pub const COORDINATE_TOLERANCE: f64 = 1.0e-4;

/// Metres in one statute mile.
pub const METRES_PER_MILE: f64 = 1_609.344;

/// A WGS84 position.
///
/// # Examples
///
/// ```
/// use cargoroute_core::Coordinate;
///
/// let a = Coordinate::new(40.7580, -73.9855);
/// let b = Coordinate::new(40.75805, -73.98555);
/// assert!(a.is_equivalent(&b));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
}

impl Coordinate {
    /// Build a coordinate from latitude and longitude.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Whether both values are finite and inside the WGS84 ranges.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }

    /// Whether `other` lies within [`COORDINATE_TOLERANCE`] on both axes.
    ///
    /// Providers round differently, so cache hits compare with this rather
    /// than `==`.
    #[must_use]
    pub fn is_equivalent(&self, other: &Self) -> bool {
        (self.latitude - other.latitude).abs() < COORDINATE_TOLERANCE
            && (self.longitude - other.longitude).abs() < COORDINATE_TOLERANCE
    }

    /// Great-circle distance to `other` in metres.
    #[must_use]
    pub fn haversine_metres(&self, other: &Self) -> f64 {
        Haversine.distance(Point::from(*self), Point::from(*other))
    }

    /// Great-circle distance to `other` in statute miles.
    #[must_use]
    pub fn haversine_miles(&self, other: &Self) -> f64 {
        self.haversine_metres(other) / METRES_PER_MILE
    }

    /// Midpoint on the plate carrée, good enough for centring a map view.
    #[must_use]
    pub fn midpoint(&self, other: &Self) -> Self {
        Self::new(
            (self.latitude + other.latitude) / 2.0,
            (self.longitude + other.longitude) / 2.0,
        )
    }
}

impl From<Coordinate> for Point<f64> {
    fn from(value: Coordinate) -> Self {
        Self::new(value.longitude, value.latitude)
    }
}

impl From<Point<f64>> for Coordinate {
    fn from(value: Point<f64>) -> Self {
        Self::new(value.y(), value.x())
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const EMPIRE_STATE: Coordinate = Coordinate::new(40.7484, -73.9857);
    const ROCKEFELLER_PLAZA: Coordinate = Coordinate::new(40.7587, -73.9787);

    #[rstest]
    #[case(Coordinate::new(40.75805, -73.98555), true)]
    #[case(Coordinate::new(40.75809, -73.98541), true)]
    #[case(Coordinate::new(40.7582, -73.9855), false)]
    #[case(Coordinate::new(40.7580, -73.9857), false)]
    fn equivalence_uses_axis_tolerance(#[case] candidate: Coordinate, #[case] expected: bool) {
        let base = Coordinate::new(40.7580, -73.9855);
        assert_eq!(base.is_equivalent(&candidate), expected);
        assert_eq!(candidate.is_equivalent(&base), expected);
    }

    #[rstest]
    fn haversine_matches_known_midtown_distance() {
        let metres = EMPIRE_STATE.haversine_metres(&ROCKEFELLER_PLAZA);
        assert!(
            (1_250.0..1_350.0).contains(&metres),
            "unexpected distance {metres}"
        );
    }

    #[rstest]
    fn haversine_is_zero_for_identical_points() {
        assert!(EMPIRE_STATE.haversine_miles(&EMPIRE_STATE).abs() < f64::EPSILON);
    }

    #[rstest]
    fn point_conversion_swaps_axes() {
        let point = Point::from(EMPIRE_STATE);
        assert_eq!(point.x(), EMPIRE_STATE.longitude);
        assert_eq!(point.y(), EMPIRE_STATE.latitude);
        assert_eq!(Coordinate::from(point), EMPIRE_STATE);
    }

    #[rstest]
    #[case(Coordinate::new(91.0, 0.0))]
    #[case(Coordinate::new(0.0, -180.5))]
    #[case(Coordinate::new(f64::NAN, 0.0))]
    fn rejects_out_of_range_positions(#[case] coordinate: Coordinate) {
        assert!(!coordinate.is_valid());
    }

    #[rstest]
    fn displays_four_decimal_places() {
        let coordinate = Coordinate::new(40.758_012, -73.985_549);
        assert_eq!(coordinate.to_string(), "40.7580, -73.9855");
    }
}
