//! Per-role coordinate store that suppresses immaterial updates.

use crate::{Coordinate, EndpointRole};

/// Outcome of offering a coordinate to the [`CoordinateCache`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateChange {
    /// Equivalent to the stored coordinate; nothing was written.
    Unchanged,
    /// Stored as the role's new coordinate.
    Changed,
}

impl CoordinateChange {
    /// Whether downstream work such as routing should run.
    #[must_use]
    pub const fn is_changed(self) -> bool {
        matches!(self, Self::Changed)
    }
}

/// Last resolved coordinate for each endpoint role.
///
/// Geocoding the same address twice can yield coordinates that differ in
/// the fifth decimal place. Offering such a coordinate reports
/// [`CoordinateChange::Unchanged`], which is what keeps repeated resolutions
/// from re-triggering the router.
///
/// # Examples
///
/// ```
/// use cargoroute_core::{Coordinate, CoordinateCache, CoordinateChange, EndpointRole};
///
/// let mut cache = CoordinateCache::default();
/// let first = cache.observe(EndpointRole::Pickup, Coordinate::new(40.7484, -73.9857));
/// let again = cache.observe(EndpointRole::Pickup, Coordinate::new(40.74843, -73.98568));
/// assert_eq!(first, CoordinateChange::Changed);
/// assert_eq!(again, CoordinateChange::Unchanged);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CoordinateCache {
    pickup: Option<Coordinate>,
    dropoff: Option<Coordinate>,
}

impl CoordinateCache {
    /// Stored coordinate for `role`.
    #[must_use]
    pub const fn get(&self, role: EndpointRole) -> Option<Coordinate> {
        match role {
            EndpointRole::Pickup => self.pickup,
            EndpointRole::Dropoff => self.dropoff,
        }
    }

    /// Both coordinates, when both roles are resolved.
    #[must_use]
    pub const fn pair(&self) -> Option<(Coordinate, Coordinate)> {
        match (self.pickup, self.dropoff) {
            (Some(pickup), Some(dropoff)) => Some((pickup, dropoff)),
            _ => None,
        }
    }

    /// Offer `candidate` for `role`, storing it unless it is equivalent to
    /// the coordinate already held.
    pub fn observe(&mut self, role: EndpointRole, candidate: Coordinate) -> CoordinateChange {
        let slot = self.slot_mut(role);
        if slot.is_some_and(|stored| stored.is_equivalent(&candidate)) {
            return CoordinateChange::Unchanged;
        }
        *slot = Some(candidate);
        CoordinateChange::Changed
    }

    /// Drop the coordinate for `role`, returning what was stored.
    pub fn forget(&mut self, role: EndpointRole) -> Option<Coordinate> {
        self.slot_mut(role).take()
    }

    fn slot_mut(&mut self, role: EndpointRole) -> &mut Option<Coordinate> {
        match role {
            EndpointRole::Pickup => &mut self.pickup,
            EndpointRole::Dropoff => &mut self.dropoff,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const BASE: Coordinate = Coordinate::new(40.7484, -73.9857);

    #[rstest]
    #[case(Coordinate::new(40.74845, -73.98565), CoordinateChange::Unchanged)]
    #[case(Coordinate::new(40.7486, -73.9857), CoordinateChange::Changed)]
    #[case(Coordinate::new(40.7484, -73.9855), CoordinateChange::Changed)]
    fn second_observation_respects_tolerance(
        #[case] candidate: Coordinate,
        #[case] expected: CoordinateChange,
    ) {
        let mut cache = CoordinateCache::default();
        assert_eq!(cache.observe(EndpointRole::Pickup, BASE), CoordinateChange::Changed);
        assert_eq!(cache.observe(EndpointRole::Pickup, candidate), expected);
    }

    #[rstest]
    fn unchanged_keeps_the_original_coordinate() {
        let mut cache = CoordinateCache::default();
        cache.observe(EndpointRole::Dropoff, BASE);
        cache.observe(EndpointRole::Dropoff, Coordinate::new(40.74849, -73.98579));
        assert_eq!(cache.get(EndpointRole::Dropoff), Some(BASE));
    }

    #[rstest]
    fn roles_are_independent() {
        let mut cache = CoordinateCache::default();
        cache.observe(EndpointRole::Pickup, BASE);
        assert_eq!(cache.observe(EndpointRole::Dropoff, BASE), CoordinateChange::Changed);
        assert_eq!(cache.pair(), Some((BASE, BASE)));

        assert_eq!(cache.forget(EndpointRole::Pickup), Some(BASE));
        assert_eq!(cache.pair(), None);
        assert_eq!(cache.observe(EndpointRole::Pickup, BASE), CoordinateChange::Changed);
    }
}
