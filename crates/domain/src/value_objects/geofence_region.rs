//! Rectangular geographic operating region

use serde::{Deserialize, Serialize};

use super::GeoPoint;
use crate::errors::DomainError;

/// An axis-aligned rectangle bounded by its southwest and northeast corners
///
/// Containment is inclusive on all four edges. The region never wraps the
/// antimeridian; `southwest` must not lie north or east of `northeast`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeofenceRegion {
    southwest: GeoPoint,
    northeast: GeoPoint,
}

impl GeofenceRegion {
    /// Create a region from its corners
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidRegion` if the southwest corner lies north
    /// or east of the northeast corner.
    pub fn new(southwest: GeoPoint, northeast: GeoPoint) -> Result<Self, DomainError> {
        if southwest.latitude() > northeast.latitude()
            || southwest.longitude() > northeast.longitude()
        {
            return Err(DomainError::InvalidRegion(format!(
                "southwest ({southwest}) must not be north or east of northeast ({northeast})"
            )));
        }
        Ok(Self {
            southwest,
            northeast,
        })
    }

    /// The operating area of the Huauchinango deployment
    #[must_use]
    pub const fn huauchinango() -> Self {
        Self {
            southwest: GeoPoint::new_unchecked(20.1, -98.1),
            northeast: GeoPoint::new_unchecked(20.25, -97.95),
        }
    }

    /// Smallest region covering every point, or `None` for an empty input
    #[must_use]
    pub fn bounding<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a GeoPoint>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        Some(Self::covering(first, iter))
    }

    /// Smallest region covering `first` and every point in `rest`
    #[must_use]
    pub fn covering<'a, I>(first: &GeoPoint, rest: I) -> Self
    where
        I: IntoIterator<Item = &'a GeoPoint>,
    {
        let (mut south, mut west) = (first.latitude(), first.longitude());
        let (mut north, mut east) = (south, west);

        for point in rest {
            south = south.min(point.latitude());
            north = north.max(point.latitude());
            west = west.min(point.longitude());
            east = east.max(point.longitude());
        }

        Self {
            southwest: GeoPoint::new_unchecked(south, west),
            northeast: GeoPoint::new_unchecked(north, east),
        }
    }

    /// Southwest corner
    #[must_use]
    pub const fn southwest(&self) -> GeoPoint {
        self.southwest
    }

    /// Northeast corner
    #[must_use]
    pub const fn northeast(&self) -> GeoPoint {
        self.northeast
    }

    /// Whether `point` lies inside the region, edges included
    #[must_use]
    pub fn contains(&self, point: &GeoPoint) -> bool {
        (self.southwest.latitude()..=self.northeast.latitude()).contains(&point.latitude())
            && (self.southwest.longitude()..=self.northeast.longitude())
                .contains(&point.longitude())
    }

    /// Midpoint of the region
    #[must_use]
    pub fn center(&self) -> GeoPoint {
        GeoPoint::new_unchecked(
            f64::midpoint(self.southwest.latitude(), self.northeast.latitude()),
            f64::midpoint(self.southwest.longitude(), self.northeast.longitude()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(lat: f64, lng: f64) -> GeoPoint {
        GeoPoint::new(lat, lng).expect("valid point")
    }

    #[test]
    fn contains_is_inclusive_at_corners() {
        let region = GeofenceRegion::huauchinango();
        assert!(region.contains(&point(20.1, -98.1)));
        assert!(region.contains(&point(20.25, -97.95)));
        assert!(region.contains(&point(20.1, -97.95)));
        assert!(region.contains(&point(20.25, -98.1)));
    }

    #[test]
    fn contains_rejects_outside_points() {
        let region = GeofenceRegion::huauchinango();
        assert!(!region.contains(&point(20.0, -98.1)));
        assert!(!region.contains(&point(20.3, -98.0)));
        assert!(!region.contains(&point(20.17, -98.2)));
        assert!(!region.contains(&point(20.17, -97.9)));
    }

    #[test]
    fn contains_interior_point() {
        let region = GeofenceRegion::huauchinango();
        assert!(region.contains(&point(20.17, -98.05)));
    }

    #[test]
    fn new_rejects_inverted_corners() {
        let result = GeofenceRegion::new(point(20.25, -98.1), point(20.1, -97.95));
        assert!(matches!(result, Err(DomainError::InvalidRegion(_))));

        let result = GeofenceRegion::new(point(20.1, -97.95), point(20.25, -98.1));
        assert!(result.is_err());
    }

    #[test]
    fn new_accepts_degenerate_region() {
        let p = point(20.17, -98.05);
        let region = GeofenceRegion::new(p, p).expect("single point region");
        assert!(region.contains(&p));
    }

    #[test]
    fn center_is_midpoint() {
        let center = GeofenceRegion::huauchinango().center();
        assert!(center.approx_eq(&point(20.175, -98.025), 1e-9));
    }

    #[test]
    fn bounding_covers_all_points() {
        let points = [point(20.2, -98.0), point(20.15, -98.07), point(20.18, -97.99)];
        let bounds = GeofenceRegion::bounding(&points).expect("non-empty");
        assert!(bounds.southwest().approx_eq(&point(20.15, -98.07), 1e-9));
        assert!(bounds.northeast().approx_eq(&point(20.2, -97.99), 1e-9));
        assert!(points.iter().all(|p| bounds.contains(p)));
    }

    #[test]
    fn bounding_empty_is_none() {
        assert!(GeofenceRegion::bounding(&[] as &[GeoPoint]).is_none());
    }
}
