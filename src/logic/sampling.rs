use crate::models::{Coordinate, FarmBoundary};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Candidate draws allowed per requested point before giving up.
pub const ATTEMPTS_PER_POINT: usize = 10;

/// Draws up to `count` points uniformly inside the boundary using
/// unseeded randomness.
pub fn generate_sample_points(boundary: &FarmBoundary, count: usize) -> Vec<Coordinate> {
    generate_sample_points_seeded(boundary, count, None)
}

/// Like [`generate_sample_points`], reproducible when a seed is given.
pub fn generate_sample_points_seeded(
    boundary: &FarmBoundary,
    count: usize,
    seed: Option<u64>,
) -> Vec<Coordinate> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    generate_sample_points_with(boundary, count, &mut rng)
}

/// Rejection sampling over the boundary's bounding box.
///
/// Stops after `count` accepted points or `count * ATTEMPTS_PER_POINT`
/// draws, whichever comes first. A short (or empty) result means the
/// boundary is too small or degenerate for the requested density; it is
/// not an error.
pub fn generate_sample_points_with<R: Rng>(
    boundary: &FarmBoundary,
    count: usize,
    rng: &mut R,
) -> Vec<Coordinate> {
    if count == 0 {
        return Vec::new();
    }

    let Some(bbox) = boundary.bounding_box().filter(|b| b.is_finite()) else {
        tracing::warn!("Farm boundary has no usable extent - no sample points generated");
        return Vec::new();
    };

    let budget = count.saturating_mul(ATTEMPTS_PER_POINT);
    let mut points = Vec::with_capacity(count);
    let mut attempts = 0;

    while points.len() < count && attempts < budget {
        attempts += 1;
        let candidate = Coordinate::new(
            rng.gen_range(bbox.min_lat..=bbox.max_lat),
            rng.gen_range(bbox.min_lon..=bbox.max_lon),
        );
        if boundary.contains(candidate) {
            points.push(candidate);
        }
    }

    if points.len() < count {
        tracing::warn!(
            "Generated {} of {} sample points after {} attempts",
            points.len(),
            count,
            attempts
        );
    } else {
        tracing::debug!("Generated {} sample points in {} attempts", count, attempts);
    }

    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{polygon, LineString, MultiPolygon, Polygon};

    fn field() -> FarmBoundary {
        FarmBoundary::from_polygon(polygon![
            (x: -3.75, y: 40.40),
            (x: -3.70, y: 40.40),
            (x: -3.70, y: 40.45),
            (x: -3.75, y: 40.45),
            (x: -3.75, y: 40.40),
        ])
    }

    /// Square field with a square pond cut out of the middle.
    fn field_with_pond() -> FarmBoundary {
        FarmBoundary::from_polygon(polygon!(
            exterior: [
                (x: 0.0, y: 0.0),
                (x: 1.0, y: 0.0),
                (x: 1.0, y: 1.0),
                (x: 0.0, y: 1.0),
                (x: 0.0, y: 0.0),
            ],
            interiors: [
                [
                    (x: 0.25, y: 0.25),
                    (x: 0.75, y: 0.25),
                    (x: 0.75, y: 0.75),
                    (x: 0.25, y: 0.75),
                    (x: 0.25, y: 0.25),
                ],
            ],
        ))
    }

    fn triangle() -> FarmBoundary {
        FarmBoundary::from_polygon(polygon![
            (x: 0.0, y: 0.0),
            (x: 1.0, y: 0.0),
            (x: 0.0, y: 1.0),
            (x: 0.0, y: 0.0),
        ])
    }

    #[test]
    fn all_points_fall_inside_boundary() {
        for (boundary, seed) in [(field(), 1), (field_with_pond(), 2), (triangle(), 3)] {
            let points = generate_sample_points_seeded(&boundary, 50, Some(seed));
            assert!(!points.is_empty());
            for point in &points {
                assert!(boundary.contains(*point), "{} escaped boundary", point);
            }
        }
    }

    #[test]
    fn rectangular_field_gets_full_count() {
        let points = generate_sample_points(&field(), 12);
        assert_eq!(points.len(), 12);
    }

    #[test]
    fn never_exceeds_requested_count() {
        for count in [1, 3, 12, 40] {
            let points = generate_sample_points_seeded(&triangle(), count, Some(7));
            assert!(points.len() <= count);
        }
    }

    #[test]
    fn holes_are_excluded() {
        let points = generate_sample_points_seeded(&field_with_pond(), 100, Some(42));
        for point in points {
            let in_pond = (0.25..=0.75).contains(&point.lat) && (0.25..=0.75).contains(&point.lon);
            assert!(!in_pond, "{} is in the pond", point);
        }
    }

    #[test]
    fn multi_part_farm_samples_every_part() {
        let west = polygon![
            (x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 1.0, y: 1.0), (x: 0.0, y: 1.0), (x: 0.0, y: 0.0),
        ];
        let east = polygon![
            (x: 2.0, y: 0.0), (x: 3.0, y: 0.0), (x: 3.0, y: 1.0), (x: 2.0, y: 1.0), (x: 2.0, y: 0.0),
        ];
        let farm = FarmBoundary::new(MultiPolygon::new(vec![west, east]));

        let points = generate_sample_points_seeded(&farm, 60, Some(9));
        assert!(points.iter().any(|p| p.lon < 1.0));
        assert!(points.iter().any(|p| p.lon > 2.0));
        assert!(points.iter().all(|p| !(1.0..=2.0).contains(&p.lon)));
    }

    #[test]
    fn same_seed_same_points() {
        let a = generate_sample_points_seeded(&field(), 10, Some(1234));
        let b = generate_sample_points_seeded(&field(), 10, Some(1234));
        assert_eq!(a, b);
    }

    #[test]
    fn zero_count_is_empty() {
        assert!(generate_sample_points(&field(), 0).is_empty());
    }

    #[test]
    fn degenerate_boundary_yields_no_points() {
        // Collinear ring: zero area, nothing is strictly inside.
        let sliver = FarmBoundary::from_polygon(polygon![
            (x: 0.0, y: 0.0),
            (x: 1.0, y: 1.0),
            (x: 2.0, y: 2.0),
            (x: 0.0, y: 0.0),
        ]);
        assert!(generate_sample_points_seeded(&sliver, 5, Some(5)).is_empty());

        let empty = FarmBoundary::from_polygon(Polygon::new(LineString::new(vec![]), vec![]));
        assert!(generate_sample_points(&empty, 5).is_empty());
    }
}
