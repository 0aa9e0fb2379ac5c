use crate::models::ManagementZone;

pub const PREMIUM_MIN_SCORE: f64 = 75.0;
pub const GOOD_PRODUCTION_MIN_SCORE: f64 = 60.0;
pub const MODERATE_MIN_SCORE: f64 = 40.0;
pub const PREMIUM_PH_RANGE: (f64, f64) = (6.0, 7.0);

/// Management zone and its recommendation for a point.
///
/// Premium additionally requires a known pH inside 6.0-7.0; an unknown pH
/// never qualifies.
pub fn classify_management_zone(
    quality_percentage: f64,
    ph: Option<f64>,
) -> (ManagementZone, &'static str) {
    let ph_in_range = ph.is_some_and(|ph| ph >= PREMIUM_PH_RANGE.0 && ph <= PREMIUM_PH_RANGE.1);

    let zone = if quality_percentage >= PREMIUM_MIN_SCORE && ph_in_range {
        ManagementZone::Premium
    } else if quality_percentage >= GOOD_PRODUCTION_MIN_SCORE {
        ManagementZone::GoodProduction
    } else if quality_percentage >= MODERATE_MIN_SCORE {
        ManagementZone::Moderate
    } else {
        ManagementZone::Improvement
    };

    (zone, zone.recommendation())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn premium_needs_score_and_ph() {
        assert_eq!(
            classify_management_zone(80.0, Some(6.5)),
            (ManagementZone::Premium, "Maintain current practices")
        );
        assert_eq!(
            classify_management_zone(80.0, Some(5.0)).0,
            ManagementZone::GoodProduction
        );
        assert_eq!(
            classify_management_zone(74.9, Some(6.5)).0,
            ManagementZone::GoodProduction
        );
    }

    #[test]
    fn ph_gate_edges_are_inclusive() {
        assert_eq!(classify_management_zone(75.0, Some(6.0)).0, ManagementZone::Premium);
        assert_eq!(classify_management_zone(75.0, Some(7.0)).0, ManagementZone::Premium);
        assert_eq!(
            classify_management_zone(75.0, Some(7.01)).0,
            ManagementZone::GoodProduction
        );
    }

    #[test]
    fn unknown_ph_is_not_premium() {
        assert_eq!(
            classify_management_zone(100.0, None).0,
            ManagementZone::GoodProduction
        );
    }

    #[test]
    fn lower_zones() {
        assert_eq!(classify_management_zone(60.0, None).0, ManagementZone::GoodProduction);
        assert_eq!(classify_management_zone(59.9, Some(6.5)).0, ManagementZone::Moderate);
        assert_eq!(classify_management_zone(40.0, Some(6.5)).0, ManagementZone::Moderate);
        assert_eq!(classify_management_zone(39.9, Some(6.5)).0, ManagementZone::Improvement);
        assert_eq!(classify_management_zone(0.0, Some(6.5)).0, ManagementZone::Improvement);
    }

    #[test]
    fn recommendation_matches_zone() {
        for (score, ph) in [(90.0, Some(6.5)), (65.0, None), (45.0, None), (10.0, None)] {
            let (zone, recommendation) = classify_management_zone(score, ph);
            assert_eq!(recommendation, zone.recommendation());
        }
    }

    #[test]
    fn zone_is_monotonic_in_score_for_fixed_ph() {
        for ph in [None, Some(5.0), Some(6.5), Some(8.0)] {
            let mut previous = classify_management_zone(0.0, ph).0;
            for step in 1..=100 {
                let current = classify_management_zone(step as f64, ph).0;
                assert!(current >= previous, "ph {:?} score {}", ph, step);
                previous = current;
            }
        }
    }

    #[test]
    fn classification_is_idempotent() {
        for (score, ph) in [(80.0, Some(6.5)), (62.0, Some(5.2)), (39.9, None)] {
            assert_eq!(
                classify_management_zone(score, ph),
                classify_management_zone(score, ph)
            );
        }
    }
}
