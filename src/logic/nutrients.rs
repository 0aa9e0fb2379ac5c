use super::bands::{Band, BandTable, Interval};
use crate::models::{SoilProperty, SoilPropertyRecord};

/// Organic carbon (g/kg) to a 20-100 nutrient sub-score.
pub const ORGANIC_CARBON_NUTRIENT_BANDS: BandTable<f64> = BandTable {
    bands: &[
        Band {
            intervals: &[Interval::at_least(20.0)],
            value: 100.0,
        },
        Band {
            intervals: &[Interval::at_least(15.0)],
            value: 80.0,
        },
        Band {
            intervals: &[Interval::at_least(10.0)],
            value: 60.0,
        },
        Band {
            intervals: &[Interval::at_least(5.0)],
            value: 40.0,
        },
    ],
    fallback: 20.0,
};

/// Total nitrogen (g/kg) to a 20-100 nutrient sub-score.
pub const NITROGEN_NUTRIENT_BANDS: BandTable<f64> = BandTable {
    bands: &[
        Band {
            intervals: &[Interval::at_least(2.0)],
            value: 100.0,
        },
        Band {
            intervals: &[Interval::at_least(1.5)],
            value: 80.0,
        },
        Band {
            intervals: &[Interval::at_least(1.0)],
            value: 60.0,
        },
        Band {
            intervals: &[Interval::at_least(0.5)],
            value: 40.0,
        },
    ],
    fallback: 20.0,
};

/// Mean of the organic carbon and nitrogen sub-scores that are available;
/// 0 when neither reading is known.
pub fn calculate_nutrient_score(record: &SoilPropertyRecord) -> f64 {
    let scores: Vec<f64> = [
        record
            .get(SoilProperty::OrganicCarbon)
            .map(|oc| ORGANIC_CARBON_NUTRIENT_BANDS.lookup(oc)),
        record
            .get(SoilProperty::Nitrogen)
            .map(|n| NITROGEN_NUTRIENT_BANDS.lookup(n)),
    ]
    .into_iter()
    .flatten()
    .collect();

    if scores.is_empty() {
        0.0
    } else {
        scores.iter().sum::<f64>() / scores.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(oc: Option<f64>, n: Option<f64>) -> SoilPropertyRecord {
        SoilPropertyRecord {
            organic_carbon: oc,
            nitrogen: n,
            ..Default::default()
        }
    }

    #[test]
    fn rich_soil_scores_full_marks() {
        assert_eq!(calculate_nutrient_score(&record(Some(25.0), Some(2.5))), 100.0);
    }

    #[test]
    fn no_readings_scores_zero() {
        assert_eq!(calculate_nutrient_score(&record(None, None)), 0.0);
    }

    #[test]
    fn single_reading_is_used_alone() {
        assert_eq!(calculate_nutrient_score(&record(Some(12.0), None)), 60.0);
        assert_eq!(calculate_nutrient_score(&record(None, Some(0.2))), 20.0);
    }

    #[test]
    fn mixed_readings_are_averaged() {
        // 80 (oc 15) and 40 (n 0.5)
        assert_eq!(calculate_nutrient_score(&record(Some(15.0), Some(0.5))), 60.0);
        // 20 (oc 1) and 100 (n 2.0)
        assert_eq!(calculate_nutrient_score(&record(Some(1.0), Some(2.0))), 60.0);
    }

    #[test]
    fn nitrogen_bands() {
        assert_eq!(NITROGEN_NUTRIENT_BANDS.lookup(1.5), 80.0);
        assert_eq!(NITROGEN_NUTRIENT_BANDS.lookup(1.49), 60.0);
        assert_eq!(NITROGEN_NUTRIENT_BANDS.lookup(0.49), 20.0);
    }

    #[test]
    fn score_stays_in_range() {
        for oc in [0.0, 4.0, 9.0, 14.0, 19.0, 40.0] {
            for n in [0.0, 0.7, 1.2, 1.7, 3.0] {
                let score = calculate_nutrient_score(&record(Some(oc), Some(n)));
                assert!((20.0..=100.0).contains(&score));
            }
        }
    }

    #[test]
    fn scoring_is_idempotent() {
        let sample = record(Some(13.0), Some(0.9));
        assert_eq!(calculate_nutrient_score(&sample), calculate_nutrient_score(&sample));
    }
}
