use super::bands::{Band, BandTable, Interval};
use crate::models::{QualityCategory, QualityClassification, SoilProperty, SoilPropertyRecord};
use std::collections::BTreeMap;

/// Highest sub-score any single parameter can earn.
pub const MAX_SUB_SCORE: u8 = 5;

pub const PH_BANDS: BandTable<u8> = BandTable {
    bands: &[
        Band {
            intervals: &[Interval::closed(6.0, 7.0)],
            value: 5,
        },
        Band {
            intervals: &[Interval::closed_open(5.5, 6.0), Interval::open_closed(7.0, 7.5)],
            value: 4,
        },
        Band {
            intervals: &[Interval::closed_open(5.0, 5.5), Interval::open_closed(7.5, 8.0)],
            value: 3,
        },
        Band {
            intervals: &[Interval::closed_open(4.5, 5.0), Interval::open_closed(8.0, 8.5)],
            value: 2,
        },
    ],
    fallback: 1,
};

/// Organic carbon in g/kg.
pub const ORGANIC_CARBON_BANDS: BandTable<u8> = BandTable {
    bands: &[
        Band {
            intervals: &[Interval::at_least(20.0)],
            value: 5,
        },
        Band {
            intervals: &[Interval::at_least(15.0)],
            value: 4,
        },
        Band {
            intervals: &[Interval::at_least(10.0)],
            value: 3,
        },
        Band {
            intervals: &[Interval::at_least(5.0)],
            value: 2,
        },
    ],
    fallback: 1,
};

/// Clay content in percent.
pub const CLAY_BANDS: BandTable<u8> = BandTable {
    bands: &[
        Band {
            intervals: &[Interval::closed(20.0, 40.0)],
            value: 5,
        },
        Band {
            intervals: &[Interval::closed_open(15.0, 20.0), Interval::open_closed(40.0, 50.0)],
            value: 4,
        },
        Band {
            intervals: &[Interval::closed_open(10.0, 15.0), Interval::open_closed(50.0, 60.0)],
            value: 3,
        },
        Band {
            intervals: &[Interval::closed_open(5.0, 10.0), Interval::open_closed(60.0, 70.0)],
            value: 2,
        },
    ],
    fallback: 1,
};

const CATEGORY_BANDS: BandTable<QualityCategory> = BandTable {
    bands: &[
        Band {
            intervals: &[Interval::at_least(80.0)],
            value: QualityCategory::Excellent,
        },
        Band {
            intervals: &[Interval::at_least(65.0)],
            value: QualityCategory::Good,
        },
        Band {
            intervals: &[Interval::at_least(50.0)],
            value: QualityCategory::Fair,
        },
        Band {
            intervals: &[Interval::at_least(35.0)],
            value: QualityCategory::Poor,
        },
    ],
    fallback: QualityCategory::VeryPoor,
};

const SCORED_PARAMETERS: [(SoilProperty, &BandTable<u8>); 3] = [
    (SoilProperty::Ph, &PH_BANDS),
    (SoilProperty::OrganicCarbon, &ORGANIC_CARBON_BANDS),
    (SoilProperty::Clay, &CLAY_BANDS),
];

pub fn category_for_percentage(percentage: f64) -> QualityCategory {
    CATEGORY_BANDS.lookup(percentage)
}

/// Composite soil quality from pH, organic carbon and clay content.
///
/// Each available parameter earns a 1-5 sub-score and adds 5 to the
/// attainable maximum; missing parameters are left out of both, so partial
/// records are scored on what they have. A record with none of the three
/// yields [`QualityClassification::unknown`].
pub fn classify_soil_quality(record: &SoilPropertyRecord) -> QualityClassification {
    let mut total: u32 = 0;
    let mut maximum: u32 = 0;
    let mut breakdown = BTreeMap::new();

    for (property, table) in SCORED_PARAMETERS.iter() {
        if let Some(reading) = record.get(*property) {
            let score = table.lookup(reading);
            total += u32::from(score);
            maximum += u32::from(MAX_SUB_SCORE);
            breakdown.insert(
                property.as_str().to_string(),
                format!("{}/{}", score, MAX_SUB_SCORE),
            );
        }
    }

    if maximum == 0 {
        return QualityClassification::unknown();
    }

    let percentage = 100.0 * f64::from(total) / f64::from(maximum);

    QualityClassification {
        category: category_for_percentage(percentage),
        percentage,
        breakdown,
    }
}
