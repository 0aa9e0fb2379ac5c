use crate::models::{SoilPropertyRecord, TextureClass};

/// Texture class from clay, sand and silt percentages.
///
/// Rules are checked in priority order and the first match wins. Inputs are
/// used as given; they are not normalised to sum to 100.
pub fn classify_soil_texture(clay: f64, sand: f64, silt: f64) -> TextureClass {
    if clay >= 40.0 {
        TextureClass::Clay
    } else if sand >= 85.0 {
        TextureClass::Sand
    } else if silt >= 80.0 {
        TextureClass::Silt
    } else if clay >= 25.0 && sand >= 45.0 {
        TextureClass::SandyClay
    } else if clay >= 25.0 && silt >= 40.0 {
        TextureClass::SiltyClay
    } else if clay >= 20.0 {
        TextureClass::ClayLoam
    } else if sand >= 70.0 {
        TextureClass::SandyLoam
    } else if silt >= 50.0 {
        TextureClass::SiltLoam
    } else {
        TextureClass::Loam
    }
}

/// Texture for a record, if all three fractions are known.
pub fn texture_for_record(record: &SoilPropertyRecord) -> Option<TextureClass> {
    record
        .texture_fractions()
        .map(|(clay, sand, silt)| classify_soil_texture(clay, sand, silt))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SoilProperty;

    #[test]
    fn clay_dominates() {
        assert_eq!(classify_soil_texture(45.0, 10.0, 45.0), TextureClass::Clay);
        assert_eq!(classify_soil_texture(40.0, 90.0, 90.0), TextureClass::Clay);
    }

    #[test]
    fn sand_and_silt() {
        assert_eq!(classify_soil_texture(10.0, 90.0, 0.0), TextureClass::Sand);
        assert_eq!(classify_soil_texture(5.0, 10.0, 85.0), TextureClass::Silt);
    }

    #[test]
    fn clay_combinations() {
        assert_eq!(classify_soil_texture(30.0, 50.0, 20.0), TextureClass::SandyClay);
        assert_eq!(classify_soil_texture(30.0, 20.0, 50.0), TextureClass::SiltyClay);
        assert_eq!(classify_soil_texture(30.0, 35.0, 35.0), TextureClass::ClayLoam);
        assert_eq!(classify_soil_texture(22.0, 60.0, 18.0), TextureClass::ClayLoam);
    }

    #[test]
    fn loams() {
        assert_eq!(classify_soil_texture(10.0, 75.0, 15.0), TextureClass::SandyLoam);
        assert_eq!(classify_soil_texture(10.0, 20.0, 70.0), TextureClass::SiltLoam);
        assert_eq!(classify_soil_texture(15.0, 45.0, 40.0), TextureClass::Loam);
    }

    #[test]
    fn inputs_are_not_normalised() {
        // Fractions sum to 30; still classified on raw values.
        assert_eq!(classify_soil_texture(10.0, 10.0, 10.0), TextureClass::Loam);
        // Sum well over 100.
        assert_eq!(classify_soil_texture(39.0, 86.0, 81.0), TextureClass::Sand);
    }

    #[test]
    fn record_needs_all_fractions() {
        let record = SoilPropertyRecord::new()
            .with(SoilProperty::Clay, 10.0)
            .with(SoilProperty::Sand, 90.0);
        assert_eq!(texture_for_record(&record), None);

        let record = record.with(SoilProperty::Silt, 0.0);
        assert_eq!(texture_for_record(&record), Some(TextureClass::Sand));
    }

    #[test]
    fn classification_is_idempotent() {
        for (clay, sand, silt) in [(45.0, 10.0, 45.0), (22.0, 60.0, 18.0), (15.0, 45.0, 40.0)] {
            assert_eq!(
                classify_soil_texture(clay, sand, silt),
                classify_soil_texture(clay, sand, silt)
            );
        }
    }
}
