use serde::{Deserialize, Serialize};

/// Soil properties reported per sample point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoilProperty {
    Ph,
    OrganicCarbon,
    Clay,
    Sand,
    Silt,
    Nitrogen,
    CationExchangeCapacity,
    BulkDensity,
}

impl SoilProperty {
    pub const ALL: [SoilProperty; 8] = [
        SoilProperty::Ph,
        SoilProperty::OrganicCarbon,
        SoilProperty::Clay,
        SoilProperty::Sand,
        SoilProperty::Silt,
        SoilProperty::Nitrogen,
        SoilProperty::CationExchangeCapacity,
        SoilProperty::BulkDensity,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SoilProperty::Ph => "pH",
            SoilProperty::OrganicCarbon => "Organic Carbon",
            SoilProperty::Clay => "Clay",
            SoilProperty::Sand => "Sand",
            SoilProperty::Silt => "Silt",
            SoilProperty::Nitrogen => "Nitrogen",
            SoilProperty::CationExchangeCapacity => "CEC",
            SoilProperty::BulkDensity => "Bulk Density",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            SoilProperty::Ph => "",
            SoilProperty::OrganicCarbon | SoilProperty::Nitrogen => "g/kg",
            SoilProperty::Clay | SoilProperty::Sand | SoilProperty::Silt => "%",
            SoilProperty::CationExchangeCapacity => "cmol/kg",
            SoilProperty::BulkDensity => "g/cm³",
        }
    }

    /// Machine key used in GeoJSON properties and config files.
    pub fn key(&self) -> &'static str {
        match self {
            SoilProperty::Ph => "ph",
            SoilProperty::OrganicCarbon => "organic_carbon",
            SoilProperty::Clay => "clay",
            SoilProperty::Sand => "sand",
            SoilProperty::Silt => "silt",
            SoilProperty::Nitrogen => "nitrogen",
            SoilProperty::CationExchangeCapacity => "cec",
            SoilProperty::BulkDensity => "bulk_density",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "ph" | "phh2o" => Some(SoilProperty::Ph),
            "organic_carbon" | "organic carbon" | "soc" => Some(SoilProperty::OrganicCarbon),
            "clay" => Some(SoilProperty::Clay),
            "sand" => Some(SoilProperty::Sand),
            "silt" => Some(SoilProperty::Silt),
            "nitrogen" | "n" => Some(SoilProperty::Nitrogen),
            "cec" | "cation_exchange_capacity" => Some(SoilProperty::CationExchangeCapacity),
            "bulk_density" | "bulk density" | "bdod" => Some(SoilProperty::BulkDensity),
            _ => None,
        }
    }
}

impl std::fmt::Display for SoilProperty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Raw soil readings for one point. Any property may be unknown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SoilPropertyRecord {
    pub ph: Option<f64>,
    /// g/kg
    pub organic_carbon: Option<f64>,
    /// Percent
    pub clay: Option<f64>,
    /// Percent
    pub sand: Option<f64>,
    /// Percent
    pub silt: Option<f64>,
    /// g/kg
    pub nitrogen: Option<f64>,
    /// cmol/kg
    pub cec: Option<f64>,
    /// g/cm³
    pub bulk_density: Option<f64>,
}

impl SoilPropertyRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Non-finite readings count as unknown.
    pub fn get(&self, property: SoilProperty) -> Option<f64> {
        let value = match property {
            SoilProperty::Ph => self.ph,
            SoilProperty::OrganicCarbon => self.organic_carbon,
            SoilProperty::Clay => self.clay,
            SoilProperty::Sand => self.sand,
            SoilProperty::Silt => self.silt,
            SoilProperty::Nitrogen => self.nitrogen,
            SoilProperty::CationExchangeCapacity => self.cec,
            SoilProperty::BulkDensity => self.bulk_density,
        };
        value.filter(|v| v.is_finite())
    }

    /// Non-finite values are stored as unknown.
    pub fn set(&mut self, property: SoilProperty, value: Option<f64>) {
        let value = value.filter(|v| v.is_finite());
        let slot = match property {
            SoilProperty::Ph => &mut self.ph,
            SoilProperty::OrganicCarbon => &mut self.organic_carbon,
            SoilProperty::Clay => &mut self.clay,
            SoilProperty::Sand => &mut self.sand,
            SoilProperty::Silt => &mut self.silt,
            SoilProperty::Nitrogen => &mut self.nitrogen,
            SoilProperty::CationExchangeCapacity => &mut self.cec,
            SoilProperty::BulkDensity => &mut self.bulk_density,
        };
        *slot = value;
    }

    pub fn with(mut self, property: SoilProperty, value: f64) -> Self {
        self.set(property, Some(value));
        self
    }

    pub fn is_empty(&self) -> bool {
        SoilProperty::ALL.iter().all(|p| self.get(*p).is_none())
    }

    /// Known properties in declaration order.
    pub fn present(&self) -> impl Iterator<Item = (SoilProperty, f64)> + '_ {
        SoilProperty::ALL
            .iter()
            .filter_map(move |p| self.get(*p).map(|v| (*p, v)))
    }

    /// Clay, sand and silt when all three are known.
    pub fn texture_fractions(&self) -> Option<(f64, f64, f64)> {
        Some((
            self.get(SoilProperty::Clay)?,
            self.get(SoilProperty::Sand)?,
            self.get(SoilProperty::Silt)?,
        ))
    }
}
