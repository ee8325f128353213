//! Common types used across the platform

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Diagnosis severity level
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    #[default]
    Medium,
    High,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Severity::Low),
            "medium" => Ok(Severity::Medium),
            "high" => Ok(Severity::High),
            _ => Err("Unknown severity level"),
        }
    }
}

/// Soil types supported on the analysis form
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SoilType {
    Clay,
    Loam,
    Sandy,
    Silt,
    Peat,
}

impl SoilType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SoilType::Clay => "clay",
            SoilType::Loam => "loam",
            SoilType::Sandy => "sandy",
            SoilType::Silt => "silt",
            SoilType::Peat => "peat",
        }
    }
}

impl fmt::Display for SoilType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SoilType {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "clay" => Ok(SoilType::Clay),
            "loam" => Ok(SoilType::Loam),
            "sandy" => Ok(SoilType::Sandy),
            "silt" => Ok(SoilType::Silt),
            "peat" => Ok(SoilType::Peat),
            _ => Err("Unknown soil type"),
        }
    }
}

/// Optional environmental readings submitted with an analysis request
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EnvironmentalReadings {
    /// Air temperature in degrees Celsius
    pub temperature: Option<Decimal>,
    /// Relative humidity percentage
    pub humidity: Option<Decimal>,
    /// Recent rainfall in millimetres (free text from the form)
    pub rainfall: Option<String>,
    /// Soil type at the plot
    pub soil_type: Option<SoilType>,
}

impl EnvironmentalReadings {
    /// True when no reading was supplied at all
    pub fn is_empty(&self) -> bool {
        self.temperature.is_none()
            && self.humidity.is_none()
            && self.rainfall.is_none()
            && self.soil_type.is_none()
    }

    /// Format the present readings as labeled parts, in form order.
    ///
    /// Used both for the vision prompt context and for the
    /// environmental-impact sentence, so the two always agree.
    pub fn format_parts(&self) -> Vec<String> {
        let mut parts = Vec::new();
        if let Some(t) = &self.temperature {
            parts.push(format!("Temperature: {}°C", t));
        }
        if let Some(h) = &self.humidity {
            parts.push(format!("Humidity: {}%", h));
        }
        if let Some(r) = &self.rainfall {
            parts.push(format!("Rainfall: {}mm", r));
        }
        if let Some(s) = &self.soil_type {
            parts.push(format!("Soil Type: {}", s));
        }
        parts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_severity_round_trip() {
        for s in ["low", "medium", "high"] {
            assert_eq!(Severity::from_str(s).unwrap().as_str(), s);
        }
        assert!(Severity::from_str("critical").is_err());
    }

    #[test]
    fn test_soil_type_parsing() {
        assert_eq!(SoilType::from_str("loam").unwrap(), SoilType::Loam);
        assert!(SoilType::from_str("chalk").is_err());
    }

    #[test]
    fn test_format_parts_order_and_units() {
        let readings = EnvironmentalReadings {
            temperature: Some(dec("30")),
            humidity: Some(dec("85")),
            rainfall: Some("12".to_string()),
            soil_type: Some(SoilType::Clay),
        };
        assert_eq!(
            readings.format_parts(),
            vec![
                "Temperature: 30°C",
                "Humidity: 85%",
                "Rainfall: 12mm",
                "Soil Type: clay"
            ]
        );
    }

    #[test]
    fn test_format_parts_omits_absent_fields() {
        let readings = EnvironmentalReadings {
            humidity: Some(dec("70")),
            ..Default::default()
        };
        assert_eq!(readings.format_parts(), vec!["Humidity: 70%"]);
        assert!(!readings.is_empty());
        assert!(EnvironmentalReadings::default().is_empty());
    }
}
