//! # Strength
//!
//! The predicted compressive strength and its EN 206 class.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Predicted compressive strength in MPa.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Strength {
    pub mpa: f64,
}

impl Strength {
    #[must_use]
    pub const fn new(mpa: f64) -> Self {
        Self { mpa }
    }

    /// The strength class whose cylinder band contains this value.
    #[must_use]
    pub fn class(&self) -> StrengthClass {
        StrengthClass::from_mpa(self.mpa)
    }
}

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} MPa", self.mpa)
    }
}

/// EN 206 compressive strength class (cylinder / cube characteristic MPa).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StrengthClass {
    #[serde(rename = "C8/10")]
    C8_10,
    #[serde(rename = "C12/15")]
    C12_15,
    #[serde(rename = "C16/20")]
    C16_20,
    #[serde(rename = "C20/25")]
    C20_25,
    #[serde(rename = "C25/30")]
    C25_30,
    #[serde(rename = "C30/37")]
    C30_37,
    #[serde(rename = "C35/45")]
    C35_45,
    #[serde(rename = "C40/50")]
    C40_50,
    #[serde(rename = "C50/60")]
    C50_60,
    #[serde(rename = "C60+")]
    C60Plus,
}

impl StrengthClass {
    /// Upper (exclusive) MPa bound of each class below `C60+`.
    const BANDS: [(f64, StrengthClass); 9] = [
        (12.0, StrengthClass::C8_10),
        (16.0, StrengthClass::C12_15),
        (20.0, StrengthClass::C16_20),
        (25.0, StrengthClass::C20_25),
        (30.0, StrengthClass::C25_30),
        (37.0, StrengthClass::C30_37),
        (45.0, StrengthClass::C35_45),
        (50.0, StrengthClass::C40_50),
        (60.0, StrengthClass::C50_60),
    ];

    #[must_use]
    pub fn from_mpa(mpa: f64) -> Self {
        Self::BANDS
            .iter()
            .find(|(upper, _)| mpa < *upper)
            .map(|(_, class)| *class)
            .unwrap_or(StrengthClass::C60Plus)
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            StrengthClass::C8_10 => "C8/10",
            StrengthClass::C12_15 => "C12/15",
            StrengthClass::C16_20 => "C16/20",
            StrengthClass::C20_25 => "C20/25",
            StrengthClass::C25_30 => "C25/30",
            StrengthClass::C30_37 => "C30/37",
            StrengthClass::C35_45 => "C35/45",
            StrengthClass::C40_50 => "C40/50",
            StrengthClass::C50_60 => "C50/60",
            StrengthClass::C60Plus => "C60+",
        }
    }
}

impl fmt::Display for StrengthClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_two_decimals() {
        assert_eq!(Strength::new(24.854).to_string(), "24.85 MPa");
        assert_eq!(Strength::new(40.0).to_string(), "40.00 MPa");
    }

    #[test]
    fn class_bands() {
        assert_eq!(StrengthClass::from_mpa(5.0), StrengthClass::C8_10);
        assert_eq!(StrengthClass::from_mpa(25.0), StrengthClass::C25_30);
        assert_eq!(StrengthClass::from_mpa(33.3), StrengthClass::C30_37);
        assert_eq!(StrengthClass::from_mpa(59.99), StrengthClass::C50_60);
        assert_eq!(StrengthClass::from_mpa(82.0), StrengthClass::C60Plus);
    }

    #[test]
    fn classes_are_monotone_in_strength() {
        let classes: Vec<_> = (0..100).map(|mpa| StrengthClass::from_mpa(f64::from(mpa))).collect();
        assert!(classes.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn serde_uses_class_labels() {
        let json = serde_json::to_string(&StrengthClass::C30_37).ok();
        assert_eq!(json.as_deref(), Some("\"C30/37\""));
        assert_eq!(StrengthClass::C60Plus.to_string(), "C60+");
    }
}
