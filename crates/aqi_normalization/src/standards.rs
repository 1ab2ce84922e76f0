//! Conversion of AQI values published under other national scales.
//!
//! The curves below are approximate and not peer-reviewed: three linear
//! segments per standard, fitted by hand to the differing PM2.5 limits.

use serde::{Deserialize, Serialize};

use crate::breakpoints::MAX_AQI;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AqiStandard {
    Epa,
    China,
    India,
    Eu,
    /// Any unrecognised scale, treated as EPA-like
    Other,
}

impl AqiStandard {
    /// Case-insensitive; never fails, unknown names map to `Other`
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "epa" | "us" => AqiStandard::Epa,
            "china" | "cn" => AqiStandard::China,
            "india" => AqiStandard::India,
            "eu" | "european" => AqiStandard::Eu,
            _ => AqiStandard::Other,
        }
    }

    pub fn to_epa(self, aqi: f64) -> f64 {
        match self {
            AqiStandard::Epa | AqiStandard::Other => aqi,
            AqiStandard::China => china_to_epa(aqi),
            AqiStandard::India => india_to_epa(aqi),
            AqiStandard::Eu => eu_to_epa(aqi),
        }
    }
}

/// Converts an AQI from a foreign scale to the EPA scale.
///
/// Total: NaN is returned unchanged, unknown standards are the identity.
pub fn normalize_existing_aqi(aqi_value: f64, source_standard: &str) -> f64 {
    if aqi_value.is_nan() {
        return aqi_value;
    }
    AqiStandard::parse(source_standard).to_epa(aqi_value)
}

// China's scale is more lenient in the moderate band
fn china_to_epa(aqi: f64) -> f64 {
    if aqi <= 50.0 {
        aqi
    } else if aqi <= 100.0 {
        50.0 + (aqi - 50.0) * 1.4
    } else if aqi <= 200.0 {
        100.0 + (aqi - 100.0)
    } else {
        (200.0 + (aqi - 200.0) * 0.8).min(MAX_AQI)
    }
}

fn india_to_epa(aqi: f64) -> f64 {
    if aqi <= 100.0 {
        aqi
    } else if aqi <= 200.0 {
        100.0 + (aqi - 100.0) * 0.9
    } else {
        (180.0 + (aqi - 200.0) * 0.7).min(MAX_AQI)
    }
}

// EU indices are stricter, so low values map upward
fn eu_to_epa(aqi: f64) -> f64 {
    if aqi <= 50.0 {
        aqi * 1.2
    } else if aqi <= 100.0 {
        50.0 + (aqi - 50.0) * 1.5
    } else {
        (125.0 + (aqi - 100.0)).min(MAX_AQI)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!(AqiStandard::parse("US"), AqiStandard::Epa);
        assert_eq!(AqiStandard::parse("cn"), AqiStandard::China);
        assert_eq!(AqiStandard::parse("European"), AqiStandard::Eu);
        assert_eq!(AqiStandard::parse("India"), AqiStandard::India);
        assert_eq!(AqiStandard::parse("uk-daqi"), AqiStandard::Other);
    }

    #[test]
    fn test_epa_and_unknown_pass_through() {
        assert_eq!(normalize_existing_aqi(137.0, "epa"), 137.0);
        assert_eq!(normalize_existing_aqi(137.0, "martian"), 137.0);
        assert_eq!(normalize_existing_aqi(137.0, ""), 137.0);
    }

    #[test]
    fn test_china_segments() {
        assert!(close(normalize_existing_aqi(40.0, "china"), 40.0));
        assert!(close(normalize_existing_aqi(80.0, "china"), 92.0));
        assert!(close(normalize_existing_aqi(150.0, "china"), 150.0));
        assert!(close(normalize_existing_aqi(300.0, "china"), 280.0));
        assert!(close(normalize_existing_aqi(900.0, "china"), 500.0));
    }

    #[test]
    fn test_india_segments() {
        assert!(close(normalize_existing_aqi(90.0, "india"), 90.0));
        assert!(close(normalize_existing_aqi(150.0, "india"), 145.0));
        assert!(close(normalize_existing_aqi(300.0, "india"), 250.0));
        assert!(close(normalize_existing_aqi(1000.0, "india"), 500.0));
    }

    #[test]
    fn test_eu_segments() {
        assert!(close(normalize_existing_aqi(40.0, "eu"), 48.0));
        assert!(close(normalize_existing_aqi(80.0, "eu"), 95.0));
        assert!(close(normalize_existing_aqi(150.0, "eu"), 175.0));
        assert!(close(normalize_existing_aqi(600.0, "eu"), 500.0));
    }

    #[test]
    fn test_conversion_is_total() {
        for standard in ["china", "india", "eu", "epa", "???"] {
            for value in [-50.0, 0.0, f64::INFINITY, f64::NEG_INFINITY, 1e300] {
                let _ = normalize_existing_aqi(value, standard);
            }
            assert!(normalize_existing_aqi(f64::NAN, standard).is_nan());
        }
    }
}
