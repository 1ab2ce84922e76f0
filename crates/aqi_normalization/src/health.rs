use models::AqiCategory;

/// Category for a standardized AQI. Bands are inclusive at their upper bound.
///
/// Negative values fall through to `Good`; NaN compares false everywhere and
/// lands in `Hazardous`.
pub fn get_aqi_category(aqi_value: f64) -> AqiCategory {
    if aqi_value <= 50.0 {
        AqiCategory::Good
    } else if aqi_value <= 100.0 {
        AqiCategory::Moderate
    } else if aqi_value <= 150.0 {
        AqiCategory::UnhealthyForSensitiveGroups
    } else if aqi_value <= 200.0 {
        AqiCategory::Unhealthy
    } else if aqi_value <= 300.0 {
        AqiCategory::VeryUnhealthy
    } else {
        AqiCategory::Hazardous
    }
}

/// Health impact severity on a 0-100 scale, hard-clamped at both ends.
/// NaN maps to a moderate 50.
pub fn calculate_health_impact_score(aqi_value: f64) -> f64 {
    if aqi_value.is_nan() {
        return 50.0;
    }
    let score = if aqi_value <= 50.0 {
        10.0
    } else if aqi_value <= 100.0 {
        10.0 + (aqi_value - 50.0) * 0.6
    } else if aqi_value <= 150.0 {
        40.0 + (aqi_value - 100.0) * 0.8
    } else if aqi_value <= 200.0 {
        80.0 + (aqi_value - 150.0) * 0.4
    } else {
        100.0 + (aqi_value - 200.0) * 0.1
    };
    score.clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_extremes() {
        assert_eq!(get_aqi_category(0.0), AqiCategory::Good);
        assert_eq!(get_aqi_category(0.0).color(), "green");
        assert_eq!(get_aqi_category(500.0), AqiCategory::Hazardous);
        assert_eq!(get_aqi_category(500.0).color(), "maroon");
    }

    #[test]
    fn test_band_edges_belong_to_lower_category() {
        assert_eq!(get_aqi_category(50.0), AqiCategory::Good);
        assert_eq!(get_aqi_category(100.0), AqiCategory::Moderate);
        assert_eq!(get_aqi_category(150.0), AqiCategory::UnhealthyForSensitiveGroups);
        assert_eq!(get_aqi_category(200.0), AqiCategory::Unhealthy);
        assert_eq!(get_aqi_category(300.0), AqiCategory::VeryUnhealthy);
        assert_eq!(get_aqi_category(300.1), AqiCategory::Hazardous);
        assert_eq!(get_aqi_category(50.1), AqiCategory::Moderate);
    }

    #[test]
    fn test_negative_aqi_is_good() {
        assert_eq!(get_aqi_category(-10.0), AqiCategory::Good);
    }

    #[test]
    fn test_health_impact_curve() {
        assert_eq!(calculate_health_impact_score(30.0), 10.0);
        assert!((calculate_health_impact_score(100.0) - 40.0).abs() < 1e-9);
        assert!((calculate_health_impact_score(150.0) - 80.0).abs() < 1e-9);
        assert!((calculate_health_impact_score(175.0) - 90.0).abs() < 1e-9);
        assert!((calculate_health_impact_score(200.0) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_health_impact_saturates() {
        assert_eq!(calculate_health_impact_score(450.0), 100.0);
        assert_eq!(calculate_health_impact_score(f64::INFINITY), 100.0);
        assert_eq!(calculate_health_impact_score(-20.0), 10.0);
        assert_eq!(calculate_health_impact_score(f64::NAN), 50.0);
    }
}
