use models::{AnalysisDetails, AnalysisThresholds};

/// Narrative breakdown of a comparison.
///
/// `life_exp_delta` is the health-adjusted delta, the same one the score uses.
pub fn generate_analysis_details(
    cost_delta: f64,
    aqi_delta: f64,
    life_exp_delta: f64,
    recommendation_score: f64,
    t: &AnalysisThresholds,
) -> AnalysisDetails {
    let mut analysis = AnalysisDetails::default();

    // Primary factors
    if life_exp_delta.abs() > t.life_exp_factor {
        analysis.primary_factors.push(if life_exp_delta > 0.0 {
            format!(
                "Significant health benefit: +{:.2} years life expectancy",
                life_exp_delta
            )
        } else {
            format!(
                "Health concern: {:.2} years life expectancy reduction",
                life_exp_delta
            )
        });
    }

    if cost_delta.abs() > t.cost_factor {
        analysis.primary_factors.push(if cost_delta > 0.0 {
            format!("High cost increase: +{:.1}% cost of living", cost_delta)
        } else {
            format!(
                "Significant savings: {:.1}% cost of living reduction",
                cost_delta
            )
        });
    }

    if aqi_delta.abs() > t.aqi_factor {
        analysis.primary_factors.push(if aqi_delta > 0.0 {
            format!("Air quality concern: +{:.1} AQI increase", aqi_delta)
        } else {
            format!("Better air quality: {:.1} AQI improvement", aqi_delta)
        });
    }

    // Trade-offs; a zero delta on either side has no message
    let trade_off = if cost_delta > 0.0 && life_exp_delta > 0.0 {
        Some("Higher living costs but better health outcomes")
    } else if cost_delta < 0.0 && life_exp_delta < 0.0 {
        Some("Lower costs but potential health risks")
    } else if cost_delta > 0.0 && life_exp_delta < 0.0 {
        Some("Higher costs AND worse health outcomes")
    } else if cost_delta < 0.0 && life_exp_delta > 0.0 {
        Some("Lower costs AND better health - ideal scenario")
    } else {
        None
    };
    analysis
        .trade_offs
        .extend(trade_off.map(str::to_string));

    // Recommendation band
    let recommendation = if recommendation_score >= t.highly_recommended {
        "Highly recommended move - strong benefits outweigh costs"
    } else if recommendation_score >= t.generally_positive {
        "Generally positive move - benefits likely outweigh drawbacks"
    } else if recommendation_score >= t.mixed {
        "Mixed outcomes - carefully consider personal priorities"
    } else if recommendation_score >= t.consider_alternatives {
        "Consider alternatives - significant trade-offs involved"
    } else {
        "Not recommended - costs and risks outweigh benefits"
    };
    analysis.recommendations.push(recommendation.to_string());

    // Risk factors
    if aqi_delta > t.aqi_risk {
        analysis
            .risk_factors
            .push("Significant air quality deterioration".to_string());
    }
    if cost_delta > t.cost_risk {
        analysis
            .risk_factors
            .push("Very high cost of living increase".to_string());
    }
    if life_exp_delta < t.life_exp_risk {
        analysis
            .risk_factors
            .push("Substantial health impact concerns".to_string());
    }

    analysis
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details(cost: f64, aqi: f64, life: f64, score: f64) -> AnalysisDetails {
        generate_analysis_details(cost, aqi, life, score, &AnalysisThresholds::default())
    }

    #[test]
    fn test_primary_factors_messages() {
        let d = details(70.0, -143.0, 17.776, 87.5);
        assert_eq!(
            d.primary_factors,
            vec![
                "Significant health benefit: +17.78 years life expectancy",
                "High cost increase: +70.0% cost of living",
                "Better air quality: -143.0 AQI improvement",
            ]
        );
    }

    #[test]
    fn test_small_deltas_have_no_primary_factors() {
        let d = details(20.0, 25.0, 1.0, 50.0);
        assert!(d.primary_factors.is_empty());
        assert!(d.risk_factors.is_empty());
    }

    #[test]
    fn test_trade_off_combinations() {
        assert_eq!(details(10.0, 0.0, 1.0, 50.0).trade_offs, vec!["Higher living costs but better health outcomes"]);
        assert_eq!(details(-10.0, 0.0, -1.0, 50.0).trade_offs, vec!["Lower costs but potential health risks"]);
        assert_eq!(details(10.0, 0.0, -1.0, 50.0).trade_offs, vec!["Higher costs AND worse health outcomes"]);
        assert_eq!(details(-10.0, 0.0, 1.0, 50.0).trade_offs, vec!["Lower costs AND better health - ideal scenario"]);
        assert!(details(0.0, 0.0, 1.0, 50.0).trade_offs.is_empty());
    }

    #[test]
    fn test_recommendation_bands() {
        let band = |score: f64| details(0.0, 0.0, 0.0, score).recommendations[0].clone();
        assert!(band(75.0).starts_with("Highly recommended"));
        assert!(band(60.0).starts_with("Generally positive"));
        assert!(band(40.0).starts_with("Mixed outcomes"));
        assert!(band(25.0).starts_with("Consider alternatives"));
        assert!(band(24.9).starts_with("Not recommended"));
    }

    #[test]
    fn test_risk_factors() {
        let d = details(60.0, 80.0, -3.0, 10.0);
        assert_eq!(
            d.risk_factors,
            vec![
                "Significant air quality deterioration",
                "Very high cost of living increase",
                "Substantial health impact concerns",
            ]
        );
        assert_eq!(d.primary_factors[0], "Health concern: -3.00 years life expectancy reduction");
    }
}
