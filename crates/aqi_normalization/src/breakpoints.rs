use models::Pollutant;
use tracing::debug;

/// Upper bound of the AQI scale; extrapolated values are clamped to it
pub const MAX_AQI: f64 = 500.0;

/// One row of a regulatory breakpoint table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Breakpoint {
    pub conc_low: f64,
    pub conc_high: f64,
    pub index_low: f64,
    pub index_high: f64,
}

impl Breakpoint {
    pub const fn new(conc_low: f64, conc_high: f64, index_low: f64, index_high: f64) -> Self {
        Self {
            conc_low,
            conc_high,
            index_low,
            index_high,
        }
    }

    pub fn contains(&self, concentration: f64) -> bool {
        self.conc_low <= concentration && concentration <= self.conc_high
    }

    pub fn slope(&self) -> f64 {
        (self.index_high - self.index_low) / (self.conc_high - self.conc_low)
    }

    /// EPA linear interpolation, also used past `conc_high` for extrapolation
    pub fn interpolate(&self, concentration: f64) -> f64 {
        self.slope() * (concentration - self.conc_low) + self.index_low
    }
}

const fn bp(conc_low: f64, conc_high: f64, index_low: f64, index_high: f64) -> Breakpoint {
    Breakpoint::new(conc_low, conc_high, index_low, index_high)
}

/// PM2.5, µg/m³
pub const PM25: &[Breakpoint] = &[
    bp(0.0, 12.0, 0.0, 50.0),
    bp(12.1, 35.4, 51.0, 100.0),
    bp(35.5, 55.4, 101.0, 150.0),
    bp(55.5, 150.4, 151.0, 200.0),
    bp(150.5, 250.4, 201.0, 300.0),
    bp(250.5, 350.4, 301.0, 400.0),
    bp(350.5, 500.4, 401.0, 500.0),
];

/// PM10, µg/m³
pub const PM10: &[Breakpoint] = &[
    bp(0.0, 54.0, 0.0, 50.0),
    bp(55.0, 154.0, 51.0, 100.0),
    bp(155.0, 254.0, 101.0, 150.0),
    bp(255.0, 354.0, 151.0, 200.0),
    bp(355.0, 424.0, 201.0, 300.0),
    bp(425.0, 504.0, 301.0, 400.0),
    bp(505.0, 604.0, 401.0, 500.0),
];

/// NO2, ppb
pub const NO2: &[Breakpoint] = &[
    bp(0.0, 53.0, 0.0, 50.0),
    bp(54.0, 100.0, 51.0, 100.0),
    bp(101.0, 360.0, 101.0, 150.0),
    bp(361.0, 649.0, 151.0, 200.0),
    bp(650.0, 1249.0, 201.0, 300.0),
    bp(1250.0, 1649.0, 301.0, 400.0),
    bp(1650.0, 2049.0, 401.0, 500.0),
];

/// SO2, ppb
pub const SO2: &[Breakpoint] = &[
    bp(0.0, 35.0, 0.0, 50.0),
    bp(36.0, 75.0, 51.0, 100.0),
    bp(76.0, 185.0, 101.0, 150.0),
    bp(186.0, 304.0, 151.0, 200.0),
    bp(305.0, 604.0, 201.0, 300.0),
    bp(605.0, 804.0, 301.0, 400.0),
    bp(805.0, 1004.0, 401.0, 500.0),
];

/// CO, ppm
pub const CO: &[Breakpoint] = &[
    bp(0.0, 4.4, 0.0, 50.0),
    bp(4.5, 9.4, 51.0, 100.0),
    bp(9.5, 12.4, 101.0, 150.0),
    bp(12.5, 15.4, 151.0, 200.0),
    bp(15.5, 30.4, 201.0, 300.0),
    bp(30.5, 40.4, 301.0, 400.0),
    bp(40.5, 50.4, 401.0, 500.0),
];

/// O3 8-hour average, ppm. The 8-hour table stops at 300.
pub const O3: &[Breakpoint] = &[
    bp(0.000, 0.054, 0.0, 50.0),
    bp(0.055, 0.070, 51.0, 100.0),
    bp(0.071, 0.085, 101.0, 150.0),
    bp(0.086, 0.105, 151.0, 200.0),
    bp(0.106, 0.200, 201.0, 300.0),
];

pub fn table_for(pollutant: Pollutant) -> &'static [Breakpoint] {
    match pollutant {
        Pollutant::Pm25 => PM25,
        Pollutant::Pm10 => PM10,
        Pollutant::No2 => NO2,
        Pollutant::So2 => SO2,
        Pollutant::Co => CO,
        Pollutant::O3 => O3,
    }
}

/// Factor from µg/m³ to the unit of the pollutant's table (approximate, 25 °C)
pub fn native_unit_factor(pollutant: Pollutant) -> f64 {
    match pollutant {
        Pollutant::Pm25 | Pollutant::Pm10 => 1.0,
        Pollutant::No2 => 0.532,
        Pollutant::So2 => 0.382,
        Pollutant::Co => 0.000873,
        Pollutant::O3 => 0.000512,
    }
}

pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Individual AQI of one concentration against a table, already in the table's unit.
///
/// Returns `None` for negative or NaN input, for a value that falls between two
/// rows, and for any row whose interpolation is not finite.
pub fn pollutant_aqi(concentration: f64, table: &[Breakpoint]) -> Option<f64> {
    if concentration < 0.0 {
        debug!(concentration, "negative concentration rejected");
        return None;
    }

    if let Some(row) = table.iter().find(|row| row.contains(concentration)) {
        return finite(round1(row.interpolate(concentration)));
    }

    let top = table.last()?;
    if concentration > top.conc_high {
        if !top.slope().is_finite() {
            debug!("degenerate top breakpoint, cannot extrapolate");
            return None;
        }
        return Some(round1(top.interpolate(concentration)).min(MAX_AQI));
    }

    debug!(concentration, "concentration not covered by any breakpoint");
    None
}

fn finite(aqi: f64) -> Option<f64> {
    if aqi.is_finite() {
        Some(aqi)
    } else {
        debug!("degenerate breakpoint produced a non-finite index");
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_TABLES: [&[Breakpoint]; 6] = [PM25, PM10, NO2, SO2, CO, O3];

    #[test]
    fn test_lower_bound_yields_index_low() {
        for table in ALL_TABLES {
            for row in table {
                assert_eq!(
                    pollutant_aqi(row.conc_low, table),
                    Some(row.index_low),
                    "row {:?}",
                    row
                );
            }
        }
    }

    #[test]
    fn test_upper_bound_yields_index_high() {
        for table in ALL_TABLES {
            for row in table {
                assert_eq!(
                    pollutant_aqi(row.conc_high, table),
                    Some(row.index_high),
                    "row {:?}",
                    row
                );
            }
        }
    }

    #[test]
    fn test_tables_increase_in_concentration_and_index() {
        for table in ALL_TABLES {
            for pair in table.windows(2) {
                assert!(pair[0].conc_high < pair[1].conc_low);
                assert!(pair[0].index_high < pair[1].index_low);
            }
        }
    }

    #[test]
    fn test_interpolation_inside_range() {
        // (155, 254) -> (101, 150)
        assert_eq!(pollutant_aqi(200.0, PM10), Some(123.3));
    }

    #[test]
    fn test_extrapolation_is_clamped_at_500() {
        assert_eq!(pollutant_aqi(600.0, PM25), Some(500.0));
        assert_eq!(pollutant_aqi(f64::INFINITY, PM25), Some(500.0));
    }

    #[test]
    fn test_extrapolation_below_cap_is_not_clamped() {
        // top O3 row slope carried past 0.200 ppm
        let aqi = pollutant_aqi(0.256, O3).unwrap();
        assert!((aqi - 359.0).abs() < 1e-9);
    }

    #[test]
    fn test_gap_between_rows_has_no_value() {
        assert_eq!(pollutant_aqi(12.05, PM25), None);
    }

    #[test]
    fn test_negative_and_nan_have_no_value() {
        assert_eq!(pollutant_aqi(-0.1, PM25), None);
        assert_eq!(pollutant_aqi(f64::NAN, PM25), None);
    }

    #[test]
    fn test_degenerate_rows_have_no_value() {
        let table = [Breakpoint::new(5.0, 5.0, 0.0, 50.0)];
        assert_eq!(pollutant_aqi(5.0, &table), None);
        assert_eq!(pollutant_aqi(6.0, &table), None);
        assert_eq!(pollutant_aqi(1.0, &[]), None);
    }
}
