//! Refractive index of standard air.
//!
//! Catalog dispersion formulas give the index of glass *relative to air* at
//! the catalog reference temperature. Converting between reference and
//! ambient conditions needs the absolute index of air, computed here with the
//! dispersion formula for dry air at 15 °C and 1 atm followed by a linear
//! temperature and pressure correction:
//!
//! $$n_{\text{ref}} = 1 + 10^{-8}\left(6432.8 + \frac{2949810\,\lambda^2}{146\,\lambda^2 - 1}
//!   + \frac{25540\,\lambda^2}{41\,\lambda^2 - 1}\right)$$
//!
//! $$n(T, P) = 1 + \frac{n_{\text{ref}} - 1}{1 + (T - 15)\cdot 3.4785\times10^{-3}}
//!   \cdot\frac{P}{P_0}$$

/// Standard atmospheric pressure $P_0$ (Pa).
pub const STANDARD_PRESSURE: f64 = 101_325.0;

/// Temperature (°C) at which the reference air formula is defined.
const REFERENCE_TEMPERATURE: f64 = 15.0;

/// Thermal coefficient of the air correction (1/°C).
const THERMAL_COEFFICIENT: f64 = 3.4785e-3;

/// Absolute refractive index of air.
///
/// # Arguments
/// * `wavelength_um` - Vacuum wavelength in micrometres.
/// * `temperature` - Air temperature in °C.
/// * `pressure` - Air pressure in Pa (use [`STANDARD_PRESSURE`] for 1 atm).
pub fn refractive_index_abs(wavelength_um: f64, temperature: f64, pressure: f64) -> f64 {
    let lambda_sq = wavelength_um * wavelength_um;
    let n_ref = 1.0
        + 1.0e-8
            * (6432.8
                + 2_949_810.0 * lambda_sq / (146.0 * lambda_sq - 1.0)
                + 25_540.0 * lambda_sq / (41.0 * lambda_sq - 1.0));

    1.0 + (n_ref - 1.0) / (1.0 + (temperature - REFERENCE_TEMPERATURE) * THERMAL_COEFFICIENT)
        * (pressure / STANDARD_PRESSURE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_air_at_reference_conditions() {
        // 1 + 2.7716e-4 at the d line, 15 °C, 1 atm
        let n = refractive_index_abs(0.587562, 15.0, STANDARD_PRESSURE);
        assert_abs_diff_eq!(n, 1.000_277_16, epsilon = 1e-8);
    }

    #[test]
    fn test_air_index_drops_with_temperature() {
        let cold = refractive_index_abs(0.55, 0.0, STANDARD_PRESSURE);
        let warm = refractive_index_abs(0.55, 40.0, STANDARD_PRESSURE);
        assert!(cold > warm);
    }

    #[test]
    fn test_vacuum_limit() {
        let n = refractive_index_abs(0.55, 20.0, 0.0);
        assert_eq!(n, 1.0);
    }

    #[test]
    fn test_pressure_scales_refractivity_linearly() {
        let n1 = refractive_index_abs(0.6, 20.0, STANDARD_PRESSURE);
        let n2 = refractive_index_abs(0.6, 20.0, 2.0 * STANDARD_PRESSURE);
        assert_abs_diff_eq!(n2 - 1.0, 2.0 * (n1 - 1.0), epsilon = 1e-15);
    }
}
