//! Dispersion formulas published by glass manufacturers.
//!
//! Every formula maps a wavelength in micrometres and a fixed-length
//! coefficient array to the refractive index relative to air at the catalog
//! reference temperature. Coefficient positions follow the vendor convention
//! of each formula; slots a formula does not use are ignored.
//!
//! Formula identifiers 1-12 are the Zemax AGF codes. Identifier 13 is
//! reserved for "unknown" and has no evaluator. Identifiers 14-19 cover the
//! CodeV-style equations only found in XML catalogs.

use serde::{Deserialize, Serialize};

/// Number of dispersion coefficient slots stored per glass.
pub const COEFFICIENT_COUNT: usize = 12;

/// Identifier used for records whose formula could not be resolved.
pub const UNKNOWN_FORMULA_ID: i32 = 13;

/// A named empirical dispersion equation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DispersionFormula {
    Schott,
    Sellmeier1,
    Herzberger,
    Sellmeier2,
    Conrady,
    Sellmeier3,
    HandbookOfOptics1,
    HandbookOfOptics2,
    Sellmeier4,
    Extended1,
    Sellmeier5,
    Extended2,
    Laurent,
    GlassManufacturerLaurent,
    GlassManufacturerSellmeier,
    StandardSellmeier,
    Cauchy,
    Hartman,
}

impl DispersionFormula {
    /// Every supported formula in identifier order.
    pub const ALL: [DispersionFormula; 18] = [
        DispersionFormula::Schott,
        DispersionFormula::Sellmeier1,
        DispersionFormula::Herzberger,
        DispersionFormula::Sellmeier2,
        DispersionFormula::Conrady,
        DispersionFormula::Sellmeier3,
        DispersionFormula::HandbookOfOptics1,
        DispersionFormula::HandbookOfOptics2,
        DispersionFormula::Sellmeier4,
        DispersionFormula::Extended1,
        DispersionFormula::Sellmeier5,
        DispersionFormula::Extended2,
        DispersionFormula::Laurent,
        DispersionFormula::GlassManufacturerLaurent,
        DispersionFormula::GlassManufacturerSellmeier,
        DispersionFormula::StandardSellmeier,
        DispersionFormula::Cauchy,
        DispersionFormula::Hartman,
    ];

    /// Resolve a catalog formula identifier.
    pub fn from_id(id: i32) -> Option<Self> {
        let formula = match id {
            1 => DispersionFormula::Schott,
            2 => DispersionFormula::Sellmeier1,
            3 => DispersionFormula::Herzberger,
            4 => DispersionFormula::Sellmeier2,
            5 => DispersionFormula::Conrady,
            6 => DispersionFormula::Sellmeier3,
            7 => DispersionFormula::HandbookOfOptics1,
            8 => DispersionFormula::HandbookOfOptics2,
            9 => DispersionFormula::Sellmeier4,
            10 => DispersionFormula::Extended1,
            11 => DispersionFormula::Sellmeier5,
            12 => DispersionFormula::Extended2,
            14 => DispersionFormula::Laurent,
            15 => DispersionFormula::GlassManufacturerLaurent,
            16 => DispersionFormula::GlassManufacturerSellmeier,
            17 => DispersionFormula::StandardSellmeier,
            18 => DispersionFormula::Cauchy,
            19 => DispersionFormula::Hartman,
            _ => return None,
        };
        Some(formula)
    }

    /// Catalog identifier of the formula.
    pub fn id(self) -> i32 {
        match self {
            DispersionFormula::Schott => 1,
            DispersionFormula::Sellmeier1 => 2,
            DispersionFormula::Herzberger => 3,
            DispersionFormula::Sellmeier2 => 4,
            DispersionFormula::Conrady => 5,
            DispersionFormula::Sellmeier3 => 6,
            DispersionFormula::HandbookOfOptics1 => 7,
            DispersionFormula::HandbookOfOptics2 => 8,
            DispersionFormula::Sellmeier4 => 9,
            DispersionFormula::Extended1 => 10,
            DispersionFormula::Sellmeier5 => 11,
            DispersionFormula::Extended2 => 12,
            DispersionFormula::Laurent => 14,
            DispersionFormula::GlassManufacturerLaurent => 15,
            DispersionFormula::GlassManufacturerSellmeier => 16,
            DispersionFormula::StandardSellmeier => 17,
            DispersionFormula::Cauchy => 18,
            DispersionFormula::Hartman => 19,
        }
    }

    /// Display name, as shown in catalog listings.
    pub fn name(self) -> &'static str {
        match self {
            DispersionFormula::Schott => "Schott",
            DispersionFormula::Sellmeier1 => "Sellmeier 1",
            DispersionFormula::Herzberger => "Herzberger",
            DispersionFormula::Sellmeier2 => "Sellmeier 2",
            DispersionFormula::Conrady => "Conrady",
            DispersionFormula::Sellmeier3 => "Sellmeier 3",
            DispersionFormula::HandbookOfOptics1 => "Handbook of Optics 1",
            DispersionFormula::HandbookOfOptics2 => "Handbook of Optics 2",
            DispersionFormula::Sellmeier4 => "Sellmeier 4",
            DispersionFormula::Extended1 => "Extended 1",
            DispersionFormula::Sellmeier5 => "Sellmeier 5",
            DispersionFormula::Extended2 => "Extended 2",
            DispersionFormula::Laurent => "Laurent",
            DispersionFormula::GlassManufacturerLaurent => "Glass Manufacturer Laurent",
            DispersionFormula::GlassManufacturerSellmeier => "Glass Manufacturer Sellmeier",
            DispersionFormula::StandardSellmeier => "Standard Sellmeier",
            DispersionFormula::Cauchy => "Cauchy",
            DispersionFormula::Hartman => "Hartman",
        }
    }

    /// Resolve the `EquationType` string used by XML catalogs.
    pub fn from_equation_type(name: &str) -> Option<Self> {
        let formula = match name {
            "Schott" => DispersionFormula::Schott,
            "Sellmeier1" => DispersionFormula::Sellmeier1,
            "Herzberger" => DispersionFormula::Herzberger,
            "Sellmeier2" => DispersionFormula::Sellmeier2,
            "Conrady" => DispersionFormula::Conrady,
            "Sellmeier3" => DispersionFormula::Sellmeier3,
            "HandbookOfOptics1" => DispersionFormula::HandbookOfOptics1,
            "HandbookOfOptics2" => DispersionFormula::HandbookOfOptics2,
            "Sellmeier4" => DispersionFormula::Sellmeier4,
            "Extended1" => DispersionFormula::Extended1,
            "Sellmeier5" => DispersionFormula::Sellmeier5,
            "Extended2" => DispersionFormula::Extended2,
            "Laurent" => DispersionFormula::Laurent,
            "GlassManufacturerLaurent" => DispersionFormula::GlassManufacturerLaurent,
            "GlassManufacturerSellmeier" => DispersionFormula::GlassManufacturerSellmeier,
            "StandardSellmeier" => DispersionFormula::StandardSellmeier,
            "Cauchy" => DispersionFormula::Cauchy,
            "Hartman" => DispersionFormula::Hartman,
            _ => return None,
        };
        Some(formula)
    }

    /// Evaluate the relative refractive index at `wavelength_um`.
    pub fn evaluate(self, wavelength_um: f64, c: &[f64; COEFFICIENT_COUNT]) -> f64 {
        let l = wavelength_um;
        match self {
            DispersionFormula::Schott => schott(l, c),
            DispersionFormula::Sellmeier1 => sellmeier1(l, c),
            DispersionFormula::Herzberger => herzberger(l, c),
            DispersionFormula::Sellmeier2 => sellmeier2(l, c),
            DispersionFormula::Conrady => conrady(l, c),
            DispersionFormula::Sellmeier3 => sellmeier3(l, c),
            DispersionFormula::HandbookOfOptics1 => handbook_of_optics1(l, c),
            DispersionFormula::HandbookOfOptics2 => handbook_of_optics2(l, c),
            DispersionFormula::Sellmeier4 => sellmeier4(l, c),
            DispersionFormula::Extended1 => extended1(l, c),
            DispersionFormula::Sellmeier5 => sellmeier5(l, c),
            DispersionFormula::Extended2 => extended2(l, c),
            DispersionFormula::Laurent => laurent(l, c),
            DispersionFormula::GlassManufacturerLaurent => glass_manufacturer_laurent(l, c),
            DispersionFormula::GlassManufacturerSellmeier => glass_manufacturer_sellmeier(l, c),
            DispersionFormula::StandardSellmeier => standard_sellmeier(l, c),
            DispersionFormula::Cauchy => cauchy(l, c),
            DispersionFormula::Hartman => hartman(l, c),
        }
    }
}

/// $n^2 = A_0 + A_1\lambda^2 + A_2\lambda^{-2} + A_3\lambda^{-4} + A_4\lambda^{-6} + A_5\lambda^{-8}$
pub fn schott(l: f64, c: &[f64; COEFFICIENT_COUNT]) -> f64 {
    let l2 = l * l;
    (c[0] + c[1] * l2 + c[2] / l2 + c[3] / l2.powi(2) + c[4] / l2.powi(3) + c[5] / l2.powi(4))
        .sqrt()
}

/// $n^2 - 1 = \sum_{i=1}^{3} K_i\lambda^2/(\lambda^2 - L_i)$, coefficients `K1 L1 K2 L2 K3 L3`.
pub fn sellmeier1(l: f64, c: &[f64; COEFFICIENT_COUNT]) -> f64 {
    let l2 = l * l;
    (1.0 + c[0] * l2 / (l2 - c[1]) + c[2] * l2 / (l2 - c[3]) + c[4] * l2 / (l2 - c[5])).sqrt()
}

/// $n = A + BL + CL^2 + D\lambda^2 + E\lambda^4 + F\lambda^6$ with $L = 1/(\lambda^2 - 0.028)$.
pub fn herzberger(l: f64, c: &[f64; COEFFICIENT_COUNT]) -> f64 {
    let l2 = l * l;
    let big_l = 1.0 / (l2 - 0.028);
    c[0] + c[1] * big_l + c[2] * big_l * big_l + c[3] * l2 + c[4] * l2 * l2 + c[5] * l2.powi(3)
}

/// $n^2 - 1 = A + B_1\lambda^2/(\lambda^2 - \lambda_1^2) + B_2/(\lambda^2 - \lambda_2^2)$
pub fn sellmeier2(l: f64, c: &[f64; COEFFICIENT_COUNT]) -> f64 {
    let l2 = l * l;
    (1.0 + c[0] + c[1] * l2 / (l2 - c[2] * c[2]) + c[3] / (l2 - c[4] * c[4])).sqrt()
}

/// $n = n_0 + A/\lambda + B/\lambda^{3.5}$
pub fn conrady(l: f64, c: &[f64; COEFFICIENT_COUNT]) -> f64 {
    c[0] + c[1] / l + c[2] / l.powf(3.5)
}

/// Four-term Sellmeier, coefficients `K1 L1 .. K4 L4`.
pub fn sellmeier3(l: f64, c: &[f64; COEFFICIENT_COUNT]) -> f64 {
    let l2 = l * l;
    (1.0 + c[0] * l2 / (l2 - c[1])
        + c[2] * l2 / (l2 - c[3])
        + c[4] * l2 / (l2 - c[5])
        + c[6] * l2 / (l2 - c[7]))
        .sqrt()
}

/// $n^2 = A + B/(\lambda^2 - C) - D\lambda^2$
pub fn handbook_of_optics1(l: f64, c: &[f64; COEFFICIENT_COUNT]) -> f64 {
    let l2 = l * l;
    (c[0] + c[1] / (l2 - c[2]) - c[3] * l2).sqrt()
}

/// $n^2 = A + B\lambda^2/(\lambda^2 - C) - D\lambda^2$
pub fn handbook_of_optics2(l: f64, c: &[f64; COEFFICIENT_COUNT]) -> f64 {
    let l2 = l * l;
    (c[0] + c[1] * l2 / (l2 - c[2]) - c[3] * l2).sqrt()
}

/// $n^2 = A + B\lambda^2/(\lambda^2 - C) + D\lambda^2/(\lambda^2 - E)$
pub fn sellmeier4(l: f64, c: &[f64; COEFFICIENT_COUNT]) -> f64 {
    let l2 = l * l;
    (c[0] + c[1] * l2 / (l2 - c[2]) + c[3] * l2 / (l2 - c[4])).sqrt()
}

/// Schott series extended with $\lambda^{-10}$ and $\lambda^{-12}$ terms.
pub fn extended1(l: f64, c: &[f64; COEFFICIENT_COUNT]) -> f64 {
    let l2 = l * l;
    (c[0]
        + c[1] * l2
        + c[2] / l2
        + c[3] / l2.powi(2)
        + c[4] / l2.powi(3)
        + c[5] / l2.powi(4)
        + c[6] / l2.powi(5)
        + c[7] / l2.powi(6))
    .sqrt()
}

/// Five-term Sellmeier, coefficients `K1 L1 .. K5 L5`.
pub fn sellmeier5(l: f64, c: &[f64; COEFFICIENT_COUNT]) -> f64 {
    let l2 = l * l;
    (1.0 + c[0] * l2 / (l2 - c[1])
        + c[2] * l2 / (l2 - c[3])
        + c[4] * l2 / (l2 - c[5])
        + c[6] * l2 / (l2 - c[7])
        + c[8] * l2 / (l2 - c[9]))
        .sqrt()
}

/// Schott series extended with $\lambda^4$ and $\lambda^6$ terms.
pub fn extended2(l: f64, c: &[f64; COEFFICIENT_COUNT]) -> f64 {
    let l2 = l * l;
    (c[0]
        + c[1] * l2
        + c[2] / l2
        + c[3] / l2.powi(2)
        + c[4] / l2.powi(3)
        + c[5] / l2.powi(4)
        + c[6] * l2.powi(2)
        + c[7] * l2.powi(3))
    .sqrt()
}

/// $n^2 = A_0 + A_1\lambda^2 + \sum_{k=2}^{11} A_k\lambda^{-2(k-1)}$
pub fn laurent(l: f64, c: &[f64; COEFFICIENT_COUNT]) -> f64 {
    let l2 = l * l;
    let mut n_sq = c[0] + c[1] * l2;
    let mut inv = 1.0;
    for coef in &c[2..] {
        inv /= l2;
        n_sq += coef * inv;
    }
    n_sq.sqrt()
}

/// $n^2 = A_0 + A_1\lambda^2 + A_2\lambda^{-2} + \dots + A_9\lambda^{-16}$
pub fn glass_manufacturer_laurent(l: f64, c: &[f64; COEFFICIENT_COUNT]) -> f64 {
    let l2 = l * l;
    (c[0]
        + c[1] * l2
        + c[2] / l2
        + c[3] / l2.powi(2)
        + c[4] / l2.powi(3)
        + c[5] / l2.powi(4)
        + c[6] / l2.powi(5)
        + c[7] / l2.powi(6)
        + c[8] / l2.powi(7)
        + c[9] / l2.powi(8))
    .sqrt()
}

/// Three-term Sellmeier with coefficients grouped `B1 B2 B3 C1 C2 C3`.
pub fn glass_manufacturer_sellmeier(l: f64, c: &[f64; COEFFICIENT_COUNT]) -> f64 {
    let l2 = l * l;
    (1.0 + c[0] * l2 / (l2 - c[3]) + c[1] * l2 / (l2 - c[4]) + c[2] * l2 / (l2 - c[5])).sqrt()
}

/// $n^2 - 1 = \sum_{i=1}^{6} B_i\lambda^2/(\lambda^2 - \lambda_i^2)$, resonance wavelengths unsquared.
pub fn standard_sellmeier(l: f64, c: &[f64; COEFFICIENT_COUNT]) -> f64 {
    let l2 = l * l;
    let sum: f64 = c
        .chunks_exact(2)
        .map(|term| term[0] * l2 / (l2 - term[1] * term[1]))
        .sum();
    (1.0 + sum).sqrt()
}

/// $n = A + B\lambda^{-2} + C\lambda^{-4}$
pub fn cauchy(l: f64, c: &[f64; COEFFICIENT_COUNT]) -> f64 {
    let l2 = l * l;
    c[0] + c[1] / l2 + c[2] / (l2 * l2)
}

/// $n = n_0 + C/(\lambda - \lambda_0)^{1.2}$
pub fn hartman(l: f64, c: &[f64; COEFFICIENT_COUNT]) -> f64 {
    c[0] + c[1] / (l - c[2]).powf(1.2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    /// N-BK7, Sellmeier 1 coefficients as published by SCHOTT.
    const NBK7_SELLMEIER: [f64; 12] = [
        1.03961212, 0.00600069867, 0.231792344, 0.0200179144, 1.01046945, 103.560653,
        0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
    ];

    /// BK7, legacy Schott formula coefficients.
    const BK7_SCHOTT: [f64; 12] = [
        2.2718929, -0.010108077, 0.010592509, 0.00020816965, -7.6472538e-6, 4.9240991e-7,
        0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
    ];

    const D_LINE: f64 = 0.587562;

    #[test]
    fn test_published_nd_is_reproduced() {
        assert_abs_diff_eq!(sellmeier1(D_LINE, &NBK7_SELLMEIER), 1.5168, epsilon = 1e-4);
        assert_abs_diff_eq!(schott(D_LINE, &BK7_SCHOTT), 1.5168, epsilon = 1e-4);
    }

    #[test]
    fn test_id_round_trip() {
        for formula in DispersionFormula::ALL {
            assert_eq!(DispersionFormula::from_id(formula.id()), Some(formula));
        }
        assert_eq!(DispersionFormula::from_id(UNKNOWN_FORMULA_ID), None);
        assert_eq!(DispersionFormula::from_id(0), None);
        assert_eq!(DispersionFormula::from_id(99), None);
    }

    #[test]
    fn test_sellmeier_family_agrees() {
        let c = NBK7_SELLMEIER;
        let expected = sellmeier1(D_LINE, &c);

        // Extra terms left at zero
        assert_abs_diff_eq!(sellmeier3(D_LINE, &c), expected, epsilon = 1e-14);
        assert_abs_diff_eq!(sellmeier5(D_LINE, &c), expected, epsilon = 1e-14);

        // B1 B2 B3 C1 C2 C3 ordering
        let mut grouped = [0.0; 12];
        grouped[..6].copy_from_slice(&[c[0], c[2], c[4], c[1], c[3], c[5]]);
        assert_abs_diff_eq!(glass_manufacturer_sellmeier(D_LINE, &grouped), expected, epsilon = 1e-14);

        // Resonances given as wavelengths rather than squared wavelengths
        let mut standard = [0.0; 12];
        standard[..6].copy_from_slice(&[c[0], c[1].sqrt(), c[2], c[3].sqrt(), c[4], c[5].sqrt()]);
        assert_abs_diff_eq!(standard_sellmeier(D_LINE, &standard), expected, epsilon = 1e-12);

        // n^2 = 1 + sum, written with an explicit constant term
        let mut s4 = [0.0; 12];
        s4[..5].copy_from_slice(&[1.0, c[0], c[1], c[2], c[3]]);
        let two_term = (1.0 + c[0] * D_LINE.powi(2) / (D_LINE.powi(2) - c[1])
            + c[2] * D_LINE.powi(2) / (D_LINE.powi(2) - c[3]))
            .sqrt();
        assert_abs_diff_eq!(sellmeier4(D_LINE, &s4), two_term, epsilon = 1e-14);
    }

    #[test]
    fn test_schott_family_agrees() {
        let c = BK7_SCHOTT;
        let expected = schott(D_LINE, &c);
        assert_abs_diff_eq!(extended1(D_LINE, &c), expected, epsilon = 1e-14);
        assert_abs_diff_eq!(extended2(D_LINE, &c), expected, epsilon = 1e-14);
        assert_abs_diff_eq!(glass_manufacturer_laurent(D_LINE, &c), expected, epsilon = 1e-14);
        assert_abs_diff_eq!(laurent(D_LINE, &c), expected, epsilon = 1e-14);
    }

    #[test]
    fn test_closed_form_polynomials() {
        let mut c = [0.0; 12];
        c[..3].copy_from_slice(&[1.5, 0.004, 0.0001]);
        let l: f64 = 0.5;
        assert_abs_diff_eq!(cauchy(l, &c), 1.5 + 0.004 / 0.25 + 0.0001 / 0.0625, epsilon = 1e-15);
        assert_abs_diff_eq!(
            conrady(l, &c),
            1.5 + 0.004 / 0.5 + 0.0001 / l.powf(3.5),
            epsilon = 1e-15
        );

        let mut h = [0.0; 12];
        h[..3].copy_from_slice(&[1.45, 0.01, 0.2]);
        assert_abs_diff_eq!(hartman(l, &h), 1.45 + 0.01 / 0.3_f64.powf(1.2), epsilon = 1e-15);

        let mut hz = [0.0; 12];
        hz[0] = 1.5;
        hz[1] = 0.01;
        assert_abs_diff_eq!(herzberger(l, &hz), 1.5 + 0.01 / (0.25 - 0.028), epsilon = 1e-15);
    }

    #[test]
    fn test_handbook_formulas() {
        let mut c = [0.0; 12];
        c[..4].copy_from_slice(&[2.0, 0.02, 0.01, 0.01]);
        let l = 0.6;
        let l2 = l * l;
        assert_abs_diff_eq!(
            handbook_of_optics1(l, &c),
            (2.0 + 0.02 / (l2 - 0.01) - 0.01 * l2).sqrt(),
            epsilon = 1e-15
        );
        assert_abs_diff_eq!(
            handbook_of_optics2(l, &c),
            (2.0 + 0.02 * l2 / (l2 - 0.01) - 0.01 * l2).sqrt(),
            epsilon = 1e-15
        );
    }

    /// Coefficient array with the given leading values, zero-filled.
    fn coefs(values: &[f64]) -> [f64; 12] {
        let mut c = [0.0; 12];
        c[..values.len()].copy_from_slice(values);
        c
    }

    // Every slot carries a nonzero value so that each term contributes.
    // Expected values were evaluated independently in double precision.
    const L: f64 = 0.55;

    #[test]
    fn test_herzberger_all_terms() {
        let c = coefs(&[1.5, 0.01, 0.002, -0.003, 0.0004, -0.00005]);
        assert_abs_diff_eq!(herzberger(L, &c), 1.5621003031641043, epsilon = 1e-13);
    }

    #[test]
    fn test_sellmeier2_all_terms() {
        let c = coefs(&[0.3, 1.1, 0.1, 0.02, 0.15]);
        let l2 = L * L;
        let expanded = (1.0 + 0.3 + 1.1 * l2 / (l2 - 0.01) + 0.02 / (l2 - 0.0225)).sqrt();
        assert_abs_diff_eq!(sellmeier2(L, &c), expanded, epsilon = 1e-14);
        assert_abs_diff_eq!(sellmeier2(L, &c), 1.5839935003134986, epsilon = 1e-13);
    }

    #[test]
    fn test_sellmeier3_all_terms() {
        let c = coefs(&[0.6, 0.005, 0.2, 0.02, 0.5, 90.0, 0.3, 0.04]);
        assert_abs_diff_eq!(sellmeier3(L, &c), 1.4725051403048635, epsilon = 1e-13);
    }

    #[test]
    fn test_sellmeier5_all_terms() {
        let c = coefs(&[0.5, 0.005, 0.2, 0.02, 0.4, 90.0, 0.2, 0.04, 0.1, 0.06]);
        assert_abs_diff_eq!(sellmeier5(L, &c), 1.4409830441008862, epsilon = 1e-13);
    }

    #[test]
    fn test_split_resonances_reproduce_nd() {
        // N-BK7 with its first resonance split across two equal terms
        let c = NBK7_SELLMEIER;
        let half = c[0] / 2.0;
        let s3 = coefs(&[half, c[1], c[2], c[3], c[4], c[5], half, c[1]]);
        assert_abs_diff_eq!(sellmeier3(D_LINE, &s3), 1.5168, epsilon = 1e-4);

        let third = c[4] / 3.0;
        let s5 = coefs(&[c[0], c[1], c[2], c[3], third, c[5], third, c[5], third, c[5]]);
        assert_abs_diff_eq!(sellmeier5(D_LINE, &s5), 1.5168, epsilon = 1e-4);
    }

    #[test]
    fn test_extended1_all_terms() {
        let c = coefs(&[2.27, -0.01, 0.0106, 2e-4, -7e-6, 5e-7, 3e-8, -2e-9]);
        assert_abs_diff_eq!(extended1(L, &c), 1.5178992152515967, epsilon = 1e-13);
    }

    #[test]
    fn test_extended2_all_terms() {
        let c = coefs(&[2.27, -0.01, 0.0106, 2e-4, -7e-6, 5e-7, 0.003, -0.002]);
        let l2 = L * L;
        let expanded = (2.27 - 0.01 * l2 + 0.0106 / l2 + 2e-4 / (l2 * l2) - 7e-6 / (l2 * l2 * l2)
            + 5e-7 / (l2 * l2 * l2 * l2)
            + 0.003 * l2 * l2
            - 0.002 * l2 * l2 * l2)
            .sqrt();
        assert_abs_diff_eq!(extended2(L, &c), expanded, epsilon = 1e-14);
        assert_abs_diff_eq!(extended2(L, &c), 1.5179683631301315, epsilon = 1e-13);
    }

    #[test]
    fn test_laurent_all_terms() {
        let c = [
            2.27, -0.01, 0.0106, 2e-4, -7e-6, 5e-7, 3e-8, -2e-9, 1e-10, -5e-12, 2e-13, -1e-14,
        ];
        assert_abs_diff_eq!(laurent(L, &c), 1.517899336471877, epsilon = 1e-13);
        // Only the first ten slots are read
        assert_abs_diff_eq!(
            glass_manufacturer_laurent(L, &c),
            1.5178993338791031,
            epsilon = 1e-13
        );
    }

    #[test]
    fn test_equation_type_names() {
        assert_eq!(
            DispersionFormula::from_equation_type("GlassManufacturerSellmeier"),
            Some(DispersionFormula::GlassManufacturerSellmeier)
        );
        assert_eq!(DispersionFormula::from_equation_type("Polynomial"), None);
    }
}
