//! A single optical glass record and its index computations.
//!
//! The catalog dispersion formula gives the index relative to air at the
//! catalog reference temperature $T_0$. [`Glass::refractive_index`] turns
//! that into the index relative to air at the ambient [`Environment`]:
//!
//! 1. the nominal wavelength is rescaled into reference-air wavelength,
//!    $\lambda_0 = \lambda\, n_{\text{air}}(T, P) / n_{\text{air}}(T_0, P_0)$;
//! 2. the formula is evaluated at $\lambda_0$ and multiplied by
//!    $n_{\text{air}}(T_0, P_0)$ to obtain the absolute index;
//! 3. the Schott thermal shift $\Delta n_{\text{abs}}(T, \lambda_0)$ is added;
//! 4. the result is divided by $n_{\text{air}}(T, P)$.
//!
//! Glasses without thermal data skip all of this and report the formula
//! value unchanged, so their index never depends on the environment.

use serde::{Deserialize, Serialize};

use crate::air::{self, STANDARD_PRESSURE};
use crate::dispersion::{DispersionFormula, COEFFICIENT_COUNT, UNKNOWN_FORMULA_ID};
use crate::environment::Environment;
use crate::properties::GlassAt;
use crate::spectral_line;
use crate::spline::CubicSpline;

/// Number of thermal coefficients: D0, D1, D2, E0, E1, λtk, Tref.
pub const THERMAL_COEFFICIENT_COUNT: usize = 7;

/// Catalog reference temperature used when a record carries none (°C).
pub const DEFAULT_REFERENCE_TEMPERATURE: f64 = 25.0;

const DEFAULT_THERMAL_COEFS: [f64; THERMAL_COEFFICIENT_COUNT] =
    [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, DEFAULT_REFERENCE_TEMPERATURE];

/// Availability status printed in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GlassStatus {
    Standard,
    Preferred,
    Obsolete,
    Special,
    Melt,
    #[default]
    Unknown,
}

impl GlassStatus {
    /// Map the numeric AGF status code.
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => GlassStatus::Standard,
            1 => GlassStatus::Preferred,
            2 => GlassStatus::Obsolete,
            3 => GlassStatus::Special,
            4 => GlassStatus::Melt,
            _ => GlassStatus::Unknown,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            GlassStatus::Standard => "Standard",
            GlassStatus::Preferred => "Preferred",
            GlassStatus::Obsolete => "Obsolete",
            GlassStatus::Special => "Special",
            GlassStatus::Melt => "Melt",
            GlassStatus::Unknown => "Unknown",
        }
    }
}

/// One internal transmittance measurement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransmittanceSample {
    /// Wavelength (µm).
    pub wavelength_um: f64,
    /// Internal transmittance in [0, 1].
    pub transmittance: f64,
    /// Sample thickness the measurement refers to (mm).
    pub thickness_mm: f64,
}

/// An optical glass as described by one catalog record.
///
/// Identity and durability fields are plain data; every "no data" value is
/// NaN. Dispersion, thermal and transmittance data go through methods that
/// keep the formula tag, the coefficient arrays and the thermal flag
/// consistent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Glass {
    pub name: String,
    pub supplier: String,
    /// MIL numeric code (e.g. 517642).
    pub mil: f64,
    pub comment: String,
    pub status: GlassStatus,

    /// nd as printed in the catalog (not computed).
    pub catalog_nd: f64,
    /// vd as printed in the catalog (not computed).
    pub catalog_vd: f64,
    pub exclude_substitution: bool,
    pub melt_frequency: f64,
    /// Density (g/cm³).
    pub density: f64,
    /// Deviation of PgF from the normal line.
    pub delta_pgf: f64,

    /// Thermal expansion coefficient, -30..+70 °C (1e-6/K).
    pub low_tce: f64,
    /// Thermal expansion coefficient, +100..+300 °C (1e-6/K).
    pub high_tce: f64,
    pub relative_cost: f64,
    pub climate_resist: f64,
    pub stain_resist: f64,
    pub acid_resist: f64,
    pub alkali_resist: f64,
    pub phosphate_resist: f64,

    /// Lower bound of the published transmission range (µm).
    pub lambda_min: f64,
    /// Upper bound of the published transmission range (µm).
    pub lambda_max: f64,

    formula_id: i32,
    formula: Option<DispersionFormula>,
    dispersion_coefs: [f64; COEFFICIENT_COUNT],

    has_thermal_data: bool,
    thermal_coefs: [f64; THERMAL_COEFFICIENT_COUNT],

    transmittance: Vec<TransmittanceSample>,
}

impl Default for Glass {
    fn default() -> Self {
        Self {
            name: String::new(),
            supplier: String::new(),
            mil: f64::NAN,
            comment: String::new(),
            status: GlassStatus::Unknown,
            catalog_nd: f64::NAN,
            catalog_vd: f64::NAN,
            exclude_substitution: false,
            melt_frequency: f64::NAN,
            density: f64::NAN,
            delta_pgf: f64::NAN,
            low_tce: f64::NAN,
            high_tce: f64::NAN,
            relative_cost: f64::NAN,
            climate_resist: f64::NAN,
            stain_resist: f64::NAN,
            acid_resist: f64::NAN,
            alkali_resist: f64::NAN,
            phosphate_resist: f64::NAN,
            lambda_min: f64::NAN,
            lambda_max: f64::NAN,
            formula_id: UNKNOWN_FORMULA_ID,
            formula: None,
            dispersion_coefs: [0.0; COEFFICIENT_COUNT],
            has_thermal_data: false,
            thermal_coefs: DEFAULT_THERMAL_COEFS,
            transmittance: Vec::new(),
        }
    }
}

enum Interpolant {
    Constant(f64),
    Spline(CubicSpline),
}

impl Glass {
    /// Create an empty record with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    // ── Dispersion data ───────────────────────────────────────────────

    /// Set the formula by catalog identifier.
    ///
    /// Returns `false` when the identifier is unknown; the record then has
    /// no evaluator and every index it reports is NaN.
    pub fn set_formula_id(&mut self, id: i32) -> bool {
        self.formula_id = id;
        self.formula = DispersionFormula::from_id(id);
        self.formula.is_some()
    }

    pub fn set_formula(&mut self, formula: Option<DispersionFormula>) {
        self.formula_id = formula.map_or(UNKNOWN_FORMULA_ID, DispersionFormula::id);
        self.formula = formula;
    }

    pub fn formula(&self) -> Option<DispersionFormula> {
        self.formula
    }

    /// Raw identifier as read from the catalog, even when unknown.
    pub fn formula_id(&self) -> i32 {
        self.formula_id
    }

    pub fn formula_name(&self) -> &'static str {
        self.formula.map_or("Unknown", DispersionFormula::name)
    }

    /// Replace the dispersion coefficients by position. Slots beyond the
    /// given values are reset to 0.0; values beyond the 12th are ignored.
    pub fn set_dispersion_data(&mut self, coefs: &[f64]) {
        self.dispersion_coefs = [0.0; COEFFICIENT_COUNT];
        for (slot, value) in self.dispersion_coefs.iter_mut().zip(coefs) {
            *slot = *value;
        }
    }

    pub fn dispersion_coefs(&self) -> &[f64; COEFFICIENT_COUNT] {
        &self.dispersion_coefs
    }

    pub fn dispersion_coef(&self, index: usize) -> Option<f64> {
        self.dispersion_coefs.get(index).copied()
    }

    pub fn dispersion_coef_count(&self) -> usize {
        self.dispersion_coefs.len()
    }

    // ── Thermal data ──────────────────────────────────────────────────

    /// Store D0, D1, D2, E0, E1, λtk and Tref and mark the record as
    /// having thermal data.
    pub fn set_thermal_data(&mut self, coefs: [f64; THERMAL_COEFFICIENT_COUNT]) {
        self.thermal_coefs = coefs;
        self.has_thermal_data = true;
    }

    /// Drop any thermal data and restore the default reference temperature.
    pub fn clear_thermal_data(&mut self) {
        self.thermal_coefs = DEFAULT_THERMAL_COEFS;
        self.has_thermal_data = false;
    }

    pub fn has_thermal_data(&self) -> bool {
        self.has_thermal_data
    }

    pub fn thermal_coefs(&self) -> &[f64; THERMAL_COEFFICIENT_COUNT] {
        &self.thermal_coefs
    }

    pub fn d0(&self) -> f64 {
        self.thermal_coefs[0]
    }

    pub fn d1(&self) -> f64 {
        self.thermal_coefs[1]
    }

    pub fn d2(&self) -> f64 {
        self.thermal_coefs[2]
    }

    pub fn e0(&self) -> f64 {
        self.thermal_coefs[3]
    }

    pub fn e1(&self) -> f64 {
        self.thermal_coefs[4]
    }

    pub fn ltk(&self) -> f64 {
        self.thermal_coefs[5]
    }

    /// Reference temperature of the dispersion formula (°C).
    pub fn tref(&self) -> f64 {
        self.thermal_coefs[6]
    }

    // ── Transmittance data ────────────────────────────────────────────

    pub fn push_transmittance(&mut self, sample: TransmittanceSample) {
        self.transmittance.push(sample);
    }

    /// Samples in catalog order.
    pub fn transmittance_data(&self) -> &[TransmittanceSample] {
        &self.transmittance
    }

    // ── Index computations ────────────────────────────────────────────

    /// Dispersion formula value at the reference temperature, relative to
    /// reference air. NaN if the record has no known formula.
    pub fn refractive_index_rel_tref(&self, wavelength_um: f64) -> f64 {
        match self.formula {
            Some(formula) => formula.evaluate(wavelength_um, &self.dispersion_coefs),
            None => f64::NAN,
        }
    }

    /// Absolute index at the reference temperature and standard pressure.
    pub fn refractive_index_abs_tref(&self, wavelength_um: f64) -> f64 {
        self.refractive_index_rel_tref(wavelength_um)
            * air::refractive_index_abs(wavelength_um, self.tref(), STANDARD_PRESSURE)
    }

    /// Change of the absolute index between Tref and `temperature` (Schott
    /// model). Zero for records without thermal data.
    ///
    /// $$\Delta n_{\text{abs}} = \frac{n^2 - 1}{2n}\left(D_0\Delta T + D_1\Delta T^2
    ///   + D_2\Delta T^3 + \frac{E_0\Delta T + E_1\Delta T^2}{\lambda^2 - \lambda_{tk}^2}\right)$$
    pub fn delta_n_abs(&self, temperature: f64, wavelength_um: f64) -> f64 {
        if !self.has_thermal_data {
            return 0.0;
        }
        let n = self.refractive_index_rel_tref(wavelength_um);
        let dt = temperature - self.tref();
        let dispersion_term =
            (self.e0() * dt + self.e1() * dt * dt) / (wavelength_um.powi(2) - self.ltk().powi(2));
        (n * n - 1.0) / (2.0 * n)
            * (self.d0() * dt + self.d1() * dt * dt + self.d2() * dt.powi(3) + dispersion_term)
    }

    /// Temperature coefficient of the absolute index, $dn_{\text{abs}}/dT$
    /// (1/K), at `temperature`. Zero for records without thermal data.
    pub fn dn_dt_abs(&self, temperature: f64, wavelength_um: f64) -> f64 {
        if !self.has_thermal_data {
            return 0.0;
        }
        let n = self.refractive_index_rel_tref(wavelength_um);
        let dt = temperature - self.tref();
        let dispersion_term =
            (self.e0() + 2.0 * self.e1() * dt) / (wavelength_um.powi(2) - self.ltk().powi(2));
        (n * n - 1.0) / (2.0 * n)
            * (self.d0() + 2.0 * self.d1() * dt + 3.0 * self.d2() * dt * dt + dispersion_term)
    }

    /// Convert a wavelength measured in ambient air into the wavelength in
    /// reference air the dispersion formula expects.
    pub fn relative_wavelength(&self, wavelength_um: f64, env: &Environment) -> f64 {
        wavelength_um * air::refractive_index_abs(wavelength_um, env.temperature, env.pressure)
            / air::refractive_index_abs(wavelength_um, self.tref(), STANDARD_PRESSURE)
    }

    /// Index relative to ambient air at `wavelength_um` (µm).
    pub fn refractive_index(&self, wavelength_um: f64, env: &Environment) -> f64 {
        if !self.has_thermal_data {
            return self.refractive_index_rel_tref(wavelength_um);
        }
        let lambda_ref = self.relative_wavelength(wavelength_um, env);
        let n_abs = self.refractive_index_abs_tref(lambda_ref)
            + self.delta_n_abs(env.temperature, lambda_ref);
        n_abs / air::refractive_index_abs(wavelength_um, env.temperature, env.pressure)
    }

    /// Index at a Fraunhofer line given by label (`"d"`, `"F_"`, ...).
    /// Unknown labels yield NaN.
    pub fn index_at_line(&self, label: &str, env: &Environment) -> f64 {
        self.refractive_index(spectral_line::wavelength(label) / 1000.0, env)
    }

    /// Bind this glass to an environment for derived quantities.
    pub fn at(&self, env: Environment) -> GlassAt<'_> {
        GlassAt::new(self, env)
    }

    // ── Transmittance ─────────────────────────────────────────────────

    /// Internal transmittance at `wavelength_um` for a sample of
    /// `thickness_mm`.
    ///
    /// Catalog values are first rescaled to the requested thickness with
    /// $\tau^{t/t_{\text{ref}}}$, where $t_{\text{ref}}$ is the thickness of
    /// the first sample, and then interpolated with a cubic spline. NaN when
    /// the record has no transmittance data.
    pub fn transmittance(&self, wavelength_um: f64, thickness_mm: f64) -> f64 {
        match self.transmittance_interpolant(thickness_mm) {
            Some(Interpolant::Spline(spline)) => {
                self.warn_if_extrapolated(&spline, wavelength_um);
                spline.evaluate(wavelength_um)
            }
            Some(Interpolant::Constant(value)) => value,
            None => f64::NAN,
        }
    }

    /// Transmittance at several wavelengths, building the spline once.
    pub fn transmittance_many(&self, wavelengths_um: &[f64], thickness_mm: f64) -> Vec<f64> {
        match self.transmittance_interpolant(thickness_mm) {
            Some(Interpolant::Spline(spline)) => wavelengths_um
                .iter()
                .map(|&l| {
                    self.warn_if_extrapolated(&spline, l);
                    spline.evaluate(l)
                })
                .collect(),
            Some(Interpolant::Constant(value)) => vec![value; wavelengths_um.len()],
            None => vec![f64::NAN; wavelengths_um.len()],
        }
    }

    /// Wavelength span (µm) covered by the transmittance samples; `None`
    /// without data. Queries outside it are extrapolated.
    pub fn transmittance_range(&self) -> Option<(f64, f64)> {
        match self.transmittance_interpolant(1.0)? {
            Interpolant::Spline(spline) => Some(spline.domain()),
            Interpolant::Constant(_) => self
                .transmittance
                .iter()
                .map(|s| s.wavelength_um)
                .find(|l| l.is_finite())
                .map(|l| (l, l)),
        }
    }

    fn warn_if_extrapolated(&self, spline: &CubicSpline, wavelength_um: f64) {
        let (lo, hi) = spline.domain();
        if wavelength_um < lo || wavelength_um > hi {
            log::warn!(
                "{}: transmittance at {} µm extrapolated outside sampled range {}..{} µm",
                self.name,
                wavelength_um,
                lo,
                hi
            );
        }
    }

    fn transmittance_interpolant(&self, thickness_mm: f64) -> Option<Interpolant> {
        let reference = self.transmittance.first()?.thickness_mm;
        let exponent = thickness_mm / reference;

        let mut samples: Vec<(f64, f64)> = self
            .transmittance
            .iter()
            .filter(|s| s.wavelength_um.is_finite())
            .map(|s| (s.wavelength_um, s.transmittance.powf(exponent)))
            .collect();
        samples.sort_by(|a, b| a.0.total_cmp(&b.0));
        samples.dedup_by(|later, earlier| later.0 == earlier.0);

        match samples.len() {
            0 => None,
            1 => Some(Interpolant::Constant(samples[0].1)),
            _ => {
                let (xs, ys): (Vec<f64>, Vec<f64>) = samples.into_iter().unzip();
                match CubicSpline::new(xs, ys) {
                    Ok(spline) => Some(Interpolant::Spline(spline)),
                    Err(e) => {
                        log::warn!("{}: transmittance spline not built: {}", self.name, e);
                        None
                    }
                }
            }
        }
    }
}
