//! Derived glass properties: Abbe numbers, partial dispersions and Buchdahl
//! coefficients.
//!
//! All of them are ratios of indices at Fraunhofer lines, so they are
//! computed through [`GlassAt`], a glass bound to one [`Environment`].

use std::fmt;
use std::str::FromStr;

use nalgebra::{Matrix2, Vector2};

use crate::environment::Environment;
use crate::error::OpticsError;
use crate::glass::Glass;
use crate::spectral_line::SpectralLine;

/// Constant of the Buchdahl chromatic coordinate.
const BUCHDAHL_ALPHA: f64 = 2.5;

/// A property reachable through the string-keyed getter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlassProperty {
    Nd,
    Ne,
    Vd,
    Ve,
    PgF,
    PCtPrime,
    Eta1,
    Eta2,
}

impl GlassProperty {
    pub const ALL: [GlassProperty; 8] = [
        GlassProperty::Nd,
        GlassProperty::Ne,
        GlassProperty::Vd,
        GlassProperty::Ve,
        GlassProperty::PgF,
        GlassProperty::PCtPrime,
        GlassProperty::Eta1,
        GlassProperty::Eta2,
    ];

    pub fn key(self) -> &'static str {
        match self {
            GlassProperty::Nd => "nd",
            GlassProperty::Ne => "ne",
            GlassProperty::Vd => "vd",
            GlassProperty::Ve => "ve",
            GlassProperty::PgF => "PgF",
            GlassProperty::PCtPrime => "PCt_",
            GlassProperty::Eta1 => "eta1",
            GlassProperty::Eta2 => "eta2",
        }
    }
}

impl fmt::Display for GlassProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for GlassProperty {
    type Err = OpticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GlassProperty::ALL
            .iter()
            .copied()
            .find(|p| p.key() == s)
            .ok_or_else(|| OpticsError::UnknownProperty(s.to_string()))
    }
}

/// A glass evaluated under a fixed environment.
#[derive(Debug, Clone, Copy)]
pub struct GlassAt<'a> {
    glass: &'a Glass,
    env: Environment,
}

impl<'a> GlassAt<'a> {
    pub fn new(glass: &'a Glass, env: Environment) -> Self {
        Self { glass, env }
    }

    pub fn glass(&self) -> &'a Glass {
        self.glass
    }

    pub fn environment(&self) -> Environment {
        self.env
    }

    /// Index relative to ambient air at `wavelength_um`.
    pub fn refractive_index(&self, wavelength_um: f64) -> f64 {
        self.glass.refractive_index(wavelength_um, &self.env)
    }

    /// Index at a Fraunhofer line.
    pub fn index(&self, line: SpectralLine) -> f64 {
        self.refractive_index(line.wavelength_um())
    }

    /// Index at a line given by label; NaN for unknown labels.
    pub fn index_at(&self, label: &str) -> f64 {
        self.glass.index_at_line(label, &self.env)
    }

    pub fn nd(&self) -> f64 {
        self.index(SpectralLine::D)
    }

    pub fn ne(&self) -> f64 {
        self.index(SpectralLine::E)
    }

    /// Abbe number $v_d = (n_d - 1)/(n_F - n_C)$.
    pub fn vd(&self) -> f64 {
        (self.nd() - 1.0) / self.principal_dispersion()
    }

    /// Abbe number $v_e = (n_e - 1)/(n_{F'} - n_{C'})$.
    pub fn ve(&self) -> f64 {
        (self.ne() - 1.0) / self.principal_dispersion_prime()
    }

    /// Relative partial dispersion $P_{g,F}$.
    pub fn pgf(&self) -> f64 {
        (self.index(SpectralLine::G) - self.index(SpectralLine::F)) / self.principal_dispersion()
    }

    /// Relative partial dispersion $P_{x,y} = (n_x - n_y)/(n_F - n_C)$.
    pub fn pxy(&self, x: &str, y: &str) -> f64 {
        (self.index_at(x) - self.index_at(y)) / self.principal_dispersion()
    }

    /// Relative partial dispersion $P'_{x,y} = (n_x - n_y)/(n_{F'} - n_{C'})$.
    pub fn pxy_prime(&self, x: &str, y: &str) -> f64 {
        (self.index_at(x) - self.index_at(y)) / self.principal_dispersion_prime()
    }

    /// Buchdahl dispersion coefficients $(\eta_1, \eta_2)$.
    ///
    /// With the chromatic coordinate
    /// $\omega = \delta\lambda / (1 + 2.5\,\delta\lambda)$, $\delta\lambda = \lambda - \lambda_d$
    /// in µm, the quadratic model
    /// $n(\lambda) - n_d = (n_d - 1)(\eta_1\omega + \eta_2\omega^2)$ is fitted
    /// exactly through the F and C lines. Returns NaN for a degenerate fit.
    pub fn buchdahl(&self) -> (f64, f64) {
        let omega = |line: SpectralLine| {
            let dl = line.wavelength_um() - SpectralLine::D.wavelength_um();
            dl / (1.0 + BUCHDAHL_ALPHA * dl)
        };
        let omega_f = omega(SpectralLine::F);
        let omega_c = omega(SpectralLine::C);

        let nd = self.nd();
        let a = Matrix2::new(omega_f, omega_f * omega_f, omega_c, omega_c * omega_c);
        let b = Vector2::new(
            self.index(SpectralLine::F) - nd,
            self.index(SpectralLine::C) - nd,
        );

        match a.lu().solve(&b) {
            Some(eta) => (eta[0] / (nd - 1.0), eta[1] / (nd - 1.0)),
            None => (f64::NAN, f64::NAN),
        }
    }

    pub fn eta1(&self) -> f64 {
        self.buchdahl().0
    }

    pub fn eta2(&self) -> f64 {
        self.buchdahl().1
    }

    pub fn value(&self, property: GlassProperty) -> f64 {
        match property {
            GlassProperty::Nd => self.nd(),
            GlassProperty::Ne => self.ne(),
            GlassProperty::Vd => self.vd(),
            GlassProperty::Ve => self.ve(),
            GlassProperty::PgF => self.pgf(),
            GlassProperty::PCtPrime => self.pxy_prime("C", "t"),
            GlassProperty::Eta1 => self.eta1(),
            GlassProperty::Eta2 => self.eta2(),
        }
    }

    /// String-keyed getter. Unknown keys yield NaN, the same signal an
    /// unevaluable formula gives.
    pub fn get_value(&self, key: &str) -> f64 {
        match key.parse::<GlassProperty>() {
            Ok(property) => self.value(property),
            Err(e) => {
                log::warn!("{}: {}", self.glass.name, e);
                f64::NAN
            }
        }
    }

    fn principal_dispersion(&self) -> f64 {
        self.index(SpectralLine::F) - self.index(SpectralLine::C)
    }

    fn principal_dispersion_prime(&self) -> f64 {
        self.index(SpectralLine::FPrime) - self.index(SpectralLine::CPrime)
    }
}
