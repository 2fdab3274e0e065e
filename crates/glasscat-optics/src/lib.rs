//! # Glasscat Optics
//!
//! Optical property engine for catalog glasses. A [`Glass`](glass::Glass)
//! stores what a vendor catalog publishes (dispersion formula and
//! coefficients, thermal constants, transmittance samples, durability data)
//! and derives refractive indices under arbitrary ambient conditions.
//!
//! ## Modules
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`spectral_line`] | Fraunhofer line wavelengths |
//! | [`air`] | Absolute refractive index of air |
//! | [`dispersion`] | The 18 vendor dispersion formulas |
//! | [`glass`] | Glass record, air and thermal correction pipeline, transmittance |
//! | [`properties`] | Abbe numbers, partial dispersions, Buchdahl coefficients |
//! | [`environment`] | Ambient temperature and pressure |
//! | [`spline`] | Natural cubic spline used for transmittance curves |
//!
//! ## Temperature
//!
//! There is no global temperature setting. Every index query takes an
//! [`Environment`](environment::Environment); glasses without thermal data
//! give the same index under every environment.

pub mod air;
pub mod dispersion;
pub mod environment;
pub mod error;
pub mod glass;
pub mod properties;
pub mod spectral_line;
pub mod spline;

pub use dispersion::DispersionFormula;
pub use environment::Environment;
pub use error::OpticsError;
pub use glass::{Glass, GlassStatus, TransmittanceSample};
pub use properties::{GlassAt, GlassProperty};
pub use spectral_line::SpectralLine;
