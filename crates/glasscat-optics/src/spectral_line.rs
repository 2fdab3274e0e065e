//! Fraunhofer spectral lines.
//!
//! Glass catalogs quote indices and dispersions at a fixed set of named
//! emission lines. Labels with a trailing underscore denote the primed lines
//! (`C_` = C', `F_` = F') used by the e-line based quantities.
//!
//! | Label | Element | Wavelength (nm) |
//! |-------|---------|-----------------|
//! | `t`  | Hg IR | 1013.98 |
//! | `s`  | Cs    | 852.11  |
//! | `r`  | He    | 706.519 |
//! | `C`  | H     | 656.273 |
//! | `C_` | Cd    | 643.847 |
//! | `D`  | Na    | 589.294 |
//! | `d`  | He    | 587.562 |
//! | `e`  | Hg    | 546.074 |
//! | `F`  | H     | 486.133 |
//! | `F_` | Cd    | 479.991 |
//! | `g`  | Hg    | 435.834 |
//! | `h`  | Hg    | 404.656 |
//! | `i`  | Hg    | 365.015 |

use std::fmt;
use std::str::FromStr;

use crate::error::OpticsError;

/// A named Fraunhofer line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpectralLine {
    T,
    S,
    R,
    C,
    CPrime,
    DSodium,
    D,
    E,
    F,
    FPrime,
    G,
    H,
    I,
}

impl SpectralLine {
    /// Every line, ordered from the infrared to the ultraviolet.
    pub const ALL: [SpectralLine; 13] = [
        SpectralLine::T,
        SpectralLine::S,
        SpectralLine::R,
        SpectralLine::C,
        SpectralLine::CPrime,
        SpectralLine::DSodium,
        SpectralLine::D,
        SpectralLine::E,
        SpectralLine::F,
        SpectralLine::FPrime,
        SpectralLine::G,
        SpectralLine::H,
        SpectralLine::I,
    ];

    /// Catalog label of the line (`"d"`, `"F_"`, ...).
    pub fn label(self) -> &'static str {
        match self {
            SpectralLine::T => "t",
            SpectralLine::S => "s",
            SpectralLine::R => "r",
            SpectralLine::C => "C",
            SpectralLine::CPrime => "C_",
            SpectralLine::DSodium => "D",
            SpectralLine::D => "d",
            SpectralLine::E => "e",
            SpectralLine::F => "F",
            SpectralLine::FPrime => "F_",
            SpectralLine::G => "g",
            SpectralLine::H => "h",
            SpectralLine::I => "i",
        }
    }

    /// Vacuum wavelength in nanometres.
    pub fn wavelength_nm(self) -> f64 {
        match self {
            SpectralLine::T => 1013.98,
            SpectralLine::S => 852.11,
            SpectralLine::R => 706.519,
            SpectralLine::C => 656.273,
            SpectralLine::CPrime => 643.847,
            SpectralLine::DSodium => 589.294,
            SpectralLine::D => 587.562,
            SpectralLine::E => 546.074,
            SpectralLine::F => 486.133,
            SpectralLine::FPrime => 479.991,
            SpectralLine::G => 435.834,
            SpectralLine::H => 404.656,
            SpectralLine::I => 365.015,
        }
    }

    /// Wavelength in micrometres, the unit expected by the dispersion formulas.
    pub fn wavelength_um(self) -> f64 {
        self.wavelength_nm() / 1000.0
    }
}

impl fmt::Display for SpectralLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SpectralLine {
    type Err = OpticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SpectralLine::ALL
            .iter()
            .copied()
            .find(|line| line.label() == s)
            .ok_or_else(|| OpticsError::UnknownSpectralLine(s.to_string()))
    }
}

/// Wavelength (nm) of the line with the given label.
///
/// Unknown labels yield NaN and a warning rather than an error, so a typo in
/// a property key propagates as "no data" through every derived quantity.
/// Use [`SpectralLine::from_str`] for a strict lookup.
pub fn wavelength(label: &str) -> f64 {
    match label.parse::<SpectralLine>() {
        Ok(line) => line.wavelength_nm(),
        Err(e) => {
            log::warn!("{}", e);
            f64::NAN
        }
    }
}
