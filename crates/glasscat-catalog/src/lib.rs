//! # Glasscat Catalog
//!
//! Supplier glass catalogs for the glasscat engine. This crate provides:
//!
//! - **Catalog** ([`catalog`]) — An ordered collection of [`Glass`](glasscat_optics::Glass)
//!   records with a name index and a default evaluation environment.
//! - **File parsers** ([`parsers`]) — Load Zemax `.agf` and CodeV-style `.xml`
//!   catalogs, including UTF-16 encoded files.
//! - **Diagnostics** ([`diagnostics`]) — Malformed records are reported and
//!   skipped over instead of failing the whole load.

pub mod catalog;
pub mod diagnostics;
pub mod error;
pub mod parsers;

pub use catalog::GlassCatalog;
pub use diagnostics::{Diagnostic, Diagnostics};
pub use error::CatalogError;
