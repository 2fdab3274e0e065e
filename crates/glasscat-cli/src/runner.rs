//! Command runner: loads catalogs and prints glass tables.
//!
//! Every command writes to a caller-supplied sink so the output can be
//! checked in tests; `main` passes stdout.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use glasscat_catalog::{Diagnostics, GlassCatalog};
use glasscat_optics::{Environment, Glass, GlassAt, GlassProperty, SpectralLine};

use crate::config::ReportJob;

/// Open a catalog file and evaluate its glasses under `env`.
pub fn load_catalog(path: &Path, env: Environment) -> Result<(GlassCatalog, Diagnostics)> {
    let (mut catalog, diagnostics) = GlassCatalog::open(path)
        .with_context(|| format!("Could not load catalog {}", path.display()))?;
    catalog.set_environment(env);
    if !diagnostics.is_empty() {
        log::info!(
            "{}: {} glasses, {} diagnostics",
            path.display(),
            catalog.glass_count(),
            diagnostics.len()
        );
    }
    Ok((catalog, diagnostics))
}

/// Parse property keys, rejecting unknown ones up front.
pub fn parse_properties(keys: &[String]) -> Result<Vec<GlassProperty>> {
    keys.iter()
        .map(|k| k.parse::<GlassProperty>().map_err(anyhow::Error::from))
        .collect()
}

/// One line per glass: name, formula, computed nd and vd.
pub fn write_list(out: &mut impl Write, catalog: &GlassCatalog) -> Result<()> {
    writeln!(out, "# {} ({} glasses)", catalog.supplier(), catalog.glass_count())?;
    writeln!(out, "{:<20} {:<28} {:>10} {:>8}", "name", "formula", "nd", "vd")?;
    for index in 0..catalog.glass_count() {
        let Some(view) = catalog.glass_at(index) else {
            continue;
        };
        writeln!(
            out,
            "{:<20} {:<28} {:>10.6} {:>8.3}",
            view.glass().name,
            view.glass().formula_name(),
            view.nd(),
            view.vd()
        )?;
    }
    Ok(())
}

/// Full record of one glass plus its derived values.
pub fn write_glass(out: &mut impl Write, view: &GlassAt<'_>) -> Result<()> {
    let glass = view.glass();
    let env = view.environment();

    writeln!(out, "{} ({})", glass.name, glass.supplier)?;
    if !glass.comment.is_empty() {
        writeln!(out, "  comment:      {}", glass.comment)?;
    }
    writeln!(out, "  status:       {}", glass.status.name())?;
    writeln!(out, "  formula:      {} ({})", glass.formula_name(), glass.formula_id())?;
    writeln!(out, "  coefficients: {:?}", &glass.dispersion_coefs()[..])?;
    writeln!(out, "  catalog nd/vd: {} / {}", glass.catalog_nd, glass.catalog_vd)?;
    writeln!(out, "  range:        {} - {} µm", glass.lambda_min, glass.lambda_max)?;
    writeln!(out, "  TCE:          {} / {}", glass.low_tce, glass.high_tce)?;
    writeln!(out, "  density:      {}", glass.density)?;
    if glass.has_thermal_data() {
        writeln!(out, "  thermal:      {:?}", glass.thermal_coefs())?;
    } else {
        writeln!(out, "  thermal:      none")?;
    }
    writeln!(out, "  transmittance samples: {}", glass.transmittance_data().len())?;
    if let Some((lo, hi)) = glass.transmittance_range() {
        writeln!(out, "  transmittance range: {} - {} µm", lo, hi)?;
    }

    writeln!(
        out,
        "Evaluated at {} °C, {} Pa",
        env.temperature, env.pressure
    )?;
    for property in GlassProperty::ALL {
        writeln!(out, "  {:<6} {:>12.6}", property.key(), view.value(property))?;
    }
    for line in SpectralLine::ALL {
        writeln!(
            out,
            "  n({:<2}) {:>12.6}  [{} nm]",
            line.label(),
            view.index(line),
            line.wavelength_nm()
        )?;
    }
    Ok(())
}

/// Write a glass record as pretty JSON.
pub fn write_glass_json(out: &mut impl Write, glass: &Glass) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, glass)?;
    writeln!(out)?;
    Ok(())
}

/// One property for every glass in the catalog.
pub fn write_query(
    out: &mut impl Write,
    catalog: &GlassCatalog,
    property: GlassProperty,
) -> Result<()> {
    for index in 0..catalog.glass_count() {
        if let Some(view) = catalog.glass_at(index) {
            writeln!(out, "{:<20} {:>12.6}", view.glass().name, view.value(property))?;
        }
    }
    Ok(())
}

/// Index of one glass at each wavelength (µm).
pub fn write_indices(out: &mut impl Write, view: &GlassAt<'_>, wavelengths: &[f64]) -> Result<()> {
    writeln!(out, "{:>10} {:>12}", "λ (µm)", "n")?;
    for &wavelength in wavelengths {
        writeln!(out, "{:>10.4} {:>12.6}", wavelength, view.refractive_index(wavelength))?;
    }
    Ok(())
}

/// Run a report job: load every catalog, then print the configured
/// properties for the selected glasses.
pub fn run_report(out: &mut impl Write, job: &ReportJob) -> Result<()> {
    let env = job.environment.to_environment();
    let properties = parse_properties(&job.report.properties)?;

    for entry in &job.catalog {
        let (catalog, diagnostics) = load_catalog(&entry.path, env)?;

        writeln!(out, "# {}", catalog.supplier())?;
        write!(out, "{:<20}", "name")?;
        for property in &properties {
            write!(out, " {:>12}", property.key())?;
        }
        writeln!(out)?;

        for glass in catalog.glasses() {
            if !job.report.glasses.is_empty() && !job.report.glasses.contains(&glass.name) {
                continue;
            }
            let view = glass.at(env);
            write!(out, "{:<20}", glass.name)?;
            for &property in &properties {
                write!(out, " {:>12.6}", view.value(property))?;
            }
            writeln!(out)?;
        }

        for name in &job.report.glasses {
            if !catalog.has_glass(name) {
                log::warn!("{}: no glass named {}", catalog.supplier(), name);
            }
        }

        if job.report.show_diagnostics && !diagnostics.is_empty() {
            writeln!(out, "# diagnostics")?;
            write!(out, "{}", diagnostics)?;
        }
    }
    Ok(())
}
