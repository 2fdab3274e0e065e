//! The in-memory glass catalog.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use glasscat_optics::{Environment, Glass, GlassAt};

use crate::diagnostics::Diagnostics;
use crate::error::CatalogError;
use crate::parsers::{agf, decode_text, xml, ParsedCatalog};

/// Glasses from one supplier catalog, in file order.
///
/// A name index maps each glass name to its record. When a file repeats a
/// name, both records are kept and the index points at the later one.
///
/// The catalog carries a default [`Environment`]; [`GlassCatalog::glass_at`]
/// evaluates glasses under it.
#[derive(Debug, Clone, Default)]
pub struct GlassCatalog {
    supplier: String,
    glasses: Vec<Glass>,
    index: HashMap<String, usize>,
    environment: Environment,
}

impl GlassCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a catalog file, picking the loader from the extension
    /// (`.agf` or `.xml`, case-insensitive).
    pub fn open(path: impl AsRef<Path>) -> Result<(Self, Diagnostics), CatalogError> {
        let path = path.as_ref();
        let mut catalog = Self::new();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        let diagnostics = match extension.as_deref() {
            Some("agf") => catalog.load_agf(path)?,
            Some("xml") => catalog.load_xml(path)?,
            _ => return Err(CatalogError::UnsupportedFormat(path.display().to_string())),
        };
        Ok((catalog, diagnostics))
    }

    /// Replace the contents with the glasses of an AGF file.
    ///
    /// The catalog is left untouched if the file cannot be read.
    pub fn load_agf(&mut self, path: impl AsRef<Path>) -> Result<Diagnostics, CatalogError> {
        let path = path.as_ref();
        let content = read_catalog(path)?;
        let (source, supplier) = source_names(path);
        let parsed = agf::parse_agf(&content, &source, &supplier);
        Ok(self.replace(parsed))
    }

    /// Replace the contents with AGF records from a string.
    ///
    /// `source_name` labels diagnostics; its stem becomes the supplier.
    pub fn load_agf_str(&mut self, content: &str, source_name: &str) -> Diagnostics {
        let (source, supplier) = source_names(Path::new(source_name));
        self.replace(agf::parse_agf(content, &source, &supplier))
    }

    /// Replace the contents with the glasses of an XML file.
    ///
    /// The catalog is left untouched if the file cannot be read or is not
    /// well-formed XML.
    pub fn load_xml(&mut self, path: impl AsRef<Path>) -> Result<Diagnostics, CatalogError> {
        let path = path.as_ref();
        let content = read_catalog(path)?;
        let name = path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
        self.load_xml_str(&content, &name)
    }

    pub fn load_xml_str(
        &mut self,
        content: &str,
        source_name: &str,
    ) -> Result<Diagnostics, CatalogError> {
        let (source, supplier) = source_names(Path::new(source_name));
        let parsed = xml::parse_xml(content, &source, &supplier).map_err(|e| CatalogError::Xml {
            source_name: source.clone(),
            source: e,
        })?;
        Ok(self.replace(parsed))
    }

    /// Remove every glass. The environment is kept.
    pub fn clear(&mut self) {
        self.supplier.clear();
        self.glasses.clear();
        self.index.clear();
    }

    pub fn supplier(&self) -> &str {
        &self.supplier
    }

    pub fn glass_count(&self) -> usize {
        self.glasses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glasses.is_empty()
    }

    pub fn glass(&self, index: usize) -> Option<&Glass> {
        self.glasses.get(index)
    }

    pub fn glass_by_name(&self, name: &str) -> Option<&Glass> {
        self.index.get(name).map(|&i| &self.glasses[i])
    }

    pub fn has_glass(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn glasses(&self) -> &[Glass] {
        &self.glasses
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    pub fn set_environment(&mut self, environment: Environment) {
        self.environment = environment;
    }

    /// Change the ambient temperature (°C) for every glass in the catalog.
    pub fn set_temperature(&mut self, temperature: f64) {
        self.environment = self.environment.with_temperature(temperature);
    }

    /// Glass at `index`, evaluated under the catalog environment.
    pub fn glass_at(&self, index: usize) -> Option<GlassAt<'_>> {
        self.glass(index).map(|g| g.at(self.environment))
    }

    pub fn glass_at_name(&self, name: &str) -> Option<GlassAt<'_>> {
        self.glass_by_name(name).map(|g| g.at(self.environment))
    }

    fn replace(&mut self, parsed: ParsedCatalog) -> Diagnostics {
        self.supplier = parsed.supplier;
        self.glasses = parsed.glasses;
        self.index = self
            .glasses
            .iter()
            .enumerate()
            .map(|(i, g)| (g.name.clone(), i))
            .collect();

        log::debug!(
            "Loaded {} glasses from {} ({} diagnostics)",
            self.glasses.len(),
            self.supplier,
            parsed.diagnostics.len()
        );
        parsed.diagnostics
    }
}

fn read_catalog(path: &Path) -> Result<String, CatalogError> {
    let bytes = fs::read(path).map_err(|e| CatalogError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(decode_text(&bytes))
}

/// File name for diagnostics and file stem for the supplier.
fn source_names(path: &Path) -> (String, String) {
    let source = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let supplier = path
        .file_stem()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    (source, supplier)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const TWO_GLASSES: &str = "\
NM PLAIN 2 0 1.5168 64.17 0 0
CD 1.03961212 0.00600069867 0.231792344 0.0200179144 1.01046945 103.560653
NM HOT 2 0 1.5168 64.17 0 0
CD 1.03961212 0.00600069867 0.231792344 0.0200179144 1.01046945 103.560653
TD 1.86e-6 1.31e-8 -1.37e-11 4.34e-7 6.27e-10 0.17 20
";

    #[test]
    fn test_load_str_builds_index() {
        let mut catalog = GlassCatalog::new();
        let diagnostics = catalog.load_agf_str(TWO_GLASSES, "SCHOTT.AGF");
        assert!(diagnostics.is_empty());
        assert_eq!(catalog.supplier(), "SCHOTT");
        assert_eq!(catalog.glass_count(), 2);
        assert!(catalog.has_glass("HOT"));
        assert!(!catalog.has_glass("hot"));
        assert_eq!(catalog.glass_by_name("PLAIN").map(|g| g.name.as_str()), Some("PLAIN"));
        assert!(catalog.glass(2).is_none());
    }

    #[test]
    fn test_temperature_affects_only_thermal_glasses() {
        let mut catalog = GlassCatalog::new();
        catalog.load_agf_str(TWO_GLASSES, "SCHOTT.AGF");

        let plain_before = catalog.glass_at_name("PLAIN").map(|g| g.nd());
        let hot_before = catalog.glass_at_name("HOT").map(|g| g.nd());
        catalog.set_temperature(60.0);
        let plain_after = catalog.glass_at_name("PLAIN").map(|g| g.nd());
        let hot_after = catalog.glass_at_name("HOT").map(|g| g.nd());

        assert_eq!(plain_before, plain_after);
        let shift = hot_after.unwrap() - hot_before.unwrap();
        assert!(shift.abs() > 1e-5, "shift {shift}");
        assert_abs_diff_eq!(plain_after.unwrap(), 1.5168, epsilon = 1e-4);
    }

    #[test]
    fn test_duplicate_name_resolves_to_last() {
        let mut catalog = GlassCatalog::new();
        let diagnostics =
            catalog.load_agf_str("NM A 2 0 1.5 60\nNM A 1 0 1.6 50\n", "T.AGF");
        assert_eq!(catalog.glass_count(), 2);
        assert_eq!(catalog.glass_by_name("A").map(|g| g.formula_id()), Some(1));
        assert!(diagnostics.contains("duplicate glass name"));
    }

    #[test]
    fn test_malformed_xml_keeps_previous_contents() {
        let mut catalog = GlassCatalog::new();
        catalog.load_agf_str(TWO_GLASSES, "SCHOTT.AGF");
        let result = catalog.load_xml_str("<Catalog>", "BROKEN.xml");
        assert!(matches!(result, Err(CatalogError::Xml { .. })));
        assert_eq!(catalog.glass_count(), 2);
        assert_eq!(catalog.supplier(), "SCHOTT");
    }

    #[test]
    fn test_clear_keeps_environment() {
        let mut catalog = GlassCatalog::new();
        catalog.set_temperature(40.0);
        catalog.load_agf_str(TWO_GLASSES, "SCHOTT.AGF");
        catalog.clear();
        assert!(catalog.is_empty());
        assert!(catalog.glass_at(0).is_none());
        assert_eq!(catalog.environment().temperature, 40.0);
    }

    #[test]
    fn test_set_temperature_keeps_pressure() {
        let mut catalog = GlassCatalog::new();
        catalog.set_environment(Environment {
            temperature: 20.0,
            pressure: 80_000.0,
        });
        catalog.set_temperature(35.0);
        assert_eq!(catalog.environment().temperature, 35.0);
        assert_eq!(catalog.environment().pressure, 80_000.0);
    }
}
