//! Parser for CodeV-style XML glass catalogs.
//!
//! ```xml
//! <Catalog>
//!   <Supplier>HOYA</Supplier>
//!   <Glasses>
//!     <Glass>
//!       <GlassName>FC5</GlassName>
//!       <NumericName>487704</NumericName>
//!       <EquationType>GlassManufacturerSellmeier</EquationType>
//!       <DispersionCoefficients><B1>..</B1>..</DispersionCoefficients>
//!       <LowCTE>9.3</LowCTE>
//!       <HighCTE>11.0</HighCTE>
//!       <ManufacturersProperties><Acid_resist>1</Acid_resist>..</ManufacturersProperties>
//!       <LowWavelength>0.29</LowWavelength>
//!       <HighWavelength>2.33</HighWavelength>
//!       <TransmissionCurves>
//!         <Curve>
//!           <Thickness>10</Thickness>
//!           <Transmission><Wavelength>0.29</Wavelength><Value>0.01</Value></Transmission>
//!         </Curve>
//!       </TransmissionCurves>
//!       <DnDtData><DnDtForCategory><DnDtConstants>
//!         <DnDt_D0>..</DnDt_D0> .. <DnDt_Lambda>..</DnDt_Lambda><DnDt_Temperature>..</DnDt_Temperature>
//!       </DnDtConstants></DnDtForCategory></DnDtData>
//!     </Glass>
//!   </Glasses>
//! </Catalog>
//! ```
//!
//! The document is parsed as a tree, so diagnostics carry no line numbers.

use std::collections::HashSet;

use glasscat_optics::glass::THERMAL_COEFFICIENT_COUNT;
use glasscat_optics::{DispersionFormula, Glass, TransmittanceSample};
use roxmltree::{Document, Node};

use super::ParsedCatalog;
use crate::diagnostics::{Diagnostic, Diagnostics};

/// Manufacturer property element names and the durability field each sets.
const RESISTANCE_PROPERTIES: [&str; 4] =
    ["Acid_resist", "Climatic_resist", "Stain_resist", "Alkali_resist"];

/// Thermal constants in storage order: D0, D1, D2, E0, E1, λtk, Tref.
const THERMAL_KEYS: [&str; THERMAL_COEFFICIENT_COUNT] =
    ["D0", "D1", "D2", "E0", "E1", "Lambda", "Temperature"];

/// Parse XML catalog text.
///
/// # Arguments
/// * `content` - Decoded file contents.
/// * `source` - File name used in diagnostics.
/// * `fallback_supplier` - Supplier used when the document names none.
///
/// # Errors
/// Fails only if the text is not well-formed XML.
pub fn parse_xml(
    content: &str,
    source: &str,
    fallback_supplier: &str,
) -> Result<ParsedCatalog, roxmltree::Error> {
    let doc = Document::parse(content)?;
    let root = doc.root_element();

    let supplier = first_element(root)
        .and_then(|n| n.text())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(fallback_supplier)
        .to_string();

    let mut diagnostics = Diagnostics::new();
    let mut glasses = Vec::new();
    let mut seen = HashSet::new();

    for node in root.descendants().filter(|n| n.has_tag_name("Glass")) {
        let mut reader = GlassReader {
            source,
            glass: Glass::new(child_text(node, "GlassName").unwrap_or_default()),
            diagnostics: &mut diagnostics,
        };
        reader.glass.supplier = supplier.clone();
        reader.read(node);

        let glass = reader.glass;
        if !seen.insert(glass.name.clone()) {
            diagnostics.push(Diagnostic {
                source: source.to_string(),
                line: None,
                glass: glass.name.clone(),
                message: "duplicate glass name, lookups return this record".into(),
            });
        }
        glasses.push(glass);
    }

    Ok(ParsedCatalog {
        supplier,
        glasses,
        diagnostics,
    })
}

struct GlassReader<'a> {
    source: &'a str,
    glass: Glass,
    diagnostics: &'a mut Diagnostics,
}

impl GlassReader<'_> {
    fn read(&mut self, node: Node) {
        if self.glass.name.is_empty() {
            self.report("missing GlassName".into());
        }
        if let Some(mil) = self.number(node, "NumericName") {
            self.glass.mil = mil;
        }

        self.read_dispersion(node);

        match self.number(node, "LowCTE") {
            Some(value) => self.glass.low_tce = value,
            None => self.report("missing LowCTE".into()),
        }
        match self.number(node, "HighCTE") {
            Some(value) => self.glass.high_tce = value,
            None => self.report("missing HighCTE".into()),
        }

        self.read_manufacturer_properties(node);

        if let Some(value) = self.number(node, "LowWavelength") {
            self.glass.lambda_min = value;
        }
        if let Some(value) = self.number(node, "HighWavelength") {
            self.glass.lambda_max = value;
        }

        if let Some(curves) = child(node, "TransmissionCurves") {
            for curve in curves.children().filter(|n| n.has_tag_name("Curve")) {
                self.read_curve(curve);
            }
        }

        self.read_thermal(node);
    }

    fn read_dispersion(&mut self, node: Node) {
        let equation = child_text(node, "EquationType").unwrap_or_default();
        match DispersionFormula::from_equation_type(&equation) {
            Some(formula) => self.glass.set_formula(Some(formula)),
            None => {
                self.glass.set_formula(None);
                self.report(format!("Unknown dispersion formula: '{}'", equation));
            }
        }

        let Some(coefficients) = child(node, "DispersionCoefficients") else {
            self.report("missing DispersionCoefficients".into());
            return;
        };
        let mut values = Vec::new();
        for element in coefficients.children().filter(Node::is_element) {
            match parse_text(element) {
                Some(value) => values.push(value),
                None => {
                    self.report(format!(
                        "invalid dispersion coefficient <{}>",
                        element.tag_name().name()
                    ));
                    values.push(0.0);
                }
            }
        }
        self.glass.set_dispersion_data(&values);
    }

    fn read_manufacturer_properties(&mut self, node: Node) {
        let properties = child(node, "ManufacturersProperties");
        for name in RESISTANCE_PROPERTIES {
            let value = properties.and_then(|p| child(p, name)).and_then(parse_text);
            let Some(value) = value else {
                self.report(format!("missing {}", name));
                continue;
            };
            let field = match name {
                "Acid_resist" => &mut self.glass.acid_resist,
                "Climatic_resist" => &mut self.glass.climate_resist,
                "Stain_resist" => &mut self.glass.stain_resist,
                _ => &mut self.glass.alkali_resist,
            };
            *field = value;
        }

        if let Some(properties) = properties {
            if let Some(value) = child(properties, "Phosphate_resist").and_then(parse_text) {
                self.glass.phosphate_resist = value;
            }
            if let Some(value) = child(properties, "Relative_cost").and_then(parse_text) {
                self.glass.relative_cost = value;
            }
        }
    }

    /// A `Thickness` applies to every following `Transmission` sibling
    /// until the next `Thickness`.
    fn read_curve(&mut self, curve: Node) {
        let mut thickness = f64::NAN;
        for element in curve.children().filter(Node::is_element) {
            match element.tag_name().name() {
                "Thickness" => match parse_text(element) {
                    Some(value) => thickness = value,
                    None => self.report("invalid Thickness in transmission curve".into()),
                },
                "Transmission" => {
                    let wavelength = child(element, "Wavelength").and_then(parse_text);
                    let value = child(element, "Value").and_then(parse_text);
                    match (wavelength, value) {
                        (Some(wavelength_um), Some(transmittance)) => {
                            if thickness.is_nan() {
                                self.report("Transmission before any Thickness".into());
                            }
                            self.glass.push_transmittance(TransmittanceSample {
                                wavelength_um,
                                transmittance,
                                thickness_mm: thickness,
                            });
                        }
                        _ => self.report("Transmission without Wavelength and Value".into()),
                    }
                }
                _ => {}
            }
        }
    }

    fn read_thermal(&mut self, node: Node) {
        let category = child(node, "DnDtData").and_then(|n| child(n, "DnDtForCategory"));
        let constants = category.and_then(|n| child(n, "DnDtConstants"));
        let (Some(category), Some(constants)) = (category, constants) else {
            self.glass.clear_thermal_data();
            self.report("no thermal data (DnDtData)".into());
            return;
        };

        let mut coefs = [0.0; THERMAL_COEFFICIENT_COUNT];
        for (slot, key) in coefs.iter_mut().zip(THERMAL_KEYS) {
            let prefixed = format!("DnDt_{}", key);
            let value = child(constants, &prefixed)
                .or_else(|| child(constants, key))
                .or_else(|| child(category, key))
                .and_then(parse_text);
            match value {
                Some(value) => *slot = value,
                None => {
                    self.glass.clear_thermal_data();
                    self.report(format!("incomplete thermal data, missing {}", prefixed));
                    return;
                }
            }
        }
        self.glass.set_thermal_data(coefs);
    }

    fn number(&mut self, node: Node, tag: &str) -> Option<f64> {
        let element = child(node, tag)?;
        let value = parse_text(element);
        if value.is_none() {
            self.report(format!("invalid number in <{}>", tag));
        }
        value
    }

    fn report(&mut self, message: String) {
        self.diagnostics.push(Diagnostic {
            source: self.source.to_string(),
            line: None,
            glass: self.glass.name.clone(),
            message,
        });
    }
}

fn first_element<'a, 'input>(node: Node<'a, 'input>) -> Option<Node<'a, 'input>> {
    node.children().find(Node::is_element)
}

fn child<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|n| n.has_tag_name(tag))
}

fn child_text(node: Node, tag: &str) -> Option<String> {
    child(node, tag)
        .and_then(|n| n.text())
        .map(|t| t.trim().to_string())
}

fn parse_text(node: Node) -> Option<f64> {
    node.text()?.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FC5: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Catalog>
  <Supplier>HOYA</Supplier>
  <Glasses>
    <Glass>
      <GlassName>FC5</GlassName>
      <NumericName>487704</NumericName>
      <EquationType>GlassManufacturerSellmeier</EquationType>
      <DispersionCoefficients>
        <B1>1.0</B1><B2>0.2</B2><B3>0.9</B3><C1>0.006</C1><C2>0.02</C2><C3>100.0</C3>
      </DispersionCoefficients>
      <LowCTE>9.3</LowCTE>
      <HighCTE>11.0</HighCTE>
      <ManufacturersProperties>
        <Acid_resist>1</Acid_resist>
        <Climatic_resist>2</Climatic_resist>
        <Stain_resist>0</Stain_resist>
        <Alkali_resist>1.2</Alkali_resist>
        <Phosphate_resist>3</Phosphate_resist>
        <Relative_cost>1.4</Relative_cost>
      </ManufacturersProperties>
      <LowWavelength>0.29</LowWavelength>
      <HighWavelength>2.33</HighWavelength>
      <TransmissionCurves>
        <Curve>
          <Thickness>10</Thickness>
          <Transmission><Wavelength>0.30</Wavelength><Value>0.40</Value></Transmission>
          <Transmission><Wavelength>0.35</Wavelength><Value>0.90</Value></Transmission>
          <Thickness>25</Thickness>
          <Transmission><Wavelength>0.40</Wavelength><Value>0.98</Value></Transmission>
        </Curve>
      </TransmissionCurves>
      <DnDtData>
        <DnDtForCategory>
          <DnDtConstants>
            <DnDt_D0>1.0e-6</DnDt_D0>
            <DnDt_D1>1.0e-8</DnDt_D1>
            <DnDt_D2>-1.0e-11</DnDt_D2>
            <DnDt_E0>4.0e-7</DnDt_E0>
            <DnDt_E1>6.0e-10</DnDt_E1>
            <DnDt_Lambda>0.2</DnDt_Lambda>
            <DnDt_Temperature>20</DnDt_Temperature>
          </DnDtConstants>
        </DnDtForCategory>
      </DnDtData>
    </Glass>
  </Glasses>
</Catalog>
"#;

    #[test]
    fn test_parse_full_glass() {
        let parsed = parse_xml(FC5, "HOYA.xml", "fallback").unwrap();
        assert!(parsed.diagnostics.is_empty(), "{}", parsed.diagnostics);
        assert_eq!(parsed.supplier, "HOYA");
        assert_eq!(parsed.glasses.len(), 1);

        let glass = &parsed.glasses[0];
        assert_eq!(glass.name, "FC5");
        assert_eq!(glass.supplier, "HOYA");
        assert_eq!(glass.mil, 487704.0);
        assert_eq!(glass.formula(), Some(DispersionFormula::GlassManufacturerSellmeier));
        assert_eq!(glass.dispersion_coef(5), Some(100.0));
        assert_eq!(glass.dispersion_coef(6), Some(0.0));
        assert_eq!((glass.low_tce, glass.high_tce), (9.3, 11.0));
        assert_eq!(glass.climate_resist, 2.0);
        assert_eq!(glass.alkali_resist, 1.2);
        assert_eq!(glass.phosphate_resist, 3.0);
        assert_eq!(glass.relative_cost, 1.4);
        assert_eq!((glass.lambda_min, glass.lambda_max), (0.29, 2.33));

        let samples = glass.transmittance_data();
        assert_eq!(samples.len(), 3);
        assert_eq!(samples[0].thickness_mm, 10.0);
        assert_eq!(samples[1].thickness_mm, 10.0);
        assert_eq!(samples[2].thickness_mm, 25.0);

        assert!(glass.has_thermal_data());
        assert_eq!(glass.ltk(), 0.2);
        assert_eq!(glass.tref(), 20.0);
    }

    #[test]
    fn test_missing_sections_are_reported() {
        let content = "<Catalog><Supplier>X</Supplier><Glasses><Glass>\
            <GlassName>G1</GlassName><EquationType>Polynomial</EquationType>\
            <DispersionCoefficients><A>1.5</A></DispersionCoefficients>\
            <ManufacturersProperties><Acid_resist>1</Acid_resist></ManufacturersProperties>\
            </Glass></Glasses></Catalog>";
        let parsed = parse_xml(content, "X.xml", "X").unwrap();
        let glass = &parsed.glasses[0];
        assert_eq!(glass.formula_id(), 13);
        assert_eq!(glass.formula_name(), "Unknown");
        assert!(!glass.has_thermal_data());
        assert!(glass.low_tce.is_nan());
        assert_eq!(glass.acid_resist, 1.0);
        assert!(glass.phosphate_resist.is_nan());
        assert!(glass.relative_cost.is_nan());

        let text = parsed.diagnostics.to_string();
        assert!(text.contains("X.xml: G1: Unknown dispersion formula: 'Polynomial'\n"));
        assert!(text.contains("X.xml: G1: missing LowCTE\n"));
        assert!(text.contains("X.xml: G1: missing HighCTE\n"));
        assert!(text.contains("X.xml: G1: missing Climatic_resist\n"));
        assert!(text.contains("X.xml: G1: missing Stain_resist\n"));
        assert!(text.contains("X.xml: G1: missing Alkali_resist\n"));
        assert!(text.contains("X.xml: G1: no thermal data (DnDtData)\n"));
        assert_eq!(parsed.diagnostics.len(), 7);
    }

    #[test]
    fn test_incomplete_thermal_block() {
        let content = "<Catalog><Supplier>X</Supplier><Glasses><Glass>\
            <GlassName>G1</GlassName>\
            <DnDtData><DnDtForCategory><DnDtConstants><DnDt_D0>1e-6</DnDt_D0></DnDtConstants>\
            </DnDtForCategory></DnDtData></Glass></Glasses></Catalog>";
        let parsed = parse_xml(content, "X.xml", "X").unwrap();
        assert!(!parsed.glasses[0].has_thermal_data());
        assert!(parsed.diagnostics.contains("missing DnDt_D1"));
    }

    #[test]
    fn test_supplier_falls_back_to_file_stem() {
        let content = "<Catalog><Glasses><Glass><GlassName>G1</GlassName></Glass></Glasses></Catalog>";
        let parsed = parse_xml(content, "OHARA.xml", "OHARA").unwrap();
        assert_eq!(parsed.supplier, "OHARA");
    }

    #[test]
    fn test_malformed_document_is_an_error() {
        assert!(parse_xml("<Catalog><Glasses>", "bad.xml", "bad").is_err());
    }
}
