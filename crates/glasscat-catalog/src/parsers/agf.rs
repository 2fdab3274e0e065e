//! Parser for Zemax `.agf` glass catalogs.
//!
//! An AGF file is a sequence of records, each opened by an `NM` line and
//! followed by data lines that apply to that record:
//! ```text
//! NM N-BK7 2 517642.251 1.5168 64.17 0 1 0
//! GC borosilicate crown
//! ED 7.1 8.3 2.51 -0.0009 0
//! CD 1.03961212 0.00600069867 0.231792344 0.0200179144 1.01046945 103.560653 0 0 0 0
//! TD 1.86E-06 1.31E-08 -1.37E-11 4.34E-07 6.27E-10 0.17 20
//! OD 1 2 0 1 2 2.3
//! LD 0.3 2.5
//! IT 0.31 0.09 25
//! ```
//!
//! Unknown tags (`CC`, `MD`, `BD`, ...) are skipped. A record is committed
//! when the next `NM` line or the end of input is reached.

use std::collections::HashSet;

use glasscat_optics::glass::THERMAL_COEFFICIENT_COUNT;
use glasscat_optics::{Glass, GlassStatus, TransmittanceSample};

use super::{parse_numbers, ParsedCatalog};
use crate::diagnostics::{Diagnostic, Diagnostics};

/// Glass label used in diagnostics raised outside any record.
const NO_RECORD: &str = "(none)";

/// AGF placeholder for "no data" in the OD line.
const NO_DATA: f64 = -1.0;

/// Parse AGF text.
///
/// # Arguments
/// * `content` - Decoded file contents.
/// * `source` - File name used in diagnostics.
/// * `supplier` - Supplier assigned to every record (the file stem).
pub fn parse_agf(content: &str, source: &str, supplier: &str) -> ParsedCatalog {
    let mut parser = AgfParser {
        source,
        supplier,
        current: None,
        glasses: Vec::new(),
        seen: HashSet::new(),
        diagnostics: Diagnostics::new(),
    };

    for (line_idx, line) in content.lines().enumerate() {
        parser.parse_line(line_idx + 1, line.trim());
    }
    parser.commit();

    ParsedCatalog {
        supplier: supplier.to_string(),
        glasses: parser.glasses,
        diagnostics: parser.diagnostics,
    }
}

struct AgfParser<'a> {
    source: &'a str,
    supplier: &'a str,
    /// Record being filled; committed at the next `NM` or end of input.
    current: Option<Glass>,
    glasses: Vec<Glass>,
    seen: HashSet<String>,
    diagnostics: Diagnostics,
}

impl AgfParser<'_> {
    fn parse_line(&mut self, line_no: usize, line: &str) {
        if line.is_empty() {
            return;
        }
        let (tag, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));

        match tag {
            "NM" => self.start_record(line_no, rest),
            "GC" | "ED" | "CD" | "TD" | "OD" | "LD" | "IT" => {
                if self.current.is_none() {
                    self.report(line_no, format!("{} line outside any NM record", tag));
                    return;
                }
                if tag == "GC" {
                    if let Some(glass) = self.current.as_mut() {
                        glass.comment = rest.trim().to_string();
                    }
                    return;
                }
                match parse_numbers(rest) {
                    Ok(values) => self.apply_data(line_no, tag, &values),
                    Err(token) => {
                        self.report(line_no, format!("invalid number '{}' in {} line", token, tag))
                    }
                }
            }
            // Catalog comments, melt data, and tags this tool does not use
            _ => {}
        }
    }

    fn start_record(&mut self, line_no: usize, rest: &str) {
        self.commit();

        let tokens: Vec<&str> = rest.split_whitespace().collect();
        let Some(name) = tokens.first() else {
            self.report(line_no, "NM line without a glass name".into());
            return;
        };

        let mut glass = Glass::new(*name);
        glass.supplier = self.supplier.to_string();
        self.current = Some(glass);

        if self.seen.contains(*name) {
            self.report(line_no, "duplicate glass name, lookups return this record".into());
        }

        match tokens.get(1).and_then(|t| t.parse::<f64>().ok()) {
            Some(id) => {
                let id = id as i32;
                if !self.glass_mut().set_formula_id(id) {
                    self.report(line_no, format!("Unknown dispersion formula: {}", id));
                }
            }
            None => self.report(
                line_no,
                "Unknown dispersion formula: missing or non-numeric identifier".into(),
            ),
        }

        let mil = self.optional_number(line_no, &tokens, 2, "MIL code");
        let nd = self.optional_number(line_no, &tokens, 3, "nd");
        let vd = self.optional_number(line_no, &tokens, 4, "vd");
        let exclude = self.optional_number(line_no, &tokens, 5, "exclude substitution");
        let status = self.optional_number(line_no, &tokens, 6, "status");
        let melt = self.optional_number(line_no, &tokens, 7, "melt frequency");

        let glass = self.glass_mut();
        glass.mil = mil;
        glass.catalog_nd = nd;
        glass.catalog_vd = vd;
        glass.exclude_substitution = exclude.is_finite() && exclude != 0.0;
        glass.status = if status.is_finite() {
            GlassStatus::from_code(status as i32)
        } else {
            GlassStatus::Unknown
        };
        glass.melt_frequency = melt;
    }

    fn apply_data(&mut self, line_no: usize, tag: &str, values: &[f64]) {
        match tag {
            "ED" => {
                let glass = self.glass_mut();
                let fields = [
                    &mut glass.low_tce,
                    &mut glass.high_tce,
                    &mut glass.density,
                    &mut glass.delta_pgf,
                ];
                for (field, value) in fields.into_iter().zip(values) {
                    *field = *value;
                }
            }
            "CD" => {
                if values.len() > glasscat_optics::dispersion::COEFFICIENT_COUNT {
                    self.report(
                        line_no,
                        format!("CD line has {} coefficients, only 12 are kept", values.len()),
                    );
                }
                self.glass_mut().set_dispersion_data(values);
            }
            "TD" => match <[f64; THERMAL_COEFFICIENT_COUNT]>::try_from(values) {
                Ok(coefs) => self.glass_mut().set_thermal_data(coefs),
                Err(_) => {
                    self.glass_mut().clear_thermal_data();
                    self.report(
                        line_no,
                        format!("TD line expects 7 values, found {}", values.len()),
                    );
                }
            },
            "OD" => {
                if values.len() != 6 {
                    self.report(
                        line_no,
                        format!("OD line expects 6 values, found {}", values.len()),
                    );
                    return;
                }
                let glass = self.glass_mut();
                let fields = [
                    &mut glass.relative_cost,
                    &mut glass.climate_resist,
                    &mut glass.stain_resist,
                    &mut glass.acid_resist,
                    &mut glass.alkali_resist,
                    &mut glass.phosphate_resist,
                ];
                for (field, value) in fields.into_iter().zip(values) {
                    if *value != NO_DATA {
                        *field = *value;
                    }
                }
            }
            "LD" => {
                if values.len() < 2 {
                    self.report(
                        line_no,
                        format!("LD line expects 2 values, found {}", values.len()),
                    );
                    return;
                }
                let glass = self.glass_mut();
                glass.lambda_min = values[0];
                glass.lambda_max = values[1];
            }
            "IT" => {
                if values.len() != 3 {
                    self.report(
                        line_no,
                        format!("IT line expects 3 values, found {}", values.len()),
                    );
                    return;
                }
                self.glass_mut().push_transmittance(TransmittanceSample {
                    wavelength_um: values[0],
                    transmittance: values[1],
                    thickness_mm: values[2],
                });
            }
            _ => {}
        }
    }

    /// Numeric NM field at `index`; NaN if absent, NaN plus a diagnostic if
    /// it does not parse.
    fn optional_number(&mut self, line_no: usize, tokens: &[&str], index: usize, field: &str) -> f64 {
        match tokens.get(index) {
            None => f64::NAN,
            Some(token) => token.parse::<f64>().unwrap_or_else(|_| {
                self.report(line_no, format!("invalid {} '{}' in NM line", field, token));
                f64::NAN
            }),
        }
    }

    fn commit(&mut self) {
        if let Some(glass) = self.current.take() {
            self.seen.insert(glass.name.clone());
            self.glasses.push(glass);
        }
    }

    /// Only called while a record is open.
    fn glass_mut(&mut self) -> &mut Glass {
        self.current.get_or_insert_with(Glass::default)
    }

    fn report(&mut self, line_no: usize, message: String) {
        let glass = self
            .current
            .as_ref()
            .map_or(NO_RECORD, |g| g.name.as_str())
            .to_string();
        self.diagnostics.push(Diagnostic {
            source: self.source.to_string(),
            line: Some(line_no),
            glass,
            message,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NBK7: &str = "\
CC SCHOTT test catalog
NM N-BK7 2 517642.251 1.5168 64.17 0 1 0
GC borosilicate crown
ED 7.1 8.3 2.51 -0.0009 0
CD 1.03961212 0.00600069867 0.231792344 0.0200179144 1.01046945 103.560653 0 0 0 0
TD 1.86E-06 1.31E-08 -1.37E-11 4.34E-07 6.27E-10 0.17 20
OD 1 2 0 1 2 2.3
LD 0.3 2.5
IT 0.31 0.09 25
IT 0.35 0.62 25
IT 0.4 0.957 25
";

    #[test]
    fn test_parse_full_record() {
        let parsed = parse_agf(NBK7, "SCHOTT.AGF", "SCHOTT");
        assert!(parsed.diagnostics.is_empty(), "{}", parsed.diagnostics);
        assert_eq!(parsed.glasses.len(), 1);

        let glass = &parsed.glasses[0];
        assert_eq!(glass.name, "N-BK7");
        assert_eq!(glass.supplier, "SCHOTT");
        assert_eq!(glass.formula_name(), "Sellmeier 1");
        assert_eq!(glass.mil, 517642.251);
        assert_eq!(glass.status, GlassStatus::Preferred);
        assert_eq!(glass.comment, "borosilicate crown");
        assert_eq!(glass.low_tce, 7.1);
        assert_eq!(glass.high_tce, 8.3);
        assert_eq!(glass.density, 2.51);
        assert_eq!(glass.dispersion_coef(5), Some(103.560653));
        assert!(glass.has_thermal_data());
        assert_eq!(glass.tref(), 20.0);
        assert_eq!(glass.ltk(), 0.17);
        assert_eq!(glass.relative_cost, 1.0);
        assert_eq!(glass.phosphate_resist, 2.3);
        assert_eq!((glass.lambda_min, glass.lambda_max), (0.3, 2.5));
        assert_eq!(glass.transmittance_data().len(), 3);
        assert_eq!(glass.transmittance_data()[1].transmittance, 0.62);
    }

    #[test]
    fn test_od_no_data_placeholders() {
        let content = "NM A 1 0 1.5 60\nOD -1 -1 -1 -1 -1 -1\n";
        let parsed = parse_agf(content, "T.AGF", "T");
        let glass = &parsed.glasses[0];
        for value in [
            glass.relative_cost,
            glass.climate_resist,
            glass.stain_resist,
            glass.acid_resist,
            glass.alkali_resist,
            glass.phosphate_resist,
        ] {
            assert!(value.is_nan());
        }
        assert!(parsed.diagnostics.is_empty());
    }

    #[test]
    fn test_malformed_blocks_are_reported_and_skipped() {
        let content = "\
NM A 1 0 1.5 60
TD 1 2 3
OD 1 2 3
IT 0.5 0.9
CD 2.27 x
NM B 1 0 1.6 50
CD 2.5
";
        let parsed = parse_agf(content, "T.AGF", "T");
        assert_eq!(parsed.glasses.len(), 2);
        let a = &parsed.glasses[0];
        assert!(!a.has_thermal_data());
        assert!(a.relative_cost.is_nan());
        assert!(a.transmittance_data().is_empty());
        assert!(a.dispersion_coefs().iter().all(|&c| c == 0.0));
        assert_eq!(parsed.glasses[1].dispersion_coef(0), Some(2.5));

        let text = parsed.diagnostics.to_string();
        assert_eq!(parsed.diagnostics.len(), 4, "{}", text);
        assert!(text.contains("T.AGF(2): A: TD line expects 7 values, found 3"));
        assert!(text.contains("T.AGF(3): A: OD line expects 6 values, found 3"));
        assert!(text.contains("T.AGF(4): A: IT line expects 3 values, found 2"));
        assert!(text.contains("T.AGF(5): A: invalid number 'x' in CD line"));
    }

    #[test]
    fn test_unknown_formula() {
        let parsed = parse_agf("NM X 99 0 1.5 60 0 1\n", "T.AGF", "T");
        assert!(parsed.diagnostics.contains("Unknown dispersion formula"));
        assert_eq!(parsed.glasses[0].formula_id(), 99);
        assert!(parsed.glasses[0].formula().is_none());
    }

    #[test]
    fn test_data_before_first_record() {
        let parsed = parse_agf("CD 1 2 3\nNM A 1 0 1.5 60\n", "T.AGF", "T");
        assert_eq!(parsed.glasses.len(), 1);
        assert_eq!(
            parsed.diagnostics.to_string(),
            "T.AGF(1): (none): CD line outside any NM record\n"
        );
    }

    #[test]
    fn test_duplicate_names_are_kept_in_order() {
        let parsed = parse_agf("NM A 1 0 1.5 60\nNM A 2 0 1.6 50\n", "T.AGF", "T");
        assert_eq!(parsed.glasses.len(), 2);
        assert_eq!(parsed.glasses[1].formula_id(), 2);
        assert!(parsed.diagnostics.contains("duplicate glass name"));
    }

    #[test]
    fn test_crlf_and_blank_lines() {
        let parsed = parse_agf("NM A 1 0 1.5 60\r\n\r\nGC  spaced comment \r\n", "T.AGF", "T");
        assert_eq!(parsed.glasses[0].comment, "spaced comment");
        assert!(parsed.diagnostics.is_empty());
    }
}
