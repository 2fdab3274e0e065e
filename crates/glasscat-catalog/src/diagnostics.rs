//! Human-readable load diagnostics.
//!
//! Loaders never abort on a malformed record. Each anomaly becomes one
//! [`Diagnostic`] and parsing continues with the next line or element. The
//! collected [`Diagnostics`] render one line per entry:
//!
//! ```text
//! SCHOTT.AGF(12): N-BK7: TD line expects 7 values, found 6
//! HOYA.xml: FC5: missing LowCTE
//! ```

use std::fmt;

/// One anomaly found while loading a catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    /// File name the record came from.
    pub source: String,
    /// 1-based line number, when the format has lines.
    pub line: Option<usize>,
    /// Name of the glass being parsed, or `(none)` outside any record.
    pub glass: String,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "{}({}): {}: {}", self.source, line, self.glass, self.message),
            None => write!(f, "{}: {}: {}", self.source, self.glass, self.message),
        }
    }
}

/// Diagnostics accumulated over one load call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic and emit it as a warning.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        log::warn!("{}", diagnostic);
        self.entries.push(diagnostic);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.entries.iter()
    }

    /// Whether any message contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.entries.iter().any(|d| d.message.contains(needle))
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for diagnostic in &self.entries {
            writeln!(f, "{}", diagnostic)?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_formats() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.push(Diagnostic {
            source: "SCHOTT.AGF".into(),
            line: Some(12),
            glass: "N-BK7".into(),
            message: "TD line expects 7 values, found 6".into(),
        });
        diagnostics.push(Diagnostic {
            source: "HOYA.xml".into(),
            line: None,
            glass: "FC5".into(),
            message: "missing LowCTE".into(),
        });
        assert_eq!(
            diagnostics.to_string(),
            "SCHOTT.AGF(12): N-BK7: TD line expects 7 values, found 6\nHOYA.xml: FC5: missing LowCTE\n"
        );
        assert!(diagnostics.contains("LowCTE"));
        assert_eq!(diagnostics.len(), 2);
    }
}
