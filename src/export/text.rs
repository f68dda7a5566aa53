//! Human-readable tables via [`fmt::Display`].
//!
//! ```text
//! Powys / Powys (W06000023)
//! Population (pop)
//!       2019       2020    Average    Diff.  % Diff.
//! 132447.000 133030.000 132738.500  583.000    0.440
//! ```

use std::fmt;

use crate::model::{Area, AreaStore, Measure};

const NO_DATA: &str = "<no data>";
const NO_MEASURES: &str = "<no measures>";
const UNNAMED: &str = "Unnamed";

fn number(value: f64) -> String {
    format!("{value:.3}")
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} ({})", self.label(), self.codename())?;
        if self.is_empty() {
            return writeln!(f, "{NO_DATA}");
        }

        let mut header: Vec<String> = self.readings().map(|(year, _)| year.to_string()).collect();
        let mut values: Vec<String> = self.readings().map(|(_, value)| number(value)).collect();
        header.extend(["Average", "Diff.", "% Diff."].map(String::from));
        values.extend([
            number(self.average()),
            number(self.difference()),
            number(self.difference_as_percentage()),
        ]);

        let widths: Vec<usize> = header
            .iter()
            .zip(&values)
            .map(|(h, v)| h.len().max(v.len()))
            .collect();

        for row in [&header, &values] {
            let line = row
                .iter()
                .zip(&widths)
                .map(|(cell, &width)| format!("{cell:>width$}"))
                .collect::<Vec<_>>()
                .join(" ");
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Area {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let title = match (self.name("eng").ok(), self.name("cym").ok()) {
            (Some(eng), Some(cym)) => format!("{eng} / {cym}"),
            (Some(name), None) | (None, Some(name)) => name.to_string(),
            (None, None) => self
                .names()
                .values()
                .next()
                .cloned()
                .unwrap_or_else(|| UNNAMED.to_string()),
        };
        writeln!(f, "{title} ({})", self.code())?;

        if self.is_empty() {
            return writeln!(f, "{NO_MEASURES}");
        }
        for measure in self.measures().values() {
            write!(f, "{measure}")?;
        }
        Ok(())
    }
}

impl fmt::Display for AreaStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, area) in self.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{area}")?;
        }
        Ok(())
    }
}
