//! # Tabulation
//!
//! A headless table model built from a list of entities: one header per
//! persistent field, one row of rendered values per entity. Front ends
//! render it however they like; `Display` gives a plain text grid.
//!
//! ```text
//! idClient | name | address | email     | age
//! ---------+------+---------+-----------+----
//! 1        | Ana  | Main St | ana@x.com | 30
//! ```

use std::fmt;

use super::descriptor::EntityDescriptor;

/// Column headers plus rendered cell values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tabulation {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Tabulation {
    /// Tabulates `entities` in list order using the descriptor's fields.
    pub fn from_entities<T>(descriptor: &EntityDescriptor<T>, entities: &[T]) -> Self {
        let headers = descriptor
            .fields()
            .iter()
            .map(|f| f.name().to_string())
            .collect();

        let rows = entities
            .iter()
            .map(|entity| {
                descriptor
                    .values(entity)
                    .iter()
                    .map(|v| v.to_string())
                    .collect()
            })
            .collect();

        Tabulation { headers, rows }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl fmt::Display for Tabulation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let line = |cells: &[String]| -> String {
            cells
                .iter()
                .zip(&widths)
                .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
                .collect::<Vec<_>>()
                .join(" | ")
                .trim_end()
                .to_string()
        };

        writeln!(f, "{}", line(&self.headers))?;
        let rule = widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-");
        writeln!(f, "{}", rule)?;

        for row in &self.rows {
            writeln!(f, "{}", line(row))?;
        }

        Ok(())
    }
}
