//! Reads a generated workbook back and summarises what landed in it.

use crate::layout;
use anyhow::{anyhow, bail, Result};
use calamine::{open_workbook, Reader, Xlsx};
use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetSummary {
    pub name: String,
    /// Used range in A1 notation, `None` for an empty sheet.
    pub used_range: Option<String>,
    pub formulas: usize,
}

impl fmt::Display for SheetSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} ({} formulas)",
            self.name,
            self.used_range.as_deref().unwrap_or("empty"),
            self.formulas
        )
    }
}

pub fn inspect_workbook(path: &Path) -> Result<Vec<SheetSummary>> {
    if !path.exists() {
        bail!("Excel file not found: {}", path.display());
    }

    let mut workbook: Xlsx<_> = open_workbook(path)
        .map_err(|e| anyhow!("Failed to open Excel file '{}': {}", path.display(), e))?;

    let mut summaries = Vec::new();
    for name in workbook.sheet_names() {
        let range = workbook
            .worksheet_range(&name)
            .map_err(|e| anyhow!("Failed to read '{}' sheet: {}", name, e))?;
        let formulas = workbook
            .worksheet_formula(&name)
            .map_err(|e| anyhow!("Failed to read formulas of '{}' sheet: {}", name, e))?;

        let used_range = match (range.start(), range.end()) {
            (Some((r0, c0)), Some((r1, c1))) => Some(layout::range(r0, c0 as u16, r1, c1 as u16)),
            _ => None,
        };
        let formula_count = formulas
            .used_cells()
            .filter(|(_, _, f)| !f.is_empty())
            .count();

        log::debug!("inspected '{}': {} formulas", name, formula_count);
        summaries.push(SheetSummary {
            name,
            used_range,
            formulas: formula_count,
        });
    }

    Ok(summaries)
}
