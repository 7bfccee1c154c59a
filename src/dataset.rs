//! Literal tables behind the workbook.
//!
//! The case-study figures ship inside the binary as YAML and are deserialized
//! once at startup. Nothing here computes an allocation; the ABC figures are
//! carried exactly as they were worked out by hand.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::Path;

const EMBEDDED_CASE: &str = include_str!("../data/bearing_case.yml");

#[derive(Debug, Deserialize, Clone)]
pub struct Dataset {
    pub model: ModelInfo,
    pub products: Vec<Product>,
    pub work_hours: Vec<WorkHours>,
    pub direct_costs: Vec<DirectCost>,
    pub overheads: Vec<OverheadLine>,
    pub activities: Vec<Activity>,
    pub cost_drivers: Vec<CostDriver>,
    pub abc_overhead: Vec<AbcOverhead>,
    pub comparison: Vec<Comparison>,
    #[serde(default)]
    pub findings: Vec<String>,
    #[serde(default)]
    pub headlines: Vec<String>,
}

/// Front-matter for the guide sheet.
#[derive(Debug, Deserialize, Clone)]
pub struct ModelInfo {
    pub title: String,
    pub subtitle: String,
    pub version: String,
    pub scope: String,
    pub period: String,
    #[serde(default)]
    pub instructions: Vec<String>,
    #[serde(default)]
    pub notes: Vec<String>,
    #[serde(default)]
    pub team: Vec<String>,
    #[serde(default)]
    pub support: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Product {
    pub id: String,
    pub model: String,
    pub name: String,
    pub category: String,
    pub quantity: u32,
    pub batches: u32,
    pub avg_batch: u32,
    pub unit_price: f64,
    #[serde(default)]
    pub note: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WorkHours {
    pub product: String,
    pub std_hours: f64,
    pub machine_hours: f64,
    pub labour_total: f64,
    pub machine_total: f64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DirectCost {
    pub product: String,
    pub material: f64,
    pub labour: f64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct OverheadLine {
    pub code: String,
    pub item: String,
    pub amount: f64,
    pub nature: String,
}

/// The four tiers of the ABC cost hierarchy.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActivityLevel {
    #[serde(rename = "单位级")]
    Unit,
    #[serde(rename = "批次级")]
    Batch,
    #[serde(rename = "产品级")]
    Product,
    #[serde(rename = "设施级")]
    Facility,
}

impl ActivityLevel {
    pub const ALL: [ActivityLevel; 4] = [
        ActivityLevel::Unit,
        ActivityLevel::Batch,
        ActivityLevel::Product,
        ActivityLevel::Facility,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ActivityLevel::Unit => "单位级",
            ActivityLevel::Batch => "批次级",
            ActivityLevel::Product => "产品级",
            ActivityLevel::Facility => "设施级",
        }
    }

    /// Label used for the cost-distribution category, e.g. `单位级作业`.
    pub fn category_label(self) -> String {
        format!("{}作业", self.label())
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct Activity {
    pub code: String,
    pub name: String,
    pub level: ActivityLevel,
    pub description: String,
    pub cost: f64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CostDriver {
    pub activity: String,
    pub name: String,
    pub driver: String,
    pub volume: f64,
    pub cost: f64,
    pub unit: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AbcOverhead {
    pub product: String,
    pub amount: f64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Comparison {
    pub product: String,
    pub traditional_unit_cost: f64,
    pub abc_unit_cost: f64,
    pub cost_verdict: String,
    pub traditional_margin: f64,
    pub abc_margin: f64,
    pub margin_impact: String,
}

impl Dataset {
    /// The bearing workshop case compiled into the binary.
    pub fn embedded() -> Result<Self> {
        Self::from_yaml(EMBEDDED_CASE).context("Embedded case data is malformed")
    }

    pub fn from_yaml(source: &str) -> Result<Self> {
        let dataset: Dataset =
            serde_yml::from_str(source).context("Failed to parse case data YAML")?;
        dataset.validate()?;
        Ok(dataset)
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            bail!("Case data file not found: {}", path.display());
        }
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read case data '{}'", path.display()))?;
        Self::from_yaml(&source)
            .with_context(|| format!("Invalid case data in '{}'", path.display()))
    }

    /// Tables are paired with `products` and `activities` by position, so
    /// every paired table must list the same keys in the same order.
    pub fn validate(&self) -> Result<()> {
        if self.products.is_empty() {
            bail!("Case data has no products");
        }
        if self.activities.is_empty() {
            bail!("Case data has no activities");
        }

        let product_ids: Vec<&str> = self.products.iter().map(|p| p.id.as_str()).collect();
        check_aligned(
            "work_hours",
            &product_ids,
            self.work_hours.iter().map(|w| w.product.as_str()),
        )?;
        check_aligned(
            "direct_costs",
            &product_ids,
            self.direct_costs.iter().map(|d| d.product.as_str()),
        )?;
        check_aligned(
            "abc_overhead",
            &product_ids,
            self.abc_overhead.iter().map(|a| a.product.as_str()),
        )?;
        check_aligned(
            "comparison",
            &product_ids,
            self.comparison.iter().map(|c| c.product.as_str()),
        )?;

        let activity_codes: Vec<&str> = self.activities.iter().map(|a| a.code.as_str()).collect();
        check_aligned(
            "cost_drivers",
            &activity_codes,
            self.cost_drivers.iter().map(|d| d.activity.as_str()),
        )?;

        Ok(())
    }

    /// Activity cost summed per hierarchy level, in hierarchy order.
    /// Levels without activities are left out.
    pub fn cost_by_level(&self) -> Vec<(ActivityLevel, f64)> {
        ActivityLevel::ALL
            .iter()
            .filter_map(|&level| {
                let mut members = self.activities.iter().filter(|a| a.level == level).peekable();
                members.peek()?;
                let total: f64 = members.map(|a| a.cost).sum();
                Some((level, total))
            })
            .collect()
    }
}

fn check_aligned<'a>(
    table: &str,
    expected: &[&str],
    actual: impl Iterator<Item = &'a str>,
) -> Result<()> {
    let actual: Vec<&str> = actual.collect();
    if actual.len() != expected.len() {
        bail!(
            "Table '{}' has {} rows but {} were expected",
            table,
            actual.len(),
            expected.len()
        );
    }
    if let Some((row, (want, got))) = expected
        .iter()
        .zip(actual.iter())
        .enumerate()
        .find(|(_, (want, got))| want != got)
    {
        bail!(
            "Table '{}' row {} refers to '{}' but '{}' was expected",
            table,
            row + 1,
            got,
            want
        );
    }
    Ok(())
}
