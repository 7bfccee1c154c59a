use crate::dataset::Dataset;
use crate::layout::{self, SHEETS};
use crate::sheets;
use crate::styles::Styles;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use rust_xlsxwriter::{Workbook, Worksheet};
use std::path::Path;

/// Assembles all eight sheets in their fixed order.
///
/// `on_sheet` is called with each sheet name as soon as that sheet is done.
pub fn build_workbook(
    data: &Dataset,
    created: NaiveDate,
    mut on_sheet: impl FnMut(&str),
) -> Result<Workbook> {
    data.validate()?;

    let styles = Styles::new();
    let mut workbook = Workbook::new();

    for info in SHEETS {
        let sheet = build_sheet(info.name, data, created, &styles)
            .with_context(|| format!("Failed to build sheet '{}'", info.name))?;
        workbook.push_worksheet(sheet);
        log::debug!("sheet '{}' ready", info.name);
        on_sheet(info.name);
    }

    Ok(workbook)
}

fn build_sheet(name: &str, data: &Dataset, created: NaiveDate, styles: &Styles) -> Result<Worksheet> {
    match name {
        layout::GUIDE => sheets::guide::build(&data.model, created, styles),
        layout::BASE_DATA => sheets::base_data::build(data, styles),
        layout::OVERHEAD => sheets::overhead::build(data, styles),
        layout::ACTIVITIES => sheets::activities::build(data, styles),
        layout::COST_DRIVERS => sheets::drivers::build(data, styles),
        layout::PRODUCT_COST => sheets::product_cost::build(data, styles),
        layout::COMPARISON => sheets::comparison::build(data, styles),
        layout::CHARTS => sheets::chart_sheet::build(data, styles),
        other => anyhow::bail!("Unknown sheet '{}'", other),
    }
}

/// Builds the workbook and writes it to `output_path` in one save.
pub fn generate(
    data: &Dataset,
    created: NaiveDate,
    output_path: &Path,
    on_sheet: impl FnMut(&str),
) -> Result<()> {
    let mut workbook = build_workbook(data, created, on_sheet)?;

    create_output_directory_for_path(output_path)?;
    workbook
        .save(output_path)
        .with_context(|| format!("Failed to save Excel file '{}'", output_path.display()))?;

    log::info!("saved workbook to {}", output_path.display());
    Ok(())
}

fn create_output_directory_for_path(file_path: &Path) -> Result<()> {
    if let Some(parent_dir) = file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent_dir).with_context(|| {
            format!("Failed to create directory '{}'", parent_dir.display())
        })?;
    }
    Ok(())
}

pub fn sheet_done_line(name: &str) -> String {
    format!("工作表 '{}' 创建完成...", name)
}

/// Closing console report printed after a successful save.
pub fn summary_lines(data: &Dataset, output_path: &Path) -> Vec<String> {
    let mut lines = vec![
        String::new(),
        "✓ Excel模型创建成功!".to_string(),
        format!("✓ 文件保存为: {}", output_path.display()),
        String::new(),
        "模型包含以下工作表:".to_string(),
    ];
    lines.extend(
        SHEETS
            .iter()
            .enumerate()
            .map(|(i, info)| format!("  {}. {} - {}", i + 1, info.name, info.description)),
    );
    if !data.headlines.is_empty() {
        lines.push(String::new());
        lines.push("核心发现:".to_string());
        lines.extend(data.headlines.iter().map(|h| format!("  • {}", h)));
    }
    lines.push(String::new());
    lines.push("请使用Excel打开文件查看完整模型。".to_string());
    lines
}
