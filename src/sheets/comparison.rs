use crate::dataset::Dataset;
use crate::layout::{self, cell, row_offset};
use crate::styles::{self, Styles, PERCENT, TWO_DECIMALS};
use anyhow::Result;
use rust_xlsxwriter::{RowNum, Worksheet};

pub const COST_HEADERS: [&str; 6] = [
    "产品型号",
    "传统方法(元)",
    "ABC方法(元)",
    "差异(元)",
    "差异率",
    "分析",
];

pub const MARGIN_HEADERS: [&str; 5] = ["产品型号", "传统方法", "ABC方法", "差异", "决策影响"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComparisonLayout {
    pub cost_title: RowNum,
    pub cost_first: RowNum,
    pub margin_title: RowNum,
    pub margin_first: RowNum,
    pub findings_title: RowNum,
}

impl ComparisonLayout {
    pub fn for_products(count: usize) -> Self {
        let cost_title = 2;
        let cost_first = cost_title + 2;
        let margin_title = row_offset(cost_first, count) + 1;
        let margin_first = margin_title + 2;
        let findings_title = row_offset(margin_first, count) + 1;
        ComparisonLayout {
            cost_title,
            cost_first,
            margin_title,
            margin_first,
            findings_title,
        }
    }
}

/// `=C{r}-B{r}`: ABC minus traditional on the same row.
pub fn difference_formula(row: RowNum) -> String {
    format!("={}-{}", cell(row, 2), cell(row, 1))
}

pub fn build(data: &Dataset, styles: &Styles) -> Result<Worksheet> {
    let mut sheet = Worksheet::new();
    sheet.set_name(layout::COMPARISON)?;

    let rows = ComparisonLayout::for_products(data.products.len());

    sheet.merge_range(0, 0, 0, 6, "传统方法 vs ABC方法成本对比分析", &styles.title)?;

    let money = styles.number(TWO_DECIMALS);
    let ratio = styles.number(PERCENT);
    let calc_money = styles.calc(TWO_DECIMALS);
    let calc_ratio = styles.calc(PERCENT);

    sheet.write_string_with_format(rows.cost_title, 0, "单位成本对比", &styles.section)?;
    styles::write_header(&mut sheet, rows.cost_title + 1, 0, &COST_HEADERS, &styles.header)?;

    for (i, (product, record)) in data.products.iter().zip(&data.comparison).enumerate() {
        let row = row_offset(rows.cost_first, i);
        let share = format!("={}/{}", cell(row, 3), cell(row, 1));

        sheet.write_string_with_format(row, 0, &product.model, &styles.text)?;
        sheet.write_number_with_format(row, 1, record.traditional_unit_cost, &money)?;
        sheet.write_number_with_format(row, 2, record.abc_unit_cost, &money)?;
        sheet.write_formula_with_format(row, 3, difference_formula(row).as_str(), &calc_money)?;
        sheet.write_formula_with_format(row, 4, share.as_str(), &calc_ratio)?;
        sheet.write_string_with_format(row, 5, &record.cost_verdict, &styles.text)?;
    }

    sheet.write_string_with_format(rows.margin_title, 0, "毛利率对比", &styles.section)?;
    styles::write_header(&mut sheet, rows.margin_title + 1, 0, &MARGIN_HEADERS, &styles.header)?;

    for (i, (product, record)) in data.products.iter().zip(&data.comparison).enumerate() {
        let row = row_offset(rows.margin_first, i);
        sheet.write_string_with_format(row, 0, &product.model, &styles.text)?;
        sheet.write_number_with_format(row, 1, record.traditional_margin, &ratio)?;
        sheet.write_number_with_format(row, 2, record.abc_margin, &ratio)?;
        sheet.write_formula_with_format(row, 3, difference_formula(row).as_str(), &calc_ratio)?;
        sheet.write_string_with_format(row, 4, &record.margin_impact, &styles.text)?;
    }

    sheet.write_string_with_format(rows.findings_title, 0, "关键发现：", &styles.alert(12, true))?;
    let finding = styles.alert(10, false);
    for (i, line) in data.findings.iter().enumerate() {
        sheet.write_string_with_format(row_offset(rows.findings_title + 1, i), 0, line, &finding)?;
    }

    styles::set_column_widths(&mut sheet, &[18.0; 6])?;

    Ok(sheet)
}
