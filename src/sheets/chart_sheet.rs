use crate::charts::{self, ChartPlan};
use crate::dataset::Dataset;
use crate::layout::{self, row_offset};
use crate::styles::{self, Styles};
use anyhow::Result;
use rust_xlsxwriter::{RowNum, Worksheet};

pub const COST_TITLE_ROW: RowNum = 2;
/// Lowest row for the activity-mix block; keeps it clear of the column chart.
pub const MIX_TITLE_MIN_ROW: RowNum = 19;

pub const COST_HEADERS: [&str; 3] = ["产品型号", "传统方法", "ABC方法"];
pub const MIX_HEADERS: [&str; 2] = ["作业类别", "成本金额(元)"];

pub fn mix_title_row(products: usize) -> RowNum {
    let cost_end = row_offset(COST_TITLE_ROW + 2, products);
    MIX_TITLE_MIN_ROW.max(cost_end + 2)
}

/// The two charts placed on this sheet, in insertion order.
pub fn plans(data: &Dataset) -> [ChartPlan; 2] {
    let mix_title = mix_title_row(data.products.len());
    [
        charts::unit_cost_chart(COST_TITLE_ROW + 1, data.products.len(), (COST_TITLE_ROW, 4)),
        charts::activity_mix_chart(mix_title + 1, data.cost_by_level().len(), (mix_title, 4)),
    ]
}

pub fn build(data: &Dataset, styles: &Styles) -> Result<Worksheet> {
    let mut sheet = Worksheet::new();
    sheet.set_name(layout::CHARTS)?;

    sheet.write_string_with_format(0, 0, "ABC成本模型可视化分析", &styles.title)?;

    sheet.write_string_with_format(COST_TITLE_ROW, 0, "产品单位成本对比（元）", &styles.label)?;
    styles::write_header(&mut sheet, COST_TITLE_ROW + 1, 0, &COST_HEADERS, &styles.header)?;
    for (i, (product, record)) in data.products.iter().zip(&data.comparison).enumerate() {
        let row = row_offset(COST_TITLE_ROW + 2, i);
        sheet.write_string(row, 0, &product.model)?;
        sheet.write_number(row, 1, record.traditional_unit_cost)?;
        sheet.write_number(row, 2, record.abc_unit_cost)?;
    }

    let mix_title = mix_title_row(data.products.len());
    sheet.write_string_with_format(mix_title, 0, "作业成本分布", &styles.label)?;
    styles::write_header(&mut sheet, mix_title + 1, 0, &MIX_HEADERS, &styles.header)?;
    for (i, (level, amount)) in data.cost_by_level().into_iter().enumerate() {
        let row = row_offset(mix_title + 2, i);
        sheet.write_string(row, 0, level.category_label())?;
        sheet.write_number(row, 1, amount)?;
    }

    for plan in plans(data) {
        let (row, col) = plan.anchor;
        sheet.insert_chart(row, col, &plan.to_chart(layout::CHARTS))?;
    }

    Ok(sheet)
}
