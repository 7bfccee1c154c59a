use crate::dataset::Dataset;
use crate::layout::{self, cell, row_offset};
use crate::styles::{self, Styles, AMOUNT, INTEGER};
use anyhow::Result;
use rust_xlsxwriter::{RowNum, Worksheet};

pub const FIRST_ROW: RowNum = 2;

pub const HEADERS: [&str; 7] = [
    "作业编号",
    "作业名称",
    "成本动因",
    "动因总量",
    "作业成本(元)",
    "分配率",
    "单位",
];

/// Driver rate formula: activity cost over driver volume.
pub fn rate_formula(row: RowNum) -> String {
    format!("={}/{}", cell(row, 4), cell(row, 3))
}

pub fn build(data: &Dataset, styles: &Styles) -> Result<Worksheet> {
    let mut sheet = Worksheet::new();
    sheet.set_name(layout::COST_DRIVERS)?;

    sheet.merge_range(0, 0, 0, 6, "成本动因选择与分配率", &styles.title)?;
    styles::write_header(&mut sheet, 1, 0, &HEADERS, &styles.header)?;

    let whole = styles.number(INTEGER);
    let rate = styles.number(AMOUNT);

    for (i, driver) in data.cost_drivers.iter().enumerate() {
        let row = row_offset(FIRST_ROW, i);
        sheet.write_string_with_format(row, 0, &driver.activity, &styles.text)?;
        sheet.write_string_with_format(row, 1, &driver.name, &styles.text)?;
        sheet.write_string_with_format(row, 2, &driver.driver, &styles.text)?;
        sheet.write_number_with_format(row, 3, driver.volume, &whole)?;
        sheet.write_number_with_format(row, 4, driver.cost, &whole)?;
        sheet.write_formula_with_format(row, 5, rate_formula(row).as_str(), &rate)?;
        sheet.write_string_with_format(row, 6, &driver.unit, &styles.text)?;
    }

    styles::set_column_widths(&mut sheet, &[10.0, 18.0, 18.0, 12.0, 15.0, 15.0, 10.0])?;

    Ok(sheet)
}
