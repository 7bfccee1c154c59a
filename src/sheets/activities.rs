use crate::dataset::Dataset;
use crate::layout::{self, cell, row_offset, sum_column};
use crate::styles::{self, Styles, INTEGER, PERCENT};
use anyhow::Result;
use rust_xlsxwriter::{RowNum, Worksheet};

pub const FIRST_ROW: RowNum = 2;

pub const HEADERS: [&str; 7] = [
    "作业编号",
    "作业名称",
    "作业层级",
    "作业描述",
    "作业成本(元)",
    "占比",
    "备注",
];

pub fn total_row(activities: usize) -> RowNum {
    row_offset(FIRST_ROW, activities)
}

pub fn build(data: &Dataset, styles: &Styles) -> Result<Worksheet> {
    let mut sheet = Worksheet::new();
    sheet.set_name(layout::ACTIVITIES)?;

    sheet.merge_range(0, 0, 0, 6, "作业清单", &styles.title)?;
    styles::write_header(&mut sheet, 1, 0, &HEADERS, &styles.header)?;

    let total = total_row(data.activities.len());
    let cost = styles.number(INTEGER);
    let share = styles.number(PERCENT);

    for (i, activity) in data.activities.iter().enumerate() {
        let row = row_offset(FIRST_ROW, i);
        let ratio = format!("={}/{}", cell(row, 4), cell(total, 4));

        sheet.write_string_with_format(row, 0, &activity.code, &styles.text)?;
        sheet.write_string_with_format(row, 1, &activity.name, &styles.text)?;
        sheet.write_string_with_format(row, 2, activity.level.label(), &styles.text)?;
        sheet.write_string_with_format(row, 3, &activity.description, &styles.text)?;
        sheet.write_number_with_format(row, 4, activity.cost, &cost)?;
        sheet.write_formula_with_format(row, 5, ratio.as_str(), &share)?;
    }

    sheet.write_string_with_format(total, 0, "合计", &styles.total_label)?;
    sheet.write_formula_with_format(total, 4, sum_column(4, FIRST_ROW, total - 1).as_str(), &styles.calc(INTEGER))?;
    sheet.write_string_with_format(total, 5, "100.0%", &styles.total_blank)?;
    styles::fill_total_row(&mut sheet, total, 7, &[0, 4, 5], styles)?;

    styles::set_column_widths(&mut sheet, &[10.0, 18.0, 10.0, 18.0, 15.0, 10.0, 15.0])?;

    Ok(sheet)
}
