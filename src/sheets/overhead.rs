use crate::dataset::Dataset;
use crate::layout::{self, cell, row_offset, sum_column};
use crate::styles::{self, Styles, INTEGER, PERCENT};
use anyhow::Result;
use rust_xlsxwriter::{RowNum, Worksheet};

pub const FIRST_ROW: RowNum = 2;

pub const HEADERS: [&str; 6] = ["费用编号", "费用科目", "季度发生额(元)", "占比", "归属性质", "备注"];

pub fn total_row(lines: usize) -> RowNum {
    row_offset(FIRST_ROW, lines)
}

pub fn build(data: &Dataset, styles: &Styles) -> Result<Worksheet> {
    let mut sheet = Worksheet::new();
    sheet.set_name(layout::OVERHEAD)?;

    sheet.merge_range(0, 0, 0, 5, "制造费用汇总表（季度，元）", &styles.title)?;
    styles::write_header(&mut sheet, 1, 0, &HEADERS, &styles.header)?;

    let total = total_row(data.overheads.len());
    let amount = styles.number(INTEGER);
    let share = styles.number(PERCENT);

    for (i, line) in data.overheads.iter().enumerate() {
        let row = row_offset(FIRST_ROW, i);
        let ratio = format!("={}/{}", cell(row, 2), cell(total, 2));

        sheet.write_string_with_format(row, 0, &line.code, &styles.text)?;
        sheet.write_string_with_format(row, 1, &line.item, &styles.text)?;
        sheet.write_number_with_format(row, 2, line.amount, &amount)?;
        sheet.write_formula_with_format(row, 3, ratio.as_str(), &share)?;
        sheet.write_string_with_format(row, 4, &line.nature, &styles.text)?;
    }

    sheet.write_string_with_format(total, 0, "合计", &styles.total_label)?;
    sheet.write_formula_with_format(total, 2, sum_column(2, FIRST_ROW, total - 1).as_str(), &styles.calc(INTEGER))?;
    sheet.write_string_with_format(total, 3, "100.0%", &styles.total_blank)?;
    styles::fill_total_row(&mut sheet, total, 6, &[0, 2, 3], styles)?;

    styles::set_column_widths(&mut sheet, &[10.0, 20.0, 15.0, 10.0, 20.0, 15.0])?;

    Ok(sheet)
}
