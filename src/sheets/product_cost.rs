//! Full product cost under ABC: direct cost plus the allocated overhead, then
//! unit cost and margin as live formulas against the product table.

use crate::dataset::Dataset;
use crate::layout::{self, cell, row_offset, sheet_cell, sum_column};
use crate::sheets::base_data;
use crate::styles::{self, Styles, AMOUNT, PERCENT, TWO_DECIMALS};
use anyhow::Result;
use rust_xlsxwriter::{ColNum, RowNum, Worksheet};

pub const FIRST_ROW: RowNum = 2;

pub const HEADERS: [&str; 11] = [
    "产品编号",
    "产品型号",
    "产量(件)",
    "直接材料",
    "直接人工",
    "ABC制造费用",
    "完全成本",
    "单位成本",
    "单位售价",
    "单位毛利",
    "毛利率",
];

/// Columns C..G carry a sum on the total row.
const SUMMED: std::ops::RangeInclusive<ColNum> = 2..=6;

/// Formula text for columns G..K of one product row.
pub fn row_formulas(row: RowNum, product_index: usize) -> [String; 5] {
    let price_ref = sheet_cell(
        layout::BASE_DATA,
        base_data::product_row(product_index),
        base_data::PRICE_COL,
    );
    [
        format!("={}+{}+{}", cell(row, 3), cell(row, 4), cell(row, 5)),
        format!("={}/{}", cell(row, 6), cell(row, 2)),
        format!("={}", price_ref),
        format!("={}-{}", cell(row, 8), cell(row, 7)),
        format!("={}/{}", cell(row, 9), cell(row, 8)),
    ]
}

pub fn build(data: &Dataset, styles: &Styles) -> Result<Worksheet> {
    let mut sheet = Worksheet::new();
    sheet.set_name(layout::PRODUCT_COST)?;

    sheet.merge_range(0, 0, 0, 10, "产品完全成本汇总表（ABC方法）", &styles.title)?;
    styles::write_header(&mut sheet, 1, 0, &HEADERS, &styles.header_wrapped)?;

    let amount = styles.number(AMOUNT);
    let calc_amount = styles.calc(AMOUNT);
    let calc_unit = styles.calc(TWO_DECIMALS);
    let calc_ratio = styles.calc(PERCENT);
    let price = styles.number(TWO_DECIMALS);

    let rows = data
        .products
        .iter()
        .zip(&data.direct_costs)
        .zip(&data.abc_overhead)
        .enumerate();

    for (i, ((product, direct), overhead)) in rows {
        let row = row_offset(FIRST_ROW, i);
        sheet.write_string_with_format(row, 0, &product.id, &styles.text)?;
        sheet.write_string_with_format(row, 1, &product.model, &styles.text)?;
        sheet.write_number_with_format(row, 2, f64::from(product.quantity), &amount)?;
        sheet.write_number_with_format(row, 3, direct.material, &amount)?;
        sheet.write_number_with_format(row, 4, direct.labour, &amount)?;
        sheet.write_number_with_format(row, 5, overhead.amount, &amount)?;

        let [full, unit, unit_price, margin, margin_rate] = row_formulas(row, i);
        sheet.write_formula_with_format(row, 6, full.as_str(), &calc_amount)?;
        sheet.write_formula_with_format(row, 7, unit.as_str(), &calc_unit)?;
        sheet.write_formula_with_format(row, 8, unit_price.as_str(), &price)?;
        sheet.write_formula_with_format(row, 9, margin.as_str(), &calc_unit)?;
        sheet.write_formula_with_format(row, 10, margin_rate.as_str(), &calc_ratio)?;
    }

    let total = row_offset(FIRST_ROW, data.products.len());
    sheet.write_string_with_format(total, 0, "合计", &styles.total_label)?;
    for col in SUMMED {
        sheet.write_formula_with_format(total, col, sum_column(col, FIRST_ROW, total - 1).as_str(), &calc_amount)?;
    }

    styles::set_column_widths(
        &mut sheet,
        &[10.0, 12.0, 12.0, 12.0, 12.0, 15.0, 15.0, 12.0, 12.0, 12.0, 10.0],
    )?;

    Ok(sheet)
}
