use crate::dataset::Dataset;
use crate::layout::{self, cell, row_offset, sum_column};
use crate::styles::{self, Styles, AMOUNT, INTEGER, ONE_DECIMAL};
use anyhow::Result;
use rust_xlsxwriter::{ColNum, RowNum, Worksheet};

/// First data row of the product table. Other sheets point back into it.
pub const PRODUCT_FIRST_ROW: RowNum = 2;
pub const QUANTITY_COL: ColNum = 4;
pub const PRICE_COL: ColNum = 7;

pub const PRODUCT_HEADERS: [&str; 9] = [
    "产品编号",
    "产品型号",
    "产品名称",
    "产品类别",
    "季度产量(件)",
    "批次数",
    "平均批量",
    "单位售价(元)",
    "备注",
];

pub const WORK_HOUR_HEADERS: [&str; 5] = [
    "产品编号",
    "单件标准工时(h)",
    "单件机器小时(h)",
    "季度总人工(h)",
    "季度总机时(h)",
];

pub const DIRECT_COST_HEADERS: [&str; 5] = [
    "产品编号",
    "直接材料(元)",
    "直接人工(元)",
    "直接成本合计(元)",
    "单位直接成本(元)",
];

/// Row positions of the three stacked tables, derived from the product count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BaseDataLayout {
    pub product_total: RowNum,
    pub work_hour_title: RowNum,
    pub work_hour_first: RowNum,
    pub work_hour_total: RowNum,
    pub direct_cost_title: RowNum,
    pub direct_cost_first: RowNum,
}

impl BaseDataLayout {
    pub fn for_products(count: usize) -> Self {
        let product_total = row_offset(PRODUCT_FIRST_ROW, count);
        let work_hour_title = product_total + 2;
        let work_hour_first = work_hour_title + 2;
        let work_hour_total = row_offset(work_hour_first, count);
        let direct_cost_title = work_hour_total + 2;
        let direct_cost_first = direct_cost_title + 2;
        BaseDataLayout {
            product_total,
            work_hour_title,
            work_hour_first,
            work_hour_total,
            direct_cost_title,
            direct_cost_first,
        }
    }
}

/// Row of the `index`-th product in the product table.
pub fn product_row(index: usize) -> RowNum {
    row_offset(PRODUCT_FIRST_ROW, index)
}

pub fn build(data: &Dataset, styles: &Styles) -> Result<Worksheet> {
    let mut sheet = Worksheet::new();
    sheet.set_name(layout::BASE_DATA)?;

    let rows = BaseDataLayout::for_products(data.products.len());

    write_products(&mut sheet, data, styles, rows.product_total)?;
    write_work_hours(&mut sheet, data, styles, &rows)?;
    write_direct_costs(&mut sheet, data, styles, &rows)?;

    styles::set_column_widths(&mut sheet, &[15.0; 9])?;

    Ok(sheet)
}

fn write_products(
    sheet: &mut Worksheet,
    data: &Dataset,
    styles: &Styles,
    total_row: RowNum,
) -> Result<()> {
    sheet.merge_range(0, 0, 0, 8, "产品信息表", &styles.title)?;
    styles::write_header(sheet, 1, 0, &PRODUCT_HEADERS, &styles.header)?;

    let integer = styles.number(INTEGER);
    let amount = styles.number(AMOUNT);

    for (i, product) in data.products.iter().enumerate() {
        let row = product_row(i);
        sheet.write_string_with_format(row, 0, &product.id, &styles.text)?;
        sheet.write_string_with_format(row, 1, &product.model, &styles.text)?;
        sheet.write_string_with_format(row, 2, &product.name, &styles.text)?;
        sheet.write_string_with_format(row, 3, &product.category, &styles.text)?;
        sheet.write_number_with_format(row, 4, f64::from(product.quantity), &integer)?;
        sheet.write_number_with_format(row, 5, f64::from(product.batches), &integer)?;
        sheet.write_number_with_format(row, 6, f64::from(product.avg_batch), &integer)?;
        sheet.write_number_with_format(row, 7, product.unit_price, &amount)?;
        sheet.write_string_with_format(row, 8, &product.note, &styles.text)?;
    }

    let last = total_row - 1;
    let total = styles.calc(INTEGER);
    sheet.write_string_with_format(total_row, 0, "合计", &styles.total_label)?;
    sheet.write_formula_with_format(total_row, 4, sum_column(4, PRODUCT_FIRST_ROW, last).as_str(), &total)?;
    sheet.write_formula_with_format(total_row, 5, sum_column(5, PRODUCT_FIRST_ROW, last).as_str(), &total)?;
    styles::fill_total_row(sheet, total_row, 9, &[0, 4, 5], styles)?;

    Ok(())
}

fn write_work_hours(
    sheet: &mut Worksheet,
    data: &Dataset,
    styles: &Styles,
    rows: &BaseDataLayout,
) -> Result<()> {
    sheet.merge_range(rows.work_hour_title, 0, rows.work_hour_title, 4, "产品工时统计表", &styles.title)?;
    styles::write_header(sheet, rows.work_hour_title + 1, 0, &WORK_HOUR_HEADERS, &styles.header_wrapped)?;

    let hours = styles.number(ONE_DECIMAL);
    let integer = styles.number(INTEGER);

    for (i, record) in data.work_hours.iter().enumerate() {
        let row = row_offset(rows.work_hour_first, i);
        sheet.write_string_with_format(row, 0, &record.product, &styles.text)?;
        sheet.write_number_with_format(row, 1, record.std_hours, &hours)?;
        sheet.write_number_with_format(row, 2, record.machine_hours, &hours)?;
        sheet.write_number_with_format(row, 3, record.labour_total, &integer)?;
        sheet.write_number_with_format(row, 4, record.machine_total, &integer)?;
    }

    let total_row = rows.work_hour_total;
    let last = total_row - 1;
    let total = styles.calc(INTEGER);
    sheet.write_string_with_format(total_row, 0, "合计", &styles.total_label)?;
    sheet.write_formula_with_format(total_row, 3, sum_column(3, rows.work_hour_first, last).as_str(), &total)?;
    sheet.write_formula_with_format(total_row, 4, sum_column(4, rows.work_hour_first, last).as_str(), &total)?;
    styles::fill_total_row(sheet, total_row, 5, &[0, 3, 4], styles)?;

    Ok(())
}

fn write_direct_costs(
    sheet: &mut Worksheet,
    data: &Dataset,
    styles: &Styles,
    rows: &BaseDataLayout,
) -> Result<()> {
    sheet.merge_range(rows.direct_cost_title, 0, rows.direct_cost_title, 4, "直接成本汇总表", &styles.title)?;
    styles::write_header(sheet, rows.direct_cost_title + 1, 0, &DIRECT_COST_HEADERS, &styles.header_wrapped)?;

    let amount = styles.number(AMOUNT);

    for (i, record) in data.direct_costs.iter().enumerate() {
        let row = row_offset(rows.direct_cost_first, i);
        let subtotal = format!("={}+{}", cell(row, 1), cell(row, 2));
        let per_unit = format!("={}/{}", cell(row, 3), cell(product_row(i), QUANTITY_COL));

        sheet.write_string_with_format(row, 0, &record.product, &styles.text)?;
        sheet.write_number_with_format(row, 1, record.material, &amount)?;
        sheet.write_number_with_format(row, 2, record.labour, &amount)?;
        sheet.write_formula_with_format(row, 3, subtotal.as_str(), &amount)?;
        sheet.write_formula_with_format(row, 4, per_unit.as_str(), &amount)?;
    }

    Ok(())
}
