//! Sheet order, names and A1-notation helpers.
//!
//! Rows and columns are zero-based everywhere in the crate, matching
//! `rust_xlsxwriter`. Only the formula text produced here is one-based.

use rust_xlsxwriter::{ColNum, RowNum};

pub const OUTPUT_FILE_NAME: &str = "瓦轴集团ABC成本模型_演示版.xlsx";

pub const GUIDE: &str = "说明";
pub const BASE_DATA: &str = "基础数据";
pub const OVERHEAD: &str = "成本归集";
pub const ACTIVITIES: &str = "作业识别";
pub const COST_DRIVERS: &str = "成本动因";
pub const PRODUCT_COST: &str = "产品成本(ABC)";
pub const COMPARISON: &str = "成本对比";
pub const CHARTS: &str = "可视化图表";

#[derive(Debug, Clone, Copy)]
pub struct SheetInfo {
    pub name: &'static str,
    pub description: &'static str,
}

/// Every sheet in workbook order.
pub const SHEETS: [SheetInfo; 8] = [
    SheetInfo {
        name: GUIDE,
        description: "使用说明和项目信息",
    },
    SheetInfo {
        name: BASE_DATA,
        description: "产品信息和生产数据",
    },
    SheetInfo {
        name: OVERHEAD,
        description: "制造费用明细",
    },
    SheetInfo {
        name: ACTIVITIES,
        description: "20个作业清单",
    },
    SheetInfo {
        name: COST_DRIVERS,
        description: "动因选择和分配率",
    },
    SheetInfo {
        name: PRODUCT_COST,
        description: "ABC方法完全成本",
    },
    SheetInfo {
        name: COMPARISON,
        description: "传统vs ABC对比分析",
    },
    SheetInfo {
        name: CHARTS,
        description: "成本对比图表",
    },
];

pub fn sheet_names() -> Vec<&'static str> {
    SHEETS.iter().map(|s| s.name).collect()
}

/// Column letters for a zero-based column index (`0` -> `A`, `26` -> `AA`).
pub fn column_name(col: ColNum) -> String {
    let mut n = u32::from(col) + 1;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = ((n - 1) % 26) as u8;
        letters.push((b'A' + rem) as char);
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}

/// A1 reference for a zero-based cell.
pub fn cell(row: RowNum, col: ColNum) -> String {
    format!("{}{}", column_name(col), row + 1)
}

pub fn range(first_row: RowNum, first_col: ColNum, last_row: RowNum, last_col: ColNum) -> String {
    format!("{}:{}", cell(first_row, first_col), cell(last_row, last_col))
}

/// `=SUM(..)` over one column between two rows, inclusive.
pub fn sum_column(col: ColNum, first_row: RowNum, last_row: RowNum) -> String {
    format!("=SUM({})", range(first_row, col, last_row, col))
}

/// Reference to a cell on another sheet, e.g. `基础数据!H3`.
pub fn sheet_cell(sheet: &str, row: RowNum, col: ColNum) -> String {
    format!("{}!{}", sheet, cell(row, col))
}

/// Zero-based row index from a count of preceding rows.
pub fn row_offset(start: RowNum, index: usize) -> RowNum {
    start + index as RowNum
}
