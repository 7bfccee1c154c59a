//! One writer per worksheet. Each returns a finished, named sheet ready to be
//! pushed onto the workbook.

pub mod activities;
pub mod base_data;
pub mod chart_sheet;
pub mod comparison;
pub mod drivers;
pub mod guide;
pub mod overhead;
pub mod product_cost;
