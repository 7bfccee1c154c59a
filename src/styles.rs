//! Shared cell formats and the two layout helpers every sheet uses.

use anyhow::Result;
use rust_xlsxwriter::{Color, ColNum, Format, FormatAlign, FormatBorder, RowNum, Worksheet};

pub const FONT_NAME: &str = "微软雅黑";

pub const HEADER_FILL: u32 = 0x4472C4;
pub const CALC_FILL: u32 = 0xDDEBF7;
pub const SUBTITLE_GREY: u32 = 0x7F7F7F;
pub const ALERT_RED: u32 = 0xC00000;

pub const INTEGER: &str = "#,##0";
pub const AMOUNT: &str = "#,##0.00";
pub const ONE_DECIMAL: &str = "0.0";
pub const TWO_DECIMALS: &str = "0.00";
pub const PERCENT: &str = "0.0%";

/// Reusable formats, created once per workbook.
#[derive(Clone, Debug)]
pub struct Styles {
    pub header: Format,
    pub header_wrapped: Format,
    pub title: Format,
    pub section: Format,
    pub label: Format,
    pub text: Format,
    pub plain: Format,
    pub total_label: Format,
    pub total_blank: Format,
}

impl Styles {
    pub fn new() -> Self {
        let header = Format::new()
            .set_font_name(FONT_NAME)
            .set_font_size(11)
            .set_bold()
            .set_font_color(Color::White)
            .set_background_color(Color::RGB(HEADER_FILL))
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter)
            .set_border(FormatBorder::Thin);

        let header_wrapped = header.clone().set_text_wrap();

        let title = Format::new()
            .set_font_name(FONT_NAME)
            .set_font_size(14)
            .set_bold();

        let section = Format::new()
            .set_font_name(FONT_NAME)
            .set_font_size(12)
            .set_bold();

        let label = Format::new()
            .set_font_name(FONT_NAME)
            .set_font_size(11)
            .set_bold();

        let plain = Format::new().set_font_name(FONT_NAME).set_font_size(10);

        let text = plain.clone().set_border(FormatBorder::Thin);

        let total_blank = Format::new()
            .set_background_color(Color::RGB(CALC_FILL))
            .set_border(FormatBorder::Thin);

        let total_label = total_blank
            .clone()
            .set_font_name(FONT_NAME)
            .set_font_size(10)
            .set_bold();

        Styles {
            header,
            header_wrapped,
            title,
            section,
            label,
            text,
            plain,
            total_label,
            total_blank,
        }
    }

    /// Bordered body cell, right-aligned with a number format.
    pub fn number(&self, num_format: &str) -> Format {
        self.text
            .clone()
            .set_num_format(num_format)
            .set_align(FormatAlign::Right)
    }

    /// Formula cell on the light-blue "do not edit" fill.
    pub fn calc(&self, num_format: &str) -> Format {
        self.number(num_format)
            .set_background_color(Color::RGB(CALC_FILL))
    }

    /// Font-only emphasis in the alert color.
    pub fn alert(&self, size: u8, bold: bool) -> Format {
        let format = Format::new()
            .set_font_name(FONT_NAME)
            .set_font_size(size)
            .set_font_color(Color::RGB(ALERT_RED));
        if bold {
            format.set_bold()
        } else {
            format
        }
    }
}

pub fn set_column_widths(worksheet: &mut Worksheet, widths: &[f64]) -> Result<()> {
    for (col, width) in widths.iter().enumerate() {
        worksheet.set_column_width(col as ColNum, *width)?;
    }
    Ok(())
}

/// Writes a header row starting at `first_col`.
pub fn write_header(
    worksheet: &mut Worksheet,
    row: RowNum,
    first_col: ColNum,
    headers: &[&str],
    format: &Format,
) -> Result<()> {
    for (offset, header) in headers.iter().enumerate() {
        worksheet.write_string_with_format(row, first_col + offset as ColNum, *header, format)?;
    }
    Ok(())
}

/// Fills the cells of a total row that carry no value, so the calc fill and
/// border run the full width of the table.
pub fn fill_total_row(
    worksheet: &mut Worksheet,
    row: RowNum,
    columns: ColNum,
    skip: &[ColNum],
    styles: &Styles,
) -> Result<()> {
    for col in 0..columns {
        if !skip.contains(&col) {
            worksheet.write_blank(row, col, &styles.total_blank)?;
        }
    }
    Ok(())
}
