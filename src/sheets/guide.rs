use crate::dataset::ModelInfo;
use crate::layout::{self, row_offset};
use crate::styles::{self, Styles, FONT_NAME, HEADER_FILL, SUBTITLE_GREY};
use anyhow::Result;
use chrono::NaiveDate;
use rust_xlsxwriter::{Color, Format, RowNum, Worksheet};

const INSTRUCTIONS_ROW: RowNum = 9;
const MIN_NOTES_ROW: RowNum = 16;
const MIN_TEAM_ROW: RowNum = 22;
const MIN_SUPPORT_ROW: RowNum = 26;

/// Heading rows of the four text blocks. Each block starts one blank row
/// after the lines of the block above it, and never above its usual row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuideLayout {
    pub instructions: RowNum,
    pub notes: RowNum,
    pub team: RowNum,
    pub support: RowNum,
}

impl GuideLayout {
    pub fn for_model(model: &ModelInfo) -> Self {
        let next = |heading: RowNum, lines: usize, min: RowNum| {
            (row_offset(heading, lines) + 2).max(min)
        };
        let instructions = INSTRUCTIONS_ROW;
        let notes = next(instructions, model.instructions.len(), MIN_NOTES_ROW);
        let team = next(notes, model.notes.len(), MIN_TEAM_ROW);
        let support = next(team, model.team.len(), MIN_SUPPORT_ROW);
        GuideLayout {
            instructions,
            notes,
            team,
            support,
        }
    }
}

/// Creation date as printed on the guide sheet.
pub fn format_created(date: NaiveDate) -> String {
    date.format("%Y年%m月%d日").to_string()
}

pub fn build(model: &ModelInfo, created: NaiveDate, styles: &Styles) -> Result<Worksheet> {
    let mut sheet = Worksheet::new();
    sheet.set_name(layout::GUIDE)?;

    let banner = Format::new()
        .set_font_name(FONT_NAME)
        .set_font_size(18)
        .set_bold()
        .set_font_color(Color::RGB(HEADER_FILL));
    let subtitle = Format::new()
        .set_font_name(FONT_NAME)
        .set_font_size(12)
        .set_italic()
        .set_font_color(Color::RGB(SUBTITLE_GREY));

    sheet.write_string_with_format(1, 1, &model.title, &banner)?;
    sheet.write_string_with_format(2, 1, &model.subtitle, &subtitle)?;

    let facts = [
        ("模型版本：", model.version.clone()),
        ("创建日期：", format_created(created)),
        ("适用范围：", model.scope.clone()),
        ("核算期间：", model.period.clone()),
    ];
    for (i, (label, value)) in facts.iter().enumerate() {
        let row = row_offset(4, i);
        sheet.write_string(row, 1, *label)?;
        sheet.write_string(row, 2, value)?;
    }

    let rows = GuideLayout::for_model(model);
    write_block(&mut sheet, rows.instructions, "使用说明：", &model.instructions, styles)?;
    write_block(&mut sheet, rows.notes, "注意事项：", &model.notes, styles)?;

    sheet.write_string_with_format(rows.team, 1, "项目组成员：", &styles.label)?;
    for (i, line) in model.team.iter().enumerate() {
        sheet.write_string(row_offset(rows.team + 1, i), 1, line)?;
    }

    sheet.write_string_with_format(rows.support, 1, "技术支持：", &styles.label)?;
    for (i, line) in model.support.iter().enumerate() {
        sheet.write_string(row_offset(rows.support + 1, i), 1, line)?;
    }

    styles::set_column_widths(&mut sheet, &[3.0, 25.0, 40.0])?;

    Ok(sheet)
}

fn write_block(
    sheet: &mut Worksheet,
    row: RowNum,
    heading: &str,
    lines: &[String],
    styles: &Styles,
) -> Result<()> {
    sheet.write_string_with_format(row, 1, heading, &styles.section)?;
    for (i, line) in lines.iter().enumerate() {
        sheet.write_string_with_format(row_offset(row + 1, i), 1, line, &styles.plain)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;

    #[test]
    fn test_embedded_case_keeps_usual_rows() {
        let data = Dataset::embedded().unwrap();
        let rows = GuideLayout::for_model(&data.model);
        // B10, B17, B23, B27
        assert_eq!(
            rows,
            GuideLayout {
                instructions: 9,
                notes: 16,
                team: 22,
                support: 26,
            }
        );
    }

    #[test]
    fn test_longer_blocks_push_later_headings_down() {
        let mut model = Dataset::embedded().unwrap().model;
        model.instructions = (1..=9).map(|i| format!("{}. step", i)).collect();
        model.team = (1..=5).map(|i| format!("member {}", i)).collect();

        let rows = GuideLayout::for_model(&model);
        assert_eq!(rows.notes, 20);
        assert_eq!(rows.team, 26);
        assert_eq!(rows.support, 33);
    }

    #[test]
    fn test_format_created() {
        let date = NaiveDate::from_ymd_opt(2024, 12, 5).unwrap();
        assert_eq!(format_created(date), "2024年12月05日");
    }
}
