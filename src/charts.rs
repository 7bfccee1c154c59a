//! Chart definitions for the visualisation sheet.
//!
//! Charts are described as plain plans first so their cell ranges can be
//! checked without a workbook, then turned into `rust_xlsxwriter` charts.

use crate::layout;
use rust_xlsxwriter::{Chart, ChartType, ColNum, RowNum};

pub const COST_CHART_TITLE: &str = "传统方法 vs ABC方法 单位成本对比";
pub const MIX_CHART_TITLE: &str = "作业成本分布";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    ClusteredColumn,
    Pie,
}

impl ChartKind {
    fn chart_type(self) -> ChartType {
        match self {
            ChartKind::ClusteredColumn => ChartType::Column,
            ChartKind::Pie => ChartType::Pie,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRange {
    pub first_row: RowNum,
    pub first_col: ColNum,
    pub last_row: RowNum,
    pub last_col: ColNum,
}

impl CellRange {
    pub fn column(col: ColNum, first_row: RowNum, last_row: RowNum) -> Self {
        CellRange {
            first_row,
            first_col: col,
            last_row,
            last_col: col,
        }
    }

    pub fn a1(&self) -> String {
        layout::range(self.first_row, self.first_col, self.last_row, self.last_col)
    }

    fn on<'a>(&self, sheet: &'a str) -> (&'a str, RowNum, ColNum, RowNum, ColNum) {
        (sheet, self.first_row, self.first_col, self.last_row, self.last_col)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesPlan {
    /// Cell holding the series name.
    pub name: (RowNum, ColNum),
    pub categories: CellRange,
    pub values: CellRange,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartPlan {
    pub kind: ChartKind,
    pub title: &'static str,
    pub x_axis: Option<&'static str>,
    pub y_axis: Option<&'static str>,
    pub style: Option<u8>,
    /// Width and height in pixels; `None` keeps the library default.
    pub size: Option<(u32, u32)>,
    /// Top-left cell the chart is anchored to.
    pub anchor: (RowNum, ColNum),
    pub series: Vec<SeriesPlan>,
}

/// Converts a physical length to pixels at 96 dpi.
pub fn cm_to_pixels(cm: f64) -> u32 {
    (cm / 2.54 * 96.0).round() as u32
}

/// Clustered columns comparing traditional and ABC unit cost.
///
/// `header_row` holds the series names in columns B and C, the model codes
/// sit below it in column A.
pub fn unit_cost_chart(header_row: RowNum, products: usize, anchor: (RowNum, ColNum)) -> ChartPlan {
    let first = header_row + 1;
    let last = layout::row_offset(first, products) - 1;
    let categories = CellRange::column(0, first, last);

    ChartPlan {
        kind: ChartKind::ClusteredColumn,
        title: COST_CHART_TITLE,
        x_axis: Some("产品型号"),
        y_axis: Some("单位成本（元）"),
        style: Some(10),
        size: None,
        anchor,
        series: (1..=2)
            .map(|col| SeriesPlan {
                name: (header_row, col),
                categories,
                values: CellRange::column(col, first, last),
            })
            .collect(),
    }
}

/// Pie of activity cost by hierarchy level.
pub fn activity_mix_chart(header_row: RowNum, levels: usize, anchor: (RowNum, ColNum)) -> ChartPlan {
    let first = header_row + 1;
    let last = layout::row_offset(first, levels) - 1;

    ChartPlan {
        kind: ChartKind::Pie,
        title: MIX_CHART_TITLE,
        x_axis: None,
        y_axis: None,
        style: None,
        size: Some((cm_to_pixels(15.0), cm_to_pixels(10.0))),
        anchor,
        series: vec![SeriesPlan {
            name: (header_row, 1),
            categories: CellRange::column(0, first, last),
            values: CellRange::column(1, first, last),
        }],
    }
}

impl ChartPlan {
    /// Builds the chart with every range pointing at `sheet`.
    pub fn to_chart(&self, sheet: &str) -> Chart {
        let mut chart = Chart::new(self.kind.chart_type());

        for series in &self.series {
            chart
                .add_series()
                .set_name((sheet, series.name.0, series.name.1))
                .set_categories(series.categories.on(sheet))
                .set_values(series.values.on(sheet));
        }

        chart.title().set_name(self.title);
        if let Some(name) = self.x_axis {
            chart.x_axis().set_name(name);
        }
        if let Some(name) = self.y_axis {
            chart.y_axis().set_name(name);
        }
        if let Some(style) = self.style {
            chart.set_style(style);
        }
        if let Some((width, height)) = self.size {
            chart.set_width(width).set_height(height);
        }

        chart
    }
}
