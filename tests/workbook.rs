use abc_cost_model::dataset::Dataset;
use abc_cost_model::inspect::inspect_workbook;
use abc_cost_model::layout;
use abc_cost_model::sheets::{activities, base_data, comparison, drivers, overhead, product_cost};
use abc_cost_model::generate;
use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

struct Generated {
    _dir: TempDir,
    path: PathBuf,
}

fn created() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()
}

fn generate_case(data: &Dataset) -> Generated {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(layout::OUTPUT_FILE_NAME);
    generate(data, created(), &path, |_| {}).unwrap();
    Generated { _dir: dir, path }
}

fn open(path: &Path) -> Xlsx<std::io::BufReader<std::fs::File>> {
    open_workbook(path).unwrap()
}

fn values(path: &Path, sheet: &str) -> Range<Data> {
    open(path).worksheet_range(sheet).unwrap()
}

fn formulas(path: &Path, sheet: &str) -> Range<String> {
    open(path).worksheet_formula(sheet).unwrap()
}

/// Looks a cell up by its A1 address.
fn at(a1: &str) -> (u32, u32) {
    let split = a1.find(|c: char| c.is_ascii_digit()).unwrap();
    let col = a1[..split]
        .chars()
        .fold(0u32, |acc, c| acc * 26 + (c as u32 - 'A' as u32 + 1));
    let row: u32 = a1[split..].parse().unwrap();
    (row - 1, col - 1)
}

fn text(range: &Range<Data>, a1: &str) -> String {
    match range.get_value(at(a1)) {
        Some(Data::String(s)) => s.clone(),
        other => panic!("expected text at {a1}, found {other:?}"),
    }
}

fn number(range: &Range<Data>, a1: &str) -> f64 {
    match range.get_value(at(a1)) {
        Some(Data::Float(f)) => *f,
        Some(Data::Int(i)) => *i as f64,
        other => panic!("expected number at {a1}, found {other:?}"),
    }
}

fn formula(range: &Range<String>, a1: &str) -> String {
    range.get_value(at(a1)).cloned().unwrap_or_default()
}

fn header_row(range: &Range<Data>, row: u32, width: usize) -> Vec<String> {
    (0..width as u32)
        .map(|col| match range.get_value((row, col)) {
            Some(Data::String(s)) => s.clone(),
            other => panic!("expected header at ({row}, {col}), found {other:?}"),
        })
        .collect()
}

#[test]
fn test_sheet_names_and_order() {
    let data = Dataset::embedded().unwrap();
    let out = generate_case(&data);
    assert_eq!(open(&out.path).sheet_names(), layout::sheet_names());
}

#[test]
fn test_guide_sheet() {
    let data = Dataset::embedded().unwrap();
    let out = generate_case(&data);
    let guide = values(&out.path, layout::GUIDE);

    assert_eq!(text(&guide, "B2"), "瓦轴集团ABC成本核算模型");
    assert_eq!(text(&guide, "B3"), "Activity-Based Costing Model");
    assert_eq!(text(&guide, "C5"), "V1.0");
    assert_eq!(text(&guide, "C6"), "2024年12月31日");
    assert_eq!(text(&guide, "C8"), "2024年第四季度(10-12月)");
    assert_eq!(text(&guide, "B10"), "使用说明：");
    assert!(text(&guide, "B15").starts_with("5. "));
    assert_eq!(text(&guide, "B17"), "注意事项：");
    assert_eq!(text(&guide, "B21"), "• 定期备份模型文件");
    assert_eq!(text(&guide, "B23"), "项目组成员：");
    assert_eq!(text(&guide, "B27"), "技术支持：");
}

#[test]
fn test_base_data_tables() {
    let data = Dataset::embedded().unwrap();
    let out = generate_case(&data);
    let sheet = values(&out.path, layout::BASE_DATA);
    let f = formulas(&out.path, layout::BASE_DATA);

    assert_eq!(text(&sheet, "A1"), "产品信息表");
    assert_eq!(header_row(&sheet, 1, 9), base_data::PRODUCT_HEADERS);
    for (i, product) in data.products.iter().enumerate() {
        let row = 3 + i;
        assert_eq!(text(&sheet, &format!("A{row}")), product.id);
        assert_eq!(text(&sheet, &format!("B{row}")), product.model);
        assert_eq!(number(&sheet, &format!("E{row}")), f64::from(product.quantity));
    }
    assert_eq!(text(&sheet, "A8"), "合计");
    assert_eq!(formula(&f, "E8"), "SUM(E3:E7)");
    assert_eq!(formula(&f, "F8"), "SUM(F3:F7)");

    assert_eq!(text(&sheet, "A10"), "产品工时统计表");
    assert_eq!(header_row(&sheet, 10, 5), base_data::WORK_HOUR_HEADERS);
    assert_eq!(number(&sheet, "B12"), 0.4);
    assert_eq!(number(&sheet, "E16"), 2400.0);
    assert_eq!(formula(&f, "D17"), "SUM(D12:D16)");
    assert_eq!(formula(&f, "E17"), "SUM(E12:E16)");

    assert_eq!(text(&sheet, "A19"), "直接成本汇总表");
    assert_eq!(header_row(&sheet, 19, 5), base_data::DIRECT_COST_HEADERS);
    assert_eq!(number(&sheet, "B21"), 2_880_000.0);
    assert_eq!(formula(&f, "D21"), "B21+C21");
    assert_eq!(formula(&f, "E21"), "D21/E3");
    assert_eq!(formula(&f, "E25"), "D25/E7");
}

#[test]
fn test_overhead_sheet() {
    let data = Dataset::embedded().unwrap();
    let out = generate_case(&data);
    let sheet = values(&out.path, layout::OVERHEAD);
    let f = formulas(&out.path, layout::OVERHEAD);

    assert_eq!(header_row(&sheet, 1, 6), overhead::HEADERS);
    assert_eq!(text(&sheet, "A3"), "C01");
    assert_eq!(text(&sheet, "B13"), "其他制造费用");
    assert_eq!(formula(&f, "D3"), "C3/C14");
    assert_eq!(formula(&f, "D13"), "C13/C14");
    assert_eq!(text(&sheet, "A14"), "合计");
    assert_eq!(formula(&f, "C14"), "SUM(C3:C13)");
    assert_eq!(text(&sheet, "D14"), "100.0%");
}

#[test]
fn test_activity_sheet() {
    let data = Dataset::embedded().unwrap();
    let out = generate_case(&data);
    let sheet = values(&out.path, layout::ACTIVITIES);
    let f = formulas(&out.path, layout::ACTIVITIES);

    assert_eq!(header_row(&sheet, 1, 7), activities::HEADERS);
    let codes: Vec<String> = (3..=22).map(|row| text(&sheet, &format!("A{row}"))).collect();
    let expected: Vec<String> = data.activities.iter().map(|a| a.code.clone()).collect();
    assert_eq!(codes, expected);
    assert_eq!(text(&sheet, "C3"), "单位级");
    assert_eq!(text(&sheet, "C22"), "设施级");
    assert_eq!(formula(&f, "F3"), "E3/E23");
    assert_eq!(formula(&f, "F22"), "E22/E23");
    assert_eq!(formula(&f, "E23"), "SUM(E3:E22)");
    assert_eq!(text(&sheet, "F23"), "100.0%");
}

#[test]
fn test_cost_driver_sheet() {
    let data = Dataset::embedded().unwrap();
    let out = generate_case(&data);
    let sheet = values(&out.path, layout::COST_DRIVERS);
    let f = formulas(&out.path, layout::COST_DRIVERS);

    assert_eq!(text(&sheet, "A1"), "成本动因选择与分配率");
    assert_eq!(header_row(&sheet, 1, 7), drivers::HEADERS);
    assert_eq!(text(&sheet, "C3"), "车削机时(h)");
    assert_eq!(number(&sheet, "D8"), 161.0);
    assert_eq!(text(&sheet, "G22"), "元/h");
    for row in 3..=22 {
        assert_eq!(formula(&f, &format!("F{row}")), format!("E{row}/D{row}"));
    }
}

#[test]
fn test_product_cost_sheet() {
    let data = Dataset::embedded().unwrap();
    let out = generate_case(&data);
    let sheet = values(&out.path, layout::PRODUCT_COST);
    let f = formulas(&out.path, layout::PRODUCT_COST);

    assert_eq!(header_row(&sheet, 1, 11), product_cost::HEADERS);
    assert_eq!(number(&sheet, "F3"), 3_168_180.0);
    assert_eq!(number(&sheet, "F7"), 284_800.0);
    assert_eq!(formula(&f, "G3"), "D3+E3+F3");
    assert_eq!(formula(&f, "H3"), "G3/C3");
    assert_eq!(formula(&f, "I3"), "基础数据!H3");
    assert_eq!(formula(&f, "J3"), "I3-H3");
    assert_eq!(formula(&f, "K3"), "J3/I3");
    assert_eq!(formula(&f, "I7"), "基础数据!H7");
    assert_eq!(text(&sheet, "A8"), "合计");
    for col in ["C", "D", "E", "F", "G"] {
        assert_eq!(formula(&f, &format!("{col}8")), format!("SUM({col}3:{col}7)"));
    }
}

#[test]
fn test_comparison_sheet() {
    let data = Dataset::embedded().unwrap();
    let out = generate_case(&data);
    let sheet = values(&out.path, layout::COMPARISON);
    let f = formulas(&out.path, layout::COMPARISON);

    assert_eq!(text(&sheet, "A3"), "单位成本对比");
    assert_eq!(header_row(&sheet, 3, 6), comparison::COST_HEADERS);
    assert_eq!(text(&sheet, "A5"), "32315");
    assert_eq!(number(&sheet, "C9"), 1649.33);
    assert_eq!(formula(&f, "D5"), "C5-B5");
    assert_eq!(formula(&f, "E5"), "D5/B5");
    assert_eq!(text(&sheet, "F8"), "严重低估!");

    assert_eq!(text(&sheet, "A11"), "毛利率对比");
    assert_eq!(header_row(&sheet, 11, 5), comparison::MARGIN_HEADERS);
    assert_eq!(number(&sheet, "B14"), -0.134);
    assert_eq!(formula(&f, "D13"), "C13-B13");
    assert_eq!(formula(&f, "D17"), "C17-B17");

    assert_eq!(text(&sheet, "A19"), "关键发现：");
    for (i, finding) in data.findings.iter().enumerate() {
        assert_eq!(&text(&sheet, &format!("A{}", 20 + i)), finding);
    }
}

#[test]
fn test_chart_sheet_data() {
    let data = Dataset::embedded().unwrap();
    let out = generate_case(&data);
    let sheet = values(&out.path, layout::CHARTS);

    assert_eq!(text(&sheet, "A1"), "ABC成本模型可视化分析");
    assert_eq!(header_row(&sheet, 3, 3), ["产品型号", "传统方法", "ABC方法"]);
    assert_eq!(text(&sheet, "A9"), "定制-TP");
    assert_eq!(number(&sheet, "B9"), 763.17);
    assert_eq!(number(&sheet, "C9"), 1649.33);

    assert_eq!(text(&sheet, "A20"), "作业成本分布");
    assert_eq!(header_row(&sheet, 20, 2), ["作业类别", "成本金额(元)"]);
    let mix: Vec<(String, f64)> = (22..=25)
        .map(|row| (text(&sheet, &format!("A{row}")), number(&sheet, &format!("B{row}"))))
        .collect();
    assert_eq!(
        mix,
        [
            ("单位级作业".to_string(), 4_560_000.0),
            ("批次级作业".to_string(), 2_040_000.0),
            ("产品级作业".to_string(), 620_000.0),
            ("设施级作业".to_string(), 1_080_000.0),
        ]
    );
}

#[test]
fn test_inspect_counts_formulas() {
    let data = Dataset::embedded().unwrap();
    let out = generate_case(&data);
    let summary = inspect_workbook(&out.path).unwrap();

    let counts: Vec<(&str, usize)> = summary
        .iter()
        .map(|s| (s.name.as_str(), s.formulas))
        .collect();
    assert_eq!(
        counts,
        [
            ("说明", 0),
            ("基础数据", 14),
            ("成本归集", 12),
            ("作业识别", 21),
            ("成本动因", 20),
            ("产品成本(ABC)", 30),
            ("成本对比", 15),
            ("可视化图表", 0),
        ]
    );
}

#[test]
fn test_dataset_override_file() {
    let source = include_str!("../data/bearing_case.yml")
        .replace("title: 瓦轴集团ABC成本核算模型", "title: 轴承ABC教学模型");
    let dir = tempfile::tempdir().unwrap();
    let case = dir.path().join("case.yml");
    std::fs::write(&case, source).unwrap();

    let data = Dataset::load(&case).unwrap();
    let out = generate_case(&data);
    let guide = values(&out.path, layout::GUIDE);
    assert_eq!(text(&guide, "B2"), "轴承ABC教学模型");
}

#[test]
fn test_guide_blocks_grow_with_data() {
    let mut data = Dataset::embedded().unwrap();
    data.model.instructions = (1..=9).map(|i| format!("{}. 步骤", i)).collect();
    data.model.team = (1..=5).map(|i| format!("成员{}", i)).collect();

    let out = generate_case(&data);
    let guide = values(&out.path, layout::GUIDE);

    assert_eq!(text(&guide, "B10"), "使用说明：");
    for i in 1..=9 {
        assert_eq!(text(&guide, &format!("B{}", 10 + i)), format!("{}. 步骤", i));
    }
    assert_eq!(text(&guide, "B21"), "注意事项：");
    assert_eq!(text(&guide, "B27"), "项目组成员：");
    for i in 1..=5 {
        assert_eq!(text(&guide, &format!("B{}", 27 + i)), format!("成员{}", i));
    }
    assert_eq!(text(&guide, "B34"), "技术支持：");
    assert!(text(&guide, "B35").starts_with("顾问"));
}
