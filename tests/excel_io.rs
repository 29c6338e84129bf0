#![cfg(feature = "excel")]

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use excel_report_cleaner::clean::{FilterSpec, GroupSpec, SortKey};
use excel_report_cleaner::io::excel::{read_excel_grid_from_path, sheet_names};
use excel_report_cleaner::io::writer::write_cleaned;
use excel_report_cleaner::pipeline::{run_from_grid, CleanOptions, CleanRequest};
use excel_report_cleaner::types::{Cell, Table};

fn tmp_path(name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("excel-report-cleaner-{name}-{nanos}"))
}

fn write_report_xlsx(path: &PathBuf) {
    use rust_xlsxwriter::Workbook;

    let mut wb = Workbook::new();
    let ws = wb.add_worksheet();
    ws.set_name("Raw").unwrap();

    // header
    ws.write_string(0, 0, "Tag").unwrap();
    ws.write_string(0, 1, "Site").unwrap();
    ws.write_string(0, 2, "Hours").unwrap();

    // rows: numeric, string-number, and junk hours cells
    ws.write_string(1, 0, "8760_a").unwrap();
    ws.write_string(1, 1, "g1").unwrap();
    ws.write_number(1, 2, 10).unwrap();

    ws.write_string(2, 0, "8760_b").unwrap();
    ws.write_string(2, 1, "g1").unwrap();
    ws.write_string(2, 2, "2.5").unwrap();

    ws.write_string(3, 0, "8760_c").unwrap();
    ws.write_string(3, 1, "g2").unwrap();
    ws.write_string(3, 2, "junk").unwrap();

    let ws2 = wb.add_worksheet();
    ws2.set_name("Notes").unwrap();
    ws2.write_string(0, 0, "ignored").unwrap();

    wb.save(path).unwrap();
}

#[test]
fn sheet_names_lists_sheets_in_workbook_order() {
    let path = tmp_path("sheets").with_extension("xlsx");
    write_report_xlsx(&path);

    let names = sheet_names(&path).unwrap();
    assert_eq!(names, vec!["Raw".to_string(), "Notes".to_string()]);

    let _ = std::fs::remove_file(&path);
}

#[test]
fn read_excel_grid_maps_cells_and_defaults_to_first_sheet() {
    let path = tmp_path("grid").with_extension("xlsx");
    write_report_xlsx(&path);

    let grid = read_excel_grid_from_path(&path, None).unwrap();
    assert_eq!(grid.len(), 4);
    assert_eq!(grid[0][0], Cell::Text("Tag".to_string()));
    assert_eq!(grid[1][2], Cell::Number(10.0)); // numeric cell stays numeric
    assert_eq!(grid[2][2], Cell::Text("2.5".to_string()));

    let _ = std::fs::remove_file(&path);
}

#[test]
fn workbook_grid_through_pipeline_and_back_out() {
    let in_path = tmp_path("roundtrip-in").with_extension("xlsx");
    let out_dir = tmp_path("roundtrip-out");
    write_report_xlsx(&in_path);

    let grid = read_excel_grid_from_path(&in_path, Some("Raw")).unwrap();

    let mut filter = FilterSpec::default();
    filter.contains.insert("Tag".to_string(), "8760".to_string());
    let request = CleanRequest {
        filter,
        sort: vec![SortKey::new("Tag", "8760")],
        group: GroupSpec {
            key_columns: vec!["Site".to_string()],
            sum_column: "Hours".to_string(),
            sum_output: None,
            passthrough: vec!["Tag".to_string()],
        },
    };
    let outcome = run_from_grid(&grid, &request, &CleanOptions::default()).unwrap();
    assert_eq!(outcome.summary.groups, 2);
    assert_eq!(outcome.summary.non_numeric, 1);
    assert_eq!(outcome.summary.total_sum, 12.5);

    let written = write_cleaned(&outcome.table, &out_dir, "Cleaned").unwrap();
    assert!(written.exists());
    assert!(written
        .file_name()
        .unwrap()
        .to_string_lossy()
        .starts_with("Cleaned_Report_"));

    // Re-read the cleaned file: one header row plus one row per group, numeric sums.
    let cleaned = read_excel_grid_from_path(&written, Some("Cleaned")).unwrap();
    assert_eq!(cleaned.len(), 3);
    assert_eq!(
        cleaned[0],
        vec![
            Cell::Text("Site".to_string()),
            Cell::Text("Tag".to_string()),
            Cell::Text("Sum_Hours".to_string()),
        ]
    );
    assert_eq!(cleaned[1][0], Cell::Text("g1".to_string()));
    assert_eq!(cleaned[1][2], Cell::Number(12.5));
    assert_eq!(cleaned[2][2], Cell::Number(0.0));

    let _ = std::fs::remove_file(&in_path);
    let _ = std::fs::remove_dir_all(&out_dir);
}

#[test]
fn write_cleaned_skips_empty_cells() {
    let out_dir = tmp_path("empty-cells");
    let table = Table::new(
        vec!["Site".to_string(), "Sum_Hours".to_string()],
        vec![vec![Cell::Empty, Cell::Number(1.5)]],
    );

    let written = write_cleaned(&table, &out_dir, "Cleaned").unwrap();
    let grid = read_excel_grid_from_path(&written, None).unwrap();
    assert_eq!(grid[1][0], Cell::Empty);
    assert_eq!(grid[1][1], Cell::Number(1.5));

    let _ = std::fs::remove_dir_all(&out_dir);
}

#[test]
fn missing_workbook_is_an_error() {
    let path = tmp_path("does-not-exist").with_extension("xlsx");
    assert!(read_excel_grid_from_path(&path, None).is_err());
}
