pub mod excel;

/// Filename offered to clients downloading an export
pub const EXPORT_FILENAME: &str = "exported_data.xlsx";

/// Content type of an `.xlsx` workbook
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
