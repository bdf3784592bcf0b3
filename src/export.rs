//! Excel export functionality.

use chrono::Local;
use rust_xlsxwriter::{Color, Format, FormatBorder, Workbook};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::models::{AttendanceReport, AttendanceStatus};

/// Export an attendance report to an Excel file.
///
/// Row 0 carries the report range and filters, row 1 the headers, data
/// starts at row 2. A status tally follows the data.
pub fn export_attendance_report(report: &AttendanceReport, path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    worksheet.set_name("Reporte de Asistencia")?;

    let title_format = Format::new().set_bold().set_font_size(13);

    // Header format
    let header_format = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0x4472C4))
        .set_font_color(Color::White)
        .set_border(FormatBorder::Thin);

    let params = &report.params;
    let mut title = format!("Asistencia del {} al {}", params.start_date, params.end_date);
    if let Some(employee) = &params.employee {
        title.push_str(&format!(" | Empleado: {employee}"));
    }
    if let Some(status) = params.status {
        title.push_str(&format!(" | Estado: {status}"));
    }
    worksheet.write_string_with_format(0, 0, &title, &title_format)?;

    let headers = ["ID", "Nombre", "Entrada", "Salida", "Estado"];
    for (col, header) in headers.iter().enumerate() {
        worksheet.write_string_with_format(1, col as u16, *header, &header_format)?;
    }

    worksheet.set_column_width(0, 12)?; // ID
    worksheet.set_column_width(1, 30)?; // Nombre
    worksheet.set_column_width(2, 10)?; // Entrada
    worksheet.set_column_width(3, 10)?; // Salida
    worksheet.set_column_width(4, 12)?; // Estado

    for (idx, entry) in report.rows.iter().enumerate() {
        let row = (idx + 2) as u32;

        worksheet.write_string(row, 0, &entry.id)?;
        worksheet.write_string(row, 1, &entry.name)?;
        worksheet.write_string(row, 2, entry.check_in.format("%H:%M").to_string())?;
        worksheet.write_string(row, 3, entry.check_out.format("%H:%M").to_string())?;
        worksheet.write_string(row, 4, entry.status.label())?;
    }

    if !report.rows.is_empty() {
        let last_row = (report.rows.len() + 1) as u32;
        worksheet.autofilter(1, 0, last_row, 4)?;
    }

    // Totals
    let mut row = (report.rows.len() + 3) as u32;
    for status in AttendanceStatus::ALL {
        worksheet.write_string_with_format(row, 0, status.label(), &title_format)?;
        worksheet.write_number(row, 1, report.count_by_status(status) as f64)?;
        row += 1;
    }

    // Freeze title and header rows
    worksheet.set_freeze_panes(2, 0)?;

    workbook.save(path)?;
    tracing::info!("Report written to {}", path.display());
    Ok(())
}

/// Open save file dialog and return selected path.
pub fn show_save_dialog(default_name: &str) -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_file_name(default_name)
        .add_filter("Excel Files", &["xlsx"])
        .save_file()
}

/// Generate default filename for export.
pub fn generate_export_filename(prefix: &str) -> String {
    let now = Local::now();
    format!("{prefix}_{ts}.xlsx", ts = now.format("%Y%m%d_%H%M%S"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AttendanceEntry, ReportParams};
    use chrono::{NaiveDate, NaiveTime};

    fn report(rows: usize) -> AttendanceReport {
        let params = ReportParams {
            start_date: NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 7, 31).unwrap(),
            employee: None,
            status: Some(AttendanceStatus::Late),
        };
        let entries: Vec<AttendanceEntry> = (0..rows)
            .map(|i| AttendanceEntry {
                id: format!("E-{i}"),
                name: format!("Empleado {i}"),
                check_in: NaiveTime::from_hms_opt(9, 10, 0).unwrap(),
                check_out: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
                status: AttendanceStatus::Late,
            })
            .collect();
        AttendanceReport::build(params, &entries)
    }

    #[test]
    fn test_generate_export_filename() {
        let name = generate_export_filename("reporte_asistencia");
        assert!(name.starts_with("reporte_asistencia_"));
        assert!(name.ends_with(".xlsx"));
    }

    #[test]
    fn test_export_writes_workbook() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reporte.xlsx");

        export_attendance_report(&report(3), &path).unwrap();

        let metadata = std::fs::metadata(&path).unwrap();
        assert!(metadata.len() > 0);
    }

    #[test]
    fn test_export_empty_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vacio.xlsx");

        export_attendance_report(&report(0), &path).unwrap();
        assert!(path.exists());
    }
}
