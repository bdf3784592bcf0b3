//! Attendance report parameters and results.

use chrono::NaiveDate;

use super::attendance::{AttendanceEntry, AttendanceStatus};
use crate::error::{AppError, Result};

/// Validated report request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportParams {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Matches entry id or name, case-insensitive.
    pub employee: Option<String>,
    pub status: Option<AttendanceStatus>,
}

impl ReportParams {
    pub fn matches(&self, entry: &AttendanceEntry) -> bool {
        let employee_match = self.employee.as_ref().is_none_or(|needle| {
            let needle = needle.to_lowercase();
            entry.id.to_lowercase().contains(&needle) || entry.name.to_lowercase().contains(&needle)
        });
        let status_match = self.status.is_none_or(|s| s == entry.status);

        employee_match && status_match
    }
}

/// Entries selected for a report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceReport {
    pub params: ReportParams,
    pub rows: Vec<AttendanceEntry>,
}

impl AttendanceReport {
    /// Select matching entries, keeping their recorded order.
    pub fn build(params: ReportParams, entries: &[AttendanceEntry]) -> Self {
        let rows = entries.iter().filter(|e| params.matches(e)).cloned().collect();
        Self { params, rows }
    }

    pub fn count_by_status(&self, status: AttendanceStatus) -> usize {
        self.rows.iter().filter(|e| e.status == status).count()
    }
}

/// Text inputs of the report form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportField {
    StartDate,
    EndDate,
    Employee,
}

/// Draft of the "Generar Reporte" form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportForm {
    pub start_date: String,
    pub end_date: String,
    pub employee: String,
    pub status: Option<AttendanceStatus>,
}

impl ReportForm {
    /// Reset the form to default values.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn field_mut(&mut self, field: ReportField) -> &mut String {
        match field {
            ReportField::StartDate => &mut self.start_date,
            ReportField::EndDate => &mut self.end_date,
            ReportField::Employee => &mut self.employee,
        }
    }

    pub fn set(&mut self, field: ReportField, value: impl Into<String>) {
        *self.field_mut(field) = value.into();
    }

    pub fn validate(&self) -> Result<ReportParams> {
        let start_date = parse_flexible_date(&self.start_date)
            .ok_or_else(|| AppError::validation("Fecha de inicio inválida (use AAAA-MM-DD)"))?;
        let end_date = parse_flexible_date(&self.end_date)
            .ok_or_else(|| AppError::validation("Fecha de fin inválida (use AAAA-MM-DD)"))?;
        if start_date > end_date {
            return Err(AppError::validation(
                "La fecha de inicio no puede ser posterior a la fecha de fin",
            ));
        }

        let employee = Some(self.employee.trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        Ok(ReportParams {
            start_date,
            end_date,
            employee,
            status: self.status,
        })
    }
}

/// Parse date from multiple formats: "2024-7-1", "2024/7/1", "2024.7.1"
pub fn parse_flexible_date(input: &str) -> Option<NaiveDate> {
    let parts: Vec<&str> = input
        .trim()
        .split(['-', '/', '.'])
        .filter(|s| !s.is_empty())
        .collect();

    if parts.len() != 3 {
        return None;
    }

    let year: i32 = parts[0].parse().ok()?;
    let month: u32 = parts[1].parse().ok()?;
    let day: u32 = parts[2].parse().ok()?;

    NaiveDate::from_ymd_opt(year, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn entry(id: &str, name: &str, status: AttendanceStatus) -> AttendanceEntry {
        AttendanceEntry {
            id: id.to_string(),
            name: name.to_string(),
            check_in: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            check_out: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
            status,
        }
    }

    fn form(start: &str, end: &str) -> ReportForm {
        let mut form = ReportForm::default();
        form.set(ReportField::StartDate, start);
        form.set(ReportField::EndDate, end);
        form
    }

    #[test]
    fn test_parse_flexible_date() {
        assert_eq!(parse_flexible_date("2024-7-1"), NaiveDate::from_ymd_opt(2024, 7, 1));
        assert_eq!(parse_flexible_date("2024/07/31"), NaiveDate::from_ymd_opt(2024, 7, 31));
        assert_eq!(parse_flexible_date("2024-02-30"), None);
        assert_eq!(parse_flexible_date(""), None);
    }

    #[test]
    fn test_dates_are_required_and_ordered() {
        assert!(form("", "2024-07-31").validate().is_err());
        assert!(form("2024-08-01", "2024-07-31").validate().is_err());

        let params = form("2024-07-01", "2024-07-01").validate().unwrap();
        assert_eq!(params.employee, None);
        assert_eq!(params.status, None);
    }

    #[test]
    fn test_report_filters_by_employee_and_status() {
        let entries = vec![
            entry("E-1", "Luis Pérez", AttendanceStatus::OnTime),
            entry("E-2", "Marta Gil", AttendanceStatus::Late),
            entry("E-3", "Luisa Soto", AttendanceStatus::Late),
        ];

        let mut f = form("2024-07-01", "2024-07-31");
        f.set(ReportField::Employee, "luis");
        let report = AttendanceReport::build(f.validate().unwrap(), &entries);
        let ids: Vec<&str> = report.rows.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["E-1", "E-3"]);

        f.status = Some(AttendanceStatus::Late);
        let report = AttendanceReport::build(f.validate().unwrap(), &entries);
        assert_eq!(report.rows.len(), 1);
        assert_eq!(report.rows[0].id, "E-3");
    }

    #[test]
    fn test_count_by_status() {
        let entries = vec![
            entry("E-1", "A", AttendanceStatus::Absent),
            entry("E-2", "B", AttendanceStatus::Absent),
            entry("E-3", "C", AttendanceStatus::OnTime),
        ];
        let report = AttendanceReport::build(form("2024-07-01", "2024-07-31").validate().unwrap(), &entries);

        assert_eq!(report.count_by_status(AttendanceStatus::Absent), 2);
        assert_eq!(report.count_by_status(AttendanceStatus::Late), 0);
    }
}
