//! Secretary panel: employee directory, manual attendance, local reports.

use super::outcome::Outcome;
use crate::api::Backend;
use crate::error::{AppError, Result};
use crate::models::{
    AttendanceEntry, AttendanceForm, AttendanceReport, Employee, ReportForm, UserRecord, employees_from_users,
};

/// State of the secretary panel.
#[derive(Debug, Default)]
pub struct SecretariaPanel {
    employees: Vec<Employee>,
    attendance: Vec<AttendanceEntry>,
    loading: bool,

    pub attendance_form: AttendanceForm,
    attendance_form_open: bool,

    pub report_form: ReportForm,
    report_form_open: bool,
}

impl SecretariaPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn attendance(&self) -> &[AttendanceEntry] {
        &self.attendance
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_attendance_form_open(&self) -> bool {
        self.attendance_form_open
    }

    pub fn is_report_form_open(&self) -> bool {
        self.report_form_open
    }

    /// Mark a load as started. Returns `false` if one is already in flight.
    pub fn begin_load_employees(&mut self) -> bool {
        if self.loading {
            return false;
        }
        self.loading = true;
        true
    }

    /// Keep the employees out of the fetched user list.
    ///
    /// On failure the previous list stays and the error is returned for display.
    pub fn finish_load_employees(&mut self, result: Result<Vec<UserRecord>>) -> Option<Outcome> {
        self.loading = false;
        match result {
            Ok(users) => {
                let total = users.len();
                self.employees = employees_from_users(users);
                tracing::info!("Loaded {} employees out of {} users", self.employees.len(), total);
                None
            }
            Err(e) => {
                tracing::warn!("Error fetching users: {}", e);
                Some(Outcome::failed(format!("Error al obtener usuarios: {e}")))
            }
        }
    }

    pub async fn load_employees(&mut self, backend: &dyn Backend) -> Option<Outcome> {
        if !self.begin_load_employees() {
            return None;
        }
        let result = backend.list_users().await;
        self.finish_load_employees(result)
    }

    pub fn open_attendance_form(&mut self) {
        self.attendance_form.reset();
        self.attendance_form_open = true;
    }

    pub fn close_attendance_form(&mut self) {
        self.attendance_form_open = false;
    }

    /// Append an entry to the in-memory list. Nothing is sent to the backend.
    pub fn record_attendance(&mut self, entry: AttendanceEntry) {
        tracing::debug!("Recorded attendance for {} ({})", entry.name, entry.status);
        self.attendance.push(entry);
    }

    /// Validate the attendance form and record it.
    ///
    /// A valid form closes and resets; an invalid one stays open untouched.
    pub fn submit_attendance_form(&mut self) -> Outcome {
        match self.attendance_form.validate() {
            Ok(entry) => {
                let msg = format!("Asistencia registrada para {}", entry.name);
                self.record_attendance(entry);
                self.attendance_form.reset();
                self.attendance_form_open = false;
                Outcome::success(msg)
            }
            Err(e) => Outcome::invalid(validation_text(e)),
        }
    }

    pub fn open_report_form(&mut self) {
        self.report_form.reset();
        self.report_form_open = true;
    }

    pub fn close_report_form(&mut self) {
        self.report_form_open = false;
    }

    /// Build a report over the in-memory entries.
    ///
    /// No backend call. On success the form closes and resets.
    pub fn generate_report(&mut self) -> std::result::Result<AttendanceReport, Outcome> {
        let params = self
            .report_form
            .validate()
            .map_err(|e| Outcome::invalid(validation_text(e)))?;

        let report = AttendanceReport::build(params, &self.attendance);
        tracing::info!(
            "Report {}..{}: {} of {} entries",
            report.params.start_date,
            report.params.end_date,
            report.rows.len(),
            self.attendance.len()
        );

        self.report_form.reset();
        self.report_form_open = false;
        Ok(report)
    }
}

fn validation_text(e: AppError) -> String {
    match e {
        AppError::Validation(msg) => msg,
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockBackend;
    use crate::models::{AttendanceField, AttendanceStatus, ReportField, RoleCode};

    fn user(id: i64, role: i32, name: &str) -> UserRecord {
        UserRecord {
            id,
            role: RoleCode(role),
            document_number: format!("D{id}"),
            name: name.to_string(),
            email: format!("{}@cg.com", name.to_lowercase()),
            department: None,
        }
    }

    fn fill_attendance(panel: &mut SecretariaPanel, id: &str, name: &str, status: AttendanceStatus) {
        panel.open_attendance_form();
        panel.attendance_form.set(AttendanceField::Id, id);
        panel.attendance_form.set(AttendanceField::Name, name);
        panel.attendance_form.set(AttendanceField::CheckIn, "08:00");
        panel.attendance_form.set(AttendanceField::CheckOut, "17:00");
        panel.attendance_form.status = Some(status);
    }

    #[tokio::test]
    async fn test_load_employees_keeps_role_three_in_order() {
        let mut backend = MockBackend::new();
        backend.expect_list_users().times(1).returning(|| {
            Ok(vec![
                user(1, 1, "Ana"),
                user(2, 3, "Luis"),
                user(3, 2, "Marta"),
                user(4, 3, "Sofia"),
                user(5, 3, "Jorge"),
            ])
        });

        let mut panel = SecretariaPanel::new();
        let outcome = panel.load_employees(&backend).await;

        assert_eq!(outcome, None);
        assert!(!panel.is_loading());
        let ids: Vec<i64> = panel.employees().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![2, 4, 5]);
    }

    #[tokio::test]
    async fn test_load_employees_failure_reports_error() {
        let mut backend = MockBackend::new();
        backend
            .expect_list_users()
            .returning(|| Err(AppError::parse("bad body")));

        let mut panel = SecretariaPanel::new();
        let outcome = panel.load_employees(&backend).await;

        match outcome {
            Some(Outcome::Failed(msg)) => assert!(msg.starts_with("Error al obtener usuarios")),
            other => panic!("expected failure, got {other:?}"),
        }
        assert!(panel.employees().is_empty());
        assert!(!panel.is_loading());
    }

    #[tokio::test]
    async fn test_overlapping_load_issues_no_second_request() {
        let mut backend = MockBackend::new();
        backend.expect_list_users().times(0);

        let mut panel = SecretariaPanel::new();
        assert!(panel.begin_load_employees());
        assert!(!panel.begin_load_employees());

        let outcome = panel.load_employees(&backend).await;
        assert_eq!(outcome, None);
        assert!(panel.is_loading());

        panel.finish_load_employees(Ok(vec![user(2, 3, "Luis")]));
        assert!(!panel.is_loading());
        assert_eq!(panel.employees().len(), 1);
        assert!(panel.begin_load_employees());
    }

    #[test]
    fn test_record_attendance_appends_without_backend() {
        let mut panel = SecretariaPanel::new();
        fill_attendance(&mut panel, "E-1", "Luis", AttendanceStatus::OnTime);

        let outcome = panel.submit_attendance_form();

        assert!(outcome.is_success());
        assert_eq!(panel.attendance().len(), 1);
        assert!(!panel.is_attendance_form_open());
        assert_eq!(panel.attendance_form, AttendanceForm::default());
    }

    #[test]
    fn test_invalid_attendance_form_stays_open() {
        let mut panel = SecretariaPanel::new();
        fill_attendance(&mut panel, "E-1", "Luis", AttendanceStatus::OnTime);
        panel.attendance_form.set(AttendanceField::CheckOut, "");

        let outcome = panel.submit_attendance_form();

        assert!(matches!(outcome, Outcome::Invalid(_)));
        assert!(panel.attendance().is_empty());
        assert!(panel.is_attendance_form_open());
        assert_eq!(panel.attendance_form.name, "Luis");
    }

    #[test]
    fn test_opening_attendance_form_starts_blank() {
        let mut panel = SecretariaPanel::new();
        panel.attendance_form.set(AttendanceField::Name, "stale");
        panel.open_attendance_form();
        assert!(panel.is_attendance_form_open());
        assert_eq!(panel.attendance_form.name, "");
    }

    #[test]
    fn test_generate_report_selects_recorded_entries() {
        let mut panel = SecretariaPanel::new();
        fill_attendance(&mut panel, "E-1", "Luis", AttendanceStatus::OnTime);
        panel.submit_attendance_form();
        fill_attendance(&mut panel, "E-2", "Marta", AttendanceStatus::Late);
        panel.submit_attendance_form();

        panel.open_report_form();
        panel.report_form.set(ReportField::StartDate, "2024-07-01");
        panel.report_form.set(ReportField::EndDate, "2024-07-31");
        panel.report_form.status = Some(AttendanceStatus::Late);

        let report = panel.generate_report().unwrap();

        assert_eq!(report.rows.len(), 1);
        assert_eq!(report.rows[0].name, "Marta");
        assert!(!panel.is_report_form_open());
        assert_eq!(panel.report_form, ReportForm::default());
    }

    #[test]
    fn test_generate_report_with_bad_range_is_invalid() {
        let mut panel = SecretariaPanel::new();
        panel.open_report_form();
        panel.report_form.set(ReportField::StartDate, "2024-07-31");
        panel.report_form.set(ReportField::EndDate, "2024-07-01");

        let outcome = panel.generate_report().unwrap_err();

        assert!(matches!(outcome, Outcome::Invalid(_)));
        assert!(panel.is_report_form_open());
    }
}
