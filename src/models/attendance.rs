//! Ad-hoc attendance entries kept in memory by the secretary panel.

use std::fmt;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Punctuality of an attendance entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttendanceStatus {
    OnTime,
    Late,
    Absent,
}

impl AttendanceStatus {
    pub const ALL: [AttendanceStatus; 3] = [AttendanceStatus::OnTime, AttendanceStatus::Late, AttendanceStatus::Absent];

    pub fn label(&self) -> &'static str {
        match self {
            AttendanceStatus::OnTime => "Puntual",
            AttendanceStatus::Late => "Tarde",
            AttendanceStatus::Absent => "Ausente",
        }
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A recorded check-in/check-out pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceEntry {
    pub id: String,
    pub name: String,
    pub check_in: NaiveTime,
    pub check_out: NaiveTime,
    pub status: AttendanceStatus,
}

/// Text inputs of the attendance form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttendanceField {
    Id,
    Name,
    CheckIn,
    CheckOut,
}

/// Draft of the "Registrar Asistencia" form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttendanceForm {
    pub id: String,
    pub name: String,
    pub check_in: String,
    pub check_out: String,
    pub status: Option<AttendanceStatus>,
}

impl AttendanceForm {
    /// Reset the form to default values.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Mutable access to a text input, for binding to an edit widget.
    pub fn field_mut(&mut self, field: AttendanceField) -> &mut String {
        match field {
            AttendanceField::Id => &mut self.id,
            AttendanceField::Name => &mut self.name,
            AttendanceField::CheckIn => &mut self.check_in,
            AttendanceField::CheckOut => &mut self.check_out,
        }
    }

    pub fn set(&mut self, field: AttendanceField, value: impl Into<String>) {
        *self.field_mut(field) = value.into();
    }

    /// Check every required input and build the entry.
    pub fn validate(&self) -> Result<AttendanceEntry> {
        let id = self.id.trim();
        if id.is_empty() {
            return Err(AppError::validation("El ID es obligatorio"));
        }
        let name = self.name.trim();
        if name.is_empty() {
            return Err(AppError::validation("El nombre es obligatorio"));
        }
        let check_in = parse_clock_time(&self.check_in)
            .ok_or_else(|| AppError::validation("Hora de entrada inválida (use HH:MM)"))?;
        let check_out = parse_clock_time(&self.check_out)
            .ok_or_else(|| AppError::validation("Hora de salida inválida (use HH:MM)"))?;
        let status = self
            .status
            .ok_or_else(|| AppError::validation("Seleccione un estado"))?;

        Ok(AttendanceEntry {
            id: id.to_string(),
            name: name.to_string(),
            check_in,
            check_out,
            status,
        })
    }
}

/// Parse `HH:MM` or `HH:MM:SS`.
pub fn parse_clock_time(input: &str) -> Option<NaiveTime> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    for fmt in &["%H:%M", "%H:%M:%S"] {
        if let Ok(time) = NaiveTime::parse_from_str(input, fmt) {
            return Some(time);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_form() -> AttendanceForm {
        let mut form = AttendanceForm::default();
        form.set(AttendanceField::Id, "E-7");
        form.set(AttendanceField::Name, "Luis Pérez");
        form.set(AttendanceField::CheckIn, "08:05");
        form.set(AttendanceField::CheckOut, "17:00:30");
        form.status = Some(AttendanceStatus::Late);
        form
    }

    #[test]
    fn test_valid_form_builds_entry() {
        let entry = filled_form().validate().unwrap();

        assert_eq!(entry.id, "E-7");
        assert_eq!(entry.check_in, NaiveTime::from_hms_opt(8, 5, 0).unwrap());
        assert_eq!(entry.check_out, NaiveTime::from_hms_opt(17, 0, 30).unwrap());
        assert_eq!(entry.status, AttendanceStatus::Late);
    }

    #[test]
    fn test_each_required_field_is_checked() {
        let mut form = filled_form();
        form.set(AttendanceField::Name, "  ");
        assert!(form.validate().is_err());

        let mut form = filled_form();
        form.set(AttendanceField::CheckIn, "8am");
        assert!(form.validate().is_err());

        let mut form = filled_form();
        form.status = None;
        assert!(form.validate().is_err());
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut form = filled_form();
        form.reset();
        assert_eq!(form, AttendanceForm::default());
    }

    #[test]
    fn test_parse_clock_time() {
        assert!(parse_clock_time("23:59").is_some());
        assert!(parse_clock_time("24:00").is_none());
        assert!(parse_clock_time("").is_none());
    }
}
