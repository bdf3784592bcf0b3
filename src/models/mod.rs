//! Data models for notifications, users, attendance entries, and reports.

pub mod attendance;
pub mod notification;
pub mod report;
pub mod user;

pub use attendance::{AttendanceEntry, AttendanceField, AttendanceForm, AttendanceStatus};
pub use notification::{Decision, DecisionAction, Notification, NotificationType};
pub use report::{AttendanceReport, ReportField, ReportForm, ReportParams};
pub use user::{Employee, RoleCode, UserRecord, employees_from_users};
