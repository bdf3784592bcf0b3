//! Users as served by `GET /usuarios`, and the employee projection.

use serde::{Deserialize, Deserializer, Serialize};

/// Permission tier of a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleCode(pub i32);

impl RoleCode {
    pub const EMPLOYEE: RoleCode = RoleCode(3);
    /// Stand-in for a `Rol` that is not an integer.
    pub const UNKNOWN: RoleCode = RoleCode(-1);

    pub fn label(&self) -> String {
        match *self {
            RoleCode::EMPLOYEE => "Empleado".to_string(),
            RoleCode::UNKNOWN => "Sin rol".to_string(),
            RoleCode(code) => format!("Rol {code}"),
        }
    }
}

/// One row of the backend user collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(rename = "ID_Usuario")]
    pub id: i64,
    #[serde(rename = "Rol", deserialize_with = "role_from_number_or_text")]
    pub role: RoleCode,
    #[serde(rename = "Numero_de_Documento", default, deserialize_with = "null_as_empty")]
    pub document_number: String,
    #[serde(rename = "Nombre")]
    pub name: String,
    #[serde(rename = "Correo", default, deserialize_with = "null_as_empty")]
    pub email: String,
    #[serde(rename = "Departamento", default, deserialize_with = "blank_as_none")]
    pub department: Option<String>,
}

/// Staff member shown in the secretary panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: i64,
    pub document_number: String,
    pub name: String,
    pub department: Option<String>,
    pub email: String,
}

impl From<UserRecord> for Employee {
    fn from(user: UserRecord) -> Self {
        Self {
            id: user.id,
            document_number: user.document_number,
            name: user.name,
            department: user.department,
            email: user.email,
        }
    }
}

/// Keep only employees, in source order.
pub fn employees_from_users(users: Vec<UserRecord>) -> Vec<Employee> {
    users
        .into_iter()
        .filter(|u| u.role == RoleCode::EMPLOYEE)
        .map(Employee::from)
        .collect()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(i64),
    Text(String),
    Other(serde::de::IgnoredAny),
}

/// Integer or numeric text; anything else decodes as `RoleCode::UNKNOWN`.
fn role_from_number_or_text<'de, D>(deserializer: D) -> Result<RoleCode, D::Error>
where
    D: Deserializer<'de>,
{
    let code = match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Number(n) => Some(n),
        NumberOrText::Text(s) => s.trim().parse::<i64>().ok(),
        NumberOrText::Other(_) => None,
    };
    let role = code.and_then(|c| i32::try_from(c).ok()).filter(|c| *c >= 0).map(RoleCode);
    Ok(role.unwrap_or_else(|| {
        tracing::warn!("Unrecognised role code {:?}", code);
        RoleCode::UNKNOWN
    }))
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.filter(|s| !s.trim().is_empty()))
}
