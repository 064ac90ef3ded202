use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Name of the collection holding employee documents.
pub const EMPLOYEES_COLLECTION: &str = "employees";

/// An employee as stored in MongoDB.
///
/// `id` is left unset on insert so the server assigns a fresh `ObjectId`.
/// Fields missing from a stored document decode to their zero value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Employee {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub salary: f64,
    #[serde(default)]
    pub age: f64,
}

/// Request body for create and update.
///
/// Absent fields fall back to their zero value. Any `id` the client sends is
/// not part of this shape and is dropped during parsing.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct EmployeeRequest {
    pub name: String,
    pub salary: f64,
    pub age: f64,
}

/// Employee as returned over HTTP, with the identifier in hex text form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmployeeResponse {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub name: String,
    pub salary: f64,
    pub age: f64,
}

impl From<EmployeeRequest> for Employee {
    fn from(req: EmployeeRequest) -> Self {
        Self {
            id: None,
            name: req.name,
            salary: req.salary,
            age: req.age,
        }
    }
}

impl From<Employee> for EmployeeResponse {
    fn from(employee: Employee) -> Self {
        Self {
            id: employee.id.map(|id| id.to_hex()).unwrap_or_default(),
            name: employee.name,
            salary: employee.salary,
            age: employee.age,
        }
    }
}

impl EmployeeResponse {
    /// Echo a request body back under the given identifier text.
    pub fn echo(id: impl Into<String>, req: EmployeeRequest) -> Self {
        Self {
            id: id.into(),
            name: req.name,
            salary: req.salary,
            age: req.age,
        }
    }
}
