pub mod employee;

pub use employee::{Employee, EmployeeRequest, EmployeeResponse, EMPLOYEES_COLLECTION};
