use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::department::Department;

#[derive(sqlx::FromRow, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub employee_id: i32,
    pub name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub age: i32,
    pub salary: Decimal,
    pub department_id: i32,
}

/// An employee with its department loaded inline.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct EmployeeWithDepartment {
    #[serde(flatten)]
    pub employee: Employee,
    pub department: Department,
}

/// Row shape of the employees/departments join.
#[derive(sqlx::FromRow, Debug)]
pub struct EmployeeDepartmentRow {
    pub employee_id: i32,
    pub name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub age: i32,
    pub salary: Decimal,
    pub department_id: i32,
    pub department_name: String,
}

impl From<EmployeeDepartmentRow> for EmployeeWithDepartment {
    fn from(row: EmployeeDepartmentRow) -> Self {
        EmployeeWithDepartment {
            department: Department {
                department_id: row.department_id,
                name: row.department_name,
            },
            employee: Employee {
                employee_id: row.employee_id,
                name: row.name,
                date_of_birth: row.date_of_birth,
                age: row.age,
                salary: row.salary,
                department_id: row.department_id,
            },
        }
    }
}

/// Column values written on insert and full update.
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeFields {
    pub name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub age: i32,
    pub salary: Decimal,
    pub department_id: i32,
}

/// Lenient `dateOfBirth` parsing.
///
/// Accepts a plain `YYYY-MM-DD` date or a full timestamp (the time part is
/// dropped; timestamps with an offset are first moved to server local time). `null`, an empty string and `0001-01-01` all mean no date.
pub mod date_of_birth {
    use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
    use serde::de::Error;
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        let value = match raw.as_deref().map(str::trim) {
            None | Some("") => return Ok(None),
            Some(value) => value,
        };
        match parse(value) {
            Some(date) if Some(date) == NaiveDate::from_ymd_opt(1, 1, 1) => Ok(None),
            Some(date) => Ok(Some(date)),
            None => Err(D::Error::custom(format!("invalid date of birth: {value}"))),
        }
    }

    fn parse(value: &str) -> Option<NaiveDate> {
        if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
            return Some(date);
        }
        if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
            return Some(timestamp.with_timezone(&Local).date_naive());
        }
        NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|timestamp| timestamp.date())
    }
}
