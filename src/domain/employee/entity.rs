use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::dates::{calendar_date, format_calendar_date, DateNormalization};
use crate::validation::Record;

/// Server-assigned employee identifier.
pub type EmployeeId = i64;

/// An employee record as the API returns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Assigned by the server, never changes
    pub id: EmployeeId,

    pub name: String,

    pub email: String,

    pub sector: String,

    #[serde(with = "calendar_date")]
    pub birthday_date: NaiveDate,

    #[serde(with = "calendar_date")]
    pub admission_date: NaiveDate,

    /// Job title
    pub office: String,

    /// Seniority level
    pub level: String,
}

/// Raw values of the edit form, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateEmployeeValues {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub sector: String,
    #[serde(default)]
    pub birthday_date: String,
    #[serde(default)]
    pub admission_date: String,
    #[serde(default)]
    pub office: String,
    #[serde(default)]
    pub level: String,
}

impl UpdateEmployeeValues {
    /// Pre-fills the form from an existing record.
    pub fn from_employee(employee: &Employee) -> Self {
        Self {
            name: employee.name.clone(),
            email: employee.email.clone(),
            sector: employee.sector.clone(),
            birthday_date: format_calendar_date(employee.birthday_date),
            admission_date: format_calendar_date(employee.admission_date),
            office: employee.office.clone(),
            level: employee.level.clone(),
        }
    }

    /// Builds the record handed to validation, with both date fields
    /// normalized by `dates`.
    pub fn into_record(self, dates: DateNormalization) -> Record {
        let mut record = Record::new();
        record.insert("name".into(), Value::String(self.name));
        record.insert("email".into(), Value::String(self.email));
        record.insert("sector".into(), Value::String(self.sector));
        record.insert("office".into(), Value::String(self.office));
        record.insert("level".into(), Value::String(self.level));
        record.insert(
            "admission_date".into(),
            Value::String(dates.normalize_raw(&self.admission_date)),
        );
        record.insert(
            "birthday_date".into(),
            Value::String(dates.normalize_raw(&self.birthday_date)),
        );
        record
    }
}

/// Body of `PUT /employees/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeePayload {
    pub name: String,
    pub email: String,
    pub sector: String,
    pub office: String,
    pub level: String,
    #[serde(with = "calendar_date")]
    pub admission_date: NaiveDate,
    #[serde(with = "calendar_date")]
    pub birthday_date: NaiveDate,
}

impl EmployeePayload {
    /// Reads a validated record.
    pub fn from_record(record: Record) -> Result<Self, serde_json::Error> {
        serde_json::from_value(Value::Object(record))
    }
}

impl std::fmt::Display for Employee {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{} {} <{}>", self.id, self.name, self.email)
    }
}
