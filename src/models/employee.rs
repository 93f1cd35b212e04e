//! Employee entity and job title enumeration.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fixed set of job titles known to the roster service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobTitle {
    #[serde(rename = "Customer Support")]
    CustomerSupport,
    #[serde(rename = "IT Support Specialist")]
    ItSupportSpecialist,
    #[serde(rename = "Software Engineer")]
    SoftwareEngineer,
}

impl JobTitle {
    /// All job titles, in the order the filter dropdown lists them.
    pub const ALL: [JobTitle; 3] = [
        JobTitle::CustomerSupport,
        JobTitle::ItSupportSpecialist,
        JobTitle::SoftwareEngineer,
    ];

    /// Display name as the service serializes it.
    pub fn as_str(&self) -> &'static str {
        match self {
            JobTitle::CustomerSupport => "Customer Support",
            JobTitle::ItSupportSpecialist => "IT Support Specialist",
            JobTitle::SoftwareEngineer => "Software Engineer",
        }
    }
}

impl fmt::Display for JobTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobTitle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        JobTitle::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown job title: {s}"))
    }
}

/// Employee record as served by the roster service.
///
/// Identity is `id`. The controller holds these only as a transient snapshot,
/// wholly replaced on every successful fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: i64,
    pub name: String,
    pub job_title: JobTitle,
    /// ISO `YYYY-MM-DD` on the wire.
    pub hire_date: NaiveDate,
}
