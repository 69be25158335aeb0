// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Applicant profiles
//!
//! The validated input to a registration pipeline. Profiles are built
//! either directly from typed JSON or from a raw spreadsheet row via an
//! explicit allow-list mapping — unknown columns are ignored, never
//! copied onto the record.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// Errors from profile validation and row parsing
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    #[error("invalid number for {field}: {value}")]
    InvalidNumber { field: &'static str, value: String },
    #[error("invalid date for {field}: {value} (expected YYYY-MM-DD)")]
    InvalidDate { field: &'static str, value: String },
    #[error("invalid gender: {0}")]
    InvalidGender(String),
}

/// Applicant gender as printed on the form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    fn parse(value: &str) -> Result<Self, ValidationError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "male" | "m" => Ok(Gender::Male),
            "female" | "f" => Ok(Gender::Female),
            other => Err(ValidationError::InvalidGender(other.to_string())),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => f.write_str("Male"),
            Gender::Female => f.write_str("Female"),
        }
    }
}

/// Validated applicant data for one registration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicantProfile {
    pub name: String,
    pub date_of_birth: NaiveDate,
    pub age: u8,
    #[serde(default)]
    pub weight_kg: Option<f32>,
    pub gender: Gender,
    #[serde(default)]
    pub guardian_name: Option<String>,
    pub state: String,
    pub district: String,
    pub belt_grade: String,
    #[serde(default)]
    pub school: Option<String>,
    /// Secondary natural key; unique only when non-blank
    #[serde(default)]
    pub national_id: Option<String>,
}

/// Columns accepted from bulk-import rows. Anything else is dropped.
const ROW_COLUMNS: [&str; 11] = [
    "name",
    "date_of_birth",
    "age",
    "weight_kg",
    "gender",
    "guardian_name",
    "state",
    "district",
    "belt_grade",
    "school",
    "national_id",
];

impl ApplicantProfile {
    /// Check required fields and value ranges.
    ///
    /// Deserialized input is already type-checked; this catches blank
    /// strings and out-of-range values that types alone cannot.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name"));
        }
        if self.state.trim().is_empty() {
            return Err(ValidationError::MissingField("state"));
        }
        if self.district.trim().is_empty() {
            return Err(ValidationError::MissingField("district"));
        }
        if self.belt_grade.trim().is_empty() {
            return Err(ValidationError::MissingField("belt_grade"));
        }
        if self.age == 0 {
            return Err(ValidationError::InvalidNumber {
                field: "age",
                value: "0".to_string(),
            });
        }
        Ok(())
    }

    /// Build a profile from a raw string row (bulk import).
    ///
    /// Only columns in the allow-list are read; blank optional values
    /// become `None`. The resulting profile is already validated.
    pub fn from_row(row: &HashMap<String, String>) -> Result<Self, ValidationError> {
        let profile = Self {
            name: required(row, "name")?,
            date_of_birth: parse_date(row, "date_of_birth")?,
            age: parse_number(row, "age")?,
            weight_kg: optional(row, "weight_kg")
                .map(|v| {
                    v.parse().map_err(|_| ValidationError::InvalidNumber {
                        field: "weight_kg",
                        value: v,
                    })
                })
                .transpose()?,
            gender: Gender::parse(&required(row, "gender")?)?,
            guardian_name: optional(row, "guardian_name"),
            state: required(row, "state")?,
            district: required(row, "district")?,
            belt_grade: required(row, "belt_grade")?,
            school: optional(row, "school"),
            national_id: optional(row, "national_id"),
        };
        profile.validate()?;
        Ok(profile)
    }

    /// The allow-listed column names, for import documentation and tests
    pub fn row_columns() -> &'static [&'static str] {
        &ROW_COLUMNS
    }

    /// Non-blank secondary natural key, if any
    pub fn natural_key(&self) -> Option<&str> {
        self.national_id
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }

    /// Field values handed to the form renderer, keyed by layout field name
    pub fn render_values(&self) -> HashMap<String, String> {
        let mut values = HashMap::new();
        values.insert("name".to_string(), self.name.clone());
        values.insert(
            "date_of_birth".to_string(),
            self.date_of_birth.format("%Y-%m-%d").to_string(),
        );
        values.insert("age".to_string(), self.age.to_string());
        if let Some(weight) = self.weight_kg {
            values.insert("weight_kg".to_string(), format!("{weight:.1}"));
        }
        values.insert("gender".to_string(), self.gender.to_string());
        if let Some(guardian) = &self.guardian_name {
            values.insert("guardian_name".to_string(), guardian.clone());
        }
        values.insert("state".to_string(), self.state.clone());
        values.insert("district".to_string(), self.district.clone());
        values.insert("belt_grade".to_string(), self.belt_grade.clone());
        if let Some(school) = &self.school {
            values.insert("school".to_string(), school.clone());
        }
        if let Some(key) = self.natural_key() {
            values.insert("national_id".to_string(), key.to_string());
        }
        values
    }
}

fn required(row: &HashMap<String, String>, field: &'static str) -> Result<String, ValidationError> {
    match row.get(field).map(|v| v.trim()) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(ValidationError::MissingField(field)),
    }
}

fn optional(row: &HashMap<String, String>, field: &str) -> Option<String> {
    row.get(field)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn parse_date(row: &HashMap<String, String>, field: &'static str) -> Result<NaiveDate, ValidationError> {
    let value = required(row, field)?;
    NaiveDate::parse_from_str(&value, "%Y-%m-%d")
        .map_err(|_| ValidationError::InvalidDate { field, value })
}

fn parse_number<T: std::str::FromStr>(
    row: &HashMap<String, String>,
    field: &'static str,
) -> Result<T, ValidationError> {
    let value = required(row, field)?;
    value
        .parse()
        .map_err(|_| ValidationError::InvalidNumber { field, value })
}

#[cfg(test)]
#[path = "profile_tests.rs"]
mod tests;
