// src/web/types.rs

use rocket::form::FromForm;
use rocket::serde::{Deserialize, Serialize};

use crate::job_search::{JobSummary, Quota};

#[derive(Debug, Default, Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct SearchRequest {
    pub role: Option<String>,
    pub location: Option<String>,
}

/// Hidden fields carried by each result's save button on the HTML page
#[derive(Debug, FromForm)]
pub struct SaveForm {
    pub job_id: Option<String>,
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub source: Option<String>,
}

impl From<SaveForm> for JobSummary {
    fn from(form: SaveForm) -> Self {
        Self {
            job_id: form.job_id,
            title: form.title,
            company: form.company,
            location: form.location,
            source: form.source,
        }
    }
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct QuotaData {
    pub quota: Quota,
    pub display: String,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct HealthData {
    pub status: &'static str,
    pub saved_jobs: i64,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde", rename_all = "lowercase")]
pub enum ResponseType {
    Data,
    Error,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct DataResponse<T> {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub success: bool,
    pub message: String,
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            response_type: ResponseType::Data,
            success: true,
            message: message.into(),
            data,
        }
    }
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct StandardErrorResponse {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub success: bool,
    pub error: String,
    pub error_code: String,
    pub suggestions: Vec<String>,
}

impl StandardErrorResponse {
    pub fn new(error: &str, error_code: &str, suggestions: &[&str]) -> Self {
        Self {
            response_type: ResponseType::Error,
            success: false,
            error: error.to_string(),
            error_code: error_code.to_string(),
            suggestions: suggestions.iter().map(|s| s.to_string()).collect(),
        }
    }
}
