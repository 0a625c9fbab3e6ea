//! Data Transfer Objects for the HTTP API.

use axum::{
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
    Form, Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::error::AppError;
use crate::models::DateRange;

pub use crate::upstream::proxy::ProxyRangeBody as ApodRangeRequest;

/// Date format accepted on the wire.
const DATE_FORMAT: &str = "%Y-%m-%d";

impl ApodRangeRequest {
    /// Validate the requested dates.
    pub fn to_range(&self) -> Result<DateRange, AppError> {
        let start = parse_date("startDate", &self.start_date)?;
        let end = parse_date("endDate", &self.end_date)?;
        Ok(DateRange::new(start, end)?)
    }
}

fn parse_date(field: &str, value: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| {
        AppError::BadRequest(format!("{} must be a YYYY-MM-DD date, got '{}'", field, value))
    })
}

/// `POST /apod` body, accepted as JSON or as a urlencoded form.
#[derive(Debug, Clone)]
pub struct RangeBody(pub ApodRangeRequest);

impl<S> FromRequest<S> for RangeBody
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_form = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"));

        if is_form {
            let Form(body) = Form::<ApodRangeRequest>::from_request(req, state)
                .await
                .map_err(|e| AppError::BadRequest(e.body_text()))?;
            Ok(Self(body))
        } else {
            let Json(body) = Json::<ApodRangeRequest>::from_request(req, state)
                .await
                .map_err(|e| AppError::BadRequest(e.body_text()))?;
            Ok(Self(body))
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the server
    pub version: String,
    /// Number of origins allowed by the CORS policy
    pub allowed_origins: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(start: &str, end: &str) -> ApodRangeRequest {
        ApodRangeRequest {
            start_date: start.to_string(),
            end_date: end.to_string(),
        }
    }

    #[test]
    fn test_valid_range() {
        let range = request("2024-06-01", "2024-06-02").to_range().unwrap();
        assert_eq!(range.days(), 2);
    }

    #[test]
    fn test_bad_date_is_bad_request() {
        let err = request("06/01/2024", "2024-06-02").to_range().unwrap_err();
        assert!(matches!(err, AppError::BadRequest(ref m) if m.contains("startDate")));
    }

    #[test]
    fn test_inverted_range_is_rejected() {
        let err = request("2024-06-03", "2024-06-02").to_range().unwrap_err();
        assert!(matches!(err, AppError::Apod(crate::error::ApodError::InvalidRange { .. })));
    }
}
