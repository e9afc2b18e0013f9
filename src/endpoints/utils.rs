use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

use crate::api::*;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProxyError {
	#[error("Username is required")]
	MissingParameter,

	#[error("Failed to fetch profile")]
	UpstreamFailure { details: Option<String> },
}

impl ProxyError {
	pub fn envelope(&self) -> ErrorEnvelope {
		match self {
			ProxyError::MissingParameter => ErrorEnvelope::new(USERNAME_REQUIRED),
			ProxyError::UpstreamFailure { details: Some(details) } => ErrorEnvelope::with_details(FAILED_TO_FETCH_PROFILE, details),
			ProxyError::UpstreamFailure { details: None } => ErrorEnvelope::new(UNKNOWN_ERROR),
		}
	}
}

impl ResponseError for ProxyError {
	fn status_code(&self) -> StatusCode {
		match self {
			ProxyError::MissingParameter => StatusCode::BAD_REQUEST,
			ProxyError::UpstreamFailure { .. } => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}

	fn error_response(&self) -> HttpResponse {
		HttpResponse::build(self.status_code()).json(self.envelope())
	}
}
