use actix_web::{get, web, HttpRequest, HttpResponse};
use serde_querystring::DuplicateQS;
use tracing::warn;

use crate::endpoints::ProxyError;
use crate::AppState;

// First `username` wins when the key repeats
fn username(request: &HttpRequest) -> Option<String> {
	let query = DuplicateQS::parse(request.query_string().as_bytes());
	let first = query.values(b"username")?.into_iter().next()??;
	Some(String::from_utf8_lossy(&first).into_owned())
		.filter(|username| !username.is_empty())
}

/// Relays the provider's profile for `?username=` as JSON.
#[get("/api/leetcode")]
pub async fn leetcode_profile(data: web::Data<AppState>, request: HttpRequest) -> Result<HttpResponse, ProxyError> {
	let username = username(&request).ok_or(ProxyError::MissingParameter)?;

	match data.provider.user(&username).await {
		Ok(profile) => Ok(HttpResponse::Ok().json(profile)),
		Err(err) => {
			warn!(%username, error = %err, "Profile fetch failed");
			Err(ProxyError::UpstreamFailure { details: err.message() })
		}
	}
}
