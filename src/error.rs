use actix_web::error::{InternalError, JsonPayloadError, PathError, QueryPayloadError};
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode};
use serde_json::json;
use tracing::error;

use crate::repository::RepositoryError;

const INTERNAL_MESSAGE: &str = "Something went wrong, Contact with system admin";

/// Error returned by department handlers; storage details stay in the logs.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct ApiError(#[from] RepositoryError);

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self.0 {
            RepositoryError::NotFound(_) => StatusCode::NOT_FOUND,
            RepositoryError::Validation(_) => StatusCode::BAD_REQUEST,
            RepositoryError::Storage(_) | RepositoryError::Unavailable(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match &self.0 {
            RepositoryError::NotFound(_) => "Department not found".to_string(),
            RepositoryError::Validation(reason) => reason.clone(),
            RepositoryError::Storage(_) | RepositoryError::Unavailable(_) => {
                error!(error = %self.0, "Department store failure");
                INTERNAL_MESSAGE.to_string()
            }
        };

        HttpResponse::build(self.status_code()).json(json!({ "message": message }))
    }
}

fn rejected<E>(err: E, status: StatusCode) -> actix_web::Error
where
    E: std::fmt::Debug + std::fmt::Display + 'static,
{
    let body = json!({ "message": err.to_string() });
    InternalError::from_response(err, HttpResponse::build(status).json(body)).into()
}

/// Malformed JSON bodies become 400 with a `{"message"}` body.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    rejected(err, StatusCode::BAD_REQUEST)
}

/// Unparsable path segments (e.g. a non-numeric id) become 404.
pub fn path_error_handler(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    rejected(err, StatusCode::NOT_FOUND)
}

pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    rejected(err, StatusCode::BAD_REQUEST)
}
