use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use maud::html;
use serde::Serialize;
use snafu::Snafu;
use std::num::ParseIntError;
use uuid::Uuid;

pub type RollbookResult<T> = Result<T, RollbookError>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum RollbookError {
    #[snafu(display("Error opening database"))]
    OpenDatabase { source: sqlx::Error },
    #[snafu(display("Error getting db connection"))]
    GetDatabaseConnection { source: sqlx::Error },
    #[snafu(display("Error making SQL query"))]
    MakeQuery { source: sqlx::Error },
    #[snafu(display("Error migrating DB schema"))]
    Migrate { source: sqlx::migrate::MigrateError },
    #[snafu(display("Unable to retrieve env var `{}`", name))]
    BadEnvVar {
        source: dotenvy::Error,
        name: &'static str,
    },
    #[snafu(display("Unable to parse `{}` from {:?}", name, original))]
    ParseInteger {
        source: ParseIntError,
        name: &'static str,
        original: String,
    },
    #[snafu(display("Unknown student store kind {:?}, expected `memory` or `postgres`", found))]
    UnknownStoreKind { found: String },
    #[snafu(display("Unable to parse date {:?}, expected YYYY-MM-DD", original))]
    ParseDate {
        source: time::error::Parse,
        original: String,
    },
    #[snafu(display("Unable to parse uuid {:?}", original))]
    ParseUuid {
        source: uuid::Error,
        original: String,
    },
    #[snafu(display("`{}` can't be null, leave it out to keep the current value", field))]
    NullField { field: &'static str },
    #[snafu(display("No student found with the id {}", id))]
    MissingStudent { id: Uuid },
    #[snafu(display("Error with JSON body"))]
    BadJson { source: JsonRejection },
}

impl RollbookError {
    pub fn status_code(&self) -> StatusCode {
        const ISE: StatusCode = StatusCode::INTERNAL_SERVER_ERROR; //internal server error
        const NF: StatusCode = StatusCode::NOT_FOUND; //not found
        const BI: StatusCode = StatusCode::BAD_REQUEST; //bad input

        match self {
            Self::OpenDatabase { .. } | Self::GetDatabaseConnection { .. } => ISE,
            Self::MakeQuery { source } => match source {
                sqlx::Error::RowNotFound => NF,
                _ => ISE,
            },
            Self::Migrate { .. } => ISE,
            Self::BadEnvVar { .. } | Self::ParseInteger { .. } | Self::UnknownStoreKind { .. } => {
                ISE
            }
            Self::ParseDate { .. } | Self::ParseUuid { .. } | Self::NullField { .. } => BI,
            Self::MissingStudent { .. } => NF,
            Self::BadJson { source } => source.status(),
        }
    }
}

impl IntoResponse for RollbookError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();
        error!(?self, %status_code, "Error!");

        let alert = html! {
            div class="bg-red-100 border border-red-400 text-red-700 px-4 py-3 rounded relative mb-4" role="alert" {
                strong class="font-bold" {"Rollbook Error: "}
                span {(self.to_string())}
            }
        };

        (status_code, Html(alert)).into_response()
    }
}

/// JSON flavour of [`RollbookError`] for the `/api` routes.
#[derive(Debug)]
pub struct ApiError(pub RollbookError);

impl From<RollbookError> for ApiError {
    fn from(value: RollbookError) -> Self {
        Self(value)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(source: JsonRejection) -> Self {
        Self(RollbookError::BadJson { source })
    }
}

#[derive(Serialize)]
struct ApiErrorBody {
    success: bool,
    message: &'static str,
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let Self(inner) = self;
        let status_code = inner.status_code();
        error!(?inner, %status_code, "API Error!");

        let message = match (&inner, status_code) {
            (RollbookError::MissingStudent { .. }, _) => "No student found with the id.",
            (_, code) if code.is_client_error() => "Bad request",
            _ => "Something went wrong",
        };

        let body = ApiErrorBody {
            success: false,
            message,
            error: inner.to_string(),
        };
        (status_code, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snafu::ResultExt;

    #[test]
    fn bad_input_maps_to_400() {
        let err = time::Date::parse("31/12/2001", crate::data::student::DATE_FORMAT)
            .context(ParseDateSnafu {
                original: "31/12/2001",
            })
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

        let err = Uuid::try_parse("nope")
            .context(ParseUuidSnafu { original: "nope" })
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn missing_student_maps_to_404() {
        let err = RollbookError::MissingStudent { id: Uuid::nil() };
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::from(err).into_response().status(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn config_errors_are_internal() {
        let err = RollbookError::UnknownStoreKind {
            found: "sqlite".into(),
        };
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
