use crate::data::validation::ValidationError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use snafu::Snafu;
use std::num::ParseIntError;

pub type AlunosResult<T> = Result<T, AlunosError>;

pub const NOT_FOUND_MESSAGE: &str = "Aluno não encontrado";

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum AlunosError {
    #[snafu(display("Error opening database"))]
    OpenDatabase { source: sqlx::Error },
    #[snafu(display("Error getting db connection"))]
    GetDatabaseConnection { source: sqlx::Error },
    #[snafu(display("Error making SQL query"))]
    MakeQuery { source: sqlx::Error },
    #[snafu(display("Error migrating DB schema"))]
    MigrateError { source: sqlx::migrate::MigrateError },
    #[snafu(display("Unable to retrieve env var `{}`", name))]
    BadEnvVar {
        source: dotenvy::Error,
        name: &'static str,
    },
    #[snafu(display("Unable to parse `{}`", name))]
    ParseNumber {
        source: ParseIntError,
        name: &'static str,
    },
    #[snafu(display("Unknown storage kind {:?}, expected `postgres` or `memory`", found))]
    UnknownStorageKind { found: String },
    #[snafu(display("{}", source))]
    ParseBody { source: serde_json::Error },
    #[snafu(display("{}", source))]
    Validation { source: ValidationError },
    #[snafu(display("Unable to find student by {}", lookup))]
    MissingStudent { lookup: String },
    #[snafu(display("{}: already registered to another student", field))]
    DuplicateDocument { field: &'static str },
}

impl IntoResponse for AlunosError {
    #[allow(clippy::match_same_arms)]
    fn into_response(self) -> Response {
        const ISE: StatusCode = StatusCode::INTERNAL_SERVER_ERROR; //internal server error
        const NF: StatusCode = StatusCode::NOT_FOUND; //not found
        const BI: StatusCode = StatusCode::BAD_REQUEST; //bad input
        const CF: StatusCode = StatusCode::CONFLICT; //conflict

        let status_code = match &self {
            Self::OpenDatabase { .. } | Self::GetDatabaseConnection { .. } => ISE,
            Self::MigrateError { .. } => ISE,
            Self::MakeQuery { .. } => ISE,
            Self::BadEnvVar { .. } | Self::ParseNumber { .. } => ISE,
            Self::UnknownStorageKind { .. } => ISE,
            Self::ParseBody { .. } => BI,
            Self::Validation { .. } => BI,
            Self::MissingStudent { .. } => NF,
            Self::DuplicateDocument { .. } => CF,
        };

        let body = if status_code == NF {
            json!({ "Not found": NOT_FOUND_MESSAGE })
        } else {
            json!({ "error": self.to_string() })
        };

        if status_code.is_server_error() {
            error!(?self, "Error!");
        } else {
            warn!(error = %self, %status_code, "Rejected request");
        }

        (status_code, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::student::StudentField;

    #[test]
    fn statuses_follow_the_kind_of_failure() {
        let cases = [
            (
                AlunosError::MakeQuery {
                    source: sqlx::Error::RowNotFound,
                },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                AlunosError::ParseBody {
                    source: serde_json::from_str::<serde_json::Value>("{").unwrap_err(),
                },
                StatusCode::BAD_REQUEST,
            ),
            (
                AlunosError::Validation {
                    source: ValidationError::ZeroValue {
                        field: StudentField::Nome,
                    },
                },
                StatusCode::BAD_REQUEST,
            ),
            (
                AlunosError::MissingStudent {
                    lookup: "id \"1\"".into(),
                },
                StatusCode::NOT_FOUND,
            ),
            (
                AlunosError::DuplicateDocument { field: "cpf" },
                StatusCode::CONFLICT,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }
}
