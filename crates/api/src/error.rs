//! Error responses.
//!
//! Every handler turns a `LedgerError` into `{"error": CODE, "message": ...}`
//! with the status the error carries. Store failures are logged and answered
//! with a generic message.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use sitebook_core::ledger::{LedgerError, ValidationError};
use sitebook_shared::types::format_amount;
use tracing::error;

/// Converts a ledger error into an HTTP response.
pub fn ledger_error_response(err: &LedgerError) -> Response {
    let status =
        StatusCode::from_u16(err.http_status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    if status.is_server_error() {
        error!(error = %err, "Ledger store failure");
        return (
            status,
            Json(json!({
                "error": err.error_code(),
                "message": "An error occurred"
            })),
        )
            .into_response();
    }

    let body = match err {
        LedgerError::Validation(ValidationError::Unbalanced {
            total_debit,
            total_credit,
        }) => json!({
            "error": err.error_code(),
            "message": err.to_string(),
            "total_debit": format_amount(*total_debit),
            "total_credit": format_amount(*total_credit),
        }),
        _ => json!({
            "error": err.error_code(),
            "message": err.to_string(),
        }),
    };

    (status, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use rust_decimal::Decimal;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_unbalanced_carries_totals() {
        let err = LedgerError::from(ValidationError::Unbalanced {
            total_debit: Decimal::new(100_000, 2),
            total_credit: Decimal::new(99_998, 2),
        });
        let response = ledger_error_response(&err);
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"], "UNBALANCED_ENTRY");
        assert_eq!(body["total_debit"], "1000.00");
        assert_eq!(body["total_credit"], "999.98");
    }

    #[tokio::test]
    async fn test_infrastructure_hides_detail() {
        let err = LedgerError::Infrastructure("password authentication failed".into());
        let response = ledger_error_response(&err);
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["message"], "An error occurred");
    }

    #[tokio::test]
    async fn test_not_found_and_conflict() {
        let response = ledger_error_response(&LedgerError::not_found("client", "C9"));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["message"], "client not found: C9");

        let response = ledger_error_response(&LedgerError::ConstraintViolation("x".into()));
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }
}
