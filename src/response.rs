use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Response envelope shared by every JSON endpoint:
/// `{status: bool, message: string, data: any|null}`.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub status: bool,
    pub message: String,
    pub data: Option<T>,
}

/// Successful response with an envelope body.
#[derive(Debug)]
pub struct ApiOk<T>(pub StatusCode, pub &'static str, pub T);

impl<T: Serialize> IntoResponse for ApiOk<T> {
    fn into_response(self) -> Response {
        let ApiOk(code, message, data) = self;
        (
            code,
            Json(Envelope {
                status: true,
                message: message.to_string(),
                data: Some(data),
            }),
        )
            .into_response()
    }
}

/// 204 carries no body at all, not even the envelope.
#[derive(Debug)]
pub struct NoContent;

impl IntoResponse for NoContent {
    fn into_response(self) -> Response {
        StatusCode::NO_CONTENT.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_serializes_all_fields() {
        let env = Envelope {
            status: true,
            message: "ok".into(),
            data: Some(serde_json::json!({"id": 1})),
        };
        let json = serde_json::to_value(&env).unwrap();
        assert_eq!(json["status"], true);
        assert_eq!(json["message"], "ok");
        assert_eq!(json["data"]["id"], 1);
    }

    #[test]
    fn envelope_null_data() {
        let env: Envelope<serde_json::Value> = Envelope {
            status: false,
            message: "nope".into(),
            data: None,
        };
        let json = serde_json::to_value(&env).unwrap();
        assert!(json["data"].is_null());
    }

    #[test]
    fn no_content_has_204_status() {
        let res = NoContent.into_response();
        assert_eq!(res.status(), StatusCode::NO_CONTENT);
    }
}
