use axum::{
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::{info, warn};

use super::model::{SendRequest, SendResponse};
use super::service::{build_deep_link, sanitize_phone};

/// Gateway stub: build and log a wa.me deep link for the given phone/message.
///
/// "success" means the link was constructed and a log entry written — it is
/// not delivery confirmation.
#[utoipa::path(
    post,
    path = "/api/whatsapp/send",
    request_body = SendRequest,
    responses(
        (status = 200, description = "Deep link constructed and logged", body = SendResponse),
        (status = 400, description = "Phone number contains no digits", body = SendResponse)
    ),
    tag = "whatsapp"
)]
pub async fn send(Json(req): Json<SendRequest>) -> impl IntoResponse {
    let digits = sanitize_phone(&req.phone_number);

    if digits.is_empty() {
        warn!("WhatsApp send rejected: phone number contains no digits");
        return (
            StatusCode::BAD_REQUEST,
            Json(SendResponse {
                success: false,
                error: Some("Phone number contains no digits".to_string()),
                whatsapp_url: None,
            }),
        );
    }

    let link = build_deep_link(&digits, &req.message);
    info!("WhatsApp deep link generated for {}: {}", digits, link);

    (
        StatusCode::OK,
        Json(SendResponse {
            success: true,
            error: None,
            whatsapp_url: Some(link),
        }),
    )
}
