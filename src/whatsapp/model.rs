use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request body for the gateway send endpoint
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SendRequest {
    /// Destination phone number; the caller strips non-digit characters
    #[serde(rename = "phoneNumber")]
    #[schema(example = "2348012345678")]
    pub phone_number: String,

    /// Message text to deliver
    #[schema(example = "Congratulations! You reached your revenue goal.")]
    pub message: String,
}

/// Response body from the gateway send endpoint
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SendResponse {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// The wa.me deep link that was constructed and logged
    #[serde(rename = "whatsappUrl", skip_serializing_if = "Option::is_none")]
    pub whatsapp_url: Option<String>,
}

/// Outcome of a delivery attempt as seen by the pipeline. Failures are data,
/// not errors: nothing propagates past the gateway boundary.
#[derive(Debug, Clone)]
pub struct SendOutcome {
    pub success: bool,
    pub error: Option<String>,
}

impl SendOutcome {
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
        }
    }
}
