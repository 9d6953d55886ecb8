use serde::Serialize;
use utoipa::ToSchema;

/// Success envelope: `{"data": ...}`
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}
