use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::adapters::inbound::http::router::AppState;

use super::{error_response, finish};

/// Path parameters of a container route
pub type ContainerPathParams = (String, String, String);

/// Handle container creation: 201 when created, 202 when it already existed
pub async fn create_container(
    State(app_state): State<AppState>,
    Path((_version, account, container)): Path<ContainerPathParams>,
) -> Response {
    let response = match app_state
        .backend
        .create_container(&account, &container)
        .await
    {
        Ok(true) => StatusCode::CREATED.into_response(),
        Ok(false) => StatusCode::ACCEPTED.into_response(),
        Err(e) => error_response(e),
    };
    finish(response)
}

/// Handle container listing as JSON
pub async fn list_container(
    State(app_state): State<AppState>,
    Path((_version, account, container)): Path<ContainerPathParams>,
) -> Response {
    let response = match app_state.backend.list_container(&account, &container).await {
        Ok(objects) => {
            let count = objects.len().to_string();
            (
                StatusCode::OK,
                [("x-container-object-count", count)],
                Json(objects),
            )
                .into_response()
        }
        Err(e) => error_response(e),
    };
    finish(response)
}
