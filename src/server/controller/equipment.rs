use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        work::{CorrectionRequestDto, CorrectionResultDto},
    },
    server::{
        controller::util::get_user::get_user_from_session,
        error::Error,
        model::app::AppState,
        service::{correction::CorrectionService, work::WorkService},
    },
};

pub static EQUIPMENT_TAG: &str = "equipment";

/// Fills blank component fields of an equipment and logs how many were corrected
#[utoipa::path(
    post,
    path = "/api/equipment/{equipment_id}/corrections",
    tag = EQUIPMENT_TAG,
    params(("equipment_id" = i32, Path, description = "Equipment ID")),
    request_body = CorrectionRequestDto,
    responses(
        (status = 200, description = "Corrections applied", body = CorrectionResultDto),
        (status = 400, description = "Component does not belong to the equipment", body = ErrorDto),
        (status = 403, description = "Not assigned to the work", body = ErrorDto),
        (status = 404, description = "Equipment or component not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn apply_corrections(
    State(state): State<AppState>,
    session: Session,
    Path(equipment_id): Path<i32>,
    Json(request): Json<CorrectionRequestDto>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;
    WorkService::new(&state.db)
        .ensure_equipment_access(&user, equipment_id)
        .await?;

    let correction_service = CorrectionService::new(&state.db);
    let result = correction_service
        .apply_corrections(equipment_id, user.id, request.corrections)
        .await?;

    Ok((StatusCode::OK, Json(result)))
}
