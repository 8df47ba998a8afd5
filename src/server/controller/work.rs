use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::{ErrorDto, MessageDto},
        work::{
            AssignWorkDto, BatchSaveEquipmentDto, BatchSaveResultDto, CanUploadDto,
            CanUploadQuery, CreateWorkDto, EquipmentDto, ExcelFileInfoDto, UpdateWorkReportsDto,
            WorkDto, WorkHistoryDto,
        },
    },
    server::{
        controller::util::get_user::{get_admin_from_session, get_user_from_session},
        error::Error,
        model::app::AppState,
        service::{
            excel::{can_upload_equipment, ExcelValidator},
            work::WorkService,
        },
    },
};

pub static WORK_TAG: &str = "work";

/// Lists every work for administrators and the assigned works for engineers
#[utoipa::path(
    get,
    path = "/api/works",
    tag = WORK_TAG,
    responses(
        (status = 200, description = "Works visible to the user", body = Vec<WorkDto>),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_works(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;
    let work_service = WorkService::new(&state.db);

    let works = work_service.list_works(&user).await?;

    Ok((StatusCode::OK, Json(works)))
}

/// Creates a pending work
#[utoipa::path(
    post,
    path = "/api/works",
    tag = WORK_TAG,
    request_body = CreateWorkDto,
    responses(
        (status = 201, description = "Work created", body = WorkDto),
        (status = 400, description = "Work name missing", body = ErrorDto),
        (status = 403, description = "Administrator access required", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_work(
    State(state): State<AppState>,
    session: Session,
    Json(work): Json<CreateWorkDto>,
) -> Result<impl IntoResponse, Error> {
    let admin = get_admin_from_session(&state, &session).await?;
    let work_service = WorkService::new(&state.db);

    let created = work_service.create_work(admin.id, work).await?;

    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get,
    path = "/api/works/{work_id}",
    tag = WORK_TAG,
    params(("work_id" = i32, Path, description = "Work ID")),
    responses(
        (status = 200, description = "The work", body = WorkDto),
        (status = 403, description = "Not assigned to the work", body = ErrorDto),
        (status = 404, description = "Work not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_work(
    State(state): State<AppState>,
    session: Session,
    Path(work_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;
    let work_service = WorkService::new(&state.db);

    let work = work_service.get_work(&user, work_id).await?;

    Ok((StatusCode::OK, Json(work)))
}

/// Assigns an active engineer to a work
#[utoipa::path(
    post,
    path = "/api/works/{work_id}/assign",
    tag = WORK_TAG,
    params(("work_id" = i32, Path, description = "Work ID")),
    request_body = AssignWorkDto,
    responses(
        (status = 200, description = "Engineer assigned", body = MessageDto),
        (status = 400, description = "Not an active engineer or already assigned", body = ErrorDto),
        (status = 403, description = "Administrator access required", body = ErrorDto),
        (status = 404, description = "Work or user not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn assign_engineer(
    State(state): State<AppState>,
    session: Session,
    Path(work_id): Path<i32>,
    Json(assignment): Json<AssignWorkDto>,
) -> Result<impl IntoResponse, Error> {
    let admin = get_admin_from_session(&state, &session).await?;
    let work_service = WorkService::new(&state.db);

    work_service
        .assign_engineer(admin.id, work_id, assignment.user_id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(MessageDto {
            message: "Engineer assigned".to_string(),
        }),
    ))
}

/// Lists a work's equipment with components
#[utoipa::path(
    get,
    path = "/api/works/{work_id}/equipment",
    tag = WORK_TAG,
    params(("work_id" = i32, Path, description = "Work ID")),
    responses(
        (status = 200, description = "Equipment of the work", body = Vec<EquipmentDto>),
        (status = 403, description = "Not assigned to the work", body = ErrorDto),
        (status = 404, description = "Work not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_work_equipment(
    State(state): State<AppState>,
    session: Session,
    Path(work_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;
    let work_service = WorkService::new(&state.db);

    work_service.ensure_access(&user, work_id).await?;
    let equipment = work_service.get_equipment_by_work(work_id).await?;

    Ok((StatusCode::OK, Json(equipment)))
}

/// Looks up one equipment of a work by its equipment number
#[utoipa::path(
    get,
    path = "/api/works/{work_id}/equipment/{equipment_no}",
    tag = WORK_TAG,
    params(
        ("work_id" = i32, Path, description = "Work ID"),
        ("equipment_no" = String, Path, description = "Equipment number")
    ),
    responses(
        (status = 200, description = "The equipment", body = EquipmentDto),
        (status = 403, description = "Not assigned to the work", body = ErrorDto),
        (status = 404, description = "Work or equipment not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_work_equipment_by_number(
    State(state): State<AppState>,
    session: Session,
    Path((work_id, equipment_no)): Path<(i32, String)>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;
    let work_service = WorkService::new(&state.db);

    work_service.ensure_access(&user, work_id).await?;
    let equipment = work_service
        .get_equipment_by_work_and_number(work_id, &equipment_no)
        .await?
        .ok_or_else(|| {
            Error::NotFound(format!(
                "Equipment {} not found in work {}",
                equipment_no, work_id
            ))
        })?;

    Ok((StatusCode::OK, Json(equipment)))
}

/// Saves a batch of extracted equipment, each entry independently
///
/// Duplicate or blank equipment numbers count as failures without aborting the batch.
#[utoipa::path(
    post,
    path = "/api/works/{work_id}/equipment",
    tag = WORK_TAG,
    params(("work_id" = i32, Path, description = "Work ID")),
    request_body = BatchSaveEquipmentDto,
    responses(
        (status = 200, description = "Success and failure counts", body = BatchSaveResultDto),
        (status = 403, description = "Not assigned to the work", body = ErrorDto),
        (status = 404, description = "Work not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn save_work_equipment(
    State(state): State<AppState>,
    session: Session,
    Path(work_id): Path<i32>,
    Json(batch): Json<BatchSaveEquipmentDto>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;
    let work_service = WorkService::new(&state.db);

    work_service.ensure_access(&user, work_id).await?;
    let result = work_service
        .batch_save_equipment(work_id, user.id, batch)
        .await?;

    Ok((StatusCode::OK, Json(result)))
}

/// Records generated report paths and optionally changes the work status
#[utoipa::path(
    put,
    path = "/api/works/{work_id}/reports",
    tag = WORK_TAG,
    params(("work_id" = i32, Path, description = "Work ID")),
    request_body = UpdateWorkReportsDto,
    responses(
        (status = 200, description = "Work updated", body = WorkDto),
        (status = 403, description = "Not assigned to the work", body = ErrorDto),
        (status = 404, description = "Work not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_work_reports(
    State(state): State<AppState>,
    session: Session,
    Path(work_id): Path<i32>,
    Json(update): Json<UpdateWorkReportsDto>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;
    let work_service = WorkService::new(&state.db);

    work_service.ensure_access(&user, work_id).await?;
    let work = work_service.update_reports(user.id, work_id, update).await?;

    Ok((StatusCode::OK, Json(work)))
}

/// Reports the state of the work's Excel masterfile
#[utoipa::path(
    get,
    path = "/api/works/{work_id}/excel",
    tag = WORK_TAG,
    params(("work_id" = i32, Path, description = "Work ID")),
    responses(
        (status = 200, description = "Masterfile status", body = ExcelFileInfoDto),
        (status = 403, description = "Not assigned to the work", body = ErrorDto),
        (status = 404, description = "Work not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_work_excel(
    State(state): State<AppState>,
    session: Session,
    Path(work_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;
    WorkService::new(&state.db)
        .ensure_access(&user, work_id)
        .await?;

    let info = ExcelValidator::new(&state.output_dir).get_excel_file_info(work_id)?;

    Ok((StatusCode::OK, Json(info)))
}

/// Checks whether drawings for an equipment may still be uploaded to the work
#[utoipa::path(
    get,
    path = "/api/works/{work_id}/excel/can-upload",
    tag = WORK_TAG,
    params(("work_id" = i32, Path, description = "Work ID"), CanUploadQuery),
    responses(
        (status = 200, description = "Upload decision with reason", body = CanUploadDto),
        (status = 403, description = "Not assigned to the work", body = ErrorDto),
        (status = 404, description = "Work not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn can_upload_work_equipment(
    State(state): State<AppState>,
    session: Session,
    Path(work_id): Path<i32>,
    Query(query): Query<CanUploadQuery>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;
    WorkService::new(&state.db)
        .ensure_access(&user, work_id)
        .await?;

    let info = ExcelValidator::new(&state.output_dir).get_excel_file_info(work_id)?;
    let decision = can_upload_equipment(&info, query.equipment_no.trim());

    Ok((StatusCode::OK, Json(decision)))
}

/// Returns a work's history, oldest first
#[utoipa::path(
    get,
    path = "/api/works/{work_id}/history",
    tag = WORK_TAG,
    params(("work_id" = i32, Path, description = "Work ID")),
    responses(
        (status = 200, description = "History of the work", body = Vec<WorkHistoryDto>),
        (status = 403, description = "Not assigned to the work", body = ErrorDto),
        (status = 404, description = "Work not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_work_history(
    State(state): State<AppState>,
    session: Session,
    Path(work_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;
    let work_service = WorkService::new(&state.db);

    work_service.ensure_access(&user, work_id).await?;
    let history = work_service.get_history(work_id).await?;

    Ok((StatusCode::OK, Json(history)))
}
