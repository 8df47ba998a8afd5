use autorbi::{
    model::work::{
        ComponentCorrectionDto, CorrectionRequestDto, CorrectionResultDto, EquipmentDto,
        TrackedFieldsDto,
    },
    server::controller::{equipment::apply_corrections, work::get_work_equipment},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use super::*;

fn correction(component_id: i32, values: TrackedFieldsDto) -> Json<CorrectionRequestDto> {
    Json(CorrectionRequestDto {
        corrections: vec![ComponentCorrectionDto {
            component_id,
            values,
        }],
    })
}

/// Expect blank fields filled while existing values are kept
#[tokio::test]
async fn fills_blank_fields_only() -> Result<(), TestError> {
    let test = TestBuilder::new().with_all_tables().build().await?;
    let engineer = test.login_as("engineer", constant::ROLE_ENGINEER).await?;
    let work = test.work().insert_work("Unit 100", None).await?;
    test.work().assign_user(work.id, engineer.id).await?;
    let equipment = test.work().insert_equipment(work.id, "V-001", None).await?;
    let component = test
        .work()
        .insert_component(equipment.id, "Shell", &[("fluid", "Water")])
        .await?;
    let state = test.app_state();

    let result = apply_corrections(
        State(state.clone()),
        test.session.clone(),
        Path(equipment.id),
        correction(
            component.id,
            TrackedFieldsDto {
                fluid: Some("Steam".to_string()),
                material_spec: Some("SA-516".to_string()),
                ..Default::default()
            },
        ),
    )
    .await;

    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);
    let counts: CorrectionResultDto = body_json(resp).await;
    assert_eq!(counts.fields_corrected, 1);
    assert_eq!(counts.total_fields, 7);

    let result = get_work_equipment(State(state), test.session.clone(), Path(work.id)).await;
    let list: Vec<EquipmentDto> = body_json(result.unwrap().into_response()).await;
    let fields = &list[0].components[0].fields;
    assert_eq!(fields.fluid.as_deref(), Some("Water"));
    assert_eq!(fields.material_spec.as_deref(), Some("SA-516"));

    Ok(())
}

/// Expect 403 for an engineer not assigned to the equipment's work
#[tokio::test]
async fn unassigned_engineer_forbidden() -> Result<(), TestError> {
    let test = TestBuilder::new().with_all_tables().build().await?;
    test.login_as("engineer", constant::ROLE_ENGINEER).await?;
    let work = test.work().insert_work("Unit 100", None).await?;
    let equipment = test.work().insert_equipment(work.id, "V-001", None).await?;
    let component = test
        .work()
        .insert_component(equipment.id, "Shell", &[])
        .await?;

    let result = apply_corrections(
        State(test.app_state()),
        test.session.clone(),
        Path(equipment.id),
        correction(component.id, TrackedFieldsDto::default()),
    )
    .await;

    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    Ok(())
}

/// Expect 400 when a component belongs to other equipment
#[tokio::test]
async fn rejects_component_of_other_equipment() -> Result<(), TestError> {
    let test = TestBuilder::new().with_all_tables().build().await?;
    test.login_as("admin", constant::ROLE_ADMIN).await?;
    let work = test.work().insert_work("Unit 100", None).await?;
    let first = test.work().insert_equipment(work.id, "V-001", None).await?;
    let second = test.work().insert_equipment(work.id, "V-002", None).await?;
    let component = test.work().insert_component(second.id, "Shell", &[]).await?;

    let result = apply_corrections(
        State(test.app_state()),
        test.session.clone(),
        Path(first.id),
        correction(
            component.id,
            TrackedFieldsDto {
                fluid: Some("Air".to_string()),
                ..Default::default()
            },
        ),
    )
    .await;

    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

/// Expect 404 for equipment that does not exist
#[tokio::test]
async fn missing_equipment_not_found() -> Result<(), TestError> {
    let test = TestBuilder::new().with_all_tables().build().await?;
    test.login_as("admin", constant::ROLE_ADMIN).await?;

    let result = apply_corrections(
        State(test.app_state()),
        test.session.clone(),
        Path(404),
        Json(CorrectionRequestDto {
            corrections: Vec::new(),
        }),
    )
    .await;

    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    Ok(())
}
