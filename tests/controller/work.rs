use autorbi::{
    model::work::{
        AssignWorkDto, BatchSaveEquipmentDto, BatchSaveResultDto, CanUploadDto, CanUploadQuery,
        ComponentInputDto, CreateWorkDto, EquipmentDto, EquipmentEntryDto, ExcelFileInfoDto,
        ExcelFileType, TrackedFieldsDto, UpdateWorkReportsDto, WorkDto, WorkHistoryDto,
        WorkStatus,
    },
    server::controller::work::{
        assign_engineer, can_upload_work_equipment, create_work, get_work,
        get_work_equipment, get_work_equipment_by_number, get_work_excel, get_work_history,
        list_works, save_work_equipment, update_work_reports,
    },
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use super::*;

fn entry(equipment_no: &str) -> EquipmentEntryDto {
    EquipmentEntryDto {
        equipment_no: equipment_no.to_string(),
        pmt_no: Some("PMT-1".to_string()),
        description: Some("Air receiver".to_string()),
        components: vec![ComponentInputDto {
            part_name: "Shell".to_string(),
            phase: Some("Gas".to_string()),
            fields: TrackedFieldsDto {
                fluid: Some("Air".to_string()),
                ..Default::default()
            },
        }],
    }
}

mod list_works_tests {
    use super::*;

    /// Expect engineers to only see works they are assigned to
    #[tokio::test]
    async fn engineer_sees_assigned_works() -> Result<(), TestError> {
        let test = TestBuilder::new().with_all_tables().build().await?;
        let engineer = test.login_as("engineer", constant::ROLE_ENGINEER).await?;
        let assigned = test.work().insert_work("Unit 100", None).await?;
        test.work().insert_work("Unit 200", None).await?;
        test.work().assign_user(assigned.id, engineer.id).await?;

        let result = list_works(State(test.app_state()), test.session.clone()).await;

        let resp = result.unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::OK);
        let works: Vec<WorkDto> = body_json(resp).await;
        assert_eq!(works.len(), 1);
        assert_eq!(works[0].id, assigned.id);

        Ok(())
    }

    /// Expect administrators to see every work
    #[tokio::test]
    async fn admin_sees_all_works() -> Result<(), TestError> {
        let test = TestBuilder::new().with_all_tables().build().await?;
        test.login_as("admin", constant::ROLE_ADMIN).await?;
        test.work().insert_work("Unit 100", None).await?;
        test.work().insert_work("Unit 200", None).await?;

        let result = list_works(State(test.app_state()), test.session.clone()).await;

        let works: Vec<WorkDto> = body_json(result.unwrap().into_response()).await;
        assert_eq!(works.len(), 2);

        Ok(())
    }
}

mod create_work_tests {
    use super::*;

    /// Expect 201 with a pending work created by the administrator
    #[tokio::test]
    async fn admin_creates_pending_work() -> Result<(), TestError> {
        let test = TestBuilder::new().with_all_tables().build().await?;
        let admin = test.login_as("admin", constant::ROLE_ADMIN).await?;

        let result = create_work(
            State(test.app_state()),
            test.session.clone(),
            Json(CreateWorkDto {
                work_name: "  Unit 100 Turnaround ".to_string(),
                description: None,
            }),
        )
        .await;

        let resp = result.unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::CREATED);
        let work: WorkDto = body_json(resp).await;
        assert_eq!(work.work_name, "Unit 100 Turnaround");
        assert_eq!(work.status, WorkStatus::Pending);
        assert_eq!(work.created_by, Some(admin.id));

        Ok(())
    }

    /// Expect 403 when an engineer creates a work
    #[tokio::test]
    async fn engineer_cannot_create_work() -> Result<(), TestError> {
        let test = TestBuilder::new().with_all_tables().build().await?;
        test.login_as("engineer", constant::ROLE_ENGINEER).await?;

        let result = create_work(
            State(test.app_state()),
            test.session.clone(),
            Json(CreateWorkDto {
                work_name: "Unit 100".to_string(),
                description: None,
            }),
        )
        .await;

        let resp = result.err().unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        Ok(())
    }

    /// Expect 400 for a blank work name
    #[tokio::test]
    async fn rejects_blank_name() -> Result<(), TestError> {
        let test = TestBuilder::new().with_all_tables().build().await?;
        test.login_as("admin", constant::ROLE_ADMIN).await?;

        let result = create_work(
            State(test.app_state()),
            test.session.clone(),
            Json(CreateWorkDto {
                work_name: "   ".to_string(),
                description: None,
            }),
        )
        .await;

        let resp = result.err().unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        Ok(())
    }
}

mod get_work_tests {
    use super::*;

    /// Expect 403 for an engineer not assigned to the work
    #[tokio::test]
    async fn unassigned_engineer_forbidden() -> Result<(), TestError> {
        let test = TestBuilder::new().with_all_tables().build().await?;
        test.login_as("engineer", constant::ROLE_ENGINEER).await?;
        let work = test.work().insert_work("Unit 100", None).await?;

        let result = get_work(
            State(test.app_state()),
            test.session.clone(),
            Path(work.id),
        )
        .await;

        let resp = result.err().unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        Ok(())
    }

    /// Expect 404 for a work that does not exist
    #[tokio::test]
    async fn missing_work_not_found() -> Result<(), TestError> {
        let test = TestBuilder::new().with_all_tables().build().await?;
        test.login_as("admin", constant::ROLE_ADMIN).await?;

        let result = get_work(
            State(test.app_state()),
            test.session.clone(),
            Path(404),
        )
        .await;

        let resp = result.err().unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        Ok(())
    }
}

mod assign_engineer_tests {
    use super::*;

    /// Expect the engineer to gain access and the assignment to be logged
    #[tokio::test]
    async fn assigns_and_logs_history() -> Result<(), TestError> {
        let test = TestBuilder::new().with_all_tables().build().await?;
        test.login_as("admin", constant::ROLE_ADMIN).await?;
        let engineer = test
            .user()
            .insert_user("engineer", constant::ROLE_ENGINEER, constant::STATUS_ACTIVE)
            .await?;
        let work = test.work().insert_work("Unit 100", None).await?;
        let state = test.app_state();

        let result = assign_engineer(
            State(state.clone()),
            test.session.clone(),
            Path(work.id),
            Json(AssignWorkDto {
                user_id: engineer.id,
            }),
        )
        .await;
        assert_eq!(result.unwrap().into_response().status(), StatusCode::OK);

        let result = get_work_history(State(state), test.session.clone(), Path(work.id)).await;
        let history: Vec<WorkHistoryDto> = body_json(result.unwrap().into_response()).await;
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].action_type, "work_assigned");

        Ok(())
    }

    /// Expect 400 when the same engineer is assigned twice
    #[tokio::test]
    async fn rejects_duplicate_assignment() -> Result<(), TestError> {
        let test = TestBuilder::new().with_all_tables().build().await?;
        test.login_as("admin", constant::ROLE_ADMIN).await?;
        let engineer = test
            .user()
            .insert_user("engineer", constant::ROLE_ENGINEER, constant::STATUS_ACTIVE)
            .await?;
        let work = test.work().insert_work("Unit 100", None).await?;
        test.work().assign_user(work.id, engineer.id).await?;

        let result = assign_engineer(
            State(test.app_state()),
            test.session.clone(),
            Path(work.id),
            Json(AssignWorkDto {
                user_id: engineer.id,
            }),
        )
        .await;

        let resp = result.err().unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        Ok(())
    }

    /// Expect 400 when assigning an administrator
    #[tokio::test]
    async fn rejects_non_engineer() -> Result<(), TestError> {
        let test = TestBuilder::new().with_all_tables().build().await?;
        let admin = test.login_as("admin", constant::ROLE_ADMIN).await?;
        let work = test.work().insert_work("Unit 100", None).await?;

        let result = assign_engineer(
            State(test.app_state()),
            test.session.clone(),
            Path(work.id),
            Json(AssignWorkDto { user_id: admin.id }),
        )
        .await;

        let resp = result.err().unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        Ok(())
    }
}

mod equipment_tests {
    use super::*;

    /// Expect a duplicate equipment number to count as a failure without aborting the batch
    #[tokio::test]
    async fn batch_save_counts_failures() -> Result<(), TestError> {
        let test = TestBuilder::new().with_all_tables().build().await?;
        let engineer = test.login_as("engineer", constant::ROLE_ENGINEER).await?;
        let work = test.work().insert_work("Unit 100", None).await?;
        test.work().assign_user(work.id, engineer.id).await?;
        test.work().insert_equipment(work.id, "V-001", None).await?;
        let state = test.app_state();

        let result = save_work_equipment(
            State(state.clone()),
            test.session.clone(),
            Path(work.id),
            Json(BatchSaveEquipmentDto {
                entries: vec![entry("V-001"), entry("V-002"), entry("  ")],
                drawing_paths: [("V-002".to_string(), "drawings/V-002.pdf".to_string())]
                    .into_iter()
                    .collect(),
            }),
        )
        .await;

        let resp = result.unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::OK);
        let saved: BatchSaveResultDto = body_json(resp).await;
        assert_eq!(
            saved,
            BatchSaveResultDto {
                success: 1,
                failures: 2
            }
        );

        let result = get_work_equipment_by_number(
            State(state),
            test.session.clone(),
            Path((work.id, "V-002".to_string())),
        )
        .await;
        let equipment: EquipmentDto = body_json(result.unwrap().into_response()).await;
        assert_eq!(equipment.extracted_by, Some(engineer.id));
        assert_eq!(equipment.drawing_path.as_deref(), Some("drawings/V-002.pdf"));
        assert_eq!(equipment.components.len(), 1);
        assert_eq!(equipment.components[0].fields.fluid.as_deref(), Some("Air"));

        Ok(())
    }

    /// Expect the work's equipment list with components
    #[tokio::test]
    async fn lists_work_equipment() -> Result<(), TestError> {
        let test = TestBuilder::new().with_all_tables().build().await?;
        test.login_as("admin", constant::ROLE_ADMIN).await?;
        let work = test.work().insert_work("Unit 100", None).await?;
        let equipment = test.work().insert_equipment(work.id, "V-001", None).await?;
        test.work()
            .insert_component(equipment.id, "Shell", &[("fluid", "Water")])
            .await?;
        test.work()
            .insert_component(equipment.id, "Head", &[])
            .await?;

        let result = get_work_equipment(
            State(test.app_state()),
            test.session.clone(),
            Path(work.id),
        )
        .await;

        let list: Vec<EquipmentDto> = body_json(result.unwrap().into_response()).await;
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].components.len(), 2);

        Ok(())
    }

    /// Expect 404 for an equipment number missing from the work
    #[tokio::test]
    async fn equipment_by_number_not_found() -> Result<(), TestError> {
        let test = TestBuilder::new().with_all_tables().build().await?;
        test.login_as("admin", constant::ROLE_ADMIN).await?;
        let work = test.work().insert_work("Unit 100", None).await?;

        let result = get_work_equipment_by_number(
            State(test.app_state()),
            test.session.clone(),
            Path((work.id, "V-404".to_string())),
        )
        .await;

        let resp = result.err().unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        Ok(())
    }
}

mod reports_tests {
    use super::*;

    /// Expect report paths and status stored with both history entries
    #[tokio::test]
    async fn updates_reports_and_status() -> Result<(), TestError> {
        let test = TestBuilder::new().with_all_tables().build().await?;
        test.login_as("admin", constant::ROLE_ADMIN).await?;
        let work = test.work().insert_work("Unit 100", None).await?;
        let state = test.app_state();

        let result = update_work_reports(
            State(state.clone()),
            test.session.clone(),
            Path(work.id),
            Json(UpdateWorkReportsDto {
                excel_path: Some("out/master.xlsx".to_string()),
                ppt_path: None,
                status: Some(WorkStatus::Completed),
            }),
        )
        .await;

        let updated: WorkDto = body_json(result.unwrap().into_response()).await;
        assert_eq!(updated.status, WorkStatus::Completed);
        assert_eq!(updated.excel_path.as_deref(), Some("out/master.xlsx"));

        let result = get_work_history(State(state), test.session.clone(), Path(work.id)).await;
        let history: Vec<WorkHistoryDto> = body_json(result.unwrap().into_response()).await;
        let actions: Vec<&str> = history.iter().map(|h| h.action_type.as_str()).collect();
        assert_eq!(actions, vec!["reports_generated", "status_changed"]);

        Ok(())
    }
}

mod excel_tests {
    use super::*;

    /// Expect a not found masterfile for a work without output folders
    #[tokio::test]
    async fn reports_missing_masterfile() -> Result<(), TestError> {
        let test = TestBuilder::new().with_all_tables().build().await?;
        test.login_as("admin", constant::ROLE_ADMIN).await?;
        let work = test.work().insert_work("Unit 100", None).await?;

        let result = get_work_excel(
            State(test.app_state()),
            test.session.clone(),
            Path(work.id),
        )
        .await;

        let info: ExcelFileInfoDto = body_json(result.unwrap().into_response()).await;
        assert_eq!(info.file_type, ExcelFileType::NotFound);
        assert!(!info.has_work_done);

        Ok(())
    }

    /// Expect uploads blocked until a default masterfile exists, then allowed
    #[tokio::test]
    async fn can_upload_follows_default_masterfile() -> Result<(), TestError> {
        let test = TestBuilder::new().with_all_tables().build().await?;
        test.login_as("admin", constant::ROLE_ADMIN).await?;
        let work = test.work().insert_work("Unit 100", None).await?;
        let state = test.app_state();

        let query = || {
            Query(CanUploadQuery {
                equipment_no: "V-001".to_string(),
            })
        };

        let result = can_upload_work_equipment(
            State(state.clone()),
            test.session.clone(),
            Path(work.id),
            query(),
        )
        .await;
        let decision: CanUploadDto = body_json(result.unwrap().into_response()).await;
        assert!(!decision.can_upload);

        let default_dir = state
            .output_dir
            .join(work.id.to_string())
            .join("excel")
            .join("default");
        std::fs::create_dir_all(&default_dir)?;
        std::fs::write(default_dir.join("masterfile.xlsx"), "")?;

        let result =
            can_upload_work_equipment(State(state), test.session.clone(), Path(work.id), query())
                .await;
        let decision: CanUploadDto = body_json(result.unwrap().into_response()).await;
        assert!(decision.can_upload);
        assert_eq!(decision.reason, "OK");

        Ok(())
    }
}

/// Expect an assigned engineer to read the work
#[tokio::test]
async fn assigned_engineer_reads_work() -> Result<(), TestError> {
    let test = TestBuilder::new().with_all_tables().build().await?;
    let user = test.login_as("engineer", constant::ROLE_ENGINEER).await?;
    let work = test.work().insert_work("Unit 100", None).await?;
    test.work().assign_user(work.id, user.id).await?;

    let result = get_work(
        State(test.app_state()),
        test.session.clone(),
        Path(work.id),
    )
    .await;

    let found: WorkDto = body_json(result.unwrap().into_response()).await;
    assert_eq!(found.id, work.id);
    assert_eq!(found.work_name, "Unit 100");

    Ok(())
}
