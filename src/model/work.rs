use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Progress of a work item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub enum WorkStatus {
    #[default]
    Pending,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
}

impl WorkStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Pending" => Some(Self::Pending),
            "In Progress" => Some(Self::InProgress),
            "Completed" => Some(Self::Completed),
            _ => None,
        }
    }
}

impl fmt::Display for WorkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WorkDto {
    pub id: i32,
    pub work_name: String,
    pub description: Option<String>,
    pub status: WorkStatus,
    pub excel_path: Option<String>,
    pub ppt_path: Option<String>,
    pub created_by: Option<i32>,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateWorkDto {
    pub work_name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AssignWorkDto {
    pub user_id: i32,
}

/// Records where generated reports were written and optionally moves the work along
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateWorkReportsDto {
    pub excel_path: Option<String>,
    pub ppt_path: Option<String>,
    pub status: Option<WorkStatus>,
}

/// The eight component fields tracked for completeness and corrections
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TrackedFieldsDto {
    pub fluid: Option<String>,
    pub material_spec: Option<String>,
    pub material_grade: Option<String>,
    pub insulation: Option<String>,
    pub design_temp: Option<String>,
    pub design_pressure: Option<String>,
    pub operating_temp: Option<String>,
    pub operating_pressure: Option<String>,
}

impl TrackedFieldsDto {
    pub const FIELD_COUNT: usize = 8;

    pub fn values(&self) -> [Option<&str>; Self::FIELD_COUNT] {
        [
            self.fluid.as_deref(),
            self.material_spec.as_deref(),
            self.material_grade.as_deref(),
            self.insulation.as_deref(),
            self.design_temp.as_deref(),
            self.design_pressure.as_deref(),
            self.operating_temp.as_deref(),
            self.operating_pressure.as_deref(),
        ]
    }

    /// Number of fields holding a non-blank value
    pub fn filled_count(&self) -> usize {
        self.values().into_iter().filter(|v| !is_blank(*v)).count()
    }

    /// Fills this record's blank fields from `other`, keeping existing values
    pub fn fill_blanks_from(&self, other: &TrackedFieldsDto) -> TrackedFieldsDto {
        fn pick(current: &Option<String>, incoming: &Option<String>) -> Option<String> {
            if is_blank(current.as_deref()) && !is_blank(incoming.as_deref()) {
                incoming.clone()
            } else {
                current.clone()
            }
        }

        TrackedFieldsDto {
            fluid: pick(&self.fluid, &other.fluid),
            material_spec: pick(&self.material_spec, &other.material_spec),
            material_grade: pick(&self.material_grade, &other.material_grade),
            insulation: pick(&self.insulation, &other.insulation),
            design_temp: pick(&self.design_temp, &other.design_temp),
            design_pressure: pick(&self.design_pressure, &other.design_pressure),
            operating_temp: pick(&self.operating_temp, &other.operating_temp),
            operating_pressure: pick(&self.operating_pressure, &other.operating_pressure),
        }
    }
}

/// A missing or whitespace-only value
pub fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|v| v.trim().is_empty())
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ComponentInputDto {
    pub part_name: String,
    pub phase: Option<String>,
    #[serde(default)]
    pub fields: TrackedFieldsDto,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ComponentDto {
    pub id: i32,
    pub equipment_id: i32,
    pub part_name: String,
    pub phase: Option<String>,
    pub fields: TrackedFieldsDto,
}

/// One extracted equipment record
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EquipmentEntryDto {
    pub equipment_no: String,
    pub pmt_no: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub components: Vec<ComponentInputDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BatchSaveEquipmentDto {
    pub entries: Vec<EquipmentEntryDto>,
    /// Source drawing per equipment number
    #[serde(default)]
    pub drawing_paths: std::collections::BTreeMap<String, String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BatchSaveResultDto {
    pub success: u32,
    pub failures: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EquipmentDto {
    pub id: i32,
    pub work_id: i32,
    pub equipment_no: String,
    pub pmt_no: Option<String>,
    pub description: Option<String>,
    pub drawing_path: Option<String>,
    pub extracted_by: Option<i32>,
    pub extracted_date: Option<NaiveDateTime>,
    pub components: Vec<ComponentDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ComponentCorrectionDto {
    pub component_id: i32,
    pub values: TrackedFieldsDto,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CorrectionRequestDto {
    pub corrections: Vec<ComponentCorrectionDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CorrectionResultDto {
    pub correction_log_id: i32,
    pub fields_corrected: i32,
    pub total_fields: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WorkHistoryDto {
    pub id: i32,
    pub work_id: i32,
    pub user_id: i32,
    pub action_type: String,
    pub description: Option<String>,
    pub timestamp: NaiveDateTime,
}

/// State of a work's Excel masterfile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ExcelFileType {
    /// Only the initial masterfile exists, no work done yet
    Default,
    /// An updated masterfile exists, work is in progress
    Updated,
    NotFound,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ExcelFileInfoDto {
    pub file_type: ExcelFileType,
    pub file_path: Option<String>,
    pub has_work_done: bool,
    pub equipment_with_work: Vec<String>,
    pub last_modified: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Serialize, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct CanUploadQuery {
    pub equipment_no: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CanUploadDto {
    pub can_upload: bool,
    pub reason: String,
}
