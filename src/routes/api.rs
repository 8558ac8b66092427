//! JSON REST resource over the student collection.
//!
//! Every response, good or bad, comes back in the same envelope:
//! `{"success": .., "message": .., "data": ..}`, with `error` instead of `data`
//! on failure (see [`ApiError`]).

use crate::{
    data::student::{NewStudent, Student, StudentPatch, parse_date_of_birth},
    error::{ApiError, NullFieldSnafu, ParseUuidSnafu, RollbookError, RollbookResult},
    routes::sse::SseEvent,
    state::RollbookState,
};
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::{Deserialize, Deserializer, Serialize};
use snafu::ResultExt;
use uuid::Uuid;

type ApiResult<T> = Result<Json<ApiEnvelope<T>>, ApiError>;

#[derive(Debug, Serialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiEnvelope<T> {
    fn ok(message: &'static str, data: T) -> Self {
        Self {
            success: true,
            message,
            data: Some(data),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateStudentRequest {
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub date_of_birth: String,
}

impl TryFrom<CreateStudentRequest> for NewStudent {
    type Error = RollbookError;

    fn try_from(value: CreateStudentRequest) -> Result<Self, Self::Error> {
        let CreateStudentRequest {
            name,
            email,
            address,
            phone_number,
            date_of_birth,
        } = value;

        Ok(Self {
            name,
            email,
            address,
            phone_number,
            date_of_birth: parse_date_of_birth(&date_of_birth)?,
        })
    }
}

/// Keys that are absent are left untouched. The outer `Option` is whether the key was sent at all,
/// the inner one whether it was `null`.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateStudentRequest {
    #[serde(default, deserialize_with = "present")]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub address: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub phone_number: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub date_of_birth: Option<Option<String>>,
}

///only called when the key is there, so `null` ends up as `Some(None)`
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

fn non_null_text(
    field: &'static str,
    value: Option<Option<String>>,
) -> RollbookResult<Option<String>> {
    match value {
        Some(None) => NullFieldSnafu { field }.fail(),
        Some(Some(text)) => Ok(Some(text)),
        None => Ok(None),
    }
}

impl TryFrom<UpdateStudentRequest> for StudentPatch {
    type Error = RollbookError;

    fn try_from(value: UpdateStudentRequest) -> Result<Self, Self::Error> {
        let UpdateStudentRequest {
            name,
            email,
            address,
            phone_number,
            date_of_birth,
        } = value;

        //`null` and `""` both clear the date
        let date_of_birth = match date_of_birth {
            Some(Some(raw)) => Some(parse_date_of_birth(&raw)?),
            Some(None) => Some(None),
            None => None,
        };

        Ok(Self {
            name: non_null_text("name", name)?,
            email: non_null_text("email", email)?,
            address: non_null_text("address", address)?,
            phone_number: non_null_text("phone_number", phone_number)?,
            date_of_birth,
        })
    }
}

fn parse_id(raw: &str) -> RollbookResult<Uuid> {
    Uuid::try_parse(raw).context(ParseUuidSnafu { original: raw })
}

pub async fn list_students(State(state): State<RollbookState>) -> ApiResult<Vec<Student>> {
    let students = state.get_all().await?;
    Ok(Json(ApiEnvelope::ok("Students fetched successfully", students)))
}

pub async fn create_student(
    State(state): State<RollbookState>,
    body: Result<Json<CreateStudentRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiEnvelope<Student>>), ApiError> {
    let Json(request) = body?;
    let student = state.insert(NewStudent::try_from(request)?).await?;
    info!(id = %student.id, "added student via api");
    state.send_sse_event(SseEvent::StudentChanged);

    Ok((
        StatusCode::CREATED,
        Json(ApiEnvelope::ok("Student Added Successfully", student)),
    ))
}

pub async fn get_student(
    State(state): State<RollbookState>,
    Path(id): Path<String>,
) -> ApiResult<Student> {
    let id = parse_id(&id)?;
    let Some(student) = state.get_by_id(id).await? else {
        return Err(RollbookError::MissingStudent { id }.into());
    };

    Ok(Json(ApiEnvelope::ok("Student fetched successfully", student)))
}

pub async fn update_student(
    State(state): State<RollbookState>,
    Path(id): Path<String>,
    body: Result<Json<UpdateStudentRequest>, JsonRejection>,
) -> ApiResult<Student> {
    let id = parse_id(&id)?;
    let Json(request) = body?;
    let patch = StudentPatch::try_from(request)?;

    let Some(student) = state.update(id, patch).await? else {
        return Err(RollbookError::MissingStudent { id }.into());
    };
    info!(%id, "updated student via api");
    state.send_sse_event(SseEvent::StudentChanged);

    Ok(Json(ApiEnvelope::ok("Student updated successfully", student)))
}

/// Deleting something that isn't there still counts as a success.
pub async fn delete_student(
    State(state): State<RollbookState>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    let id = parse_id(&id)?;
    if state.remove(id).await? {
        info!(%id, "deleted student via api");
        state.send_sse_event(SseEvent::StudentChanged);
    }

    Ok(Json(ApiEnvelope {
        success: true,
        message: "Student deleted successfully",
        data: None,
    }))
}
