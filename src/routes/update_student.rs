use crate::{
    data::IdForm,
    error::{RollbookError, RollbookResult},
    forms::{StudentForm, UpdateStudentForm},
    maud_conveniences::{success_alert, title},
    routes::{
        sse::SseEvent,
        view_students::{
            StudentAction, StudentListQuery, internal_get_students, render_student_card,
            student_list_container,
        },
    },
    state::RollbookState,
};
use axum::{
    Form,
    extract::{Query, State},
};
use maud::{Markup, html};
use serde::Deserialize;
use uuid::Uuid;

#[derive(Deserialize)]
pub struct MaybeIdQuery {
    pub id: Option<Uuid>,
}

pub async fn get_update_student(
    State(state): State<RollbookState>,
    Query(MaybeIdQuery { id }): Query<MaybeIdQuery>,
) -> RollbookResult<Markup> {
    let students = internal_get_students(
        State(state.clone()),
        Query(StudentListQuery {
            action: StudentAction::Update,
            search: None,
        }),
    )
    .await?;

    let in_focus = match id {
        Some(id) => internal_get_update_form(State(state.clone()), Query(IdForm { id })).await?,
        None => html! {
            p class="italic text-gray-400" {"Pick a student to edit."}
        },
    };

    Ok(state.render(html! {
        div id="update_student" class="mx-auto bg-gray-800 p-8 rounded shadow-md max-w-5xl w-full flex flex-col space-y-4" {
            div class="container flex flex-row justify-center space-x-4" {
                (student_list_container(StudentAction::Update, students))
                div id="in_focus" {
                    (in_focus)
                }
            }
        }
    }))
}

pub async fn internal_get_update_form(
    State(state): State<RollbookState>,
    Query(IdForm { id }): Query<IdForm>,
) -> RollbookResult<Markup> {
    let Some(student) = state.get_by_id(id).await? else {
        return Err(RollbookError::MissingStudent { id });
    };

    Ok(html! {
        (title(html! { "Update " (student) }))
        (StudentForm::from(&student).render("/update", Some(id), "Update Student"))
    })
}

pub async fn post_update_student(
    State(state): State<RollbookState>,
    Form(update): Form<UpdateStudentForm>,
) -> RollbookResult<Markup> {
    let (id, form) = update.split();
    let Some(student) = state.update(id, form.into_patch()?).await? else {
        return Err(RollbookError::MissingStudent { id });
    };
    info!(%id, "updated student");
    state.send_sse_event(SseEvent::StudentChanged);

    Ok(html! {
        (success_alert("Student Updated Successfully"))
        (render_student_card(&student))
        (StudentForm::from(&student).render("/update", Some(id), "Update Student"))
    })
}
