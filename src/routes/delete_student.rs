use crate::{
    data::IdForm,
    error::RollbookResult,
    routes::{
        sse::SseEvent,
        view_students::{
            StudentAction, StudentListQuery, internal_get_students, student_list_container,
        },
    },
    state::RollbookState,
};
use axum::extract::{Query, State};
use maud::{Markup, html};

fn delete_list_query() -> Query<StudentListQuery> {
    Query(StudentListQuery {
        action: StudentAction::Delete,
        search: None,
    })
}

pub async fn get_delete_student(State(state): State<RollbookState>) -> RollbookResult<Markup> {
    let students = internal_get_students(State(state.clone()), delete_list_query()).await?;

    Ok(state.render(html! {
        div id="delete_student" class="mx-auto bg-gray-800 p-8 rounded shadow-md max-w-5xl w-full flex flex-col space-y-4" {
            (student_list_container(StudentAction::Delete, students))
        }
    }))
}

pub async fn delete_student(
    State(state): State<RollbookState>,
    Query(IdForm { id }): Query<IdForm>,
) -> RollbookResult<Markup> {
    if state.remove(id).await? {
        info!(%id, "deleted student");
        state.send_sse_event(SseEvent::StudentChanged);
    } else {
        debug!(%id, "asked to delete a student that wasn't there");
    }

    internal_get_students(State(state), delete_list_query()).await
}
