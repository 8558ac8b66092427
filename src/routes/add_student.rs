use crate::{
    error::RollbookResult,
    forms::StudentForm,
    maud_conveniences::{subtitle, success_alert, title},
    routes::{sse::SseEvent, view_students::render_student_card},
    state::RollbookState,
};
use axum::{Form, extract::State};
use maud::{Markup, html};

fn empty_add_form() -> Markup {
    StudentForm::default().render("/add", None, "Add Student")
}

pub async fn get_add_student(State(state): State<RollbookState>) -> Markup {
    state.render(html! {
        div id="add_student" class="mx-auto bg-gray-800 p-8 rounded shadow-md max-w-xl w-full" {
            (title("Add New Student"))
            div id="in_focus" {
                (empty_add_form())
            }
        }
    })
}

pub async fn post_add_student(
    State(state): State<RollbookState>,
    Form(form): Form<StudentForm>,
) -> RollbookResult<Markup> {
    let student = state.insert(form.into_new_student()?).await?;
    info!(id = %student.id, "added student");
    state.send_sse_event(SseEvent::StudentChanged);

    Ok(html! {
        (success_alert("Student Added Successfully"))
        (render_student_card(&student))
        (subtitle("Add another"))
        (empty_add_form())
    })
}
