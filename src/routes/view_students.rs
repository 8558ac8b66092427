use crate::{
    data::{IdForm, student::Student},
    error::{RollbookError, RollbookResult},
    maud_conveniences::{escape, table, title},
    state::RollbookState,
};
use axum::extract::{Query, State};
use maud::{Markup, html};
use serde::Deserialize;

/// Which view a student list is rendered for, which decides the per-row control.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StudentAction {
    #[default]
    View,
    Update,
    Delete,
}

impl StudentAction {
    const fn as_str(self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct StudentListQuery {
    #[serde(default)]
    pub action: StudentAction,
    pub search: Option<String>,
}

pub async fn get_view_students(State(state): State<RollbookState>) -> RollbookResult<Markup> {
    let students = internal_get_students(
        State(state.clone()),
        Query(StudentListQuery::default()),
    )
    .await?;

    Ok(state.render(html! {
        div id="view_students" class="mx-auto bg-gray-800 p-8 rounded shadow-md max-w-5xl w-full flex flex-col space-y-4" {
            div class="container flex flex-row justify-center space-x-4" {
                (student_list_container(StudentAction::View, students))
                div id="in_focus" {
                    p class="italic text-gray-400" {"Pick a student to see their details."}
                }
            }
        }
    }))
}

/// The `#all_students` wrapper, which refetches itself whenever a student changes.
pub fn student_list_container(action: StudentAction, students: Markup) -> Markup {
    html! {
        div id="all_students" hx-get="/internal/students" hx-vals={"{\"action\": \"" (action.as_str()) "\"}"} hx-include="[name='search']" hx-trigger="sse:student_changed" {
            (students)
        }
    }
}

pub async fn internal_get_students(
    State(state): State<RollbookState>,
    Query(StudentListQuery { action, search }): Query<StudentListQuery>,
) -> RollbookResult<Markup> {
    let needle = search.as_deref().map(str::to_lowercase);
    let students: Vec<_> = state
        .get_all()
        .await?
        .into_iter()
        .filter(|student| {
            needle
                .as_deref()
                .is_none_or(|needle| student.name.to_lowercase().contains(needle))
        })
        .collect();

    Ok(render_student_list(action, search.as_deref(), &students))
}

pub fn render_student_list(
    action: StudentAction,
    search: Option<&str>,
    students: &[Student],
) -> Markup {
    let action_title = match action {
        StudentAction::View => "Details",
        StudentAction::Update => "Edit",
        StudentAction::Delete => "Delete",
    };

    let rows = students
        .iter()
        .map(|student| {
            [
                escape(&student.name),
                escape(&student.email),
                escape(&student.phone_number),
                escape(student.date_of_birth_display()),
                row_control(action, student),
            ]
        })
        .collect();

    table(
        html! {
            (title("Students"))
            div class="flex rounded p-4 m-4" {
                input value=[search] type="search" name="search" placeholder="Begin Typing To Search Students..." hx-get="/internal/students" hx-vals={"{\"action\": \"" (action.as_str()) "\"}"} hx-trigger="input changed delay:500ms, keyup[key=='Enter']" hx-target="#all_students" class="shadow appearance-none border rounded w-full py-2 px-3 leading-tight focus:outline-none focus:shadow-outline bg-gray-700 border-gray-600";
            }
            @if students.is_empty() {
                p class="italic text-gray-400" {"No students yet."}
            }
        },
        ["Name", "Email", "Phone", "Date of Birth", action_title],
        rows,
    )
}

fn row_control(action: StudentAction, student: &Student) -> Markup {
    let id = student.id;
    match action {
        StudentAction::View => html! {
            a class="hover:text-blue-300 underline" hx-get="/internal/student" hx-target="#in_focus" hx-vals={"{\"id\": \"" (id) "\"}"} {
                "Details"
            }
        },
        StudentAction::Update => html! {
            a class="hover:text-blue-300 underline" hx-get="/internal/update_form" hx-target="#in_focus" hx-vals={"{\"id\": \"" (id) "\"}"} {
                "Edit"
            }
        },
        StudentAction::Delete => html! {
            button class="bg-red-600 hover:bg-red-800 font-bold py-1 px-3 rounded" hx-delete="/delete" hx-vals={"{\"id\": \"" (id) "\"}"} hx-target="#all_students" hx-confirm={"Delete " (student.name) "?"} {
                "Delete"
            }
        },
    }
}

pub async fn internal_get_student_in_detail(
    State(state): State<RollbookState>,
    Query(IdForm { id }): Query<IdForm>,
) -> RollbookResult<Markup> {
    let Some(student) = state.get_by_id(id).await? else {
        return Err(RollbookError::MissingStudent { id });
    };

    Ok(render_student_card(&student))
}

pub fn render_student_card(student: &Student) -> Markup {
    let detail = |label: &'static str, value: String| {
        html! {
            p class="text-gray-200 font-semibold" {
                (label) ": "
                @if value.is_empty() {
                    span class="font-medium italic" {"-"}
                } @else {
                    span class="font-medium" {(value)}
                }
            }
        }
    };

    html! {
        div class="rounded-lg shadow-md overflow-hidden bg-gray-700 max-w-md mx-auto mb-4" {
            div class="p-4" {
                h1 class="text-2xl font-semibold mb-2" {(student)}
                @if !student.email.is_empty() {
                    p {
                        a href={"mailto:" (student.email)} class="text-blue-500" {(student.email)}
                    }
                }
                (detail("Address", student.address.clone()))
                (detail("Phone", student.phone_number.clone()))
                (detail("Date of Birth", student.date_of_birth_display()))
                br;
                a href={"/update?id=" (student.id)} class="text-blue-300 underline" {"Edit student"}
            }
        }
    }
}
