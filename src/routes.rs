use crate::{
    routes::{
        add_student::{get_add_student, post_add_student},
        delete_student::{delete_student, get_delete_student},
        index::{get_index_route, not_found},
        sse::sse_feed,
        update_student::{get_update_student, internal_get_update_form, post_update_student},
        view_students::{get_view_students, internal_get_student_in_detail, internal_get_students},
    },
    state::RollbookState,
};
use axum::{Router, routing::get};
use tower_http::{
    compression::CompressionLayer, limit::RequestBodyLimitLayer, trace::TraceLayer,
};

pub mod add_student;
pub mod api;
pub mod delete_student;
pub mod index;
pub mod sse;
pub mod update_student;
pub mod view_students;

const BODY_LIMIT: usize = 64 * 1024;

#[derive(Debug, Clone, Copy)]
pub struct View {
    pub path: &'static str,
    pub label: &'static str,
    /// id of the element wrapping the view, unique per view
    pub container_id: &'static str,
}

/// There's deliberately no wildcard and no empty-path redirect here: anything else hits [`not_found`].
pub const VIEWS: [View; 4] = [
    View {
        path: "/add",
        label: "Add Student",
        container_id: "add_student",
    },
    View {
        path: "/view",
        label: "View Students",
        container_id: "view_students",
    },
    View {
        path: "/update",
        label: "Update Student",
        container_id: "update_student",
    },
    View {
        path: "/delete",
        label: "Delete Student",
        container_id: "delete_student",
    },
];

pub fn router(state: RollbookState) -> Router {
    Router::new()
        .route("/", get(get_index_route))
        .route("/add", get(get_add_student).post(post_add_student))
        .route("/view", get(get_view_students))
        .route("/update", get(get_update_student).post(post_update_student))
        .route("/delete", get(get_delete_student).delete(delete_student))
        .route("/internal/students", get(internal_get_students))
        .route("/internal/student", get(internal_get_student_in_detail))
        .route("/internal/update_form", get(internal_get_update_form))
        .route(
            "/api/students",
            get(api::list_students).post(api::create_student),
        )
        .route(
            "/api/students/{id}",
            get(api::get_student)
                .put(api::update_student)
                .delete(api::delete_student),
        )
        .route("/sse_feed", get(sse_feed))
        .fallback(not_found)
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
