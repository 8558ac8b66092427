use crate::{maud_conveniences::title, routes::VIEWS, state::RollbookState};
use axum::extract::State;
use maud::{Markup, html};

pub async fn get_index_route(State(state): State<RollbookState>) -> Markup {
    state.render(html! {
        div class="bg-gray-800 p-8 rounded shadow-md max-w-md w-full" {
            (title("Rollbook"))

            div class="flex flex-row flex-wrap gap-4 justify-center" {
                @for view in VIEWS {
                    a href=(view.path) class="bg-slate-600 hover:bg-slate-800 font-bold py-2 px-4 rounded" {
                        (view.label)
                    }
                }
            }
        }
    })
}

pub async fn not_found(State(state): State<RollbookState>) -> (axum::http::StatusCode, Markup) {
    (
        axum::http::StatusCode::NOT_FOUND,
        state.render(html! {
            div class="bg-gray-800 p-8 rounded shadow-md max-w-md w-full" {
                (title("Sorry, Nothing at this URL."))
                a href="/" class="text-blue-500 underline" {"Back to the start"}
            }
        }),
    )
}
