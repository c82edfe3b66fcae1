use crate::{maud_conveniences::title, state::AlunosState};
use axum::{extract::State, http::StatusCode};
use maud::{Markup, html};

pub async fn get_not_found_page(State(state): State<AlunosState>) -> (StatusCode, Markup) {
    (
        StatusCode::NOT_FOUND,
        state.render("Página não encontrada", html! {
            div class="bg-gray-800 p-8 rounded shadow-md max-w-md w-full text-center" {
                (title("404"))
                p class="mb-6" {"Página não encontrada"}
                a href="/index" class="bg-slate-600 hover:bg-slate-800 font-bold py-2 px-4 rounded" {
                    "Ver alunos"
                }
            }
        }),
    )
}
