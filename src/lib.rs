#![warn(clippy::pedantic, clippy::all, clippy::nursery)]
#![allow(clippy::missing_errors_doc, clippy::module_name_repetitions)]

use crate::{
    routes::{
        alunos::{delete_aluno, get_aluno, get_aluno_by_cpf, get_alunos, patch_aluno, post_aluno},
        greeting::get_greeting,
        index::get_index_page,
        not_found::get_not_found_page,
    },
    state::AlunosState,
};
use axum::{Router, routing::get};
use tower_http::{limit::RequestBodyLimitLayer, services::ServeDir, trace::TraceLayer};

#[macro_use]
extern crate tracing;

pub mod config;
pub mod data;
pub mod error;
mod maud_conveniences;
pub mod routes;
pub mod state;
pub mod store;

/// Student records are tiny, anything past this is not one of ours.
const MAX_BODY_BYTES: usize = 64 * 1024;

/// Builds the full application. `/index` and the `/alunos` routes are static, so they win
/// over the `/{nome}` greeting.
pub fn build_router(state: AlunosState) -> Router {
    let assets = ServeDir::new(state.config().assets_dir());

    Router::new()
        .route("/alunos", get(get_alunos).post(post_aluno))
        .route(
            "/alunos/{id}",
            get(get_aluno).patch(patch_aluno).delete(delete_aluno),
        )
        .route("/alunos/cpf/{cpf}", get(get_aluno_by_cpf))
        .route("/index", get(get_index_page))
        .route("/{nome}", get(get_greeting))
        .nest_service("/assets", assets)
        .fallback(get_not_found_page)
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
