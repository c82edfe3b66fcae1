use crate::{
    error::AlunosResult,
    maud_conveniences::{render_table, title},
    state::AlunosState,
};
use axum::extract::State;
use maud::{Markup, html};

pub async fn get_index_page(State(state): State<AlunosState>) -> AlunosResult<Markup> {
    let alunos = state.find_all().await?;

    Ok(state.render("Alunos", html! {
        div class="bg-gray-800 p-8 rounded shadow-md max-w-4xl w-full" {
            (title("Alunos"))

            @if alunos.is_empty() {
                p class="italic text-gray-400" {"Nenhum aluno cadastrado"}
            } @else {
                (render_table(
                    ["ID", "Nome", "CPF", "RG"],
                    alunos.into_iter()
                        .map(|aluno| {
                            [
                                html! {(aluno.id)},
                                html! {(aluno.fields.nome)},
                                html! {(aluno.fields.cpf)},
                                html! {(aluno.fields.rg)},
                            ]
                        })
                        .collect()
                ))
            }
        }
    }))
}
