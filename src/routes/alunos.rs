use crate::{
    data::{
        student::{Student, StudentField, StudentFields, StudentId, StudentPatch},
        validation::validate,
    },
    error::{AlunosResult, MissingStudentSnafu, ParseBodySnafu, ValidationSnafu},
    state::AlunosState,
};
use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
};
use serde::{Serialize, de::DeserializeOwned};
use snafu::{OptionExt, ResultExt};

#[derive(Serialize)]
pub struct DeletedMessage {
    data: &'static str,
}

///ids that aren't positive integers can't belong to anybody
fn parse_id(raw: &str) -> Option<StudentId> {
    raw.parse::<StudentId>().ok().filter(|id| *id > 0)
}

///bodies are decoded as JSON whatever `Content-Type` the client sent
fn parse_body<T: DeserializeOwned>(body: &Bytes) -> AlunosResult<T> {
    serde_json::from_slice(body).context(ParseBodySnafu)
}

async fn find_by_raw_id(state: &AlunosState, raw_id: &str) -> AlunosResult<Student> {
    let found = match parse_id(raw_id) {
        Some(id) => state.find_by_id(id).await?,
        None => None,
    };
    found.context(MissingStudentSnafu {
        lookup: format!("id {raw_id:?}"),
    })
}

pub async fn get_alunos(State(state): State<AlunosState>) -> AlunosResult<Json<Vec<Student>>> {
    state.find_all().await.map(Json)
}

pub async fn post_aluno(
    State(state): State<AlunosState>,
    body: Bytes,
) -> AlunosResult<Json<Student>> {
    let fields: StudentFields = parse_body(&body)?;
    validate(&fields).context(ValidationSnafu)?;

    let student = state.insert(fields).await?;
    info!(id = student.id, "Created student");
    Ok(Json(student))
}

pub async fn get_aluno(
    State(state): State<AlunosState>,
    Path(id): Path<String>,
) -> AlunosResult<Json<Student>> {
    find_by_raw_id(&state, &id).await.map(Json)
}

pub async fn get_aluno_by_cpf(
    State(state): State<AlunosState>,
    Path(cpf): Path<String>,
) -> AlunosResult<Json<Student>> {
    state
        .find_by_field(StudentField::Cpf, &cpf)
        .await?
        .context(MissingStudentSnafu {
            lookup: format!("cpf {cpf:?}"),
        })
        .map(Json)
}

/// Validation runs against the stored record with the patch applied, so a patch only
/// needs to carry the fields that change.
pub async fn patch_aluno(
    State(state): State<AlunosState>,
    Path(id): Path<String>,
    body: Bytes,
) -> AlunosResult<Json<Student>> {
    let patch: StudentPatch = parse_body(&body)?;
    let existing = find_by_raw_id(&state, &id).await?;

    validate(&existing.fields.clone().merged(&patch)).context(ValidationSnafu)?;

    let updated = state
        .update_partial(existing.id, patch)
        .await?
        .context(MissingStudentSnafu {
            lookup: format!("id {id:?}"),
        })?;
    info!(id = updated.id, "Updated student");
    Ok(Json(updated))
}

pub async fn delete_aluno(
    State(state): State<AlunosState>,
    Path(id): Path<String>,
) -> AlunosResult<Json<DeletedMessage>> {
    if let Some(id) = parse_id(&id) {
        state.delete_by_id(id).await?;
        info!(id, "Deleted student");
    }

    Ok(Json(DeletedMessage {
        data: "Aluno deletado com sucesso",
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AlunosError;

    #[test]
    fn only_positive_integers_are_ids() {
        assert_eq!(parse_id("12"), Some(12));
        assert_eq!(parse_id("0"), None);
        assert_eq!(parse_id("-3"), None);
        assert_eq!(parse_id("abc"), None);
        assert_eq!(parse_id("1.5"), None);
    }

    #[test]
    fn bodies_decode_as_json() {
        let fields: StudentFields = parse_body(&Bytes::from_static(
            br#"{"nome": "Ana", "cpf": "123.456.789-10", "rg": "12.345.678-9"}"#,
        ))
        .unwrap();
        assert_eq!(fields.nome, "Ana");

        assert!(matches!(
            parse_body::<StudentFields>(&Bytes::from_static(b"nome=Ana")),
            Err(AlunosError::ParseBody { .. })
        ));
        assert!(matches!(
            parse_body::<StudentPatch>(&Bytes::new()),
            Err(AlunosError::ParseBody { .. })
        ));
    }
}
