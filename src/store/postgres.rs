use crate::{
    config::DbConfig,
    data::student::{Student, StudentField, StudentFields, StudentId, StudentPatch},
    error::{
        AlunosError, AlunosResult, GetDatabaseConnectionSnafu, MakeQuerySnafu, MigrateSnafu,
        OpenDatabaseSnafu,
    },
    store::StudentStore,
};
use async_trait::async_trait;
use snafu::ResultExt;
use sqlx::{Pool, Postgres, pool::PoolConnection, postgres::PgPoolOptions};

const STUDENT_COLUMNS: &str = "id, nome, cpf, rg, created_at, updated_at";

/// Postgres reports unique constraint violations with this SQLSTATE.
const PG_UNIQUE_VIOLATION: &str = "23505";

#[derive(Clone, Debug)]
pub struct PostgresStudentStore {
    pool: Pool<Postgres>,
}

impl PostgresStudentStore {
    pub async fn connect(config: &DbConfig) -> AlunosResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections())
            .connect(&config.get_db_path())
            .await
            .context(OpenDatabaseSnafu)?;

        sqlx::migrate!().run(&pool).await.context(MigrateSnafu)?;

        Ok(Self { pool })
    }

    async fn get_connection(&self) -> AlunosResult<PoolConnection<Postgres>> {
        self.pool
            .acquire()
            .await
            .context(GetDatabaseConnectionSnafu)
    }
}

///which document a unique index in the migrations guards
fn field_guarded_by(constraint: Option<&str>) -> Option<StudentField> {
    match constraint? {
        "alunos_cpf_live_key" => Some(StudentField::Cpf),
        "alunos_rg_live_key" => Some(StudentField::Rg),
        _ => None,
    }
}

///turns document unique index violations into [`AlunosError::DuplicateDocument`], everything else is a plain query error
fn classify_write_error(source: sqlx::Error) -> AlunosError {
    let duplicated = match &source {
        sqlx::Error::Database(db) if db.code().as_deref() == Some(PG_UNIQUE_VIOLATION) => {
            field_guarded_by(db.constraint())
        }
        _ => None,
    };

    match duplicated {
        Some(field) => AlunosError::DuplicateDocument {
            field: field.column(),
        },
        None => AlunosError::MakeQuery { source },
    }
}

#[async_trait]
impl StudentStore for PostgresStudentStore {
    async fn find_all(&self) -> AlunosResult<Vec<Student>> {
        sqlx::query_as::<_, Student>(&format!(
            "SELECT {STUDENT_COLUMNS} FROM public.alunos WHERE deleted_at IS NULL ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await
        .context(MakeQuerySnafu)
    }

    async fn find_by_id(&self, id: StudentId) -> AlunosResult<Option<Student>> {
        let mut conn = self.get_connection().await?;

        sqlx::query_as::<_, Student>(&format!(
            "SELECT {STUDENT_COLUMNS} FROM public.alunos WHERE id = $1 AND deleted_at IS NULL"
        ))
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
        .context(MakeQuerySnafu)
    }

    async fn find_by_field(
        &self,
        field: StudentField,
        value: &str,
    ) -> AlunosResult<Option<Student>> {
        let mut conn = self.get_connection().await?;

        //column names come from `StudentField`, never from the request
        sqlx::query_as::<_, Student>(&format!(
            "SELECT {STUDENT_COLUMNS} FROM public.alunos WHERE {} = $1 AND deleted_at IS NULL ORDER BY id LIMIT 1",
            field.column()
        ))
        .bind(value)
        .fetch_optional(&mut *conn)
        .await
        .context(MakeQuerySnafu)
    }

    async fn insert(&self, fields: StudentFields) -> AlunosResult<Student> {
        let StudentFields { nome, cpf, rg } = fields;
        let mut conn = self.get_connection().await?;

        sqlx::query_as::<_, Student>(&format!(
            "INSERT INTO public.alunos (nome, cpf, rg) VALUES ($1, $2, $3) RETURNING {STUDENT_COLUMNS}"
        ))
        .bind(nome)
        .bind(cpf)
        .bind(rg)
        .fetch_one(&mut *conn)
        .await
        .map_err(classify_write_error)
    }

    async fn update_partial(
        &self,
        id: StudentId,
        patch: StudentPatch,
    ) -> AlunosResult<Option<Student>> {
        let mut conn = self.get_connection().await?;

        sqlx::query_as::<_, Student>(&format!(
            "UPDATE public.alunos SET nome = COALESCE($2, nome), cpf = COALESCE($3, cpf), rg = COALESCE($4, rg), updated_at = now() \
             WHERE id = $1 AND deleted_at IS NULL RETURNING {STUDENT_COLUMNS}"
        ))
        .bind(id)
        .bind(patch.nome())
        .bind(patch.cpf())
        .bind(patch.rg())
        .fetch_optional(&mut *conn)
        .await
        .map_err(classify_write_error)
    }

    async fn delete_by_id(&self, id: StudentId) -> AlunosResult<()> {
        let mut conn = self.get_connection().await?;

        sqlx::query("UPDATE public.alunos SET deleted_at = now() WHERE id = $1 AND deleted_at IS NULL")
            .bind(id)
            .execute(&mut *conn)
            .await
            .context(MakeQuerySnafu)?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_document_indexes_map_to_fields() {
        assert_eq!(field_guarded_by(Some("alunos_cpf_live_key")), Some(StudentField::Cpf));
        assert_eq!(field_guarded_by(Some("alunos_rg_live_key")), Some(StudentField::Rg));
        assert_eq!(field_guarded_by(Some("alunos_pkey")), None);
        assert_eq!(field_guarded_by(None), None);
    }

    #[test]
    fn other_failures_stay_query_errors() {
        assert!(matches!(
            classify_write_error(sqlx::Error::RowNotFound),
            AlunosError::MakeQuery { .. }
        ));
    }
}
