//! An in-memory [`StudentStore`], used by the tests and for running without a database.
//!
//! Deleted students are dropped outright rather than soft-deleted.

use crate::{
    data::student::{Student, StudentField, StudentFields, StudentId, StudentPatch},
    error::{AlunosResult, DuplicateDocumentSnafu},
    store::StudentStore,
};
use async_trait::async_trait;
use snafu::ensure;
use std::collections::BTreeMap;
use time::OffsetDateTime;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
pub struct MemoryStudentStore {
    table: RwLock<MemoryTable>,
}

#[derive(Debug, Default)]
struct MemoryTable {
    last_id: StudentId,
    rows: BTreeMap<StudentId, Student>,
}

impl MemoryStudentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MemoryTable {
    ///mirrors the unique indexes on `cpf` and `rg`, ignoring the row being rewritten
    fn ensure_documents_free(
        &self,
        fields: &StudentFields,
        rewriting: Option<StudentId>,
    ) -> AlunosResult<()> {
        for field in [StudentField::Cpf, StudentField::Rg] {
            let wanted = field.value_of(fields);
            let taken = self
                .rows
                .values()
                .filter(|row| Some(row.id) != rewriting)
                .any(|row| field.value_of(&row.fields) == wanted);
            ensure!(
                !taken,
                DuplicateDocumentSnafu {
                    field: field.column()
                }
            );
        }
        Ok(())
    }
}

#[async_trait]
impl StudentStore for MemoryStudentStore {
    async fn find_all(&self) -> AlunosResult<Vec<Student>> {
        Ok(self.table.read().await.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: StudentId) -> AlunosResult<Option<Student>> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn find_by_field(
        &self,
        field: StudentField,
        value: &str,
    ) -> AlunosResult<Option<Student>> {
        Ok(self
            .table
            .read()
            .await
            .rows
            .values()
            .find(|row| field.value_of(&row.fields) == value)
            .cloned())
    }

    async fn insert(&self, fields: StudentFields) -> AlunosResult<Student> {
        let mut table = self.table.write().await;
        table.ensure_documents_free(&fields, None)?;

        table.last_id += 1;
        let now = OffsetDateTime::now_utc();
        let student = Student {
            id: table.last_id,
            fields,
            created_at: now,
            updated_at: now,
        };
        table.rows.insert(student.id, student.clone());

        Ok(student)
    }

    async fn update_partial(
        &self,
        id: StudentId,
        patch: StudentPatch,
    ) -> AlunosResult<Option<Student>> {
        let mut table = self.table.write().await;
        let Some(existing) = table.rows.get(&id) else {
            return Ok(None);
        };

        let fields = existing.fields.clone().merged(&patch);
        table.ensure_documents_free(&fields, Some(id))?;

        let Some(row) = table.rows.get_mut(&id) else {
            return Ok(None);
        };
        row.fields = fields;
        row.updated_at = OffsetDateTime::now_utc();

        Ok(Some(row.clone()))
    }

    async fn delete_by_id(&self, id: StudentId) -> AlunosResult<()> {
        self.table.write().await.rows.remove(&id);
        Ok(())
    }

    async fn close(&self) {}
}
