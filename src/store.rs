use crate::{
    data::student::{Student, StudentField, StudentFields, StudentId, StudentPatch},
    error::AlunosResult,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod memory;
pub mod postgres;

/// Persistent collection of students, keyed by id.
///
/// Deleted students are invisible to every lookup. Implementations enforce that no two live
/// students share a `cpf` or an `rg`, reporting
/// [`DuplicateDocument`](crate::error::AlunosError::DuplicateDocument) on writes that would.
#[async_trait]
pub trait StudentStore: Send + Sync + Debug {
    /// every live student, ordered by id
    async fn find_all(&self) -> AlunosResult<Vec<Student>>;

    async fn find_by_id(&self, id: StudentId) -> AlunosResult<Option<Student>>;

    /// first live student (by id) whose `field` equals `value`
    async fn find_by_field(
        &self,
        field: StudentField,
        value: &str,
    ) -> AlunosResult<Option<Student>>;

    async fn insert(&self, fields: StudentFields) -> AlunosResult<Student>;

    /// Overlays the non-empty parts of `patch` onto the stored student.
    ///
    /// `Ok(None)` means there was no live student with that id, and nothing was written.
    async fn update_partial(
        &self,
        id: StudentId,
        patch: StudentPatch,
    ) -> AlunosResult<Option<Student>>;

    /// Deleting an id that doesn't exist is not an error.
    async fn delete_by_id(&self, id: StudentId) -> AlunosResult<()>;

    async fn close(&self);
}
