use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt::{Display, Formatter};
use time::OffsetDateTime;

pub type StudentId = i64;

/// The caller-supplied part of a student record, before it has been given an id.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct StudentFields {
    pub nome: String,
    pub cpf: String,
    pub rg: String,
}

/// A persisted student. Only the store hands these out, so `id` is always a real one.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq)]
pub struct Student {
    pub id: StudentId,
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub fields: StudentFields,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// Body of `PATCH /alunos/{id}`. Missing or empty fields keep the stored value.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct StudentPatch {
    pub nome: Option<String>,
    pub cpf: Option<String>,
    pub rg: Option<String>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum StudentField {
    Nome,
    Cpf,
    Rg,
}

impl StudentField {
    pub const fn column(self) -> &'static str {
        match self {
            Self::Nome => "nome",
            Self::Cpf => "cpf",
            Self::Rg => "rg",
        }
    }

    pub fn value_of(self, fields: &StudentFields) -> &str {
        match self {
            Self::Nome => &fields.nome,
            Self::Cpf => &fields.cpf,
            Self::Rg => &fields.rg,
        }
    }
}

impl Display for StudentField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.column())
    }
}

impl StudentPatch {
    fn non_empty(value: Option<&String>) -> Option<&str> {
        value.map(String::as_str).filter(|value| !value.is_empty())
    }

    pub fn nome(&self) -> Option<&str> {
        Self::non_empty(self.nome.as_ref())
    }

    pub fn cpf(&self) -> Option<&str> {
        Self::non_empty(self.cpf.as_ref())
    }

    pub fn rg(&self) -> Option<&str> {
        Self::non_empty(self.rg.as_ref())
    }

    pub fn is_empty(&self) -> bool {
        self.nome().is_none() && self.cpf().is_none() && self.rg().is_none()
    }
}

impl StudentFields {
    ///overlays whatever the patch actually sets on top of these fields
    #[must_use]
    pub fn merged(mut self, patch: &StudentPatch) -> Self {
        if let Some(nome) = patch.nome() {
            nome.clone_into(&mut self.nome);
        }
        if let Some(cpf) = patch.cpf() {
            cpf.clone_into(&mut self.cpf);
        }
        if let Some(rg) = patch.rg() {
            rg.clone_into(&mut self.rg);
        }
        self
    }
}
