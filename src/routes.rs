pub mod alunos;
pub mod greeting;
pub mod index;
pub mod not_found;
