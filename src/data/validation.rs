use crate::data::student::{StudentField, StudentFields};
use regex::Regex;
use snafu::{Snafu, ensure};
use std::sync::LazyLock;

pub const CPF_LEN: usize = 14;
pub const RG_LEN: usize = 12;

//ASCII whitespace only, NBSP and the other unicode spaces are not allowed
static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z\t\n\f\r ]*$").expect("name pattern is valid"));
static DOCUMENT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9.\-]*$").expect("document pattern is valid"));

#[derive(Debug, Snafu, Clone, PartialEq, Eq)]
#[snafu(visibility(pub))]
pub enum ValidationError {
    #[snafu(display("{field}: zero value"))]
    ZeroValue { field: StudentField },
    #[snafu(display("{field}: invalid length (expected {expected} characters, found {found})"))]
    InvalidLength {
        field: StudentField,
        expected: usize,
        found: usize,
    },
    #[snafu(display("{field}: regular expression mismatch"))]
    RegexpMismatch { field: StudentField },
}

/// Checks a candidate record against the field rules, reporting only the first rule it breaks.
///
/// Rules run in order: `nome` must be non-blank letters and whitespace, `cpf` must be
/// [`CPF_LEN`] characters of digits, `.` and `-`, and `rg` the same with [`RG_LEN`].
pub fn validate(fields: &StudentFields) -> Result<(), ValidationError> {
    ensure!(
        !fields.nome.trim().is_empty(),
        ZeroValueSnafu {
            field: StudentField::Nome
        }
    );
    ensure!(
        NAME_PATTERN.is_match(&fields.nome),
        RegexpMismatchSnafu {
            field: StudentField::Nome
        }
    );

    check_document(StudentField::Cpf, &fields.cpf, CPF_LEN)?;
    check_document(StudentField::Rg, &fields.rg, RG_LEN)
}

fn check_document(field: StudentField, value: &str, expected: usize) -> Result<(), ValidationError> {
    let found = value.chars().count();
    ensure!(
        found == expected,
        InvalidLengthSnafu {
            field,
            expected,
            found
        }
    );
    ensure!(DOCUMENT_PATTERN.is_match(value), RegexpMismatchSnafu { field });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student(nome: &str, cpf: &str, rg: &str) -> StudentFields {
        StudentFields {
            nome: nome.into(),
            cpf: cpf.into(),
            rg: rg.into(),
        }
    }

    #[test]
    fn accepts_well_formed_record() {
        assert_eq!(
            validate(&student("Aluno Teste", "123.456.789-10", "12.345.678-9")),
            Ok(())
        );
        assert_eq!(
            validate(&student("Ana", "12345678910123", "123456789012")),
            Ok(())
        );
    }

    #[test]
    fn rejects_blank_names() {
        for nome in ["", "   ", "\t"] {
            assert_eq!(
                validate(&student(nome, "123.456.789-10", "12.345.678-9")),
                Err(ValidationError::ZeroValue {
                    field: StudentField::Nome
                }),
                "{nome:?}"
            );
        }
    }

    #[test]
    fn rejects_names_with_non_letters() {
        for nome in [
            "A1uno",
            "Aluno-Teste",
            "João",
            "Ana\u{00A0}Maria",
            "Ana\u{2003}Maria",
            "Ana\u{000B}Maria",
            "Ana\u{3000}Maria",
        ] {
            assert_eq!(
                validate(&student(nome, "123.456.789-10", "12.345.678-9")),
                Err(ValidationError::RegexpMismatch {
                    field: StudentField::Nome
                }),
                "{nome:?}"
            );
        }
    }

    #[test]
    fn accepts_ascii_whitespace_in_names() {
        for nome in ["Ana Maria", "Ana\tMaria", "Ana\nMaria", "Ana\u{000C}Maria", "Ana\rMaria"] {
            assert_eq!(
                validate(&student(nome, "123.456.789-10", "12.345.678-9")),
                Ok(()),
                "{nome:?}"
            );
        }
    }

    #[test]
    fn cpf_must_be_exact_length() {
        assert_eq!(
            validate(&student("Ana", "123.456.789-1", "12.345.678-9")),
            Err(ValidationError::InvalidLength {
                field: StudentField::Cpf,
                expected: CPF_LEN,
                found: 13
            })
        );
        assert_eq!(
            validate(&student("Ana", "", "12.345.678-9")),
            Err(ValidationError::InvalidLength {
                field: StudentField::Cpf,
                expected: CPF_LEN,
                found: 0
            })
        );
    }

    #[test]
    fn documents_reject_letters() {
        assert_eq!(
            validate(&student("Ana", "123.456.789-1x", "12.345.678-9")),
            Err(ValidationError::RegexpMismatch {
                field: StudentField::Cpf
            })
        );
        assert_eq!(
            validate(&student("Ana", "123.456.789-10", "12.345.678/9")),
            Err(ValidationError::RegexpMismatch {
                field: StudentField::Rg
            })
        );
    }

    #[test]
    fn rg_must_be_exact_length() {
        assert_eq!(
            validate(&student("Ana", "123.456.789-10", "12.345.678-90")),
            Err(ValidationError::InvalidLength {
                field: StudentField::Rg,
                expected: RG_LEN,
                found: 13
            })
        );
    }

    #[test]
    fn first_failure_wins() {
        let err = validate(&student("A1uno", "bad", "bad")).unwrap_err();
        assert_eq!(err.to_string(), "nome: regular expression mismatch");

        let err = validate(&student("Aluno", "bad", "bad")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "cpf: invalid length (expected 14 characters, found 3)"
        );
    }
}
