//! CLI-level errors (wraps application errors)

use std::io::ErrorKind;

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Application(#[from] ApplicationError),

    #[error("{0}")]
    Usage(String),
}

impl From<DomainError> for CliError {
    fn from(e: DomainError) -> Self {
        CliError::Application(e.into())
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage(_) => crate::exitcode::USAGE,
            CliError::Application(e) => match e {
                ApplicationError::Domain(d) if d.is_lookup() => crate::exitcode::NOT_FOUND,
                ApplicationError::Domain(d) if d.is_format() => crate::exitcode::DATAERR,
                ApplicationError::Domain(_) => crate::exitcode::SOFTWARE,
                ApplicationError::Source { source, .. } => match source.kind() {
                    ErrorKind::NotFound | ErrorKind::PermissionDenied => {
                        crate::exitcode::NOINPUT
                    }
                    _ => crate::exitcode::IOERR,
                },
                ApplicationError::NoTreeFile { .. } => crate::exitcode::NOINPUT,
                ApplicationError::Config { .. } => crate::exitcode::CONFIG,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exitcode;

    #[test]
    fn test_exit_codes_by_kind() {
        let format: CliError = DomainError::InvalidFormat {
            line_no: 1,
            line: "x".into(),
        }
        .into();
        assert_eq!(format.exit_code(), exitcode::DATAERR);

        let lookup: CliError = DomainError::NoSuchNode("Z".into()).into();
        assert_eq!(lookup.exit_code(), exitcode::NOT_FOUND);

        let missing: CliError = ApplicationError::read(
            "open: nowhere.txt",
            std::io::Error::from(ErrorKind::NotFound),
        )
        .into();
        assert_eq!(missing.exit_code(), exitcode::NOINPUT);

        let broken: CliError = ApplicationError::read(
            "read: tree.txt",
            std::io::Error::from(ErrorKind::InvalidData),
        )
        .into();
        assert_eq!(broken.exit_code(), exitcode::IOERR);

        assert_eq!(CliError::Usage("bad".into()).exit_code(), exitcode::USAGE);
    }
}
