use async_trait::async_trait;
use crate::core::library::LibraryError;

#[derive(Debug)]
pub enum CommandError {
    Access {
        message: String,
        reason_code: Option<String>,
    },
    // request rejected by a business rule such as availability or a deletion guard
    Conflict {
        message: String,
        reason_code: Option<String>,
    },
    Database {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    DuplicateKey {
        message: String,
    },
    NotFound {
        message: String,
    },
    Runtime {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    Serialization {
        message: String,
    },
    Validation {
        message: String,
        reason_code: Option<String>,
    },
}

#[async_trait]
pub trait Command<Request, Response> {
    async fn execute(&self, req: Request) -> Result<Response, CommandError>;
}

impl From<LibraryError> for CommandError {
    fn from(other: LibraryError) -> Self {
        let message = other.to_string();
        match other {
            LibraryError::Database { message, reason_code, retryable } => {
                CommandError::Database { message, reason_code, retryable }
            }
            LibraryError::AccessDenied { message, reason_code } => {
                CommandError::Access { message, reason_code }
            }
            LibraryError::DuplicateKey { message } => {
                CommandError::DuplicateKey { message }
            }
            LibraryError::NotFound { message } => {
                CommandError::NotFound { message }
            }
            LibraryError::BookNotFound { .. } |
            LibraryError::MemberNotFound { .. } |
            LibraryError::LoanNotFound { .. } => {
                CommandError::NotFound { message }
            }
            LibraryError::BookUnavailable { .. } => {
                CommandError::Conflict { message, reason_code: Some("BookUnavailable".to_string()) }
            }
            LibraryError::BookHasActiveLoans { .. } => {
                CommandError::Conflict { message, reason_code: Some("BookHasActiveLoans".to_string()) }
            }
            LibraryError::MemberHasActiveLoans { .. } => {
                CommandError::Conflict { message, reason_code: Some("MemberHasActiveLoans".to_string()) }
            }
            LibraryError::LoanStillActive { .. } => {
                CommandError::Conflict { message, reason_code: Some("LoanStillActive".to_string()) }
            }
            LibraryError::CurrentlyUnavailable { message, reason_code, retryable } => {
                CommandError::Runtime { message, reason_code, retryable }
            }
            LibraryError::Validation { message, reason_code } => {
                CommandError::Validation { message, reason_code }
            }
            LibraryError::Serialization { message } => {
                CommandError::Serialization { message }
            }
            LibraryError::Runtime { message, reason_code } => {
                CommandError::Runtime { message, reason_code, retryable: false }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::core::command::CommandError;
    use crate::core::library::LibraryError;

    #[tokio::test]
    async fn test_should_map_not_found_errors() {
        assert!(matches!(CommandError::from(LibraryError::book_not_found("B1")), CommandError::NotFound { .. }));
        assert!(matches!(CommandError::from(LibraryError::member_not_found("M1")), CommandError::NotFound { .. }));
        assert!(matches!(CommandError::from(LibraryError::loan_not_found(1)), CommandError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_should_map_business_rules_to_conflict() {
        let err = CommandError::from(LibraryError::book_has_active_loans("B1", 1));
        match err {
            CommandError::Conflict { message, reason_code } => {
                assert_eq!("book B1 has 1 active loan(s)", message.as_str());
                assert_eq!(Some("BookHasActiveLoans".to_string()), reason_code);
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(matches!(CommandError::from(LibraryError::loan_still_active(1)), CommandError::Conflict { .. }));
        assert!(matches!(CommandError::from(LibraryError::book_unavailable("B1", 1, 1)), CommandError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_should_map_validation() {
        assert!(matches!(CommandError::from(LibraryError::validation("bad", None)), CommandError::Validation { .. }));
        assert!(matches!(CommandError::from(LibraryError::duplicate_key("dup")), CommandError::DuplicateKey { .. }));
    }
}
