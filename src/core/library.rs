use std::fmt;
use std::fmt::{Display, Formatter};
use serde::{Deserialize, Serialize};

#[derive(Debug)]
pub enum LibraryError {
    Database {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    AccessDenied {
        message: String,
        reason_code: Option<String>,
    },
    DuplicateKey {
        message: String,
    },
    NotFound {
        message: String,
    },
    BookNotFound {
        isbn: String,
    },
    MemberNotFound {
        member_id: String,
    },
    LoanNotFound {
        loan_id: i64,
    },
    // all copies of the book are referenced by active loans
    BookUnavailable {
        isbn: String,
        active_loans: i64,
        total_quantity: i64,
    },
    BookHasActiveLoans {
        isbn: String,
        count: usize,
    },
    MemberHasActiveLoans {
        member_id: String,
        count: usize,
    },
    LoanStillActive {
        loan_id: i64,
    },
    // This is a retry-able error, which indicates that the store throttled the request or
    // was not reachable. The caller decides whether to retry, nothing is retried internally.
    CurrentlyUnavailable {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    Validation {
        message: String,
        reason_code: Option<String>,
    },
    Serialization {
        message: String,
    },
    Runtime {
        message: String,
        reason_code: Option<String>,
    },
}

impl LibraryError {
    pub fn database(message: &str, reason_code: Option<String>, retryable: bool) -> LibraryError {
        LibraryError::Database { message: message.to_string(), reason_code, retryable }
    }

    pub fn access_denied(message: &str, reason_code: Option<String>) -> LibraryError {
        LibraryError::AccessDenied { message: message.to_string(), reason_code }
    }

    pub fn duplicate_key(message: &str) -> LibraryError {
        LibraryError::DuplicateKey { message: message.to_string() }
    }

    pub fn not_found(message: &str) -> LibraryError {
        LibraryError::NotFound { message: message.to_string() }
    }

    pub fn book_not_found(isbn: &str) -> LibraryError {
        LibraryError::BookNotFound { isbn: isbn.to_string() }
    }

    pub fn member_not_found(member_id: &str) -> LibraryError {
        LibraryError::MemberNotFound { member_id: member_id.to_string() }
    }

    pub fn loan_not_found(loan_id: i64) -> LibraryError {
        LibraryError::LoanNotFound { loan_id }
    }

    pub fn book_unavailable(isbn: &str, active_loans: i64, total_quantity: i64) -> LibraryError {
        LibraryError::BookUnavailable { isbn: isbn.to_string(), active_loans, total_quantity }
    }

    pub fn book_has_active_loans(isbn: &str, count: usize) -> LibraryError {
        LibraryError::BookHasActiveLoans { isbn: isbn.to_string(), count }
    }

    pub fn member_has_active_loans(member_id: &str, count: usize) -> LibraryError {
        LibraryError::MemberHasActiveLoans { member_id: member_id.to_string(), count }
    }

    pub fn loan_still_active(loan_id: i64) -> LibraryError {
        LibraryError::LoanStillActive { loan_id }
    }

    pub fn unavailable(message: &str, reason_code: Option<String>, retryable: bool) -> LibraryError {
        LibraryError::CurrentlyUnavailable { message: message.to_string(), reason_code, retryable }
    }

    pub fn database_or_unavailable(message: &str, reason: Option<String>, retryable: bool) -> LibraryError {
        if retryable {
            LibraryError::unavailable(
                format!("ddb database unavailable error {:?} {:?}", message, reason).as_str(), reason, true)
        } else if let Some(ref reason_val) = reason {
            if reason_val.as_str().contains("404") {
                LibraryError::not_found(
                    format!("not found error {:?} {:?}", message, reason).as_str())
            } else if message.contains("ConditionalCheckFailed") {
                LibraryError::duplicate_key(
                    format!("conditional check failed {:?} {:?}", message, reason).as_str())
            } else if reason_val.as_str().contains("400") {
                LibraryError::access_denied(
                    format!("access-denied error {:?} {:?}", message, reason).as_str(), reason)
            } else {
                LibraryError::database(
                    format!("ddb database error {:?} {:?}", message, reason).as_str(), reason, false)
            }
        } else {
            LibraryError::database(
                format!("ddb database error {:?} {:?}", message, reason).as_str(), reason, false)
        }
    }

    pub fn validation(message: &str, reason_code: Option<String>) -> LibraryError {
        LibraryError::Validation { message: message.to_string(), reason_code }
    }

    pub fn serialization(message: &str) -> LibraryError {
        LibraryError::Serialization { message: message.to_string() }
    }

    pub fn runtime(message: &str, reason_code: Option<String>) -> LibraryError {
        LibraryError::Runtime { message: message.to_string(), reason_code }
    }

    pub fn retryable(&self) -> bool {
        match self {
            LibraryError::Database { retryable, .. } => { *retryable }
            LibraryError::CurrentlyUnavailable { retryable, .. } => { *retryable }
            _ => { false }
        }
    }

    // true for every not-found flavour, generic or typed
    pub fn is_not_found(&self) -> bool {
        matches!(self, LibraryError::NotFound { .. } | LibraryError::BookNotFound { .. }
            | LibraryError::MemberNotFound { .. } | LibraryError::LoanNotFound { .. })
    }
}

impl From<std::io::Error> for LibraryError {
    fn from(err: std::io::Error) -> Self {
        LibraryError::runtime(
            format!("serde io {:?}", err).as_str(), None)
    }
}

impl From<serde_json::Error> for LibraryError {
    fn from(err: serde_json::Error) -> Self {
        LibraryError::serialization(
            format!("serde json parsing {:?}", err).as_str())
    }
}

impl From<config::ConfigError> for LibraryError {
    fn from(err: config::ConfigError) -> Self {
        LibraryError::validation(
            format!("invalid configuration {}", err).as_str(), None)
    }
}

impl From<String> for LibraryError {
    fn from(err: String) -> Self {
        LibraryError::serialization(
            format!("serde parsing {:?}", err).as_str())
    }
}

impl Display for LibraryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            LibraryError::Database { message, reason_code, retryable } => {
                write!(f, "{} {:?} {}", message, reason_code, retryable)
            }
            LibraryError::AccessDenied { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
            LibraryError::DuplicateKey { message } => {
                write!(f, "{}", message)
            }
            LibraryError::NotFound { message } => {
                write!(f, "{}", message)
            }
            LibraryError::BookNotFound { isbn } => {
                write!(f, "book {} not found", isbn)
            }
            LibraryError::MemberNotFound { member_id } => {
                write!(f, "member {} not found", member_id)
            }
            LibraryError::LoanNotFound { loan_id } => {
                write!(f, "loan {} not found", loan_id)
            }
            LibraryError::BookUnavailable { isbn, active_loans, total_quantity } => {
                write!(f, "book {} is unavailable, {} of {} copies on loan", isbn, active_loans, total_quantity)
            }
            LibraryError::BookHasActiveLoans { isbn, count } => {
                write!(f, "book {} has {} active loan(s)", isbn, count)
            }
            LibraryError::MemberHasActiveLoans { member_id, count } => {
                write!(f, "member {} has {} active loan(s)", member_id, count)
            }
            LibraryError::LoanStillActive { loan_id } => {
                write!(f, "loan {} is still active", loan_id)
            }
            LibraryError::CurrentlyUnavailable { message, reason_code, retryable } => {
                write!(f, "{} {:?} {}", message, reason_code, retryable)
            }
            LibraryError::Validation { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
            LibraryError::Serialization { message } => {
                write!(f, "{}", message)
            }
            LibraryError::Runtime { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
        }
    }
}

impl std::error::Error for LibraryError {}

/// A specialized Result type for stores and services.
pub type LibraryResult<T> = Result<T, LibraryError>;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum MemberTier {
    Standard,
    Premium,
}

impl MemberTier {
    pub fn toggle(&self) -> MemberTier {
        match self {
            MemberTier::Standard => MemberTier::Premium,
            MemberTier::Premium => MemberTier::Standard,
        }
    }
}

impl From<String> for MemberTier {
    fn from(s: String) -> Self {
        match s.to_uppercase().as_str() {
            "PREMIUM" => MemberTier::Premium,
            _ => MemberTier::Standard,
        }
    }
}

impl Display for MemberTier {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            MemberTier::Standard => write!(f, "Standard"),
            MemberTier::Premium => write!(f, "Premium"),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum LoanStatus {
    InProgress,
    Returned,
}

impl From<String> for LoanStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Returned" => LoanStatus::Returned,
            _ => LoanStatus::InProgress,
        }
    }
}

impl Display for LoanStatus {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            LoanStatus::InProgress => write!(f, "InProgress"),
            LoanStatus::Returned => write!(f, "Returned"),
        }
    }
}
