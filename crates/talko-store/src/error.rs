use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Invalid email format")]
    InvalidEmail,

    #[error("{0}")]
    WeakPassword(String),

    #[error("Name must be at least 2 characters long")]
    InvalidName,

    #[error("User already exists with this email")]
    DuplicateEmail,

    /// Covers both unknown email and wrong password so callers cannot
    /// enumerate accounts.
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("User not found")]
    UserNotFound,

    #[error("Current password is incorrect")]
    WrongCurrentPassword,

    #[error("Account is locked due to too many failed login attempts. Try again later.")]
    AccountLocked,

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;
