//! Story database errors.

/// What went wrong talking to the story database.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum DatabaseErrorKind {
    /// No URL configured, or the server refused the connection
    #[display("Database connection error: {}", _0)]
    Connection(String),
    /// Statement failed
    #[display("Database query error: {}", _0)]
    Query(String),
    /// Unique or foreign-key rule rejected a write
    #[display("Constraint violated: {}", _0)]
    Constraint(String),
    /// Stored row does not map onto a story, page or asset
    #[display("Row conversion error: {}", _0)]
    Conversion(String),
    /// Embedded schema migrations did not apply
    #[display("Migration error: {}", _0)]
    Migration(String),
    /// Row missing
    #[display("Record not found")]
    NotFound,
}

/// Story database error with the location that raised it.
///
/// ```
/// use picturebook_error::{DatabaseError, DatabaseErrorKind};
///
/// let err = DatabaseError::new(DatabaseErrorKind::Conversion("status 'lost'".into()));
/// assert!(err.to_string().contains("status 'lost'"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Database Error: {} at line {} in {}", kind, line, file)]
pub struct DatabaseError {
    /// Failure category
    pub kind: DatabaseErrorKind,
    /// Line that raised the error
    pub line: u32,
    /// File that raised the error
    pub file: &'static str,
}

impl DatabaseError {
    /// Wrap `kind` with the caller's location.
    #[track_caller]
    pub fn new(kind: DatabaseErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

impl From<diesel::result::Error> for DatabaseError {
    #[track_caller]
    fn from(err: diesel::result::Error) -> Self {
        use diesel::result::{DatabaseErrorKind as Diesel, Error};

        let kind = match &err {
            Error::NotFound => DatabaseErrorKind::NotFound,
            Error::DatabaseError(Diesel::UniqueViolation | Diesel::ForeignKeyViolation, info) => {
                DatabaseErrorKind::Constraint(info.message().to_string())
            }
            _ => DatabaseErrorKind::Query(err.to_string()),
        };
        DatabaseError::new(kind)
    }
}

impl From<diesel::ConnectionError> for DatabaseError {
    #[track_caller]
    fn from(err: diesel::ConnectionError) -> Self {
        DatabaseError::new(DatabaseErrorKind::Connection(err.to_string()))
    }
}
