use thiserror::Error;

/// Result type alias using IdentityError
pub type Result<T> = std::result::Result<T, IdentityError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code usable for programmatic handling,
/// test assertions and CLI output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Caller usage
    InvalidInput,
    InvalidQuery,

    // Cardinality
    TooManyResults,

    // Storage
    ConstraintViolation,
    Io,
    Persistence,
    Concurrency,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::InvalidQuery => "ERR_INVALID_QUERY",
            ExErrorKind::TooManyResults => "ERR_TOO_MANY_RESULTS",
            ExErrorKind::ConstraintViolation => "ERR_CONSTRAINT_VIOLATION",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::Concurrency => "ERR_CONCURRENCY",
        }
    }
}

/// Canonical structured error type
///
/// Store implementations report failures with this type; `IdentityError`
/// converts into it for uniform reporting at the edges.
#[derive(Debug, Clone, PartialEq)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_id: Option<String>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_id: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity ID context
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Stable error code of this error's kind
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (entity_id: {})", entity_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Errors raised by the identity service and the tenant query engine
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IdentityError {
    /// A query builder call received input it cannot accept
    #[error("Invalid query: {reason}")]
    InvalidQuery { reason: String },

    /// An entity operation received malformed input
    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },

    /// `single_result` matched more than one entity
    #[error("Query is not selective enough: expected at most one result, found {count}")]
    TooManyResults { count: u64 },

    /// The underlying store failed; the store's error is carried unmodified
    #[error(transparent)]
    Store(#[from] ExError),
}

impl IdentityError {
    pub(crate) fn invalid_query(reason: impl Into<String>) -> Self {
        IdentityError::InvalidQuery {
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_input(reason: impl Into<String>) -> Self {
        IdentityError::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Canonical kind of this error
    pub fn kind(&self) -> ExErrorKind {
        match self {
            IdentityError::InvalidQuery { .. } => ExErrorKind::InvalidQuery,
            IdentityError::InvalidInput { .. } => ExErrorKind::InvalidInput,
            IdentityError::TooManyResults { .. } => ExErrorKind::TooManyResults,
            IdentityError::Store(err) => err.kind(),
        }
    }
}

impl From<IdentityError> for ExError {
    fn from(err: IdentityError) -> Self {
        match err {
            IdentityError::InvalidQuery { reason } => {
                ExError::new(ExErrorKind::InvalidQuery).with_message(reason)
            }
            IdentityError::InvalidInput { reason } => {
                ExError::new(ExErrorKind::InvalidInput).with_message(reason)
            }
            IdentityError::TooManyResults { count } => ExError::new(ExErrorKind::TooManyResults)
                .with_op("single_result")
                .with_message(format!("Expected at most one result, found {}", count)),
            IdentityError::Store(err) => err,
        }
    }
}

impl From<&IdentityError> for ExError {
    fn from(err: &IdentityError) -> Self {
        err.clone().into()
    }
}
