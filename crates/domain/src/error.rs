//! Error taxonomy shared by every layer of the workspace.
//!
//! [`DevicesError`] is a closed set: four classified failures callers are
//! expected to react to, plus [`DevicesError::Storage`] for everything else.
//! Each layer defines its own typed errors and converts via `From`.

/// Top-level error returned by domain checks, services and ports.
#[derive(Debug, thiserror::Error)]
pub enum DevicesError {
    /// The referenced identifier has no corresponding entity.
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// An identifier collision on creation.
    #[error(transparent)]
    AlreadyExists(#[from] AlreadyExistsError),

    /// A field failed its validation rule.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The current state of the entity forbids the operation.
    #[error(transparent)]
    BusinessRule(#[from] BusinessRuleError),

    /// Unclassified failure (store unavailable, I/O, decoding, …).
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl DevicesError {
    /// Name of the offending field when this is a validation failure.
    #[must_use]
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::Validation(err) => Some(err.field),
            _ => None,
        }
    }
}

/// No entity exists with the given identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    /// Kind of entity that was looked up (e.g. `"Device"`).
    pub entity: &'static str,
    /// The identifier that was not found, rendered as text.
    pub id: String,
}

/// An entity with the given identifier already exists.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} {id} already exists")]
pub struct AlreadyExistsError {
    pub entity: &'static str,
    pub id: String,
}

/// A single field violated its validation rule.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("validation error on field '{field}': {reason}")]
pub struct ValidationError {
    /// Name of the offending field (`id`, `name`, `brand`, `created_at`, `state`).
    pub field: &'static str,
    /// Human-readable reason.
    pub reason: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

/// An operation was attempted against an entity whose state forbids it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("business rule violation: {message}")]
pub struct BusinessRuleError {
    pub message: String,
}

impl BusinessRuleError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
