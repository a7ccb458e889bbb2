//! Error types for vcam.

use thiserror::Error;

/// Result type alias using vcam's Error.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for vcam operations.
///
/// Construction errors (`InvalidConfig`, `OutOfRange`, `DirectionMismatch`,
/// `LinkRejected`) are always fatal to a `Graph::build` call: the partially
/// built topology is torn down before the error is returned.
#[derive(Error, Debug)]
pub enum Error {
    /// A topology descriptor is malformed (e.g. pad count disagrees with
    /// the pad direction list).
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// An entity, pad or link index does not resolve.
    #[error("index out of range: {0}")]
    OutOfRange(String),

    /// A link's source pad lacks source capability, or its sink pad lacks
    /// sink capability.
    #[error("link direction mismatch: {0}")]
    DirectionMismatch(String),

    /// A link was rejected by the link-validation hook.
    #[error("link rejected: {0}")]
    LinkRejected(String),

    /// `propagate` was called on a pad without source capability.
    ///
    /// This signals a bug at the call site, not a runtime condition to
    /// recover from.
    #[error("pad {pad} of entity {entity} is not a source pad")]
    InvalidDirection {
        /// Index of the offending entity.
        entity: usize,
        /// Index of the offending pad within the entity.
        pad: u16,
    },

    /// Attempted to toggle the enabled flag of an immutable link.
    #[error("link {0} is immutable")]
    ImmutableLink(usize),

    /// A node does not implement the requested hook.
    ///
    /// The streaming controller treats this as benign success.
    #[error("operation not supported by this node")]
    NotSupported,
}
