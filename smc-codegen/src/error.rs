use thiserror::Error;

/// Errors raised while turning a model into artifacts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    #[error("unknown backend '{0}'")]
    BackendNotFound(String),

    /// A directive the backend cannot do without, e.g. `%class`
    #[error("missing {0} directive")]
    MissingDirective(String),

    /// The start state does not name a state of the map
    #[error("start state {0} is not defined")]
    UnknownState(String),

    #[error("serialization failed: {0}")]
    Serialization(String),
}
