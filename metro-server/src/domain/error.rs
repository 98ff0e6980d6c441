//! Domain error types.
//!
//! These errors represent construction failures in the domain layer.
//! They are distinct from planning and transport errors.

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// A route needs at least a source and a destination
    #[error("route must have at least two stops")]
    EmptyRoute,

    /// The hop lines don't line up with the stops
    #[error("route has {stops} stops but {legs} legs")]
    MismatchedLegs { stops: usize, legs: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = DomainError::EmptyRoute;
        assert_eq!(err.to_string(), "route must have at least two stops");

        let err = DomainError::MismatchedLegs { stops: 3, legs: 1 };
        assert_eq!(err.to_string(), "route has 3 stops but 1 legs");
    }
}
