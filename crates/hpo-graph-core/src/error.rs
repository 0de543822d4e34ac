use std::fmt;

/// Machine-readable error codes for agent-friendly decision making.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    GraphStructure,
    NodeNotFound,
    Unreachable,
    DistanceOverflow,
    WorkerPool,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::GraphStructure => "E1001",
            Self::NodeNotFound => "E2001",
            Self::Unreachable => "E2002",
            Self::DistanceOverflow => "E3001",
            Self::WorkerPool => "E5001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::GraphStructure => "Malformed ontology graph",
            Self::NodeNotFound => "Term not found",
            Self::Unreachable => "No path between terms",
            Self::DistanceOverflow => "Distance exceeds matrix cell range",
            Self::WorkerPool => "Worker pool unavailable",
        }
    }

    /// Optional remediation hint that can be surfaced to operators and agents.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::GraphStructure => {
                Some("Check that the OBO file contains the super-root and the configured root term.")
            }
            Self::NodeNotFound => {
                Some("Terms outside the configured root's subtree are pruned at load time.")
            }
            Self::Unreachable => Some("Retry with --undirected to ignore edge direction."),
            Self::DistanceOverflow => None,
            Self::WorkerPool => Some("Lower the worker count and retry."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Errors raised by ontology construction and queries.
///
/// All queries are pure functions of the frozen graph, so none of these is
/// transient: retrying the same call yields the same error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OntologyError {
    /// The input graph is missing a node that construction depends on.
    #[error("malformed ontology graph: {0}")]
    GraphStructure(String),

    /// A query referenced an identifier absent from the (pruned) graph.
    #[error("term not found: {0}")]
    NodeNotFound(String),

    /// Both endpoints exist but no path connects them.
    #[error("no path from {from} to {to}")]
    Unreachable { from: String, to: String },

    /// A distance did not fit in a `u16` matrix cell.
    #[error("distance from {from} to {to} is {distance}, which exceeds {max}", max = u16::MAX)]
    DistanceOverflow {
        from: String,
        to: String,
        distance: usize,
    },

    /// The worker pool for the matrix build could not be created.
    #[error("failed to build worker pool: {0}")]
    WorkerPool(String),
}

impl OntologyError {
    /// The stable [`ErrorCode`] for this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::GraphStructure(_) => ErrorCode::GraphStructure,
            Self::NodeNotFound(_) => ErrorCode::NodeNotFound,
            Self::Unreachable { .. } => ErrorCode::Unreachable,
            Self::DistanceOverflow { .. } => ErrorCode::DistanceOverflow,
            Self::WorkerPool(_) => ErrorCode::WorkerPool,
        }
    }
}

/// Result alias for ontology operations.
pub type Result<T> = std::result::Result<T, OntologyError>;

#[cfg(test)]
mod tests {
    use super::{ErrorCode, OntologyError};
    use std::collections::HashSet;

    #[test]
    fn all_codes_are_unique() {
        let all = [
            ErrorCode::GraphStructure,
            ErrorCode::NodeNotFound,
            ErrorCode::Unreachable,
            ErrorCode::DistanceOverflow,
            ErrorCode::WorkerPool,
        ];
        let codes: HashSet<&str> = all.iter().map(|c| c.code()).collect();
        assert_eq!(codes.len(), all.len());
    }

    #[test]
    fn errors_map_to_codes() {
        let err = OntologyError::Unreachable {
            from: "HP:1".into(),
            to: "HP:2".into(),
        };
        assert_eq!(err.code(), ErrorCode::Unreachable);
        assert_eq!(err.to_string(), "no path from HP:1 to HP:2");
        assert_eq!(
            OntologyError::NodeNotFound("HP:9".into()).code().code(),
            "E2001"
        );
    }

    #[test]
    fn overflow_message_names_the_limit() {
        let err = OntologyError::DistanceOverflow {
            from: "a".into(),
            to: "b".into(),
            distance: 70_000,
        };
        assert!(err.to_string().contains("65535"));
    }
}
