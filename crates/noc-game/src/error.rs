use thiserror::Error;

/// Errors that can occur while constructing a [`crate::Game`] from explicit
/// vectors. These are boundary-validation errors: once a `Game` exists its
/// invariants hold for the rest of its lifetime.
#[derive(Debug, Error)]
pub enum GameBuildError {
    #[error("a game needs at least one vertex")]
    NoVertices,

    #[error("owners has {owners} entries but priors has {priors}; every vertex needs both")]
    OwnerPriorityMismatch { owners: usize, priors: usize },

    #[error("sources has {sources} entries but targets has {targets}; every edge needs both endpoints")]
    SourceTargetMismatch { sources: usize, targets: usize },

    #[error("edge {edge} has {field} {value}, but there are only {nvertices} vertices")]
    EndpointOutOfRange {
        edge: usize,
        field: &'static str,
        value: usize,
        nvertices: usize,
    },

    #[error("weights has {weights} entries but there are {nedges} edges")]
    WeightCountMismatch { weights: usize, nedges: usize },
}
