/// Errors raised while building or reading model types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// The hit policy name is not part of the DMN vocabulary.
    #[error("unknown hit policy: '{value}'")]
    UnknownHitPolicy { value: String },

    /// The aggregator name is not one of SUM, COUNT, MIN or MAX.
    #[error("unknown aggregator: '{value}'")]
    UnknownAggregator { value: String },

    /// Only COLLECT may carry an aggregator.
    #[error("hit policy '{policy}' cannot be combined with aggregator '{aggregator}'")]
    AggregatorNotAllowed { policy: String, aggregator: String },

    /// A single result was requested but several rules produced results.
    #[error("expected a single decision result but found {count}")]
    MultipleResults { count: usize },

    /// A single entry was requested but the result has several entries.
    #[error("expected a single result entry but found {count}: {names:?}")]
    MultipleEntries { count: usize, names: Vec<String> },
}
