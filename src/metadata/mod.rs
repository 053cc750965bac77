//! Track metadata: local tag inspection plus remote normalization.

/// Remote tagging service client and resolver trait.
pub mod resolver;
/// Local audio tag reading.
pub mod tags;
