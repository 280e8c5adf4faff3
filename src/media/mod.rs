//! Media module: asset resolution, filtering and candidates.

pub mod candidate;
pub mod filter;
pub mod resolver;

pub use candidate::Candidate;
pub use filter::{accept, evaluate, FilterPolicy, Rejection};
pub use resolver::{classify, resolve, PostShape};
