mod engine;
mod errors;
mod types;

pub use engine::{match_element, match_template, structural_similarity};
pub use errors::MatchError;
pub use types::{MatchConfig, MatchResult};
