mod errors;
mod handler;
mod set;
mod types;

pub use errors::RegionError;
pub use handler::Region;
pub use set::RegionSet;
pub use types::{Element, ElementConfig};
