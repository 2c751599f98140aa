mod fighter;
mod query;
mod roster;

pub use fighter::*;
pub use query::*;
pub use roster::*;
