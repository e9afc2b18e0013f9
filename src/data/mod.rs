mod profile;
mod submission;
pub mod time;

pub use profile::*;
pub use submission::*;
