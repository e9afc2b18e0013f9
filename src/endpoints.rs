mod leetcode;
mod utils;

pub use leetcode::*;
pub use utils::*;
