mod execute;
pub use execute::*;
mod util;
pub mod verbs;
