//! Status verbs printed by the progress reporter

pub const USING: &str = "Using";
pub const LOADED: &str = "Loaded";
pub const IGNORED: &str = "Ignored";
pub const FOUND: &str = "Found";
pub const FORMATTING: &str = "Formatting";
pub const FORMATTED: &str = "Formatted";
pub const FAILED: &str = "Failed";
pub const DONE: &str = "Done";
