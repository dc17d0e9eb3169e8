use std::error;
use std::fmt;

#[derive(Debug)]
pub struct ExecuteError;

impl fmt::Display for ExecuteError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "fmtwalk could not run!")
    }
}

impl error::Error for ExecuteError {}
