//! World-registry error type.
//!
//! Everything here is handled at the event boundary: callers drop the
//! offending input (logging at debug level) and carry on.  Nothing
//! propagates to the tick driver.

use thiserror::Error;

/// Errors produced by `mazebot-world` registries.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorldError {
    #[error("coordinate ({x}, {y}) lies outside every maze seen so far")]
    InvalidCoordinate { x: i32, y: i32 },
}

pub type WorldResult<T> = Result<T, WorldError>;
