//! Batch buffering and archive I/O.

mod accumulator;
mod archive;
mod writer;

pub use accumulator::*;
pub use archive::*;
pub use writer::*;
