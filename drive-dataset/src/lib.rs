//! Batch archive toolkit for driving simulator recordings.

pub mod batch;
pub mod builder;
pub mod camera;
mod common;
pub mod config;
pub mod frame;
pub mod inspect;
pub mod map;
pub mod preprocess;
