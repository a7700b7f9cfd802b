//! Library components of the `econ-dash` binary.

pub mod browse;
pub mod logging;
pub mod render;
pub mod session;
