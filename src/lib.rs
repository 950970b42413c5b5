//! Layered feedforward classifier trained by online backpropagation.
//!
//! A [`Network`] is built once from a list of layer widths, driven by a
//! [`Trainer`] that drills individual samples until they classify within an
//! acceptable error, and queried with [`Network::forward`].

pub mod error;
pub mod f;
pub mod nn;
pub mod sample;

pub use error::NetError;
pub use nn::fc::Network;
pub use nn::trainer::{Hyper, Progress, Trainer};
pub use sample::{ClassSample, Sample, SamplesSet};
