pub mod activation;
pub mod metrics;

pub use activation::*;
pub use metrics::*;
