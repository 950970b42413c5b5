pub mod fc;
pub mod trainer;

pub use fc::Network;
pub use trainer::{Hyper, Progress, Trainer};
