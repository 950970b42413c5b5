use thiserror::Error;

/// Structural failures. Non-convergence is not among them: a sample that
/// exhausts its pass cap is a normal, reportable outcome.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NetError {
    #[error("a network needs an input and an output layer, got {0} widths")]
    TooFewLayers(usize),

    #[error("layer {0} has zero width")]
    EmptyLayer(usize),

    #[error("expected {expected} values, got {got}")]
    Dimension { expected: usize, got: usize },
}
