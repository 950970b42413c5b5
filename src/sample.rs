use crate::f;

/// One labeled observation, as the trainer consumes it. The trainer writes
/// every forward pass back through [`Sample::record_output`] before asking
/// the sample whether it is classified well enough.
pub trait Sample {
    fn input(&self) -> &[f64];

    fn record_output(&mut self, output: &[f64]);

    /// Expected minus actual, one entry per output neuron.
    fn error(&self) -> Vec<f64>;

    fn estimated_error(&self) -> f64;

    fn is_correct(&self) -> bool;
}

/// A feature vector labeled with a one-hot class target.
#[derive(Debug, Clone)]
pub struct ClassSample {
    input: Vec<f64>,
    target: Vec<f64>,
    output: Vec<f64>,
}

impl ClassSample {
    pub fn new(input: Vec<f64>, target: Vec<f64>) -> ClassSample {
        ClassSample {
            input,
            target,
            output: Vec::new(),
        }
    }

    pub fn of_class(input: Vec<f64>, class: usize, classes: usize) -> ClassSample {
        ClassSample::new(input, f::onehot(class, classes))
    }

    pub fn label(&self) -> usize {
        f::argmax(&self.target)
    }

    /// Class picked by the last recorded output, if any pass ran yet.
    pub fn predicted(&self) -> Option<usize> {
        if self.output.is_empty() {
            return None;
        }
        Some(f::argmax(&self.output))
    }

    pub fn output(&self) -> &[f64] {
        &self.output
    }
}

impl Sample for ClassSample {
    fn input(&self) -> &[f64] {
        &self.input
    }

    fn record_output(&mut self, output: &[f64]) {
        self.output = output.to_vec();
    }

    fn error(&self) -> Vec<f64> {
        // The error always spans the full target width.
        let mut e = self.target.clone();
        for (ei, o) in e.iter_mut().zip(self.output.iter()) {
            *ei -= o;
        }
        e
    }

    fn estimated_error(&self) -> f64 {
        if self.output.is_empty() {
            return f64::INFINITY;
        }
        self.target
            .iter()
            .zip(self.output.iter())
            .map(|(t, o)| (t - o) * (t - o))
            .sum::<f64>()
            / 2.
    }

    fn is_correct(&self) -> bool {
        self.predicted() == Some(self.label())
    }
}

/// Ordered collection of samples, trained in insertion order.
pub struct SamplesSet<S>(Vec<S>);

impl<S: Sample> SamplesSet<S> {
    pub fn new() -> SamplesSet<S> {
        SamplesSet(Vec::new())
    }

    pub fn insert(&mut self, sample: S) -> &mut Self {
        self.0.push(sample);
        self
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, S> {
        self.0.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, S> {
        self.0.iter_mut()
    }
}

impl<S: Sample> Default for SamplesSet<S> {
    fn default() -> SamplesSet<S> {
        SamplesSet::new()
    }
}

impl<S: Sample> From<Vec<S>> for SamplesSet<S> {
    fn from(samples: Vec<S>) -> SamplesSet<S> {
        SamplesSet(samples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_is_expected_minus_actual() {
        let mut s = ClassSample::new(vec![0.5], vec![1., 0.]);
        s.record_output(&[0.25, 0.75]);
        assert_eq!(s.error(), vec![0.75, -0.75]);
    }

    #[test]
    fn estimated_error_is_half_the_squared_distance() {
        let mut s = ClassSample::new(vec![0.], vec![1., 0.]);
        s.record_output(&[0.5, 0.5]);
        assert!((s.estimated_error() - 0.25).abs() < 1e-12);
    }

    #[test]
    fn unseen_sample_never_counts_as_correct() {
        let s = ClassSample::of_class(vec![0.1], 0, 3);
        assert_eq!(s.predicted(), None);
        assert!(!s.is_correct());
        assert!(s.estimated_error().is_infinite());
    }

    #[test]
    fn correctness_follows_the_argmax() {
        let mut s = ClassSample::of_class(vec![0.1], 1, 3);
        s.record_output(&[0.1, 0.8, 0.3]);
        assert!(s.is_correct());
        s.record_output(&[0.9, 0.2, 0.1]);
        assert!(!s.is_correct());
    }

    #[test]
    fn set_keeps_insertion_order() {
        let mut set = SamplesSet::new();
        set.insert(ClassSample::of_class(vec![0.], 0, 2))
            .insert(ClassSample::of_class(vec![1.], 1, 2));
        assert_eq!(set.len(), 2);
        let labels: Vec<usize> = set.iter().map(|s| s.label()).collect();
        assert_eq!(labels, vec![0, 1]);
    }
}
