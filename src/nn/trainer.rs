use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::error::NetError;
use crate::nn::fc::Network;
use crate::sample::{Sample, SamplesSet};

/// Slack applied when comparing epoch accuracy against the stop threshold.
const STOP_MARGIN: f64 = 1e-9;

#[derive(Debug, Clone)]
pub struct Hyper {
    pub learning_rate: f64,
    /// Hard cap on corrective passes for a single sample.
    pub max_passes: usize,
    /// Samples between progress notifications inside an epoch.
    pub progress_every: usize,
    /// Advisory only. Every pass mutates the one shared set of weight
    /// matrices, so training runs sequentially whatever this is set to.
    pub parallel: bool,
}

impl Hyper {
    pub fn new() -> Hyper {
        Hyper {
            learning_rate: 0.01,
            max_passes: 100,
            progress_every: 25,
            parallel: false,
        }
    }
}

impl Default for Hyper {
    fn default() -> Hyper {
        Hyper::new()
    }
}

/// Snapshot handed to the progress hook.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progress {
    /// Fraction of the planned sample passes finished, in [0, 1].
    pub complete: f64,
    /// Share of already-correct samples seen so far in the current epoch.
    pub accuracy: f64,
    pub elapsed: Duration,
}

pub struct Trainer<'a> {
    net: &'a mut Network,
    hyper: Hyper,
    on_progress: Box<dyn FnMut(Progress)>,
}

impl Trainer<'_> {
    pub fn new(net: &mut Network) -> Trainer {
        Trainer {
            net,
            hyper: Hyper::new(),
            on_progress: Box::new(|_| {}),
        }
    }

    pub fn override_hyper(&mut self, hyper: Hyper) -> &mut Self {
        self.hyper = hyper;
        self
    }

    pub fn set_learning_rate(&mut self, rate: f64) -> &mut Self {
        self.hyper.learning_rate = rate;
        self
    }

    pub fn set_max_passes(&mut self, passes: usize) -> &mut Self {
        self.hyper.max_passes = passes;
        self
    }

    pub fn parallel_hint(&mut self, parallel: bool) -> &mut Self {
        self.hyper.parallel = parallel;
        self
    }

    pub fn on_progress(&mut self, hook: impl FnMut(Progress) + 'static) -> &mut Self {
        self.on_progress = Box::new(hook);
        self
    }

    /// Drills one sample until it classifies within `acceptable_error`, or
    /// until the pass cap. Returns the number of corrective passes taken:
    /// 0 means the sample was already correct, `max_passes` means it never
    /// settled. Neither is an error.
    pub fn train(
        &mut self,
        sample: &mut impl Sample,
        acceptable_error: f64,
    ) -> Result<usize, NetError> {
        let mut passes = 0;
        loop {
            let out = self.net.forward(sample.input())?;
            sample.record_output(&out.to_vec());

            if sample.estimated_error() < acceptable_error && sample.is_correct() {
                return Ok(passes);
            }
            if passes >= self.hyper.max_passes {
                return Ok(passes);
            }

            self.net
                .backward(&sample.error(), self.hyper.learning_rate)?;
            passes += 1;
        }
    }

    /// Runs up to `epochs` passes over the whole set, in set order, stopping
    /// early once the share of already-correct samples reaches
    /// `1 - acceptable_error`. Returns the accuracy of the last finished
    /// epoch; zero epochs or an empty set yield 0.0. The progress hook fires
    /// at epoch boundaries, every [`Hyper::progress_every`] samples, and
    /// exactly once with `complete = 1.0` when the run finishes.
    pub fn train_on_set<S: Sample>(
        &mut self,
        set: &mut SamplesSet<S>,
        epochs: usize,
        acceptable_error: f64,
    ) -> Result<f64, NetError> {
        let start = Instant::now();
        let planned = epochs * set.len();
        let goal = 1. - acceptable_error;

        let mut done = 0;
        let mut accuracy = 0.;

        for epoch in 0..epochs {
            if set.is_empty() {
                break;
            }

            self.emit(done, planned, accuracy, start);

            let mut settled = 0;
            for (i, sample) in set.iter_mut().enumerate() {
                if self.train(sample, acceptable_error)? == 0 {
                    settled += 1;
                }
                done += 1;
                if (i + 1) % self.hyper.progress_every == 0 {
                    self.emit(done, planned, settled as f64 / (i + 1) as f64, start);
                }
            }

            accuracy = settled as f64 / set.len() as f64;
            debug!(epoch, accuracy, "epoch finished");

            if accuracy + STOP_MARGIN >= goal {
                break;
            }
            if epoch + 1 < epochs {
                self.emit(done, planned, accuracy, start);
            }
        }

        info!(accuracy, elapsed = ?start.elapsed(), "training run finished");
        (self.on_progress)(Progress {
            complete: 1.,
            accuracy,
            elapsed: start.elapsed(),
        });
        Ok(accuracy)
    }

    /// Accuracy of the current weights over `set`: one forward pass per
    /// sample, no weight updates.
    pub fn evaluate<S: Sample>(&mut self, set: &mut SamplesSet<S>) -> Result<f64, NetError> {
        if set.is_empty() {
            return Ok(0.);
        }

        let mut correct = 0;
        for sample in set.iter_mut() {
            let out = self.net.forward(sample.input())?;
            sample.record_output(&out.to_vec());
            if sample.is_correct() {
                correct += 1;
            }
        }
        Ok(correct as f64 / set.len() as f64)
    }

    fn emit(&mut self, done: usize, planned: usize, accuracy: f64, start: Instant) {
        let complete = if planned == 0 {
            1.
        } else {
            done as f64 / planned as f64
        };
        (self.on_progress)(Progress {
            complete,
            accuracy,
            elapsed: start.elapsed(),
        });
    }
}
