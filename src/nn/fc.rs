use ndarray::{Array, Array1, Array2, Axis};
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;
use rand::rngs::StdRng;
use rand::{thread_rng, Rng, SeedableRng};

use crate::error::NetError;
use crate::f;
use crate::nn::trainer::Trainer;

/// Weights and biases start as independent draws from this symmetric range.
pub const INIT_LOW: f64 = -1.;
pub const INIT_HIGH: f64 = 1.;

/// Constant signal the bias weight multiplies on every update.
pub const BIAS_SIGNAL: f64 = 1.;

pub type LayerSchema = Vec<usize>;
pub type Web = Vec<Layer>;

/// One trainable layer: a dense weight matrix of shape (previous width,
/// this width), a bias per neuron, and the input/output rows captured by
/// the most recent forward pass.
#[derive(Debug, Clone)]
pub struct Layer {
    pub x: Array2<f64>,
    pub w: Array2<f64>,
    pub b: Array1<f64>,
    pub a: Array2<f64>,
}

impl Layer {
    fn new<R: Rng + ?Sized>(w_shape: (usize, usize), rng: &mut R) -> Layer {
        Layer {
            x: Array2::zeros((1, w_shape.0)),
            w: Array2::random_using(w_shape, Uniform::new(INIT_LOW, INIT_HIGH), rng),
            b: Array::random_using(w_shape.1, Uniform::new(INIT_LOW, INIT_HIGH), rng),
            a: Array2::zeros((1, w_shape.1)),
        }
    }

    pub fn forward(&mut self, x: Array2<f64>) -> Array2<f64> {
        let z = x.dot(&self.w) + &self.b;
        let a = z.mapv(f::sigmoid);
        self.x = x;
        self.a = a.clone();
        a
    }

    /// Consumes this layer's share of the error, updates weights and bias in
    /// place, and returns the error for the previous layer. The upstream
    /// error is computed against the pre-update weights.
    pub fn backward(&mut self, err: Array2<f64>, rate: f64) -> Array2<f64> {
        let delta = err * self.a.mapv(f::sigmoid_d);
        let upstream = delta.dot(&self.w.t());
        let grad_w = self.x.t().dot(&delta);

        self.w.scaled_add(rate, &grad_w);
        self.b
            .scaled_add(rate * BIAS_SIGNAL, &delta.index_axis(Axis(0), 0));

        upstream
    }
}

/// Feedforward sigmoid network. The input layer is a pass-through buffer and
/// owns no weights; every other layer is a [`Layer`] in the web.
#[derive(Debug, Clone)]
pub struct Network {
    schema: LayerSchema,
    web: Web,
}

impl Network {
    /// Builds a network from layer widths, input first. Widths are fixed for
    /// the life of the network.
    pub fn new(schema: LayerSchema) -> Result<Network, NetError> {
        Network::init(schema, &mut thread_rng())
    }

    /// Same as [`Network::new`] with a seeded generator, so two networks
    /// built from the same seed start from identical weights.
    pub fn seeded(schema: LayerSchema, seed: u64) -> Result<Network, NetError> {
        Network::init(schema, &mut StdRng::seed_from_u64(seed))
    }

    fn init<R: Rng + ?Sized>(schema: LayerSchema, rng: &mut R) -> Result<Network, NetError> {
        if schema.len() < 2 {
            return Err(NetError::TooFewLayers(schema.len()));
        }
        if let Some(ix) = schema.iter().position(|width| *width == 0) {
            return Err(NetError::EmptyLayer(ix));
        }

        let mut web = Web::new();
        let mut p_dim = schema[0];
        for width in schema[1..].iter() {
            web.push(Layer::new((p_dim, *width), rng));
            p_dim = *width;
        }

        Ok(Network { schema, web })
    }

    pub fn d_in(&self) -> usize {
        self.schema[0]
    }

    pub fn d_out(&self) -> usize {
        self.schema[self.schema.len() - 1]
    }

    pub fn schema(&self) -> &LayerSchema {
        &self.schema
    }

    /// Activates the web layer by layer and returns the output row.
    /// Deterministic for fixed weights; overwrites the per-layer activation
    /// buffers and nothing else.
    pub fn forward(&mut self, xv: &[f64]) -> Result<Array1<f64>, NetError> {
        if xv.len() != self.d_in() {
            return Err(NetError::Dimension {
                expected: self.d_in(),
                got: xv.len(),
            });
        }

        let mut x = Array1::from(xv.to_vec()).insert_axis(Axis(0));
        for layer in self.web.iter_mut() {
            x = layer.forward(x);
        }
        Ok(x.index_axis_move(Axis(0), 0))
    }

    /// One backpropagation sweep for an output error already expressed as
    /// expected minus actual, against the buffers captured by the last
    /// [`Network::forward`] call. The sweep is sequential from the last
    /// layer down; the error left over at the input layer is discarded.
    pub fn backward(&mut self, error: &[f64], rate: f64) -> Result<(), NetError> {
        if error.len() != self.d_out() {
            return Err(NetError::Dimension {
                expected: self.d_out(),
                got: error.len(),
            });
        }

        let mut err = Array1::from(error.to_vec()).insert_axis(Axis(0));
        for layer in self.web.iter_mut().rev() {
            err = layer.backward(err, rate);
        }
        Ok(())
    }

    pub fn get_trainer(&mut self) -> Trainer {
        Trainer::new(self)
    }
}
