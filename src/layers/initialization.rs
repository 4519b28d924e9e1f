use ndarray::{Array1, Array2};
use ndarray_rand::rand_distr::{Normal, Uniform};
use ndarray_rand::RandomExt;
use rand::Rng;

/// Weight initialization strategies
///
/// Each strategy can produce a scalar, a 1-D vector, or a 2-D matrix, so
/// every wide-part weight shape (bias scalar, field weight vector, dense
/// weight matrix) initializes through the same policy. The wide part of a
/// model conventionally starts from `Zeros`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WeightInit {
    /// All zeros
    Zeros,

    /// All ones
    Ones,

    /// Uniform distribution with custom range
    Uniform { min: f32, max: f32 },

    /// Normal distribution with custom mean and std
    Normal { mean: f32, std: f32 },

    /// Xavier/Glorot uniform initialization
    XavierUniform,

    /// Xavier/Glorot normal initialization
    XavierNormal,

    /// He/Kaiming uniform initialization
    HeUniform,

    /// He/Kaiming normal initialization
    HeNormal,
}

impl WeightInit {
    /// Initialize a single scalar weight
    pub fn init_scalar(&self) -> f32 {
        let mut rng = rand::thread_rng();
        match self {
            WeightInit::Zeros => 0.0,
            WeightInit::Ones => 1.0,
            WeightInit::Uniform { min, max } => rng.sample(Uniform::new(*min, *max)),
            WeightInit::Normal { mean, std } => rng.sample(Normal::new(*mean, *std).unwrap()),
            // fan_in = fan_out = 1 for a lone scalar
            WeightInit::XavierUniform => {
                let limit = (6.0f32 / 2.0).sqrt();
                rng.sample(Uniform::new(-limit, limit))
            }
            WeightInit::XavierNormal => {
                let std = (2.0f32 / 2.0).sqrt();
                rng.sample(Normal::new(0.0, std).unwrap())
            }
            WeightInit::HeUniform => {
                let limit = 6.0f32.sqrt();
                rng.sample(Uniform::new(-limit, limit))
            }
            WeightInit::HeNormal => {
                let std = 2.0f32.sqrt();
                rng.sample(Normal::new(0.0, std).unwrap())
            }
        }
    }

    /// Initialize a 1-D weight vector of the given length
    pub fn init_vector(&self, length: usize) -> Array1<f32> {
        let fan_in = length;
        match self {
            WeightInit::Zeros => Array1::zeros(length),

            WeightInit::Ones => Array1::ones(length),

            WeightInit::Uniform { min, max } => {
                Array1::random(length, Uniform::new(*min, *max))
            }

            WeightInit::Normal { mean, std } => {
                Array1::random(length, Normal::new(*mean, *std).unwrap())
            }

            WeightInit::XavierUniform => {
                let limit = (6.0 / (fan_in + 1) as f32).sqrt();
                Array1::random(length, Uniform::new(-limit, limit))
            }

            WeightInit::XavierNormal => {
                let std = (2.0 / (fan_in + 1) as f32).sqrt();
                Array1::random(length, Normal::new(0.0, std).unwrap())
            }

            WeightInit::HeUniform => {
                let limit = (6.0 / fan_in as f32).sqrt();
                Array1::random(length, Uniform::new(-limit, limit))
            }

            WeightInit::HeNormal => {
                let std = (2.0 / fan_in as f32).sqrt();
                Array1::random(length, Normal::new(0.0, std).unwrap())
            }
        }
    }

    /// Initialize a 2-D weight matrix with the given rows and columns
    pub fn init_matrix(&self, rows: usize, cols: usize) -> Array2<f32> {
        let (fan_in, fan_out) = (rows, cols);
        let shape = (rows, cols);

        match self {
            WeightInit::Zeros => Array2::zeros(shape),

            WeightInit::Ones => Array2::ones(shape),

            WeightInit::Uniform { min, max } => {
                Array2::random(shape, Uniform::new(*min, *max))
            }

            WeightInit::Normal { mean, std } => {
                Array2::random(shape, Normal::new(*mean, *std).unwrap())
            }

            WeightInit::XavierUniform => {
                let limit = (6.0 / (fan_in + fan_out) as f32).sqrt();
                Array2::random(shape, Uniform::new(-limit, limit))
            }

            WeightInit::XavierNormal => {
                let std = (2.0 / (fan_in + fan_out) as f32).sqrt();
                Array2::random(shape, Normal::new(0.0, std).unwrap())
            }

            WeightInit::HeUniform => {
                let limit = (6.0 / fan_in as f32).sqrt();
                Array2::random(shape, Uniform::new(-limit, limit))
            }

            WeightInit::HeNormal => {
                let std = (2.0 / fan_in as f32).sqrt();
                Array2::random(shape, Normal::new(0.0, std).unwrap())
            }
        }
    }
}
