//! Binary checkpoint serialization for distributed training rounds.
//!
//! Layers write themselves to a shared stream as a sequence of integers,
//! booleans (presence flags for optional sub-layers), and weight arrays. A
//! [`SerializationType`] tag is threaded through every nested write/read
//! call so one layout serves weight checkpoints, gradient shipping between
//! workers, and full model-spec dumps.

use std::io::{Read, Write};

use crate::error::{Result, WidenetError};

/// What a checkpoint stream carries.
///
/// The orchestrator writes the tag's stable integer value at the head of
/// its own streams; layers never write it themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SerializationType {
    /// Learned weights only
    Weights,

    /// Accumulated gradients, for aggregation across workers
    Gradients,

    /// Full model topology plus weights
    ModelSpec,
}

impl SerializationType {
    /// Stable integer value for stream headers.
    pub fn value(&self) -> i32 {
        match self {
            SerializationType::Weights => 0,
            SerializationType::Gradients => 1,
            SerializationType::ModelSpec => 2,
        }
    }

    /// Decode a stream-header value. Unknown values are a load error;
    /// checkpoint corruption is fatal to the load operation.
    pub fn from_value(value: i32) -> Result<Self> {
        match value {
            0 => Ok(SerializationType::Weights),
            1 => Ok(SerializationType::Gradients),
            2 => Ok(SerializationType::ModelSpec),
            other => Err(WidenetError::InvalidSerializationType(other)),
        }
    }
}

/// Binary write/read contract shared by every layer.
///
/// `read_fields` mutates an existing instance in place (sizing weight
/// arrays from the stream) rather than constructing a fresh one, so a
/// worker can refresh its model between training rounds without rebuilding
/// the topology.
pub trait Checkpoint {
    fn write_to<W: Write>(&self, out: &mut W, ty: SerializationType) -> Result<()>;

    fn read_fields<R: Read>(&mut self, input: &mut R, ty: SerializationType) -> Result<()>;
}
