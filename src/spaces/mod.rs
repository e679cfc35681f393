//! Discrete observation and action spaces.
mod state;

pub use state::{Action, Inputs, Light, State};

use rand::Rng;
use thiserror::Error;

/// An indexed set of finitely many possiblities.
pub trait Indexed: Sized {
    /// The number of possible values this type can represent.
    const SIZE: usize;

    /// Convert into an index in `0..SIZE`.
    fn as_index(&self) -> usize;

    /// Create from an index.
    ///
    /// Returns `None` if `index >= SIZE`.
    fn from_index(index: usize) -> Option<Self>;
}

/// Iterate over every value of an indexed type in index order.
pub fn iter_indexed<T: Indexed>() -> impl Iterator<Item = T> {
    (0..T::SIZE).filter_map(T::from_index)
}

/// Sample a value of an indexed type uniformly at random.
pub fn sample_indexed<T: Indexed, R: Rng + ?Sized>(rng: &mut R) -> T {
    T::from_index(rng.gen_range(0..T::SIZE)).expect("every index below SIZE is valid")
}

/// A value outside of the closed category sets that make up a [`State`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidStateKind {
    #[error("unknown traffic light {0:?}")]
    UnknownLight(String),
    #[error("unknown action {0:?}")]
    UnknownAction(String),
    #[error("index {index} out of range for {size} values")]
    IndexOutOfRange { index: usize, size: usize },
}
