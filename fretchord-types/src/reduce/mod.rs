//! Pure state-mutation reducers.
//!
//! Reducers only touch the state they are given. Recognition is a read of
//! that state and happens elsewhere.

mod shape;

pub use shape::reduce_shape;
