//! Identifiers and the weight trait shared by every storage.

use std::fmt::{Debug, Display};

/// Dense node index.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub usize);

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeId(pub usize);

/// Numeric arc weight.
pub trait Weight:
    Copy
    + PartialOrd
    + std::ops::Add<Output = Self>
    + std::ops::Sub<Output = Self>
    + Debug
    + Display
    + Default
    + Send
    + Sync
    + 'static
{
    fn zero() -> Self;
    fn one() -> Self;
    fn as_f64(self) -> f64;
}

impl Weight for i64 {
    fn zero() -> Self {
        0
    }
    fn one() -> Self {
        1
    }
    fn as_f64(self) -> f64 {
        self as f64
    }
}
