pub mod algorithms;
pub mod core;
pub mod error;
pub mod harness;
pub mod interner;
pub mod io;
pub mod map;
pub mod report;
pub mod storage;
pub mod tasks;
pub mod traits;
pub mod visual;
pub mod wrappers;

pub use algorithms::*;
pub use core::*;
pub use error::*;
pub use harness::*;
pub use interner::*;
pub use io::*;
pub use map::*;
pub use report::ReportDisplay;
pub use storage::*;
pub use tasks::*;
pub use traits::*;
pub use wrappers::*;
