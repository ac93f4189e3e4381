#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]

mod tagged_index;
mod test_logger;

pub use random_test::*;
pub use tagged_index::*;
pub use test_logger::*;
