pub mod cli;
pub mod error;
#[cfg(feature = "libraw")]
pub mod libraw;
pub mod pipeline;
pub mod processor;

pub use error::RcError;
pub use processor::{ImageInfo, OutputTarget, RawProcessor};
