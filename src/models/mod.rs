pub mod boundary;
pub mod classification;
pub mod soil;
pub mod summary;

pub use boundary::*;
pub use classification::*;
pub use soil::*;
pub use summary::*;
