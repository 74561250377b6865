pub mod azure;
pub mod error;
pub mod google;
pub mod segment;

pub use azure::*;
pub use error::*;
pub use google::*;
pub use segment::*;
