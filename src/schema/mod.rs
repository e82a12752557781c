pub mod datasets;
pub mod tables;
pub mod types;

pub use datasets::*;
pub use tables::*;
pub use types::*;
