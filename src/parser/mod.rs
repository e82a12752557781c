pub mod population;
pub mod record;

pub use population::*;
pub use record::*;
