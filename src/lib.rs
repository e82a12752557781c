pub mod cli;
pub mod convert;
pub mod error;
pub mod filter;
pub mod parser;
pub mod schema;
pub mod ui;
pub mod writer;

pub use cli::{Cli, Commands};
pub use error::{ConvertError, LoadError, LoadResult, PopulationError, RecordError};
pub use ui::{Phase, SilentUi, Ui, UiApp};
