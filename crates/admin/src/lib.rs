pub mod error;
pub mod sheet;

pub use error::{AdminError, Result};
pub use sheet::{
    loader::{ImportSummary, SheetLoader},
    models::ScoreSheet,
    validator::{SheetValidator, ValidationReport},
};
