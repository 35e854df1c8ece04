mod config_error;
mod load_error;

pub use config_error::*;
pub use load_error::*;
