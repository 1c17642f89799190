#[macro_use]
extern crate tracing;

mod app;
mod errors;
mod logging;

pub use app::App;
pub use channel_insights_config::{
    Args,
    Command,
    Config,
};
pub use errors::init_errors;
pub use logging::init_logging;
