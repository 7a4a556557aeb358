pub mod args;
pub mod progress;

pub use args::{WithConfig, WithEndpoints, WithProgressConfig};
pub use progress::{ProgressManager, colors, prefixes, templates};
