mod builder;
mod defaults;
mod file;

pub use builder::{ConfigOverrides, build_engine_config};
