//! Library side of the `osgrid-url` tool: config loading and output.

pub mod config;
pub mod output;

pub use config::{expand_env_vars, load_config, Overrides};
pub use output::{resolve_block, write_tiles, TileRecord};
