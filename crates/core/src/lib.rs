pub mod chart;
pub mod color;
pub mod config;
pub mod export;
pub mod fetch;
pub mod hierarchy;
pub mod human;
pub mod label;
pub mod logging;
pub mod model;
pub mod search;
pub mod svg;
pub mod tooltip;
pub mod treemap;
pub mod view;

pub use chart::*;
pub use config::*;
pub use fetch::*;
pub use model::*;
