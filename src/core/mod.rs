pub mod engine;
pub mod matcher;
pub mod normalizer;
pub mod pipeline;
pub mod records;

pub use crate::domain::model::{Catalog, MatchReport};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
