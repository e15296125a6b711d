pub mod coerce;
pub mod columns;
pub mod etl;
pub mod normalize;
pub mod pipeline;

pub use crate::domain::model::{RenderedFile, Table, TransformResult};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
