use crate::core::Pipeline;
use crate::domain::model::{ContactRecord, NormalizeStats};
use crate::utils::error::Result;

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub outputs: Vec<String>,
    pub stats: NormalizeStats,
    pub preview: Vec<ContactRecord>,
}

pub struct ConvertEngine<P: Pipeline> {
    pipeline: P,
    preview_rows: usize,
}

impl<P: Pipeline> ConvertEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self {
            pipeline,
            preview_rows: 0,
        }
    }

    /// Keep the first `rows` normalized records in the run summary.
    pub fn with_preview(mut self, rows: usize) -> Self {
        self.preview_rows = rows;
        self
    }

    pub async fn run(&self) -> Result<RunSummary> {
        tracing::info!("Starting conversion...");

        let table = self.pipeline.extract().await?;
        tracing::info!("Extracted {} rows", table.row_count());

        let transformed = self.pipeline.transform(table).await?;
        tracing::info!("Transformed {} records", transformed.output.len());

        let stats = transformed.output.stats.clone();
        let preview = transformed.output.preview(self.preview_rows).to_vec();

        let outputs = self.pipeline.load(transformed).await?;
        for output in &outputs {
            tracing::info!("Output saved to: {}", output);
        }

        Ok(RunSummary {
            outputs,
            stats,
            preview,
        })
    }
}
