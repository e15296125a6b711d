use crate::adapters::{loader, sink};
use crate::core::normalize::normalize;
use crate::core::{ConfigProvider, Pipeline, RenderedFile, Result, Storage, Table, TransformResult};

/// Spreadsheet in, normalized exports out.
///
/// `source` resolves the input path, `sink` receives the rendered files
/// (rooted at the configured output directory).
pub struct SpreadsheetPipeline<S: Storage, C: ConfigProvider> {
    source: S,
    sink: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> SpreadsheetPipeline<S, C> {
    pub fn new(source: S, sink: S, config: C) -> Self {
        Self {
            source,
            sink,
            config,
        }
    }

    fn output_location(&self, filename: &str) -> String {
        format!("{}/{}", self.config.output_path(), filename)
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for SpreadsheetPipeline<S, C> {
    async fn extract(&self) -> Result<Table> {
        tracing::info!("📂 Reading workbook: {}", self.config.input_path());
        let bytes = self.source.read_file(self.config.input_path()).await?;
        tracing::debug!("Workbook size: {} bytes", bytes.len());

        let table = loader::load_table(&bytes)?;
        tracing::info!(
            "📊 Loaded {} rows, columns: {:?}",
            table.row_count(),
            table.headers
        );
        Ok(table)
    }

    async fn transform(&self, table: Table) -> Result<TransformResult> {
        let output = normalize(&table, &self.config.normalize_options())?;

        let mut rendered = Vec::with_capacity(self.config.output_formats().len());
        for format in self.config.output_formats() {
            rendered.push(RenderedFile {
                filename: self.config.output_filename(*format),
                format: *format,
                data: sink::render(&output.records, *format)?,
            });
        }

        Ok(TransformResult { output, rendered })
    }

    async fn load(&self, result: TransformResult) -> Result<Vec<String>> {
        if let Some(archive_name) = self.config.compression_filename() {
            let zip_data = sink::bundle_zip(&result.rendered)?;
            tracing::debug!("Writing ZIP file ({} bytes) to storage", zip_data.len());
            self.sink.write_file(archive_name, &zip_data).await?;
            return Ok(vec![self.output_location(archive_name)]);
        }

        let mut written = Vec::with_capacity(result.rendered.len());
        for file in &result.rendered {
            tracing::debug!("Writing {} ({} bytes)", file.filename, file.data.len());
            self.sink.write_file(&file.filename, &file.data).await?;
            written.push(self.output_location(&file.filename));
        }
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Cell, NormalizeOptions, OutputFormat, PhonePolicy};
    use crate::utils::error::ConvertError;
    use rust_xlsxwriter::Workbook;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Arc::new(Mutex::new(HashMap::new())),
            }
        }

        async fn put_file(&self, path: &str, data: Vec<u8>) {
            self.files.lock().await.insert(path.to_string(), data);
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                ConvertError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct MockConfig {
        formats: Vec<OutputFormat>,
        compression: Option<String>,
        options: NormalizeOptions,
    }

    impl MockConfig {
        fn new(formats: Vec<OutputFormat>) -> Self {
            Self {
                formats,
                compression: None,
                options: NormalizeOptions::default(),
            }
        }
    }

    impl ConfigProvider for MockConfig {
        fn input_path(&self) -> &str {
            "alumnos.xlsx"
        }

        fn output_path(&self) -> &str {
            "test_output"
        }

        fn output_formats(&self) -> &[OutputFormat] {
            &self.formats
        }

        fn output_filename(&self, format: OutputFormat) -> String {
            format!("datos_fotografo.{}", format.extension())
        }

        fn compression_filename(&self) -> Option<&str> {
            self.compression.as_deref()
        }

        fn normalize_options(&self) -> NormalizeOptions {
            self.options
        }

        fn preview_rows(&self) -> usize {
            10
        }
    }

    fn workbook_bytes() -> Vec<u8> {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "Nombre y apellido").unwrap();
        sheet.write_string(0, 1, "DNI").unwrap();
        sheet.write_string(0, 2, "Celular").unwrap();
        sheet.write_string(1, 0, "Pérez, Juan").unwrap();
        sheet.write_number(1, 1, 30123456.0).unwrap();
        sheet.write_string(1, 2, "011-4444-5555").unwrap();
        workbook.save_to_buffer().unwrap()
    }

    fn table(headers: &[&str], rows: Vec<Vec<Cell>>) -> Table {
        Table::new(headers.iter().map(|h| h.to_string()).collect(), rows)
    }

    #[tokio::test]
    async fn test_extract_reads_workbook_from_source() {
        let source = MockStorage::new();
        source.put_file("alumnos.xlsx", workbook_bytes()).await;
        let pipeline =
            SpreadsheetPipeline::new(source, MockStorage::new(), MockConfig::new(vec![OutputFormat::Csv]));

        let table = pipeline.extract().await.unwrap();

        assert_eq!(table.headers, vec!["Nombre y apellido", "DNI", "Celular"]);
        assert_eq!(table.row_count(), 1);
    }

    #[tokio::test]
    async fn test_extract_missing_input_fails() {
        let pipeline = SpreadsheetPipeline::new(
            MockStorage::new(),
            MockStorage::new(),
            MockConfig::new(vec![OutputFormat::Csv]),
        );

        let result = pipeline.extract().await;
        assert!(matches!(result, Err(ConvertError::IoError(_))));
    }

    #[tokio::test]
    async fn test_transform_renders_each_format() {
        let pipeline = SpreadsheetPipeline::new(
            MockStorage::new(),
            MockStorage::new(),
            MockConfig::new(vec![OutputFormat::Csv, OutputFormat::Json]),
        );
        let input = table(
            &["Nombre y apellido", "DNI"],
            vec![vec![Cell::Text("Garcia, Ana".to_string()), Cell::Int(28444555)]],
        );

        let result = pipeline.transform(input).await.unwrap();

        assert_eq!(result.output.len(), 1);
        assert_eq!(result.rendered.len(), 2);
        assert_eq!(result.rendered[0].filename, "datos_fotografo.csv");
        assert_eq!(
            String::from_utf8(result.rendered[0].data.clone()).unwrap(),
            "nombre,apellido,dni,email,telefono\nAna,Garcia,28444555,,\n"
        );
        assert_eq!(result.rendered[1].filename, "datos_fotografo.json");
    }

    #[tokio::test]
    async fn test_transform_schema_error_produces_nothing() {
        let pipeline = SpreadsheetPipeline::new(
            MockStorage::new(),
            MockStorage::new(),
            MockConfig::new(vec![OutputFormat::Csv]),
        );
        let input = table(&["Nombre y apellido"], vec![]);

        let result = pipeline.transform(input).await;
        assert!(matches!(result, Err(ConvertError::SchemaError { .. })));
    }

    #[tokio::test]
    async fn test_transform_uses_configured_phone_policy() {
        let mut config = MockConfig::new(vec![OutputFormat::Csv]);
        config.options.phone_policy = PhonePolicy::PassthroughOnly;
        let pipeline = SpreadsheetPipeline::new(MockStorage::new(), MockStorage::new(), config);
        let input = table(
            &["Nombre y apellido", "DNI", "Celular"],
            vec![vec![
                Cell::Text("Garcia, Ana".to_string()),
                Cell::Int(1),
                Cell::Text("221-456".to_string()),
            ]],
        );

        let result = pipeline.transform(input).await.unwrap();
        assert_eq!(result.output.records[0].telefono, "");
    }

    #[tokio::test]
    async fn test_load_writes_every_rendered_file() {
        let sink = MockStorage::new();
        let pipeline = SpreadsheetPipeline::new(
            MockStorage::new(),
            sink.clone(),
            MockConfig::new(vec![OutputFormat::Csv, OutputFormat::Tsv]),
        );
        let input = table(&["Nombre y apellido", "DNI"], vec![]);
        let result = pipeline.transform(input).await.unwrap();

        let written = pipeline.load(result).await.unwrap();

        assert_eq!(
            written,
            vec![
                "test_output/datos_fotografo.csv".to_string(),
                "test_output/datos_fotografo.tsv".to_string()
            ]
        );
        assert_eq!(
            sink.get_file("datos_fotografo.csv").await.unwrap(),
            b"nombre,apellido,dni,email,telefono\n".to_vec()
        );
        assert!(sink.get_file("datos_fotografo.tsv").await.is_some());
    }

    #[tokio::test]
    async fn test_load_bundles_zip_when_compressed() {
        let sink = MockStorage::new();
        let mut config = MockConfig::new(vec![OutputFormat::Csv, OutputFormat::Json]);
        config.compression = Some("export.zip".to_string());
        let pipeline = SpreadsheetPipeline::new(MockStorage::new(), sink.clone(), config);
        let input = table(&["Nombre y apellido", "DNI"], vec![]);
        let result = pipeline.transform(input).await.unwrap();

        let written = pipeline.load(result).await.unwrap();

        assert_eq!(written, vec!["test_output/export.zip".to_string()]);
        assert!(sink.get_file("datos_fotografo.csv").await.is_none());

        let zip_bytes = sink.get_file("export.zip").await.unwrap();
        let mut archive = zip::ZipArchive::new(std::io::Cursor::new(zip_bytes)).unwrap();
        let mut file_names: Vec<String> = (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect();
        file_names.sort();
        assert_eq!(file_names, vec!["datos_fotografo.csv", "datos_fotografo.json"]);
    }
}
