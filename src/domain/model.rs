use serde::{Deserialize, Serialize};

/// Header of the normalized export, in emission order.
pub const OUTPUT_COLUMNS: [&str; 5] = ["nombre", "apellido", "dni", "email", "telefono"];

/// One spreadsheet cell as handed over by the input loader.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Int(i64),
    Bool(bool),
}

impl Cell {
    /// Missing-value marker: empty cells, blank text and NaN.
    pub fn is_missing(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            Cell::Number(n) => n.is_nan(),
            Cell::Int(_) | Cell::Bool(_) => false,
        }
    }

    /// Text rendering of the cell. Missing values render as `""`, never
    /// as a `nan`/`null` marker, and whole floats drop their `.0`.
    pub fn to_text(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(s) => s.clone(),
            Cell::Int(i) => i.to_string(),
            Cell::Number(n) => format_number(*n),
            Cell::Bool(b) => b.to_string(),
        }
    }
}

fn format_number(n: f64) -> String {
    if !n.is_finite() {
        return String::new();
    }
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

static EMPTY_CELL: Cell = Cell::Empty;

/// First sheet of an uploaded workbook: a header row plus data rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        Self { headers, rows }
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Cell at `column` of `row`; short rows read as empty.
    pub fn cell<'a>(&self, row: &'a [Cell], column: usize) -> &'a Cell {
        row.get(column).unwrap_or(&EMPTY_CELL)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRecord {
    pub nombre: String,
    pub apellido: String,
    pub dni: String,
    pub email: String,
    pub telefono: String,
}

impl ContactRecord {
    /// Field values in `OUTPUT_COLUMNS` order.
    pub fn fields(&self) -> [&str; 5] {
        [
            self.nombre.as_str(),
            self.apellido.as_str(),
            self.dni.as_str(),
            self.email.as_str(),
            self.telefono.as_str(),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NormalizeStats {
    pub rows_in: usize,
    pub rows_out: usize,
    pub dropped_rows: usize,
    pub defaulted_dni: usize,
    pub email_column: Option<String>,
    pub phone_column: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutputTable {
    pub records: Vec<ContactRecord>,
    pub stats: NormalizeStats,
}

impl OutputTable {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn preview(&self, rows: usize) -> &[ContactRecord] {
        &self.records[..rows.min(self.records.len())]
    }
}

/// How the `telefono` output column is filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum PhonePolicy {
    /// Pick the first header that looks like a phone column and rewrite
    /// its digits with the `1` prefix.
    #[default]
    DetectAndNormalize,
    /// Copy a column literally named `telefono` as text, else leave empty.
    PassthroughOnly,
}

/// When a row counts as empty and is removed from the export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum EmptyRowPolicy {
    /// Checks the normalized `dni`, which defaults to `"0"` and is never
    /// empty, so this never drops a row.
    #[default]
    PostDefault,
    /// Checks the source DNI cell before it is defaulted.
    PreDefault,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizeOptions {
    pub phone_policy: PhonePolicy,
    pub empty_row_policy: EmptyRowPolicy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Csv,
    Tsv,
    Json,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Tsv => "tsv",
            OutputFormat::Json => "json",
        }
    }
}

/// One serialized export, ready for the storage backend.
#[derive(Debug, Clone)]
pub struct RenderedFile {
    pub filename: String,
    pub format: OutputFormat,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub output: OutputTable,
    pub rendered: Vec<RenderedFile>,
}
