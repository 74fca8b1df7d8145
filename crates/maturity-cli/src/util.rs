use std::{
    collections::BTreeMap,
    fs::File,
    io::{self, BufWriter, StdoutLock, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context;
use maturity_table::{columns::ColumnMapping, record::RawRow, table::Table};
use serde_json::Value;

#[derive(Debug)]
pub enum Output {
    Stdout {
        writer: StdoutLock<'static>,
    },
    File {
        writer: BufWriter<File>,
        path: PathBuf,
    },
}

impl Output {
    pub fn save_json<T>(value: &T, output_path: Option<PathBuf>) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        let mut output = Output::from_output_path(output_path)?;
        output.write_json(value)
    }

    pub fn from_output_path(output_path: Option<PathBuf>) -> anyhow::Result<Self> {
        match output_path {
            Some(path) => Output::open(path),
            None => Ok(Output::stdout()),
        }
    }

    pub fn stdout() -> Self {
        Output::Stdout {
            writer: io::stdout().lock(),
        }
    }

    pub fn open(path: PathBuf) -> anyhow::Result<Self> {
        let file = File::create(&path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Ok(Output::File {
            writer: BufWriter::new(file),
            path,
        })
    }

    pub fn display_path(&self) -> String {
        match self {
            Output::Stdout { .. } => "stdout".to_string(),
            Output::File { path, .. } => path.display().to_string(),
        }
    }

    pub fn write_json<T>(&mut self, value: T) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        serde_json::to_writer_pretty(&mut *self, &value)
            .with_context(|| format!("Failed to write JSON to {}", self.display_path()))?;
        writeln!(&mut *self).with_context(|| {
            format!(
                "Failed to write newline after JSON to {}",
                self.display_path()
            )
        })?;
        self.flush()
            .with_context(|| format!("Failed to flush output to {}", self.display_path()))?;
        tracing::info!(output = %self.display_path(), "wrote JSON output");
        Ok(())
    }
}

impl io::Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Stdout { writer } => writer.write(buf),
            Output::File { writer, .. } => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Stdout { writer } => writer.flush(),
            Output::File { writer, .. } => writer.flush(),
        }
    }
}

pub fn read_json_file<T, P>(file_kind: &str, path: P) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open {} file: {}", file_kind, path.display()))?;

    tracing::debug!(kind = file_kind, path = %path.display(), "reading JSON file");
    let reader = io::BufReader::new(file);
    let value = serde_json::from_reader(reader).with_context(|| {
        format!(
            "Failed to parse {} JSON file: {}",
            file_kind,
            path.display()
        )
    })?;

    Ok(value)
}

/// Input table and its column configuration, shared by the table commands.
#[derive(Default, Debug, Clone, clap::Args)]
pub struct TableArg {
    /// JSON array of row objects
    input: PathBuf,
    /// JSON column mapping overriding the default column names
    #[arg(long)]
    columns: Option<PathBuf>,
}

impl TableArg {
    pub fn load(&self) -> anyhow::Result<Table> {
        let columns = match &self.columns {
            Some(path) => read_json_file("column mapping", path)?,
            None => ColumnMapping::default(),
        };
        let rows = read_rows_file(&self.input)?;
        eprintln!("Normalizing {} rows...", rows.len());
        Ok(Table::normalize(&rows, &columns))
    }
}

/// Read raw rows from a JSON file
///
/// The file holds an array of objects. String cells are kept as they are,
/// numbers and booleans are rendered as text, and `null` cells are treated as
/// absent.
///
/// # Errors
///
/// Returns error if the file cannot be opened or is not an array of objects
pub fn read_rows_file<P>(path: P) -> anyhow::Result<Vec<RawRow>>
where
    P: AsRef<Path>,
{
    let rows: Vec<BTreeMap<String, Value>> = read_json_file("rows", path)?;
    Ok(rows.into_iter().map(raw_row_from_json).collect())
}

fn raw_row_from_json(row: BTreeMap<String, Value>) -> RawRow {
    row.into_iter()
        .filter_map(|(column, value)| {
            let cell = match value {
                Value::Null => return None,
                Value::String(s) => s,
                other => other.to_string(),
            };
            Some((column, cell))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_raw_row_from_json() {
        let row: BTreeMap<String, Value> = serde_json::from_value(json!({
            "biotoolsID": "tool",
            "maturity": null,
            "num_commits": 12,
            "repo.forks_count": "3",
        }))
        .unwrap();
        let raw = raw_row_from_json(row);
        assert_eq!(raw.get("biotoolsID").map(String::as_str), Some("tool"));
        assert_eq!(raw.get("maturity"), None);
        assert_eq!(raw.get("num_commits").map(String::as_str), Some("12"));
        assert_eq!(raw.get("repo.forks_count").map(String::as_str), Some("3"));
    }

    #[test]
    fn test_save_json_to_file() {
        let path = std::env::temp_dir().join(format!("maturity-cli-{}.json", std::process::id()));
        Output::save_json(&json!({ "accuracy": 0.75 }), Some(path.clone())).unwrap();
        let value: Value = read_json_file("report", &path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(value["accuracy"], 0.75);
    }
}
