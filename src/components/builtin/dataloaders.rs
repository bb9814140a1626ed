//! CSV-backed dataloader.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::components::{
    self, Dataloader, DataloaderCore, Params, PreprocessorSlot,
};
use crate::data::{Cell, Frame, Value};
use crate::error::ComponentError;

/// Loads a CSV file into a tabular frame.
///
/// The toy loader reads the same file for every split; cells are typed by
/// parse (int, float, bool, else string) and numeric columns mixing ints and
/// floats are promoted to float.
pub struct CsvDataloader {
    core: DataloaderCore,
    path: PathBuf,
    split: Option<String>,
    batch_size: usize,
    shuffle: bool,
}

impl CsvDataloader {
    /// Creates a loader for the given file.
    pub fn new(path: impl Into<PathBuf>, preprocessors: Vec<PreprocessorSlot>) -> Self {
        Self {
            core: DataloaderCore::new(preprocessors),
            path: path.into(),
            split: None,
            batch_size: 32,
            shuffle: false,
        }
    }

    /// The split selected by the last `setup` call, if any.
    pub fn split(&self) -> Option<&str> {
        self.split.as_deref()
    }

    /// The configured batch size.
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Whether shuffling was requested.
    pub fn shuffle(&self) -> bool {
        self.shuffle
    }
}

impl Dataloader for CsvDataloader {
    fn core(&self) -> &DataloaderCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut DataloaderCore {
        &mut self.core
    }

    fn load_raw(&mut self, split: &str) -> Result<Value, ComponentError> {
        debug!(split, path = %self.path.display(), "loading csv");
        Ok(Value::Frame(read_csv(&self.path)?))
    }

    fn setup(&mut self, params: &Params) -> Result<(), ComponentError> {
        if let Some(split) = components::optional_str(params, "split")? {
            self.split = Some(split);
        }
        if let Some(batch_size) = components::optional_usize(params, "batch_size")? {
            self.batch_size = batch_size;
        }
        if let Some(shuffle) = components::optional_bool(params, "shuffle")? {
            self.shuffle = shuffle;
        }
        Ok(())
    }

    fn fetch(&self) -> Result<Option<Value>, ComponentError> {
        Ok(Some(Value::Frame(read_csv(&self.path)?)))
    }
}

/// Factory registered as `builtin.dataloaders.CsvDataloader`.
///
/// Parameter contract: `filepath` (string, required).
pub fn make_csv_dataloader(
    params: &Params,
    preprocessors: Vec<PreprocessorSlot>,
) -> Result<Box<dyn Dataloader>, ComponentError> {
    let filepath = components::require_str(params, "filepath")?;
    Ok(Box::new(CsvDataloader::new(filepath, preprocessors)))
}

fn read_csv(path: &Path) -> Result<Frame, ComponentError> {
    let contents = fs::read_to_string(path)?;
    let mut lines = contents.lines().filter(|line| !line.trim().is_empty());
    let header = lines
        .next()
        .ok_or_else(|| ComponentError::Failed(format!("empty CSV file: {}", path.display())))?;
    let names: Vec<&str> = header.split(',').map(str::trim).collect();

    let mut columns: Vec<Vec<Cell>> = vec![Vec::new(); names.len()];
    for (offset, line) in lines.enumerate() {
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        if fields.len() != names.len() {
            return Err(ComponentError::Failed(format!(
                "{}:{}: expected {} fields, found {}",
                path.display(),
                offset + 2,
                names.len(),
                fields.len()
            )));
        }
        for (column, field) in columns.iter_mut().zip(&fields) {
            column.push(parse_cell(field));
        }
    }

    let mut frame = Frame::new();
    for (name, cells) in names.into_iter().zip(columns) {
        frame.push_column(name, promote_numeric(cells))?;
    }
    Ok(frame)
}

fn parse_cell(field: &str) -> Cell {
    if field.is_empty() {
        return Cell::Null;
    }
    if let Ok(i) = field.parse::<i64>() {
        return Cell::Int(i);
    }
    if let Ok(f) = field.parse::<f64>() {
        return Cell::Float(f);
    }
    match field {
        "true" | "True" => Cell::Bool(true),
        "false" | "False" => Cell::Bool(false),
        _ => Cell::Str(field.to_string()),
    }
}

/// Columns mixing ints and floats are read as float columns, matching the
/// column-wise coercion of conventional CSV readers.
fn promote_numeric(cells: Vec<Cell>) -> Vec<Cell> {
    let has_float = cells.iter().any(|c| matches!(c, Cell::Float(_)));
    let has_int = cells.iter().any(|c| matches!(c, Cell::Int(_)));
    let numeric_only = cells
        .iter()
        .all(|c| matches!(c, Cell::Int(_) | Cell::Float(_) | Cell::Null));
    if !(has_float && has_int && numeric_only) {
        return cells;
    }
    cells
        .into_iter()
        .map(|c| match c {
            Cell::Int(i) => Cell::Float(i as f64),
            other => other,
        })
        .collect()
}
