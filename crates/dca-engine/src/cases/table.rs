use super::domain::{Case, ModelCase};
use super::parser::{parse_case, parse_model_case, RowView};
use crate::error::ScoringError;
use crate::prioritization::{self, PrioritizedCase};
use crate::scoring::{self, ScoredCase};
use std::io::{Read, Write};
use std::path::Path;

#[derive(Debug)]
pub enum CaseTableError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl std::fmt::Display for CaseTableError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CaseTableError::Io(err) => write!(f, "failed to access case table: {}", err),
            CaseTableError::Csv(err) => write!(f, "invalid case CSV data: {}", err),
        }
    }
}

impl std::error::Error for CaseTableError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CaseTableError::Io(err) => Some(err),
            CaseTableError::Csv(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for CaseTableError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for CaseTableError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Header-addressed case table.
///
/// Rows are kept as raw strings so columns the engine does not know about travel
/// through scoring untouched; typed records are produced on demand.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CaseTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl CaseTable {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CaseTableError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CaseTableError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = csv_reader
            .headers()?
            .iter()
            .map(|header| header.trim_start_matches('\u{feff}').to_string())
            .collect();

        let mut rows = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        Ok(Self { headers, rows })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column index for a header, matched case-insensitively.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers
            .iter()
            .position(|header| header.eq_ignore_ascii_case(name))
    }

    /// Typed heuristic-schema cases; the first malformed row aborts the whole table.
    pub fn cases(&self) -> Result<Vec<Case>, ScoringError> {
        self.row_views().map(|row| parse_case(&row)).collect()
    }

    /// Typed model-schema cases; the first malformed row aborts the whole table.
    pub fn model_cases(&self) -> Result<Vec<ModelCase>, ScoringError> {
        self.row_views().map(|row| parse_model_case(&row)).collect()
    }

    /// Copy of the table with `columns` overwritten in place, or appended when absent.
    ///
    /// `values` yields one cell per entry in `columns` for the row at the given index.
    pub fn with_columns<F>(&self, columns: &[&str], mut values: F) -> Self
    where
        F: FnMut(usize) -> Vec<String>,
    {
        let mut headers = self.headers.clone();
        let targets: Vec<usize> = columns
            .iter()
            .map(|name| match self.column(name) {
                Some(index) => index,
                None => {
                    headers.push((*name).to_string());
                    headers.len() - 1
                }
            })
            .collect();

        let rows = self
            .rows
            .iter()
            .enumerate()
            .map(|(index, row)| {
                let mut row = row.clone();
                row.resize(headers.len(), String::new());
                for (target, value) in targets.iter().zip(values(index)) {
                    row[*target] = value;
                }
                row
            })
            .collect();

        Self { headers, rows }
    }

    /// Heuristic scores written back positionally; `scored` must follow row order.
    pub fn with_scores(&self, scored: &[ScoredCase]) -> Self {
        self.with_columns(&scoring::DERIVED_COLUMNS, |index| {
            scored
                .get(index)
                .map(ScoredCase::derived_cells)
                .unwrap_or_default()
        })
    }

    pub fn with_priorities(&self, prioritized: &[PrioritizedCase]) -> Self {
        self.with_columns(&prioritization::DERIVED_COLUMNS, |index| {
            prioritized
                .get(index)
                .map(PrioritizedCase::derived_cells)
                .unwrap_or_default()
        })
    }

    pub fn write_to<W: Write>(&self, writer: W) -> Result<(), CaseTableError> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(&self.headers)?;
        for row in &self.rows {
            csv_writer.write_record(row)?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    pub fn write_path<P: AsRef<Path>>(&self, path: P) -> Result<(), CaseTableError> {
        let file = std::fs::File::create(path)?;
        self.write_to(file)
    }

    fn row_views(&self) -> impl Iterator<Item = RowView<'_>> {
        self.rows
            .iter()
            .enumerate()
            .map(move |(index, cells)| RowView::new(self, index, cells))
    }
}
