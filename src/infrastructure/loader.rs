//! CSV data loader.
//!
//! Reads the three tables of a run from a directory. Each file's first row is
//! a header and is skipped; columns are read by position:
//!
//! | file              | columns                                       |
//! |-------------------|-----------------------------------------------|
//! | `Investments.csv` | name, term (days), rate (% per year)          |
//! | `Needs.csv`       | name, amount, days until due, [due date]      |
//! | `Limits.csv`      | name, min, max                                |
//!
//! A need may leave "days until due" empty when it gives a `YYYY-MM-DD` due
//! date instead.

use crate::domain::{
    DataSource, PlannerError, RawData, RawInvestment, RawLimits, RawNeed, Result,
};
use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, Trim};
use std::path::PathBuf;
use std::str::FromStr;

pub const INVESTMENTS_FILE: &str = "Investments.csv";
pub const NEEDS_FILE: &str = "Needs.csv";
pub const LIMITS_FILE: &str = "Limits.csv";

#[derive(Debug, Clone)]
pub struct CsvDataSource {
    dir: PathBuf,
}

impl CsvDataSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn read_sheet(&self, file: &str) -> Result<Vec<Row>> {
        let path = self.dir.join(file);
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_path(&path)
            .map_err(|e| {
                PlannerError::DataSource(format!("cannot open {}: {}", path.display(), e))
            })?;

        let mut rows = Vec::new();
        for (i, record) in reader.records().enumerate() {
            // +2: one for the header, one for 1-based numbering
            let number = i + 2;
            let record = record.map_err(|e| {
                PlannerError::DataSource(format!("{} row {}: {}", file, number, e))
            })?;
            if record.iter().all(str::is_empty) {
                continue;
            }
            rows.push(Row {
                file: file.to_string(),
                number,
                record,
            });
        }

        tracing::debug!(file, rows = rows.len(), "sheet read");
        Ok(rows)
    }
}

impl DataSource for CsvDataSource {
    fn load(&self) -> Result<RawData> {
        let limits = self
            .read_sheet(LIMITS_FILE)?
            .iter()
            .map(|row| {
                Ok(RawLimits {
                    name: row.text(0)?,
                    min: row.number(1)?,
                    max: row.number(2)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let investments = self
            .read_sheet(INVESTMENTS_FILE)?
            .iter()
            .map(|row| {
                Ok(RawInvestment {
                    name: row.text(0)?,
                    term: row.days(1)?,
                    rate: row.number(2)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let needs = self
            .read_sheet(NEEDS_FILE)?
            .iter()
            .map(|row| {
                let need = RawNeed {
                    name: row.text(0)?,
                    amount: row.number(1)?,
                    days_until_due: row.optional(2, |row, idx| row.days(idx))?,
                    due_date: row.optional(3, |row, idx| row.date(idx))?,
                };
                if need.days_until_due.is_none() && need.due_date.is_none() {
                    return Err(row.error(2, "needs either days until due or a due date"));
                }
                Ok(need)
            })
            .collect::<Result<Vec<_>>>()?;

        tracing::info!(dir = %self.dir.display(), "data loaded");
        Ok(RawData {
            investments,
            needs,
            limits,
        })
    }
}

struct Row {
    file: String,
    number: usize,
    record: StringRecord,
}

impl Row {
    fn error(&self, column: usize, message: impl AsRef<str>) -> PlannerError {
        PlannerError::DataSource(format!(
            "{} row {} column {}: {}",
            self.file,
            self.number,
            column + 1,
            message.as_ref()
        ))
    }

    fn cell(&self, column: usize) -> Option<&str> {
        self.record.get(column).filter(|cell| !cell.is_empty())
    }

    fn text(&self, column: usize) -> Result<String> {
        self.cell(column)
            .map(str::to_string)
            .ok_or_else(|| self.error(column, "missing value"))
    }

    fn parse<T: FromStr>(&self, column: usize) -> Result<T>
    where
        T::Err: std::fmt::Display,
    {
        let raw = self
            .cell(column)
            .ok_or_else(|| self.error(column, "missing value"))?;
        raw.parse()
            .map_err(|e| self.error(column, format!("'{}': {}", raw, e)))
    }

    fn number(&self, column: usize) -> Result<f64> {
        self.parse(column)
    }

    /// Whole, non-negative day count; spreadsheet exports may write `30.0`
    fn days(&self, column: usize) -> Result<u32> {
        let value: f64 = self.parse(column)?;
        if value < 0.0 || value.fract() != 0.0 || value > u32::MAX as f64 {
            return Err(self.error(column, format!("'{}' is not a whole number of days", value)));
        }
        Ok(value as u32)
    }

    fn date(&self, column: usize) -> Result<NaiveDate> {
        let raw = self
            .cell(column)
            .ok_or_else(|| self.error(column, "missing value"))?;
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map_err(|e| self.error(column, format!("'{}': {}", raw, e)))
    }

    fn optional<T>(
        &self,
        column: usize,
        read: impl Fn(&Self, usize) -> Result<T>,
    ) -> Result<Option<T>> {
        match self.cell(column) {
            Some(_) => read(self, column).map(Some),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_data(investments: &str, needs: &str, limits: &str) -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(INVESTMENTS_FILE), investments).unwrap();
        fs::write(dir.path().join(NEEDS_FILE), needs).unwrap();
        fs::write(dir.path().join(LIMITS_FILE), limits).unwrap();
        dir
    }

    #[test]
    fn loads_positional_columns_and_skips_header() {
        let dir = write_data(
            "Cuenta,Plazo,Tasa\nSupertasas,30,4.5\nKubo,360.0,10\n",
            "Nombre,Monto,Dias,Fecha\nCarro,200000,360,\nNavidad,15000,,2024-12-24\n",
            "Cuenta,Min,Max\nSupertasas,0,120000\nKubo,0,120000\n",
        );

        let data = CsvDataSource::new(dir.path()).load().unwrap();

        assert_eq!(data.investments.len(), 2);
        assert_eq!(data.investments[1].term, 360);
        assert_eq!(data.investments[0].rate, 4.5);
        assert_eq!(data.needs[0].days_until_due, Some(360));
        assert_eq!(data.needs[1].days_until_due, None);
        assert_eq!(data.needs[1].due_date, NaiveDate::from_ymd_opt(2024, 12, 24));
        assert_eq!(data.limits[1].max, 120_000.0);
    }

    #[test]
    fn missing_file_is_a_data_source_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = CsvDataSource::new(dir.path()).load().unwrap_err();
        assert!(matches!(err, PlannerError::DataSource(msg) if msg.contains(LIMITS_FILE)));
    }

    #[test]
    fn bad_cell_names_file_and_row() {
        let dir = write_data(
            "Cuenta,Plazo,Tasa\nKubo,treinta,10\n",
            "Nombre,Monto,Dias\n",
            "Cuenta,Min,Max\nKubo,0,1\n",
        );

        match CsvDataSource::new(dir.path()).load().unwrap_err() {
            PlannerError::DataSource(msg) => {
                assert!(msg.contains("Investments.csv row 2 column 2"), "{msg}")
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn need_without_due_information_is_rejected() {
        let dir = write_data(
            "Cuenta,Plazo,Tasa\n",
            "Nombre,Monto,Dias\nCarro,100,\n",
            "Cuenta,Min,Max\n",
        );
        assert!(CsvDataSource::new(dir.path()).load().is_err());
    }
}
