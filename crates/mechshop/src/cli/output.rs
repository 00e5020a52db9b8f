use crate::db::query::{display_value, QueryResult};
use crate::error::Result;
use comfy_table::{presets::UTF8_FULL_CONDENSED, ContentArrangement, Table};
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Jsonl,
    Csv,
}

pub struct OutputWriter<W: Write> {
    writer: W,
    format: OutputFormat,
    show_header: bool,
}

impl<W: Write> OutputWriter<W> {
    pub fn new(writer: W, format: OutputFormat) -> Self {
        Self {
            writer,
            format,
            show_header: true,
        }
    }

    pub fn with_header(mut self, show_header: bool) -> Self {
        self.show_header = show_header;
        self
    }

    /// Writes a query result in the configured format.
    pub fn write_result(&mut self, result: &QueryResult) -> Result<()> {
        match self.format {
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(&result.to_json_array())?;
                writeln!(self.writer, "{}", json)?;
            }
            OutputFormat::Jsonl => {
                for row in result.to_json_array() {
                    writeln!(self.writer, "{}", serde_json::to_string(&row)?)?;
                }
            }
            OutputFormat::Csv => {
                let mut csv_writer = csv::Writer::from_writer(&mut self.writer);
                if self.show_header {
                    csv_writer.write_record(&result.columns)?;
                }
                for row in &result.rows {
                    csv_writer.write_record(row.iter().map(display_value))?;
                }
                csv_writer.flush()?;
            }
            OutputFormat::Table => {
                if result.is_empty() {
                    writeln!(self.writer, "No results")?;
                    return Ok(());
                }
                let mut table = create_table();
                if self.show_header {
                    table.set_header(&result.columns);
                }
                for row in &result.rows {
                    table.add_row(row.iter().map(display_value));
                }
                writeln!(self.writer, "{}", table)?;
                writeln!(self.writer, "({} rows)", result.row_count())?;
            }
        }
        Ok(())
    }

    /// Writes serializable records; tables fall back to pretty JSON.
    pub fn write_records<T: Serialize>(&mut self, records: &[T]) -> Result<()> {
        match self.format {
            OutputFormat::Csv => {
                let mut csv_writer = csv::WriterBuilder::new()
                    .has_headers(self.show_header)
                    .from_writer(&mut self.writer);
                for record in records {
                    csv_writer.serialize(record)?;
                }
                csv_writer.flush()?;
            }
            OutputFormat::Jsonl => {
                for record in records {
                    writeln!(self.writer, "{}", serde_json::to_string(record)?)?;
                }
            }
            OutputFormat::Json | OutputFormat::Table => {
                writeln!(self.writer, "{}", serde_json::to_string_pretty(records)?)?;
            }
        }
        Ok(())
    }

    pub fn writeln(&mut self, text: &str) -> Result<()> {
        writeln!(self.writer, "{}", text)?;
        Ok(())
    }
}

pub fn create_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn sample() -> QueryResult {
        QueryResult {
            columns: vec!["fname".into(), "total_bill".into()],
            rows: vec![
                vec![Value::from("Ann  "), Value::from(420)],
                vec![Value::from("Bob"), Value::Null],
            ],
        }
    }

    fn render(format: OutputFormat, header: bool) -> String {
        let mut buf = Vec::new();
        OutputWriter::new(&mut buf, format)
            .with_header(header)
            .write_result(&sample())
            .unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn csv_output_trims_and_blanks_nulls() {
        assert_eq!(render(OutputFormat::Csv, true), "fname,total_bill\nAnn,420\nBob,\n");
        assert_eq!(render(OutputFormat::Csv, false), "Ann,420\nBob,\n");
    }

    #[test]
    fn jsonl_output_is_one_object_per_line() {
        let out = render(OutputFormat::Jsonl, true);
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("\"total_bill\":420"));
    }

    #[test]
    fn table_output_lists_rows() {
        let out = render(OutputFormat::Table, true);
        assert!(out.contains("fname"));
        assert!(out.contains("Ann"));
        assert!(out.contains("(2 rows)"));
    }

    #[derive(Serialize)]
    struct Loaded {
        table: &'static str,
        rows: usize,
    }

    fn render_records(format: OutputFormat, header: bool) -> String {
        let records = [
            Loaded { table: "Customer", rows: 2 },
            Loaded { table: "Car", rows: 3 },
        ];
        let mut buf = Vec::new();
        OutputWriter::new(&mut buf, format)
            .with_header(header)
            .write_records(&records)
            .unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn records_as_csv() {
        assert_eq!(
            render_records(OutputFormat::Csv, true),
            "table,rows\nCustomer,2\nCar,3\n"
        );
        assert_eq!(render_records(OutputFormat::Csv, false), "Customer,2\nCar,3\n");
    }

    #[test]
    fn records_as_jsonl() {
        assert_eq!(
            render_records(OutputFormat::Jsonl, true),
            "{\"table\":\"Customer\",\"rows\":2}\n{\"table\":\"Car\",\"rows\":3}\n"
        );
    }

    #[test]
    fn empty_table_says_so() {
        let mut buf = Vec::new();
        OutputWriter::new(&mut buf, OutputFormat::Table)
            .write_result(&QueryResult::default())
            .unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "No results\n");
    }
}
