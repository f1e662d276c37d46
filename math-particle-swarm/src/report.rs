use crate::error::Result;
use crate::sweep::SweepRow;
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::Path;

/// One report line: `Population: P, Iterations: T, Best: b, Mean: m, StdDev: s`.
pub fn format_row(row: &SweepRow) -> String {
    format!(
        "Population: {}, Iterations: {}, Best: {:.6}, Mean: {:.6}, StdDev: {:.6}",
        row.population, row.iterations, row.summary.best, row.summary.mean, row.summary.stddev
    )
}

/// All rows, one per line, each terminated by a newline.
pub fn format_report(rows: &[SweepRow]) -> String {
    let mut out = String::new();
    for row in rows {
        out.push_str(&format_row(row));
        out.push('\n');
    }
    out
}

/// Writes the report to `path`, truncating it unless `append` is set.
pub fn write_report<P: AsRef<Path>>(path: P, rows: &[SweepRow], append: bool) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .append(append)
        .truncate(!append)
        .open(path)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(format_report(rows).as_bytes())?;
    writer.flush()?;
    Ok(())
}
