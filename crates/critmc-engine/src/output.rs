//! Progress and result writers.
//!
//! All writers take any `io::Write` sink, so tests assert against
//! `Vec<u8>` and production writes through `BufWriter<File>`. Column
//! layout follows
//! the classic criticality status table: batch, batch k-effective,
//! running mean, 15 characters each, left-aligned.

use std::io::{self, Write};

/// Width of each progress column.
const COL: usize = 15;

/// Write the progress header line.
///
/// # Errors
///
/// Propagates sink I/O failures.
pub fn write_progress_header(sink: &mut dyn Write) -> io::Result<()> {
    writeln!(sink, "{:<COL$} {:<COL$} {:<COL$}", "BATCH", "KEFF", "MEAN KEFF")
}

/// Write one progress row.
///
/// `active_batch` is the 1-based active batch number, or `None` before
/// the active window; `mean` is the running mean, or `None` while no
/// active sample exists. Both print as `-` when absent.
///
/// # Errors
///
/// Propagates sink I/O failures.
pub fn write_progress_row(
    sink: &mut dyn Write,
    active_batch: Option<usize>,
    keff_batch: f64,
    mean: Option<f64>,
) -> io::Result<()> {
    let batch_col = match active_batch {
        Some(b) => b.to_string(),
        None => "-".to_string(),
    };
    let mean_col = match mean {
        Some(m) => format!("{m:.6}"),
        None => "-".to_string(),
    };
    writeln!(sink, "{batch_col:<COL$} {keff_batch:<COL$.6} {mean_col:<COL$}")
}

/// Write the per-active-batch k-effective series, one value per line.
///
/// # Errors
///
/// Propagates sink I/O failures.
pub fn write_keff_series(sink: &mut dyn Write, series: &[f64]) -> io::Result<()> {
    for keff in series {
        writeln!(sink, "{keff:.6}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_names_three_columns() {
        let mut buf = Vec::new();
        write_progress_header(&mut buf).unwrap();
        let line = String::from_utf8(buf).unwrap();
        assert!(line.starts_with("BATCH"));
        assert!(line.contains("KEFF"));
        assert!(line.contains("MEAN KEFF"));
    }

    #[test]
    fn inactive_row_uses_placeholders() {
        let mut buf = Vec::new();
        write_progress_row(&mut buf, None, 1.023456, None).unwrap();
        let line = String::from_utf8(buf).unwrap();
        let fields: Vec<&str> = line.split_whitespace().collect();
        assert_eq!(fields, vec!["-", "1.023456", "-"]);
    }

    #[test]
    fn active_row_carries_index_and_mean() {
        let mut buf = Vec::new();
        write_progress_row(&mut buf, Some(3), 0.998, Some(1.001)).unwrap();
        let line = String::from_utf8(buf).unwrap();
        let fields: Vec<&str> = line.split_whitespace().collect();
        assert_eq!(fields, vec!["3", "0.998000", "1.001000"]);
    }

    #[test]
    fn series_is_one_value_per_line() {
        let mut buf = Vec::new();
        write_keff_series(&mut buf, &[1.0, 0.95, 1.05]).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().collect::<Vec<_>>(), vec!["1.000000", "0.950000", "1.050000"]);
    }
}
