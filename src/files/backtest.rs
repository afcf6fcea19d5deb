use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Serialize;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// One predicted game of a backtest day
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BacktestRow {
    pub date: NaiveDate,
    pub home_team: String,
    pub visitor_team: String,
    pub predicted: Option<String>,
    pub winner: String,
    pub confidence: Option<f64>,
    pub correct: bool,
}

/// Write one day's rows to `<dir>/<day>.csv`, returning the file path
pub fn write_results(dir: &Path, day: NaiveDate, rows: &[BacktestRow]) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create backtest directory {}", dir.display()))?;

    let path = dir.join(format!("{}.csv", day.format("%Y-%m-%d")));
    let file = File::create(&path)
        .with_context(|| format!("Failed to create backtest file {}", path.display()))?;
    write_results_to(file, rows)?;

    Ok(path)
}

fn write_results_to<W: Write>(writer: W, rows: &[BacktestRow]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    for row in rows {
        writer.serialize(row).context("Failed to write backtest row")?;
    }
    writer.flush().context("Failed to flush backtest file")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_serialize_with_empty_prediction() {
        let day = NaiveDate::from_ymd_opt(2024, 11, 12).unwrap();
        let rows = vec![
            BacktestRow {
                date: day,
                home_team: "Hawks".to_string(),
                visitor_team: "Celtics".to_string(),
                predicted: Some("Celtics".to_string()),
                winner: "Hawks".to_string(),
                confidence: Some(0.75),
                correct: false,
            },
            BacktestRow {
                date: day,
                home_team: "Nets".to_string(),
                visitor_team: "Knicks".to_string(),
                predicted: None,
                winner: "Knicks".to_string(),
                confidence: None,
                correct: false,
            },
        ];

        let mut buffer = Vec::new();
        write_results_to(&mut buffer, &rows).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "date,home_team,visitor_team,predicted,winner,confidence,correct");
        assert_eq!(lines[1], "2024-11-12,Hawks,Celtics,Celtics,Hawks,0.75,false");
        assert_eq!(lines[2], "2024-11-12,Nets,Knicks,,Knicks,,false");
    }
}
