//! Summary statistics over the offline skill-gap export behind the dashboard.

use crate::analysis::{most_common, round_to, SkillFrequency};
use serde::Serialize;
use std::io::Read;
use std::path::Path;

const MISSING_SKILLS_COLUMN: &str = "missing_skills";

/// Skills listed in the dashboard's "most commonly missing" table.
pub const TOP_MISSING_LIMIT: usize = 10;

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("failed to read skill gap dataset: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid skill gap dataset: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub num_records: usize,
    pub avg_missing: f64,
    pub top_missing: Vec<SkillFrequency>,
}

impl DatasetSummary {
    fn unavailable(path: &Path) -> Self {
        Self {
            error: Some(format!("{} not found", path.display())),
            num_records: 0,
            avg_missing: 0.0,
            top_missing: Vec::new(),
        }
    }
}

/// Summarizes the dataset at `path`. A missing file is reported inside the
/// summary rather than as an error.
pub fn summarize_path(path: &Path) -> Result<DatasetSummary, DatasetError> {
    if !path.exists() {
        return Ok(DatasetSummary::unavailable(path));
    }

    let file = std::fs::File::open(path)?;
    summarize_reader(file)
}

pub fn summarize_reader<R: Read>(reader: R) -> Result<DatasetSummary, DatasetError> {
    let rows = missing_skills_per_row(reader)?;

    let num_records = rows.len();
    let avg_missing = if num_records == 0 {
        0.0
    } else {
        let total: usize = rows.iter().map(Vec::len).sum();
        round_to(total as f64 / num_records as f64, 2)
    };
    let top_missing = most_common(rows.into_iter().flatten(), TOP_MISSING_LIMIT);

    Ok(DatasetSummary {
        error: None,
        num_records,
        avg_missing,
        top_missing,
    })
}

fn missing_skills_per_row<R: Read>(reader: R) -> Result<Vec<Vec<String>>, DatasetError> {
    let mut csv_reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let column = csv_reader
        .headers()?
        .iter()
        .position(|header| header.trim() == MISSING_SKILLS_COLUMN);

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        let skills = column
            .and_then(|index| record.get(index))
            .map(parse_skill_list)
            .unwrap_or_default();
        rows.push(skills);
    }

    Ok(rows)
}

/// Decodes a list-like cell such as `["sql", "excel"]`.
///
/// Only cells that start with `[` are considered and anything that is not a
/// JSON array yields an empty list. Non-string items are kept in their JSON
/// rendering, so `[1, "sql"]` gives `["1", "sql"]`.
pub fn parse_skill_list(cell: &str) -> Vec<String> {
    let trimmed = cell.trim();
    if !trimmed.starts_with('[') {
        return Vec::new();
    }

    serde_json::from_str::<Vec<serde_json::Value>>(trimmed)
        .map(|items| items.into_iter().map(skill_name).collect())
        .unwrap_or_default()
}

fn skill_name(item: serde_json::Value) -> String {
    match item {
        serde_json::Value::String(name) => name,
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn ranked(summary: &DatasetSummary) -> Vec<(&str, usize)> {
        summary
            .top_missing
            .iter()
            .map(|entry| (entry.skill.as_str(), entry.count))
            .collect()
    }

    #[test]
    fn parses_json_list_cells_and_rejects_everything_else() {
        assert_eq!(parse_skill_list(r#" ["sql", "excel"] "#), vec!["sql", "excel"]);
        assert!(parse_skill_list("['sql', 'excel']").is_empty());
        assert!(parse_skill_list("sql, excel").is_empty());
        assert!(parse_skill_list("").is_empty());
        assert!(parse_skill_list("[broken").is_empty());
    }

    #[test]
    fn non_string_list_items_are_counted() {
        assert_eq!(parse_skill_list("[1, 2]"), vec!["1", "2"]);
        assert_eq!(parse_skill_list(r#"["sql", true, null]"#), vec!["sql", "true", "null"]);

        let csv = "missing_skills\n\"[1, \"\"sql\"\"]\"\n\"[1]\"\n";
        let summary = summarize_reader(csv.as_bytes()).expect("dataset parses");
        assert_eq!(summary.avg_missing, 1.5);
        assert_eq!(ranked(&summary), vec![("1", 2), ("sql", 1)]);
    }

    #[test]
    fn average_rounds_exact_halves_to_even() {
        let mut csv = String::from("missing_skills\n\"[\"\"sql\"\"]\"\n");
        for _ in 0..7 {
            csv.push_str("[]\n");
        }

        let summary = summarize_reader(csv.as_bytes()).expect("dataset parses");
        assert_eq!(summary.num_records, 8);
        assert_eq!(summary.avg_missing, 0.12);
    }

    #[test]
    fn summarizes_missing_skill_counts() {
        let csv = "candidate,missing_skills\n\
a,\"[\"\"sql\"\", \"\"excel\"\"]\"\n\
b,\"[\"\"excel\"\"]\"\n\
c,not-a-list\n\
d,\"[\"\"git\"\", \"\"sql\"\", \"\"tableau\"\"]\"\n";

        let summary = summarize_reader(csv.as_bytes()).expect("dataset parses");

        assert!(summary.error.is_none());
        assert_eq!(summary.num_records, 4);
        assert_eq!(summary.avg_missing, 1.5);
        assert_eq!(
            ranked(&summary),
            vec![("sql", 2), ("excel", 2), ("git", 1), ("tableau", 1)]
        );
    }

    #[test]
    fn dataset_without_missing_column_counts_rows_only() {
        let csv = "candidate,title\na,Analyst\nb,Engineer\n";
        let summary = summarize_reader(csv.as_bytes()).expect("dataset parses");

        assert_eq!(summary.num_records, 2);
        assert_eq!(summary.avg_missing, 0.0);
        assert!(summary.top_missing.is_empty());
    }

    #[test]
    fn empty_dataset_has_zero_average() {
        let summary = summarize_reader("candidate,missing_skills\n".as_bytes()).expect("parses");
        assert_eq!(summary.num_records, 0);
        assert_eq!(summary.avg_missing, 0.0);
    }

    #[test]
    fn top_missing_is_capped_at_ten() {
        let mut csv = String::from("missing_skills\n");
        for i in 0..12 {
            csv.push_str(&format!("\"[\"\"skill{i:02}\"\"]\"\n"));
        }

        let summary = summarize_reader(csv.as_bytes()).expect("dataset parses");
        assert_eq!(summary.top_missing.len(), TOP_MISSING_LIMIT);
        assert_eq!(summary.top_missing[0].skill, "skill00");
    }

    #[test]
    fn missing_file_is_reported_in_the_summary() {
        let summary =
            summarize_path(Path::new("./no-such-dataset.csv")).expect("missing file tolerated");

        assert_eq!(
            summary.error.as_deref(),
            Some("./no-such-dataset.csv not found")
        );
        assert_eq!(summary.num_records, 0);
        assert!(summary.top_missing.is_empty());
    }

    #[test]
    fn reads_dataset_from_disk() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "missing_skills").expect("write header");
        writeln!(file, "\"[\"\"docker\"\"]\"").expect("write row");

        let summary = summarize_path(file.path()).expect("dataset loads");
        assert_eq!(summary.num_records, 1);
        assert_eq!(summary.avg_missing, 1.0);
        assert_eq!(ranked(&summary), vec![("docker", 1)]);
    }
}
