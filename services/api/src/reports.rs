use clap::Args;
use std::path::PathBuf;
use workforce_insights::config::AppConfig;
use workforce_insights::dataset::{self, DatasetSummary};
use workforce_insights::error::AppError;
use workforce_insights::insights::{
    InsightService, SkillComparisonReport, DEFAULT_LOCATION, DEFAULT_TITLE,
};

#[derive(Args, Debug, Default)]
pub(crate) struct DashboardArgs {
    /// Skill gap dataset to summarize (defaults to SKILL_DATASET_PATH)
    #[arg(long)]
    pub(crate) dataset: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct CompareArgs {
    /// Plain-text resume to compare
    #[arg(long)]
    pub(crate) resume: PathBuf,
    /// Job title used for the occupation and posting searches
    #[arg(long, default_value = DEFAULT_TITLE)]
    pub(crate) title: String,
    /// Location used for the posting search
    #[arg(long, default_value = DEFAULT_LOCATION)]
    pub(crate) location: String,
}

pub(crate) fn run_dashboard(args: DashboardArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let path = args.dataset.unwrap_or(config.dataset.path);

    let summary = dataset::summarize_path(&path)?;
    print!("{}", render_dashboard(&path, &summary));
    Ok(())
}

pub(crate) async fn run_compare(args: CompareArgs) -> Result<(), AppError> {
    let CompareArgs {
        resume,
        title,
        location,
    } = args;

    let config = AppConfig::load()?;
    let resume_text = std::fs::read_to_string(&resume)?;
    let insights = InsightService::from_config(&config)?;

    let report = insights
        .skill_comparison(&resume_text, &title, &location)
        .await;
    print!("{}", render_comparison(&title, &location, &report));
    Ok(())
}

fn render_dashboard(path: &std::path::Path, summary: &DatasetSummary) -> String {
    let mut out = String::new();
    out.push_str("Skill gap dataset\n");
    out.push_str(&format!("Source: {}\n", path.display()));

    if let Some(error) = &summary.error {
        out.push_str(&format!("Unavailable: {error}\n"));
        return out;
    }

    out.push_str(&format!(
        "Records: {} (avg {:.2} missing skills each)\n",
        summary.num_records, summary.avg_missing
    ));

    if summary.top_missing.is_empty() {
        out.push_str("\nMost commonly missing: none\n");
    } else {
        out.push_str("\nMost commonly missing\n");
        for entry in &summary.top_missing {
            out.push_str(&format!("- {}: {}\n", entry.skill, entry.count));
        }
    }

    out
}

fn render_comparison(title: &str, location: &str, report: &SkillComparisonReport) -> String {
    let mut out = String::new();
    out.push_str(&format!("Skill comparison for {title} ({location})\n"));
    out.push_str(&format!(
        "Coverage: {:.2}% of occupation skills\n",
        report.stats.overlap_pct
    ));

    for (heading, skills) in [
        ("Overlap", &report.overlap),
        ("Missing", &report.missing),
        ("Emerging in postings", &report.emerging),
    ] {
        if skills.is_empty() {
            out.push_str(&format!("\n{heading}: none\n"));
        } else {
            out.push_str(&format!("\n{heading}\n"));
            out.push_str(&format!("- {}\n", skills.join(", ")));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use workforce_insights::analysis::SkillFrequency;
    use workforce_insights::insights::ComparisonStats;

    #[test]
    fn dashboard_rendering_lists_top_skills() {
        let summary = DatasetSummary {
            error: None,
            num_records: 4,
            avg_missing: 1.5,
            top_missing: vec![
                SkillFrequency {
                    skill: "sql".to_string(),
                    count: 2,
                },
                SkillFrequency {
                    skill: "excel".to_string(),
                    count: 1,
                },
            ],
        };

        let text = render_dashboard(std::path::Path::new("data.csv"), &summary);
        assert!(text.contains("Records: 4 (avg 1.50 missing skills each)"));
        assert!(text.contains("- sql: 2\n- excel: 1"));
    }

    #[test]
    fn dashboard_rendering_reports_missing_dataset() {
        let path = std::path::Path::new("absent.csv");
        let summary = dataset::summarize_path(path).expect("missing file tolerated");
        let text = render_dashboard(path, &summary);
        assert!(text.contains("Unavailable: absent.csv not found"));
    }

    #[test]
    fn comparison_rendering_marks_empty_sections() {
        let report = SkillComparisonReport {
            overlap: vec!["python".to_string(), "sql".to_string()],
            missing: Vec::new(),
            emerging: vec!["airflow".to_string()],
            stats: ComparisonStats { overlap_pct: 66.67 },
        };

        let text = render_comparison("Data Analyst", "Remote", &report);
        assert!(text.starts_with("Skill comparison for Data Analyst (Remote)"));
        assert!(text.contains("Coverage: 66.67%"));
        assert!(text.contains("Overlap\n- python, sql"));
        assert!(text.contains("Missing: none"));
        assert!(text.contains("Emerging in postings\n- airflow"));
    }
}
