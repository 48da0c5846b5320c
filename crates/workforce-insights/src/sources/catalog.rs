use super::{CourseLookup, SourceError};
use crate::analysis::{Course, CourseDuration};
use async_trait::async_trait;
use serde::{Deserialize, Deserializer};
use std::io::Read;
use std::path::Path;
use tracing::info;

/// Course catalog loaded once from a `skill,title,provider,url,duration` CSV.
#[derive(Debug, Clone, Default)]
pub struct CsvCourseCatalog {
    entries: Vec<CatalogEntry>,
}

#[derive(Debug, Clone)]
struct CatalogEntry {
    skill: String,
    title_lower: String,
    course: Course,
}

#[derive(Debug, Deserialize)]
struct CatalogRow {
    skill: String,
    title: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    provider: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    url: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    duration: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

impl CsvCourseCatalog {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, SourceError> {
        let file = std::fs::File::open(path.as_ref())?;
        let catalog = Self::from_reader(file)?;
        info!(
            path = %path.as_ref().display(),
            courses = catalog.len(),
            "loaded course catalog"
        );
        Ok(catalog)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, SourceError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut entries = Vec::new();

        for record in csv_reader.deserialize::<CatalogRow>() {
            let row = record?;
            if row.title.is_empty() {
                continue;
            }

            entries.push(CatalogEntry {
                skill: row.skill.to_lowercase(),
                title_lower: row.title.to_lowercase(),
                course: Course {
                    title: row.title,
                    provider: row.provider,
                    url: row.url,
                    duration: row.duration.map(CourseDuration::Text),
                },
            });
        }

        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Exact skill matches first, then courses whose title mentions the skill.
    pub fn lookup(&self, skill: &str, limit: usize) -> Vec<Course> {
        let needle = skill.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        let exact = self.entries.iter().filter(|entry| entry.skill == needle);
        let by_title = self
            .entries
            .iter()
            .filter(|entry| entry.skill != needle && entry.title_lower.contains(&needle));

        exact
            .chain(by_title)
            .take(limit)
            .map(|entry| entry.course.clone())
            .collect()
    }
}

#[async_trait]
impl CourseLookup for CsvCourseCatalog {
    async fn find_courses(&self, skill: &str, limit: usize) -> Vec<Course> {
        self.lookup(skill, limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const CATALOG: &str = "skill,title,provider,url,duration\n\
SQL,SQL for Data Science,Coursera,https://example.org/sql,15 hours\n\
excel,Excel Skills for Business,,,\n\
python,Intro to Python and SQL,edX,,self-paced\n\
sql,Advanced SQL,Udemy,,8\n";

    #[test]
    fn exact_skill_matches_come_before_title_matches() {
        let catalog = CsvCourseCatalog::from_reader(CATALOG.as_bytes()).expect("catalog parses");
        let titles: Vec<_> = catalog
            .lookup("sql", 5)
            .into_iter()
            .map(|course| course.title)
            .collect();

        assert_eq!(
            titles,
            vec!["SQL for Data Science", "Advanced SQL", "Intro to Python and SQL"]
        );
    }

    #[test]
    fn limit_and_blank_columns_are_respected() {
        let catalog = CsvCourseCatalog::from_reader(CATALOG.as_bytes()).expect("catalog parses");
        assert_eq!(catalog.len(), 4);

        let courses = catalog.lookup("EXCEL", 1);
        assert_eq!(courses.len(), 1);
        assert!(courses[0].provider.is_none());
        assert!(courses[0].duration.is_none());

        assert!(catalog.lookup("cobol", 1).is_empty());
        assert!(catalog.lookup("", 1).is_empty());
    }

    #[test]
    fn loads_from_disk_and_reports_missing_files() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(CATALOG.as_bytes()).expect("write catalog");

        let catalog = CsvCourseCatalog::from_path(file.path()).expect("catalog loads");
        assert!(!catalog.is_empty());

        let error = CsvCourseCatalog::from_path("./no-such-catalog.csv").expect_err("io error");
        assert!(matches!(error, SourceError::Io(_)));
    }

    #[tokio::test]
    async fn course_lookup_delegates_to_catalog() {
        let catalog = CsvCourseCatalog::from_reader(CATALOG.as_bytes()).expect("catalog parses");
        let courses = catalog.find_courses("python", 1).await;
        assert_eq!(courses[0].duration, Some(CourseDuration::from("self-paced")));
    }
}
