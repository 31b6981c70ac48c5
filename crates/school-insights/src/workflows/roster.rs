use crate::workflows::attendance::{SchoolId, SchoolRecord};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use tracing::warn;

#[derive(Debug)]
pub enum RosterImportError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl std::fmt::Display for RosterImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RosterImportError::Io(err) => write!(f, "failed to read school roster: {}", err),
            RosterImportError::Csv(err) => write!(f, "invalid school roster CSV: {}", err),
        }
    }
}

impl std::error::Error for RosterImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RosterImportError::Io(err) => Some(err),
            RosterImportError::Csv(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for RosterImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for RosterImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

#[derive(Debug, Deserialize)]
struct RosterRow {
    #[serde(default)]
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    name_ar: Option<String>,
    #[serde(default)]
    school_type: String,
    #[serde(default)]
    delegation: String,
    #[serde(default)]
    region: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    teachers: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    students: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    advisors: Option<String>,
}

impl RosterRow {
    fn into_record(self) -> SchoolRecord {
        SchoolRecord {
            id: SchoolId::new(self.id),
            name: self.name,
            name_ar: self.name_ar,
            school_type: self.school_type,
            delegation: self.delegation,
            region: self.region,
            teachers: parse_count(self.teachers.as_deref()),
            students: parse_count(self.students.as_deref()),
            advisors: parse_count(self.advisors.as_deref()),
        }
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn parse_count(value: Option<&str>) -> Option<u32> {
    value.and_then(|raw| raw.trim().parse::<u32>().ok())
}

/// Loads school records from a CSV export with the header
/// `id,name,name_ar,school_type,delegation,region,teachers,students,advisors`.
pub struct RosterImporter;

impl RosterImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<SchoolRecord>, RosterImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<SchoolRecord>, RosterImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut schools = Vec::new();
        for (index, record) in csv_reader.deserialize::<RosterRow>().enumerate() {
            let row = record?;
            if row.id.trim().is_empty() {
                warn!(row = index + 1, "skipping roster row without a school id");
                continue;
            }
            schools.push(row.into_record());
        }

        Ok(schools)
    }
}
