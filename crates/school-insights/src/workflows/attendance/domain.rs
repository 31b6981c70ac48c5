use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Stable identifier of a school as handed out by the listing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct SchoolId(pub String);

impl SchoolId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SchoolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for SchoolId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(u64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(value) => SchoolId(value),
            RawId::Number(value) => SchoolId(value.to_string()),
        })
    }
}

/// Minimal school descriptor supplied by the map/browse UI.
///
/// Only `id` is required. Every other field degrades to an empty or unknown
/// value so that estimation can always proceed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchoolRecord {
    pub id: SchoolId,
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: String,
    #[serde(default, alias = "name_ar")]
    pub name_ar: Option<String>,
    #[serde(
        default,
        alias = "school_type",
        alias = "type",
        deserialize_with = "lenient_text"
    )]
    pub school_type: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub delegation: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub region: String,
    #[serde(default, deserialize_with = "lenient_count")]
    pub teachers: Option<u32>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub students: Option<u32>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub advisors: Option<u32>,
}

impl SchoolRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: SchoolId::new(id),
            name: name.into(),
            name_ar: None,
            school_type: String::new(),
            delegation: String::new(),
            region: String::new(),
            teachers: None,
            students: None,
            advisors: None,
        }
    }

    /// Name to show for a locale, preferring the Arabic name for Arabic output.
    pub fn display_name(&self, locale: Locale) -> &str {
        match (locale, self.name_ar.as_deref()) {
            (Locale::Arabic, Some(name)) if !name.trim().is_empty() => name,
            _ if self.name.trim().is_empty() => self.id.as_str(),
            _ => &self.name,
        }
    }
}

/// Keeps strings, renders numbers as text and treats anything else as empty.
fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(text) => text,
        serde_json::Value::Number(number) => number.to_string(),
        _ => String::new(),
    })
}

/// Accepts integers, floats or numeric strings; anything negative or
/// unparsable becomes an unknown count.
fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawCount {
        Integer(i64),
        Decimal(f64),
        Text(String),
    }

    let raw = Option::<RawCount>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| match value {
        RawCount::Integer(count) => u32::try_from(count).ok(),
        RawCount::Decimal(count) if count.is_finite() && count >= 0.0 => {
            Some(count.round().min(u32::MAX as f64) as u32)
        }
        RawCount::Decimal(_) => None,
        RawCount::Text(text) => text.trim().parse::<u32>().ok(),
    }))
}

/// Output language for every piece of generated text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Locale {
    #[default]
    French,
    Arabic,
    English,
}

impl Locale {
    /// Resolves a language tag such as `fr`, `ar-TN` or `en_US`. Unknown tags
    /// fall back to French.
    pub fn from_code(code: &str) -> Self {
        let primary = code
            .trim()
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();

        match primary.as_str() {
            "ar" => Self::Arabic,
            "en" => Self::English,
            _ => Self::French,
        }
    }

    pub const fn code(self) -> &'static str {
        match self {
            Self::French => "fr",
            Self::Arabic => "ar",
            Self::English => "en",
        }
    }

    pub(crate) const fn date_format(self) -> &'static str {
        match self {
            Self::French | Self::Arabic => "%d/%m/%Y",
            Self::English => "%Y-%m-%d",
        }
    }
}

impl Serialize for Locale {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for Locale {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::from_code(&raw))
    }
}

/// Total/present/absent split for one staff or student category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Headcount {
    pub total: u32,
    pub present: u32,
    pub absent: u32,
}

impl Headcount {
    /// Splits `total` using an attendance percentage. `present` is rounded and
    /// `absent` is whatever remains, so the parts always add up.
    pub fn from_rate(total: u32, rate: f64) -> Self {
        let present = (f64::from(total) * rate / 100.0)
            .round()
            .clamp(0.0, f64::from(total)) as u32;
        Self::from_present(total, present)
    }

    pub fn from_present(total: u32, present: u32) -> Self {
        let present = present.min(total);
        Self {
            total,
            present,
            absent: total - present,
        }
    }

    /// Attendance percentage rounded to one decimal; zero for an empty category.
    pub fn rate(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        round_one_decimal(f64::from(self.present) / f64::from(self.total) * 100.0)
    }
}

/// Immutable attendance record for one school on one day.
///
/// Rates are always derived from the headcounts, never stored independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceSnapshot {
    pub school_id: SchoolId,
    pub date: NaiveDate,
    pub teachers_total: u32,
    pub teachers_present: u32,
    pub teachers_absent: u32,
    pub students_total: u32,
    pub students_present: u32,
    pub students_absent: u32,
    pub advisors_total: u32,
    pub advisors_present: u32,
    pub teacher_attendance_rate: f64,
    pub student_attendance_rate: f64,
}

impl AttendanceSnapshot {
    pub fn from_headcounts(
        school_id: SchoolId,
        date: NaiveDate,
        teachers: Headcount,
        students: Headcount,
        advisors: Headcount,
    ) -> Self {
        Self {
            school_id,
            date,
            teachers_total: teachers.total,
            teachers_present: teachers.present,
            teachers_absent: teachers.absent,
            students_total: students.total,
            students_present: students.present,
            students_absent: students.absent,
            advisors_total: advisors.total,
            advisors_present: advisors.present,
            teacher_attendance_rate: teachers.rate(),
            student_attendance_rate: students.rate(),
        }
    }

    pub fn teachers(&self) -> Headcount {
        Headcount::from_present(self.teachers_total, self.teachers_present)
    }

    pub fn students(&self) -> Headcount {
        Headcount::from_present(self.students_total, self.students_present)
    }

    pub fn advisors(&self) -> Headcount {
        Headcount::from_present(self.advisors_total, self.advisors_present)
    }

    /// Students per teacher rounded to the nearest integer, or 0 without teachers.
    pub fn student_teacher_ratio(&self) -> u32 {
        if self.teachers_total == 0 {
            return 0;
        }
        (f64::from(self.students_total) / f64::from(self.teachers_total)).round() as u32
    }

    pub fn formatted_date(&self, locale: Locale) -> String {
        self.date.format(locale.date_format()).to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Critical,
    Warning,
    Info,
}

impl AlertSeverity {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Critical => "Critical",
            Self::Warning => "Warning",
            Self::Info => "Info",
        }
    }
}

/// Metric an alert was raised for. Remote alerts do not carry one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertMetric {
    TeacherAttendance,
    StudentAttendance,
    StudentTeacherRatio,
    OverallPerformance,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub severity: AlertSeverity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metric: Option<AlertMetric>,
    pub title: String,
    pub description: String,
    pub action: String,
}

/// Narrative block rendered in the school detail dialog. Both the remote
/// service and the local composer produce this exact shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NarrativeReport {
    pub summary: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub statistics: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub trends: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub insights: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub alerts: Vec<Alert>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub sources: Vec<String>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

pub(crate) fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
