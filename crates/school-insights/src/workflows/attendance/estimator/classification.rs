use serde::Serialize;

/// Inclusive integer range a headcount is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CountRange {
    pub min: u32,
    pub max: u32,
}

impl CountRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: u32) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Inclusive percentage range an attendance rate is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RateRange {
    pub min: f64,
    pub max: f64,
}

impl RateRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
}

/// Staffing bucket inferred from the free-text school type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SchoolCategory {
    Primary,
    Preparatory,
    Secondary,
    Other,
}

/// Plausible headcount ranges for a school category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StaffingProfile {
    pub teachers: CountRange,
    pub students: CountRange,
    pub advisors: CountRange,
}

impl SchoolCategory {
    pub const fn staffing(self) -> StaffingProfile {
        match self {
            Self::Primary => StaffingProfile {
                teachers: CountRange::new(12, 24),
                students: CountRange::new(180, 430),
                advisors: CountRange::new(1, 3),
            },
            Self::Preparatory => StaffingProfile {
                teachers: CountRange::new(25, 45),
                students: CountRange::new(400, 800),
                advisors: CountRange::new(2, 4),
            },
            Self::Secondary => StaffingProfile {
                teachers: CountRange::new(40, 80),
                students: CountRange::new(600, 1200),
                advisors: CountRange::new(3, 6),
            },
            Self::Other => StaffingProfile {
                teachers: CountRange::new(20, 40),
                students: CountRange::new(300, 700),
                advisors: CountRange::new(2, 4),
            },
        }
    }
}

/// Ordered keyword table; the first category with a matching keyword wins.
/// Keywords are lower-case and matched as substrings of the lower-cased type.
pub const SCHOOL_TYPE_KEYWORDS: &[(SchoolCategory, &[&str])] = &[
    (
        SchoolCategory::Primary,
        &["primaire", "primary", "elementary", "ابتدائي"],
    ),
    (
        SchoolCategory::Preparatory,
        &[
            "préparatoire",
            "preparatoire",
            "preparatory",
            "collège",
            "college",
            "إعدادي",
            "اعدادي",
        ],
    ),
    (
        SchoolCategory::Secondary,
        &[
            "secondaire",
            "secondary",
            "lycée",
            "lycee",
            "high school",
            "ثانوي",
            "معهد",
        ],
    ),
];

pub fn classify_school_type(raw: &str) -> SchoolCategory {
    let normalized = raw.trim().to_lowercase();
    if normalized.is_empty() {
        return SchoolCategory::Other;
    }

    SCHOOL_TYPE_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|keyword| normalized.contains(keyword)))
        .map(|(category, _)| *category)
        .unwrap_or(SchoolCategory::Other)
}

/// Major cities whose presence in a delegation or region marks a school urban.
pub const URBAN_CENTRES: &[&str] = &[
    "tunis",
    "ariana",
    "ben arous",
    "manouba",
    "sfax",
    "sousse",
    "monastir",
    "bizerte",
    "nabeul",
    "kairouan",
    "gabès",
    "gabes",
    "تونس",
    "أريانة",
    "اريانة",
    "بن عروس",
    "منوبة",
    "صفاقس",
    "سوسة",
    "المنستير",
    "بنزرت",
    "نابل",
    "القيروان",
    "قابس",
];

/// Urban schools get slightly better attendance distributions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Settlement {
    Urban,
    Rural,
}

impl Settlement {
    pub fn classify(delegation: &str, region: &str) -> Self {
        let delegation = delegation.to_lowercase();
        let region = region.to_lowercase();
        let urban = URBAN_CENTRES
            .iter()
            .any(|city| delegation.contains(city) || region.contains(city));

        if urban {
            Self::Urban
        } else {
            Self::Rural
        }
    }

    pub const fn teacher_rates(self) -> RateRange {
        match self {
            Self::Urban => RateRange::new(94.0, 98.0),
            Self::Rural => RateRange::new(92.0, 97.0),
        }
    }

    pub const fn student_rates(self) -> RateRange {
        match self {
            Self::Urban => RateRange::new(90.0, 96.0),
            Self::Rural => RateRange::new(85.0, 93.0),
        }
    }
}

/// Advisors attend at the same rate regardless of settlement.
pub const ADVISOR_RATES: RateRange = RateRange::new(95.0, 100.0);
