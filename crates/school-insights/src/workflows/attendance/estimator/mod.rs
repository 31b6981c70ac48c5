mod cache;
mod classification;
mod random;

pub use cache::SnapshotCache;
pub use classification::{
    classify_school_type, CountRange, RateRange, SchoolCategory, Settlement, StaffingProfile,
    ADVISOR_RATES, SCHOOL_TYPE_KEYWORDS, URBAN_CENTRES,
};
pub use random::{RandomSource, SeededRandom};

use super::domain::{round_one_decimal, AttendanceSnapshot, Headcount, SchoolRecord};
use chrono::{Local, NaiveDate};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::debug;

/// Synthesizes a plausible daily attendance snapshot for schools without
/// authoritative data, memoized per school id for the life of the estimator.
pub struct AttendanceEstimator {
    random: Mutex<Box<dyn RandomSource>>,
    cache: SnapshotCache,
    observed_on: Option<NaiveDate>,
}

impl AttendanceEstimator {
    pub fn new(random: impl RandomSource + 'static) -> Self {
        Self {
            random: Mutex::new(Box::new(random)),
            cache: SnapshotCache::new(),
            observed_on: None,
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(SeededRandom::from_seed(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(SeededRandom::from_entropy())
    }

    /// Pins the snapshot date instead of using the local calendar day.
    pub fn with_observed_on(mut self, date: NaiveDate) -> Self {
        self.observed_on = Some(date);
        self
    }

    pub fn cache(&self) -> &SnapshotCache {
        &self.cache
    }

    /// Returns the session snapshot for `school`, synthesizing it on first use.
    pub fn estimate(&self, school: &SchoolRecord) -> Arc<AttendanceSnapshot> {
        let (snapshot, cached) = self.cache.get_or_insert_with(&school.id, || {
            let mut random = self.random.lock().unwrap_or_else(PoisonError::into_inner);
            let date = self
                .observed_on
                .unwrap_or_else(|| Local::now().date_naive());
            synthesize(school, &mut **random, date)
        });

        debug!(
            school_id = %school.id,
            cached,
            teacher_rate = snapshot.teacher_attendance_rate,
            student_rate = snapshot.student_attendance_rate,
            "attendance snapshot resolved"
        );

        snapshot
    }
}

impl std::fmt::Debug for AttendanceEstimator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AttendanceEstimator")
            .field("cached_snapshots", &self.cache.len())
            .field("observed_on", &self.observed_on)
            .finish()
    }
}

fn synthesize(
    school: &SchoolRecord,
    random: &mut dyn RandomSource,
    date: NaiveDate,
) -> AttendanceSnapshot {
    let category = classify_school_type(&school.school_type);
    let staffing = category.staffing();

    let teachers_total = resolve_count(school.teachers, staffing.teachers, random);
    let students_total = resolve_count(school.students, staffing.students, random);
    let advisors_total = resolve_count(school.advisors, staffing.advisors, random);

    let settlement = Settlement::classify(&school.delegation, &school.region);
    let teacher_rate = round_one_decimal(random.rate_in(settlement.teacher_rates()));
    let student_rate = round_one_decimal(random.rate_in(settlement.student_rates()));
    let advisor_rate = round_one_decimal(random.rate_in(ADVISOR_RATES));

    AttendanceSnapshot::from_headcounts(
        school.id.clone(),
        date,
        Headcount::from_rate(teachers_total, teacher_rate),
        Headcount::from_rate(students_total, student_rate),
        Headcount::from_rate(advisors_total, advisor_rate),
    )
}

/// Known positive counts are authoritative; anything else is drawn.
fn resolve_count(known: Option<u32>, range: CountRange, random: &mut dyn RandomSource) -> u32 {
    match known {
        Some(count) if count > 0 => count,
        _ => random.count_in(range),
    }
}
