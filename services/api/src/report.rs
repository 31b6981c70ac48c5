use crate::infra::{insight_service, parse_locale};
use clap::Args;
use school_insights::config::AppConfig;
use school_insights::error::AppError;
use school_insights::workflows::attendance::{
    Alert, AlertSeverity, AttendanceAssessment, InsightReport, Locale, ReportSource, SchoolId,
    SchoolRecord,
};
use school_insights::workflows::roster::RosterImporter;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct EstimateArgs {
    /// School identifier
    #[arg(long)]
    pub(crate) id: String,
    /// Display name
    #[arg(long, default_value = "")]
    pub(crate) name: String,
    /// Arabic display name
    #[arg(long)]
    pub(crate) name_ar: Option<String>,
    /// Free-text school type, e.g. "Lycée" or "مدرسة ابتدائية"
    #[arg(long, default_value = "")]
    pub(crate) school_type: String,
    #[arg(long, default_value = "")]
    pub(crate) delegation: String,
    #[arg(long, default_value = "")]
    pub(crate) region: String,
    /// Known teacher headcount; drawn from the school type when omitted
    #[arg(long)]
    pub(crate) teachers: Option<u32>,
    /// Known student headcount; drawn from the school type when omitted
    #[arg(long)]
    pub(crate) students: Option<u32>,
    /// Known advisor headcount; drawn from the school type when omitted
    #[arg(long)]
    pub(crate) advisors: Option<u32>,
    /// Output language (fr, ar, en). Defaults to APP_DEFAULT_LOCALE.
    #[arg(long, value_parser = parse_locale)]
    pub(crate) locale: Option<Locale>,
    /// Seed for reproducible estimates
    #[arg(long)]
    pub(crate) seed: Option<u64>,
    /// Bearer token forwarded to the regional insight service
    #[arg(long)]
    pub(crate) token: Option<String>,
    /// Skip the regional insight service and compose the report locally
    #[arg(long)]
    pub(crate) offline: bool,
}

impl EstimateArgs {
    fn school_record(&self) -> SchoolRecord {
        SchoolRecord {
            id: SchoolId::new(self.id.trim()),
            name: self.name.clone(),
            name_ar: self.name_ar.clone(),
            school_type: self.school_type.clone(),
            delegation: self.delegation.clone(),
            region: self.region.clone(),
            teachers: self.teachers,
            students: self.students,
            advisors: self.advisors,
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct RosterArgs {
    /// CSV export with columns id, name, name_ar, school_type, delegation,
    /// region, teachers, students and advisors
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Output language (fr, ar, en). Defaults to APP_DEFAULT_LOCALE.
    #[arg(long, value_parser = parse_locale)]
    pub(crate) locale: Option<Locale>,
    /// Seed for reproducible estimates
    #[arg(long)]
    pub(crate) seed: Option<u64>,
}

pub(crate) async fn run_estimate(args: EstimateArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let service = insight_service(&config, args.seed, args.offline)?;
    let school = args.school_record();

    let assessment = service.assess(&school, args.locale);
    let report = service
        .report(&school, args.locale, args.token.as_deref())
        .await;

    render_assessment(&school, &assessment, report.locale);
    render_insight_report(&report);
    Ok(())
}

pub(crate) fn run_roster(args: RosterArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let service = insight_service(&config, args.seed, true)?;
    let schools = RosterImporter::from_path(&args.csv)?;
    let locale = args.locale.unwrap_or(service.default_locale());

    println!(
        "School roster {} ({} schools)",
        args.csv.display(),
        schools.len()
    );

    let mut tally = SeverityTally::default();
    for school in &schools {
        let assessment = service.assess(school, Some(locale));
        tally.record(&assessment.alerts);
        println!("{}", roster_line(school, &assessment, locale));
    }

    println!(
        "\n{} critical | {} warning | {} healthy",
        tally.critical, tally.warning, tally.healthy
    );
    Ok(())
}

#[derive(Debug, Default, PartialEq, Eq)]
struct SeverityTally {
    critical: usize,
    warning: usize,
    healthy: usize,
}

impl SeverityTally {
    /// Counts a school once, under its most severe alert.
    fn record(&mut self, alerts: &[Alert]) {
        match alerts.iter().map(|alert| alert.severity).min() {
            Some(AlertSeverity::Critical) => self.critical += 1,
            Some(AlertSeverity::Warning) => self.warning += 1,
            Some(AlertSeverity::Info) | None => self.healthy += 1,
        }
    }
}

fn roster_line(school: &SchoolRecord, assessment: &AttendanceAssessment, locale: Locale) -> String {
    let snapshot = &assessment.snapshot;
    let headline = assessment
        .alerts
        .first()
        .map(|alert| format!("[{}] {}", alert.severity.label(), alert.title))
        .unwrap_or_default();

    format!(
        "- {} {} | teachers {}/{} ({:.1}%) | students {}/{} ({:.1}%) | ratio {} | {}",
        school.id,
        school.display_name(locale),
        snapshot.teachers_present,
        snapshot.teachers_total,
        snapshot.teacher_attendance_rate,
        snapshot.students_present,
        snapshot.students_total,
        snapshot.student_attendance_rate,
        assessment.student_teacher_ratio,
        headline
    )
}

fn render_assessment(school: &SchoolRecord, assessment: &AttendanceAssessment, locale: Locale) {
    let snapshot = &assessment.snapshot;
    println!(
        "Attendance snapshot for {} ({}) on {}",
        school.display_name(locale),
        school.id,
        assessment.date_label
    );
    println!(
        "- Teachers: {}/{} present ({} absent, {:.1}%)",
        snapshot.teachers_present,
        snapshot.teachers_total,
        snapshot.teachers_absent,
        snapshot.teacher_attendance_rate
    );
    println!(
        "- Students: {}/{} present ({} absent, {:.1}%)",
        snapshot.students_present,
        snapshot.students_total,
        snapshot.students_absent,
        snapshot.student_attendance_rate
    );
    println!(
        "- Advisors: {}/{} present",
        snapshot.advisors_present, snapshot.advisors_total
    );
    println!("- Students per teacher: {}", assessment.student_teacher_ratio);

    println!("\nAlerts");
    for alert in &assessment.alerts {
        render_alert(alert);
    }
}

fn render_insight_report(report: &InsightReport) {
    let source = match report.source {
        ReportSource::Remote => "regional insight service",
        ReportSource::Local => "local composer",
    };
    println!("\nNarrative report ({source}, {})", report.locale.code());
    if let Some(reason) = &report.fallback_reason {
        println!("  Fallback reason: {reason}");
    }

    let narrative = &report.report;
    println!("{}", narrative.summary);
    render_list("Statistics", &narrative.statistics);
    render_list("Trends", &narrative.trends);
    render_list("Insights", &narrative.insights);
    render_list("Sources", &narrative.sources);
}

fn render_list(heading: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    println!("\n{heading}");
    for item in items {
        println!("- {item}");
    }
}

fn render_alert(alert: &Alert) {
    println!("- [{}] {}", alert.severity.label(), alert.title);
    println!("  {}", alert.description);
    println!("  Action: {}", alert.action);
}
