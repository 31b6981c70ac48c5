//! Parallel French, Arabic and English phrase tables for every piece of
//! generated text. French doubles as the fallback table.

use super::alerts::rules::Finding;
use super::domain::{Alert, AlertMetric, AlertSeverity, AttendanceSnapshot, Locale, SchoolRecord};

/// Resolved labels and figures a narrative is written about.
pub(crate) struct SchoolContext<'a> {
    pub code: &'a str,
    pub name: &'a str,
    pub school_type: &'a str,
    pub delegation: &'a str,
    pub region: &'a str,
    pub snapshot: &'a AttendanceSnapshot,
    pub ratio: u32,
}

pub(crate) struct Phrases {
    locale: Locale,
}

impl Phrases {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    pub fn context<'a>(
        &self,
        school: &'a SchoolRecord,
        snapshot: &'a AttendanceSnapshot,
    ) -> SchoolContext<'a> {
        SchoolContext {
            code: school.id.as_str(),
            name: school.display_name(self.locale),
            school_type: non_blank(&school.school_type).unwrap_or(self.generic_school_type()),
            delegation: non_blank(&school.delegation).unwrap_or(self.unspecified()),
            region: non_blank(&school.region).unwrap_or(self.unspecified()),
            snapshot,
            ratio: snapshot.student_teacher_ratio(),
        }
    }

    fn generic_school_type(&self) -> &'static str {
        match self.locale {
            Locale::French => "établissement scolaire",
            Locale::Arabic => "مؤسسة تربوية",
            Locale::English => "school",
        }
    }

    fn unspecified(&self) -> &'static str {
        match self.locale {
            Locale::French => "non précisée",
            Locale::Arabic => "غير محددة",
            Locale::English => "unspecified",
        }
    }

    pub fn summary(&self, ctx: &SchoolContext<'_>) -> String {
        let teacher = ctx.snapshot.teacher_attendance_rate;
        let student = ctx.snapshot.student_attendance_rate;
        let date = ctx.snapshot.formatted_date(self.locale);

        match self.locale {
            Locale::French => format!(
                "{} ({}) est situé dans la délégation de {}, région de {}. Le {}, le taux de présence des enseignants atteint {:.1}% et celui des élèves {:.1}%.",
                ctx.name, ctx.school_type, ctx.delegation, ctx.region, date, teacher, student
            ),
            Locale::Arabic => format!(
                "تقع {} ({}) في معتمدية {} بولاية {}. بتاريخ {} بلغت نسبة حضور المدرسين {:.1}% ونسبة حضور التلاميذ {:.1}%.",
                ctx.name, ctx.school_type, ctx.delegation, ctx.region, date, teacher, student
            ),
            Locale::English => format!(
                "{} ({}) is located in the {} delegation, {} region. On {}, teacher attendance reached {:.1}% and student attendance {:.1}%.",
                ctx.name, ctx.school_type, ctx.delegation, ctx.region, date, teacher, student
            ),
        }
    }

    pub fn statistics(&self, ctx: &SchoolContext<'_>) -> Vec<String> {
        let s = ctx.snapshot;
        match self.locale {
            Locale::French => vec![
                format!("Code de l'établissement : {}", ctx.code),
                format!("Type : {}", ctx.school_type),
                format!(
                    "Enseignants : {} présents sur {} ({} absents)",
                    s.teachers_present, s.teachers_total, s.teachers_absent
                ),
                format!(
                    "Élèves : {} présents sur {} ({} absents)",
                    s.students_present, s.students_total, s.students_absent
                ),
                format!("Ratio élèves/enseignant : {}", ctx.ratio),
                format!("Taux de présence des enseignants : {:.1}%", s.teacher_attendance_rate),
                format!("Taux de présence des élèves : {:.1}%", s.student_attendance_rate),
                format!(
                    "Conseillers : {} présents sur {}",
                    s.advisors_present, s.advisors_total
                ),
            ],
            Locale::Arabic => vec![
                format!("رمز المؤسسة: {}", ctx.code),
                format!("النوع: {}", ctx.school_type),
                format!(
                    "المدرسون: {} حاضرون من أصل {} ({} غائبون)",
                    s.teachers_present, s.teachers_total, s.teachers_absent
                ),
                format!(
                    "التلاميذ: {} حاضرون من أصل {} ({} غائبون)",
                    s.students_present, s.students_total, s.students_absent
                ),
                format!("نسبة التلاميذ لكل مدرس: {}", ctx.ratio),
                format!("نسبة حضور المدرسين: {:.1}%", s.teacher_attendance_rate),
                format!("نسبة حضور التلاميذ: {:.1}%", s.student_attendance_rate),
                format!(
                    "المستشارون: {} حاضرون من أصل {}",
                    s.advisors_present, s.advisors_total
                ),
            ],
            Locale::English => vec![
                format!("School code: {}", ctx.code),
                format!("Type: {}", ctx.school_type),
                format!(
                    "Teachers: {} present out of {} ({} absent)",
                    s.teachers_present, s.teachers_total, s.teachers_absent
                ),
                format!(
                    "Students: {} present out of {} ({} absent)",
                    s.students_present, s.students_total, s.students_absent
                ),
                format!("Student/teacher ratio: {}", ctx.ratio),
                format!("Teacher attendance rate: {:.1}%", s.teacher_attendance_rate),
                format!("Student attendance rate: {:.1}%", s.student_attendance_rate),
                format!(
                    "Advisors: {} present out of {}",
                    s.advisors_present, s.advisors_total
                ),
            ],
        }
    }

    pub fn trends(&self, ctx: &SchoolContext<'_>) -> Vec<String> {
        match self.locale {
            Locale::French => vec![
                format!(
                    "La fréquentation dans la délégation de {} reste stable sur le trimestre en cours.",
                    ctx.delegation
                ),
                format!(
                    "Les établissements de type {} de la région de {} suivent la moyenne régionale de présence.",
                    ctx.school_type, ctx.region
                ),
                "Les absences augmentent habituellement en fin de trimestre et pendant les périodes d'examens."
                    .to_string(),
            ],
            Locale::Arabic => vec![
                format!("يبقى الحضور في معتمدية {} مستقرا خلال الثلاثي الحالي.", ctx.delegation),
                format!(
                    "تواكب المؤسسات من نوع {} بولاية {} المعدل الجهوي للحضور.",
                    ctx.school_type, ctx.region
                ),
                "ترتفع الغيابات عادة في نهاية الثلاثي وخلال فترات الامتحانات.".to_string(),
            ],
            Locale::English => vec![
                format!(
                    "Attendance in the {} delegation has stayed steady over the current term.",
                    ctx.delegation
                ),
                format!(
                    "{} institutions in the {} region track the regional attendance average.",
                    capitalize(ctx.school_type),
                    ctx.region
                ),
                "Absences usually rise at the end of term and during exam periods.".to_string(),
            ],
        }
    }

    pub fn teacher_insight(&self, rate: f64, benchmark: f64, meets: bool) -> String {
        let benchmark = format_threshold(benchmark);
        match (self.locale, meets) {
            (Locale::French, true) => format!(
                "Le taux de présence des enseignants ({rate:.1}%) atteint l'objectif de {benchmark}%."
            ),
            (Locale::French, false) => format!(
                "Le taux de présence des enseignants ({rate:.1}%) reste sous l'objectif de {benchmark}% ; un suivi des absences est conseillé."
            ),
            (Locale::Arabic, true) => {
                format!("نسبة حضور المدرسين ({rate:.1}%) تبلغ الهدف المحدد بـ {benchmark}%.")
            }
            (Locale::Arabic, false) => format!(
                "نسبة حضور المدرسين ({rate:.1}%) دون الهدف المحدد بـ {benchmark}%، وينصح بمتابعة الغيابات."
            ),
            (Locale::English, true) => {
                format!("Teacher attendance ({rate:.1}%) meets the {benchmark}% target.")
            }
            (Locale::English, false) => format!(
                "Teacher attendance ({rate:.1}%) is below the {benchmark}% target; absence follow-up is advised."
            ),
        }
    }

    pub fn student_insight(&self, rate: f64, benchmark: f64, meets: bool) -> String {
        let benchmark = format_threshold(benchmark);
        match (self.locale, meets) {
            (Locale::French, true) => format!(
                "L'assiduité des élèves ({rate:.1}%) dépasse la référence de {benchmark}%."
            ),
            (Locale::French, false) => format!(
                "L'assiduité des élèves ({rate:.1}%) est inférieure à la référence de {benchmark}% ; un dialogue avec les familles est à prévoir."
            ),
            (Locale::Arabic, true) => {
                format!("مواظبة التلاميذ ({rate:.1}%) تتجاوز المرجع المحدد بـ {benchmark}%.")
            }
            (Locale::Arabic, false) => format!(
                "مواظبة التلاميذ ({rate:.1}%) دون المرجع المحدد بـ {benchmark}%، ويستحسن التواصل مع الأولياء."
            ),
            (Locale::English, true) => format!(
                "Student attendance ({rate:.1}%) is at or above the {benchmark}% benchmark."
            ),
            (Locale::English, false) => format!(
                "Student attendance ({rate:.1}%) trails the {benchmark}% benchmark; plan outreach to families."
            ),
        }
    }

    pub fn ratio_insight(&self, ratio: u32, benchmark: u32, meets: bool) -> String {
        match (self.locale, meets) {
            (Locale::French, true) => format!(
                "Avec {ratio} élèves par enseignant, l'encadrement reste favorable (référence : {benchmark})."
            ),
            (Locale::French, false) => format!(
                "Avec {ratio} élèves par enseignant, les classes dépassent la référence de {benchmark} élèves."
            ),
            (Locale::Arabic, true) => format!(
                "بمعدل {ratio} تلميذا لكل مدرس يبقى التأطير ملائما (المرجع: {benchmark})."
            ),
            (Locale::Arabic, false) => format!(
                "بمعدل {ratio} تلميذا لكل مدرس تتجاوز الأقسام المرجع المحدد بـ {benchmark} تلميذا."
            ),
            (Locale::English, true) => format!(
                "At {ratio} students per teacher, supervision remains comfortable (benchmark {benchmark})."
            ),
            (Locale::English, false) => format!(
                "At {ratio} students per teacher, classes exceed the {benchmark}-student benchmark."
            ),
        }
    }

    pub fn alert_load_insight(&self, flagged: usize, critical: usize) -> String {
        match (self.locale, flagged) {
            (Locale::French, 0) => {
                "Aucun indicateur ne nécessite d'intervention immédiate.".to_string()
            }
            (Locale::French, _) => format!(
                "{flagged} indicateur(s) demandent un suivi, dont {critical} en situation critique."
            ),
            (Locale::Arabic, 0) => "لا يتطلب أي مؤشر تدخلا عاجلا.".to_string(),
            (Locale::Arabic, _) => {
                format!("{flagged} مؤشر(ات) تتطلب المتابعة، منها {critical} في وضع حرج.")
            }
            (Locale::English, 0) => "No indicator requires immediate action.".to_string(),
            (Locale::English, _) => {
                format!("{flagged} indicator(s) need follow-up, {critical} of them critical.")
            }
        }
    }

    pub fn sources(&self) -> Vec<String> {
        let sources: [&str; 3] = match self.locale {
            Locale::French => [
                "Ministère de l'Éducation, système d'information scolaire",
                "Commissariat régional de l'éducation (CRE)",
                "Estimation locale de la présence journalière",
            ],
            Locale::Arabic => [
                "وزارة التربية، منظومة الإعلامية المدرسية",
                "المندوبية الجهوية للتربية",
                "تقدير محلي للحضور اليومي",
            ],
            Locale::English => [
                "Ministry of Education school information system",
                "Regional Education Commission (CRE)",
                "Local daily attendance estimate",
            ],
        };
        sources.iter().map(|source| source.to_string()).collect()
    }

    pub fn good_performance_alert(&self) -> Alert {
        let (title, description, action) = match self.locale {
            Locale::French => (
                "Bonne performance",
                "Les indicateurs de présence et d'encadrement sont conformes aux objectifs.",
                "Maintenir les pratiques actuelles de suivi de l'assiduité.",
            ),
            Locale::Arabic => (
                "أداء جيد",
                "مؤشرات الحضور والتأطير مطابقة للأهداف المرسومة.",
                "مواصلة الممارسات الحالية في متابعة المواظبة.",
            ),
            Locale::English => (
                "Good performance",
                "Attendance and staffing indicators are in line with targets.",
                "Keep the current attendance monitoring practices.",
            ),
        };

        Alert {
            severity: AlertSeverity::Info,
            metric: Some(AlertMetric::OverallPerformance),
            title: title.to_string(),
            description: description.to_string(),
            action: action.to_string(),
        }
    }

    pub fn alert(&self, finding: &Finding) -> Alert {
        let critical = finding.severity == AlertSeverity::Critical;
        let value = finding.observed;
        let bench = format_threshold(finding.benchmark);

        let (title, description, action) = match (finding.metric, self.locale) {
            (AlertMetric::TeacherAttendance, Locale::French) => (
                if critical {
                    "Absentéisme critique des enseignants"
                } else {
                    "Présence des enseignants à surveiller"
                },
                if critical {
                    format!(
                        "Le taux de présence des enseignants est de {value:.1}%, sous le seuil critique de {bench}%."
                    )
                } else {
                    format!(
                        "Le taux de présence des enseignants ({value:.1}%) est inférieur à l'objectif de {bench}%."
                    )
                },
                if critical {
                    "Enquêter sur les causes des absences et activer un dispositif de suivi."
                } else {
                    "Renforcer le suivi hebdomadaire des absences des enseignants."
                },
            ),
            (AlertMetric::TeacherAttendance, Locale::Arabic) => (
                if critical {
                    "غياب حرج للمدرسين"
                } else {
                    "حضور المدرسين يستوجب المتابعة"
                },
                if critical {
                    format!(
                        "نسبة حضور المدرسين {value:.1}%، وهي دون العتبة الحرجة المحددة بـ {bench}%."
                    )
                } else {
                    format!("نسبة حضور المدرسين ({value:.1}%) دون الهدف المحدد بـ {bench}%.")
                },
                if critical {
                    "التحقيق في أسباب الغيابات وتفعيل آلية متابعة."
                } else {
                    "تعزيز المتابعة الأسبوعية لغيابات المدرسين."
                },
            ),
            (AlertMetric::TeacherAttendance, Locale::English) => (
                if critical {
                    "Critical teacher absenteeism"
                } else {
                    "Teacher attendance needs monitoring"
                },
                if critical {
                    format!(
                        "Teacher attendance is {value:.1}%, below the critical threshold of {bench}%."
                    )
                } else {
                    format!("Teacher attendance ({value:.1}%) is below the {bench}% target.")
                },
                if critical {
                    "Investigate the causes of absence and activate a monitoring plan."
                } else {
                    "Step up weekly follow-up of teacher absences."
                },
            ),
            (AlertMetric::StudentAttendance, Locale::French) => (
                if critical {
                    "Absentéisme critique des élèves"
                } else {
                    "Assiduité des élèves à surveiller"
                },
                if critical {
                    format!(
                        "Le taux de présence des élèves est de {value:.1}%, sous le seuil critique de {bench}%."
                    )
                } else {
                    format!(
                        "Le taux de présence des élèves ({value:.1}%) est inférieur à l'objectif de {bench}%."
                    )
                },
                if critical {
                    "Contacter les familles des élèves absents et mobiliser la cellule d'écoute."
                } else {
                    "Informer les parents et suivre l'assiduité classe par classe."
                },
            ),
            (AlertMetric::StudentAttendance, Locale::Arabic) => (
                if critical {
                    "غياب حرج للتلاميذ"
                } else {
                    "مواظبة التلاميذ تستوجب المتابعة"
                },
                if critical {
                    format!(
                        "نسبة حضور التلاميذ {value:.1}%، وهي دون العتبة الحرجة المحددة بـ {bench}%."
                    )
                } else {
                    format!("نسبة حضور التلاميذ ({value:.1}%) دون الهدف المحدد بـ {bench}%.")
                },
                if critical {
                    "الاتصال بأولياء التلاميذ الغائبين وتفعيل خلية الإصغاء."
                } else {
                    "إعلام الأولياء ومتابعة المواظبة حسب الأقسام."
                },
            ),
            (AlertMetric::StudentAttendance, Locale::English) => (
                if critical {
                    "Critical student absenteeism"
                } else {
                    "Student attendance needs monitoring"
                },
                if critical {
                    format!(
                        "Student attendance is {value:.1}%, below the critical threshold of {bench}%."
                    )
                } else {
                    format!("Student attendance ({value:.1}%) is below the {bench}% target.")
                },
                if critical {
                    "Contact the families of absent students and engage the counselling unit."
                } else {
                    "Notify parents and track attendance class by class."
                },
            ),
            (AlertMetric::StudentTeacherRatio, Locale::French) => (
                if critical {
                    "Sureffectif critique"
                } else {
                    "Ratio élèves/enseignant élevé"
                },
                if critical {
                    format!(
                        "Le ratio atteint {value:.0} élèves par enseignant, au-delà du seuil critique de {bench}."
                    )
                } else {
                    format!(
                        "Le ratio atteint {value:.0} élèves par enseignant, au-delà de la référence de {bench}."
                    )
                },
                if critical {
                    "Demander des enseignants supplémentaires ou ouvrir de nouvelles classes."
                } else {
                    "Planifier des renforts d'enseignants pour la prochaine rentrée."
                },
            ),
            (AlertMetric::StudentTeacherRatio, Locale::Arabic) => (
                if critical {
                    "اكتظاظ حرج"
                } else {
                    "نسبة تلاميذ لكل مدرس مرتفعة"
                },
                if critical {
                    format!(
                        "بلغت النسبة {value:.0} تلميذا لكل مدرس، متجاوزة العتبة الحرجة المحددة بـ {bench}."
                    )
                } else {
                    format!(
                        "بلغت النسبة {value:.0} تلميذا لكل مدرس، متجاوزة المرجع المحدد بـ {bench}."
                    )
                },
                if critical {
                    "طلب مدرسين إضافيين أو فتح أقسام جديدة."
                } else {
                    "برمجة تعزيزات من المدرسين للعودة المدرسية القادمة."
                },
            ),
            (AlertMetric::StudentTeacherRatio, Locale::English) => (
                if critical {
                    "Critical overcrowding"
                } else {
                    "High student/teacher ratio"
                },
                if critical {
                    format!(
                        "The ratio is {value:.0} students per teacher, above the critical threshold of {bench}."
                    )
                } else {
                    format!(
                        "The ratio is {value:.0} students per teacher, above the {bench} benchmark."
                    )
                },
                if critical {
                    "Request additional teachers or open new classrooms."
                } else {
                    "Plan teacher reinforcements for the next school year."
                },
            ),
            (AlertMetric::OverallPerformance, _) => return self.good_performance_alert(),
        };

        Alert {
            severity: finding.severity,
            metric: Some(finding.metric),
            title: title.to_string(),
            description,
            action: action.to_string(),
        }
    }
}

fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// Whole thresholds print without decimals, fractional ones with one.
fn format_threshold(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
