//! Localized names and display formats.
//!
//! The engine never hard-codes display strings: weekday names, date formats, insight
//! wording and export labels all come from a [`Locale`]. Brazilian Portuguese is the
//! default, following the date-fns `pt-BR` conventions.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};

use crate::error::PlannerError;
use crate::report::InsightKind;

/// Fixed labels used by the export renderers.
#[derive(Debug)]
pub struct ExportLabels {
    pub file_prefix: &'static str,
    pub report_title: &'static str,
    pub period: &'static str,
    pub until: &'static str,
    pub mode: &'static str,
    pub mode_calendar: &'static str,
    pub mode_compensation: &'static str,
    pub generated_at: &'static str,
    pub executive_summary: &'static str,
    pub total_days: &'static str,
    pub work_days: &'static str,
    pub weekend_days: &'static str,
    pub monthly_impact: &'static str,
    pub detailed_calendar: &'static str,
    pub compensation_calculation: &'static str,
    pub presential_days_lost: &'static str,
    pub total_to_compensate: &'static str,
    pub estimated_time: &'static str,
    pub months_unit: &'static str,
    pub compensation_schedule: &'static str,
    pub week: &'static str,
    pub insights: &'static str,
    pub days_unit: &'static str,
    pub absence: &'static str,
    pub duration: &'static str,
    pub converted_days: &'static str,
    pub final_summary: &'static str,
    pub total_converted: &'static str,
    pub csv_calendar_header: &'static str,
    pub csv_compensation_header: &'static str,
    pub work_day: &'static str,
    pub weekend_day: &'static str,
    pub compensation_day: &'static str,
}

/// Locale/formatting capability consumed by the engine.
pub trait Locale: Send + Sync {
    /// Locale identifier, e.g. `pt-br`.
    fn code(&self) -> &'static str;

    /// Long weekday name ("segunda-feira").
    fn weekday_name(&self, date: NaiveDate) -> String;

    /// Long date ("10 de maio de 2025").
    fn long_date(&self, date: NaiveDate) -> String;

    /// Short date with abbreviated weekday ("sáb, 10 de mai").
    fn short_date(&self, date: NaiveDate) -> String;

    /// Numeric date ("10/05/2025").
    fn numeric_date(&self, date: NaiveDate) -> String;

    /// Full timestamp used for "generated at" lines.
    fn timestamp(&self, at: NaiveDateTime) -> String;

    /// Title and description of an insight.
    fn insight_text(&self, kind: &InsightKind) -> (String, String);

    fn labels(&self) -> &'static ExportLabels;
}

const PT_WEEKDAYS: [&str; 7] = [
    "domingo",
    "segunda-feira",
    "terça-feira",
    "quarta-feira",
    "quinta-feira",
    "sexta-feira",
    "sábado",
];
const PT_WEEKDAYS_ABBR: [&str; 7] = ["dom", "seg", "ter", "qua", "qui", "sex", "sáb"];
const PT_MONTHS: [&str; 12] = [
    "janeiro",
    "fevereiro",
    "março",
    "abril",
    "maio",
    "junho",
    "julho",
    "agosto",
    "setembro",
    "outubro",
    "novembro",
    "dezembro",
];
const PT_MONTHS_ABBR: [&str; 12] = [
    "jan", "fev", "mar", "abr", "mai", "jun", "jul", "ago", "set", "out", "nov", "dez",
];

static PT_BR_LABELS: ExportLabels = ExportLabels {
    file_prefix: "relatorio-ausencia",
    report_title: "RELATÓRIO DE AUSÊNCIA E COMPENSAÇÃO",
    period: "Período",
    until: "até",
    mode: "Modo",
    mode_calendar: "Visualização de Calendário",
    mode_compensation: "Cálculo de Compensação",
    generated_at: "Gerado em",
    executive_summary: "RESUMO EXECUTIVO",
    total_days: "Total de dias",
    work_days: "Dias úteis",
    weekend_days: "Fins de semana",
    monthly_impact: "Impacto mensal",
    detailed_calendar: "CALENDÁRIO DETALHADO",
    compensation_calculation: "CÁLCULO DE COMPENSAÇÃO",
    presential_days_lost: "Dias presenciais perdidos",
    total_to_compensate: "Total a compensar",
    estimated_time: "Tempo estimado",
    months_unit: "mês(es)",
    compensation_schedule: "CRONOGRAMA DE COMPENSAÇÃO",
    week: "Semana",
    insights: "INSIGHTS E RECOMENDAÇÕES",
    days_unit: "dias",
    absence: "Ausência",
    duration: "Duração",
    converted_days: "Dias convertidos",
    final_summary: "Resumo final",
    total_converted: "Total convertidos",
    csv_calendar_header: "Data,Dia da Semana,Tipo,Data Formatada",
    csv_compensation_header: "Semana,Data,Dia da Semana,Tipo,Data Formatada",
    work_day: "Dia Útil",
    weekend_day: "Fim de Semana",
    compensation_day: "Compensação",
};

/// Brazilian Portuguese.
#[derive(Debug, Clone, Copy, Default)]
pub struct PortugueseBrazil;

impl Locale for PortugueseBrazil {
    fn code(&self) -> &'static str {
        "pt-br"
    }

    fn weekday_name(&self, date: NaiveDate) -> String {
        PT_WEEKDAYS[date.weekday().num_days_from_sunday() as usize].to_string()
    }

    fn long_date(&self, date: NaiveDate) -> String {
        format!(
            "{} de {} de {}",
            date.day(),
            PT_MONTHS[date.month0() as usize],
            date.year()
        )
    }

    fn short_date(&self, date: NaiveDate) -> String {
        format!(
            "{}, {} de {}",
            PT_WEEKDAYS_ABBR[date.weekday().num_days_from_sunday() as usize],
            date.day(),
            PT_MONTHS_ABBR[date.month0() as usize]
        )
    }

    fn numeric_date(&self, date: NaiveDate) -> String {
        date.format("%d/%m/%Y").to_string()
    }

    fn timestamp(&self, at: NaiveDateTime) -> String {
        format!(
            "{}, {} às {:02}:{:02}",
            self.weekday_name(at.date()),
            self.long_date(at.date()),
            at.hour(),
            at.minute()
        )
    }

    fn insight_text(&self, kind: &InsightKind) -> (String, String) {
        match kind {
            InsightKind::PeriodSummary {
                total_days,
                work_days,
                weekend_days,
            } => (
                "Período de Ausência Analisado".into(),
                format!(
                    "Sua ausência durará {total_days} dias, incluindo {work_days} dias úteis e {weekend_days} dias de fim de semana."
                ),
            ),
            InsightKind::LongAbsence { .. } => (
                "Ausência Prolongada Detectada".into(),
                "Considere dividir o período de ausência ou planejar a transição de responsabilidades."
                    .into(),
            ),
            InsightKind::OptimizedPeriod { .. } => (
                "Otimização de Período".into(),
                "Seu período inclui mais fins de semana que dias úteis, o que é eficiente para maximizar o tempo livre."
                    .into(),
            ),
            InsightKind::TemporalAnalysis { start, end, weeks } => (
                "Análise Temporal".into(),
                format!(
                    "O período inicia em {} e termina em {}, representando {weeks} semana(s) completa(s).",
                    self.long_date(*start),
                    self.long_date(*end)
                ),
            ),
            InsightKind::CompensationSummary {
                presential_days_lost,
                estimated_months,
            } => (
                "Compensação Calculada".into(),
                format!(
                    "Você precisará compensar {presential_days_lost} dias presenciais em aproximadamente {estimated_months} mês(es)."
                ),
            ),
            InsightKind::LongCompensation { .. } => (
                "Período de Compensação Longo".into(),
                "O período de compensação é extenso. Considere negociar alternativas com a gestão."
                    .into(),
            ),
            InsightKind::ScheduleDistribution { weeks } => (
                "Cronograma de Compensação".into(),
                format!(
                    "As compensações serão distribuídas em {weeks} semanas, priorizando segundas e sextas-feiras."
                ),
            ),
            InsightKind::CompensationWindow { first, last } => (
                "Período de Compensação".into(),
                format!(
                    "A compensação iniciará em {} e terminará em {}.",
                    self.long_date(*first),
                    self.long_date(*last)
                ),
            ),
        }
    }

    fn labels(&self) -> &'static ExportLabels {
        &PT_BR_LABELS
    }
}

static EN_LABELS: ExportLabels = ExportLabels {
    file_prefix: "absence-report",
    report_title: "ABSENCE AND COMPENSATION REPORT",
    period: "Period",
    until: "to",
    mode: "Mode",
    mode_calendar: "Calendar View",
    mode_compensation: "Compensation Calculation",
    generated_at: "Generated at",
    executive_summary: "EXECUTIVE SUMMARY",
    total_days: "Total days",
    work_days: "Work days",
    weekend_days: "Weekend days",
    monthly_impact: "Monthly impact",
    detailed_calendar: "DETAILED CALENDAR",
    compensation_calculation: "COMPENSATION CALCULATION",
    presential_days_lost: "Presential days lost",
    total_to_compensate: "Total to compensate",
    estimated_time: "Estimated time",
    months_unit: "month(s)",
    compensation_schedule: "COMPENSATION SCHEDULE",
    week: "Week",
    insights: "INSIGHTS AND RECOMMENDATIONS",
    days_unit: "days",
    absence: "Absence",
    duration: "Duration",
    converted_days: "Converted days",
    final_summary: "Final summary",
    total_converted: "Total converted",
    csv_calendar_header: "Date,Weekday,Type,Formatted Date",
    csv_compensation_header: "Week,Date,Weekday,Type,Formatted Date",
    work_day: "Work Day",
    weekend_day: "Weekend",
    compensation_day: "Compensation",
};

/// English, with US-style dates.
#[derive(Debug, Clone, Copy, Default)]
pub struct English;

impl Locale for English {
    fn code(&self) -> &'static str {
        "en"
    }

    fn weekday_name(&self, date: NaiveDate) -> String {
        date.format("%A").to_string()
    }

    fn long_date(&self, date: NaiveDate) -> String {
        date.format("%B %-d, %Y").to_string()
    }

    fn short_date(&self, date: NaiveDate) -> String {
        date.format("%a, %b %-d").to_string()
    }

    fn numeric_date(&self, date: NaiveDate) -> String {
        date.format("%m/%d/%Y").to_string()
    }

    fn timestamp(&self, at: NaiveDateTime) -> String {
        at.format("%A, %B %-d, %Y at %H:%M").to_string()
    }

    fn insight_text(&self, kind: &InsightKind) -> (String, String) {
        match kind {
            InsightKind::PeriodSummary {
                total_days,
                work_days,
                weekend_days,
            } => (
                "Absence Period Analyzed".into(),
                format!(
                    "Your absence lasts {total_days} days, including {work_days} work days and {weekend_days} weekend days."
                ),
            ),
            InsightKind::LongAbsence { .. } => (
                "Long Absence Detected".into(),
                "Consider splitting the absence or planning a handover of responsibilities.".into(),
            ),
            InsightKind::OptimizedPeriod { .. } => (
                "Optimized Period".into(),
                "Your period includes more weekend days than work days, which maximizes time off."
                    .into(),
            ),
            InsightKind::TemporalAnalysis { start, end, weeks } => (
                "Temporal Analysis".into(),
                format!(
                    "The period starts on {} and ends on {}, spanning {weeks} full week(s).",
                    self.long_date(*start),
                    self.long_date(*end)
                ),
            ),
            InsightKind::CompensationSummary {
                presential_days_lost,
                estimated_months,
            } => (
                "Compensation Calculated".into(),
                format!(
                    "You will need to make up {presential_days_lost} presential days over roughly {estimated_months} month(s)."
                ),
            ),
            InsightKind::LongCompensation { .. } => (
                "Long Compensation Period".into(),
                "The compensation period is long. Consider negotiating alternatives with management."
                    .into(),
            ),
            InsightKind::ScheduleDistribution { weeks } => (
                "Compensation Schedule".into(),
                format!(
                    "Compensation is spread over {weeks} weeks, using Mondays and Fridays."
                ),
            ),
            InsightKind::CompensationWindow { first, last } => (
                "Compensation Window".into(),
                format!(
                    "Compensation starts on {} and ends on {}.",
                    self.long_date(*first),
                    self.long_date(*last)
                ),
            ),
        }
    }

    fn labels(&self) -> &'static ExportLabels {
        &EN_LABELS
    }
}

static PT_BR: PortugueseBrazil = PortugueseBrazil;
static EN: English = English;

/// Selectable built-in locales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LocaleKind {
    #[default]
    PtBr,
    En,
}

impl LocaleKind {
    pub fn locale(self) -> &'static dyn Locale {
        match self {
            LocaleKind::PtBr => &PT_BR,
            LocaleKind::En => &EN,
        }
    }
}

impl FromStr for LocaleKind {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pt-br" | "pt_br" | "pt" => Ok(LocaleKind::PtBr),
            "en" | "en-us" | "en_us" => Ok(LocaleKind::En),
            other => Err(PlannerError::UnknownLocale(other.to_string())),
        }
    }
}

impl fmt::Display for LocaleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.locale().code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn pt_br_weekday_names() {
        let locale = PortugueseBrazil;
        // Sun May 11 through Sat May 17, 2025
        let names: Vec<String> = (11..=17)
            .map(|d| locale.weekday_name(date(2025, 5, d)))
            .collect();
        assert_eq!(names, PT_WEEKDAYS);
    }

    #[test]
    fn pt_br_date_formats() {
        let locale = PortugueseBrazil;
        let d = date(2025, 5, 10);
        assert_eq!(locale.long_date(d), "10 de maio de 2025");
        assert_eq!(locale.short_date(d), "sáb, 10 de mai");
        assert_eq!(locale.numeric_date(d), "10/05/2025");
        assert_eq!(locale.long_date(date(2025, 3, 1)), "1 de março de 2025");
    }

    #[test]
    fn pt_br_timestamp() {
        let at = date(2025, 5, 10).and_hms_opt(9, 5, 0).unwrap();
        assert_eq!(
            PortugueseBrazil.timestamp(at),
            "sábado, 10 de maio de 2025 às 09:05"
        );
    }

    #[test]
    fn english_date_formats() {
        let locale = English;
        let d = date(2025, 5, 10);
        assert_eq!(locale.weekday_name(d), "Saturday");
        assert_eq!(locale.long_date(d), "May 10, 2025");
        assert_eq!(locale.short_date(d), "Sat, May 10");
        assert_eq!(locale.numeric_date(d), "05/10/2025");
    }

    #[test]
    fn insight_text_uses_locale_dates() {
        let kind = InsightKind::CompensationWindow {
            first: date(2025, 5, 16),
            last: date(2025, 5, 23),
        };
        let (title, description) = PortugueseBrazil.insight_text(&kind);
        assert_eq!(title, "Período de Compensação");
        assert_eq!(
            description,
            "A compensação iniciará em 16 de maio de 2025 e terminará em 23 de maio de 2025."
        );
    }

    #[test]
    fn parse_locale_kind() {
        assert_eq!("pt-BR".parse::<LocaleKind>().unwrap(), LocaleKind::PtBr);
        assert_eq!("en".parse::<LocaleKind>().unwrap(), LocaleKind::En);
        assert!("fr".parse::<LocaleKind>().is_err());
        assert_eq!(LocaleKind::default().to_string(), "pt-br");
    }
}
