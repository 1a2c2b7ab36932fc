//! Text serializations of a report: full text, JSON, CSV and a brief plain-text summary.

use std::fmt::{self, Write};
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::calendar;
use crate::compensation::{self, CompensationResult};
use crate::day::{self, CalendarResult};
use crate::error::PlannerError;
use crate::locale::Locale;
use crate::report::{self, ReportData, ReportMode};

const BANNER_WIDTH: usize = 60;
const SECTION_WIDTH: usize = 30;
const BRIEF_RULE_WIDTH: usize = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Txt,
    Json,
    Csv,
    Brief,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Txt | ExportFormat::Brief => "txt",
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::Txt | ExportFormat::Brief => "text/plain;charset=utf-8",
            ExportFormat::Json => "application/json;charset=utf-8",
            ExportFormat::Csv => "text/csv;charset=utf-8",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "txt" | "text" => Ok(ExportFormat::Txt),
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            "brief" => Ok(ExportFormat::Brief),
            other => Err(PlannerError::UnknownFormat(other.to_string())),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ExportFormat::Txt => "txt",
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
            ExportFormat::Brief => "brief",
        })
    }
}

/// Everything needed to render one export.
#[derive(Clone, Copy)]
pub struct ExportRequest<'a> {
    pub mode: ReportMode,
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// Wall-clock time the export is produced at, already in the user's time zone.
    pub generated_at: NaiveDateTime,
    pub locale: &'a dyn Locale,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Period {
    pub start: String,
    pub end: String,
    pub start_iso: NaiveDate,
    pub end_iso: NaiveDate,
}

/// The JSON export document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportDocument {
    pub mode: ReportMode,
    pub locale: String,
    pub period: Period,
    pub data: ReportData,
    pub generated_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calendar: Option<CalendarResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compensation: Option<CompensationResult>,
}

impl ReportDocument {
    pub fn build(req: &ExportRequest<'_>) -> Self {
        let locale = req.locale;
        let (calendar, compensation) = match req.mode {
            ReportMode::Calendar => (
                Some(day::generate_calendar(req.start, req.end, locale)),
                None,
            ),
            ReportMode::Compensation => (
                None,
                Some(compensation::calculate_compensation(
                    req.start, req.end, locale,
                )),
            ),
        };

        Self {
            mode: req.mode,
            locale: locale.code().to_string(),
            period: Period {
                start: locale.long_date(req.start),
                end: locale.long_date(req.end),
                start_iso: req.start,
                end_iso: req.end,
            },
            data: report::build_report(req.mode, req.start, req.end, locale),
            generated_at: locale.timestamp(req.generated_at),
            calendar,
            compensation,
        }
    }
}

/// Render a report in the requested format.
pub fn render(format: ExportFormat, req: &ExportRequest<'_>) -> Result<String, PlannerError> {
    match format {
        ExportFormat::Txt => render_text(req),
        ExportFormat::Json => Ok(serde_json::to_string_pretty(&ReportDocument::build(req))?),
        ExportFormat::Csv => render_csv(req),
        ExportFormat::Brief => render_brief(req),
    }
}

/// Read back a JSON export.
pub fn parse_json(content: &str) -> Result<ReportDocument, PlannerError> {
    Ok(serde_json::from_str(content)?)
}

/// Download file name, e.g. `relatorio-ausencia_2025-05-06_10-30-00.txt`.
pub fn file_name(locale: &dyn Locale, generated_at: NaiveDateTime, format: ExportFormat) -> String {
    format!(
        "{}_{}.{}",
        locale.labels().file_prefix,
        generated_at.format("%Y-%m-%d_%H-%M-%S"),
        format.extension()
    )
}

fn render_text(req: &ExportRequest<'_>) -> Result<String, PlannerError> {
    let locale = req.locale;
    let labels = locale.labels();
    let data = report::build_report(req.mode, req.start, req.end, locale);
    let banner = "=".repeat(BANNER_WIDTH);
    let rule = "-".repeat(SECTION_WIDTH);
    let mut out = String::new();

    writeln!(out, "{banner}")?;
    writeln!(out, "{:^width$}", labels.report_title, width = BANNER_WIDTH)?;
    writeln!(out, "{banner}\n")?;

    writeln!(
        out,
        "{}: {} {} {}",
        labels.period,
        locale.long_date(req.start),
        labels.until,
        locale.long_date(req.end)
    )?;
    let mode_label = match req.mode {
        ReportMode::Calendar => labels.mode_calendar,
        ReportMode::Compensation => labels.mode_compensation,
    };
    writeln!(out, "{}: {mode_label}", labels.mode)?;
    writeln!(
        out,
        "{}: {}\n",
        labels.generated_at,
        locale.timestamp(req.generated_at)
    )?;

    writeln!(out, "{}", labels.executive_summary)?;
    writeln!(out, "{rule}")?;
    writeln!(out, "• {}: {}", labels.total_days, data.summary.total_days)?;
    writeln!(out, "• {}: {}", labels.work_days, data.summary.work_days)?;
    writeln!(out, "• {}: {}", labels.weekend_days, data.summary.weekend_days)?;
    writeln!(
        out,
        "• {}: {}%\n",
        labels.monthly_impact, data.summary.impact_percentage
    )?;

    match req.mode {
        ReportMode::Calendar => {
            writeln!(out, "{}", labels.detailed_calendar)?;
            writeln!(out, "{rule}")?;
            for day in day::enumerate_days(req.start, req.end, locale) {
                writeln!(out, "{} — {}", day.formatted_date, day.weekday_name)?;
            }
        }
        ReportMode::Compensation => {
            let result = compensation::calculate_compensation(req.start, req.end, locale);
            writeln!(out, "{}", labels.compensation_calculation)?;
            writeln!(out, "{rule}")?;
            writeln!(
                out,
                "{}: {}",
                labels.presential_days_lost, result.presential_days_lost
            )?;
            writeln!(
                out,
                "{}: {}",
                labels.total_to_compensate, result.total_compensation_days
            )?;
            writeln!(
                out,
                "{}: {} {}\n",
                labels.estimated_time, result.estimated_months, labels.months_unit
            )?;

            writeln!(out, "{}", labels.compensation_schedule)?;
            writeln!(out, "{rule}")?;
            for day in &result.compensation_days {
                writeln!(
                    out,
                    "{} {}: {} ({})",
                    labels.week, day.week_number, day.weekday_name, day.formatted_date
                )?;
            }
        }
    }

    writeln!(out, "\n{}", labels.insights)?;
    writeln!(out, "{rule}")?;
    for (index, insight) in data.insights.iter().enumerate() {
        writeln!(out, "{}. {}", index + 1, insight.title)?;
        writeln!(out, "   {}\n", insight.description)?;
    }

    Ok(out)
}

/// Quote a CSV field when it contains a delimiter, quote or line break.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn render_csv(req: &ExportRequest<'_>) -> Result<String, PlannerError> {
    let locale = req.locale;
    let labels = locale.labels();
    let mut out = String::new();

    match req.mode {
        ReportMode::Calendar => {
            writeln!(out, "{}", labels.csv_calendar_header)?;
            for day in day::enumerate_days(req.start, req.end, locale) {
                let kind = if calendar::is_weekend(day.date.weekday()) {
                    labels.weekend_day
                } else {
                    labels.work_day
                };
                writeln!(
                    out,
                    "{},{},{},{}",
                    csv_field(&locale.numeric_date(day.date)),
                    csv_field(&day.weekday_name),
                    csv_field(kind),
                    csv_field(&day.formatted_date)
                )?;
            }
        }
        ReportMode::Compensation => {
            writeln!(out, "{}", labels.csv_compensation_header)?;
            let result = compensation::calculate_compensation(req.start, req.end, locale);
            for day in &result.compensation_days {
                writeln!(
                    out,
                    "{},{},{},{},{}",
                    day.week_number,
                    csv_field(&locale.numeric_date(day.date)),
                    csv_field(&day.weekday_name),
                    csv_field(labels.compensation_day),
                    csv_field(&day.formatted_date)
                )?;
            }
        }
    }

    Ok(out)
}

fn render_brief(req: &ExportRequest<'_>) -> Result<String, PlannerError> {
    let locale = req.locale;
    let labels = locale.labels();
    let start = locale.numeric_date(req.start);
    let end = locale.numeric_date(req.end);
    let mut out = String::new();

    match req.mode {
        ReportMode::Calendar => {
            let result = day::generate_calendar(req.start, req.end, locale);
            writeln!(
                out,
                "📅 {}: {start} {} {end} ({} {})",
                labels.period, labels.until, result.duration, labels.days_unit
            )?;
            writeln!(out, "{}", "-".repeat(BRIEF_RULE_WIDTH))?;
            for day in &result.days {
                writeln!(out, "{} — {}", locale.numeric_date(day.date), day.weekday_name)?;
            }
        }
        ReportMode::Compensation => {
            let result = compensation::calculate_compensation(req.start, req.end, locale);
            writeln!(out, "🗓️ {}: {start} → {end}", labels.absence)?;
            writeln!(
                out,
                "⏳ {}: {} {}",
                labels.duration, result.total_days, labels.days_unit
            )?;
            writeln!(
                out,
                "📌 {}: {}\n",
                labels.presential_days_lost, result.presential_days_lost
            )?;
            writeln!(out, "--- {} ---", labels.converted_days)?;
            for day in &result.compensation_days {
                writeln!(
                    out,
                    "• {} {}: {} ({})",
                    labels.week,
                    day.week_number,
                    day.weekday_name,
                    locale.numeric_date(day.date)
                )?;
            }
            writeln!(out, "\n--- {} ---", labels.final_summary)?;
            writeln!(
                out,
                "🔁 {}: {}",
                labels.total_converted, result.total_compensation_days
            )?;
            writeln!(
                out,
                "📆 {}: {} {}",
                labels.estimated_time, result.estimated_months, labels.months_unit
            )?;
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::{English, PortugueseBrazil};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn request(mode: ReportMode, locale: &dyn Locale) -> ExportRequest<'_> {
        ExportRequest {
            mode,
            start: date(2025, 5, 6),
            end: date(2025, 5, 12),
            generated_at: date(2025, 5, 13).and_hms_opt(10, 30, 0).unwrap(),
            locale,
        }
    }

    #[test]
    fn text_report_calendar() {
        let text = render(
            ExportFormat::Txt,
            &request(ReportMode::Calendar, &PortugueseBrazil),
        )
        .unwrap();
        assert!(text.starts_with(&"=".repeat(60)));
        assert!(text.contains("RELATÓRIO DE AUSÊNCIA E COMPENSAÇÃO"));
        assert!(text.contains("Período: 6 de maio de 2025 até 12 de maio de 2025\n"));
        assert!(text.contains("Modo: Visualização de Calendário\n"));
        assert!(text.contains("Gerado em: terça-feira, 13 de maio de 2025 às 10:30\n"));
        assert!(text.contains("• Total de dias: 7\n"));
        assert!(text.contains("• Impacto mensal: 23%\n"));
        assert!(text.contains("6 de maio de 2025 — terça-feira\n"));
        assert!(text.contains("12 de maio de 2025 — segunda-feira\n"));
        assert!(text.contains("1. Período de Ausência Analisado\n"));
        assert!(text.contains("2. Análise Temporal\n"));
    }

    #[test]
    fn text_report_compensation() {
        let text = render(
            ExportFormat::Txt,
            &request(ReportMode::Compensation, &PortugueseBrazil),
        )
        .unwrap();
        assert!(text.contains("CÁLCULO DE COMPENSAÇÃO\n"));
        assert!(text.contains("Dias presenciais perdidos: 3\n"));
        assert!(text.contains("Tempo estimado: 1 mês(es)\n"));
        assert!(text.contains("Semana 1: sexta-feira (16 de maio de 2025)\n"));
        assert!(text.contains("Semana 1: segunda-feira (19 de maio de 2025)\n"));
        assert!(text.contains("Semana 2: sexta-feira (23 de maio de 2025)\n"));
        assert!(text.contains("5. Período de Compensação\n"));
    }

    #[test]
    fn csv_calendar_rows() {
        let csv = render(
            ExportFormat::Csv,
            &request(ReportMode::Calendar, &PortugueseBrazil),
        )
        .unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0], "Data,Dia da Semana,Tipo,Data Formatada");
        assert_eq!(
            lines[1],
            "06/05/2025,terça-feira,Dia Útil,6 de maio de 2025"
        );
        assert_eq!(lines[5], "10/05/2025,sábado,Fim de Semana,10 de maio de 2025");
    }

    #[test]
    fn csv_compensation_rows() {
        let csv = render(
            ExportFormat::Csv,
            &request(ReportMode::Compensation, &PortugueseBrazil),
        )
        .unwrap();
        assert_eq!(
            csv,
            "Semana,Data,Dia da Semana,Tipo,Data Formatada\n\
             1,16/05/2025,sexta-feira,Compensação,16 de maio de 2025\n\
             1,19/05/2025,segunda-feira,Compensação,19 de maio de 2025\n\
             2,23/05/2025,sexta-feira,Compensação,23 de maio de 2025\n"
        );
    }

    #[test]
    fn csv_quotes_english_long_dates() {
        let csv = render(ExportFormat::Csv, &request(ReportMode::Calendar, &English)).unwrap();
        assert_eq!(
            csv.lines().nth(1).unwrap(),
            "05/06/2025,Tuesday,Work Day,\"May 6, 2025\""
        );
    }

    #[test]
    fn brief_compensation_summary() {
        let text = render(
            ExportFormat::Brief,
            &request(ReportMode::Compensation, &PortugueseBrazil),
        )
        .unwrap();
        assert!(text.starts_with("🗓️ Ausência: 06/05/2025 → 12/05/2025\n"));
        assert!(text.contains("⏳ Duração: 7 dias\n"));
        assert!(text.contains("• Semana 2: sexta-feira (23/05/2025)\n"));
        assert!(text.contains("🔁 Total convertidos: 3\n"));
        assert!(text.ends_with("📆 Tempo estimado: 1 mês(es)\n"));
    }

    #[test]
    fn brief_calendar_listing() {
        let text = render(
            ExportFormat::Brief,
            &request(ReportMode::Calendar, &PortugueseBrazil),
        )
        .unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "📅 Período: 06/05/2025 até 12/05/2025 (7 dias)");
        assert_eq!(lines.len(), 9);
        assert_eq!(lines[8], "12/05/2025 — segunda-feira");
    }

    #[test]
    fn json_export_parses_back() {
        let req = request(ReportMode::Compensation, &PortugueseBrazil);
        let json = render(ExportFormat::Json, &req).unwrap();
        let parsed = parse_json(&json).unwrap();
        assert_eq!(parsed, ReportDocument::build(&req));

        let compensation = parsed.compensation.unwrap();
        assert_eq!(compensation.presential_days_lost, 3);
        assert_eq!(compensation.total_compensation_days, 3);
        assert_eq!(compensation.estimated_months, 1);
        assert_eq!(parsed.data.summary.impact_percentage, 23);
        assert!(parsed.calendar.is_none());
    }

    #[test]
    fn json_uses_camel_case_keys() {
        let json = render(
            ExportFormat::Json,
            &request(ReportMode::Calendar, &PortugueseBrazil),
        )
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["mode"], "calendar");
        assert_eq!(value["period"]["startIso"], "2025-05-06");
        assert_eq!(value["data"]["summary"]["weekendDays"], 2);
        assert_eq!(value["data"]["insights"][0]["kind"]["rule"], "periodSummary");
        assert_eq!(value["calendar"]["days"][0]["weekdayName"], "terça-feira");
        assert!(value.get("compensation").is_none());
    }

    #[test]
    fn parse_json_rejects_garbage() {
        assert!(matches!(parse_json("{"), Err(PlannerError::Json(_))));
    }

    #[test]
    fn file_names_follow_locale_prefix() {
        let at = date(2025, 5, 6).and_hms_opt(10, 30, 0).unwrap();
        assert_eq!(
            file_name(&PortugueseBrazil, at, ExportFormat::Txt),
            "relatorio-ausencia_2025-05-06_10-30-00.txt"
        );
        assert_eq!(
            file_name(&English, at, ExportFormat::Json),
            "absence-report_2025-05-06_10-30-00.json"
        );
    }

    #[test]
    fn parse_format() {
        assert_eq!("CSV".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert_eq!("brief".parse::<ExportFormat>().unwrap(), ExportFormat::Brief);
        assert!("pdf".parse::<ExportFormat>().is_err());
        assert_eq!(ExportFormat::Brief.extension(), "txt");
    }
}
