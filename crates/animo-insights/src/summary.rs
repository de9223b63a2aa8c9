//! Template-based report text: summary, recommendations, patterns, triggers.

use animo_core::report::{Pattern, TriggerFrequency};

use crate::aggregate::{Aggregates, LabelCounts};

pub const NO_DATA_SUMMARY: &str = "Aún no hay registros para este rango.";

const WEEKDAY_NAMES: [&str; 7] = ["Dom", "Lun", "Mar", "Mié", "Jue", "Vie", "Sáb"];

const INTENSE_MEAN: f64 = 7.0;
const INTENSE_MIN_COUNT: usize = 2;
const MAX_INTENSE: usize = 3;
const MAX_TRIGGERS: usize = 3;

/// The first two labels joined with " y ".
fn top_two(counts: &LabelCounts) -> String {
    counts
        .iter()
        .take(2)
        .map(|(label, _)| label.as_str())
        .collect::<Vec<_>>()
        .join(" y ")
}

/// One decimal, halves rounded up.
fn one_decimal(value: f64) -> String {
    format!("{:.1}", (value * 10.0).round() / 10.0)
}

#[must_use]
pub fn summarize(aggregates: &Aggregates) -> String {
    if aggregates.total == 0 {
        return NO_DATA_SUMMARY.to_string();
    }

    let mut parts = vec![
        format!("Has registrado {} entradas en el periodo.", aggregates.total),
        format!(
            "Aproximadamente un {}% incluyen emociones agradables.",
            aggregates.pleasant_pct().round()
        ),
    ];
    if !aggregates.positive_areas.is_empty() {
        parts.push(format!(
            "Tienden a ser agradables cuando aparece: {}.",
            top_two(&aggregates.positive_areas)
        ));
    }
    if !aggregates.negative_areas.is_empty() {
        parts.push(format!(
            "Aparecen emociones desafiantes cuando surge: {}.",
            top_two(&aggregates.negative_areas)
        ));
    }
    parts.join(" ")
}

#[must_use]
pub fn recommendations(aggregates: &Aggregates) -> Vec<String> {
    let mut out = Vec::new();

    let intense: Vec<String> = aggregates
        .emotion_stats
        .iter()
        .filter(|stat| stat.mean >= INTENSE_MEAN && stat.count >= INTENSE_MIN_COUNT)
        .take(MAX_INTENSE)
        .map(|stat| format!("{} (avg {})", stat.name, one_decimal(stat.mean)))
        .collect();
    if !intense.is_empty() {
        out.push(format!(
            "Observa las emociones más intensas: {}.",
            intense.join(", ")
        ));
    }
    if !aggregates.positive_areas.is_empty() {
        out.push(format!(
            "Potencia lo que te sienta bien: {}.",
            top_two(&aggregates.positive_areas)
        ));
    }
    if !aggregates.negative_areas.is_empty() {
        out.push(format!(
            "Planifica apoyos para contextos desafiantes: {}.",
            top_two(&aggregates.negative_areas)
        ));
    }
    out
}

fn evidence(top: &[(usize, usize)]) -> String {
    top.iter()
        .map(|(_, count)| format!("{count} registro(s)"))
        .collect::<Vec<_>>()
        .join(" / ")
}

/// Hour-of-day and day-of-week signals, each only when it has data.
#[must_use]
pub fn patterns(aggregates: &Aggregates) -> Vec<Pattern> {
    let mut out = Vec::new();

    let hours = aggregates.top_hours();
    if !hours.is_empty() {
        let names: Vec<String> = hours.iter().map(|(hour, _)| format!("{hour}:00")).collect();
        out.push(Pattern {
            description: format!("Franja horaria más registrada: {}", names.join(" y ")),
            evidence: evidence(&hours),
        });
    }

    let days = aggregates.top_weekdays();
    if !days.is_empty() {
        let names: Vec<&str> = days.iter().map(|(day, _)| WEEKDAY_NAMES[*day]).collect();
        out.push(Pattern {
            description: format!("Días con más registros: {}", names.join(" y ")),
            evidence: evidence(&days),
        });
    }
    out
}

#[must_use]
pub fn top_triggers(aggregates: &Aggregates) -> Vec<TriggerFrequency> {
    aggregates
        .area_counts
        .iter()
        .take(MAX_TRIGGERS)
        .map(|(area, count)| TriggerFrequency {
            trigger: area.clone(),
            frequency: *count,
        })
        .collect()
}
