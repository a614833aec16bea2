//! Formatação das leituras para stdout.

use chrono::DateTime;
use radio_core::config::OutputFormat;
use radio_core::frame::ReceivedFrame;
use radio_core::reading::Reading;

const NANOS_PER_SEC: u64 = 1_000_000_000;

/// Formata o horário de recepção como `YYYY-MM-DD HH:MM:SS` (UTC).
///
/// Timestamps fora do intervalo do chrono saem como nanossegundos crus.
pub fn format_timestamp(timestamp_ns: u64) -> String {
    let secs = timestamp_ns / NANOS_PER_SEC;
    let nanos = (timestamp_ns % NANOS_PER_SEC) as u32;
    i64::try_from(secs)
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, nanos))
        .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| timestamp_ns.to_string())
}

/// Linha legível: horário, sensor, tipo, valor com unidade e sequência.
pub fn format_text(frame: &ReceivedFrame, sensor_name: &str) -> String {
    let kind = frame.payload.kind;
    let value = match kind.unit() {
        "" => format!("{:5.3}", frame.payload.value),
        unit => format!("{:5.3} {unit}", frame.payload.value),
    };
    format!(
        "{} {:<20} {:>13} = {} ({})",
        format_timestamp(frame.timestamp_ns),
        sensor_name,
        kind.label(),
        value,
        frame.payload.sequence_number
    )
}

pub fn render(
    format: OutputFormat,
    frame: &ReceivedFrame,
    sensor_name: &str,
) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Text => Ok(format_text(frame, sensor_name)),
        OutputFormat::Json => Reading::from(frame).to_json(),
    }
}
