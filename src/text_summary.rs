//! Line-oriented renderers for CLI output.
//!
//! Human-readable summaries and the `data-<name>-*` definitions consumed by
//! the paper/site build both format already-aggregated records.

use crate::model::BenchSummary;

/// Pre-formatted lines for text output.
pub(crate) struct TextSummary {
    pub lines: Vec<String>,
}

/// Human-readable block per record, in the order given.
pub(crate) fn build_text_summary(records: &[BenchSummary]) -> TextSummary {
    let mut lines = Vec::new();

    for rec in records {
        let latency = rec.latency.estimate;
        let draw = rec.draw_latency.estimate;

        lines.push(rec.source_name.clone());
        lines.push(format!("frame latency: {latency:.3} ms"));
        lines.push(format!("draw latency: {draw:.3} ms"));
        lines.push(format!(
            "draw fraction: {:.1} %",
            rec.draw_fraction * 100.0
        ));
        lines.push(format!("fps: {:.1}", 1000.0 / latency.value));
        if let Some(frame_ms) = rec.frame_ms {
            lines.push(format!("elapsed/frames: {frame_ms:.3} ms"));
        }
    }

    TextSummary { lines }
}

/// Three `data-<name>-*` definitions per record: latency and draw latency in
/// ms with one decimal, draw fraction as a whole percentage.
pub(crate) fn build_definitions(records: &[BenchSummary]) -> TextSummary {
    let mut lines = Vec::with_capacity(records.len() * 3);

    for rec in records {
        let prefix = format!("data-{}-", rec.name);
        lines.push(format!(
            "{prefix}latency: {:.1}",
            rec.latency.estimate.value
        ));
        lines.push(format!(
            "{prefix}draw-latency: {:.1}",
            rec.draw_latency.estimate.value
        ));
        lines.push(format!(
            "{prefix}draw-fraction: {:.0}",
            rec.draw_fraction.value * 100.0
        ));
    }

    TextSummary { lines }
}
