//! Report formatting for ramp simulations.
//!
//! Pure functions: (RampReport, OutputFormat) → String.
//! No I/O, no side effects.

use crate::simulate::RampReport;
use crate::types::{OpenMode, OutputFormat};

/// Width of the openness bar in human output.
const BAR_WIDTH: u32 = 32;

/// Format a simulation report for output.
pub fn format_report(report: &RampReport, format: OutputFormat) -> String {
    match format {
        OutputFormat::Human => format_human(report),
        OutputFormat::Json => format_json(report),
    }
}

// ============================================================================
// HUMAN FORMAT
// ============================================================================

fn format_human(report: &RampReport) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "=== {} ramp ({} mode, step {}, max {}) ===\n",
        capitalize(&report.target),
        mode_name(report.open_mode),
        report.step,
        report.max_openness
    ));

    if report.frames.is_empty() {
        out.push_str("  (no animation: window snapped to target)\n");
    }
    for frame in &report.frames {
        out.push_str(&format!(
            "  {:>4}  {:>4}  {}  h={}\n",
            frame.frame,
            frame.openness,
            bar(frame.openness, report.max_openness),
            frame.visible_height
        ));
    }
    out.push('\n');

    out.push_str("=== Summary ===\n");
    out.push_str(&format!("Frames pumped:   {}\n", report.ticks));
    out.push_str(&format!("Final openness:  {}\n", report.final_openness));
    out.push_str(&format!(
        "Visible after:   {}\n",
        if report.visible_after { "yes" } else { "no" }
    ));

    out
}

fn bar(openness: u32, max: u32) -> String {
    let filled = (openness as u64 * BAR_WIDTH as u64 / max.max(1) as u64) as usize;
    let empty = BAR_WIDTH as usize - filled.min(BAR_WIDTH as usize);
    format!("[{}{}]", "█".repeat(filled), "░".repeat(empty))
}

fn mode_name(mode: OpenMode) -> &'static str {
    match mode {
        OpenMode::None => "none",
        OpenMode::Top => "top",
        OpenMode::Center => "center",
        OpenMode::Bottom => "bottom",
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// ============================================================================
// JSON FORMAT
// ============================================================================

fn format_json(report: &RampReport) -> String {
    serde_json::to_string_pretty(report).unwrap_or_else(|e| {
        // This should never happen with our types, but fail explicitly
        panic!("Failed to serialize report to JSON: {}", e)
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WindowConfig;
    use crate::openness::Target;
    use crate::simulate::{simulate, RampFrame};
    use crate::types::Rect;

    fn sample_report() -> RampReport {
        RampReport {
            target: "open".into(),
            open_mode: OpenMode::Center,
            step: 128,
            max_openness: 255,
            rect: Rect::new(0, 0, 100, 40),
            ticks: 2,
            frames: vec![
                RampFrame {
                    frame: 0,
                    openness: 0,
                    visible_height: 0,
                    visible_y: None,
                },
                RampFrame {
                    frame: 1,
                    openness: 128,
                    visible_height: 20,
                    visible_y: Some(10),
                },
            ],
            final_openness: 255,
            visible_after: true,
        }
    }

    #[test]
    fn human_format_lists_frames_and_summary() {
        let out = format_report(&sample_report(), OutputFormat::Human);
        assert!(out.starts_with("=== Open ramp (center mode, step 128, max 255) ==="));
        assert!(out.contains("h=20"));
        assert!(out.contains("Frames pumped:   2"));
        assert!(out.contains("Visible after:   yes"));
    }

    #[test]
    fn human_format_notes_snapped_windows() {
        let mut report = sample_report();
        report.frames.clear();
        report.ticks = 0;
        let out = format_report(&report, OutputFormat::Human);
        assert!(out.contains("no animation"));
    }

    #[test]
    fn bar_fills_proportionally() {
        assert_eq!(bar(0, 255).matches('█').count(), 0);
        assert_eq!(bar(255, 255).matches('█').count(), 32);
        assert_eq!(bar(128, 256).matches('░').count(), 16);
    }

    #[test]
    fn bar_handles_openness_near_u32_max() {
        assert_eq!(bar(4_000_000_000, 4_000_000_000).matches('█').count(), 32);
        assert_eq!(bar(2_000_000_000, 4_000_000_000).matches('█').count(), 16);
        assert_eq!(bar(u32::MAX, u32::MAX).matches('░').count(), 0);
    }

    #[test]
    fn huge_max_ramp_formats_without_overflow() {
        let config = WindowConfig {
            max_openness: 4_000_000_000,
            step: 1_000_000_000,
            ..WindowConfig::default()
        };
        let report = simulate(&config, Rect::new(0, 0, 640, 192), Target::Open).unwrap();
        assert_eq!(report.ticks, 4);

        let out = format_report(&report, OutputFormat::Human);
        assert!(out.contains("Final openness:  4000000000"));
        // last pumped frame sits at 3e9 of 4e9
        assert!(out.contains(&format!("[{}{}]", "█".repeat(24), "░".repeat(8))));
    }

    #[test]
    fn json_format_is_valid() {
        let out = format_report(&sample_report(), OutputFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["ticks"], 2);
        assert_eq!(value["open_mode"], "center");
        assert_eq!(value["frames"][1]["visible_y"], 10);
        assert_eq!(value["frames"][0]["visible_y"], serde_json::Value::Null);
    }
}
