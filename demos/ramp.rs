//! Print an open and a close ramp for every open mode.
//!
//! Run with: cargo run --example ramp

use window_openness::config::WindowConfig;
use window_openness::openness::Target;
use window_openness::report::format_report;
use window_openness::simulate::simulate;
use window_openness::types::{OpenMode, OutputFormat, Rect};

fn main() {
    let rect = Rect::new(0, 0, 320, 160);

    for mode in [OpenMode::Top, OpenMode::Center, OpenMode::Bottom, OpenMode::None] {
        let config = WindowConfig {
            open_mode: mode,
            step: 32,
            ..WindowConfig::default()
        };
        for target in [Target::Open, Target::Closed] {
            match simulate(&config, rect, target) {
                Ok(report) => print!("{}", format_report(&report, OutputFormat::Human)),
                Err(e) => eprintln!("{:?} {}: {}", mode, target, e),
            }
            println!();
        }
    }
}
