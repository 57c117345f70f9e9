//! Precision timing and named timers

use diagnostics_logger::prelude::*;
use std::thread;
use std::time::Duration;

fn main() {
    let logger = Logger::builder().precision(true).build();
    let diagnostics = Diagnostics::with_logger(logger);
    let timer = diagnostics.timer();

    timer.start("request", false);
    diagnostics.logger().info("request received");

    thread::sleep(Duration::from_millis(3));
    diagnostics.logger().info("query done");

    thread::sleep(Duration::from_millis(2));
    diagnostics.logger().info("response rendered");

    // Misuse is reported as a warning entry.
    timer.start("request", false);

    if let Some(elapsed) = timer.get("request", Some(TimeUnit::Millis), true) {
        println!("request took {} ms", elapsed);
    }

    for entry in diagnostics.logger().drain_resolved(ResolveOptions::PLAIN) {
        println!(
            "{:>10} {:>10}  {}: {}",
            entry.delta_ms().unwrap_or("-"),
            entry.offset_ms().unwrap_or("-"),
            entry.level.name(),
            entry.message
        );
    }
}
