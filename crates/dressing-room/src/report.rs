//! Plain-text rendering of scenario results.

use dressing_room_sim::ScenarioResult;
use std::fmt::Write;

/// Formats simulated minutes with one decimal.
pub fn format_minutes(minutes: f64) -> String {
    format!("{minutes:.1} minutes")
}

/// Renders the statistics block for one result.
pub fn format_result(result: &ScenarioResult) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = writeln!(
        out,
        "Total Scenario Time: {}",
        format_minutes(result.elapsed_minutes)
    );
    let _ = writeln!(out, "Total Customers: {}", result.customers);
    let _ = writeln!(out, "Average Items per Customer: {:.2}", result.avg_items);
    let _ = writeln!(
        out,
        "Average Time Used in Dressing Room: {}",
        format_minutes(result.avg_room_time_minutes)
    );
    let _ = write!(
        out,
        "Average Time Spent Waiting for Dressing Room: {}",
        format_minutes(result.avg_wait_time_minutes)
    );
    out
}

/// Renders a finished scenario as shown after each run.
pub fn format_finished(result: &ScenarioResult) -> String {
    format!(
        "Scenario Finished\n\nRooms = {}, Customers = {}\n{}",
        result.rooms,
        result.customers,
        format_result(result)
    )
}

/// Renders the optimal configuration summary.
pub fn format_optimal(result: &ScenarioResult) -> String {
    format!(
        "-------------------- Optimal Dressing Room Configuration --------------------\n\n\
         Optimal Scenario (Rooms: {}, Customers: {})\n\n{}",
        result.rooms,
        result.customers,
        format_result(result)
    )
}
