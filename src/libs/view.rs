use super::formatter::{format_clock_time, format_duration, format_rate};
use super::histogram::{HistogramSnapshot, IntensityBand, HISTOGRAM_SIZE};
use super::messages::Message;
use super::metrics::Snapshot;
use prettytable::{row, Table};

/// Terminal rendering of engine snapshots. Reads snapshots only.
pub struct View {}

impl View {
    /// Summary table with the headline metrics.
    pub fn metrics_table(snapshot: &Snapshot) -> Table {
        let mut table = Table::new();
        table.add_row(row![
            Message::DashboardTypingTime,
            Message::DashboardClicks,
            Message::DashboardEfficiency,
            Message::DashboardActiveTime,
            Message::DashboardInactiveTime,
            Message::DashboardStatus
        ]);
        table.add_row(row![
            format_duration(snapshot.total_typing_seconds),
            snapshot.total_clicks,
            format!("{}%", format_rate(snapshot.efficiency_percent.clamp(0.0, 100.0))),
            format_duration(snapshot.total_active_seconds),
            format_duration(snapshot.total_inactive_seconds),
            snapshot.status
        ]);
        table
    }

    /// Programs ordered by attributed time, at most `limit` rows.
    pub fn programs_table(snapshot: &Snapshot, limit: usize) -> Table {
        let mut table = Table::new();
        table.add_row(row!["#", Message::DashboardProgramsHeader, "TIME"]);
        for (i, (label, seconds)) in snapshot.top_windows.iter().take(limit).enumerate() {
            table.add_row(row![i + 1, label, format_duration(*seconds)]);
        }
        table
    }

    /// One character per second-of-minute slot, banded by intensity.
    pub fn histogram_line(histogram: &HistogramSnapshot) -> String {
        (0..HISTOGRAM_SIZE)
            .map(|slot| {
                if histogram.buckets[slot] == 0 {
                    ' '
                } else {
                    match histogram.band(slot) {
                        IntensityBand::Low => '.',
                        IntensityBand::Medium => ':',
                        IntensityBand::High => '#',
                    }
                }
            })
            .collect()
    }

    /// Time markers every ten seconds, aligned with [`View::histogram_line`].
    pub fn histogram_axis() -> String {
        (0..HISTOGRAM_SIZE).step_by(10).map(|s| format!("{:<10}", s)).collect()
    }

    /// Clears the terminal and prints the full dashboard.
    pub fn dashboard(snapshot: &Snapshot, limit: usize) {
        print!("\x1B[2J\x1B[H");
        println!("{}\n", Message::DashboardHeader);
        Self::metrics_table(snapshot).printstd();
        Self::details(snapshot);

        println!("\n{}", Message::DashboardProgramsHeader);
        if snapshot.top_windows.is_empty() {
            println!("{}", Message::DashboardNoActivity);
        } else {
            Self::programs_table(snapshot, limit).printstd();
        }

        println!("\n{}", Message::DashboardHistogramHeader);
        println!("|{}|", Self::histogram_line(&snapshot.histogram));
        println!(" {}", Self::histogram_axis());
    }

    /// Final summary printed when tracking stops.
    pub fn summary(snapshot: &Snapshot, limit: usize) {
        println!("\n{}\n", Message::FinalSummaryHeader);
        Self::metrics_table(snapshot).printstd();
        Self::details(snapshot);
        if !snapshot.top_windows.is_empty() {
            Self::programs_table(snapshot, limit).printstd();
        }
    }

    fn details(snapshot: &Snapshot) {
        println!("{}: {}", Message::DashboardCurrentProgram, snapshot.current_window_label);
        println!(
            "{}: {}",
            Message::DashboardMostActiveProgram,
            snapshot.most_active_window.as_deref().unwrap_or("-")
        );
        println!(
            "{}: {}    {}: {}",
            Message::DashboardKeysPerMinute,
            format_rate(snapshot.keys_per_minute),
            Message::DashboardClicksPerMinute,
            format_rate(snapshot.clicks_per_minute)
        );
        println!("{}: {}", Message::DashboardSessionStart, format_clock_time(snapshot.session_start));
    }
}
