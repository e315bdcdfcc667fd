//! Network statistics handler.

use serde::Serialize;
use tabled::Tabled;
use tetherly_core::format;
use tetherly_core::{Bandwidth, Controller, HotspotStore, NetworkStats, StatusCounts, UsageSample};

use crate::cli::{GlobalOpts, OutputFormat, StatsArgs};
use crate::output;

const HISTORY_BAR_WIDTH: usize = 30;

/// Everything the dashboard's stats panel shows, in one serializable view.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StatsReport {
    network: NetworkStats,
    live_bandwidth: Bandwidth,
    devices: StatusCounts,
    active_vouchers: usize,
    max_clients: u32,
    capacity_pct: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    history: Option<Vec<UsageSample>>,
}

impl StatsReport {
    fn collect(store: &HotspotStore, history: bool) -> Self {
        Self {
            network: store.network_stats().clone(),
            live_bandwidth: store.total_bandwidth(),
            devices: store.status_counts(),
            active_vouchers: store.active_vouchers().count(),
            max_clients: store.hotspot_config().max_clients,
            capacity_pct: store.capacity_ratio() * 100.0,
            history: history.then(tetherly_core::seed::usage_history),
        }
    }
}

#[derive(Tabled)]
struct HistoryRow {
    #[tabled(rename = "Hour")]
    hour: String,
    #[tabled(rename = "Down")]
    down: String,
    #[tabled(rename = "Up")]
    up: String,
    #[tabled(rename = "")]
    bar: String,
}

fn detail(report: &StatsReport) -> String {
    let net = &report.network;
    let counts = report.devices;
    let mut out = [
        format!(
            "Live:        {} down / {} up",
            format::speed_mbps(report.live_bandwidth.download_mbps),
            format::speed_mbps(report.live_bandwidth.upload_mbps)
        ),
        format!(
            "Peak:        {} down / {} up",
            format::speed_mbps(net.peak_download_mbps),
            format::speed_mbps(net.peak_upload_mbps)
        ),
        format!(
            "Transferred: {} down / {} up",
            format::data_mb(net.total_download_mb),
            format::data_mb(net.total_upload_mb)
        ),
        format!("Uptime:      {}", format::duration_minutes(net.uptime_minutes)),
        format!(
            "Devices:     {} connected, {} limited, {} blocked",
            counts.connected, counts.limited, counts.blocked
        ),
        format!(
            "Capacity:    {}/{} {} {:.0}%",
            counts.connected,
            report.max_clients,
            format::usage_bar(report.capacity_pct, 20),
            report.capacity_pct
        ),
        format!("Vouchers:    {} active", report.active_vouchers),
        format!("Today:       {} connections", net.total_connections_today),
        format!("Blocked:     {} attempts", net.blocked_attempts),
    ]
    .join("\n");

    if let Some(history) = &report.history {
        out.push_str("\n\n");
        out.push_str(&history_table(history));
    }
    out
}

fn history_table(history: &[UsageSample]) -> String {
    let peak = history
        .iter()
        .map(|s| s.download_mb + s.upload_mb)
        .fold(0.0_f64, f64::max);
    let rows: Vec<HistoryRow> = history
        .iter()
        .map(|s| {
            let total = s.download_mb + s.upload_mb;
            let pct = if peak > 0.0 { total / peak * 100.0 } else { 0.0 };
            HistoryRow {
                hour: s.hour.clone(),
                down: format::data_mb(s.download_mb),
                up: format::data_mb(s.upload_mb),
                bar: format::usage_bar(pct, HISTORY_BAR_WIDTH),
            }
        })
        .collect();
    output::render_table(&rows)
}

pub fn handle(controller: &Controller, args: StatsArgs, global: &GlobalOpts) {
    let report = StatsReport::collect(controller.store(), args.history);
    let format = global.output_format();
    let out = match format {
        OutputFormat::Plain => format!(
            "{:.1}\t{:.1}",
            report.live_bandwidth.download_mbps, report.live_bandwidth.upload_mbps
        ),
        _ => output::render_single(format, &report, detail, |_| String::new()),
    };
    output::print_output(&out, global.quiet);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_reflects_seeded_store() {
        let store = HotspotStore::seeded().with_rng_seed(7);
        let report = StatsReport::collect(&store, false);
        assert_eq!(report.devices.total(), 20);
        assert_eq!(report.network.blocked_attempts, 7);
        assert!(report.history.is_none());
        assert!((report.capacity_pct - 150.0).abs() < 1e-9);
    }

    #[test]
    fn history_table_has_a_row_per_hour() {
        let table = history_table(&tetherly_core::seed::usage_history());
        assert!(table.contains("00:00"));
        assert!(table.contains("23:00"));
    }

    #[test]
    fn detail_includes_history_only_when_requested() {
        let store = HotspotStore::seeded().with_rng_seed(7);
        assert!(!detail(&StatsReport::collect(&store, false)).contains("12:00"));
        assert!(detail(&StatsReport::collect(&store, true)).contains("12:00"));
    }
}
