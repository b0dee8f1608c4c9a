//! Handler for the `report` command.

use serde_json::json;
use tabled::{Table, Tabled};

use crate::adapter::inbound::cli::command::ReportArgs;
use crate::adapter::inbound::cli::output;
use crate::adapter::outbound::sqlite::{SessionReport, SqliteReportReader};
use crate::domain::ExecutionMode;
use crate::error::Result;
use crate::infrastructure::config::Config;

#[derive(Tabled)]
struct ReportRow {
    #[tabled(rename = "Metric")]
    metric: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

pub fn execute(args: &ReportArgs) -> Result<()> {
    let database = match &args.db {
        Some(path) => path.to_string_lossy().to_string(),
        None => Config::load(&args.config)?.database,
    };
    let mode = args.mode.map(ExecutionMode::from);
    let report = SqliteReportReader::new(database.as_str()).load(mode)?;

    if output::is_json() {
        output::json_output(json!({
            "command": "report",
            "database": database,
            "mode": mode.map(|m| m.as_str()),
            "orders_total": report.total_orders,
            "orders_buy": report.buy_orders,
            "orders_sell": report.sell_orders,
            "fills_total": report.fills,
            "open_positions": report.open_positions,
            "closed_positions": report.closed_positions,
            "realized_pnl_usd": report.realized_pnl_usd,
        }));
        return Ok(());
    }

    output::header(env!("CARGO_PKG_VERSION"));
    output::field("Database", &database);
    output::field("Mode", mode.map_or("all", |m| m.as_str()));
    output::section("Session report");
    output::lines(&Table::new(rows(&report)).to_string());
    Ok(())
}

fn rows(report: &SessionReport) -> Vec<ReportRow> {
    vec![
        ReportRow { metric: "Orders", value: report.total_orders.to_string() },
        ReportRow { metric: "Buy orders", value: report.buy_orders.to_string() },
        ReportRow { metric: "Sell orders", value: report.sell_orders.to_string() },
        ReportRow { metric: "Fills", value: report.fills.to_string() },
        ReportRow { metric: "Open positions", value: report.open_positions.to_string() },
        ReportRow { metric: "Closed positions", value: report.closed_positions.to_string() },
        ReportRow { metric: "Realized PnL (USD)", value: output::signed(report.realized_pnl_usd, 4) },
    ]
}
