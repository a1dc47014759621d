//! Command handlers for CLI subcommands.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{info, warn};

use scheduler_models::{Granularity, WorkCenterId, WorkOrderId};
use scheduler_store::{MemoryStore, WorkOrderFilter};
use scheduler_timeline::calendar::format_iso;
use scheduler_timeline::{BarGeometry, ColumnWindow, TimelineBoard, TimelineConfig, VisibleColumn};

use crate::cli::{Commands, OutputFormat, ScheduleArgs, ViewportArgs};
use crate::input::load_schedule;

/// Result type for command operations.
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Fitted window plus load statistics, as printed by `fit`.
#[derive(Debug, Serialize)]
pub struct FitReport {
    pub granularity: Granularity,
    #[serde(flatten)]
    pub window: ColumnWindow,
    pub work_orders: usize,
    pub skipped: usize,
}

/// Execute a CLI command.
pub fn execute(command: Commands, config: TimelineConfig) -> Result<()> {
    match command {
        Commands::Fit { schedule, format } => cmd_fit(&schedule, config, format),
        Commands::Columns { schedule, viewport, format } => {
            cmd_columns(&schedule, &viewport, config, format)
        }
        Commands::Layout { schedule, viewport, all, row, status, format } => {
            let mut filter = WorkOrderFilter::new();
            if let Some(row) = row {
                filter = filter.with_work_center(row.into());
            }
            if let Some(status) = status {
                filter = filter.with_status(status);
            }
            cmd_layout(&schedule, &viewport, all, &filter, config, format)
        }
        Commands::Check { schedule, row, start, end, exclude } => {
            cmd_check(&schedule, config, &row, start, end, exclude.as_deref())
        }
    }
}

/// Loads the schedule and builds a board at the requested granularity.
pub fn open_board(
    schedule: &ScheduleArgs,
    config: TimelineConfig,
) -> Result<(TimelineBoard<MemoryStore>, usize)> {
    let loaded = load_schedule(&schedule.input)?;
    if loaded.skipped > 0 {
        warn!(skipped = loaded.skipped, "some schedule records were skipped");
    }
    let mut board = match schedule.today {
        Some(today) => TimelineBoard::with_today(loaded.store, config, today),
        None => TimelineBoard::new(loaded.store, config),
    };
    board.set_granularity(schedule.granularity.into());
    Ok((board, loaded.skipped))
}

/// Applies the pending scroll request unless an explicit offset was given.
fn apply_viewport(board: &mut TimelineBoard<MemoryStore>, viewport: &ViewportArgs) {
    let pending = board.take_scroll_request();
    let scroll = viewport
        .scroll
        .or(pending.map(|request| request.offset))
        .unwrap_or(0.0);
    board.set_viewport(scroll, viewport.viewport);
}

pub fn fit_report(board: &TimelineBoard<MemoryStore>, skipped: usize) -> FitReport {
    FitReport {
        granularity: board.granularity(),
        window: board.window(),
        work_orders: board.store().len(),
        skipped,
    }
}

fn cmd_fit(schedule: &ScheduleArgs, config: TimelineConfig, format: OutputFormat) -> Result<()> {
    let (board, skipped) = open_board(schedule, config)?;
    let report = fit_report(&board, skipped);

    match format {
        OutputFormat::Table => {
            let g = report.granularity;
            println!("Granularity:    {}", g);
            println!("Base date:      {}", format_iso(report.window.base_date));
            println!("End date:       {}", format_iso(report.window.end_date(g)));
            println!("Columns:        {}", report.window.column_count);
            println!("Current column: {}", report.window.current_column_index);
            println!("Work orders:    {}", report.work_orders);
            if report.skipped > 0 {
                println!("Skipped:        {}", report.skipped);
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(())
}

pub fn visible_columns(
    schedule: &ScheduleArgs,
    viewport: &ViewportArgs,
    config: TimelineConfig,
) -> Result<Vec<VisibleColumn>> {
    let (mut board, _) = open_board(schedule, config)?;
    apply_viewport(&mut board, viewport);
    Ok(board.visible_columns())
}

fn cmd_columns(
    schedule: &ScheduleArgs,
    viewport: &ViewportArgs,
    config: TimelineConfig,
    format: OutputFormat,
) -> Result<()> {
    let columns = visible_columns(schedule, viewport, config)?;

    match format {
        OutputFormat::Table => {
            if columns.is_empty() {
                println!("No columns.");
                return Ok(());
            }
            println!("{:>6}  {:<10}  {:<16}  {:>10}", "INDEX", "DATE", "LABEL", "LEFT");
            println!("{}", "-".repeat(48));
            for column in &columns {
                println!(
                    "{:>6}  {:<10}  {:<16}  {:>10.1}",
                    column.index,
                    format_iso(column.date),
                    column.label,
                    column.left
                );
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&columns)?);
        }
    }
    Ok(())
}

/// Bar geometry for the orders matching `filter`.
pub fn layout(
    schedule: &ScheduleArgs,
    viewport: &ViewportArgs,
    all: bool,
    filter: &WorkOrderFilter,
    config: TimelineConfig,
) -> Result<Vec<BarGeometry>> {
    let (mut board, _) = open_board(schedule, config)?;
    apply_viewport(&mut board, viewport);

    let keep: HashSet<WorkOrderId> = board
        .store()
        .list(Some(filter))
        .into_iter()
        .map(|order| order.id)
        .collect();
    let mut bars = if all { board.bars() } else { board.visible_bars() };
    bars.retain(|bar| keep.contains(&bar.work_order_id));
    Ok(bars)
}

fn cmd_layout(
    schedule: &ScheduleArgs,
    viewport: &ViewportArgs,
    all: bool,
    filter: &WorkOrderFilter,
    config: TimelineConfig,
    format: OutputFormat,
) -> Result<()> {
    let bars = layout(schedule, viewport, all, filter, config)?;

    match format {
        OutputFormat::Table => {
            if bars.is_empty() {
                println!("No work orders in view.");
                return Ok(());
            }
            println!(
                "{:<40}  {:<12}  {:<12}  {:>4}  {:>10}  {:>10}",
                "WORK ORDER", "WORK CENTER", "STATUS", "ROW", "LEFT", "WIDTH"
            );
            println!("{}", "-".repeat(96));
            for bar in &bars {
                println!(
                    "{:<40}  {:<12}  {:<12}  {:>4}  {:>10.1}  {:>10.1}",
                    bar.work_order_id,
                    truncate(bar.work_center_id.as_str(), 12),
                    bar.status.css_class(),
                    bar.row_index,
                    bar.left,
                    bar.width
                );
            }
            println!("\n{} bar(s)", bars.len());
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&bars)?);
        }
    }
    Ok(())
}

/// Runs the overlap gate for a candidate; an `Err` means it would be rejected.
pub fn check(
    schedule: &ScheduleArgs,
    config: TimelineConfig,
    row: &str,
    start: NaiveDate,
    end: Option<NaiveDate>,
    exclude: Option<&str>,
) -> Result<NaiveDate> {
    let (board, _) = open_board(schedule, config)?;
    let end = end.unwrap_or_else(|| board.default_end(start));
    let row = WorkCenterId::from(row);
    let exclude = exclude.map(WorkOrderId::from);
    board.check_candidate(&row, start, end, exclude.as_ref())?;
    Ok(end)
}

fn cmd_check(
    schedule: &ScheduleArgs,
    config: TimelineConfig,
    row: &str,
    start: NaiveDate,
    end: Option<NaiveDate>,
    exclude: Option<&str>,
) -> Result<()> {
    let end = check(schedule, config, row, start, end, exclude)?;
    info!(work_center_id = row, %start, %end, "candidate accepted");
    println!("OK: [{}, {}) fits on {}", format_iso(start), format_iso(end), row);
    Ok(())
}

/// Truncates a string to the given length, adding "..." if truncated.
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
