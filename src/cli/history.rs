use super::ui;
use crate::core::session::Session;
use crate::core::simulator::{HistoricalPoint, HistorySummary};
use crate::core::state::View;
use anyhow::Result;
use comfy_table::Cell;

/// Rows shown in the table; the sparkline covers every point.
const TABLE_ROWS: usize = 10;

pub fn render(session: &Session, points: &[HistoricalPoint]) -> String {
    let from = session.history_from_unit();
    let to = session.history_to_unit();

    let mut output = format!(
        "{} {} = {} {}\n",
        ui::style_text(session.amount().as_str(), ui::StyleType::TotalLabel),
        from.code,
        ui::style_text(&session.history_amount(), ui::StyleType::TotalValue),
        to.code,
    );
    output.push_str(&ui::style_text(
        &format!("1 {} = {:.4} {}", from.code, session.history_rate(), to.code),
        ui::StyleType::Subtle,
    ));
    output.push_str("\n\n");

    let Some(summary) = HistorySummary::from_points(points) else {
        output.push_str(&ui::style_text("No history to show", ui::StyleType::Error));
        return output;
    };

    let rates: Vec<f64> = points.iter().map(|p| p.rate).collect();
    output.push_str(&format!(
        "{}  {} days\n{}\n\n",
        ui::style_text(&format!("{}/{}", from.code, to.code), ui::StyleType::Title),
        points.len(),
        ui::sparkline(&rates, summary.min, summary.max),
    ));

    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("Date"), ui::header_cell("Rate")]);
    let step = points.len().div_ceil(TABLE_ROWS).max(1);
    for point in points.iter().rev().step_by(step) {
        table.add_row(vec![
            Cell::new(&point.date),
            ui::number_cell(format!("{:.4}", point.rate)),
        ]);
    }
    output.push_str(&table.to_string());

    output.push_str(&format!(
        "\n\nLow {:.4}  High {:.4}  Change ",
        summary.min, summary.max
    ));
    output.push_str(&ui::change_cell(summary.change_pct()).content());
    output
}

pub fn run(
    session: &mut Session,
    from: Option<&str>,
    to: Option<&str>,
    days: usize,
    swap: bool,
) -> Result<()> {
    if let Some(code) = from {
        session.set_history_from(&code.to_uppercase())?;
    }
    if let Some(code) = to {
        session.set_history_to(&code.to_uppercase())?;
    }
    if swap {
        session.swap_history_units();
    }
    session.set_view(View::History);

    let today = chrono::Local::now().date_naive();
    let points = session.history(days, today, &mut rand::thread_rng());
    println!("{}", render(session, &points));
    Ok(())
}
