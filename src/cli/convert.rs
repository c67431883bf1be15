use super::ui;
use crate::core::session::Session;
use crate::core::state::View;
use anyhow::Result;
use comfy_table::Cell;

/// Renders the calculator screen: the amount in the base unit and its value
/// in every target.
pub fn render(session: &Session) -> String {
    let base = session.base_unit();
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("#"),
        ui::header_cell("Unit"),
        ui::header_cell("Name"),
        ui::header_cell("Amount"),
        ui::header_cell("24h"),
    ]);

    for (i, conversion) in session.conversions().iter().enumerate() {
        let unit = conversion.unit;
        table.add_row(vec![
            Cell::new(i),
            Cell::new(format!("{} {}", unit.flag, unit.code)),
            Cell::new(&unit.name),
            ui::number_cell(format!("{} {}", conversion.value, unit.symbol)),
            ui::change_cell(unit.change_24h),
        ]);
    }

    let mut output = format!(
        "{} {} {}\n\n",
        ui::style_text(session.amount().as_str(), ui::StyleType::TotalValue),
        ui::style_text(&base.code, ui::StyleType::TotalLabel),
        ui::style_text(&base.name, ui::StyleType::Subtle),
    );
    output.push_str(&table.to_string());
    output
}

pub fn run(
    session: &mut Session,
    amount: Option<&str>,
    base: Option<&str>,
    cycle: bool,
) -> Result<()> {
    if let Some(code) = base {
        session.set_base_unit(&code.to_uppercase())?;
    }
    if cycle {
        session.cycle_base_unit();
    }
    if let Some(amount) = amount {
        session.set_amount(amount);
    }
    session.set_view(View::Calculator);

    println!("{}", render(session));
    Ok(())
}
