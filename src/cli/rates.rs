use super::ui;
use crate::core::convert::format_amount;
use crate::core::session::Session;
use crate::core::unit::{Unit, UnitKind};
use anyhow::Result;
use comfy_table::Cell;

/// Units matching `search` (and `kind`, if given), favorites first.
pub fn select<'a>(
    session: &'a Session,
    search: Option<&str>,
    kind: Option<UnitKind>,
) -> Vec<&'a Unit> {
    let matches = session.catalog().search(search.unwrap_or(""));
    let keep = |u: &&Unit| kind.is_none_or(|k| u.kind == k) && matches.contains(u);

    let mut units: Vec<&Unit> = session.favorite_units().into_iter().filter(keep).collect();
    let mut rest: Vec<&Unit> = match kind {
        Some(k) => session.catalog().of_kind(k),
        None => {
            let mut all = session.catalog().fiat();
            all.extend(session.catalog().crypto());
            all
        }
    };
    rest.retain(|u| keep(u) && !units.iter().any(|f| f.code == u.code));
    units.append(&mut rest);
    units
}

pub fn render(session: &Session, units: &[&Unit]) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Unit"),
        ui::header_cell("Name"),
        ui::header_cell("Kind"),
        ui::header_cell("Per USD"),
        ui::header_cell("USD price"),
        ui::header_cell("24h"),
    ]);

    for unit in units {
        let name = match &unit.country {
            Some(country) => format!("{} ({})", unit.name, country),
            None => unit.name.clone(),
        };
        let code = if session.favorites().contains(&unit.code) {
            format!("★ {} {}", unit.flag, unit.code)
        } else {
            format!("  {} {}", unit.flag, unit.code)
        };
        table.add_row(vec![
            Cell::new(code),
            Cell::new(name),
            Cell::new(unit.kind),
            ui::number_cell(format_amount(unit.rate_to_reference, UnitKind::Crypto)),
            ui::number_cell(format_amount(unit.reference_price(), UnitKind::Fiat)),
            ui::change_cell(unit.change_24h),
        ]);
    }
    table.to_string()
}

pub fn run(
    session: &mut Session,
    search: Option<&str>,
    kind: Option<UnitKind>,
    refresh: bool,
) -> Result<()> {
    if refresh {
        session.refresh_rates(&mut rand::thread_rng());
    }
    let units = select(session, search, kind);
    if units.is_empty() {
        println!(
            "{}",
            ui::style_text("No units match the search", ui::StyleType::Error)
        );
        return Ok(());
    }
    println!("{}", render(session, &units));
    Ok(())
}
