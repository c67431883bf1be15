use super::ui;
use crate::ListEdit;
use crate::core::selection::SelectionList;
use crate::core::session::Session;
use anyhow::Result;
use comfy_table::Cell;

fn render(title: &str, session: &Session, list: &SelectionList) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("#"),
        ui::header_cell("Unit"),
        ui::header_cell("Name"),
    ]);
    for (i, code) in list.iter().enumerate() {
        let (flag, name) = match session.catalog().find_by_code(code) {
            Some(unit) => (unit.flag.as_str(), unit.name.clone()),
            None => ("", ui::style_text("unknown", ui::StyleType::Error)),
        };
        table.add_row(vec![
            Cell::new(i),
            Cell::new(format!("{flag} {code}")),
            Cell::new(name),
        ]);
    }
    format!(
        "{}\n\n{}",
        ui::style_text(title, ui::StyleType::Title),
        table
    )
}

pub fn run_targets(session: &mut Session, edit: &ListEdit) -> Result<()> {
    match edit {
        ListEdit::Show => {}
        ListEdit::Set { index, code } => session.set_target_at(*index, &code.to_uppercase())?,
        ListEdit::Move { from, to } => session.reorder_targets(*from, *to)?,
    }
    println!(
        "{}",
        render("Targets", session, &session.state().target_unit_codes)
    );
    Ok(())
}

pub fn run_favorites(session: &mut Session, edit: &ListEdit) -> Result<()> {
    match edit {
        ListEdit::Show => {}
        ListEdit::Set { index, code } => session.set_favorite_at(*index, &code.to_uppercase())?,
        ListEdit::Move { from, to } => session.reorder_favorites(*from, *to)?,
    }
    println!("{}", render("Favorites", session, session.favorites()));
    Ok(())
}
