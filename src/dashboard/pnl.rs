use super::Block;
use crate::format::format_table;
use crate::loader::Sheet;
use crate::table::HeaderMode;

/// P&L Summary is display-only: the formatted sheet without all-blank rows.
pub fn render(sheet: &Sheet) -> Vec<Block> {
    let mut blocks = vec![Block::subheader("P&L Summary Data Table")];

    match sheet.table(HeaderMode::FirstRow) {
        Ok(table) => {
            let table = table.drop_blank_rows();
            if table.is_empty() {
                blocks.push(Block::warning("No data found in P&L Summary sheet."));
            } else {
                blocks.push(Block::Table(format_table(&table)));
            }
        }
        Err(message) => blocks.push(Block::warning(format!(
            "Could not read P&L Summary sheet: {}",
            message
        ))),
    }

    blocks
}
