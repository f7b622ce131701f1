#![allow(dead_code)]
use rust_xlsxwriter::{Workbook, Worksheet};

fn write_header(sheet: &mut Worksheet, names: &[&str]) {
    for (col, name) in names.iter().enumerate() {
        sheet.write_string(0, col as u16, *name).unwrap();
    }
}

/// A small workbook with the three recognized sheets plus an extra one.
pub fn sample_workbook_bytes() -> Vec<u8> {
    let mut workbook = Workbook::new();

    let sheet = workbook.add_worksheet();
    sheet.set_name("Profitability").unwrap();
    write_header(sheet, &["Product Name", "Zone", "GMV", "Net Earnings"]);
    let rows = [
        ("Wallet", "North", 300.0, 30.0),
        ("Card", "South", 100.0, 10.0),
        ("Wallet", "North", 100.0, 5.0),
    ];
    for (i, (product, zone, gmv, net)) in rows.iter().enumerate() {
        let row = (i + 1) as u32;
        sheet.write_string(row, 0, *product).unwrap();
        sheet.write_string(row, 1, *zone).unwrap();
        sheet.write_number(row, 2, *gmv).unwrap();
        sheet.write_number(row, 3, *net).unwrap();
    }

    let sheet = workbook.add_worksheet();
    sheet.set_name("Dashboard Summary").unwrap();
    write_header(sheet, &["Particulars", "Apr-24", "May-24"]);
    sheet.write_string(1, 0, "EBITDA").unwrap();
    sheet.write_number(1, 1, 100000.0).unwrap();
    sheet.write_number(1, 2, 200000.0).unwrap();

    let sheet = workbook.add_worksheet();
    sheet.set_name("P&L Summary").unwrap();
    write_header(sheet, &["Particulars", "FY24"]);
    sheet.write_string(1, 0, "Revenue").unwrap();
    sheet.write_number(1, 1, 1234567.0).unwrap();

    let sheet = workbook.add_worksheet();
    sheet.set_name("Notes").unwrap();
    sheet.write_string(0, 0, "prepared by finance").unwrap();

    workbook.save_to_buffer().unwrap()
}
