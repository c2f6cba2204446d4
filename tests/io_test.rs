//! Spreadsheet sources: workbooks written to a temp dir and read back through
//! the same path the dashboard uses by default.


use std::fs;
use std::path::Path;

use salesdash::analytics::plan_vs_actual;
use salesdash::config::SourceConfig;
use salesdash::io::read_table;
use salesdash::ledger::{DuplicateKeyPolicy, LedgerFilter, SalesDataset};
use salesdash::Error;
use simple_excel_writer::*;
use test_utils::assert_close;

fn write_xlsx(path: &Path, sheets: Vec<(&str, Vec<Row>)>) {
    let mut workbook = Workbook::create(path.to_str().unwrap());
    for (name, rows) in sheets {
        let mut sheet = workbook.create_sheet(name);
        workbook
            .write_sheet(&mut sheet, |writer| {
                for row in rows {
                    writer.append_row(row)?;
                }
                Ok(())
            })
            .unwrap();
    }
    workbook.close().unwrap();
}

fn write_sources(dir: &Path) {
    write_xlsx(
        &dir.join("calendar.xlsx"),
        vec![(
            "Calendar",
            vec![
                row!["orderdate", "day", "month", "year"],
                row!["2023-01-02", 2.0, 1.0, 2023.0],
            ],
        )],
    );
    write_xlsx(
        &dir.join("partners.xlsx"),
        vec![(
            "Partners",
            vec![row!["name", "country"], row!["Alpha", "Germany"]],
        )],
    );
    write_xlsx(
        &dir.join("plan.xlsx"),
        vec![(
            "Plan",
            vec![
                row!["Date", "Gross_Plan", "Net_Plan"],
                row!["2023-01-01", 100.0, 80.0],
            ],
        )],
    );
    // numeric ids come back from the workbook as floats
    write_xlsx(
        &dir.join("staff.xlsx"),
        vec![(
            "Staff",
            vec![row!["employeeid", "employeename"], row![10.0, "Anna Berg"]],
        )],
    );
    write_xlsx(
        &dir.join("products.xlsx"),
        vec![(
            "Products",
            vec![
                row!["productid", "productname", "categoryname"],
                row![1.0, "Ankle Boots", "Women's Shoes"],
            ],
        )],
    );
    write_xlsx(
        &dir.join("fact.xlsx"),
        vec![(
            "Fact",
            vec![
                row![
                    "orderdate",
                    "name",
                    "productid",
                    "employee_id",
                    "quantity",
                    "grosssalesamount",
                    "netsalesamount",
                    "supplierprice",
                    "discount",
                    "unitprice"
                ],
                row!["2023-01-02", "Alpha", 1.0, 10.0, 2.0, 220.0, 200.0, 120.0, 0.1, 110.0],
                row!["02.01.2023", "Ghost", 2.0, 11.0, 1.0, 10.0, 10.0, 5.0, (), ()],
            ],
        )],
    );
}

#[test]
fn test_load_dataset_from_workbooks() {
    let dir = tempfile::tempdir().unwrap();
    write_sources(dir.path());

    let dataset =
        SalesDataset::load(&SourceConfig::in_dir(dir.path()), DuplicateKeyPolicy::Error).unwrap();
    let records = dataset.ledger().records();
    assert_eq!(records.len(), 2);

    let alpha = &records[0];
    assert_eq!(alpha.product_id, "1");
    assert_eq!(alpha.country.as_deref(), Some("Germany"));
    assert_eq!(alpha.product_name.as_deref(), Some("Ankle Boots"));
    assert_eq!(alpha.employee_name.as_deref(), Some("Anna Berg"));
    assert_eq!(alpha.calendar_day, Some(2));
    assert_eq!(alpha.unit_price, Some(110.0));
    assert_close(alpha.profit, 80.0);

    let ghost = &records[1];
    assert_eq!(ghost.order_date, alpha.order_date);
    assert_eq!(ghost.country, None);
    assert_eq!(ghost.discount, 0.0);
    assert_eq!(ghost.unit_price, None);

    let report = plan_vs_actual(&dataset.ledger().view(), dataset.plan(), &LedgerFilter::new());
    assert_eq!(report.len(), 1);
    assert_close(report.rows()[0].gross_performance, 230.0);
}

#[test]
fn test_sheet_selection() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("partners.xlsx");
    write_xlsx(
        &path,
        vec![
            ("Notes", Vec::new()),
            (
                "Partners",
                vec![
                    row!["name", "country"],
                    row!["Alpha", "Germany"],
                    row!["Beta", "Brazil"],
                ],
            ),
        ],
    );

    // the first sheet is read when none is named, and it has no header row
    assert!(matches!(
        read_table(&path, "partner", None),
        Err(Error::EmptyData(_))
    ));

    let table = read_table(&path, "partner", Some("Partners")).unwrap();
    assert_eq!(table.headers(), &["name", "country"]);
    assert_eq!(table.row_count(), 2);
    assert_eq!(table.text(1, 1).unwrap(), "Brazil");

    assert!(matches!(
        read_table(&path, "partner", Some("Customers")),
        Err(Error::Excel(_))
    ));
}

#[test]
fn test_unreadable_workbook() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fact.xlsx");
    fs::write(&path, "not a workbook").unwrap();

    assert!(matches!(
        read_table(&path, "fact", None),
        Err(Error::Excel(_))
    ));
}
