//! End-to-end shaping and writing test against a stubbed instrument
//! resolver: one position and two operations in, a two-sheet workbook out.

use calamine::{open_workbook, Reader, Xlsx};
use chrono::{TimeZone, Utc};
use tempfile::TempDir;

use invest_report::api::types::{Instrument, MoneyValue, Operation, PortfolioPosition, Quotation};
use invest_report::report::operations::{build_operations_table, InstrumentResolver};
use invest_report::report::portfolio::build_positions_table;
use invest_report::report::write_report;

struct FixedResolver;

impl InstrumentResolver for FixedResolver {
    async fn instrument_by_figi(&self, _figi: &str) -> anyhow::Result<Instrument> {
        Ok(Instrument {
            ticker: "SBER".to_string(),
            name: "Сбер Банк".to_string(),
        })
    }
}

fn sample_position() -> PortfolioPosition {
    PortfolioPosition {
        figi: Some("BBG004730N88".to_string()),
        instrument_type: Some("share".to_string()),
        quantity: Some(Quotation {
            units: 10,
            nano: 0,
        }),
        average_position_price: Some(MoneyValue {
            currency: "rub".to_string(),
            units: 250,
            nano: 500_000_000,
        }),
        ticker: Some("SBER".to_string()),
        ..Default::default()
    }
}

fn sample_operation(id: &str, month: u32, op_type: &str) -> Operation {
    Operation {
        id: id.to_string(),
        parent_operation_id: None,
        currency: "rub".to_string(),
        payment: Some(MoneyValue {
            currency: "rub".to_string(),
            units: -2505,
            nano: 0,
        }),
        price: Some(MoneyValue {
            currency: "rub".to_string(),
            units: 250,
            nano: 500_000_000,
        }),
        state: "OPERATION_STATE_EXECUTED".to_string(),
        quantity: Some(10),
        figi: "BBG004730N88".to_string(),
        instrument_type: "share".to_string(),
        date: Utc.with_ymd_and_hms(2024, month, 1, 10, 30, 0).unwrap(),
        operation_type: op_type.to_string(),
        commission: None,
    }
}

#[tokio::test]
async fn full_report_has_both_sheets_with_dividend_row_first() {
    let positions = build_positions_table(&[sample_position()]);

    let ops = vec![
        sample_operation("op-buy", 1, "OPERATION_TYPE_BUY"),
        sample_operation("op-div", 3, "OPERATION_TYPE_DIVIDEND"),
    ];
    let operations = build_operations_table(&ops, &FixedResolver).await;

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("invest_report.xlsx");
    let written = write_report(&positions, &operations, &path).unwrap();
    assert!(written.exists());

    let mut workbook: Xlsx<_> = open_workbook(&written).unwrap();
    assert_eq!(
        workbook.sheet_names(),
        vec!["Портфель".to_string(), "Операции".to_string()]
    );

    let portfolio = workbook.worksheet_range("Портфель").unwrap();
    assert_eq!(portfolio.get_value((0, 0)).unwrap().to_string(), "FIGI");
    assert_eq!(
        portfolio.get_value((1, 0)).unwrap().to_string(),
        "BBG004730N88"
    );
    // 18 header cells plus one data row
    assert_eq!(portfolio.height(), 2);
    assert_eq!(portfolio.width(), 18);

    let operations = workbook.worksheet_range("Операции").unwrap();
    assert_eq!(
        operations.get_value((0, 2)).unwrap().to_string(),
        "Тип операции"
    );
    // Sorted date-descending: the dividend (March) precedes the buy (January),
    // and its label is the one the green highlight rule matches on
    assert_eq!(
        operations.get_value((1, 2)).unwrap().to_string(),
        "Дивиденды"
    );
    assert_eq!(operations.get_value((2, 2)).unwrap().to_string(), "Покупка");
    assert_eq!(operations.get_value((1, 4)).unwrap().to_string(), "SBER");
}
