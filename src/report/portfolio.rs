//! Portfolio sheet extraction
//!
//! Flattens each portfolio position into a fixed 18-column row under
//! display labels. Absent monetary fields that represent accrued values
//! (НКД, variation margin, daily yield) default to 0.0; every other
//! absent field stays blank.

use anyhow::Result;

use crate::api::types::{MoneyValue, PortfolioPosition, Quotation};
use crate::api::InvestClient;
use crate::report::table::{Cell, Table};

/// Display labels for the position columns, in sheet order.
pub const POSITION_COLUMNS: [&str; 18] = [
    "FIGI",
    "Тип",
    "Количество",
    "Средняя цена",
    "Доходность",
    "НКД",
    "Ср.цена (пункты)",
    "Текущая цена",
    "Ср.цена FIFO",
    "Кол-во лотов",
    "Заблокировано",
    "Заблок. лотов",
    "UID позиции",
    "UID инструмента",
    "Var Margin",
    "Доход.FIFO",
    "Дневной доход",
    "Тикер",
];

fn text_cell(value: Option<&str>) -> Cell {
    value.map(Cell::text).unwrap_or(Cell::Empty)
}

fn quotation_cell(value: Option<Quotation>) -> Cell {
    value.map(|q| Cell::Number(q.to_f64())).unwrap_or(Cell::Empty)
}

fn money_cell(value: Option<&MoneyValue>) -> Cell {
    value.map(|m| Cell::Number(m.to_f64())).unwrap_or(Cell::Empty)
}

fn money_cell_or_zero(value: Option<&MoneyValue>) -> Cell {
    Cell::Number(value.map(MoneyValue::to_f64).unwrap_or(0.0))
}

/// Flatten one position into its 18 display cells.
fn position_to_row(p: &PortfolioPosition) -> Vec<Cell> {
    vec![
        text_cell(p.figi.as_deref()),
        text_cell(p.instrument_type.as_deref()),
        quotation_cell(p.quantity),
        money_cell(p.average_position_price.as_ref()),
        quotation_cell(p.expected_yield),
        money_cell_or_zero(p.current_nkd.as_ref()),
        quotation_cell(p.average_position_price_pt),
        money_cell(p.current_price.as_ref()),
        money_cell(p.average_position_price_fifo.as_ref()),
        quotation_cell(p.quantity_lots),
        p.blocked.map(Cell::Bool).unwrap_or(Cell::Empty),
        quotation_cell(p.blocked_lots),
        text_cell(p.position_uid.as_deref()),
        text_cell(p.instrument_uid.as_deref()),
        money_cell_or_zero(p.var_margin.as_ref()),
        quotation_cell(p.expected_yield_fifo),
        money_cell_or_zero(p.daily_yield.as_ref()),
        text_cell(p.ticker.as_deref()),
    ]
}

/// Shape a portfolio snapshot into the Positions table.
pub fn build_positions_table(positions: &[PortfolioPosition]) -> Table {
    let mut table = Table::new(POSITION_COLUMNS.iter().map(|s| s.to_string()).collect());
    for position in positions {
        table.push_row(position_to_row(position));
    }
    table
}

/// Fetch the portfolio for an account and shape it into a table.
///
/// One network call; transport failures propagate to the caller.
pub async fn fetch_portfolio(client: &InvestClient, account_id: &str) -> Result<Table> {
    let response = client.get_portfolio(account_id).await?;
    Ok(build_positions_table(&response.positions))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quotation(units: i64, nano: i32) -> Quotation {
        Quotation { units, nano }
    }

    fn money(units: i64, nano: i32) -> MoneyValue {
        MoneyValue {
            currency: "rub".to_string(),
            units,
            nano,
        }
    }

    #[test]
    fn test_full_position_converts_all_values() {
        let position = PortfolioPosition {
            figi: Some("BBG004730N88".to_string()),
            instrument_type: Some("share".to_string()),
            quantity: Some(quotation(10, 0)),
            average_position_price: Some(money(250, 500_000_000)),
            expected_yield: Some(quotation(-12, -300_000_000)),
            current_nkd: Some(money(1, 250_000_000)),
            current_price: Some(money(248, 0)),
            blocked: Some(false),
            ticker: Some("SBER".to_string()),
            ..Default::default()
        };

        let table = build_positions_table(&[position]);
        assert_eq!(table.rows().len(), 1);
        let row = &table.rows()[0];
        assert_eq!(row.len(), POSITION_COLUMNS.len());
        assert_eq!(row[0], Cell::text("BBG004730N88"));
        assert_eq!(row[2], Cell::Number(10.0));
        assert_eq!(row[3], Cell::Number(250.5));
        assert_eq!(row[4], Cell::Number(-12.3));
        assert_eq!(row[5], Cell::Number(1.25));
        assert_eq!(row[10], Cell::Bool(false));
        assert_eq!(row[17], Cell::text("SBER"));
    }

    #[test]
    fn test_empty_position_gets_typed_defaults() {
        let table = build_positions_table(&[PortfolioPosition::default()]);
        let row = &table.rows()[0];

        // Accrued interest, margin and daily yield default to 0.0
        assert_eq!(row[table.column_index("НКД").unwrap()], Cell::Number(0.0));
        assert_eq!(
            row[table.column_index("Var Margin").unwrap()],
            Cell::Number(0.0)
        );
        assert_eq!(
            row[table.column_index("Дневной доход").unwrap()],
            Cell::Number(0.0)
        );

        // Everything else stays blank
        assert_eq!(row[table.column_index("Тикер").unwrap()], Cell::Empty);
        assert_eq!(row[table.column_index("Количество").unwrap()], Cell::Empty);
        assert_eq!(
            row[table.column_index("Средняя цена").unwrap()],
            Cell::Empty
        );
    }

    #[test]
    fn test_row_and_column_counts() {
        let positions = vec![
            PortfolioPosition::default(),
            PortfolioPosition {
                ticker: Some("GAZP".to_string()),
                ..Default::default()
            },
            PortfolioPosition::default(),
        ];

        let table = build_positions_table(&positions);
        assert_eq!(table.rows().len(), 3);
        assert_eq!(table.columns().len(), 18);
        assert_eq!(table.columns()[0], "FIGI");
        assert_eq!(table.columns()[17], "Тикер");
        for row in table.rows() {
            assert_eq!(row.len(), 18);
        }
    }
}
