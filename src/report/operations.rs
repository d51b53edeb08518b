//! Operations sheet extraction
//!
//! Builds one row per executed operation over a lookback window, enriched
//! with the instrument's ticker and name through a per-run memoized
//! lookup. Rows are sorted by date descending before the date column is
//! flattened to text.

use std::collections::HashMap;

use anyhow::Result;
use chrono::{Duration, NaiveDateTime, Utc};
use tracing::warn;

use crate::api::types::{Instrument, MoneyValue, Operation};
use crate::api::InvestClient;
use crate::report::table::{Cell, Table};

/// Default lookback window for the operations query.
pub const DEFAULT_LOOKBACK_DAYS: i64 = 3650;

/// Textual pattern for the date column after sorting.
const DATE_FORMAT: &str = "%d.%m.%Y %H:%M";

/// Display labels for the operation columns, in sheet order.
pub const OPERATION_COLUMNS: [&str; 13] = [
    "ID операции",
    "Дата",
    "Тип операции",
    "FIGI",
    "Тикер",
    "Название",
    "Количество",
    "Цена за единицу",
    "Сумма операции",
    "Валюта",
    "Статус",
    "Комиссия",
    "Тип инструмента",
];

/// Extra column, present only when composite operations occur.
pub const PARENT_COLUMN: &str = "Родительская операция";

/// Resolves an instrument's ticker and name by FIGI.
///
/// Seam between row construction and the network; the production
/// implementation is the API client.
pub trait InstrumentResolver {
    async fn instrument_by_figi(&self, figi: &str) -> Result<Instrument>;
}

impl InstrumentResolver for InvestClient {
    async fn instrument_by_figi(&self, figi: &str) -> Result<Instrument> {
        self.get_instrument_by_figi(figi).await
    }
}

/// Map an operation type code to its display label.
///
/// Unknown codes pass through unchanged.
fn operation_type_label(code: &str) -> &str {
    match code {
        "OPERATION_TYPE_BUY" => "Покупка",
        "OPERATION_TYPE_SELL" => "Продажа",
        "OPERATION_TYPE_DIVIDEND" => "Дивиденды",
        "OPERATION_TYPE_DIVIDEND_TAX" => "Налог на дивиденды",
        "OPERATION_TYPE_BROKER_FEE" => "Комиссия брокера",
        "OPERATION_TYPE_SERVICE_FEE" => "Комиссия за обслуживание",
        other => other,
    }
}

/// Look up an instrument, memoizing per figi.
///
/// A failed lookup is cached as an empty instrument and never surfaced.
async fn resolve_instrument<'a, R: InstrumentResolver>(
    cache: &'a mut HashMap<String, Instrument>,
    resolver: &R,
    figi: &str,
) -> &'a Instrument {
    if !cache.contains_key(figi) {
        let instrument = match resolver.instrument_by_figi(figi).await {
            Ok(instrument) => instrument,
            Err(e) => {
                warn!("Instrument lookup failed for {}: {}", figi, e);
                Instrument::default()
            }
        };
        cache.insert(figi.to_string(), instrument);
    }
    &cache[figi]
}

struct OperationRow {
    date: NaiveDateTime,
    cells: Vec<Cell>,
    parent: Option<String>,
}

/// Shape a list of operations into the Operations table.
pub async fn build_operations_table<R: InstrumentResolver>(
    operations: &[Operation],
    resolver: &R,
) -> Table {
    let mut cache: HashMap<String, Instrument> = HashMap::new();
    let mut rows: Vec<OperationRow> = Vec::with_capacity(operations.len());

    for op in operations {
        let instrument = resolve_instrument(&mut cache, resolver, &op.figi).await;

        let cells = vec![
            Cell::text(&op.id),
            // Date slot, formatted to text after sorting
            Cell::Empty,
            Cell::text(operation_type_label(&op.operation_type)),
            Cell::text(&op.figi),
            Cell::text(&instrument.ticker),
            Cell::text(&instrument.name),
            Cell::Number(op.quantity.map(|q| q as f64).unwrap_or(0.0)),
            Cell::Number(op.price.as_ref().map(MoneyValue::to_f64).unwrap_or(0.0)),
            op.payment
                .as_ref()
                .map(|m| Cell::Number(m.to_f64()))
                .unwrap_or(Cell::Empty),
            Cell::text(&op.currency),
            Cell::text("Исполнена"),
            Cell::Number(op.commission.as_ref().map(MoneyValue::to_f64).unwrap_or(0.0)),
            Cell::text(&op.instrument_type),
        ];

        let parent = op
            .parent_operation_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .map(str::to_string);

        rows.push(OperationRow {
            date: op.date.naive_utc(),
            cells,
            parent,
        });
    }

    rows.sort_by(|a, b| b.date.cmp(&a.date));

    let has_parent = rows.iter().any(|r| r.parent.is_some());
    let mut columns: Vec<String> = OPERATION_COLUMNS.iter().map(|s| s.to_string()).collect();
    if has_parent {
        columns.push(PARENT_COLUMN.to_string());
    }

    let mut table = Table::new(columns);
    for mut row in rows {
        row.cells[1] = Cell::Text(row.date.format(DATE_FORMAT).to_string());
        if has_parent {
            let parent_cell = row.parent.take().map(Cell::Text).unwrap_or(Cell::Empty);
            row.cells.push(parent_cell);
        }
        table.push_row(row.cells);
    }
    table
}

/// Fetch executed operations over the lookback window and shape them
/// into a table.
pub async fn fetch_operations(
    client: &InvestClient,
    account_id: &str,
    lookback_days: i64,
) -> Result<Table> {
    let to = Utc::now();
    let from = to - Duration::days(lookback_days);

    let operations = client.get_operations(account_id, from, to).await?;
    Ok(build_operations_table(&operations, client).await)
}
