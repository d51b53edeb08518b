//! Excel report output
//!
//! Writes the Positions and Operations tables into a two-sheet workbook
//! with header styling, column number formats and conditional highlights
//! on the operation-type column.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rust_xlsxwriter::{
    Color, ConditionalFormatText, ConditionalFormatTextRule, Format, FormatAlign, FormatBorder,
    Workbook, Worksheet,
};
use tracing::info;

use crate::error::ReportError;
use crate::report::table::{Cell, Table};

const PORTFOLIO_SHEET: &str = "Портфель";
const OPERATIONS_SHEET: &str = "Операции";

const MONEY_NUM_FORMAT: &str = "#,##0.00";
const DATE_NUM_FORMAT: &str = "dd.mm.yyyy hh:mm";

const HEADER_FILL: Color = Color::RGB(0xD7E4BC);
const DIVIDEND_FILL: Color = Color::RGB(0xC6EFCE);
const TAX_FILL: Color = Color::RGB(0xFFC7CE);

const MONEY_COLUMN_WIDTH: f64 = 15.0;
const DATE_COLUMN_WIDTH: f64 = 18.0;

/// Position columns that get the two-decimal money format.
const PORTFOLIO_MONEY_COLUMNS: [&str; 4] = ["Средняя цена", "Текущая цена", "Доходность", "НКД"];
/// Operation columns that get the two-decimal money format.
const OPERATIONS_MONEY_COLUMNS: [&str; 3] = ["Цена за единицу", "Сумма операции", "Комиссия"];

const DATE_COLUMN: &str = "Дата";
const TYPE_COLUMN: &str = "Тип операции";
const DIVIDEND_KEYWORD: &str = "Дивиденды";
const TAX_KEYWORD: &str = "Налог";

fn write_table(worksheet: &mut Worksheet, table: &Table, header_format: &Format) -> Result<()> {
    for (col, label) in table.columns().iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, label, header_format)?;
    }

    for (row_idx, row) in table.rows().iter().enumerate() {
        let row_num = (row_idx + 1) as u32;
        for (col, cell) in row.iter().enumerate() {
            let col_num = col as u16;
            match cell {
                Cell::Empty => {}
                Cell::Text(s) => {
                    worksheet.write_string(row_num, col_num, s)?;
                }
                Cell::Number(n) => {
                    worksheet.write_number(row_num, col_num, *n)?;
                }
                Cell::Bool(b) => {
                    worksheet.write_boolean(row_num, col_num, *b)?;
                }
            }
        }
    }

    Ok(())
}

/// Write both tables into a two-sheet xlsx workbook at `path`.
///
/// The extension is normalized to `.xlsx`. Returns the resolved absolute
/// path after the workbook is saved and the file handle released.
pub fn write_report(positions: &Table, operations: &Table, path: &Path) -> Result<PathBuf> {
    let output = path.with_extension("xlsx");

    let header_format = Format::new()
        .set_bold()
        .set_text_wrap()
        .set_align(FormatAlign::Top)
        .set_background_color(HEADER_FILL)
        .set_border(FormatBorder::Thin);
    let money_format = Format::new().set_num_format(MONEY_NUM_FORMAT);
    let date_format = Format::new().set_num_format(DATE_NUM_FORMAT);

    let mut workbook = Workbook::new();

    let portfolio_sheet = workbook.add_worksheet();
    portfolio_sheet.set_name(PORTFOLIO_SHEET)?;
    write_table(portfolio_sheet, positions, &header_format)?;
    for (col, label) in positions.columns().iter().enumerate() {
        if PORTFOLIO_MONEY_COLUMNS.contains(&label.as_str()) {
            portfolio_sheet.set_column_width(col as u16, MONEY_COLUMN_WIDTH)?;
            portfolio_sheet.set_column_format(col as u16, &money_format)?;
        }
    }

    let operations_sheet = workbook.add_worksheet();
    operations_sheet.set_name(OPERATIONS_SHEET)?;
    write_table(operations_sheet, operations, &header_format)?;
    for (col, label) in operations.columns().iter().enumerate() {
        let col_num = col as u16;
        if label == DATE_COLUMN {
            operations_sheet.set_column_width(col_num, DATE_COLUMN_WIDTH)?;
            operations_sheet.set_column_format(col_num, &date_format)?;
        } else if OPERATIONS_MONEY_COLUMNS.contains(&label.as_str()) {
            operations_sheet.set_column_width(col_num, MONEY_COLUMN_WIDTH)?;
            operations_sheet.set_column_format(col_num, &money_format)?;
        }
    }

    // Highlight dividend rows green and tax rows red on the type column,
    // over the actual data row count
    if let Some(type_col) = operations.column_index(TYPE_COLUMN) {
        let last_row = operations.rows().len() as u32;
        if last_row > 0 {
            let type_col = type_col as u16;

            let dividend_rule = ConditionalFormatText::new()
                .set_rule(ConditionalFormatTextRule::Contains(
                    DIVIDEND_KEYWORD.to_string(),
                ))
                .set_format(Format::new().set_background_color(DIVIDEND_FILL));
            operations_sheet.add_conditional_format(1, type_col, last_row, type_col, &dividend_rule)?;

            let tax_rule = ConditionalFormatText::new()
                .set_rule(ConditionalFormatTextRule::Contains(TAX_KEYWORD.to_string()))
                .set_format(Format::new().set_background_color(TAX_FILL));
            operations_sheet.add_conditional_format(1, type_col, last_row, type_col, &tax_rule)?;
        }
    }

    workbook.save(&output).map_err(|e| {
        ReportError::SpreadsheetError(format!("failed to write {:?}: {}", output, e))
    })?;

    info!("Report written to {:?}", output);

    std::fs::canonicalize(&output)
        .with_context(|| format!("Failed to resolve output path {:?}", output))
}
