//! OOXML serializer backed by `rust_xlsxwriter`.

use rust_xlsxwriter::{Format, FormatAlign, Table, TableColumn, TableStyle, Workbook};

use super::{CellValue, ColumnKind, ExportError, ProductSheet, TableSerializer, TableTheme, CURRENCY_FORMAT};

/// Writes the sheet as a single worksheet holding one table.
#[derive(Debug, Default, Clone, Copy)]
pub struct XlsxSerializer;

impl XlsxSerializer {
    fn format_for(kind: ColumnKind) -> Format {
        match kind {
            ColumnKind::Text => Format::new(),
            ColumnKind::Centered => Format::new().set_align(FormatAlign::Center),
            ColumnKind::Currency => Format::new().set_num_format(CURRENCY_FORMAT),
        }
    }

    fn table_style(theme: TableTheme) -> TableStyle {
        match theme {
            TableTheme::Medium2 => TableStyle::Medium2,
        }
    }
}

impl TableSerializer for XlsxSerializer {
    fn serialize(&self, sheet: &ProductSheet) -> Result<Vec<u8>, ExportError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(sheet.worksheet)?;

        let formats: Vec<Format> = sheet.columns.iter().map(|c| Self::format_for(c.kind)).collect();
        for (col, column) in sheet.columns.iter().enumerate() {
            worksheet.set_column_width(col as u16, column.width)?;
        }

        // Row 0 is the table header.
        for (r, row) in sheet.rows.iter().enumerate() {
            let row_num = r as u32 + 1;
            for (c, cell) in row.iter().enumerate() {
                let col = c as u16;
                let format = &formats[c];
                match cell {
                    CellValue::Text(text) => {
                        worksheet.write_string_with_format(row_num, col, text, format)?;
                    }
                    CellValue::Number(n) => {
                        worksheet.write_number_with_format(row_num, col, *n, format)?;
                    }
                }
            }
        }

        let columns: Vec<TableColumn> =
            sheet.columns.iter().map(|c| TableColumn::new().set_header(c.header)).collect();
        let table = Table::new()
            .set_name(sheet.table_name)
            .set_style(Self::table_style(sheet.theme))
            .set_header_row(sheet.header_row)
            .set_total_row(sheet.totals_row)
            .set_banded_rows(sheet.banded_rows)
            .set_columns(&columns);

        let last_col = sheet.columns.len().saturating_sub(1) as u16;
        worksheet.add_table(0, 0, sheet.rows.len() as u32, last_col, &table)?;

        Ok(workbook.save_to_buffer()?)
    }
}
