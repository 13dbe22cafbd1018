mod auth;
mod client;
mod edits;
mod types;
mod values;

pub use auth::{acquire_credentials, clear_tokens as clear_sheets_tokens};
pub use client::SheetsClient;
pub use edits::{GridRect, PasteType, StructuralEdit};
pub use types::{
    AppendOptions, AppendSummary, BatchUpdateSummary, InsertDataOption, RangeValues,
    SpreadsheetId, SpreadsheetRef, SpreadsheetSummary, UpdateSummary, ValueInputOption,
    ValueRenderOption,
};
#[cfg(test)]
pub(crate) use types::SheetSummary;
pub use values::{CellValue, ValueGrid};

use crate::error::Result;
use async_trait::async_trait;

/// Calls against a remote spreadsheet. Each call is one request to the service.
#[async_trait]
pub trait SpreadsheetOperations {
    /// Read a range; an empty range yields an empty grid.
    async fn get_values(&self, spreadsheet: &SpreadsheetId, range: &str) -> Result<ValueGrid>;

    /// Overwrite the cells of a range without shifting neighbours.
    async fn update_values(
        &self,
        spreadsheet: &SpreadsheetId,
        range: &str,
        values: &ValueGrid,
        input: ValueInputOption,
    ) -> Result<UpdateSummary>;

    async fn batch_update_values(
        &self,
        spreadsheet: &SpreadsheetId,
        data: &[RangeValues],
        input: ValueInputOption,
    ) -> Result<BatchUpdateSummary>;

    /// Write after the last row of the table found in `range`.
    async fn append_values(
        &self,
        spreadsheet: &SpreadsheetId,
        range: &str,
        values: &ValueGrid,
        options: AppendOptions,
    ) -> Result<AppendSummary>;

    /// Read several ranges; grids are returned in request order.
    async fn batch_get_values(
        &self,
        spreadsheet: &SpreadsheetId,
        ranges: &[String],
    ) -> Result<Vec<ValueGrid>>;

    async fn create_spreadsheet(&self, title: &str) -> Result<SpreadsheetRef>;

    async fn get_spreadsheet(&self, spreadsheet: &SpreadsheetId) -> Result<SpreadsheetSummary>;

    async fn apply_batch_edits(
        &self,
        spreadsheet: &SpreadsheetId,
        edits: &[StructuralEdit],
    ) -> Result<()>;
}
