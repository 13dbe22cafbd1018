use super::values::{ValueGrid, grid_from_json};
use crate::error::{AppError, Result};
use google_sheets4::api::{
    AppendValuesResponse, BatchGetValuesResponse, BatchUpdateValuesResponse, Spreadsheet,
    UpdateValuesResponse,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier of a remote spreadsheet.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SpreadsheetId(String);

impl SpreadsheetId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn url(&self) -> String {
        format!("https://docs.google.com/spreadsheets/d/{}", self.0)
    }
}

impl fmt::Display for SpreadsheetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SpreadsheetId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for SpreadsheetId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A newly created spreadsheet.
#[derive(Debug, Clone, PartialEq)]
pub struct SpreadsheetRef {
    pub id: SpreadsheetId,
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SheetSummary {
    pub sheet_id: i32,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpreadsheetSummary {
    pub id: SpreadsheetId,
    pub title: String,
    pub sheets: Vec<SheetSummary>,
}

impl SpreadsheetSummary {
    /// Smallest sheet id not used by any sheet in the spreadsheet.
    pub fn next_sheet_id(&self) -> i32 {
        self.sheets
            .iter()
            .map(|sheet| sheet.sheet_id)
            .max()
            .map_or(0, |max| max + 1)
    }
}

impl From<Spreadsheet> for SpreadsheetSummary {
    fn from(spreadsheet: Spreadsheet) -> Self {
        let sheets = spreadsheet
            .sheets
            .unwrap_or_default()
            .into_iter()
            .filter_map(|sheet| sheet.properties)
            .map(|props| SheetSummary {
                sheet_id: props.sheet_id.unwrap_or_default(),
                title: props.title.unwrap_or_default(),
            })
            .collect();

        SpreadsheetSummary {
            id: SpreadsheetId::new(spreadsheet.spreadsheet_id.unwrap_or_default()),
            title: spreadsheet
                .properties
                .and_then(|props| props.title)
                .unwrap_or_default(),
            sheets,
        }
    }
}

// https://developers.google.com/sheets/api/reference/rest/v4/ValueInputOption
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueInputOption {
    /// Values are stored as-is
    Raw,
    /// Values are parsed as if typed into the UI, so formulas are evaluated
    UserEntered,
}

impl ValueInputOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueInputOption::Raw => "RAW",
            ValueInputOption::UserEntered => "USER_ENTERED",
        }
    }
}

// https://developers.google.com/sheets/api/reference/rest/v4/spreadsheets.values/append#InsertDataOption
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertDataOption {
    Overwrite,
    InsertRows,
}

impl InsertDataOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsertDataOption::Overwrite => "OVERWRITE",
            InsertDataOption::InsertRows => "INSERT_ROWS",
        }
    }
}

// https://developers.google.com/sheets/api/reference/rest/v4/ValueRenderOption
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValueRenderOption {
    FormattedValue,
    #[default]
    UnformattedValue,
    Formula,
}

impl ValueRenderOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueRenderOption::FormattedValue => "FORMATTED_VALUE",
            ValueRenderOption::UnformattedValue => "UNFORMATTED_VALUE",
            ValueRenderOption::Formula => "FORMULA",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppendOptions {
    pub input: ValueInputOption,
    pub insert: InsertDataOption,
    pub include_values_in_response: bool,
}

/// A grid destined for one range of a batch write.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeValues {
    pub range: String,
    pub values: ValueGrid,
}

impl RangeValues {
    pub fn new(range: impl Into<String>, values: ValueGrid) -> Self {
        Self {
            range: range.into(),
            values,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct UpdateSummary {
    pub updated_range: String,
    pub updated_rows: i32,
    pub updated_columns: i32,
    pub updated_cells: i32,
    /// Present only when values were requested in the response
    pub updated_data: Option<ValueGrid>,
}

impl From<UpdateValuesResponse> for UpdateSummary {
    fn from(response: UpdateValuesResponse) -> Self {
        UpdateSummary {
            updated_range: response.updated_range.unwrap_or_default(),
            updated_rows: response.updated_rows.unwrap_or_default(),
            updated_columns: response.updated_columns.unwrap_or_default(),
            updated_cells: response.updated_cells.unwrap_or_default(),
            updated_data: response
                .updated_data
                .map(|value_range| grid_from_json(value_range.values)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BatchUpdateSummary {
    pub total_updated_rows: i32,
    pub total_updated_columns: i32,
    pub total_updated_cells: i32,
    pub total_updated_sheets: i32,
    pub responses: Vec<UpdateSummary>,
}

impl From<BatchUpdateValuesResponse> for BatchUpdateSummary {
    fn from(response: BatchUpdateValuesResponse) -> Self {
        BatchUpdateSummary {
            total_updated_rows: response.total_updated_rows.unwrap_or_default(),
            total_updated_columns: response.total_updated_columns.unwrap_or_default(),
            total_updated_cells: response.total_updated_cells.unwrap_or_default(),
            total_updated_sheets: response.total_updated_sheets.unwrap_or_default(),
            responses: response
                .responses
                .unwrap_or_default()
                .into_iter()
                .map(Into::into)
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppendSummary {
    /// The table the values were appended to, before the append
    pub table_range: Option<String>,
    pub updates: UpdateSummary,
}

impl From<AppendValuesResponse> for AppendSummary {
    fn from(response: AppendValuesResponse) -> Self {
        AppendSummary {
            table_range: response.table_range,
            updates: response.updates.map(Into::into).unwrap_or_default(),
        }
    }
}

/// Grids of a batch read, one per requested range and in the same order.
pub(super) fn grids_in_request_order(
    ranges: &[String],
    response: BatchGetValuesResponse,
) -> Result<Vec<ValueGrid>> {
    let value_ranges = response.value_ranges.unwrap_or_default();
    if value_ranges.len() != ranges.len() {
        return Err(AppError::Remote(format!(
            "Requested {} ranges but received {}",
            ranges.len(),
            value_ranges.len()
        )));
    }

    Ok(value_ranges
        .into_iter()
        .map(|value_range| grid_from_json(value_range.values))
        .collect())
}
