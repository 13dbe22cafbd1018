use super::SpreadsheetOperations;
use super::edits::{StructuralEdit, to_requests};
use super::types::{
    AppendOptions, AppendSummary, BatchUpdateSummary, RangeValues, SpreadsheetId, SpreadsheetRef,
    SpreadsheetSummary, UpdateSummary, ValueInputOption, ValueRenderOption,
    grids_in_request_order,
};
use super::values::{ValueGrid, grid_from_json, grid_to_json};
use crate::config::GoogleConfig;
use crate::error::{AppError, Result};
use crate::sheets::auth::acquire_credentials;
use async_trait::async_trait;
use google_sheets4::api::{
    BatchUpdateSpreadsheetRequest, BatchUpdateValuesRequest, Scope, Sheets, Spreadsheet,
    SpreadsheetProperties, ValueRange,
};
use hyper_rustls::HttpsConnector;
use hyper_util::client::legacy::Client;
use hyper_util::client::legacy::connect::HttpConnector;
use tracing::{debug, instrument};

// Read and write access to all of the user's spreadsheets
pub(crate) const AUTH_SCOPE: Scope = Scope::Spreadsheet;

const MAJOR_DIMENSION: &str = "ROWS";

pub struct SheetsClient {
    hub: Sheets<HttpsConnector<HttpConnector>>,
    value_render: ValueRenderOption,
}

impl SheetsClient {
    /// Create a new SheetsClient with authenticated access
    #[instrument(name = "Authenticating to Google Sheets", skip_all)]
    pub async fn new(config: &GoogleConfig, value_render: ValueRenderOption) -> Result<Self> {
        let auth = acquire_credentials(config).await?;

        let connector = hyper_rustls::HttpsConnectorBuilder::new()
            .with_native_roots()?
            .https_or_http()
            .enable_http1()
            .build();

        let client = Client::builder(hyper_util::rt::TokioExecutor::new()).build(connector);

        let mut hub = Sheets::new(client, auth);
        hub.user_agent(config.application_name());

        Ok(Self { hub, value_render })
    }

    fn value_range(range: &str, values: &ValueGrid) -> Result<ValueRange> {
        Ok(ValueRange {
            major_dimension: Some(MAJOR_DIMENSION.to_string()),
            range: Some(range.to_string()),
            values: Some(grid_to_json(values)?),
        })
    }
}

#[async_trait]
impl SpreadsheetOperations for SheetsClient {
    #[instrument(name = "Reading values", skip(self))]
    async fn get_values(&self, spreadsheet: &SpreadsheetId, range: &str) -> Result<ValueGrid> {
        let (_, response) = self
            .hub
            .spreadsheets()
            .values_get(spreadsheet.as_str(), range)
            .major_dimension(MAJOR_DIMENSION)
            .value_render_option(self.value_render.as_str())
            .date_time_render_option("FORMATTED_STRING")
            .add_scope(AUTH_SCOPE)
            .doit()
            .await
            .map_err(|e| AppError::from_sheets(e, &format!("Failed to read '{}'", range)))?;

        let grid = grid_from_json(response.values);
        debug!(rows = grid.len(), "Read values");

        Ok(grid)
    }

    #[instrument(name = "Writing values", skip(self, values))]
    async fn update_values(
        &self,
        spreadsheet: &SpreadsheetId,
        range: &str,
        values: &ValueGrid,
        input: ValueInputOption,
    ) -> Result<UpdateSummary> {
        let value_range = Self::value_range(range, values)?;

        let (_, response) = self
            .hub
            .spreadsheets()
            .values_update(value_range, spreadsheet.as_str(), range)
            .value_input_option(input.as_str())
            .add_scope(AUTH_SCOPE)
            .doit()
            .await
            .map_err(|e| AppError::from_sheets(e, &format!("Failed to write '{}'", range)))?;

        let summary = UpdateSummary::from(response);
        debug!(
            updated_range = %summary.updated_range,
            updated_rows = summary.updated_rows,
            updated_columns = summary.updated_columns,
            updated_cells = summary.updated_cells,
            "Wrote values"
        );

        Ok(summary)
    }

    #[instrument(name = "Writing values in batch", skip_all, fields(ranges = data.len()))]
    async fn batch_update_values(
        &self,
        spreadsheet: &SpreadsheetId,
        data: &[RangeValues],
        input: ValueInputOption,
    ) -> Result<BatchUpdateSummary> {
        let value_ranges = data
            .iter()
            .map(|entry| Self::value_range(&entry.range, &entry.values))
            .collect::<Result<Vec<_>>>()?;

        let request = BatchUpdateValuesRequest {
            data: Some(value_ranges),
            value_input_option: Some(input.as_str().to_string()),
            ..Default::default()
        };

        let (_, response) = self
            .hub
            .spreadsheets()
            .values_batch_update(request, spreadsheet.as_str())
            .add_scope(AUTH_SCOPE)
            .doit()
            .await
            .map_err(|e| AppError::from_sheets(e, "Failed to write values in batch"))?;

        let summary = BatchUpdateSummary::from(response);
        debug!(
            updated_sheets = summary.total_updated_sheets,
            updated_rows = summary.total_updated_rows,
            updated_columns = summary.total_updated_columns,
            updated_cells = summary.total_updated_cells,
            "Wrote values in batch"
        );

        Ok(summary)
    }

    #[instrument(name = "Appending values", skip(self, values))]
    async fn append_values(
        &self,
        spreadsheet: &SpreadsheetId,
        range: &str,
        values: &ValueGrid,
        options: AppendOptions,
    ) -> Result<AppendSummary> {
        let value_range = Self::value_range(range, values)?;

        let (_, response) = self
            .hub
            .spreadsheets()
            .values_append(value_range, spreadsheet.as_str(), range)
            .value_input_option(options.input.as_str())
            .insert_data_option(options.insert.as_str())
            .include_values_in_response(options.include_values_in_response)
            .add_scope(AUTH_SCOPE)
            .doit()
            .await
            .map_err(|e| AppError::from_sheets(e, &format!("Failed to append to '{}'", range)))?;

        let summary = AppendSummary::from(response);
        debug!(
            table_range = ?summary.table_range,
            updated_range = %summary.updates.updated_range,
            "Appended values"
        );

        Ok(summary)
    }

    #[instrument(name = "Reading values in batch", skip(self))]
    async fn batch_get_values(
        &self,
        spreadsheet: &SpreadsheetId,
        ranges: &[String],
    ) -> Result<Vec<ValueGrid>> {
        let mut call = self
            .hub
            .spreadsheets()
            .values_batch_get(spreadsheet.as_str())
            .major_dimension(MAJOR_DIMENSION)
            .value_render_option(self.value_render.as_str())
            .date_time_render_option("FORMATTED_STRING");
        for range in ranges {
            call = call.add_ranges(range);
        }

        let (_, response) = call
            .add_scope(AUTH_SCOPE)
            .doit()
            .await
            .map_err(|e| AppError::from_sheets(e, "Failed to read values in batch"))?;

        grids_in_request_order(ranges, response)
    }

    #[instrument(name = "Creating new spreadsheet", skip(self))]
    async fn create_spreadsheet(&self, title: &str) -> Result<SpreadsheetRef> {
        let spreadsheet = Spreadsheet {
            properties: Some(SpreadsheetProperties {
                title: Some(title.to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };

        let (_, result) = self
            .hub
            .spreadsheets()
            .create(spreadsheet)
            .add_scope(AUTH_SCOPE)
            .doit()
            .await
            .map_err(|e| AppError::from_sheets(e, "Failed to create spreadsheet"))?;

        let id = result
            .spreadsheet_id
            .map(SpreadsheetId::new)
            .ok_or_else(|| AppError::Remote("Created spreadsheet has empty ID".to_string()))?;

        let url = result.spreadsheet_url.unwrap_or_else(|| id.url());
        let title = result
            .properties
            .and_then(|props| props.title)
            .unwrap_or_else(|| title.to_string());

        Ok(SpreadsheetRef { id, title, url })
    }

    #[instrument(name = "Fetching spreadsheet", skip(self))]
    async fn get_spreadsheet(&self, spreadsheet: &SpreadsheetId) -> Result<SpreadsheetSummary> {
        let (_, result) = self
            .hub
            .spreadsheets()
            .get(spreadsheet.as_str())
            .include_grid_data(false)
            .add_scope(AUTH_SCOPE)
            .doit()
            .await
            .map_err(|e| AppError::from_sheets(e, "Failed to get spreadsheet"))?;

        Ok(result.into())
    }

    #[instrument(name = "Applying spreadsheet edits", skip_all, fields(edits = edits.len()))]
    async fn apply_batch_edits(
        &self,
        spreadsheet: &SpreadsheetId,
        edits: &[StructuralEdit],
    ) -> Result<()> {
        let batch_update = BatchUpdateSpreadsheetRequest {
            requests: Some(to_requests(edits)),
            ..Default::default()
        };

        self.hub
            .spreadsheets()
            .batch_update(batch_update, spreadsheet.as_str())
            .add_scope(AUTH_SCOPE)
            .doit()
            .await
            .map_err(|e| AppError::from_sheets(e, "Failed to apply spreadsheet edits"))?;

        Ok(())
    }
}

// These talk to the real service. Run with `cargo test -- --ignored` after
// `sheets-quickstart auth` has cached a token. Each run leaves behind the
// spreadsheets it creates (the Sheets API has no delete; remove them from
// Drive by hand).
#[cfg(test)]
mod live_tests {
    use super::*;
    use crate::config::Config;
    use crate::sheets::{CellValue, InsertDataOption};

    async fn live_client() -> (SheetsClient, SpreadsheetId) {
        let config = Config::load().unwrap();
        let client = SheetsClient::new(&config.google, ValueRenderOption::UnformattedValue)
            .await
            .unwrap();
        let created = client.create_spreadsheet("sheets-quickstart live test").await.unwrap();
        (client, created.id)
    }

    #[tokio::test]
    #[ignore = "requires Google credentials and network access"]
    async fn test_write_then_read_keeps_types() {
        let (client, id) = live_client().await;
        let grid: ValueGrid = vec![
            vec!["books".into(), 30.into()],
            vec!["pens".into(), 10.into()],
        ];

        client
            .update_values(&id, "A2", &grid, ValueInputOption::Raw)
            .await
            .unwrap();
        let read = client.get_values(&id, "A2:B3").await.unwrap();

        assert_eq!(read, grid);
        assert!(client.get_values(&id, "Z100:Z200").await.unwrap().is_empty());
    }

    /// First and last row numbers of an A1 range such as `Sheet1!A1:B6`.
    fn row_span(range: &str) -> (u32, u32) {
        let cells = range.rsplit('!').next().unwrap_or(range);
        let row = |cell: &str| {
            cell.trim_start_matches(|c: char| c.is_ascii_alphabetic())
                .parse::<u32>()
                .unwrap()
        };
        match cells.split_once(':') {
            Some((start, end)) => (row(start), row(end)),
            None => (row(cells), row(cells)),
        }
    }

    #[test]
    fn test_row_span() {
        assert_eq!(row_span("Sheet1!A1:B6"), (1, 6));
        assert_eq!(row_span("'Class Data'!A7:B7"), (7, 7));
        assert_eq!(row_span("Sheet1!E4"), (4, 4));
    }

    #[tokio::test]
    #[ignore = "requires Google credentials and network access"]
    async fn test_append_evaluates_formula() {
        let (client, id) = live_client().await;
        let table: ValueGrid = vec![
            vec!["Item".into(), "Cost".into()],
            vec!["Wheel".into(), 260.into()],
            vec!["Door".into(), 62.into()],
            vec!["Engine".into(), 1000.into()],
            vec!["Totals".into(), 1322.into()],
            vec!["Paint".into(), 150.into()],
        ];
        client
            .update_values(&id, "A1", &table, ValueInputOption::Raw)
            .await
            .unwrap();
        let data = vec![
            RangeValues::new("E1", vec![vec![40.into()]]),
            RangeValues::new("E4", vec![vec![25.into()]]),
        ];
        client
            .batch_update_values(&id, &data, ValueInputOption::Raw)
            .await
            .unwrap();

        let summary = client
            .append_values(
                &id,
                "A1",
                &vec![vec!["Total".into(), "=E1+E4".into()]],
                AppendOptions {
                    input: ValueInputOption::UserEntered,
                    insert: InsertDataOption::InsertRows,
                    include_values_in_response: true,
                },
            )
            .await
            .unwrap();

        let (_, table_end) = row_span(summary.table_range.as_deref().unwrap());
        let (appended_start, _) = row_span(&summary.updates.updated_range);
        assert!(appended_start > table_end);
        assert_eq!(client.get_values(&id, "A1:B6").await.unwrap(), table);

        let updated = summary.updates.updated_data.unwrap();
        assert_eq!(updated[0][1], CellValue::from("65"));

        let totals = client
            .batch_get_values(&id, &["E4".to_string(), "E1".to_string()])
            .await
            .unwrap();
        assert_eq!(
            totals,
            vec![
                vec![vec![CellValue::Number(25.0)]],
                vec![vec![CellValue::Number(40.0)]]
            ]
        );
    }

    #[tokio::test]
    #[ignore = "requires Google credentials and network access"]
    async fn test_create_same_title_twice() {
        let config = Config::load().unwrap();
        let client = SheetsClient::new(&config.google, ValueRenderOption::default())
            .await
            .unwrap();

        let first = client.create_spreadsheet("Foo").await.unwrap();
        let second = client.create_spreadsheet("Foo").await.unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(first.title, "Foo");
        assert_eq!(second.title, "Foo");
    }

    #[tokio::test]
    #[ignore = "requires Google credentials and network access"]
    async fn test_missing_spreadsheet_is_not_found() {
        let config = Config::load().unwrap();
        let client = SheetsClient::new(&config.google, ValueRenderOption::default())
            .await
            .unwrap();

        let result = client
            .get_values(&SpreadsheetId::from("does-not-exist"), "A1")
            .await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
