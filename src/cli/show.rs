use crate::config::Config;
use crate::error::Result;
use crate::sheets::{SheetsClient, SpreadsheetId, SpreadsheetOperations};
use clap::Subcommand;
use tracing::info;

#[derive(Subcommand, Debug)]
pub enum ShowResource {
    /// Show configuration and cache paths
    Paths,
    /// Show the title and sheets of a spreadsheet
    Spreadsheet {
        /// Spreadsheet to describe instead of the configured one
        #[arg(long)]
        spreadsheet_id: Option<String>,
    },
}

impl ShowResource {
    pub async fn execute(&self) -> Result<()> {
        match self {
            ShowResource::Paths => show_paths(),
            ShowResource::Spreadsheet { spreadsheet_id } => {
                show_spreadsheet(spreadsheet_id.as_deref()).await
            }
        }
    }
}

fn show_paths() -> Result<()> {
    let config_path = Config::config_file()?;
    let cache_dir = Config::cache_dir()?;

    info!(path = ?config_path, exists = config_path.exists(), "Config path");
    info!(path = ?cache_dir, "Cache path");

    Ok(())
}

async fn show_spreadsheet(spreadsheet_id: Option<&str>) -> Result<()> {
    let config = Config::load()?;
    let id = SpreadsheetId::from(spreadsheet_id.unwrap_or(&config.quickstart.spreadsheet_id));

    let sheets = SheetsClient::new(&config.google, config.quickstart.value_render_option).await?;
    let summary = sheets.get_spreadsheet(&id).await?;

    info!(title = %summary.title, url = %id.url(), "Spreadsheet");
    for sheet in &summary.sheets {
        info!(sheet_id = sheet.sheet_id, title = %sheet.title, "Sheet");
    }

    Ok(())
}
