use crate::config::Config;
use crate::error::Result;
use crate::sheets::{acquire_credentials, clear_sheets_tokens};
use tracing::info;

pub async fn execute(reset: bool) -> Result<()> {
    if reset {
        clear_sheets_tokens()?;
    }

    let config = Config::load()?;
    let _credential = acquire_credentials(&config.google).await?;

    info!("Google Sheets authentication verified");

    Ok(())
}
