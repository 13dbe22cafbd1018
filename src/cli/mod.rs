mod auth;
mod read;
mod show;
mod walkthrough;

use crate::error::Result;
use clap::{Parser, Subcommand};

pub use show::ShowResource;

#[derive(Parser, Debug)]
#[command(name = "sheets-quickstart")]
#[command(about = "Read and write Google Sheets from the command line", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub async fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Read {
                spreadsheet_id,
                range,
            } => read::execute(spreadsheet_id.as_deref(), range.as_deref()).await,
            Commands::Walkthrough {
                spreadsheet_id,
                yes,
                overwrite,
            } => walkthrough::execute(spreadsheet_id.as_deref(), *yes, *overwrite).await,
            Commands::Auth { reset } => auth::execute(*reset).await,
            Commands::Show { resource } => resource.execute().await,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the names and majors from the configured roster range
    Read {
        /// Spreadsheet to read instead of the configured one
        #[arg(long)]
        spreadsheet_id: Option<String>,
        /// A1 range to read instead of the configured one
        #[arg(long)]
        range: Option<String>,
    },
    /// Write, append, batch and restructure an expenses spreadsheet
    Walkthrough {
        /// Existing spreadsheet to modify; a new one is created when omitted
        #[arg(long)]
        spreadsheet_id: Option<String>,
        /// Skip the confirmation before modifying an existing spreadsheet
        #[arg(long, short)]
        yes: bool,
        /// Write the appended total over the rows below the table instead of inserting rows
        #[arg(long)]
        overwrite: bool,
    },
    /// Authenticate with Google Sheets
    Auth {
        /// Discard cached tokens before authenticating
        #[arg(long)]
        reset: bool,
    },
    Show {
        #[command(subcommand)]
        resource: ShowResource,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_read_overrides() {
        let cli = Cli::try_parse_from([
            "sheets-quickstart",
            "read",
            "--spreadsheet-id",
            "abc",
            "--range",
            "Sheet1!A1:B2",
        ])
        .unwrap();

        match cli.command {
            Commands::Read {
                spreadsheet_id,
                range,
            } => {
                assert_eq!(spreadsheet_id.as_deref(), Some("abc"));
                assert_eq!(range.as_deref(), Some("Sheet1!A1:B2"));
            }
            other => panic!("expected read, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_walkthrough_defaults() {
        let cli = Cli::try_parse_from(["sheets-quickstart", "walkthrough"]).unwrap();

        match cli.command {
            Commands::Walkthrough {
                spreadsheet_id,
                yes,
                overwrite,
            } => {
                assert!(spreadsheet_id.is_none());
                assert!(!yes);
                assert!(!overwrite);
            }
            other => panic!("expected walkthrough, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_walkthrough_overwrite() {
        let cli = Cli::try_parse_from([
            "sheets-quickstart",
            "walkthrough",
            "--spreadsheet-id",
            "abc",
            "--yes",
            "--overwrite",
        ])
        .unwrap();

        match cli.command {
            Commands::Walkthrough {
                spreadsheet_id,
                yes,
                overwrite,
            } => {
                assert_eq!(spreadsheet_id.as_deref(), Some("abc"));
                assert!(yes);
                assert!(overwrite);
            }
            other => panic!("expected walkthrough, got {:?}", other),
        }
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
