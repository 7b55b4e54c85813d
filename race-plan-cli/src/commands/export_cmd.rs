use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use crate::config::Config;
use crate::export::{self, ExportFormat, Orientation};
use crate::storage::Storage;

#[derive(Args)]
pub struct ExportCommand {
    /// Output format (defaults to the configured format)
    #[arg(short, long, value_enum)]
    format: Option<ExportFormat>,

    /// Table layout (defaults to the configured orientation)
    #[arg(long, value_enum)]
    orientation: Option<Orientation>,

    /// Title shown above the plan
    #[arg(long)]
    title: Option<String>,

    /// Output file (defaults to training-plan-YYYY-MM-DD.<ext>)
    #[arg(short, long, conflicts_with = "stdout")]
    output: Option<PathBuf>,

    /// Print to stdout instead of writing a file
    #[arg(long)]
    stdout: bool,
}

impl ExportCommand {
    pub fn execute(self, config: &Config, storage: &Storage) -> Result<()> {
        let plan = super::load_plan(storage)?;

        let mut options = config.export.to_options();
        if let Some(format) = self.format {
            options.format = format;
        }
        if let Some(orientation) = self.orientation {
            options.orientation = orientation;
        }
        if let Some(title) = self.title {
            options.title = title;
        }

        if self.stdout {
            print!("{}", export::render(&plan, &options)?);
            return Ok(());
        }

        // files never carry terminal colour codes
        options.color = false;

        let path = self.output.unwrap_or_else(|| {
            PathBuf::from(export::default_file_name(
                options.format,
                chrono::Local::now().date_naive(),
            ))
        });
        export::export_to_file(&plan, &options, &path)?;

        println!("✓ Plan exported to {}", path.display());

        Ok(())
    }
}
