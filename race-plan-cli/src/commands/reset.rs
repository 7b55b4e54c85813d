use anyhow::Result;
use clap::Args;

use crate::storage::Storage;

#[derive(Args)]
pub struct ResetCommand {
    /// Skip confirmation
    #[arg(short, long)]
    force: bool,
}

impl ResetCommand {
    pub fn execute(self, storage: &Storage) -> Result<()> {
        if !self.force {
            println!("This removes the stored goal and plan in {}", storage.dir().display());
            println!("Use --force to confirm");
            return Ok(());
        }

        storage.clear()?;

        println!("✓ Stored goal and plan removed");

        Ok(())
    }
}
