//! `playdeck version`

use anyhow::Result;
use clap::Args;

#[derive(Args, Debug)]
pub struct VersionArgs {}

impl VersionArgs {
    pub fn run(self) -> Result<()> {
        println!("playdeck {}", env!("CARGO_PKG_VERSION"));
        Ok(())
    }
}
