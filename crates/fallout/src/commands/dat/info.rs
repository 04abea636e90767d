use clap::Args;
use fallout_dat::{compression::is_compressed, DatArchive};
use miette::{Context, IntoDiagnostic, Result};
use owo_colors::OwoColorize;
use std::path::PathBuf;

#[derive(Args)]
pub struct InfoArgs {
    /// An input map archive
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,
}

impl InfoArgs {
    pub fn handle(&self) -> Result<()> {
        let bytes = std::fs::read(&self.file)
            .into_diagnostic()
            .context(format!("path: {}", &self.file.display()))?;

        let compressed = is_compressed(&bytes);
        let archive = DatArchive::parse(&bytes)?;
        let header = archive.header();

        println!("{}: {:?}", "version".bold(), header.version);
        println!("{}: {}", "map".bold(), header.filename);
        println!("{}: {}", "map id".bold(), header.map_id);
        println!(
            "{}: {}",
            "stored".bold(),
            if compressed { "gzip" } else { "raw" }
        );
        println!(
            "{}: {}",
            "local variables".bold(),
            header.local_variable_count
        );
        println!(
            "{}: {}",
            "global variables".bold(),
            header.global_variable_count
        );
        println!("{}: {}", "scripts".bold(), archive.scripts().len());

        Ok(())
    }
}
