use clap::Args;
use fallout_dat::try_decompress;
use miette::{Context, IntoDiagnostic, Result};
use std::{fs::File, io::Write, path::PathBuf};
use tracing::info;

#[derive(Args)]
pub struct DecompressArgs {
    /// An input map archive
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,

    /// The file to write the raw archive bytes to
    #[arg(short, long, value_name = "FILE")]
    output: PathBuf,

    /// Allow overwriting the target
    #[arg(long, default_value_t = false)]
    overwrite: bool,
}

impl DecompressArgs {
    pub fn handle(&self) -> Result<()> {
        let bytes = std::fs::read(&self.file)
            .into_diagnostic()
            .context(format!("path: {}", &self.file.display()))?;

        let raw = try_decompress(&bytes)?;
        info!(
            "expanded {} bytes into {} raw bytes",
            bytes.len(),
            raw.len()
        );

        let mut out = if !self.overwrite {
            File::create_new(&self.output)
                .into_diagnostic()
                .context(format!("creating {}", &self.output.display()))?
        } else {
            File::create(&self.output)
                .into_diagnostic()
                .context(format!("creating {}", &self.output.display()))?
        };

        out.write_all(&raw).into_diagnostic()?;

        Ok(())
    }
}
