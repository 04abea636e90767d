use clap::Args;
use fallout_dat::{DatArchive, ScriptTagType};
use miette::{Context, IntoDiagnostic, Result};
use owo_colors::OwoColorize;
use std::path::PathBuf;

#[derive(Args)]
pub struct ScriptsArgs {
    /// An input map archive
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,

    /// Only list scripts of this type
    #[arg(short = 't', long, value_name = "TYPE")]
    script_type: Option<ScriptType>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, clap::ValueEnum)]
enum ScriptType {
    System,
    Spatial,
    Timed,
    Item,
    Critter,
}

impl From<ScriptType> for ScriptTagType {
    fn from(value: ScriptType) -> Self {
        match value {
            ScriptType::System => ScriptTagType::System,
            ScriptType::Spatial => ScriptTagType::Spatial,
            ScriptType::Timed => ScriptTagType::Timed,
            ScriptType::Item => ScriptTagType::Item,
            ScriptType::Critter => ScriptTagType::Critter,
        }
    }
}

impl ScriptsArgs {
    pub fn handle(&self) -> Result<()> {
        let bytes = std::fs::read(&self.file)
            .into_diagnostic()
            .context(format!("path: {}", &self.file.display()))?;
        let archive = DatArchive::parse(&bytes)?;

        let wanted = self.script_type.map(ScriptTagType::from);
        for (index, script) in archive.scripts().iter().enumerate() {
            if wanted.is_some_and(|t| t != script.script_type) {
                continue;
            }

            println!(
                "{index:4}  {} {:<8} {} {:<6?} {} {:<6} {} {}",
                "sid".bold(),
                script.id,
                "type".bold(),
                script.script_type,
                "offset".bold(),
                script.local_variable_offset,
                "locals".bold(),
                script.local_variable_count,
            );
        }

        Ok(())
    }
}
