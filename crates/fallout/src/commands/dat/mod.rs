pub mod decompress;
pub mod info;
pub mod scripts;

#[derive(clap::Subcommand)]
pub enum DatCommands {
    /// Summarize the header and tables of a map archive
    Info(info::InfoArgs),
    /// List the script records of a map archive
    Scripts(scripts::ScriptsArgs),
    /// Expand a map archive into its raw bytes
    Decompress(decompress::DecompressArgs),
}

impl DatCommands {
    pub fn handle(&self) -> miette::Result<()> {
        match self {
            DatCommands::Info(info) => info.handle(),
            DatCommands::Scripts(scripts) => scripts.handle(),
            DatCommands::Decompress(decompress) => decompress.handle(),
        }
    }
}
