use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Convert ASKM .map files to Tiled JSON maps")]
pub struct Cli {
    /// Input .map file
    pub input: PathBuf,
    /// Output .tmj file
    pub output: PathBuf,
    /// Directory holding the tileset (.tsj) files
    #[arg(short, long, default_value = ".")]
    pub resource: PathBuf,
    /// JSON conversion config
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}
