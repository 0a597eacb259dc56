use aigent_icon::icon_gen;
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[clap(
    name = "aigent-icon",
    about = "Render the AIgent app icon at every size the iOS icon set needs"
)]
struct Args {
    /// Icon set directory. Must already exist.
    #[clap(
        short,
        long,
        value_name = "DIR",
        default_value = icon_gen::DEFAULT_OUTPUT_DIR
    )]
    output: PathBuf,

    /// Also write the icon set's Contents.json, replacing any existing one.
    #[clap(long)]
    contents_json: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    icon_gen::generate_icons(icon_gen::Args {
        output: args.output,
        contents_json: args.contents_json,
    })
}
