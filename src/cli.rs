use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "convert4ps4")]
#[command(
    author,
    version,
    about = "Probe a video file and transcode/transmux it so the PS4 media player can play it",
    long_about = "Probe a video file to see if it's encoded in a way that the default \
PlayStation 4 Media Player can handle. If not, transcode/transmux it with ffmpeg. \
If the C4PS4_TARGET environment variable is set, the output is written to the \
directory it points to."
)]
pub struct Cli {
    /// Media file to convert
    pub input_file: PathBuf,

    /// Print the ffmpeg command instead of running it
    #[arg(long)]
    pub dry_run: bool,

    /// Print the probe result and stream selection as JSON instead of running ffmpeg
    #[arg(long, conflicts_with = "dry_run")]
    pub json: bool,

    /// Replace the output file if it already exists
    #[arg(long)]
    pub overwrite: bool,

    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}
