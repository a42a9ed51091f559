mod cli;

use convert4ps4::{config, output, ConversionJob};
use convert4ps4_av::{FfprobeProber, ToolRegistry, FFMPEG, FFPROBE};

use anyhow::Result;
use clap::Parser;
use cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "convert4ps4=debug,convert4ps4_av=debug".to_string()
        } else {
            "convert4ps4=info,convert4ps4_av=info".to_string()
        }
    });

    // stdout is reserved for --dry-run and --json output
    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    let config = config::load_config_or_default(cli.config.as_deref())?;

    let tools = ToolRegistry::discover(&config.tools);
    tools.require_all().map_err(convert4ps4::Error::from)?;
    let ffmpeg = tools.require(FFMPEG).map_err(convert4ps4::Error::from)?;
    let ffprobe = tools.require(FFPROBE).map_err(convert4ps4::Error::from)?;
    for tool in [ffmpeg, ffprobe] {
        tracing::debug!("using {} at {}", tool.name, tool.path.display());
    }

    output::validate_input(&cli.input_file)?;

    let output_dir = output::resolve_output_dir(
        std::env::var_os(output::OUTPUT_DIR_ENV),
        config.output.dir.as_deref(),
    )?;

    let prober = FfprobeProber::new(ffprobe.path.clone());
    let job = ConversionJob::prepare(&cli.input_file, &output_dir, &config, &prober)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&job.report(&ffmpeg.path))?);
        return Ok(());
    }

    if cli.dry_run {
        println!("{}", job.command(&ffmpeg.path));
        return Ok(());
    }

    job.run(&ffmpeg.path, cli.overwrite)?;
    Ok(())
}
