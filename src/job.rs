//! One probe-select-encode cycle for a single input file.

use crate::config::Config;
use crate::encode::EncodePlan;
use crate::output::{display_name, output_path};
use crate::strategy::{select_streams, SelectionResult};
use crate::{Error, Result};
use convert4ps4_av::{ContainerInfo, Prober, ToolCommand, Workspace};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Everything decided about an input before ffmpeg runs.
#[derive(Debug, Clone)]
pub struct ConversionJob {
    pub input: PathBuf,
    pub output: PathBuf,
    pub container: ContainerInfo,
    pub selection: SelectionResult,
    pub plan: EncodePlan,
}

impl ConversionJob {
    /// Probe `input` and decide what to do with its streams.
    ///
    /// `input` must already be validated as a regular file and `output_dir`
    /// as an existing directory.
    pub fn prepare(
        input: &Path,
        output_dir: &Path,
        config: &Config,
        prober: &dyn Prober,
    ) -> Result<Self> {
        let output = output_path(input, output_dir, &config.output.marker)?;

        tracing::info!("probing {} with {}", display_name(input), prober.name());
        let container = prober.probe(input)?;
        tracing::debug!(
            "container {} with {} streams",
            container.format_name,
            container.streams.len()
        );

        let selection = match select_streams(&container, &config.target) {
            Ok(selection) => selection,
            Err(err @ Error::NoSuitableAudio { .. }) => {
                log_format_summary(&container);
                return Err(err);
            }
            Err(err) => return Err(err),
        };

        let plan = EncodePlan::new(&selection, &config.encoder);

        Ok(Self {
            input: input.to_path_buf(),
            output,
            container,
            selection,
            plan,
        })
    }

    /// The ffmpeg command writing straight to the final output path.
    pub fn command(&self, ffmpeg: &Path) -> ToolCommand {
        self.plan.command(ffmpeg, &self.input, &self.output)
    }

    /// Machine-readable summary of the probe and the decision.
    pub fn report(&self, ffmpeg: &Path) -> JobReport<'_> {
        JobReport {
            input: &self.input,
            output: &self.output,
            container: &self.container,
            selection: &self.selection,
            command: self.command(ffmpeg).to_string(),
        }
    }

    /// Run ffmpeg into a staged file and move it to the output path.
    ///
    /// # Errors
    ///
    /// [`Error::OutputExists`] if the output is present and `overwrite` is
    /// false; [`Error::EncodeFailure`] if ffmpeg fails or the result cannot be
    /// moved into place. Partial output is discarded.
    pub fn run(&self, ffmpeg: &Path, overwrite: bool) -> Result<PathBuf> {
        if self.output.exists() && !overwrite {
            return Err(Error::OutputExists {
                path: self.output.clone(),
            });
        }

        let workspace = Workspace::new(&self.output).map_err(Error::EncodeFailure)?;
        let cmd = self.plan.command(ffmpeg, &self.input, &workspace.staged());

        if self.plan.is_remux_only() {
            tracing::info!("remuxing {}", display_name(&self.input));
        } else {
            tracing::info!("transcoding {}", display_name(&self.input));
        }
        cmd.status().map_err(Error::EncodeFailure)?;

        let path = workspace.finalize().map_err(Error::EncodeFailure)?;
        tracing::info!("wrote {}", path.display());
        Ok(path)
    }
}

/// Serializable view of a [`ConversionJob`], printed by `--json`.
#[derive(Debug, Serialize)]
pub struct JobReport<'a> {
    pub input: &'a Path,
    pub output: &'a Path,
    pub container: &'a ContainerInfo,
    pub selection: &'a SelectionResult,
    pub command: String,
}

fn log_format_summary(container: &ContainerInfo) {
    tracing::error!(
        format = %container.format_name,
        long_name = container.format_long_name.as_deref().unwrap_or("-"),
        duration_secs = container.duration.map(|d| d.as_secs_f64()),
        size = container.size,
        streams = container.streams.len(),
        "no suitable audio stream found"
    );
}
