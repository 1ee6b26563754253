//! Preview command - Generate preview sources using vize_esquisse

use crate::config::{load_config, PreviewConfig};
use crate::error::CliError;
use clap::Args;
use std::io::Read;
use std::path::{Path, PathBuf};
use vize_esquisse::{ComponentAnalysis, PreviewSources};
use vize_musea::host::{ControllerCommand, ControllerInput, IframeController, RenderRequest};
use vize_musea::messages::{HostMessage, RenderMessage};

#[derive(Args)]
pub struct PreviewArgs {
    /// Component analysis JSON file (reads stdin when omitted or `-`)
    pub input: Option<PathBuf>,

    /// Generate randomized values
    #[arg(long)]
    pub random: bool,

    /// Seed for random generation (implies --random)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Source file of the previewable; prints a `render` message instead of bare sources
    #[arg(long, requires = "component")]
    pub file: Option<String>,

    /// Component or story name within --file
    #[arg(long, requires = "file")]
    pub component: Option<String>,

    /// Story variant key
    #[arg(long, requires = "file")]
    pub variant: Option<String>,

    /// Project directory containing vize.config.json
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,
}

/// A previewable selected on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderTarget {
    pub file_path: String,
    pub component_name: String,
    pub variant_key: Option<String>,
}

impl RenderTarget {
    /// Identifier used in the iframe URL.
    pub fn previewable_id(&self) -> String {
        format!("{}:{}", self.file_path, self.component_name)
    }
}

pub fn run(args: PreviewArgs) -> Result<(), CliError> {
    let mut preview = load_config(args.config.as_deref()).preview;
    preview.random |= args.random || args.seed.is_some();
    if args.seed.is_some() {
        preview.seed = args.seed;
    }

    let input = read_input(args.input.as_deref())?;
    let analysis = ComponentAnalysis::from_json(&input)?;

    let target = match (args.file, args.component) {
        (Some(file_path), Some(component_name)) => Some(RenderTarget {
            file_path,
            component_name,
            variant_key: args.variant,
        }),
        _ => None,
    };

    let output = preview_output(&analysis, target.as_ref(), &preview, args.pretty)?;
    if let (Some(target), Some(message)) = (&target, output.render) {
        for line in render_plan(target, message, &preview) {
            eprintln!("{}", line);
        }
    }

    println!("{}", output.json);
    Ok(())
}

fn read_input(path: Option<&Path>) -> Result<String, CliError> {
    match path {
        Some(path) if path != Path::new("-") => {
            std::fs::read_to_string(path).map_err(|source| CliError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
        _ => {
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .map_err(|source| CliError::Read {
                    path: PathBuf::from("<stdin>"),
                    source,
                })?;
            Ok(input)
        }
    }
}

pub struct PreviewOutput {
    pub json: String,
    /// The message sent to the iframe when a target was given.
    pub render: Option<RenderMessage>,
}

/// Serialize the sources for `analysis`, or a `render` message for `target`.
pub fn preview_output(
    analysis: &ComponentAnalysis,
    target: Option<&RenderTarget>,
    preview: &PreviewConfig,
    pretty: bool,
) -> Result<PreviewOutput, CliError> {
    let sources = analysis.preview_sources(&preview.generate_options());
    tracing::debug!(
        "generated {} bytes of declarations",
        sources.type_declarations_source.len()
    );

    let output = match target {
        Some(target) => {
            let message = render_message(sources, target, preview);
            let host_message = HostMessage::Render(message.clone());
            PreviewOutput {
                json: if pretty {
                    serde_json::to_string_pretty(&host_message)?
                } else {
                    serde_json::to_string(&host_message)?
                },
                render: Some(message),
            }
        }
        None => PreviewOutput {
            json: if pretty {
                serde_json::to_string_pretty(&sources)?
            } else {
                serde_json::to_string(&sources)?
            },
            render: None,
        },
    };
    Ok(output)
}

/// Describe what the host controller does for a first render of `message`:
/// the watchdog it arms and the iframe document it opens.
pub fn render_plan(
    target: &RenderTarget,
    message: RenderMessage,
    preview: &PreviewConfig,
) -> Vec<String> {
    let config = preview.controller_config();
    let render_timeout = config.render_timeout;
    let max_logs = config.max_logs;

    let mut controller = IframeController::new(config);
    let commands = controller.update(ControllerInput::Render(RenderRequest {
        id: 1,
        previewable_id: target.previewable_id(),
        message,
    }));

    commands
        .into_iter()
        .filter_map(|command| match command {
            ControllerCommand::StartWatchdog(_) => Some(format!(
                "Render timeout: {}ms (keeping {} log entries)",
                render_timeout.as_millis(),
                max_logs
            )),
            ControllerCommand::ResetIframe { src } if !preview.base_url.is_empty() => {
                Some(format!("Preview URL: {}", src))
            }
            _ => None,
        })
        .collect()
}

fn render_message(
    sources: PreviewSources,
    target: &RenderTarget,
    preview: &PreviewConfig,
) -> RenderMessage {
    RenderMessage {
        file_path: target.file_path.clone(),
        component_name: target.component_name.clone(),
        default_props_source: sources.default_props_source,
        props_assignment_source: sources.default_invocation_source,
        variant_key: target.variant_key.clone(),
        wrapper: preview.wrapper.clone(),
    }
}
