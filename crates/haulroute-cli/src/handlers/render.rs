//! Render command handler
//!
//! Drives the animator with a manual scheduler: the first frame is drawn
//! when the route is applied, then `--frames` more are fired.

use super::{load_plan, resolve_surface, resolve_theme};
use crate::commands::{RenderArgs, RenderFormat};
use crate::config::CliConfig;
use crate::error::CliResult;
use crate::output::{write_result, Reporter};
use haulroute::{
    Color, DrawCommand, ManualScheduler, RecordingCanvas, RouteAnimator, Size, SvgConfig,
    SvgExporter, Theme,
};
use tracing::info;

/// Page background behind the canvas in the dark theme
const DARK_BACKGROUND: Color = Color::from_hex(0x1e1e1e);

/// Result of a headless run
#[derive(Debug)]
pub struct RenderedFrame {
    /// Commands of the last frame drawn
    pub commands: Vec<DrawCommand>,
    /// Surface the frame was drawn on
    pub size: Size,
    /// Frames drawn, the first one included
    pub frames_drawn: u64,
    /// Final animator state
    pub state: String,
}

/// Execute the render command
pub fn execute_render(config: &CliConfig, args: &RenderArgs) -> CliResult<()> {
    let plan = load_plan(&args.file)?;
    let surface = resolve_surface(config, args.surface)?;
    let theme = resolve_theme(config, args.theme);
    let reporter = Reporter::from_config(config);

    let frame = render_headless(config, plan.route, args.loading, surface, theme, args.frames)?;
    if frame.commands.is_empty() {
        reporter.warning("route is empty; nothing was drawn");
    }

    let content = match args.format {
        RenderFormat::Json => serde_json::to_string_pretty(&frame.commands)?,
        RenderFormat::Svg => svg_exporter(theme).export(&frame.commands, frame.size)?,
    };
    write_result(&content, args.output.as_deref())?;

    if let Some(path) = &args.output {
        reporter.success(&format!(
            "{} frame(s), {}, written to {}",
            frame.frames_drawn,
            frame.state,
            path.display()
        ));
    }
    Ok(())
}

/// Run the animator for `frames` frames after the initial one
pub fn render_headless(
    config: &CliConfig,
    route: Option<Vec<haulroute::Leg>>,
    loading: bool,
    surface: Size,
    theme: Theme,
    frames: u64,
) -> CliResult<RenderedFrame> {
    let mut animator = RouteAnimator::new(
        ManualScheduler::new(),
        RecordingCanvas::new(surface),
        config.animation,
        theme.palette(),
    )?;
    animator.update(route, loading)?;
    let fired = animator.run_frames(frames)?;
    info!(requested = frames, fired, state = %animator.state(), "headless run finished");

    Ok(RenderedFrame {
        commands: animator.canvas().commands().to_vec(),
        size: surface,
        frames_drawn: animator.frames_drawn(),
        state: animator.state().to_string(),
    })
}

fn svg_exporter(theme: Theme) -> SvgExporter {
    let config = SvgConfig::new().with_title("Route");
    let config = match theme {
        Theme::Dark => config.with_background(DARK_BACKGROUND),
        Theme::Light => config,
    };
    SvgExporter::with_config(config)
}
