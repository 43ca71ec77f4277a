//! SVG export of recorded frames.
//!
//! Turns the [`DrawCommand`]s of one frame into a standalone SVG document,
//! so a headless run can be inspected in any browser.

use crate::canvas::{Color, DrawCommand, StrokeStyle, TextAlign, TextStyle, Transform2D};
use crate::geometry::Size;
use crate::result::{HaulrouteError, HaulrouteResult};
use std::fmt::Write as FmtWrite;

/// Output compression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SvgCompression {
    /// One element per line, indented
    #[default]
    None,
    /// No whitespace between elements
    Minified,
}

/// Configuration for SVG export
#[derive(Debug, Clone, PartialEq)]
pub struct SvgConfig {
    /// Output compression level
    pub compression: SvgCompression,
    /// Include XML declaration
    pub include_xml_declaration: bool,
    /// Fill painted on every clear; transparent when `None`
    pub background: Option<Color>,
    /// Title for accessibility
    pub title: Option<String>,
}

impl Default for SvgConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl SvgConfig {
    /// Readable output with an XML declaration
    #[must_use]
    pub const fn new() -> Self {
        Self {
            compression: SvgCompression::None,
            include_xml_declaration: true,
            background: None,
            title: None,
        }
    }

    /// Set compression level
    #[must_use]
    pub const fn with_compression(mut self, compression: SvgCompression) -> Self {
        self.compression = compression;
        self
    }

    /// Set XML declaration inclusion
    #[must_use]
    pub const fn with_xml_declaration(mut self, include: bool) -> Self {
        self.include_xml_declaration = include;
        self
    }

    /// Set background fill
    #[must_use]
    pub const fn with_background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    /// Set title
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// Renders draw commands as SVG markup
#[derive(Debug, Clone, Default)]
pub struct SvgExporter {
    config: SvgConfig,
}

// Convert fmt::Error into an export error
macro_rules! w {
    ($($arg:tt)*) => {
        write!($($arg)*).map_err(|e| HaulrouteError::Export { message: e.to_string() })
    };
}

impl SvgExporter {
    /// Create an exporter with default config
    #[must_use]
    pub const fn new() -> Self {
        Self {
            config: SvgConfig::new(),
        }
    }

    /// Create an exporter with custom config
    #[must_use]
    pub const fn with_config(config: SvgConfig) -> Self {
        Self { config }
    }

    /// Get the current config
    #[must_use]
    pub const fn config(&self) -> &SvgConfig {
        &self.config
    }

    /// Render one frame's commands on a `size` viewport
    ///
    /// # Errors
    ///
    /// Returns error if the surface has no area or formatting fails
    pub fn export(&self, commands: &[DrawCommand], size: Size) -> HaulrouteResult<String> {
        if !size.has_area() {
            return Err(HaulrouteError::InvalidSurface {
                width: size.width,
                height: size.height,
            });
        }

        let mut svg = String::with_capacity(256 + commands.len() * 96);
        let newline = self.newline();

        if self.config.include_xml_declaration {
            svg.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>");
            svg.push_str(newline);
        }

        let (width, height) = (num(size.width), num(size.height));
        w!(
            svg,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" \
             width=\"{width}\" height=\"{height}\" \
             viewBox=\"0 0 {width} {height}\">"
        )?;
        svg.push_str(newline);

        if let Some(ref title) = self.config.title {
            w!(svg, "{}<title>{}</title>", self.indent(1), escape_xml(title))?;
            svg.push_str(newline);
        }

        for command in commands {
            self.render_command(&mut svg, command, 1)?;
        }

        svg.push_str("</svg>");
        svg.push_str(newline);
        Ok(svg)
    }

    fn newline(&self) -> &'static str {
        match self.config.compression {
            SvgCompression::None => "\n",
            SvgCompression::Minified => "",
        }
    }

    fn indent(&self, depth: usize) -> String {
        match self.config.compression {
            SvgCompression::None => "  ".repeat(depth),
            SvgCompression::Minified => String::new(),
        }
    }

    fn render_command(&self, svg: &mut String, command: &DrawCommand, depth: usize) -> HaulrouteResult<()> {
        let indent = self.indent(depth);
        let newline = self.newline();

        match command {
            DrawCommand::Clear { size } => {
                // Earlier commands of the frame are already dropped by the recorder
                let Some(background) = self.config.background else {
                    return Ok(());
                };
                w!(
                    svg,
                    "{indent}<rect x=\"0\" y=\"0\" width=\"{}\" height=\"{}\"",
                    num(size.width),
                    num(size.height)
                )?;
                write_fill(svg, background)?;
                w!(svg, "/>")?;
            }
            DrawCommand::Line { from, to, style } => {
                w!(
                    svg,
                    "{indent}<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\"",
                    num(from.x),
                    num(from.y),
                    num(to.x),
                    num(to.y)
                )?;
                write_stroke(svg, style)?;
                w!(svg, "/>")?;
            }
            DrawCommand::Circle {
                center,
                radius,
                fill,
                stroke,
            } => {
                w!(
                    svg,
                    "{indent}<circle cx=\"{}\" cy=\"{}\" r=\"{}\"",
                    num(center.x),
                    num(center.y),
                    num(*radius)
                )?;
                match fill {
                    Some(color) => write_fill(svg, *color)?,
                    None => w!(svg, " fill=\"none\"")?,
                }
                if let Some(style) = stroke {
                    write_stroke(svg, style)?;
                }
                w!(svg, "/>")?;
            }
            DrawCommand::Rect { bounds, fill } => {
                w!(
                    svg,
                    "{indent}<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"",
                    num(bounds.x),
                    num(bounds.y),
                    num(bounds.width),
                    num(bounds.height)
                )?;
                write_fill(svg, *fill)?;
                w!(svg, "/>")?;
            }
            DrawCommand::Text {
                content,
                position,
                style,
            } => {
                w!(
                    svg,
                    "{indent}<text x=\"{}\" y=\"{}\"",
                    num(position.x),
                    num(position.y)
                )?;
                write_text_style(svg, style)?;
                w!(svg, ">{}</text>", escape_xml(content))?;
            }
            DrawCommand::Group {
                children,
                transform,
            } => {
                w!(svg, "{indent}<g transform=\"{}\">", matrix(transform))?;
                svg.push_str(newline);
                for child in children {
                    self.render_command(svg, child, depth + 1)?;
                }
                w!(svg, "{indent}</g>")?;
            }
        }

        svg.push_str(newline);
        Ok(())
    }
}

fn write_fill(svg: &mut String, color: Color) -> HaulrouteResult<()> {
    w!(svg, " fill=\"{}\"", color.to_css())
}

fn write_stroke(svg: &mut String, style: &StrokeStyle) -> HaulrouteResult<()> {
    w!(
        svg,
        " stroke=\"{}\" stroke-width=\"{}\"",
        style.color.to_css(),
        num(style.width)
    )?;
    if style.is_dashed() {
        let dash: Vec<String> = style.dash.iter().map(|d| num(*d)).collect();
        w!(svg, " stroke-dasharray=\"{}\"", dash.join(" "))?;
    }
    Ok(())
}

fn write_text_style(svg: &mut String, style: &TextStyle) -> HaulrouteResult<()> {
    let anchor = match style.align {
        TextAlign::Left => "start",
        TextAlign::Center => "middle",
        TextAlign::Right => "end",
    };
    w!(
        svg,
        " font-family=\"{}\" font-size=\"{}\" fill=\"{}\" text-anchor=\"{anchor}\"",
        escape_xml(&style.font_family),
        num(style.font_size),
        style.color.to_css()
    )
}

fn matrix(transform: &Transform2D) -> String {
    let parts: Vec<String> = transform.matrix.iter().map(|v| num(*v)).collect();
    format!("matrix({})", parts.join(" "))
}

/// Shortest decimal with at most three fraction digits
fn num(value: f64) -> String {
    let text = format!("{value:.3}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}

/// Escape XML special characters
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::canvas::{Canvas, RecordingCanvas};
    use crate::geometry::Point;
    use crate::layout::{LayoutConfig, RouteGraph};
    use crate::leg::Leg;
    use crate::marker::Marker;
    use crate::palette::Palette;
    use crate::render::draw_frame;

    fn frame() -> RecordingCanvas {
        let size = Size::new(400.0, 300.0);
        let legs = [Leg::new(("Dallas", "TX"), ("Austin", "TX"))
            .with_distance(195.0)
            .deadhead(true)];
        let graph = RouteGraph::build(&legs, size, &LayoutConfig::default());
        let mut canvas = RecordingCanvas::new(size);
        draw_frame(&mut canvas, &graph, &Marker::for_graph(&graph), &Palette::LIGHT);
        canvas
    }

    #[test]
    fn test_export_document_shape() {
        let canvas = frame();
        let svg = SvgExporter::new().export(canvas.commands(), canvas.size()).unwrap();
        assert!(svg.starts_with("<?xml"));
        assert!(svg.contains("viewBox=\"0 0 400 300\""));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert_eq!(svg.matches("<line").count(), 1);
        assert_eq!(svg.matches("<g ").count(), 1);
    }

    #[test]
    fn test_deadhead_dash_and_text() {
        let canvas = frame();
        let svg = SvgExporter::new().export(canvas.commands(), canvas.size()).unwrap();
        assert!(svg.contains("stroke-dasharray=\"5 5\""));
        assert!(svg.contains("stroke=\"#e74c3c\""));
        assert!(svg.contains(">195 mi (Deadhead)</text>"));
        assert!(svg.contains(">Dallas, TX</text>"));
        assert!(svg.contains("text-anchor=\"middle\""));
    }

    #[test]
    fn test_group_transform() {
        let commands = [DrawCommand::Group {
            children: vec![],
            transform: Transform2D::translate(10.0, 20.5),
        }];
        let svg = SvgExporter::new()
            .export(&commands, Size::new(10.0, 10.0))
            .unwrap();
        assert!(svg.contains("transform=\"matrix(1 0 0 1 10 20.5)\""));
    }

    #[test]
    fn test_background_on_clear() {
        let size = Size::new(50.0, 40.0);
        let commands = [DrawCommand::Clear { size }];

        let plain = SvgExporter::new().export(&commands, size).unwrap();
        assert!(!plain.contains("<rect"));

        let config = SvgConfig::new().with_background(Color::from_hex(0x1a1a1a));
        let filled = SvgExporter::with_config(config).export(&commands, size).unwrap();
        assert!(filled.contains("<rect x=\"0\" y=\"0\" width=\"50\" height=\"40\" fill=\"#1a1a1a\"/>"));
    }

    #[test]
    fn test_minified_has_no_newlines() {
        let canvas = frame();
        let config = SvgConfig::new()
            .with_compression(SvgCompression::Minified)
            .with_xml_declaration(false)
            .with_title("Route");
        let svg = SvgExporter::with_config(config)
            .export(canvas.commands(), canvas.size())
            .unwrap();
        assert!(!svg.contains('\n'));
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("<title>Route</title>"));
    }

    #[test]
    fn test_text_is_escaped() {
        let commands = [DrawCommand::Text {
            content: "A & <B>".into(),
            position: Point::new(1.0, 2.0),
            style: TextStyle::new(12.0, Color::BLACK),
        }];
        let svg = SvgExporter::new().export(&commands, Size::new(10.0, 10.0)).unwrap();
        assert!(svg.contains(">A &amp; &lt;B&gt;</text>"));
    }

    #[test]
    fn test_rejects_empty_surface() {
        let result = SvgExporter::new().export(&[], Size::new(0.0, 10.0));
        assert!(matches!(result, Err(HaulrouteError::InvalidSurface { .. })));
    }

    #[test]
    fn test_num_formatting() {
        assert_eq!(num(400.0), "400");
        assert_eq!(num(2.5), "2.5");
        assert_eq!(num(1.0 / 3.0), "0.333");
        assert_eq!(num(-0.0001), "0");
    }
}
