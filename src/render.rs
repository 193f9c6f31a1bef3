//! Drawing bar layouts and writing chart files.
use errors::*;
use layout::{Alignment, BarLayout, Rgb};
use measurement::Table;
use plotters::prelude::*;
use setting::ChartSpec;
use std::fs;
use std::io::Write;
use std::path::Path;
use svg2pdf;
use svg2pdf::usvg;

/// Figure size in pixels.
pub const FIGURE_SIZE: (u32, u32) = (500, 350);

const FONT: &str = "sans-serif";
const TITLE_FONT_SIZE: u32 = 18;
const AXIS_LABEL_FONT_SIZE: u32 = 14;
const TICK_LABEL_FONT_SIZE: u32 = 12;
const LEGEND_FONT_SIZE: u32 = 11;

// Small margins and label areas keep the figure tight around the plot.
const MARGIN: u32 = 8;
const X_LABEL_AREA_SIZE: u32 = 40;
const Y_LABEL_AREA_SIZE: u32 = 55;

/// Whisker cap width in pixels.
const CAP_WIDTH: u32 = 10;

/// Chart file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Scalable vector graphics.
    Svg,
    /// PDF, converted from the SVG drawing.
    Pdf,
}

impl OutputFormat {
    /// Infers the format from the extension of `path`.
    pub fn from_path(path: &Path) -> Result<OutputFormat> {
        let ext = path.extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_ref().map(|e| e.as_str()) {
            Some("svg") => Ok(OutputFormat::Svg),
            Some("pdf") => Ok(OutputFormat::Pdf),
            _ => bail!(ErrorKind::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// Draws `layout` in this format.
    pub fn render(&self, layout: &BarLayout, title: &str, x_label: &str) -> Result<Vec<u8>> {
        match *self {
            OutputFormat::Svg => render_svg(layout, title, x_label).map(String::into_bytes),
            OutputFormat::Pdf => svg_to_pdf(&render_svg(layout, title, x_label)?),
        }
    }
}

fn rgb(c: Rgb) -> RGBColor {
    RGBColor(c.0, c.1, c.2)
}

/// Tick label for axis position `x`: the group label when `x` sits on a
/// cluster centre, nothing otherwise.
fn group_tick(groups: &[String], x: f64) -> String {
    let idx = x.round();
    if idx < 0.0 || (x - idx).abs() > 1e-6 {
        return String::new();
    }
    groups.get(idx as usize).cloned().unwrap_or_default()
}

/// Converts an SVG document to a single-page PDF of the same size. Text is
/// set with whatever system fonts are available.
pub fn svg_to_pdf(svg: &str) -> Result<Vec<u8>> {
    let mut options = usvg::Options::default();
    options.fontdb_mut().load_system_fonts();
    let tree = usvg::Tree::from_str(svg, &options)
        .map_err(|e| Error::from(ErrorKind::Convert(e.to_string())))?;
    svg2pdf::to_pdf(
        &tree,
        svg2pdf::ConversionOptions::default(),
        svg2pdf::PageOptions::default(),
    ).map_err(|e| ErrorKind::Convert(format!("{:?}", e)).into())
}

/// Draws `layout` as an SVG document.
pub fn render_svg(layout: &BarLayout, title: &str, x_label: &str) -> Result<String> {
    let groups = layout.groups();
    let n = groups.len().max(1);
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, FIGURE_SIZE).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(title, (FONT, TITLE_FONT_SIZE))
            .margin(MARGIN)
            .x_label_area_size(X_LABEL_AREA_SIZE)
            .y_label_area_size(Y_LABEL_AREA_SIZE)
            .build_cartesian_2d(-0.5..(n as f64 - 0.5), layout.y_min()..layout.y_max())?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(n)
            .x_label_formatter(&|x| group_tick(groups, *x))
            .y_desc("Mean Time (ms)")
            .x_desc(x_label)
            .label_style((FONT, TICK_LABEL_FONT_SIZE))
            .axis_desc_style((FONT, AXIS_LABEL_FONT_SIZE))
            .draw()?;

        for series in layout.series() {
            let color = rgb(series.color);
            chart
                .draw_series(series.bars.iter().map(|bar| {
                    Rectangle::new([(bar.left(), 0.0), (bar.right(), bar.height)], color.filled())
                }))?
                .label(series.legend)
                .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled()));
            chart.draw_series(series.bars.iter().map(|bar| {
                let (low, high) = bar.whisker();
                ErrorBar::new_vertical(bar.x, low, bar.height, high, BLACK.stroke_width(1), CAP_WIDTH)
            }))?;
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .label_font((FONT, LEGEND_FONT_SIZE))
            .draw()?;

        root.present()?;
    }
    Ok(svg)
}

/// Draws one chart from the rows of a single benchmark, writes it to
/// `chart.output` and reports `Created <path>` on `out`.
pub fn plot_graph<W: Write>(
    data: &Table,
    chart: &ChartSpec,
    alignment: Alignment,
    out: &mut W,
) -> Result<()> {
    let format = OutputFormat::from_path(&chart.output)?;
    let layout = BarLayout::build(data, &chart.group_labels, alignment)?;
    debug!(
        "{}: {} bars in {} groups",
        chart.title,
        layout.bars().count(),
        layout.groups().len()
    );
    let bytes = format.render(&layout, &chart.title, &chart.x_label)?;

    let path = chart.output.display().to_string();
    fs::write(&chart.output, &bytes).chain_err(|| ErrorKind::UnwritableOutput(path.clone()))?;
    info!("wrote {} bytes to {}", bytes.len(), path);
    writeln!(out, "Created {}", path)?;
    Ok(())
}
