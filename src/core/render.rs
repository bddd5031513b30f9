use crate::domain::model::Chart;
use crate::domain::ports::ChartRenderer;
use crate::utils::error::{PlotError, Result};
use plotters::prelude::*;
use plotters::style::{register_font, FontStyle};
use std::path::Path;
use std::sync::OnceLock;

pub const DEFAULT_WIDTH: u32 = 640;
pub const DEFAULT_HEIGHT: u32 = 480;

const FONT_FAMILY: &str = "sans-serif";

macro_rules! hexcolour {
    ($colour:literal) => {
        RGBColor(
            (($colour & 0xFF0000) >> 16) as u8,
            (($colour & 0x00FF00) >> 8) as u8,
            ($colour & 0x0000FF) as u8,
        )
    };
}

const COLOURS: &[RGBColor] = &[
    hexcolour!(0x1F77B4),
    hexcolour!(0xFF7F0E),
    hexcolour!(0x2CA02C),
    hexcolour!(0xD62728),
    hexcolour!(0x9467BD),
    hexcolour!(0x8C564B),
    hexcolour!(0xE377C2),
    hexcolour!(0x7F7F7F),
    hexcolour!(0xBCBD22),
    hexcolour!(0x17BECF),
];

static FONT_REGISTRATION: OnceLock<std::result::Result<(), String>> = OnceLock::new();

/// 註冊內建字型，繪圖不依賴系統字型
fn ensure_fonts() -> Result<()> {
    FONT_REGISTRATION
        .get_or_init(|| {
            let bytes: &'static [u8] = dejavu::sans_mono::regular();
            register_font(FONT_FAMILY, FontStyle::Normal, bytes)
                .map_err(|_| "cannot load bundled font".to_string())
        })
        .clone()
        .map_err(|message| PlotError::RenderError { message })
}

fn render_error<E: std::fmt::Display>(e: E) -> PlotError {
    PlotError::RenderError {
        message: e.to_string(),
    }
}

/// 以 plotters 將圖表輸出為 PNG
#[derive(Debug, Clone, Copy)]
pub struct BitmapRenderer {
    width: u32,
    height: u32,
}

impl BitmapRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

impl Default for BitmapRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

impl ChartRenderer for BitmapRenderer {
    fn render(&self, chart: &Chart, path: &Path) -> Result<()> {
        ensure_fonts()?;

        let root = BitMapBackend::new(path, (self.width, self.height)).into_drawing_area();
        root.fill(&WHITE).map_err(render_error)?;

        let mut builder = ChartBuilder::on(&root);
        builder
            .margin(20)
            .set_label_area_size(LabelAreaPosition::Left, 90)
            .set_label_area_size(LabelAreaPosition::Bottom, 50);
        if let Some(title) = &chart.title {
            builder.caption(title, (FONT_FAMILY, 24));
        }

        let mut ctx = builder
            .build_cartesian_2d(chart.x_range.clone(), chart.y_range.clone())
            .map_err(render_error)?;

        ctx.configure_mesh()
            .x_desc(chart.x_label.as_str())
            .y_desc(chart.y_label.as_str())
            .label_style((FONT_FAMILY, 14))
            .axis_desc_style((FONT_FAMILY, 16))
            .draw()
            .map_err(render_error)?;

        for (i, series) in chart.series.iter().enumerate() {
            let colour = COLOURS[i % COLOURS.len()];
            let anno = ctx
                .draw_series(LineSeries::new(
                    series.points.iter().copied(),
                    colour.stroke_width(2),
                ))
                .map_err(render_error)?;

            if chart.has_legend() {
                anno.label(series.name.as_str())
                    .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], colour));
            }
        }

        if chart.has_legend() {
            ctx.configure_series_labels()
                .position(SeriesLabelPosition::UpperLeft)
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .label_font((FONT_FAMILY, 14))
                .draw()
                .map_err(render_error)?;
        }

        root.present().map_err(render_error)?;

        tracing::debug!(
            "Rendered {} series ({} points) to {}",
            chart.series.len(),
            chart.point_count(),
            path.display()
        );

        Ok(())
    }
}
