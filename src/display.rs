//! Rendering of the Zernike modes
//!
//! A single mode is drawn with the fixed color range [-1,1] and a color bar;
//! several modes are laid out as a pyramid, one row per radial degree,
//! each mode scaled to its own range and clipped to the disk.
//! Rendering needs the `plot` feature.

use crate::engine::ZernikeOutput;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

#[derive(Debug, thiserror::Error)]
pub enum DisplayError {
    #[error("nothing to display, the Zernike modes are empty")]
    Empty,
    #[error("failed to draw the Zernike modes: {0}")]
    Drawing(String),
    #[error("display requires the `plot` feature")]
    Disabled,
}
type Result<T> = std::result::Result<T, DisplayError>;

/// Color maps
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    EnumIter,
    EnumString,
    Display,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
#[serde(rename_all = "kebab-case")]
pub enum ColorMap {
    #[default]
    Viridis,
    Plasma,
    Inferno,
    Magma,
    Cividis,
    Turbo,
    Cubehelix,
    Greys,
    RedBlue,
    Spectral,
    Rainbow,
    Sinebow,
    Cool,
    Warm,
}
impl ColorMap {
    pub fn gradient(&self) -> colorous::Gradient {
        use ColorMap::*;
        match self {
            Viridis => colorous::VIRIDIS,
            Plasma => colorous::PLASMA,
            Inferno => colorous::INFERNO,
            Magma => colorous::MAGMA,
            Cividis => colorous::CIVIDIS,
            Turbo => colorous::TURBO,
            Cubehelix => colorous::CUBEHELIX,
            Greys => colorous::GREYS,
            RedBlue => colorous::RED_BLUE,
            Spectral => colorous::SPECTRAL,
            Rainbow => colorous::RAINBOW,
            Sinebow => colorous::SINEBOW,
            Cool => colorous::COOL,
            Warm => colorous::WARM,
        }
    }
    /// RGB color of `value` in the range `[lo, hi]`
    pub fn rgb(&self, value: f64, (lo, hi): (f64, f64)) -> (u8, u8, u8) {
        self.gradient()
            .eval_continuous(normalize(value, (lo, hi)))
            .as_tuple()
    }
}

/// Maps `value` from `[lo, hi]` to `[0, 1]`, clamping outliers
pub fn normalize(value: f64, (lo, hi): (f64, f64)) -> f64 {
    let range = hi - lo;
    if range > 0. && value.is_finite() {
        ((value - lo) / range).clamp(0., 1.)
    } else {
        0.5
    }
}

/// Display options, none of them alters the Zernike modes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayOptions {
    pub color_map: ColorMap,
    /// PNG image file
    pub filename: String,
}
impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            color_map: ColorMap::default(),
            filename: String::from("zernike.png"),
        }
    }
}
impl DisplayOptions {
    pub fn color_map(self, color_map: ColorMap) -> Self {
        Self { color_map, ..self }
    }
    pub fn filename<S: Into<String>>(self, filename: S) -> Self {
        Self {
            filename: filename.into(),
            ..self
        }
    }
}

/// Renders the Zernike modes of `selection` into [DisplayOptions::filename]
#[cfg(feature = "plot")]
pub fn show(
    output: &ZernikeOutput,
    selection: &[usize],
    top: usize,
    options: &DisplayOptions,
) -> Result<()> {
    let rendered = match output {
        ZernikeOutput::Single(field) => {
            plot::visualize_one(field, selection.first().copied().unwrap_or(top), options)
        }
        ZernikeOutput::Stack(stack) => {
            let order_max = selection.iter().copied().max().unwrap_or(top);
            let ncols = crate::modes::ZernikePair::from_osa(order_max).n() as usize + 1;
            plot::visualize_all(stack, selection, top, ncols, options)
        }
    };
    rendered?;
    log::info!("Zernike modes saved to {}", options.filename);
    Ok(())
}
#[cfg(not(feature = "plot"))]
pub fn show(
    _output: &ZernikeOutput,
    _selection: &[usize],
    _top: usize,
    _options: &DisplayOptions,
) -> Result<()> {
    Err(DisplayError::Disabled)
}

#[cfg(feature = "plot")]
mod plot {
    use super::{ColorMap, DisplayError, DisplayOptions, Result};
    use crate::engine::ModeStack;
    use itertools::Itertools;
    use nalgebra::DMatrix;
    use plotters::{coord::Shift, drawing::DrawingAreaErrorKind, prelude::*};

    const IMAGE_SIZE: usize = 512;
    const TILE_SIZE: usize = 128;
    const FONT_SIZE: i32 = 15;
    const COLORBAR_WIDTH: u32 = 80;
    const TITLE_HEIGHT: u32 = 40;

    fn drawing<E: std::error::Error + Send + Sync>(e: DrawingAreaErrorKind<E>) -> DisplayError {
        DisplayError::Drawing(e.to_string())
    }

    /// Paints `field` with `cell`x`cell` pixels per sample, the first row on top
    fn draw_field<DB: DrawingBackend>(
        area: &DrawingArea<DB, Shift>,
        field: &DMatrix<f64>,
        cell: i32,
        range: (f64, f64),
        color_map: ColorMap,
        clip_disk: bool,
    ) -> Result<()> {
        let size = field.nrows();
        let radius = size as f64 / 2.;
        for i in 0..size {
            for j in 0..size {
                let (dy, dx) = (i as f64 + 0.5 - radius, j as f64 + 0.5 - radius);
                if clip_disk && dx.hypot(dy) > radius - 1. {
                    continue;
                }
                let (r, g, b) = color_map.rgb(field[(i, j)], range);
                let (u, v) = (j as i32 * cell, i as i32 * cell);
                area.draw(&Rectangle::new(
                    [(u, v), (u + cell, v + cell)],
                    RGBColor(r, g, b).filled(),
                ))
                .map_err(drawing)?;
            }
        }
        Ok(())
    }

    fn draw_colorbar<DB: DrawingBackend>(
        area: &DrawingArea<DB, Shift>,
        range: (f64, f64),
        color_map: ColorMap,
    ) -> Result<()> {
        let (_, height) = area.dim_in_pixel();
        let (top, bottom) = (10i32, height as i32 - 10);
        let span = (bottom - top).max(1) as f64;
        for v in top..bottom {
            let value = range.1 - (v - top) as f64 / span * (range.1 - range.0);
            let (r, g, b) = color_map.rgb(value, range);
            area.draw(&Rectangle::new(
                [(10, v), (30, v + 1)],
                RGBColor(r, g, b).filled(),
            ))
            .map_err(drawing)?;
        }
        let mid = 0.5 * (range.0 + range.1);
        for value in [range.0, mid, range.1] {
            let v = bottom - (super::normalize(value, range) * span) as i32;
            area.draw(&Text::new(
                format!("{}", (value * 100.).round() / 100.),
                (36, v - FONT_SIZE / 2),
                ("sans-serif", FONT_SIZE).into_font(),
            ))
            .map_err(drawing)?;
        }
        Ok(())
    }

    pub fn visualize_one(field: &DMatrix<f64>, order: usize, options: &DisplayOptions) -> Result<()> {
        let size = field.nrows();
        if size == 0 {
            return Err(DisplayError::Empty);
        }
        let cell = (IMAGE_SIZE / size).max(1);
        let side = (cell * size) as u32;
        let root = BitMapBackend::new(&options.filename, (side + COLORBAR_WIDTH, side + TITLE_HEIGHT))
            .into_drawing_area();
        root.fill(&WHITE).map_err(drawing)?;
        let root = root
            .titled(
                &format!("Zernike polynomial of order {}", order),
                ("sans-serif", FONT_SIZE),
            )
            .map_err(drawing)?;
        let (image, colorbar) = root.split_horizontally(side as i32);
        let range = (-1f64, 1f64);
        draw_field(&image, field, cell as i32, range, options.color_map, false)?;
        draw_colorbar(&colorbar, range, options.color_map)?;
        root.present().map_err(drawing)?;
        Ok(())
    }

    pub fn visualize_all(
        stack: &ModeStack,
        orders: &[usize],
        top: usize,
        ncols: usize,
        options: &DisplayOptions,
    ) -> Result<()> {
        let size = stack.size();
        if size == 0 || stack.is_empty() {
            return Err(DisplayError::Empty);
        }
        let cell = (TILE_SIZE / size).max(1);
        let tile = (cell * size) as u32 + TITLE_HEIGHT / 2;
        let side = tile * ncols as u32;
        let root = BitMapBackend::new(&options.filename, (side, side + TITLE_HEIGHT))
            .into_drawing_area();
        root.fill(&WHITE).map_err(drawing)?;
        let root = root
            .titled(
                &format!("Zernike modes up to order {}", top),
                ("sans-serif", FONT_SIZE),
            )
            .map_err(drawing)?;
        let mut layers = stack.layers().iter();
        let mut order_idx = 0usize;
        for (k, area) in root.split_evenly((ncols, ncols)).iter().enumerate() {
            let (row, col) = (k / ncols, k % ncols);
            if col > row {
                continue;
            }
            if orders.contains(&order_idx) {
                if let Some(layer) = layers.next() {
                    let area = area
                        .titled(&format!("{}", order_idx), ("sans-serif", FONT_SIZE))
                        .map_err(drawing)?;
                    let range = layer
                        .iter()
                        .copied()
                        .minmax()
                        .into_option()
                        .unwrap_or((-1., 1.));
                    draw_field(&area, layer, cell as i32, range, options.color_map, true)?;
                }
            }
            order_idx += 1;
        }
        root.present().map_err(drawing)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn color_map_names() -> std::result::Result<(), Box<dyn std::error::Error>> {
        assert_eq!("viridis".parse::<ColorMap>()?, ColorMap::Viridis);
        assert_eq!("RED-BLUE".parse::<ColorMap>()?, ColorMap::RedBlue);
        assert_eq!(ColorMap::Cubehelix.to_string(), "cubehelix");
        assert!("jet".parse::<ColorMap>().is_err());
        for cmap in ColorMap::iter() {
            assert_eq!(cmap.to_string().parse::<ColorMap>()?, cmap);
        }
        Ok(())
    }

    #[test]
    fn normalization() {
        assert_eq!(normalize(0., (-1., 1.)), 0.5);
        assert_eq!(normalize(-1., (-1., 1.)), 0.);
        assert_eq!(normalize(3., (-1., 1.)), 1.);
        assert_eq!(normalize(1., (1., 1.)), 0.5);
        assert_eq!(normalize(f64::NAN, (-1., 1.)), 0.5);
    }

    #[test]
    fn color_ends() {
        let cmap = ColorMap::Greys;
        let lo = cmap.rgb(-1., (-1., 1.));
        let hi = cmap.rgb(1., (-1., 1.));
        assert_ne!(lo, hi);
        assert_eq!(cmap.rgb(-5., (-1., 1.)), lo);
    }

    #[test]
    fn default_options() {
        let options = DisplayOptions::default();
        assert_eq!(options.color_map, ColorMap::Viridis);
        assert_eq!(options.filename, "zernike.png");
        let options = options.color_map(ColorMap::Plasma).filename("modes.png");
        assert_eq!(options.color_map, ColorMap::Plasma);
        assert_eq!(options.filename, "modes.png");
    }
}
