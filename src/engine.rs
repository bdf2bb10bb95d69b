use crate::{
    display::{self, DisplayOptions},
    error::{Result, ZernikeError},
    mesh::PolarMesh,
    modes::{enumerate_pairs, resolve_selection, validate_mode, Mode, Select},
    radial::zernike_nl,
};
use nalgebra::DMatrix;
use regex::Regex;
use std::{ops::Index, time::Instant};

/// Zernike modes sampled on the same square grid, in ascending OSA index
#[derive(Debug, Clone, PartialEq)]
pub struct ModeStack {
    modes: Vec<usize>,
    layers: Vec<DMatrix<f64>>,
}
impl ModeStack {
    /// OSA index of each layer
    pub fn modes(&self) -> &[usize] {
        &self.modes
    }
    pub fn layers(&self) -> &[DMatrix<f64>] {
        &self.layers
    }
    /// Layer of the OSA index `j`
    pub fn mode(&self, j: usize) -> Option<&DMatrix<f64>> {
        self.modes
            .iter()
            .position(|&mode| mode == j)
            .map(|k| &self.layers[k])
    }
    pub fn len(&self) -> usize {
        self.layers.len()
    }
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
    /// Number of pixels along one side
    pub fn size(&self) -> usize {
        self.layers.first().map_or(0, |layer| layer.nrows())
    }
    /// (rows, columns, layers)
    pub fn shape(&self) -> (usize, usize, usize) {
        let size = self.size();
        (size, size, self.len())
    }
    pub fn into_layers(self) -> Vec<DMatrix<f64>> {
        self.layers
    }
}
impl Index<(usize, usize, usize)> for ModeStack {
    type Output = f64;

    fn index(&self, (i, j, k): (usize, usize, usize)) -> &Self::Output {
        &self.layers[k][(i, j)]
    }
}

/// Zernike mode or modes
#[derive(Debug, Clone, PartialEq)]
pub enum ZernikeOutput {
    Single(DMatrix<f64>),
    Stack(ModeStack),
}
impl ZernikeOutput {
    /// Array shape: `[size, size]` or `[size, size, layers]`
    pub fn shape(&self) -> Vec<usize> {
        match self {
            ZernikeOutput::Single(field) => vec![field.nrows(), field.ncols()],
            ZernikeOutput::Stack(stack) => {
                let (rows, cols, layers) = stack.shape();
                vec![rows, cols, layers]
            }
        }
    }
    pub fn ndim(&self) -> usize {
        self.shape().len()
    }
    pub fn as_single(&self) -> Option<&DMatrix<f64>> {
        match self {
            ZernikeOutput::Single(field) => Some(field),
            ZernikeOutput::Stack(_) => None,
        }
    }
    pub fn as_stack(&self) -> Option<&ModeStack> {
        match self {
            ZernikeOutput::Single(_) => None,
            ZernikeOutput::Stack(stack) => Some(stack),
        }
    }
    /// The 2D fields, one per mode
    pub fn layers(&self) -> Vec<&DMatrix<f64>> {
        match self {
            ZernikeOutput::Single(field) => vec![field],
            ZernikeOutput::Stack(stack) => stack.layers().iter().collect(),
        }
    }
}

/// Returns the validated grid size
pub fn validate_size(size: i64) -> Result<usize> {
    if size < 0 {
        Err(ZernikeError::NegativeSize(size))
    } else {
        Ok(size as usize)
    }
}
/// Parses a grid size, anything else than an integer is rejected
pub fn parse_size(size: &str) -> Result<i64> {
    let size = size.trim();
    if Regex::new(r"^[+-]?\d+$")?.is_match(size) {
        size.parse::<i64>()
            .map_err(|_| ZernikeError::SizeNotIntegral(size.to_string()))
    } else {
        Err(ZernikeError::SizeNotIntegral(size.to_string()))
    }
}

/// Zernike modes computation
pub struct Zernike;
impl Zernike {
    pub fn builder() -> ZernikeBuilder {
        Default::default()
    }
}

/// [Zernike] builder
///
/// By default, it computes the defocus on a 128x128 grid.
#[derive(Debug, Clone)]
pub struct ZernikeBuilder {
    mode: Mode,
    select: Select,
    size: i64,
    show: bool,
    options: DisplayOptions,
}
impl Default for ZernikeBuilder {
    fn default() -> Self {
        Self {
            mode: Mode::from("defocus"),
            select: Select::default(),
            size: 128,
            show: false,
            options: DisplayOptions::default(),
        }
    }
}
impl ZernikeBuilder {
    /// Sets the requested mode, the largest one if several are selected
    pub fn mode<M: Into<Mode>>(self, mode: M) -> Self {
        Self {
            mode: mode.into(),
            ..self
        }
    }
    /// Sets the selection of modes up to the requested one
    pub fn select<S: Into<Select>>(self, select: S) -> Self {
        Self {
            select: select.into(),
            ..self
        }
    }
    /// Sets the number of pixels along one side of the grid
    pub fn size(self, size: i64) -> Self {
        Self { size, ..self }
    }
    /// Renders the modes once computed
    pub fn show(self, show: bool) -> Self {
        Self { show, ..self }
    }
    pub fn options(self, options: DisplayOptions) -> Self {
        Self { options, ..self }
    }
    /// Computes the Zernike modes
    ///
    /// The inputs are checked before any computation.
    /// A single mode is returned as a 2D field, several modes as a [ModeStack].
    pub fn compute(self) -> Result<ZernikeOutput> {
        let top = validate_mode(&self.mode)?;
        let size = validate_size(self.size)?;
        let selection = resolve_selection(top, &self.select)?;
        let pairs = enumerate_pairs(&selection)?;

        let now = Instant::now();
        let radius = size as f64 / 2.;
        let mesh = PolarMesh::build(size, radius);
        let output = match pairs.as_slice() {
            [pair] => ZernikeOutput::Single(zernike_nl(*pair, &mesh)),
            _ => ZernikeOutput::Stack(ModeStack {
                modes: pairs.iter().map(|pair| pair.osa_index()).collect(),
                layers: pairs.iter().map(|pair| zernike_nl(*pair, &mesh)).collect(),
            }),
        };
        log::info!(
            "Zernike mode(s) {:?} {:?} computed in {}ms",
            selection,
            output.shape(),
            now.elapsed().as_millis()
        );

        if self.show {
            if let Err(e) = display::show(&output, &selection, top, &self.options) {
                log::warn!("{}", e);
            }
        }
        Ok(output)
    }
}

/// Computes the Zernike `mode`, or the [Select]ed modes up to `mode`, on a `size`x`size` grid
pub fn zernike<M, S>(mode: M, select: S, size: i64) -> Result<ZernikeOutput>
where
    M: Into<Mode>,
    S: Into<Select>,
{
    Zernike::builder()
        .mode(mode)
        .select(select)
        .size(size)
        .compute()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::ErrorKind, modes::ZernikePair};

    #[test]
    fn sizes() {
        assert_eq!(validate_size(0).unwrap(), 0);
        assert_eq!(validate_size(64).unwrap(), 64);
        let err = validate_size(-3).unwrap_err();
        assert!(matches!(err, ZernikeError::NegativeSize(-3)));
        assert_eq!(err.kind(), ErrorKind::Value);
        assert_eq!(parse_size(" 32 ").unwrap(), 32);
        assert_eq!(parse_size("12.5").unwrap_err().kind(), ErrorKind::Type);
        assert_eq!(parse_size("big").unwrap_err().kind(), ErrorKind::Type);
    }

    #[test]
    fn piston() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let output = zernike(0, Select::Mode, 128)?;
        assert_eq!(output.shape(), vec![128, 128]);
        let field = output.as_single().unwrap();
        assert!(field.iter().all(|&x| x == 0. || x == 1.));
        for i in 54..74 {
            for j in 54..74 {
                assert_eq!(field[(i, j)], 1.);
            }
        }
        assert_eq!(field[(0, 0)], 0.);
        Ok(())
    }

    #[test]
    fn defocus_by_name() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let output = zernike("defocus", Select::Mode, 64)?;
        let expected = zernike_nl(ZernikePair::new(2, 0)?, &PolarMesh::build(64, 32.));
        assert_eq!(output, ZernikeOutput::Single(expected));
        Ok(())
    }

    #[test]
    fn default_builder() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let output = Zernike::builder().compute()?;
        assert_eq!(output, zernike(4, Select::Mode, 128)?);
        Ok(())
    }

    #[test]
    fn all_modes() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let output = zernike(4, Select::All, 32)?;
        assert_eq!(output.shape(), vec![32, 32, 5]);
        assert_eq!(output.ndim(), 3);
        let stack = output.as_stack().unwrap();
        assert_eq!(stack.modes(), &[0, 1, 2, 3, 4]);
        let mesh = PolarMesh::build(32, 16.);
        for (k, layer) in stack.layers().iter().enumerate() {
            assert_eq!(*layer, zernike_nl(ZernikePair::from_osa(k), &mesh));
        }
        assert_eq!(stack[(16, 16, 0)], 1.);
        Ok(())
    }

    #[test]
    fn listed_modes() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let output = zernike(
            "primary spherical",
            vec![Mode::from("vertical coma"), Mode::from(2), Mode::from(12)],
            16,
        )?;
        assert_eq!(output.shape(), vec![16, 16, 3]);
        let stack = output.as_stack().unwrap();
        assert_eq!(stack.modes(), &[2, 7, 12]);
        assert!(stack.mode(7).is_some());
        assert!(stack.mode(3).is_none());
        Ok(())
    }

    #[test]
    fn single_listed_mode() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let output = zernike(5, vec![3], 16)?;
        assert_eq!(output.shape(), vec![16, 16]);
        assert_eq!(output, zernike(3, Select::Mode, 16)?);
        Ok(())
    }

    #[test]
    fn repeated_modes() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let output = zernike(3, vec![1, 3, 1], 8)?;
        assert_eq!(output.as_stack().unwrap().modes(), &[1, 3]);
        Ok(())
    }

    #[test]
    fn zero_outside() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let size = 40;
        let output = zernike(20, Select::All, size)?;
        let mesh = PolarMesh::build(size as usize, size as f64 / 2.);
        for layer in output.layers() {
            assert!(layer
                .iter()
                .zip(mesh.rho.iter())
                .filter(|(_, rho)| **rho > mesh.radius)
                .all(|(x, _)| *x == 0.));
        }
        Ok(())
    }

    #[test]
    fn empty_grid() -> std::result::Result<(), Box<dyn std::error::Error>> {
        assert_eq!(zernike(3, Select::Mode, 0)?.shape(), vec![0, 0]);
        assert_eq!(zernike(3, Select::All, 0)?.shape(), vec![0, 0, 4]);
        Ok(())
    }

    #[test]
    fn invalid_requests() {
        let err = zernike(-1, Select::Mode, 16).unwrap_err();
        assert!(matches!(err, ZernikeError::NegativeMode(-1)));
        let err = zernike("not-a-name", Select::Mode, 16).unwrap_err();
        assert!(matches!(err, ZernikeError::UnknownName(_)));
        let err = zernike(2, vec![1, 3], 16).unwrap_err();
        assert!(matches!(
            err,
            ZernikeError::SelectionExceedsMode {
                selected: 3,
                mode: 2
            }
        ));
        let err = zernike(2, Select::Mode, -16).unwrap_err();
        assert!(matches!(err, ZernikeError::NegativeSize(-16)));
        for err in [
            zernike(-1, Select::Mode, 16),
            zernike("not-a-name", Select::All, 16),
            zernike(2, vec![1, 3], 16),
        ] {
            assert_eq!(err.unwrap_err().kind(), ErrorKind::Value);
        }
    }

    #[test]
    fn display_does_not_alter_output() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let filename = std::env::temp_dir().join("zernike_display_test.png");
        let options = DisplayOptions::default()
            .color_map(crate::display::ColorMap::Plasma)
            .filename(filename.to_string_lossy());
        let shown = Zernike::builder()
            .mode(5)
            .select(Select::All)
            .size(24)
            .show(true)
            .options(options)
            .compute()?;
        assert_eq!(shown, zernike(5, Select::All, 24)?);
        Ok(())
    }
}
