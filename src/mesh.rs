use nalgebra::DMatrix;

/// `num` samples evenly spaced over `[start, stop]`
pub fn linspace(start: f64, stop: f64, num: usize) -> Vec<f64> {
    match num {
        0 => vec![],
        1 => vec![start],
        _ => {
            let step = (stop - start) / (num - 1) as f64;
            let mut samples: Vec<f64> = (0..num).map(|k| start + k as f64 * step).collect();
            samples[num - 1] = stop;
            samples
        }
    }
}

/// Polar coordinates of a square pixel grid centered on the origin
///
/// Rows are sampled along `y` and columns along `x`.
#[derive(Debug, Clone)]
pub struct PolarMesh {
    /// radial distance
    pub rho: DMatrix<f64>,
    /// azimuthal angle in (-pi, pi]
    pub phi: DMatrix<f64>,
    /// radius of the disk the polynomials are defined on
    pub radius: f64,
}
impl PolarMesh {
    /// Creates the `size`x`size` mesh spanning `[-radius, radius]` on both axes
    pub fn build(size: usize, radius: f64) -> Self {
        let x = linspace(-radius, radius, size);
        let y = &x;
        let rho = DMatrix::from_fn(size, size, |i, j| (x[j] * x[j] + y[i] * y[i]).sqrt());
        let phi = DMatrix::from_fn(size, size, |i, j| y[i].atan2(x[j]));
        Self { rho, phi, radius }
    }
    /// Number of pixels along one side
    pub fn size(&self) -> usize {
        self.rho.nrows()
    }
    /// Iterator over the (row, column) of the pixels inside the disk
    pub fn disk_iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let size = self.size();
        (0..size)
            .flat_map(move |i| (0..size).map(move |j| (i, j)))
            .filter(|&(i, j)| self.rho[(i, j)] <= self.radius)
    }
}
