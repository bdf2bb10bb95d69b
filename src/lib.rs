/*!
# Zernike polynomials

Zernike polynomials in the OSA ordering, sampled on a square grid of pixels
and set to zero outside the inscribed disk.

A mode is requested by its OSA index `j` or by the name of its aberration
(see [Aberration]), and is related to the radial degree `n` and to the azimuthal
frequency `l` by `j = (n(n+2)+l)/2`.

```rust,no_run
use zernike::{zernike, Select, Zernike};

// 128x128 defocus
let defocus = zernike("defocus", Select::Mode, 128)?;
// the first 15 modes
let modes = zernike(14, Select::All, 64)?;
assert_eq!(modes.shape(), vec![64, 64, 15]);
// vertical coma and primary spherical rendered with the `plot` feature
let coma_spherical = Zernike::builder()
    .mode("primary spherical")
    .select(vec!["vertical coma", "primary spherical"])
    .size(256)
    .show(true)
    .compute()?;
# Ok::<(), zernike::ZernikeError>(())
```
*/

pub mod display;
pub mod engine;
pub mod error;
pub mod mesh;
pub mod modes;
pub mod radial;

pub use display::{ColorMap, DisplayOptions};
pub use engine::{zernike, ModeStack, Zernike, ZernikeBuilder, ZernikeOutput};
pub use error::{ErrorKind, ZernikeError};
pub use mesh::PolarMesh;
pub use modes::{Aberration, Mode, Select, ZernikePair};
pub use radial::zernike_nl;
