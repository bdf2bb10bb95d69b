use itertools::Itertools;
use structopt::StructOpt;
use zernike::{
    engine::parse_size,
    modes::{resolve_selection, validate_mode},
    Aberration, ColorMap, DisplayOptions, Mode, Select, Zernike,
};

#[derive(Debug, StructOpt)]
#[structopt(name = "zernike", about = "Zernike polynomials on a square grid")]
struct Opt {
    /// OSA index or aberration name of the mode
    #[structopt(short, long, default_value = "defocus")]
    mode: Mode,
    /// Modes selection: "all" or a comma separated list of modes up to `mode`
    #[structopt(short, long)]
    select: Option<Select>,
    /// Number of pixels along one side of the grid
    #[structopt(long, default_value = "128")]
    size: String,
    /// Render the modes
    #[structopt(long)]
    show: bool,
    /// Color map of the rendered modes
    #[structopt(short, long, default_value = "viridis")]
    color_map: ColorMap,
    /// Rendered modes image file
    #[structopt(short, long, default_value = "zernike.png")]
    output: String,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let opt = Opt::from_args();

    let select = opt.select.unwrap_or_default();
    let selection = resolve_selection(validate_mode(&opt.mode)?, &select)?;

    let modes = Zernike::builder()
        .mode(opt.mode)
        .select(select)
        .size(parse_size(&opt.size)?)
        .show(opt.show)
        .options(
            DisplayOptions::default()
                .color_map(opt.color_map)
                .filename(opt.output),
        )
        .compute()?;

    println!("Zernike modes: {:?}", modes.shape());
    let indices = match modes.as_stack() {
        Some(stack) => stack.modes().to_vec(),
        None => selection[..1].to_vec(),
    };
    for (j, layer) in indices.into_iter().zip(modes.layers()) {
        let name = Aberration::from_index(j).map_or(String::new(), |a| format!(" ({})", a));
        match layer.iter().copied().minmax().into_option() {
            Some((min, max)) => println!(" - {:>3}{}: [{:+8.3},{:+8.3}]", j, name, min, max),
            None => println!(" - {:>3}{}: empty", j, name),
        }
    }

    Ok(())
}
