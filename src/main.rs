use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser};
use geolegend::config::{MAX_LOGO_SCALE, MIN_LOGO_SCALE};
use geolegend::draw::Color;
use geolegend::input::{parse_bounding_box, validate_region};
use geolegend::util::expand_tilde;
use geolegend::{Config, LegendRenderer, LegendSpec};

#[derive(Parser, Debug)]
#[command(name = "geolegend")]
#[command(version, about = "Legend graphic generator for geospatial plots")]
struct Cli {
    /// Logo image placed above the legend
    #[arg(long, value_name = "PATH", required_unless_present = "list_regions")]
    logo: Option<String>,

    /// Output file; the extension selects the format (png, jpg, bmp, tif)
    #[arg(
        long,
        short = 'o',
        value_name = "PATH",
        required_unless_present = "list_regions"
    )]
    output: Option<String>,

    /// Region name shown under the legend
    #[arg(
        long,
        short = 'r',
        value_name = "NAME",
        required_unless_present = "list_regions"
    )]
    region: Option<String>,

    /// Bounding box as "xmin, ymin, xmax, ymax"
    #[arg(
        long,
        value_name = "COORDS",
        allow_hyphen_values = true,
        required_unless_present = "list_regions"
    )]
    bbox: Option<String>,

    /// Legend entry label (repeat; pairs with --color)
    #[arg(long = "label", value_name = "TEXT")]
    labels: Vec<String>,

    /// Legend entry color, CSS name or hex (repeat; pairs with --label)
    #[arg(long = "color", value_name = "COLOR")]
    colors: Vec<String>,

    /// Factor applied to the logo's native size
    #[arg(long, value_name = "FACTOR")]
    logo_scale: Option<f64>,

    /// Config file to use instead of ~/.config/geolegend/config.toml
    #[arg(long, value_name = "PATH")]
    config: Option<String>,

    /// Print the accepted region names and exit
    #[arg(long, action = ArgAction::SetTrue)]
    list_regions: bool,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(&expand_tilde(path))?,
        None => Config::load()?,
    };

    if cli.list_regions {
        for region in &config.regions.valid {
            println!("{region}");
        }
        return Ok(());
    }

    let spec = build_spec(&cli, &config)?;
    let report = LegendRenderer::default().render_and_save(&spec)?;

    println!(
        "Legend image created successfully at {}",
        report.path.display()
    );
    Ok(())
}

fn build_spec(cli: &Cli, config: &Config) -> Result<LegendSpec> {
    let region = validate_region(cli.region.as_deref().unwrap_or_default(), &config.regions.valid)?;
    let bounding_box = parse_bounding_box(cli.bbox.as_deref().unwrap_or_default())?;

    let (labels, colors) = if cli.labels.is_empty() && cli.colors.is_empty() {
        (config.legend.labels.clone(), config.legend_colors())
    } else {
        let colors = cli
            .colors
            .iter()
            .map(|name| {
                name.parse::<Color>()
                    .with_context(|| format!("Invalid color '{name}'"))
            })
            .collect::<Result<Vec<_>>>()?;
        if colors.len() != cli.labels.len() {
            bail!(
                "Every --label needs a matching --color ({} labels, {} colors)",
                cli.labels.len(),
                colors.len()
            );
        }
        (cli.labels.clone(), colors)
    };

    let logo_scale = cli.logo_scale.unwrap_or(config.legend.logo_scale);
    if !(MIN_LOGO_SCALE..=MAX_LOGO_SCALE).contains(&logo_scale) {
        bail!(
            "Invalid logo scale {logo_scale}, expected {MIN_LOGO_SCALE}-{MAX_LOGO_SCALE}"
        );
    }

    let logo = cli.logo.as_deref().unwrap_or_default();
    let output = cli.output.as_deref().unwrap_or_default();
    log::debug!("Rendering {} entries for region {}", labels.len(), region);

    Ok(LegendSpec::new(
        labels,
        colors,
        region,
        bounding_box,
        expand_tilde(logo),
        expand_tilde(output),
    )
    .with_logo_scale(logo_scale))
}
