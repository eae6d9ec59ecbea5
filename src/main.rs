use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;

use climate_grid::{
    render_marks, DataSource, FileSource, MarkPipeline, PngRenderer, PosterConfig, SvgRenderer,
};

/// Render paired precipitation/temperature series as a grid of circles.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Precipitation series (.xml, .csv, .json, .parquet)
    #[arg(long, value_name = "FILE", required_unless_present = "print_config")]
    precip: Option<PathBuf>,

    /// Temperature series (.xml, .csv, .json, .parquet)
    #[arg(long, value_name = "FILE", required_unless_present = "print_config")]
    temp: Option<PathBuf>,

    /// Poster configuration (JSON); defaults to the Colorado poster
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Element/column holding precipitation values
    #[arg(long, default_value = "value")]
    precip_field: String,

    /// Element/column holding temperature values
    #[arg(long, default_value = "value")]
    temp_field: String,

    /// Output file; the extension picks the format (.svg or .png)
    #[arg(short, long, value_name = "FILE", required_unless_present = "print_config")]
    output: Option<PathBuf>,

    /// Pixels per document unit for PNG output
    #[arg(long, default_value_t = 1.0)]
    scale: f64,

    /// Print the default configuration as JSON and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if cli.print_config {
        println!("{}", PosterConfig::default().to_json()?);
        return Ok(());
    }

    let (Some(precip_path), Some(temp_path), Some(output)) = (cli.precip, cli.temp, cli.output)
    else {
        bail!("--precip, --temp and --output are required");
    };

    let config = match &cli.config {
        Some(path) => PosterConfig::load(path)?,
        None => PosterConfig::default(),
    };

    let precip = FileSource::new(precip_path)
        .with_field(&cli.precip_field)
        .load()?;
    let temp = FileSource::new(temp_path).with_field(&cli.temp_field).load()?;

    // All marks are computed before anything is drawn.
    let marks = MarkPipeline::from_config(&config, &precip, &temp)?.generate(&precip, &temp)?;

    let (width, height) = config.grid.document_size();
    let ext = output
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "svg" => {
            let mut svg = SvgRenderer::new(width, height);
            render_marks(&mut svg, &marks)?;
            svg.save(&output)?;
        }
        "png" => {
            let mut png = PngRenderer::new(width, height, cli.scale)?;
            render_marks(&mut png, &marks)?;
            png.save(&output)?;
        }
        other => bail!("Unsupported output extension: .{other}"),
    }

    println!("Wrote {} marks to {}", marks.len(), output.display());
    Ok(())
}
