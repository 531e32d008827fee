use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;

use vizmark::Annotation;
use vizmark::chart::{Chart, ChartDocument};
use vizmark::config::{OutputFormat, VizmarkConfig};
use vizmark::render::scene::Scene;
use vizmark::render::{RenderStyle, image, svg};

/// Render chart annotations from a JSON document to SVG or PNG
#[derive(Debug, Parser)]
#[command(name = "vizmark", version, about)]
struct Args {
    /// Chart document with axes and annotation items
    input: PathBuf,

    /// Output file (defaults to a timestamped name in the configured output directory)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format, overriding the output file extension
    #[arg(short, long, value_parser = parse_format)]
    format: Option<OutputFormat>,

    /// Print tooltip parameters of every annotation as JSON lines
    #[arg(long)]
    tooltips: bool,

    /// Use this configuration file instead of the default one
    #[arg(long)]
    config: Option<PathBuf>,
}

fn parse_format(value: &str) -> Result<OutputFormat, String> {
    match value.to_ascii_lowercase().as_str() {
        "png" => Ok(OutputFormat::Png),
        "svg" => Ok(OutputFormat::Svg),
        other => Err(format!("unknown format {:?} (expected png or svg)", other)),
    }
}

/// Default output path: `Annotations_<timestamp>.<ext>` in the output directory
fn default_output(config: &VizmarkConfig, format: OutputFormat) -> PathBuf {
    let name = chrono::Local::now()
        .format("Annotations_%Y-%m-%d_%H-%M-%S")
        .to_string();
    let dir = config.output_dir.clone().unwrap_or_else(|| PathBuf::from("."));
    dir.join(format!("{}.{}", name, format.extension()))
}

fn load_config(path: Option<&Path>) -> anyhow::Result<VizmarkConfig> {
    match path {
        Some(path) => VizmarkConfig::load_from(path),
        None => Ok(VizmarkConfig::load()),
    }
}

/// One JSON line per annotation with its kind and tooltip data
fn tooltip_lines(annotations: &[Annotation]) -> Vec<String> {
    annotations
        .iter()
        .map(|annotation| {
            serde_json::json!({
                "type": annotation.kind().name(),
                "params": annotation.tooltip_params(),
                "object": annotation.tooltip_format_object(),
            })
            .to_string()
        })
        .collect()
}

fn run(args: Args) -> anyhow::Result<()> {
    let config = load_config(args.config.as_deref())?;
    let document = ChartDocument::load(&args.input)?;
    let canvas = document.canvas(&config);

    let mut chart = Chart::new(canvas, Scene::new());
    chart.set_annotations(&document.annotations);
    let drawn = chart.draw_annotations();
    log::info!(
        "Drew {} of {} annotations on a {}x{} canvas",
        drawn,
        chart.annotations().len(),
        canvas.width,
        canvas.height
    );

    if args.tooltips {
        for line in tooltip_lines(chart.annotations()) {
            println!("{}", line);
        }
    }

    let format = args
        .format
        .or_else(|| args.output.as_deref().and_then(OutputFormat::from_path))
        .unwrap_or(config.output_format);
    let output = args
        .output
        .unwrap_or_else(|| default_output(&config, format));

    let style = RenderStyle::from(&config);
    let scene = chart.into_renderer();
    match format {
        OutputFormat::Svg => svg::save_svg(&scene, canvas.width, canvas.height, &style, &output)?,
        OutputFormat::Png => {
            let mut img = image::new_canvas(canvas.width, canvas.height, &style)
                .with_context(|| format!("Cannot render {}", output.display()))?;
            image::draw_scene_on_image(&mut img, &scene, &style);
            image::save_png(&img, &output)
                .with_context(|| format!("Failed to save {}", output.display()))?;
        }
    }

    log::info!("Saved annotations to {}", output.display());
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    run(Args::parse())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_format() {
        assert_eq!(parse_format("SVG"), Ok(OutputFormat::Svg));
        assert_eq!(parse_format("png"), Ok(OutputFormat::Png));
        assert!(parse_format("gif").is_err());
    }

    #[test]
    fn test_default_output_uses_configured_dir() {
        let config = VizmarkConfig {
            output_dir: Some(PathBuf::from("/tmp/charts")),
            ..Default::default()
        };
        let path = default_output(&config, OutputFormat::Svg);

        assert!(path.starts_with("/tmp/charts"));
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("svg"));
    }

    #[test]
    fn test_run_writes_svg() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("chart.json");
        let output = dir.path().join("out.svg");
        std::fs::write(
            &input,
            r#"{
                "width": 200, "height": 100,
                "argumentAxis": { "min": 0, "max": 10 },
                "valueAxis": { "min": 0, "max": 50 },
                "annotations": {
                    "labelOptions": { "font": { "color": "red" } },
                    "items": [
                        { "x": 5, "y": 25 },
                        { "x": 2, "y": 10, "label": { "text": "low", "font": { "size": 12 } } }
                    ]
                }
            }"#,
        )
        .unwrap();
        let config = dir.path().join("config.json");
        std::fs::write(&config, "{}").unwrap();

        run(Args {
            input,
            output: Some(output.clone()),
            format: None,
            tooltips: false,
            config: Some(config),
        })
        .unwrap();

        let svg = std::fs::read_to_string(&output).unwrap();
        assert!(svg.contains("<circle cx=\"100\" cy=\"50\" r=\"5\""));
        assert!(svg.contains("<text x=\"40\" y=\"80\" fill=\"red\" font-size=\"12\">low</text>"));
    }

    #[test]
    fn test_run_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("chart.json");
        let output = dir.path().join("out.png");
        std::fs::write(
            &input,
            r#"{ "width": 20, "height": 10, "annotations": { "items": [{ "x": 50, "y": 50 }] } }"#,
        )
        .unwrap();
        let config = dir.path().join("config.json");
        std::fs::write(&config, "{}").unwrap();

        run(Args {
            input,
            output: Some(output.clone()),
            format: None,
            tooltips: false,
            config: Some(config),
        })
        .unwrap();

        let img = ::image::open(&output).unwrap();
        assert_eq!((img.width(), img.height()), (20, 10));
    }

    #[test]
    fn test_tooltip_lines() {
        let document = ChartDocument::parse(
            r#"{
                "width": 200, "height": 100,
                "argumentAxis": { "min": 0, "max": 10 },
                "valueAxis": { "min": 0, "max": 50 },
                "annotations": { "items": [
                    { "x": 5, "y": 25, "name": "mid" },
                    { "x": 1, "label": { "text": "off" } }
                ] }
            }"#,
        )
        .unwrap();
        let mut chart = Chart::new(document.canvas(&VizmarkConfig::default()), Scene::new());
        chart.set_annotations(&document.annotations);
        chart.draw_annotations();

        let lines: Vec<serde_json::Value> = tooltip_lines(chart.annotations())
            .iter()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["type"], "simple");
        assert_eq!(lines[0]["params"], serde_json::json!({ "x": 100.0, "y": 50.0 }));
        assert_eq!(lines[0]["object"]["name"], "mid");
        assert_eq!(lines[1]["type"], "label");
        assert_eq!(lines[1]["params"], serde_json::json!({ "x": 20.0, "y": null }));
    }

    #[test]
    fn test_run_rejects_oversized_png_canvas() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("chart.json");
        let output = dir.path().join("out.png");
        std::fs::write(
            &input,
            r#"{ "width": 4000000000, "height": 4000000000, "annotations": { "items": [] } }"#,
        )
        .unwrap();
        let config = dir.path().join("config.json");
        std::fs::write(&config, "{}").unwrap();

        let result = run(Args {
            input,
            output: Some(output.clone()),
            format: None,
            tooltips: false,
            config: Some(config),
        });

        assert!(result.is_err());
        assert!(!output.exists());
    }
}
