use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use figures::render::{Appearance, SvgOptions};
use figures::DiagramSpec;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;

mod catalog;
mod provenance;

#[derive(Parser)]
#[command(name = "figures")]
#[command(about = "Lay out and render educational diagrams")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Build a diagram from a JSON description and write SVG (or the scene as JSON)
    Render {
        /// Diagram description; `kind` selects the family
        #[arg(long)]
        input: PathBuf,
        /// Output path; a `.json` extension writes the built scene instead of SVG
        #[arg(long)]
        out: PathBuf,
        /// JSON file with size, line weight and label size overrides
        #[arg(long)]
        appearance: Option<PathBuf>,
        /// Draw for a dark page: no white background, dark label boxes
        #[arg(long)]
        dark: bool,
        /// Skip the `<name>.provenance.json` sidecar
        #[arg(long)]
        no_provenance: bool,
    },
    /// List the stock shapes, molecules and scenarios (all families by default)
    Presets {
        #[arg(long, value_enum)]
        family: Option<catalog::Family>,
    },
    /// Print a small provenance JSON block
    Report,
}

#[derive(Clone, Copy)]
enum OutputFormat {
    Svg,
    Json,
}

impl OutputFormat {
    fn for_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Svg,
        }
    }
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Render {
            input,
            out,
            appearance,
            dark,
            no_provenance,
        } => render(&input, &out, appearance.as_deref(), dark, !no_provenance),
        Action::Presets { family } => presets(family),
        Action::Report => report(),
    }
}

fn load_appearance(path: Option<&Path>, dark: bool) -> Result<Appearance> {
    let mut appearance = match path {
        Some(p) => {
            let text = fs::read_to_string(p)
                .with_context(|| format!("reading appearance {}", p.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("parsing appearance {}", p.display()))?
        }
        None => Appearance::default(),
    };
    if dark {
        appearance.white_background = false;
    }
    if !(appearance.width > 0.0 && appearance.height > 0.0) {
        bail!(
            "figure size must be positive (got {} x {} in)",
            appearance.width,
            appearance.height
        );
    }
    Ok(appearance)
}

fn render(
    input: &Path,
    out: &Path,
    appearance: Option<&Path>,
    dark: bool,
    sidecar: bool,
) -> Result<()> {
    let text =
        fs::read_to_string(input).with_context(|| format!("reading {}", input.display()))?;
    let spec: DiagramSpec = serde_json::from_str(&text)
        .with_context(|| format!("parsing diagram description {}", input.display()))?;
    let appearance = load_appearance(appearance, dark)?;
    tracing::info!(kind = spec.kind(), input = %input.display(), out = %out.display(), "render");

    let figure = spec
        .build(&appearance)
        .with_context(|| format!("building {} diagram", spec.kind()))?;

    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    let bytes = match OutputFormat::for_path(out) {
        OutputFormat::Svg => figure.to_svg(&appearance, &SvgOptions::default()).into_bytes(),
        OutputFormat::Json => serde_json::to_vec_pretty(&figure)?,
    };
    fs::write(out, &bytes).with_context(|| format!("writing {}", out.display()))?;
    tracing::info!(items = figure.scene.len(), bytes = bytes.len(), "wrote figure");

    if sidecar {
        let payload = provenance::Payload::new(spec.kind(), serde_json::to_value(&spec)?)
            .with_appearance(serde_json::to_value(appearance)?);
        let path = provenance::write_sidecar(out, payload)?;
        tracing::debug!(path = %path.display(), "wrote provenance");
    }
    Ok(())
}

fn presets(family: Option<catalog::Family>) -> Result<()> {
    let doc = match family {
        Some(f) => serde_json::to_value(catalog::entries(f))?,
        None => {
            let mut all = serde_json::Map::new();
            for f in catalog::Family::value_variants() {
                if let Some(name) = f.to_possible_value() {
                    let entries = serde_json::to_value(catalog::entries(*f))?;
                    all.insert(name.get_name().to_string(), entries);
                }
            }
            serde_json::Value::Object(all)
        }
    };
    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}

fn report() -> Result<()> {
    let obj = serde_json::json!({
        "code_rev": provenance::current_git_rev(),
        "version": figures::VERSION,
        "families": catalog::Family::value_variants()
            .iter()
            .filter_map(|f| f.to_possible_value().map(|v| v.get_name().to_string()))
            .collect::<Vec<_>>(),
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
