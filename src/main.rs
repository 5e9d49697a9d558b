use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use log::info;

use alumnus::schema::{self, Widget};
use alumnus::{report, ArtifactStore, Predictor, StudentRecord};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory holding the forest/scaler/encoder artifact bundle
    #[arg(short, long)]
    artifacts_dir: Option<PathBuf>,

    /// JSON file with a student record; unset fields use the form defaults
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Fetch the artifact bundle from this base URL before predicting
    #[arg(long)]
    fetch: Option<String>,

    /// Force a fresh download of the artifact bundle
    #[arg(short, long)]
    fresh: bool,

    /// Print the form schema instead of predicting
    #[arg(long)]
    schema: bool,
}

fn print_schema() {
    for field in schema::form_fields() {
        match field.widget {
            Widget::Number {
                min,
                max,
                default,
                step,
            } => {
                println!(
                    "{} ({}): number, min={:?} max={:?} default={} step={}",
                    field.label, field.name, min, max, default, step
                );
            }
            Widget::Select { map } => {
                let choices: Vec<_> = map.labels().collect();
                println!(
                    "{} ({}): choice of {} [{}]",
                    field.label,
                    field.name,
                    choices.len(),
                    choices.join(", ")
                );
            }
        }
    }
}

fn load_record(input: Option<&PathBuf>) -> anyhow::Result<StudentRecord> {
    match input {
        Some(path) => {
            let bytes = fs::read(path).with_context(|| format!("reading record {path:?}"))?;
            serde_json::from_slice(&bytes).with_context(|| format!("parsing record {path:?}"))
        }
        None => Ok(StudentRecord::default()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.schema {
        print_schema();
        return Ok(());
    }

    let store = match &args.artifacts_dir {
        Some(dir) => ArtifactStore::new(dir)?,
        None => ArtifactStore::new_default()?,
    };

    if args.fresh {
        info!("Fresh download requested - removing any existing artifact files...");
        store.remove_download()?;
    }
    if let Some(base_url) = &args.fetch {
        store.ensure_bundle(base_url).await?;
    }

    let start_time = Instant::now();
    info!("Building predictor from {:?}...", store.dir());

    let predictor = Predictor::builder().with_store(&store)?.build()?;

    let info = predictor.info();
    info!(
        "Predictor ready (took {:.2?}): {} trees, {} features, classes {:?}",
        start_time.elapsed(),
        info.n_trees,
        info.n_features,
        info.class_labels
    );

    let record = load_record(args.input.as_ref())?;

    let predict_start = Instant::now();
    match predictor.predict(&record) {
        Ok(prediction) => {
            info!("Prediction took {:.2?}", predict_start.elapsed());
            println!("{}", report::render(&prediction));
        }
        Err(e) => {
            eprintln!("Error making prediction: {e}");
            eprintln!("Consider:");
            eprintln!("  - Checking that categorical values match the form's choices (--schema)");
            eprintln!("  - Checking that the artifact bundle matches the 35-feature form schema");
            std::process::exit(1);
        }
    }

    Ok(())
}
