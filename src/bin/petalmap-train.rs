//! Headless trainer: fits the softmax classifier on an iris CSV and writes a model file.

use std::path::PathBuf;

use petalmap::dataset::{IRIS_CLASS_NAMES, load_iris_csv};
use petalmap::logging;
use petalmap::ml::SoftmaxClassifier;
use petalmap::ml::metrics::evaluate;
use petalmap::ml::softmax::DEFAULT_LEARNING_RATE;

const REPORT_EVERY: u32 = 100;

fn main() {
    if let Err(err) = logging::init_stderr() {
        eprintln!("Logging disabled: {err}");
    }
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let options = parse_args(std::env::args().skip(1).collect())?;
    let dataset = load_iris_csv(&options.dataset).map_err(|err| err.to_string())?;
    if dataset.is_empty() {
        return Err(format!(
            "Dataset has no usable rows: {}",
            options.dataset.display()
        ));
    }

    let mut classifier = SoftmaxClassifier::new(options.learning_rate);
    match &options.init {
        Some(path) => {
            classifier.load(path).map_err(|err| err.to_string())?;
            classifier.set_learning_rate(options.learning_rate);
        }
        None => classifier.randomize_seeded(options.seed),
    }

    let points = dataset.points();
    println!(
        "training on {} points (epoch {} start, loss {:.5})",
        points.len(),
        classifier.epochs_trained(),
        classifier.compute_loss(points)
    );
    for epoch in 1..=options.epochs {
        classifier.train_epoch(points);
        if epoch % REPORT_EVERY == 0 || epoch == options.epochs {
            println!(
                "epoch {:>6}  loss={:.5}",
                classifier.epochs_trained(),
                classifier.last_loss()
            );
        }
    }

    classifier
        .save(&options.model_out)
        .map_err(|err| err.to_string())?;

    let cm = evaluate(&classifier, points);
    println!("accuracy: {:.4}", cm.accuracy());
    println!("confusion matrix (rows=true, cols=pred):");
    for truth in 0..cm.n_classes {
        let mut row = format!("{:<12}", IRIS_CLASS_NAMES.get(truth).copied().unwrap_or("?"));
        for pred in 0..cm.n_classes {
            row.push_str(&format!("{:6}", cm.get(truth, pred)));
        }
        println!("{row}");
    }
    println!("model written to {}", options.model_out.display());
    Ok(())
}

#[derive(Debug, Clone, PartialEq)]
struct CliOptions {
    dataset: PathBuf,
    model_out: PathBuf,
    epochs: u32,
    learning_rate: f32,
    seed: u64,
    init: Option<PathBuf>,
}

fn parse_args(args: Vec<String>) -> Result<CliOptions, String> {
    let mut dataset: Option<PathBuf> = None;
    let mut model_out = PathBuf::from("model.bin");
    let mut epochs = 1000u32;
    let mut learning_rate = DEFAULT_LEARNING_RATE;
    let mut seed = 42u64;
    let mut init: Option<PathBuf> = None;

    let mut idx = 0usize;
    while idx < args.len() {
        match args[idx].as_str() {
            "-h" | "--help" => return Err(help_text()),
            "--dataset" => {
                idx += 1;
                let value = args.get(idx).ok_or_else(|| "--dataset requires a value".to_string())?;
                dataset = Some(PathBuf::from(value));
            }
            "--out" => {
                idx += 1;
                let value = args.get(idx).ok_or_else(|| "--out requires a value".to_string())?;
                model_out = PathBuf::from(value);
            }
            "--epochs" => {
                idx += 1;
                let value = args.get(idx).ok_or_else(|| "--epochs requires a value".to_string())?;
                epochs = value
                    .parse::<u32>()
                    .map_err(|_| format!("Invalid --epochs value: {value}"))?;
            }
            "--learning-rate" => {
                idx += 1;
                let value = args
                    .get(idx)
                    .ok_or_else(|| "--learning-rate requires a value".to_string())?;
                learning_rate = value
                    .parse::<f32>()
                    .ok()
                    .filter(|lr| lr.is_finite() && *lr > 0.0)
                    .ok_or_else(|| format!("Invalid --learning-rate value: {value}"))?;
            }
            "--seed" => {
                idx += 1;
                let value = args.get(idx).ok_or_else(|| "--seed requires a value".to_string())?;
                seed = value
                    .parse::<u64>()
                    .map_err(|_| format!("Invalid --seed value: {value}"))?;
            }
            "--init" => {
                idx += 1;
                let value = args.get(idx).ok_or_else(|| "--init requires a value".to_string())?;
                init = Some(PathBuf::from(value));
            }
            unknown => return Err(format!("Unknown argument: {unknown}\n\n{}", help_text())),
        }
        idx += 1;
    }

    let dataset = dataset.ok_or_else(help_text)?;
    Ok(CliOptions {
        dataset,
        model_out,
        epochs,
        learning_rate,
        seed,
        init,
    })
}

fn help_text() -> String {
    [
        "petalmap-train",
        "",
        "Trains the 3-class softmax classifier on petal length/width from an iris CSV.",
        "",
        "Usage:",
        "  petalmap-train --dataset <csv> [--out model.bin] [options]",
        "",
        "Options:",
        "  --dataset <csv>        Iris CSV with a header row (required).",
        "  --out <file>           Output model path (default: model.bin).",
        "  --epochs <n>           Epoch count (default: 1000).",
        "  --learning-rate <f32>  Learning rate (default: 0.8).",
        "  --seed <u64>           Weight initialization seed (default: 42).",
        "  --init <file>          Continue from an existing model file instead of random weights.",
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn defaults_apply_when_only_dataset_given() {
        let options = parse_args(args(&["--dataset", "iris.csv"])).unwrap();
        assert_eq!(options.dataset, PathBuf::from("iris.csv"));
        assert_eq!(options.model_out, PathBuf::from("model.bin"));
        assert_eq!(options.epochs, 1000);
        assert_eq!(options.learning_rate, DEFAULT_LEARNING_RATE);
        assert_eq!(options.seed, 42);
        assert!(options.init.is_none());
    }

    #[test]
    fn all_flags_are_parsed() {
        let options = parse_args(args(&[
            "--dataset", "d.csv", "--out", "m.bin", "--epochs", "50", "--learning-rate", "0.1",
            "--seed", "9", "--init", "prev.bin",
        ]))
        .unwrap();
        assert_eq!(options.epochs, 50);
        assert_eq!(options.learning_rate, 0.1);
        assert_eq!(options.seed, 9);
        assert_eq!(options.init, Some(PathBuf::from("prev.bin")));
    }

    #[test]
    fn missing_dataset_shows_help() {
        let err = parse_args(args(&["--epochs", "5"])).unwrap_err();
        assert!(err.starts_with("petalmap-train"));
    }

    #[test]
    fn rejects_bad_values() {
        assert!(parse_args(args(&["--dataset", "d.csv", "--epochs", "-1"])).is_err());
        assert!(parse_args(args(&["--dataset", "d.csv", "--learning-rate", "0"])).is_err());
        assert!(parse_args(args(&["--dataset"])).is_err());
        assert!(parse_args(args(&["--dataset", "d.csv", "--bogus"])).is_err());
    }
}
