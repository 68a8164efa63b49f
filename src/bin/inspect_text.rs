use serde::Serialize;
use stylomark_lib::models::{DetectionReport, FeatureVector};
use stylomark_lib::services::config_store::{AnnotationConfig, ModelBackend};
use stylomark_lib::services::detection::{extract_features, ClassifierAdapter, Detector};

fn preview(s: &str, max_chars: usize) -> String {
    let mut out: String = s.chars().take(max_chars).collect();
    if s.chars().count() > max_chars {
        out.push_str("...");
    }
    out.replace('\n', " ")
}

fn parse_arg_value(args: &[String], key: &str) -> Option<String> {
    args.iter()
        .position(|a| a == key)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

fn has_flag(args: &[String], key: &str) -> bool {
    args.iter().any(|a| a == key)
}

fn main() -> Result<(), String> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!(
            "Usage:\n  cargo run --bin inspect_text -- <path.txt> [--spans <n>] [--backend <logistic|gbdt>] [--heuristic] [--resolve-overlaps] [--out <json_path>]\n\nNotes:\n  - The classifier is trained in memory from the seed corpus; nothing is persisted.\n  - `--heuristic` skips training and shows the untrained fallback."
        );
        return Ok(());
    }

    let path = args[1].clone();
    let spans_n: usize = parse_arg_value(&args, "--spans")
        .and_then(|s| s.parse().ok())
        .unwrap_or(30);
    let backend = match parse_arg_value(&args, "--backend") {
        Some(name) => ModelBackend::from_str(&name).ok_or_else(|| format!("unknown backend: {}", name))?,
        None => ModelBackend::default(),
    };
    let heuristic = has_flag(&args, "--heuristic");
    let annotation = AnnotationConfig {
        resolve_overlaps: has_flag(&args, "--resolve-overlaps"),
    };
    let out_path = parse_arg_value(&args, "--out");

    let text = std::fs::read_to_string(&path).map_err(|e| format!("read file failed: {}", e))?;

    let adapter = if heuristic {
        ClassifierAdapter::untrained(backend)
    } else {
        ClassifierAdapter::load_or_train(backend, None, false, false)
    };
    let model = if adapter.is_trained() { "trained" } else { "heuristic" };

    println!("File: {}", path);
    println!("Text: {} chars ({} bytes)", text.chars().count(), text.len());
    println!("Classifier: {} ({})", backend.as_str(), model);
    println!("Resolve overlaps: {}", if annotation.resolve_overlaps { "on" } else { "off" });
    println!();

    let features = extract_features(&text).map_err(|e| e.to_string())?;
    println!("Features:");
    for (name, value) in features.named() {
        println!("  {:<20} {:.4}", name, value);
    }
    println!();

    let detector = Detector::new(adapter, &annotation).map_err(|e| e.to_string())?;
    let report = detector.predict(&text);

    println!(
        "Scores: ai={:.3} human={:.3} confidence={:.2}",
        report.ai_probability, report.human_probability, report.confidence
    );
    println!();

    println!("Spans: {} (density {:.4})", report.stats.total_spans, report.stats.span_density);
    for (category, count) in &report.stats.spans_by_category {
        println!("  {:<20} {}", category.as_str(), count);
    }
    for (i, s) in report.detected_spans.iter().take(spans_n).enumerate() {
        println!(
            "[P{:04}] bytes=[{},{}] {:<18} {:?}  ...{}...",
            i,
            s.start,
            s.end,
            s.category.as_str(),
            s.matched_text,
            preview(&s.context, 100)
        );
    }
    if report.detected_spans.len() > spans_n {
        println!("... ({} more spans)", report.detected_spans.len() - spans_n);
    }
    println!();

    println!("Annotated:");
    println!("{}", report.annotated_text);

    if let Some(out_path) = out_path {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Output<'a> {
            file: String,
            backend: &'static str,
            model: &'static str,
            chars: usize,
            bytes: usize,
            features: FeatureVector,
            report: &'a DetectionReport,
        }

        let out = Output {
            file: path.clone(),
            backend: backend.as_str(),
            model,
            chars: text.chars().count(),
            bytes: text.len(),
            features,
            report: &report,
        };

        let json = serde_json::to_string_pretty(&out).map_err(|e| e.to_string())?;
        std::fs::write(&out_path, json).map_err(|e| format!("write out failed: {}", e))?;
        println!();
        println!("Wrote JSON: {}", out_path);
    }

    Ok(())
}
