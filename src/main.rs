use clap::{Arg, ArgAction, Command};
use log::LevelFilter;
use std::process;
use std::sync::Arc;
use url_sentinel::{
    validate_url, Assessment, Assessor, AssessorConfig, FeatureEngine, LogisticModel,
};

#[tokio::main]
async fn main() {
    let matches = Command::new("url-sentinel")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Phishing-risk assessment for URLs from lexical and structural features")
        .arg(
            Arg::new("urls")
                .value_name("URL")
                .help("URLs to assess")
                .num_args(0..)
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file path (weights, bands, reference lists)")
                .default_value("/etc/url-sentinel.yaml"),
        )
        .arg(
            Arg::new("model")
                .short('m')
                .long("model")
                .value_name("FILE")
                .help("Logistic model file (.yaml or .json)"),
        )
        .arg(
            Arg::new("generate-config")
                .long("generate-config")
                .value_name("FILE")
                .help("Write the default configuration file and exit")
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("features")
                .long("features")
                .help("Print the feature vector of each URL part instead of assessing")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print assessments as JSON with the per-part breakdown")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let log_level = if matches.get_flag("verbose") {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    if let Some(generate_path) = matches.get_one::<String>("generate-config") {
        if let Err(e) = generate_default_config(generate_path) {
            eprintln!("Error writing configuration: {e}");
            process::exit(1);
        }
        println!("Default configuration written to {generate_path}");
        return;
    }

    let urls: Vec<String> = matches
        .get_many::<String>("urls")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();
    if urls.is_empty() {
        eprintln!("No URLs given");
        process::exit(2);
    }

    let config_path = matches
        .get_one::<String>("config")
        .map(String::as_str)
        .unwrap_or("/etc/url-sentinel.yaml");
    let config = match AssessorConfig::load_or_default(config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {e}");
            process::exit(1);
        }
    };

    if matches.get_flag("features") {
        if let Err(e) = print_features(&config, &urls) {
            eprintln!("Error: {e}");
            process::exit(1);
        }
        return;
    }

    let Some(model_path) = matches.get_one::<String>("model") else {
        eprintln!("A model file is required for assessment (--model FILE)");
        process::exit(2);
    };

    if let Err(e) = run_assessments(config, model_path, &urls, matches.get_flag("json")).await {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn generate_default_config(path: &str) -> anyhow::Result<()> {
    let yaml = AssessorConfig::default().to_yaml()?;
    std::fs::write(path, yaml)?;
    Ok(())
}

fn print_features(config: &AssessorConfig, urls: &[String]) -> anyhow::Result<()> {
    let engine = FeatureEngine::from_config(config);
    for url in urls {
        let parts: Vec<_> = url_sentinel::assessor::part_texts(url)
            .into_iter()
            .map(|(part, text)| {
                serde_json::json!({
                    "part": part.name(),
                    "text": text,
                    "features": engine.extract_text(&text),
                })
            })
            .collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({ "url": url, "parts": parts }))?
        );
    }
    Ok(())
}

async fn run_assessments(
    config: AssessorConfig,
    model_path: &str,
    urls: &[String],
    json: bool,
) -> anyhow::Result<()> {
    let model = LogisticModel::load_from_file(model_path)?;
    let assessor = Assessor::new(config, Arc::new(model))?;

    for url in urls {
        if let Err(e) = validate_url(url) {
            log::warn!("Skipping {}: {}", url, e);
            println!("❌ {url}: {e}");
            continue;
        }

        let assessment = assessor.assess_concurrent(url).await?;
        if json {
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "url": url,
                    "assessment": assessment,
                }))?
            );
        } else {
            print_assessment(url, &assessment);
        }
    }
    Ok(())
}

fn print_assessment(url: &str, assessment: &Assessment) {
    let verdict = &assessment.verdict;
    println!("🔍 {url}");
    for part in &assessment.parts {
        println!(
            "   {:<9} {:>7.2}%  {}",
            part.part.name(),
            part.phishing_probability * 100.0,
            part.text
        );
    }
    println!("   Safety Message: {}", verdict.message);
    println!("   {}: {}%", verdict.label, verdict.reported_percentage);
}
