#![allow(clippy::uninlined_format_args)]

use std::sync::Arc;
use url_sentinel::{Assessor, FeatureVector, ModelError, ProbabilityPair};

/// Flags a part as risky in proportion to how many phishing signals it carries.
fn signal_counter(features: &FeatureVector) -> Result<ProbabilityPair, ModelError> {
    let signals = [
        "unusual_tld",
        "unusual_words",
        "having_hyphen_in_subdomain",
        "presence_of_html",
        "number_of_at_in_url",
    ];
    let hits = signals
        .iter()
        .filter_map(|name| features.get(name))
        .filter(|value| value.as_f64() > 0.0)
        .count();
    Ok(ProbabilityPair::from_phishing(hits as f64 / signals.len() as f64))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    println!("Assessing sample URLs with a signal-counting stub classifier...");

    let assessor = Assessor::with_defaults(Arc::new(signal_counter))?;

    let samples = [
        "http://secure-login.example-bank.co/update/verify?acct=1234",
        "https://www.wikipedia.org/wiki/Rust",
        "http://paypal.account-check.online/signin.php",
        "https://192.168.0.1/admin",
        "",
    ];

    for url in samples {
        let assessment = assessor.assess_concurrent(url).await?;
        println!();
        println!("URL: {:?}", url);
        for part in &assessment.parts {
            println!(
                "  {:<9} p={:.2}  {:?}",
                part.part.name(),
                part.phishing_probability,
                part.text
            );
        }
        println!("  {}", assessment.verdict.message);
        println!(
            "  {}: {}%",
            assessment.verdict.label, assessment.verdict.reported_percentage
        );
    }

    Ok(())
}
