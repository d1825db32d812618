use colored::Colorize;
use sentiment::classify::lexicon::{classify_text, count_markers};
use sentiment::{AnalysisRequest, Sentiment};

use crate::cli::OutputFormat;

pub fn run(text: &str, format: OutputFormat) -> Result<(), String> {
    AnalysisRequest::new(text)
        .validate()
        .map_err(|e| e.to_string())?;

    let result = classify_text(text);

    if format == OutputFormat::Json {
        println!(
            "{}",
            serde_json::to_string_pretty(&result).map_err(|e| e.to_string())?
        );
        return Ok(());
    }

    let counts = count_markers(text);
    let label = match result.label {
        Sentiment::Positive => result.label.label().green(),
        Sentiment::Negative => result.label.label().red(),
        Sentiment::Neutral | Sentiment::Unknown => result.label.label().yellow(),
    };
    println!("{} {} ({:.2})", result.sentiment.bold(), label, result.confidence);
    println!(
        "  {}",
        format!(
            "markers: {} positive, {} negative",
            counts.positive, counts.negative
        )
        .dimmed()
    );

    Ok(())
}
