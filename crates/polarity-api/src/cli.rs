//! Command-line interface

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "polarity-api")]
#[command(about = "Sentiment prediction and explanation service", long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    pub config: String,

    /// Directory holding vectorizer.json and classifier.json
    #[arg(short, long)]
    pub artifacts: Option<String>,

    /// Listen address
    #[arg(short = 'l', long)]
    pub listen: Option<String>,

    /// Listen port
    #[arg(short = 'P', long)]
    pub port: Option<u16>,

    /// Abort startup if model artifacts fail to load, instead of serving
    /// 503 on model-dependent routes
    #[arg(long)]
    pub fail_on_load_error: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}
