pub mod commands;

use clap::{Args, Parser, Subcommand};

use crate::http::{ServerConfig, DEFAULT_PORT};

#[derive(Debug, Parser)]
#[command(name = "sentiment-server")]
#[command(author, version, about = "Persian sentiment analysis service", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Listen address of the serving subcommands.
#[derive(Clone, Debug, Args)]
pub struct ListenArgs {
    /// Address to listen on
    #[arg(long, env = "SENTIMENT_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "SENTIMENT_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,
}

impl ListenArgs {
    pub fn server_config(&self) -> ServerConfig {
        ServerConfig {
            host: self.host.clone(),
            port: self.port,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Serve the keyword heuristic classifier
    Heuristic {
        #[command(flatten)]
        listen: ListenArgs,
    },

    /// Serve a pretrained transformer classifier
    #[cfg(feature = "bert")]
    Model {
        #[command(flatten)]
        listen: ListenArgs,

        /// HuggingFace model to load
        #[arg(long, env = "SENTIMENT_MODEL_ID", default_value = sentiment::classify::model::DEFAULT_MODEL_ID)]
        model_id: String,

        /// Run on CPU even when CUDA is available
        #[arg(long)]
        cpu: bool,
    },

    /// Classify a single text with the heuristic and print the result
    Analyze {
        /// Text to classify
        text: String,

        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },
}

/// Run the CLI with parsed arguments
pub async fn run(cli: Cli) -> Result<(), String> {
    match cli.command {
        Commands::Heuristic { listen } => commands::serve::heuristic(&listen.server_config()).await,
        #[cfg(feature = "bert")]
        Commands::Model {
            listen,
            model_id,
            cpu,
        } => commands::serve::model(&listen.server_config(), model_id, cpu).await,
        Commands::Analyze { text, format } => commands::analyze::run(&text, format),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["sentiment-server", "heuristic"]).unwrap();
        match cli.command {
            Commands::Heuristic { listen } => {
                assert_eq!(listen.server_config(), ServerConfig::default());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_listen_overrides() {
        let cli =
            Cli::try_parse_from(["sentiment-server", "heuristic", "--port", "9000", "--host", "127.0.0.1"])
                .unwrap();
        match cli.command {
            Commands::Heuristic { listen } => assert_eq!(
                listen.server_config(),
                ServerConfig {
                    host: "127.0.0.1".to_owned(),
                    port: 9000
                }
            ),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_analyze_rejects_listen_flags() {
        assert!(Cli::try_parse_from(["sentiment-server", "analyze", "خوب", "--port", "9000"]).is_err());
        assert!(Cli::try_parse_from(["sentiment-server", "--host", "127.0.0.1", "analyze", "خوب"]).is_err());
    }

    #[test]
    fn test_analyze_args() {
        let cli = Cli::try_parse_from(["sentiment-server", "analyze", "خوب", "--format", "json"])
            .unwrap();
        match cli.command {
            Commands::Analyze { text, format } => {
                assert_eq!(text, "خوب");
                assert_eq!(format, OutputFormat::Json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Cli::try_parse_from(["sentiment-server"]).is_err());
    }
}
