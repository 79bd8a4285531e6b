use std::path::PathBuf;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use chibi_image_proxy::models::{GenerationParameters, GenerationRequest};
use chibi_image_proxy::proxy::generator::payload_for;
use chibi_image_proxy::{transform, AppError, Config, GenerationProxy, InferenceClient};
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "chibictl", about = "CLI for the Chibi Image Proxy", version)]
struct Cli {
    /// Override HF_MODEL_URL
    #[arg(global = true, long)]
    model_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show what would be sent upstream for a prompt (no network)
    Preview {
        /// Free-text description
        prompt: String,
        /// Print the full outbound JSON body instead of just the prompt
        #[arg(long)]
        json: bool,
    },
    /// Generate a chibi image directly against the inference endpoint
    Generate {
        /// Free-text description
        prompt: String,
        /// Output path (defaults to ./chibi-<unix-millis>.png)
        #[arg(long, value_name = "PATH")]
        out: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    Config::dotenv_load();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Preview { prompt, json } => {
            if json {
                let payload = payload_for(&prompt, GenerationParameters::default());
                println!("{}", serde_json::to_string_pretty(&payload)?);
            } else {
                println!("{}", transform(&prompt));
            }
            Ok(())
        }
        Commands::Generate { prompt, out } => {
            let mut conf = Config::new()?;
            if let Some(url) = cli.model_url {
                conf.model_url = url;
            }
            let client = InferenceClient::new(
                conf.model_url.clone(),
                conf.hf_api_token.clone(),
                conf.request_timeout(),
            )?;
            let model_url = client.model_url().to_string();
            let proxy = GenerationProxy::new(Arc::new(client));
            let params = proxy.parameters();
            eprintln!(
                "Requesting {}x{} image ({} steps) from {}",
                params.width, params.height, params.num_inference_steps, model_url
            );

            let image = match proxy.generate(GenerationRequest::new(prompt)).await {
                Ok(image) => image,
                Err(e @ AppError::MissingPrompt) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(2);
                }
                Err(e) => {
                    tracing::error!("Generation failed: {}", e);
                    eprintln!("Error: {}", describe_failure(&e));
                    std::process::exit(1);
                }
            };

            let path = out.unwrap_or_else(default_output_path);
            tokio::fs::write(&path, &image.bytes).await?;
            println!("Saved {} ({} bytes)", path.display(), image.bytes.len());
            Ok(())
        }
    }
}

fn default_output_path() -> PathBuf {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    PathBuf::from(format!("chibi-{}.png", millis))
}

// Operators get the full cause, including the upstream body.
fn describe_failure(e: &AppError) -> String {
    format!("{} ({})", e, e.status_code())
}
