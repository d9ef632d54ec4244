//! PixeLift CLI — command-line client for the enhancement backend.
//!
//! Set PIXELIFT_API_URL (or API_URL) for the backend and PIXELIFT_EMAIL
//! for the logged-in user. Local state (credit refill timestamp, theme)
//! lives in the file named by PIXELIFT_STATE_PATH.

use std::io::Write;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use pixelift_api_client::ApiClient;
use pixelift_app::{CreditsMeter, ThemePreference, Workspace};
use pixelift_cli::{format_price, init_tracing};
use pixelift_core::models::{AuthUser, PlanInfo, SelectedFileData};
use pixelift_core::validation::content_type_for_path;
use pixelift_core::{AppError, ClientConfig, FileStore, KeyValueStore};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "pixelift", about = "PixeLift image enhancement CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload an image and run the selected enhancements
    Enhance {
        /// Path to the image file
        file: std::path::PathBuf,
        /// Enhance faces
        #[arg(long)]
        face: bool,
        /// Enhance the background
        #[arg(long)]
        background: bool,
        /// Enhance text regions
        #[arg(long)]
        text: bool,
        /// Colorize the image
        #[arg(long)]
        colorization: bool,
    },
    /// Gallery operations
    Gallery {
        #[command(subcommand)]
        sub: GalleryCommands,
    },
    /// Show the local credit balance and refill countdown
    Credits {
        /// Keep polling once per second until interrupted
        #[arg(long)]
        watch: bool,
    },
    /// Show the subscription plan catalog
    Plans,
    /// Theme preference
    Theme {
        #[command(subcommand)]
        sub: ThemeCommands,
    },
}

#[derive(Subcommand)]
enum GalleryCommands {
    /// List the user's gallery
    List,
    /// Delete a gallery entry by key
    Delete {
        /// Opaque entry key (e.g. "r1_enhanced")
        key: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum ThemeCommands {
    /// Print the current preference
    Show,
    /// Switch to the dark theme
    Dark,
    /// Switch to the light theme
    Light,
    /// Flip the preference
    Toggle,
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize response")?;
    println!("{}", out);
    Ok(())
}

fn require_email(config: &ClientConfig) -> anyhow::Result<String> {
    config
        .email
        .clone()
        .context("Login required. Set PIXELIFT_EMAIL to your account email")
}

fn confirm(prompt: &str) -> anyhow::Result<bool> {
    print!("{} [y/N] ", prompt);
    std::io::stdout().flush()?;
    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

async fn run_enhance(
    config: &ClientConfig,
    store: Arc<dyn KeyValueStore>,
    file: std::path::PathBuf,
    face: bool,
    background: bool,
    text: bool,
    colorization: bool,
) -> anyhow::Result<()> {
    let client = ApiClient::new(config.api_base_url.clone())?;
    let user = config.email.clone().map(AuthUser::new);
    let mut workspace = Workspace::new(client, user, store);

    let path = file.to_string_lossy().to_string();
    let bytes = std::fs::read(&file).with_context(|| format!("Failed to read file: {}", path))?;
    let name = file
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("image.jpg")
        .to_string();
    let data = SelectedFileData::new(name, content_type_for_path(&path), bytes);

    workspace.credits_mut().tick()?;

    if let Err(err) = workspace.select_file(data) {
        if workspace.login_requested() {
            anyhow::bail!("Login required. Set PIXELIFT_EMAIL to your account email");
        }
        anyhow::bail!(err.to_string());
    }
    workspace.session.toggles.face = face;
    workspace.session.toggles.background = background;
    workspace.session.toggles.text = text;
    workspace.session.toggles.colorization = colorization;

    match workspace.enhance().await {
        Ok(result) => {
            print_json(&serde_json::json!({
                "result": result,
                "gallery": workspace.gallery(),
                "credits_remaining": workspace.credits().credits(),
            }))?;
            Ok(())
        }
        Err(AppError::AuthRequired) => {
            anyhow::bail!("Login required. Set PIXELIFT_EMAIL to your account email")
        }
        Err(err) => anyhow::bail!(err.to_string()),
    }
}

async fn run_credits(store: Arc<dyn KeyValueStore>, watch: bool) -> anyhow::Result<()> {
    let mut meter = CreditsMeter::new(store);

    if !watch {
        let snapshot = meter.tick()?;
        print_json(&snapshot)?;
        return Ok(());
    }

    let (tx, rx) = tokio::sync::watch::channel(false);
    tokio::spawn(async move {
        let _ = tokio::signal::ctrl_c().await;
        let _ = tx.send(true);
    });

    meter
        .run(rx, |snapshot| {
            println!(
                "credits: {}/3, next refill in {}",
                snapshot.credits, snapshot.countdown
            );
        })
        .await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    dotenvy::dotenv().ok();

    let config = ClientConfig::from_env();
    let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(&config.state_path));

    let cli = Cli::parse();

    match cli.command {
        Commands::Enhance {
            file,
            face,
            background,
            text,
            colorization,
        } => {
            run_enhance(&config, store, file, face, background, text, colorization).await?;
        }
        Commands::Gallery { sub } => {
            let client = ApiClient::new(config.api_base_url.clone())?;
            let email = require_email(&config)?;
            match sub {
                GalleryCommands::List => {
                    let images = client.fetch_gallery(&email).await?;
                    print_json(&serde_json::json!({ "images": images }))?;
                }
                GalleryCommands::Delete { key, yes } => {
                    if !yes && !confirm(&format!("Delete gallery entry {}?", key))? {
                        println!("Cancelled");
                        return Ok(());
                    }
                    let images = client.delete_gallery_image(&email, &key).await?;
                    print_json(&serde_json::json!({ "images": images }))?;
                }
            }
        }
        Commands::Credits { watch } => {
            run_credits(store, watch).await?;
        }
        Commands::Plans => {
            let catalog = PlanInfo::catalog();
            for plan in &catalog {
                let marker = if plan.highlighted { " *" } else { "" };
                println!(
                    "{}{}: {}/month, {} credits/day",
                    plan.name,
                    marker,
                    format_price(plan.monthly_price_cents),
                    plan.credits_per_day
                );
                for feature in &plan.features {
                    println!("  - {}", feature);
                }
            }
        }
        Commands::Theme { sub } => {
            let theme = ThemePreference::new(store);
            match sub {
                ThemeCommands::Show => {
                    println!("{}", if theme.is_dark()? { "dark" } else { "light" });
                }
                ThemeCommands::Dark => theme.set_dark(true)?,
                ThemeCommands::Light => theme.set_dark(false)?,
                ThemeCommands::Toggle => {
                    let dark = theme.toggle()?;
                    println!("{}", if dark { "dark" } else { "light" });
                }
            }
        }
    }

    Ok(())
}
