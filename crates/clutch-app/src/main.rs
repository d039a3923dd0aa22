//! Clutch client command-line interface.
//!
//! Headless driver for the sign-in, sign-up, and session lifecycle
//! protocols that the mobile client runs behind its screens.

mod config;
mod console;
mod error;
mod logging;
mod paths;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::debug;

use clutch_auth_gate::{intent_for, NavigationIntent, RetryConfig, SignInController, SignUpController};
use clutch_identity::{AuthStatusSignal, HttpIdentityClient};
use clutch_token_cache::{classify, FileBlobStore, TokenCache, TokenKeys, TokenShape};

use config::Config;
use console::{prompt, ConsoleNotifier, ConsoleRouter};
use paths::Paths;

/// Clutch command-line interface.
#[derive(Parser)]
#[command(name = "clutch")]
#[command(about = "Clutch client for account sign-in and session management")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = config::DEFAULT_LOG_LEVEL, global = true)]
    log_level: String,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    /// Base directory for runtime files (config, tokens, logs). Defaults to ~/.clutch
    #[arg(long, global = true)]
    base_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in with email and password
    Login,
    /// Create an account (with email verification when required)
    Signup,
    /// Drop the active session and clear the stored token
    Logout,
    /// Show the stored session state
    Status,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    logging::init_logging(&cli.log_level, cli.json_logs);

    let paths = match cli.base_dir {
        Some(base) => Paths::with_base_dir(base),
        None => Paths::new()?,
    };
    paths.ensure_dirs()?;
    debug!(base_dir = %paths.base_dir().display(), "runtime directory");

    let config = Config::load(&paths)?;
    if !paths.config_file().exists() {
        // Seed an editable config on first run.
        config.save(&paths)?;
    }

    let cache = TokenCache::new(Arc::new(FileBlobStore::new(paths.tokens_file())));
    let client = Arc::new(HttpIdentityClient::new(
        &config.api_url,
        &config.publishable_key,
        cache.clone(),
        clutch_identity::SharedAuthSignal::new(),
    )?);

    match cli.command {
        Commands::Login => login(client).await?,
        Commands::Signup => signup(client).await?,
        Commands::Logout => client.sign_out().await,
        Commands::Status => status(&cache, &client).await,
    }

    Ok(())
}

async fn login(client: Arc<HttpIdentityClient>) -> Result<(), Box<dyn std::error::Error>> {
    let email = prompt("Email")?;
    let password = prompt("Password")?;

    let controller = SignInController::new(
        client.clone(),
        client.signal().clone(),
        ConsoleRouter,
        ConsoleNotifier,
        RetryConfig::default(),
    );
    controller.submit(&email, &password).await;
    Ok(())
}

async fn signup(client: Arc<HttpIdentityClient>) -> Result<(), Box<dyn std::error::Error>> {
    let first_name = prompt("First name")?;
    let last_name = prompt("Last name")?;
    let email = prompt("Email")?;
    let password = prompt("Password")?;

    let controller = SignUpController::new(
        client.clone(),
        client.clone(),
        client.signal().clone(),
        ConsoleRouter,
        ConsoleNotifier,
        RetryConfig::default(),
    );
    controller.submit(&first_name, &last_name, &email, &password).await;

    // Registration may park in the verification step until the emailed
    // code is accepted.
    while controller.pending().is_some() {
        let code = prompt("Verification code (blank to cancel, r to resend)")?;
        match code.as_str() {
            "" => {
                controller.cancel_verification();
                break;
            }
            "r" => controller.resend().await,
            code => controller.verify(code).await,
        }
    }
    Ok(())
}

async fn status(cache: &TokenCache, client: &Arc<HttpIdentityClient>) {
    client.restore().await;
    let snapshot = client.signal().snapshot();
    debug!(?snapshot, "restored snapshot");

    match intent_for(snapshot) {
        NavigationIntent::GoToApp => println!("signed in"),
        NavigationIntent::GoToSignIn => println!("signed out"),
        NavigationIntent::Loading => println!("unknown"),
    }

    if let Some(token) = cache.get_token(TokenKeys::SESSION).await {
        match classify(&token) {
            TokenShape::Claims { expires_at, expired } => {
                println!("session token: claims, expires_at={expires_at}, expired={expired}");
            }
            TokenShape::ThreeSegment => println!("session token: three-segment, no readable claims"),
            TokenShape::Opaque => println!("session token: opaque"),
        }
    }
}
