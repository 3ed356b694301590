use std::process::ExitCode;
use std::time::Duration;

use chessh::prelude::*;
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "chessh-dev", about = "Development tools for the CheSSH front shell")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve the /api dev proxy in front of the backend
    Proxy(ProxyArgs),
    /// Open the post-login landing page and print what it shows
    Whoami(WhoamiArgs),
}

#[derive(Debug, Args)]
struct ProxyArgs {
    /// Address to listen on
    #[arg(long, value_name = "ADDR", default_value = "127.0.0.1:3000")]
    bind: String,
    /// Backend origin that /api requests are forwarded to
    #[arg(long, value_name = "URL", env = "CHESSH_BACKEND", default_value = "http://localhost:8080")]
    target: String,
    /// Build mode; only `production` disables the proxy
    #[arg(long, value_name = "MODE", env = "CHESSH_MODE", default_value = "development")]
    mode: BuildMode,
}

#[derive(Debug, Args)]
struct WhoamiArgs {
    /// Origin the front end is served from
    #[arg(long, value_name = "URL", env = "CHESSH_ORIGIN", default_value = "http://localhost:3000")]
    origin: String,
    /// Session cookie to send, as `name=value`
    #[arg(long, value_name = "COOKIE")]
    cookie: Option<String>,
    /// GitHub OAuth URL for the login link
    #[arg(
        long,
        value_name = "URL",
        env = "CHESSH_GITHUB_OAUTH",
        default_value = "https://github.com/login/oauth/authorize"
    )]
    oauth_url: String,
    /// Give up on the identity request after this many seconds
    #[arg(long, value_name = "SECONDS")]
    timeout: Option<u64>,
    /// Print the page as HTML instead of plain text
    #[arg(long)]
    html: bool,
}

impl WhoamiArgs {
    fn frontend_config(&self) -> FrontendConfig {
        FrontendConfig {
            identity: HttpIdentityConfig {
                origin: self.origin.clone(),
                session_cookie: self.cookie.clone(),
                request_timeout: self.timeout.map(Duration::from_secs),
            },
            github_oauth_url: self.oauth_url.clone(),
            ..FrontendConfig::default()
        }
    }
}

impl ProxyArgs {
    fn frontend_config(&self) -> FrontendConfig {
        FrontendConfig {
            proxy: ProxyConfig {
                bind: self.bind.clone(),
                target: self.target.clone(),
                mode: self.mode,
                ..ProxyConfig::default()
            },
            ..FrontendConfig::default()
        }
    }
}

async fn proxy(args: ProxyArgs) -> Result<(), ChesshError> {
    let proxy = args.frontend_config().dev_proxy().await?;
    proxy.run().await?;
    Ok(())
}

/// Returns `false` if the identity request failed.
async fn whoami(args: WhoamiArgs) -> Result<bool, ChesshError> {
    let mut app = Frontend::from_config(&args.frontend_config())?;
    app.navigate(Route::AuthSuccessful);
    let status = app.landing_settled().await;

    let page = app.render();
    if args.html {
        println!("{page}");
    } else {
        println!("{}", page.text_content());
    }

    match status {
        Some(ResolutionStatus::Failed(reason)) => {
            tracing::error!(%reason, "could not resolve session");
            Ok(false)
        }
        _ => Ok(true),
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode, ChesshError> {
    chessh::logging::init("info");

    match Cli::parse().command {
        Command::Proxy(args) => proxy(args).await?,
        Command::Whoami(args) => {
            if !whoami(args).await? {
                return Ok(ExitCode::FAILURE);
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}
