//! Roster client entry-point: loads settings, wires adapters, runs a command.

use std::ffi::OsString;
use std::io;
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Result, eyre};
use mockable::DefaultClock;
use ortho_config::OrthoConfig;
use reqwest::cookie::Jar;
use tracing::{debug, warn};
use tracing_subscriber::{EnvFilter, fmt};

use roster_client::ClientSettings;
use roster_client::domain::ports::{ConfirmationPrompt, FixedConfirmation};
use roster_client::domain::{StudentListConfig, StudentListController, StudentListPorts};
use roster_client::inbound::cli::{Cli, LineConfirmation, TerminalNotificationSink, execute};
use roster_client::outbound::http::{HttpGatewayOptions, ReqwestStudentGateway};
use roster_client::outbound::notifications::ToastBoard;
use roster_client::outbound::token::CookieJarTokenSource;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let cli = Cli::parse();
    let settings = ClientSettings::load_from_iter([OsString::from("roster")])
        .map_err(|error| eyre!("failed to load configuration: {error}"))?;

    let base_url = settings.server_url()?;
    let jar = Arc::new(Jar::default());
    if let Some(cookie) = settings.session_cookie()? {
        jar.add_cookie_str(cookie, &base_url);
        debug!("seeded session cookie");
    }
    let tokens = Arc::new(CookieJarTokenSource::new(
        Arc::clone(&jar),
        base_url.clone(),
        settings.token_cookie(),
    ));
    let gateway = ReqwestStudentGateway::new(
        &base_url,
        jar,
        tokens,
        HttpGatewayOptions {
            token_header: settings.token_header()?,
            timeout: settings.request_timeout(),
        },
    )?;

    let board = Arc::new(ToastBoard::new(
        Arc::new(DefaultClock),
        settings.toast_duration(),
    ));
    let notifications = Arc::new(TerminalNotificationSink::new(
        Arc::clone(&board),
        !cli.command.is_live(),
    ));
    let confirmation: Arc<dyn ConfirmationPrompt> = if cli.command.assumes_yes() {
        Arc::new(FixedConfirmation(true))
    } else {
        Arc::new(LineConfirmation::terminal())
    };
    let controller = StudentListController::new(
        StudentListPorts::new(Arc::new(gateway), notifications, confirmation),
        StudentListConfig::default(),
    );

    let mut stdout = io::stdout().lock();
    execute(&cli.command, &controller, &board, &mut stdout).await?;
    Ok(())
}
