//! Capture command: headless sign-in session that records the cookies a site sets.

use anyhow::{Context, Result, anyhow};
use cookie_capture::{HttpWebEngine, LoginSession, PageEvent, WebEngine, extract_domain};
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::cli::CaptureArgs;
use crate::commands::output::write_cookies;
use crate::settings::Settings;

const PAGE_EVENT_BUFFER: usize = 32;

pub async fn run_capture_command(args: &CaptureArgs, settings: &Settings) -> Result<()> {
    let (events_tx, events_rx) = mpsc::channel(PAGE_EVENT_BUFFER);
    let engine = HttpWebEngine::new(settings.user_agent.clone(), settings.timeouts, events_tx.clone())
        .context("Failed to start web engine")?;

    let session = LoginSession::new(args.url.clone(), engine.cookie_jar())
        .with_user_agent(engine.user_agent())
        .on_dismiss(|captured| {
            info!(
                title = %captured.title,
                cookies = captured.cookies.len(),
                "Sign-in page closed"
            );
        });
    let session_task = tokio::spawn(session.run(events_rx));

    let load_result = engine.load(&args.url).await;

    // Dismiss after the load so every page event is processed first.
    if events_tx.send(PageEvent::Dismissed).await.is_err() {
        warn!("login session ended before dismissal");
    }
    drop(events_tx);
    drop(engine);

    let captured = session_task
        .await
        .map_err(|error| anyhow!("Login session task failed: {error}"))?;
    load_result.with_context(|| format!("Failed to load '{}'", args.url))?;

    if captured.cookies.is_empty() {
        warn!(domain = %extract_domain(&args.url), "Site set no cookies");
    }

    write_cookies(&captured.cookies, settings.format, args.output.output.as_deref())?;

    if let Some(user_agent) = &captured.user_agent {
        info!(%user_agent, "Reuse this User-Agent with the captured cookies");
    }

    Ok(())
}
