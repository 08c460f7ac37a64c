mod app;
mod cards;
mod config;
mod logging;

use std::io::Stdout;
use std::time::Duration;

use anyhow::Context;
use anyhow::Result;
use clap::Parser;
use counter_anim::Locale;
use crossterm::event;
use crossterm::event::Event;
use crossterm::event::KeyCode;
use crossterm::event::KeyEventKind;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use metrics_poller::PollerConfig;
use metrics_poller::ValuePoller;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio_util::sync::CancellationToken;

use crate::app::DashboardApp;
use crate::config::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let _guard = logging::init(&cli.log_dir);

    tracing::info!(endpoint = %cli.endpoint_url, "Starting pulseboard");

    let locale = Locale::from_name(&cli.locale)
        .map_err(|_| anyhow::anyhow!("unknown locale: {}", cli.locale))?;

    let mut poller_config =
        PollerConfig::new(&cli.endpoint_url).with_poll_interval(cli.poll_interval());
    if let Some(token) = &cli.token {
        poller_config = poller_config.with_bearer_token(token);
    }

    let poller = ValuePoller::new(poller_config)
        .map_err(|report| anyhow::anyhow!("failed to create poller: {report}"))?;
    let state_rx = poller.subscribe();

    let cancel = CancellationToken::new();
    let poll_cancel = cancel.clone();
    tokio::spawn(async move { poller.run(poll_cancel).await });

    let mut app = DashboardApp::new(state_rx, cli.animation_duration(), locale, &cancel);

    let mut terminal = setup_terminal()?;
    let result = run_ui_loop(&mut terminal, &mut app).await;
    restore_terminal(&mut terminal)?;

    // stops the poller and every counter frame loop
    cancel.cancel();

    tracing::info!("pulseboard stopped");
    result
}

async fn run_ui_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut DashboardApp,
) -> Result<()> {
    loop {
        app.sync_targets();
        terminal.draw(|frame| app.render(frame))?;

        if event::poll(Duration::from_millis(33))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press
                    && matches!(key.code, KeyCode::Char('q') | KeyCode::Esc)
                {
                    return Ok(());
                }
            }
        }
    }
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    crossterm::terminal::enable_raw_mode().context("enable raw mode")?;
    let mut stdout = std::io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen).context("enter alternate screen")?;
    Terminal::new(CrosstermBackend::new(stdout)).context("create terminal")
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    crossterm::terminal::disable_raw_mode().context("disable raw mode")?;
    crossterm::execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("leave alternate screen")?;
    terminal.show_cursor().context("show cursor")?;
    Ok(())
}
