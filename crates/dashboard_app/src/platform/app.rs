use std::io::{self, BufRead, Write};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use anyhow::Context;
use chrono::{DateTime, Local};
use dashboard_client::ReqwestApi;
use dashboard_core::{update, AppState, Msg};
use dashboard_logging::{dash_debug, dash_info, set_action_seq};

use super::cli::Cli;
use super::config::DashboardConfig;
use super::effects::EffectRunner;
use super::input::{parse_line, Command, HELP};
use super::{logging, ui};

/// Everything the UI loop reacts to.
pub(crate) enum Inbound {
    /// Typed gesture or timer reload; starts a new action number in the log.
    Action(Msg),
    /// Result coming back from the backend client.
    Client(Msg),
    Quit,
}

pub fn run_app(cli: Cli) -> anyhow::Result<()> {
    if cli.init_config {
        let mut config = DashboardConfig::default();
        if let Some(base_url) = cli.base_url {
            config.base_url = base_url;
        }
        let written = config.save(&cli.config)?;
        println!("Wrote default config to {}", written.display());
        return Ok(());
    }

    let mut config = DashboardConfig::load(&cli.config)?;
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }
    logging::initialize(&config, cli.log.map(Into::into))?;
    dash_info!("Dashboard starting against {}", config.base_url);

    let api = ReqwestApi::new(config.api_settings())?;
    let (tx, rx) = mpsc::channel::<Inbound>();
    let runner = EffectRunner::new(Arc::new(api), tx.clone())
        .context("failed to start the backend client")?;

    spawn_prompt(tx.clone())?;
    if let Some(interval) = config.refresh_interval() {
        spawn_refresh(interval, tx.clone())?;
    }
    // Initial table load counts as the first action.
    let _ = tx.send(Inbound::Action(Msg::ReloadRequested));
    drop(tx);

    let mut state = AppState::new();
    let mut loaded_at: Option<DateTime<Local>> = None;
    let mut action_seq = 0u64;

    while let Ok(inbound) = rx.recv() {
        let msg = match inbound {
            Inbound::Quit => break,
            Inbound::Action(msg) => {
                action_seq += 1;
                set_action_seq(action_seq);
                dash_debug!("Action {:?}", msg);
                msg
            }
            Inbound::Client(msg) => msg,
        };
        if matches!(msg, Msg::TableLoaded(_)) {
            loaded_at = Some(Local::now());
        }

        let (next, effects) = update(state, msg);
        state = next;
        runner.run(effects);

        if state.consume_dirty() {
            let mut stdout = io::stdout().lock();
            let _ = write!(stdout, "{}> ", ui::render::render(&state.view(), loaded_at));
            let _ = stdout.flush();
        }
    }

    dash_info!("Dashboard shutting down");
    Ok(())
}

fn spawn_prompt(tx: mpsc::Sender<Inbound>) -> io::Result<()> {
    thread::Builder::new()
        .name("prompt".to_string())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                match parse_line(&line) {
                    Ok(None) => {}
                    Ok(Some(Command::Help)) => println!("{HELP}"),
                    Ok(Some(Command::Quit)) => break,
                    Ok(Some(Command::Msg(msg))) => {
                        if tx.send(Inbound::Action(msg)).is_err() {
                            return;
                        }
                    }
                    Err(err) => eprintln!("{err}"),
                }
            }
            let _ = tx.send(Inbound::Quit);
        })?;
    Ok(())
}

fn spawn_refresh(interval: Duration, tx: mpsc::Sender<Inbound>) -> io::Result<()> {
    thread::Builder::new()
        .name("refresh".to_string())
        .spawn(move || loop {
            thread::sleep(interval);
            if tx.send(Inbound::Action(Msg::ReloadRequested)).is_err() {
                break;
            }
        })?;
    Ok(())
}
