//! A TUI for booking appointments from the terminal

/// The "functional core" to the main module's "imperative shell"
mod app;

/// Configuration and argument parsing
mod config;

/// Form field rotation
mod form_fields;

use app::{App, EffectContext};
use clap::Parser;
use crossterm::event::{Event, EventStream};
use futures::StreamExt;
use ratatui::DefaultTerminal;
use std::{io, process::ExitCode, sync::Arc};
use tokio::{
    sync::mpsc::{unbounded_channel, UnboundedSender},
    task::JoinHandle,
};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> io::Result<ExitCode> {
    let config = config::Config::parse();

    let _guard = init_tracing(&config);

    let mut terminal = ratatui::init();
    terminal.clear()?;
    let res = run(terminal, Arc::new(config)).await;
    ratatui::restore();
    res
}

/// Send tracing output to a file in the data directory. The terminal belongs
/// to ratatui while we run, so logs can't go to stdout.
fn init_tracing(config: &config::Config) -> WorkerGuard {
    let appender = tracing_appender::rolling::never(config.data_dir(), "visita.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false),
        )
        .init();

    guard
}

/// Manage the lifecycle of the app
async fn run(mut terminal: DefaultTerminal, config: Arc<config::Config>) -> io::Result<ExitCode> {
    let mut app = App::new();

    let context = Arc::new(EffectContext::new());

    // Side-effectful behavior (network and disk access) happens in spawned
    // tasks whose results come back over this channel. We keep the handles
    // so we can drain them on exit.
    let (effect_tx, mut effect_rx) = unbounded_channel();
    let mut outstanding_effects = Vec::with_capacity(1);

    // Initialize the app, then render the first frame. Rendering after the
    // spawn means anything `app.init` settles synchronously shows up in the
    // first draw.
    outstanding_effects.push(spawn_effect_task(
        effect_tx.clone(),
        Arc::clone(&context),
        Arc::clone(&config),
        app.init(),
    ));
    terminal.draw(|frame| app.render(frame))?;

    let mut event_stream = EventStream::new();

    // Start our event loop!
    loop {
        // Wait for the next thing to happen: external input or the async
        // result of an effect. This is an `Option<_>` because not every
        // terminal event concerns us.
        let next_action_opt = tokio::select! {
            event_opt = event_stream.next() => {
                match event_opt {
                    Some(Ok(Event::Key(key_event))) => {
                        Some(app::Action::Key(key_event))
                    }
                    Some(Err(err)) => {
                        Some(app::Action::Problem(err.to_string()))
                    }
                    _ => None,
                }
            },

            action_opt = effect_rx.recv() => {
                action_opt
            }
        };

        // Actions go through `app.handle`, which may queue further effects.
        // Those get spawned the same way init's effect was.
        if let Some(action) = next_action_opt {
            for effect in app.handle(action) {
                outstanding_effects.push(spawn_effect_task(
                    effect_tx.clone(),
                    Arc::clone(&context),
                    Arc::clone(&config),
                    effect,
                ));
            }
        }

        // Re-render to display whatever just changed.
        terminal.draw(|frame| app.render(frame))?;

        // Drop completed `JoinHandle`s. The list never gets long (we prune on
        // every pass through the loop) so the full scan is fine.
        outstanding_effects.retain(|handle| !handle.is_finished());

        // If the app wants to exit, wait for outstanding effects (e.g. the
        // auth save) to finish before we tear the terminal down.
        if let Some(code) = app.should_exit() {
            for effect in outstanding_effects.drain(..) {
                let _ = effect.await;
            }

            return Ok(code);
        }
    }
}

/// Spawn a task to run an effect and send the next action to the app.
fn spawn_effect_task(
    effect_tx: UnboundedSender<app::Action>,
    context: Arc<EffectContext>,
    config: Arc<config::Config>,
    effect: app::Effect,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        if let Some(next_action) = effect.run(&context, &config).await {
            // The channel only closes during shutdown, and dropping an
            // action is fine then.
            let _ = effect_tx.send(next_action);
        }
    })
}
