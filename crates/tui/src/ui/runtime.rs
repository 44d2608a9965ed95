//! Runtime: terminal lifecycle and the event loop for the request form.
//!
//! - A dedicated input thread blocks on crossterm and forwards events over a
//!   tokio channel.
//! - The loop selects over input, Ctrl+C, and a sleep until the popup's next
//!   reflow deadline, so nothing wakes up while the form is idle.
//! - Frames are drawn only after something changed.
use std::io::Stdout;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, prelude::*};
use stockpick_util::SettingsStore;
use tokio::{signal, sync::mpsc, time};
use tracing::{debug, warn};

use crate::form::{FormAction, FormSubmission, RequestForm, StatusLine};
use crate::ui::form_view;
use crate::ui::theme::LoadedTheme;

type FormTerminal = Terminal<CrosstermBackend<Stdout>>;

const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Spawn the input thread. It exits once the receiver is dropped.
fn spawn_input_thread() -> mpsc::Receiver<Event> {
    let (sender, receiver) = mpsc::channel(256);
    thread::spawn(move || {
        while !sender.is_closed() {
            match event::poll(INPUT_POLL_INTERVAL) {
                Ok(false) => continue,
                Ok(true) => {}
                Err(error) => {
                    warn!(%error, "failed to poll terminal input");
                    break;
                }
            }
            match event::read() {
                Ok(event) => {
                    if sender.blocking_send(event).is_err() {
                        break;
                    }
                }
                Err(error) => {
                    warn!(%error, "failed to read terminal input");
                    break;
                }
            }
        }
    });
    receiver
}

/// Put the terminal into raw mode and enter the alternate screen.
fn setup_terminal() -> Result<FormTerminal> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

/// Restore terminal settings and leave the alternate screen.
fn cleanup_terminal(terminal: &mut FormTerminal) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    Ok(())
}

fn render(terminal: &mut FormTerminal, form: &mut RequestForm, theme: &LoadedTheme) -> Result<()> {
    terminal.draw(|frame| form_view::draw(frame, form, theme.theme.as_ref()))?;
    Ok(())
}

fn is_ctrl_c(event: &Event) -> bool {
    matches!(event, Event::Key(key) if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Runs the form until it is submitted or abandoned.
///
/// The terminal is restored on every exit path, including errors raised
/// inside the loop.
pub async fn run_form(mut form: RequestForm, mut theme: LoadedTheme, settings: &SettingsStore) -> Result<Option<FormSubmission>> {
    let mut input_receiver = spawn_input_thread();
    let mut terminal = setup_terminal().context("preparing the terminal")?;

    let outcome = event_loop(&mut terminal, &mut input_receiver, &mut form, &mut theme, settings).await;
    cleanup_terminal(&mut terminal).context("restoring the terminal")?;
    outcome
}

async fn event_loop(
    terminal: &mut FormTerminal,
    input_receiver: &mut mpsc::Receiver<Event>,
    form: &mut RequestForm,
    theme: &mut LoadedTheme,
    settings: &SettingsStore,
) -> Result<Option<FormSubmission>> {
    let size = terminal.size()?;
    form.apply_layout(Rect::new(0, 0, size.width, size.height));
    render(terminal, form, theme)?;

    loop {
        let deadline = form.next_deadline();
        let mut needs_render = false;
        tokio::select! {
            maybe_event = input_receiver.recv() => {
                let Some(event) = maybe_event else {
                    debug!("input channel closed");
                    return Ok(None);
                };
                if is_ctrl_c(&event) {
                    return Ok(None);
                }
                match form.handle_event(event, Instant::now()) {
                    FormAction::None => {}
                    FormAction::Redraw => needs_render = true,
                    FormAction::CycleTheme => {
                        *theme = LoadedTheme::from(theme.choice.next());
                        if let Err(error) = settings.set_preferred_theme(Some(theme.choice.id().to_string())) {
                            warn!(%error, "failed to persist theme preference");
                        }
                        form.set_status(StatusLine::Info(format!("Theme: {}", theme.choice.label())));
                        needs_render = true;
                    }
                    FormAction::Submit(submission) => return Ok(Some(submission)),
                    FormAction::Quit => return Ok(None),
                }
            }

            // The deadline future is built even while disabled, hence the fallback.
            _ = time::sleep_until(time::Instant::from_std(deadline.unwrap_or_else(Instant::now))), if deadline.is_some() => {
                needs_render = form.tick(Instant::now());
            }

            _ = signal::ctrl_c() => return Ok(None),
        }

        if needs_render {
            render(terminal, form, theme)?;
        }
    }
}
