// Interactive terminal front end
use crate::application::dashboard_sync::DashboardSync;
use crate::presentation::render::{Action, RenderedView};
use futures::StreamExt;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio_stream::wrappers::WatchStream;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Trigger,
    Quit,
    Unknown,
}

impl Command {
    pub fn parse(input: &str) -> Self {
        match input.trim().to_ascii_lowercase().as_str() {
            "" | "r" | "retry" | "refresh" => Command::Trigger,
            "q" | "quit" | "exit" => Command::Quit,
            _ => Command::Unknown,
        }
    }
}

/// Run the dashboard on stdin/stdout until the user quits.
pub async fn run(sync: DashboardSync) -> anyhow::Result<()> {
    let stdin = BufReader::new(tokio::io::stdin());
    run_with(sync, stdin, std::io::stdout()).await
}

pub async fn run_with<R, W>(sync: DashboardSync, input: R, mut out: W) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut screen = WatchStream::new(sync.subscribe());
    let mut lines = input.lines();
    let mut offered: Option<Action> = None;

    spawn_refresh(&sync);

    loop {
        tokio::select! {
            biased;

            Some(state) = screen.next() => {
                let view = RenderedView::from_state(&state);
                offered = view.action();
                writeln!(out, "{}", "-".repeat(40))?;
                write!(out, "{}", view)?;
                out.flush()?;
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                match Command::parse(&line) {
                    Command::Quit => break,
                    Command::Trigger if sync.current_state().is_loading() => {
                        tracing::debug!("Refresh already in progress");
                    }
                    Command::Trigger => {
                        tracing::debug!(action = offered.map(Action::label), "User triggered refresh");
                        spawn_refresh(&sync);
                    }
                    Command::Unknown => {
                        writeln!(out, "Unknown command {:?}; use r or q", line.trim())?;
                        out.flush()?;
                    }
                }
            }
        }
    }

    if let Some(message) = sync.current_state().error_message() {
        tracing::info!(message, "Leaving dashboard after a failed refresh");
    }
    Ok(())
}

fn spawn_refresh(sync: &DashboardSync) {
    let sync = sync.clone();
    tokio::spawn(async move {
        let outcome = sync.refresh().await;
        tracing::debug!(?outcome, "Refresh finished");
    });
}
