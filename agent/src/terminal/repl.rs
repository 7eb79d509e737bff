//! Terminal input loop

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info, warn};

use crate::app::state::ConsoleSession;
use crate::deploy::fsm::RunnerState;
use crate::errors::ConsoleError;
use crate::models::panels::View;
use crate::terminal::render::{
    render_entry, render_log, render_preview, render_prompt, render_tabs, render_welcome, HELP,
};
use crate::terminal::ConsoleCommand;

/// Run the terminal view until `:quit`, end of input or the shutdown signal
pub async fn run<R, W>(
    session: Arc<ConsoleSession>,
    reader: R,
    writer: &mut W,
    mut shutdown_signal: Pin<Box<dyn Future<Output = ()> + Send>>,
) -> Result<(), ConsoleError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    info!("Terminal view starting...");

    // Subscribe before the first draw so no append slips between the two
    let mut changes = session.store().subscribe();
    let mut runner_state = session.runner().subscribe();
    runner_state.borrow_and_update();
    let mut lines = reader.lines();

    let mut printed = 0;
    writer.write_all(render_welcome().as_bytes()).await?;
    redraw(&session, writer, &mut printed).await?;

    loop {
        tokio::select! {
            _ = &mut shutdown_signal => {
                info!("Terminal view shutting down...");
                break;
            }
            change = changes.recv() => {
                match change {
                    Ok(_) => {}
                    Err(RecvError::Lagged(skipped)) => {
                        warn!("Terminal view lagged by {} entries", skipped);
                    }
                    Err(RecvError::Closed) => break,
                }
                if session.active_view() == View::Terminal {
                    print_new_entries(&session, writer, &mut printed).await?;
                }
            }
            changed = runner_state.changed() => {
                if changed.is_err() {
                    break;
                }
                // The last step lands before the runner goes idle
                let state = runner_state.borrow_and_update().state();
                if state == RunnerState::Idle && session.active_view() == View::Terminal {
                    writer.write_all(b"\r").await?;
                    writer
                        .write_all(render_prompt(session.is_running()).as_bytes())
                        .await?;
                    writer.flush().await?;
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    debug!("End of input");
                    break;
                };
                match ConsoleCommand::parse(&line) {
                    ConsoleCommand::Quit => break,
                    ConsoleCommand::Help => {
                        writer.write_all(format!("{}\n", HELP).as_bytes()).await?;
                    }
                    ConsoleCommand::SwitchView(view) => {
                        session.select_view(view);
                        redraw(&session, writer, &mut printed).await?;
                    }
                    ConsoleCommand::Submit(text) => {
                        // Rejections stay silent; accepted runs show up through `changes`
                        let submission = session.submit(&text);
                        debug!("Submission: {:?}", submission);
                    }
                }
                writer
                    .write_all(render_prompt(session.is_running()).as_bytes())
                    .await?;
                writer.flush().await?;
            }
        }
    }

    writer.write_all(b"\n").await?;
    writer.flush().await?;
    Ok(())
}

/// Draw the active tab from scratch
async fn redraw<W>(
    session: &ConsoleSession,
    writer: &mut W,
    printed: &mut usize,
) -> Result<(), ConsoleError>
where
    W: AsyncWrite + Unpin,
{
    let view = session.active_view();
    writer.write_all(render_tabs(view).as_bytes()).await?;
    match view {
        View::Terminal => {
            let entries = session.entries();
            writer.write_all(render_log(&entries).as_bytes()).await?;
            *printed = entries.len();
        }
        View::Preview => {
            writer.write_all(render_preview().as_bytes()).await?;
        }
    }
    writer
        .write_all(render_prompt(session.is_running()).as_bytes())
        .await?;
    writer.flush().await?;
    Ok(())
}

/// Append entries the view has not shown yet
async fn print_new_entries<W>(
    session: &ConsoleSession,
    writer: &mut W,
    printed: &mut usize,
) -> Result<(), ConsoleError>
where
    W: AsyncWrite + Unpin,
{
    let entries = session.entries();
    if entries.len() <= *printed {
        return Ok(());
    }
    writer.write_all(b"\n").await?;
    for entry in &entries[*printed..] {
        writer.write_all(render_entry(entry).as_bytes()).await?;
    }
    *printed = entries.len();
    writer
        .write_all(render_prompt(session.is_running()).as_bytes())
        .await?;
    writer.flush().await?;
    Ok(())
}
