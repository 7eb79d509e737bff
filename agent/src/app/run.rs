//! Main application run loop

use std::future::Future;
use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncWrite};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::app::options::{AppOptions, LifecycleOptions};
use crate::app::state::ConsoleSession;
use crate::errors::ConsoleError;
use crate::server::serve::serve;
use crate::server::state::ServerState;
use crate::terminal::repl;

/// Run the console: start a session, serve it if enabled and drive the
/// terminal view until it ends or `shutdown_signal` resolves.
pub async fn run<R, W>(
    options: AppOptions,
    reader: R,
    mut writer: W,
    shutdown_signal: impl Future<Output = ()> + Send + 'static,
) -> Result<(), ConsoleError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    info!("Initializing AutoDeploy console...");

    let (shutdown_tx, _shutdown_rx): (broadcast::Sender<()>, _) = broadcast::channel(1);
    let mut shutdown_manager =
        ShutdownManager::new(shutdown_tx.clone(), options.lifecycle.clone());

    let session = match init(&options, &shutdown_tx, &mut shutdown_manager).await {
        Ok(session) => session,
        Err(e) => {
            error!("Failed to start console: {}", e);
            shutdown_manager.shutdown().await?;
            return Err(e);
        }
    };

    let result = repl::run(session, reader, &mut writer, Box::pin(shutdown_signal)).await;
    if let Err(e) = &result {
        error!("Terminal view failed: {}", e);
    }

    drop(shutdown_tx);
    shutdown_manager.shutdown().await?;
    result
}

// =============================== INITIALIZATION ================================== //

async fn init(
    options: &AppOptions,
    shutdown_tx: &broadcast::Sender<()>,
    shutdown_manager: &mut ShutdownManager,
) -> Result<Arc<ConsoleSession>, ConsoleError> {
    let session = Arc::new(ConsoleSession::start(options.session.clone()));
    shutdown_manager.with_session(session.clone())?;

    if options.enable_socket_server {
        init_socket_server(
            options,
            session.clone(),
            shutdown_manager,
            shutdown_tx.subscribe(),
        )
        .await?;
    }

    Ok(session)
}

async fn init_socket_server(
    options: &AppOptions,
    session: Arc<ConsoleSession>,
    shutdown_manager: &mut ShutdownManager,
    mut shutdown_rx: broadcast::Receiver<()>,
) -> Result<(), ConsoleError> {
    info!("Initializing local HTTP server...");

    let server_state = ServerState::new(session);

    let server_handle = serve(&options.server, Arc::new(server_state), async move {
        let _ = shutdown_rx.recv().await;
    })
    .await?;

    shutdown_manager.with_socket_server_handle(server_handle)?;
    Ok(())
}

// ================================= SHUTDOWN ===================================== //

struct ShutdownManager {
    shutdown_tx: broadcast::Sender<()>,
    lifecycle_options: LifecycleOptions,
    session: Option<Arc<ConsoleSession>>,
    socket_server_handle: Option<JoinHandle<Result<(), ConsoleError>>>,
}

impl ShutdownManager {
    pub fn new(shutdown_tx: broadcast::Sender<()>, lifecycle_options: LifecycleOptions) -> Self {
        Self {
            shutdown_tx,
            lifecycle_options,
            session: None,
            socket_server_handle: None,
        }
    }

    pub fn with_session(&mut self, session: Arc<ConsoleSession>) -> Result<(), ConsoleError> {
        if self.session.is_some() {
            return Err(ConsoleError::ShutdownError("session already set".to_string()));
        }
        self.session = Some(session);
        Ok(())
    }

    pub fn with_socket_server_handle(
        &mut self,
        handle: JoinHandle<Result<(), ConsoleError>>,
    ) -> Result<(), ConsoleError> {
        if self.socket_server_handle.is_some() {
            return Err(ConsoleError::ShutdownError("server_handle already set".to_string()));
        }
        self.socket_server_handle = Some(handle);
        Ok(())
    }

    pub async fn shutdown(&mut self) -> Result<(), ConsoleError> {
        let _ = self.shutdown_tx.send(());

        let max_delay = self.lifecycle_options.max_shutdown_delay;
        match tokio::time::timeout(max_delay, self.shutdown_impl()).await {
            Ok(result) => result,
            Err(_) => {
                error!("Shutdown timed out after {:?}", max_delay);
                Err(ConsoleError::ShutdownError(format!(
                    "timed out after {:?}",
                    max_delay
                )))
            }
        }
    }

    async fn shutdown_impl(&mut self) -> Result<(), ConsoleError> {
        info!("Shutting down AutoDeploy console...");

        // 1. Session, so no playback outlives the views
        if let Some(session) = self.session.take() {
            session.dispose();
        }

        // 2. Socket server
        if let Some(handle) = self.socket_server_handle.take() {
            handle
                .await
                .map_err(|e| ConsoleError::ShutdownError(e.to_string()))??;
        }

        info!("Shutdown complete");
        Ok(())
    }
}
