//! Graceful shutdown

use std::{fmt, io, time::Duration};

use salvo::server::ServerHandle;
use thiserror::Error;
use tokio::signal;
use tracing::info;

#[derive(Debug, Error)]
pub(crate) enum ShutdownSignalError {
    #[error("failed to install {signal} handler: {source}")]
    Install {
        signal: ShutdownSignal,
        #[source]
        source: io::Error,
    },
}

/// Which signal asked the server to stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ShutdownSignal {
    Interrupt,
    Terminate,
}

impl fmt::Display for ShutdownSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Interrupt => "interrupt",
            Self::Terminate => "terminate",
        })
    }
}

fn install_error(signal: ShutdownSignal) -> impl FnOnce(io::Error) -> ShutdownSignalError {
    move |source| ShutdownSignalError::Install { signal, source }
}

async fn interrupt() -> Result<ShutdownSignal, ShutdownSignalError> {
    signal::ctrl_c()
        .await
        .map_err(install_error(ShutdownSignal::Interrupt))?;

    Ok(ShutdownSignal::Interrupt)
}

#[cfg(unix)]
async fn terminate() -> Result<ShutdownSignal, ShutdownSignalError> {
    signal::unix::signal(signal::unix::SignalKind::terminate())
        .map_err(install_error(ShutdownSignal::Terminate))?
        .recv()
        .await;

    Ok(ShutdownSignal::Terminate)
}

#[cfg(windows)]
async fn terminate() -> Result<ShutdownSignal, ShutdownSignalError> {
    signal::windows::ctrl_close()
        .map_err(install_error(ShutdownSignal::Terminate))?
        .recv()
        .await;

    Ok(ShutdownSignal::Terminate)
}

/// Wait for a stop signal, then drain requests for at most `grace`.
pub(crate) async fn listen(handle: ServerHandle, grace: Duration) -> Result<(), ShutdownSignalError> {
    let received = tokio::select! {
        result = interrupt() => result?,
        result = terminate() => result?,
    };

    info!(signal = %received, grace_seconds = grace.as_secs(), "shutting down");

    handle.stop_graceful(Some(grace));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn install_errors_name_the_signal() {
        let error = install_error(ShutdownSignal::Terminate)(io::Error::other("denied"));

        assert_eq!(error.to_string(), "failed to install terminate handler: denied");
    }
}
