use std::io;

use thiserror::Error;

use crate::client::PollError;

/// Errors that end a dashboard session.
#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("terminal error: {0}")]
    Io(#[from] io::Error),

    #[error("could not create HTTP client: {0}")]
    Client(#[from] PollError),
}
