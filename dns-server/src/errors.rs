use std::{io, net::SocketAddr, time::Duration};

use dns_lib::{
    resource_record::rcode::RCode,
    serde::wire::{read_wire::ReadWireError, write_wire::WriteWireError},
};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    FileRead(String, String),

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Configuration validation error: {0}")]
    Validation(String),
}

/// Failures talking to the upstream resolver. None of them produce a reply for the client.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("{source} when exchanging with upstream {address}")]
    Io {
        address: SocketAddr,
        #[source]
        source: io::Error,
    },

    #[error("expected to send {expected} bytes to upstream {address} but sent {sent}")]
    IncorrectNumberBytes {
        address: SocketAddr,
        expected: usize,
        sent: usize,
    },

    #[error("no reply from upstream {address} within {timeout:?}")]
    Timeout {
        address: SocketAddr,
        timeout: Duration,
    },
}

/// Everything that can end a single client exchange. An error here never stops the server.
#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    #[error("malformed message: {0}")]
    MalformedMessage(#[from] ReadWireError),

    #[error("could not serialize response: {0}")]
    Serialization(#[from] WriteWireError),

    #[error("upstream unavailable: {0}")]
    UpstreamUnavailable(#[from] UpstreamError),

    #[error("upstream could not resolve the query: rcode {rcode} with {questions} question(s) and {answers} answer(s)")]
    NameResolutionFailed {
        rcode: RCode,
        questions: usize,
        answers: usize,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
