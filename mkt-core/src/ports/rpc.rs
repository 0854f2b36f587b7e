use serde_json::Value;

/// The call mechanism a participant uses to reach the market coordinator.
///
/// An implementation sends `method` with positional `args` to the agent
/// identified by `peer` and resolves once that agent answers. Addressing,
/// authentication and the encoding of the call are the implementation's
/// business.
///
/// The returned future may never resolve; callers are expected to bound it
/// with their own deadline.
pub trait RpcCall: Send + Sync {
    /// Invoke a remote method and wait for its answer
    fn call(
        &self,
        peer: &str,
        method: &str,
        args: Vec<Value>,
    ) -> impl Future<Output = Result<Value, RpcError>> + Send;
}

/// Failures an `RpcCall` implementation can report
#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    /// The remote method ran and refused the request
    #[error("remote error: {message}")]
    Remote {
        /// The explanation given by the remote agent
        message: String,
    },
    /// The call could not be delivered or its answer could not be read
    #[error("transport failure: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl RpcError {
    /// Convenience constructor for a remote refusal
    pub fn remote(message: impl Into<String>) -> Self {
        Self::Remote {
            message: message.into(),
        }
    }
}

impl<T: RpcCall> RpcCall for &T {
    fn call(
        &self,
        peer: &str,
        method: &str,
        args: Vec<Value>,
    ) -> impl Future<Output = Result<Value, RpcError>> + Send {
        (**self).call(peer, method, args)
    }
}

impl<T: RpcCall> RpcCall for std::sync::Arc<T> {
    fn call(
        &self,
        peer: &str,
        method: &str,
        args: Vec<Value>,
    ) -> impl Future<Output = Result<Value, RpcError>> + Send {
        (**self).call(peer, method, args)
    }
}
