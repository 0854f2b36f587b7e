mod diagnostics;
mod rpc;

pub use diagnostics::Diagnostics;
pub use rpc::{RpcCall, RpcError};
