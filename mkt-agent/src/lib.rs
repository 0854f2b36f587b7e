#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

pub mod config;
pub use config::{AgentConfig, ProxyConfig};

mod diagnostics;
pub use diagnostics::TracingDiagnostics;

mod participation;
pub use participation::{Participation, ParticipationError};

mod proxy;
pub use proxy::{OfferOutcome, PLATFORM_MARKET_SERVICE, ProxyError, RpcProxy};
