#![allow(dead_code)]

use mkt_core::{
    models::{PolyLine, Side},
    ports::{Diagnostics, RpcCall, RpcError},
};
use serde_json::Value;
use std::{collections::VecDeque, sync::Mutex};

/// How the fake coordinator answers the next call
pub enum Reply {
    Accept,
    Refuse(&'static str),
    Hang,
    Break,
}

/// A scripted stand-in for the market coordinator.
///
/// Replies are consumed in order; once the script runs out every call is
/// accepted.
#[derive(Default)]
pub struct FakeMarket {
    script: Mutex<VecDeque<Reply>>,
    pub calls: Mutex<Vec<(String, String, Vec<Value>)>>,
}

impl FakeMarket {
    pub fn scripted(replies: impl IntoIterator<Item = Reply>) -> Self {
        Self {
            script: Mutex::new(replies.into_iter().collect()),
            calls: Mutex::default(),
        }
    }

    pub fn calls(&self) -> Vec<(String, String, Vec<Value>)> {
        self.calls.lock().unwrap().clone()
    }
}

impl RpcCall for FakeMarket {
    fn call(
        &self,
        peer: &str,
        method: &str,
        args: Vec<Value>,
    ) -> impl Future<Output = Result<Value, RpcError>> + Send {
        self.calls
            .lock()
            .unwrap()
            .push((peer.to_owned(), method.to_owned(), args));
        let reply = self.script.lock().unwrap().pop_front().unwrap_or(Reply::Accept);

        async move {
            match reply {
                Reply::Accept => Ok(Value::Bool(true)),
                Reply::Refuse(message) => Err(RpcError::remote(message)),
                Reply::Hang => std::future::pending().await,
                Reply::Break => Err(RpcError::Transport("connection reset".into())),
            }
        }
    }
}

/// Diagnostics sink that keeps a line per event
#[derive(Default)]
pub struct Recorder(pub Mutex<Vec<String>>);

impl Recorder {
    pub fn lines(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

impl Diagnostics for Recorder {
    fn reservation_denied(&self, market_name: &str, side: Side, reason: &str) {
        self.0
            .lock()
            .unwrap()
            .push(format!("reservation denied {market_name} {side}: {reason}"));
    }

    fn offer_accepted(&self, market_name: &str, side: Side, curve: &PolyLine) {
        self.0
            .lock()
            .unwrap()
            .push(format!("offer made {market_name} {side}: {curve}"));
    }

    fn offer_rejected(&self, market_name: &str, side: Side, reason: Option<&str>) {
        self.0.lock().unwrap().push(format!(
            "offer rejected {market_name} {side}: {}",
            reason.unwrap_or_default()
        ));
    }
}

pub fn demand_curve() -> PolyLine {
    PolyLine::from_pairs([(0.0, 1000.0), (1000.0, 0.0)]).unwrap()
}

pub fn supply_curve() -> PolyLine {
    PolyLine::from_pairs([(0.0, 0.0), (1000.0, 1000.0)]).unwrap()
}
