use std::time::Duration;

pub const RPC_PATH: &str = "/rpc";

/// Transactions per full block served by the fake node.
pub const SERVED_TX_COUNT: u64 = 3;

pub const MAX_WAIT: Duration = Duration::from_secs(5);
pub const SHORT_MAX_WAIT: Duration = Duration::from_millis(200);
