use std::sync::LazyLock;
use std::time::Instant;

pub mod config;
pub mod gsf_optimizer;
pub mod io;
pub mod opt;

pub static EPOCH: LazyLock<Instant> = LazyLock::new(Instant::now);
