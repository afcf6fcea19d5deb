pub mod backtest;
pub mod prediction;
pub mod recorder;
pub mod report;
pub mod server;
pub mod setup;
pub mod update;
