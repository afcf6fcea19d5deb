pub mod backtest;
pub mod schedule;

pub use backtest::{write_results, BacktestRow};
pub use schedule::{read_schedule, write_schedule};
