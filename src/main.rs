use anyhow::Result;

use league_standings::cli::Command;
use league_standings::{
    handle_backtest, handle_completions, handle_export, handle_predict, handle_serve,
    handle_setup, handle_standings, handle_teardown, handle_update, interpret,
};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    execute_command(&command)
}

fn execute_command(command: &Command) -> Result<()> {
    match command {
        Command::Setup { schedule } => handle_setup(schedule.clone()),
        Command::Update { force, mode } => handle_update(*force, *mode),
        Command::Standings => handle_standings(),
        Command::Predict { home, visitor } => handle_predict(home, visitor),
        Command::Backtest {
            from,
            to,
            mode,
            schedule,
        } => handle_backtest(*from, *to, *mode, schedule.clone()),
        Command::Export { output } => handle_export(output),
        Command::Teardown => handle_teardown(),
        Command::Serve { port } => handle_serve(*port),
        Command::Completions { shell } => handle_completions(*shell),
    }
}
