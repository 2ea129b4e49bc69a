use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tinybank::{
    accounts::{csv::AccountsCsvWriter, AccountId},
    clients::ClientId,
    commands::{self, csv::CsvCommandsReader, csv::NextError},
    facade::Bank,
    menu,
    notify::{Console, Log, Notifier},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEMO_SCRIPT: &str = include_str!("../demos/three_clients.csv");

/// Replays bank scripts against an in-memory ledger
#[derive(Parser)]
#[command(name = "tinybank", version, about)]
struct Cli {
    /// Send transaction notices to the log instead of stdout; denials still
    /// show on stderr at the default warn level
    #[arg(long, short, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Replay a script and print the resulting balances as CSV
    Run {
        /// Script with one command per line
        input: PathBuf,
    },
    /// Replay the built-in three-client scenario
    Demo,
    /// Interactive menu, optionally preloaded from a script
    Shell {
        /// Script to replay before the menu starts
        input: Option<PathBuf>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    if let Err(error) = run(cli).await {
        eprintln!("{}", error);
        std::process::exit(1);
    }
}

#[derive(Debug, thiserror::Error)]
enum RunError {
    #[error("{0}: {1}")]
    IO(PathBuf, std::io::Error),
    #[error("failed to write output: {0}")]
    Output(std::io::Error),
}

async fn run(cli: Cli) -> Result<(), RunError> {
    let notifier: Box<dyn Notifier> = if cli.quiet {
        Box::new(Log)
    } else {
        Box::new(Console::from_writer(std::io::stdout()))
    };
    let mut bank = Bank::with_notifier(notifier);

    match cli.command {
        Command::Run { input } => {
            let script = read_file(&input).await?;
            commands::replay(&mut bank, &script);
            print_balances(&bank)?;
        }
        Command::Demo => {
            let script = read_script(DEMO_SCRIPT.as_bytes())
                .await
                .map_err(|error| RunError::IO(PathBuf::from("<demo>"), error))?;
            commands::replay(&mut bank, &script);
            print_balances(&bank)?;
        }
        Command::Shell { input } => {
            if let Some(input) = input {
                let script = read_file(&input).await?;
                commands::replay(&mut bank, &script);
            }
            shell(&mut bank).map_err(RunError::Output)?;
        }
    }

    Ok(())
}

async fn read_file(input: &Path) -> Result<Vec<commands::Command>, RunError> {
    let file = tokio::fs::File::open(input)
        .await
        .map_err(|error| RunError::IO(input.to_path_buf(), error))?;
    read_script(file)
        .await
        .map_err(|error| RunError::IO(input.to_path_buf(), error))
}

/// Reads every command from `reader`, logging and skipping malformed lines.
async fn read_script<R: tokio::io::AsyncRead + std::marker::Unpin>(
    reader: R,
) -> Result<Vec<commands::Command>, std::io::Error> {
    let mut reader = CsvCommandsReader::from_reader(reader);
    let mut script = Vec::new();
    while let Some(next) = reader.next_command().await {
        match next {
            Ok(command) => script.push(command),
            Err(NextError::Parse { line, error }) => {
                tracing::warn!(line, %error, "skipping malformed command");
            }
            Err(NextError::IO(error)) => return Err(error),
        }
    }
    Ok(script)
}

fn print_balances<N: Notifier>(bank: &Bank<N>) -> Result<(), RunError> {
    let mut writer = AccountsCsvWriter::from_writer(std::io::stdout().lock());
    writer
        .write_accounts(bank.accounts())
        .map_err(RunError::Output)
}

fn shell<N: Notifier>(bank: &mut Bank<N>) -> std::io::Result<()> {
    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut output = std::io::stdout();

    loop {
        menu::title(&mut output, "tinybank")?;
        menu::options(
            &mut output,
            &["1 - deposit", "2 - withdraw", "3 - balances", "0 - quit"],
        )?;
        let choice = menu::read_whole_number(&mut input, &mut output, "> ")?;
        match choice {
            0 => return Ok(()),
            1 | 2 => {
                let client = menu::read_whole_number(&mut input, &mut output, "client: ")?;
                let branch = menu::read_whole_number(&mut input, &mut output, "branch: ")?;
                let number = menu::read_whole_number(&mut input, &mut output, "account: ")?;
                let amount = menu::read_whole_number(&mut input, &mut output, "amount: ")?;

                let (Ok(client), Ok(branch), Ok(number)) = (
                    u32::try_from(client),
                    u32::try_from(branch),
                    u32::try_from(number),
                ) else {
                    writeln_error(&mut output, "identifier out of range")?;
                    continue;
                };
                let client = ClientId(client);
                let account = AccountId::new(branch, number);
                let amount = Decimal::from(amount);

                let result = if choice == 1 {
                    bank.deposit(client, account, amount)
                } else {
                    bank.withdraw(client, account, amount)
                };
                if let Err(error) = result {
                    writeln_error(&mut output, &error.to_string())?;
                }
            }
            3 => {
                let mut writer = AccountsCsvWriter::from_writer(&mut output);
                writer.write_accounts(bank.accounts())?;
            }
            _ => writeln_error(&mut output, "unknown option")?,
        }
    }
}

fn writeln_error<W: std::io::Write>(writer: &mut W, message: &str) -> std::io::Result<()> {
    writeln!(writer, "error: {message}")
}
