use rust_decimal::Decimal;
use tokio::io::AsyncBufReadExt;

use crate::{accounts::AccountId, clients::ClientId, commands};

pub struct CsvCommandsReader<R: tokio::io::AsyncRead + std::marker::Unpin> {
    lines: tokio::io::Lines<tokio::io::BufReader<R>>,
    line: usize,
}

impl<R: tokio::io::AsyncRead + std::marker::Unpin> CsvCommandsReader<R> {
    pub fn from_reader(reader: R) -> Self {
        const BUFFER_SIZE: usize = 8 * 1024;
        let reader = tokio::io::BufReader::with_capacity(BUFFER_SIZE, reader);
        Self {
            lines: reader.lines(),
            line: 0,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum NextError {
    #[error("line {line}: failed to parse command: {error}")]
    Parse { line: usize, error: FromCsvRowError },
    #[error("failed to read command: {0}")]
    IO(std::io::Error),
}

impl<R: tokio::io::AsyncRead + std::marker::Unpin> CsvCommandsReader<R> {
    /// Returns the next command, skipping blank lines and `#` comments.
    pub async fn next_command(&mut self) -> Option<Result<commands::Command, NextError>> {
        loop {
            match self.lines.next_line().await {
                Ok(Some(line)) => {
                    self.line += 1;
                    let trimmed = line.trim();
                    if trimmed.is_empty() || trimmed.starts_with('#') {
                        continue;
                    }
                    return Some(from_csv_row(trimmed).map_err(|error| NextError::Parse {
                        line: self.line,
                        error,
                    }));
                }
                Ok(None) => return None,
                Err(error) => return Some(Err(NextError::IO(error))),
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FromCsvRowError {
    #[error("invalid command: {0}")]
    InvalidCommand(String),
    #[error("missing command")]
    MissingCommand,
    #[error("missing {0}")]
    MissingField(&'static str),
    #[error("invalid {field}: {value}")]
    InvalidField { field: &'static str, value: String },
    #[error("unexpected field: {0}")]
    UnexpectedField(String),
}

impl std::str::FromStr for commands::Command {
    type Err = FromCsvRowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        from_csv_row(s)
    }
}

struct Fields<'a> {
    parts: std::str::Split<'a, char>,
}

impl<'a> Fields<'a> {
    fn next(&mut self, field: &'static str) -> Result<&'a str, FromCsvRowError> {
        self.parts
            .next()
            .map(str::trim)
            .ok_or(FromCsvRowError::MissingField(field))
    }

    fn parse<T: std::str::FromStr>(&mut self, field: &'static str) -> Result<T, FromCsvRowError> {
        let value = self.next(field)?;
        value.parse().map_err(|_| FromCsvRowError::InvalidField {
            field,
            value: value.to_string(),
        })
    }

    fn optional<T: std::str::FromStr>(
        &mut self,
        field: &'static str,
    ) -> Result<Option<T>, FromCsvRowError> {
        match self.parts.next().map(str::trim) {
            None | Some("") => Ok(None),
            Some(value) => value
                .parse()
                .map(Some)
                .map_err(|_| FromCsvRowError::InvalidField {
                    field,
                    value: value.to_string(),
                }),
        }
    }

    /// Fails on any non-empty field left over; a trailing comma is fine.
    fn finish(self) -> Result<(), FromCsvRowError> {
        match self.parts.map(str::trim).find(|rest| !rest.is_empty()) {
            Some(rest) => Err(FromCsvRowError::UnexpectedField(rest.to_string())),
            None => Ok(()),
        }
    }

    fn client(&mut self) -> Result<ClientId, FromCsvRowError> {
        self.parse("client ID").map(ClientId)
    }

    fn account(&mut self) -> Result<AccountId, FromCsvRowError> {
        let branch = self.parse("branch")?;
        let number = self.parse("account number")?;
        Ok(AccountId::new(branch, number))
    }
}

fn from_csv_row(s: &str) -> Result<commands::Command, FromCsvRowError> {
    let mut parts = s.split(',');
    let command = parts.next().map(str::trim).unwrap_or_default();
    if command.is_empty() {
        return Err(FromCsvRowError::MissingCommand);
    }
    let mut fields = Fields { parts };

    let parsed = match command {
        "client" => {
            let name = fields.next("name")?.to_string();
            let age = fields.parse("age")?;
            Ok(commands::Command::Client { name, age })
        }
        "checking" => {
            let account = fields.account()?;
            let balance = fields.parse("balance")?;
            let overdraft_limit = fields.optional("overdraft limit")?.unwrap_or(Decimal::ZERO);
            Ok(commands::Command::Checking {
                account,
                balance,
                overdraft_limit,
            })
        }
        "savings" => {
            let account = fields.account()?;
            let balance = fields.parse("balance")?;
            Ok(commands::Command::Savings { account, balance })
        }
        "link" => {
            let client = fields.client()?;
            let account = fields.account()?;
            Ok(commands::Command::Link { client, account })
        }
        "add_branch" => Ok(commands::Command::AddBranch(fields.parse("branch")?)),
        "add_client" => Ok(commands::Command::AddClient(fields.client()?)),
        "add_account" => Ok(commands::Command::AddAccount(fields.account()?)),
        "auth" => {
            let client = fields.client()?;
            let account = fields.account()?;
            Ok(commands::Command::Authenticate { client, account })
        }
        "deposit" => {
            let client = fields.client()?;
            let account = fields.account()?;
            let amount = fields.parse("amount")?;
            Ok(commands::Command::Deposit {
                client,
                account,
                amount,
            })
        }
        "withdraw" => {
            let client = fields.client()?;
            let account = fields.account()?;
            let amount = fields.parse("amount")?;
            Ok(commands::Command::Withdraw {
                client,
                account,
                amount,
            })
        }
        _ => Err(FromCsvRowError::InvalidCommand(command.to_string())),
    }?;
    fields.finish()?;
    Ok(parsed)
}
