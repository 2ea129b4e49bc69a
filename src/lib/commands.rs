pub mod csv;

use rust_decimal::Decimal;

use crate::{
    accounts::AccountId,
    clients::ClientId,
    facade::{Bank, BankError},
    notify::Notifier,
};

/// A single step of a bank script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Client {
        name: String,
        age: i32,
    },
    Checking {
        account: AccountId,
        balance: Decimal,
        overdraft_limit: Decimal,
    },
    Savings {
        account: AccountId,
        balance: Decimal,
    },
    Link {
        client: ClientId,
        account: AccountId,
    },
    AddBranch(u32),
    AddClient(ClientId),
    AddAccount(AccountId),
    Authenticate {
        client: ClientId,
        account: AccountId,
    },
    Deposit {
        client: ClientId,
        account: AccountId,
        amount: Decimal,
    },
    Withdraw {
        client: ClientId,
        account: AccountId,
        amount: Decimal,
    },
}

pub fn apply<N: Notifier>(bank: &mut Bank<N>, command: &Command) -> Result<(), BankError> {
    match command {
        Command::Client { name, age } => {
            bank.register_client(name.as_str(), *age);
        }
        Command::Checking {
            account,
            balance,
            overdraft_limit,
        } => {
            bank.open_checking(account.branch, account.number, *balance, *overdraft_limit)?;
        }
        Command::Savings { account, balance } => {
            bank.open_savings(account.branch, account.number, *balance)?;
        }
        Command::Link { client, account } => bank.link_account(*client, *account)?,
        Command::AddBranch(branch) => bank.add_branches([*branch]),
        Command::AddClient(client) => bank.add_clients([*client])?,
        Command::AddAccount(account) => bank.add_accounts([*account])?,
        Command::Authenticate { client, account } => bank.authenticate(*client, *account)?,
        Command::Deposit {
            client,
            account,
            amount,
        } => {
            bank.deposit(*client, *account, *amount)?;
        }
        Command::Withdraw {
            client,
            account,
            amount,
        } => {
            bank.withdraw(*client, *account, *amount)?;
        }
    }
    Ok(())
}

/// Applies `commands` in order. A failing command is skipped; the failures
/// are returned together with the index of the command that caused them.
pub fn replay<N: Notifier>(bank: &mut Bank<N>, commands: &[Command]) -> Vec<(usize, BankError)> {
    let mut failures = Vec::new();
    for (index, command) in commands.iter().enumerate() {
        if let Err(error) = apply(bank, command) {
            tracing::warn!(command = index, %error, "command skipped");
            failures.push((index, error));
        }
    }
    failures
}
