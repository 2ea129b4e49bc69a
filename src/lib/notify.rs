use rust_decimal::Decimal;

use crate::{
    accounts::{AccountId, DepositError, WithdrawError},
    clients::ClientId,
    ledger::AuthError,
};

/// Outcome of an operation, meant for whoever presents the bank to a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Authenticated {
        client: ClientId,
        summary: String,
    },
    AuthenticationDenied {
        client: ClientId,
        summary: String,
        reason: AuthError,
    },
    Deposited {
        account: AccountId,
        amount: Decimal,
        balance: Decimal,
    },
    Withdrew {
        account: AccountId,
        amount: Decimal,
        balance: Decimal,
    },
    WithdrawalDenied {
        account: AccountId,
        reason: WithdrawError,
    },
    DepositDenied {
        account: AccountId,
        reason: DepositError,
    },
    /// Zero or negative amount, refused before touching the account.
    AmountRejected {
        account: AccountId,
        amount: Decimal,
        balance: Decimal,
    },
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Notice::Authenticated { summary, .. } => {
                write!(f, "{summary} authenticated successfully")
            }
            Notice::AuthenticationDenied {
                summary, reason, ..
            } => write!(f, "could not authenticate {summary}: {reason}"),
            Notice::Deposited {
                amount, balance, ..
            } => write!(f, "your balance is {balance:.2} (deposit of {amount:.2} completed)"),
            Notice::Withdrew {
                amount, balance, ..
            } => write!(
                f,
                "your balance is {balance:.2} (withdrawal of {amount:.2} completed)"
            ),
            Notice::WithdrawalDenied { reason, .. } => match reason {
                WithdrawError::InsufficientFunds { balance, .. } => {
                    write!(f, "withdrawal denied, your balance is {balance:.2}")
                }
                WithdrawError::OverLimit {
                    balance,
                    overdraft_limit,
                    ..
                } => write!(
                    f,
                    "withdrawal denied, your maximum overdraft is {:.2}, your balance is {balance:.2}",
                    -*overdraft_limit
                ),
                WithdrawError::Overflow { balance, .. } => write!(
                    f,
                    "withdrawal denied, amount out of range, your balance is {balance:.2}"
                ),
            },
            Notice::DepositDenied { reason, .. } => match reason {
                DepositError::Overflow { balance, .. } => write!(
                    f,
                    "deposit denied, amount out of range, your balance is {balance:.2}"
                ),
            },
            Notice::AmountRejected {
                amount, balance, ..
            } => write!(
                f,
                "amount {amount:.2} rejected, it must be positive, your balance is {balance:.2}"
            ),
        }
    }
}

/// Receives notices produced by the bank.
pub trait Notifier {
    fn notify(&mut self, notice: &Notice);
}

/// Discards every notice.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl Notifier for Silent {
    fn notify(&mut self, _notice: &Notice) {}
}

/// Forwards notices to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct Log;

impl Notifier for Log {
    fn notify(&mut self, notice: &Notice) {
        match notice {
            Notice::AuthenticationDenied { .. }
            | Notice::WithdrawalDenied { .. }
            | Notice::DepositDenied { .. }
            | Notice::AmountRejected { .. } => {
                tracing::warn!("{notice}")
            }
            _ => tracing::info!("{notice}"),
        }
    }
}

/// Writes one line per notice.
pub struct Console<W: std::io::Write> {
    writer: W,
}

impl<W: std::io::Write> Console<W> {
    pub fn from_writer(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: std::io::Write> Notifier for Console<W> {
    fn notify(&mut self, notice: &Notice) {
        if let Err(error) = writeln!(self.writer, "{notice}") {
            tracing::warn!(%error, "failed to write notice");
        }
    }
}

impl Notifier for Vec<Notice> {
    fn notify(&mut self, notice: &Notice) {
        self.push(notice.clone());
    }
}

impl<N: Notifier + ?Sized> Notifier for Box<N> {
    fn notify(&mut self, notice: &Notice) {
        (**self).notify(notice)
    }
}
