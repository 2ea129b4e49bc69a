pub mod csv;

use rust_decimal::Decimal;

/// Identifies an account by the branch it belongs to and its number within
/// that branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AccountId {
    pub branch: u32,
    pub number: u32,
}

impl AccountId {
    pub fn new(branch: u32, number: u32) -> Self {
        Self { branch, number }
    }
}

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.branch, self.number)
    }
}

/// Withdrawal policy of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountKind {
    /// May go negative down to `-overdraft_limit`.
    Checking { overdraft_limit: Decimal },
    /// Never goes below zero.
    Savings,
}

impl AccountKind {
    pub fn name(&self) -> &'static str {
        match self {
            AccountKind::Checking { .. } => "checking",
            AccountKind::Savings => "savings",
        }
    }

    pub fn overdraft_limit(&self) -> Decimal {
        match self {
            AccountKind::Checking { overdraft_limit } => *overdraft_limit,
            AccountKind::Savings => Decimal::ZERO,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DepositError {
    #[error("balance overflow: depositing {amount} into {balance}")]
    Overflow { amount: Decimal, balance: Decimal },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum WithdrawError {
    #[error("insufficient funds: requested {requested:.2}, balance {balance:.2}")]
    InsufficientFunds { requested: Decimal, balance: Decimal },
    #[error("overdraft limit of {overdraft_limit:.2} exceeded: requested {requested:.2}, balance {balance:.2}")]
    OverLimit {
        requested: Decimal,
        balance: Decimal,
        overdraft_limit: Decimal,
    },
    #[error("balance overflow: withdrawing {requested} from {balance}")]
    Overflow { requested: Decimal, balance: Decimal },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    id: AccountId,
    balance: Decimal,
    kind: AccountKind,
}

impl Account {
    /// Opens a checking account. A negative `overdraft_limit` is treated as
    /// zero.
    pub fn checking(id: AccountId, balance: Decimal, overdraft_limit: Decimal) -> Self {
        Self {
            id,
            balance,
            kind: AccountKind::Checking {
                overdraft_limit: overdraft_limit.max(Decimal::ZERO),
            },
        }
    }

    pub fn savings(id: AccountId, balance: Decimal) -> Self {
        Self {
            id,
            balance,
            kind: AccountKind::Savings,
        }
    }

    pub fn id(&self) -> AccountId {
        self.id
    }

    pub fn branch(&self) -> u32 {
        self.id.branch
    }

    pub fn number(&self) -> u32 {
        self.id.number
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn kind(&self) -> AccountKind {
        self.kind
    }

    /// Adds `amount` to the balance and returns the new balance. Amount
    /// validation is left to the caller; the only failure is a balance that
    /// no longer fits in a `Decimal`.
    pub fn deposit(&mut self, amount: Decimal) -> Result<Decimal, DepositError> {
        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or(DepositError::Overflow {
                amount,
                balance: self.balance,
            })?;
        Ok(self.balance)
    }

    /// Takes `amount` out of the account if its withdrawal policy allows it
    /// and returns the new balance. The balance is left untouched on error.
    pub fn withdraw(&mut self, amount: Decimal) -> Result<Decimal, WithdrawError> {
        let remaining = self
            .balance
            .checked_sub(amount)
            .ok_or(WithdrawError::Overflow {
                requested: amount,
                balance: self.balance,
            })?;

        match self.kind {
            AccountKind::Checking { overdraft_limit } => {
                if remaining < -overdraft_limit {
                    return Err(WithdrawError::OverLimit {
                        requested: amount,
                        balance: self.balance,
                        overdraft_limit,
                    });
                }
            }
            AccountKind::Savings => {
                if amount > self.balance {
                    return Err(WithdrawError::InsufficientFunds {
                        requested: amount,
                        balance: self.balance,
                    });
                }
            }
        }

        self.balance = remaining;
        Ok(self.balance)
    }
}

impl std::fmt::Display for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self.kind {
            AccountKind::Checking { .. } => "CheckingAccount",
            AccountKind::Savings => "SavingsAccount",
        };
        write!(
            f,
            "{} (branch: {} account: {} balance: {:.2})",
            kind, self.id.branch, self.id.number, self.balance
        )
    }
}
