use std::collections::BTreeSet;

use crate::{
    accounts::{Account, AccountId},
    clients::{Client, ClientId},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("branch {0} is not registered")]
    UnknownBranch(u32),
    #[error("client {0} is not registered")]
    UnknownClient(ClientId),
    #[error("account {0} is not registered")]
    UnknownAccount(AccountId),
    #[error("account {account} does not belong to client {client}")]
    OwnershipMismatch { client: ClientId, account: AccountId },
}

/// Individual results of the four ownership conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthChecks {
    pub client: ClientId,
    pub account: AccountId,
    pub branch_registered: bool,
    pub client_registered: bool,
    pub account_registered: bool,
    pub owned_by_client: bool,
}

impl AuthChecks {
    pub fn passed(&self) -> bool {
        self.outcome().is_ok()
    }

    /// Reduces the checks to a single result, reporting the first failed
    /// condition.
    pub fn outcome(&self) -> Result<(), AuthError> {
        if !self.branch_registered {
            return Err(AuthError::UnknownBranch(self.account.branch));
        }
        if !self.client_registered {
            return Err(AuthError::UnknownClient(self.client));
        }
        if !self.account_registered {
            return Err(AuthError::UnknownAccount(self.account));
        }
        if !self.owned_by_client {
            return Err(AuthError::OwnershipMismatch {
                client: self.client,
                account: self.account,
            });
        }
        Ok(())
    }
}

/// Registry of the branches, clients and accounts the bank knows about.
///
/// The three sets are filled independently: registering an account does not
/// register its branch or its owner. Authentication is the only place where
/// they are checked against each other.
#[derive(Debug, Default, Clone)]
pub struct Ledger {
    branches: BTreeSet<u32>,
    clients: BTreeSet<ClientId>,
    accounts: BTreeSet<AccountId>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_branches<I: IntoIterator<Item = u32>>(&mut self, branches: I) {
        self.branches.extend(branches);
    }

    pub fn add_clients<I: IntoIterator<Item = ClientId>>(&mut self, clients: I) {
        self.clients.extend(clients);
    }

    pub fn add_accounts<I: IntoIterator<Item = AccountId>>(&mut self, accounts: I) {
        self.accounts.extend(accounts);
    }

    pub fn has_branch(&self, branch: u32) -> bool {
        self.branches.contains(&branch)
    }

    pub fn has_client(&self, client: ClientId) -> bool {
        self.clients.contains(&client)
    }

    pub fn has_account(&self, account: AccountId) -> bool {
        self.accounts.contains(&account)
    }

    pub fn branches(&self) -> impl Iterator<Item = u32> + '_ {
        self.branches.iter().copied()
    }

    pub fn clients(&self) -> impl Iterator<Item = ClientId> + '_ {
        self.clients.iter().copied()
    }

    pub fn accounts(&self) -> impl Iterator<Item = AccountId> + '_ {
        self.accounts.iter().copied()
    }

    pub fn checks(&self, client: &Client, account: &Account) -> AuthChecks {
        AuthChecks {
            client: client.id(),
            account: account.id(),
            branch_registered: self.has_branch(account.branch()),
            client_registered: self.has_client(client.id()),
            account_registered: self.has_account(account.id()),
            owned_by_client: client.owns(account.id()),
        }
    }

    /// Succeeds iff the account's branch, the client and the account are all
    /// registered and the client owns the account.
    pub fn authenticate(&self, client: &Client, account: &Account) -> Result<(), AuthError> {
        self.checks(client, account).outcome()
    }
}
