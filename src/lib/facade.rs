use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::{
    accounts::{Account, AccountId, DepositError, WithdrawError},
    clients::{Client, ClientId},
    ledger::{AuthError, Ledger},
    notify::{Notice, Notifier, Silent},
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BankError {
    #[error("client {0} not found")]
    ClientNotFound(ClientId),
    #[error("account {0} not found")]
    AccountNotFound(AccountId),
    #[error("account {0} already exists")]
    DuplicateAccount(AccountId),
    #[error("amount must be positive: {0}")]
    InvalidAmount(Decimal),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Deposit(#[from] DepositError),
    #[error(transparent)]
    Withdraw(#[from] WithdrawError),
}

/// Creates clients and accounts, keeps them, and runs every transaction
/// through the ledger's ownership check.
///
/// Creating an entity does not register it: clients, branches and accounts
/// must be added to the ledger explicitly before they can authenticate.
#[derive(Debug)]
pub struct Bank<N = Silent> {
    ledger: Ledger,
    clients: BTreeMap<ClientId, Client>,
    accounts: BTreeMap<AccountId, Account>,
    next_client_id: u32,
    notifier: N,
}

impl Default for Bank<Silent> {
    fn default() -> Self {
        Self::with_notifier(Silent)
    }
}

impl Bank<Silent> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<N: Notifier> Bank<N> {
    pub fn with_notifier(notifier: N) -> Self {
        Self {
            ledger: Ledger::new(),
            clients: BTreeMap::new(),
            accounts: BTreeMap::new(),
            next_client_id: 1,
            notifier,
        }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn client(&self, id: ClientId) -> Option<&Client> {
        self.clients.get(&id)
    }

    pub fn client_mut(&mut self, id: ClientId) -> Option<&mut Client> {
        self.clients.get_mut(&id)
    }

    pub fn account(&self, id: AccountId) -> Option<&Account> {
        self.accounts.get(&id)
    }

    pub fn clients(&self) -> impl Iterator<Item = &Client> {
        self.clients.values()
    }

    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }

    pub fn register_client(&mut self, name: impl Into<String>, age: i32) -> ClientId {
        let id = ClientId(self.next_client_id);
        self.next_client_id += 1;
        let client = Client::new(id, name, age);
        tracing::debug!(client = %id, name = client.name(), "client created");
        self.clients.insert(id, client);
        id
    }

    pub fn open_checking(
        &mut self,
        branch: u32,
        number: u32,
        balance: Decimal,
        overdraft_limit: Decimal,
    ) -> Result<AccountId, BankError> {
        let id = AccountId::new(branch, number);
        self.open(Account::checking(id, balance, overdraft_limit))
    }

    pub fn open_savings(
        &mut self,
        branch: u32,
        number: u32,
        balance: Decimal,
    ) -> Result<AccountId, BankError> {
        let id = AccountId::new(branch, number);
        self.open(Account::savings(id, balance))
    }

    fn open(&mut self, account: Account) -> Result<AccountId, BankError> {
        let id = account.id();
        if self.accounts.contains_key(&id) {
            return Err(BankError::DuplicateAccount(id));
        }
        tracing::debug!(account = %id, kind = account.kind().name(), "account opened");
        self.accounts.insert(id, account);
        Ok(id)
    }

    pub fn link_account(&mut self, client: ClientId, account: AccountId) -> Result<(), BankError> {
        if !self.accounts.contains_key(&account) {
            return Err(BankError::AccountNotFound(account));
        }
        let client = self
            .clients
            .get_mut(&client)
            .ok_or(BankError::ClientNotFound(client))?;
        client.link_account(account);
        Ok(())
    }

    pub fn add_branches<I: IntoIterator<Item = u32>>(&mut self, branches: I) {
        self.ledger.add_branches(branches);
    }

    /// Registers clients in the ledger. Nothing is registered if any id is
    /// unknown.
    pub fn add_clients<I: IntoIterator<Item = ClientId>>(
        &mut self,
        clients: I,
    ) -> Result<(), BankError> {
        let clients = clients.into_iter().collect::<Vec<_>>();
        if let Some(missing) = clients.iter().find(|id| !self.clients.contains_key(*id)) {
            return Err(BankError::ClientNotFound(*missing));
        }
        self.ledger.add_clients(clients);
        Ok(())
    }

    /// Registers accounts in the ledger. Nothing is registered if any id is
    /// unknown.
    pub fn add_accounts<I: IntoIterator<Item = AccountId>>(
        &mut self,
        accounts: I,
    ) -> Result<(), BankError> {
        let accounts = accounts.into_iter().collect::<Vec<_>>();
        if let Some(missing) = accounts.iter().find(|id| !self.accounts.contains_key(*id)) {
            return Err(BankError::AccountNotFound(*missing));
        }
        self.ledger.add_accounts(accounts);
        Ok(())
    }

    /// Runs the ledger's ownership check for the pair and reports the outcome
    /// to the notifier.
    pub fn authenticate(&mut self, client: ClientId, account: AccountId) -> Result<(), BankError> {
        self.authorize(client, account, true)
    }

    /// Checks the pair. Denials always reach the notifier; successes only
    /// when `announce` is set.
    fn authorize(
        &mut self,
        client: ClientId,
        account: AccountId,
        announce: bool,
    ) -> Result<(), BankError> {
        let client = self
            .clients
            .get(&client)
            .ok_or(BankError::ClientNotFound(client))?;
        let account = self
            .accounts
            .get(&account)
            .ok_or(BankError::AccountNotFound(account))?;

        match self.ledger.authenticate(client, account) {
            Ok(()) => {
                tracing::debug!(client = %client.id(), account = %account.id(), "authenticated");
                if announce {
                    self.notifier.notify(&Notice::Authenticated {
                        client: client.id(),
                        summary: client.to_string(),
                    });
                }
                Ok(())
            }
            Err(reason) => {
                tracing::info!(client = %client.id(), account = %account.id(), %reason, "authentication denied");
                self.notifier.notify(&Notice::AuthenticationDenied {
                    client: client.id(),
                    summary: client.to_string(),
                    reason,
                });
                Err(reason.into())
            }
        }
    }

    /// Deposits into `account` on behalf of `client` once the pair
    /// authenticates. Returns the new balance.
    pub fn deposit(
        &mut self,
        client: ClientId,
        account: AccountId,
        amount: Decimal,
    ) -> Result<Decimal, BankError> {
        self.authorize(client, account, false)?;

        let target = self
            .accounts
            .get_mut(&account)
            .ok_or(BankError::AccountNotFound(account))?;
        if amount <= Decimal::ZERO {
            self.notifier.notify(&Notice::AmountRejected {
                account,
                amount,
                balance: target.balance(),
            });
            return Err(BankError::InvalidAmount(amount));
        }

        match target.deposit(amount) {
            Ok(balance) => {
                self.notifier.notify(&Notice::Deposited {
                    account,
                    amount,
                    balance,
                });
                Ok(balance)
            }
            Err(reason) => {
                self.notifier.notify(&Notice::DepositDenied { account, reason });
                Err(reason.into())
            }
        }
    }

    /// Withdraws from `account` on behalf of `client` once the pair
    /// authenticates. Returns the new balance.
    pub fn withdraw(
        &mut self,
        client: ClientId,
        account: AccountId,
        amount: Decimal,
    ) -> Result<Decimal, BankError> {
        self.authorize(client, account, false)?;

        let target = self
            .accounts
            .get_mut(&account)
            .ok_or(BankError::AccountNotFound(account))?;
        if amount <= Decimal::ZERO {
            self.notifier.notify(&Notice::AmountRejected {
                account,
                amount,
                balance: target.balance(),
            });
            return Err(BankError::InvalidAmount(amount));
        }

        match target.withdraw(amount) {
            Ok(balance) => {
                self.notifier.notify(&Notice::Withdrew {
                    account,
                    amount,
                    balance,
                });
                Ok(balance)
            }
            Err(reason) => {
                self.notifier
                    .notify(&Notice::WithdrawalDenied { account, reason });
                Err(reason.into())
            }
        }
    }
}
