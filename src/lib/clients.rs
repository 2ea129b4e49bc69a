use crate::accounts::AccountId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClientId(pub u32);

impl std::fmt::Display for ClientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Name and age of a person. Neither field is validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    name: String,
    age: i32,
}

impl Person {
    pub fn new(name: impl Into<String>, age: i32) -> Self {
        Self {
            name: name.into(),
            age,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn age(&self) -> i32 {
        self.age
    }

    pub fn set_age(&mut self, age: i32) {
        self.age = age;
    }
}

impl std::fmt::Display for Person {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Person (name: {:?} age: {})", self.name, self.age)
    }
}

/// A person known to the bank, owning at most one account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Client {
    id: ClientId,
    person: Person,
    account: Option<AccountId>,
}

impl Client {
    pub fn new(id: ClientId, name: impl Into<String>, age: i32) -> Self {
        Self {
            id,
            person: Person::new(name, age),
            account: None,
        }
    }

    pub fn id(&self) -> ClientId {
        self.id
    }

    pub fn person(&self) -> &Person {
        &self.person
    }

    pub fn person_mut(&mut self) -> &mut Person {
        &mut self.person
    }

    pub fn name(&self) -> &str {
        self.person.name()
    }

    pub fn age(&self) -> i32 {
        self.person.age()
    }

    /// The account this client owns, if any.
    pub fn account(&self) -> Option<AccountId> {
        self.account
    }

    /// Replaces any previously linked account.
    pub fn link_account(&mut self, account: AccountId) {
        self.account = Some(account);
    }

    pub fn unlink_account(&mut self) -> Option<AccountId> {
        self.account.take()
    }

    pub fn owns(&self, account: AccountId) -> bool {
        self.account == Some(account)
    }
}

impl std::fmt::Display for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Client (name: {:?} age: {})",
            self.person.name, self.person.age
        )
    }
}
