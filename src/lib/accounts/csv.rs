use crate::accounts;

const HEADER: &str = "branch,account,kind,balance,overdraft_limit";

/// Writes account balances as CSV, emitting the header before the first row.
pub struct AccountsCsvWriter<W: std::io::Write> {
    writer: W,
    header_written: bool,
}

impl<W: std::io::Write> AccountsCsvWriter<W> {
    pub fn from_writer(writer: W) -> Self {
        Self {
            writer,
            header_written: false,
        }
    }

    pub fn write_account(&mut self, account: &accounts::Account) -> std::io::Result<()> {
        if !self.header_written {
            writeln!(self.writer, "{HEADER}")?;
            self.header_written = true;
        }
        writeln!(
            self.writer,
            "{},{},{},{:.2},{:.2}",
            account.branch(),
            account.number(),
            account.kind().name(),
            account.balance(),
            account.kind().overdraft_limit()
        )
    }

    pub fn write_accounts<'a, I>(&mut self, accounts: I) -> std::io::Result<()>
    where
        I: IntoIterator<Item = &'a accounts::Account>,
    {
        for account in accounts {
            self.write_account(account)?;
        }
        self.writer.flush()
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}
