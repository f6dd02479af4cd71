mod ledger;
mod token;

pub use ledger::LedgerError;
pub use ledger::MigrationLedger;
pub use ledger::RematchPolicy;
pub use token::TokenManager;
