//! Domain vocabulary shared between the store and the request handlers.

/// The two category families.
///
/// Expense and income categories live in separate tables with separate
/// identifier spaces; a kind is never interchangeable with the other even
/// though both are plain (id, name) records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoryKind {
    /// Categories for expense entries.
    Expense,
    /// Categories for income entries.
    Income,
}

impl std::fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Expense => write!(f, "expense"),
            Self::Income => write!(f, "income"),
        }
    }
}

/// The two ledger-entry families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// An expense entry debits its account.
    Expense,
    /// An income entry credits its account.
    Income,
}

impl EntryKind {
    /// The category family an entry of this kind must reference.
    #[must_use]
    pub const fn category_kind(self) -> CategoryKind {
        match self {
            Self::Expense => CategoryKind::Expense,
            Self::Income => CategoryKind::Income,
        }
    }
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Expense => write!(f, "expense"),
            Self::Income => write!(f, "income"),
        }
    }
}

/// Signed effect of an entry on its account balance, in minor currency units.
///
/// An expense debits the account, an income credits it. The reversal applied
/// when an entry is deleted is the negation of this value.
#[must_use]
pub const fn balance_delta(kind: EntryKind, amount: i64) -> i64 {
    match kind {
        EntryKind::Expense => -amount,
        EntryKind::Income => amount,
    }
}
