//! Data-access layer for the SettleUp expense-splitting backend.
//!
//! Every repository operation runs as its own task and reports progress
//! through a [`Resource`] sequence: exactly one `Loading`, then exactly one
//! `Success` or `Error`. Failures never cross the repository boundary as
//! panics or raw errors; they surface as user-displayable messages.

pub use error::{DecodeError, RepoError};
pub use group_index::GroupIndex;
pub use models::{
    Expense, ExpenseCategories, Group, GroupExpenses, ReceiptScanResult, Settlement,
    SettlementResult, User,
};
pub use repository::Repository;
pub use resource::{Resource, ResourceStream};
pub use transport::{ApiClient, ApiResponse};

pub mod decode;
mod error;
mod group_index;
mod models;
mod repository;
mod resource;
mod transport;
