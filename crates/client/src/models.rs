use std::collections::HashMap;

use serde::Serialize;

/// A group member. Created client-side before group creation or decoded
/// from a server response; never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Group {
    pub id: String,
    pub name: String,
    /// Server order is preserved.
    pub members: Vec<User>,
    /// ISO-8601-like string, rendered but never parsed.
    pub created_at: String,
    pub total_expenses: u32,
    pub total_amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Expense {
    pub id: String,
    pub description: String,
    pub amount: f64,
    pub paid_by_user_id: String,
    pub split_among_user_ids: Vec<String>,
    pub group_id: String,
    pub category: String,
    pub created_at: String,
}

/// One fetch of a group's expense list; replaced wholesale on refresh.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupExpenses {
    pub expenses: Vec<Expense>,
    pub category_breakdown: HashMap<String, f64>,
    pub total_amount: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpenseCategories {
    pub categories: Vec<String>,
    pub examples: HashMap<String, Vec<String>>,
    pub ai_powered: bool,
}

/// One suggested payment from the server-side debt simplification.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Settlement {
    pub from: String,
    pub to: String,
    pub amount: f64,
    pub from_user_name: String,
    pub to_user_name: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SettlementResult {
    pub settlements: Vec<Settlement>,
    /// Signed per-user net: positive = owed money, negative = owes.
    pub balances: HashMap<String, f64>,
    pub total_transactions: usize,
}

/// Result of one scan-and-create call. `scanned_amount` is advisory and
/// may differ from the created expense's amount.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReceiptScanResult {
    pub expense: Expense,
    pub scanned_amount: f64,
    pub vendor: String,
    pub category: String,
}
