//! Defensive decoders from the open `data` payload into domain records.
//!
//! The wire format is loosely typed: fields go missing, numbers arrive as
//! integers or floats, lists contain malformed entries. Each decoder reads
//! named keys with typed fallbacks instead of failing outright; a decoder
//! only errors when the payload's top-level shape (`data.group`,
//! `data.expense`) is absent entirely.

use std::collections::HashMap;

use serde_json::Value;

use crate::error::DecodeError;
use crate::models::{
    Expense, ExpenseCategories, Group, GroupExpenses, ReceiptScanResult, Settlement,
    SettlementResult, User,
};

fn str_field(item: &Value, key: &str) -> String {
    item.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// First key that holds a string wins; mistyped values fall through to the
/// next spelling.
fn first_str_field(item: &Value, keys: &[&str]) -> String {
    keys.iter()
        .find_map(|key| item.get(*key).and_then(Value::as_str))
        .unwrap_or_default()
        .to_string()
}

/// Accepts any JSON number; `500` decodes as `500.0`.
fn f64_field(item: &Value, key: &str) -> f64 {
    item.get(key).and_then(Value::as_f64).unwrap_or(0.0)
}

fn bool_field(item: &Value, key: &str) -> bool {
    item.get(key).and_then(Value::as_bool).unwrap_or(false)
}

fn string_list(item: &Value, key: &str) -> Vec<String> {
    item.get(key)
        .and_then(Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn f64_map(item: &Value, key: &str) -> HashMap<String, f64> {
    item.get(key)
        .and_then(Value::as_object)
        .map(|entries| {
            entries
                .iter()
                .filter_map(|(name, value)| value.as_f64().map(|n| (name.clone(), n)))
                .collect()
        })
        .unwrap_or_default()
}

fn object_entries<'a>(item: &'a Value, key: &str) -> Vec<&'a Value> {
    item.get(key)
        .and_then(Value::as_array)
        .map(|entries| entries.iter().filter(|entry| entry.is_object()).collect())
        .unwrap_or_default()
}

fn user(item: &Value) -> User {
    User {
        id: str_field(item, "id"),
        name: str_field(item, "name"),
        email: str_field(item, "email"),
    }
}

/// Decodes `data.group`. Absence of the `group` object is the one hard
/// failure; every field inside it has a fallback.
pub fn group(data: &Value) -> Result<Group, DecodeError> {
    let payload = data
        .get("group")
        .filter(|value| value.is_object())
        .ok_or(DecodeError::InvalidGroup)?;

    Ok(Group {
        id: str_field(payload, "id"),
        name: str_field(payload, "name"),
        members: object_entries(payload, "members")
            .into_iter()
            .map(user)
            .collect(),
        created_at: str_field(payload, "created_at"),
        total_expenses: f64_field(payload, "total_expenses") as u32,
        total_amount: f64_field(payload, "total_amount"),
    })
}

/// Decodes one expense entry. `group_id` overrides the entry's own
/// `group_id` field when the caller already knows it (create/scan paths,
/// where the server may omit it).
pub fn expense_entry(item: &Value, group_id: Option<&str>) -> Expense {
    Expense {
        id: str_field(item, "id"),
        description: str_field(item, "description"),
        amount: f64_field(item, "amount"),
        paid_by_user_id: str_field(item, "paid_by_user_id"),
        split_among_user_ids: string_list(item, "split_among_user_ids"),
        group_id: group_id
            .map(str::to_string)
            .unwrap_or_else(|| str_field(item, "group_id")),
        category: str_field(item, "category"),
        created_at: str_field(item, "created_at"),
    }
}

/// Decodes `data.expense` from a create response.
pub fn expense(data: &Value, group_id: &str) -> Result<Expense, DecodeError> {
    let payload = data
        .get("expense")
        .filter(|value| value.is_object())
        .ok_or(DecodeError::InvalidExpense)?;
    Ok(expense_entry(payload, Some(group_id)))
}

/// Decodes a group's expense listing. Malformed list entries decode
/// field-by-field with defaults; one bad entry never aborts the list.
pub fn group_expenses(data: &Value) -> GroupExpenses {
    GroupExpenses {
        expenses: object_entries(data, "expenses")
            .into_iter()
            .map(|entry| expense_entry(entry, None))
            .collect(),
        category_breakdown: f64_map(data, "category_breakdown"),
        total_amount: f64_field(data, "total_amount"),
    }
}

pub fn categories(data: &Value) -> ExpenseCategories {
    let examples = data
        .get("examples")
        .and_then(Value::as_object)
        .map(|entries| {
            entries
                .iter()
                .map(|(name, value)| (name.clone(), string_list_value(value)))
                .collect()
        })
        .unwrap_or_default();

    ExpenseCategories {
        categories: string_list(data, "categories"),
        examples,
        ai_powered: bool_field(data, "ai_powered"),
    }
}

fn string_list_value(value: &Value) -> Vec<String> {
    value
        .as_array()
        .map(|entries| {
            entries
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn settlement_entry(item: &Value) -> Settlement {
    let from = first_str_field(item, &["from_user_id", "from"]);
    let to = first_str_field(item, &["to_user_id", "to"]);
    let from_user_name = item
        .get("from_user")
        .and_then(|entry| entry.get("name"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| format!("User {from}"));
    let to_user_name = item
        .get("to_user")
        .and_then(|entry| entry.get("name"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| format!("User {to}"));

    Settlement {
        from,
        to,
        amount: f64_field(item, "amount"),
        from_user_name,
        to_user_name,
        message: str_field(item, "message"),
    }
}

/// Decodes a settlement computation. `total_transactions` defaults to the
/// number of decoded settlement entries when absent or non-numeric.
pub fn settlement_result(data: &Value) -> SettlementResult {
    let settlements: Vec<Settlement> = object_entries(data, "settlements")
        .into_iter()
        .map(settlement_entry)
        .collect();
    let total_transactions = data
        .get("total_transactions")
        .and_then(Value::as_f64)
        .map(|n| n as usize)
        .unwrap_or(settlements.len());

    SettlementResult {
        settlements,
        balances: f64_map(data, "balances"),
        total_transactions,
    }
}

/// Decodes a receipt scan. The scan-specific overrides (`amount`,
/// `vendor`, `category` at the top of `data`) fall back to the created
/// expense's own fields.
pub fn receipt_scan(data: &Value, group_id: &str) -> Result<ReceiptScanResult, DecodeError> {
    let payload = data
        .get("expense")
        .filter(|value| value.is_object())
        .ok_or(DecodeError::InvalidReceipt)?;
    let expense = expense_entry(payload, Some(group_id));

    let scanned_amount = data
        .get("amount")
        .and_then(Value::as_f64)
        .unwrap_or(expense.amount);
    let vendor = data
        .get("vendor")
        .and_then(Value::as_str)
        .unwrap_or("Unknown Vendor")
        .to_string();
    let category = data
        .get("category")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| expense.category.clone());

    Ok(ReceiptScanResult {
        expense,
        scanned_amount,
        vendor,
        category,
    })
}
