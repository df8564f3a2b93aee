use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use validator::{Validate, ValidationError};

/// Maximum account name length after trimming surrounding whitespace.
pub const MAX_NAME_LEN: usize = 100;
/// Maximum description length.
pub const MAX_DESCRIPTION_LEN: usize = 500;

/// Stored account record. Owned exclusively by the repository; callers
/// always receive clones, never the live stored representation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Account {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
    pub balance: f64,
    /// `false` marks the record as soft-deleted.
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating an account, also used as the full-replacement body
/// for updates. Id and timestamps are assigned by the repository.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct NewAccount {
    #[validate(custom = "validate_name")]
    pub name: String,
    #[validate(length(max = 500))]
    pub description: Option<String>,
    #[validate(range(min = 0.0), custom = "validate_balance")]
    pub balance: f64,
    #[serde(default = "default_active")]
    pub active: bool,
}

impl NewAccount {
    /// Trims surrounding whitespace from the name before the record is stored.
    pub fn normalized(mut self) -> Self {
        self.name = self.name.trim().to_string();
        self
    }
}

fn default_active() -> bool {
    true
}

/// Partial update payload. Fields left as `None` retain the stored value;
/// `description` distinguishes "not provided" from "explicitly cleared"
/// (JSON `null` clears it, omission preserves it).
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
#[validate(schema(function = "validate_patch"))]
pub struct AccountPatch {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    pub balance: Option<f64>,
    pub active: Option<bool>,
}

impl AccountPatch {
    /// Overlays the provided fields onto an existing record. Absent fields
    /// keep their current value; `id` and timestamps are untouched here.
    pub fn apply_to(&self, account: &mut Account) {
        if let Some(name) = &self.name {
            account.name = name.clone();
        }
        if let Some(description) = &self.description {
            account.description = description.clone();
        }
        if let Some(balance) = self.balance {
            account.balance = balance;
        }
        if let Some(active) = self.active {
            account.active = active;
        }
    }
}

fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

/// Externally visible shape of a record: all stored fields plus derived
/// display fields.
#[derive(Debug, Clone, Serialize)]
pub struct AccountResponse {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
    pub balance: f64,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub display_balance: String,
    pub age_days: i64,
    pub status_description: String,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        let display_balance = format_currency(account.balance);
        let age_days = (Utc::now() - account.created_at).num_days();
        let status_description = match (account.active, account.balance) {
            (true, balance) if balance > 0.0 => "Active with balance",
            (true, _) => "Active, zero balance",
            (false, _) => "Inactive account",
        }
        .to_string();

        Self {
            id: account.id,
            name: account.name,
            description: account.description,
            balance: account.balance,
            active: account.active,
            created_at: account.created_at,
            updated_at: account.updated_at,
            display_balance,
            age_days,
            status_description,
        }
    }
}

/// Formats a non-negative balance as `$1,234.50`.
fn format_currency(balance: f64) -> String {
    let fixed = format!("{:.2}", balance);
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let int_grouped: String = grouped.chars().rev().collect();

    format!("${}.{}", int_grouped, frac_part)
}

fn validate_name(name: &str) -> Result<(), ValidationError> {
    let cleaned = name.trim();

    if cleaned.is_empty() {
        let mut err = ValidationError::new("name");
        err.message = Some("Account name cannot be empty or whitespace only".into());
        return Err(err);
    }

    if cleaned.chars().count() > MAX_NAME_LEN {
        let mut err = ValidationError::new("name");
        err.message = Some("Account name must be at most 100 characters".into());
        return Err(err);
    }

    if cleaned.chars().any(|c| matches!(c, '<' | '>' | '&' | '"' | '\'')) {
        let mut err = ValidationError::new("name");
        err.message = Some("Account name contains invalid characters".into());
        return Err(err);
    }

    const RESERVED_PREFIXES: [&str; 3] = ["admin", "root", "system"];
    let lower = cleaned.to_lowercase();
    if RESERVED_PREFIXES.iter().any(|p| lower.starts_with(p)) {
        let mut err = ValidationError::new("name");
        err.message = Some("Account name cannot start with reserved keywords".into());
        return Err(err);
    }

    Ok(())
}

fn validate_balance(balance: f64) -> Result<(), ValidationError> {
    if !balance.is_finite() {
        let mut err = ValidationError::new("balance");
        err.message = Some("Account balance must be a finite number".into());
        return Err(err);
    }
    Ok(())
}

fn validate_patch(patch: &AccountPatch) -> Result<(), ValidationError> {
    if let Some(name) = &patch.name {
        let cleaned = name.trim();
        if cleaned.is_empty() || cleaned.chars().count() > MAX_NAME_LEN {
            let mut err = ValidationError::new("name");
            err.message = Some("Account name must be 1 to 100 characters".into());
            return Err(err);
        }
    }
    if let Some(Some(description)) = &patch.description {
        if description.chars().count() > MAX_DESCRIPTION_LEN {
            let mut err = ValidationError::new("description");
            err.message = Some("Account description must be at most 500 characters".into());
            return Err(err);
        }
    }
    if let Some(balance) = patch.balance {
        if !balance.is_finite() || balance < 0.0 {
            let mut err = ValidationError::new("balance");
            err.message = Some("Account balance must be non-negative".into());
            return Err(err);
        }
    }
    Ok(())
}
