use serde::{Deserialize, Serialize};

use crate::calendar::is_valid_date;
use crate::error::ChronicleError;
use crate::roles::Role;

/// Calendar-day identity. Derived ordering is ascending (year, month, day).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DayKey {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

/// Composite total-order key: (year, month, day, order), order comparing as
/// a plain string. Fragment equality and ordering are defined by this key
/// alone.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Key {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub order: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentKind {
    Authored,
    Synthesized,
}

/// Smallest addressable content unit: dated, ordered HTML.
#[derive(Debug, Clone)]
pub struct Fragment {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub order: String,
    pub content: String,
    pub kind: FragmentKind,
    pub source: Option<String>,
}

impl Fragment {
    /// Build an authored fragment, enforcing the date and order invariants.
    pub fn authored(
        year: i32,
        month: u32,
        day: u32,
        order: String,
        content: String,
        source: String,
    ) -> Result<Fragment, ChronicleError> {
        if !is_valid_date(year, month, day) {
            return Err(ChronicleError::Validation {
                source,
                message: format!("invalid date {:04}-{:02}-{:02}", year, month, day),
            });
        }
        if order.is_empty() {
            return Err(ChronicleError::Validation {
                source,
                message: "empty order".to_string(),
            });
        }
        Ok(Fragment {
            year,
            month,
            day,
            order,
            content,
            kind: FragmentKind::Authored,
            source: Some(source),
        })
    }

    /// Build a structural fragment for an existing day. Synthesized fragments
    /// carry the role's reserved order and no source.
    pub fn synthesized(role: Role, day: DayKey, content: String) -> Fragment {
        Fragment {
            year: day.year,
            month: day.month,
            day: day.day,
            order: role.reserved_order().to_string(),
            content,
            kind: FragmentKind::Synthesized,
            source: None,
        }
    }

    pub fn day_key(&self) -> DayKey {
        DayKey {
            year: self.year,
            month: self.month,
            day: self.day,
        }
    }

    pub fn key(&self) -> Key {
        Key {
            year: self.year,
            month: self.month,
            day: self.day,
            order: self.order.clone(),
        }
    }

    /// The structural role this fragment occupies, if its order string starts
    /// with a reserved prefix.
    pub fn role(&self) -> Option<Role> {
        Role::from_order(&self.order)
    }
}

impl PartialEq for Fragment {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Fragment {}

impl PartialOrd for Fragment {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Fragment {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.key().cmp(&other.key())
    }
}

/// Persisted metadata shape of one fragment source (`fragment.json`).
/// Content may be inline or in a side-by-side `fragment.html`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FragmentMeta {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub order: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}
