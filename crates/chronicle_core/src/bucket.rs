use crate::error::ChronicleError;
use crate::fragment::{DayKey, Fragment};
use crate::roles::{Role, Section};

/// All fragments belonging to one calendar day, kept in final document
/// order: header roles by rank, authored content by order string, footer
/// roles by rank.
#[derive(Debug, Clone)]
pub struct DayBucket {
    day: DayKey,
    fragments: Vec<Fragment>,
}

fn sort_key(fragment: &Fragment) -> (Section, u8, &str) {
    match fragment.role() {
        Some(role) => (role.section(), role.rank(), fragment.order.as_str()),
        None => (Section::Authored, 0, fragment.order.as_str()),
    }
}

impl DayBucket {
    pub fn new(day: DayKey) -> DayBucket {
        DayBucket {
            day,
            fragments: Vec::new(),
        }
    }

    pub fn day_key(&self) -> DayKey {
        self.day
    }

    /// Insert a fragment, keeping bucket order. Two fragments with the same
    /// order string on one day are a validation error.
    pub fn insert(&mut self, fragment: Fragment) -> Result<(), ChronicleError> {
        if self.fragments.iter().any(|f| f.order == fragment.order) {
            return Err(ChronicleError::DuplicateOrder {
                year: self.day.year,
                month: self.day.month,
                day: self.day.day,
                order: fragment.order,
            });
        }
        let position = self
            .fragments
            .iter()
            .position(|f| sort_key(f) > sort_key(&fragment))
            .unwrap_or(self.fragments.len());
        self.fragments.insert(position, fragment);
        Ok(())
    }

    /// True iff any inserted fragment, authored or synthesized, carries the
    /// role tag.
    pub fn has_role(&self, role: Role) -> bool {
        self.fragments.iter().any(|f| f.role() == Some(role))
    }

    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }
}
