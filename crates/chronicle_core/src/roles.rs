/// Structural positions a fragment can occupy around the authored content of
/// a day. The ordering contract is declared here as data: every role maps to
/// a reserved order prefix, a section, and a rank within that section, so
/// headers always sort before authored content and footers always sort after
/// it, whatever order strings the author picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    DocumentHeaderOne,
    DocumentHeaderTwo,
    DocumentForward,
    YearHeaderOne,
    YearHeaderTwo,
    MonthHeader,
    DayHeader,
    DayFooter,
    MonthFooter,
    YearFooter,
    DocumentFooter,
}

/// Bucket-internal section. Variant order is the sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Section {
    Header,
    Authored,
    Footer,
}

pub const ALL_ROLES: [Role; 11] = [
    Role::DocumentHeaderOne,
    Role::DocumentHeaderTwo,
    Role::DocumentForward,
    Role::YearHeaderOne,
    Role::YearHeaderTwo,
    Role::MonthHeader,
    Role::DayHeader,
    Role::DayFooter,
    Role::MonthFooter,
    Role::YearFooter,
    Role::DocumentFooter,
];

impl Role {
    /// Reserved order prefix. A fragment whose order starts with one of these
    /// carries the role; synthesized fragments use the prefix verbatim.
    pub fn reserved_order(self) -> &'static str {
        match self {
            Role::DocumentHeaderOne => "!a",
            Role::DocumentHeaderTwo => "!b",
            Role::DocumentForward => "!c",
            Role::YearHeaderOne => "!d",
            Role::YearHeaderTwo => "!e",
            Role::MonthHeader => "!f",
            Role::DayHeader => "!g",
            Role::DayFooter => "~a",
            Role::MonthFooter => "~b",
            Role::YearFooter => "~c",
            Role::DocumentFooter => "~d",
        }
    }

    pub fn template_name(self) -> &'static str {
        match self {
            Role::DocumentHeaderOne => "document-header-1",
            Role::DocumentHeaderTwo => "document-header-2",
            Role::DocumentForward => "document-forward",
            Role::YearHeaderOne => "year-header-1",
            Role::YearHeaderTwo => "year-header-2",
            Role::MonthHeader => "month-header",
            Role::DayHeader => "day-header",
            Role::DayFooter => "day-footer",
            Role::MonthFooter => "month-footer",
            Role::YearFooter => "year-footer",
            Role::DocumentFooter => "document-footer",
        }
    }

    pub fn section(self) -> Section {
        match self {
            Role::DocumentHeaderOne
            | Role::DocumentHeaderTwo
            | Role::DocumentForward
            | Role::YearHeaderOne
            | Role::YearHeaderTwo
            | Role::MonthHeader
            | Role::DayHeader => Section::Header,
            Role::DayFooter | Role::MonthFooter | Role::YearFooter | Role::DocumentFooter => {
                Section::Footer
            }
        }
    }

    /// Position within the role's section.
    pub fn rank(self) -> u8 {
        match self {
            Role::DocumentHeaderOne => 0,
            Role::DocumentHeaderTwo => 1,
            Role::DocumentForward => 2,
            Role::YearHeaderOne => 3,
            Role::YearHeaderTwo => 4,
            Role::MonthHeader => 5,
            Role::DayHeader => 6,
            Role::DayFooter => 0,
            Role::MonthFooter => 1,
            Role::YearFooter => 2,
            Role::DocumentFooter => 3,
        }
    }

    pub fn from_order(order: &str) -> Option<Role> {
        ALL_ROLES
            .iter()
            .copied()
            .find(|role| order.starts_with(role.reserved_order()))
    }
}
