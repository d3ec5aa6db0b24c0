mod bucket;
mod calendar;
mod error;
mod fragment;
mod roles;
mod sequence;
mod synthesis;
mod template;


pub use bucket::DayBucket;
pub use calendar::{is_valid_date, CalendarNames, EnglishCalendar};
pub use error::ChronicleError;
pub use fragment::{DayKey, Fragment, FragmentKind, FragmentMeta, Key};
pub use roles::{Role, Section, ALL_ROLES};
pub use sequence::build_sequence;
pub use synthesis::{closing_roles, opening_roles, synthesize};
pub use template::{
    BuildInfo, DayContext, Templates, BUILD_DATE_ENV, BUILD_FALLBACK, BUILD_ID_ENV,
    GIT_BRANCH_ENV, GIT_COMMIT_ENV, GIT_URL_ENV,
};
