use crate::bucket::DayBucket;
use crate::calendar::CalendarNames;
use crate::error::ChronicleError;
use crate::fragment::{DayKey, Fragment};
use crate::roles::Role;
use crate::template::{BuildInfo, DayContext, Templates};

/// Roles to open on `cur` when arriving from `prev`. Period comparisons are
/// identity comparisons: a month boundary is a change of (year, month), not
/// of the month number alone.
pub fn opening_roles(prev: Option<DayKey>, cur: DayKey) -> Vec<Role> {
    let mut roles = Vec::new();
    if prev.is_none() {
        roles.push(Role::DocumentHeaderOne);
        roles.push(Role::DocumentHeaderTwo);
        roles.push(Role::DocumentForward);
    }
    if prev.map(|p| p.year) != Some(cur.year) {
        roles.push(Role::YearHeaderOne);
        roles.push(Role::YearHeaderTwo);
    }
    if prev.map(|p| (p.year, p.month)) != Some((cur.year, cur.month)) {
        roles.push(Role::MonthHeader);
    }
    // Distinct buckets always mean a new day.
    roles.push(Role::DayHeader);
    roles
}

/// Roles to close on `prev` when advancing to `next` (`None` at end of
/// sequence). A year boundary always also closes the document: one output
/// document exists per year.
pub fn closing_roles(prev: DayKey, next: Option<DayKey>) -> Vec<Role> {
    let mut roles = vec![Role::DayFooter];
    if next.map(|n| (n.year, n.month)) != Some((prev.year, prev.month)) {
        roles.push(Role::MonthFooter);
    }
    if next.map(|n| n.year) != Some(prev.year) {
        roles.push(Role::YearFooter);
        roles.push(Role::DocumentFooter);
    }
    roles
}

/// Walk the chronological sequence and synthesize every missing structural
/// fragment from the templates, inserting each into its owning day bucket.
/// Authored structural fragments dominate: a role already present is never
/// synthesized again, which also makes a second pass a no-op. Returns the
/// number of fragments synthesized.
pub fn synthesize(
    sequence: &mut [DayBucket],
    templates: &Templates,
    calendar: &dyn CalendarNames,
    build: &BuildInfo,
) -> Result<usize, ChronicleError> {
    let days: Vec<DayKey> = sequence.iter().map(|bucket| bucket.day_key()).collect();
    let mut synthesized = 0;
    for index in 0..sequence.len() {
        let prev = index.checked_sub(1).map(|i| days[i]);
        let cur = days[index];
        if let Some(prev_day) = prev {
            for role in closing_roles(prev_day, Some(cur)) {
                synthesized +=
                    synthesize_role(&mut sequence[index - 1], role, templates, calendar, build)?;
            }
        }
        for role in opening_roles(prev, cur) {
            synthesized +=
                synthesize_role(&mut sequence[index], role, templates, calendar, build)?;
        }
    }
    if let Some(last) = sequence.len().checked_sub(1) {
        for role in closing_roles(days[last], None) {
            synthesized +=
                synthesize_role(&mut sequence[last], role, templates, calendar, build)?;
        }
    }
    Ok(synthesized)
}

fn synthesize_role(
    bucket: &mut DayBucket,
    role: Role,
    templates: &Templates,
    calendar: &dyn CalendarNames,
    build: &BuildInfo,
) -> Result<usize, ChronicleError> {
    if bucket.has_role(role) {
        return Ok(0);
    }
    let context = DayContext::for_day(bucket.day_key(), calendar);
    let content = templates.render(role, &context, build)?;
    bucket.insert(Fragment::synthesized(role, bucket.day_key(), content))?;
    Ok(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(year: i32, month: u32, day: u32) -> DayKey {
        DayKey { year, month, day }
    }

    #[test]
    fn first_day_opens_document_year_month_day() {
        let roles = opening_roles(None, day(2020, 1, 1));
        assert_eq!(
            roles,
            vec![
                Role::DocumentHeaderOne,
                Role::DocumentHeaderTwo,
                Role::DocumentForward,
                Role::YearHeaderOne,
                Role::YearHeaderTwo,
                Role::MonthHeader,
                Role::DayHeader,
            ]
        );
    }

    #[test]
    fn plain_day_advance_opens_only_the_day() {
        let roles = opening_roles(Some(day(2020, 1, 1)), day(2020, 1, 2));
        assert_eq!(roles, vec![Role::DayHeader]);
    }

    #[test]
    fn month_boundary_opens_month_header() {
        let roles = opening_roles(Some(day(2020, 1, 31)), day(2020, 2, 1));
        assert_eq!(roles, vec![Role::MonthHeader, Role::DayHeader]);
    }

    #[test]
    fn same_month_number_across_years_is_still_a_month_boundary() {
        let roles = opening_roles(Some(day(2020, 1, 15)), day(2021, 1, 15));
        assert_eq!(
            roles,
            vec![
                Role::YearHeaderOne,
                Role::YearHeaderTwo,
                Role::MonthHeader,
                Role::DayHeader,
            ]
        );
    }

    #[test]
    fn year_boundary_closes_year_and_document() {
        let roles = closing_roles(day(2020, 12, 31), Some(day(2021, 1, 1)));
        assert_eq!(
            roles,
            vec![
                Role::DayFooter,
                Role::MonthFooter,
                Role::YearFooter,
                Role::DocumentFooter,
            ]
        );
    }

    #[test]
    fn plain_day_advance_closes_only_the_day() {
        let roles = closing_roles(day(2020, 1, 1), Some(day(2020, 1, 2)));
        assert_eq!(roles, vec![Role::DayFooter]);
    }

    #[test]
    fn end_of_sequence_closes_everything() {
        let roles = closing_roles(day(2020, 2, 1), None);
        assert_eq!(
            roles,
            vec![
                Role::DayFooter,
                Role::MonthFooter,
                Role::YearFooter,
                Role::DocumentFooter,
            ]
        );
    }
}
