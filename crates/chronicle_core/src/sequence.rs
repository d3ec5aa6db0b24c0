use std::collections::HashMap;

use crate::bucket::DayBucket;
use crate::error::ChronicleError;
use crate::fragment::{DayKey, Fragment};

/// Bucket loaded fragments by calendar day and produce the chronological
/// sequence in one explicit sort pass. Raises EmptyCorpus before any other
/// work when no fragments were discovered.
pub fn build_sequence(fragments: Vec<Fragment>) -> Result<Vec<DayBucket>, ChronicleError> {
    if fragments.is_empty() {
        return Err(ChronicleError::EmptyCorpus);
    }
    let mut by_day: HashMap<DayKey, usize> = HashMap::new();
    let mut buckets: Vec<DayBucket> = Vec::new();
    for fragment in fragments {
        let day = fragment.day_key();
        let index = match by_day.get(&day) {
            Some(&index) => index,
            None => {
                buckets.push(DayBucket::new(day));
                by_day.insert(day, buckets.len() - 1);
                buckets.len() - 1
            }
        };
        buckets[index].insert(fragment)?;
    }
    buckets.sort_by_key(|bucket| bucket.day_key());
    Ok(buckets)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fragment(year: i32, month: u32, day: u32, order: &str) -> Fragment {
        Fragment::authored(
            year,
            month,
            day,
            order.to_string(),
            String::new(),
            "test".to_string(),
        )
        .expect("fragment")
    }

    #[test]
    fn empty_corpus_is_an_error() {
        assert!(matches!(
            build_sequence(Vec::new()),
            Err(ChronicleError::EmptyCorpus)
        ));
    }

    #[test]
    fn sequence_is_strictly_ascending_without_duplicate_days() {
        let sequence = build_sequence(vec![
            fragment(2021, 1, 2, "a"),
            fragment(2020, 12, 31, "a"),
            fragment(2021, 1, 2, "b"),
            fragment(2021, 1, 1, "a"),
        ])
        .expect("sequence");
        let days: Vec<DayKey> = sequence.iter().map(|b| b.day_key()).collect();
        for pair in days.windows(2) {
            assert!(pair[0] < pair[1]);
        }
        assert_eq!(days.len(), 3);
        assert_eq!(sequence[2].fragments().len(), 2);
    }

    #[test]
    fn duplicate_key_across_sources_is_rejected() {
        let result = build_sequence(vec![
            fragment(2020, 1, 1, "a"),
            fragment(2020, 1, 1, "a"),
        ]);
        assert!(matches!(
            result,
            Err(ChronicleError::DuplicateOrder { .. })
        ));
    }
}
