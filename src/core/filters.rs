use crate::core::catalog::{Catalog, LookupError};
use crate::models::Tutor;
use rand::seq::SliceRandom;
use rand::Rng;
use std::cmp::Ordering;
use std::sync::Arc;

/// Tutors offering a goal, best rated first
///
/// Fails with [`LookupError::UnknownGoal`] when the goal is not in the
/// catalog. Tutors with equal ratings keep their catalog order.
pub fn tutors_for_goal(catalog: &Catalog, goal_code: &str) -> Result<Vec<Arc<Tutor>>, LookupError> {
    let goal = catalog.require_goal(goal_code)?;

    let mut tutors: Vec<Arc<Tutor>> = catalog
        .tutors()
        .iter()
        .filter(|tutor| tutor.offers(&goal.name_en))
        .cloned()
        .collect();

    sort_by_rating(&mut tutors);

    Ok(tutors)
}

/// Stable sort by rating (descending)
pub fn sort_by_rating(tutors: &mut [Arc<Tutor>]) {
    tutors.sort_by(|a, b| b.rating.partial_cmp(&a.rating).unwrap_or(Ordering::Equal));
}

/// Pick up to `n` distinct tutors in random order
pub fn random_sample(tutors: &[Arc<Tutor>], n: usize) -> Vec<Arc<Tutor>> {
    random_sample_with(tutors, n, &mut rand::thread_rng())
}

/// [`random_sample`] driven by the given RNG
pub fn random_sample_with<R: Rng + ?Sized>(
    tutors: &[Arc<Tutor>],
    n: usize,
    rng: &mut R,
) -> Vec<Arc<Tutor>> {
    let mut sample = tutors.to_vec();
    sample.shuffle(rng);
    sample.truncate(n);
    sample
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const GOALS: &str = r#"{"travel": "Для путешествий", "work": "Для работы", "relocate": "Для переезда"}"#;

    fn create_catalog() -> Catalog {
        let tutors = r#"{
            "0": {"name": "A", "about": "", "rating": 4.2, "price": 900, "goals": ["travel"], "free": {}},
            "1": {"name": "B", "about": "", "rating": 4.9, "price": 1500, "goals": ["travel", "work"], "free": {}},
            "2": {"name": "C", "about": "", "rating": 4.2, "price": 700, "goals": ["travel"], "free": {}},
            "3": {"name": "D", "about": "", "rating": 5.0, "price": 2000, "goals": ["work"], "free": {}}
        }"#;
        Catalog::from_json(GOALS, tutors).unwrap()
    }

    fn ids(tutors: &[Arc<Tutor>]) -> Vec<u32> {
        tutors.iter().map(|t| t.id).collect()
    }

    #[test]
    fn test_tutors_for_goal_sorted_by_rating() {
        let catalog = create_catalog();

        let result = tutors_for_goal(&catalog, "travel").unwrap();

        // 0 and 2 tie on rating and keep catalog order
        assert_eq!(ids(&result), vec![1, 0, 2]);
    }

    #[test]
    fn test_tutors_for_goal_empty_when_nobody_offers_it() {
        let catalog = create_catalog();

        let result = tutors_for_goal(&catalog, "relocate").unwrap();

        assert!(result.is_empty());
    }

    #[test]
    fn test_tutors_for_unknown_goal() {
        let catalog = create_catalog();

        let err = tutors_for_goal(&catalog, "cooking").unwrap_err();

        assert_eq!(err, LookupError::UnknownGoal("cooking".to_string()));
    }

    #[test]
    fn test_random_sample_is_distinct_and_bounded() {
        let catalog = create_catalog();
        let mut rng = StdRng::seed_from_u64(7);

        let sample = random_sample_with(catalog.tutors(), 3, &mut rng);
        let mut sampled = ids(&sample);
        sampled.sort_unstable();
        sampled.dedup();
        assert_eq!(sampled.len(), 3);

        let all = random_sample_with(catalog.tutors(), 6, &mut rng);
        assert_eq!(all.len(), 4);
    }

    #[test]
    fn test_random_sample_leaves_source_order() {
        let catalog = create_catalog();

        let _ = random_sample(catalog.tutors(), 2);

        assert_eq!(ids(catalog.tutors()), vec![0, 1, 2, 3]);
    }
}
