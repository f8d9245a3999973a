//! Worker-count sizing for parallel fetches

/// Number of parallel workers for a workload
///
/// Ceiling of `workload / per_worker_capacity`, at least 1 for a non-empty
/// workload, never more than `max_workers` (the configured concurrent-
/// connection budget, independent of the input). A zero workload needs zero
/// workers; callers treat that as "nothing to fetch".
///
/// # Panics
/// Panics if `per_worker_capacity` or `max_workers` is zero — both are
/// programming errors, not runtime conditions.
pub fn worker_count(workload: usize, per_worker_capacity: usize, max_workers: usize) -> usize {
    assert!(per_worker_capacity > 0, "per_worker_capacity must be positive");
    assert!(max_workers > 0, "max_workers must be positive");

    if workload == 0 {
        return 0;
    }
    let needed = (workload + per_worker_capacity - 1) / per_worker_capacity;
    needed.min(max_workers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_workload_needs_zero_workers() {
        assert_eq!(worker_count(0, 5, 10), 0);
    }

    #[test]
    fn rounds_up_to_cover_the_workload() {
        assert_eq!(worker_count(1, 5, 10), 1);
        assert_eq!(worker_count(5, 5, 10), 1);
        assert_eq!(worker_count(6, 5, 10), 2);
        assert_eq!(worker_count(26, 5, 10), 6);
    }

    #[test]
    fn capped_at_max_workers() {
        assert_eq!(worker_count(650, 1, 10), 10);
        assert_eq!(worker_count(6000, 5, 10), 10);
    }

    #[test]
    #[should_panic(expected = "per_worker_capacity")]
    fn zero_capacity_is_a_programming_error() {
        worker_count(10, 0, 10);
    }
}
