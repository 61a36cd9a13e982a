//! Unit tests for OutcomeStatistics
//! These are in a separate file to keep stats.rs clean

#[cfg(test)]
mod tests {
    use crate::core::outcome::{Action, OutcomeRecord};
    use crate::core::stats::{clean_error_message, OutcomeStatistics};
    use std::time::Duration;

    fn sample() -> Vec<OutcomeRecord> {
        vec![
            OutcomeRecord::ok("api", "/work/api", Action::Pull),
            OutcomeRecord::failed(
                "web",
                "/work/web",
                Action::Pull,
                "fatal: unable to access 'https://example.com/web.git/': Could not resolve host: example.com",
            ),
            OutcomeRecord::skipped("docs", "/work/docs"),
            OutcomeRecord::skipped("infra", "/work/infra"),
        ]
    }

    #[test]
    fn test_statistics_initialization() {
        let stats = OutcomeStatistics::new();
        assert_eq!(stats.ok_repos, 0);
        assert_eq!(stats.failed_repos, 0);
        assert_eq!(stats.skipped_repos, 0);
        assert!(stats.failures.is_empty());
        assert!(!stats.has_failures());
    }

    #[test]
    fn test_from_outcomes_counts_each_status() {
        let stats = OutcomeStatistics::from_outcomes(&sample());
        assert_eq!(stats.ok_repos, 1);
        assert_eq!(stats.failed_repos, 1);
        assert_eq!(stats.skipped_repos, 2);
        assert_eq!(stats.total(), 4);
        assert!(stats.has_failures());
    }

    #[test]
    fn test_failures_keep_cleaned_message() {
        let stats = OutcomeStatistics::from_outcomes(&sample());
        assert_eq!(stats.failures.len(), 1);
        assert_eq!(stats.failures[0].0, "web");
        assert_eq!(stats.failures[0].2, "network error");
    }

    #[test]
    fn test_generate_summary() {
        let stats = OutcomeStatistics::from_outcomes(&sample());
        let summary = stats.generate_summary(Duration::from_millis(1500));
        assert_eq!(summary, "Completed in 1.5s • 1 ok • 1 failed • 2 skipped");
    }

    #[test]
    fn test_detailed_summary_empty_without_failures() {
        let stats = OutcomeStatistics::from_outcomes(&[OutcomeRecord::skipped("a", "/a")]);
        assert!(stats.generate_detailed_summary().is_empty());
    }

    #[test]
    fn test_detailed_summary_lists_failures() {
        let stats = OutcomeStatistics::from_outcomes(&sample());
        let detail = stats.generate_detailed_summary();
        assert!(detail.starts_with("FAILED REPOS (1)"));
        assert!(detail.contains("└─ web"));
        assert!(detail.contains("# network error"));
    }

    #[test]
    fn test_clean_error_message_collapses_whitespace() {
        assert_eq!(
            clean_error_message("error:\n\tsomething   odd"),
            "error: something odd"
        );
    }

    #[test]
    fn test_clean_error_message_patterns() {
        assert_eq!(
            clean_error_message("error: pathspec 'release' did not match any file(s) known to git"),
            "branch not found"
        );
        assert_eq!(
            clean_error_message("fatal: a branch named 'release' already exists"),
            "branch already exists"
        );
        assert_eq!(
            clean_error_message("git@github.com: Permission denied (publickey)."),
            "authentication failed"
        );
        assert_eq!(
            clean_error_message("git timed out after 180 seconds"),
            "git timed out after 180 seconds"
        );
    }

    #[test]
    fn test_clean_error_message_truncates_multibyte_safely() {
        let long = "é".repeat(100);
        let cleaned = clean_error_message(&long);
        assert!(cleaned.ends_with("..."));
        assert_eq!(cleaned.chars().count(), 60);
    }
}
