use testwatch::run::{RunOutcome, EXIT_INTERRUPTED, EXIT_NOTESTSCOLLECTED, EXIT_OK};

#[test]
fn exit_zero_is_a_pass() {
    let outcome = RunOutcome::from_exit_code(EXIT_OK);
    assert_eq!(outcome, RunOutcome::Passed);
    assert!(outcome.is_pass());
}

#[test]
fn no_tests_collected_counts_as_a_pass() {
    let outcome = RunOutcome::from_exit_code(EXIT_NOTESTSCOLLECTED);
    assert_eq!(outcome, RunOutcome::NoTestsCollected);
    assert!(outcome.is_pass());
}

#[test]
fn the_interrupted_code_is_neither_pass_nor_fail() {
    let outcome = RunOutcome::from_exit_code(EXIT_INTERRUPTED);
    assert_eq!(outcome, RunOutcome::Interrupted);
    assert!(!outcome.is_pass());
}

#[test]
fn any_other_nonzero_code_is_a_failure() {
    for code in [1, 3, 4, 127, -1] {
        let outcome = RunOutcome::from_exit_code(code);
        assert_eq!(outcome, RunOutcome::Failed, "code {code}");
        assert!(!outcome.is_pass());
    }
}
