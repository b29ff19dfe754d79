//! Property tests for [`automod::ModerationDetector`] against a reference model that keeps the
//! full message history. Sequences are drawn from a small alphabet with a seeded RNG so repeats
//! are frequent and failures reproducible.

use automod::{normalize, ModerationDetector, WINDOW_CAPACITY};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const ALPHABET: [&str; 4] = ["hi", "HI ", " hello", "spam spam"];

/// Reference: spam iff the last `threshold` normalized messages of the whole history are identical.
fn reference_is_spam(history: &[String], threshold: usize) -> bool {
    if threshold == 0 || history.len() < threshold {
        return false;
    }
    let tail = &history[history.len() - threshold..];
    tail.iter().all(|m| m == &tail[0])
}

/// **Test: is_spam agrees with the full-history model for every threshold up to the capacity.**
///
/// **Setup:** 200 random messages per threshold, one user.
/// **Expected:** Each is_spam result equals the reference; the window never exceeds capacity.
#[test]
fn test_is_spam_matches_reference_model() {
    let mut rng = StdRng::seed_from_u64(0x5eed);

    for threshold in 1..=WINDOW_CAPACITY {
        let detector = ModerationDetector::new();
        let mut history = Vec::new();

        for _ in 0..200 {
            let text = ALPHABET[rng.random_range(0..ALPHABET.len())];
            history.push(normalize(text));

            let got = detector.is_spam(42, text, threshold);
            assert_eq!(
                got,
                reference_is_spam(&history, threshold),
                "threshold={} history_len={}",
                threshold,
                history.len()
            );
            assert!(detector.window_len(42) <= WINDOW_CAPACITY);
        }
    }
}

/// **Test: A run of identical messages flips to spam exactly at the threshold-th message.**
#[test]
fn test_identical_run_fires_exactly_at_threshold() {
    for threshold in 1..=WINDOW_CAPACITY {
        let detector = ModerationDetector::new();
        for i in 1..=WINDOW_CAPACITY + 3 {
            assert_eq!(detector.is_spam(1, "again", threshold), i >= threshold);
        }
    }
}

/// **Test: Eleven distinct messages leave exactly the last ten in the window.**
#[test]
fn test_window_keeps_last_ten() {
    let detector = ModerationDetector::new();
    for i in 0..11 {
        assert!(!detector.is_spam(5, &format!("message {}", i), 3));
    }
    assert_eq!(detector.window_len(5), 10);
}

/// **Test: Empty strings are valid input and count as repeats of each other.**
#[test]
fn test_empty_messages() {
    let detector = ModerationDetector::new();
    assert!(!detector.contains_link(""));
    assert!(!detector.is_spam(9, "", 2));
    assert!(detector.is_spam(9, "   ", 2));
}
