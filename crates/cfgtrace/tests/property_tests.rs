//! Property-based tests for all parser backends
//!
//! Sentences are either derived from a reference grammar (so they are in the
//! language) or drawn at random from its vocabulary (so they mostly are not).

use cfgtrace::testing::{check_outcome, derive_sentence, grammars};
use cfgtrace::{parse, Algorithm, Grammar, ParseOptions, ParseOutcome};
use proptest::prelude::*;

fn run(grammar: &Grammar, tokens: &[&str], algorithm: Algorithm) -> ParseOutcome {
    let outcome = parse(grammar, tokens, algorithm, &ParseOptions::default())
        .unwrap_or_else(|err| panic!("{algorithm} errored on {tokens:?}: {err}"));
    if let Err(violation) = check_outcome(grammar, tokens, algorithm, &outcome) {
        panic!("{algorithm} on {tokens:?}: {violation}\n{}", outcome.trace);
    }
    outcome
}

fn english_words() -> impl Strategy<Value = Vec<&'static str>> {
    prop::collection::vec(prop::sample::select(&grammars::ENGLISH_WORDS[..]), 0..8)
}

fn nullable_words() -> impl Strategy<Value = Vec<&'static str>> {
    prop::collection::vec(prop::sample::select(&grammars::NULLABLE_WORDS[..]), 0..7)
}

fn anbn_words() -> impl Strategy<Value = Vec<&'static str>> {
    prop::collection::vec(prop::sample::select(&["a", "b"][..]), 0..9)
}

proptest! {
    #[test]
    fn traces_replay_for_every_parser(words in english_words()) {
        let grammar = grammars::english();
        for algorithm in Algorithm::ALL {
            run(&grammar, &words, algorithm);
        }
    }

    #[test]
    fn deterministic_parsers_are_pure(words in anbn_words()) {
        let grammar = grammars::anbn();
        for algorithm in [Algorithm::TopDown, Algorithm::BottomUp] {
            let first = run(&grammar, &words, algorithm);
            let second = run(&grammar, &words, algorithm);
            prop_assert_eq!(first.accepted, second.accepted);
            prop_assert_eq!(first.trace, second.trace);
        }
    }

    #[test]
    fn all_parsers_agree_on_english(words in english_words()) {
        let grammar = grammars::english();
        let verdicts: Vec<bool> = Algorithm::ALL
            .into_iter()
            .map(|algorithm| run(&grammar, &words, algorithm).accepted)
            .collect();
        prop_assert!(verdicts.iter().all(|&v| v == verdicts[0]), "{:?} on {:?}", verdicts, words);
    }

    #[test]
    fn derived_english_sentences_are_accepted(choices in prop::collection::vec(0usize..4, 0..16)) {
        let grammar = grammars::english();
        let sentence = derive_sentence(&grammar, &choices, 32).expect("english is finite");
        let words: Vec<&str> = sentence.iter().map(|word| word.as_str()).collect();
        for algorithm in Algorithm::ALL {
            prop_assert!(run(&grammar, &words, algorithm).accepted, "{} rejected {:?}", algorithm, words);
        }
    }

    #[test]
    fn backtracking_parsers_agree(words in anbn_words()) {
        let grammar = grammars::anbn();
        let top_down = run(&grammar, &words, Algorithm::TopDownBacktracking);
        let bottom_up = run(&grammar, &words, Algorithm::BottomUpBacktracking);
        prop_assert_eq!(top_down.accepted, bottom_up.accepted);

        let half = words.len() / 2;
        let expected = !words.is_empty()
            && words.len() % 2 == 0
            && words[..half].iter().all(|w| *w == "a")
            && words[half..].iter().all(|w| *w == "b");
        prop_assert_eq!(top_down.accepted, expected);
    }

    #[test]
    fn derived_parens_are_accepted_by_backtracking(choices in prop::collection::vec(0usize..2, 0..12)) {
        let grammar = grammars::parens();
        if let Some(sentence) = derive_sentence(&grammar, &choices, 24) {
            let words: Vec<&str> = sentence.iter().map(|word| word.as_str()).collect();
            prop_assert!(run(&grammar, &words, Algorithm::TopDownBacktracking).accepted);
            prop_assert!(run(&grammar, &words, Algorithm::BottomUpBacktracking).accepted);
        }
    }

    #[test]
    fn greedy_acceptance_implies_membership(words in anbn_words()) {
        let grammar = grammars::anbn();
        let member = run(&grammar, &words, Algorithm::BottomUpBacktracking).accepted;
        for algorithm in [Algorithm::TopDown, Algorithm::BottomUp] {
            if run(&grammar, &words, algorithm).accepted {
                prop_assert!(member, "{} accepted a non-member {:?}", algorithm, words);
            }
        }
    }

    #[test]
    fn derived_nullable_sentences_are_accepted_by_backtracking(choices in prop::collection::vec(0usize..2, 0..16)) {
        let grammar = grammars::nullable();
        if let Some(sentence) = derive_sentence(&grammar, &choices, 32) {
            let words: Vec<&str> = sentence.iter().map(|word| word.as_str()).collect();
            let top_down = run(&grammar, &words, Algorithm::TopDownBacktracking);
            let bottom_up = run(&grammar, &words, Algorithm::BottomUpBacktracking);
            prop_assert!(top_down.accepted, "top-down rejected {:?}", words);
            prop_assert!(bottom_up.accepted, "bottom-up rejected {:?}", words);
        }
    }

    #[test]
    fn backtracking_parsers_agree_on_nullable(words in nullable_words()) {
        let grammar = grammars::nullable();
        let top_down = run(&grammar, &words, Algorithm::TopDownBacktracking);
        let bottom_up = run(&grammar, &words, Algorithm::BottomUpBacktracking);
        prop_assert_eq!(top_down.accepted, bottom_up.accepted, "{:?}", words);
    }
}
