//! End-to-end scenarios run through every parser.

use cfgtrace::testing::{check_outcome, grammars};
use cfgtrace::{parse, Action, Algorithm, Grammar, ParseOptions, ParseOutcome, Symbol};

fn run(grammar: &Grammar, sentence: &str, algorithm: Algorithm) -> ParseOutcome {
    let tokens = cfgtrace::tokenize(sentence);
    let outcome = parse(grammar, &tokens, algorithm, &ParseOptions::default())
        .unwrap_or_else(|err| panic!("{algorithm} failed on {sentence:?}: {err}"));

    let words: Vec<&str> = tokens.iter().map(|token| token.as_str()).collect();
    if let Err(violation) = check_outcome(grammar, &words, algorithm, &outcome) {
        panic!("{algorithm} produced an invalid trace for {sentence:?}: {violation}\n{}", outcome.trace);
    }
    outcome
}

fn actions(outcome: &ParseOutcome) -> Vec<Action> {
    outcome.trace.iter().map(|step| step.action).collect()
}

fn t(literal: &str) -> Symbol {
    Symbol::terminal(literal)
}

fn n(name: &str) -> Symbol {
    Symbol::nonterminal(name)
}

#[test]
fn scenario_a_all_parsers_accept() {
    let grammar = grammars::english();
    for algorithm in Algorithm::ALL {
        let outcome = run(&grammar, "the man hit the dog", algorithm);
        assert!(outcome.accepted, "{algorithm}");
        assert_eq!(outcome.trace.final_action(), Some(Action::Accept), "{algorithm}");
        assert_eq!(outcome.metrics.tokens_consumed, 5, "{algorithm}");
    }
}

#[test]
fn scenario_a_input_is_case_insensitive() {
    let grammar = grammars::english();
    let outcome = run(&grammar, "The MAN hit the Dog", Algorithm::BottomUp);
    assert!(outcome.accepted);
}

#[test]
fn scenario_a_greedy_path_is_the_backtracking_path() {
    let grammar = grammars::english();
    let sentence = "the man hit the dog";

    let top_down = run(&grammar, sentence, Algorithm::TopDown);
    let top_down_bt = run(&grammar, sentence, Algorithm::TopDownBacktracking);
    assert_eq!(top_down.trace, top_down_bt.trace);

    let bottom_up = run(&grammar, sentence, Algorithm::BottomUp);
    let bottom_up_bt = run(&grammar, sentence, Algorithm::BottomUpBacktracking);
    assert_eq!(bottom_up.trace, bottom_up_bt.trace);
}

#[test]
fn scenario_a_bottom_up_trace() {
    let grammar = grammars::english();
    let outcome = run(&grammar, "the man hit the dog", Algorithm::BottomUp);
    let lines: Vec<String> = outcome.trace.iter().map(ToString::to_string).collect();
    assert_eq!(
        lines,
        [
            "shift  [] @0",
            "reduce [[the]] @1  det --> [the]",
            "shift  [det] @1",
            "reduce [det, [man]] @2  n --> [man]",
            "reduce [det, n] @2  np --> det, n",
            "shift  [np] @2",
            "reduce [np, [hit]] @3  tv --> [hit]",
            "shift  [np, tv] @3",
            "reduce [np, tv, [the]] @4  det --> [the]",
            "shift  [np, tv, det] @4",
            "reduce [np, tv, det, [dog]] @5  n --> [dog]",
            "reduce [np, tv, det, n] @5  np --> det, n",
            "reduce [np, tv, np] @5  vp --> tv, np",
            "reduce [np, vp] @5  s --> np, vp",
            "accept [s] @5",
        ]
    );
}

#[test]
fn scenario_b_all_parsers_reject() {
    let grammar = grammars::english();
    for algorithm in Algorithm::ALL {
        let outcome = run(&grammar, "the dog barked", algorithm);
        assert!(!outcome.accepted, "{algorithm}");
        if algorithm.is_backtracking() {
            assert!(outcome.trace.is_empty(), "{algorithm}");
        } else {
            assert_eq!(outcome.trace.final_action(), Some(Action::Reject), "{algorithm}");
        }
    }
}

#[test]
fn scenario_b_top_down_stops_at_verb() {
    let grammar = grammars::english();
    let outcome = run(&grammar, "the dog barked", Algorithm::TopDown);
    assert_eq!(
        actions(&outcome),
        [
            Action::Expand,
            Action::Expand,
            Action::Leaf,
            Action::Leaf,
            Action::Expand,
            Action::Reject
        ]
    );
    let last = outcome.trace.last().unwrap();
    assert_eq!(last.stack, [n("np"), n("tv")]);
    assert_eq!(last.cursor, 2);
}

#[test]
fn scenario_c_top_down_rejects_greedily() {
    let grammar = grammars::anbn();
    let outcome = run(&grammar, "a a b b", Algorithm::TopDown);
    assert!(!outcome.accepted);
    assert_eq!(
        actions(&outcome),
        [
            Action::Expand,
            Action::Leaf,
            Action::Expand,
            Action::Leaf,
            Action::Expand,
            Action::Reject
        ]
    );
    // Bare terminals are consumed without a rule.
    assert!(outcome.trace.steps()[1].rule.is_none());

    let last = outcome.trace.last().unwrap();
    assert_eq!(last.stack, [t("b"), t("b"), t("b"), n("s"), t("a")]);
    assert_eq!(last.cursor, 2);
}

#[test]
fn scenario_c_bottom_up_accepts() {
    let grammar = grammars::anbn();
    let outcome = run(&grammar, "a a b b", Algorithm::BottomUp);
    assert!(outcome.accepted);
    assert_eq!(
        actions(&outcome),
        [
            Action::Shift,
            Action::Shift,
            Action::Shift,
            Action::Reduce,
            Action::Shift,
            Action::Reduce,
            Action::Accept
        ]
    );
    assert_eq!(outcome.trace.steps()[4].stack, [t("a"), n("s")]);
}

#[test]
fn scenario_c_backtracking_parsers_accept() {
    let grammar = grammars::anbn();

    let top_down = run(&grammar, "a a b b", Algorithm::TopDownBacktracking);
    assert!(top_down.accepted);
    let steps = top_down.trace.steps();
    assert_eq!(steps.len(), 3);
    assert_eq!(steps[0].rule.as_ref(), grammar.rule(0));
    assert_eq!(steps[1].rule.as_ref(), grammar.rule(1));
    assert_eq!(steps[1].stack, [t("b"), n("s")]);
    assert_eq!((steps[2].action, steps[2].cursor), (Action::Accept, 4));

    let bottom_up = run(&grammar, "a a b b", Algorithm::BottomUpBacktracking);
    assert!(bottom_up.accepted);
    assert_eq!(bottom_up.trace.last().map(|step| step.stack.clone()), Some(vec![n("s")]));
}

#[test]
fn empty_sentence_with_epsilon_start() {
    let grammar = grammars::epsilon();
    for algorithm in Algorithm::ALL {
        let outcome = run(&grammar, "", algorithm);
        assert!(outcome.accepted, "{algorithm}");

        let expected = match algorithm.direction() {
            cfgtrace::backend::Direction::TopDown => [Action::Expand, Action::Accept],
            cfgtrace::backend::Direction::BottomUp => [Action::Reduce, Action::Accept],
        };
        assert_eq!(actions(&outcome), expected, "{algorithm}");
        assert!(outcome.trace.steps()[0].rule.as_ref().is_some_and(|rule| rule.is_epsilon()));
    }
}

#[test]
fn balanced_parentheses_with_backtracking() {
    let grammar = grammars::parens();
    for algorithm in [Algorithm::TopDownBacktracking, Algorithm::BottomUpBacktracking] {
        for sentence in ["", "lp rp", "lp lp rp rp", "lp rp lp rp"] {
            assert!(run(&grammar, sentence, algorithm).accepted, "{algorithm} {sentence:?}");
        }
        for sentence in ["lp", "rp lp", "lp rp rp"] {
            assert!(!run(&grammar, sentence, algorithm).accepted, "{algorithm} {sentence:?}");
        }
    }
}
