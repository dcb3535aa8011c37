use plural_expression::{CompileError, MAX_DEPTH, compile_expression};
use pretty_assertions::assert_eq;

fn assert_matches_reference(source: &str, reference: impl Fn(i64) -> i64) {
    let evaluator = compile_expression(source)
        .unwrap_or_else(|e| panic!("Expression compilation failed: {}\n{}", source, e));
    for n in 0..100 {
        assert_eq!(evaluator.eval(n), reference(n), "{} with n = {}", source, n);
    }
}

fn truth(b: bool) -> i64 {
    b as i64
}

#[test]
fn test_simple_expressions() {
    assert_matches_reference("n % 10 ? 1 : n >= 2 ? 2 : 3", |n| {
        if n % 10 != 0 {
            1
        } else if n >= 2 {
            2
        } else {
            3
        }
    });
}

#[test]
fn test_parenthesized_expressions() {
    assert_matches_reference("(n + 1) * (n + 2)", |n| (n + 1) * (n + 2));
}

#[test]
fn test_precedence() {
    assert_matches_reference("n * 3 + n * 2", |n| n * 3 + n * 2);
    assert_matches_reference("n + 3 * n + 2", |n| n + 3 * n + 2);
    assert_matches_reference("n - 3 - 2", |n| n - 3 - 2);
    assert_matches_reference("n - 3 + 2", |n| n - 3 + 2);
}

#[test]
fn test_comparisons_yield_zero_or_one() {
    assert_matches_reference("n == 1", |n| truth(n == 1));
    assert_matches_reference("n != 1", |n| truth(n != 1));
    assert_matches_reference("n > 1", |n| truth(n > 1));
    assert_matches_reference("n >= 2", |n| truth(n >= 2));
    assert_matches_reference("n < 2", |n| truth(n < 2));
    assert_matches_reference("n <= 1", |n| truth(n <= 1));
}

#[test]
fn test_logic_operators() {
    assert_matches_reference("n % 3 && n % 5", |n| truth(n % 3 != 0 && n % 5 != 0));
    assert_matches_reference("n % 3 || n % 5", |n| truth(n % 3 != 0 || n % 5 != 0));
    assert_matches_reference("n == 0 || n == 1 && n > 5", |n| {
        truth(n == 0 || (n == 1 && n > 5))
    });
}

#[test]
fn test_gettext_plural_rules() {
    // French
    assert_matches_reference("n > 1", |n| truth(n > 1));
    // Polish
    assert_matches_reference(
        "n==1 ? 0 : n%10>=2 && n%10<=4 && (n%100<10 || n%100>=20) ? 1 : 2",
        |n| {
            if n == 1 {
                0
            } else if (2..=4).contains(&(n % 10)) && (n % 100 < 10 || n % 100 >= 20) {
                1
            } else {
                2
            }
        },
    );
    // Arabic
    assert_matches_reference(
        "n==0 ? 0 : n==1 ? 1 : n==2 ? 2 : n%100>=3 && n%100<=10 ? 3 : n%100>=11 ? 4 : 5",
        |n| match (n, n % 100) {
            (0, _) => 0,
            (1, _) => 1,
            (2, _) => 2,
            (_, 3..=10) => 3,
            (_, 11..) => 4,
            _ => 5,
        },
    );
}

#[test]
fn test_compiling_twice_gives_equal_evaluators() {
    let source = "n%10==1 && n%100!=11 ? 0 : n != 0 ? 1 : 2";
    let first = compile_expression(source).unwrap();
    let second = compile_expression(source).unwrap();
    for n in -50..500 {
        assert_eq!(first.eval(n), second.eval(n));
    }
}

#[test]
fn test_negative_inputs() {
    assert_matches_reference("n - 200", |n| n - 200);
    let evaluator = compile_expression("n % 10 < 0 ? 1 : 0").unwrap();
    assert_eq!(evaluator.eval(-13), 1);
    assert_eq!(evaluator.eval(13), 0);
}

#[test]
fn test_whitespace_is_insignificant() {
    let spaced = compile_expression("  n  %  10  ==  1\n").unwrap();
    let packed = compile_expression("n%10==1").unwrap();
    for n in 0..100 {
        assert_eq!(spaced.eval(n), packed.eval(n));
    }
}

#[test]
fn test_malformed_expressions_are_rejected() {
    for source in ["(n + 1", ")", "1 2", "1 +", "1 + /", "1 + _", "", "n ? 1", "(n + 1)))))"] {
        assert!(
            compile_expression(source).is_err(),
            "{:?} should not compile",
            source
        );
    }
}

#[test]
fn test_error_kinds() {
    assert!(matches!(
        compile_expression("1 + /"),
        Err(CompileError::LexerError { .. })
    ));
    assert!(matches!(
        compile_expression("1 + _"),
        Err(CompileError::LexerError { .. })
    ));
    assert!(matches!(
        compile_expression("1 2"),
        Err(CompileError::SyntaxError { .. })
    ));
    assert!(matches!(
        compile_expression("(n + 1"),
        Err(CompileError::SyntaxError { .. })
    ));
}

#[test]
fn test_lexer_error_message() {
    let err = compile_expression("n >= 2 ? @@@@@@@@@@@@@@@@ : 1").unwrap_err();
    assert_eq!(err.to_string(), "Unexpected characters \"@@@@@@@@@@...\" at 1:10");
}

#[test]
#[should_panic]
fn test_remainder_by_zero_panics_at_evaluation() {
    let evaluator = compile_expression("n % 0").expect("compiles fine");
    evaluator.eval(3);
}

#[test]
fn test_deep_nesting_is_an_error_not_a_crash() {
    let brackets = format!("{}n{}", "(".repeat(100_000), ")".repeat(100_000));
    assert!(matches!(
        compile_expression(&brackets),
        Err(CompileError::TooDeep { .. })
    ));

    let chain = vec!["n"; 200_000].join(" + ");
    assert!(matches!(
        compile_expression(&chain),
        Err(CompileError::TooDeep { .. })
    ));
}

#[test]
fn test_deepest_accepted_chain_still_evaluates() {
    let terms = MAX_DEPTH;
    let evaluator = compile_expression(&vec!["n"; terms].join(" + ")).unwrap();
    assert_eq!(evaluator.eval(3), 3 * terms as i64);
}
