use intcalc::interpreter::errors::ArithmeticError;
use intcalc::parser::parse::ParseError;
use intcalc::{evaluate_str, Error};

#[test]
fn test_precedence_over_samples() {
    let samples = [0i64, 1, 2, 7, 13, 100, 9999];
    for &a in &samples {
        for &b in &samples {
            for &c in &samples {
                let source = format!("{}+{}*{}", a, b, c);
                assert_eq!(evaluate_str(&source).unwrap(), a + (b * c), "{}", source);

                let source = format!("{}-{}-{}", a, b, c);
                assert_eq!(evaluate_str(&source).unwrap(), (a - b) - c, "{}", source);
            }
        }
    }
}

#[test]
fn test_mixed_expressions() {
    let cases = [
        ("1", 1),
        ("2*3+4*5", 26),
        ("100/10/5", 2),
        ("2*3/4", 1),
        ("2/4*3", 0),
        ("1-2*3+4", -1),
        ("8-6/3*2", 4),
        ("7/2", 3),
        ("1-5/2", -1),
    ];

    for (source, expected) in cases {
        assert_eq!(evaluate_str(source).unwrap(), expected, "{}", source);
    }
}

#[test]
fn test_results_below_zero() {
    assert_eq!(evaluate_str("0-7/2").unwrap(), -3);
    assert_eq!(evaluate_str("3-10").unwrap(), -7);
}

#[test]
fn test_i64_bounds() {
    assert_eq!(evaluate_str("9223372036854775807").unwrap(), i64::MAX);
    assert_eq!(evaluate_str("0-9223372036854775807-1").unwrap(), i64::MIN);
}

#[test]
fn test_overflow_is_an_error() {
    for source in [
        "9223372036854775807+1",
        "0-9223372036854775807-2",
        "4611686018427387904*2",
    ] {
        assert!(
            matches!(
                evaluate_str(source),
                Err(Error::Arithmetic(ArithmeticError::Overflow { .. }))
            ),
            "{}",
            source
        );
    }
}

#[test]
fn test_oversized_literal_is_rejected() {
    let err = evaluate_str("99999999999999999999").unwrap_err();
    match err {
        Error::Parse(ParseError::Syntax { message, .. }) => {
            assert_eq!(message, "Integer literal out of range: 99999999999999999999");
        }
        other => panic!("Expected syntax error, got {:?}", other),
    }
}

#[test]
fn test_long_chains() {
    let sum = vec!["1"; 200_000].join("+");
    assert_eq!(evaluate_str(&sum).unwrap(), 200_000);

    let product = vec!["1"; 200_000].join("*");
    assert_eq!(evaluate_str(&product).unwrap(), 1);

    let difference = format!("1000000-{}", vec!["2"; 250_000].join("-"));
    assert_eq!(evaluate_str(&difference).unwrap(), 500_000);
}

#[test]
fn test_long_chain_reports_division_by_zero() {
    let source = format!("{}/0+1", vec!["7"; 200_000].join("+"));
    assert!(matches!(
        evaluate_str(&source),
        Err(Error::Arithmetic(ArithmeticError::DivisionByZero { .. }))
    ));
}
