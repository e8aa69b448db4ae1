/*!
 * Tests for argument combination
 */

use argstash::{CombinePolicy, Combiner};

#[test]
fn test_combine_withNumericPairs_shouldAdd() {
    let combiner = Combiner::default();

    assert_eq!(combiner.combine("3", "4"), "7");
    assert_eq!(combiner.combine("10", "20"), "30");
    assert_eq!(combiner.combine("1.5", "2"), "3.5");
}

#[test]
fn test_combine_withTextPair_shouldConcatenate() {
    let combiner = Combiner::default();

    assert_eq!(combiner.combine("foo", "bar"), "foobar");
}

#[test]
fn test_combine_withConcatenatePolicy_shouldIgnoreNumbers() {
    let combiner = Combiner::new(CombinePolicy::Concatenate);

    assert_eq!(combiner.combine("3", "4"), "34");
    assert_eq!(combiner.policy(), CombinePolicy::Concatenate);
}

#[test]
fn test_combine_withSpecialFloatSpellings_shouldConcatenate() {
    let combiner = Combiner::default();

    assert_eq!(combiner.combine("inf", "1"), "inf1");
    assert_eq!(combiner.combine("NaN", "NaN"), "NaNNaN");
}

#[test]
fn test_combine_withOverflowingIntegers_shouldConcatenate() {
    let max = i128::MAX.to_string();
    let combiner = Combiner::default();

    assert_eq!(combiner.combine(&max, "1"), format!("{}1", max));
}

#[test]
fn test_combine_withOppositeZeros_shouldPrintPlainZero() {
    assert_eq!(Combiner::default().combine("-0.0", "0.0"), "0");
}

#[test]
fn test_policy_fromStr_shouldAcceptAliases() {
    assert_eq!("sum".parse::<CombinePolicy>().unwrap(), CombinePolicy::NumericSum);
    assert_eq!("CONCAT".parse::<CombinePolicy>().unwrap(), CombinePolicy::Concatenate);
    assert!("multiply".parse::<CombinePolicy>().is_err());
}
