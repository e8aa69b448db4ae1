/*!
 * Tests for operator input validation
 */

use argstash::session::MAX_ARGUMENT_LENGTH;
use argstash::{ArgumentPair, NewArguments, ValidationError};

#[test]
fn test_parse_withWindowsLineEnding_shouldStripIt() {
    let pair = ArgumentPair::parse("10 20\r\n", MAX_ARGUMENT_LENGTH).unwrap();

    assert_eq!(pair.to_new_arguments(), NewArguments::new("10", "20"));
}

#[test]
fn test_parse_withSingleToken_shouldReportCount() {
    let result = ArgumentPair::parse("lonely", MAX_ARGUMENT_LENGTH);

    assert_eq!(result, Err(ValidationError::WrongArgumentCount { found: 1 }));
}

#[test]
fn test_parse_withExactlyFiftyCharacters_shouldSucceed() {
    let long = "y".repeat(50);
    let pair = ArgumentPair::parse(&format!("{} z", long), MAX_ARGUMENT_LENGTH).unwrap();

    assert_eq!(pair.first(), long);
}

#[test]
fn test_parse_withFiftyOneCharacterFirstArgument_shouldReportPosition() {
    let input = format!("{} z", "y".repeat(51));
    let result = ArgumentPair::parse(&input, MAX_ARGUMENT_LENGTH);

    assert!(matches!(
        result,
        Err(ValidationError::ArgumentTooLong { position: 1, length: 51, .. })
    ));
}

#[test]
fn test_parse_withLowerLimit_shouldUseIt() {
    let result = ArgumentPair::parse("abcd ef", 3);

    assert_eq!(
        result,
        Err(ValidationError::ArgumentTooLong {
            position: 1,
            length: 4,
            max: 3
        })
    );
}

#[test]
fn test_fromParts_withEmptySecond_shouldReportEmptyArgument() {
    let result = ArgumentPair::from_parts("a", "", MAX_ARGUMENT_LENGTH);

    assert_eq!(result, Err(ValidationError::EmptyArgument { position: 2 }));
}
