/*!
 * Tests for error types and their messages
 */

use argstash::{AppError, StorageError, ValidationError};

#[test]
fn test_validationError_wrongCount_shouldMentionExpectedArguments() {
    let error = ValidationError::WrongArgumentCount { found: 3 };

    assert_eq!(
        error.to_string(),
        "there should be 2 arguments separated by a whitespace character (got 3)"
    );
}

#[test]
fn test_validationError_tooLong_shouldMentionLimit() {
    let error = ValidationError::ArgumentTooLong {
        position: 2,
        length: 51,
        max: 50,
    };

    let message = error.to_string();
    assert!(message.contains("maximum length (50)"));
    assert!(message.contains("argument 2 has 51 characters"));
}

#[test]
fn test_appError_fromStorageError_shouldWrapMessage() {
    let error: AppError = StorageError::Disposed.into();

    assert!(matches!(error, AppError::Storage(StorageError::Disposed)));
    assert_eq!(error.to_string(), "Storage error: Storage has been disposed");
}

#[test]
fn test_appError_fromIoError_shouldBecomeConsoleError() {
    let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
    let error: AppError = io.into();

    assert!(matches!(error, AppError::Console(ref message) if message == "pipe closed"));
}

#[test]
fn test_storageError_corrupted_shouldReportLine() {
    let error = StorageError::Corrupted {
        line: 4,
        message: "ids out of order".to_string(),
    };

    assert_eq!(error.to_string(), "Corrupted storage at line 4: ids out of order");
}

#[test]
fn test_validationError_invalidEncoding_shouldNameUtf8() {
    let error: AppError = ValidationError::InvalidEncoding.into();

    assert_eq!(error.to_string(), "Invalid input: input is not valid UTF-8 text");
}
