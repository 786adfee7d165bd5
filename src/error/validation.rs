use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Duration must not be empty.")]
    DurationEmpty,
    #[error("Invalid duration '{value}'.")]
    InvalidDurationFormat { value: String },
    #[error("Invalid duration '{value}': {source}")]
    InvalidDurationNumber {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("Duration overflow.")]
    DurationOverflow,
    #[error("Invalid duration unit '{unit}'.")]
    InvalidDurationUnit { unit: String },
    #[error("Duration must be > 0.")]
    DurationZero,
    #[error("Value must be >= {min}.")]
    ValueTooSmall { min: u64 },
    #[error("Invalid value: {source}")]
    InvalidNumber {
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("Missing URL (pass it as an argument or set `url` in the config file).")]
    MissingUrl,
    #[error("Invalid credentials '{value}'. Expected 'user:password'.")]
    InvalidCredentials { value: String },
    #[error("Credentials user name must not be empty.")]
    EmptyCredentialsUser,
    #[error("The {field} template uses $RDICT but the dictionary is empty (set --dict).")]
    DictionaryRequired { field: &'static str },
    #[error("Total request count overflows ({workers} workers x {iterations} iterations).")]
    TotalRequestsOverflow { workers: usize, iterations: u64 },
    #[cfg(test)]
    #[error("Test expectation failed: {message}")]
    TestExpectation { message: &'static str },
    #[cfg(test)]
    #[error("Test expectation failed: {message}: {value}")]
    TestExpectationValue {
        message: &'static str,
        value: String,
    },
}
