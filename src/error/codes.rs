/// Error code registry for the telemetry aggregator
///
/// Error codes are organized by category:
/// - 1000-1999: Configuration errors
/// - 2000-2999: Dataset errors
/// - 3000-3999: Request validation errors
/// - 4000-4999: Server errors
/// - 5000-5999: Aggregation errors
pub struct ErrorCode;

impl ErrorCode {
    // Configuration errors (1000-1999)
    pub const CONFIG_NOT_FOUND: u16 = 1001;
    pub const CONFIG_INVALID_TOML: u16 = 1002;
    pub const CONFIG_INVALID_VALUE: u16 = 1005;

    // Dataset errors (2000-2999)
    pub const DATASET_NOT_FOUND: u16 = 2001;
    pub const DATASET_READ_FAILED: u16 = 2002;
    pub const DATASET_INVALID_JSON: u16 = 2003;

    // Request validation errors (3000-3999)
    pub const VALIDATION_INVALID_FIELD: u16 = 3001;
    pub const VALIDATION_MALFORMED_BODY: u16 = 3002;
    pub const VALIDATION_UNSUPPORTED_MEDIA_TYPE: u16 = 3003;

    // Server errors (4000-4999)
    pub const SERVER_BIND_FAILED: u16 = 4001;
    pub const SERVER_IO: u16 = 4002;

    // Aggregation errors (5000-5999)
    pub const AGGREGATION_ROUNDING: u16 = 5001;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_categories() {
        assert!((1000..2000).contains(&ErrorCode::CONFIG_INVALID_VALUE));
        assert!((2000..3000).contains(&ErrorCode::DATASET_INVALID_JSON));
        assert!((3000..4000).contains(&ErrorCode::VALIDATION_INVALID_FIELD));
        assert!((4000..5000).contains(&ErrorCode::SERVER_BIND_FAILED));
        assert!((5000..6000).contains(&ErrorCode::AGGREGATION_ROUNDING));
    }
}
