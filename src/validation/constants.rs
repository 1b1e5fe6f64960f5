/// Minimum length for todo titles.
pub const MIN_TITLE_LEN: usize = 10;

/// Maximum length for todo titles.
pub const MAX_TITLE_LEN: usize = 200;

/// Maximum length for todo descriptions.
pub const MAX_DESCRIPTION_LEN: usize = 10000;
