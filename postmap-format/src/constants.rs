//! Constants and wire formats

/// `strftime` pattern for timestamps carrying a UTC offset ("2015-03-01T10:00:00+02:00").
pub const TIMESTAMP_OFFSET_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%:z";
/// `strftime` pattern for timestamps without offset ("2015-03-01T10:00:00").
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Delimiter used when a list is flattened into one query-string value.
pub const DEFAULT_LIST_DELIMITER: &str = ",";
/// Separator between addresses in a computed `CC` header.
pub const CC_HEADER_SEPARATOR: &str = ", ";

/// Key of the recipient type placeholder that never reaches the wire.
pub const KEY_TYPE: &str = "type";
/// Key holding per-message substitution data.
pub const KEY_SUBSTITUTION_DATA: &str = "substitution_data";
/// Key holding inline recipients or a stored list reference.
pub const KEY_RECIPIENTS: &str = "recipients";
/// Key referencing a stored recipient list.
pub const KEY_LIST_ID: &str = "list_id";
/// Key of the content block inside a transmission.
pub const KEY_CONTENT: &str = "content";
/// Key of the header map inside a content block.
pub const KEY_HEADERS: &str = "headers";
/// Key of the address block inside a recipient.
pub const KEY_ADDRESS: &str = "address";
/// Key of the displayed `To` address inside an address block.
pub const KEY_HEADER_TO: &str = "header_to";
/// Header carrying carbon-copy addresses.
pub const HEADER_CC: &str = "CC";
