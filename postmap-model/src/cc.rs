//! Carbon-copy handling for transmissions
//!
//! CC and BCC recipients are sent like any other recipient; what makes them
//! copies is header bookkeeping on the already-mapped transmission. The `CC`
//! header lists the CC addresses, and every copy is told which primary
//! recipient the `To` header names.

use crate::recipient::RecipientType;
use crate::transmission::Transmission;
use postmap_format::constants::{
    CC_HEADER_SEPARATOR, HEADER_CC, KEY_ADDRESS, KEY_CONTENT, KEY_HEADERS, KEY_HEADER_TO,
    KEY_RECIPIENTS,
};
use postmap_format::{WireMapping, WireValue};
use tracing::trace;

/// Add the copy headers of `transmission` to its mapped form
///
/// Does nothing when the transmission sends to a stored list, since the
/// inline recipients are not part of the payload then.
pub fn apply_copy_headers(transmission: &Transmission, result: &mut WireMapping) {
    if transmission.list_id.is_some() {
        return;
    }

    let cc_emails: Vec<&str> = transmission
        .recipients
        .iter()
        .filter(|r| r.recipient_type == RecipientType::Cc)
        .filter_map(|r| r.email())
        .collect();
    if !cc_emails.is_empty() {
        set_cc_header(result, cc_emails.join(CC_HEADER_SEPARATOR));
    }

    let primary = transmission
        .recipients
        .iter()
        .filter(|r| r.recipient_type == RecipientType::To)
        .find_map(|r| r.email());
    if let Some(primary) = primary {
        set_header_to(transmission, result, primary);
    }
}

fn set_cc_header(result: &mut WireMapping, header: String) {
    let content = result
        .entry(KEY_CONTENT)
        .or_insert_with(|| WireValue::Object(WireMapping::new()));
    let Some(content) = content.as_object_mut() else {
        return;
    };
    let headers = content
        .entry(KEY_HEADERS)
        .or_insert_with(|| WireValue::Object(WireMapping::new()));
    if let Some(headers) = headers.as_object_mut() {
        trace!(header = %header, "setting CC header");
        headers.insert(HEADER_CC.to_string(), WireValue::String(header));
    }
}

fn set_header_to(transmission: &Transmission, result: &mut WireMapping, primary: &str) {
    let Some(mapped) = result
        .get_mut(KEY_RECIPIENTS)
        .and_then(WireValue::as_array_mut)
    else {
        return;
    };

    // Recipient routines never map a recipient to absent, so positions line up.
    for (recipient, wire) in transmission.recipients.iter().zip(mapped.iter_mut()) {
        if !recipient.recipient_type.is_copy() {
            continue;
        }
        let has_header_to = recipient
            .address
            .as_ref()
            .is_some_and(|a| a.header_to.is_some());
        if has_header_to {
            continue;
        }
        if let Some(address) = wire.get_mut(KEY_ADDRESS).and_then(WireValue::as_object_mut) {
            address.insert(
                KEY_HEADER_TO.to_string(),
                WireValue::String(primary.to_string()),
            );
        }
    }
}
