use base64::Engine;
use base64::engine::general_purpose::{URL_SAFE, URL_SAFE_NO_PAD};

use super::models::{Format, MessageHeader, MessagePart, ProjectedMessage, RawMessage};

/// Maps a provider message into the requested output shape. Pure and total:
/// absent fields become empty strings, never errors.
pub fn project(raw: &RawMessage, format: Format) -> ProjectedMessage {
    let id = raw.id.clone();
    let thread_id = raw.thread_id.clone().unwrap_or_default();

    if format == Format::Minimal {
        return ProjectedMessage::Minimal { id, thread_id };
    }

    let headers = raw
        .payload
        .as_ref()
        .map(|payload| payload.headers.as_slice())
        .unwrap_or_default();

    let subject = header_value(headers, "Subject");
    let from = header_value(headers, "From");
    let to = header_value(headers, "To");
    let date = header_value(headers, "Date");
    let snippet = raw.snippet.clone().unwrap_or_default();

    match format {
        Format::Minimal => unreachable!("handled above"),
        Format::Metadata => ProjectedMessage::Metadata {
            id,
            thread_id,
            subject,
            from,
            to,
            date,
            snippet,
        },
        Format::Full => {
            let body = raw
                .payload
                .as_ref()
                .map(plain_text_body)
                .unwrap_or_default();
            ProjectedMessage::Full {
                id,
                thread_id,
                subject,
                from,
                to,
                date,
                snippet,
                body,
            }
        }
    }
}

/// Case-sensitive lookup against the top-level payload's header list.
fn header_value(headers: &[MessageHeader], target: &str) -> String {
    headers
        .iter()
        .find(|header| header.name == target)
        .map(|header| header.value.clone())
        .unwrap_or_default()
}

/// First `text/plain` part by depth-first traversal of the payload tree,
/// decoded from base64url. No such part, or undecodable data, yields an
/// empty string.
fn plain_text_body(payload: &MessagePart) -> String {
    find_plain_text(payload)
        .and_then(|part| part.body.as_ref())
        .and_then(|body| body.data.as_deref())
        .map(decode_part_data)
        .unwrap_or_default()
}

fn find_plain_text(part: &MessagePart) -> Option<&MessagePart> {
    if part.mime_type.as_deref() == Some("text/plain") {
        return Some(part);
    }

    part.parts.iter().find_map(find_plain_text)
}

fn decode_part_data(data: &str) -> String {
    // The provider emits base64url; padding varies by client.
    let bytes = URL_SAFE_NO_PAD
        .decode(data)
        .or_else(|_| URL_SAFE.decode(data));

    bytes
        .ok()
        .and_then(|bytes| String::from_utf8(bytes).ok())
        .unwrap_or_default()
}
