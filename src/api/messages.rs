use super::models::Format;

pub fn list_endpoint() -> &'static str {
    "/gmail/v1/users/me/messages"
}

pub fn message_endpoint(id: &str) -> String {
    format!("/gmail/v1/users/me/messages/{id}")
}

pub fn send_endpoint() -> &'static str {
    "/gmail/v1/users/me/messages/send"
}

pub fn list_query(max_results: u32, query: &str) -> Vec<(String, String)> {
    vec![
        ("maxResults".to_string(), max_results.to_string()),
        ("q".to_string(), query.to_string()),
    ]
}

/// Query parameters for the per-message detail fetch. Metadata fetches name
/// the headers the projection consumes; full fetches need the payload tree.
pub fn get_query(format: Format) -> Vec<(String, String)> {
    let mut params = vec![("format".to_string(), format.api_param().to_string())];

    if format == Format::Metadata {
        for header in ["Subject", "From", "To", "Date"] {
            params.push(("metadataHeaders".to_string(), header.to_string()));
        }
    }

    params
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_fetch_names_projection_headers() {
        let params = get_query(Format::Metadata);
        assert_eq!(
            params[0],
            ("format".to_string(), "metadata".to_string())
        );
        let headers: Vec<&str> = params
            .iter()
            .filter(|(key, _)| key == "metadataHeaders")
            .map(|(_, value)| value.as_str())
            .collect();
        assert_eq!(headers, ["Subject", "From", "To", "Date"]);
    }

    #[test]
    fn full_fetch_requests_full_format_only() {
        let params = get_query(Format::Full);
        assert_eq!(params, [("format".to_string(), "full".to_string())]);
    }
}
