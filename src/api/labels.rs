/// Provider-defined label names that cannot be created, renamed, or deleted.
const SYSTEM_LABELS: &[&str] = &[
    "INBOX",
    "SENT",
    "DRAFT",
    "SPAM",
    "TRASH",
    "UNREAD",
    "STARRED",
    "IMPORTANT",
];

const SYSTEM_CATEGORY_PREFIX: &str = "CATEGORY_";

pub fn is_system_label(name: &str) -> bool {
    let upper = name.trim().to_ascii_uppercase();
    SYSTEM_LABELS.contains(&upper.as_str()) || upper.starts_with(SYSTEM_CATEGORY_PREFIX)
}

pub fn labels_endpoint() -> &'static str {
    "/gmail/v1/users/me/labels"
}

pub fn modify_message_endpoint(id: &str) -> String {
    format!("/gmail/v1/users/me/messages/{id}/modify")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_system_labels_regardless_of_case() {
        assert!(is_system_label("INBOX"));
        assert!(is_system_label("inbox"));
        assert!(is_system_label(" Trash "));
        assert!(is_system_label("CATEGORY_SOCIAL"));
    }

    #[test]
    fn user_labels_are_not_system() {
        assert!(!is_system_label("Work/Projects"));
        assert!(!is_system_label("Urgent"));
        assert!(!is_system_label("inbox-zero"));
    }
}
