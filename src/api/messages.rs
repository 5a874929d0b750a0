pub fn message_endpoint(id: &str) -> String {
    format!("/gmail/v1/users/me/messages/{id}")
}

pub fn list_endpoint() -> &'static str {
    "/gmail/v1/users/me/messages"
}

pub fn send_endpoint() -> &'static str {
    "/gmail/v1/users/me/messages/send"
}

pub fn attachment_endpoint(message_id: &str, attachment_id: &str) -> String {
    format!("/gmail/v1/users/me/messages/{message_id}/attachments/{attachment_id}")
}

pub fn get_query() -> Vec<(String, String)> {
    vec![("format".to_string(), "full".to_string())]
}

pub fn list_query(max_results: u32, query: &str) -> Vec<(String, String)> {
    let mut params = vec![("maxResults".to_string(), max_results.to_string())];
    let query = query.trim();
    if !query.is_empty() {
        params.push(("q".to_string(), query.to_string()));
    }
    params
}
