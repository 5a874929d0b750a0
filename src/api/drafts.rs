pub fn drafts_endpoint() -> &'static str {
    "/gmail/v1/users/me/drafts"
}

pub fn draft_endpoint(id: &str) -> String {
    format!("/gmail/v1/users/me/drafts/{id}")
}
