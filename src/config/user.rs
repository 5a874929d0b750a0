pub const DEFAULT_USER: &str = "default";

pub fn resolve_user(requested: &str) -> String {
    let trimmed = requested.trim();
    if trimmed.is_empty() {
        return DEFAULT_USER.to_string();
    }

    trimmed.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_user_falls_back_to_default() {
        assert_eq!(resolve_user("   "), "default");
        assert_eq!(resolve_user(" me@example.com "), "me@example.com");
    }
}
