/// Generate a fresh anonymous display name. Used at engine start and after
/// every lobby leave so a new session never inherits the old identity.
pub fn anonymous_name() -> String {
    petname::Petnames::default().generate_one(2, "-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymous_name_shape() {
        let name = anonymous_name();
        assert!(!name.is_empty());
        assert!(name.contains('-'));
    }
}
