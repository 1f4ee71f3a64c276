//! Well-known role names and the capability checks built on them.
//!
//! Public accounts always carry [`ROLE_USER`]. Back-office accounts carry one
//! of the admin roles; the stored form must match the `CHECK` constraint on
//! `admins.role`.

/// Role embedded in tokens issued to public site accounts.
pub const ROLE_USER: &str = "user";

pub const ROLE_SUPER_ADMIN: &str = "super_admin";
pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_CONTENT_MODERATOR: &str = "content_moderator";

/// All valid admin roles, highest privilege first.
pub const ADMIN_ROLES: &[&str] = &[ROLE_SUPER_ADMIN, ROLE_ADMIN, ROLE_CONTENT_MODERATOR];

/// Whether the role belongs to a back-office account.
pub fn is_admin_role(role: &str) -> bool {
    ADMIN_ROLES.contains(&role)
}

/// Normalize an admin role from user input.
///
/// Accepts both the stored form (`super_admin`) and the upper-case form used
/// by the dashboard (`SUPER_ADMIN`). Returns the stored form.
pub fn parse_admin_role(input: &str) -> Result<&'static str, String> {
    let lowered = input.trim().to_ascii_lowercase();
    ADMIN_ROLES
        .iter()
        .find(|r| **r == lowered)
        .copied()
        .ok_or_else(|| {
            format!(
                "Invalid admin role '{input}'. Must be one of: {}",
                ADMIN_ROLES.join(", ")
            )
        })
}

/// Only super admins create, edit or remove other admins.
pub fn can_manage_admins(role: &str) -> bool {
    role == ROLE_SUPER_ADMIN
}

/// Movies, persons, genres, news, quizzes and recommendation sections.
pub fn can_manage_catalog(role: &str) -> bool {
    role == ROLE_SUPER_ADMIN || role == ROLE_ADMIN
}

/// Public account administration.
pub fn can_manage_users(role: &str) -> bool {
    role == ROLE_SUPER_ADMIN || role == ROLE_ADMIN
}

/// Every admin role may moderate comments.
pub fn can_moderate_comments(role: &str) -> bool {
    is_admin_role(role)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_role_is_not_admin() {
        assert!(!is_admin_role(ROLE_USER));
        assert!(!can_moderate_comments(ROLE_USER));
    }

    #[test]
    fn parse_accepts_upper_case() {
        assert_eq!(parse_admin_role("SUPER_ADMIN"), Ok(ROLE_SUPER_ADMIN));
        assert_eq!(parse_admin_role("content_moderator"), Ok(ROLE_CONTENT_MODERATOR));
        assert_eq!(parse_admin_role(" Admin "), Ok(ROLE_ADMIN));
    }

    #[test]
    fn parse_rejects_unknown_role() {
        let err = parse_admin_role("owner").unwrap_err();
        assert!(err.contains("Invalid admin role"));
        assert!(parse_admin_role(ROLE_USER).is_err());
    }

    #[test]
    fn moderator_cannot_touch_catalog() {
        assert!(can_moderate_comments(ROLE_CONTENT_MODERATOR));
        assert!(!can_manage_catalog(ROLE_CONTENT_MODERATOR));
        assert!(!can_manage_users(ROLE_CONTENT_MODERATOR));
    }

    #[test]
    fn only_super_admin_manages_admins() {
        assert!(can_manage_admins(ROLE_SUPER_ADMIN));
        assert!(!can_manage_admins(ROLE_ADMIN));
        assert!(!can_manage_admins(ROLE_CONTENT_MODERATOR));
    }
}
