use teloxide::types::User;

/// Tries to print the user in the prettiest way possible, with either `@username` or full name.
/// Optionally allows including user ID.
#[must_use]
pub fn user_name_prettyprint(user: &User, with_id: bool) -> String {
    let mut name = if let Some(username) = &user.username {
        format!("@{username}")
    } else {
        user.full_name()
    };

    if with_id {
        use std::fmt::Write;
        write!(name, " (userid {})", user.id).expect("Writing to a String never fails");
    }

    name
}

#[cfg(test)]
mod tests {
    use super::*;
    use teloxide::types::UserId;

    fn user(username: Option<&str>, last_name: Option<&str>) -> User {
        User {
            id: UserId(42),
            is_bot: false,
            first_name: "Herbert".to_string(),
            last_name: last_name.map(str::to_string),
            username: username.map(str::to_string),
            language_code: None,
            is_premium: false,
            added_to_attachment_menu: false,
        }
    }

    #[test]
    fn prefers_username() {
        let u = user(Some("herb"), Some("Cat"));
        assert_eq!(user_name_prettyprint(&u, false), "@herb");
        assert_eq!(user_name_prettyprint(&u, true), "@herb (userid 42)");
    }

    #[test]
    fn falls_back_to_full_name() {
        assert_eq!(user_name_prettyprint(&user(None, None), false), "Herbert");
        assert_eq!(
            user_name_prettyprint(&user(None, Some("Cat")), false),
            "Herbert Cat"
        );
    }
}
