//! Pure shape checks for registration input. No store access.

pub fn is_valid_username(username: &str) -> bool {
    username.len() >= 3
}

pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.rsplit_once('@') else {
        return false;
    };

    if local.is_empty() || local.len() > 64 {
        return false;
    }
    if local.contains(|c: char| c.is_whitespace() || c == '@') {
        return false;
    }

    // The domain must have at least two dot-separated labels, so bare
    // hostnames like "user@localhost" do not pass.
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return false;
    }
    labels.iter().all(|label| {
        !label.is_empty()
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    })
}
