pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const GIT_TAG: Option<&str> = option_env!("GIT_TAG");

/// Release tag when built from a tagged checkout, otherwise the crate version.
pub const VERSION_LABEL: &str = match GIT_TAG {
    Some(tag) => tag,
    None => APP_VERSION,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_prefers_git_tag() {
        match GIT_TAG {
            Some(tag) => assert_eq!(VERSION_LABEL, tag),
            None => assert_eq!(VERSION_LABEL, APP_VERSION),
        }
    }
}
