use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for validating upload folder names
    /// One or more `/`-separated segments of alphanumerics, `_` and `-`
    /// - Valid: "avatars", "users/42/avatars", "post-images"
    /// - Invalid: "/avatars", "avatars/", "../secret", "a//b", "my folder"
    pub static ref FOLDER_REGEX: Regex =
        Regex::new(r"^[A-Za-z0-9_-]+(?:/[A-Za-z0-9_-]+)*$").unwrap();
}
