use crate::ExtractResult;
use regex::Regex;

/// Matches a class attribute containing one class name as a whole token
///
/// The token must be delimited by whitespace or the ends of the attribute
/// value, so a matcher for `card-stats` accepts `"card-stats"` and
/// `"wrapper card-stats w-condition-invisible"` but rejects
/// `"card-stats-extra"` and `"my-card-stats"`.
///
/// # Examples
///
/// ```
/// use card_ring::extract::ClassMatcher;
///
/// let matcher = ClassMatcher::new("card-stats").unwrap();
/// assert!(matcher.matches("card-stats"));
/// assert!(matcher.matches("layout card-stats"));
/// assert!(!matcher.matches("card-stats-extra"));
/// ```
#[derive(Debug, Clone)]
pub struct ClassMatcher {
    token: String,
    pattern: Regex,
}

impl ClassMatcher {
    /// Builds a matcher for `token`
    ///
    /// Regex metacharacters in the token are matched literally.
    pub fn new(token: &str) -> ExtractResult<Self> {
        let pattern = Regex::new(&format!(r"(?:^|\s){}(?:\s|$)", regex::escape(token)))?;

        Ok(Self {
            token: token.to_string(),
            pattern,
        })
    }

    /// The class name this matcher looks for
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Returns true if the class attribute value contains the token
    pub fn matches(&self, class_attr: &str) -> bool {
        self.pattern.is_match(class_attr)
    }
}
