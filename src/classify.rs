//! Name-pattern classification of anatomical groups.
//!
//! Vagus scaffolds carry no typed ontology: whether a named group is the
//! trunk, a branch, or a lettered variant of a common branch is a naming
//! convention. All of the matching rules live here so they can be swapped or
//! reconfigured without touching tree reconstruction.

use std::sync::LazyLock;

use regex::Regex;

/// Matches a standalone single uppercase letter, optionally eating one
/// trailing space.
static LETTER_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"\b[A-Z]\b\s?").expect("letter-token pattern is valid")
});

/// Text-pattern rules deciding trunk/branch/variant membership of group
/// names.
///
/// The default rules are the vagus conventions: every trunk annotation
/// contains `"vagus nerve"`, except that branch names of the form
/// `"... of vagus nerve"` also contain that phrase and must not match;
/// branch annotations contain `"branch"` or `"nerve"`; trunks exist per body
/// side, `"left"` before `"right"`.
///
/// # Example
///
/// ```
/// use vagus_query::NameClassifier;
///
/// let classifier = NameClassifier::default();
/// assert!(classifier.is_trunk("right vagus nerve"));
/// assert!(!classifier.is_trunk("left pharyngeal branch of vagus nerve"));
/// assert!(classifier.is_branch_candidate("left superior laryngeal nerve"));
/// ```
#[derive(Debug, Clone)]
pub struct NameClassifier {
    /// Phrase present in every trunk annotation name.
    trunk_keyword: String,
    /// Longer phrase that also contains the trunk keyword but denotes a
    /// branch.
    trunk_exception: String,
    /// Keywords present in every branch annotation name.
    branch_keywords: Vec<String>,
    /// Ordered body-side prefixes used to resolve the trunk group.
    sides: Vec<String>,
}

impl Default for NameClassifier {
    fn default() -> Self {
        Self::new(
            "vagus nerve",
            "of vagus nerve",
            ["branch", "nerve"],
            ["left", "right"],
        )
    }
}

impl NameClassifier {
    /// Create a classifier with custom matching rules.
    pub fn new(
        trunk_keyword: impl Into<String>,
        trunk_exception: impl Into<String>,
        branch_keywords: impl IntoIterator<Item = impl Into<String>>,
        sides: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            trunk_keyword: trunk_keyword.into(),
            trunk_exception: trunk_exception.into(),
            branch_keywords: branch_keywords.into_iter().map(Into::into).collect(),
            sides: sides.into_iter().map(Into::into).collect(),
        }
    }

    /// Check whether a name denotes part of the trunk.
    ///
    /// True when the name contains the trunk keyword but not the exception
    /// phrase.
    #[must_use]
    pub fn is_trunk(&self, name: &str) -> bool {
        name.contains(&self.trunk_keyword) && !name.contains(&self.trunk_exception)
    }

    /// Check whether a name is a branch candidate (contains at least one
    /// branch keyword).
    ///
    /// Independent of trunk classification; trunk names also match.
    #[must_use]
    pub fn is_branch_candidate(&self, name: &str) -> bool {
        self.branch_keywords.iter().any(|kw| name.contains(kw.as_str()))
    }

    /// Reduce a variant name to its common name by stripping standalone
    /// single uppercase-letter tokens.
    ///
    /// Returns `Some(common)` only when the reduction changed the name, i.e.
    /// the input is a lettered variant of `common`. Known ambiguity: a
    /// genuine anatomical name that happens to contain an isolated capital
    /// letter unrelated to variant lettering is also reduced.
    ///
    /// # Example
    ///
    /// ```
    /// use vagus_query::NameClassifier;
    ///
    /// let classifier = NameClassifier::default();
    /// assert_eq!(
    ///     classifier.common_name("left B thoracic cardiopulmonary branch of vagus nerve").as_deref(),
    ///     Some("left thoracic cardiopulmonary branch of vagus nerve"),
    /// );
    /// assert_eq!(classifier.common_name("left superior laryngeal nerve"), None);
    /// ```
    #[must_use]
    pub fn common_name(&self, name: &str) -> Option<String> {
        let reduced = LETTER_TOKEN.replace_all(name, "");
        let reduced = reduced.trim();
        (reduced != name).then(|| reduced.to_string())
    }

    /// Candidate trunk group names, one per body side in side order.
    pub fn trunk_name_candidates(&self) -> impl Iterator<Item = String> + '_ {
        self.sides
            .iter()
            .map(|side| format!("{side} {}", self.trunk_keyword))
    }
}
