//! Outcome of a registration test.

/// The answer a registration test gives for one set of call arguments.
///
/// Registries only act on [`Verdict::Match`]. [`Verdict::Abstain`] is resolved
/// exactly like [`Verdict::NoMatch`]; it lets predicates that combine several
/// sources signal "indifferent" separately from "reject".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verdict {
    /// The registration applies to these arguments.
    Match,
    /// The registration does not apply.
    #[default]
    NoMatch,
    /// The test has no opinion.
    Abstain,
}

impl Verdict {
    /// Returns `true` only for [`Verdict::Match`].
    pub const fn is_match(self) -> bool {
        matches!(self, Verdict::Match)
    }
}

impl From<bool> for Verdict {
    fn from(matched: bool) -> Self {
        if matched {
            Verdict::Match
        } else {
            Verdict::NoMatch
        }
    }
}

impl From<Option<bool>> for Verdict {
    fn from(matched: Option<bool>) -> Self {
        match matched {
            Some(matched) => matched.into(),
            None => Verdict::Abstain,
        }
    }
}
