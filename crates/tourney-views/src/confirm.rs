//! User confirmation before destructive actions.

pub const DELETE_TOURNAMENT_PROMPT: &str = "Are you sure you want to delete this tournament?";
pub const DELETE_MATCH_PROMPT: &str = "Are you sure you want to delete this match?";
pub const LEAVE_TOURNAMENT_PROMPT: &str = "Are you sure you want to leave this tournament?";

/// Asks the user a yes/no question.
///
/// Any `Fn(&str) -> bool` is a `Confirm`, so tests and the demo can pass
/// a closure.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_sees_the_prompt() {
        let asked = std::cell::RefCell::new(String::new());
        let confirm = |prompt: &str| {
            asked.replace(prompt.to_string());
            false
        };
        assert!(!confirm.confirm(DELETE_MATCH_PROMPT));
        assert_eq!(asked.into_inner(), DELETE_MATCH_PROMPT);
    }
}
