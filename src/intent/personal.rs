//! Detection of utterances that ask about the caller's own data.

use std::sync::LazyLock;

use regex::Regex;

const POSSESSIVE_PHRASES: &[&str] = &[
    "what's my",
    "what is my",
    "show my",
    "tell me my",
    "check my",
    "view my",
    "see my",
    "access my",
];

const PERSONAL_KEYWORDS: &[&str] = &[
    "account",
    "balance",
    "transactions",
    "statement",
    "details",
    "card",
    "cards",
    "bills",
];

const WH_PRONOUNS: &[&str] = &["what", "who", "whom", "whose", "whatever", "whoever"];

static WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\w']+").expect("word pattern is valid"));

/// Whether the utterance asks about the caller's own accounts, which callers
/// use to decide if a login is required.
///
/// ```
/// use rexa::intent::is_personal_query;
///
/// assert!(is_personal_query("What is my balance?"));
/// assert!(is_personal_query("block my card"));
/// assert!(!is_personal_query("what are the fd interest rates"));
/// ```
pub fn is_personal_query(utterance: &str) -> bool {
    let message = utterance.to_lowercase().replace('\u{2019}', "'");

    if POSSESSIVE_PHRASES.iter().any(|p| message.contains(p)) {
        return true;
    }

    let words: Vec<&str> = WORD.find_iter(&message).map(|m| m.as_str()).collect();

    let possessive_keyword = words.windows(2).any(|pair| {
        matches!(pair[0], "my" | "mine") && PERSONAL_KEYWORDS.contains(&pair[1])
    });
    if possessive_keyword {
        return true;
    }

    let wh_question = words.iter().any(|w| WH_PRONOUNS.contains(w));
    wh_question && words.iter().any(|w| matches!(*w, "i" | "me"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_possessive_phrases() {
        assert!(is_personal_query("Show my last five transactions"));
        assert!(is_personal_query("what\u{2019}s my balance"));
        assert!(is_personal_query("Tell me my account number"));
    }

    #[test]
    fn test_possessive_keyword() {
        assert!(is_personal_query("I want my statement"));
        assert!(is_personal_query("pay my bills"));
        assert!(!is_personal_query("pay my dues"));
    }

    #[test]
    fn test_wh_question_about_caller() {
        assert!(is_personal_query("what should I do now"));
        assert!(is_personal_query("who can help me"));
        assert!(!is_personal_query("how do I apply for a home loan"));
    }

    #[test]
    fn test_general_questions() {
        assert!(!is_personal_query("where is the nearest atm"));
        assert!(!is_personal_query("tell me about pm kisan scheme"));
        assert!(!is_personal_query(""));
    }
}
