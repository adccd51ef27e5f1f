use crate::browser::{Locator, NodeHandle, Session, SessionError};
use regex::Regex;
use std::sync::OnceLock;

fn ordinal_prefix() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d+\.\s").expect("ordinal pattern is valid"))
}

/// Trim surrounding whitespace
pub fn clean(text: &str) -> String {
    text.trim().to_string()
}

/// Trim, then drop a leading rank such as `"12. "`
pub fn strip_ordinal(text: &str) -> String {
    ordinal_prefix().replace(text.trim(), "").into_owned()
}

/// Visible text of one element, normalized
pub fn read_text(
    session: &(impl Session + ?Sized),
    node: NodeHandle,
    normalize: fn(&str) -> String,
) -> Result<String, SessionError> {
    session.text(node).map(|text| normalize(&text))
}

/// Visible text of every element; elements that cannot be read are logged and skipped
pub fn read_all(
    session: &(impl Session + ?Sized),
    nodes: &[NodeHandle],
    normalize: fn(&str) -> String,
) -> Vec<String> {
    nodes
        .iter()
        .filter_map(|&node| match read_text(session, node, normalize) {
            Ok(text) => Some(text),
            Err(e) => {
                log::error!("Skipping unreadable element {:?}: {}", node, e);
                None
            }
        })
        .collect()
}

/// Text of every `child` under `container`; an empty container yields an empty list
pub fn texts_within(
    session: &(impl Session + ?Sized),
    container: NodeHandle,
    child: &Locator,
) -> Vec<String> {
    match session.find_all(child, Some(container)) {
        Ok(nodes) => read_all(session, &nodes, clean),
        Err(e) => {
            log::warn!("Could not list '{}' in container {:?}: {}", child, container, e);
            Vec::new()
        }
    }
}

/// Text of the first `child` under `container`, or an empty string
pub fn first_text_within(
    session: &(impl Session + ?Sized),
    container: NodeHandle,
    child: &Locator,
) -> Result<String, SessionError> {
    match session.find_one(child, Some(container))? {
        Some(node) => read_text(session, node, clean),
        None => Ok(String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::SnapshotSession;

    #[test]
    fn test_strip_ordinal() {
        assert_eq!(strip_ordinal("12. The Movie"), "The Movie");
        assert_eq!(strip_ordinal("  1. The Godfather \n"), "The Godfather");
        assert_eq!(strip_ordinal("The Movie"), "The Movie");
        assert_eq!(strip_ordinal("2001. A Space Odyssey"), "A Space Odyssey");
    }

    #[test]
    fn test_strip_ordinal_requires_dot_and_space() {
        assert_eq!(strip_ordinal("1917"), "1917");
        assert_eq!(strip_ordinal("9.5 Weeks"), "9.5 Weeks");
        assert_eq!(strip_ordinal("Se7en"), "Se7en");
    }

    #[test]
    fn test_texts_within_empty_container() {
        let session = SnapshotSession::new().with_fallback(
            r#"<div id="box"><span>not a title</span></div><a class="t"> outside </a>"#,
        );
        session.navigate("https://x.test/").unwrap();
        let container = session.find_one(&Locator::id("box"), None).unwrap().unwrap();
        assert!(texts_within(&session, container, &Locator::css("a.t")).is_empty());
        assert_eq!(
            first_text_within(&session, container, &Locator::css("a.t")).unwrap(),
            ""
        );
        assert_eq!(
            first_text_within(&session, container, &Locator::css("span")).unwrap(),
            "not a title"
        );
    }

    #[test]
    fn test_read_all_skips_stale_handles() {
        let session = SnapshotSession::new().with_fallback("<p> a </p><p>b</p>");
        session.navigate("https://x.test/").unwrap();
        let mut nodes = session.find_all(&Locator::css("p"), None).unwrap();
        nodes.insert(1, NodeHandle(10_000));
        assert_eq!(read_all(&session, &nodes, clean), vec!["a", "b"]);
    }
}
