//! Domain entities: one parsed `parent:child1,child2,...` line

/// Separator between the parent name and the child list.
pub const PARENT_SEPARATOR: char = ':';

/// Separator between child names.
pub const CHILD_SEPARATOR: char = ',';

/// A single parent/children relationship as written on one input line.
///
/// Names borrow from the line and are kept verbatim: no whitespace trimming,
/// no escaping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship<'a> {
    pub parent: &'a str,
    pub children: Vec<&'a str>,
}

impl<'a> Relationship<'a> {
    /// Split a line at its first `:` into parent and child list.
    ///
    /// Returns `None` when the line has no `:` at all. The child list is split
    /// on `,`. An empty list is one empty name, so `A:` has a single child
    /// named `""`. Otherwise trailing empty tokens are dropped (`A:B,` has just
    /// `B`) and empty tokens between commas are kept.
    pub fn parse(line: &'a str) -> Option<Self> {
        let (parent, rest) = line.split_once(PARENT_SEPARATOR)?;
        let mut children: Vec<&str> = rest.split(CHILD_SEPARATOR).collect();
        if !rest.is_empty() {
            while children.last().is_some_and(|c| c.is_empty()) {
                children.pop();
            }
        }
        Some(Self { parent, children })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_line() {
        let rel = Relationship::parse("A:B,C").unwrap();
        assert_eq!(rel.parent, "A");
        assert_eq!(rel.children, vec!["B", "C"]);
    }

    #[test]
    fn test_parse_without_colon_is_none() {
        assert_eq!(Relationship::parse("NoColonHere"), None);
        assert_eq!(Relationship::parse(""), None);
    }

    #[test]
    fn test_parse_splits_on_first_colon_only() {
        let rel = Relationship::parse("A:B:1,C").unwrap();
        assert_eq!(rel.parent, "A");
        assert_eq!(rel.children, vec!["B:1", "C"]);
    }

    #[test]
    fn test_parse_keeps_whitespace_verbatim() {
        let rel = Relationship::parse("parent: child1, child2").unwrap();
        assert_eq!(rel.children, vec![" child1", " child2"]);
    }

    #[test]
    fn test_parse_empty_tokens() {
        assert_eq!(Relationship::parse("A:").unwrap().children, vec![""]);
        assert_eq!(Relationship::parse("A:B,,").unwrap().children, vec!["B"]);
        assert_eq!(
            Relationship::parse("A:,B").unwrap().children,
            vec!["", "B"]
        );
        assert_eq!(Relationship::parse(":B").unwrap().parent, "");
    }
}
