//! Helpers for the hierarchical zone naming convention (`"Menu/Settings"`).
//!
//! Hierarchy is purely a naming aid for authors. `Menu` does not reach
//! `Menu/Settings` (or vice versa) unless an edge says so; the graph and the
//! registry treat every zone name as an opaque key.

/// Separator between zone path segments.
pub const SEPARATOR: char = '/';

/// Parent path of a zone, if it has one. `"Menu/Settings/Audio"` -> `"Menu/Settings"`.
pub fn parent(zone: &str) -> Option<&str> {
    zone.rfind(SEPARATOR).map(|idx| &zone[..idx])
}

/// Last segment of a zone path. `"Menu/Settings"` -> `"Settings"`.
pub fn leaf(zone: &str) -> &str {
    match zone.rfind(SEPARATOR) {
        Some(idx) => &zone[idx + 1..],
        None => zone,
    }
}

/// Number of segments in the path (0 for an empty name).
pub fn depth(zone: &str) -> usize {
    if zone.is_empty() {
        0
    } else {
        zone.split(SEPARATOR).count()
    }
}

/// Ancestors from nearest to farthest, not including `zone` itself.
pub fn ancestors(zone: &str) -> impl Iterator<Item = &str> {
    std::iter::successors(parent(zone), |z| parent(*z))
}

/// Join a parent path and a child segment.
pub fn join(parent: &str, child: &str) -> String {
    if parent.is_empty() {
        child.to_string()
    } else {
        format!("{parent}{SEPARATOR}{child}")
    }
}

/// Whether `zone` is `ancestor` or nested somewhere below it.
pub fn is_within(zone: &str, ancestor: &str) -> bool {
    zone == ancestor
        || (zone.len() > ancestor.len()
            && zone.starts_with(ancestor)
            && zone[ancestor.len()..].starts_with(SEPARATOR))
}

/// A usable zone name: non-empty, no empty segments, no surrounding whitespace.
pub fn is_valid(zone: &str) -> bool {
    !zone.is_empty()
        && zone.trim() == zone
        && zone.split(SEPARATOR).all(|segment| !segment.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parent_and_leaf() {
        assert_eq!(parent("Menu/Settings/Audio"), Some("Menu/Settings"));
        assert_eq!(parent("Menu"), None);
        assert_eq!(leaf("Menu/Settings"), "Settings");
        assert_eq!(leaf("Menu"), "Menu");
    }

    #[test]
    fn test_depth() {
        assert_eq!(depth(""), 0);
        assert_eq!(depth("Menu"), 1);
        assert_eq!(depth("Menu/Settings/Audio"), 3);
    }

    #[test]
    fn test_ancestors_nearest_first() {
        let found: Vec<&str> = ancestors("A/B/C").collect();
        assert_eq!(found, vec!["A/B", "A"]);
        assert_eq!(ancestors("A").count(), 0);
    }

    #[test]
    fn test_join() {
        assert_eq!(join("Menu", "Settings"), "Menu/Settings");
        assert_eq!(join("", "Menu"), "Menu");
    }

    #[test]
    fn test_is_within_respects_segment_boundaries() {
        assert!(is_within("Menu/Settings", "Menu"));
        assert!(is_within("Menu", "Menu"));
        assert!(!is_within("Menubar", "Menu"));
        assert!(!is_within("Menu", "Menu/Settings"));
    }

    #[test]
    fn test_is_valid() {
        assert!(is_valid("Menu/Settings"));
        assert!(!is_valid(""));
        assert!(!is_valid("Menu//Settings"));
        assert!(!is_valid("/Menu"));
        assert!(!is_valid(" Menu"));
    }
}
