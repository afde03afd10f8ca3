//! Root-selector discovery.
//!
//! The root selector is the deepest path prefix shared by every surviving
//! field location. It marks the item boundary: everything above it is common
//! to all items, everything below it is the per-field relative selector.

use crate::location::FieldLocation;
use crate::path::TreePath;

/// Number of classes a shortened root selector aims to retain.
const SHORT_ROOT_CLASS_TARGET: usize = 3;

/// Longest path prefix shared by all `locations`.
///
/// The prefix is always strict: it stops before the last segment of the
/// shortest path, so every location keeps a non-empty relative selector.
/// Descriptors are compared with full equality (tag, class set,
/// pseudo-classes). Returns an empty path for an empty input.
#[must_use]
pub fn find_shared_root_selector(locations: &[FieldLocation]) -> TreePath {
    let Some((reference, rest)) = locations.split_first() else {
        return TreePath::new();
    };

    let mut i = 0;
    loop {
        let Some(segment) = reference.path.get(i) else {
            return reference.path.truncated(i);
        };
        let diverges = locations.iter().any(|loc| loc.path.len() <= i + 1)
            || rest.iter().any(|loc| loc.path.get(i) != Some(segment));
        if diverges {
            return reference.path.truncated(i);
        }
        i += 1;
    }
}

/// Trailing part of `root` carrying at least three classes in total.
///
/// Returns the whole path if it never accumulates that many.
#[must_use]
pub fn shorten_root_selector(root: &TreePath) -> TreePath {
    let mut classes = 0;
    for i in (0..root.len()).rev() {
        classes += root.get(i).map_or(0, |s| s.classes.len());
        if classes >= SHORT_ROOT_CLASS_TARGET {
            return root.suffix(i);
        }
    }
    root.clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::TagDescriptor;

    fn seg(tag: &str, classes: &[&str]) -> TagDescriptor {
        TagDescriptor::new(tag, classes.iter().map(|s| (*s).to_string()).collect(), vec![])
    }

    fn loc(segments: Vec<TagDescriptor>) -> FieldLocation {
        FieldLocation::text(TreePath::from(segments), 0, "x")
    }

    #[test]
    fn test_shared_root_stops_at_divergence() {
        let locs = vec![
            loc(vec![seg("body", &[]), seg("ul", &[]), seg("li", &["item"]), seg("span", &["title"])]),
            loc(vec![seg("body", &[]), seg("ul", &[]), seg("li", &["item"]), seg("a", &[])]),
        ];
        let root = find_shared_root_selector(&locs);
        assert_eq!(root.to_string(), "body > ul > li.item");
        assert!(locs.iter().all(|l| root.is_strict_prefix_of(&l.path)));
    }

    #[test]
    fn test_shared_root_is_strict_for_identical_paths() {
        let path = vec![seg("body", &[]), seg("div", &["info"]), seg("a", &[])];
        let locs = vec![loc(path.clone()), loc(path)];
        let root = find_shared_root_selector(&locs);
        assert_eq!(root.to_string(), "body > div.info");
    }

    #[test]
    fn test_shared_root_stops_at_shorter_path() {
        let locs = vec![
            loc(vec![seg("body", &[]), seg("div", &[]), seg("p", &[]), seg("span", &[])]),
            loc(vec![seg("body", &[]), seg("div", &[]), seg("p", &[])]),
        ];
        let root = find_shared_root_selector(&locs);
        assert_eq!(root.to_string(), "body > div");
        assert!(locs.iter().all(|l| root.is_strict_prefix_of(&l.path)));
    }

    #[test]
    fn test_shared_root_of_nothing_is_empty() {
        assert!(find_shared_root_selector(&[]).is_empty());
    }

    #[test]
    fn test_shorten_root_selector() {
        let root = TreePath::from(vec![
            seg("body", &["home"]),
            seg("div", &["main", "wide"]),
            seg("ul", &["events"]),
            seg("li", &["event", "card"]),
        ]);
        assert_eq!(shorten_root_selector(&root).to_string(), "ul.events > li.event.card");

        let plain = TreePath::from(vec![seg("body", &[]), seg("ul", &["x"]), seg("li", &[])]);
        assert_eq!(shorten_root_selector(&plain), plain);
    }
}
