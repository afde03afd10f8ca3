//! Location merge engine.
//!
//! Collapses the raw, highly repetitive output of the tree walk into a
//! small set of canonical field locations. Locations are processed in
//! reverse discovery order; each one first has large `nth-child` indices
//! stripped from its path and is then folded into the first compatible
//! location already accepted, or accepted itself.
//!
//! The strip index is what lets ten list items that differ only in their
//! `nth-child` collapse into one "title of each item" location: at and
//! above it, the incoming location's pseudo-classes are ignored.

use tracing::debug;

use crate::location::FieldLocation;
use crate::path::{TagDescriptor, TreePath};

/// Default threshold separating the two strip policies.
pub const DEFAULT_STRIP_POLICY_THRESHOLD: usize = 6;

/// Merges structurally equivalent locations.
///
/// `min_occurrence` drives stripping: any `nth-child(N)` with
/// `N >= min_occurrence` (outside the protected tail) is removed.
#[must_use]
pub fn squash(raw: Vec<FieldLocation>, min_occurrence: usize) -> Vec<FieldLocation> {
    squash_with_policy(raw, min_occurrence, DEFAULT_STRIP_POLICY_THRESHOLD)
}

/// Like [`squash`] with an explicit strip policy threshold.
///
/// Below `policy_threshold` the last two path segments keep their
/// pseudo-classes, otherwise only the last one does.
///
/// Passes are repeated until one merges nothing. A single pass can leave an
/// unstripped location standing next to a stripped one that would absorb it
/// in the opposite order, so the output is a fixed point of the merge.
#[must_use]
pub fn squash_with_policy(
    raw: Vec<FieldLocation>,
    min_occurrence: usize,
    policy_threshold: usize,
) -> Vec<FieldLocation> {
    let raw_count = raw.len();
    let mut squashed = squash_pass(raw, min_occurrence, policy_threshold);
    let mut passes = 1;

    loop {
        let next = squash_pass(squashed.clone(), min_occurrence, policy_threshold);
        if next.len() == squashed.len() {
            break;
        }
        squashed = next;
        passes += 1;
    }

    debug!(raw = raw_count, squashed = squashed.len(), passes, "squashed locations");
    squashed
}

/// One reverse-order merge pass.
fn squash_pass(
    locations: Vec<FieldLocation>,
    min_occurrence: usize,
    policy_threshold: usize,
) -> Vec<FieldLocation> {
    let mut squashed: Vec<FieldLocation> = Vec::new();

    for mut loc in locations.into_iter().rev() {
        strip_nth_child(&mut loc, min_occurrence, policy_threshold);

        let mut absorbed = false;
        for accepted in &mut squashed {
            if let Some(path) = merged_path(accepted, &loc) {
                accepted.path = path;
                accepted.count += loc.count;
                accepted.examples.append(&mut loc.examples);
                absorbed = true;
                break;
            }
        }
        if !absorbed {
            squashed.push(loc);
        }
    }

    squashed
}

/// Clears `nth-child` pseudo-classes with an index of at least `threshold`.
///
/// Walks from the end of the path, skipping the protected tail. Once a
/// position is stripped, every position before it is cleared as well, and
/// the position is recorded as the location's strip index.
pub fn strip_nth_child(loc: &mut FieldLocation, threshold: usize, policy_threshold: usize) {
    // Arbitrary but load-bearing: some sites need the last two segments'
    // nth-child kept, others only the last.
    let skip = if threshold < policy_threshold { 2 } else { 1 };
    let end = loc.path.len().saturating_sub(skip);

    let mut strip_at: Option<usize> = None;
    for i in (0..end).rev() {
        let Some(segment) = loc.path.get_mut(i) else {
            continue;
        };
        if strip_at.is_some() {
            segment.pseudo_classes.clear();
        } else if segment.nth_child().is_some_and(|n| n >= threshold) {
            segment.pseudo_classes.clear();
            strip_at = Some(i);
        }
    }

    if let Some(i) = strip_at {
        loc.strip_index = i;
    }
}

/// Path resulting from folding `incoming` into `accepted`, or `None` if the
/// two are not the same field.
#[must_use]
pub fn merged_path(accepted: &FieldLocation, incoming: &FieldLocation) -> Option<TreePath> {
    if accepted.text_index != incoming.text_index
        || accepted.attribute != incoming.attribute
        || accepted.path.len() != incoming.path.len()
    {
        return None;
    }

    let mut merged = Vec::with_capacity(accepted.path.len());
    for (i, (old, new)) in accepted
        .path
        .segments()
        .iter()
        .zip(incoming.path.segments())
        .enumerate()
    {
        if old.tag_name != new.tag_name {
            return None;
        }

        let incoming_pseudo: &[String] = if i > accepted.strip_index {
            &new.pseudo_classes
        } else {
            &[]
        };
        if old.pseudo_classes.len() != incoming_pseudo.len() {
            return None;
        }
        if old.pseudo_classes.len() == 1 && old.pseudo_classes[0] != incoming_pseudo[0] {
            return None;
        }

        let classes = if old.classes.is_empty() && new.classes.is_empty() {
            Vec::new()
        } else {
            let common: Vec<String> = old
                .classes
                .iter()
                .filter(|c| new.classes.contains(c))
                .cloned()
                .collect();
            if common.is_empty() {
                return None;
            }
            common
        };

        merged.push(TagDescriptor::new(
            old.tag_name.clone(),
            classes,
            old.pseudo_classes.clone(),
        ));
    }

    Some(TreePath::from(merged))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(tag: &str, classes: &[&str], nth: Option<usize>) -> TagDescriptor {
        TagDescriptor::new(
            tag,
            classes.iter().map(|s| (*s).to_string()).collect(),
            nth.map(crate::path::nth_child).into_iter().collect(),
        )
    }

    fn item_title(k: usize, classes: &[&str]) -> FieldLocation {
        let nth = (k > 1).then_some(k);
        FieldLocation::text(
            TreePath::from(vec![
                seg("body", &[], None),
                seg("ul", &[], None),
                seg("li", classes, nth),
                seg("span", &["title"], None),
            ]),
            0,
            format!("Event {k}"),
        )
    }

    #[test]
    fn test_strip_clears_large_indices_and_everything_above() {
        let mut loc = FieldLocation::text(
            TreePath::from(vec![
                seg("body", &[], None),
                seg("div", &[], Some(2)),
                seg("li", &[], Some(7)),
                seg("span", &[], Some(9)),
            ]),
            0,
            "x",
        );
        strip_nth_child(&mut loc, 6, DEFAULT_STRIP_POLICY_THRESHOLD);
        assert_eq!(loc.path.to_string(), "body > div > li > span:nth-child(9)");
        assert_eq!(loc.strip_index, 2);
    }

    #[test]
    fn test_strip_protects_two_segments_below_policy_threshold() {
        let mut loc = FieldLocation::text(
            TreePath::from(vec![
                seg("body", &[], None),
                seg("div", &[], Some(4)),
                seg("li", &[], Some(7)),
                seg("span", &[], None),
            ]),
            0,
            "x",
        );
        strip_nth_child(&mut loc, 3, DEFAULT_STRIP_POLICY_THRESHOLD);
        assert_eq!(loc.path.to_string(), "body > div > li:nth-child(7) > span");
        assert_eq!(loc.strip_index, 1);
    }

    #[test]
    fn test_strip_below_threshold_is_noop() {
        let mut loc = item_title(3, &["item"]);
        let before = loc.clone();
        strip_nth_child(&mut loc, 6, DEFAULT_STRIP_POLICY_THRESHOLD);
        assert_eq!(loc, before);
    }

    #[test]
    fn test_repeated_items_collapse() {
        let raw: Vec<FieldLocation> = (1..=10).map(|k| item_title(k, &["item"])).collect();
        let squashed = squash(raw, 6);
        assert_eq!(squashed.len(), 1);
        assert_eq!(squashed[0].count, 10);
        assert_eq!(squashed[0].path.to_string(), "body > ul > li.item > span.title");
        assert_eq!(squashed[0].examples.first().map(String::as_str), Some("Event 10"));
        assert_eq!(squashed[0].examples.last().map(String::as_str), Some("Event 1"));
    }

    #[test]
    fn test_classes_are_narrowed_to_intersection() {
        let raw = vec![
            item_title(1, &["item", "odd"]),
            item_title(2, &["item", "even"]),
            item_title(7, &["item", "odd"]),
        ];
        let squashed = squash(raw, 6);
        assert_eq!(squashed.len(), 1);
        assert_eq!(squashed[0].path.get(2).map(|s| s.classes.clone()), Some(vec!["item".to_string()]));
    }

    #[test]
    fn test_disjoint_classes_do_not_merge() {
        let raw = vec![item_title(1, &["a"]), item_title(7, &["b"])];
        assert_eq!(squash(raw, 6).len(), 2);
    }

    #[test]
    fn test_different_attribute_or_index_do_not_merge() {
        let a = item_title(1, &["item"]);
        let mut b = item_title(1, &["item"]);
        b.text_index = 1;
        let mut c = item_title(1, &["item"]);
        c.attribute = Some("href".to_string());
        assert!(merged_path(&a, &b).is_none());
        assert!(merged_path(&a, &c).is_none());
        assert!(merged_path(&a, &a.clone()).is_some());
    }

    #[test]
    fn test_pseudo_classes_after_strip_index_must_match() {
        let accepted = FieldLocation::text(
            TreePath::from(vec![seg("body", &[], None), seg("ul", &[], None), seg("li", &[], Some(2))]),
            0,
            "a",
        );
        let incoming = FieldLocation::text(
            TreePath::from(vec![seg("body", &[], None), seg("ul", &[], None), seg("li", &[], Some(3))]),
            0,
            "b",
        );
        assert!(merged_path(&accepted, &incoming).is_none());

        let mut relaxed = accepted.clone();
        relaxed.strip_index = 2;
        if let Some(segment) = relaxed.path.get_mut(2) {
            segment.pseudo_classes.clear();
        }
        assert!(merged_path(&relaxed, &incoming).is_some());
    }

    #[test]
    fn test_count_sums_to_raw_len() {
        let mut raw: Vec<FieldLocation> = (1..=10).map(|k| item_title(k, &["item"])).collect();
        raw.push(item_title(1, &["other"]));
        let total = raw.len();
        let squashed = squash(raw, 6);
        assert_eq!(squashed.iter().map(|l| l.count).sum::<usize>(), total);
    }
}
