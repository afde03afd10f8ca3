//! Recursive cluster expansion.
//!
//! Starting from the shared root, every location group that reaches at
//! least two segments below the current root is explored as its own,
//! finer-grained item definition. Each node of the resulting tree is a
//! validated [`Candidate`]; ids encode the position in the tree (`a`, `aa`,
//! `ab`, `aba`, ...).

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, info};

use crate::config::ScraperConfig;
use crate::date::DateFormatDetector;
use crate::error::{Error, Result};
use crate::extract::{ExtractionEngine, Item};
use crate::fields::materialize_fields;
use crate::location::FieldLocation;
use crate::options::Options;
use crate::path::TreePath;
use crate::root::{find_shared_root_selector, shorten_root_selector};

/// Id of the top-level candidate.
pub const ROOT_BRANCH: &str = "a";

/// A generated configuration together with what it extracts.
#[derive(Debug, Clone, Serialize)]
pub struct Candidate {
    /// Position in the expansion tree.
    pub id: String,
    /// The configuration.
    pub config: ScraperConfig,
    /// Items the configuration extracted from the source document.
    pub items: Vec<Item>,
}

impl Candidate {
    /// Number of extracted items.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Number of populated values over all items.
    #[must_use]
    pub fn field_yield(&self) -> usize {
        self.items.iter().map(BTreeMap::len).sum()
    }
}

/// Shared inputs of one expansion run.
pub struct ExpansionContext<'a> {
    /// Document the configurations are validated against.
    pub html: &'a str,
    /// Run options.
    pub options: &'a Options,
    /// Engine used for validation.
    pub engine: &'a dyn ExtractionEngine,
    /// Layout detector for date components.
    pub dates: &'a dyn DateFormatDetector,
}

impl ExpansionContext<'_> {
    /// Configuration for `locations` with items at `root`.
    #[must_use]
    pub fn build_config(&self, locations: &[FieldLocation], root: &TreePath) -> ScraperConfig {
        let item = if self.options.shorten_root_selector {
            shorten_root_selector(root)
        } else {
            root.clone()
        };
        ScraperConfig {
            name: self.options.config_name(),
            url: self.options.url.clone().unwrap_or_default(),
            item: item.to_string(),
            fields: materialize_fields(locations, root, self.dates),
        }
    }
}

/// Expands the subtree rooted at `root` into `out`.
///
/// # Errors
///
/// Returns [`Error::Validation`] for the first branch whose configuration the
/// engine rejects; the whole expansion is abandoned.
pub fn expand(
    ctx: &ExpansionContext<'_>,
    id: &str,
    locations: &[FieldLocation],
    root: &TreePath,
    out: &mut BTreeMap<String, Candidate>,
) -> Result<()> {
    if locations.is_empty() {
        return Ok(());
    }

    if root.is_empty() {
        // Locations sit directly in <body>; there is no item element to select.
        debug!(branch = id, "skipped candidate without item selector");
    } else {
        accept(ctx, id, locations, root, out)?;
    }

    let groups = group_below(locations, root);
    let total = groups.len();
    for (index, group) in groups.into_values().enumerate() {
        let child_root = find_shared_root_selector(&group);
        let child_id = format!("{id}{}", branch_suffix(index, total));
        expand(ctx, &child_id, &group, &child_root, out)?;
    }
    Ok(())
}

/// Validates the configuration for `root` and records it unless the
/// subpage-link requirement rejects it.
fn accept(
    ctx: &ExpansionContext<'_>,
    id: &str,
    locations: &[FieldLocation],
    root: &TreePath,
    out: &mut BTreeMap<String, Candidate>,
) -> Result<()> {
    let config = ctx.build_config(locations, root);
    let items = ctx
        .engine
        .evaluate(&config, ctx.html)
        .map_err(|source| Error::Validation {
            branch: id.to_string(),
            selector: config.item.clone(),
            source: Box::new(source),
        })?;

    if ctx.options.require_subpage_link && !config.has_subpage_link() {
        debug!(branch = id, item = %config.item, "skipped candidate without subpage link");
    } else {
        info!(
            branch = id,
            item = %config.item,
            fields = config.fields.len(),
            items = items.len(),
            "accepted candidate"
        );
        out.insert(
            id.to_string(),
            Candidate {
                id: id.to_string(),
                config,
                items,
            },
        );
    }

    Ok(())
}

/// Locations at least two segments below `root`, keyed by their first
/// segment below it.
fn group_below(locations: &[FieldLocation], root: &TreePath) -> BTreeMap<String, Vec<FieldLocation>> {
    let mut groups: BTreeMap<String, Vec<FieldLocation>> = BTreeMap::new();
    for loc in locations.iter().filter(|l| l.path.len() > root.len() + 1) {
        if let Some(segment) = loc.path.get(root.len()) {
            groups.entry(segment.to_string()).or_default().push(loc.clone());
        }
    }
    groups
}

/// Suffix of the `index`-th of `total` child branches.
///
/// Single letters up to 26 children, fixed-width base-26 beyond.
#[must_use]
pub fn branch_suffix(index: usize, total: usize) -> String {
    let mut width = 1;
    let mut capacity = 26;
    while capacity < total {
        width += 1;
        capacity = capacity.saturating_mul(26);
    }

    let mut digits = vec![b'a'; width];
    let mut rest = index;
    for digit in digits.iter_mut().rev() {
        // `rest % 26` is below 26.
        #[allow(clippy::cast_possible_truncation)]
        let offset = (rest % 26) as u8;
        *digit = b'a' + offset;
        rest /= 26;
    }
    String::from_utf8_lossy(&digits).into_owned()
}
