//! Discovery driver.
//!
//! Wires the pipeline together: tokenize, walk, squash, filter, label,
//! find the root, materialize fields and expand into candidates.

use std::collections::BTreeMap;

use tracing::{debug, info};

use crate::analyzer::analyze;
use crate::config::Field;
use crate::date::{ChronoLayoutDetector, DateFormatDetector};
use crate::dom;
use crate::error::{Error, Result};
use crate::expand::{expand, Candidate, ExpansionContext, ROOT_BRANCH};
use crate::extract::{ExtractionEngine, SelectorEngine};
use crate::fetch::{FetchOptions, Fetcher};
use crate::fields::materialize_fields;
use crate::filter::{filter_min_occurrence, remove_static};
use crate::labeler::{Labeler, PatternLabeler};
use crate::location::FieldLocation;
use crate::merge::squash_with_policy;
use crate::options::Options;
use crate::path::TreePath;
use crate::root::{find_shared_root_selector, shorten_root_selector};

/// Display colours assigned to fields, round-robin.
pub const FIELD_COLORS: &[&str] = &[
    "#e6194b", "#3cb44b", "#ffe119", "#4363d8", "#f58231", "#911eb4", "#46f0f0", "#f032e6",
    "#bcf60c", "#fabebe", "#008080", "#e6beff", "#9a6324", "#800000", "#aaffc3", "#808000",
];

/// Outcome of a discovery run.
#[derive(Debug, Clone)]
pub struct Discovery {
    /// Surviving, labelled locations in merge order.
    pub locations: Vec<FieldLocation>,
    /// Deepest path shared by all locations.
    pub root: TreePath,
    /// Trailing part of `root` carrying at least three classes.
    pub short_root: TreePath,
    /// Fields of the top-level configuration.
    pub fields: Vec<Field>,
    /// Validated candidates keyed by branch id.
    pub candidates: BTreeMap<String, Candidate>,
    /// Squashed locations before filtering, kept when `Options::debug` is set.
    pub squashed: Option<Vec<FieldLocation>>,
}

impl Discovery {
    /// Candidate with the most populated values, then the most items.
    ///
    /// Ties go to the smallest branch id.
    #[must_use]
    pub fn best_candidate(&self) -> Option<&Candidate> {
        self.candidates.values().fold(None, |best: Option<&Candidate>, c| match best {
            Some(b) if (b.field_yield(), b.item_count()) >= (c.field_yield(), c.item_count()) => Some(b),
            _ => Some(c),
        })
    }
}

/// Discovery pipeline with pluggable collaborators.
///
/// # Example
///
/// ```rust
/// use rs_autoscrape::{Discoverer, Options};
///
/// let rows: String = (1..=6)
///     .map(|i| format!(r#"<li class="row"><h3><b>Item {i}</b></h3><p><a href="/i/{i}">more</a></p></li>"#))
///     .collect();
/// let html = format!("<html><body><ul>{rows}</ul></body></html>");
///
/// let discovery = Discoverer::new(Options::default()).discover(&html)?;
/// assert_eq!(discovery.root.to_string(), "body > ul > li.row");
/// # Ok::<(), rs_autoscrape::Error>(())
/// ```
pub struct Discoverer {
    options: Options,
    labeler: Option<Box<dyn Labeler>>,
    engine: Box<dyn ExtractionEngine>,
    dates: Box<dyn DateFormatDetector>,
}

impl Discoverer {
    /// Pipeline with the built-in labeler, engine and date detector.
    #[must_use]
    pub fn new(options: Options) -> Self {
        Self {
            options,
            labeler: Some(Box::new(PatternLabeler::new())),
            engine: Box::new(SelectorEngine::new()),
            dates: Box::new(ChronoLayoutDetector::new()),
        }
    }

    /// Replace the labeler.
    #[must_use]
    pub fn with_labeler(mut self, labeler: impl Labeler + 'static) -> Self {
        self.labeler = Some(Box::new(labeler));
        self
    }

    /// Drop the labeler; fields are named `field-<i>`.
    #[must_use]
    pub fn without_labeler(mut self) -> Self {
        self.labeler = None;
        self
    }

    /// Replace the extraction engine used for validation.
    #[must_use]
    pub fn with_engine(mut self, engine: impl ExtractionEngine + 'static) -> Self {
        self.engine = Box::new(engine);
        self
    }

    /// Replace the date layout detector.
    #[must_use]
    pub fn with_dates(mut self, dates: impl DateFormatDetector + 'static) -> Self {
        self.dates = Box::new(dates);
        self
    }

    /// The run options.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Walk, squash, filter and label the locations of `html`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ParseError`] for an empty document,
    /// [`Error::NoFieldsFound`] when nothing survives filtering and
    /// [`Error::Labeler`] when the labeler fails.
    pub fn locate(&self, html: &str) -> Result<Vec<FieldLocation>> {
        self.locate_with(html, &self.options).map(|(locations, _)| locations)
    }

    /// Run the full pipeline on `html`.
    ///
    /// # Errors
    ///
    /// Everything [`locate`](Self::locate) returns, plus
    /// [`Error::Validation`] when a candidate configuration fails to replay.
    pub fn discover(&self, html: &str) -> Result<Discovery> {
        self.discover_with(html, &self.options)
    }

    /// Fetch `url` and run the full pipeline on it.
    ///
    /// The fetched URL becomes the base for link resolution unless
    /// `Options::url` is already set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyUrl`] for an empty URL and propagates fetch
    /// errors, then everything [`discover`](Self::discover) returns.
    pub fn discover_url(&self, fetcher: &dyn Fetcher, url: &str) -> Result<Discovery> {
        let url = url.trim();
        if url.is_empty() {
            return Err(Error::EmptyUrl);
        }
        let response = fetcher.fetch(url, &FetchOptions::default())?;
        info!(url, status = response.status, bytes = response.body.len(), "fetched page");

        let mut options = self.options.clone();
        if options.url.is_none() {
            options.url = Some(response.url.clone());
        }
        self.discover_with(&response.html(), &options)
    }

    /// Root discovery, materialization and expansion over a caller-chosen
    /// set of locations, e.g. the output of
    /// [`select_fields`](crate::select_fields). Unselected locations are
    /// ignored.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoFieldsSelected`] if no location is selected and
    /// [`Error::Validation`] when a candidate fails to replay.
    pub fn build(&self, html: &str, locations: Vec<FieldLocation>) -> Result<Discovery> {
        let selected: Vec<FieldLocation> = locations.into_iter().filter(|l| l.selected).collect();
        if selected.is_empty() {
            return Err(Error::NoFieldsSelected);
        }
        self.assemble(html, &self.options, selected, None)
    }

    fn discover_with(&self, html: &str, options: &Options) -> Result<Discovery> {
        let (locations, squashed) = self.locate_with(html, options)?;
        self.assemble(html, options, locations, squashed)
    }

    fn locate_with(
        &self,
        html: &str,
        options: &Options,
    ) -> Result<(Vec<FieldLocation>, Option<Vec<FieldLocation>>)> {
        let tokens = dom::tokenize(html)?;
        let raw = analyze(tokens);
        let squashed = squash_with_policy(raw, options.min_occurrence, options.strip_policy_threshold);
        let debug_copy = options.debug.then(|| squashed.clone());

        let mut locations = filter_min_occurrence(squashed, options.min_occurrence);
        if options.only_varying_fields {
            locations = remove_static(locations);
        }
        if locations.is_empty() {
            return Err(Error::NoFieldsFound);
        }

        self.label(&mut locations)?;
        Ok((locations, debug_copy))
    }

    fn label(&self, locations: &mut [FieldLocation]) -> Result<()> {
        for (i, loc) in locations.iter_mut().enumerate() {
            if let Some(labeler) = &self.labeler {
                let name = labeler
                    .predict_label(&loc.examples)
                    .map_err(|e| Error::Labeler {
                        field: loc.describe(),
                        message: e.to_string(),
                    })?;
                loc.name = Some(name);
            }
            loc.color = Some(FIELD_COLORS[i % FIELD_COLORS.len()].to_string());
        }
        Ok(())
    }

    fn assemble(
        &self,
        html: &str,
        options: &Options,
        locations: Vec<FieldLocation>,
        squashed: Option<Vec<FieldLocation>>,
    ) -> Result<Discovery> {
        let root = find_shared_root_selector(&locations);
        let short_root = shorten_root_selector(&root);
        debug!(root = %root, short_root = %short_root, "found root selector");

        let fields = materialize_fields(&locations, &root, self.dates.as_ref());
        let ctx = ExpansionContext {
            html,
            options,
            engine: self.engine.as_ref(),
            dates: self.dates.as_ref(),
        };
        let mut candidates = BTreeMap::new();
        expand(&ctx, ROOT_BRANCH, &locations, &root, &mut candidates)?;
        info!(
            locations = locations.len(),
            candidates = candidates.len(),
            "discovery finished"
        );

        Ok(Discovery {
            locations,
            root,
            short_root,
            fields,
            candidates,
            squashed,
        })
    }
}

impl Default for Discoverer {
    fn default() -> Self {
        Self::new(Options::default())
    }
}
