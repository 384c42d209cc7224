//! Fuzzy detection and removal of repeated headers and footers.
//!
//! Detection clusters the first/last `N` lines of every document
//! (`N = 1..=max_lines`) into one greedy, insertion-ordered cluster set per
//! region. Clusters seen in enough documents become frequent sequences, which
//! are then fuzzily cut from the head and tail of every document, longest first.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::document::{Document, Notifier};
use crate::settings::{CutterSettings, EmptySequencePolicy, SettingsError};
use crate::similarity::{is_strippable, ratio, split_at_char, split_at_char_from_end, split_lines};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CutterError {
    #[error("EmptyComparison: cannot derive a similarity cutoff for an empty string")]
    EmptyComparison,
}

/// Similarity cutoff tolerating `max_differences` edits on a string of
/// `string_length` characters. Tightens for short strings, loosens for long ones.
pub fn similarity_cutoff(max_differences: usize, string_length: usize) -> Result<f64, CutterError> {
    if string_length == 0 {
        return Err(CutterError::EmptyComparison);
    }
    Ok(100.0 - (max_differences as f64 * 100.0 / string_length as f64))
}

/// Minimum number of occurrences for a sequence to count as a header/footer.
/// Never below 2, so a single page is never treated as repeated text.
pub fn min_repeating_docs(document_count: usize, repeat_threshold: f64) -> usize {
    let scaled = (document_count as f64 * repeat_threshold).ceil();
    (scaled as usize).max(2)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    Header,
    Footer,
}

impl Region {
    fn label(self) -> &'static str {
        match self {
            Region::Header => "headers",
            Region::Footer => "footers",
        }
    }

    /// First or last `n` lines of `content`, newline-joined. Shorter documents yield what they have.
    pub fn candidate(self, content: &str, n: usize) -> String {
        let lines = split_lines(content);
        let take = n.min(lines.len());
        let selected = match self {
            Region::Header => &lines[..take],
            Region::Footer => &lines[lines.len() - take..],
        };
        selected.join("\n")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cluster {
    /// First-seen member; never replaced.
    pub sequence: String,
    pub count: usize,
}

/// Greedy online clustering. Clusters keep creation order and are never merged.
#[derive(Debug, Clone, Default)]
pub struct ClusterSet {
    clusters: Vec<Cluster>,
}

impl ClusterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cluster> {
        self.clusters.iter()
    }

    pub fn count_of(&self, sequence: &str) -> Option<usize> {
        self.clusters.iter().find(|c| c.sequence == sequence).map(|c| c.count)
    }

    /// Assign `candidate` to its most similar cluster, or seed a new one.
    ///
    /// The first cluster reaching the strictly highest score wins; a score of 0
    /// never selects a cluster.
    pub fn observe(&mut self, candidate: &str, max_differences: usize, policy: EmptySequencePolicy) -> Result<(), CutterError> {
        if candidate.is_empty() && policy == EmptySequencePolicy::Skip {
            return Ok(());
        }

        let mut best: Option<(usize, u8)> = None;
        for (idx, cluster) in self.clusters.iter().enumerate() {
            let score = ratio(candidate, &cluster.sequence);
            if score > best.map(|(_, s)| s).unwrap_or(0) {
                best = Some((idx, score));
            }
        }

        if let Some((idx, score)) = best {
            let cutoff = similarity_cutoff(max_differences, candidate.chars().count())?;
            if f64::from(score) >= cutoff {
                self.clusters[idx].count += 1;
                return Ok(());
            }
        }

        self.clusters.push(Cluster { sequence: candidate.to_string(), count: 1 });
        Ok(())
    }
}

/// Cluster the first (or last) `1..=max_lines` lines of every document into one set.
pub fn count_similar_regions(
    documents: &[Document],
    max_lines: usize,
    max_differences: usize,
    region: Region,
    policy: EmptySequencePolicy,
) -> Result<ClusterSet, CutterError> {
    let mut clusters = ClusterSet::new();
    for doc in documents {
        for n in 1..=max_lines {
            let candidate = region.candidate(&doc.content, n);
            clusters.observe(&candidate, max_differences, policy)?;
        }
    }
    tracing::debug!(region = region.label(), clusters = clusters.len(), "clustered candidate regions");
    Ok(clusters)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequentSequence {
    pub sequence: String,
    pub count: usize,
}

/// Clusters with `count >= min_count`, longest sequence first (stable for equal lengths).
pub fn frequent_sequences(clusters: &ClusterSet, min_count: usize) -> Vec<FrequentSequence> {
    let mut frequent: Vec<FrequentSequence> = clusters
        .iter()
        .filter(|c| c.count >= min_count)
        .map(|c| FrequentSequence { sequence: c.sequence.clone(), count: c.count })
        .collect();
    frequent.sort_by_key(|f| std::cmp::Reverse(f.sequence.chars().count()));
    frequent
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Excised {
    pub text: String,
    pub head: bool,
    pub tail: bool,
}

/// Cut `sequence` from the head and then the tail of `content` when they match fuzzily.
///
/// The tail is checked against the already head-trimmed text; on short texts the
/// two regions may overlap.
pub fn excise_text(content: &str, sequence: &str, cutoff: f64) -> Excised {
    let seq_len = sequence.chars().count();
    let mut text = content.trim_matches(is_strippable);

    let (head_part, rest) = split_at_char(text, seq_len);
    let head = f64::from(ratio(sequence, head_part)) >= cutoff;
    if head {
        text = rest.trim_start_matches(is_strippable);
    }

    let (rest, tail_part) = split_at_char_from_end(text, seq_len);
    let tail = f64::from(ratio(sequence, tail_part)) >= cutoff;
    if tail {
        text = rest.trim_end_matches(is_strippable);
    }

    Excised { text: text.to_string(), head, tail }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExcisionReport {
    pub sequence: String,
    pub head_matches: usize,
    pub tail_matches: usize,
}

/// Remove `sequence` from the head/tail of every document, returning a new collection.
pub fn remove_sequence(
    documents: &[Document],
    sequence: &str,
    max_differences: usize,
    policy: EmptySequencePolicy,
    notifier: &mut dyn Notifier,
) -> Result<(Vec<Document>, ExcisionReport), CutterError> {
    let mut report = ExcisionReport { sequence: sequence.to_string(), ..Default::default() };
    let cutoff = match similarity_cutoff(max_differences, sequence.chars().count()) {
        Ok(c) => c,
        Err(_) if policy == EmptySequencePolicy::Skip => return Ok((documents.to_vec(), report)),
        Err(e) => return Err(e),
    };

    let mut cleaned = Vec::with_capacity(documents.len());
    for doc in documents {
        let excised = excise_text(&doc.content, sequence, cutoff);
        if excised.head {
            report.head_matches += 1;
        }
        if excised.tail {
            report.tail_matches += 1;
        }
        cleaned.push(doc.replace_content(excised.text));
    }

    for (count, region) in [(report.head_matches, Region::Header), (report.tail_matches, Region::Footer)] {
        if count > 0 {
            let message = format!("removed {} {} strings {}", count, region.label(), sequence);
            tracing::info!(region = region.label(), count, sequence, "removed repeated sequence");
            notifier.notify(&message);
        }
    }

    Ok((cleaned, report))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Detection {
    pub min_repeating_docs: usize,
    pub headers: Vec<FrequentSequence>,
    pub footers: Vec<FrequentSequence>,
}

impl Detection {
    /// Headers followed by footers, each group longest first.
    pub fn sequences(&self) -> impl Iterator<Item = &FrequentSequence> {
        self.headers.iter().chain(self.footers.iter())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CutReport {
    pub removed_headers: usize,
    pub removed_footers: usize,
    pub excisions: Vec<ExcisionReport>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CutOutcome {
    pub documents: Vec<Document>,
    pub detection: Detection,
    pub report: CutReport,
}

/// Header/footer removal pipeline bound to validated settings.
#[derive(Debug, Clone)]
pub struct Cutter {
    settings: CutterSettings,
}

impl Cutter {
    pub fn new(settings: CutterSettings) -> Result<Self, SettingsError> {
        settings.validate()?;
        Ok(Self { settings })
    }

    pub fn settings(&self) -> &CutterSettings {
        &self.settings
    }

    /// Find frequent header and footer sequences. Both passes see the same input.
    pub fn detect(&self, documents: &[Document]) -> Result<Detection, CutterError> {
        let s = &self.settings;
        let min_count = min_repeating_docs(documents.len(), s.repeat_threshold);

        let header_counts = count_similar_regions(documents, s.max_lines, s.max_differences, Region::Header, s.empty_sequences)?;
        let footer_counts = count_similar_regions(documents, s.max_lines, s.max_differences, Region::Footer, s.empty_sequences)?;

        Ok(Detection {
            min_repeating_docs: min_count,
            headers: frequent_sequences(&header_counts, min_count),
            footers: frequent_sequences(&footer_counts, min_count),
        })
    }

    /// Detect and strip headers/footers. `documents` is left untouched; on error nothing is returned.
    pub fn remove_headers_and_footers(&self, documents: &[Document], notifier: &mut dyn Notifier) -> Result<CutOutcome, CutterError> {
        let detection = self.detect(documents)?;
        tracing::debug!(
            min_repeating_docs = detection.min_repeating_docs,
            headers = detection.headers.len(),
            footers = detection.footers.len(),
            "detected frequent sequences"
        );

        let mut working = documents.to_vec();
        let mut report = CutReport::default();
        for frequent in detection.sequences() {
            let (next, excision) = remove_sequence(
                &working,
                &frequent.sequence,
                self.settings.max_differences,
                self.settings.empty_sequences,
                notifier,
            )?;
            working = next;
            report.removed_headers += excision.head_matches;
            report.removed_footers += excision.tail_matches;
            report.excisions.push(excision);
        }

        Ok(CutOutcome { documents: working, detection, report })
    }
}
