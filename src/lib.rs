//! Strip repeated headers and footers from page-level text documents.
//!
//! ```
//! use header_footer_cutter::{Cutter, CutterSettings, Document};
//!
//! let docs = vec![
//!     Document::new("ACME Corp\nfirst page body"),
//!     Document::new("ACME Corp\nsecond page text"),
//! ];
//! let cutter = Cutter::new(CutterSettings { max_lines: 1, ..Default::default() })?;
//! let mut messages: Vec<String> = Vec::new();
//! let outcome = cutter.remove_headers_and_footers(&docs, &mut messages)?;
//! assert_eq!(outcome.documents[0].content, "first page body");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod cutter;
pub mod document;
pub mod files;
pub mod settings;
pub mod similarity;

pub use cutter::{
    count_similar_regions, excise_text, frequent_sequences, min_repeating_docs, remove_sequence, similarity_cutoff, Cluster, ClusterSet,
    CutOutcome, CutReport, Cutter, CutterError, Detection, Excised, ExcisionReport, FrequentSequence, Region,
};
pub use document::{Document, Notifier, NullNotifier};
pub use files::{
    emit_documents, enumerate_inputs, load_documents, write_documents_to_json, write_documents_to_text_file, EmitError, EmitPaths,
    EnumerateError, LoadError, OutputMeta,
};
pub use settings::{load_settings, CutterSettings, EmptySequencePolicy, SettingsError};
pub use similarity::{ratio, split_lines};
