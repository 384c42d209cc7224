use std::fs;
use std::path::PathBuf;

use header_footer_cutter::files::render_documents_text;
use header_footer_cutter::{
    emit_documents, enumerate_inputs, load_documents, write_documents_to_text_file, CutReport, Document, EnumerateError, LoadError,
    OutputMeta,
};
use serde_json::json;

#[test]
fn enumerate_inputs_finds_nested_files_sorted() {
    let td = tempfile::tempdir().unwrap();
    let base = td.path();
    fs::create_dir_all(base.join("pages/b")).unwrap();
    fs::create_dir_all(base.join("pages/a")).unwrap();
    fs::write(base.join("pages/b/2.txt"), "two").unwrap();
    fs::write(base.join("pages/a/1.txt"), "one").unwrap();

    let pattern = format!("{}/pages/**/*.txt", base.display());
    let files = enumerate_inputs(&pattern).expect("should find files");
    let files: Vec<PathBuf> = files.into_iter().map(|p| p.strip_prefix(base).unwrap().to_path_buf()).collect();
    assert_eq!(files, vec![PathBuf::from("pages/a/1.txt"), PathBuf::from("pages/b/2.txt")]);
}

#[test]
fn enumerate_inputs_empty_is_error() {
    let td = tempfile::tempdir().unwrap();
    let pattern = format!("{}/pages/**/*.txt", td.path().display());
    let err = enumerate_inputs(&pattern).unwrap_err();
    assert_eq!(err.to_string(), "NoFilesFound");
    assert!(matches!(err, EnumerateError::NoFilesFound { .. }));
}

#[test]
fn text_files_split_into_pages() {
    let td = tempfile::tempdir().unwrap();
    let path = td.path().join("book.txt");
    fs::write(&path, "page one\u{000C}page two\u{000C}  \n").unwrap();

    let docs = load_documents(&[path.clone()]).unwrap();
    assert_eq!(docs.len(), 2);
    assert_eq!(docs[1].content, "page two");
    assert_eq!(docs[1].metadata["page"], json!(2));
    assert_eq!(docs[0].metadata["source"], json!(path.display().to_string()));
}

#[test]
fn jsonl_files_hold_documents() {
    let td = tempfile::tempdir().unwrap();
    let path = td.path().join("docs.jsonl");
    fs::write(&path, "{\"content\":\"a\",\"metadata\":{\"k\":1}}\n\n{\"content\":\"b\"}\n").unwrap();
    let docs = load_documents(&[path.clone()]).unwrap();
    assert_eq!(docs.len(), 2);
    assert_eq!(docs[0].metadata["k"], json!(1));
    assert!(docs[1].metadata.is_empty());

    fs::write(&path, "{\"content\":\"a\"}\nnot json\n").unwrap();
    match load_documents(&[path]) {
        Err(LoadError::Parse { line, .. }) => assert_eq!(line, 2),
        other => panic!("expected Parse error, got {:?}", other),
    }
}

#[test]
fn text_dump_lists_every_document() {
    let docs = vec![Document::new("first"), Document::new("second")];
    let rendered = render_documents_text(&docs);
    assert!(rendered.starts_with("List of 2 documents\n"));
    assert!(rendered.contains("Document 1:\n\nAttribute: content Value: second\n"));

    let td = tempfile::tempdir().unwrap();
    let path = td.path().join("tmp/docs.txt");
    write_documents_to_text_file(&docs, &path).unwrap();
    assert_eq!(fs::read_to_string(path).unwrap(), rendered);
}

#[test]
fn emit_documents_writes_jsonl_and_meta() {
    let docs = vec![Document::new("clean one"), Document::new("clean two")];
    let report = CutReport { removed_headers: 2, removed_footers: 0, excisions: vec![] };
    let meta = OutputMeta::new(&docs, &report);
    assert_eq!(meta.document_count, 2);

    let td = tempfile::tempdir().unwrap();
    let outdir = td.path().join("out");
    let paths = emit_documents(&docs, &meta, &outdir, "run").expect("emit ok");

    let written: Vec<Document> = fs::read_to_string(&paths.documents_path)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(written, docs);
    let m = fs::read_to_string(paths.meta_path).unwrap();
    assert!(m.contains("\"removed_headers\": 2"));
}
