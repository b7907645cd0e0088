//! Exit-status tests for the `pdf2md` binary.
//!
//! Only the preflight failures are covered here: they happen before the
//! pdfium engine is bound, so no native library is needed.

#![cfg(feature = "cli")]

use std::process::{Command, Output};

fn pdf2md(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_pdf2md"))
        .args(args)
        .env_remove("GEMINI_API_KEY")
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to launch pdf2md")
}

#[test]
fn nonexistent_input_exits_with_failure() {
    let out = pdf2md(&["/definitely/not/here/doc.pdf"]);

    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("not found"), "stderr: {stderr}");
}

#[test]
fn ai_mode_without_key_exits_before_processing() {
    if option_env!("PDF2MD_FALLBACK_API_KEY").is_some() {
        println!("SKIP — binary was built with a fallback API key");
        return;
    }

    let dir = tempfile::tempdir().unwrap();
    let pdf = dir.path().join("doc.pdf");
    std::fs::write(&pdf, b"%PDF-1.7 placeholder").unwrap();

    let out = pdf2md(&[pdf.to_str().unwrap(), "--mode", "ai", "--no-progress"]);

    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("API key"), "stderr: {stderr}");
    assert!(!dir.path().join("doc.md").exists());
}

#[test]
fn empty_api_key_flag_counts_as_absent() {
    if option_env!("PDF2MD_FALLBACK_API_KEY").is_some() {
        println!("SKIP — binary was built with a fallback API key");
        return;
    }

    let dir = tempfile::tempdir().unwrap();
    let pdf = dir.path().join("doc.pdf");
    std::fs::write(&pdf, b"%PDF-1.7 placeholder").unwrap();

    let out = pdf2md(&[pdf.to_str().unwrap(), "-m", "ai", "-k", ""]);

    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn unknown_mode_is_a_usage_error() {
    let out = pdf2md(&["doc.pdf", "--mode", "ocr"]);
    assert_eq!(out.status.code(), Some(2));
}
