//! Property-based tests for the document table
//!
//! Tests that the three documents stay independent and that change
//! detection reports only real edits.

use codebin_core::models::{DocumentId, Documents, Snippet};
use codebin_core::preview::compose_document;
use proptest::prelude::*;

fn arb_document_id() -> impl Strategy<Value = DocumentId> {
    prop_oneof![
        Just(DocumentId::Markup),
        Just(DocumentId::Style),
        Just(DocumentId::Script),
    ]
}

fn arb_content() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z0-9 <>{}();:=./'\"-]{0,60}").unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn set_touches_only_its_document(
        markup in arb_content(),
        style in arb_content(),
        script in arb_content(),
        target in arb_document_id(),
        content in arb_content(),
    ) {
        let mut documents = Documents::from_contents(markup, style, script);
        let before = documents.clone();

        let changed = documents.set(target, content.clone());

        prop_assert_eq!(changed, before.content(target) != content);
        prop_assert_eq!(documents.content(target), content.as_str());
        for id in DocumentId::ALL.into_iter().filter(|id| *id != target) {
            prop_assert_eq!(documents.content(id), before.content(id));
        }
    }

    #[test]
    fn setting_same_content_reports_no_change(target in arb_document_id(), content in arb_content()) {
        let mut documents = Documents::new();
        documents.set(target, content.clone());
        prop_assert!(!documents.set(target, content));
    }

    #[test]
    fn snippet_carries_documents(
        title in arb_content(),
        markup in arb_content(),
        style in arb_content(),
        script in arb_content(),
    ) {
        let documents = Documents::from_contents(markup, style, script);
        let snippet = Snippet::from_documents(title.clone(), &documents);

        prop_assert_eq!(snippet.to_documents(), documents);
        prop_assert_eq!(&snippet.title, &title);
        prop_assert!(!snippet.display_title().trim().is_empty());
    }

    #[test]
    fn composed_document_orders_parts(
        markup in "[a-z]{1,20}",
        style in "[a-z]{1,20}",
        script in "[a-z]{1,20}",
    ) {
        let documents = Documents::from_contents(
            format!("<main>{markup}</main>"),
            format!("/*{style}*/"),
            format!("//{script}"),
        );
        let html = compose_document(&documents, None);

        let style_at = html.find(&format!("/*{style}*/")).unwrap();
        let head_end = html.find("</head>").unwrap();
        let markup_at = html.find(&format!("<main>{markup}</main>")).unwrap();
        let script_at = html.rfind(&format!("//{script}")).unwrap();

        prop_assert!(style_at < head_end);
        prop_assert!(head_end < markup_at);
        prop_assert!(markup_at < script_at);
    }
}
