//! Property tests for the content transformer.

use std::path::Path;

use proptest::prelude::*;

use wrtpack::{AssetSelector, ContentTransformer};

fn transformer() -> ContentTransformer {
    let selector = AssetSelector::new(["*.html"], ["app/lib/**", "*.png"]).unwrap();
    ContentTransformer::standard(selector, "main.css", "all.css").unwrap()
}

/// Page text without markup. With no `<`, no comment or link removal can
/// join two slashes into a new `//`.
fn page_text() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z/ \t\n.;]{0,200}").unwrap()
}

/// Page text built from markup fragments: comment delimiters, stylesheet
/// links and stray slashes that removals can join together.
fn marked_up_page() -> impl Strategy<Value = String> {
    proptest::collection::vec(
        prop::sample::select(vec![
            "<!--",
            "-->",
            "/",
            "//",
            "<link rel=\"stylesheet\" href=\"css/main.css\">\n",
            "<link rel=\"stylesheet\" href=\"css/small.css\">\n",
            " ",
            "\t",
            "\n",
            "a",
            "<p>",
        ]),
        0..40,
    )
    .prop_map(|parts| parts.concat())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Excluded and non-included assets come back byte for byte.
    #[test]
    fn property_opaque_assets_unchanged(
        raw in proptest::collection::vec(any::<u8>(), 0..256),
        path in prop::sample::select(vec![
            "app/lib/page.html",
            "app/images/logo.png",
            "app/js/main.js",
            "README.txt",
        ])
    ) {
        let out = transformer().transform(Path::new(path), &raw);
        prop_assert_eq!(out.as_ref(), raw.as_slice());
    }

    /// PROPERTY: Rewritten pages carry no line comments, blank lines or
    /// whitespace runs.
    #[test]
    fn property_pages_are_collapsed(text in page_text()) {
        let out = transformer().transform_text(Path::new("app/index.html"), &text);
        prop_assert!(!out.contains("//"), "line comment left in {:?}", out);
        prop_assert!(!out.contains("\n\n"), "blank line left in {:?}", out);
        prop_assert!(!out.contains("  "), "space run left in {:?}", out);
        prop_assert!(!out.contains("\t\t"), "tab run left in {:?}", out);
    }

    /// PROPERTY: The same holds once comments and links are removed from
    /// between the slashes.
    #[test]
    fn property_marked_up_pages_are_collapsed(text in marked_up_page()) {
        let out = transformer().transform_text(Path::new("app/index.html"), &text);
        prop_assert!(!out.contains("//"), "line comment left in {:?}", out);
        prop_assert!(!out.contains("\n\n"), "blank line left in {:?}", out);
        prop_assert!(!out.contains("  "), "space run left in {:?}", out);
        prop_assert!(!out.contains("\t\t"), "tab run left in {:?}", out);
    }

    /// PROPERTY: Rewriting a rewritten page changes nothing.
    #[test]
    fn property_rewrite_is_idempotent(text in page_text()) {
        let t = transformer();
        let once = t.transform_text(Path::new("app/index.html"), &text).into_owned();
        let twice = t.transform_text(Path::new("app/index.html"), &once).into_owned();
        prop_assert_eq!(once, twice);
    }

    /// PROPERTY: Block comments never survive, however they are laid out.
    #[test]
    fn property_block_comments_removed(
        before in "[a-z \n]{0,40}",
        inner in "[a-z \n]{0,40}",
        after in "[a-z \n]{0,40}"
    ) {
        let page = format!("{}<!--{}-->{}", before, inner, after);
        let out = transformer().transform_text(Path::new("app/index.html"), &page);
        prop_assert!(!out.contains("<!--"));
        prop_assert!(!out.contains("-->"));
    }
}
