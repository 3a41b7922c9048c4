//! Reusable test content

pub const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8"/>
    <!-- styles are bundled
         into all.css at build time -->
    <link rel="stylesheet" href="css/main.css"/>
    <link rel="stylesheet" href="css/license.css"/>
    <link rel="stylesheet" href="css/help.css"/>
</head>
<body>


    <div id="board"></div>    <!-- filled by main.js -->
    <script src="js/main.js"></script> // entry point
</body>
</html>
"#;

pub const HELP_HTML: &str = "<html>\n\n\n<body>   help   </body>\n</html>\n";

/// Not a real PNG, just bytes any text rewrite would damage
pub const PNG: &[u8] = b"\x89PNG\r\n\x1a\n  //  <!-- -->\n\n\n";

pub const CONFIG_XML: &str =
    r#"<widget xmlns="http://www.w3.org/ns/widgets" id="http://example.org/sudoku"/>"#;

pub const MANIFEST_JSON: &str = r#"{ "name": "Sudoku", "version": "1.0.0" }"#;

pub const PACKAGE_JSON: &str = r#"{ "name": "sudoku", "version": "1.0.0" }"#;

/// Files of a small web application, relative to the project root.
/// Laid out so the built-in defaults find every bundle input and extra file.
pub fn web_app() -> Vec<(&'static str, &'static [u8])> {
    vec![
        ("app/index.html", INDEX_HTML.as_bytes()),
        ("app/help.html", HELP_HTML.as_bytes()),
        ("app/js/main.js", b"function main() {}\n"),
        ("app/js/help.js", b"function help() {}\n"),
        ("app/js/license.js", b"function license() {}\n"),
        ("app/js/run.js", b"main();\n"),
        ("app/css/main.css", b"body { margin: 0; }\n"),
        ("app/css/license.css", b".license { }\n"),
        ("app/css/help.css", b".help { }\n"),
        ("app/images/logo.png", PNG),
        ("app/lib/vendor.js", b"var  x = 1; // vendor\n"),
        (
            "app/_locales/en/messages.json",
            b"{ \"title\": { \"message\": \"Sudoku\" } }\n",
        ),
        ("README.txt", b"Sudoku\n\n\nA puzzle.\n"),
        ("LICENSE", b"MIT\n"),
        ("config.xml", CONFIG_XML.as_bytes()),
        ("manifest.json", MANIFEST_JSON.as_bytes()),
        ("icon_16.png", PNG),
        ("icon_48.png", PNG),
        ("icon_128.png", PNG),
        ("package.json", PACKAGE_JSON.as_bytes()),
        ("tools/tizen-app.sh", b"#!/bin/sh\n"),
    ]
}
