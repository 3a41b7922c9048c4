//! Integration tests for `wrtpack dist`

mod common;

use common::*;

#[test]
fn dist_builds_transformed_tree() {
    let env = TestEnv::builder().with_web_app().build();

    let result = env.run(&["dist"]);

    assert!(result.success, "dist failed: {}", result.stderr);
    assert_built!(env, "build/app/index.html");
    assert_built!(env, "build/app/help.html");
    assert_built!(env, "build/app/css/all.css");
    assert_built!(env, "build/app/js/main.js");
    assert_built!(env, "build/app/js/run.js");
    assert_built!(env, "build/app/README.txt");
    assert_built!(env, "build/app/LICENSE");
    assert_built!(env, "build/app/_locales/en/messages.json");
    // Sources are bundled, not copied
    assert_not_built!(env, "build/app/css/main.css");
    // dist never packages
    assert_not_built!(env, "build/wgt");
    assert_not_built!(env, "build/crx");
}

#[test]
fn dist_rewrites_html_pages() {
    let env = TestEnv::builder().with_web_app().build();

    let result = env.run(&["dist"]);
    assert!(result.success, "dist failed: {}", result.stderr);

    let index = env.read_project_file("build/app/index.html");
    assert!(!index.contains("<!--"), "block comment left:\n{}", index);
    assert!(!index.contains("entry point"), "line comment left:\n{}", index);
    assert!(!index.contains("\n\n"));
    assert!(!index.contains("  "));
    assert!(index.contains(r#"<link rel="stylesheet" href="css/all.css"/>"#));
    assert!(!index.contains("license.css"));
    assert!(!index.contains("help.css"));
    assert!(index.contains(r#"<script src="js/main.js"></script>"#));

    assert_eq!(
        env.read_project_file("build/app/help.html"),
        "<html>\n<body> help </body>\n</html>\n"
    );
}

#[test]
fn dist_copies_opaque_assets_byte_for_byte() {
    let env = TestEnv::builder().with_web_app().build();

    let result = env.run(&["dist"]);
    assert!(result.success, "dist failed: {}", result.stderr);

    assert_eq!(env.read_project_bytes("build/app/images/logo.png"), PNG);
    assert_eq!(
        env.read_project_file("build/app/lib/vendor.js"),
        "var  x = 1; // vendor\n"
    );
    assert_eq!(
        env.read_project_file("build/app/README.txt"),
        "Sudoku\n\n\nA puzzle.\n"
    );
}

#[test]
fn dist_concatenates_bundles_in_order() {
    let env = TestEnv::builder().with_web_app().build();

    let result = env.run(&["dist"]);
    assert!(result.success, "dist failed: {}", result.stderr);

    assert_eq!(
        env.read_project_file("build/app/css/all.css"),
        "body { margin: 0; }\n.license { }\n.help { }\n"
    );
}

#[test]
fn dist_removes_stale_build_output() {
    let env = TestEnv::builder()
        .with_web_app()
        .with_file("build/app/old.html", b"stale")
        .build();

    let result = env.run(&["dist"]);

    assert!(result.success, "dist failed: {}", result.stderr);
    assert_not_built!(env, "build/app/old.html");
}

#[test]
fn dist_reports_tasks_in_plan_order() {
    let env = TestEnv::builder().with_web_app().build();

    let result = env.run(&["dist"]);

    assert!(result.success, "dist failed: {}", result.stderr);
    assert!(result
        .stdout
        .starts_with("dist: clean -> transform-assets -> copy-common -> dist\n"));
    let clean = result.stdout.find("✓ clean").expect("clean not reported");
    let copy = result.stdout.find("✓ copy-common").expect("copy-common not reported");
    assert!(clean < copy);
    assert!(!result.stdout.contains("✓ dist"));
    assert!(result.stdout.contains("Done in "));
}

#[test]
fn dist_honors_build_dir_override() {
    let env = TestEnv::builder().with_web_app().build();

    let result = env.run_with_env(&["dist"], &[("WRTPACK_BUILD_DIR", "out")]);

    assert!(result.success, "dist failed: {}", result.stderr);
    assert_built!(env, "out/app/index.html");
    assert_not_built!(env, "build");
}

#[test]
fn dist_missing_bundle_input_fails_in_transform_assets() {
    let env = TestEnv::builder().with_web_app().build();
    env.remove_project_file("app/js/run.js");

    let result = env.run(&["dist"]);

    assert!(!result.success);
    assert_eq!(result.exit_code, 11);
    assert!(
        result.stderr.contains("failed task: transform-assets"),
        "stderr: {}",
        result.stderr
    );
    // copy-common comes after the failed task and never ran
    assert_not_built!(env, "build/app/index.html");
}

#[test]
fn dist_json_report() {
    let env = TestEnv::builder().with_web_app().build();

    let result = env.run(&["dist", "--json"]);

    assert!(result.success, "dist failed: {}", result.stderr);
    let value: serde_json::Value =
        serde_json::from_str(&result.stdout).expect("stdout is not JSON");
    assert_eq!(value["status"], "ok");
    assert_eq!(value["entry"], "dist");
    assert_eq!(
        value["plan"],
        serde_json::json!(["clean", "transform-assets", "copy-common", "dist"])
    );
    assert_eq!(value["tasks"].as_array().map(Vec::len), Some(3));
    assert!(value.get("device_state").is_none());
}
