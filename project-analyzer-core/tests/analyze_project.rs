use project_analyzer_core::analyze::analyze_project;
use project_analyzer_core::config::{AnalysisConfig, IgnorePattern};
use project_analyzer_core::contract::{AnalysisError, DirectoryRole, Language};
use project_analyzer_core::score::score;
use regex::Regex;
use std::fs::{create_dir_all, write};
use std::path::Path;
use tempfile::tempdir;

fn lines(n: usize, body: &str) -> String {
    // `n` lines once split on '\n': body plus padding, no trailing newline.
    let mut out: Vec<String> = body.split('\n').map(str::to_string).collect();
    while out.len() < n {
        out.push(String::from("x;"));
    }
    out.join("\n")
}

/// index.js (1 function, 1 class, 10 lines), utils.js (20 lines), node_modules/.
fn create_small_js_project(root: &Path) {
    write(
        root.join("index.js"),
        lines(10, "function start() {\n}\nclass Server {}"),
    )
    .unwrap();
    write(root.join("utils.js"), lines(20, "const a = 1;")).unwrap();
    create_dir_all(root.join("node_modules/express")).unwrap();
    write(root.join("node_modules/express/index.js"), "module.exports = {}").unwrap();
}

#[test]
fn small_project_ranks_index_first_and_ignores_node_modules() {
    let tmp = tempdir().unwrap();
    create_small_js_project(tmp.path());

    let info = analyze_project(tmp.path(), &AnalysisConfig::default()).expect("analysis succeeds");

    assert_eq!(info.file_count, 2);
    assert_eq!(info.key_files, vec!["index.js", "utils.js"]);
    assert_eq!(info.directories, vec!["."]);
    assert_eq!(info.file_analysis.len(), 2);

    let index = &info.file_analysis[0];
    assert_eq!(index.path, "index.js");
    assert_eq!(index.line_count, 10);
    assert_eq!(index.function_count, 1);
    assert_eq!(index.class_count, 1);

    let utils = &info.file_analysis[1];
    assert_eq!(utils.line_count, 20);
    assert_eq!(utils.function_count, 0);

    let config = AnalysisConfig::default();
    assert!(score("index.js", "index.js", &config) >= 150);
}

#[test]
fn only_ineligible_files_yield_an_empty_report() {
    let tmp = tempdir().unwrap();
    write(tmp.path().join("notes.txt"), "plain text").unwrap();
    create_dir_all(tmp.path().join("dist")).unwrap();
    write(tmp.path().join("dist/bundle.js"), "ignored").unwrap();

    let info = analyze_project(tmp.path(), &AnalysisConfig::default()).expect("no error");
    assert_eq!(info.file_count, 0);
    assert_eq!(info.directory_count, 0);
    assert!(info.file_analysis.is_empty());
    assert!(info.key_files.is_empty());
    assert!(info.directories.is_empty());
    assert!(info.directory_roles.is_empty());
}

#[test]
fn unreadable_file_is_skipped_and_siblings_survive() {
    let tmp = tempdir().unwrap();
    write(tmp.path().join("app.js"), "function run() {}").unwrap();
    write(tmp.path().join("helper.js"), "const ok = true;").unwrap();
    // Not valid UTF-8, so reading it as text fails.
    write(tmp.path().join("index.js"), [0xff, 0xfe, 0x00, 0x9f]).unwrap();

    let info = analyze_project(tmp.path(), &AnalysisConfig::default()).expect("no error escapes");

    assert_eq!(info.file_count, 3);
    let analysed: Vec<_> = info.file_analysis.iter().map(|f| f.path.as_str()).collect();
    assert_eq!(analysed, vec!["app.js", "helper.js"]);
    // Ranking still includes the unreadable file.
    assert_eq!(info.key_files[0], "index.js");
}

#[test]
fn malformed_manifest_fails_the_analysis() {
    let tmp = tempdir().unwrap();
    write(tmp.path().join("package.json"), "{\"name\": ").unwrap();
    write(tmp.path().join("index.js"), "x").unwrap();

    let err = analyze_project(tmp.path(), &AnalysisConfig::default()).unwrap_err();
    assert!(matches!(err, AnalysisError::ManifestParse { .. }), "got {err:?}");
    assert!(err.to_string().contains("package.json"));
}

#[test]
fn manifest_seeds_name_language_and_dependencies() {
    let tmp = tempdir().unwrap();
    write(
        tmp.path().join("package.json"),
        r#"{"name":"web-shop","description":"Shop front","dependencies":{"react":"^18.2.0"}}"#,
    )
    .unwrap();
    write(tmp.path().join("README.md"), "Shop front.\n\nMore details.").unwrap();
    write(tmp.path().join("main.ts"), "import x from 'y';").unwrap();

    let info = analyze_project(tmp.path(), &AnalysisConfig::default()).unwrap();
    assert_eq!(info.name, "web-shop");
    assert_eq!(info.description.as_deref(), Some("Shop front"));
    assert_eq!(info.language, Some(Language::JavaScriptTypeScript));
    assert_eq!(
        info.dependencies.as_ref().and_then(|d| d.get("react")).map(String::as_str),
        Some("^18.2.0")
    );
    assert_eq!(info.readme.as_deref(), Some("Shop front."));
    assert_eq!(info.file_analysis[0].import_count, 1);
}

#[test]
fn name_defaults_to_directory_name() {
    let tmp = tempdir().unwrap();
    let root = tmp.path().join("my-service");
    create_dir_all(&root).unwrap();
    write(root.join("Cargo.toml"), "[package]\nname = \"ignored\"").unwrap();
    write(root.join("lib.rs"), "pub fn x() {}").unwrap();

    let info = analyze_project(&root, &AnalysisConfig::default()).unwrap();
    assert_eq!(info.name, "my-service");
    assert_eq!(info.language, Some(Language::Rust));
    assert_eq!(info.dependencies, None);
}

#[test]
fn limits_bound_analysis_key_files_and_directories() {
    let tmp = tempdir().unwrap();
    for i in 0..12 {
        let dir = tmp.path().join(format!("pkg{i:02}"));
        create_dir_all(&dir).unwrap();
        write(dir.join("mod.py"), "def f():\n    pass").unwrap();
        write(dir.join("userService.py"), "# service").unwrap();
    }
    let config = AnalysisConfig {
        max_files_to_analyze: 7,
        ..AnalysisConfig::default()
    };

    let info = analyze_project(tmp.path(), &config).unwrap();
    assert_eq!(info.file_count, 24);
    assert_eq!(info.file_analysis.len(), 7);
    assert_eq!(info.key_files.len(), 5);
    assert_eq!(info.directories.len(), 10);
    // 12 package dirs plus the root.
    assert_eq!(info.directory_count, 13);
    assert_eq!(info.directory_roles.len(), info.directory_count);

    assert!(info.key_files.iter().all(|p| p.ends_with("userService.py")));
    assert!(info
        .file_analysis
        .iter()
        .all(|f| f.path.ends_with("userService.py")));
}

#[test]
fn analysed_files_are_in_descending_score_order() {
    let tmp = tempdir().unwrap();
    create_dir_all(tmp.path().join("src")).unwrap();
    for name in ["plain.js", "routes.js", "app.js", "orderController.js", "stringUtil.js"] {
        write(tmp.path().join("src").join(name), "x").unwrap();
    }
    let config = AnalysisConfig::default();
    let info = analyze_project(tmp.path(), &config).unwrap();

    let scores: Vec<u32> = info
        .file_analysis
        .iter()
        .map(|f| {
            let name = f.path.rsplit('/').next().unwrap();
            score(name, &f.path, &config)
        })
        .collect();
    assert!(scores.windows(2).all(|w| w[0] >= w[1]), "scores {scores:?}");
    assert_eq!(info.key_files[0], "src/app.js");
    assert_eq!(info.directories, vec!["src"]);
}

#[test]
fn structure_only_suppresses_every_sample() {
    let tmp = tempdir().unwrap();
    create_small_js_project(tmp.path());

    let full = analyze_project(tmp.path(), &AnalysisConfig::default()).unwrap();
    let config = AnalysisConfig {
        include_structure_only: true,
        ..AnalysisConfig::default()
    };
    let structure = analyze_project(tmp.path(), &config).unwrap();

    assert!(full.file_analysis.iter().all(|f| f.sample.is_some()));
    assert!(structure.file_analysis.iter().all(|f| f.sample.is_none()));
    for (a, b) in full.file_analysis.iter().zip(&structure.file_analysis) {
        assert_eq!(a.line_count, b.line_count);
        assert_eq!(a.function_count, b.function_count);
        assert_eq!(a.class_count, b.class_count);
    }
}

#[test]
fn repeated_runs_are_identical_and_do_not_share_roles() {
    let first = tempdir().unwrap();
    create_dir_all(first.path().join("api")).unwrap();
    write(first.path().join("api/handler.go"), "package api").unwrap();

    let second = tempdir().unwrap();
    create_dir_all(second.path().join("client")).unwrap();
    write(second.path().join("client/view.tsx"), "export {}").unwrap();

    let config = AnalysisConfig::default();
    let a1 = analyze_project(first.path(), &config).unwrap();
    let b = analyze_project(second.path(), &config).unwrap();
    let a2 = analyze_project(first.path(), &config).unwrap();

    assert_eq!(a1, a2);
    assert_eq!(
        serde_json::to_string(&a1).unwrap(),
        serde_json::to_string(&a2).unwrap()
    );
    assert!(a1.directory_roles.values().any(|r| *r == DirectoryRole::BackendApi));
    assert!(!a1.directory_roles.values().any(|r| *r == DirectoryRole::FrontendUi));
    assert!(b.directory_roles.values().any(|r| *r == DirectoryRole::FrontendUi));
    assert!(!b.directory_roles.values().any(|r| *r == DirectoryRole::BackendApi));
}

#[test]
fn regex_ignore_patterns_hide_matching_entries() {
    let tmp = tempdir().unwrap();
    create_dir_all(tmp.path().join(".cache")).unwrap();
    write(tmp.path().join(".cache/index.js"), "x").unwrap();
    write(tmp.path().join("bundle.min.js"), "x").unwrap();
    write(tmp.path().join("index.js"), "x").unwrap();

    let mut config = AnalysisConfig::default();
    config
        .ignore_patterns
        .push(IgnorePattern::Regex(Regex::new(r"^\.|\.min\.js$").unwrap()));

    let info = analyze_project(tmp.path(), &config).unwrap();
    assert_eq!(info.file_count, 1);
    assert_eq!(info.key_files, vec!["index.js"]);
}
