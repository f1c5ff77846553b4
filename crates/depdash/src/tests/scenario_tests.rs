//! End-to-end scenarios over in-memory trees.

use super::test_helpers::{memory_analyzer, memory_project};
use crate::diagnostics::Diagnostic;
use crate::{ModuleId, Severity};

fn id(s: &str) -> ModuleId {
    ModuleId::new(s)
}

#[tokio::test]
async fn test_mutual_import_is_one_critical_cycle() {
    let (analyzer, _) = memory_analyzer(memory_project(&[
        ("a.js", "import b from './b';"),
        ("b.js", "import a from './a';"),
    ]));

    let report = analyzer.analyze_folder().await.unwrap();
    let circular = &report.circular_dependencies;

    assert_eq!(circular.total_circular_dependencies, 1);
    assert_eq!(circular.critical, 1);
    assert_eq!(circular.warnings, 0);
    let cycle = &circular.circular_dependencies[0];
    assert_eq!(cycle.cycle, vec![id("a"), id("b"), id("a")]);
    assert_eq!(cycle.members(), &[id("a"), id("b")]);
}

#[tokio::test]
async fn test_linear_chain_depths() {
    let (analyzer, _) = memory_analyzer(memory_project(&[
        ("a.js", "import b from './b';"),
        ("b.js", "import c from './c';"),
        ("c.js", "export default 1;"),
    ]));

    let report = analyzer.analyze_folder().await.unwrap();
    assert!(report.circular_dependencies.is_empty());

    let depths = &report.depth_analysis.statistics.all_depths;
    assert_eq!(depths[&id("a")].outgoing_depth, 2);
    assert_eq!(depths[&id("b")].outgoing_depth, 1);
    assert_eq!(depths[&id("c")].outgoing_depth, 0);
    assert_eq!(depths[&id("c")].incoming_depth, 2);
    assert_eq!(depths[&id("b")].max_depth, 1);
}

#[tokio::test]
async fn test_isolated_target_has_empty_neighborhood() {
    let (analyzer, _) = memory_analyzer(memory_project(&[
        ("target.js", "import fs from 'fs';"),
        ("other.js", "import x from './another';"),
        ("another.js", ""),
    ]));

    let report = analyzer.analyze_file("target.js").await.unwrap();

    assert!(report.incoming.is_empty());
    assert!(report.outgoing.is_empty());
    assert_eq!(report.total_files, 3);
    assert!(report.dependency_chains.outgoing.is_empty());
    assert!(report.dependency_chains.incoming.is_empty());
}

#[tokio::test]
async fn test_repeated_import_keeps_both_details() {
    let (analyzer, _) = memory_analyzer(memory_project(&[
        (
            "app.js",
            "import { x } from './target';\nimport { y, z as w } from './target';",
        ),
        ("target.js", ""),
    ]));

    let single = analyzer.analyze_file("target.js").await.unwrap();
    assert_eq!(
        single.incoming[&id("app")],
        vec!["Named imports: x", "Named imports: y, z as w"]
    );

    let folder = analyzer.analyze_folder().await.unwrap();
    let app = folder.file("app").unwrap();
    assert_eq!(app.outgoing_count, 1);
    assert_eq!(app.import_details.outgoing[&id("target")].len(), 2);
}

#[tokio::test]
async fn test_missing_target_yields_empty_report() {
    let (analyzer, sink) = memory_analyzer(memory_project(&[
        ("a.js", "import b from './b';"),
        ("b.js", ""),
    ]));

    let report = analyzer.analyze_file("nope.js").await.unwrap();

    assert_eq!(report.target_file, "nope.js");
    assert_eq!(report.total_files, 2);
    assert!(report.incoming.is_empty());
    assert!(report.outgoing.is_empty());
    assert!(report.circular_dependencies.is_empty());
    assert!(sink.is_empty());
}

#[tokio::test]
async fn test_bare_filename_matches_by_suffix() {
    let (analyzer, _) = memory_analyzer(memory_project(&[
        ("src/app.ts", "import { fmt } from './lib/utils';"),
        ("src/lib/utils.ts", "import { pad } from '../shared/pad';"),
        ("src/shared/pad.ts", ""),
    ]));

    let report = analyzer.analyze_file("utils.ts").await.unwrap();

    assert_eq!(report.target_file, "utils.ts");
    assert_eq!(report.incoming.keys().collect::<Vec<_>>(), vec![&id("src/app")]);
    assert_eq!(
        report.outgoing.keys().collect::<Vec<_>>(),
        vec![&id("src/shared/pad")]
    );

    let incoming: Vec<String> = report
        .dependency_chains
        .incoming
        .iter()
        .map(|c| c.format_chain())
        .collect();
    assert_eq!(incoming, vec!["src/lib/utils -> src/app"]);
}

#[tokio::test]
async fn test_target_without_extension() {
    let (analyzer, _) = memory_analyzer(memory_project(&[
        ("a.js", "const b = require('./b');"),
        ("b.js", ""),
    ]));

    let report = analyzer.analyze_file("b").await.unwrap();
    assert_eq!(report.incoming[&id("a")], vec!["Module import (no specific items)"]);
}

#[tokio::test]
async fn test_extension_tolerant_resolution() {
    let (analyzer, _) = memory_analyzer(memory_project(&[
        ("dir/y.ts", "import { x } from './x';"),
        ("dir/x.js", "export const x = 1;"),
        ("dir/z.tsx", "import y from './y.ts';"),
    ]));

    let report = analyzer.analyze_folder().await.unwrap();

    assert_eq!(report.file("dir/y").unwrap().outgoing, vec![id("dir/x")]);
    assert_eq!(report.file("dir/z").unwrap().outgoing, vec![id("dir/y")]);
}

#[tokio::test]
async fn test_unreadable_file_is_a_warning() {
    let runtime = memory_project(&[
        ("a.js", "import b from './b';"),
        ("b.js", "import a from './a';"),
    ])
    .with_unreadable("b.js");
    let (analyzer, sink) = memory_analyzer(runtime);

    let report = analyzer.analyze_folder().await.unwrap();

    // b stays a node and keeps its incoming edge, but contributes no outgoing ones
    let b = report.file("b").unwrap();
    assert_eq!(b.incoming, vec![id("a")]);
    assert_eq!(b.outgoing_count, 0);
    assert!(report.circular_dependencies.is_empty());

    let diagnostics = sink.diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert!(matches!(&diagnostics[0], Diagnostic::UnreadableFile { path, .. } if path.ends_with("b.js")));
}

#[tokio::test]
async fn test_unreadable_target_keeps_its_importers() {
    let runtime = memory_project(&[
        ("a.js", "import t from './target';"),
        ("target.js", "import b from './b';"),
        ("b.js", ""),
    ])
    .with_unreadable("target.js");
    let (analyzer, sink) = memory_analyzer(runtime);

    let report = analyzer.analyze_file("target.js").await.unwrap();

    assert_eq!(report.total_files, 3);
    assert_eq!(report.incoming.len(), 1);
    assert_eq!(report.incoming[&id("a")], vec!["Default import: t"]);
    assert!(report.outgoing.is_empty());

    let incoming_chains = &report.dependency_chains.incoming;
    assert_eq!(incoming_chains.len(), 1);
    assert_eq!(incoming_chains[0].path, vec![id("target"), id("a")]);
    assert!(report.dependency_chains.outgoing.is_empty());

    assert!(
        sink.diagnostics()
            .iter()
            .any(|d| matches!(d, Diagnostic::UnreadableFile { path, .. } if path.ends_with("target.js")))
    );
}

#[tokio::test]
async fn test_unlistable_directory_is_fatal() {
    let runtime = memory_project(&[("a.js", ""), ("locked/b.js", "")]).with_unreadable("locked");
    let (analyzer, _) = memory_analyzer(runtime);

    let result = analyzer.analyze_folder().await;
    assert!(matches!(result, Err(crate::Error::ReadDir { .. })));
}

#[tokio::test]
async fn test_import_escaping_root_is_dropped() {
    let (analyzer, sink) = memory_analyzer(memory_project(&[
        ("a.js", "import up from '../outside';\nimport b from './b';"),
        ("b.js", ""),
    ]));

    let report = analyzer.analyze_folder().await.unwrap();

    assert_eq!(report.total_files, 2);
    assert_eq!(report.file("a").unwrap().outgoing, vec![id("b")]);
    assert!(sink.is_empty());
}

#[tokio::test]
async fn test_unresolvable_specifier_is_a_warning() {
    let (analyzer, sink) = memory_analyzer(memory_project(&[
        ("a.js", "import bad from './b\0';\nimport b from './b';"),
        ("b.js", ""),
    ]));

    let report = analyzer.analyze_folder().await.unwrap();

    assert_eq!(report.file("a").unwrap().outgoing, vec![id("b")]);
    assert!(matches!(
        sink.diagnostics().as_slice(),
        [Diagnostic::UnresolvableImport { specifier, from, .. }]
            if specifier == "./b\0" && from.as_str() == "a"
    ));
}

#[tokio::test]
async fn test_longer_cycle_severity() {
    let (analyzer, _) = memory_analyzer(memory_project(&[
        ("a.js", "import b from './b';"),
        ("b.js", "import c from './c';"),
        ("c.js", "import a from './a';"),
    ]));

    let report = analyzer.analyze_folder().await.unwrap();
    let circular = &report.circular_dependencies;

    assert_eq!(circular.total_circular_dependencies, 1);
    assert_eq!(circular.warnings, 1);
    assert_eq!(circular.circular_dependencies[0].severity, Severity::Warning);
}

#[tokio::test]
async fn test_folder_analysis_is_idempotent() {
    let (analyzer, _) = memory_analyzer(memory_project(&[
        ("src/a.ts", "import { b } from './b';\nimport c from './c';"),
        ("src/b.ts", "import { c } from './c';\nimport a from './a';"),
        ("src/c.ts", "const d = require('./nested/d');"),
        ("src/nested/d.ts", "import * as a from '../a';"),
    ]));

    let first = analyzer.analyze_folder().await.unwrap();
    let second = analyzer.analyze_folder().await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first.to_pretty_json().unwrap(), second.to_pretty_json().unwrap());
}
