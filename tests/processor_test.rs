use std::fs;
use std::path::{Path, PathBuf};

use cigen::bundle::{select_bundle, Artifact};
use cigen::config::Settings;
use cigen::detector::Ecosystem;
use cigen::error::Error;
use cigen::processor::{
    ensure_output_dir, generate, ArtifactOutcome, GenerateOptions, Processor,
};
use cigen::renderer::{PlaceholderRenderer, RenderContext};
use tempfile::TempDir;

const GO_JENKINSFILE: &str = "pipeline {\n  sh '{{BUILD_CMD}}'\n  sh '{{TEST_CMD}}'\n  // {{UNKNOWN_VAR}}\n}\n";

fn write(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

/// Creates a templates root with every go template and a generic Dockerfile.
fn templates() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(&root.join("docker/Dockerfile.go"), "FROM golang\nRUN {{BUILD_CMD}}\n");
    write(&root.join("jenkins/Jenkinsfile.go"), GO_JENKINSFILE);
    write(
        &root.join("gitlab/.gitlab-ci.go.yml"),
        "variables:\n  IMAGE: \"{{IMAGE_NAME}}\"\n  CACHE: \"{{CACHE_DIR}}\"\n",
    );
    write(&root.join("docker/Dockerfile.generic"), "RUN {{BUILD_CMD}}\n");
    dir
}

fn options(project: &Path, templates: &Path) -> GenerateOptions {
    GenerateOptions {
        project_root: project.to_path_buf(),
        templates_root: templates.to_path_buf(),
        output_dir: project.join(".ci-generated"),
        settings: Settings::default(),
    }
}

fn go_project() -> TempDir {
    let dir = TempDir::new().unwrap();
    write(&dir.path().join("go.mod"), "module example.com/demo\n\ngo 1.22\n");
    dir
}

#[test]
fn test_generate_go_project() {
    let project = go_project();
    let templates = templates();
    let opts = options(project.path(), templates.path());

    let report = generate(&opts).unwrap().report;
    let out = &opts.output_dir;

    assert_eq!(
        fs::read_to_string(out.join("Dockerfile")).unwrap(),
        "FROM golang\nRUN go build -v ./...\n"
    );
    assert_eq!(
        fs::read_to_string(out.join("Jenkinsfile")).unwrap(),
        "pipeline {\n  sh 'go build -v ./...'\n  sh 'go test ./...'\n  // {{UNKNOWN_VAR}}\n}\n"
    );
    assert_eq!(
        fs::read_to_string(out.join(".gitlab-ci.yml")).unwrap(),
        "variables:\n  IMAGE: \"local-project:latest\"\n  CACHE: \"$GOMODCACHE\"\n"
    );

    let lines = report.lines();
    assert_eq!(lines[0], "language: go");
    assert_eq!(lines[1], "found_files: go.mod");
    assert!(lines.contains(&"detail GO_MODULE: example.com/demo".to_string()));
    assert!(lines.contains(&format!("Wrote {}", out.join("Dockerfile").display())));

    let saved = fs::read_to_string(out.join("report.txt")).unwrap();
    assert_eq!(saved, report.to_string());
}

#[test]
fn test_missing_template_is_reported() {
    let project = go_project();
    let templates = templates();
    fs::remove_file(templates.path().join("jenkins/Jenkinsfile.go")).unwrap();
    let opts = options(project.path(), templates.path());

    let report = generate(&opts).unwrap().report;
    let out = &opts.output_dir;

    assert!(!out.join("Jenkinsfile").exists());
    assert!(out.join("Dockerfile").exists());
    assert!(out.join(".gitlab-ci.yml").exists());

    let saved = fs::read_to_string(out.join("report.txt")).unwrap();
    let missing = templates.path().join("jenkins/Jenkinsfile.go");
    let expected = format!("Template for jenkins not found: {}", missing.display());
    assert!(saved.lines().any(|line| line == expected));
    assert!(report.lines().contains(&expected));
}

#[test]
fn test_unknown_project_uses_generic_bundle() {
    let project = TempDir::new().unwrap();
    write(&project.path().join("README.md"), "hello");
    let templates = templates();
    let opts = options(project.path(), templates.path());

    let report = generate(&opts).unwrap().report;
    let out = &opts.output_dir;

    assert_eq!(
        fs::read_to_string(out.join("Dockerfile")).unwrap(),
        "RUN echo \"No build configured\"\n"
    );
    assert!(!out.join("Jenkinsfile").exists());
    assert!(!out.join(".gitlab-ci.yml").exists());

    let lines = report.lines();
    assert_eq!(lines[0], "language: unknown");
    assert!(lines
        .iter()
        .any(|l| l.starts_with("No built-in template for detected language")));
    assert_eq!(
        lines.iter().filter(|l| l.starts_with("Template for ")).count(),
        2
    );
}

#[test]
fn test_generate_is_idempotent() {
    let project = go_project();
    let templates = templates();
    let opts = options(project.path(), templates.path());

    generate(&opts).unwrap();
    let snapshot = TempDir::new().unwrap();
    for entry in fs::read_dir(&opts.output_dir).unwrap() {
        let entry = entry.unwrap();
        fs::copy(entry.path(), snapshot.path().join(entry.file_name())).unwrap();
    }

    generate(&opts).unwrap();
    assert!(!dir_diff::is_different(snapshot.path(), &opts.output_dir).unwrap());
}

#[test]
fn test_existing_outputs_are_overwritten() {
    let project = go_project();
    let templates = templates();
    let opts = options(project.path(), templates.path());
    write(&opts.output_dir.join("Dockerfile"), "stale content that is much longer than the new one\n");

    generate(&opts).unwrap();
    assert_eq!(
        fs::read_to_string(opts.output_dir.join("Dockerfile")).unwrap(),
        "FROM golang\nRUN go build -v ./...\n"
    );
}

#[test]
fn test_outcomes_follow_artifact_order() {
    let project = go_project();
    let templates = templates();
    fs::remove_file(templates.path().join("jenkins/Jenkinsfile.go")).unwrap();
    let opts = options(project.path(), templates.path());

    let generation = generate(&opts).unwrap();
    assert_eq!(generation.ecosystem, Ecosystem::Go);

    let artifacts: Vec<_> = generation.outcomes.iter().map(|(a, _)| *a).collect();
    assert_eq!(artifacts, Artifact::ALL.to_vec());
    assert_eq!(
        generation.outcomes[0].1,
        ArtifactOutcome::Written {
            target: opts.output_dir.join("Dockerfile")
        }
    );
    assert_eq!(
        generation.outcomes[1].1,
        ArtifactOutcome::TemplateMissing {
            template: templates.path().join("jenkins/Jenkinsfile.go")
        }
    );
}

#[test]
fn test_output_dir_cannot_be_project_root() {
    let project = go_project();
    let templates = templates();
    let mut opts = options(project.path(), templates.path());
    opts.output_dir = project.path().join(".");

    match generate(&opts) {
        Err(Error::ConfigError(msg)) => assert!(msg.contains("project root")),
        other => panic!("Expected ConfigError, got {other:?}"),
    }
    assert!(!project.path().join("Dockerfile").exists());
    assert!(!project.path().join("report.txt").exists());
}

#[test]
fn test_ensure_output_dir() {
    let project = TempDir::new().unwrap();

    let nested = project.path().join("out/ci");
    assert!(ensure_output_dir(project.path(), &nested).is_ok());
    assert!(nested.is_dir());

    // Existing directory is reused.
    assert!(ensure_output_dir(project.path(), &nested).is_ok());

    assert!(ensure_output_dir(project.path(), project.path()).is_err());
}

#[test]
fn test_project_root_listing_is_stable_across_runs() {
    let project = go_project();
    let templates = templates();
    let opts = options(project.path(), templates.path());

    let first = generate(&opts).unwrap().report;
    let second = generate(&opts).unwrap().report;
    assert_eq!(first, second);
    assert_eq!(second.lines()[1], "found_files: go.mod");
}

#[test]
fn test_detection_warning_reaches_report() {
    let project = TempDir::new().unwrap();
    write(&project.path().join("package.json"), "{ \"name\": ");
    let templates = templates();
    let opts = options(project.path(), templates.path());

    generate(&opts).unwrap();

    let saved = fs::read_to_string(opts.output_dir.join("report.txt")).unwrap();
    let warning = saved
        .lines()
        .find(|line| line.starts_with("warning: "))
        .expect("warning line in report.txt");
    assert!(warning.contains("package.json"));
    assert!(saved.starts_with("language: node\n"));
}

#[cfg(unix)]
#[test]
fn test_unreadable_template_is_a_template_error() {
    let project = go_project();
    let templates = templates();
    let looped = templates.path().join("docker/Dockerfile.go");
    fs::remove_file(&looped).unwrap();
    std::os::unix::fs::symlink(&looped, &looped).unwrap();
    let opts = options(project.path(), templates.path());

    match generate(&opts) {
        Err(Error::TemplateError(msg)) => assert!(msg.contains("Dockerfile.go")),
        other => panic!("Expected TemplateError, got {other:?}"),
    }
}

#[test]
fn test_unwritable_output_fails() {
    let project = go_project();
    let templates = templates();
    let mut opts = options(project.path(), templates.path());
    // A regular file where the output directory should be.
    let blocker = project.path().join("blocker");
    write(&blocker, "");
    opts.output_dir = blocker.join("out");

    assert!(generate(&opts).is_err());
}

#[test]
fn test_environment_overrides_reach_output() {
    let project = go_project();
    let templates = templates();
    let mut opts = options(project.path(), templates.path());
    opts.settings = Settings::from_lookup(|key| match key {
        "CI_REGISTRY_IMAGE" => Some("registry.example.com/demo".to_string()),
        _ => None,
    });

    generate(&opts).unwrap();
    let gitlab = fs::read_to_string(opts.output_dir.join(".gitlab-ci.yml")).unwrap();
    assert!(gitlab.contains("IMAGE: \"registry.example.com/demo\""));
}

#[test]
fn test_processor_single_artifact() {
    let templates = templates();
    let output = TempDir::new().unwrap();
    let engine = PlaceholderRenderer::new().unwrap();
    let bundle = select_bundle(Ecosystem::Go);
    let context: RenderContext = [("BUILD_CMD".to_string(), "go build ./...".to_string())]
        .into_iter()
        .collect();

    let processor = Processor::new(&engine, bundle, templates.path(), output.path(), &context);

    let outcome = processor.process(Artifact::Docker).unwrap();
    let target = output.path().join("Dockerfile");
    assert_eq!(outcome, ArtifactOutcome::Written { target: target.clone() });
    assert_eq!(
        fs::read_to_string(target).unwrap(),
        "FROM golang\nRUN go build ./...\n"
    );

    fs::remove_file(templates.path().join("gitlab/.gitlab-ci.go.yml")).unwrap();
    let outcome = processor.process(Artifact::GitLab).unwrap();
    assert_eq!(
        outcome,
        ArtifactOutcome::TemplateMissing {
            template: templates.path().join("gitlab/.gitlab-ci.go.yml")
        }
    );
    assert!(!output.path().join(".gitlab-ci.yml").exists());
}

/// The shipped templates only use placeholders that every context defines.
#[test]
fn test_bundled_templates_render_completely() {
    let bundled = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("templates");
    let projects: [(&str, &str); 5] = [
        ("pom.xml", "<project/>"),
        ("go.mod", "module example.com/demo\n"),
        ("package.json", r#"{"name": "demo"}"#),
        ("requirements.txt", "flask\n"),
        ("README.md", "nothing to detect"),
    ];

    for (marker, content) in projects {
        let project = TempDir::new().unwrap();
        write(&project.path().join(marker), content);
        let opts = options(project.path(), &bundled);

        let report = generate(&opts).unwrap().report;
        assert!(
            !report.lines().iter().any(|l| l.starts_with("Template for ")),
            "missing bundled template for {marker}: {report}"
        );
        for artifact in Artifact::ALL {
            let rendered = fs::read_to_string(opts.output_dir.join(artifact.output_name())).unwrap();
            assert!(
                !rendered.contains("{{"),
                "unrendered placeholder in {} for {marker}",
                artifact.output_name()
            );
        }
    }
}
