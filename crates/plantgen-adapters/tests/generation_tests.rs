//! End-to-end generation runs against the adapters.

use std::fs;
use std::path::{Path, PathBuf};

use plantgen_adapters::{LocalFilesystem, MemoryFilesystem, ScriptedPrompter};
use plantgen_core::{
    application::{
        ApplicationError, Filesystem, GenerateService, GenerateSettings, GenerationRequest,
        TreeReplicator,
    },
    domain::{DEFAULT_QUALIFIED_PATH, FileMode, GenerationState},
    error::PlantgenError,
};
use tempfile::TempDir;

const GREETING_TEMPLATE: &str =
    "Hello, template! - Template says: github.com/theplant/plantpkg/template";
const GREETING_GENERATED: &str = "Hello, widget! - Widget says: github.com/acme/widget";

/// Workspace with the canonical template checked out at its qualified path.
fn workspace() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let template = dir.path().join(DEFAULT_QUALIFIED_PATH);
    fs::create_dir_all(&template).unwrap();
    fs::write(template.join("greeting.txt"), GREETING_TEMPLATE).unwrap();
    (dir, template)
}

fn local_service(root: &Path) -> GenerateService {
    GenerateService::new(Box::new(LocalFilesystem::new()), GenerateSettings::new(root))
}

#[test]
fn generates_greeting_from_prompted_inputs() {
    let (dir, _) = workspace();
    let service = local_service(dir.path());
    let prompter = ScriptedPrompter::new(["github.com/acme/widget", "Widget"]);

    let outcome = service.run(&prompter).unwrap();

    let destination = dir.path().join("github.com/acme/widget");
    assert_eq!(outcome.destination, destination);
    assert_eq!(outcome.state, GenerationState::Done);
    assert_eq!(
        fs::read_to_string(destination.join("greeting.txt")).unwrap(),
        GREETING_GENERATED
    );
}

#[test]
fn default_service_name_is_derived_from_package() {
    let (dir, _) = workspace();
    let service = local_service(dir.path());
    let prompter = ScriptedPrompter::new(["github.com/acme/widget", ""]);

    let outcome = service.run(&prompter).unwrap();
    assert_eq!(outcome.service.as_str(), "Widget");
}

#[test]
fn copy_mirrors_tree_shape_and_bytes() {
    let (dir, template) = workspace();
    fs::create_dir_all(template.join("internal/store")).unwrap();
    fs::create_dir_all(template.join("empty")).unwrap();
    let binary = vec![0u8, 0xff, 0xfe, b'\n', 0x80];
    fs::write(template.join("internal/store/data.bin"), &binary).unwrap();
    fs::write(template.join("internal/doc.md"), "no tokens here\n").unwrap();

    let request = GenerationRequest::parse("github.com/acme/widget", "Widget").unwrap();
    let outcome = local_service(dir.path()).generate(&request).unwrap();

    assert_eq!(outcome.copy.files, 3);
    assert_eq!(outcome.copy.directories, 3);
    assert_eq!(outcome.substitution.files_scanned, 3);
    assert_eq!(outcome.substitution.files_rewritten, 1);

    let destination = outcome.destination;
    assert!(destination.join("empty").is_dir());
    assert_eq!(
        fs::read(destination.join("internal/store/data.bin")).unwrap(),
        binary
    );
    assert_eq!(
        fs::read_to_string(destination.join("internal/doc.md")).unwrap(),
        "no tokens here\n"
    );
}

#[cfg(unix)]
#[test]
fn copy_preserves_permission_bits() {
    use std::os::unix::fs::PermissionsExt;

    let (dir, template) = workspace();
    let script = template.join("run.sh");
    fs::write(&script, "#!/bin/sh\necho template\n").unwrap();
    fs::set_permissions(&script, fs::Permissions::from_mode(0o750)).unwrap();

    let request = GenerationRequest::parse("github.com/acme/widget", "Widget").unwrap();
    let outcome = local_service(dir.path()).generate(&request).unwrap();

    let generated = outcome.destination.join("run.sh");
    let mode = fs::metadata(&generated).unwrap().permissions().mode() & 0o7777;
    assert_eq!(mode, 0o750);
    assert_eq!(
        fs::read_to_string(generated).unwrap(),
        "#!/bin/sh\necho widget\n"
    );
}

#[cfg(unix)]
#[test]
fn read_only_template_file_is_rewritten_then_locked() {
    use std::os::unix::fs::PermissionsExt;

    let (dir, template) = workspace();
    let greeting = template.join("greeting.txt");
    fs::set_permissions(&greeting, fs::Permissions::from_mode(0o444)).unwrap();

    let request = GenerationRequest::parse("github.com/acme/widget", "Widget").unwrap();
    let outcome = local_service(dir.path()).generate(&request).unwrap();

    let generated = outcome.destination.join("greeting.txt");
    assert_eq!(fs::read_to_string(&generated).unwrap(), GREETING_GENERATED);
    let mode = fs::metadata(&generated).unwrap().permissions().mode() & 0o7777;
    assert_eq!(mode, 0o444);
}

#[test]
fn read_only_entries_survive_substitution_and_renaming() {
    let root = PathBuf::from("/ws/src");
    let template = root.join(DEFAULT_QUALIFIED_PATH);
    let fs = MemoryFilesystem::new()
        .with_file_mode(
            template.join("greeting.txt"),
            GREETING_TEMPLATE,
            FileMode::from_bits(0o444),
        )
        .with_file_mode(
            template.join("template/template.go"),
            "package template\n",
            FileMode::from_bits(0o444),
        );
    fs.set_mode(&template.join("template"), FileMode::from_bits(0o555))
        .unwrap();

    let service = GenerateService::new(
        Box::new(fs.clone()),
        GenerateSettings::new(&root).with_rename_paths(true),
    );
    let request = GenerationRequest::parse("github.com/acme/widget", "Widget").unwrap();
    let outcome = service.generate(&request).unwrap();

    let destination = outcome.destination;
    assert_eq!(
        fs.contents_string(&destination.join("greeting.txt")).as_deref(),
        Some(GREETING_GENERATED)
    );
    assert_eq!(
        fs.contents_string(&destination.join("widget/widget.go")).as_deref(),
        Some("package widget\n")
    );
    assert_eq!(
        fs.mode(&destination.join("widget/widget.go")),
        Some(FileMode::from_bits(0o444))
    );
    assert_eq!(
        fs.mode(&destination.join("widget")),
        Some(FileMode::from_bits(0o555))
    );
}

#[test]
fn copying_twice_gives_identical_trees() {
    let (dir, template) = workspace();
    fs::create_dir_all(template.join("internal/store")).unwrap();
    fs::create_dir_all(template.join("empty")).unwrap();
    fs::write(template.join("internal/store/data.bin"), [0u8, 0xff, 0x80, b'\n']).unwrap();
    fs::write(template.join("internal/doc.md"), "template docs\n").unwrap();

    let local = LocalFilesystem::new();
    let replicator = TreeReplicator::new(&local);
    let first = dir.path().join("out/first");
    let second = dir.path().join("out/second");
    for destination in [&first, &second] {
        let copied = replicator.copy_tree(&template, destination).unwrap();
        replicator.apply_modes(destination, &copied, None).unwrap();
    }

    let first_entries = local.walk(&first).unwrap();
    assert_eq!(first_entries, local.walk(&second).unwrap());
    assert_eq!(first_entries, local.walk(&template).unwrap());
    for entry in first_entries.iter().filter(|entry| entry.is_file()) {
        assert_eq!(
            fs::read(first.join(&entry.path)).unwrap(),
            fs::read(second.join(&entry.path)).unwrap(),
            "{} differs",
            entry.path.display()
        );
    }
}

#[test]
fn second_run_refuses_and_leaves_first_tree_alone() {
    let (dir, _) = workspace();
    let request = GenerationRequest::parse("github.com/acme/widget", "Widget").unwrap();
    let service = local_service(dir.path());
    let first = service.generate(&request).unwrap();

    let marker = first.destination.join("greeting.txt");
    fs::write(&marker, "edited by hand").unwrap();

    let err = service.generate(&request).unwrap_err();
    assert!(matches!(
        err,
        PlantgenError::Application(ApplicationError::DestinationExists { .. })
    ));
    assert!(err.to_string().contains("already exists"));
    assert_eq!(fs::read_to_string(marker).unwrap(), "edited by hand");
}

#[test]
fn missing_template_is_reported() {
    let dir = TempDir::new().unwrap();
    let request = GenerationRequest::parse("github.com/acme/widget", "Widget").unwrap();

    let err = local_service(dir.path()).generate(&request).unwrap_err();
    assert!(matches!(
        err,
        PlantgenError::Application(ApplicationError::TemplateMissing { .. })
    ));
}

#[test]
fn rename_paths_rewrites_entry_names() {
    let (dir, template) = workspace();
    fs::create_dir_all(template.join("cmd/template")).unwrap();
    fs::write(template.join("cmd/template/main.go"), "package main\n").unwrap();
    fs::write(template.join("template.go"), "package template\n").unwrap();

    let service = GenerateService::new(
        Box::new(LocalFilesystem::new()),
        GenerateSettings::new(dir.path()).with_rename_paths(true),
    );
    let request = GenerationRequest::parse("github.com/acme/widget", "Widget").unwrap();
    let outcome = service.generate(&request).unwrap();

    let destination = outcome.destination;
    assert_eq!(outcome.substitution.paths_renamed, 2);
    assert!(destination.join("cmd/widget/main.go").is_file());
    assert_eq!(
        fs::read_to_string(destination.join("widget.go")).unwrap(),
        "package widget\n"
    );
    assert!(!destination.join("template.go").exists());
}

#[test]
fn custom_template_root_is_used() {
    let dir = TempDir::new().unwrap();
    let template = dir.path().join("templates/service");
    fs::create_dir_all(&template).unwrap();
    fs::write(template.join("greeting.txt"), GREETING_TEMPLATE).unwrap();

    let workspace = dir.path().join("src");
    let service = GenerateService::new(
        Box::new(LocalFilesystem::new()),
        GenerateSettings::new(&workspace).with_template_root(&template),
    );
    let request = GenerationRequest::parse("github.com/acme/widget", "Widget").unwrap();
    let outcome = service.generate(&request).unwrap();

    assert_eq!(
        fs::read_to_string(outcome.destination.join("greeting.txt")).unwrap(),
        GREETING_GENERATED
    );
}

#[test]
fn memory_filesystem_runs_the_same_pipeline() {
    let root = PathBuf::from("/ws/src");
    let template = root.join(DEFAULT_QUALIFIED_PATH);
    let fs = MemoryFilesystem::new().with_file(template.join("greeting.txt"), GREETING_TEMPLATE);

    let service = GenerateService::new(Box::new(fs.clone()), GenerateSettings::new(&root));
    let request = GenerationRequest::parse("github.com/acme/widget", "Widget").unwrap();
    service.generate(&request).unwrap();

    let generated = root.join("github.com/acme/widget/greeting.txt");
    assert_eq!(
        fs.contents_string(&generated).as_deref(),
        Some(GREETING_GENERATED)
    );
    assert!(fs.mode(&generated).is_some());
}

#[test]
fn existing_package_is_reprompted() {
    let (dir, _) = workspace();
    fs::create_dir_all(dir.path().join("github.com/acme/taken")).unwrap();

    let prompter = ScriptedPrompter::new(["github.com/acme/taken", "github.com/acme/widget", ""]);
    let outcome = local_service(dir.path()).run(&prompter).unwrap();

    assert_eq!(outcome.package.as_str(), "github.com/acme/widget");
    assert_eq!(prompter.remaining(), 0);
}
