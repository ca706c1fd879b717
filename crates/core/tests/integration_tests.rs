//! Integration tests for microgen-core
//!
//! These tests run real scripts through `sh` and verify the complete
//! resolve → dispatch → status workflow end-to-end.
#![cfg(unix)]

use microgen_core::{
    actions::{ActionCatalog, GenerateAction},
    dispatch::{Dispatcher, GenerationRequest},
    execution::{run_script, ScriptInvocation},
    file_handling::{get_last_run, load_action_catalog, write_last_run, LastRun},
    models::{model_choices, ALL_MODELS},
    staging::stage_resources,
    status::{RecordingSink, StatusKind},
};
use std::fs::{create_dir_all, read_to_string, write, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::{NamedTempFile, TempDir};

/// Scripts root containing `script_name` with the given shell body.
fn scripts_root_with(script_name: &str, body: &str) -> TempDir {
    let scripts_root = TempDir::new().unwrap();
    write(scripts_root.path().join(script_name), body).unwrap();
    scripts_root
}

fn request(action: GenerateAction, model: &str, project: &Path, scripts_root: &Path) -> GenerationRequest {
    GenerationRequest {
        action,
        model: model.to_string(),
        project_directory: project.to_path_buf(),
        interpreter: PathBuf::from("sh"),
        scripts_root: scripts_root.to_path_buf(),
    }
}

fn dispatch(request: &GenerationRequest, catalog: &ActionCatalog) -> RecordingSink {
    let mut dispatcher = Dispatcher::new();
    let mut sink = RecordingSink::default();
    dispatcher.trigger(catalog, request, &mut sink).unwrap();
    dispatcher.wait_for_completion(&mut sink).unwrap();
    sink
}

#[test]
fn test_exit_zero_reports_success_message() {
    let scripts_root = scripts_root_with("microservice-generator1.sh", "exit 0\n");
    let project = TempDir::new().unwrap();
    let catalog = ActionCatalog::built_in();

    let sink = dispatch(
        &request(GenerateAction::Dto, "User", project.path(), scripts_root.path()),
        &catalog,
    );

    let status = sink.last_status().unwrap();
    assert_eq!(status.kind, StatusKind::Success);
    assert_eq!(status.text, "DTOs for /User generated successfully!");
    assert_eq!(sink.statuses[0].kind, StatusKind::Progress);
    assert_eq!(sink.controls_enabled, vec![false, true]);
}

#[test]
fn test_exit_one_with_output_reports_first_line() {
    let scripts_root = scripts_root_with("test-generator.sh", "echo boom\necho second\nexit 1\n");
    let project = TempDir::new().unwrap();

    let sink = dispatch(
        &request(GenerateAction::Test, "User", project.path(), scripts_root.path()),
        &ActionCatalog::built_in(),
    );

    let status = sink.last_status().unwrap();
    assert_eq!(status.kind, StatusKind::Failure);
    assert!(status.text.contains("boom"));
    assert!(!status.text.contains("second"));
}

#[test]
fn test_exit_two_without_output_reports_exit_code() {
    let scripts_root = scripts_root_with("mapper-generator.sh", "exit 2\n");
    let project = TempDir::new().unwrap();

    let sink = dispatch(
        &request(GenerateAction::Mapper, "User", project.path(), scripts_root.path()),
        &ActionCatalog::built_in(),
    );

    let status = sink.last_status().unwrap();
    assert_eq!(status.kind, StatusKind::Failure);
    assert!(status.text.contains('2'));
}

#[test]
fn test_stderr_is_not_a_diagnostic() {
    let scripts_root = scripts_root_with("service-generator.sh", "echo oops >&2\nexit 4\n");
    let project = TempDir::new().unwrap();

    let sink = dispatch(
        &request(GenerateAction::Service, "User", project.path(), scripts_root.path()),
        &ActionCatalog::built_in(),
    );

    let status = sink.last_status().unwrap();
    assert_eq!(status.text, "Failed execution with status code: 4");
}

#[test]
fn test_script_receives_model_and_directory() {
    let scripts_root = scripts_root_with(
        "controller-generator.sh",
        "printf '%s|%s' \"$1\" \"$2\" > \"$2/received.txt\"\n",
    );
    let project = TempDir::new().unwrap();

    let sink = dispatch(
        &request(GenerateAction::Controller, ALL_MODELS, project.path(), scripts_root.path()),
        &ActionCatalog::built_in(),
    );

    assert_eq!(sink.last_status().unwrap().kind, StatusKind::Success);
    let received = read_to_string(project.path().join("received.txt")).unwrap();
    assert_eq!(received, format!("All Models|{}", project.path().display()));
}

#[test]
fn test_large_output_does_not_block() {
    let body = "i=0\nwhile [ $i -lt 20000 ]; do echo line$i; i=$((i+1)); done\nexit 3\n";
    let scripts_root = scripts_root_with("exception-generator.sh", body);
    let project = TempDir::new().unwrap();
    let catalog = ActionCatalog::built_in();
    let descriptor = catalog.resolve(GenerateAction::Exception, "User");

    let invocation = ScriptInvocation::new(
        &descriptor,
        "User",
        project.path(),
        Path::new("sh"),
        scripts_root.path(),
    );
    let result = run_script(&invocation).unwrap();

    assert_eq!(result.exit_code, 3);
    assert_eq!(result.first_output_line, Some("line0".to_string()));
}

#[test]
fn test_missing_script_is_reported_not_raised() {
    let scripts_root = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();

    let sink = dispatch(
        &request(GenerateAction::Repository, "User", project.path(), scripts_root.path()),
        &ActionCatalog::built_in(),
    );

    // sh itself exits non-zero when the script file is missing
    assert_eq!(sink.last_status().unwrap().kind, StatusKind::Failure);
}

#[test]
fn test_overridden_catalog_runs_overridden_script() {
    let scripts_root = scripts_root_with("junit-generator.sh", "exit 0\n");
    let project = TempDir::new().unwrap();

    let mut actions_file = NamedTempFile::new().unwrap();
    write!(
        actions_file,
        "test:\n  script: junit-generator.sh\n  success: \"JUnit tests for {{model}} written\"\n"
    )
    .unwrap();
    let catalog = load_action_catalog(actions_file.path().to_str().unwrap()).unwrap();

    let sink = dispatch(
        &request(GenerateAction::Test, "Order", project.path(), scripts_root.path()),
        &catalog,
    );

    assert_eq!(sink.last_status().unwrap().text, "JUnit tests for Order written");
}

#[test]
fn test_stage_discover_and_run_workflow() {
    let resources = TempDir::new().unwrap();
    let scripts = resources.path().join("scripts");
    create_dir_all(&scripts).unwrap();
    write(
        scripts.join("microservice-generator2.sh"),
        "touch \"$2/generated-$1\"\n",
    )
    .unwrap();

    let temp = TempDir::new().unwrap();
    let scripts_root = temp.path().join("microgen_scripts");
    assert_eq!(stage_resources(resources.path(), &scripts_root).unwrap(), 1);

    let project = TempDir::new().unwrap();
    let model_directory = project.path().join("src/main/java/shop/model");
    create_dir_all(&model_directory).unwrap();
    File::create(model_directory.join("Order.java")).unwrap();

    let choices = model_choices(project.path());
    assert_eq!(choices, vec![ALL_MODELS, "Order"]);

    let sink = dispatch(
        &request(GenerateAction::FullService, &choices[1], project.path(), &scripts_root),
        &ActionCatalog::built_in(),
    );

    assert_eq!(
        sink.last_status().unwrap().text,
        "Service structure for /Order generated successfully!"
    );
    assert!(project.path().join("generated-Order").is_file());
}

#[test]
fn test_last_run_remembers_project_directory() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("last_run.yml");
    let path = path.to_str().unwrap();

    write_last_run(
        path,
        &LastRun {
            action: GenerateAction::Mapper,
            model: "Order".to_string(),
            project_directory: "/work/shop".to_string(),
        },
    )
    .unwrap();

    let last_run = get_last_run(path).unwrap().unwrap();
    assert_eq!(last_run.project_directory, "/work/shop");
    assert_eq!(last_run.action, GenerateAction::Mapper);
}
