mod common;

use common::*;
use files_service::app::container::ContainerError;
use files_service::app::provider::ServiceProvider;
use files_service::{App, Config, FileManager, FilesServiceProvider, files};
use pretty_assertions::assert_eq;
use std::sync::Arc;
use std::time::Duration;

#[test]
fn test_files_resolves_a_singleton() {
    let app = create_test_app();

    let first = app.files().unwrap();
    let second = app.make::<FileManager>("files").unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(app.container().names(), vec!["files".to_string()]);
}

#[test]
fn test_resolved_manager_points_back_at_app() {
    let (app, fm) = resolve_files();

    let owner = fm.app().expect("manager should be attached");
    assert!(Arc::ptr_eq(&owner, &app));
}

#[test]
fn test_manager_does_not_keep_app_alive() {
    let (app, fm) = resolve_files();
    drop(app);

    // App -> container -> manager holds the only strong references
    assert!(fm.app().is_none());
}

#[test]
fn test_manager_follows_app_config() {
    let mut config = Config::default();
    config.files.module_timeout_secs = 2;
    let app = App::with_default_providers(config);

    let fm = app.files().unwrap();
    assert_eq!(fm.module_loader().timeout(), Duration::from_secs(2));
}

#[test]
fn test_unregistered_app_reports_not_bound() {
    let app = App::new(Config::default());

    assert_eq!(
        app.files().err(),
        Some(ContainerError::NotBound("files".to_string()))
    );

    app.register(&FilesServiceProvider::new());
    assert!(app.files().is_ok());
}

#[test]
fn test_provider_under_custom_name() {
    let app = App::new(Config::default());
    let provider = FilesServiceProvider::with_name("storage");
    assert_eq!(provider.name(), "storage");

    app.register(&provider);

    assert!(app.container().has("storage"));
    assert!(!app.container().has("files"));
    assert!(app.make::<FileManager>("storage").is_ok());
}

#[test]
fn test_wrong_type_is_a_mismatch() {
    let app = create_test_app();

    match app.make::<String>("files") {
        Err(ContainerError::TypeMismatch { name, .. }) => assert_eq!(name, "files"),
        other => panic!("Expected TypeMismatch, got {:?}", other),
    }
}

#[tokio::test]
async fn test_standalone_helper_matches_container_manager() {
    let fixture = Fixture::new();
    let (_app, resolved) = resolve_files();
    let standalone = files();

    let a = fixture.path("a.txt");
    assert_eq!(
        resolved.read_text(&a).await.unwrap(),
        standalone.read_text(&a).await.unwrap()
    );
    assert!(standalone.app().is_none());
}

#[test]
fn test_concurrent_resolution_builds_once() {
    let app = create_test_app();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let app = Arc::clone(&app);
            std::thread::spawn(move || app.files().unwrap())
        })
        .collect();

    let managers: Vec<Arc<FileManager>> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    for fm in &managers[1..] {
        assert!(Arc::ptr_eq(&managers[0], fm));
    }
}
