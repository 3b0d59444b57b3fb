use files_service::app::config::Config;
use files_service::{App, FileManager};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

/// Module exporting a default object and one named object
pub const PLUGIN_JS: &str = r#"
export default { module: 'defaultModule' };
export const testConfig = { module: 'testConfig' };
"#;

/// Fixture tree used by the scenario tests
///
/// ```text
/// <root>/
///   a.txt          "hello"
///   d/             empty directory
///   plugin.js      PLUGIN_JS
///   settings.json  {"name": "JSON"}
///   image.png      non-UTF-8 bytes
/// ```
pub struct Fixture {
    pub dir: TempDir,
}

#[allow(dead_code)]
impl Fixture {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();

        std::fs::write(root.join("a.txt"), "hello").unwrap();
        std::fs::create_dir(root.join("d")).unwrap();
        std::fs::write(root.join("plugin.js"), PLUGIN_JS).unwrap();
        std::fs::write(root.join("settings.json"), r#"{ "name": "JSON" }"#).unwrap();
        std::fs::write(root.join("image.png"), [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0xff]).unwrap();

        Self { dir }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}

/// Application with the built-in providers registered
#[allow(dead_code)]
pub fn create_test_app() -> Arc<App> {
    App::with_default_providers(Config::default())
}

/// File manager resolved through the container, as consumers get it
#[allow(dead_code)]
pub fn resolve_files() -> (Arc<App>, Arc<FileManager>) {
    let app = create_test_app();
    let files = app.files().unwrap();
    (app, files)
}

// Initialize logging once for all tests
#[allow(dead_code)]
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}
