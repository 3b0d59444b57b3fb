use super::error;
use super::output;
use super::{Commands, ConfigAction};
use crate::app::state::App;
use crate::file::{TextEncoding, WriteOptions};
use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

/// Handle a CLI command and return exit code
pub async fn handle_command(command: Commands, app: Arc<App>) -> i32 {
    let result = match command {
        Commands::Stat { path, json } => handle_stat(&app, path, json).await,
        Commands::Exists { path, dir } => handle_exists(&app, path, dir).await,
        Commands::Read { path, encoding, raw } => handle_read(&app, path, encoding, raw).await,
        Commands::Write {
            path,
            data,
            append,
            create_new,
        } => handle_write(&app, path, data, append, create_new).await,
        Commands::Rm { path } => handle_rm(&app, path).await,
        Commands::Export { path, name } => handle_export(&app, path, name).await,
        Commands::Config { action } => handle_config(&app, action),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            error::exit_code_for(&e)
        }
    }
}

async fn handle_stat(app: &Arc<App>, path: PathBuf, json: bool) -> Result<i32> {
    let files = app.files()?;
    let stat = files.stat(&path).await?;
    println!("{}", output::format_stat(&stat, json));
    Ok(error::SUCCESS)
}

async fn handle_exists(app: &Arc<App>, path: PathBuf, dir: bool) -> Result<i32> {
    let files = app.files()?;
    let exists = if dir {
        files.directory_exists(&path).await
    } else {
        files.file_exists(&path).await
    };

    println!("{}", exists);
    Ok(if exists { error::SUCCESS } else { error::NOT_FOUND })
}

async fn handle_read(app: &Arc<App>, path: PathBuf, encoding: String, raw: bool) -> Result<i32> {
    let files = app.files()?;

    if raw {
        let bytes = files.read_raw(&path).await?;
        let mut stdout = tokio::io::stdout();
        stdout.write_all(&bytes).await?;
        stdout.flush().await?;
        return Ok(error::SUCCESS);
    }

    let encoding: TextEncoding = encoding.parse()?;
    let text = files.read_text_with(&path, encoding).await?;
    print!("{}", text);
    Ok(error::SUCCESS)
}

async fn handle_write(
    app: &Arc<App>,
    path: PathBuf,
    data: Option<String>,
    append: bool,
    create_new: bool,
) -> Result<i32> {
    let files = app.files()?;

    let bytes = match data {
        Some(text) => text.into_bytes(),
        None => {
            let mut buf = Vec::new();
            tokio::io::stdin().read_to_end(&mut buf).await?;
            buf
        }
    };

    let options = WriteOptions::new().append(append).create_new(create_new);
    files.write_file(&path, &bytes, &options).await?;

    println!("Wrote {} to {}", output::format_bytes(bytes.len() as u64), path.display());
    Ok(error::SUCCESS)
}

async fn handle_rm(app: &Arc<App>, path: PathBuf) -> Result<i32> {
    let files = app.files()?;
    files.remove(&path).await?;
    println!("Removed {}", path.display());
    Ok(error::SUCCESS)
}

async fn handle_export(app: &Arc<App>, path: PathBuf, name: String) -> Result<i32> {
    let files = app.files()?;

    match files.read_module_export(&path, &name).await? {
        Some(value) => {
            println!("{}", serde_json::to_string_pretty(&value)?);
            Ok(error::SUCCESS)
        }
        None => {
            println!("undefined");
            Ok(error::NOT_FOUND)
        }
    }
}

fn handle_config(app: &Arc<App>, action: ConfigAction) -> Result<i32> {
    match action {
        ConfigAction::Show => {
            print!("{}", toml::to_string_pretty(app.config())?);
        }
        ConfigAction::Path => {
            let path = crate::util::paths::get_app_config_path()?;
            println!("{}", path.display());
        }
        ConfigAction::Init => {
            let path = crate::util::paths::get_app_config_path()?;
            app.config().save_to(&path)?;
            println!("Wrote {}", path.display());
        }
    }
    Ok(error::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::config::Config;

    fn test_app() -> Arc<App> {
        App::with_default_providers(Config::default())
    }

    #[tokio::test]
    async fn test_stat_missing_is_not_found_code() {
        let temp_dir = tempfile::tempdir().unwrap();
        let code = handle_command(
            Commands::Stat {
                path: temp_dir.path().join("missing"),
                json: false,
            },
            test_app(),
        )
        .await;
        assert_eq!(code, error::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_exists_codes() {
        let temp_dir = tempfile::tempdir().unwrap();
        let app = test_app();

        let code = handle_command(
            Commands::Exists {
                path: temp_dir.path().to_path_buf(),
                dir: true,
            },
            Arc::clone(&app),
        )
        .await;
        assert_eq!(code, error::SUCCESS);

        let code = handle_command(
            Commands::Exists {
                path: temp_dir.path().to_path_buf(),
                dir: false,
            },
            app,
        )
        .await;
        assert_eq!(code, error::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_write_then_rm() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("note.txt");
        let app = test_app();

        let code = handle_command(
            Commands::Write {
                path: path.clone(),
                data: Some("hello".to_string()),
                append: false,
                create_new: false,
            },
            Arc::clone(&app),
        )
        .await;
        assert_eq!(code, error::SUCCESS);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello");

        let code = handle_command(Commands::Rm { path: path.clone() }, Arc::clone(&app)).await;
        assert_eq!(code, error::SUCCESS);
        assert!(!path.exists());

        let code = handle_command(Commands::Rm { path }, app).await;
        assert_eq!(code, error::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_write_to_directory_is_invalid_input() {
        let temp_dir = tempfile::tempdir().unwrap();
        let code = handle_command(
            Commands::Write {
                path: temp_dir.path().to_path_buf(),
                data: Some("x".to_string()),
                append: false,
                create_new: false,
            },
            test_app(),
        )
        .await;
        assert_eq!(code, error::INVALID_INPUT);
    }

    #[tokio::test]
    async fn test_read_unknown_encoding() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("a.txt");
        std::fs::write(&path, "hello").unwrap();

        let code = handle_command(
            Commands::Read {
                path,
                encoding: "ebcdic".to_string(),
                raw: false,
            },
            test_app(),
        )
        .await;
        assert_eq!(code, error::INVALID_INPUT);
    }

    #[tokio::test]
    async fn test_export_missing_module() {
        let temp_dir = tempfile::tempdir().unwrap();
        let code = handle_command(
            Commands::Export {
                path: temp_dir.path().join("absent.js"),
                name: "default".to_string(),
            },
            test_app(),
        )
        .await;
        assert_eq!(code, error::NOT_FOUND);
    }
}
