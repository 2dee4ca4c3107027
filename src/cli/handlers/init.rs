use crate::cli::commands::BackendArg;
use crate::config::{BlogConfig, CONFIG_FILE_NAME, StoreBackend};
use anyhow::Result;
use colored::Colorize;

/// Parameters for init operation
pub struct InitParams {
    pub backend: BackendArg,
    pub project_id: Option<String>,
    pub collection: Option<String>,
    pub base_url: Option<String>,
}

pub fn handle_init(params: InitParams) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let config_path = cwd.join(CONFIG_FILE_NAME);

    if config_path.exists() {
        anyhow::bail!("Blog already initialized at {}", config_path.display());
    }

    let mut config = BlogConfig::default();
    config.blog.backend = params.backend.into();

    if config.blog.backend == StoreBackend::Firestore {
        match params.project_id {
            Some(project_id) if !project_id.is_empty() => config.firestore.project_id = project_id,
            _ => anyhow::bail!("--project-id is required for the firestore backend"),
        }
    }
    if let Some(collection) = params.collection {
        config.firestore.collection = collection;
    }
    if let Some(base_url) = params.base_url {
        config.firestore.base_url = base_url;
    }

    let data_path = config.data_path(&cwd);
    if config.blog.backend == StoreBackend::Local {
        std::fs::create_dir_all(config.posts_path(&cwd))?;
    }

    config.save(&config_path)?;

    println!("{} blog in {}", "Initialized".green(), cwd.display());
    println!("  Config:  {}", config_path.display());
    println!("  Backend: {}", config.blog.backend);
    match config.blog.backend {
        StoreBackend::Local => println!("  Data:    {}", data_path.display()),
        StoreBackend::Firestore => println!(
            "  Project: {} (collection '{}')",
            config.firestore.project_id, config.firestore.collection
        ),
    }

    Ok(())
}
