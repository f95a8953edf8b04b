use anyhow::Result;
use profile_etl::{
    DataUpdater, EtlEngine, LanguagePipeline, LocalStorage, ManifestOutcome, ManifestUpdater,
    RunConfig,
};
use serde_json::{json, Value};
use std::path::Path;
use tempfile::TempDir;

fn listing(titles: &[&str], clues: usize) -> String {
    let mut out = String::from("# Batch\n\n");
    for (i, title) in titles.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", i + 1, title));
        for c in 1..=clues {
            out.push_str(&format!("- {} clue {}\n", title, c));
        }
        out.push('\n');
    }
    out
}

fn write(path: &Path, content: impl AsRef<[u8]>) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    Ok(())
}

fn read_json(path: &Path) -> Result<Value> {
    Ok(serde_json::from_slice(&std::fs::read(path)?)?)
}

fn dataset_path(root: &Path, language: &str) -> std::path::PathBuf {
    root.join("json").join("movies").join(language).join("data-1.json")
}

fn seed_dataset(root: &Path, language: &str, existing: usize) -> Result<()> {
    let profiles: Vec<Value> = (1..=existing)
        .map(|i| json!({"id": format!("profile-movie-{:03}", i), "name": format!("Old {}", i)}))
        .collect();
    write(
        &dataset_path(root, language),
        serde_json::to_vec_pretty(&json!({ "profiles": profiles }))?,
    )
}

fn config(root: &Path) -> RunConfig {
    let mut config = RunConfig::new("Movies", root.join("md"), root.join("json"));
    config.id_prefix = "movie".to_string();
    config
}

#[tokio::test]
async fn test_end_to_end_all_languages() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let root = temp_dir.path();

    write(&root.join("md/movies_en.md"), listing(&["Heat", "Ronin"], 20))?;
    write(&root.join("md/movies-es.md"), listing(&["Tesis", "Abre los ojos"], 20))?;
    write(&root.join("md/movies_pt-BR_md.md"), listing(&["Cidade de Deus", "Central do Brasil"], 20))?;
    for language in ["en", "es", "pt-BR"] {
        seed_dataset(root, language, 75)?;
    }

    let mut config = config(root);
    config.start_id = 76;
    let updater = DataUpdater::new(LocalStorage::default(), config);
    let engine: EtlEngine<_, LocalStorage> = EtlEngine::new(updater, "movies");

    let languages = vec!["en".to_string(), "es".to_string(), "pt-BR".to_string()];
    let summary = engine.run(&languages).await;

    assert_eq!(summary.total_added(), 6);
    assert_eq!(summary.exit_code(), 0);

    let doc = read_json(&dataset_path(root, "pt-BR"))?;
    let profiles = doc["profiles"].as_array().unwrap();
    assert_eq!(profiles.len(), 77);
    assert_eq!(profiles[75]["id"], "profile-movie-076");
    assert_eq!(profiles[75]["name"], "Cidade de Deus");
    assert_eq!(profiles[76]["id"], "profile-movie-077");
    assert_eq!(profiles[76]["metadata"]["language"], "pt-BR");
    assert_eq!(profiles[76]["clues"].as_array().unwrap().len(), 20);

    // Non-ASCII is written literally.
    let text = std::fs::read_to_string(dataset_path(root, "pt-BR"))?;
    assert!(text.contains("\"name\": \"Cidade de Deus\""));
    let text = std::fs::read_to_string(dataset_path(root, "es"))?;
    assert!(text.contains("Abre los ojos"));

    Ok(())
}

#[tokio::test]
async fn test_two_profile_listing_output() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let root = temp_dir.path();

    write(
        &root.join("md/movies.md"),
        "1. Alpha\n- clueA\n- clueB\n\n2. Beta\n- clueC\n",
    )?;
    write(&dataset_path(root, "en"), r#"{"profiles": []}"#)?;

    let updater = DataUpdater::new(LocalStorage::default(), config(root));
    let added = updater.update_language("en").await?;

    assert_eq!(added, 2);
    assert_eq!(
        read_json(&dataset_path(root, "en"))?,
        json!({
            "profiles": [
                {
                    "id": "profile-movie-001",
                    "category": "Movies",
                    "name": "Alpha",
                    "clues": ["clueA", "clueB"],
                    "metadata": {"language": "en", "difficulty": "medium", "source": "entertainment"}
                },
                {
                    "id": "profile-movie-002",
                    "category": "Movies",
                    "name": "Beta",
                    "clues": ["clueC"],
                    "metadata": {"language": "en", "difficulty": "medium", "source": "entertainment"}
                }
            ]
        })
    );

    Ok(())
}

#[tokio::test]
async fn test_missing_markdown_does_not_block_other_languages() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let root = temp_dir.path();

    write(&root.join("md/movies_en.md"), listing(&["Heat"], 20))?;
    seed_dataset(root, "en", 0)?;
    seed_dataset(root, "es", 0)?;

    let updater = DataUpdater::new(LocalStorage::default(), config(root));
    let results = updater
        .update_all_languages(&["es".to_string(), "en".to_string()])
        .await;

    assert_eq!(results[0].language, "es");
    assert_eq!(results[0].added, 0);
    assert!(results[0].error.is_some());
    assert_eq!(results[1].added, 1);
    assert_eq!(read_json(&dataset_path(root, "es"))?, json!({"profiles": []}));

    Ok(())
}

#[tokio::test]
async fn test_malformed_dataset_is_left_untouched() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let root = temp_dir.path();

    write(&root.join("md/movies.md"), listing(&["Heat"], 20))?;
    write(&dataset_path(root, "en"), "{\"profiles\": [")?;

    let updater = DataUpdater::new(LocalStorage::default(), config(root));
    let results = updater.update_all_languages(&["en".to_string()]).await;

    assert_eq!(results[0].added, 0);
    assert_eq!(
        std::fs::read_to_string(dataset_path(root, "en"))?,
        "{\"profiles\": ["
    );

    Ok(())
}

#[tokio::test]
async fn test_manifest_count_follows_dataset() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let root = temp_dir.path();

    write(&root.join("md/movies.md"), listing(&["Heat", "Ronin"], 20))?;
    seed_dataset(root, "en", 75)?;
    let manifest_path = root.join("json/manifest.json");
    write(
        &manifest_path,
        serde_json::to_vec_pretty(&json!({
            "categories": [
                {"slug": "movies", "locales": {"en": {"title": "Movies", "profileAmount": 75}}}
            ]
        }))?,
    )?;

    let mut config = config(root);
    config.start_id = 76;
    config.languages = vec!["en".to_string()];
    let storage = LocalStorage::default();
    let updater = DataUpdater::new(storage.clone(), config);
    let engine = EtlEngine::new(updater, "movies")
        .with_manifest(ManifestUpdater::new(storage, &manifest_path));

    let summary = engine.run(&["en".to_string()]).await;

    assert_eq!(summary.added_for("en"), Some(2));
    assert_eq!(summary.manifest, ManifestOutcome::Updated { locales: 1 });
    let manifest = read_json(&manifest_path)?;
    assert_eq!(manifest["categories"][0]["locales"]["en"]["profileAmount"], 77);
    assert_eq!(manifest["categories"][0]["locales"]["en"]["title"], "Movies");

    Ok(())
}

#[tokio::test]
async fn test_rerun_with_auto_id_continues_numbering() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let root = temp_dir.path();

    write(&root.join("md/movies.md"), listing(&["Heat"], 20))?;
    seed_dataset(root, "en", 0)?;

    let mut config = config(root);
    config.id_strategy = profile_etl::domain::model::IdStrategy::ContinueExisting;
    let updater = DataUpdater::new(LocalStorage::default(), config);

    updater.update_language("en").await?;
    updater.update_language("en").await?;

    let doc = read_json(&dataset_path(root, "en"))?;
    let ids: Vec<&str> = doc["profiles"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["profile-movie-001", "profile-movie-002"]);

    Ok(())
}

#[tokio::test]
async fn test_dry_run_leaves_files_untouched() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let root = temp_dir.path();

    write(&root.join("md/movies.md"), listing(&["Heat"], 20))?;
    seed_dataset(root, "en", 3)?;
    let before = std::fs::read(dataset_path(root, "en"))?;

    let mut config = config(root);
    config.dry_run = true;
    let updater = DataUpdater::new(LocalStorage::default(), config);
    let engine: EtlEngine<_, LocalStorage> = EtlEngine::new(updater, "movies").with_dry_run(true);

    let summary = engine.run(&["en".to_string()]).await;

    assert_eq!(summary.total_added(), 1);
    assert_eq!(std::fs::read(dataset_path(root, "en"))?, before);

    Ok(())
}
