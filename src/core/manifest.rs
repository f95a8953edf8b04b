use crate::core::dataset::JsonDataManager;
use crate::domain::model::ManifestOutcome;
use crate::domain::ports::{LanguagePipeline, Storage};
use crate::utils::error::{EtlError, Result};
use serde_json::Value;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

const PROFILE_AMOUNT_KEY: &str = "profileAmount";

/// The aggregate `{ "categories": [{ "slug", "locales": {..} }] }` document.
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    document: Value,
}

impl Manifest {
    pub fn from_value(path: &Path, document: Value) -> Result<Self> {
        if !document.is_object() {
            return Err(EtlError::invalid_dataset(path, "manifest root is not a JSON object"));
        }
        Ok(Self { document })
    }

    fn categories_mut(&mut self) -> impl Iterator<Item = &mut serde_json::Map<String, Value>> {
        self.document
            .get_mut("categories")
            .and_then(Value::as_array_mut)
            .into_iter()
            .flatten()
            .filter_map(Value::as_object_mut)
    }

    pub fn has_category(&self, slug: &str) -> bool {
        self.document
            .get("categories")
            .and_then(Value::as_array)
            .is_some_and(|categories| {
                categories
                    .iter()
                    .any(|c| c.get("slug").and_then(Value::as_str) == Some(slug))
            })
    }

    /// Sets `profileAmount` for every listed locale of the categories matching
    /// `slug`. Locales not already present are left alone. Returns the number
    /// of locale entries written.
    pub fn set_profile_amounts(&mut self, slug: &str, totals: &[(String, usize)]) -> usize {
        let mut updated = 0;

        for category in self.categories_mut() {
            if category.get("slug").and_then(Value::as_str) != Some(slug) {
                continue;
            }
            let Some(locales) = category.get_mut("locales").and_then(Value::as_object_mut) else {
                continue;
            };

            for (language, total) in totals {
                if let Some(locale) = locales.get_mut(language).and_then(Value::as_object_mut) {
                    locale.insert(PROFILE_AMOUNT_KEY.to_string(), Value::from(*total));
                    updated += 1;
                }
            }
        }

        updated
    }

    pub fn as_value(&self) -> &Value {
        &self.document
    }
}

pub struct ManifestUpdater<S: Storage> {
    storage: S,
    path: PathBuf,
}

impl<S: Storage> ManifestUpdater<S> {
    pub fn new(storage: S, path: impl Into<PathBuf>) -> Self {
        Self {
            storage,
            path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn exists(&self) -> bool {
        self.storage.exists(&self.path).await
    }

    /// Rewrites profile counts from the datasets as they are on disk now.
    /// Nothing is written unless every requested total could be read.
    pub async fn update<P: LanguagePipeline>(
        &self,
        pipeline: &P,
        category_slug: &str,
        languages: &[String],
    ) -> Result<ManifestOutcome> {
        let document = JsonDataManager::load_json(&self.storage, &self.path).await?;
        let mut manifest = Manifest::from_value(&self.path, document)?;

        if !manifest.has_category(category_slug) {
            tracing::warn!(
                "Category '{}' not found in {}, manifest left unchanged",
                category_slug,
                self.path.display()
            );
            return Ok(ManifestOutcome::CategoryNotFound);
        }

        let mut totals: Vec<(String, usize)> = Vec::with_capacity(languages.len());
        let mut seen: HashSet<&str> = HashSet::new();
        for language in languages {
            if !seen.insert(language.as_str()) {
                continue;
            }
            let total = pipeline.profile_total(language).await?;
            tracing::info!(
                "  {} now holds {} profiles",
                pipeline.dataset_path(language).display(),
                total
            );
            totals.push((language.clone(), total));
        }

        let updated = manifest.set_profile_amounts(category_slug, &totals);
        tracing::info!("  Updated {} locale entries", updated);

        JsonDataManager::save_json(&self.storage, &self.path, manifest.as_value()).await?;
        Ok(ManifestOutcome::Updated { locales: updated })
    }
}
