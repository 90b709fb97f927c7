//! # Template Persistence
//!
//! Boundary to the persistence collaborator. A store accepts whole
//! templates, assigns an id on first save and stamps `createdAt` /
//! `updatedAt`.
//!
//! - [`MemoryStore`]: in-process map, for tests and the wasm bindings
//! - [`FileStore`]: one pretty-printed `{id}.json` per template in a directory

use crate::errors::StoreError;
use chrono::{DateTime, Utc};
use rsvpkit_model::{tree, IdGenerator, Template};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Listing entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateSummary {
    pub id: String,
    pub title: String,
    pub node_count: usize,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl TemplateSummary {
    fn of(id: &str, template: &Template) -> Self {
        Self {
            id: id.to_string(),
            title: template.title.clone(),
            node_count: tree::count_nodes(&template.form_fields),
            created_at: template.created_at,
            updated_at: template.updated_at,
        }
    }
}

pub trait TemplateStore {
    /// Persist `template`, assigning `template.id` if it has none. Returns the id.
    fn save(&mut self, template: &mut Template) -> Result<String, StoreError>;

    fn load(&self, id: &str) -> Result<Template, StoreError>;

    fn delete(&mut self, id: &str) -> Result<(), StoreError>;

    /// Summaries ordered by id
    fn list(&self) -> Result<Vec<TemplateSummary>, StoreError>;
}

/// Assign an id on first save, otherwise stamp the update time
fn stamp(template: &mut Template, ids: &mut IdGenerator, taken: impl Fn(&str) -> bool) -> String {
    match &template.id {
        Some(id) => {
            template.updated_at = Some(Utc::now());
            id.clone()
        }
        None => {
            let id = loop {
                let candidate = ids.new_id("template");
                if !taken(&candidate) {
                    break candidate;
                }
            };
            template.id = Some(id.clone());
            template.created_at = Utc::now();
            template.updated_at = None;
            id
        }
    }
}

#[derive(Debug)]
pub struct MemoryStore {
    templates: BTreeMap<String, Template>,
    ids: IdGenerator,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            templates: BTreeMap::new(),
            ids: IdGenerator::new("memory-store"),
        }
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateStore for MemoryStore {
    fn save(&mut self, template: &mut Template) -> Result<String, StoreError> {
        let templates = &self.templates;
        let id = stamp(template, &mut self.ids, |id| templates.contains_key(id));
        self.templates.insert(id.clone(), template.clone());
        debug!(template_id = %id, "Saved template in memory");
        Ok(id)
    }

    fn load(&self, id: &str) -> Result<Template, StoreError> {
        self.templates
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn delete(&mut self, id: &str) -> Result<(), StoreError> {
        self.templates
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn list(&self) -> Result<Vec<TemplateSummary>, StoreError> {
        Ok(self
            .templates
            .iter()
            .map(|(id, template)| TemplateSummary::of(id, template))
            .collect())
    }
}

#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
    ids: IdGenerator,
}

impl FileStore {
    /// Open (and create if needed) a template directory
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        let ids = IdGenerator::new(&dir.to_string_lossy());
        Ok(Self { dir, ids })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{}.json", id))
    }
}

impl TemplateStore for FileStore {
    fn save(&mut self, template: &mut Template) -> Result<String, StoreError> {
        let dir = self.dir.clone();
        let id = stamp(template, &mut self.ids, |id| {
            dir.join(format!("{}.json", id)).exists()
        });

        let path = self.path_for(&id);
        fs::write(&path, serde_json::to_string_pretty(template)?)?;
        info!(template_id = %id, path = %path.display(), "Saved template");
        Ok(id)
    }

    fn load(&self, id: &str) -> Result<Template, StoreError> {
        let path = self.path_for(id);
        if !path.exists() {
            return Err(StoreError::NotFound(id.to_string()));
        }

        let source = fs::read_to_string(&path)?;
        let mut template: Template = serde_json::from_str(&source)?;
        if template.id.is_none() {
            template.id = Some(id.to_string());
        }
        Ok(template)
    }

    fn delete(&mut self, id: &str) -> Result<(), StoreError> {
        let path = self.path_for(id);
        if !path.exists() {
            return Err(StoreError::NotFound(id.to_string()));
        }
        fs::remove_file(path)?;
        Ok(())
    }

    fn list(&self) -> Result<Vec<TemplateSummary>, StoreError> {
        let mut summaries = Vec::new();

        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            let Some(id) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };

            let template = self.load(id)?;
            summaries.push(TemplateSummary::of(id, &template));
        }

        summaries.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(summaries)
    }
}
