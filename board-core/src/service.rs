//! Business operations on the idea collection.
//!
//! Every mutation is a full cycle against the [`Store`]: load the whole
//! collection, change exactly one idea, save the whole collection. Nothing is
//! cached between calls. Mutations run one at a time behind a writer lock
//! shared by all clones of the service, so concurrent votes and notes are
//! never lost to each other within this process.

use std::sync::{Arc, Mutex};

use chrono::Utc;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::*;
use crate::store::Store;

#[derive(Debug, Clone)]
pub struct IdeaService {
    store: Store,
    writer: Arc<Mutex<()>>,
}

impl IdeaService {
    pub fn new(store: Store) -> Self {
        Self {
            store,
            writer: Arc::new(Mutex::new(())),
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// All ideas, most voted first.
    pub fn list_ideas(&self) -> Vec<Idea> {
        self.store.load_all()
    }

    pub fn create_idea(&self, input: NewIdea) -> Result<Idea> {
        let title = non_blank(input.title)
            .ok_or_else(|| Error::Validation("title is required".to_string()))?;

        let idea = Idea {
            id: Uuid::new_v4().to_string(),
            title,
            description: input.description.unwrap_or_default(),
            votes: 0,
            notes: Vec::new(),
            files: input.files,
            created_at: Utc::now(),
        };

        let _guard = self.writer.lock().expect("idea writer lock poisoned");
        self.store.append(idea.clone())?;

        tracing::info!("Created idea {} ({:?})", idea.id, idea.title);
        Ok(idea)
    }

    /// Add one vote and return the updated idea.
    pub fn register_vote(&self, id: &str) -> Result<Idea> {
        let idea = self.modify(id, |idea| {
            idea.votes = idea
                .votes
                .checked_add(1)
                .ok_or_else(|| Error::Validation("vote count overflow".to_string()))?;
            Ok(idea.clone())
        })?;

        tracing::debug!("Idea {} now has {} votes", idea.id, idea.votes);
        Ok(idea)
    }

    /// Append a note and return it.
    ///
    /// An unknown id is reported before blank text.
    pub fn add_note(&self, id: &str, text: Option<String>) -> Result<Note> {
        let note = self.modify(id, |idea| {
            let text = non_blank(text)
                .ok_or_else(|| Error::Validation("note text is required".to_string()))?;
            let note = Note {
                id: Uuid::new_v4().to_string(),
                text,
                created_at: Utc::now(),
            };
            idea.notes.push(note.clone());
            Ok(note)
        })?;

        tracing::debug!("Added note {} to idea {}", note.id, id);
        Ok(note)
    }

    /// Load, apply `change` to the idea with `id`, save.
    ///
    /// Nothing is written when the idea does not exist or `change` fails. The
    /// collection is saved in load order; it is not re-sorted after the change.
    fn modify<T>(&self, id: &str, change: impl FnOnce(&mut Idea) -> Result<T>) -> Result<T> {
        let _guard = self.writer.lock().expect("idea writer lock poisoned");

        let mut ideas = self.store.load_all();
        let idea = ideas
            .iter_mut()
            .find(|idea| idea.id == id)
            .ok_or_else(|| Error::NotFound(id.to_string()))?;

        let result = change(idea)?;
        self.store.save_all(&ideas)?;
        Ok(result)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
