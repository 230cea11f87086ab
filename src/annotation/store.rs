// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Bookmark storage keyed by `(source, time bucket)`.

use crate::error::{EngineError, Result};
use crate::models::bookmark::{Bookmark, BookmarkId, TimeKey};
use crate::models::drawing::Drawing;
use crate::models::source::SourceId;
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Default, Clone)]
pub struct BookmarkStore {
    bookmarks: BTreeMap<(SourceId, TimeKey), Bookmark>,
    index: HashMap<BookmarkId, (SourceId, TimeKey)>,
}

impl BookmarkStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.bookmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bookmarks.is_empty()
    }

    /// All bookmarks, ordered by source then time.
    pub fn iter(&self) -> impl Iterator<Item = &Bookmark> {
        self.bookmarks.values()
    }

    pub fn get(&self, id: &BookmarkId) -> Option<&Bookmark> {
        self.index.get(id).and_then(|key| self.bookmarks.get(key))
    }

    pub fn find(&self, source: &SourceId, time_key: TimeKey) -> Option<&Bookmark> {
        self.bookmarks.get(&(source.clone(), time_key))
    }

    /// Bookmarks of one source in time order.
    pub fn for_source<'a>(&'a self, source: &'a SourceId) -> impl Iterator<Item = &'a Bookmark> + 'a {
        self.bookmarks
            .range((source.clone(), TimeKey(i64::MIN))..=(source.clone(), TimeKey(i64::MAX)))
            .map(|(_, bookmark)| bookmark)
    }

    /// Bookmark for `(source, time_key)`, created blank if absent.
    pub fn create(&mut self, source: SourceId, time_key: TimeKey) -> BookmarkId {
        if let Some(existing) = self.find(&source, time_key) {
            return existing.id;
        }

        let bookmark = Bookmark::new(source, time_key);
        let id = bookmark.id;
        self.insert(bookmark);
        log::info!("Added bookmark {id}, total: {}", self.len());
        id
    }

    /// Store a bookmark, replacing whatever occupied its key or its id.
    pub fn insert(&mut self, bookmark: Bookmark) -> Option<Bookmark> {
        let key = (bookmark.source_id.clone(), bookmark.time_key);
        let by_id = self.remove(&bookmark.id);
        self.index.insert(bookmark.id, key.clone());
        let by_key = self.bookmarks.insert(key, bookmark);
        if let Some(replaced) = &by_key {
            self.index.remove(&replaced.id);
        }
        by_key.or(by_id)
    }

    pub fn remove(&mut self, id: &BookmarkId) -> Option<Bookmark> {
        let key = self.index.remove(id)?;
        self.bookmarks.remove(&key)
    }

    /// Write a document through to a stored bookmark.
    pub fn set_bookmark_drawing(
        &mut self,
        source: &SourceId,
        bookmark: &BookmarkId,
        drawing: Drawing,
    ) -> Result<()> {
        let key = self
            .index
            .get(bookmark)
            .ok_or(EngineError::UnknownBookmark(*bookmark))?;
        if &key.0 != source {
            return Err(EngineError::BookmarkSourceMismatch {
                bookmark: *bookmark,
                owner: key.0.clone(),
                requested: source.clone(),
            });
        }

        let stored = self
            .bookmarks
            .get_mut(key)
            .ok_or(EngineError::UnknownBookmark(*bookmark))?;
        stored.drawing = drawing;
        log::debug!("Stored drawing for bookmark {bookmark} ({} shapes)", stored.drawing.shape_count());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::drawing::{Shape, ShapeKind};

    fn drawing_with(id: &str) -> Drawing {
        let mut drawing = Drawing::blank();
        drawing.insert_shape(Shape::new(id, ShapeKind::Line));
        drawing
    }

    #[test]
    fn test_create_is_idempotent_per_key() {
        let mut store = BookmarkStore::new();
        let a = SourceId::from("a");
        let first = store.create(a.clone(), TimeKey(1000));
        let again = store.create(a.clone(), TimeKey(1000));
        let other = store.create(a, TimeKey(2000));

        assert_eq!(first, again);
        assert_ne!(first, other);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_for_source_is_time_ordered_and_scoped() {
        let mut store = BookmarkStore::new();
        let a = SourceId::from("a");
        let b = SourceId::from("b");
        store.create(a.clone(), TimeKey(3000));
        store.create(b.clone(), TimeKey(500));
        store.create(a.clone(), TimeKey(1000));

        let keys: Vec<_> = store.for_source(&a).map(|bm| bm.time_key).collect();
        assert_eq!(keys, vec![TimeKey(1000), TimeKey(3000)]);
        assert_eq!(store.for_source(&b).count(), 1);
    }

    #[test]
    fn test_set_bookmark_drawing_writes_through() {
        let mut store = BookmarkStore::new();
        let a = SourceId::from("a");
        let id = store.create(a.clone(), TimeKey(0));

        store.set_bookmark_drawing(&a, &id, drawing_with("s1")).unwrap();
        assert_eq!(store.get(&id).unwrap().drawing.shape_count(), 1);
    }

    #[test]
    fn test_set_bookmark_drawing_checks_owner() {
        let mut store = BookmarkStore::new();
        let id = store.create(SourceId::from("a"), TimeKey(0));

        let err = store
            .set_bookmark_drawing(&SourceId::from("b"), &id, drawing_with("s1"))
            .unwrap_err();
        assert!(matches!(err, EngineError::BookmarkSourceMismatch { .. }));
        assert!(store.get(&id).unwrap().drawing.is_empty());

        let err = store
            .set_bookmark_drawing(&SourceId::from("a"), &BookmarkId::new(), Drawing::blank())
            .unwrap_err();
        assert!(matches!(err, EngineError::UnknownBookmark(_)));
    }

    #[test]
    fn test_insert_replaces_same_key_and_keeps_index_consistent() {
        let mut store = BookmarkStore::new();
        let a = SourceId::from("a");
        let old = store.create(a.clone(), TimeKey(0));

        let replacement = Bookmark::new(a.clone(), TimeKey(0));
        let new_id = replacement.id;
        let replaced = store.insert(replacement).unwrap();

        assert_eq!(replaced.id, old);
        assert!(store.get(&old).is_none());
        assert!(store.get(&new_id).is_some());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_remove() {
        let mut store = BookmarkStore::new();
        let id = store.create(SourceId::from("a"), TimeKey(0));
        assert!(store.remove(&id).is_some());
        assert!(store.is_empty());
        assert!(store.remove(&id).is_none());
    }
}
