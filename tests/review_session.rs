// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Integration test: two back-to-back camera angles on one master timeline,
//! driven through a full review session.

use vodon::annotation::{PersistOutcome, Tool};
use vodon::io::media::{HeadlessMedia, MediaCall, MediaJournal};
use vodon::models::project::ProjectData;
use vodon::models::settings::Settings;
use vodon::models::source::{SourceDescriptor, SourceId};
use vodon::timeline::{MediaHandle, Slot};
use vodon::view::Visibility;
use vodon::ReviewSession;

fn descriptor(id: &str, offset: f64, duration: f64) -> SourceDescriptor {
    SourceDescriptor {
        id: SourceId::from(id),
        name: format!("Camera {}", id.to_uppercase()),
        media: format!("{id}.mp4"),
        offset_normalised: offset,
        duration_normalised: duration,
    }
}

fn open(settings: Settings, journal: &MediaJournal) -> ReviewSession {
    let project = ProjectData {
        sources: vec![descriptor("a", 0.0, 10.0), descriptor("b", 10.0, 20.0)],
        bookmarks: Vec::new(),
    };
    ReviewSession::from_project(project, settings, |d| {
        let media = HeadlessMedia::new().with_journal(d.id.as_str(), journal.clone());
        Some(Box::new(media) as Box<dyn MediaHandle>)
    })
    .expect("failed to open project")
}

fn native(session: &ReviewSession, id: &str) -> f64 {
    session
        .timeline()
        .adapter(&SourceId::from(id))
        .and_then(|adapter| adapter.handle())
        .map(|handle| handle.position())
        .expect("source has a handle")
}

fn visibility(session: &ReviewSession, id: &str) -> Visibility {
    session
        .view_composer()
        .view(&SourceId::from(id))
        .map(|view| view.visibility)
        .expect("source has a view")
}

fn scribble(session: &mut ReviewSession) -> PersistOutcome {
    let (_, outcome) = session
        .edit_drawing(|surface| {
            surface.select_tool(Tool::Draw);
            surface.begin_stroke(10.0, 10.0);
            surface.extend_stroke(20.0, 30.0);
            surface.finish_stroke();
        })
        .expect("surface is mounted");
    outcome
}

#[test]
fn back_to_back_sources_swap_ranges() {
    let journal = MediaJournal::new();
    let mut session = open(Settings::default(), &journal);

    session.set_current_time(5.0);
    assert_eq!(visibility(&session, "a"), Visibility::Thumbnail);
    assert_eq!(visibility(&session, "b"), Visibility::BeforeRange);
    assert_eq!(native(&session, "a"), 5.0);
    assert_eq!(native(&session, "b"), 15.0);

    session.set_current_time(15.0);
    assert_eq!(visibility(&session, "a"), Visibility::AfterRange);
    assert_eq!(visibility(&session, "b"), Visibility::Thumbnail);
    assert_eq!(native(&session, "a"), 15.0);
    assert_eq!(native(&session, "b"), 25.0);
}

#[test]
fn lockstep_playback_and_instant_swap() {
    let journal = MediaJournal::new();
    let mut session = open(Settings::default(), &journal);
    session.set_active_source(Some(SourceId::from("a")));
    session.set_current_time(3.0);
    journal.clear();

    session.set_playing(true);
    let plays: Vec<String> = journal
        .entries()
        .into_iter()
        .filter(|(_, call)| *call == MediaCall::Play)
        .map(|(id, _)| id)
        .collect();
    assert_eq!(plays, vec!["a", "b"]);

    // Swapping while playing issues no seek and keeps the clock.
    journal.clear();
    session.set_active_source(Some(SourceId::from("b")));
    assert!(journal
        .entries()
        .iter()
        .all(|(_, call)| !matches!(call, MediaCall::Seek(_))));
    assert!(session.state().playing);
    assert_eq!(session.state().current_time, 3.0);

    let a = session.timeline().adapter(&SourceId::from("a")).unwrap();
    assert_eq!(a.mounted(), Some(Slot::Thumbnail));
    assert_eq!(a.handle().unwrap().volume(), 0.0);
    assert!(!a.handle().unwrap().is_paused());
}

#[test]
fn master_clock_follows_active_source_then_realigns_on_pause() {
    let journal = MediaJournal::new();
    let mut session = open(Settings::default(), &journal);
    session.set_active_source(Some(SourceId::from("b")));
    session.set_playing(true);

    assert!(session.report_native_time(&SourceId::from("b"), 14.0));
    assert_eq!(session.state().current_time, 4.0);

    session.set_playing(false);
    assert_eq!(native(&session, "a"), 4.0);
    assert_eq!(native(&session, "b"), 14.0);
}

#[test]
fn edits_while_playing_never_reach_the_store() {
    let journal = MediaJournal::new();
    let mut session = open(Settings::default(), &journal);
    session.set_active_source(Some(SourceId::from("a")));
    session.set_current_time(2.0);
    let id = session.add_bookmark().unwrap();

    assert_eq!(scribble(&mut session), PersistOutcome::Written);
    let stored = session.bookmarks().get(&id).unwrap().clone();

    session.set_playing(true);
    assert_eq!(scribble(&mut session), PersistOutcome::Playing);
    assert_eq!(session.bookmarks().get(&id).unwrap(), &stored);
}

#[test]
fn clear_on_play_is_not_persisted() {
    let journal = MediaJournal::new();
    let settings = Settings {
        clear_drawings_on_play: true,
        ..Settings::default()
    };
    let mut session = open(settings, &journal);
    session.set_active_source(Some(SourceId::from("a")));
    let id = session.add_bookmark().unwrap();
    assert_eq!(scribble(&mut session), PersistOutcome::Written);

    session.set_playing(true);
    let surface = session.annotations().surface().unwrap();
    assert!(surface.document().is_empty());
    assert_eq!(session.bookmarks().get(&id).unwrap().drawing.shape_count(), 1);

    // Jumping back to the bookmark restores the stored drawing.
    session.select_bookmark(&id).unwrap();
    let surface = session.annotations().surface().unwrap();
    assert_eq!(surface.document().shape_count(), 1);
}

#[test]
fn project_survives_close_and_reopen() {
    let journal = MediaJournal::new();
    let mut session = open(Settings::default(), &journal);
    session.set_active_source(Some(SourceId::from("b")));
    session.set_current_time(12.25);
    let id = session.add_bookmark().unwrap();
    scribble(&mut session);

    let project = session.close();
    let reopened = ReviewSession::from_project(project, Settings::default(), |_| None).unwrap();
    let bookmark = reopened.bookmarks().get(&id).unwrap();
    assert_eq!(bookmark.source_id, SourceId::from("b"));
    assert_eq!(bookmark.time_key.as_seconds(), 12.25);
    assert_eq!(bookmark.drawing.shape_count(), 1);
}
