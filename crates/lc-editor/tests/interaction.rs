//! Integration tests: pointer gestures, selection and page flows through
//! the editor session.

use lc_core::{
    AssetField, AssetId, AssetKind, CanvasProfile, CanvasRect, Document, Geometry, Gesture,
    Handle, PageId, PageRef, PhaseKey, Point,
};
use lc_editor::{EditorSession, InteractionMode, KeyEvent, Modifiers, Selection};
use pretty_assertions::assert_eq;

fn open(profile: CanvasProfile) -> EditorSession {
    let _ = env_logger::builder().is_test(true).try_init();
    EditorSession::open_json(include_str!("fixtures/slide_lesson.json"), profile)
}

fn slide() -> PageId {
    PageId::intern("slide_1")
}

fn geometry_of(s: &EditorSession, asset: AssetId) -> Geometry {
    s.document()
        .page(slide())
        .unwrap()
        .asset(asset)
        .unwrap()
        .geometry
}

// ─── Drag ────────────────────────────────────────────────────────────────

#[test]
fn drag_moves_by_pointer_delta() {
    let mut s = open(CanvasProfile::slide());
    let sky = AssetId::intern("sky");
    let commits = s.history().len();

    s.begin_interaction(
        slide(),
        sky,
        Gesture::Drag,
        Point::new(200.0, 200.0),
        CanvasRect::default(),
    );
    assert!(s.update_interaction(Point::new(230.0, 250.0)));
    let g = geometry_of(&s, sky);
    assert_eq!((g.x, g.y), (130.0, 150.0));
    assert_eq!((g.width, g.height), (100.0, 100.0));

    assert!(s.end_interaction());
    assert_eq!(s.history().len(), commits + 1);
    assert_eq!(s.selection().target(), Some((slide(), sky)));
}

#[test]
fn drag_is_not_clamped_to_the_page() {
    let mut s = open(CanvasProfile::slide());
    let clip = AssetId::intern("clip");
    s.begin_interaction(
        slide(),
        clip,
        Gesture::Drag,
        Point::new(0.0, 0.0),
        CanvasRect::default(),
    );
    s.update_interaction(Point::new(-2000.0, 5000.0));
    s.end_interaction();
    let g = geometry_of(&s, clip);
    assert_eq!((g.x, g.y), (-1500.0, 5250.0));
}

#[test]
fn delete_during_drag_makes_later_moves_noops() {
    let mut s = open(CanvasProfile::slide());
    let sky = AssetId::intern("sky");
    s.begin_interaction(
        slide(),
        sky,
        Gesture::Drag,
        Point::new(200.0, 200.0),
        CanvasRect::default(),
    );
    s.update_interaction(Point::new(210.0, 210.0));
    assert!(s.delete_asset(slide(), sky));
    let commits = s.history().len();
    let snapshot = s.document().clone();

    assert!(!s.update_interaction(Point::new(400.0, 400.0)));
    assert!(!s.end_interaction());
    assert_eq!(s.document(), &snapshot);
    assert_eq!(s.history().len(), commits);
    assert_eq!(s.interaction_mode(), InteractionMode::Idle);
}

// ─── Resize ──────────────────────────────────────────────────────────────

#[test]
fn resize_is_monotonic_and_floored() {
    let mut s = open(CanvasProfile::slide());
    let clip = AssetId::intern("clip");
    s.begin_interaction(
        slide(),
        clip,
        Gesture::Resize(Handle::Se),
        Point::new(800.0, 450.0),
        CanvasRect::default(),
    );

    let mut last_width = f32::MAX;
    for step in 0..40 {
        let shrink = step as f32 * 10.0;
        s.update_interaction(Point::new(800.0 - shrink, 450.0 - shrink));
        let g = geometry_of(&s, clip);
        assert!(g.width <= last_width, "width grew at step {step}");
        assert!(g.width >= 50.0 && g.height >= 50.0);
        last_width = g.width;
    }
    assert_eq!(last_width, 50.0);
    s.end_interaction();
}

#[test]
fn nw_resize_keeps_opposite_corner_fixed() {
    let mut s = open(CanvasProfile::slide());
    let clip = AssetId::intern("clip");
    // clip spans (500, 250) to (800, 450).
    s.begin_interaction(
        slide(),
        clip,
        Gesture::Resize(Handle::Nw),
        Point::new(500.0, 250.0),
        CanvasRect::default(),
    );
    s.update_interaction(Point::new(1000.0, 1000.0));
    let g = geometry_of(&s, clip);
    assert_eq!((g.width, g.height), (50.0, 50.0));
    assert_eq!((g.x + g.width, g.y + g.height), (800.0, 450.0));
}

// ─── Rotate ──────────────────────────────────────────────────────────────

#[test]
fn rotation_follows_pointer_around_center() {
    let mut s = open(CanvasProfile::slide());
    let sky = AssetId::intern("sky");
    // sky is 100,100 100×100, so its center is (150, 150).
    s.begin_interaction(
        slide(),
        sky,
        Gesture::Rotate,
        Point::new(150.0, 50.0),
        CanvasRect::default(),
    );
    s.update_interaction(Point::new(150.0, 50.0));
    assert!(geometry_of(&s, sky).rotation.abs() < 1e-3);

    s.update_interaction(Point::new(250.0, 150.0));
    assert!((geometry_of(&s, sky).rotation - 90.0).abs() < 1e-3);
    assert!(s.end_interaction());
}

#[test]
fn rotation_accounts_for_canvas_offset() {
    let mut s = open(CanvasProfile::slide());
    let sky = AssetId::intern("sky");
    let rect = CanvasRect::new(40.0, 60.0, 960.0, 540.0);
    s.begin_interaction(slide(), sky, Gesture::Rotate, Point::new(0.0, 0.0), rect);
    // Center in client space is (190, 210); straight below is 180°.
    s.update_interaction(Point::new(190.0, 400.0));
    assert!((geometry_of(&s, sky).rotation - 180.0).abs() < 1e-3);
}

// ─── Selection & text ────────────────────────────────────────────────────

#[test]
fn clicking_another_asset_commits_text_draft() {
    let mut s = open(CanvasProfile::slide());
    let question = AssetId::intern("question");
    assert!(s.double_click_asset(question));
    s.set_text_draft("Why is the sunset red?");
    assert!(s.click_asset(AssetId::intern("clip")));

    let text = s
        .document()
        .page(slide())
        .unwrap()
        .asset(question)
        .unwrap()
        .text()
        .unwrap()
        .content
        .clone();
    assert_eq!(text, "Why is the sunset red?");
    assert_eq!(
        s.selection().target(),
        Some((slide(), AssetId::intern("clip")))
    );
}

#[test]
fn ctrl_enter_commits_and_goes_idle() {
    let mut s = open(CanvasProfile::slide());
    let question = AssetId::intern("question");
    s.double_click_asset(question);
    s.set_text_draft("Rayleigh scattering");
    let key = KeyEvent::new("Enter", Modifiers::CMD).in_text_input();
    assert!(s.handle_key(&key).is_some());
    assert_eq!(s.selection(), &Selection::Idle);
    assert!(s.can_undo());
}

#[test]
fn double_click_on_media_only_selects() {
    let mut s = open(CanvasProfile::slide());
    let sky = AssetId::intern("sky");
    assert!(!s.double_click_asset(sky));
    assert_eq!(s.selection().target(), Some((slide(), sky)));
}

#[test]
fn reference_image_only_on_image_and_video() {
    let mut s = open(CanvasProfile::slide());
    let data = Some("data:image/png;base64,AAAA".to_owned());
    assert!(s.update_asset_field(
        slide(),
        AssetId::intern("clip"),
        AssetField::ReferenceImage(data.clone())
    ));
    let audio = s.create_asset(AssetKind::Audio, slide()).unwrap();
    let commits = s.history().len();
    assert!(!s.update_asset_field(slide(), audio, AssetField::ReferenceImage(data)));
    assert_eq!(s.history().len(), commits);
}

// ─── Pages ───────────────────────────────────────────────────────────────

#[test]
fn copy_page_is_independent_and_offset() {
    let mut s = open(CanvasProfile::slide());
    let warmup = PhaseKey::intern("warmup");
    let copy = s.copy_page(warmup, slide()).unwrap();
    assert_eq!(s.active_page(), Some(PageRef::new(warmup, copy)));

    let pages = &s.document().phase(warmup).unwrap().pages;
    assert_eq!(pages[1].id, copy);
    let copied_sky = pages[1].assets[1].id;
    assert_ne!(copied_sky, AssetId::intern("sky"));
    assert_eq!(pages[1].assets[1].geometry.x, 120.0);

    s.update_asset_field(copy, copied_sky, AssetField::Width(400.0));
    assert_eq!(geometry_of(&s, AssetId::intern("sky")).width, 100.0);
}

#[test]
fn deleting_last_page_of_phase_falls_back_to_other_phase() {
    let mut s = open(CanvasProfile::slide());
    let wrapup = PhaseKey::intern("wrapup");
    let slide3 = PageId::intern("slide_3");
    s.set_active_page(wrapup, slide3);
    assert!(s.delete_page(wrapup, slide3));
    assert_eq!(
        s.active_page(),
        Some(PageRef::new(PhaseKey::intern("warmup"), slide()))
    );
}

#[test]
fn reading_profile_numbers_pages() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut s = EditorSession::new(Document::new(), CanvasProfile::reading());
    let phase = PhaseKey::intern("reading_material");
    let first = s.add_page(phase, None);
    let inserted = s.add_page(phase, Some(0));
    let copy = s.copy_page(phase, first).unwrap();

    let pages = &s.document().phase(phase).unwrap().pages;
    let order: Vec<_> = pages.iter().map(|p| (p.id, p.meta.page_number)).collect();
    assert_eq!(
        order,
        vec![(inserted, Some(1)), (first, Some(2)), (copy, Some(3))]
    );

    assert!(s.delete_page(phase, inserted));
    let numbers: Vec<_> = s
        .document()
        .phase(phase)
        .unwrap()
        .pages
        .iter()
        .map(|p| p.meta.page_number)
        .collect();
    assert_eq!(numbers, vec![Some(1), Some(2)]);
}

#[test]
fn pages_of_a_repeated_phase_are_all_reachable() {
    let doc = Document::from_json(
        r#"{ "phases": [
            { "key": "intro", "pages": [ { "id": "rep_p1" } ] },
            { "key": "intro", "pages": [ { "id": "rep_p2" } ] }
        ] }"#,
    )
    .unwrap();
    let mut s = EditorSession::new(doc, CanvasProfile::slide());
    let intro = PhaseKey::intern("intro");
    let p2 = PageId::intern("rep_p2");

    assert!(s.set_active_page(intro, p2));
    assert!(s.delete_page(intro, p2));
    assert!(s.document().page(p2).is_none());
    assert_eq!(
        s.active_page(),
        Some(PageRef::new(intro, PageId::intern("rep_p1")))
    );
}

// ─── Ids shared between pages ────────────────────────────────────────────

fn open_shared() -> (EditorSession, PhaseKey, PageId, PageId) {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut s = EditorSession::open_json(
        include_str!("fixtures/shared_ids.json"),
        CanvasProfile::reading(),
    );
    let phase = PhaseKey::intern("reading");
    let (p1, p2) = (PageId::intern("shared_p1"), PageId::intern("shared_p2"));
    assert!(s.set_active_page(phase, p2));
    (s, phase, p1, p2)
}

fn content_on(s: &EditorSession, page: PageId) -> String {
    s.document()
        .page(page)
        .unwrap()
        .asset(AssetId::intern("caption"))
        .unwrap()
        .text()
        .unwrap()
        .content
        .clone()
}

#[test]
fn delete_key_acts_on_the_visible_page() {
    let (mut s, _, p1, p2) = open_shared();
    assert!(s.click_asset(AssetId::intern("caption")));
    assert_eq!(
        s.selection().target(),
        Some((p2, AssetId::intern("caption")))
    );

    s.handle_key(&KeyEvent::new("Delete", Modifiers::NONE));
    assert_eq!(s.document().page(p1).unwrap().assets.len(), 2);
    assert_eq!(s.document().page(p2).unwrap().assets.len(), 1);
}

#[test]
fn layer_and_duplicate_keys_act_on_the_visible_page() {
    let (mut s, _, p1, p2) = open_shared();
    s.click_asset(AssetId::intern("caption"));
    s.handle_key(&KeyEvent::new("]", Modifiers::CMD_SHIFT));
    let top = |s: &EditorSession, page| s.document().page(page).unwrap().assets[1].id;
    assert_eq!(top(&s, p2), AssetId::intern("caption"));
    assert_eq!(top(&s, p1), AssetId::intern("figure"));

    s.handle_key(&KeyEvent::new("d", Modifiers::CMD));
    assert_eq!(s.document().page(p1).unwrap().assets.len(), 2);
    assert_eq!(s.document().page(p2).unwrap().assets.len(), 3);
}

#[test]
fn text_draft_is_written_to_the_edited_page() {
    let (mut s, _, p1, p2) = open_shared();
    assert!(s.double_click_asset(AssetId::intern("caption")));
    s.set_text_draft("Edited on page two");
    assert!(s.blur_text());
    assert_eq!(content_on(&s, p2), "Edited on page two");
    assert_eq!(content_on(&s, p1), "Page one caption");
}

#[test]
fn deleting_another_page_keeps_selection() {
    let (mut s, phase, p1, p2) = open_shared();
    let caption = AssetId::intern("caption");
    s.click_asset(caption);
    assert!(s.delete_page(phase, p1));
    assert_eq!(s.selection().target(), Some((p2, caption)));
    assert_eq!(s.active_page(), Some(PageRef::new(phase, p2)));

    s.undo();
    assert!(s.document().page(p1).is_some());
    assert_eq!(s.selection().target(), Some((p2, caption)));
}
