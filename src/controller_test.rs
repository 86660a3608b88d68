#![allow(clippy::float_cmp)]

use uuid::Uuid;

use super::*;
use crate::doc::Project;
use crate::element::ElementKind;
use crate::geometry::Size;
use crate::hit::ResizeHandle;

// =============================================================
// Helpers
// =============================================================

fn setup() -> (CanvasStore, WorkspaceController) {
    (CanvasStore::new(Project::new("Test")), WorkspaceController::new())
}

fn pt(x: f64, y: f64) -> Position {
    Position::new(x, y)
}

fn no_modifiers() -> Modifiers {
    Modifiers::default()
}

fn shift() -> Modifiers {
    Modifiers { shift: true, ..Default::default() }
}

fn ctrl() -> Modifiers {
    Modifiers { ctrl: true, ..Default::default() }
}

fn add_panel(store: &mut CanvasStore, x: f64, y: f64, w: f64, h: f64) -> ElementId {
    let id = store.generate_id();
    assert!(store.add_element(Element::panel(id, pt(x, y), Size::new(w, h))));
    id
}

fn position_of(store: &CanvasStore, id: &ElementId) -> Position {
    store.element(id).map(|el| el.transform.position).unwrap_or_default()
}

fn size_of(store: &CanvasStore, id: &ElementId) -> Size {
    store.element(id).map(|el| el.transform.size).unwrap_or_default()
}

fn click(ctl: &mut WorkspaceController, store: &mut CanvasStore, at: Position, modifiers: Modifiers) -> Vec<Action> {
    let mut actions = ctl.on_pointer_down(store, at, Button::Primary, modifiers);
    actions.extend(ctl.on_pointer_up());
    actions
}

fn drag(ctl: &mut WorkspaceController, store: &mut CanvasStore, from: Position, to: Position) {
    ctl.on_pointer_down(store, from, Button::Primary, no_modifiers());
    ctl.on_pointer_move(store, to);
    ctl.on_pointer_up();
}

fn created_id(actions: &[Action]) -> Option<ElementId> {
    actions.iter().find_map(|a| match a {
        Action::ElementCreated(id) => Some(*id),
        _ => None,
    })
}

// =============================================================
// Idle: click-to-create
// =============================================================

#[test]
fn panel_tool_click_creates_panel_at_click() {
    let (mut store, mut ctl) = setup();
    store.set_tool(Tool::Panel);
    let actions = click(&mut ctl, &mut store, pt(200.0, 150.0), no_modifiers());

    let id = created_id(&actions).unwrap();
    let el = store.element(&id).unwrap();
    assert!(matches!(el.kind, ElementKind::Panel(_)));
    assert_eq!(el.transform.position, pt(200.0, 150.0));
    assert_eq!(el.transform.size, store.config().panel_size);
    assert_eq!(store.tool(), Tool::Select);
    assert_eq!(store.selection(), &[id]);
}

#[test]
fn creation_uses_page_space_coordinates() {
    let (mut store, mut ctl) = setup();
    store.set_zoom(2.0);
    store.set_pan_offset(pt(100.0, 50.0));
    store.set_origin(pt(10.0, 10.0));
    store.set_tool(Tool::Text);
    let actions = click(&mut ctl, &mut store, pt(310.0, 260.0), no_modifiers());
    let id = created_id(&actions).unwrap();
    assert_eq!(position_of(&store, &id), pt(100.0, 100.0));
    assert_eq!(size_of(&store, &id), store.config().text_size);
}

#[test]
fn dialogue_tool_creates_dialogue() {
    let (mut store, mut ctl) = setup();
    store.set_tool(Tool::Dialogue);
    let actions = click(&mut ctl, &mut store, pt(5.0, 5.0), no_modifiers());
    let id = created_id(&actions).unwrap();
    assert!(matches!(store.element(&id).unwrap().kind, ElementKind::Dialogue(_)));
}

#[test]
fn created_element_paints_on_top() {
    let (mut store, mut ctl) = setup();
    let existing = add_panel(&mut store, 500.0, 500.0, 100.0, 100.0);
    store.bring_to_front(&existing);
    store.set_tool(Tool::Panel);
    let id = created_id(&click(&mut ctl, &mut store, pt(0.0, 0.0), no_modifiers())).unwrap();
    let sorted: Vec<_> = store.sorted_elements().iter().map(|el| el.id).collect();
    assert_eq!(sorted.last(), Some(&id));
}

#[test]
fn select_tool_background_click_deselects() {
    let (mut store, mut ctl) = setup();
    let id = add_panel(&mut store, 0.0, 0.0, 100.0, 100.0);
    store.select_element(&id, false);
    let actions = click(&mut ctl, &mut store, pt(500.0, 500.0), no_modifiers());
    assert!(store.selection().is_empty());
    assert!(created_id(&actions).is_none());
    assert_eq!(store.current_page().elements.len(), 1);
}

#[test]
fn creation_tool_click_on_element_selects_instead() {
    let (mut store, mut ctl) = setup();
    let id = add_panel(&mut store, 0.0, 0.0, 100.0, 100.0);
    store.set_tool(Tool::Panel);
    let actions = click(&mut ctl, &mut store, pt(50.0, 50.0), no_modifiers());
    assert!(created_id(&actions).is_none());
    assert_eq!(store.selection(), &[id]);
    assert_eq!(store.tool(), Tool::Panel);
}

// =============================================================
// Idle: selection
// =============================================================

#[test]
fn click_selects_element() {
    let (mut store, mut ctl) = setup();
    let id = add_panel(&mut store, 0.0, 0.0, 100.0, 100.0);
    click(&mut ctl, &mut store, pt(50.0, 50.0), no_modifiers());
    assert_eq!(store.selection(), &[id]);
}

#[test]
fn shift_click_toggles_selection() {
    let (mut store, mut ctl) = setup();
    let a = add_panel(&mut store, 0.0, 0.0, 100.0, 100.0);
    let b = add_panel(&mut store, 200.0, 0.0, 100.0, 100.0);
    click(&mut ctl, &mut store, pt(50.0, 50.0), no_modifiers());
    click(&mut ctl, &mut store, pt(250.0, 50.0), shift());
    assert_eq!(store.selection(), &[a, b]);
    click(&mut ctl, &mut store, pt(50.0, 50.0), shift());
    assert_eq!(store.selection(), &[b]);
}

#[test]
fn plain_click_on_other_element_replaces_selection() {
    let (mut store, mut ctl) = setup();
    let a = add_panel(&mut store, 0.0, 0.0, 100.0, 100.0);
    let b = add_panel(&mut store, 200.0, 0.0, 100.0, 100.0);
    store.select_element(&a, false);
    click(&mut ctl, &mut store, pt(250.0, 50.0), no_modifiers());
    assert_eq!(store.selection(), &[b]);
}

#[test]
fn hidden_element_is_not_clickable() {
    let (mut store, mut ctl) = setup();
    let id = add_panel(&mut store, 0.0, 0.0, 100.0, 100.0);
    store.toggle_visibility(&id);
    click(&mut ctl, &mut store, pt(50.0, 50.0), no_modifiers());
    assert!(store.selection().is_empty());
}

#[test]
fn secondary_button_is_ignored() {
    let (mut store, mut ctl) = setup();
    store.set_tool(Tool::Panel);
    let actions = ctl.on_pointer_down(&mut store, pt(10.0, 10.0), Button::Secondary, no_modifiers());
    assert!(actions.is_empty());
    assert_eq!(ctl.state(), &InteractionState::Idle);
    assert!(store.current_page().elements.is_empty());
}

// =============================================================
// Dragging
// =============================================================

#[test]
fn drag_moves_element_by_page_delta() {
    let (mut store, mut ctl) = setup();
    let id = add_panel(&mut store, 100.0, 100.0, 100.0, 100.0);
    drag(&mut ctl, &mut store, pt(150.0, 150.0), pt(180.0, 110.0));
    assert_eq!(position_of(&store, &id), pt(130.0, 60.0));
    assert_eq!(ctl.state(), &InteractionState::Idle);
}

#[test]
fn multi_select_drag_at_zoom_two_moves_rigidly() {
    let (mut store, mut ctl) = setup();
    let a = add_panel(&mut store, 0.0, 0.0, 100.0, 100.0);
    let b = add_panel(&mut store, 200.0, 0.0, 100.0, 100.0);
    let c = add_panel(&mut store, 0.0, 300.0, 100.0, 100.0);
    store.set_zoom(2.0);
    store.select_element(&a, false);
    store.select_element(&b, true);

    // Screen (100, 100) is page (50, 50), inside `a`.
    ctl.on_pointer_down(&mut store, pt(100.0, 100.0), Button::Primary, no_modifiers());
    assert_eq!(ctl.state().mode(), "dragging");
    ctl.on_pointer_move(&mut store, pt(140.0, 100.0));
    ctl.on_pointer_up();

    assert_eq!(position_of(&store, &a), pt(20.0, 0.0));
    assert_eq!(position_of(&store, &b), pt(220.0, 0.0));
    assert_eq!(position_of(&store, &c), pt(0.0, 300.0));
    assert_eq!(store.selection(), &[a, b]);
}

#[test]
fn drag_moves_are_relative_to_drag_start() {
    let (mut store, mut ctl) = setup();
    let id = add_panel(&mut store, 0.0, 0.0, 100.0, 100.0);
    ctl.on_pointer_down(&mut store, pt(50.0, 50.0), Button::Primary, no_modifiers());
    ctl.on_pointer_move(&mut store, pt(60.0, 50.0));
    ctl.on_pointer_move(&mut store, pt(70.0, 50.0));
    ctl.on_pointer_move(&mut store, pt(65.0, 55.0));
    ctl.on_pointer_up();
    assert_eq!(position_of(&store, &id), pt(15.0, 5.0));
}

#[test]
fn drag_skips_locked_members_of_selection() {
    let (mut store, mut ctl) = setup();
    let a = add_panel(&mut store, 0.0, 0.0, 100.0, 100.0);
    let b = add_panel(&mut store, 200.0, 0.0, 100.0, 100.0);
    store.toggle_lock(&b);
    store.select_element(&a, false);
    store.select_element(&b, true);
    drag(&mut ctl, &mut store, pt(50.0, 50.0), pt(60.0, 60.0));
    assert_eq!(position_of(&store, &a), pt(10.0, 10.0));
    assert_eq!(position_of(&store, &b), pt(200.0, 0.0));
}

#[test]
fn locked_element_selects_but_does_not_drag() {
    let (mut store, mut ctl) = setup();
    let id = add_panel(&mut store, 0.0, 0.0, 100.0, 100.0);
    store.toggle_lock(&id);
    ctl.on_pointer_down(&mut store, pt(50.0, 50.0), Button::Primary, no_modifiers());
    assert_eq!(ctl.state(), &InteractionState::Idle);
    assert_eq!(store.selection(), &[id]);
    ctl.on_pointer_move(&mut store, pt(90.0, 90.0));
    assert_eq!(position_of(&store, &id), pt(0.0, 0.0));
}

#[test]
fn shift_click_deselecting_does_not_arm_drag() {
    let (mut store, mut ctl) = setup();
    let id = add_panel(&mut store, 0.0, 0.0, 100.0, 100.0);
    store.select_element(&id, false);
    ctl.on_pointer_down(&mut store, pt(50.0, 50.0), Button::Primary, shift());
    assert!(store.selection().is_empty());
    assert_eq!(ctl.state(), &InteractionState::Idle);
}

#[test]
fn pointer_down_during_gesture_is_ignored() {
    let (mut store, mut ctl) = setup();
    add_panel(&mut store, 0.0, 0.0, 100.0, 100.0);
    ctl.on_pointer_down(&mut store, pt(50.0, 50.0), Button::Primary, no_modifiers());
    let actions = ctl.on_pointer_down(&mut store, pt(50.0, 50.0), Button::Middle, no_modifiers());
    assert!(actions.is_empty());
    assert_eq!(ctl.state().mode(), "dragging");
}

// =============================================================
// Resizing
// =============================================================

#[test]
fn se_handle_resizes() {
    let (mut store, mut ctl) = setup();
    let id = add_panel(&mut store, 100.0, 100.0, 200.0, 100.0);
    store.select_element(&id, false);
    ctl.on_pointer_down(&mut store, pt(300.0, 200.0), Button::Primary, no_modifiers());
    assert!(matches!(ctl.state(), InteractionState::Resizing { handle: ResizeHandle::Se, .. }));
    ctl.on_pointer_move(&mut store, pt(350.0, 260.0));
    ctl.on_pointer_up();
    assert_eq!(size_of(&store, &id), Size::new(250.0, 160.0));
    assert_eq!(position_of(&store, &id), pt(100.0, 100.0));
}

#[test]
fn nw_handle_keeps_opposite_corner() {
    let (mut store, mut ctl) = setup();
    let id = add_panel(&mut store, 100.0, 100.0, 200.0, 100.0);
    store.select_element(&id, false);
    ctl.on_pointer_down(&mut store, pt(100.0, 100.0), Button::Primary, no_modifiers());
    ctl.on_pointer_move(&mut store, pt(140.0, 120.0));
    ctl.on_pointer_up();
    assert_eq!(size_of(&store, &id), Size::new(160.0, 80.0));
    assert_eq!(position_of(&store, &id), pt(140.0, 120.0));
}

#[test]
fn resize_respects_zoom() {
    let (mut store, mut ctl) = setup();
    let id = add_panel(&mut store, 0.0, 0.0, 100.0, 100.0);
    store.set_zoom(2.0);
    store.select_element(&id, false);
    // East handle at page (100, 50) = screen (200, 100).
    ctl.on_pointer_down(&mut store, pt(200.0, 100.0), Button::Primary, no_modifiers());
    ctl.on_pointer_move(&mut store, pt(260.0, 100.0));
    ctl.on_pointer_up();
    assert_eq!(size_of(&store, &id), Size::new(130.0, 100.0));
}

#[test]
fn resize_never_goes_below_minimum() {
    let (mut store, mut ctl) = setup();
    let id = add_panel(&mut store, 100.0, 100.0, 200.0, 100.0);
    store.select_element(&id, false);
    let corners = [pt(100.0, 100.0), pt(300.0, 100.0), pt(300.0, 200.0), pt(100.0, 200.0)];
    for corner in corners {
        let t = store.element(&id).unwrap().transform;
        let handle_pt = pt(
            if corner.x > 150.0 { t.position.x + t.size.width } else { t.position.x },
            if corner.y > 150.0 { t.position.y + t.size.height } else { t.position.y },
        );
        ctl.on_pointer_down(&mut store, handle_pt, Button::Primary, no_modifiers());
        assert_eq!(ctl.state().mode(), "resizing");
        ctl.on_pointer_move(&mut store, pt(200.0, 150.0));
        ctl.on_pointer_move(&mut store, pt(-5000.0, 5000.0));
        ctl.on_pointer_move(&mut store, pt(5000.0, -5000.0));
        ctl.on_pointer_up();
        let size = size_of(&store, &id);
        assert!(size.width >= 50.0, "{size:?}");
        assert!(size.height >= 50.0, "{size:?}");
    }
}

#[test]
fn handles_require_single_selection() {
    let (mut store, mut ctl) = setup();
    let a = add_panel(&mut store, 100.0, 100.0, 200.0, 100.0);
    let b = add_panel(&mut store, 500.0, 500.0, 100.0, 100.0);
    store.select_element(&a, false);
    store.select_element(&b, true);
    ctl.on_pointer_down(&mut store, pt(300.0, 200.0), Button::Primary, no_modifiers());
    assert_eq!(ctl.state().mode(), "dragging");
}

// =============================================================
// Panning
// =============================================================

#[test]
fn pan_tool_pans_in_screen_space() {
    let (mut store, mut ctl) = setup();
    store.set_zoom(2.0);
    store.set_tool(Tool::Pan);
    ctl.on_pointer_down(&mut store, pt(10.0, 10.0), Button::Primary, no_modifiers());
    assert_eq!(ctl.state().mode(), "panning");
    ctl.on_pointer_move(&mut store, pt(50.0, -20.0));
    ctl.on_pointer_up();
    assert_eq!(store.viewport().pan_offset, pt(40.0, -30.0));
}

#[test]
fn middle_button_pans_over_elements() {
    let (mut store, mut ctl) = setup();
    let id = add_panel(&mut store, 0.0, 0.0, 100.0, 100.0);
    store.set_pan_offset(pt(5.0, 5.0));
    ctl.on_pointer_down(&mut store, pt(50.0, 50.0), Button::Middle, no_modifiers());
    ctl.on_pointer_move(&mut store, pt(60.0, 70.0));
    ctl.on_pointer_up();
    assert_eq!(store.viewport().pan_offset, pt(15.0, 25.0));
    assert_eq!(position_of(&store, &id), pt(0.0, 0.0));
    assert!(store.selection().is_empty());
}

#[test]
fn alt_primary_pans() {
    let (mut store, mut ctl) = setup();
    let alt = Modifiers { alt: true, ..Default::default() };
    ctl.on_pointer_down(&mut store, pt(0.0, 0.0), Button::Primary, alt);
    assert_eq!(ctl.state().mode(), "panning");
}

#[test]
fn pan_tool_does_not_create_or_deselect() {
    let (mut store, mut ctl) = setup();
    let id = add_panel(&mut store, 0.0, 0.0, 100.0, 100.0);
    store.select_element(&id, false);
    store.set_tool(Tool::Pan);
    click(&mut ctl, &mut store, pt(500.0, 500.0), no_modifiers());
    assert_eq!(store.selection(), &[id]);
    assert_eq!(store.tool(), Tool::Pan);
}

#[test]
fn pointer_up_when_idle_is_quiet() {
    let (_, mut ctl) = setup();
    assert!(ctl.on_pointer_up().is_empty());
}

// =============================================================
// Wheel
// =============================================================

#[test]
fn ctrl_wheel_zooms_by_fixed_step() {
    let (mut store, mut ctl) = setup();
    ctl.on_wheel(&mut store, WheelDelta { dx: 0.0, dy: -1.0 }, ctrl());
    assert!((store.viewport().zoom - 1.1).abs() < 1e-9);
    ctl.on_wheel(&mut store, WheelDelta { dx: 0.0, dy: -500.0 }, ctrl());
    assert!((store.viewport().zoom - 1.2).abs() < 1e-9);
    ctl.on_wheel(&mut store, WheelDelta { dx: 0.0, dy: 3.0 }, Modifiers { meta: true, ..Default::default() });
    assert!((store.viewport().zoom - 1.1).abs() < 1e-9);
}

#[test]
fn ctrl_wheel_zoom_is_clamped() {
    let (mut store, mut ctl) = setup();
    for _ in 0..100 {
        ctl.on_wheel(&mut store, WheelDelta { dx: 0.0, dy: 1.0 }, ctrl());
    }
    assert_eq!(store.viewport().zoom, 0.1);
    for _ in 0..100 {
        ctl.on_wheel(&mut store, WheelDelta { dx: 0.0, dy: -1.0 }, ctrl());
    }
    assert_eq!(store.viewport().zoom, 3.0);
}

#[test]
fn ctrl_wheel_zero_delta_is_noop() {
    let (mut store, mut ctl) = setup();
    let actions = ctl.on_wheel(&mut store, WheelDelta::default(), ctrl());
    assert!(actions.is_empty());
    assert_eq!(store.viewport().zoom, 1.0);
}

#[test]
fn plain_wheel_pans() {
    let (mut store, mut ctl) = setup();
    ctl.on_wheel(&mut store, WheelDelta { dx: 10.0, dy: 30.0 }, no_modifiers());
    assert_eq!(store.viewport().pan_offset, pt(-10.0, -30.0));
    assert_eq!(store.viewport().zoom, 1.0);
}

// =============================================================
// Keyboard
// =============================================================

#[test]
fn delete_removes_all_selected() {
    let (mut store, mut ctl) = setup();
    let a = add_panel(&mut store, 0.0, 0.0, 100.0, 100.0);
    let b = add_panel(&mut store, 200.0, 0.0, 100.0, 100.0);
    let c = add_panel(&mut store, 400.0, 0.0, 100.0, 100.0);
    store.select_element(&a, false);
    store.select_element(&b, true);

    let actions = ctl.on_key_down(&mut store, &Key::new("Delete"), no_modifiers());
    assert!(actions.contains(&Action::ElementsRemoved(vec![a, b])));
    assert!(store.element(&a).is_none());
    assert!(store.element(&b).is_none());
    assert!(store.element(&c).is_some());
    assert!(store.selection().is_empty());
}

#[test]
fn backspace_also_deletes() {
    let (mut store, mut ctl) = setup();
    let a = add_panel(&mut store, 0.0, 0.0, 100.0, 100.0);
    store.select_element(&a, false);
    ctl.on_key_down(&mut store, &Key::new("Backspace"), no_modifiers());
    assert!(store.current_page().elements.is_empty());
}

#[test]
fn delete_with_empty_selection_is_noop() {
    let (mut store, mut ctl) = setup();
    add_panel(&mut store, 0.0, 0.0, 100.0, 100.0);
    assert!(ctl.on_key_down(&mut store, &Key::new("Delete"), no_modifiers()).is_empty());
    assert_eq!(store.current_page().elements.len(), 1);
}

#[test]
fn delete_spares_locked_elements() {
    let (mut store, mut ctl) = setup();
    let a = add_panel(&mut store, 0.0, 0.0, 100.0, 100.0);
    store.toggle_lock(&a);
    store.select_element(&a, false);
    let actions = ctl.on_key_down(&mut store, &Key::new("Delete"), no_modifiers());
    assert!(store.element(&a).is_some());
    assert!(store.selection().is_empty());
    assert_eq!(actions, vec![Action::RenderNeeded]);
}

#[test]
fn escape_clears_selection_and_tool() {
    let (mut store, mut ctl) = setup();
    let a = add_panel(&mut store, 0.0, 0.0, 100.0, 100.0);
    store.select_element(&a, false);
    store.set_tool(Tool::Dialogue);
    ctl.on_key_down(&mut store, &Key::new("Escape"), no_modifiers());
    assert!(store.selection().is_empty());
    assert_eq!(store.tool(), Tool::Select);
}

#[test]
fn ctrl_d_duplicates_first_selected() {
    let (mut store, mut ctl) = setup();
    let a = add_panel(&mut store, 0.0, 0.0, 100.0, 100.0);
    let b = add_panel(&mut store, 200.0, 0.0, 100.0, 100.0);
    store.select_element(&a, false);
    store.select_element(&b, true);
    let actions = ctl.on_key_down(&mut store, &Key::new("d"), ctrl());
    let copy = created_id(&actions).unwrap();
    assert_eq!(position_of(&store, &copy), pt(20.0, 20.0));
    assert_eq!(store.selection(), &[copy]);
    assert_eq!(store.current_page().elements.len(), 3);
}

#[test]
fn cmd_shift_capital_d_duplicates() {
    let (mut store, mut ctl) = setup();
    let a = add_panel(&mut store, 0.0, 0.0, 100.0, 100.0);
    store.select_element(&a, false);
    let modifiers = Modifiers { meta: true, shift: true, ..Default::default() };
    let actions = ctl.on_key_down(&mut store, &Key::new("D"), modifiers);
    assert!(created_id(&actions).is_some());
}

#[test]
fn plain_d_does_nothing() {
    let (mut store, mut ctl) = setup();
    let a = add_panel(&mut store, 0.0, 0.0, 100.0, 100.0);
    store.select_element(&a, false);
    assert!(ctl.on_key_down(&mut store, &Key::new("d"), no_modifiers()).is_empty());
    assert_eq!(store.current_page().elements.len(), 1);
}

#[test]
fn ctrl_d_without_selection_is_noop() {
    let (mut store, mut ctl) = setup();
    assert!(ctl.on_key_down(&mut store, &Key::new("d"), ctrl()).is_empty());
}

// =============================================================
// Stale ids
// =============================================================

#[test]
fn drag_after_external_delete_does_not_panic() {
    let (mut store, mut ctl) = setup();
    let a = add_panel(&mut store, 0.0, 0.0, 100.0, 100.0);
    ctl.on_pointer_down(&mut store, pt(50.0, 50.0), Button::Primary, no_modifiers());
    store.remove_element(&a);
    let actions = ctl.on_pointer_move(&mut store, pt(70.0, 70.0));
    assert_eq!(actions, vec![Action::RenderNeeded]);
    ctl.on_pointer_up();
    assert!(store.element(&Uuid::new_v4()).is_none());
}
