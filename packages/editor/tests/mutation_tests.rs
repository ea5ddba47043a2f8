//! Comprehensive mutation tests

use pretty_assertions::assert_eq;
use tagbuilder_editor::model::{
    count_tags, depth_of, find_tag, Breakpoint, IdGenerator, Page, Tag, TagChildren,
    TagChildrenType, TagId, DEFAULT_DIV_STYLE,
};
use tagbuilder_editor::{EditSession, MutationError, MutationResult};

fn session_for(root: Tag) -> EditSession {
    EditSession::new(Page::new("Test", root)).with_id_generator(IdGenerator::from_seed(1000))
}

fn child_ids(session: &EditSession, id: TagId) -> Vec<TagId> {
    find_tag(&session.page().root, id)
        .and_then(Tag::tags)
        .map(|tags| tags.iter().map(|tag| tag.id).collect())
        .unwrap_or_default()
}

fn noop(reason: MutationError) -> MutationResult {
    MutationResult::Noop { reason }
}

#[test]
fn test_append_twice_to_empty_root() {
    let mut session = session_for(Tag::container(TagId(1), vec![]));

    assert!(session.append(TagId(1)).is_applied());
    assert!(session.append(TagId(1)).is_applied());

    let children = session.page().root.tags().unwrap();
    assert_eq!(children.len(), 2);
    assert_ne!(children[0].id, children[1].id);
    for child in children {
        assert_eq!(
            child.children,
            Some(TagChildren::Text(format!("New div {}", child.id)))
        );
        assert_eq!(child.styles.get(Breakpoint::Pc), Some(DEFAULT_DIV_STYLE));
    }
}

#[test]
fn test_wrap_nests_target_under_fresh_wrapper() {
    // root > A > B
    let b = Tag::text(TagId(3), "B").with_name("B").with_style(Breakpoint::Tab, "gap: 4px");
    let mut session = session_for(Tag::container(
        TagId(1),
        vec![Tag::container(TagId(2), vec![b.clone()])],
    ));

    assert!(session.wrap(TagId(3)).is_applied());

    // root > A > W > B'
    let wrapper_id = child_ids(&session, TagId(2))[0];
    assert_ne!(wrapper_id, TagId(3));
    assert_eq!(child_ids(&session, wrapper_id), vec![TagId(3)]);
    assert_eq!(find_tag(&session.page().root, TagId(3)), Some(&b));
    assert_eq!(count_tags(&session.page().root), 4);
    assert_eq!(session.selected_id(), Some(wrapper_id));

    let wrapper = find_tag(&session.page().root, wrapper_id).unwrap();
    assert_eq!(wrapper.name.as_deref(), Some("B"));
    assert_eq!(wrapper.styles, b.styles);
}

#[test]
fn test_move_down_and_boundary() {
    // root > [A, B, C]
    let mut session = session_for(Tag::container(
        TagId(1),
        vec![Tag::new(TagId(2)), Tag::new(TagId(3)), Tag::new(TagId(4))],
    ));

    assert!(session.move_down(TagId(2)).is_applied());
    assert_eq!(child_ids(&session, TagId(1)), vec![TagId(3), TagId(2), TagId(4)]);

    assert_eq!(session.move_down(TagId(4)), noop(MutationError::AtBoundary(TagId(4))));
    assert_eq!(child_ids(&session, TagId(1)), vec![TagId(3), TagId(2), TagId(4)]);

    assert_eq!(session.move_up(TagId(3)), noop(MutationError::AtBoundary(TagId(3))));
}

#[test]
fn test_change_children_type_twice() {
    // root > A{text:"x"}
    let mut session = session_for(Tag::container(TagId(1), vec![Tag::text(TagId(2), "x")]));

    assert!(session.change_children_type(TagId(2), TagChildrenType::Tags).is_applied());
    let leaves = find_tag(&session.page().root, TagId(2)).unwrap().tags().unwrap();
    assert_eq!(leaves.len(), 1);
    assert_eq!(leaves[0].id, TagId(1001));
    assert_eq!(
        leaves[0].children,
        Some(TagChildren::Text("New div 1001".to_string()))
    );

    let before = session.page().clone();
    assert_eq!(
        session.change_children_type(TagId(2), TagChildrenType::Tags),
        noop(MutationError::AlreadyVariant { id: TagId(2), kind: TagChildrenType::Tags })
    );
    assert_eq!(session.page(), &before);
}

#[test]
fn test_change_children_type_defaults() {
    let mut session = session_for(Tag::container(TagId(1), vec![Tag::new(TagId(2))]));

    for kind in TagChildrenType::ALL {
        session.change_children_type(TagId(2), kind);
        let tag = find_tag(&session.page().root, TagId(2)).unwrap();
        assert_eq!(tag.children_type(), Some(kind));
    }
}

#[test]
fn test_root_is_protected() {
    let mut session = session_for(Tag::container(TagId(1), vec![Tag::new(TagId(2))]));
    let root = TagId(1);
    let before = session.page().clone();

    assert_eq!(session.wrap(root), noop(MutationError::RootForbidden(root)));
    assert_eq!(session.unwrap(root), noop(MutationError::RootForbidden(root)));
    assert_eq!(session.delete_tag(root), noop(MutationError::RootForbidden(root)));
    assert_eq!(session.clone_tag(root), noop(MutationError::RootForbidden(root)));
    assert_eq!(session.set_name(root, "Root"), noop(MutationError::RootForbidden(root)));
    assert_eq!(session.move_up(root), noop(MutationError::RootForbidden(root)));

    assert_eq!(session.page(), &before);
    assert!(!session.can_undo());
}

#[test]
fn test_unknown_ids_are_noops() {
    let mut session = session_for(Tag::container(TagId(1), vec![Tag::new(TagId(2))]));
    let ghost = TagId(404);

    assert_eq!(session.wrap(ghost), noop(MutationError::NodeNotFound(ghost)));
    assert_eq!(session.delete_tag(ghost), noop(MutationError::NodeNotFound(ghost)));
    assert_eq!(session.append(ghost), noop(MutationError::NodeNotFound(ghost)));
    assert_eq!(
        session.set_style(ghost, "color: red", Breakpoint::Pc),
        noop(MutationError::NodeNotFound(ghost))
    );
    assert_eq!(session.version(), 0);
}

#[test]
fn test_unwrap_direct_child_of_root() {
    let mut session = session_for(Tag::container(TagId(1), vec![Tag::new(TagId(2))]));
    assert_eq!(session.unwrap(TagId(2)), noop(MutationError::ParentIsRoot(TagId(2))));
}

#[test]
fn test_unwrap_keeps_order_and_empty_parent() {
    // root > [X, P > [T, U], Y]
    let mut session = session_for(Tag::container(
        TagId(1),
        vec![
            Tag::new(TagId(2)),
            Tag::container(TagId(3), vec![Tag::new(TagId(4)), Tag::new(TagId(5))]),
            Tag::new(TagId(6)),
        ],
    ));

    assert_eq!(depth_of(&session.page().root, TagId(5)), Some(2));
    assert!(session.unwrap(TagId(5)).is_applied());
    assert_eq!(
        child_ids(&session, TagId(1)),
        vec![TagId(2), TagId(5), TagId(3), TagId(6)]
    );
    assert_eq!(depth_of(&session.page().root, TagId(5)), Some(1));
    assert_eq!(session.selected_id(), Some(TagId(5)));

    assert!(session.unwrap(TagId(4)).is_applied());
    assert_eq!(child_ids(&session, TagId(3)), Vec::<TagId>::new());
    assert_eq!(count_tags(&session.page().root), 6);
}

#[test]
fn test_clone_appends_to_end_of_parent() {
    let mut session = session_for(Tag::container(
        TagId(1),
        vec![
            Tag::container(TagId(2), vec![Tag::text(TagId(3), "inner")]),
            Tag::new(TagId(4)),
        ],
    ));
    session.set_selected_tag(Some(TagId(2)));

    assert!(session.clone_tag(TagId(2)).is_applied());

    let ids = child_ids(&session, TagId(1));
    assert_eq!(ids, vec![TagId(2), TagId(4), TagId(1001)]);
    let copy = find_tag(&session.page().root, TagId(1001)).unwrap();
    assert_eq!(copy.name.as_deref(), Some("Copy of Tag 2"));
    assert_eq!(child_ids(&session, TagId(1001)), vec![TagId(1002)]);
    assert_eq!(session.selected_id(), Some(TagId(2)));
}

#[test]
fn test_append_rejects_leaf_payloads() {
    let mut session = session_for(Tag::container(
        TagId(1),
        vec![Tag::text(TagId(2), "x"), Tag::new(TagId(3))],
    ));

    assert_eq!(
        session.append(TagId(2)),
        noop(MutationError::WrongChildrenType { id: TagId(2), found: Some(TagChildrenType::Text) })
    );
    assert_eq!(
        session.append(TagId(3)),
        noop(MutationError::WrongChildrenType { id: TagId(3), found: None })
    );
}

#[test]
fn test_set_style_touches_one_breakpoint() {
    let mut session = session_for(Tag::container(
        TagId(1),
        vec![Tag::new(TagId(2)).with_style(Breakpoint::Pc, "color: red")],
    ));

    session.set_style(TagId(2), "color: blue", Breakpoint::Wide);
    let tag = find_tag(&session.page().root, TagId(2)).unwrap();
    assert_eq!(tag.styles.get(Breakpoint::Pc), Some("color: red"));
    assert_eq!(tag.styles.get(Breakpoint::Wide), Some("color: blue"));
    assert_eq!(tag.effective_style(Breakpoint::Ultra), "color: blue");
    assert_eq!(tag.effective_style(Breakpoint::Mob), "color: red");

    session.set_style(TagId(2), "", Breakpoint::Pc);
    let tag = find_tag(&session.page().root, TagId(2)).unwrap();
    assert_eq!(tag.styles.get(Breakpoint::Pc), None);
}

#[test]
fn test_move_to_reparents() {
    let mut session = session_for(Tag::container(
        TagId(1),
        vec![
            Tag::container(TagId(2), vec![Tag::new(TagId(3))]),
            Tag::container(TagId(4), vec![]),
        ],
    ));

    assert!(session.move_to(TagId(4), TagId(2), 0).is_applied());
    assert_eq!(child_ids(&session, TagId(2)), vec![TagId(4), TagId(3)]);

    assert_eq!(
        session.move_to(TagId(2), TagId(4), 0),
        noop(MutationError::CycleDetected { id: TagId(2), new_parent: TagId(4) })
    );
}
