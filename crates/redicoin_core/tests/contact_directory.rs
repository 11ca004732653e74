use redicoin_core::{
    ContactDirectory, ContactDraft, ContactType, DirectoryError, SequenceIdSource,
};
use std::collections::HashSet;

fn draft(name: &str, address: &str) -> ContactDraft {
    ContactDraft::new(name, format!("{name}.rc"), address, ContactType::Person)
}

#[test]
fn create_prepends_with_distinct_id() {
    let mut directory = ContactDirectory::new();
    let mut ids = SequenceIdSource::from_ids([10, 20, 30]);
    let a = directory.create(draft("A", "0xa"), &mut ids);
    let b = directory.create(draft("B", "0xb"), &mut ids);
    let c = directory.create(draft("C", "0xc"), &mut ids);

    let names = directory
        .contacts()
        .iter()
        .map(|contact| contact.name.as_str())
        .collect::<Vec<_>>();
    assert_eq!(names, ["C", "B", "A"]);
    assert_ne!(c.id, a.id);
    assert_ne!(c.id, b.id);
}

#[test]
fn create_is_distinct_even_against_loaded_ids() {
    let mut seeded = ContactDirectory::from_contacts(redicoin_core::seed_contacts());
    let mut ids = SequenceIdSource::from_ids([1, 2, 3, 4]);

    for _ in 0..4 {
        seeded.create(draft("X", "0xx"), &mut ids);
    }

    let unique = seeded
        .contacts()
        .iter()
        .map(|contact| contact.id)
        .collect::<HashSet<_>>();
    assert_eq!(unique.len(), 8);
}

#[test]
fn update_preserves_identity_and_neighbours() {
    let mut directory = ContactDirectory::new();
    let mut ids = SequenceIdSource::starting_at(1);
    let first = directory.create(draft("Ana", "0xa"), &mut ids);
    let second = directory.create(draft("Bruno", "0xb"), &mut ids);

    let updated = directory
        .update(
            first.id,
            ContactDraft::new("Ana Clara", "ana.rc", "0xnew", ContactType::Company),
        )
        .unwrap();

    assert_eq!(updated.id, first.id);
    assert_eq!(updated.image_url, first.image_url);
    assert_eq!(updated.name, "Ana Clara");
    assert_eq!(updated.address, "0xnew");
    assert_eq!(updated.kind, ContactType::Company);
    assert_eq!(directory.get(second.id), Some(&second));
    assert_eq!(directory.contacts()[1], updated);
}

#[test]
fn update_missing_id_changes_nothing() {
    let mut directory = ContactDirectory::from_contacts(redicoin_core::seed_contacts());
    let before = directory.clone();

    let err = directory.update(999, draft("Ghost", "0x0")).unwrap_err();
    assert_eq!(err, DirectoryError::NotFound(999));
    assert_eq!(directory, before);
}

#[test]
fn delete_removes_exactly_one_then_reports_not_found() {
    let mut directory = ContactDirectory::new();
    let mut ids = SequenceIdSource::starting_at(1);
    let b = directory.create(draft("B", "0xb"), &mut ids);
    let a = directory.create(draft("A", "0xa"), &mut ids);

    let removed = directory.delete(b.id).unwrap();
    assert_eq!(removed, b);
    assert_eq!(directory.contacts(), [a.clone()]);

    assert_eq!(directory.delete(b.id), Err(DirectoryError::NotFound(b.id)));
    assert_eq!(directory.len(), 1);
}

#[test]
fn find_by_address_returns_first_match_or_none() {
    let mut directory = ContactDirectory::new();
    let mut ids = SequenceIdSource::starting_at(1);
    directory.create(draft("Older", "0xdup"), &mut ids);
    let newer = directory.create(draft("Newer", "0xdup"), &mut ids);

    assert_eq!(directory.find_by_address("0xdup"), Some(&newer));
    assert_eq!(directory.find_by_address("0xDUP"), None);
    assert!(ContactDirectory::new().find_by_address("0xdup").is_none());
}

#[test]
fn empty_directory_is_valid() {
    let mut directory = ContactDirectory::new();
    assert!(directory.is_empty());
    assert_eq!(directory.delete(1), Err(DirectoryError::NotFound(1)));
    assert!(directory.is_empty());
}
