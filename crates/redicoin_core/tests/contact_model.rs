use redicoin_core::{Contact, ContactDraft, ContactType, Workflow};
use serde_json::json;

#[test]
fn contact_decodes_storage_record() {
    let value = json!({
        "id": 1,
        "name": "Ana Clara",
        "username": "ana.rc",
        "address": "0x1A2b3c4D5e6F7g8H9i0J1k2L3m4N5o6P7q8R9s0T",
        "imageUrl": "https://i.pravatar.cc/150?img=1",
        "type": "pessoa"
    });

    let contact: Contact = serde_json::from_value(value.clone()).unwrap();
    assert_eq!(contact.kind, ContactType::Person);
    assert_eq!(contact.image_url, "https://i.pravatar.cc/150?img=1");
    assert_eq!(serde_json::to_value(&contact).unwrap(), value);
}

#[test]
fn apply_draft_keeps_identity_fields() {
    let mut contact = redicoin_core::seed_contacts().remove(2);
    let original = contact.clone();

    contact.apply_draft(ContactDraft::new(
        "Design Co. Ltda",
        "design.rc",
        "0xnew",
        ContactType::Person,
    ));

    assert_eq!(contact.id, original.id);
    assert_eq!(contact.image_url, original.image_url);
    assert_eq!(contact.to_draft().name, "Design Co. Ltda");
    assert_eq!(contact.kind, ContactType::Person);
}

#[test]
fn workflow_serializes_as_tagged_state() {
    assert_eq!(
        serde_json::to_value(Workflow::EditingContact(7)).unwrap(),
        json!({ "state": "editing_contact", "contact_id": 7 })
    );
    assert_eq!(
        serde_json::to_value(Workflow::Closed).unwrap(),
        json!({ "state": "closed" })
    );
}
