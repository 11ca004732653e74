//! Ordered contact collection with create/update/delete/lookup.

use crate::ident::IdSource;
use crate::model::contact::{generated_image_url, Contact, ContactDraft, ContactId};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type DirectoryResult<T> = Result<T, DirectoryError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectoryError {
    NotFound(ContactId),
}

impl Display for DirectoryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "contact not found: {id}"),
        }
    }
}

impl Error for DirectoryError {}

/// Newest-first contact collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactDirectory {
    contacts: Vec<Contact>,
}

impl ContactDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an already-ordered collection.
    ///
    /// Callers must pass distinct ids; the persistence adapter checks this
    /// before handing stored content over.
    pub fn from_contacts(contacts: Vec<Contact>) -> Self {
        Self { contacts }
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    pub fn get(&self, id: ContactId) -> Option<&Contact> {
        self.contacts.iter().find(|contact| contact.id == id)
    }

    /// First contact whose address equals `address` exactly.
    pub fn find_by_address(&self, address: &str) -> Option<&Contact> {
        self.contacts.iter().find(|contact| contact.address == address)
    }

    /// Creates and prepends a new contact. Never fails.
    ///
    /// # Invariants
    /// - The new id differs from every existing id, even if `ids` repeats
    ///   itself (a colliding id is bumped past the current maximum).
    pub fn create(&mut self, draft: ContactDraft, ids: &mut dyn IdSource) -> Contact {
        let mut id = ids.next_id();
        if self.get(id).is_some() {
            id = self
                .contacts
                .iter()
                .map(|contact| contact.id)
                .max()
                .map_or(id, |max| max.saturating_add(1));
        }

        let contact = Contact::from_draft(id, generated_image_url(id), draft);
        self.contacts.insert(0, contact.clone());
        contact
    }

    /// Replaces editable fields of one contact, keeping `id` and `image_url`.
    ///
    /// # Errors
    /// - `NotFound` when no contact has `id`.
    pub fn update(&mut self, id: ContactId, draft: ContactDraft) -> DirectoryResult<Contact> {
        let contact = self
            .contacts
            .iter_mut()
            .find(|contact| contact.id == id)
            .ok_or(DirectoryError::NotFound(id))?;
        contact.apply_draft(draft);
        Ok(contact.clone())
    }

    /// Removes the first contact with `id` and returns it.
    ///
    /// # Errors
    /// - `NotFound` when no contact has `id`.
    pub fn delete(&mut self, id: ContactId) -> DirectoryResult<Contact> {
        let index = self
            .contacts
            .iter()
            .position(|contact| contact.id == id)
            .ok_or(DirectoryError::NotFound(id))?;
        Ok(self.contacts.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::ContactDirectory;
    use crate::ident::SequenceIdSource;
    use crate::model::contact::{ContactDraft, ContactType};

    fn draft(name: &str) -> ContactDraft {
        ContactDraft::new(name, "user.rc", "0xabc", ContactType::Person)
    }

    #[test]
    fn repeated_ids_are_bumped_past_maximum() {
        let mut directory = ContactDirectory::new();
        let mut ids = SequenceIdSource::from_ids([5, 5, 5]);

        let first = directory.create(draft("a"), &mut ids);
        let second = directory.create(draft("b"), &mut ids);
        let third = directory.create(draft("c"), &mut ids);

        assert_eq!(first.id, 5);
        assert_eq!(second.id, 6);
        assert_eq!(third.id, 7);
    }

    #[test]
    fn created_contact_gets_generated_avatar() {
        let mut directory = ContactDirectory::new();
        let mut ids = SequenceIdSource::starting_at(42);
        let contact = directory.create(draft("a"), &mut ids);
        assert_eq!(contact.image_url, "https://i.pravatar.cc/150?u=42");
    }
}
