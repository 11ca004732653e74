//! Wallet command dispatcher.
//!
//! # Responsibility
//! - Validate and route commands to the balance ledger and contact
//!   directory.
//! - Write the directory through to storage after every mutation.
//! - Emit one notification per successful user-visible command.
//!
//! # Invariants
//! - Opening a workflow is accepted only from `Workflow::Closed`.
//! - Prefilled recipient is only set while transferring.
//! - Rejected commands emit no notification and mutate nothing.
//! - Persistence failures are logged and recorded, never returned.

use crate::config::WalletConfig;
use crate::ident::{wallet_address, ClockIdSource, IdSource, RandomHexSource, TokenSource};
use crate::ledger::balance::{BalanceLedger, TransferReceipt};
use crate::model::contact::{Contact, ContactDraft, ContactId};
use crate::model::workflow::Workflow;
use crate::notify::{messages, Notification, NotificationChannel};
use crate::repo::contact_directory::ContactDirectory;
use crate::service::command::{
    CommandOutput, CommandReply, DeleteToken, DispatchError, DispatchResult, WalletCommand,
    WalletSnapshot,
};
use crate::store::contact_store::{ContactPersistence, LoadSource, PersistenceOutcome};
use crate::store::KeyValueStore;
use log::{debug, error, info};

/// Single owner of the session balance, directory and workflow slot.
pub struct WalletDispatcher<S: KeyValueStore> {
    config: WalletConfig,
    ledger: BalanceLedger,
    directory: ContactDirectory,
    persistence: ContactPersistence<S>,
    notifications: NotificationChannel,
    workflow: Workflow,
    wallet_address: Option<String>,
    prefilled_recipient: Option<Contact>,
    pending_delete: Option<DeleteToken>,
    delete_nonce: u64,
    ids: Box<dyn IdSource>,
    tokens: Box<dyn TokenSource>,
    last_persistence: Option<PersistenceOutcome>,
}

impl<S: KeyValueStore> WalletDispatcher<S> {
    /// Starts a session with clock ids and random wallet tokens.
    ///
    /// # Errors
    /// - `Validation(NegativeBalance)` for an invalid starting balance.
    pub fn start(config: WalletConfig, store: S) -> DispatchResult<Self> {
        Self::start_with_sources(
            config,
            store,
            Box::new(ClockIdSource::new()),
            Box::new(RandomHexSource),
        )
    }

    /// Starts a session with caller-provided generators.
    ///
    /// Loads the directory once from `store`; unreadable content falls back
    /// to the seed set without surfacing an error.
    pub fn start_with_sources(
        config: WalletConfig,
        store: S,
        ids: Box<dyn IdSource>,
        tokens: Box<dyn TokenSource>,
    ) -> DispatchResult<Self> {
        let ledger = BalanceLedger::new(config.initial_balance)?;
        let persistence = ContactPersistence::new(store, config.storage_key.clone());
        let report = persistence.load_or_seed();
        let source = match report.source {
            LoadSource::Stored => "stored",
            LoadSource::Seeded(_) => "seeded",
        };
        info!(
            "event=session_start module=service status=ok contacts_source={source} contacts={} balance={}",
            report.contacts.len(),
            ledger.balance()
        );

        Ok(Self {
            config,
            ledger,
            directory: ContactDirectory::from_contacts(report.contacts),
            persistence,
            notifications: NotificationChannel::new(),
            workflow: Workflow::Closed,
            wallet_address: None,
            prefilled_recipient: None,
            pending_delete: None,
            delete_nonce: 0,
            ids,
            tokens,
            last_persistence: None,
        })
    }

    pub fn config(&self) -> &WalletConfig {
        &self.config
    }

    pub fn balance(&self) -> f64 {
        self.ledger.balance()
    }

    pub fn contacts(&self) -> &[Contact] {
        self.directory.contacts()
    }

    pub fn directory(&self) -> &ContactDirectory {
        &self.directory
    }

    pub fn workflow(&self) -> Workflow {
        self.workflow
    }

    pub fn wallet_address(&self) -> Option<&str> {
        self.wallet_address.as_deref()
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notifications.current()
    }

    pub fn prefilled_recipient(&self) -> Option<&Contact> {
        self.prefilled_recipient.as_ref()
    }

    /// Contact targeted by the open edit workflow.
    pub fn pending_edit(&self) -> Option<&Contact> {
        self.workflow
            .editing_id()
            .and_then(|id| self.directory.get(id))
    }

    /// Outcome of the most recent write-through, if any happened yet.
    pub fn last_persistence(&self) -> Option<&PersistenceOutcome> {
        self.last_persistence.as_ref()
    }

    /// Storage backend the directory is mirrored into.
    pub fn store(&self) -> &S {
        self.persistence.store()
    }

    pub fn snapshot(&self) -> WalletSnapshot {
        WalletSnapshot {
            balance: self.balance(),
            contacts: self.directory.contacts().to_vec(),
            workflow: self.workflow,
            wallet_address: self.wallet_address.clone(),
            notification: self.notifications.current().cloned(),
            prefilled_recipient: self.prefilled_recipient.clone(),
            pending_edit: self.pending_edit().cloned(),
            storage_synced: self
                .last_persistence
                .as_ref()
                .map_or(true, PersistenceOutcome::is_saved),
        }
    }

    /// Runs one command and returns its result with the post-command state.
    pub fn dispatch(&mut self, command: WalletCommand) -> CommandReply {
        let name = command.name();
        let result = self.apply(command);
        if let Err(err) = &result {
            debug!("event=command module=service status=rejected command={name} error={err}");
        }
        CommandReply {
            result,
            snapshot: self.snapshot(),
        }
    }

    fn apply(&mut self, command: WalletCommand) -> DispatchResult<CommandOutput> {
        let done = |_: ()| CommandOutput::Done;
        match command {
            WalletCommand::OpenConnect => self.open_connect().map(done),
            WalletCommand::ConnectWallet => Ok(CommandOutput::WalletConnected {
                address: self.connect_wallet(),
            }),
            WalletCommand::DisconnectWallet => {
                self.disconnect_wallet();
                Ok(CommandOutput::Done)
            }
            WalletCommand::OpenStake => self.open_stake().map(done),
            WalletCommand::Stake { amount } => self
                .stake(amount)
                .map(|balance| CommandOutput::Staked { balance }),
            WalletCommand::OpenTransfer => self.open_transfer().map(done),
            WalletCommand::InitiateTransfer { id } => self.initiate_transfer_to(id).map(done),
            WalletCommand::Transfer { amount, address } => self
                .transfer(amount, &address)
                .map(CommandOutput::Transferred),
            WalletCommand::OpenAddContact => self.open_add_contact().map(done),
            WalletCommand::OpenEditContact { id } => self.open_edit_contact_by_id(id).map(done),
            WalletCommand::SaveContact { draft } => {
                self.save_contact(draft).map(CommandOutput::ContactSaved)
            }
            WalletCommand::RequestDelete { id } => {
                self.request_delete(id).map(CommandOutput::DeleteRequested)
            }
            WalletCommand::ConfirmDelete { token } => {
                self.confirm_delete(token).map(CommandOutput::ContactDeleted)
            }
            WalletCommand::CancelDelete => {
                self.cancel_delete();
                Ok(CommandOutput::Done)
            }
            WalletCommand::CloseWorkflow => {
                self.close_workflow();
                Ok(CommandOutput::Done)
            }
            WalletCommand::DismissNotification => {
                self.dismiss_notification();
                Ok(CommandOutput::Done)
            }
        }
    }

    pub fn open_connect(&mut self) -> DispatchResult<()> {
        self.open(Workflow::Connecting)
    }

    pub fn open_stake(&mut self) -> DispatchResult<()> {
        self.open(Workflow::Staking)
    }

    /// Opens the transfer workflow with an empty recipient.
    pub fn open_transfer(&mut self) -> DispatchResult<()> {
        self.open(Workflow::Transferring)
    }

    /// Opens the transfer workflow with `contact` as the recipient.
    pub fn initiate_transfer(&mut self, contact: &Contact) -> DispatchResult<()> {
        self.open(Workflow::Transferring)?;
        self.prefilled_recipient = Some(contact.clone());
        Ok(())
    }

    /// Like [`Self::initiate_transfer`], resolving the recipient by id in the
    /// same call so it cannot be deleted in between.
    ///
    /// # Errors
    /// - `ContactNotFound` when no contact has `id`.
    pub fn initiate_transfer_to(&mut self, id: ContactId) -> DispatchResult<()> {
        let contact = self.existing(id)?;
        self.initiate_transfer(&contact)
    }

    /// Opens the contact form in create mode.
    pub fn open_add_contact(&mut self) -> DispatchResult<()> {
        self.open(Workflow::AddingContact)
    }

    /// Opens the contact form in edit mode for an existing contact.
    pub fn open_edit_contact(&mut self, contact: &Contact) -> DispatchResult<()> {
        self.open_edit_contact_by_id(contact.id)
    }

    pub fn open_edit_contact_by_id(&mut self, id: ContactId) -> DispatchResult<()> {
        self.existing(id)?;
        self.open(Workflow::EditingContact(id))
    }

    /// Closes whatever workflow is open and drops its transient selections.
    pub fn close_workflow(&mut self) {
        if !self.workflow.is_closed() {
            debug!(
                "event=workflow_close module=service status=ok workflow={}",
                self.workflow.label()
            );
        }
        self.workflow = Workflow::Closed;
        self.prefilled_recipient = None;
    }

    /// Assigns a fresh display-only wallet address.
    pub fn connect_wallet(&mut self) -> String {
        let address = wallet_address(self.tokens.as_mut());
        self.wallet_address = Some(address.clone());
        self.close_workflow();
        self.notifications.emit(messages::wallet_connected());
        info!("event=wallet_connect module=service status=ok");
        address
    }

    /// Forgets the session wallet address. Emits nothing.
    pub fn disconnect_wallet(&mut self) {
        if self.wallet_address.take().is_some() {
            info!("event=wallet_disconnect module=service status=ok");
        }
    }

    /// Stakes `amount` and returns the new balance.
    ///
    /// # Errors
    /// - `Validation` unless `0 < amount <= balance`; the workflow stays open.
    pub fn stake(&mut self, amount: f64) -> DispatchResult<f64> {
        let balance = self.ledger.stake(amount)?;
        if self.workflow == Workflow::Staking {
            self.workflow = Workflow::Closed;
        }
        self.notifications.emit(messages::staked(amount));
        info!("event=stake module=service status=ok amount={amount} balance={balance}");
        Ok(balance)
    }

    /// Transfers `amount` to `address` and resolves the recipient name.
    ///
    /// # Errors
    /// - `Validation` for a bad amount or blank address; the workflow stays
    ///   open and the prefilled recipient is kept.
    pub fn transfer(&mut self, amount: f64, address: &str) -> DispatchResult<TransferReceipt> {
        let receipt = self.ledger.transfer(amount, address, &self.directory)?;
        if self.workflow == Workflow::Transferring {
            self.workflow = Workflow::Closed;
        }
        self.prefilled_recipient = None;
        self.notifications
            .emit(messages::transferred(amount, &receipt.recipient_name));
        info!(
            "event=transfer module=service status=ok amount={amount} balance={}",
            receipt.balance
        );
        Ok(receipt)
    }

    /// Creates or updates a contact depending on the open form mode.
    ///
    /// # Errors
    /// - `Validation(EmptyContactField)` for blank fields.
    /// - `ContactNotFound` when the edited contact vanished.
    pub fn save_contact(&mut self, draft: ContactDraft) -> DispatchResult<Contact> {
        draft.validate()?;

        let (contact, message) = match self.workflow.editing_id() {
            Some(id) => {
                let contact = self.directory.update(id, draft)?;
                let message = messages::contact_updated(&contact.name);
                info!("event=contact_update module=service status=ok contact_id={id}");
                (contact, message)
            }
            None => {
                let contact = self.directory.create(draft, self.ids.as_mut());
                let message = messages::contact_added(&contact.name);
                info!(
                    "event=contact_create module=service status=ok contact_id={}",
                    contact.id
                );
                (contact, message)
            }
        };

        if self.workflow.is_contact_form() {
            self.workflow = Workflow::Closed;
        }
        self.persist();
        self.notifications.emit(message);
        Ok(contact)
    }

    /// First phase of delete: issues a token bound to `id`.
    ///
    /// A newer request supersedes any outstanding token.
    pub fn request_delete(&mut self, id: ContactId) -> DispatchResult<DeleteToken> {
        if self.directory.get(id).is_none() {
            return Err(DispatchError::ContactNotFound(id));
        }
        self.delete_nonce = self.delete_nonce.wrapping_add(1);
        let token = DeleteToken::new(self.delete_nonce, id);
        self.pending_delete = Some(token);
        Ok(token)
    }

    /// Drops the outstanding delete token. Returns whether one existed.
    pub fn cancel_delete(&mut self) -> bool {
        self.pending_delete.take().is_some()
    }

    /// Second phase of delete: removes the contact if `token` is current.
    ///
    /// # Errors
    /// - `StaleConfirmation` for superseded, cancelled or reused tokens.
    /// - `ContactNotFound` when the contact is already gone.
    pub fn confirm_delete(&mut self, token: DeleteToken) -> DispatchResult<Contact> {
        if self.pending_delete != Some(token) {
            return Err(DispatchError::StaleConfirmation);
        }
        self.pending_delete = None;

        let removed = self.directory.delete(token.contact_id())?;
        if self.workflow.editing_id() == Some(removed.id) {
            self.workflow = Workflow::Closed;
        }
        info!(
            "event=contact_delete module=service status=ok contact_id={}",
            removed.id
        );
        self.persist();
        self.notifications
            .emit(messages::contact_deleted(&removed.name));
        Ok(removed)
    }

    /// Clears the pending notification once the UI finished showing it.
    pub fn dismiss_notification(&mut self) -> Option<Notification> {
        self.notifications.dismiss()
    }

    fn open(&mut self, next: Workflow) -> DispatchResult<()> {
        if !self.workflow.is_closed() {
            return Err(DispatchError::WorkflowBusy {
                active: self.workflow,
            });
        }
        debug!(
            "event=workflow_open module=service status=ok workflow={}",
            next.label()
        );
        self.workflow = next;
        Ok(())
    }

    fn existing(&self, id: ContactId) -> DispatchResult<Contact> {
        self.directory
            .get(id)
            .cloned()
            .ok_or(DispatchError::ContactNotFound(id))
    }

    fn persist(&mut self) {
        let outcome = self.persistence.save(self.directory.contacts());
        let key = self.persistence.key();
        match &outcome {
            PersistenceOutcome::Saved { count } => {
                debug!("event=contacts_save module=store status=ok key={key} count={count}");
            }
            PersistenceOutcome::Failed(err) => {
                error!(
                    "event=contacts_save module=store status=error key={key} in_memory=authoritative error={err}"
                );
            }
        }
        self.last_persistence = Some(outcome);
    }
}
