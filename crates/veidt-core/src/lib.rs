//! Veidt Core Library
//!
//! This crate provides the core functionality for Veidt Health, a
//! local-first membership signup: a JSON record store, member
//! registration, the plan catalog, and the transient UI state of the
//! landing page.
//!
//! # Architecture
//!
//! - **Document**: one JSON object of named collections, the whole state
//! - **Slot**: durable key-value location the document is saved to
//! - **RecordStore**: load/save/insert/find over the document
//!
//! # Quick Start
//!
//! ```text
//! let store = Store::open(&config);
//!
//! let form = SignupForm::new("Ana", "ana@example.com", "secret");
//! let enrollment = signup::enroll(&store, &form, Some(Plan::Pleno))?;
//! ```
//!
//! # Modules
//!
//! - `store`: Record store capability and slot-backed implementation
//! - `document`: The persisted document and its seed defaults
//! - `models`: Users, clinics, memberships and the plan catalog
//! - `session`: Member registration
//! - `signup`: Registration plus membership activation
//! - `storage`: Key-value slots (file and memory)
//! - `ui`: Toasts, modal, image rotator, scoped timers
//! - `config`: Application configuration

pub mod config;
pub mod document;
pub mod models;
pub mod session;
pub mod signup;
pub mod storage;
pub mod store;
pub mod ui;

pub use config::Config;
pub use document::{Document, STORAGE_KEY};
pub use models::{Clinic, Membership, Plan, Role, User};
pub use session::{NewUser, RegistrationError, SessionService};
pub use signup::{enroll, Enrollment, Notice, SignupForm};
pub use storage::{FileSlot, KeyValueSlot, MemorySlot, StorageError};
pub use store::{RecordStore, Store};
